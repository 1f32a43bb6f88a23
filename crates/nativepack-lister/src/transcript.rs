use crate::backend::DependencyLister;
use crate::ListerError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Replays lister output captured earlier, e.g. `ldd lib.dll > deps.txt`
/// on the build machine.
pub struct TranscriptLister {
    path: PathBuf,
}

impl TranscriptLister {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl DependencyLister for TranscriptLister {
    fn name(&self) -> &'static str {
        "transcript"
    }

    fn available(&self) -> bool {
        self.path.is_file()
    }

    fn run(&self, target: &str) -> Result<String, ListerError> {
        debug!(
            "reading dependency transcript for {target} from {}",
            self.path.display()
        );
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ListerError::Unavailable {
                tool: self.path.display().to_string(),
                hint: "Capture the lister output to this file first.".to_owned(),
            }),
            Err(e) => Err(ListerError::Io(e)),
        }
    }
}
