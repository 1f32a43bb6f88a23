use crate::ListerError;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// External capability reporting the runtime dependencies of a library.
pub trait DependencyLister {
    fn name(&self) -> &str;

    fn available(&self) -> bool;

    /// Run the tool against `target` and return its raw standard output.
    ///
    /// A tool that cannot be started or exits unsuccessfully is an error;
    /// no retry is attempted.
    fn run(&self, target: &str) -> Result<String, ListerError>;
}

/// Inputs needed to construct any of the built-in backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListerOptions {
    /// Backend name; `None` selects [`default_backend_name`].
    pub backend: Option<String>,
    /// MSYS2 installation root used by the `msys` backend.
    pub msys_root: PathBuf,
    /// Captured lister output used by the `transcript` backend.
    pub transcript: Option<PathBuf>,
}

impl Default for ListerOptions {
    fn default() -> Self {
        Self {
            backend: None,
            msys_root: PathBuf::from(nativepack_schema::DEFAULT_MSYS_ROOT),
            transcript: None,
        }
    }
}

/// `msys` on Windows hosts, `ldd` everywhere else.
pub fn default_backend_name() -> &'static str {
    if cfg!(windows) {
        "msys"
    } else {
        "ldd"
    }
}

pub fn select_lister(options: &ListerOptions) -> Result<Box<dyn DependencyLister>, ListerError> {
    let name = options
        .backend
        .as_deref()
        .unwrap_or(default_backend_name());
    match name {
        "msys" => Ok(Box::new(crate::msys::MsysLister::new(&options.msys_root))),
        "ldd" => Ok(Box::new(crate::ldd::LddLister::new())),
        "transcript" => {
            let path = options.transcript.as_ref().ok_or_else(|| {
                ListerError::Config("the transcript backend needs a transcript file".to_owned())
            })?;
            Ok(Box::new(crate::transcript::TranscriptLister::new(path)))
        }
        "mock" => Ok(Box::new(crate::mock::MockLister::default())),
        other => Err(ListerError::UnknownBackend(other.to_owned())),
    }
}

/// Spawn `command` and return its stdout, mapping a missing executable to
/// [`ListerError::Unavailable`] and a non-zero exit to [`ListerError::Failed`].
pub(crate) fn capture_stdout(
    mut command: Command,
    tool: &str,
    hint: &str,
) -> Result<String, ListerError> {
    debug!("running {command:?}");
    let output = match command.output() {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ListerError::Unavailable {
                tool: tool.to_owned(),
                hint: hint.to_owned(),
            });
        }
        Err(e) => return Err(ListerError::Io(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        let detail = if stderr.is_empty() {
            hint.to_owned()
        } else {
            format!("{stderr}. {hint}")
        };
        return Err(ListerError::Failed {
            tool: tool.to_owned(),
            status: output.status.to_string(),
            detail,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
