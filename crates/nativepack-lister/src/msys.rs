use crate::backend::{capture_stdout, DependencyLister};
use crate::{shell_quote, ListerError, MSYS_INSTALL_HINT};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs `ldd` inside an MSYS2 login shell so that MinGW paths such as
/// `/mingw64/bin/libadwaita-1-0.dll` resolve.
pub struct MsysLister {
    bash: PathBuf,
}

impl MsysLister {
    pub fn new(msys_root: &Path) -> Self {
        Self {
            bash: bash_path(msys_root),
        }
    }

    pub fn bash(&self) -> &Path {
        &self.bash
    }

    fn command(&self, target: &str) -> Command {
        let mut cmd = Command::new(&self.bash);
        cmd.args(["-lc", &format!("ldd {}", shell_quote(target))]);
        cmd
    }
}

/// Location of the MSYS2 bash executable under `msys_root`.
pub fn bash_path(msys_root: &Path) -> PathBuf {
    msys_root.join("usr").join("bin").join("bash.exe")
}

impl DependencyLister for MsysLister {
    fn name(&self) -> &'static str {
        "msys"
    }

    fn available(&self) -> bool {
        self.bash.is_file()
    }

    fn run(&self, target: &str) -> Result<String, ListerError> {
        if !self.available() {
            return Err(ListerError::Unavailable {
                tool: self.bash.display().to_string(),
                hint: MSYS_INSTALL_HINT.to_owned(),
            });
        }
        capture_stdout(
            self.command(target),
            &self.bash.display().to_string(),
            MSYS_INSTALL_HINT,
        )
    }
}
