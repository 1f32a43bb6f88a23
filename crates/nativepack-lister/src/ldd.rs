use crate::backend::{capture_stdout, DependencyLister};
use crate::ListerError;
use std::process::Command;

const LDD_HINT: &str = "Install the platform C library tools that provide 'ldd'.";

/// Runs the host `ldd` directly, for MSYS2 shells or Linux hosts where the
/// target path is already native.
#[derive(Debug, Default)]
pub struct LddLister;

impl LddLister {
    pub fn new() -> Self {
        Self
    }
}

impl DependencyLister for LddLister {
    fn name(&self) -> &'static str {
        "ldd"
    }

    fn available(&self) -> bool {
        crate::prereq::command_exists("ldd")
    }

    fn run(&self, target: &str) -> Result<String, ListerError> {
        let mut cmd = Command::new("ldd");
        cmd.arg(target);
        capture_stdout(cmd, "ldd", LDD_HINT)
    }
}
