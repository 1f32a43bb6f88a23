use crate::msys::bash_path;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// A missing prerequisite with actionable install instructions.
#[derive(Debug)]
pub struct MissingPrereq {
    pub name: String,
    pub purpose: &'static str,
    pub install_hint: &'static str,
}

impl fmt::Display for MissingPrereq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  - {}: {} (install: {})",
            self.name, self.purpose, self.install_hint
        )
    }
}

pub(crate) fn command_exists(name: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check what the named lister backend needs on this machine.
/// Returns a list of missing items; empty means all prerequisites are met.
pub fn check_lister_prereqs(backend: &str, msys_root: &Path) -> Vec<MissingPrereq> {
    let mut missing = Vec::new();

    match backend {
        "msys" => {
            let bash = bash_path(msys_root);
            if !bash.is_file() {
                missing.push(MissingPrereq {
                    name: bash.display().to_string(),
                    purpose: "MSYS2 login shell running ldd",
                    install_hint: "https://www.msys2.org, or set --msys-root",
                });
            }
        }
        "ldd" => {
            if !command_exists("ldd") {
                missing.push(MissingPrereq {
                    name: "ldd".to_owned(),
                    purpose: "listing shared library dependencies",
                    install_hint: "part of glibc / MSYS2 base (usually pre-installed)",
                });
            }
        }
        _ => {}
    }

    missing
}

/// Format a list of missing prerequisites into a user-friendly error message.
pub fn format_missing(missing: &[MissingPrereq]) -> String {
    use std::fmt::Write as _;
    let mut msg = String::from("missing prerequisites:\n");
    for m in missing {
        let _ = writeln!(msg, "{m}");
    }
    msg.push_str("\nnativepack needs these tools to discover native dependencies.");
    msg
}
