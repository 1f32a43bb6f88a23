//! Dependency listing for nativepack.
//!
//! This crate wraps the external tools that report which shared libraries a
//! native library loads at runtime: a pluggable `DependencyLister` trait with
//! MSYS2 (`bash -lc ldd`), plain `ldd`, captured-transcript and mock backends,
//! the regex `DependencyFilter` that extracts library paths from raw tool
//! output, and prerequisite checks for the tools each backend needs.

pub mod backend;
pub mod filter;
pub mod ldd;
pub mod mock;
pub mod msys;
pub mod prereq;
pub mod transcript;

pub use backend::{default_backend_name, select_lister, DependencyLister, ListerOptions};
pub use filter::{list_dependencies, DependencyFilter};
pub use prereq::{check_lister_prereqs, format_missing, MissingPrereq};

use thiserror::Error;

/// Install hint shown when the MSYS2 toolchain or the target library is missing.
pub const MSYS_INSTALL_HINT: &str =
    "Please install MSYS2, then run 'pacman -S mingw-w64-x86_64-libadwaita' in MSYS2 to install libadwaita.";

#[derive(Debug, Error)]
pub enum ListerError {
    #[error("lister I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("'{tool}' cannot be found. {hint}")]
    Unavailable { tool: String, hint: String },
    #[error("'{tool}' failed ({status}): {detail}")]
    Failed {
        tool: String,
        status: String,
        detail: String,
    },
    #[error("invalid dependency filter: {0}")]
    InvalidFilter(#[from] regex::Error),
    #[error("lister backend '{0}' is not available")]
    UnknownBackend(String),
    #[error("lister configuration error: {0}")]
    Config(String),
}

/// Single-quote a string for POSIX shells.
pub(crate) fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
