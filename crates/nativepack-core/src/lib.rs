//! Core orchestration for nativepack runs.
//!
//! This crate ties the schema and lister crates together: `assemble` turns a
//! platform identifier, a deduplicated dependency list and the auxiliary
//! catalog into a `ManifestDocument`, `render_csproj` writes that document as
//! an MSBuild project, and the `Generator` drives one complete run from
//! dependency listing to the atomically written output file.

pub mod assemble;
pub mod engine;
pub mod render;

pub use assemble::{assemble, SourceRoots};
pub use engine::{write_manifest, GenerateOptions, GenerateResult, Generator};
pub use render::{digest, render_csproj};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    Platform(#[from] nativepack_schema::PlatformError),
    #[error("dependency resolution failed: {0}")]
    DependencyResolution(#[from] nativepack_lister::ListerError),
    #[error("config error: {0}")]
    Config(#[from] nativepack_schema::ConfigError),
    #[error("dependency list is empty; nothing to package")]
    EmptyDependencyList,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
