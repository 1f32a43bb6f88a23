//! Data model and pure transformations for nativepack.
//!
//! This crate defines the schema layer: host platform identification
//! (`PlatformIdentifier`), dependency path newtypes and consecutive
//! deduplication (`dedupe_consecutive`), the built-in auxiliary file catalog
//! (`AuxiliaryCatalog`), packaging directives and the assembled
//! `ManifestDocument`, static package metadata, and the optional
//! `nativepack.toml` configuration file.

pub mod catalog;
pub mod config;
pub mod dedupe;
pub mod directive;
pub mod metadata;
pub mod platform;
pub mod types;

pub use catalog::{AssetTree, AuxiliaryCatalog, AuxiliaryEntry, ExtraFile};
pub use config::{
    parse_config_file, parse_config_str, ConfigError, ListerSection, PackConfig, ToolchainSection,
    DEFAULT_CONFIG_FILE, DEFAULT_FILTER, DEFAULT_INSTALL_ROOT, DEFAULT_MSYS_ROOT, DEFAULT_TARGET,
    DEFAULT_TOOLCHAIN_FOLDER,
};
pub use dedupe::dedupe_consecutive;
pub use directive::{Directive, DirectiveKind, ManifestDocument};
pub use metadata::PackageMetadata;
pub use platform::{Arch, OsKind, PlatformError, PlatformIdentifier};
pub use types::{file_name_of, DependencyList, DependencyPath};
