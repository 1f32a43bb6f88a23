use crate::catalog::AuxiliaryCatalog;
use crate::metadata::PackageMetadata;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "nativepack.toml";

pub const DEFAULT_TARGET: &str = "/mingw64/bin/libadwaita-1-0.dll";
pub const DEFAULT_INSTALL_ROOT: &str = "C:/msys64";
pub const DEFAULT_MSYS_ROOT: &str = "C:/msys64";
pub const DEFAULT_TOOLCHAIN_FOLDER: &str = "C:/msys64/mingw64";
/// Matches MSYS2 MinGW library paths in `ldd` output.
pub const DEFAULT_FILTER: &str = r"/mingw[^\s]*\.dll";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackConfig {
    #[serde(default)]
    pub package: PackageMetadata,
    #[serde(default)]
    pub lister: ListerSection,
    #[serde(default)]
    pub toolchain: ToolchainSection,
    /// Replaces the built-in auxiliary catalog when present.
    #[serde(default)]
    pub catalog: Option<AuxiliaryCatalog>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ListerSection {
    /// Backend name; `None` picks the host default (`msys` on Windows,
    /// `ldd` elsewhere).
    pub backend: Option<String>,
    /// Library whose dependencies are listed, in the lister's path syntax.
    pub target: String,
    /// Prefix joined in front of every reported dependency path.
    pub install_root: String,
    /// Regular expression selecting dependency paths in the lister output.
    pub filter: String,
    /// MSYS2 installation used by the `msys` backend.
    pub msys_root: String,
    /// Captured lister output used by the `transcript` backend.
    pub transcript: Option<String>,
}

impl Default for ListerSection {
    fn default() -> Self {
        Self {
            backend: None,
            target: DEFAULT_TARGET.to_owned(),
            install_root: DEFAULT_INSTALL_ROOT.to_owned(),
            filter: DEFAULT_FILTER.to_owned(),
            msys_root: DEFAULT_MSYS_ROOT.to_owned(),
            transcript: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainSection {
    /// MinGW prefix holding the auxiliary catalog files. `MinGWFolder`
    /// overrides it.
    pub folder: String,
}

impl Default for ToolchainSection {
    fn default() -> Self {
        Self {
            folder: DEFAULT_TOOLCHAIN_FOLDER.to_owned(),
        }
    }
}

impl PackConfig {
    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> AuxiliaryCatalog {
        self.catalog.clone().unwrap_or_else(AuxiliaryCatalog::builtin)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package.id_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("package.id_prefix must not be empty".to_owned()));
        }
        if self.package.version.trim().is_empty() {
            return Err(ConfigError::Invalid("package.version must not be empty".to_owned()));
        }
        if self.lister.target.trim().is_empty() {
            return Err(ConfigError::Invalid("lister.target must not be empty".to_owned()));
        }
        if self.toolchain.folder.trim().is_empty() {
            return Err(ConfigError::Invalid("toolchain.folder must not be empty".to_owned()));
        }
        if let Some(catalog) = &self.catalog {
            for file in &catalog.extra_files {
                if file.path.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "catalog extra file path must not be empty".to_owned(),
                    ));
                }
            }
            for tree in &catalog.asset_trees {
                if tree.path.trim().is_empty() || tree.link_base.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "asset tree '{}' needs both a path and a link_base",
                        tree.path
                    )));
                }
            }
        }
        Ok(())
    }
}

pub fn parse_config_str(input: &str) -> Result<PackConfig, ConfigError> {
    let config: PackConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

pub fn parse_config_file(path: impl AsRef<Path>) -> Result<PackConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}
