//! Host operating system and CPU architecture mapped onto .NET runtime
//! identifiers (`win-x64`, `osx-arm64`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("the OS type could not be determined: '{0}'")]
    UnknownOs(String),
    #[error("the CPU architecture type could not be determined: '{0}'")]
    UnknownArch(String),
    #[error("malformed platform identifier '{0}', expected '<os>-<arch>'")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsKind {
    Windows,
    MacOs,
    Linux,
}

impl OsKind {
    /// Map a host OS indicator (`std::env::consts::OS` style) to an OS kind.
    pub fn from_host(indicator: &str) -> Result<Self, PlatformError> {
        match indicator {
            "windows" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            other => Err(PlatformError::UnknownOs(other.to_owned())),
        }
    }

    /// Runtime identifier token for this OS.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "win",
            Self::MacOs => "osx",
            Self::Linux => "linux",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "win" => Some(Self::Windows),
            "osx" => Some(Self::MacOs),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X64,
    Arm64,
}

impl Arch {
    /// Map a host CPU identifier to an architecture, ignoring case.
    pub fn from_host(machine: &str) -> Result<Self, PlatformError> {
        match machine.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Ok(Self::X64),
            "aarch64" | "arm64" => Ok(Self::Arm64),
            _ => Err(PlatformError::UnknownArch(machine.to_owned())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
        }
    }
}

/// Canonical `<os>-<arch>` identifier selecting the `runtimes/<id>/native`
/// packaging destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformIdentifier {
    pub os: OsKind,
    pub arch: Arch,
}

impl PlatformIdentifier {
    pub fn new(os: OsKind, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Resolve the identifier of the machine this process runs on.
    pub fn resolve() -> Result<Self, PlatformError> {
        Self::from_host(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Resolve from explicit host indicators. Fails if either axis is unknown.
    pub fn from_host(os: &str, arch: &str) -> Result<Self, PlatformError> {
        Ok(Self {
            os: OsKind::from_host(os)?,
            arch: Arch::from_host(arch)?,
        })
    }
}

impl fmt::Display for PlatformIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.arch.as_str())
    }
}

impl FromStr for PlatformIdentifier {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((os_raw, arch_raw)) = trimmed.split_once('-') else {
            return Err(PlatformError::Malformed(s.to_owned()));
        };
        let os = OsKind::from_token(&os_raw.to_ascii_lowercase())
            .ok_or_else(|| PlatformError::UnknownOs(os_raw.to_owned()))?;
        let arch = Arch::from_host(arch_raw)?;
        Ok(Self { os, arch })
    }
}

impl Serialize for PlatformIdentifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlatformIdentifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
