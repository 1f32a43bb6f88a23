use crate::platform::PlatformIdentifier;
use serde::{Deserialize, Serialize};

/// Static package properties copied into the generated project.
///
/// Only `version` is expected to change between releases; everything else
/// describes the packaged library. Missing fields in a config file fall back
/// to the libadwaita defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PackageMetadata {
    /// Package id stem; the platform identifier is appended after a dot.
    pub id_prefix: String,
    pub assembly_name: String,
    /// Human name used in the package title (`<title> <platform> v<version>`).
    pub title: String,
    pub version: String,
    pub license: String,
    pub readme: String,
    pub target_frameworks: Vec<String>,
    pub no_warn: Vec<String>,
    pub project_url: String,
    pub repository_url: String,
    pub tags: Vec<String>,
    pub description: Vec<String>,
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            id_prefix: "org.adwaita.native".to_owned(),
            assembly_name: "Adwaita.Native".to_owned(),
            title: "Adwaita".to_owned(),
            version: "1.6.3".to_owned(),
            license: "LGPL-2.1-or-later".to_owned(),
            readme: "README.md".to_owned(),
            target_frameworks: ["netstandard2.0", "netcoreapp3.1", "net6.0", "net8.0"]
                .map(str::to_owned)
                .to_vec(),
            no_warn: vec!["NU5128".to_owned()],
            project_url:
                "https://github.com/PlatinumLucario/VGMusicStudio/tree/new-gui-experimental/CreateNugets"
                    .to_owned(),
            repository_url: "https://gitlab.gnome.org/GNOME/libadwaita/".to_owned(),
            tags: ["adwaita", "libadwaita", "gtk", "glib", "gio", "native", "runtime"]
                .map(str::to_owned)
                .to_vec(),
            description: vec![
                "Building blocks for modern GNOME applications.".to_owned(),
                "Source code repository: https://gitlab.gnome.org/GNOME/libadwaita/".to_owned(),
            ],
        }
    }
}

impl PackageMetadata {
    pub fn package_id(&self, platform: PlatformIdentifier) -> String {
        format!("{}.{platform}", self.id_prefix)
    }

    pub fn package_title(&self, platform: PlatformIdentifier) -> String {
        format!("{} {platform} v{}", self.title, self.version)
    }
}
