use crate::metadata::PackageMetadata;
use crate::platform::PlatformIdentifier;
use serde::Serialize;

/// Which part of the input produced a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    /// A library reported by the dependency lister (or the target itself).
    Dependency,
    /// A single file from the auxiliary catalog.
    ExtraFile,
    /// A recursively packaged directory from the auxiliary catalog.
    AssetTree,
}

/// Binds one source path (or recursive glob) to its destination inside the
/// package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// Catalog group heading, `None` for dependency libraries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub source: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_base: Option<String>,
}

/// The assembled packaging manifest for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestDocument {
    pub platform: PlatformIdentifier,
    pub metadata: PackageMetadata,
    pub directives: Vec<Directive>,
}

impl ManifestDocument {
    /// Output file name, e.g. `org.adwaita.native.win-x64.csproj`.
    pub fn file_name(&self) -> String {
        format!("{}.csproj", self.metadata.package_id(self.platform))
    }

    pub fn directives_of(&self, kind: DirectiveKind) -> impl Iterator<Item = &Directive> {
        self.directives.iter().filter(move |d| d.kind == kind)
    }
}
