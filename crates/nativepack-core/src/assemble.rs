use crate::CoreError;
use nativepack_schema::{
    dedupe_consecutive, file_name_of, AuxiliaryCatalog, AuxiliaryEntry, DependencyList, Directive,
    DirectiveKind, ManifestDocument, PackageMetadata, PlatformIdentifier,
};
use serde::Serialize;
use tracing::debug;

/// Host-side prefixes that directive sources are rooted at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRoots {
    /// Prefix for dependency paths reported by the lister (`C:/msys64`).
    pub install_root: String,
    /// MinGW prefix for auxiliary catalog entries (`C:/msys64/mingw64`).
    pub toolchain: String,
}

/// Build the manifest document for `platform`.
///
/// Directives are ordered dependencies first (discovery order after
/// consecutive deduplication), then catalog extra files, then catalog asset
/// trees. Performs no I/O.
pub fn assemble(
    platform: PlatformIdentifier,
    roots: &SourceRoots,
    deps: DependencyList,
    catalog: &AuxiliaryCatalog,
    metadata: PackageMetadata,
) -> Result<ManifestDocument, CoreError> {
    if deps.is_empty() {
        return Err(CoreError::EmptyDependencyList);
    }
    let deps = dedupe_consecutive(deps);

    let mut directives = Vec::with_capacity(deps.len() + catalog.len());
    for dep in &deps {
        directives.push(Directive {
            kind: DirectiveKind::Dependency,
            group: None,
            source: join_source(&roots.install_root, dep),
            destination: native_destination(platform, dep.file_name()),
            link_base: None,
        });
    }

    for entry in catalog.entries() {
        let directive = match entry {
            AuxiliaryEntry::ExtraFile(file) => Directive {
                kind: DirectiveKind::ExtraFile,
                group: Some(file.group.clone()),
                source: join_source(&roots.toolchain, &file.path),
                destination: native_destination(platform, file_name_of(&file.path)),
                link_base: None,
            },
            AuxiliaryEntry::AssetTree(tree) => {
                let link_base = tree.link_base.trim_end_matches(['/', '\\']).to_owned();
                let root = join_source(&roots.toolchain, &tree.path);
                Directive {
                    kind: DirectiveKind::AssetTree,
                    group: Some(tree.group.clone()),
                    source: format!("{}/**", root.trim_end_matches(['/', '\\'])),
                    destination: format!("{link_base}/%(RecursiveDir)%(Filename)%(Extension)"),
                    link_base: Some(link_base),
                }
            }
        };
        directives.push(directive);
    }

    debug!(
        "assembled {} directives for {platform} ({} dependencies)",
        directives.len(),
        deps.len()
    );

    Ok(ManifestDocument {
        platform,
        metadata,
        directives,
    })
}

/// `runtimes/<platform>/native/<file name>`
fn native_destination(platform: PlatformIdentifier, file_name: &str) -> String {
    format!("runtimes/{platform}/native/{file_name}")
}

/// Join with exactly one `/` at the seam.
fn join_source(root: &str, relative: &str) -> String {
    let root = root.trim_end_matches(['/', '\\']);
    let relative = relative.trim_start_matches(['/', '\\']);
    format!("{root}/{relative}")
}
