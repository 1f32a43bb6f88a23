use crate::assemble::{assemble, SourceRoots};
use crate::render::{digest, render_csproj};
use crate::CoreError;
use nativepack_lister::{list_dependencies, DependencyFilter, DependencyLister};
use nativepack_schema::{
    dedupe_consecutive, AuxiliaryCatalog, DependencyList, ManifestDocument, PackConfig,
    PackageMetadata, PlatformIdentifier,
};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything one run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub platform: PlatformIdentifier,
    /// Library whose dependencies are packaged.
    pub target: String,
    pub roots: SourceRoots,
    pub filter: DependencyFilter,
    pub catalog: AuxiliaryCatalog,
    pub metadata: PackageMetadata,
    pub output_dir: PathBuf,
    /// Render but do not write the output file.
    pub dry_run: bool,
}

impl GenerateOptions {
    /// Options from a loaded config. `toolchain` is the already-resolved
    /// toolchain folder (flag, `MinGWFolder`, or config value).
    pub fn from_config(
        config: &PackConfig,
        platform: PlatformIdentifier,
        toolchain: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            platform,
            target: config.lister.target.clone(),
            roots: SourceRoots {
                install_root: config.lister.install_root.clone(),
                toolchain: toolchain.to_owned(),
            },
            filter: DependencyFilter::new(&config.lister.filter)?,
            catalog: config.catalog(),
            metadata: config.package.clone(),
            output_dir: PathBuf::from("."),
            dry_run: false,
        })
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct GenerateResult {
    pub document: ManifestDocument,
    pub rendered: String,
    pub digest: String,
    /// Number of paths reported before deduplication, target included.
    pub discovered: usize,
    /// Written file; `None` on a dry run.
    pub path: Option<PathBuf>,
}

/// Drives one run: list, dedupe, assemble, render, write.
pub struct Generator {
    options: GenerateOptions,
}

impl Generator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// List and consecutively deduplicate the target's dependencies.
    /// The target is the final entry.
    pub fn resolve_dependencies(
        &self,
        lister: &dyn DependencyLister,
    ) -> Result<(DependencyList, usize), CoreError> {
        let raw = list_dependencies(lister, &self.options.target, &self.options.filter)?;
        let discovered = raw.len();
        let deduped = dedupe_consecutive(raw);
        debug!(
            "{discovered} dependency paths, {} after deduplication",
            deduped.len()
        );
        Ok((deduped, discovered))
    }

    pub fn generate(&self, lister: &dyn DependencyLister) -> Result<GenerateResult, CoreError> {
        let opts = &self.options;
        info!("generating package project for {}", opts.platform);

        let (deps, discovered) = self.resolve_dependencies(lister)?;
        let document = assemble(
            opts.platform,
            &opts.roots,
            deps,
            &opts.catalog,
            opts.metadata.clone(),
        )?;
        let rendered = render_csproj(&document);
        let digest = digest(&rendered);

        let path = if opts.dry_run {
            debug!("dry run: not writing {}", document.file_name());
            None
        } else {
            Some(write_manifest(&opts.output_dir, &document, &rendered)?)
        };

        Ok(GenerateResult {
            document,
            rendered,
            digest,
            discovered,
            path,
        })
    }
}

/// Atomically write `rendered` to `<dir>/<document file name>`.
pub fn write_manifest(
    dir: &Path,
    document: &ManifestDocument,
    rendered: &str,
) -> Result<PathBuf, CoreError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(document.file_name());
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(rendered.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path).map_err(|e| CoreError::Io(e.error))?;
    info!("wrote {}", path.display());
    Ok(path)
}
