use super::{colorize_kind, json_pretty, ResolveArgs, Settings, EXIT_SUCCESS};
use nativepack_core::{assemble, SourceRoots};
use nativepack_schema::{DependencyPath, Directive, DirectiveKind};
use std::path::Path;

/// Show the auxiliary directives exactly as `generate` would assemble them
/// for the resolved toolchain folder. Runs no lister.
pub fn run(config: Option<&Path>, args: &ResolveArgs, json: bool) -> Result<u8, String> {
    let settings = Settings::resolve(config, args)?;
    let catalog = settings.config.catalog();
    let roots = SourceRoots {
        install_root: settings.config.lister.install_root.clone(),
        toolchain: settings.toolchain.clone(),
    };
    let doc = assemble(
        settings.platform,
        &roots,
        vec![DependencyPath::new(settings.config.lister.target.as_str())],
        &catalog,
        settings.config.package.clone(),
    )
    .map_err(|e| e.to_string())?;
    let entries: Vec<&Directive> = doc
        .directives
        .iter()
        .filter(|d| d.kind != DirectiveKind::Dependency)
        .collect();

    if json {
        let payload = serde_json::json!({
            "toolchain": settings.toolchain,
            "entries": entries,
        });
        println!("{}", json_pretty(&payload)?);
        return Ok(EXIT_SUCCESS);
    }

    println!("toolchain: {}", settings.toolchain);
    let mut group = None;
    for entry in entries {
        if group != entry.group.as_deref() {
            group = entry.group.as_deref();
            println!("\n{}", group.unwrap_or_default());
        }
        println!(
            "  {} {} -> {}",
            colorize_kind(entry.kind),
            entry.source,
            entry.destination
        );
    }
    Ok(EXIT_SUCCESS)
}
