use super::{ensure_prereqs, json_pretty, ResolveArgs, Settings, EXIT_SUCCESS};
use nativepack_core::{GenerateOptions, Generator};
use nativepack_lister::select_lister;
use std::path::Path;

/// List, filter, and deduplicate without assembling or writing anything.
pub fn run(config: Option<&Path>, args: &ResolveArgs, json: bool) -> Result<u8, String> {
    let settings = Settings::resolve(config, args)?;
    let lister = select_lister(&settings.lister)
        .map_err(|e| format!("dependency resolution failed: {e}"))?;
    ensure_prereqs(&settings)?;

    let options =
        GenerateOptions::from_config(&settings.config, settings.platform, &settings.toolchain)
            .map_err(|e| e.to_string())?;
    let (deps, discovered) = Generator::new(options)
        .resolve_dependencies(lister.as_ref())
        .map_err(|e| e.to_string())?;

    if json {
        let payload = serde_json::json!({
            "lister": lister.name(),
            "target": settings.config.lister.target,
            "discovered": discovered,
            "dependencies": deps,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        for dep in &deps {
            println!("{dep}");
        }
        eprintln!(
            "{} dependencies ({discovered} reported by {})",
            deps.len(),
            lister.name()
        );
    }
    Ok(EXIT_SUCCESS)
}
