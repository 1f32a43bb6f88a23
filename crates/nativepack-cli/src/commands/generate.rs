use super::{
    ensure_prereqs, json_pretty, spin_fail, spin_ok, spinner, ResolveArgs, Settings, EXIT_SUCCESS,
};
use nativepack_core::{GenerateOptions, Generator};
use nativepack_lister::select_lister;
use nativepack_schema::DirectiveKind;
use std::path::Path;

pub fn run(
    config: Option<&Path>,
    args: &ResolveArgs,
    output_dir: &Path,
    dry_run: bool,
    json: bool,
) -> Result<u8, String> {
    let settings = Settings::resolve(config, args)?;
    let lister = select_lister(&settings.lister)
        .map_err(|e| format!("dependency resolution failed: {e}"))?;
    ensure_prereqs(&settings)?;

    let mut options =
        GenerateOptions::from_config(&settings.config, settings.platform, &settings.toolchain)
            .map_err(|e| e.to_string())?;
    options.output_dir = output_dir.to_path_buf();
    options.dry_run = dry_run;

    let pb = if json || dry_run {
        None
    } else {
        Some(spinner(&format!(
            "listing dependencies of {}...",
            options.target
        )))
    };

    let result = match Generator::new(options).generate(lister.as_ref()) {
        Ok(r) => {
            if let Some(ref pb) = pb {
                spin_ok(pb, "package project generated");
            }
            r
        }
        Err(e) => {
            if let Some(ref pb) = pb {
                spin_fail(pb, "generation failed");
            }
            return Err(e.to_string());
        }
    };

    let doc = &result.document;
    let dependencies = doc.directives_of(DirectiveKind::Dependency).count();
    if json {
        let payload = serde_json::json!({
            "platform": doc.platform,
            "package_id": doc.metadata.package_id(doc.platform),
            "path": result.path,
            "digest": result.digest,
            "discovered": result.discovered,
            "dependencies": dependencies,
            "directives": doc.directives,
        });
        println!("{}", json_pretty(&payload)?);
    } else if dry_run {
        print!("{}", result.rendered);
    } else {
        if let Some(path) = &result.path {
            println!("wrote {}", path.display());
        }
        println!(
            "{dependencies} dependencies, {} auxiliary entries for {}",
            doc.directives.len() - dependencies,
            doc.platform
        );
        println!("digest: {}", result.digest);
    }
    Ok(EXIT_SUCCESS)
}
