use super::{json_pretty, resolve_platform, ResolveArgs, Settings, EXIT_FAILURE, EXIT_SUCCESS};
use nativepack_lister::{check_lister_prereqs, format_missing, select_lister};
use serde::Serialize;
use std::path::Path;

pub fn run(config: Option<&Path>, args: &ResolveArgs, json_output: bool) -> Result<u8, String> {
    let mut checks: Vec<Check> = Vec::new();

    match resolve_platform(args.platform.as_deref()) {
        Ok(platform) => checks.push(Check::pass("platform", &format!("Platform: {platform}"))),
        Err(e) => {
            checks.push(Check::fail("platform", &e));
            return print_results(&checks, json_output);
        }
    }

    let settings = match Settings::resolve(config, args) {
        Ok(s) => {
            checks.push(Check::pass("config", "Configuration is valid"));
            s
        }
        Err(e) => {
            checks.push(Check::fail("config", &e));
            return print_results(&checks, json_output);
        }
    };

    check_lister(&settings, &mut checks);
    check_toolchain(&settings, &mut checks);

    print_results(&checks, json_output)
}

fn check_lister(settings: &Settings, checks: &mut Vec<Check>) {
    let backend = settings.backend_name();
    let lister = match select_lister(&settings.lister) {
        Ok(l) => l,
        Err(e) => {
            checks.push(Check::fail("lister", &e.to_string()));
            return;
        }
    };

    let missing = check_lister_prereqs(backend, &settings.lister.msys_root);
    if missing.is_empty() && lister.available() {
        checks.push(Check::pass(
            "lister",
            &format!("Lister '{backend}' is available"),
        ));
    } else if missing.is_empty() {
        checks.push(Check::fail(
            "lister",
            &format!("Lister '{backend}' is not usable on this machine"),
        ));
    } else {
        checks.push(Check::fail("lister", &format_missing(&missing)));
    }
}

fn check_toolchain(settings: &Settings, checks: &mut Vec<Check>) {
    let toolchain = Path::new(&settings.toolchain);
    if !toolchain.is_dir() {
        checks.push(Check::warn(
            "toolchain",
            &format!(
                "Toolchain folder {} not found (set MinGWFolder or --mingw-folder)",
                toolchain.display()
            ),
        ));
        return;
    }
    checks.push(Check::pass(
        "toolchain",
        &format!("Toolchain folder {}", toolchain.display()),
    ));

    let catalog = settings.config.catalog();
    let mut absent: Vec<&str> = catalog
        .extra_files
        .iter()
        .filter(|f| !toolchain.join(&f.path).is_file())
        .map(|f| f.path.as_str())
        .collect();
    absent.extend(
        catalog
            .asset_trees
            .iter()
            .filter(|t| !toolchain.join(&t.path).is_dir())
            .map(|t| t.path.as_str()),
    );
    if absent.is_empty() {
        checks.push(Check::pass(
            "catalog",
            &format!("All {} catalog entries present", catalog.len()),
        ));
    } else {
        checks.push(Check::warn(
            "catalog",
            &format!(
                "{} of {} catalog entries missing: {}",
                absent.len(),
                catalog.len(),
                absent.join(", ")
            ),
        ));
    }

    let target = settings.config.lister.target.trim_start_matches(['/', '\\']);
    let target_path = Path::new(&settings.config.lister.install_root).join(target);
    if target_path.is_file() {
        checks.push(Check::pass(
            "target",
            &format!("Target library {}", target_path.display()),
        ));
    } else {
        checks.push(Check::warn(
            "target",
            &format!("Target library {} not found", target_path.display()),
        ));
    }
}

fn print_results(checks: &[Check], json_output: bool) -> Result<u8, String> {
    let healthy = checks.iter().all(|c| c.status != "fail");
    if json_output {
        let payload = serde_json::json!({
            "healthy": healthy,
            "checks": checks,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("nativepack doctor\n");
        for check in checks {
            let icon = match check.status {
                "pass" => "✓",
                "fail" => "✗",
                "warn" => "⚠",
                _ => "ℹ",
            };
            println!("  {icon} {}", check.message);
        }
        println!();
        if healthy {
            println!("All checks passed.");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }
    Ok(if healthy { EXIT_SUCCESS } else { EXIT_FAILURE })
}

#[derive(Debug, Serialize)]
struct Check {
    name: &'static str,
    status: &'static str,
    message: String,
}

impl Check {
    fn pass(name: &'static str, message: &str) -> Self {
        Self::new(name, "pass", message)
    }

    fn fail(name: &'static str, message: &str) -> Self {
        Self::new(name, "fail", message)
    }

    fn warn(name: &'static str, message: &str) -> Self {
        Self::new(name, "warn", message)
    }

    fn new(name: &'static str, status: &'static str, message: &str) -> Self {
        Self {
            name,
            status,
            message: message.to_owned(),
        }
    }
}
