pub mod catalog;
pub mod completions;
pub mod deps;
pub mod doctor;
pub mod generate;
pub mod man_pages;
pub mod platform;

use indicatif::{ProgressBar, ProgressStyle};
use nativepack_lister::{check_lister_prereqs, default_backend_name, format_missing, ListerOptions};
use nativepack_schema::{
    parse_config_file, DirectiveKind, PackConfig, PlatformIdentifier, DEFAULT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_PLATFORM_ERROR: u8 = 2;
pub const EXIT_DEPENDENCY_ERROR: u8 = 3;
pub const EXIT_CONFIG_ERROR: u8 = 4;

/// Flags shared by every command that lists dependencies or assembles a
/// project. Each one overrides the matching config file value.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Platform identifier to package for (`win-x64`, `osx-arm64`, ...).
    /// Defaults to the host.
    #[arg(long)]
    pub platform: Option<String>,
    /// Library whose dependencies are packaged, in the lister's path syntax.
    #[arg(long)]
    pub target: Option<String>,
    /// Prefix joined in front of every reported dependency path.
    #[arg(long)]
    pub install_root: Option<String>,
    /// MinGW folder holding the auxiliary files and asset trees.
    #[arg(long = "mingw-folder", env = "MinGWFolder")]
    pub mingw_folder: Option<String>,
    /// Lister backend: msys, ldd, transcript, or mock.
    #[arg(long)]
    pub lister: Option<String>,
    /// MSYS2 installation used by the msys lister.
    #[arg(long)]
    pub msys_root: Option<PathBuf>,
    /// Captured lister output to replay (selects the transcript lister).
    #[arg(long)]
    pub transcript: Option<PathBuf>,
    /// Regular expression selecting dependency paths in the lister output.
    #[arg(long)]
    pub filter: Option<String>,
}

/// Config, platform, and lister inputs after applying flag and environment
/// overrides.
#[derive(Debug)]
pub struct Settings {
    pub config: PackConfig,
    pub platform: PlatformIdentifier,
    pub toolchain: String,
    pub lister: ListerOptions,
}

impl Settings {
    pub fn resolve(config_path: Option<&Path>, args: &ResolveArgs) -> Result<Self, String> {
        let platform = resolve_platform(args.platform.as_deref())?;
        let mut config = load_config(config_path)?;

        if let Some(target) = &args.target {
            config.lister.target.clone_from(target);
        }
        if let Some(root) = &args.install_root {
            config.lister.install_root.clone_from(root);
        }
        if let Some(filter) = &args.filter {
            config.lister.filter.clone_from(filter);
        }
        config
            .validate()
            .map_err(|e| format!("config error: {e}"))?;

        let toolchain = args
            .mingw_folder
            .clone()
            .unwrap_or_else(|| config.toolchain.folder.clone());
        debug!("toolchain folder: {toolchain}");

        let transcript = args
            .transcript
            .clone()
            .or_else(|| config.lister.transcript.as_ref().map(PathBuf::from));
        let backend = args.lister.clone().or_else(|| {
            if args.transcript.is_some() {
                Some("transcript".to_owned())
            } else {
                config.lister.backend.clone()
            }
        });
        let lister = ListerOptions {
            backend,
            msys_root: args
                .msys_root
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.lister.msys_root)),
            transcript,
        };

        Ok(Self {
            config,
            platform,
            toolchain,
            lister,
        })
    }

    pub fn backend_name(&self) -> &str {
        self.lister
            .backend
            .as_deref()
            .unwrap_or(default_backend_name())
    }
}

pub fn resolve_platform(raw: Option<&str>) -> Result<PlatformIdentifier, String> {
    let resolved = match raw {
        Some(s) => s.parse(),
        None => PlatformIdentifier::resolve(),
    };
    resolved.map_err(|e| format!("unknown platform: {e}"))
}

/// Load `path`, or `./nativepack.toml` when present, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<PackConfig, String> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                debug!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                return Ok(PackConfig::default());
            }
            default
        }
    };
    debug!("loading config from {}", path.display());
    parse_config_file(&path).map_err(|e| format!("config error: {}: {e}", path.display()))
}

/// Fail early with install guidance when the selected lister's tools are
/// missing. Skipped when `NATIVEPACK_SKIP_PREREQS=1`.
pub fn ensure_prereqs(settings: &Settings) -> Result<(), String> {
    if std::env::var("NATIVEPACK_SKIP_PREREQS").as_deref() == Ok("1") {
        return Ok(());
    }
    let missing = check_lister_prereqs(settings.backend_name(), &settings.lister.msys_root);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "dependency resolution failed: {}",
            format_missing(&missing)
        ))
    }
}

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn spin_fail(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✗ {msg}"));
}

pub fn colorize_kind(kind: DirectiveKind) -> String {
    use console::Style;
    match kind {
        DirectiveKind::Dependency => Style::new().green().apply_to("dependency").to_string(),
        DirectiveKind::ExtraFile => Style::new().cyan().apply_to("file").to_string(),
        DirectiveKind::AssetTree => Style::new().yellow().apply_to("tree").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativepack_schema::{Arch, OsKind, DEFAULT_TARGET};

    fn args() -> ResolveArgs {
        ResolveArgs {
            platform: Some("win-x64".to_owned()),
            ..ResolveArgs::default()
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("nativepack.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn json_pretty_serializes_string() {
        let val = serde_json::json!({"key": "value"});
        let result = json_pretty(&val).unwrap();
        assert!(result.contains("\"key\""));
        assert!(result.contains("\"value\""));
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_FAILURE,
            EXIT_PLATFORM_ERROR,
            EXIT_DEPENDENCY_ERROR,
            EXIT_CONFIG_ERROR,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn platform_override_is_parsed() {
        assert_eq!(
            resolve_platform(Some("linux-arm64")).unwrap(),
            PlatformIdentifier::new(OsKind::Linux, Arch::Arm64)
        );
    }

    #[test]
    fn bad_platform_override_is_platform_error() {
        let err = resolve_platform(Some("beos-x64")).unwrap_err();
        assert!(err.starts_with("unknown platform:"), "{err}");
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[lister]
backend = "ldd"
target = "/ucrt64/bin/libgtk-4-1.dll"
install_root = "D:/msys64"

[toolchain]
folder = "D:/msys64/ucrt64"
"#,
        );
        let args = ResolveArgs {
            target: Some("/ucrt64/bin/libadwaita-1-0.dll".to_owned()),
            mingw_folder: Some("E:/toolchain".to_owned()),
            ..args()
        };
        let settings = Settings::resolve(Some(&path), &args).unwrap();
        assert_eq!(settings.config.lister.target, "/ucrt64/bin/libadwaita-1-0.dll");
        assert_eq!(settings.config.lister.install_root, "D:/msys64");
        assert_eq!(settings.toolchain, "E:/toolchain");
        assert_eq!(settings.backend_name(), "ldd");
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[toolchain]\nfolder = \"D:/msys64/ucrt64\"\n");
        let args = ResolveArgs {
            mingw_folder: None,
            ..args()
        };
        let settings = Settings::resolve(Some(&path), &args).unwrap();
        assert_eq!(settings.toolchain, "D:/msys64/ucrt64");
        assert_eq!(settings.config.lister.target, DEFAULT_TARGET);
    }

    #[test]
    fn transcript_flag_selects_transcript_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let args = ResolveArgs {
            transcript: Some(PathBuf::from("deps.txt")),
            ..args()
        };
        let settings = Settings::resolve(Some(&path), &args).unwrap();
        assert_eq!(settings.backend_name(), "transcript");
        assert_eq!(settings.lister.transcript, Some(PathBuf::from("deps.txt")));
    }

    #[test]
    fn invalid_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[package]\nversion = \"\"\n");
        let err = Settings::resolve(Some(&path), &args()).unwrap_err();
        assert!(err.starts_with("config error:"), "{err}");
    }

    #[test]
    fn empty_target_flag_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let args = ResolveArgs {
            target: Some(String::new()),
            ..args()
        };
        let err = Settings::resolve(Some(&path), &args).unwrap_err();
        assert!(err.contains("lister.target"), "{err}");
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.starts_with("config error:"), "{err}");
    }

    #[test]
    fn colorize_kind_keeps_label() {
        assert!(colorize_kind(DirectiveKind::Dependency).contains("dependency"));
        assert!(colorize_kind(DirectiveKind::AssetTree).contains("tree"));
    }

    #[test]
    fn spinner_creates_progress_bar() {
        let pb = spinner("testing...");
        spin_ok(&pb, "done");
    }

    #[test]
    fn spinner_fail_creates_progress_bar() {
        let pb = spinner("testing...");
        spin_fail(&pb, "failed");
    }
}
