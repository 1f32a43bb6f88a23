//! CLI subprocess integration tests.
//!
//! These tests invoke the `nativepack` binary as a subprocess against a
//! captured lister transcript and verify exit codes, stdout content, and the
//! generated project file.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const TRANSCRIPT: &str = "\
\tntdll.dll => /c/WINDOWS/SYSTEM32/ntdll.dll (0x7ffb3a7b0000)
\tlibgtk-4-1.dll => /mingw64/bin/libgtk-4-1.dll (0x7ffaf0e30000)
\tlibglib-2.0-0.dll => /mingw64/bin/libglib-2.0-0.dll (0x7ffb0e8f0000)
\tlibglib-2.0-0.dll => /mingw64/bin/libglib-2.0-0.dll (0x7ffb0e8f0000)
";

const BUILTIN_CATALOG_LEN: usize = 12;

fn nativepack_bin(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nativepack"));
    cmd.current_dir(cwd);
    cmd.env("NATIVEPACK_SKIP_PREREQS", "1");
    cmd.env_remove("MinGWFolder");
    cmd.env_remove("NATIVEPACK_LOG");
    cmd
}

fn write_transcript(dir: &Path) -> PathBuf {
    let path = dir.join("ldd.txt");
    std::fs::write(&path, TRANSCRIPT).unwrap();
    path
}

fn generate(dir: &Path, extra: &[&str]) -> Output {
    let transcript = write_transcript(dir);
    nativepack_bin(dir)
        .args(["generate", "--platform", "win-x64", "--transcript"])
        .arg(&transcript)
        .args(extra)
        .output()
        .unwrap()
}

fn code(output: &Output) -> i32 {
    output.status.code().unwrap()
}

#[test]
fn cli_version_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = nativepack_bin(dir.path()).arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nativepack"), "{stdout}");
}

#[test]
fn cli_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = nativepack_bin(dir.path()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["generate", "platform", "deps", "catalog", "doctor"] {
        assert!(stdout.contains(name), "help must list '{name}'");
    }
}

#[test]
fn generate_writes_platform_named_project() {
    let dir = tempfile::tempdir().unwrap();
    let output = generate(dir.path(), &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let path = dir.path().join("org.adwaita.native.win-x64.csproj");
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("<NativeLibrary ").count(), 3 + BUILTIN_CATALOG_LEN);
    assert!(text.contains("<RuntimeIdentifier>win-x64</RuntimeIdentifier>"));
    assert!(text.contains(
        r#"<NativeLibrary Include="C:/msys64/mingw64/bin/libadwaita-1-0.dll" />"#
    ));
}

#[test]
fn generate_json_reports_directives_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let output = generate(dir.path(), &["--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["platform"], "win-x64");
    assert_eq!(json["package_id"], "org.adwaita.native.win-x64");
    assert_eq!(json["discovered"], 4);
    assert_eq!(json["dependencies"], 3);

    let directives = json["directives"].as_array().unwrap();
    assert_eq!(directives.len(), 3 + BUILTIN_CATALOG_LEN);
    assert_eq!(directives[0]["source"], "C:/msys64/mingw64/bin/libgtk-4-1.dll");
    assert_eq!(directives[2]["kind"], "dependency");
    assert_eq!(
        directives[2]["destination"],
        "runtimes/win-x64/native/libadwaita-1-0.dll"
    );
    assert_eq!(directives[3]["kind"], "extra_file");
    assert_eq!(directives.last().unwrap()["kind"], "asset_tree");
}

#[test]
fn mingw_folder_env_moves_catalog_sources() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = write_transcript(dir.path());
    let output = nativepack_bin(dir.path())
        .env("MinGWFolder", "D:/msys64/ucrt64")
        .args(["generate", "--platform", "win-x64", "--json", "--transcript"])
        .arg(&transcript)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let directives = json["directives"].as_array().unwrap();
    assert_eq!(directives[0]["source"], "C:/msys64/mingw64/bin/libgtk-4-1.dll");
    assert_eq!(directives[3]["source"], "D:/msys64/ucrt64/bin/libcharset-1.dll");
}

#[test]
fn dry_run_prints_project_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = generate(dir.path(), &["--dry-run"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<Project Sdk=\"Microsoft.NET.Sdk\">"));
    assert!(!dir
        .path()
        .join("org.adwaita.native.win-x64.csproj")
        .exists());
}

#[test]
fn missing_transcript_is_dependency_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = nativepack_bin(dir.path())
        .args(["generate", "--platform", "win-x64", "--transcript", "absent.txt"])
        .output()
        .unwrap();
    assert_eq!(code(&output), 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dependency resolution failed"), "{stderr}");
    assert!(!dir
        .path()
        .join("org.adwaita.native.win-x64.csproj")
        .exists());
}

#[test]
fn unknown_platform_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = write_transcript(dir.path());
    let output = nativepack_bin(dir.path())
        .args(["generate", "--platform", "beos-x64", "--transcript"])
        .arg(&transcript)
        .output()
        .unwrap();
    assert_eq!(code(&output), 2);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown platform"), "{stderr}");
}

#[test]
fn invalid_config_exits_four() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("nativepack.toml"), "[output]\ndir = \"x\"\n").unwrap();
    let output = generate(dir.path(), &[]);
    assert_eq!(code(&output), 4);
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("nativepack.toml"),
        "[package]\nid_prefix = \"org.gtk.native\"\nversion = \"4.16.0\"\n",
    )
    .unwrap();
    let output = generate(dir.path(), &[]);
    assert!(output.status.success());
    let text =
        std::fs::read_to_string(dir.path().join("org.gtk.native.win-x64.csproj")).unwrap();
    assert!(text.contains("<Version>4.16.0</Version>"));
}

#[test]
fn platform_command_normalizes_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = nativepack_bin(dir.path())
        .args(["platform", "--platform", "OSX-AARCH64"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "osx-arm64");
}

#[test]
fn deps_json_lists_deduplicated_paths() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = write_transcript(dir.path());
    let output = nativepack_bin(dir.path())
        .args(["deps", "--json", "--platform", "linux-x64", "--transcript"])
        .arg(&transcript)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["lister"], "transcript");
    assert_eq!(
        json["dependencies"],
        serde_json::json!([
            "/mingw64/bin/libgtk-4-1.dll",
            "/mingw64/bin/libglib-2.0-0.dll",
            "/mingw64/bin/libadwaita-1-0.dll",
        ])
    );
}

#[test]
fn catalog_json_lists_builtin_entries() {
    let dir = tempfile::tempdir().unwrap();
    let output = nativepack_bin(dir.path())
        .args(["catalog", "--json", "--platform", "win-x64"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["toolchain"], "C:/msys64/mingw64");
    assert_eq!(json["entries"].as_array().unwrap().len(), BUILTIN_CATALOG_LEN);
}
