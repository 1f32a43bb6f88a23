//! MSBuild project rendering for an assembled [`ManifestDocument`].

use nativepack_schema::{Directive, DirectiveKind, ManifestDocument};
use std::fmt::Write as _;

const NATIVE_COMMENT: &str = "Native libraries can only be in native directories";

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Render `doc` as a `.csproj` packing every directive into the
/// `runtimes/<platform>/native` folder of a NuGet package.
///
/// Identical documents render to identical text.
pub fn render_csproj(doc: &ManifestDocument) -> String {
    let meta = &doc.metadata;
    let platform = doc.platform;
    let mut out = String::new();

    let _ = writeln!(out, r#"<Project Sdk="Microsoft.NET.Sdk">"#);
    let _ = writeln!(out, "  <PropertyGroup>");
    property(&mut out, "PackageLicenseExpression", &meta.license);
    property(&mut out, "PackageReadmeFile", &meta.readme);
    property(&mut out, "OutputType", "Library");
    property(&mut out, "TargetFrameworks", &meta.target_frameworks.join(";"));
    if !meta.no_warn.is_empty() {
        property(&mut out, "NoWarn", &meta.no_warn.join(";"));
    }
    property(&mut out, "RuntimeIdentifier", &platform.to_string());
    property(&mut out, "AssemblyName", &meta.assembly_name);
    property(&mut out, "Version", &meta.version);
    out.push('\n');
    property(&mut out, "PackageProjectUrl", &meta.project_url);
    property(&mut out, "RepositoryUrl", &meta.repository_url);
    property(&mut out, "PackageTags", &meta.tags.join(" "));
    out.push('\n');
    let _ = writeln!(out, "    <!-- Nuget Properties -->");
    let _ = writeln!(out, "    <Description>");
    for line in &meta.description {
        let _ = writeln!(out, "    {}", xml_escape(line));
    }
    let _ = writeln!(out, "    </Description>");
    property(&mut out, "IncludeBuildOutput", "false");
    out.push('\n');
    let _ = writeln!(out, "    <!-- Pack Option -->");
    property(&mut out, "Title", &meta.package_title(platform));
    property(&mut out, "PackageId", &meta.package_id(platform));
    out.push('\n');
    let _ = writeln!(out, "    <!-- Signing -->");
    property(&mut out, "SignAssembly", "false");
    property(&mut out, "PublicSign", "false");
    property(&mut out, "DelaySign", "false");
    let _ = writeln!(out, "  </PropertyGroup>");
    out.push('\n');

    if !meta.readme.is_empty() {
        let _ = writeln!(out, "  <ItemGroup>");
        let _ = writeln!(
            out,
            r#"    <None Include="./{}" Pack="true" PackagePath="/" />"#,
            xml_escape(&meta.readme)
        );
        let _ = writeln!(out, "  </ItemGroup>");
        out.push('\n');
    }

    let _ = writeln!(out, "  <ItemGroup>");
    let _ = writeln!(out, "    <!-- {NATIVE_COMMENT} -->");
    let mut current_group: Option<&str> = None;
    for directive in &doc.directives {
        if directive.kind != DirectiveKind::Dependency {
            let group = directive.group.as_deref().unwrap_or_default();
            if current_group != Some(group) {
                out.push('\n');
                if !group.is_empty() {
                    let _ = writeln!(out, "    <!-- {} -->", xml_escape(group));
                }
                current_group = Some(group);
            }
        }
        native_library(&mut out, directive);
    }
    let _ = writeln!(out, "  </ItemGroup>");
    out.push('\n');

    let _ = writeln!(out, "  <ItemGroup>");
    let _ = writeln!(out, r#"    <Content Include="@(NativeLibrary)">"#);
    let _ = writeln!(
        out,
        "      <PackagePath>runtimes/{platform}/native/%(Filename)%(Extension)</PackagePath>"
    );
    let _ = writeln!(out, "      <Pack>true</Pack>");
    let _ = writeln!(
        out,
        "      <CopyToOutputDirectory>PreserveNewest</CopyToOutputDirectory>"
    );
    let _ = writeln!(out, "    </Content>");
    let _ = writeln!(out, "  </ItemGroup>");
    out.push('\n');
    let _ = writeln!(out, "</Project>");
    out
}

fn property(out: &mut String, name: &str, value: &str) {
    let _ = writeln!(out, "    <{name}>{}</{name}>", xml_escape(value));
}

fn native_library(out: &mut String, directive: &Directive) {
    match &directive.link_base {
        Some(link_base) => {
            let _ = writeln!(
                out,
                r#"    <NativeLibrary Include="{}" LinkBase="{}" />"#,
                xml_escape(&directive.source),
                xml_escape(link_base)
            );
        }
        None => {
            let _ = writeln!(
                out,
                r#"    <NativeLibrary Include="{}" />"#,
                xml_escape(&directive.source)
            );
        }
    }
}

/// Blake3 hex digest of rendered text, for comparing runs.
pub fn digest(rendered: &str) -> String {
    blake3::hash(rendered.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{assemble, SourceRoots};
    use nativepack_schema::{
        Arch, AuxiliaryCatalog, DependencyPath, OsKind, PackageMetadata, PlatformIdentifier,
    };

    fn sample(meta: PackageMetadata) -> ManifestDocument {
        assemble(
            PlatformIdentifier::new(OsKind::Windows, Arch::X64),
            &SourceRoots {
                install_root: "C:/msys64".to_owned(),
                toolchain: "C:/msys64/mingw64".to_owned(),
            },
            vec![
                DependencyPath::new("/mingw64/bin/libglib-2.0-0.dll"),
                DependencyPath::new("/mingw64/bin/libadwaita-1-0.dll"),
            ],
            &AuxiliaryCatalog::builtin(),
            meta,
        )
        .unwrap()
    }

    #[test]
    fn renders_package_properties() {
        let text = render_csproj(&sample(PackageMetadata::default()));
        assert!(text.starts_with("<Project Sdk=\"Microsoft.NET.Sdk\">\n"));
        assert!(text.contains("<RuntimeIdentifier>win-x64</RuntimeIdentifier>"));
        assert!(text.contains("<PackageId>org.adwaita.native.win-x64</PackageId>"));
        assert!(text.contains("<Title>Adwaita win-x64 v1.6.3</Title>"));
        assert!(text.contains(
            "<TargetFrameworks>netstandard2.0;netcoreapp3.1;net6.0;net8.0</TargetFrameworks>"
        ));
        assert!(text.contains("<NoWarn>NU5128</NoWarn>"));
        assert!(text.contains("<PackageLicenseExpression>LGPL-2.1-or-later</PackageLicenseExpression>"));
        assert!(text.trim_end().ends_with("</Project>"));
    }

    #[test]
    fn renders_native_libraries_in_directive_order() {
        let text = render_csproj(&sample(PackageMetadata::default()));
        let glib = text
            .find(r#"<NativeLibrary Include="C:/msys64/mingw64/bin/libglib-2.0-0.dll" />"#)
            .unwrap();
        let adw = text
            .find(r#"<NativeLibrary Include="C:/msys64/mingw64/bin/libadwaita-1-0.dll" />"#)
            .unwrap();
        let gdbus = text
            .find(r#"<NativeLibrary Include="C:/msys64/mingw64/bin/gdbus.exe" />"#)
            .unwrap();
        let locale = text
            .find(r#"<NativeLibrary Include="C:/msys64/mingw64/share/locale/**" LinkBase="../share/locale" />"#)
            .unwrap();
        assert!(glib < adw && adw < gdbus && gdbus < locale);
        assert_eq!(text.matches("<NativeLibrary ").count(), 14);
    }

    #[test]
    fn group_comments_appear_once() {
        let text = render_csproj(&sample(PackageMetadata::default()));
        assert_eq!(text.matches("<!-- SVG pixbuf loader -->").count(), 1);
        assert_eq!(text.matches("<!-- Executable binaries -->").count(), 1);
        assert_eq!(text.matches("<!-- Shared asset folders -->").count(), 1);
    }

    #[test]
    fn content_maps_to_runtime_native_folder() {
        let text = render_csproj(&sample(PackageMetadata::default()));
        assert!(text.contains(
            "<PackagePath>runtimes/win-x64/native/%(Filename)%(Extension)</PackagePath>"
        ));
        assert!(text.contains(r#"<None Include="./README.md" Pack="true" PackagePath="/" />"#));
    }

    #[test]
    fn escapes_xml_special_characters() {
        let meta = PackageMetadata {
            description: vec!["GTK & <friends>".to_owned()],
            ..PackageMetadata::default()
        };
        let text = render_csproj(&sample(meta));
        assert!(text.contains("GTK &amp; &lt;friends&gt;"));
        assert!(!text.contains("GTK & <friends>"));
        assert_eq!(xml_escape(r#"a"b"#), "a&quot;b");
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_csproj(&sample(PackageMetadata::default()));
        let b = render_csproj(&sample(PackageMetadata::default()));
        assert_eq!(a, b);
        assert_eq!(digest(&a), digest(&b));
        assert_eq!(digest(&a).len(), 64);
    }

    #[test]
    fn version_change_changes_digest() {
        let a = render_csproj(&sample(PackageMetadata::default()));
        let b = render_csproj(&sample(PackageMetadata {
            version: "1.7.0".to_owned(),
            ..PackageMetadata::default()
        }));
        assert_ne!(digest(&a), digest(&b));
    }
}
