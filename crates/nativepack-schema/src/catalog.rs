use serde::{Deserialize, Serialize};

/// A single file under the toolchain folder, packaged next to the
/// dependency libraries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtraFile {
    /// Comment heading the file is listed under in the rendered project.
    pub group: String,
    /// Path relative to the toolchain folder, e.g. `bin/gdbus.exe`.
    pub path: String,
}

/// A directory under the toolchain folder, packaged recursively beneath
/// `link_base`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AssetTree {
    pub group: String,
    /// Tree root relative to the toolchain folder, e.g. `share/locale`.
    pub path: String,
    /// Destination prefix under which the tree's structure is preserved.
    pub link_base: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxiliaryEntry<'a> {
    ExtraFile(&'a ExtraFile),
    AssetTree(&'a AssetTree),
}

/// Fixed list of auxiliary files and trees packaged with every run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AuxiliaryCatalog {
    #[serde(default)]
    pub extra_files: Vec<ExtraFile>,
    #[serde(default)]
    pub asset_trees: Vec<AssetTree>,
}

const SVG_LOADER: &str = "SVG pixbuf loader";
const EXECUTABLES: &str = "Executable binaries";
const ASSETS: &str = "Shared asset folders";

const BUILTIN_EXTRA_FILES: &[(&str, &str)] = &[
    (SVG_LOADER, "bin/libcharset-1.dll"),
    (SVG_LOADER, "bin/librsvg-2-2.dll"),
    (EXECUTABLES, "bin/gdbus.exe"),
    (EXECUTABLES, "bin/gdk-pixbuf-query-loaders.exe"),
    (EXECUTABLES, "bin/gspawn-win64-helper.exe"),
    (EXECUTABLES, "bin/gspawn-win64-helper-console.exe"),
    (EXECUTABLES, "bin/gtk4-query-settings.exe"),
    (EXECUTABLES, "bin/gtk4-update-icon-cache.exe"),
];

const BUILTIN_ASSET_TREES: &[(&str, &str)] = &[
    ("lib/gdk-pixbuf-2.0", "../lib/gdk-pixbuf-2.0"),
    ("share/glib-2.0/schemas", "../share/glib-2.0/schemas"),
    ("share/locale", "../share/locale"),
    ("share/icons/Adwaita", "../share/icons/Adwaita"),
];

impl AuxiliaryCatalog {
    /// The GTK4/libadwaita runtime support files: pixbuf loader libraries,
    /// GLib/GTK helper executables, and the icon, locale, schema, and loader
    /// trees.
    pub fn builtin() -> Self {
        Self {
            extra_files: BUILTIN_EXTRA_FILES
                .iter()
                .map(|(group, path)| ExtraFile {
                    group: (*group).to_owned(),
                    path: (*path).to_owned(),
                })
                .collect(),
            asset_trees: BUILTIN_ASSET_TREES
                .iter()
                .map(|(path, link_base)| AssetTree {
                    group: ASSETS.to_owned(),
                    path: (*path).to_owned(),
                    link_base: (*link_base).to_owned(),
                })
                .collect(),
        }
    }

    /// All entries: extra files first, then asset trees, each in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = AuxiliaryEntry<'_>> {
        self.extra_files
            .iter()
            .map(AuxiliaryEntry::ExtraFile)
            .chain(self.asset_trees.iter().map(AuxiliaryEntry::AssetTree))
    }

    pub fn len(&self) -> usize {
        self.extra_files.len() + self.asset_trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
