//! Coarse icon categories for tree entries.

/// Icon family a tree entry is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Folder,
    Readme,
    Javascript,
    Css,
    Database,
    Html,
    Font,
    Code,
    Markdown,
    Git,
    Php,
    Text,
    Vue,
    Image,
    Video,
    Audio,
    Spreadsheet,
    Archive,
    /// Fallback for unknown or missing extensions.
    File,
}

/// Extension lookup table, lowercase.
const EXTENSION_TABLE: &[(IconCategory, &[&str])] = &[
    (
        IconCategory::Javascript,
        &["js", "jsx", "mjs", "cjs", "ts", "tsx"],
    ),
    (IconCategory::Css, &["css", "scss", "sass", "less", "styl"]),
    (IconCategory::Database, &["yml", "yaml", "sql", "db", "sqlite"]),
    (IconCategory::Html, &["html", "htm", "xhtml"]),
    (IconCategory::Font, &["woff", "woff2", "ttf", "otf", "eot"]),
    (IconCategory::Code, &["json"]),
    (IconCategory::Markdown, &["md", "mdown", "markdown"]),
    (
        IconCategory::Git,
        &["git", "gitattributes", "gitignore", "gitmodules"],
    ),
    (IconCategory::Php, &["php", "phtml"]),
    (IconCategory::Text, &["txt", "log"]),
    (IconCategory::Vue, &["vue"]),
    (
        IconCategory::Image,
        &["jpg", "jpeg", "png", "gif", "svg", "webp", "ico", "bmp", "tiff"],
    ),
    (
        IconCategory::Video,
        &["mp4", "avi", "mov", "webm", "mkv", "flv", "wmv", "m4v"],
    ),
    (
        IconCategory::Audio,
        &["mp3", "wav", "ogg", "flac", "aac", "m4a", "wma"],
    ),
    (IconCategory::Spreadsheet, &["xls", "xlsx", "csv", "ods"]),
    (
        IconCategory::Archive,
        &["zip", "rar", "tar", "gz", "bz2", "7z", "xz"],
    ),
];

impl IconCategory {
    /// Stable lowercase identifier, e.g. for themes or data attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Folder => "folder",
            IconCategory::Readme => "readme",
            IconCategory::Javascript => "javascript",
            IconCategory::Css => "css",
            IconCategory::Database => "database",
            IconCategory::Html => "html",
            IconCategory::Font => "font",
            IconCategory::Code => "code",
            IconCategory::Markdown => "markdown",
            IconCategory::Git => "git",
            IconCategory::Php => "php",
            IconCategory::Text => "text",
            IconCategory::Vue => "vue",
            IconCategory::Image => "image",
            IconCategory::Video => "video",
            IconCategory::Audio => "audio",
            IconCategory::Spreadsheet => "spreadsheet",
            IconCategory::Archive => "archive",
            IconCategory::File => "file",
        }
    }

    /// Nerd Font glyph for the category, or an ASCII tag when icons are off.
    pub fn glyph(&self, use_icons: bool) -> &'static str {
        if !use_icons {
            return match self {
                IconCategory::Folder => "[D] ",
                _ => "[F] ",
            };
        }
        match self {
            IconCategory::Folder => "\u{f07b} ",
            IconCategory::Readme | IconCategory::Text => "\u{f15c} ",
            IconCategory::Javascript => "\u{e74e} ",
            IconCategory::Css => "\u{e749} ",
            IconCategory::Database => "\u{f1c0} ",
            IconCategory::Html => "\u{e736} ",
            IconCategory::Font => "\u{f031} ",
            IconCategory::Code => "\u{e60b} ",
            IconCategory::Markdown => "\u{e73e} ",
            IconCategory::Git => "\u{e702} ",
            IconCategory::Php => "\u{e73d} ",
            IconCategory::Vue => "\u{e6a0} ",
            IconCategory::Image => "\u{f1c5} ",
            IconCategory::Video => "\u{f1c8} ",
            IconCategory::Audio => "\u{f1c7} ",
            IconCategory::Spreadsheet => "\u{f1c3} ",
            IconCategory::Archive => "\u{f1c6} ",
            IconCategory::File => "\u{f15b} ",
        }
    }
}

/// Extension after the last dot, if any non-empty one exists.
fn extension(file_name: &str) -> Option<&str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

/// Classify a file name into an [`IconCategory`].
///
/// Names starting with `README` or `LICENSE` (any case) are always
/// [`IconCategory::Readme`]; everything else goes through the extension table.
pub fn icon_category(file_name: &str) -> IconCategory {
    let lower = file_name.to_lowercase();
    if lower.starts_with("readme") || lower.starts_with("license") {
        return IconCategory::Readme;
    }

    let Some(ext) = extension(&lower) else {
        return IconCategory::File;
    };

    EXTENSION_TABLE
        .iter()
        .find(|(_, exts)| exts.contains(&ext))
        .map(|(category, _)| *category)
        .unwrap_or(IconCategory::File)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme_and_license_special_cased() {
        assert_eq!(icon_category("README.md"), IconCategory::Readme);
        assert_eq!(icon_category("readme"), IconCategory::Readme);
        assert_eq!(icon_category("LICENSE"), IconCategory::Readme);
        assert_eq!(icon_category("License.txt"), IconCategory::Readme);
    }

    #[test]
    fn test_extension_lookup_is_case_insensitive() {
        assert_eq!(icon_category("App.TSX"), IconCategory::Javascript);
        assert_eq!(icon_category("photo.JPG"), IconCategory::Image);
        assert_eq!(icon_category("data.Json"), IconCategory::Code);
    }

    #[test]
    fn test_families() {
        assert_eq!(icon_category("index.js"), IconCategory::Javascript);
        assert_eq!(icon_category("theme.scss"), IconCategory::Css);
        assert_eq!(icon_category("compose.yml"), IconCategory::Database);
        assert_eq!(icon_category("index.html"), IconCategory::Html);
        assert_eq!(icon_category("inter.woff2"), IconCategory::Font);
        assert_eq!(icon_category("notes.md"), IconCategory::Markdown);
        assert_eq!(icon_category(".gitignore"), IconCategory::Git);
        assert_eq!(icon_category("index.php"), IconCategory::Php);
        assert_eq!(icon_category("album.txt"), IconCategory::Text);
        assert_eq!(icon_category("App.vue"), IconCategory::Vue);
        assert_eq!(icon_category("logo.svg"), IconCategory::Image);
        assert_eq!(icon_category("clip.mp4"), IconCategory::Video);
        assert_eq!(icon_category("song.flac"), IconCategory::Audio);
        assert_eq!(icon_category("report.xlsx"), IconCategory::Spreadsheet);
        assert_eq!(icon_category("bundle.tar.gz"), IconCategory::Archive);
    }

    #[test]
    fn test_unknown_or_missing_extension_is_file() {
        assert_eq!(icon_category("main.rs"), IconCategory::File);
        assert_eq!(icon_category("Makefile"), IconCategory::File);
        assert_eq!(icon_category("trailing."), IconCategory::File);
        assert_eq!(icon_category(""), IconCategory::File);
    }

    #[test]
    fn test_ascii_glyphs() {
        assert_eq!(IconCategory::Folder.glyph(false), "[D] ");
        assert_eq!(IconCategory::Image.glyph(false), "[F] ");
    }
}
