//! Theme data model: built-in palettes and resolution from config.

use ratatui::style::Color;

use tinita::config::{ThemeColorsConfig, ThemeConfig};
use tinita::tree::IconCategory;

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tree
    pub tree_fg: Color,
    pub tree_selected_bg: Color,
    pub tree_selected_fg: Color,
    pub tree_dir_fg: Color,
    pub tree_file_fg: Color,
    pub guide_fg: Color,

    // Ticker
    pub ticker_fg: Color,
    pub ticker_paused_fg: Color,

    // Status bar & chrome
    pub status_bg: Color,
    pub status_fg: Color,
    pub border_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub accent_fg: Color,
    pub success_fg: Color,
    pub warning_fg: Color,
    pub dim_fg: Color,
}

impl ThemeColors {
    /// Foreground for a file icon family. Folders use `tree_dir_fg`.
    pub fn icon_fg(&self, icon: IconCategory) -> Color {
        match icon {
            IconCategory::Folder => self.tree_dir_fg,
            IconCategory::Readme | IconCategory::Markdown | IconCategory::Text => self.success_fg,
            IconCategory::Image | IconCategory::Video | IconCategory::Audio => self.accent_fg,
            IconCategory::Archive | IconCategory::Database | IconCategory::Spreadsheet => {
                self.warning_fg
            }
            _ => self.tree_file_fg,
        }
    }
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        tree_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        tree_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        tree_dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        tree_file_fg: Color::Rgb(205, 214, 244),     // #cdd6f4
        guide_fg: Color::Rgb(88, 91, 112),           // #585b70 (surface2)

        ticker_fg: Color::Rgb(249, 226, 175),        // #f9e2af (yellow)
        ticker_paused_fg: Color::Rgb(108, 112, 134), // #6c7086 (overlay0)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),
        border_fg: Color::Rgb(88, 91, 112),

        accent_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        warning_fg: Color::Rgb(250, 179, 135), // #fab387 (peach)
        dim_fg: Color::Rgb(108, 112, 134),
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(76, 79, 105),              // #4c4f69 (text)
        tree_selected_bg: Color::Rgb(204, 208, 218),   // #ccd0da (surface1)
        tree_selected_fg: Color::Rgb(76, 79, 105),
        tree_dir_fg: Color::Rgb(30, 102, 245),         // #1e66f5 (blue)
        tree_file_fg: Color::Rgb(76, 79, 105),
        guide_fg: Color::Rgb(172, 176, 190),           // #acb0be (surface2)

        ticker_fg: Color::Rgb(223, 142, 29),           // #df8e1d (yellow)
        ticker_paused_fg: Color::Rgb(156, 160, 176),   // #9ca0b0 (overlay0)

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),
        border_fg: Color::Rgb(172, 176, 190),

        accent_fg: Color::Rgb(136, 57, 239),  // #8839ef (mauve)
        success_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        warning_fg: Color::Rgb(254, 100, 11), // #fe640b (peach)
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn apply(slot: &mut Color, hex: Option<&String>) {
    if let Some(color) = hex.and_then(|h| parse_hex_color(h)) {
        *slot = color;
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("dark") {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(),
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    apply(&mut theme.tree_fg, custom.tree_fg.as_ref());
    apply(&mut theme.tree_selected_bg, custom.tree_selected_bg.as_ref());
    apply(&mut theme.tree_selected_fg, custom.tree_selected_fg.as_ref());
    apply(&mut theme.tree_dir_fg, custom.tree_dir_fg.as_ref());
    apply(&mut theme.tree_file_fg, custom.tree_file_fg.as_ref());
    apply(&mut theme.guide_fg, custom.guide_fg.as_ref());
    apply(&mut theme.ticker_fg, custom.ticker_fg.as_ref());
    apply(&mut theme.status_bg, custom.status_bg.as_ref());
    apply(&mut theme.status_fg, custom.status_fg.as_ref());
    apply(&mut theme.border_fg, custom.border_fg.as_ref());
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_valid() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("1a1b26"), Some(Color::Rgb(26, 27, 38)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_resolve_schemes() {
        let light = resolve_theme(&ThemeConfig {
            scheme: Some("light".to_string()),
            custom: None,
        });
        assert_eq!(light.tree_dir_fg, Color::Rgb(30, 102, 245));

        let fallback = resolve_theme(&ThemeConfig {
            scheme: Some("neon".to_string()),
            custom: None,
        });
        assert_eq!(fallback.tree_dir_fg, Color::Rgb(137, 180, 250));
        assert_eq!(
            resolve_theme(&ThemeConfig::default()).tree_dir_fg,
            Color::Rgb(137, 180, 250)
        );
    }

    #[test]
    fn test_resolve_custom_overrides() {
        let config = ThemeConfig {
            scheme: Some("custom".to_string()),
            custom: Some(ThemeColorsConfig {
                ticker_fg: Some("#c0caf5".to_string()),
                border_fg: Some("#zzzzzz".to_string()),
                ..Default::default()
            }),
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.ticker_fg, Color::Rgb(192, 202, 245));
        // Invalid hex keeps the dark palette value.
        assert_eq!(theme.border_fg, Color::Rgb(88, 91, 112));
    }

    #[test]
    fn test_icon_colors() {
        let theme = dark_theme();
        assert_eq!(theme.icon_fg(IconCategory::Folder), theme.tree_dir_fg);
        assert_eq!(theme.icon_fg(IconCategory::Image), theme.accent_fg);
        assert_eq!(theme.icon_fg(IconCategory::Javascript), theme.tree_file_fg);
    }
}
