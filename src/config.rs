//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--hide-root`, `--direction`, etc.)
//! 2. `--config FILE`
//! 3. `$TINITA_CONFIG` environment variable (path to config file)
//! 4. Project-local `.tinita.toml` in the current working directory
//! 5. Global `~/.config/tinita/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

use crate::ticker::{Direction, TickerConfig, Trigger, DEFAULT_SPEED_MS};
use crate::tree::ViewOptions;

// ── Section configs ──────────────────────────────────────────────────────────

/// Tree view settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Show the children of a lone root instead of the root itself.
    pub hide_root_name: Option<bool>,
    /// Use nerd font icons (false = ASCII fallback).
    pub use_icons: Option<bool>,
    /// Draw the box-drawing guide lines.
    pub indicator: Option<bool>,
    /// Folders start expanded.
    pub expanded: Option<bool>,
}

/// Ticker settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TickerSection {
    /// "left", "right", "top" or "bottom".
    pub direction: Option<String>,
    /// "on-load" or "in-view".
    pub trigger: Option<String>,
    /// Duration of one loop, in milliseconds.
    pub speed_ms: Option<u64>,
    /// Start delay, in milliseconds.
    pub delay_ms: Option<u64>,
    /// Extra look-ahead before the visible copy, in pixels (cells in a terminal).
    pub overflow_buffer: Option<f64>,
    /// Pause while hovered.
    pub pause_on_hover: Option<bool>,
    /// Let copies show past the ticker frame.
    pub overflow_visible: Option<bool>,
    /// Fade the content out towards both edges of the scroll axis.
    pub fade: Option<bool>,
    /// Hex colour the edges fade into.
    pub fade_color: Option<String>,
}

/// Input file watcher settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WatcherConfig {
    /// Re-parse the tree file when it changes.
    pub enabled: Option<bool>,
    /// Debounce interval in milliseconds.
    pub debounce_ms: Option<u64>,
}

/// Color overrides for the "custom" scheme.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub tree_selected_bg: Option<String>,
    pub tree_selected_fg: Option<String>,
    pub tree_dir_fg: Option<String>,
    pub tree_file_fg: Option<String>,
    pub guide_fg: Option<String>,
    pub ticker_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub tree: TreeConfig,
    pub ticker: TickerSection,
    pub watcher: WatcherConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("TINITA_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".tinita.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("tinita").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning logged).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config file");
            None
        }
    }
}

/// Parse an enum-like setting, warning and falling back on unknown values.
fn parse_or_default<T: FromStr + Default>(value: Option<&str>) -> T
where
    T::Err: std::fmt::Display,
{
    match value.map(str::parse::<T>) {
        Some(Ok(parsed)) => parsed,
        Some(Err(e)) => {
            warn!(error = %e, "using default");
            T::default()
        }
        None => T::default(),
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            tree: TreeConfig {
                hide_root_name: other.tree.hide_root_name.or(self.tree.hide_root_name),
                use_icons: other.tree.use_icons.or(self.tree.use_icons),
                indicator: other.tree.indicator.or(self.tree.indicator),
                expanded: other.tree.expanded.or(self.tree.expanded),
            },
            ticker: TickerSection {
                direction: other
                    .ticker
                    .direction
                    .clone()
                    .or(self.ticker.direction),
                trigger: other.ticker.trigger.clone().or(self.ticker.trigger),
                speed_ms: other.ticker.speed_ms.or(self.ticker.speed_ms),
                delay_ms: other.ticker.delay_ms.or(self.ticker.delay_ms),
                overflow_buffer: other
                    .ticker
                    .overflow_buffer
                    .or(self.ticker.overflow_buffer),
                pause_on_hover: other.ticker.pause_on_hover.or(self.ticker.pause_on_hover),
                overflow_visible: other
                    .ticker
                    .overflow_visible
                    .or(self.ticker.overflow_visible),
                fade: other.ticker.fade.or(self.ticker.fade),
                fade_color: other.ticker.fade_color.clone().or(self.ticker.fade_color),
            },
            watcher: WatcherConfig {
                enabled: other.watcher.enabled.or(self.watcher.enabled),
                debounce_ms: other.watcher.debounce_ms.or(self.watcher.debounce_ms),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn hide_root_name(&self) -> bool {
        self.tree.hide_root_name.unwrap_or(false)
    }

    pub fn use_icons(&self) -> bool {
        self.tree.use_icons.unwrap_or(true)
    }

    pub fn indicator(&self) -> bool {
        self.tree.indicator.unwrap_or(true)
    }

    pub fn expanded(&self) -> bool {
        self.tree.expanded.unwrap_or(true)
    }

    /// Tree view options assembled from the `[tree]` section.
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            hide_root_name: self.hide_root_name(),
            expanded: self.expanded(),
        }
    }

    pub fn direction(&self) -> Direction {
        parse_or_default(self.ticker.direction.as_deref())
    }

    pub fn trigger(&self) -> Trigger {
        parse_or_default(self.ticker.trigger.as_deref())
    }

    pub fn speed_ms(&self) -> u64 {
        self.ticker.speed_ms.unwrap_or(DEFAULT_SPEED_MS)
    }

    pub fn delay_ms(&self) -> u64 {
        self.ticker.delay_ms.unwrap_or(0)
    }

    /// Overflow buffer in cells. Non-finite or negative values fall back to 0.
    pub fn overflow_buffer(&self) -> f64 {
        match self.ticker.overflow_buffer {
            Some(buffer) if buffer.is_finite() && buffer >= 0.0 => buffer,
            Some(buffer) => {
                warn!(overflow_buffer = buffer, "invalid overflow buffer; using default");
                0.0
            }
            None => 0.0,
        }
    }

    pub fn pause_on_hover(&self) -> bool {
        self.ticker.pause_on_hover.unwrap_or(false)
    }

    pub fn overflow_visible(&self) -> bool {
        self.ticker.overflow_visible.unwrap_or(false)
    }

    pub fn fade(&self) -> bool {
        self.ticker.fade.unwrap_or(false)
    }

    /// Fade colour as configured. Hosts fall back to their own default.
    pub fn fade_color(&self) -> Option<&str> {
        self.ticker.fade_color.as_deref()
    }

    /// Ticker options assembled from the `[ticker]` section.
    pub fn ticker_config(&self) -> TickerConfig {
        TickerConfig {
            direction: self.direction(),
            trigger: self.trigger(),
            speed_ms: self.speed_ms(),
            delay_ms: self.delay_ms(),
            overflow_buffer_px: self.overflow_buffer(),
            pause_on_hover: self.pause_on_hover(),
            overflow_visible: self.overflow_visible(),
            fade: self.fade(),
        }
    }

    pub fn watcher_enabled(&self) -> bool {
        self.watcher.enabled.unwrap_or(true)
    }

    pub fn debounce_ms(&self) -> u64 {
        self.watcher.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert!(!cfg.hide_root_name());
        assert!(cfg.use_icons());
        assert!(cfg.indicator());
        assert!(cfg.expanded());
        assert_eq!(cfg.direction(), Direction::Left);
        assert_eq!(cfg.trigger(), Trigger::OnLoad);
        assert_eq!(cfg.speed_ms(), 10_000);
        assert_eq!(cfg.delay_ms(), 0);
        assert_eq!(cfg.overflow_buffer(), 0.0);
        assert!(!cfg.pause_on_hover());
        assert!(!cfg.fade());
        assert!(!cfg.overflow_visible());
        assert!(cfg.watcher_enabled());
        assert_eq!(cfg.debounce_ms(), 300);
        assert_eq!(cfg.theme_scheme(), "dark");
        assert_eq!(cfg.ticker_config(), TickerConfig::default());
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r#"
[tree]
hide_root_name = true
use_icons = false
indicator = false
expanded = false

[ticker]
direction = "bottom"
trigger = "in-view"
speed_ms = 4000
delay_ms = 250
overflow_buffer = 120.0
pause_on_hover = true

[watcher]
enabled = false
debounce_ms = 500

[theme]
scheme = "light"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert!(cfg.hide_root_name());
        assert!(!cfg.use_icons());
        assert!(!cfg.indicator());
        assert!(!cfg.expanded());
        assert_eq!(cfg.direction(), Direction::Bottom);
        assert_eq!(cfg.trigger(), Trigger::InView);
        assert_eq!(cfg.speed_ms(), 4000);
        assert_eq!(cfg.delay_ms(), 250);
        assert_eq!(cfg.overflow_buffer(), 120.0);
        assert!(cfg.pause_on_hover());
        assert!(!cfg.watcher_enabled());
        assert_eq!(cfg.debounce_ms(), 500);
        assert_eq!(cfg.theme_scheme(), "light");
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[ticker]
direction = "right"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.direction(), Direction::Right);
        assert_eq!(cfg.trigger(), Trigger::OnLoad);
        assert!(cfg.use_icons());
    }

    #[test]
    fn test_toml_parsing_empty() {
        let cfg: AppConfig = toml::from_str("").expect("parse failed");
        assert!(!cfg.hide_root_name());
        assert_eq!(cfg.speed_ms(), DEFAULT_SPEED_MS);
    }

    #[test]
    fn test_invalid_enum_values_fall_back() {
        let toml = r#"
[ticker]
direction = "diagonal"
trigger = "whenever"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.direction(), Direction::Left);
        assert_eq!(cfg.trigger(), Trigger::OnLoad);
    }

    #[test]
    fn test_invalid_overflow_buffer_falls_back() {
        for value in ["inf", "-inf", "nan", "-12.5"] {
            let toml = format!("[ticker]\noverflow_buffer = {value}\n");
            let cfg: AppConfig = toml::from_str(&toml).expect("parse failed");
            assert_eq!(cfg.overflow_buffer(), 0.0, "value {value}");
            assert_eq!(cfg.ticker_config().overflow_buffer_px, 0.0);
        }

        let cfg: AppConfig = toml::from_str("[ticker]\noverflow_buffer = 1e30\n").unwrap();
        assert_eq!(cfg.overflow_buffer(), 1e30);
    }

    #[test]
    fn test_fade_and_overflow_settings() {
        let toml = r##"
[ticker]
fade = true
fade_color = "#1e1e2e"
overflow_visible = true
"##;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        let ticker = cfg.ticker_config();
        assert!(ticker.fade);
        assert!(ticker.overflow_visible);
        assert_eq!(cfg.fade_color(), Some("#1e1e2e"));

        let merged = cfg.merge(&AppConfig {
            ticker: TickerSection {
                fade: Some(false),
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(!merged.fade());
        assert!(merged.overflow_visible());
        assert_eq!(merged.fade_color(), Some("#1e1e2e"));
        assert_eq!(AppConfig::default().fade_color(), None);
    }

    #[test]
    fn test_merge_overrides() {
        let base = AppConfig {
            tree: TreeConfig {
                hide_root_name: Some(false),
                use_icons: Some(false),
                ..Default::default()
            },
            ticker: TickerSection {
                speed_ms: Some(5000),
                delay_ms: Some(100),
                ..Default::default()
            },
            ..Default::default()
        };

        let over = AppConfig {
            tree: TreeConfig {
                hide_root_name: Some(true),
                ..Default::default()
            },
            ticker: TickerSection {
                speed_ms: Some(2000),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert!(merged.hide_root_name()); // overridden
        assert!(!merged.use_icons()); // from base
        assert_eq!(merged.speed_ms(), 2000); // overridden
        assert_eq!(merged.delay_ms(), 100); // from base
    }

    #[test]
    fn test_merge_none_does_not_clear_some() {
        let base = AppConfig {
            watcher: WatcherConfig {
                enabled: Some(false),
                debounce_ms: Some(500),
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        assert!(!merged.watcher_enabled());
        assert_eq!(merged.debounce_ms(), 500);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("test-config.toml");
        let mut f = std::fs::File::create(&cfg_path).expect("create");
        writeln!(
            f,
            r#"
[tree]
hide_root_name = true

[ticker]
trigger = "in-view"
"#
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load");
        assert!(cfg.hide_root_name());
        assert_eq!(cfg.trigger(), Trigger::InView);
        assert_eq!(cfg.speed_ms(), DEFAULT_SPEED_MS);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn test_load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        assert!(load_file(&cfg_path).is_none());
    }

    #[test]
    fn test_load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[ticker]
direction = "top"
speed_ms = 6000
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            ticker: TickerSection {
                speed_ms: Some(1500),
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert_eq!(cfg.speed_ms(), 1500);
        assert_eq!(cfg.direction(), Direction::Top);
    }

    #[test]
    fn test_view_options_from_config() {
        let cfg = AppConfig {
            tree: TreeConfig {
                hide_root_name: Some(true),
                expanded: Some(false),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            cfg.view_options(),
            ViewOptions {
                hide_root_name: true,
                expanded: false
            }
        );
    }

    #[test]
    fn test_theme_custom_colors() {
        let toml = r##"
[theme]
scheme = "custom"

[theme.custom]
tree_fg = "#c0caf5"
ticker_fg = "#f9e2af"
"##;
        let cfg: AppConfig = toml::from_str(toml).expect("parse");
        assert_eq!(cfg.theme_scheme(), "custom");
        let custom = cfg.theme.custom.as_ref().expect("custom present");
        assert_eq!(custom.tree_fg.as_deref(), Some("#c0caf5"));
        assert_eq!(custom.ticker_fg.as_deref(), Some("#f9e2af"));
        assert!(custom.border_fg.is_none());
    }
}
