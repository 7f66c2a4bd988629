use std::path::{Path, PathBuf};
use std::time::Instant;

use ratatui::style::Color;
use tracing::{debug, info, warn};

use tinita::config::AppConfig;
use tinita::error::Result;
use tinita::ticker::{Direction, LayoutOutcome, TickerConfig, TickerController};
use tinita::tree::{detect_format, parse, TreeFormat, TreeView};

use crate::components::ticker::{TerminalAnimation, TerminalHost};
use crate::theme::ThemeColors;

/// Slowest and fastest loop durations reachable with `+`/`-`.
const MIN_SPEED_MS: u64 = 1_000;
const MAX_SPEED_MS: u64 = 120_000;
const SPEED_STEP_MS: u64 = 1_000;

/// A parsed tree text shown as a navigable tree.
pub struct TreeScreen {
    pub view: TreeView,
    /// File the text came from. `None` for stdin.
    pub source: Option<PathBuf>,
    pub format: TreeFormat,
    /// Length of the last text parsed.
    pub bytes: u64,
    pub use_icons: bool,
    pub indicator: bool,
    pub watching: bool,
}

impl TreeScreen {
    pub fn new(text: &str, source: Option<PathBuf>, config: &AppConfig) -> Self {
        let format = detect_format(text);
        let view = TreeView::new(parse(text), config.view_options());
        debug!(format = format.label(), rows = view.rows().len(), "tree loaded");
        Self {
            view,
            source,
            format,
            bytes: text.len() as u64,
            use_icons: config.use_icons(),
            indicator: config.indicator(),
            watching: false,
        }
    }

    /// Label for the status bar: the file name, or `<stdin>`.
    pub fn source_label(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<stdin>".to_string())
    }
}

/// A list of items scrolling forever.
pub struct TickerScreen {
    pub controller: TickerController<TerminalAnimation>,
    pub host: TerminalHost,
    /// Colour the edges fade into when fading is enabled.
    pub fade_color: Color,
    mounted: bool,
    resize_pending: bool,
}

impl TickerScreen {
    pub fn new(items: Vec<String>, config: TickerConfig) -> Self {
        let controller = TickerController::new(config, items.len());
        Self {
            controller,
            host: TerminalHost::new(items),
            fade_color: Color::Reset,
            mounted: false,
            resize_pending: false,
        }
    }

    pub fn with_fade_color(mut self, color: Color) -> Self {
        self.fade_color = color;
        self
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Runs once a frame has been drawn, when the ticker area is known.
    fn after_frame(&mut self) {
        if !self.mounted {
            match self.controller.mount(&mut self.host) {
                LayoutOutcome::NotReady => debug!("ticker not measurable yet"),
                outcome => {
                    debug!(?outcome, "ticker mounted");
                    self.mounted = true;
                    self.resize_pending = false;
                }
            }
        } else if self.resize_pending && self.host.is_watching_resize() {
            if self.controller.on_resize(&mut self.host) != LayoutOutcome::NotReady {
                self.resize_pending = false;
            }
        }

        let area = self.host.area();
        if self.controller.is_awaiting_visibility()
            && self.host.is_watching_visibility()
            && area.width > 0
            && area.height > 0
        {
            self.controller.on_visible();
        }
    }

    /// Record the area the ticker was drawn into.
    pub fn place(&mut self, area: ratatui::layout::Rect) {
        if self.host.set_area(area) {
            self.resize_pending = true;
        }
    }

    fn reconfigure(&mut self, config: TickerConfig) {
        let count = self.host.items().len();
        let outcome = self.controller.reconfigure(&mut self.host, config, count);
        self.mounted = outcome != LayoutOutcome::NotReady;
    }
}

/// What the app is showing.
pub enum Screen {
    Tree(TreeScreen),
    Ticker(TickerScreen),
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub theme: ThemeColors,
    pub should_quit: bool,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(screen: Screen, theme: ThemeColors) -> Self {
        Self {
            screen,
            theme,
            should_quit: false,
            status_message: None,
        }
    }

    /// Quit the application, releasing the ticker's animation.
    pub fn quit(&mut self) {
        if let Screen::Ticker(ticker) = &mut self.screen {
            ticker.controller.teardown();
        }
        self.should_quit = true;
    }

    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Post-draw hook: measurement and visibility happen against the
    /// area of the frame that was just drawn.
    pub fn after_frame(&mut self) {
        if let Screen::Ticker(ticker) = &mut self.screen {
            ticker.after_frame();
        }
    }

    // ── Tree screen ─────────────────────────────────────────────────────────

    pub fn tree_mut(&mut self) -> Option<&mut TreeScreen> {
        match &mut self.screen {
            Screen::Tree(tree) => Some(tree),
            Screen::Ticker(_) => None,
        }
    }

    /// Re-read the source file and swap in the new forest.
    pub fn reload_source(&mut self) {
        let Some(tree) = self.tree_mut() else {
            return;
        };
        let Some(path) = tree.source.clone() else {
            return;
        };
        match read_source(&path) {
            Ok(text) => {
                tree.format = detect_format(&text);
                tree.bytes = text.len() as u64;
                tree.view.replace_forest(parse(&text));
                info!(path = %path.display(), "reloaded tree source");
                let label = tree.source_label();
                self.set_status_message(format!("Reloaded {label}"));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to reload tree source");
                self.set_status_message(format!("Reload failed: {e}"));
            }
        }
    }

    pub fn toggle_icons(&mut self) {
        if let Some(tree) = self.tree_mut() {
            tree.use_icons = !tree.use_icons;
        }
    }

    pub fn toggle_indicator(&mut self) {
        if let Some(tree) = self.tree_mut() {
            tree.indicator = !tree.indicator;
        }
    }

    // ── Ticker screen ───────────────────────────────────────────────────────

    pub fn ticker_mut(&mut self) -> Option<&mut TickerScreen> {
        match &mut self.screen {
            Screen::Ticker(ticker) => Some(ticker),
            Screen::Tree(_) => None,
        }
    }

    /// Pointer moved to terminal cell `(column, row)`.
    pub fn pointer_at(&mut self, column: u16, row: u16) {
        if let Some(ticker) = self.ticker_mut() {
            if ticker.host.contains(column, row) {
                ticker.controller.hover_enter();
            } else {
                ticker.controller.hover_leave();
            }
        }
    }

    /// Rotate left → right → top → bottom and rebuild the loop.
    pub fn cycle_direction(&mut self) {
        let Some(ticker) = self.ticker_mut() else {
            return;
        };
        let mut config = *ticker.controller.config();
        config.direction = match config.direction {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Top,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Left,
        };
        ticker.reconfigure(config);
        self.set_status_message(format!("Direction: {}", config.direction));
    }

    /// Shorten (`faster`) or lengthen the loop duration by one step.
    pub fn adjust_speed(&mut self, faster: bool) {
        let Some(ticker) = self.ticker_mut() else {
            return;
        };
        let mut config = *ticker.controller.config();
        config.speed_ms = if faster {
            config.speed_ms.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS)
        } else {
            config.speed_ms.saturating_add(SPEED_STEP_MS).min(MAX_SPEED_MS)
        };
        ticker.reconfigure(config);
        self.set_status_message(format!("Loop duration: {} ms", config.speed_ms));
    }

    pub fn toggle_pause_on_hover(&mut self) {
        let Some(ticker) = self.ticker_mut() else {
            return;
        };
        let mut config = *ticker.controller.config();
        config.pause_on_hover = !config.pause_on_hover;
        ticker.reconfigure(config);
        let state = if config.pause_on_hover { "on" } else { "off" };
        self.set_status_message(format!("Pause on hover: {state}"));
    }
}

/// Read tree text from `path`.
pub fn read_source(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
