mod app;
mod components;
mod event;
mod handler;
mod theme;
mod tui;
mod ui;
mod watcher;

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use tinita::config::{AppConfig, TickerSection, TreeConfig};
use tinita::error::{AppError, Result};
use tinita::ticker::{Direction, Trigger};
use tinita::tree::{parse, TreeView};

use crate::app::{read_source, App, Screen, TickerScreen, TreeScreen};
use crate::event::{Event, EventHandler};
use crate::theme::resolve_theme;
use crate::tui::{install_panic_hook, Tui};
use crate::watcher::SourceWatcher;

/// Environment variable holding the log filter, e.g. `TINITA_LOG=debug`.
const LOG_ENV: &str = "TINITA_LOG";

/// Render text-described file trees and infinite tickers in the terminal.
#[derive(Parser, Debug)]
#[command(name = "tinita", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file (interactive screens log nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a tree described by indented or `tree`-style text
    Tree(TreeArgs),
    /// Scroll items in an endless loop
    Ticker(TickerArgs),
}

#[derive(Args, Debug)]
struct TreeArgs {
    /// File holding the tree text; `-` or nothing reads stdin
    file: Option<PathBuf>,

    /// Print the rendered tree and exit
    #[arg(long)]
    print: bool,

    /// Show the children of a lone root at top level
    #[arg(long)]
    hide_root: bool,

    /// Use ASCII markers instead of Nerd Font icons
    #[arg(long)]
    no_icons: bool,

    /// Hide the tree guide lines
    #[arg(long)]
    no_indicator: bool,

    /// Start with every folder collapsed
    #[arg(long)]
    collapsed: bool,

    /// Do not reload when the file changes
    #[arg(long)]
    no_watch: bool,
}

#[derive(Args, Debug)]
struct TickerArgs {
    /// Items to scroll
    #[arg(required = true)]
    items: Vec<String>,

    /// left, right, top or bottom
    #[arg(long)]
    direction: Option<String>,

    /// on-load or in-view
    #[arg(long)]
    trigger: Option<String>,

    /// Duration of one loop in milliseconds
    #[arg(long)]
    speed_ms: Option<u64>,

    /// Delay before the first loop in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Extra cells to cover before the first visible copy
    #[arg(long)]
    overflow_buffer: Option<f64>,

    /// Pause while the mouse is over the ticker
    #[arg(long)]
    pause_on_hover: bool,

    /// Fade the items out towards both edges
    #[arg(long)]
    fade: bool,

    /// Colour the edges fade into, as hex
    #[arg(long)]
    fade_color: Option<String>,

    /// Scroll over the frame border instead of clipping inside it
    #[arg(long)]
    overflow_visible: bool,
}

impl TreeArgs {
    fn overrides(&self) -> AppConfig {
        AppConfig {
            tree: TreeConfig {
                hide_root_name: self.hide_root.then_some(true),
                use_icons: self.no_icons.then_some(false),
                indicator: self.no_indicator.then_some(false),
                expanded: self.collapsed.then_some(false),
            },
            ..AppConfig::default()
        }
    }

    /// The source file, or `None` when reading stdin.
    fn source(&self) -> Option<&Path> {
        self.file.as_deref().filter(|p| p.as_os_str() != "-")
    }
}

impl TickerArgs {
    /// CLI values are validated here so typos fail loudly instead of
    /// falling back to defaults like config-file values do.
    fn overrides(&self) -> Result<AppConfig> {
        if let Some(direction) = &self.direction {
            Direction::from_str(direction)?;
        }
        if let Some(trigger) = &self.trigger {
            Trigger::from_str(trigger)?;
        }
        if let Some(buffer) = self.overflow_buffer {
            if !buffer.is_finite() || buffer < 0.0 {
                return Err(AppError::InvalidValue {
                    field: "overflow-buffer",
                    value: buffer.to_string(),
                });
            }
        }
        if let Some(color) = &self.fade_color {
            if theme::parse_hex_color(color).is_none() {
                return Err(AppError::InvalidValue {
                    field: "fade-color",
                    value: color.clone(),
                });
            }
        }
        Ok(AppConfig {
            ticker: TickerSection {
                direction: self.direction.clone(),
                trigger: self.trigger.clone(),
                speed_ms: self.speed_ms,
                delay_ms: self.delay_ms,
                overflow_buffer: self.overflow_buffer,
                pause_on_hover: self.pause_on_hover.then_some(true),
                overflow_visible: self.overflow_visible.then_some(true),
                fade: self.fade.then_some(true),
                fade_color: self.fade_color.clone(),
            },
            ..AppConfig::default()
        })
    }
}

/// Install the global tracing subscriber. Interactive screens own the
/// terminal, so without `--log-file` their logs are discarded.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let writer = match log_file {
        Some(path) => BoxMakeWriter::new(Mutex::new(File::create(path)?)),
        None if interactive => BoxMakeWriter::new(io::sink),
        None => BoxMakeWriter::new(io::stderr),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none() && !interactive)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = match &cli.command {
        Command::Tree(args) => !args.print && args.source().is_some(),
        Command::Ticker(_) => true,
    };
    init_logging(cli.log_file.as_deref(), interactive)?;

    match cli.command {
        Command::Tree(args) => run_tree(cli.config.as_deref(), args).await,
        Command::Ticker(args) => run_ticker(cli.config.as_deref(), args).await,
    }
}

async fn run_tree(config_path: Option<&Path>, args: TreeArgs) -> Result<()> {
    let config = AppConfig::load(config_path, Some(&args.overrides()));

    let Some(source) = args.source().map(Path::to_path_buf) else {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        print!("{}", render_plain(&text, &config));
        return Ok(());
    };

    if !source.is_file() {
        return Err(AppError::InvalidPath(format!(
            "{} is not a readable file",
            source.display()
        )));
    }
    let text = read_source(&source)?;
    if args.print {
        print!("{}", render_plain(&text, &config));
        return Ok(());
    }

    let theme = resolve_theme(&config.theme);
    let mut tree = TreeScreen::new(&text, Some(source.clone()), &config);
    let events = EventHandler::new(Duration::from_millis(16));

    let mut watch_error = None;
    let _watcher = if args.no_watch || !config.watcher_enabled() {
        None
    } else {
        match SourceWatcher::new(
            &source,
            Duration::from_millis(config.debounce_ms()),
            events.sender(),
        ) {
            Ok(watcher) => {
                tree.watching = true;
                Some(watcher)
            }
            Err(e) => {
                warn!(error = %e, "file watcher unavailable");
                watch_error = Some(format!("⚠ Watcher unavailable: {}", AppError::from(e)));
                None
            }
        }
    };

    let mut app = App::new(Screen::Tree(tree), theme);
    if let Some(msg) = watch_error {
        app.set_status_message(msg);
    }
    info!(path = %source.display(), "showing tree");
    run_app(app, events, false).await
}

async fn run_ticker(config_path: Option<&Path>, args: TickerArgs) -> Result<()> {
    let config = AppConfig::load(config_path, Some(&args.overrides()?));
    let ticker_config = config.ticker_config();
    let id = tinita::generate_uuid();
    debug!(%id, ?ticker_config, items = args.items.len(), "starting ticker");

    let theme = resolve_theme(&config.theme);
    let fade_color = config
        .fade_color()
        .and_then(theme::parse_hex_color)
        .unwrap_or(theme.status_bg);
    let ticker = TickerScreen::new(args.items, ticker_config).with_fade_color(fade_color);
    let screen = Screen::Ticker(ticker);
    let app = App::new(screen, theme);
    let events = EventHandler::new(Duration::from_millis(16));
    run_app(app, events, true).await
}

/// Draw, dispatch events, repeat until quit.
async fn run_app(mut app: App, mut events: EventHandler, enable_mouse: bool) -> Result<()> {
    install_panic_hook();
    let mut tui = Tui::new(enable_mouse)?;

    let result = loop {
        if let Err(e) = tui.draw(&mut app) {
            break Err(e);
        }
        app.after_frame();

        match events.next().await {
            Ok(Event::Key(key)) => handler::handle_key_event(&mut app, key),
            Ok(Event::Mouse(mouse)) => handler::handle_mouse_event(&mut app, mouse),
            Ok(Event::Tick) => app.clear_expired_status(),
            Ok(Event::Resize(width, height)) => debug!(width, height, "terminal resized"),
            Ok(Event::SourceChanged) => app.reload_source(),
            Err(e) => break Err(e),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    tui.restore()?;
    result
}

fn render_plain(text: &str, config: &AppConfig) -> String {
    TreeView::new(parse(text), config.view_options()).render_plain(config.use_icons())
}
