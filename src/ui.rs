use ratatui::{
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use tinita::file::{file_size, SizeBase};
use tinita::ticker::Axis;

use crate::app::{App, Screen, TickerScreen, TreeScreen};
use crate::components::status_bar::StatusBarWidget;
use crate::components::ticker::{content_area, TerminalAnimation, TickerWidget};
use crate::components::tree::TreeWidget;
use crate::theme::ThemeColors;

const TREE_HINTS: &str = " j/k:move  ⏎:toggle  i:icons  r:reload  q:quit ";
const TICKER_HINTS: &str = " d:direction  +/-:speed  p:hover  q:quit ";

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());
    let (main_area, status_area) = (chunks[0], chunks[1]);

    let status_message = app.status_message.as_ref().map(|(msg, _)| msg.clone());
    let theme = &app.theme;

    let (label, info, hints, watcher) = match &mut app.screen {
        Screen::Tree(tree) => {
            render_tree(tree, theme, frame, main_area);
            let info = format!(
                "{} | {} rows | {} ",
                tree.format.label(),
                tree.view.rows().len(),
                file_size(tree.bytes, SizeBase::Decimal)
            );
            let watcher = tree.watching.then_some("watching");
            (tree.source_label(), info, TREE_HINTS, watcher)
        }
        Screen::Ticker(ticker) => {
            render_ticker(ticker, theme, frame, main_area);
            let config = ticker.controller.config();
            let info = if ticker.is_mounted() {
                format!(
                    "{} | {} | {} ms ",
                    config.direction, config.trigger, config.speed_ms
                )
            } else {
                "measuring ".to_string()
            };
            (
                format!("{} items", ticker.host.items().len()),
                info,
                TICKER_HINTS,
                None,
            )
        }
    };

    let mut status = StatusBarWidget::new(&label, &info, theme).key_hints(hints);
    if let Some(msg) = status_message.as_deref() {
        status = status.status_message(msg);
    }
    if let Some(watcher) = watcher {
        status = status.watcher_status(watcher);
    }
    frame.render_widget(status, status_area);
}

fn bordered<'a>(title: String, theme: &ThemeColors) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg))
}

fn render_tree(tree: &mut TreeScreen, theme: &ThemeColors, frame: &mut Frame, area: Rect) {
    // Keep the selection visible inside the border.
    let visible_height = area.height.saturating_sub(2) as usize;
    tree.view.update_scroll(visible_height);

    let title = match tree.view.title() {
        Some(name) => format!(" {name} "),
        None => format!(" {} ", tree.source_label()),
    };
    let widget = TreeWidget::new(&tree.view, theme)
        .use_icons(tree.use_icons)
        .indicator(tree.indicator)
        .block(bordered(title, theme));
    frame.render_widget(widget, area);
}

fn render_ticker(ticker: &mut TickerScreen, theme: &ThemeColors, frame: &mut Frame, area: Rect) {
    let config = ticker.controller.config();
    let axis = config.direction.axis();
    let overflow_visible = config.overflow_visible;
    let fade = config.fade.then_some(ticker.fade_color);
    let outer = match axis {
        // One line of text inside a border, centered vertically.
        Axis::Horizontal => Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(3),
                Constraint::Fill(1),
            ])
            .split(area)[1],
        Axis::Vertical => area,
    };
    let block = bordered(" ticker ".to_string(), theme);
    ticker.place(content_area(outer, block.inner(outer), axis, overflow_visible));

    let widget = TickerWidget::new(&ticker.host, axis, theme)
        .layout(ticker.controller.layout())
        .animation(ticker.controller.animation())
        .paused(
            !ticker
                .controller
                .animation()
                .is_some_and(TerminalAnimation::is_running),
        )
        .overflow_visible(overflow_visible)
        .fade(fade)
        .block(block);
    frame.render_widget(widget, outer);
}
