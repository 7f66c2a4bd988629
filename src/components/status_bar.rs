use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use tinita::file::truncate_file_name;

use crate::theme::ThemeColors;

/// Status bar widget: source label on the left, details and key hints on the right.
pub struct StatusBarWidget<'a> {
    label: &'a str,
    info: &'a str,
    key_hints: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    watcher_status: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(label: &'a str, info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            label,
            info,
            key_hints: "",
            theme,
            status_message: None,
            watcher_status: None,
        }
    }

    pub fn key_hints(mut self, hints: &'a str) -> Self {
        self.key_hints = hints;
        self
    }

    pub fn status_message(mut self, msg: &'a str) -> Self {
        self.status_message = Some(msg);
        self
    }

    pub fn watcher_status(mut self, status: &'a str) -> Self {
        self.watcher_status = Some(status);
        self
    }
}

fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let base = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);

        if let Some(msg) = self.status_message {
            let display = format!("{:<width$}", fit(msg, width), width = width);
            let line = Line::from(Span::styled(display, base.fg(self.theme.success_fg)));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // Normal bar: [label] [watcher] ... [info] [key_hints]
        let hints_len = self.key_hints.chars().count();
        let remaining = width.saturating_sub(hints_len);
        let info = fit(self.info, remaining);
        let label_budget = remaining.saturating_sub(info.chars().count() + 1);
        let label = truncate_file_name(self.label, label_budget);
        let label = fit(&label, label_budget);

        let mut spans = vec![Span::styled(label, base.add_modifier(Modifier::BOLD))];
        if let Some(watcher) = self.watcher_status {
            spans.push(Span::styled(" ", base));
            spans.push(Span::styled(watcher.to_string(), base.fg(self.theme.warning_fg)));
        }

        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let gap = width
            .saturating_sub(used)
            .saturating_sub(info.chars().count())
            .saturating_sub(hints_len);
        spans.push(Span::styled(" ".repeat(gap), base));
        spans.push(Span::styled(info, base.fg(self.theme.accent_fg)));
        spans.push(Span::styled(
            self.key_hints,
            base.fg(self.theme.dim_fg).add_modifier(Modifier::DIM),
        ));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
