use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use tinita::tree::{FlatRow, NodeKind, TreeView};

use crate::theme::ThemeColors;

/// Tree widget that renders a parsed forest with box-drawing guides.
pub struct TreeWidget<'a> {
    view: &'a TreeView,
    theme: &'a ThemeColors,
    use_icons: bool,
    indicator: bool,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(view: &'a TreeView, theme: &'a ThemeColors) -> Self {
        Self {
            view,
            theme,
            use_icons: true,
            indicator: true,
            block: None,
        }
    }

    pub fn use_icons(mut self, use_icons: bool) -> Self {
        self.use_icons = use_icons;
        self
    }

    /// Draw the `├──`/`│` guides. When off, rows are indented with blanks.
    pub fn indicator(mut self, indicator: bool) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn row_prefix(&self, row: &FlatRow) -> String {
        let prefix = row.prefix();
        if self.indicator {
            prefix
        } else {
            " ".repeat(prefix.chars().count())
        }
    }

    fn name_style(&self, row: &FlatRow, is_selected: bool) -> Style {
        if is_selected {
            return Style::default()
                .bg(self.theme.tree_selected_bg)
                .fg(self.theme.tree_selected_fg)
                .add_modifier(Modifier::BOLD);
        }
        match row.kind {
            NodeKind::Folder => Style::default()
                .fg(self.theme.tree_dir_fg)
                .add_modifier(Modifier::BOLD),
            NodeKind::File => Style::default().fg(self.theme.tree_file_fg),
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let rows = self.view.rows();
        let visible_height = inner_area.height as usize;
        if rows.is_empty() || visible_height == 0 {
            return;
        }

        let selected = self.view.selected_index;
        let visible_rows = rows
            .iter()
            .enumerate()
            .skip(self.view.scroll_offset)
            .take(visible_height);

        for (i, (idx, row)) in visible_rows.enumerate() {
            let y = inner_area.y + i as u16;
            let is_selected = idx == selected;

            let name_style = self.name_style(row, is_selected);
            let icon_style = if is_selected {
                name_style
            } else {
                Style::default().fg(self.theme.icon_fg(row.icon))
            };

            let line = Line::from(vec![
                Span::styled(self.row_prefix(row), Style::default().fg(self.theme.guide_fg)),
                Span::styled(row.icon.glyph(self.use_icons), icon_style),
                Span::styled(row.name.clone(), name_style),
            ]);
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}
