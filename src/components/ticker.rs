//! Terminal rendition of the ticker: one terminal cell stands in for a pixel.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use tinita::ticker::{
    cell_fade_opacity, AnimationHandle, AnimationParams, Axis, LayoutState, Measurement,
    Subscription, TickerHost,
};
use unicode_width::UnicodeWidthChar;

use crate::theme::ThemeColors;

/// Gap drawn between items, and after the last one so copies join cleanly.
pub const ITEM_SEPARATOR: &str = "  ·  ";

/// One pattern laid out on a single line.
pub fn pattern_line(items: &[String]) -> String {
    let mut line = items.join(ITEM_SEPARATOR);
    if !items.is_empty() {
        line.push_str(ITEM_SEPARATOR);
    }
    line
}

/// The pattern as terminal cells. A wide character takes its own cell plus
/// an empty continuation cell. Zero-width characters join the cell before them.
pub fn pattern_cells(items: &[String]) -> Vec<String> {
    let mut cells: Vec<String> = Vec::new();
    for c in pattern_line(items).chars() {
        match c.width().unwrap_or(0) {
            0 => match cells.last_mut() {
                Some(last) => last.push(c),
                None => cells.push(c.to_string()),
            },
            width => {
                cells.push(c.to_string());
                cells.extend((1..width).map(|_| String::new()));
            }
        }
    }
    cells
}

/// Area the ticker scrolls in. With `overflow_visible` the content runs over
/// the frame along the scroll axis instead of stopping at `inner`.
pub fn content_area(outer: Rect, inner: Rect, axis: Axis, overflow_visible: bool) -> Rect {
    if !overflow_visible {
        return inner;
    }
    match axis {
        Axis::Horizontal => Rect {
            x: outer.x,
            width: outer.width,
            ..inner
        },
        Axis::Vertical => Rect {
            y: outer.y,
            height: outer.height,
            ..inner
        },
    }
}

/// Mix `fg` towards `fade` by `opacity`. Non-RGB colours cannot be mixed, so
/// they dim first and take the fade colour past the halfway point.
pub fn fade_style(style: Style, fade: Color, opacity: f64) -> Style {
    if opacity <= 0.0 {
        return style;
    }
    let opacity = opacity.min(1.0);
    match (style.fg, fade) {
        (Some(Color::Rgb(r, g, b)), Color::Rgb(fr, fg, fb)) => {
            let mix = |from: u8, to: u8| {
                (f64::from(from) + (f64::from(to) - f64::from(from)) * opacity).round() as u8
            };
            style.fg(Color::Rgb(mix(r, fr), mix(g, fg), mix(b, fb)))
        }
        _ if opacity >= 0.5 => style.fg(fade),
        _ => style.add_modifier(Modifier::DIM),
    }
}

/// Wall-clock animation that samples [`AnimationParams::offset_at`] on each frame.
#[derive(Debug)]
pub struct TerminalAnimation {
    params: AnimationParams,
    played: Duration,
    resumed_at: Option<Instant>,
    cancelled: bool,
}

impl TerminalAnimation {
    pub fn new(params: AnimationParams) -> Self {
        Self {
            params,
            played: Duration::ZERO,
            resumed_at: None,
            cancelled: false,
        }
    }

    /// Time spent playing. Paused intervals are excluded.
    pub fn elapsed(&self) -> Duration {
        self.played + self.resumed_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    /// Current translation in cells. Before the delay elapses no keyframe
    /// applies, so the content sits untranslated.
    pub fn offset(&self) -> f64 {
        self.offset_after(self.elapsed())
    }

    fn offset_after(&self, elapsed: Duration) -> f64 {
        self.params
            .offset_at(elapsed.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

impl AnimationHandle for TerminalAnimation {
    fn play(&mut self) {
        if self.cancelled || self.resumed_at.is_some() {
            return;
        }
        self.resumed_at = Some(Instant::now());
    }

    fn pause(&mut self) {
        if let Some(started) = self.resumed_at.take() {
            self.played += started.elapsed();
        }
    }

    fn cancel(&mut self) {
        self.pause();
        self.cancelled = true;
    }
}

/// Ticker host backed by the area the ticker was last drawn into.
///
/// Observations are flags shared with their [`Subscription`] guards. The app
/// polls them after each frame and reports back to the controller.
#[derive(Debug)]
pub struct TerminalHost {
    items: Vec<String>,
    area: Rect,
    resize_watch: Rc<Cell<bool>>,
    visibility_watch: Rc<Cell<bool>>,
}

impl TerminalHost {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            area: Rect::default(),
            resize_watch: Rc::new(Cell::new(false)),
            visibility_watch: Rc::new(Cell::new(false)),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Record where the ticker was drawn. Returns `true` if the size changed.
    pub fn set_area(&mut self, area: Rect) -> bool {
        let resized = area.width != self.area.width || area.height != self.area.height;
        self.area = area;
        resized
    }

    pub fn is_watching_resize(&self) -> bool {
        self.resize_watch.get()
    }

    pub fn is_watching_visibility(&self) -> bool {
        self.visibility_watch.get()
    }

    /// Whether the terminal cell `(column, row)` lies inside the ticker.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains((column, row).into())
    }

    fn watch(flag: &Rc<Cell<bool>>) -> Subscription {
        flag.set(true);
        let flag = Rc::clone(flag);
        Subscription::new(move || flag.set(false))
    }
}

impl TickerHost for TerminalHost {
    type Animation = TerminalAnimation;

    fn measure(&self, axis: Axis) -> Measurement {
        match axis {
            Axis::Horizontal => Measurement {
                stride_px: pattern_cells(&self.items).len() as f64,
                viewport_px: f64::from(self.area.width),
            },
            Axis::Vertical => Measurement {
                stride_px: self.items.len() as f64,
                viewport_px: f64::from(self.area.height),
            },
        }
    }

    fn animate(&mut self, params: &AnimationParams) -> TerminalAnimation {
        TerminalAnimation::new(*params)
    }

    fn observe_resize(&mut self) -> Option<Subscription> {
        Some(Self::watch(&self.resize_watch))
    }

    fn observe_visibility(&mut self, _threshold: f64) -> Option<Subscription> {
        // A drawn ticker is fully on screen, so any threshold is met at once.
        Some(Self::watch(&self.visibility_watch))
    }
}

/// Slice `len` cells out of `repeats` concatenated copies of `pattern`,
/// starting `skip` cells in.
pub fn visible_window<T: Clone>(pattern: &[T], repeats: usize, skip: usize, len: usize) -> Vec<T> {
    pattern
        .iter()
        .cycle()
        .take(pattern.len() * repeats)
        .skip(skip)
        .take(len)
        .cloned()
        .collect()
}

/// Draws the repeated items, shifted by the current animation offset.
pub struct TickerWidget<'a> {
    host: &'a TerminalHost,
    layout: Option<&'a LayoutState>,
    animation: Option<&'a TerminalAnimation>,
    axis: Axis,
    paused: bool,
    overflow_visible: bool,
    fade: Option<Color>,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> TickerWidget<'a> {
    pub fn new(host: &'a TerminalHost, axis: Axis, theme: &'a ThemeColors) -> Self {
        Self {
            host,
            layout: None,
            animation: None,
            axis,
            paused: false,
            overflow_visible: false,
            fade: None,
            theme,
            block: None,
        }
    }

    pub fn layout(mut self, layout: Option<&'a LayoutState>) -> Self {
        self.layout = layout;
        self
    }

    pub fn animation(mut self, animation: Option<&'a TerminalAnimation>) -> Self {
        self.animation = animation;
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn overflow_visible(mut self, overflow_visible: bool) -> Self {
        self.overflow_visible = overflow_visible;
        self
    }

    /// Fade the edges of the scroll axis into `color`.
    pub fn fade(mut self, color: Option<Color>) -> Self {
        self.fade = color;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Copies to draw and cells to skip. Without a layout a single static
    /// copy is shown.
    fn window(&self) -> (usize, usize) {
        let Some(layout) = self.layout else {
            return (1, 0);
        };
        let offset = self.animation.map(|a| a.offset()).unwrap_or(0.0);
        (layout.total_repeat_count, (-offset).max(0.0).round() as usize)
    }
}

impl<'a> Widget for TickerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            content_area(area, inner, self.axis, self.overflow_visible)
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 || self.host.items().is_empty() {
            return;
        }

        let mut style = Style::default().fg(if self.paused {
            self.theme.ticker_paused_fg
        } else {
            self.theme.ticker_fg
        });
        if !self.paused {
            style = style.add_modifier(Modifier::BOLD);
        }
        let (repeats, skip) = self.window();

        match self.axis {
            Axis::Horizontal => {
                let cells = pattern_cells(self.host.items());
                let mut text = String::new();
                for (i, cell) in visible_window(&cells, repeats, skip, inner.width as usize)
                    .iter()
                    .enumerate()
                {
                    // Half of a wide character cut off at the left edge.
                    if i == 0 && cell.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(cell);
                }
                let y = inner.y + inner.height / 2;
                buf.set_line(inner.x, y, &Line::from(Span::styled(text, style)), inner.width);
                if let Some(fade) = self.fade {
                    for i in 0..inner.width {
                        let opacity = cell_fade_opacity(i as usize, inner.width as usize);
                        let position = (inner.x + i, y);
                        if let Some(cell) = buf.cell_mut(position) {
                            let faded = fade_style(cell.style(), fade, opacity);
                            cell.set_style(faded);
                        }
                    }
                }
            }
            Axis::Vertical => {
                let rows = visible_window(self.host.items(), repeats, skip, inner.height as usize);
                for (i, item) in rows.iter().enumerate() {
                    let row_style = match self.fade {
                        Some(fade) => fade_style(
                            style,
                            fade,
                            cell_fade_opacity(i, inner.height as usize),
                        ),
                        None => style,
                    };
                    let line = Line::from(Span::styled(item.as_str(), row_style));
                    buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
                }
            }
        }
    }
}
