//! Repeat-count calculation for a seamless infinite loop.

use tracing::{debug, warn};

/// Minimum copies after the leading buffer: one reference copy plus two spares.
pub const MIN_TRAILING_PATTERNS: usize = 3;

/// Upper bound for the leading and visible counts. A degenerate stride or an
/// enormous overflow buffer is clamped here instead of overflowing.
pub const MAX_REPEAT_COUNT: usize = 4096;

/// How many copies of the content pattern to render, and how long one is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    /// Length of one full pattern along the scroll axis.
    pub stride_px: f64,
    /// Copies rendered before the reference copy to cover the overflow buffer.
    pub leading_repeat_count: usize,
    /// All copies rendered, leading ones included.
    pub total_repeat_count: usize,
}

/// One rendered copy of the content pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSlot {
    pub index: usize,
    /// The copy hosts measure the stride from. Every other copy is decorative
    /// and should be hidden from assistive technology.
    pub is_reference: bool,
}

impl LayoutState {
    /// Index of the copy that sits at the animation's start offset.
    pub fn reference_index(&self) -> usize {
        self.leading_repeat_count
    }

    pub fn pattern_slots(&self) -> impl Iterator<Item = PatternSlot> + '_ {
        (0..self.total_repeat_count).map(move |index| PatternSlot {
            index,
            is_reference: index == self.leading_repeat_count,
        })
    }

    /// Total length of all rendered copies.
    pub fn content_length_px(&self) -> f64 {
        self.stride_px * self.total_repeat_count as f64
    }
}

fn is_measured(px: f64) -> bool {
    px.is_finite() && px > 0.0
}

fn capped_ceil(ratio: f64) -> usize {
    if ratio.is_nan() {
        return 0;
    }
    ratio.ceil().clamp(0.0, MAX_REPEAT_COUNT as f64) as usize
}

/// Copies needed to fill the viewport.
pub fn visible_repeat_count(stride_px: f64, viewport_px: f64) -> usize {
    capped_ceil(viewport_px / stride_px)
}

/// Spare copies past the viewport so the loop reset stays off-screen.
/// Short patterns repeat many times and need more slack.
pub fn extra_patterns(stride_px: f64, viewport_px: f64) -> usize {
    if stride_px < viewport_px {
        3
    } else {
        2
    }
}

/// Copies needed before the reference copy to cover `overflow_buffer_px`.
pub fn leading_repeat_count(stride_px: f64, overflow_buffer_px: f64) -> usize {
    if overflow_buffer_px > 0.0 {
        capped_ceil(overflow_buffer_px / stride_px)
    } else {
        0
    }
}

/// Compute the layout for a pattern of `stride_px` inside a viewport of
/// `viewport_px`, both measured along the scroll axis.
///
/// Returns `None` while either measurement is zero or unavailable; the
/// caller should retry after the next layout pass.
pub fn compute_layout(
    stride_px: f64,
    viewport_px: f64,
    overflow_buffer_px: f64,
) -> Option<LayoutState> {
    if !is_measured(stride_px) || !is_measured(viewport_px) {
        debug!(stride_px, viewport_px, "ticker layout not ready");
        return None;
    }

    let leading = leading_repeat_count(stride_px, overflow_buffer_px);
    let visible = visible_repeat_count(stride_px, viewport_px);
    let extra = extra_patterns(stride_px, viewport_px);
    if leading == MAX_REPEAT_COUNT || visible == MAX_REPEAT_COUNT {
        warn!(
            stride_px,
            viewport_px,
            overflow_buffer_px,
            max = MAX_REPEAT_COUNT,
            "ticker repeat count clamped"
        );
    }
    let total = leading
        .saturating_add(visible)
        .saturating_add(extra)
        .max(leading.saturating_add(MIN_TRAILING_PATTERNS));

    let layout = LayoutState {
        stride_px,
        leading_repeat_count: leading,
        total_repeat_count: total,
    };
    debug!(
        stride_px,
        viewport_px,
        leading,
        total,
        "computed ticker layout"
    );
    Some(layout)
}
