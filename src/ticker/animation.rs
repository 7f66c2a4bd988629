//! Keyframe parameters for the single-stride translation loop.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

use super::layout::LayoutState;

/// Scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// CSS transform function suffix (`translateX` / `translateY`).
    pub fn css_suffix(&self) -> char {
        match self {
            Axis::Horizontal => 'X',
            Axis::Vertical => 'Y',
        }
    }
}

/// Visual direction the content travels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Top | Direction::Bottom => Axis::Vertical,
        }
    }

    /// Right and bottom reuse the same keyframes played backwards.
    pub fn is_reverse(&self) -> bool {
        matches!(self, Direction::Right | Direction::Bottom)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Top => "top",
            Direction::Bottom => "bottom",
        }
    }
}

impl FromStr for Direction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "top" => Ok(Direction::Top),
            "bottom" => Ok(Direction::Bottom),
            _ => Err(AppError::InvalidValue {
                field: "direction",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyframe playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackDirection {
    Normal,
    Reverse,
}

impl PlaybackDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackDirection::Normal => "normal",
            PlaybackDirection::Reverse => "reverse",
        }
    }
}

/// Fraction of the container that must be visible before an in-view
/// ticker starts. Tall vertical tickers rarely fit entirely on screen.
pub fn visibility_threshold(axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => 1.0,
        Axis::Vertical => 0.5,
    }
}

/// Timing options for the loop. Easing is always linear, iterations
/// infinite and fill `forwards`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub direction: PlaybackDirection,
}

impl AnimationTiming {
    pub const EASING: &'static str = "linear";
    pub const FILL: &'static str = "forwards";
    pub const ITERATIONS: f64 = f64::INFINITY;
}

/// Everything a host needs to build the translation animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    pub start_offset_px: f64,
    pub end_offset_px: f64,
    pub axis: Axis,
    pub timing: AnimationTiming,
}

impl AnimationParams {
    pub fn playback_direction(&self) -> PlaybackDirection {
        self.timing.direction
    }

    /// Distance covered by one iteration. Always minus one stride.
    pub fn travel_px(&self) -> f64 {
        self.end_offset_px - self.start_offset_px
    }

    /// The two CSS transform keyframes, start then end.
    pub fn keyframes(&self) -> [String; 2] {
        let axis = self.axis.css_suffix();
        [
            format!("translate{axis}({}px)", self.start_offset_px),
            format!("translate{axis}({}px)", self.end_offset_px),
        ]
    }

    /// Sample the translation `elapsed_ms` after the animation started
    /// playing, for hosts without a native animation engine.
    ///
    /// Returns `None` during the start delay, when no keyframe applies yet.
    pub fn offset_at(&self, elapsed_ms: f64) -> Option<f64> {
        let active_ms = elapsed_ms - self.timing.delay_ms as f64;
        if active_ms < 0.0 {
            return None;
        }
        if self.timing.duration_ms == 0 {
            return Some(self.start_offset_px);
        }

        let duration = self.timing.duration_ms as f64;
        let progress = (active_ms % duration) / duration;
        let progress = match self.timing.direction {
            PlaybackDirection::Normal => progress,
            PlaybackDirection::Reverse => 1.0 - progress,
        };
        Some(self.start_offset_px + self.travel_px() * progress)
    }
}

/// Derive the keyframe parameters for `layout`.
///
/// The loop always translates by exactly one stride: after one stride the
/// repeated copies are pixel-identical to the start, so the reset is invisible.
pub fn derive_animation_parameters(
    layout: &LayoutState,
    direction: Direction,
    delay_ms: u64,
    speed_ms: u64,
) -> AnimationParams {
    let leading = layout.leading_repeat_count as f64;
    AnimationParams {
        start_offset_px: -leading * layout.stride_px,
        end_offset_px: -(leading + 1.0) * layout.stride_px,
        axis: direction.axis(),
        timing: AnimationTiming {
            delay_ms,
            duration_ms: speed_ms,
            direction: if direction.is_reverse() {
                PlaybackDirection::Reverse
            } else {
                PlaybackDirection::Normal
            },
        },
    }
}
