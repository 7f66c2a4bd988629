//! Infinite ticker: repeat-count layout, loop keyframes and the playback
//! lifecycle a host drives.

pub mod animation;
pub mod controller;
pub mod fade;
pub mod layout;

pub use animation::{
    derive_animation_parameters, visibility_threshold, AnimationParams, AnimationTiming, Axis,
    Direction, PlaybackDirection,
};
pub use controller::{
    AnimationHandle, LayoutOutcome, Measurement, Subscription, TickerConfig, TickerController,
    TickerHost, TickerState, Trigger, DEFAULT_SPEED_MS,
};
pub use fade::{cell_fade_opacity, fade_gradient_css, fade_opacity, DEFAULT_FADE_COLOR};
pub use layout::{compute_layout, LayoutState, PatternSlot, MAX_REPEAT_COUNT};
