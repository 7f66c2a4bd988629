//! Ticker lifecycle: trigger state machine, hover pause, relayout and
//! teardown, driven by a host that supplies measurement, animation and
//! (optionally) resize/visibility observation.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::AppError;

use super::animation::{
    derive_animation_parameters, visibility_threshold, AnimationParams, Axis, Direction,
};
use super::layout::{compute_layout, LayoutState};

/// Default duration of one loop iteration.
pub const DEFAULT_SPEED_MS: u64 = 10_000;

/// When the loop starts playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    /// As soon as a layout is available.
    #[default]
    OnLoad,
    /// The first time the container becomes visible.
    InView,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::OnLoad => "on-load",
            Trigger::InView => "in-view",
        }
    }
}

impl FromStr for Trigger {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on-load" | "onload" => Ok(Trigger::OnLoad),
            "in-view" | "inview" => Ok(Trigger::InView),
            _ => Err(AppError::InvalidValue {
                field: "trigger",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live animation created by the host.
pub trait AnimationHandle {
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and discard. The handle is not used again afterwards.
    fn cancel(&mut self);
}

/// Pattern and viewport lengths along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub stride_px: f64,
    pub viewport_px: f64,
}

/// Guard for a host observation. Dropping it unsubscribes.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Capabilities a rendering host provides to a ticker.
///
/// Observation is optional: returning `None` means the environment cannot
/// observe that concern, and the controller falls back (immediate play for
/// in-view, static layout for resize). The host reports observed events back
/// through [`TickerController::on_resize`] and [`TickerController::on_visible`].
pub trait TickerHost {
    type Animation: AnimationHandle;

    fn measure(&self, axis: Axis) -> Measurement;

    /// Build the translation animation. It may start in any play state; the
    /// controller plays or pauses it right away.
    fn animate(&mut self, params: &AnimationParams) -> Self::Animation;

    fn observe_resize(&mut self) -> Option<Subscription> {
        None
    }

    fn observe_visibility(&mut self, _threshold: f64) -> Option<Subscription> {
        None
    }
}

/// User-facing ticker options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickerConfig {
    pub direction: Direction,
    pub trigger: Trigger,
    pub speed_ms: u64,
    pub delay_ms: u64,
    pub overflow_buffer_px: f64,
    pub pause_on_hover: bool,
    /// Let copies show past the container edges instead of clipping them.
    pub overflow_visible: bool,
    /// Draw the edge fade overlay (see [`super::fade`]).
    pub fade: bool,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Left,
            trigger: Trigger::OnLoad,
            speed_ms: DEFAULT_SPEED_MS,
            delay_ms: 0,
            overflow_buffer_px: 0.0,
            pause_on_hover: false,
            overflow_visible: false,
            fade: false,
        }
    }
}

/// Trigger state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    /// No layout yet.
    Uninitialized,
    /// Animation built and paused until the first visibility crossing.
    PendingVisibility,
    Playing,
    /// Torn down. Terminal.
    Disposed,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutOutcome {
    /// Nothing to scroll (no children, or the ticker was torn down).
    Empty,
    /// Measurements unavailable. Retry after the next layout pass.
    NotReady,
    Ready(LayoutState),
}

/// Owns one ticker's animation and observations.
pub struct TickerController<A: AnimationHandle> {
    config: TickerConfig,
    child_count: usize,
    state: TickerState,
    layout: Option<LayoutState>,
    params: Option<AnimationParams>,
    animation: Option<A>,
    hovered: bool,
    has_been_visible: bool,
    resize_subscription: Option<Subscription>,
    visibility_subscription: Option<Subscription>,
}

impl<A: AnimationHandle> TickerController<A> {
    pub fn new(config: TickerConfig, child_count: usize) -> Self {
        Self {
            config,
            child_count,
            state: TickerState::Uninitialized,
            layout: None,
            params: None,
            animation: None,
            hovered: false,
            has_been_visible: false,
            resize_subscription: None,
            visibility_subscription: None,
        }
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn layout(&self) -> Option<&LayoutState> {
        self.layout.as_ref()
    }

    pub fn params(&self) -> Option<&AnimationParams> {
        self.params.as_ref()
    }

    pub fn animation(&self) -> Option<&A> {
        self.animation.as_ref()
    }

    pub fn is_hover_paused(&self) -> bool {
        self.hovered
    }

    /// Whether the animation is currently advancing.
    pub fn is_playing(&self) -> bool {
        self.animation.is_some() && self.state == TickerState::Playing && !self.hovered
    }

    pub fn is_observing_resize(&self) -> bool {
        self.resize_subscription.is_some()
    }

    pub fn is_awaiting_visibility(&self) -> bool {
        self.state == TickerState::PendingVisibility
    }

    /// First measurement pass, run by the host one frame after the ticker
    /// is laid out. Subscribes to resizes and computes the layout.
    pub fn mount<H>(&mut self, host: &mut H) -> LayoutOutcome
    where
        H: TickerHost<Animation = A>,
    {
        if self.state == TickerState::Disposed {
            return LayoutOutcome::Empty;
        }
        // Drop the old guard before asking for a new one.
        self.resize_subscription = None;
        self.resize_subscription = host.observe_resize();
        if self.resize_subscription.is_none() {
            debug!("resize observation unavailable; layout stays static");
        }
        self.relayout(host)
    }

    /// Recompute the layout and rebuild the animation if it changed.
    ///
    /// When measurements are unavailable the previous animation keeps
    /// running and the caller should retry on the next frame.
    pub fn relayout<H>(&mut self, host: &mut H) -> LayoutOutcome
    where
        H: TickerHost<Animation = A>,
    {
        if self.state == TickerState::Disposed {
            return LayoutOutcome::Empty;
        }
        if self.child_count == 0 {
            self.discard_animation();
            self.layout = None;
            self.params = None;
            self.state = TickerState::Uninitialized;
            return LayoutOutcome::Empty;
        }

        let axis = self.config.direction.axis();
        let measured = host.measure(axis);
        let Some(layout) = compute_layout(
            measured.stride_px,
            measured.viewport_px,
            self.config.overflow_buffer_px,
        ) else {
            return LayoutOutcome::NotReady;
        };

        if self.animation.is_some() && self.layout == Some(layout) {
            trace!("layout unchanged; keeping animation");
            return LayoutOutcome::Ready(layout);
        }

        self.layout = Some(layout);
        self.install_animation(host, layout);
        LayoutOutcome::Ready(layout)
    }

    /// Host reported a container size change.
    pub fn on_resize<H>(&mut self, host: &mut H) -> LayoutOutcome
    where
        H: TickerHost<Animation = A>,
    {
        if self.resize_subscription.is_none() {
            return LayoutOutcome::NotReady;
        }
        self.relayout(host)
    }

    /// Host reported the container crossed its visibility threshold.
    /// Only the first crossing matters.
    pub fn on_visible(&mut self) {
        if self.state != TickerState::PendingVisibility {
            return;
        }
        self.has_been_visible = true;
        self.visibility_subscription = None;
        self.state = TickerState::Playing;
        debug!("ticker became visible; starting animation");
        self.sync_playback();
    }

    /// Pointer entered the container or a touch began.
    pub fn hover_enter(&mut self) {
        if !self.config.pause_on_hover || self.hovered {
            return;
        }
        self.hovered = true;
        self.sync_playback();
    }

    /// Pointer left the container or a touch ended or was cancelled.
    pub fn hover_leave(&mut self) {
        if !self.config.pause_on_hover || !self.hovered {
            return;
        }
        self.hovered = false;
        self.sync_playback();
    }

    /// Apply new options or a new child count, rebuilding from scratch.
    pub fn reconfigure<H>(
        &mut self,
        host: &mut H,
        config: TickerConfig,
        child_count: usize,
    ) -> LayoutOutcome
    where
        H: TickerHost<Animation = A>,
    {
        if self.state == TickerState::Disposed {
            return LayoutOutcome::Empty;
        }
        self.discard_animation();
        self.layout = None;
        self.params = None;
        self.state = TickerState::Uninitialized;
        if !config.pause_on_hover {
            self.hovered = false;
        }
        self.config = config;
        self.child_count = child_count;
        self.mount(host)
    }

    /// Cancel the animation and release every observation. Terminal.
    pub fn teardown(&mut self) {
        self.discard_animation();
        self.resize_subscription = None;
        self.layout = None;
        self.params = None;
        self.state = TickerState::Disposed;
    }

    fn install_animation<H>(&mut self, host: &mut H, layout: LayoutState)
    where
        H: TickerHost<Animation = A>,
    {
        self.discard_animation();

        let params = derive_animation_parameters(
            &layout,
            self.config.direction,
            self.config.delay_ms,
            self.config.speed_ms,
        );
        self.animation = Some(host.animate(&params));
        self.params = Some(params);

        self.state = match self.config.trigger {
            Trigger::OnLoad => TickerState::Playing,
            Trigger::InView if self.has_been_visible => TickerState::Playing,
            Trigger::InView => {
                let threshold = visibility_threshold(params.axis);
                match host.observe_visibility(threshold) {
                    Some(subscription) => {
                        self.visibility_subscription = Some(subscription);
                        TickerState::PendingVisibility
                    }
                    None => {
                        debug!("visibility observation unavailable; playing immediately");
                        TickerState::Playing
                    }
                }
            }
        };
        self.sync_playback();
    }

    fn discard_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.cancel();
        }
        self.visibility_subscription = None;
    }

    fn sync_playback(&mut self) {
        let should_play = self.state == TickerState::Playing && !self.hovered;
        if let Some(animation) = self.animation.as_mut() {
            if should_play {
                animation.play();
            } else {
                animation.pause();
            }
        }
    }
}

impl<A: AnimationHandle> Drop for TickerController<A> {
    fn drop(&mut self) {
        self.discard_animation();
    }
}
