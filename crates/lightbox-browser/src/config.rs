//! Browser configuration.
//!
//! All values are fixed for the duration of a gesture; `MediaBrowser::set_config`
//! swaps the whole struct between gestures. Defaults reproduce the stock
//! browser feel.

use crate::error::ConfigError;
use lightbox_animation::{AnimationSpec, Easing, FrameDecaySpec};
use lightbox_foundation::Axis;

/// Spacing between adjacent items in logical pixels.
pub const DEFAULT_GAP: f32 = 50.0;
/// Release velocity (px/s) below which a drag counts as slow.
pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 15.0;
/// Normalized offset below which a slow release snaps back to center.
pub const DEFAULT_MIN_SETTLE_FRACTION: f32 = 0.1;
pub const DEFAULT_FRAME_RATE: f32 = 60.0;
pub const DEFAULT_SETTLE_TIME_CONSTANT: f32 = 0.1;
pub const DEFAULT_SETTLE_SNAP_THRESHOLD_PX: f32 = 1.0;
/// Damping applied to drags past the first or last item in linear mode.
pub const DEFAULT_BOUNCE_FACTOR: f32 = 0.1;
pub const DEFAULT_AUTO_HIDE_CONTROLS_DELAY: f32 = 3.0;
pub const DEFAULT_CONTROLS_FADE_DURATION: f32 = 0.3;

pub const DEFAULT_DISMISS_MIN_TRANSLATION_FRACTION: f32 = 0.25;
pub const DEFAULT_DISMISS_SPEED_FACTOR: f32 = 0.15;
pub const DEFAULT_DISMISS_MIN_ZOOM_FACTOR: f32 = 0.9;
pub const DEFAULT_DISMISS_FLY_DURATION: f32 = 0.3;
pub const DEFAULT_DISMISS_SNAP_THRESHOLD_PX: f32 = 1.0;

/// Boundary policy for the first and last item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrowserStyle {
    /// Clamped; drags past either end are damped and settle back.
    Linear,
    /// Wraps from the last item to the first and back.
    #[default]
    Carousel,
}

/// Bottom-to-top compositing of the three window slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawOrder {
    #[default]
    PreviousToNext,
    NextToPrevious,
}

/// Stock transition presets. Each is available for both paging axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionStyle {
    /// Items move rigidly side by side.
    #[default]
    MoveInOut,
    /// The outgoing item stays put and shrinks while the next slides over it.
    /// Expects [`DrawOrder::PreviousToNext`].
    SlideOut,
    /// The incoming item grows in place while the current one slides away.
    /// Expects [`DrawOrder::NextToPrevious`].
    SlideIn,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DismissConfig {
    pub enabled: bool,
    /// Fraction of the viewport a release must exceed to dismiss.
    pub min_translation_fraction: f32,
    pub frame_rate: f32,
    /// Decay time constant of slide-off and spring-back.
    pub speed_factor: f32,
    /// Smallest scale the snapshot shrinks to while dragged toward a target.
    pub min_zoom_factor: f32,
    /// Seconds the fly-to-target animation takes.
    pub fly_duration: f32,
    pub fly_easing: Easing,
    pub snap_threshold_px: f32,
}

impl Default for DismissConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_translation_fraction: DEFAULT_DISMISS_MIN_TRANSLATION_FRACTION,
            frame_rate: DEFAULT_FRAME_RATE,
            speed_factor: DEFAULT_DISMISS_SPEED_FACTOR,
            min_zoom_factor: DEFAULT_DISMISS_MIN_ZOOM_FACTOR,
            fly_duration: DEFAULT_DISMISS_FLY_DURATION,
            fly_easing: Easing::EaseInOut,
            snap_threshold_px: DEFAULT_DISMISS_SNAP_THRESHOLD_PX,
        }
    }
}

impl DismissConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_min_translation_fraction(mut self, fraction: f32) -> Self {
        self.min_translation_fraction = fraction;
        self
    }

    pub fn with_fly(mut self, duration: f32, easing: Easing) -> Self {
        self.fly_duration = duration;
        self.fly_easing = easing;
        self
    }

    pub fn decay_spec(&self) -> FrameDecaySpec {
        FrameDecaySpec::new(self.frame_rate, self.speed_factor, self.snap_threshold_px)
    }

    pub fn fly_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(seconds_to_millis(self.fly_duration), self.fly_easing)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        unit_fraction("dismiss.min_translation_fraction", self.min_translation_fraction)?;
        positive("dismiss.frame_rate", self.frame_rate)?;
        positive("dismiss.speed_factor", self.speed_factor)?;
        unit_fraction("dismiss.min_zoom_factor", self.min_zoom_factor)?;
        non_negative("dismiss.fly_duration", self.fly_duration)?;
        non_negative("dismiss.snap_threshold_px", self.snap_threshold_px)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrowserConfig {
    pub gesture_axis: Axis,
    pub browser_style: BrowserStyle,
    pub draw_order: DrawOrder,
    pub gap: f32,
    pub transition: TransitionStyle,
    pub min_fling_velocity: f32,
    pub min_settle_fraction: f32,
    pub frame_rate: f32,
    pub settle_time_constant: f32,
    pub settle_snap_threshold_px: f32,
    pub bounce_factor: f32,
    /// Seconds after [`MediaBrowser::appear`](crate::MediaBrowser::appear)
    /// before the controls hide themselves. `None` keeps them up.
    pub auto_hide_controls_delay: Option<f32>,
    pub controls_fade_duration: f32,
    pub dismiss: DismissConfig,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            gesture_axis: Axis::Horizontal,
            browser_style: BrowserStyle::Carousel,
            draw_order: DrawOrder::PreviousToNext,
            gap: DEFAULT_GAP,
            transition: TransitionStyle::MoveInOut,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            min_settle_fraction: DEFAULT_MIN_SETTLE_FRACTION,
            frame_rate: DEFAULT_FRAME_RATE,
            settle_time_constant: DEFAULT_SETTLE_TIME_CONSTANT,
            settle_snap_threshold_px: DEFAULT_SETTLE_SNAP_THRESHOLD_PX,
            bounce_factor: DEFAULT_BOUNCE_FACTOR,
            auto_hide_controls_delay: Some(DEFAULT_AUTO_HIDE_CONTROLS_DELAY),
            controls_fade_duration: DEFAULT_CONTROLS_FADE_DURATION,
            dismiss: DismissConfig::default(),
        }
    }
}

impl BrowserConfig {
    pub fn with_gesture_axis(mut self, axis: Axis) -> Self {
        self.gesture_axis = axis;
        self
    }

    pub fn with_browser_style(mut self, style: BrowserStyle) -> Self {
        self.browser_style = style;
        self
    }

    pub fn with_draw_order(mut self, order: DrawOrder) -> Self {
        self.draw_order = order;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_transition(mut self, transition: TransitionStyle) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_auto_hide_controls_delay(mut self, delay: Option<f32>) -> Self {
        self.auto_hide_controls_delay = delay;
        self
    }

    pub fn with_dismiss(mut self, dismiss: DismissConfig) -> Self {
        self.dismiss = dismiss;
        self
    }

    /// The settle decay driven by the paging engine.
    pub fn settle_spec(&self) -> FrameDecaySpec {
        FrameDecaySpec::new(
            self.frame_rate,
            self.settle_time_constant,
            self.settle_snap_threshold_px,
        )
    }

    pub fn controls_fade_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(
            seconds_to_millis(self.controls_fade_duration),
            Easing::EaseInOut,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigError::InvalidGap(self.gap));
        }
        non_negative("min_fling_velocity", self.min_fling_velocity)?;
        non_negative("min_settle_fraction", self.min_settle_fraction)?;
        positive("frame_rate", self.frame_rate)?;
        positive("settle_time_constant", self.settle_time_constant)?;
        non_negative("settle_snap_threshold_px", self.settle_snap_threshold_px)?;
        unit_fraction("bounce_factor", self.bounce_factor)?;
        if let Some(delay) = self.auto_hide_controls_delay {
            non_negative("auto_hide_controls_delay", delay)?;
        }
        non_negative("controls_fade_duration", self.controls_fade_duration)?;
        self.dismiss.validate()
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn unit_fraction(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { name, value })
    }
}

fn seconds_to_millis(seconds: f32) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}
