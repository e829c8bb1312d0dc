//! Fixed-duration tweens advanced one frame at a time.

use crate::easing::{Easing, Lerp};

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// Number of frames the tween spans at `frame_rate`, never fewer than one.
    pub fn frame_count(&self, frame_rate: f32) -> u32 {
        let frames = (self.duration_millis as f32 / 1000.0 * frame_rate).round();
        if frames.is_finite() && frames >= 1.0 {
            frames as u32
        } else {
            1
        }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::EaseInOut)
    }
}

/// A tween between two values, stepped by whole frames.
///
/// Frame stepping keeps the outcome independent of wall-clock jitter: the
/// value after `n` frames is always the same.
#[derive(Debug, Clone)]
pub struct FrameTween<T: Lerp + Clone> {
    start: T,
    target: T,
    easing: Easing,
    total_frames: u32,
    elapsed_frames: u32,
}

impl<T: Lerp + Clone> FrameTween<T> {
    pub fn new(start: T, target: T, spec: AnimationSpec, frame_rate: f32) -> Self {
        Self {
            start,
            target,
            easing: spec.easing,
            total_frames: spec.frame_count(frame_rate),
            elapsed_frames: 0,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.elapsed_frames as f32 / self.total_frames as f32
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_frames >= self.total_frames
    }

    /// Value at the current frame.
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.target.clone();
        }
        let eased = self.easing.transform(self.progress());
        self.start.lerp(&self.target, eased)
    }

    /// Eased fraction at the current frame, for values animated alongside `T`.
    pub fn eased_fraction(&self) -> f32 {
        self.easing.transform(self.progress().clamp(0.0, 1.0))
    }

    /// Advances one frame and returns the new value.
    pub fn advance(&mut self) -> T {
        if !self.is_finished() {
            self.elapsed_frames += 1;
        }
        self.value()
    }
}
