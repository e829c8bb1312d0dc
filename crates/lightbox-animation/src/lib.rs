//! Animation system for Lightbox
//!
//! Animations here are stepped by whole frames rather than sampled from a
//! clock: the owning engine decides when a frame happens and calls `advance`.

mod decay;
mod easing;
mod tween;

pub use decay::{DecayFrame, DecayingDistance, FrameDecaySpec};
pub use easing::{Easing, Lerp};
pub use tween::{AnimationSpec, FrameTween};

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
