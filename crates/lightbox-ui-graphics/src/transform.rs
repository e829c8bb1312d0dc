//! Visual transform applied to a laid-out view.

use crate::geometry::{Point, Rect};

/// Scale-then-translate transform plus visibility, about the view's center.
///
/// This is what transform policies produce and what renderers consume; it
/// carries no knowledge of how the view is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualTransform {
    pub translation: Point,
    pub scale: f32,
    pub alpha: f32,
    pub hidden: bool,
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl VisualTransform {
    pub const IDENTITY: VisualTransform = VisualTransform {
        translation: Point::ZERO,
        scale: 1.0,
        alpha: 1.0,
        hidden: false,
    };

    pub fn translated(x: f32, y: f32) -> Self {
        Self {
            translation: Point::new(x, y),
            ..Self::IDENTITY
        }
    }

    pub fn scaled(scale: f32) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// Adds a translation expressed in the scaled coordinate space.
    ///
    /// Matches affine `scale.translatedBy(..)` composition: the translation is
    /// multiplied by the current scale before being added.
    pub fn then_translate(mut self, x: f32, y: f32) -> Self {
        self.translation.x += x * self.scale;
        self.translation.y += y * self.scale;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Maps a frame through this transform, scaling about the frame's center.
    pub fn apply_to_rect(&self, frame: Rect) -> Rect {
        let center = frame.center();
        let width = frame.width * self.scale;
        let height = frame.height * self.scale;
        Rect::new(
            center.x - width * 0.5 + self.translation.x,
            center.y - height * 0.5 + self.translation.y,
            width,
            height,
        )
    }
}
