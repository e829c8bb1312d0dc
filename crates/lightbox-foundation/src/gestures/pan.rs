//! Resolved pan gesture samples.

use crate::gesture_constants::MAX_FLING_VELOCITY;
use lightbox_ui_graphics::{Point, Size};

/// Screen axis along which items page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn orthogonal(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Component of `point` along this axis.
    pub fn of_point(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Extent of `size` along this axis.
    pub fn of_size(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// A point with `main` on this axis and `cross` on the other.
    pub fn pack(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }
}

/// Lifecycle phase of a platform pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// End, cancel and fail all resolve the gesture the same way.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed
        )
    }
}

/// One pan sample as delivered by the platform recogniser.
///
/// `translation` is cumulative since the gesture began; `velocity` is in
/// logical pixels per second and only meaningful on terminal phases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSample {
    pub phase: GesturePhase,
    pub translation: Point,
    pub velocity: Point,
}

impl PanSample {
    pub fn new(phase: GesturePhase, translation: Point, velocity: Point) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }

    pub fn began() -> Self {
        Self::new(GesturePhase::Began, Point::ZERO, Point::ZERO)
    }

    pub fn changed(translation: Point) -> Self {
        Self::new(GesturePhase::Changed, translation, Point::ZERO)
    }

    pub fn ended(translation: Point, velocity: Point) -> Self {
        Self::new(GesturePhase::Ended, translation, velocity)
    }

    pub fn cancelled(translation: Point) -> Self {
        Self::new(GesturePhase::Cancelled, translation, Point::ZERO)
    }

    /// Velocity with each component clamped to the fling limit.
    pub fn clamped_velocity(&self) -> Point {
        Point::new(
            self.velocity
                .x
                .clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY),
            self.velocity
                .y
                .clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_components() {
        let point = Point::new(3.0, 4.0);
        assert_eq!(Axis::Horizontal.of_point(point), 3.0);
        assert_eq!(Axis::Vertical.of_point(point), 4.0);
        assert_eq!(Axis::Vertical.pack(1.0, 2.0), Point::new(2.0, 1.0));
        assert_eq!(Axis::Horizontal.orthogonal(), Axis::Vertical);
    }

    #[test]
    fn spikes_are_clamped() {
        let sample = PanSample::ended(Point::ZERO, Point::new(-20_000.0, 50.0));
        assert_eq!(
            sample.clamped_velocity(),
            Point::new(-MAX_FLING_VELOCITY, 50.0)
        );
    }
}
