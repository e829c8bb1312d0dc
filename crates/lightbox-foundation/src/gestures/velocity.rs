//! Release-velocity estimation for hosts whose platform does not report it.
//!
//! Weighted least-squares over a short horizon of recent samples, recent
//! samples weighing more. Positions are cumulative pan translations.

use lightbox_ui_graphics::Point;

/// Ring buffer size for velocity samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this many milliseconds of the newest one count.
const HORIZON_MS: i64 = 100;

/// If the pointer barely moved over this long, it is treated as stopped.
const ASSUME_STOPPED_MS: i64 = 40;

/// Movement in pixels under which a stalled pointer reports zero velocity.
const MIN_MOVEMENT_PX: f32 = 2.0;

/// Per-sample weight decay; sample `i` back from the newest weighs `RECENCY^i`.
const RECENCY: f32 = 0.95;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Tracks one axis.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }

    /// Velocity in units per second; zero without at least two recent samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut oldest = newest;
        let mut cursor = self.newest;

        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[cursor] else {
                break;
            };
            let age = newest.time_ms - sample.time_ms;
            if age > HORIZON_MS {
                break;
            }
            oldest = sample;
            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            cursor = (cursor + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }

        let span_ms = newest.time_ms - oldest.time_ms;
        if span_ms > ASSUME_STOPPED_MS && (newest.position - oldest.position).abs() < MIN_MOVEMENT_PX
        {
            return 0.0;
        }

        weighted_slope(&positions[..count], &times[..count]) * 1000.0
    }
}

/// Slope of the weighted linear fit `position = a + b * time`.
fn weighted_slope(positions: &[f32], times: &[f32]) -> f32 {
    let mut sum_w = 0.0f32;
    let mut sum_t = 0.0f32;
    let mut sum_x = 0.0f32;
    let mut sum_tt = 0.0f32;
    let mut sum_tx = 0.0f32;

    for (i, (&x, &t)) in positions.iter().zip(times).enumerate() {
        let w = RECENCY.powi(i as i32);
        sum_w += w;
        sum_t += w * t;
        sum_x += w * x;
        sum_tt += w * t * t;
        sum_tx += w * t * x;
    }

    let denom = sum_w * sum_tt - sum_t * sum_t;
    if denom.abs() < f32::EPSILON {
        return 0.0;
    }
    (sum_w * sum_tx - sum_t * sum_x) / denom
}

/// Tracks both axes of a pan.
#[derive(Clone, Debug, Default)]
pub struct PanVelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl PanVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, time_ms: i64, translation: Point) {
        self.x.add_data_point(time_ms, translation.x);
        self.y.add_data_point(time_ms, translation.y);
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    pub fn velocity(&self) -> Point {
        Point::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_returns_zero() {
        assert_eq!(VelocityTracker1D::new().calculate_velocity(), 0.0);
    }

    #[test]
    fn single_point_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn constant_speed_is_reported() {
        let mut tracker = VelocityTracker1D::new();
        for i in 0..4 {
            tracker.add_data_point(i * 10, i as f32 * 100.0);
        }
        let velocity = tracker.calculate_velocity();
        assert!(
            (velocity - 10_000.0).abs() < 1_000.0,
            "Expected ~10000, got {velocity}"
        );
    }

    #[test]
    fn backwards_motion_is_negative() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);
        assert!(tracker.calculate_velocity() < 0.0);
    }

    #[test]
    fn stalled_pointer_reports_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        tracker.add_data_point(30, 100.5);
        tracker.add_data_point(60, 101.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn pan_tracker_reports_both_axes() {
        let mut tracker = PanVelocityTracker::new();
        for i in 0..4 {
            tracker.add(i * 10, Point::new(i as f32 * -50.0, i as f32 * 20.0));
        }
        let velocity = tracker.velocity();
        assert!(velocity.x < -4_000.0, "x was {}", velocity.x);
        assert!(velocity.y > 1_500.0, "y was {}", velocity.y);

        tracker.reset();
        assert_eq!(tracker.velocity(), Point::ZERO);
    }
}
