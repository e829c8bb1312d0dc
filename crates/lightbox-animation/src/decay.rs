//! Per-frame fractional decay toward a fixed distance.
//!
//! Each frame consumes `remaining / (frame_rate * time_constant)` of what is
//! left to travel. The motion is fast at first and slows asymptotically, so
//! the owner ends it once a frame's movement drops below a pixel threshold
//! and applies the remainder in one go.

/// Shape of a frame decay.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameDecaySpec {
    /// Frames per second the owner ticks at.
    pub frame_rate: f32,
    /// Seconds-equivalent time constant; larger is slower.
    pub time_constant: f32,
    /// Movement in pixels below which a frame finishes the decay.
    pub snap_threshold_px: f32,
}

impl FrameDecaySpec {
    pub fn new(frame_rate: f32, time_constant: f32, snap_threshold_px: f32) -> Self {
        Self {
            frame_rate,
            time_constant,
            snap_threshold_px,
        }
    }

    /// The fraction divisor, never below one so a frame never overshoots.
    pub fn divisor(&self) -> f32 {
        (self.frame_rate * self.time_constant).max(1.0)
    }

    /// Movement for one frame with `remaining` left to travel.
    pub fn step(&self, remaining: f32) -> f32 {
        remaining / self.divisor()
    }
}

/// What one decay frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayFrame {
    /// Nothing left to travel.
    Idle,
    /// Moved by the given amount; more frames follow.
    Moved(f32),
    /// Moved by the given amount, which includes the whole remainder.
    Finished(f32),
}

impl DecayFrame {
    pub fn delta(&self) -> f32 {
        match self {
            DecayFrame::Idle => 0.0,
            DecayFrame::Moved(delta) | DecayFrame::Finished(delta) => *delta,
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, DecayFrame::Moved(_))
    }
}

/// A distance still to be travelled by frame decay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecayingDistance {
    remaining: f32,
}

impl DecayingDistance {
    pub fn new(distance: f32) -> Self {
        Self {
            remaining: distance,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_idle(&self) -> bool {
        self.remaining == 0.0
    }

    /// Consumes one frame's share of the remaining distance.
    pub fn take_step(&mut self, spec: &FrameDecaySpec) -> f32 {
        let step = spec.step(self.remaining);
        self.remaining -= step;
        step
    }

    /// Consumes whatever is left.
    pub fn take_rest(&mut self) -> f32 {
        std::mem::take(&mut self.remaining)
    }

    /// Runs one frame. `unit_px` converts the travelled distance into pixels
    /// for the snap test (for normalized distances, the item extent).
    pub fn advance(&mut self, spec: &FrameDecaySpec, unit_px: f32) -> DecayFrame {
        if self.is_idle() {
            return DecayFrame::Idle;
        }
        let step = self.take_step(spec);
        if (step * unit_px).abs() < spec.snap_threshold_px {
            DecayFrame::Finished(step + self.take_rest())
        } else {
            DecayFrame::Moved(step)
        }
    }
}
