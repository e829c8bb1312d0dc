//! Shared gesture constants for consistent pan/tap handling.
//!
//! Values are in logical pixels (and logical pixels per second).

/// Maximum fling velocity in logical pixels per second.
///
/// Release velocities reported by platforms occasionally spike on the last
/// touch sample; anything above this is clamped before engines see it.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Translation below which a first `Changed` sample is too small to tell the
/// dominant axis. Arbitration waits for a larger sample unless the gesture
/// ends first.
pub const AXIS_DECISION_SLOP: f32 = 0.5;

