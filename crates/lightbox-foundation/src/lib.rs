//! Gesture vocabulary and arbitration for Lightbox
//!
//! The engines never see raw pointer events. Hosts resolve platform input into
//! [`PanSample`]s and [`TapEvent`]s; the [`GestureArbiter`] decides which
//! engine owns each pan.

pub mod arbiter;
pub mod gesture_constants;
pub mod gestures;

pub use arbiter::{ArbiterContext, GestureArbiter, GestureRoute, Routed};
pub use gesture_constants::*;
pub use gestures::*;

pub mod prelude {
    pub use crate::arbiter::{ArbiterContext, GestureArbiter, GestureRoute, Routed};
    pub use crate::gestures::{Axis, GesturePhase, PanSample, TapEvent, TapKind};
}
