pub mod pan;
pub mod tap;
pub mod velocity;

pub use pan::{Axis, GesturePhase, PanSample};
pub use tap::{TapEvent, TapKind};
pub use velocity::{PanVelocityTracker, VelocityTracker1D};
