//! Testing utilities and harness for Lightbox

pub mod fake_source;
pub mod robot;
pub mod robot_assertions;

pub use fake_source::{FakeImage, FakeMediaSource};
pub use robot::BrowserRobot;
pub use robot_assertions::{assert_approx_eq, assert_rect_approx_eq, assert_window_at_rest};

pub mod prelude {
    pub use crate::fake_source::{FakeImage, FakeMediaSource};
    pub use crate::robot::BrowserRobot;
    pub use crate::robot_assertions;
    pub use lightbox_browser::prelude::*;
}
