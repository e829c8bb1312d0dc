//! Discrete tap gestures.

use lightbox_ui_graphics::Point;

/// A recognised tap. Hosts that cannot tell single from double taps only
/// ever report [`TapKind::Single`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapKind {
    Single,
    Double,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapEvent {
    pub kind: TapKind,
    pub position: Point,
}

impl TapEvent {
    pub fn single(position: Point) -> Self {
        Self {
            kind: TapKind::Single,
            position,
        }
    }

    pub fn double(position: Point) -> Self {
        Self {
            kind: TapKind::Double,
            position,
        }
    }
}
