//! Transform policies: normalized position to visual transform.
//!
//! A policy is a pure function of the item's geometry and its position. The
//! browser calls it for every slot whenever it builds render items, for live
//! drags and settle frames alike.
//!
//! Position -1 must put the view in the previous place, 0 full screen at the
//! origin and +1 in the next place. Keep the draw order in mind when a policy
//! overlaps items.

use crate::config::TransitionStyle;
use lightbox_foundation::Axis;
use lightbox_ui_graphics::{Size, VisualTransform};

/// Scale of a view fully pushed back by the slide presets.
const SLIDE_BACKDROP_SCALE: f32 = 0.9;

/// Tolerance for treating a slide preset view as exactly one place away.
const OFFSCREEN_EPSILON: f32 = 1e-7;

/// What a policy knows about the view it transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemGeometry {
    /// Bounds of the view, which is the viewport.
    pub size: Size,
    /// Spacing between adjacent items.
    pub gap: f32,
}

impl ItemGeometry {
    pub fn new(size: Size, gap: f32) -> Self {
        Self { size, gap }
    }

    /// Extent of one place along `axis`, gap included.
    pub fn extent_with_gap(&self, axis: Axis) -> f32 {
        axis.of_size(self.size) + self.gap
    }
}

pub trait TransformPolicy {
    fn transform(&self, geometry: ItemGeometry, position: f32) -> VisualTransform;
}

impl<F> TransformPolicy for F
where
    F: Fn(ItemGeometry, f32) -> VisualTransform,
{
    fn transform(&self, geometry: ItemGeometry, position: f32) -> VisualTransform {
        self(geometry, position)
    }
}

/// One of the stock presets bound to a paging axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StockTransition {
    pub style: TransitionStyle,
    pub axis: Axis,
}

impl StockTransition {
    pub fn new(style: TransitionStyle, axis: Axis) -> Self {
        Self { style, axis }
    }
}

impl TransformPolicy for StockTransition {
    fn transform(&self, geometry: ItemGeometry, position: f32) -> VisualTransform {
        let step = geometry.extent_with_gap(self.axis);
        match self.style {
            TransitionStyle::MoveInOut => move_in_out(self.axis, step, position),
            TransitionStyle::SlideOut => slide_out(self.axis, step, position),
            TransitionStyle::SlideIn => slide_in(self.axis, step, position),
        }
    }
}

fn move_in_out(axis: Axis, step: f32, position: f32) -> VisualTransform {
    let offset = axis.pack(step * position, 0.0);
    VisualTransform::translated(offset.x, offset.y)
}

fn slide_out(axis: Axis, step: f32, position: f32) -> VisualTransform {
    let scale = if position < -0.5 {
        SLIDE_BACKDROP_SCALE
    } else if position <= 0.0 {
        1.0 + position * 0.2
    } else {
        1.0
    };
    let travel = if position >= 0.0 { step * position } else { 0.0 };
    let offset = axis.pack(travel, 0.0);
    VisualTransform::scaled(scale)
        .then_translate(offset.x, offset.y)
        .with_hidden(is_one_place_away(position))
}

fn slide_in(axis: Axis, step: f32, position: f32) -> VisualTransform {
    let scale = if position > 0.5 {
        SLIDE_BACKDROP_SCALE
    } else if position >= 0.0 {
        1.0 - position * 0.2
    } else {
        1.0
    };
    let travel = if position > 0.0 { 0.0 } else { step * position };
    let offset = axis.pack(travel, 0.0);
    VisualTransform::scaled(scale)
        .then_translate(offset.x, offset.y)
        .with_hidden(is_one_place_away(position))
}

fn is_one_place_away(position: f32) -> bool {
    (position.abs() - 1.0).abs() <= OFFSCREEN_EPSILON
}
