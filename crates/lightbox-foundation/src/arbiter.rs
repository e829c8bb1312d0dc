//! Per-gesture routing between the paging and dismiss state machines.
//!
//! A pan is parked on `Began` and decided once, on its first `Changed`
//! sample that moved far enough to show a dominant axis. The decision holds
//! until the gesture's terminal phase; nothing re-routes a gesture midway.

use crate::gesture_constants::AXIS_DECISION_SLOP;
use crate::gestures::{Axis, GesturePhase, PanSample};

/// Which machine owns the current gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureRoute {
    /// Pages between items.
    Paging,
    /// Interactive drag-to-dismiss.
    Dismiss,
    /// Pans the zoomed content of the focused item; the engines stay out of it.
    Content,
    /// Dropped, e.g. while a dismiss animation is still resolving.
    Ignored,
}

/// Facts about the owner the arbiter needs at decision time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArbiterContext {
    pub paging_axis: Axis,
    pub dismiss_enabled: bool,
    /// The dismiss engine is still animating a previous gesture.
    pub dismiss_busy: bool,
    /// The focused item is zoomed in.
    pub content_zoomed: bool,
}

/// What the owner should forward for one incoming sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Routed {
    /// Nothing to forward yet (parked, or not owned by any engine).
    Hold,
    /// The route was just decided: deliver a synthetic begin, then `sample`.
    Start(GestureRoute, PanSample),
    /// Deliver `sample` to the already-decided route.
    Continue(GestureRoute, PanSample),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum ArbiterState {
    #[default]
    Idle,
    Pending,
    Routed(GestureRoute),
}

#[derive(Debug, Default)]
pub struct GestureArbiter {
    state: ArbiterState,
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The route of the gesture in flight, if decided.
    pub fn active_route(&self) -> Option<GestureRoute> {
        match self.state {
            ArbiterState::Routed(route) => Some(route),
            _ => None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        !matches!(self.state, ArbiterState::Idle)
    }

    /// Routes one sample.
    pub fn route(&mut self, sample: PanSample, cx: &ArbiterContext) -> Routed {
        match sample.phase {
            GesturePhase::Began => {
                if let ArbiterState::Routed(route) = self.state {
                    log::debug!("gesture began while {route:?} was still routed; restarting");
                }
                self.state = ArbiterState::Pending;
                Routed::Hold
            }
            GesturePhase::Changed => match self.state {
                ArbiterState::Routed(route) => Routed::Continue(route, sample),
                ArbiterState::Idle | ArbiterState::Pending => match decide(sample, cx) {
                    Some(route) => {
                        log::debug!("gesture routed to {route:?}");
                        self.state = ArbiterState::Routed(route);
                        Routed::Start(route, sample)
                    }
                    None => {
                        self.state = ArbiterState::Pending;
                        Routed::Hold
                    }
                },
            },
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                match std::mem::take(&mut self.state) {
                    ArbiterState::Routed(route) => Routed::Continue(route, sample),
                    ArbiterState::Idle | ArbiterState::Pending => Routed::Hold,
                }
            }
        }
    }

    /// Forgets the gesture in flight without delivering anything.
    pub fn reset(&mut self) {
        self.state = ArbiterState::Idle;
    }
}

fn decide(sample: PanSample, cx: &ArbiterContext) -> Option<GestureRoute> {
    if cx.dismiss_busy {
        return Some(GestureRoute::Ignored);
    }
    if cx.content_zoomed {
        return Some(GestureRoute::Content);
    }

    let along = cx.paging_axis.of_point(sample.translation).abs();
    let across = cx.paging_axis.orthogonal().of_point(sample.translation).abs();
    if along <= AXIS_DECISION_SLOP && across <= AXIS_DECISION_SLOP {
        return None;
    }

    if cx.dismiss_enabled && across > along {
        Some(GestureRoute::Dismiss)
    } else {
        Some(GestureRoute::Paging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightbox_ui_graphics::Point;

    fn context() -> ArbiterContext {
        ArbiterContext {
            paging_axis: Axis::Horizontal,
            dismiss_enabled: true,
            dismiss_busy: false,
            content_zoomed: false,
        }
    }

    #[test]
    fn orthogonal_drag_goes_to_dismiss() {
        let mut arbiter = GestureArbiter::new();
        let cx = context();
        assert_eq!(arbiter.route(PanSample::began(), &cx), Routed::Hold);

        let first = PanSample::changed(Point::new(2.0, 12.0));
        assert_eq!(
            arbiter.route(first, &cx),
            Routed::Start(GestureRoute::Dismiss, first)
        );
    }

    #[test]
    fn route_is_held_for_the_whole_gesture() {
        let mut arbiter = GestureArbiter::new();
        let cx = context();
        arbiter.route(PanSample::began(), &cx);
        arbiter.route(PanSample::changed(Point::new(10.0, 1.0)), &cx);

        let sideways = PanSample::changed(Point::new(10.0, 300.0));
        assert_eq!(
            arbiter.route(sideways, &cx),
            Routed::Continue(GestureRoute::Paging, sideways)
        );

        let end = PanSample::ended(Point::new(10.0, 300.0), Point::ZERO);
        assert_eq!(
            arbiter.route(end, &cx),
            Routed::Continue(GestureRoute::Paging, end)
        );
        assert!(!arbiter.is_tracking());
    }

    #[test]
    fn tiny_first_sample_defers_decision() {
        let mut arbiter = GestureArbiter::new();
        let cx = context();
        arbiter.route(PanSample::began(), &cx);
        assert_eq!(
            arbiter.route(PanSample::changed(Point::new(0.1, 0.2)), &cx),
            Routed::Hold
        );
        let next = PanSample::changed(Point::new(-6.0, 1.0));
        assert_eq!(
            arbiter.route(next, &cx),
            Routed::Start(GestureRoute::Paging, next)
        );
    }

    #[test]
    fn disabled_dismiss_keeps_orthogonal_drags_on_paging() {
        let mut arbiter = GestureArbiter::new();
        let cx = ArbiterContext {
            dismiss_enabled: false,
            ..context()
        };
        arbiter.route(PanSample::began(), &cx);
        let sample = PanSample::changed(Point::new(0.0, 40.0));
        assert_eq!(
            arbiter.route(sample, &cx),
            Routed::Start(GestureRoute::Paging, sample)
        );
    }

    #[test]
    fn zoomed_content_and_busy_dismiss_take_precedence() {
        let mut arbiter = GestureArbiter::new();
        let sample = PanSample::changed(Point::new(40.0, 0.0));

        let zoomed = ArbiterContext {
            content_zoomed: true,
            ..context()
        };
        arbiter.route(PanSample::began(), &zoomed);
        assert_eq!(
            arbiter.route(sample, &zoomed),
            Routed::Start(GestureRoute::Content, sample)
        );

        let busy = ArbiterContext {
            dismiss_busy: true,
            ..context()
        };
        arbiter.route(PanSample::began(), &busy);
        assert_eq!(
            arbiter.route(sample, &busy),
            Routed::Start(GestureRoute::Ignored, sample)
        );
    }

    #[test]
    fn end_without_movement_delivers_nothing() {
        let mut arbiter = GestureArbiter::new();
        let cx = context();
        arbiter.route(PanSample::began(), &cx);
        assert_eq!(
            arbiter.route(PanSample::ended(Point::ZERO, Point::ZERO), &cx),
            Routed::Hold
        );
        assert_eq!(arbiter.active_route(), None);
    }

    #[test]
    fn vertical_paging_treats_horizontal_drags_as_dismiss() {
        let mut arbiter = GestureArbiter::new();
        let cx = ArbiterContext {
            paging_axis: Axis::Vertical,
            ..context()
        };
        arbiter.route(PanSample::began(), &cx);
        let sample = PanSample::changed(Point::new(30.0, 5.0));
        assert_eq!(
            arbiter.route(sample, &cx),
            Routed::Start(GestureRoute::Dismiss, sample)
        );
    }
}
