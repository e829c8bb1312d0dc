//! Drag, release and settle of the item window.
//!
//! The engine goes Idle -> Dragging -> Settling -> Idle. Live drags and
//! settle frames both move the window through [`apply_normalized`], so a
//! crossing during settle recycles exactly like one under the finger.

use crate::config::{BrowserConfig, BrowserStyle};
use crate::window::{ItemWindow, RecycleEvent, WindowGeometry};
use lightbox_animation::{DecayingDistance, FrameDecaySpec};
use lightbox_core::TickerSlot;
use lightbox_ui_graphics::Size;
use smallvec::SmallVec;
use web_time::Instant;

/// Recycles produced by one engine call. Rarely more than one.
pub type RecycleEvents = SmallVec<[RecycleEvent; 2]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PagingPhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

/// Everything the engine reads from the browser for one call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagingParams {
    pub geometry: WindowGeometry,
    pub style: BrowserStyle,
    pub item_count: usize,
    pub bounce_factor: f32,
    pub min_fling_velocity: f32,
    pub min_settle_fraction: f32,
    pub settle: FrameDecaySpec,
}

impl PagingParams {
    pub fn new(config: &BrowserConfig, viewport: Size, item_count: usize) -> Self {
        Self {
            geometry: WindowGeometry::new(config.gesture_axis, viewport, config.gap),
            style: config.browser_style,
            item_count,
            bounce_factor: config.bounce_factor,
            min_fling_velocity: config.min_fling_velocity,
            min_settle_fraction: config.min_settle_fraction,
            settle: config.settle_spec(),
        }
    }

    /// Whether the first and last items clamp. A single item always does.
    fn clamps_boundaries(&self) -> bool {
        self.style == BrowserStyle::Linear || self.item_count == 1
    }

    /// Whether moving the current item by `delta` pushes it past a boundary.
    fn overshoots<I>(&self, window: &ItemWindow<I>, delta: f32) -> bool {
        if !self.clamps_boundaries() {
            return false;
        }
        let current = window.current();
        let Some(index) = current.resolved_index(self.item_count) else {
            return false;
        };
        let target = current.position() + delta;
        (index == 0 && target > 0.0) || (index + 1 == self.item_count && target < 0.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct GestureSession {
    /// Pixel translation along the paging axis at the previous sample.
    previous_translation: f32,
    /// Normalized distance accumulated by this drag, after damping.
    accumulated: f32,
    release_velocity: f32,
    remaining: DecayingDistance,
}

#[derive(Debug, Default)]
pub struct PagingEngine {
    phase: PagingPhase,
    session: Option<GestureSession>,
    ticker: TickerSlot,
}

impl PagingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PagingPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == PagingPhase::Idle
    }

    /// Normalized distance the current drag has applied so far.
    pub fn accumulated(&self) -> f32 {
        self.session.map_or(0.0, |session| session.accumulated)
    }

    /// Distance the settle still has to travel.
    pub fn remaining(&self) -> f32 {
        self.session.map_or(0.0, |session| session.remaining.remaining())
    }

    pub fn release_velocity(&self) -> f32 {
        self.session.map_or(0.0, |session| session.release_velocity)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.next_due()
    }

    /// Starts a drag, superseding any settle in flight.
    pub fn begin(&mut self) {
        if self.ticker.cancel() {
            log::debug!("settle interrupted by a new drag");
        }
        self.session = Some(GestureSession::default());
        self.phase = PagingPhase::Dragging;
    }

    /// Moves the window to follow a drag whose cumulative translation along
    /// the paging axis is `translation` pixels.
    pub fn drag<I>(
        &mut self,
        translation: f32,
        window: &mut ItemWindow<I>,
        params: &PagingParams,
    ) -> RecycleEvents {
        if params.item_count == 0 || !translation.is_finite() {
            return RecycleEvents::new();
        }
        if self.phase != PagingPhase::Dragging {
            self.begin();
        }
        let Some(session) = self.session.as_mut() else {
            return RecycleEvents::new();
        };

        let pixel_delta = translation - session.previous_translation;
        session.previous_translation = translation;

        let mut delta = pixel_delta / params.geometry.step();
        if params.overshoots(window, delta) {
            delta *= params.bounce_factor;
        }
        session.accumulated += delta;
        apply_normalized(window, delta, &params.geometry)
    }

    /// Ends the drag and starts settling toward the item chosen from the
    /// release `velocity` (px/s along the paging axis).
    pub fn release<I>(
        &mut self,
        now: Instant,
        velocity: f32,
        window: &ItemWindow<I>,
        params: &PagingParams,
    ) {
        if params.item_count == 0 {
            self.cancel();
            return;
        }
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let to_move = settle_distance(velocity, window, params);
        log::debug!("released at v={velocity:.1}px/s, settling by {to_move:.3}");

        let session = self.session.get_or_insert_with(GestureSession::default);
        session.release_velocity = velocity;
        session.remaining = DecayingDistance::new(to_move);
        self.phase = PagingPhase::Settling;
        self.ticker.replace(now, params.settle.frame_rate);
    }

    /// Runs the frames due at `now`.
    pub fn tick<I>(
        &mut self,
        now: Instant,
        window: &mut ItemWindow<I>,
        params: &PagingParams,
    ) -> RecycleEvents {
        let frames = self.ticker.poll(now);
        let mut events = RecycleEvents::new();
        for _ in 0..frames {
            events.extend(self.step(window, params));
            if self.phase != PagingPhase::Settling {
                break;
            }
        }
        events
    }

    /// One settle frame. A frame with nothing left to do stops the engine.
    pub fn step<I>(&mut self, window: &mut ItemWindow<I>, params: &PagingParams) -> RecycleEvents {
        if self.phase != PagingPhase::Settling {
            return RecycleEvents::new();
        }
        let Some(session) = self.session.as_mut() else {
            self.finish(window);
            return RecycleEvents::new();
        };

        let frame = session
            .remaining
            .advance(&params.settle, params.geometry.step());
        log::trace!("settle frame {frame:?}");
        let events = apply_normalized(window, frame.delta(), &params.geometry);
        if frame.is_finished() {
            self.finish(window);
        }
        events
    }

    /// Drops the session and stops ticking without moving anything.
    pub fn cancel(&mut self) {
        self.ticker.cancel();
        self.session = None;
        self.phase = PagingPhase::Idle;
    }

    fn finish<I>(&mut self, window: &mut ItemWindow<I>) {
        window.snap_to_rest();
        self.cancel();
        log::debug!("settled on index {}", window.current().index());
    }
}

/// Chooses the normalized distance a release settles by.
pub fn settle_distance<I>(velocity: f32, window: &ItemWindow<I>, params: &PagingParams) -> f32 {
    let position = window.current().position();

    // Past the snap-back zone only the sign of the velocity matters, and zero
    // counts as backward.
    let slow = velocity.abs() < params.min_fling_velocity;
    let mut to_move = if slow && position.abs() < params.min_settle_fraction {
        -position
    } else if velocity < 0.0 {
        if position >= 0.0 {
            -position
        } else {
            -window.next().position()
        }
    } else if position <= 0.0 {
        -position
    } else {
        -window.previous().position()
    };

    if params.overshoots(window, to_move) {
        to_move = -position;
    }
    to_move
}

/// Applies a normalized delta and drains every crossing it causes.
pub fn apply_normalized<I>(
    window: &mut ItemWindow<I>,
    delta: f32,
    geometry: &WindowGeometry,
) -> RecycleEvents {
    let mut events = RecycleEvents::new();
    let mut next = window.recycle(delta, geometry);
    while let Some(event) = next {
        events.push(event);
        next = window.recycle(0.0, geometry);
    }
    events
}

#[cfg(test)]
#[path = "tests/paging_tests.rs"]
mod tests;
