//! Interactive drag-to-dismiss.
//!
//! The engine goes Idle -> Interacting -> {Completing | SpringingBack} -> Idle.
//! While it runs, the browser hides its paging content and controls and
//! renders the [`DismissOverlay`] instead: a snapshot of the focused image
//! that follows the finger while the background fades.
//!
//! A release past the threshold either flies the snapshot into the source's
//! target rect or, without one, slides it off screen. Anything short of the
//! threshold springs back.

use crate::config::DismissConfig;
use lightbox_animation::{AnimationSpec, FrameDecaySpec, FrameTween};
use lightbox_core::TickerSlot;
use lightbox_foundation::Axis;
use lightbox_ui_graphics::{frame_for_content, ContentMode, Point, Rect, Size, VisualTransform};
use web_time::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DismissPhase {
    #[default]
    Idle,
    Interacting,
    Completing,
    SpringingBack,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissOutcome {
    /// The item left the screen; the host should tear the browser down.
    Dismissed,
    /// The item came back; paging content and controls are restored.
    Restored,
}

/// Everything the engine reads from the browser for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct DismissParams {
    pub paging_axis: Axis,
    pub viewport: Size,
    pub min_translation_fraction: f32,
    pub min_zoom_factor: f32,
    pub decay: FrameDecaySpec,
    pub fly: AnimationSpec,
}

impl DismissParams {
    pub fn new(config: &DismissConfig, paging_axis: Axis, viewport: Size) -> Self {
        Self {
            paging_axis,
            viewport,
            min_translation_fraction: config.min_translation_fraction,
            min_zoom_factor: config.min_zoom_factor,
            decay: config.decay_spec(),
            fly: config.fly_spec(),
        }
    }

    fn dismiss_axis(&self) -> Axis {
        self.paging_axis.orthogonal()
    }
}

/// What the renderer draws while a dismiss is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissOverlay<'a, I> {
    pub image: Option<&'a I>,
    /// Untransformed frame of the snapshot.
    pub frame: Rect,
    pub transform: VisualTransform,
    pub background_alpha: f32,
}

impl<I> DismissOverlay<'_, I> {
    /// Where the snapshot actually appears.
    pub fn visible_frame(&self) -> Rect {
        self.transform.apply_to_rect(self.frame)
    }
}

#[derive(Debug)]
enum Motion {
    /// Decays both components toward `target`.
    Decay { target: Point, remaining: Point },
    /// Tweens the visible frame into the target rect.
    Fly {
        frame: FrameTween<Rect>,
        start_alpha: f32,
    },
}

#[derive(Debug)]
struct DismissSession<I> {
    snapshot: Option<I>,
    snapshot_frame: Rect,
    /// Translation relative to the viewport size, per axis.
    relative: Point,
    zoom_toward_target: bool,
    target: Option<Rect>,
    transform: VisualTransform,
    background_alpha: f32,
    motion: Option<Motion>,
}

#[derive(Debug)]
pub struct DismissEngine<I> {
    phase: DismissPhase,
    session: Option<DismissSession<I>>,
    ticker: TickerSlot,
    interaction_in_progress: bool,
}

impl<I> Default for DismissEngine<I> {
    fn default() -> Self {
        Self {
            phase: DismissPhase::Idle,
            session: None,
            ticker: TickerSlot::new(),
            interaction_in_progress: false,
        }
    }
}

impl<I: Clone> DismissEngine<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DismissPhase {
        self.phase
    }

    /// True from the first routed sample until the session finishes.
    pub fn interaction_in_progress(&self) -> bool {
        self.interaction_in_progress
    }

    /// Completing or springing back; new gestures are not accepted.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            DismissPhase::Completing | DismissPhase::SpringingBack
        )
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.next_due()
    }

    /// Relative translation of the snapshot, `None` when idle.
    pub fn relative_position(&self) -> Option<Point> {
        self.session.as_ref().map(|session| session.relative)
    }

    /// The rect a completing dismiss flies into, once chosen.
    pub fn target_rect(&self) -> Option<Rect> {
        self.session.as_ref().and_then(|session| session.target)
    }

    pub fn overlay(&self) -> Option<DismissOverlay<'_, I>> {
        let session = self.session.as_ref()?;
        let (frame, transform) = match &session.motion {
            Some(Motion::Fly { frame, .. }) => (frame.value(), VisualTransform::IDENTITY),
            _ => (session.snapshot_frame, session.transform),
        };
        Some(DismissOverlay {
            image: session.snapshot.as_ref(),
            frame,
            transform,
            background_alpha: session.background_alpha,
        })
    }

    /// Opens a session around `snapshot`. `zoom_toward_target` shrinks the
    /// snapshot while dragging and lets it follow both axes.
    pub fn begin(
        &mut self,
        snapshot: Option<I>,
        snapshot_size: Option<Size>,
        zoom_toward_target: bool,
        params: &DismissParams,
    ) {
        self.ticker.cancel();
        let viewport = Rect::from_size(params.viewport);
        let snapshot_frame = snapshot_size.map_or(viewport, |size| {
            frame_for_content(size, viewport, ContentMode::AspectFit)
        });
        log::debug!("dismiss began, zoom toward target: {zoom_toward_target}");
        self.session = Some(DismissSession {
            snapshot,
            snapshot_frame,
            relative: Point::ZERO,
            zoom_toward_target,
            target: None,
            transform: VisualTransform::IDENTITY,
            background_alpha: 1.0,
            motion: None,
        });
        self.phase = DismissPhase::Interacting;
        self.interaction_in_progress = true;
    }

    /// Follows the finger. `translation` is cumulative in pixels.
    pub fn update(&mut self, translation: Point, params: &DismissParams) {
        if self.phase != DismissPhase::Interacting {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.relative = relative_to(translation, params.viewport);
        session.refresh(params);
    }

    /// Resolves the drag. `target` is asked for the fly-to rect only when
    /// the release is past the threshold.
    pub fn release(
        &mut self,
        now: Instant,
        params: &DismissParams,
        target: impl FnOnce() -> Option<Rect>,
    ) {
        if self.phase != DismissPhase::Interacting {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let axis = params.dismiss_axis();
        let directional = axis.of_point(session.relative);
        if directional.abs() > params.min_translation_fraction {
            if let Some(rect) = target() {
                let start = session.transform.apply_to_rect(session.snapshot_frame);
                let end = match session.snapshot_frame.size() {
                    size if size.is_empty() => rect,
                    size => frame_for_content(size, rect, ContentMode::AspectFill),
                };
                log::debug!("dismiss flying into {rect:?}");
                session.target = Some(rect);
                session.motion = Some(Motion::Fly {
                    frame: FrameTween::new(start, end, params.fly, params.decay.frame_rate),
                    start_alpha: session.background_alpha,
                });
            } else {
                let target = axis.pack(directional.signum(), 0.0);
                log::debug!("dismiss sliding off screen toward {target:?}");
                session.motion = Some(Motion::Decay {
                    target,
                    remaining: target - session.relative,
                });
            }
            self.phase = DismissPhase::Completing;
        } else {
            log::debug!("dismiss released at {directional:.3}, springing back");
            session.motion = Some(Motion::Decay {
                target: Point::ZERO,
                remaining: Point::ZERO - session.relative,
            });
            self.phase = DismissPhase::SpringingBack;
        }
        self.ticker.replace(now, params.decay.frame_rate);
    }

    /// Runs the frames due at `now`.
    pub fn tick(&mut self, now: Instant, params: &DismissParams) -> Option<DismissOutcome> {
        let frames = self.ticker.poll(now);
        for _ in 0..frames {
            if let Some(outcome) = self.step(params) {
                return Some(outcome);
            }
        }
        None
    }

    /// One animation frame.
    pub fn step(&mut self, params: &DismissParams) -> Option<DismissOutcome> {
        if !self.is_busy() {
            return None;
        }
        let Some(session) = self.session.as_mut() else {
            return Some(self.finish(params.dismiss_axis()));
        };

        let done = match session.motion.as_mut() {
            Some(Motion::Decay { target, remaining }) => {
                let step = Point::new(
                    params.decay.step(remaining.x),
                    params.decay.step(remaining.y),
                );
                *remaining = *remaining - step;
                let axis = params.dismiss_axis();
                let step_px = axis.of_point(step) * axis.of_size(params.viewport);
                let done = step_px.abs() < params.decay.snap_threshold_px;
                session.relative = if done {
                    *target
                } else {
                    *target - *remaining
                };
                log::trace!("dismiss frame at {:?}", session.relative);
                session.refresh(params);
                done
            }
            Some(Motion::Fly { frame, start_alpha }) => {
                frame.advance();
                session.background_alpha = *start_alpha * (1.0 - frame.eased_fraction());
                if frame.is_finished() {
                    let axis = params.dismiss_axis();
                    session.relative = axis.pack(-1.0, axis.orthogonal().of_point(session.relative));
                    session.background_alpha = 0.0;
                    true
                } else {
                    false
                }
            }
            None => true,
        };

        done.then(|| self.finish(params.dismiss_axis()))
    }

    /// Abandons the session without an outcome.
    pub fn cancel(&mut self) {
        self.ticker.cancel();
        self.session = None;
        self.phase = DismissPhase::Idle;
        self.interaction_in_progress = false;
    }

    fn finish(&mut self, dismiss_axis: Axis) -> DismissOutcome {
        let directional = self
            .session
            .as_ref()
            .map_or(0.0, |session| dismiss_axis.of_point(session.relative));
        let outcome = if directional != 0.0 {
            DismissOutcome::Dismissed
        } else {
            DismissOutcome::Restored
        };
        self.cancel();
        log::debug!("dismiss finished: {outcome:?}");
        outcome
    }
}

impl<I> DismissSession<I> {
    fn refresh(&mut self, params: &DismissParams) {
        let dismiss_axis = params.dismiss_axis();
        let directional = dismiss_axis.of_point(self.relative);

        let scale = if self.zoom_toward_target {
            params.min_zoom_factor.max(1.0 - directional.abs())
        } else {
            1.0
        };
        let along = directional * dismiss_axis.of_size(params.viewport);
        let across = if self.zoom_toward_target {
            params.paging_axis.of_point(self.relative) * params.paging_axis.of_size(params.viewport)
        } else {
            0.0
        };
        let offset = dismiss_axis.pack(along, across);

        self.transform = VisualTransform::scaled(scale).then_translate(offset.x, offset.y);
        self.background_alpha = (1.0 - directional.abs()).clamp(0.0, 1.0);
    }
}

fn relative_to(translation: Point, viewport: Size) -> Point {
    let fraction = |value: f32, extent: f32| if extent > 0.0 { value / extent } else { 0.0 };
    Point::new(
        fraction(translation.x, viewport.width),
        fraction(translation.y, viewport.height),
    )
}

#[cfg(test)]
#[path = "tests/dismiss_tests.rs"]
mod tests;
