//! The media browser component.
//!
//! [`MediaBrowser`] owns the item window and both gesture engines and is the
//! only thing a host talks to. The host feeds it resolved gesture samples,
//! taps and fetch completions, calls [`MediaBrowser::tick`] whenever
//! [`MediaBrowser::next_deadline`] comes due, and reads the result back
//! through [`MediaBrowser::render_items`] and friends. Everything observable
//! that happens in between is queued as a [`BrowserEvent`].

use crate::config::BrowserConfig;
use crate::controls::{ControlsOverlay, PageIndicator};
use crate::dismiss::{DismissEngine, DismissOutcome, DismissOverlay, DismissParams, DismissPhase};
use crate::error::{BrowserError, FetchError};
use crate::item::{ItemView, SlotId};
use crate::paging::{PagingEngine, PagingParams, PagingPhase, RecycleEvents};
use crate::source::{FetchOutcome, FetchRequest, FetchTicket, LoadedMedia, MediaImage, MediaSource};
use crate::transform::{ItemGeometry, StockTransition, TransformPolicy};
use crate::window::{ItemWindow, WINDOW_LEN};
use lightbox_core::{clamp_index, resolve_index};
use lightbox_foundation::{
    ArbiterContext, GestureArbiter, GesturePhase, GestureRoute, PanSample, Routed, TapEvent,
    TapKind,
};
use lightbox_ui_graphics::{Size, VisualTransform};
use smallvec::SmallVec;
use std::rc::Rc;
use web_time::{Duration, Instant};

/// Something the host should react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserEvent {
    /// A recycle or jump focused the item at this resolved index.
    FocusChanged(usize),
    /// The user dismissed the browser, or [`MediaBrowser::close`] was called.
    DismissRequested,
    ControlsVisibilityChanged { hidden: bool },
    /// [`MediaBrowser::background_image`] was replaced.
    BackgroundChanged,
}

/// One window slot as the renderer should draw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderItem<'a, I> {
    pub slot: SlotId,
    /// Resolved index, `None` for an empty source.
    pub index: Option<usize>,
    pub position: f32,
    pub transform: VisualTransform,
    pub image: Option<&'a I>,
    pub is_loading: bool,
    pub zoom_scale: f32,
    pub revision: u64,
}

pub struct MediaBrowser<S: MediaSource> {
    source: S,
    config: BrowserConfig,
    custom_policy: Option<Rc<dyn TransformPolicy>>,
    viewport: Size,
    item_count: usize,
    focus: usize,
    window: ItemWindow<S::Image>,
    paging: PagingEngine,
    dismiss: DismissEngine<S::Image>,
    arbiter: GestureArbiter,
    controls: ControlsOverlay,
    background: Option<S::Image>,
    content_hidden: bool,
    dismissed: bool,
    events: SmallVec<[BrowserEvent; 4]>,
}

impl<S: MediaSource> MediaBrowser<S> {
    /// Builds a browser focused on `start_index` and requests the content of
    /// all three window slots.
    pub fn new(
        source: S,
        config: BrowserConfig,
        viewport: Size,
        start_index: usize,
    ) -> Result<Self, BrowserError> {
        config.validate()?;
        check_viewport(viewport)?;

        let item_count = source.item_count();
        if item_count == 0 {
            log::warn!("media source is empty; paging disabled");
        }
        let focus = clamp_index(start_index as i64, item_count);
        let controls = ControlsOverlay::new(config.controls_fade_spec(), config.frame_rate);

        let mut browser = Self {
            window: ItemWindow::new(focus as i64, config.draw_order),
            source,
            config,
            custom_policy: None,
            viewport,
            item_count,
            focus,
            paging: PagingEngine::new(),
            dismiss: DismissEngine::new(),
            arbiter: GestureArbiter::new(),
            controls,
            background: None,
            content_hidden: false,
            dismissed: false,
            events: SmallVec::new(),
        };
        browser.request_all();
        Ok(browser)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Resolved index of the focused item.
    pub fn focused_index(&self) -> usize {
        self.focus
    }

    pub fn window(&self) -> &ItemWindow<S::Image> {
        &self.window
    }

    pub fn paging_phase(&self) -> PagingPhase {
        self.paging.phase()
    }

    pub fn dismiss_phase(&self) -> DismissPhase {
        self.dismiss.phase()
    }

    pub fn active_route(&self) -> Option<GestureRoute> {
        self.arbiter.active_route()
    }

    /// Paging content is hidden while a dismiss is in progress.
    pub fn is_content_hidden(&self) -> bool {
        self.content_hidden
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Replaces the configuration between gestures.
    pub fn set_config(&mut self, config: BrowserConfig) -> Result<(), BrowserError> {
        config.validate()?;
        self.window.set_draw_order(config.draw_order);
        self.controls
            .reconfigure(config.controls_fade_spec(), config.frame_rate);
        self.config = config;
        Ok(())
    }

    /// Overrides the stock transition. `None` goes back to the configured preset.
    pub fn set_transform_policy(&mut self, policy: Option<Rc<dyn TransformPolicy>>) {
        self.custom_policy = policy;
    }

    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), BrowserError> {
        check_viewport(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    /// Arms the controls auto-hide, if configured. Call once the browser is on screen.
    pub fn appear(&mut self, now: Instant) {
        if let Some(delay) = self.config.auto_hide_controls_delay {
            self.controls
                .schedule_auto_hide(now, Duration::from_secs_f32(delay));
        }
    }

    /// Drops the pending auto-hide. Call when the browser leaves the screen.
    pub fn disappear(&mut self) {
        self.controls.cancel_auto_hide();
    }

    pub fn handle_pan(&mut self, now: Instant, sample: PanSample) {
        if self.dismissed {
            return;
        }
        let cx = ArbiterContext {
            paging_axis: self.config.gesture_axis,
            dismiss_enabled: self.config.dismiss.enabled,
            dismiss_busy: self.dismiss.is_busy(),
            content_zoomed: self.window.current().is_zoomed(),
        };
        match self.arbiter.route(sample, &cx) {
            Routed::Hold => {}
            Routed::Start(route, sample) => {
                self.start_route(now, route);
                self.forward(now, route, sample);
            }
            Routed::Continue(route, sample) => self.forward(now, route, sample),
        }
    }

    fn start_route(&mut self, now: Instant, route: GestureRoute) {
        match route {
            GestureRoute::Paging => self.paging.begin(),
            GestureRoute::Dismiss => self.begin_dismiss(now),
            GestureRoute::Content | GestureRoute::Ignored => {
                log::trace!("gesture left to {route:?}");
            }
        }
    }

    fn forward(&mut self, now: Instant, route: GestureRoute, sample: PanSample) {
        let axis = self.config.gesture_axis;
        match route {
            GestureRoute::Paging => {
                let params = self.paging_params();
                if sample.phase == GesturePhase::Changed {
                    let recycles =
                        self.paging
                            .drag(axis.of_point(sample.translation), &mut self.window, &params);
                    self.handle_recycles(recycles);
                } else if sample.phase.is_terminal() {
                    let velocity = axis.of_point(sample.clamped_velocity());
                    self.paging.release(now, velocity, &self.window, &params);
                }
            }
            GestureRoute::Dismiss => {
                let params = self.dismiss_params();
                if sample.phase == GesturePhase::Changed {
                    self.dismiss.update(sample.translation, &params);
                } else if sample.phase.is_terminal() {
                    let source = &self.source;
                    self.dismiss
                        .release(now, &params, || source.dismissal_target());
                }
            }
            GestureRoute::Content | GestureRoute::Ignored => {}
        }
    }

    fn begin_dismiss(&mut self, now: Instant) {
        let params = self.dismiss_params();
        let snapshot = self.window.current().image().cloned();
        let snapshot_size = snapshot.as_ref().map(MediaImage::pixel_size);
        let zoom_toward_target = self.source.dismissal_target().is_some();
        self.dismiss
            .begin(snapshot, snapshot_size, zoom_toward_target, &params);

        self.content_hidden = true;
        self.controls.cancel_auto_hide();
        self.set_controls_hidden(now, true);
    }

    fn finish_dismiss(&mut self, now: Instant, outcome: DismissOutcome) {
        match outcome {
            DismissOutcome::Dismissed => self.request_dismissal(),
            DismissOutcome::Restored => {
                self.content_hidden = false;
                self.set_controls_hidden(now, false);
            }
        }
    }

    fn request_dismissal(&mut self) {
        if !self.dismissed {
            self.dismissed = true;
            self.events.push(BrowserEvent::DismissRequested);
        }
    }

    /// Ends the browser on behalf of the host's close button.
    pub fn close(&mut self) {
        self.paging.cancel();
        self.dismiss.cancel();
        self.arbiter.reset();
        self.controls.cancel_auto_hide();
        self.request_dismissal();
    }

    /// Single taps toggle the controls; double taps toggle zoom. Both are
    /// ignored while a dismiss is in progress.
    pub fn handle_tap(&mut self, now: Instant, tap: TapEvent) {
        if self.dismissed || self.dismiss.interaction_in_progress() {
            log::trace!("tap suppressed during dismiss");
            return;
        }
        match tap.kind {
            TapKind::Single => {
                if self.controls.toggle(now) {
                    self.events.push(BrowserEvent::ControlsVisibilityChanged {
                        hidden: self.controls.is_hidden(),
                    });
                }
            }
            TapKind::Double => {
                self.toggle_zoom();
            }
        }
    }

    /// Shows or hides the controls, fading them.
    pub fn set_controls_hidden(&mut self, now: Instant, hidden: bool) {
        if self.controls.set_hidden(now, hidden) {
            self.events
                .push(BrowserEvent::ControlsVisibilityChanged { hidden });
        }
    }

    /// Sets the focused item's zoom, clamped to its range. Returns the applied scale.
    pub fn set_zoom_scale(&mut self, scale: f32) -> f32 {
        self.window.current_mut().set_zoom_scale(scale)
    }

    /// Flips the focused item between unzoomed and its maximum zoom.
    pub fn toggle_zoom(&mut self) -> f32 {
        let current = self.window.current();
        let target = if current.is_zoomed() {
            1.0
        } else {
            current.zoom_range().max
        };
        self.set_zoom_scale(target)
    }

    /// Re-centres the window on `index` without animation.
    pub fn jump_to(&mut self, index: usize) {
        if self.item_count == 0 || self.dismissed {
            return;
        }
        if self.dismiss.interaction_in_progress() {
            log::debug!("jump to {index} ignored during dismiss");
            return;
        }
        let target = clamp_index(index as i64, self.item_count);
        self.paging.cancel();
        self.arbiter.reset();
        self.window.reset(target as i64);
        self.request_all();
        if target != self.focus {
            self.focus = target;
            self.events.push(BrowserEvent::FocusChanged(target));
        }
    }

    /// Re-reads the item count and reloads every slot around the focus.
    pub fn reload(&mut self) {
        let item_count = self.source.item_count();
        log::debug!("reloading with {item_count} items");
        self.item_count = item_count;
        self.paging.cancel();
        self.arbiter.reset();
        let focus = clamp_index(self.focus as i64, item_count);
        self.window.reset(focus as i64);
        self.request_all();
        if focus != self.focus {
            self.focus = focus;
            self.events.push(BrowserEvent::FocusChanged(focus));
        }
    }

    /// Applies a fetch result if the slot still wants it.
    ///
    /// A result is current only while the slot's request generation matches
    /// the ticket and the slot still shows `index`. Anything else is dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        index: usize,
        result: Result<LoadedMedia<S::Image>, FetchError>,
    ) -> FetchOutcome {
        let is_current = self.window.current().slot() == ticket.slot;
        let item_count = self.item_count;
        let Some(item) = self.window.slot_mut(ticket.slot) else {
            return FetchOutcome::Stale;
        };
        if !item.accepts(ticket, index, item_count) {
            log::debug!(
                "stale fetch for index {index} on {} (generation {} != {})",
                ticket.slot,
                ticket.generation,
                item.generation()
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(media) => {
                item.apply_loaded(media);
                if is_current {
                    self.background = item.image().cloned();
                    self.events.push(BrowserEvent::BackgroundChanged);
                }
                FetchOutcome::Applied
            }
            Err(error) => {
                log::warn!("fetch for index {index} failed: {error}");
                item.apply_failed();
                FetchOutcome::Failed
            }
        }
    }

    /// Runs every animation frame and deadline due at `now`.
    pub fn tick(&mut self, now: Instant) {
        let params = self.paging_params();
        let recycles = self.paging.tick(now, &mut self.window, &params);
        self.handle_recycles(recycles);

        let params = self.dismiss_params();
        if let Some(outcome) = self.dismiss.tick(now, &params) {
            self.finish_dismiss(now, outcome);
        }

        if self.controls.tick(now) {
            self.events.push(BrowserEvent::ControlsVisibilityChanged {
                hidden: self.controls.is_hidden(),
            });
        }
    }

    /// When [`MediaBrowser::tick`] next has work, if ever.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.paging.next_deadline(),
            self.dismiss.next_deadline(),
            self.controls.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Hands queued events to `f` in the order they happened.
    pub fn drain_events(&mut self, mut f: impl FnMut(BrowserEvent)) {
        for event in self.events.drain(..) {
            f(event);
        }
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// The window slots bottom to top, transformed for drawing.
    pub fn render_items(&self) -> SmallVec<[RenderItem<'_, S::Image>; WINDOW_LEN]> {
        let geometry = ItemGeometry::new(self.viewport, self.config.gap);
        let stock = StockTransition::new(self.config.transition, self.config.gesture_axis);
        let policy: &dyn TransformPolicy = match &self.custom_policy {
            Some(custom) => custom.as_ref(),
            None => &stock,
        };

        self.window
            .draw_stack()
            .iter()
            .filter_map(|id| self.window.slot(*id))
            .map(|item| self.render_item(item, policy, geometry))
            .collect()
    }

    fn render_item<'a>(
        &'a self,
        item: &'a ItemView<S::Image>,
        policy: &dyn TransformPolicy,
        geometry: ItemGeometry,
    ) -> RenderItem<'a, S::Image> {
        let transform = policy.transform(geometry, item.position());
        RenderItem {
            slot: item.slot(),
            index: item.resolved_index(self.item_count),
            position: item.position(),
            transform: transform.with_hidden(transform.hidden || self.content_hidden),
            image: item.image(),
            is_loading: item.is_loading(),
            zoom_scale: item.zoom_scale(),
            revision: item.revision(),
        }
    }

    pub fn dismiss_overlay(&self) -> Option<DismissOverlay<'_, S::Image>> {
        self.dismiss.overlay()
    }

    pub fn page_indicator(&self) -> PageIndicator {
        PageIndicator::new(self.focus, self.item_count, self.controls.is_hidden())
    }

    pub fn controls_hidden(&self) -> bool {
        self.controls.is_hidden()
    }

    pub fn controls_alpha(&self) -> f32 {
        self.controls.alpha()
    }

    /// Image behind the window, blurred by the renderer.
    pub fn background_image(&self) -> Option<&S::Image> {
        self.background.as_ref()
    }

    fn paging_params(&self) -> PagingParams {
        PagingParams::new(&self.config, self.viewport, self.item_count)
    }

    fn dismiss_params(&self) -> DismissParams {
        DismissParams::new(&self.config.dismiss, self.config.gesture_axis, self.viewport)
    }

    fn handle_recycles(&mut self, recycles: RecycleEvents) {
        for recycle in recycles {
            self.request_slot(recycle.recycled);

            if let Some(image) = self.window.current().image() {
                self.background = Some(image.clone());
                self.events.push(BrowserEvent::BackgroundChanged);
            }

            if let Some(focus) = resolve_index(recycle.focus_index, self.item_count) {
                self.focus = focus;
                self.events.push(BrowserEvent::FocusChanged(focus));
            }
        }
    }

    fn request_all(&mut self) {
        for id in self.window.draw_stack() {
            self.request_slot(id);
        }
    }

    fn request_slot(&mut self, id: SlotId) {
        let item_count = self.item_count;
        let Some(item) = self.window.slot_mut(id) else {
            return;
        };
        match item.resolved_index(item_count) {
            Some(index) => {
                let ticket = item.begin_request();
                log::trace!("{id} requests index {index}");
                self.source.request_item(FetchRequest { ticket, index });
            }
            None => item.clear(),
        }
    }
}

fn check_viewport(viewport: Size) -> Result<(), BrowserError> {
    let usable = |extent: f32| extent.is_finite() && extent > 0.0;
    if usable(viewport.width) && usable(viewport.height) {
        Ok(())
    } else {
        Err(BrowserError::EmptyViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
