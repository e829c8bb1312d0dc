//! Control overlay visibility, auto-hide and the page indicator.

use lightbox_animation::{AnimationSpec, FrameTween};
use lightbox_core::{Deadline, TickerSlot};
use web_time::{Duration, Instant};

/// Fades the close button and page indicator in and out.
///
/// Visibility flips at once; `alpha` follows over the fade duration.
#[derive(Debug)]
pub struct ControlsOverlay {
    hidden: bool,
    alpha: f32,
    fade: Option<FrameTween<f32>>,
    ticker: TickerSlot,
    auto_hide: Deadline,
    frame_rate: f32,
    fade_spec: AnimationSpec,
}

impl ControlsOverlay {
    pub fn new(fade_spec: AnimationSpec, frame_rate: f32) -> Self {
        Self {
            hidden: false,
            alpha: 1.0,
            fade: None,
            ticker: TickerSlot::new(),
            auto_hide: Deadline::new(),
            frame_rate,
            fade_spec,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_auto_hide_pending(&self) -> bool {
        self.auto_hide.is_pending()
    }

    pub(crate) fn reconfigure(&mut self, fade_spec: AnimationSpec, frame_rate: f32) {
        self.fade_spec = fade_spec;
        self.frame_rate = frame_rate;
    }

    /// Shows or hides the controls. Returns `true` when visibility changed.
    pub fn set_hidden(&mut self, now: Instant, hidden: bool) -> bool {
        if hidden == self.hidden {
            return false;
        }
        self.hidden = hidden;
        let target = if hidden { 0.0 } else { 1.0 };
        self.fade = Some(FrameTween::new(
            self.alpha,
            target,
            self.fade_spec,
            self.frame_rate,
        ));
        self.ticker.replace(now, self.frame_rate);
        log::debug!("controls {}", if hidden { "hidden" } else { "shown" });
        true
    }

    /// Tap behaviour: drops any pending auto-hide and flips visibility.
    pub fn toggle(&mut self, now: Instant) -> bool {
        self.auto_hide.cancel();
        self.set_hidden(now, !self.hidden)
    }

    pub fn schedule_auto_hide(&mut self, now: Instant, delay: Duration) {
        self.auto_hide.schedule(now, delay);
    }

    pub fn cancel_auto_hide(&mut self) -> bool {
        self.auto_hide.cancel()
    }

    /// Advances the fade and fires the auto-hide. Returns `true` when the
    /// auto-hide changed visibility.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.auto_hide.fire_if_due(now) && self.set_hidden(now, true);

        let frames = self.ticker.poll(now);
        if let Some(fade) = self.fade.as_mut() {
            for _ in 0..frames {
                self.alpha = fade.advance();
            }
            if fade.is_finished() {
                self.alpha = *fade.target();
                self.fade = None;
                self.ticker.cancel();
            }
        }
        changed
    }

    /// Finishes any fade at once.
    pub fn settle(&mut self) {
        if let Some(fade) = self.fade.take() {
            self.alpha = *fade.target();
        }
        self.ticker.cancel();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.ticker.next_due(), self.auto_hide.due_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Current page of the page indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageIndicator {
    pub current: usize,
    pub count: usize,
    pub hidden: bool,
}

impl PageIndicator {
    /// Single-page sources never show an indicator.
    pub fn new(current: usize, count: usize, controls_hidden: bool) -> Self {
        Self {
            current,
            count,
            hidden: controls_hidden || count <= 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightbox_animation::Easing;

    fn overlay() -> ControlsOverlay {
        ControlsOverlay::new(AnimationSpec::tween(100, Easing::Linear), 60.0)
    }

    #[test]
    fn toggle_flips_visibility_and_fades_alpha() {
        let start = Instant::now();
        let mut controls = overlay();
        assert!(controls.toggle(start));
        assert!(controls.is_hidden());
        assert_eq!(controls.alpha(), 1.0);

        controls.tick(start + Duration::from_millis(40));
        assert!(controls.alpha() < 1.0 && controls.alpha() > 0.0);

        for step in 1..=10 {
            controls.tick(start + Duration::from_millis(40 + step * 17));
        }
        assert_eq!(controls.alpha(), 0.0);
        assert_eq!(controls.next_deadline(), None);
    }

    #[test]
    fn auto_hide_fires_at_its_deadline() {
        let start = Instant::now();
        let mut controls = overlay();
        controls.schedule_auto_hide(start, Duration::from_secs(3));
        assert_eq!(controls.next_deadline(), Some(start + Duration::from_secs(3)));

        assert!(!controls.tick(start + Duration::from_millis(2_999)));
        assert!(!controls.is_hidden());
        assert!(controls.tick(start + Duration::from_secs(3)));
        assert!(controls.is_hidden());
    }

    #[test]
    fn tap_cancels_pending_auto_hide() {
        let start = Instant::now();
        let mut controls = overlay();
        controls.schedule_auto_hide(start, Duration::from_secs(3));
        controls.toggle(start + Duration::from_secs(1));
        assert!(!controls.is_auto_hide_pending());
        assert!(controls.is_hidden());

        controls.toggle(start + Duration::from_secs(2));
        assert!(!controls.tick(start + Duration::from_secs(4)));
        assert!(!controls.is_hidden());
    }

    #[test]
    fn settle_jumps_to_the_target_alpha() {
        let mut controls = overlay();
        controls.set_hidden(Instant::now(), true);
        controls.settle();
        assert_eq!(controls.alpha(), 0.0);
        assert!(!controls.set_hidden(Instant::now(), true));
    }

    #[test]
    fn indicator_hides_for_single_page() {
        assert!(PageIndicator::new(0, 1, false).hidden);
        assert!(PageIndicator::new(2, 5, true).hidden);
        assert!(!PageIndicator::new(2, 5, false).hidden);
    }
}
