//! Robot-style driver for a browser under test
//!
//! [`BrowserRobot`] owns a [`MediaBrowser`] over a [`FakeMediaSource`] and a
//! virtual clock. Interactions are expressed the way a finger performs them
//! (drag in steps, release with a velocity, tap) and time only moves when the
//! test says so.
//!
//! # Example
//!
//! ```
//! use lightbox_testing::BrowserRobot;
//! use lightbox_ui_graphics::Point;
//!
//! let mut robot = BrowserRobot::with_items(5).unwrap();
//! robot.load_pending();
//! robot.swipe(Point::new(-300.0, 0.0), Point::new(-100.0, 0.0));
//! robot.settle();
//! assert_eq!(robot.browser().focused_index(), 1);
//! ```

use crate::fake_source::{FakeImage, FakeMediaSource};
use lightbox_browser::{
    BrowserConfig, BrowserError, BrowserEvent, FetchError, FetchOutcome, FetchRequest,
    LoadedMedia, MediaBrowser,
};
use lightbox_foundation::{PanSample, TapEvent};
use lightbox_ui_graphics::{Point, Size};
use web_time::{Duration, Instant};

pub const DEFAULT_VIEWPORT: Size = Size::new(400.0, 800.0);

/// Upper bound on ticks a single wait may run.
const MAX_TICKS: usize = 10_000;

pub struct BrowserRobot {
    browser: MediaBrowser<FakeMediaSource>,
    source: FakeMediaSource,
    now: Instant,
    translation: Point,
    events: Vec<BrowserEvent>,
}

impl BrowserRobot {
    pub fn new(
        source: FakeMediaSource,
        config: BrowserConfig,
        viewport: Size,
        start_index: usize,
    ) -> Result<Self, BrowserError> {
        let browser = MediaBrowser::new(source.clone(), config, viewport, start_index)?;
        Ok(Self {
            browser,
            source,
            now: Instant::now(),
            translation: Point::ZERO,
            events: Vec::new(),
        })
    }

    /// Default config and viewport, starting on the first item.
    pub fn with_items(item_count: usize) -> Result<Self, BrowserError> {
        Self::new(
            FakeMediaSource::new(item_count),
            BrowserConfig::default(),
            DEFAULT_VIEWPORT,
            0,
        )
    }

    pub fn browser(&self) -> &MediaBrowser<FakeMediaSource> {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut MediaBrowser<FakeMediaSource> {
        &mut self.browser
    }

    pub fn source(&self) -> &FakeMediaSource {
        &self.source
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Puts a finger down and moves it to `translation` in `steps` even moves.
    pub fn drag(&mut self, translation: Point, steps: usize) {
        let steps = steps.max(1);
        self.browser.handle_pan(self.now, PanSample::began());
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.translation = translation.scale(fraction);
            self.browser
                .handle_pan(self.now, PanSample::changed(self.translation));
        }
        self.collect_events();
    }

    /// Moves a finger that is already down to `translation`.
    pub fn move_to(&mut self, translation: Point) {
        self.translation = translation;
        self.browser
            .handle_pan(self.now, PanSample::changed(translation));
        self.collect_events();
    }

    /// Lifts the finger with `velocity` in pixels per second.
    pub fn release(&mut self, velocity: Point) {
        self.browser
            .handle_pan(self.now, PanSample::ended(self.translation, velocity));
        self.translation = Point::ZERO;
        self.collect_events();
    }

    pub fn cancel_gesture(&mut self) {
        self.browser
            .handle_pan(self.now, PanSample::cancelled(self.translation));
        self.translation = Point::ZERO;
        self.collect_events();
    }

    /// A short drag and release.
    pub fn swipe(&mut self, translation: Point, velocity: Point) {
        self.drag(translation, 4);
        self.release(velocity);
    }

    pub fn tap(&mut self) {
        self.browser
            .handle_tap(self.now, TapEvent::single(Point::ZERO));
        self.collect_events();
    }

    pub fn double_tap(&mut self) {
        self.browser
            .handle_tap(self.now, TapEvent::double(Point::ZERO));
        self.collect_events();
    }

    /// Moves the clock forward, running every deadline that comes due on the way.
    pub fn advance(&mut self, by: Duration) {
        let until = self.now + by;
        for _ in 0..MAX_TICKS {
            match self.browser.next_deadline() {
                Some(due) if due <= until => {
                    self.now = self.now.max(due);
                    self.browser.tick(self.now);
                }
                _ => break,
            }
        }
        self.now = until;
        self.collect_events();
    }

    /// Runs until nothing is scheduled. Returns the virtual time it took.
    pub fn settle(&mut self) -> Duration {
        let start = self.now;
        for _ in 0..MAX_TICKS {
            let Some(due) = self.browser.next_deadline() else {
                break;
            };
            self.now = self.now.max(due);
            self.browser.tick(self.now);
        }
        assert!(
            self.browser.next_deadline().is_none(),
            "browser still busy after {MAX_TICKS} ticks"
        );
        self.collect_events();
        self.now.duration_since(start)
    }

    /// Completes every pending request with an image for its index.
    pub fn load_pending(&mut self) -> usize {
        let pending = self.source.take_pending();
        let count = pending.len();
        for request in pending {
            self.complete(request, Ok(LoadedMedia::new(FakeImage::new(request.index))));
        }
        count
    }

    pub fn complete(
        &mut self,
        request: FetchRequest,
        result: Result<LoadedMedia<FakeImage>, FetchError>,
    ) -> FetchOutcome {
        let outcome = self
            .browser
            .complete_fetch(request.ticket, request.index, result);
        self.collect_events();
        outcome
    }

    /// Events since the last call, in order.
    pub fn take_events(&mut self) -> Vec<BrowserEvent> {
        self.collect_events();
        std::mem::take(&mut self.events)
    }

    /// Indices of the window slots, previous to next.
    pub fn window_indices(&self) -> [Option<usize>; 3] {
        let count = self.browser.item_count();
        let window = self.browser.window();
        [window.previous(), window.current(), window.next()].map(|item| item.resolved_index(count))
    }

    pub fn window_positions(&self) -> [f32; 3] {
        let window = self.browser.window();
        [window.previous(), window.current(), window.next()].map(|item| item.position())
    }

    fn collect_events(&mut self) {
        let events = &mut self.events;
        self.browser.drain_events(|event| events.push(event));
    }
}
