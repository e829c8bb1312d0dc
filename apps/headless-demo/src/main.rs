mod gallery;

use anyhow::{bail, Context, Result};
use gallery::Gallery;
use lightbox_browser::prelude::*;
use lightbox_foundation::PanVelocityTracker;
use web_time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

struct Session {
    browser: MediaBrowser<Gallery>,
    gallery: Gallery,
    now: Instant,
}

impl Session {
    fn new(start_index: usize) -> Result<Self> {
        let start = Instant::now();
        let gallery = Gallery::new(Duration::from_millis(120));
        gallery.set_now(start);
        let config = BrowserConfig::default().with_auto_hide_controls_delay(Some(2.0));
        let mut browser = MediaBrowser::new(
            gallery.clone(),
            config,
            Size::new(390.0, 844.0),
            start_index,
        )
        .context("failed to open the browser")?;
        browser.appear(start);
        Ok(Self {
            browser,
            gallery,
            now: start,
        })
    }

    /// Runs frames until `duration` has passed, delivering decodes as they finish.
    fn wait(&mut self, duration: Duration) {
        let until = self.now + duration;
        while self.now < until {
            self.now += FRAME;
            self.gallery.set_now(self.now);
            for request in self.gallery.ready(self.now) {
                let result = self.gallery.decode(request.index);
                let outcome = self
                    .browser
                    .complete_fetch(request.ticket, request.index, result);
                log::debug!("fetch {} -> {outcome:?}", request.index);
            }
            if self.browser.next_deadline().is_some_and(|due| due <= self.now) {
                self.browser.tick(self.now);
            }
            self.report();
        }
    }

    /// Drags to `translation` over `frames` frames, then lets go. The release
    /// velocity is estimated from the samples, as a pointer-only host would.
    fn swipe(&mut self, translation: Point, frames: u32) {
        let started = self.now;
        let mut tracker = PanVelocityTracker::new();
        tracker.add(0, Point::ZERO);
        self.browser.handle_pan(self.now, PanSample::began());
        for frame in 1..=frames {
            self.now += FRAME;
            let at = translation.scale(frame as f32 / frames as f32);
            tracker.add(self.now.duration_since(started).as_millis() as i64, at);
            self.browser.handle_pan(self.now, PanSample::changed(at));
        }
        let velocity = tracker.velocity();
        log::debug!("released at {velocity:?}");
        self.browser
            .handle_pan(self.now, PanSample::ended(translation, velocity));
        self.report();
    }

    fn report(&mut self) {
        let browser = &mut self.browser;
        let mut events = Vec::new();
        browser.drain_events(|event| events.push(event));
        for event in events {
            match event {
                BrowserEvent::FocusChanged(index) => {
                    let indicator = browser.page_indicator();
                    log::info!("now showing {} of {}", index + 1, indicator.count);
                }
                BrowserEvent::BackgroundChanged => {
                    let name = browser.background_image().map_or("-", |photo| photo.name);
                    log::info!("background is {name}");
                }
                other => log::info!("{other:?}"),
            }
        }
    }

    fn describe(&self) {
        for item in self.browser.render_items() {
            let name = item.image.map_or(
                if item.is_loading { "(loading)" } else { "(empty)" },
                |photo| photo.name,
            );
            log::info!(
                "  {:>5.2} {name:<14} dx={:>7.1} scale={:.2}",
                item.position,
                item.transform.translation.x,
                item.transform.scale,
            );
        }
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Lightbox headless session ===");
    println!("Scripted swipes, a fling, taps and a drag-to-dismiss.");
    println!();

    let mut session = Session::new(1)?;
    session.wait(Duration::from_millis(200));
    session.describe();

    log::info!("slow swipe to the next photo");
    session.swipe(Point::new(-260.0, 0.0), 40);
    session.wait(Duration::from_millis(600));
    session.describe();

    log::info!("short fling, lands on the photo that failed to decode");
    session.swipe(Point::new(-80.0, 0.0), 4);
    session.wait(Duration::from_millis(600));

    log::info!("double tap on a photo with nothing to zoom, then toggle the controls");
    session.browser.handle_tap(session.now, TapEvent::double(Point::ZERO));
    session.browser.handle_tap(session.now, TapEvent::single(Point::ZERO));
    session.wait(Duration::from_millis(400));

    log::info!("drag down past the threshold into the grid thumbnail");
    session
        .gallery
        .set_thumbnail(Some(Rect::new(24.0, 120.0, 96.0, 96.0)));
    session.swipe(Point::new(12.0, 300.0), 12);
    session.wait(Duration::from_millis(600));

    if !session.browser.is_dismissed() {
        bail!("session ended without a dismissal");
    }
    println!("Dismissed after visiting index {}.", session.browser.focused_index());
    Ok(())
}
