//! A pretend photo library that "decodes" on a delay.

use lightbox_browser::prelude::*;
use lightbox_browser::ZoomRange;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use web_time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub name: &'static str,
    pub size: Size,
}

impl MediaImage for Photo {
    fn pixel_size(&self) -> Size {
        self.size
    }
}

const LIBRARY: &[(&str, f32, f32)] = &[
    ("harbour.jpg", 4032.0, 3024.0),
    ("portrait.jpg", 3024.0, 4032.0),
    ("panorama.jpg", 8000.0, 2000.0),
    ("missing.jpg", 0.0, 0.0),
    ("sunset.jpg", 1920.0, 1080.0),
];

#[derive(Debug, Default)]
struct Queue {
    in_flight: VecDeque<(Instant, FetchRequest)>,
    now: Option<Instant>,
    target: Option<Rect>,
}

/// Cloning shares the request queue.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    queue: Rc<RefCell<Queue>>,
    latency: Duration,
}

impl Gallery {
    pub fn new(latency: Duration) -> Self {
        Self {
            queue: Rc::default(),
            latency,
        }
    }

    /// Thumbnail rect in the grid the browser was opened from.
    pub fn set_thumbnail(&self, target: Option<Rect>) {
        self.queue.borrow_mut().target = target;
    }

    pub fn set_now(&self, now: Instant) {
        self.queue.borrow_mut().now = Some(now);
    }

    /// Requests whose decode has finished by `now`.
    pub fn ready(&self, now: Instant) -> Vec<FetchRequest> {
        let mut queue = self.queue.borrow_mut();
        let mut ready = Vec::new();
        while let Some((due, request)) = queue.in_flight.front().copied() {
            if due > now {
                break;
            }
            queue.in_flight.pop_front();
            ready.push(request);
        }
        ready
    }

    pub fn decode(&self, index: usize) -> Result<LoadedMedia<Photo>, FetchError> {
        let &(name, width, height) = LIBRARY.get(index).ok_or(FetchError::NotFound(index))?;
        if width <= 0.0 || height <= 0.0 {
            return Err(FetchError::Load(format!("{name} has no pixels")));
        }
        let photo = Photo {
            name,
            size: Size::new(width, height),
        };
        let max_zoom = (width / 1000.0).max(1.0);
        Ok(LoadedMedia::new(photo).with_zoom_range(ZoomRange::new(1.0, max_zoom)))
    }
}

impl MediaSource for Gallery {
    type Image = Photo;

    fn item_count(&self) -> usize {
        LIBRARY.len()
    }

    fn request_item(&self, request: FetchRequest) {
        let mut queue = self.queue.borrow_mut();
        let now = queue.now.unwrap_or_else(Instant::now);
        queue.in_flight.push_back((now + self.latency, request));
    }

    fn dismissal_target(&self) -> Option<Rect> {
        self.queue.borrow().target
    }
}
