//! In-memory media source for driving a browser in tests.
//!
//! Requests are recorded rather than served, so a test decides when, in
//! which order and with what result each one completes.

use lightbox_browser::{FetchRequest, MediaImage, MediaSource};
use lightbox_ui_graphics::{Rect, Size};
use std::cell::RefCell;
use std::rc::Rc;

/// Stand-in for a decoded image: remembers which index it was loaded for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FakeImage {
    pub index: usize,
    pub size: Size,
}

impl FakeImage {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            size: Size::new(1200.0, 800.0),
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }
}

impl MediaImage for FakeImage {
    fn pixel_size(&self) -> Size {
        self.size
    }
}

#[derive(Debug, Default)]
struct Inner {
    item_count: usize,
    dismissal_target: Option<Rect>,
    pending: Vec<FetchRequest>,
    history: Vec<FetchRequest>,
}

/// Cloning shares state: keep one handle in the test and give the other to the browser.
#[derive(Clone, Debug, Default)]
pub struct FakeMediaSource {
    inner: Rc<RefCell<Inner>>,
}

impl FakeMediaSource {
    pub fn new(item_count: usize) -> Self {
        let source = Self::default();
        source.set_item_count(item_count);
        source
    }

    pub fn with_dismissal_target(self, target: Rect) -> Self {
        self.set_dismissal_target(Some(target));
        self
    }

    pub fn set_item_count(&self, item_count: usize) {
        self.inner.borrow_mut().item_count = item_count;
    }

    pub fn set_dismissal_target(&self, target: Option<Rect>) {
        self.inner.borrow_mut().dismissal_target = target;
    }

    /// Requests not yet taken by the test, oldest first.
    pub fn pending(&self) -> Vec<FetchRequest> {
        self.inner.borrow().pending.clone()
    }

    pub fn take_pending(&self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.inner.borrow_mut().pending)
    }

    /// The latest pending request for `index`, removed from the queue.
    pub fn take_request_for(&self, index: usize) -> Option<FetchRequest> {
        let mut inner = self.inner.borrow_mut();
        let at = inner
            .pending
            .iter()
            .rposition(|request| request.index == index)?;
        Some(inner.pending.remove(at))
    }

    /// Every index ever requested, in request order.
    pub fn requested_indices(&self) -> Vec<usize> {
        self.inner
            .borrow()
            .history
            .iter()
            .map(|request| request.index)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.inner.borrow().history.len()
    }
}

impl MediaSource for FakeMediaSource {
    type Image = FakeImage;

    fn item_count(&self) -> usize {
        self.inner.borrow().item_count
    }

    fn request_item(&self, request: FetchRequest) {
        log::trace!("fake source got request for {}", request.index);
        let mut inner = self.inner.borrow_mut();
        inner.pending.push(request);
        inner.history.push(request);
    }

    fn dismissal_target(&self) -> Option<Rect> {
        self.inner.borrow().dismissal_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightbox_browser::{BrowserConfig, MediaBrowser};

    #[test]
    fn clones_share_the_request_queue() {
        let source = FakeMediaSource::new(4);
        let browser = MediaBrowser::new(
            source.clone(),
            BrowserConfig::default(),
            Size::new(400.0, 800.0),
            1,
        )
        .unwrap();

        assert_eq!(browser.item_count(), 4);
        assert_eq!(source.request_count(), 3);
        let focused = source.take_request_for(1).unwrap();
        assert_eq!(focused.index, 1);
        assert_eq!(source.pending().len(), 2);
        assert!(source.take_request_for(1).is_none());
    }
}
