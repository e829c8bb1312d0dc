//! Data source contract.
//!
//! The browser never loads media itself. It asks the source for an item and
//! the host reports the result later through
//! [`MediaBrowser::complete_fetch`](crate::MediaBrowser::complete_fetch),
//! quoting the ticket it was given. Completions may arrive in any order, or
//! after the requesting slot has moved on to another item.

use crate::item::SlotId;
use lightbox_ui_graphics::{Rect, Size};

/// Decoded media as far as the browser cares.
pub trait MediaImage: Clone {
    /// Intrinsic size, used to frame the dismiss snapshot.
    fn pixel_size(&self) -> Size;
}

pub trait MediaSource {
    type Image: MediaImage;

    fn item_count(&self) -> usize;

    /// Starts loading the item at `request.index`. Fire-and-forget.
    fn request_item(&self, request: FetchRequest);

    /// Screen rect the dismissed item should fly into, if any.
    fn dismissal_target(&self) -> Option<Rect> {
        None
    }
}

/// Identifies one content request of one window slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub slot: SlotId,
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    /// Resolved index, always in `[0, item_count)`.
    pub index: usize,
}

/// Allowed zoom scales of one item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
}

impl ZoomRange {
    /// The range of an item that cannot zoom.
    pub const FIXED: ZoomRange = ZoomRange { min: 1.0, max: 1.0 };

    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }

    pub fn can_zoom(&self) -> bool {
        self.max > 1.0
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self::FIXED
    }
}

/// A successful load.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedMedia<I> {
    pub image: I,
    pub zoom_range: Option<ZoomRange>,
}

impl<I> LoadedMedia<I> {
    pub fn new(image: I) -> Self {
        Self {
            image,
            zoom_range: None,
        }
    }

    pub fn with_zoom_range(mut self, zoom_range: ZoomRange) -> Self {
        self.zoom_range = Some(zoom_range);
        self
    }
}

/// What [`MediaBrowser::complete_fetch`](crate::MediaBrowser::complete_fetch) did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The image is now displayed by its slot.
    Applied,
    /// The slot stopped loading and stays imageless.
    Failed,
    /// The slot no longer wants this item; nothing changed.
    Stale,
}
