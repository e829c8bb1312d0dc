//! One window slot and its position model.

use crate::source::{FetchTicket, LoadedMedia, ZoomRange};
use lightbox_core::resolve_index;

/// Stable physical identity of a window slot. Survives recycling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) u8);

impl SlotId {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// A view of one item: where it sits and what it shows.
///
/// `position` is measured in item extents including the gap: 0 is centered,
/// -1 is the previous place and +1 the next. `index` is logical and
/// unbounded; [`ItemView::resolved_index`] maps it into the source.
///
/// Every visible change bumps `revision`, so renderers can skip unchanged
/// slots. `generation` only changes when new content is requested.
#[derive(Clone, Debug)]
pub struct ItemView<I> {
    slot: SlotId,
    index: i64,
    position: f32,
    image: Option<I>,
    is_loading: bool,
    zoom_range: ZoomRange,
    zoom_scale: f32,
    generation: u64,
    revision: u64,
}

impl<I> ItemView<I> {
    pub(crate) fn new(slot: SlotId, index: i64, position: f32) -> Self {
        Self {
            slot,
            index,
            position,
            image: None,
            is_loading: false,
            zoom_range: ZoomRange::FIXED,
            zoom_scale: 1.0,
            generation: 0,
            revision: 0,
        }
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn resolved_index(&self, item_count: usize) -> Option<usize> {
        resolve_index(self.index, item_count)
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    pub fn zoom_scale(&self) -> f32 {
        self.zoom_scale
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom_scale != 1.0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn translate(&mut self, delta: f32) {
        if delta != 0.0 {
            self.position += delta;
            self.touch();
        }
    }

    /// Moves the item by `count` places, keeping position and index in step.
    pub(crate) fn shift(&mut self, count: i64) {
        self.position += count as f32;
        self.index += count;
        self.touch();
    }

    pub(crate) fn place(&mut self, index: i64, position: f32) {
        if self.index != index || self.position != position {
            self.index = index;
            self.position = position;
            self.touch();
        }
    }

    /// Drops the current content and starts a new request generation.
    pub(crate) fn begin_request(&mut self) -> FetchTicket {
        self.generation += 1;
        self.image = None;
        self.is_loading = true;
        self.zoom_range = ZoomRange::FIXED;
        self.zoom_scale = 1.0;
        self.touch();
        FetchTicket {
            slot: self.slot,
            generation: self.generation,
        }
    }

    /// Drops the content without requesting anything, for an empty source.
    pub(crate) fn clear(&mut self) {
        self.generation += 1;
        self.image = None;
        self.is_loading = false;
        self.zoom_range = ZoomRange::FIXED;
        self.zoom_scale = 1.0;
        self.touch();
    }

    /// Whether a completion for `ticket` reporting `index` still belongs here.
    pub(crate) fn accepts(&self, ticket: FetchTicket, index: usize, item_count: usize) -> bool {
        ticket.slot == self.slot
            && ticket.generation == self.generation
            && self.resolved_index(item_count) == Some(index)
    }

    pub(crate) fn apply_loaded(&mut self, media: LoadedMedia<I>) {
        self.image = Some(media.image);
        self.zoom_range = media.zoom_range.unwrap_or_default();
        self.is_loading = false;
        self.touch();
    }

    pub(crate) fn apply_failed(&mut self) {
        self.image = None;
        self.is_loading = false;
        self.touch();
    }

    /// Clamps `scale` into the item's zoom range and returns the applied value.
    pub(crate) fn set_zoom_scale(&mut self, scale: f32) -> f32 {
        let clamped = if scale.is_finite() {
            self.zoom_range.clamp(scale)
        } else {
            1.0
        };
        if clamped != self.zoom_scale {
            self.zoom_scale = clamped;
            self.touch();
        }
        clamped
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
