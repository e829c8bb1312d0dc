//! The three recycled item views.
//!
//! Slots live in a fixed array addressed through a rotating head, so
//! recycling never moves or reallocates an item: it only shifts the head and
//! renumbers the recycled slot. The window order (previous, current, next) is
//! identity; draw order is kept separately as a bottom-to-top slot stack.

use crate::config::DrawOrder;
use crate::item::{ItemView, SlotId};
use lightbox_foundation::Axis;
use lightbox_ui_graphics::Size;

/// Number of item views the window recycles.
pub const WINDOW_LEN: usize = 3;

const CURRENT: usize = 1;

/// Direction a recycle moved the focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecycleDirection {
    /// The next item became current; the old previous slot went to the tail.
    Forward,
    /// The previous item became current; the old next slot went to the head.
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecycleEvent {
    pub direction: RecycleDirection,
    /// The slot that was moved and now needs new content.
    pub recycled: SlotId,
    /// Logical index of the new current item.
    pub focus_index: i64,
}

/// Viewport facts the crossing thresholds depend on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowGeometry {
    pub axis: Axis,
    pub viewport: Size,
    pub gap: f32,
}

impl WindowGeometry {
    pub fn new(axis: Axis, viewport: Size, gap: f32) -> Self {
        Self {
            axis,
            viewport,
            gap,
        }
    }

    /// Viewport extent along the paging axis.
    pub fn extent(&self) -> f32 {
        self.axis.of_size(self.viewport)
    }

    /// One place in pixels: the extent plus the gap.
    pub fn step(&self) -> f32 {
        self.extent() + self.gap
    }

    pub fn normalized_gap(&self) -> f32 {
        self.gap / self.step()
    }

    pub fn normalized_half(&self) -> f32 {
        (self.extent() / self.step()) * 0.5
    }

    /// The current item recycles forward once its position drops below this.
    pub fn forward_threshold(&self) -> f32 {
        -(self.normalized_gap() + self.normalized_half())
    }

    /// The current item recycles backward once its position exceeds this.
    pub fn backward_threshold(&self) -> f32 {
        1.0 + self.normalized_gap() - self.normalized_half()
    }
}

#[derive(Debug)]
pub struct ItemWindow<I> {
    slots: [ItemView<I>; WINDOW_LEN],
    head: usize,
    /// Bottom to top.
    draw_stack: [SlotId; WINDOW_LEN],
    draw_order: DrawOrder,
}

impl<I> ItemWindow<I> {
    /// A window at rest, centered on logical `center_index`.
    pub fn new(center_index: i64, draw_order: DrawOrder) -> Self {
        let slots = [0u8, 1, 2].map(|n| {
            let offset = n as i64 - CURRENT as i64;
            ItemView::new(SlotId(n), center_index + offset, offset as f32)
        });
        Self {
            slots,
            head: 0,
            draw_stack: initial_stack([SlotId(0), SlotId(1), SlotId(2)], draw_order),
            draw_order,
        }
    }

    fn physical(&self, order: usize) -> usize {
        (self.head + order) % WINDOW_LEN
    }

    /// Item at window `order` 0 (previous), 1 (current) or 2 (next).
    pub fn get(&self, order: usize) -> Option<&ItemView<I>> {
        (order < WINDOW_LEN).then(|| &self.slots[self.physical(order)])
    }

    pub fn previous(&self) -> &ItemView<I> {
        &self.slots[self.physical(0)]
    }

    pub fn current(&self) -> &ItemView<I> {
        &self.slots[self.physical(CURRENT)]
    }

    pub fn next(&self) -> &ItemView<I> {
        &self.slots[self.physical(2)]
    }

    pub(crate) fn current_mut(&mut self) -> &mut ItemView<I> {
        let at = self.physical(CURRENT);
        &mut self.slots[at]
    }

    /// Items in window order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemView<I>> + '_ {
        (0..WINDOW_LEN).map(move |order| &self.slots[self.physical(order)])
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ItemView<I>> + '_ {
        self.slots.iter_mut()
    }

    pub fn slot(&self, id: SlotId) -> Option<&ItemView<I>> {
        self.slots.get(id.0 as usize)
    }

    pub(crate) fn slot_mut(&mut self, id: SlotId) -> Option<&mut ItemView<I>> {
        self.slots.get_mut(id.0 as usize)
    }

    /// Slots bottom to top.
    pub fn draw_stack(&self) -> [SlotId; WINDOW_LEN] {
        self.draw_stack
    }

    pub fn draw_order(&self) -> DrawOrder {
        self.draw_order
    }

    /// Changing the order swaps the bottom and top of the stack.
    pub fn set_draw_order(&mut self, order: DrawOrder) {
        if order != self.draw_order {
            self.draw_stack.swap(0, WINDOW_LEN - 1);
            self.draw_order = order;
        }
    }

    /// Applies `delta` to every position, then recycles at most once.
    ///
    /// Large deltas can leave the window past another threshold; callers drain
    /// those with `recycle(0.0, ..)` until it returns `None`.
    pub fn recycle(&mut self, delta: f32, geometry: &WindowGeometry) -> Option<RecycleEvent> {
        for item in self.slots.iter_mut() {
            item.translate(delta);
        }

        let position = self.current().position();
        if position < geometry.forward_threshold() {
            Some(self.recycle_forward())
        } else if position > geometry.backward_threshold() {
            Some(self.recycle_backward())
        } else {
            None
        }
    }

    fn recycle_forward(&mut self) -> RecycleEvent {
        let recycled = self.previous().slot();
        let at = self.physical(0);
        self.slots[at].shift(WINDOW_LEN as i64);
        self.head = (self.head + 1) % WINDOW_LEN;
        match self.draw_order {
            DrawOrder::PreviousToNext => self.bring_to_top(recycled),
            DrawOrder::NextToPrevious => self.send_to_bottom(recycled),
        }
        let focus_index = self.current().index();
        log::debug!("recycled {recycled} forward, focus now {focus_index}");
        RecycleEvent {
            direction: RecycleDirection::Forward,
            recycled,
            focus_index,
        }
    }

    fn recycle_backward(&mut self) -> RecycleEvent {
        let recycled = self.next().slot();
        let at = self.physical(2);
        self.slots[at].shift(-(WINDOW_LEN as i64));
        self.head = (self.head + WINDOW_LEN - 1) % WINDOW_LEN;
        match self.draw_order {
            DrawOrder::PreviousToNext => self.send_to_bottom(recycled),
            DrawOrder::NextToPrevious => self.bring_to_top(recycled),
        }
        let focus_index = self.current().index();
        log::debug!("recycled {recycled} backward, focus now {focus_index}");
        RecycleEvent {
            direction: RecycleDirection::Backward,
            recycled,
            focus_index,
        }
    }

    fn bring_to_top(&mut self, id: SlotId) {
        if let Some(at) = self.draw_stack.iter().position(|slot| *slot == id) {
            self.draw_stack[at..].rotate_left(1);
        }
    }

    fn send_to_bottom(&mut self, id: SlotId) {
        if let Some(at) = self.draw_stack.iter().position(|slot| *slot == id) {
            self.draw_stack[..=at].rotate_right(1);
        }
    }

    /// Pins positions to exactly -1, 0 and 1 after a settle.
    pub(crate) fn snap_to_rest(&mut self) {
        let center = self.current().index();
        self.place_around(center);
    }

    /// Re-seeds the window at rest around logical `center_index`.
    ///
    /// Slots keep their identity; content is not touched.
    pub fn reset(&mut self, center_index: i64) {
        self.place_around(center_index);
        let ordered = [0, 1, 2].map(|order| self.slots[self.physical(order)].slot());
        self.draw_stack = initial_stack(ordered, self.draw_order);
    }

    fn place_around(&mut self, center_index: i64) {
        for order in 0..WINDOW_LEN {
            let offset = order as i64 - CURRENT as i64;
            let at = self.physical(order);
            self.slots[at].place(center_index + offset, offset as f32);
        }
    }
}

fn initial_stack(ordered: [SlotId; WINDOW_LEN], order: DrawOrder) -> [SlotId; WINDOW_LEN] {
    match order {
        DrawOrder::PreviousToNext => ordered,
        DrawOrder::NextToPrevious => [ordered[2], ordered[1], ordered[0]],
    }
}

#[cfg(test)]
#[path = "tests/window_tests.rs"]
mod tests;
