//! Core runtime primitives for Lightbox
//!
//! Everything here is single-threaded and poll-driven: owners hold their
//! timers by value and the host feeds in the current time.

pub mod deadline;
pub mod frame_ticker;
pub mod index;

pub use deadline::Deadline;
pub use frame_ticker::{frame_interval, FrameTicker, TickerId, TickerSlot, MAX_CATCH_UP_FRAMES};
pub use index::{clamp_index, resolve_index};

pub use web_time::{Duration, Instant};
