//! Paginated media browser for Lightbox
//!
//! A three-slot recycling window pages through an unbounded list of media
//! items under an interactive drag, flings and settles with frame-stepped
//! decay, and can be dragged away along the cross axis to dismiss. Rendering
//! and media loading stay with the host: it feeds gestures and fetch results
//! into [`MediaBrowser`] and draws what comes back.

mod browser;
mod config;
mod controls;
mod error;
mod item;
mod source;
mod transform;

pub mod dismiss;
pub mod paging;
pub mod window;

pub use browser::{BrowserEvent, MediaBrowser, RenderItem};
pub use config::*;
pub use controls::{ControlsOverlay, PageIndicator};
pub use dismiss::{DismissEngine, DismissOutcome, DismissOverlay, DismissParams, DismissPhase};
pub use error::{BrowserError, ConfigError, FetchError};
pub use item::{ItemView, SlotId};
pub use paging::{PagingEngine, PagingParams, PagingPhase, RecycleEvents};
pub use source::*;
pub use transform::{ItemGeometry, StockTransition, TransformPolicy};
pub use window::{ItemWindow, RecycleDirection, RecycleEvent, WindowGeometry, WINDOW_LEN};

pub use lightbox_foundation::{Axis, GesturePhase, GestureRoute, PanSample, TapEvent, TapKind};
pub use lightbox_ui_graphics::{Point, Rect, Size, VisualTransform};

pub mod prelude {
    pub use crate::browser::{BrowserEvent, MediaBrowser, RenderItem};
    pub use crate::config::{BrowserConfig, BrowserStyle, DismissConfig, DrawOrder, TransitionStyle};
    pub use crate::error::{BrowserError, FetchError};
    pub use crate::source::{FetchOutcome, FetchRequest, LoadedMedia, MediaImage, MediaSource};
    pub use lightbox_foundation::prelude::*;
    pub use lightbox_ui_graphics::prelude::*;
}
