//! Carousel Core
//!
//! Navigation state for a one-item-at-a-time carousel:
//!
//! - **Index Arithmetic**: Wrapped and clamped index movement
//! - **Drag Gestures**: Pointer samples to live offsets and release decisions
//! - **Navigation Controller**: Current index, configuration, and input handling
//! - **Presentation Seam**: A trait the controller drives to render results
//!
//! Nothing here draws or listens for platform events. Input arrives as
//! method calls (see `carousel_platform` for bindings) and results leave
//! through [`PresentationAdapter`].
//!
//! # Example
//!
//! ```rust
//! use carousel_core::index::resolve_move;
//!
//! // Step back from the first of five items with looping on
//! assert_eq!(resolve_move(0, -1, 5, true), Ok(4));
//! // ...and with looping off
//! assert!(resolve_move(0, -1, 5, false).is_err());
//! ```

pub mod coerce;
pub mod config;
pub mod content;
pub mod controller;
pub mod drag;
pub mod error;
pub mod fsm;
pub mod index;
pub mod intent;
pub mod presentation;

pub use coerce::{parse_int, IntoIndex};
pub use config::{
    Attribute, CarouselConfig, KeyBinding, UnknownAttribute, DEFAULT_DRAG_THRESHOLD,
    DEFAULT_KEY_BACK, DEFAULT_KEY_FORTH,
};
pub use content::pair_thumbnails;
pub use controller::NavigationController;
pub use drag::{DragGestureTracker, GestureState};
pub use error::{NavigationError, Result};
pub use fsm::{DragPhase, StateTransitions};
pub use index::{resolve_go_to, resolve_move};
pub use intent::NavigationIntent;
pub use presentation::{track_offset_percent, NavigateOptions, PresentationAdapter, ScrollBehavior};
