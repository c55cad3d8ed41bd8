//! Carousel Input Layer
//!
//! Platform-agnostic input for the carousel: raw keyboard, mouse, and touch
//! events, a listener registry the host dispatches them through, and the
//! bindings that route them into a [`carousel_core::NavigationController`].
//!
//! # Architecture
//!
//! - [`InputEvent`] - What the platform reports
//! - [`ListenerRegistry`] - Listeners keyed by [`Target`] and [`ListenerKind`]
//! - [`InputBindings`] - Registers the carousel's listeners and releases them
//!   on detach, including the document-level listeners of an active drag
//!
//! # Example
//!
//! ```ignore
//! use carousel_platform::prelude::*;
//!
//! let bindings = InputBindings::new(controller);
//! let mut registry = ListenerRegistry::new();
//! bindings.attach(&mut registry)?;
//! bindings.load(&mut registry, 5);
//!
//! registry.dispatch(&[Target::Window], &InputEvent::key_pressed(Key::Right));
//! ```

mod bindings;
mod error;
mod input;
mod registry;

// Re-export all public types
pub use bindings::{InputBindings, SharedController};
pub use error::{PlatformError, Result};
pub use input::{
    InputEvent, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent, PointerId,
    PointerPhase, PointerSample, TouchEvent,
};
pub use registry::{
    listener, ListenerCallback, ListenerId, ListenerKind, ListenerRegistry, Registration, Target,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bindings::{InputBindings, SharedController};
    pub use crate::error::{PlatformError, Result};
    pub use crate::input::{
        InputEvent, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent, PointerId,
        TouchEvent,
    };
    pub use crate::registry::{ListenerKind, ListenerRegistry, Registration, Target};
}
