//! Minimal state machine support
//!
//! States are plain `Copy` enums; events are `u32` ids. A transition table is
//! a single `match` on `(state, event)` returning the next state, or `None`
//! when the event does not apply in that state.

use std::hash::Hash;

/// Trait for state enums driven by `u32` events
///
/// # Example
///
/// ```
/// use carousel_core::fsm::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Toggle {
///     Off,
///     On,
/// }
///
/// impl StateTransitions for Toggle {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Toggle::Off, 1) => Some(Toggle::On),
///             (Toggle::On, 1) => Some(Toggle::Off),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Toggle::Off.on_event(1), Some(Toggle::On));
/// assert_eq!(Toggle::Off.on_event(2), None);
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + std::fmt::Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Events understood by [`DragPhase`]
pub mod drag_events {
    /// Pointer pressed on the track
    pub const DRAG_START: u32 = 1;
    /// Pointer moved while pressed
    pub const DRAG_MOVE: u32 = 2;
    /// Pointer released
    pub const DRAG_END: u32 = 3;
}

/// Lifecycle of a single drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    /// No gesture in progress
    #[default]
    Idle,
    /// A pointer is down and being tracked
    Dragging,
}

impl DragPhase {
    /// Returns true while a gesture is being tracked
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging)
    }
}

impl StateTransitions for DragPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        use drag_events::*;

        match (self, event) {
            (DragPhase::Idle, DRAG_START) => Some(DragPhase::Dragging),
            // Samples keep the gesture alive
            (DragPhase::Dragging, DRAG_MOVE) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, DRAG_END) => Some(DragPhase::Idle),
            // A second start while dragging is refused
            _ => None,
        }
    }
}
