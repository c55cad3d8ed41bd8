//! Navigation error types
//!
//! None of these reach the host: the controller treats every rejection as a
//! no-op. They exist so the pure layers can say *why* a request was refused,
//! which keeps the index and gesture code testable on its own.

use thiserror::Error;

/// Reasons a navigation request or gesture step was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// Target index falls outside `[0, length)`
    #[error("index {index} is outside 0..{length}")]
    InvalidIndex {
        /// Requested (or wrapped-to) index
        index: i64,
        /// Item count at the time of the request
        length: usize,
    },

    /// Move distance is at least the full collection
    #[error("move by {delta} spans the whole collection of {length}")]
    DegenerateMove {
        /// Requested step
        delta: i64,
        /// Item count at the time of the request
        length: usize,
    },

    /// Gesture ended without measurable displacement
    #[error("gesture finished without displacement")]
    NoOpGesture,

    /// A gesture start arrived while another gesture is active
    #[error("a drag gesture is already in progress")]
    GestureInProgress,

    /// A gesture update or finish arrived with no gesture active
    #[error("no drag gesture is in progress")]
    NoActiveGesture,
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;
