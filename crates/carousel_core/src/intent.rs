//! Navigation intents
//!
//! Every input source (keys, thumbnails, finished drags) is reduced to one of
//! these before the controller touches the index.

/// What an input asks the carousel to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationIntent {
    /// Step relative to the current index
    MoveBy(i64),
    /// Jump to an absolute index
    GoTo(i64),
    /// Nothing to do
    #[default]
    NoOp,
}

impl NavigationIntent {
    /// Snap back to `index` without navigating
    ///
    /// Re-rendering the current index restores the resting transform after a
    /// live drag moved the track.
    pub fn snap_back(index: usize) -> Self {
        NavigationIntent::GoTo(index as i64)
    }

    /// Returns true if this intent changes nothing
    pub fn is_noop(&self) -> bool {
        matches!(self, NavigationIntent::NoOp)
    }
}
