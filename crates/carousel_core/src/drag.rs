//! Drag gesture tracking
//!
//! Converts raw pointer samples into a live track offset while the pointer is
//! down, and into a single [`NavigationIntent`] when it is released.
//!
//! ```text
//! Idle --start--> Dragging --update--> Dragging --finish--> Idle
//! ```
//!
//! Only horizontal motion matters. Displacement is measured as
//! `initial_pointer_x - pointer_x`, so a positive value means the pointer
//! moved left and the user is pulling the next item into view.

use crate::error::{NavigationError, Result};
use crate::fsm::{drag_events, DragPhase, StateTransitions};
use crate::intent::NavigationIntent;

/// Data for the gesture in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// Pointer X when the gesture started
    pub initial_pointer_x: f32,
    /// Track offset (px) when the gesture started
    pub initial_offset_x: f32,
    /// Most recent pointer X, `None` until a sample arrives
    pub last_pointer_x: Option<f32>,
}

impl GestureState {
    /// Create gesture data for a press at `pointer_x`
    pub fn new(pointer_x: f32, initial_offset_x: f32) -> Self {
        Self {
            initial_pointer_x: pointer_x,
            initial_offset_x,
            last_pointer_x: None,
        }
    }

    /// Horizontal displacement at release
    ///
    /// The release position wins when the platform reports one; otherwise the
    /// last move sample is used. No sample at all, or zero travel, is a no-op
    /// gesture.
    pub fn displacement(&self, release_x: Option<f32>) -> Result<f32> {
        let x = release_x
            .or(self.last_pointer_x)
            .ok_or(NavigationError::NoOpGesture)?;
        let delta = self.initial_pointer_x - x;
        if delta == 0.0 {
            return Err(NavigationError::NoOpGesture);
        }
        Ok(delta)
    }

    /// Decide what a release at `release_x` means
    ///
    /// Navigation needs travel strictly greater than `threshold`, and a drag
    /// never wraps: at either end the gesture snaps back instead.
    pub fn resolve(
        &self,
        release_x: Option<f32>,
        current_index: usize,
        length: usize,
        threshold: u32,
    ) -> NavigationIntent {
        let delta = match self.displacement(release_x) {
            Ok(delta) => delta,
            Err(_) => return NavigationIntent::snap_back(current_index),
        };
        let threshold = threshold as f32;

        if delta < 0.0 && -delta > threshold {
            if current_index < 1 {
                return NavigationIntent::snap_back(current_index);
            }
            return NavigationIntent::MoveBy(-1);
        }
        if delta > threshold {
            if current_index + 1 >= length {
                return NavigationIntent::snap_back(current_index);
            }
            return NavigationIntent::MoveBy(1);
        }
        NavigationIntent::snap_back(current_index)
    }
}

/// Tracks at most one drag gesture at a time
#[derive(Debug, Clone, Default)]
pub struct DragGestureTracker {
    phase: DragPhase,
    gesture: Option<GestureState>,
}

impl DragGestureTracker {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns true while a gesture is active
    pub fn is_dragging(&self) -> bool {
        self.phase.is_dragging()
    }

    /// The active gesture, if any
    pub fn gesture(&self) -> Option<&GestureState> {
        self.gesture.as_ref()
    }

    /// Begin a gesture at `pointer_x` with the track at `initial_offset_x`
    ///
    /// A second start while a gesture is active is refused and leaves the
    /// active gesture untouched.
    pub fn start(&mut self, pointer_x: f32, initial_offset_x: f32) -> Result<()> {
        self.phase = self
            .phase
            .on_event(drag_events::DRAG_START)
            .ok_or(NavigationError::GestureInProgress)?;
        self.gesture = Some(GestureState::new(pointer_x, initial_offset_x));
        Ok(())
    }

    /// Record a pointer sample and compute the track offset to show
    ///
    /// Returns `Ok(None)` when the update is suppressed: pulling forward while
    /// on the last item does not move the track. Pulling backward on the first
    /// item is allowed. The sample is recorded either way.
    pub fn update(
        &mut self,
        pointer_x: f32,
        current_index: usize,
        length: usize,
    ) -> Result<Option<f32>> {
        self.phase = self
            .phase
            .on_event(drag_events::DRAG_MOVE)
            .ok_or(NavigationError::NoActiveGesture)?;
        let gesture = self
            .gesture
            .as_mut()
            .ok_or(NavigationError::NoActiveGesture)?;

        gesture.last_pointer_x = Some(pointer_x);
        let delta = gesture.initial_pointer_x - pointer_x;
        if current_index + 1 >= length && delta > 0.0 {
            return Ok(None);
        }

        let display_offset = -gesture.initial_offset_x + delta;
        Ok(Some(-display_offset))
    }

    /// End the gesture and resolve it to an intent
    pub fn finish(
        &mut self,
        release_x: Option<f32>,
        current_index: usize,
        length: usize,
        threshold: u32,
    ) -> Result<NavigationIntent> {
        self.phase = self
            .phase
            .on_event(drag_events::DRAG_END)
            .ok_or(NavigationError::NoActiveGesture)?;
        let gesture = self
            .gesture
            .take()
            .ok_or(NavigationError::NoActiveGesture)?;
        Ok(gesture.resolve(release_x, current_index, length, threshold))
    }

    /// Drop the active gesture without resolving it
    ///
    /// Returns true if a gesture was active.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.phase = DragPhase::Idle;
        self.gesture = None;
        was_dragging
    }
}
