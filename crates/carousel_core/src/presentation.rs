//! Presentation seam
//!
//! The controller never draws. It tells a [`PresentationAdapter`] which item
//! to show, how to get there, and which thumbnail to highlight. Anything from
//! a GPU renderer to a headless test recorder can sit behind the trait.

/// How to bring the selected thumbnail into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animated scroll
    #[default]
    Smooth,
    /// Jump without animation
    Instant,
}

/// Options for a navigation render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    /// Skip the track transition for this render only
    pub instant: bool,
    /// How the thumbnail strip scrolls to the selected thumbnail
    pub thumbnail_scroll: ScrollBehavior,
}

impl NavigateOptions {
    /// Animated track, smooth thumbnail scroll
    pub fn animated() -> Self {
        Self::default()
    }

    /// No track transition, instant thumbnail scroll (used on content load)
    pub fn immediate() -> Self {
        Self {
            instant: true,
            thumbnail_scroll: ScrollBehavior::Instant,
        }
    }

    /// Builder: skip the track transition
    pub fn instant(mut self, instant: bool) -> Self {
        self.instant = instant;
        self
    }

    /// Builder: thumbnail scroll behavior
    pub fn thumbnail_scroll(mut self, behavior: ScrollBehavior) -> Self {
        self.thumbnail_scroll = behavior;
        self
    }
}

/// Resting track offset for `index`, as a percentage of one item width
pub fn track_offset_percent(index: usize) -> f32 {
    -(index as f32 * 100.0)
}

/// Rendering side of the carousel
///
/// Calls arrive in input-event order. A render that arrives while a previous
/// transition is still running retargets it; the controller never waits.
pub trait PresentationAdapter {
    /// Content was replaced with `length` items
    ///
    /// Called before the instant render that follows a load, so thumbnail
    /// state can be resized first.
    fn content_loaded(&mut self, _length: usize) {}

    /// Show item `index` with the track at [`track_offset_percent`]
    ///
    /// With `options.instant`, the transition is suppressed for this render
    /// and re-enabled on the next scheduling tick. The thumbnail at `index`
    /// is scrolled into view with `options.thumbnail_scroll`.
    fn render_at(&mut self, index: usize, options: NavigateOptions);

    /// Move the track to `offset_px` (live drag)
    fn set_visual_offset(&mut self, offset_px: f32);

    /// Mark thumbnail `index` selected and every other thumbnail deselected
    fn highlight_thumbnail(&mut self, index: usize);

    /// Current on-screen track offset in pixels
    fn visual_offset(&self) -> f32;

    /// A drag began: disable track transitions until it ends
    fn drag_started(&mut self) {}

    /// The drag ended: re-enable track transitions
    fn drag_ended(&mut self) {}
}

impl<P: PresentationAdapter + ?Sized> PresentationAdapter for Box<P> {
    fn content_loaded(&mut self, length: usize) {
        (**self).content_loaded(length)
    }

    fn render_at(&mut self, index: usize, options: NavigateOptions) {
        (**self).render_at(index, options)
    }

    fn set_visual_offset(&mut self, offset_px: f32) {
        (**self).set_visual_offset(offset_px)
    }

    fn highlight_thumbnail(&mut self, index: usize) {
        (**self).highlight_thumbnail(index)
    }

    fn visual_offset(&self) -> f32 {
        (**self).visual_offset()
    }

    fn drag_started(&mut self) {
        (**self).drag_started()
    }

    fn drag_ended(&mut self) {
        (**self).drag_ended()
    }
}
