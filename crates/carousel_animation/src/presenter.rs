//! Headless track presenter
//!
//! A [`PresentationAdapter`] that keeps the carousel's visual state in
//! pixels without drawing anything: the track offset, whether the track
//! transition is enabled, which thumbnail is selected, and how far the
//! thumbnail strip is scrolled. Hosts drive it with [`TrackPresenter::tick`]
//! once per frame and read the values back when painting.

use carousel_core::{track_offset_percent, NavigateOptions, PresentationAdapter, ScrollBehavior};
use smallvec::SmallVec;
use tracing::trace;

use crate::spring::{Spring, SpringConfig};

/// Pixel geometry of the carousel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackLayout {
    /// Width of one item (and of the visible track)
    pub item_width: f32,
    /// Width of one thumbnail
    pub thumbnail_width: f32,
    /// Visible width of the thumbnail strip
    pub strip_width: f32,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            item_width: 400.0,
            thumbnail_width: 80.0,
            strip_width: 320.0,
        }
    }
}

impl TrackLayout {
    /// Resting track offset in pixels for item `index`
    pub fn track_offset(&self, index: usize) -> f32 {
        track_offset_percent(index) / 100.0 * self.item_width
    }

    /// Strip scroll that centres thumbnail `index`, clamped to the strip
    pub fn strip_scroll_for(&self, index: usize, thumbnails: usize) -> f32 {
        let content = thumbnails as f32 * self.thumbnail_width;
        let max_scroll = (content - self.strip_width).max(0.0);
        let center = (index as f32 + 0.5) * self.thumbnail_width;
        (center - self.strip_width / 2.0).clamp(0.0, max_scroll)
    }
}

/// Reference presenter with spring-driven track and thumbnail strip
#[derive(Debug, Clone)]
pub struct TrackPresenter {
    layout: TrackLayout,
    track: Spring,
    strip: Spring,
    transitions_enabled: bool,
    /// Set by an instant render; transitions come back on the next tick
    restore_on_tick: bool,
    dragging: bool,
    selected: SmallVec<[bool; 16]>,
}

impl TrackPresenter {
    /// Create a presenter resting on the first item
    pub fn new(layout: TrackLayout) -> Self {
        Self {
            layout,
            track: Spring::new(SpringConfig::track(), 0.0),
            strip: Spring::new(SpringConfig::strip(), 0.0),
            transitions_enabled: true,
            restore_on_tick: false,
            dragging: false,
            selected: SmallVec::new(),
        }
    }

    /// Builder: number of thumbnails in the strip
    pub fn with_thumbnails(mut self, count: usize) -> Self {
        self.set_thumbnail_count(count);
        self
    }

    /// Resize the thumbnail strip, clearing the selection
    pub fn set_thumbnail_count(&mut self, count: usize) {
        self.selected.clear();
        self.selected.resize(count, false);
    }

    pub fn layout(&self) -> TrackLayout {
        self.layout
    }

    /// Track offset in pixels as currently shown
    pub fn track_offset(&self) -> f32 {
        self.track.value()
    }

    /// Track offset the current animation is heading to
    pub fn track_target(&self) -> f32 {
        self.track.target()
    }

    /// Track offset as a percentage of one item width
    pub fn track_percent(&self) -> f32 {
        if self.layout.item_width == 0.0 {
            return 0.0;
        }
        self.track.value() / self.layout.item_width * 100.0
    }

    /// Thumbnail strip scroll position in pixels
    pub fn strip_scroll(&self) -> f32 {
        self.strip.value()
    }

    /// Returns true if the track transition is enabled
    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    /// Returns true while a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The selected thumbnail, if any
    pub fn selected_thumbnail(&self) -> Option<usize> {
        self.selected.iter().position(|selected| *selected)
    }

    /// Returns true if thumbnail `index` is selected
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Returns true while the track or strip is still moving
    pub fn is_animating(&self) -> bool {
        !self.track.is_settled() || !self.strip.is_settled()
    }

    /// Advance animations by `dt` seconds
    ///
    /// Also re-enables the track transition after an instant render. Returns
    /// true while anything is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.restore_on_tick {
            self.restore_on_tick = false;
            if !self.dragging {
                self.transitions_enabled = true;
                trace!("track transitions restored");
            }
        }

        let track_moving = self.track.step(dt);
        let strip_moving = self.strip.step(dt);
        track_moving || strip_moving
    }

    /// Step until both springs settle, up to `max_frames` frames of `dt`
    ///
    /// Returns the number of frames stepped.
    pub fn settle(&mut self, dt: f32, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.tick(dt) {
            frames += 1;
        }
        frames
    }

    fn scroll_strip_to(&mut self, index: usize, behavior: ScrollBehavior) {
        let target = self.layout.strip_scroll_for(index, self.selected.len());
        match behavior {
            ScrollBehavior::Smooth => self.strip.retarget(target),
            ScrollBehavior::Instant => self.strip.snap_to(target),
        }
    }
}

impl Default for TrackPresenter {
    fn default() -> Self {
        Self::new(TrackLayout::default())
    }
}

impl PresentationAdapter for TrackPresenter {
    fn content_loaded(&mut self, length: usize) {
        self.set_thumbnail_count(length);
    }

    fn render_at(&mut self, index: usize, options: NavigateOptions) {
        let target = self.layout.track_offset(index);
        if options.instant {
            self.transitions_enabled = false;
            self.restore_on_tick = true;
        }

        if self.transitions_enabled {
            self.track.retarget(target);
        } else {
            self.track.snap_to(target);
        }
        self.scroll_strip_to(index, options.thumbnail_scroll);
        trace!(index, target, animated = self.transitions_enabled, "track render");
    }

    fn set_visual_offset(&mut self, offset_px: f32) {
        self.track.snap_to(offset_px);
    }

    fn highlight_thumbnail(&mut self, index: usize) {
        for (i, selected) in self.selected.iter_mut().enumerate() {
            *selected = i == index;
        }
    }

    fn visual_offset(&self) -> f32 {
        self.track.value()
    }

    fn drag_started(&mut self) {
        // Freeze the track where the gesture grabbed it
        self.track.snap_to(self.track.value());
        self.dragging = true;
        self.transitions_enabled = false;
    }

    fn drag_ended(&mut self) {
        self.dragging = false;
        self.transitions_enabled = true;
    }
}
