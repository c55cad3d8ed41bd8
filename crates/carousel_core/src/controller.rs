//! Navigation controller
//!
//! Owns the current index and configuration, turns input into navigation,
//! and drives a [`PresentationAdapter`]. All requests are best effort:
//! anything out of range, degenerate, or not a number is dropped without an
//! error reaching the caller.
//!
//! # Example
//!
//! ```
//! use carousel_core::{CarouselConfig, NavigateOptions, NavigationController, PresentationAdapter};
//!
//! #[derive(Default)]
//! struct Headless {
//!     shown: usize,
//! }
//!
//! impl PresentationAdapter for Headless {
//!     fn render_at(&mut self, index: usize, _options: NavigateOptions) {
//!         self.shown = index;
//!     }
//!     fn set_visual_offset(&mut self, _offset_px: f32) {}
//!     fn highlight_thumbnail(&mut self, _index: usize) {}
//!     fn visual_offset(&self) -> f32 {
//!         0.0
//!     }
//! }
//!
//! let mut carousel = NavigationController::new(CarouselConfig::default(), Headless::default());
//! carousel.load(5);
//! carousel.move_by(-1, NavigateOptions::default());
//! assert_eq!(carousel.current_index(), 4);
//! assert_eq!(carousel.presenter().shown, 4);
//! ```

use tracing::{debug, trace};

use crate::coerce::IntoIndex;
use crate::config::{Attribute, CarouselConfig, KeyBinding};
use crate::drag::DragGestureTracker;
use crate::index::{resolve_go_to, resolve_move};
use crate::intent::NavigationIntent;
use crate::presentation::{NavigateOptions, PresentationAdapter};

/// Carousel navigation state machine
#[derive(Debug)]
pub struct NavigationController<P: PresentationAdapter> {
    config: CarouselConfig,
    length: usize,
    current_index: usize,
    drag: DragGestureTracker,
    presenter: P,
}

impl<P: PresentationAdapter> NavigationController<P> {
    /// Create a controller with no content loaded
    pub fn new(config: CarouselConfig, presenter: P) -> Self {
        Self {
            config,
            length: 0,
            current_index: 0,
            drag: DragGestureTracker::new(),
            presenter,
        }
    }

    /// Number of items
    pub fn length(&self) -> usize {
        self.length
    }

    /// Index of the item being shown (0 when empty)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Active configuration
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// The presentation adapter
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access to the presentation adapter
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Consume the controller, returning the presentation adapter
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Returns true while a drag gesture is being tracked
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// The drag gesture tracker
    pub fn drag_tracker(&self) -> &DragGestureTracker {
        &self.drag
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Replace the content with `length` items
    ///
    /// Re-applies the configured index (falling back to 0 when it does not
    /// fit) and renders it without a transition.
    pub fn load(&mut self, length: usize) {
        self.length = length;
        self.current_index = self.initial_index();
        self.presenter.content_loaded(length);
        debug!(length, index = self.current_index, "content loaded");
        self.go_to(self.current_index, NavigateOptions::immediate());
    }

    fn initial_index(&self) -> usize {
        let requested = self.config.index().map(|index| resolve_go_to(index, self.length));
        match requested {
            Some(Ok(index)) => index,
            Some(Err(_)) => 0,
            // Nothing requested: keep the position if it still exists
            None if self.current_index < self.length => self.current_index,
            None => 0,
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move by `delta` items
    ///
    /// Ignored when `delta` is not a number, spans the whole collection, or
    /// leaves the bounds with looping off. Returns true if the carousel
    /// navigated.
    pub fn move_by(&mut self, delta: impl IntoIndex, options: NavigateOptions) -> bool {
        let Some(delta) = delta.into_index() else {
            trace!("move_by ignored: delta is not a number");
            return false;
        };

        match resolve_move(self.current_index, delta, self.length, self.config.looping()) {
            Ok(target) => self.show(target, options),
            Err(err) => {
                trace!("move_by({}) ignored: {}", delta, err);
                false
            }
        }
    }

    /// Jump to `index`
    ///
    /// Ignored when `index` is not a number or outside `[0, length)`. Returns
    /// true if the carousel navigated.
    pub fn go_to(&mut self, index: impl IntoIndex, options: NavigateOptions) -> bool {
        let Some(index) = index.into_index() else {
            trace!("go_to ignored: index is not a number");
            return false;
        };

        match resolve_go_to(index, self.length) {
            Ok(target) => self.show(target, options),
            Err(err) => {
                trace!("go_to({}) ignored: {}", index, err);
                false
            }
        }
    }

    /// Carry out an intent
    pub fn apply(&mut self, intent: NavigationIntent, options: NavigateOptions) -> bool {
        match intent {
            NavigationIntent::MoveBy(delta) => self.move_by(delta, options),
            NavigationIntent::GoTo(index) => self.go_to(index, options),
            NavigationIntent::NoOp => false,
        }
    }

    fn show(&mut self, index: usize, options: NavigateOptions) -> bool {
        let previous = self.current_index;
        self.current_index = index;
        self.presenter.render_at(index, options);
        self.presenter.highlight_thumbnail(index);
        debug!(
            from = previous,
            to = index,
            instant = options.instant,
            "navigated"
        );
        true
    }

    // =========================================================================
    // Keyboard / Thumbnails
    // =========================================================================

    /// Intent for a key identifier
    pub fn key_intent(&self, key: &str) -> NavigationIntent {
        if self.config.key_back().matches(key) {
            NavigationIntent::MoveBy(-1)
        } else if self.config.key_forth().matches(key) {
            NavigationIntent::MoveBy(1)
        } else {
            NavigationIntent::NoOp
        }
    }

    /// Handle a key press
    ///
    /// Returns true if the key is bound, whether or not the move succeeded.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let intent = self.key_intent(key);
        if intent.is_noop() {
            return false;
        }
        self.apply(intent, NavigateOptions::default());
        true
    }

    /// Handle a click on thumbnail `index`
    pub fn thumbnail_clicked(&mut self, index: usize) -> bool {
        self.go_to(index, NavigateOptions::default())
    }

    // =========================================================================
    // Dragging
    // =========================================================================

    /// Pointer pressed on the track at `pointer_x`
    ///
    /// Returns true if a gesture started. Refused while dragging is disabled or
    /// another gesture is active.
    pub fn drag_start(&mut self, pointer_x: f32) -> bool {
        if !self.config.drag_enabled() {
            trace!("drag_start ignored: dragging disabled");
            return false;
        }

        let offset = self.presenter.visual_offset();
        match self.drag.start(pointer_x, offset) {
            Ok(()) => {
                self.presenter.drag_started();
                trace!(pointer_x, offset, "drag started");
                true
            }
            Err(err) => {
                debug!("drag_start ignored: {}", err);
                false
            }
        }
    }

    /// Pointer moved to `pointer_x` during a gesture
    ///
    /// Returns true if the track was moved.
    pub fn drag_move(&mut self, pointer_x: f32) -> bool {
        match self.drag.update(pointer_x, self.current_index, self.length) {
            Ok(Some(offset)) => {
                self.presenter.set_visual_offset(offset);
                true
            }
            Ok(None) => false,
            Err(err) => {
                trace!("drag_move ignored: {}", err);
                false
            }
        }
    }

    /// Pointer released, at `release_x` if the platform reports a position
    ///
    /// Returns the intent the gesture resolved to, which has already been
    /// applied, or `None` if no gesture was active.
    pub fn drag_end(&mut self, release_x: Option<f32>) -> Option<NavigationIntent> {
        let result = self.drag.finish(
            release_x,
            self.current_index,
            self.length,
            self.config.drag_threshold(),
        );
        match result {
            Ok(intent) => {
                self.presenter.drag_ended();
                trace!(?intent, "drag finished");
                self.apply(intent, NavigateOptions::default());
                Some(intent)
            }
            Err(err) => {
                trace!("drag_end ignored: {}", err);
                None
            }
        }
    }

    /// Drop any active gesture without navigating
    ///
    /// Called when the carousel is detached from its surface.
    pub fn teardown(&mut self) {
        if self.drag.cancel() {
            self.presenter.drag_ended();
            debug!("active drag dropped on teardown");
        }
    }

    // =========================================================================
    // Reconfiguration
    // =========================================================================

    /// Apply a markup attribute change (`None` = attribute removed)
    pub fn set_attribute(&mut self, attribute: Attribute, value: Option<&str>) {
        match attribute {
            Attribute::Index => self.set_index(value),
            _ => {
                if self.config.apply_attribute(attribute, value) {
                    debug!(%attribute, ?value, "attribute changed");
                }
            }
        }
    }

    /// Request `index`
    ///
    /// The request is remembered for the next [`load`](Self::load). With
    /// content loaded it also navigates there, or to 0 when out of range.
    pub fn set_index(&mut self, index: impl IntoIndex) {
        let Some(index) = index.into_index() else {
            trace!("set_index ignored: index is not a number");
            return;
        };
        self.config.set_index(Some(index));
        if self.length > 0 {
            let target = resolve_go_to(index, self.length).unwrap_or(0);
            self.go_to(target, NavigateOptions::default());
        }
    }

    /// Enable or disable wrap-around
    pub fn set_loop(&mut self, looping: bool) {
        self.config.set_loop(looping);
    }

    /// Set the drag threshold; negatives clamp to 0
    pub fn set_drag_threshold(&mut self, threshold: i64) {
        self.config.set_drag_threshold(threshold);
    }

    /// Enable or disable dragging
    ///
    /// A gesture already in progress is allowed to finish.
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.config.set_drag_enabled(enabled);
    }

    /// Rebind the back key
    pub fn set_key_back(&mut self, key: KeyBinding) {
        self.config.set_key_back(key);
    }

    /// Rebind the forth key
    pub fn set_key_forth(&mut self, key: KeyBinding) {
        self.config.set_key_forth(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::ScrollBehavior;

    const WIDTH: f32 = 400.0;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Loaded(usize),
        Render(usize, NavigateOptions),
        Offset(f32),
        Highlight(usize),
        DragStarted,
        DragEnded,
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
        offset: f32,
    }

    impl Recorder {
        fn take(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }
    }

    impl PresentationAdapter for Recorder {
        fn content_loaded(&mut self, length: usize) {
            self.calls.push(Call::Loaded(length));
        }

        fn render_at(&mut self, index: usize, options: NavigateOptions) {
            self.offset = -(index as f32) * WIDTH;
            self.calls.push(Call::Render(index, options));
        }

        fn set_visual_offset(&mut self, offset_px: f32) {
            self.offset = offset_px;
            self.calls.push(Call::Offset(offset_px));
        }

        fn highlight_thumbnail(&mut self, index: usize) {
            self.calls.push(Call::Highlight(index));
        }

        fn visual_offset(&self) -> f32 {
            self.offset
        }

        fn drag_started(&mut self) {
            self.calls.push(Call::DragStarted);
        }

        fn drag_ended(&mut self) {
            self.calls.push(Call::DragEnded);
        }
    }

    fn carousel(config: CarouselConfig, length: usize) -> NavigationController<Recorder> {
        let mut controller = NavigationController::new(config, Recorder::default());
        controller.load(length);
        controller.presenter_mut().take();
        controller
    }

    #[test]
    fn test_load_renders_instantly() {
        let mut controller = NavigationController::new(CarouselConfig::default(), Recorder::default());
        controller.load(3);
        assert_eq!(
            controller.presenter_mut().take(),
            vec![
                Call::Loaded(3),
                Call::Render(0, NavigateOptions::immediate()),
                Call::Highlight(0)
            ]
        );
        assert_eq!(controller.length(), 3);
    }

    #[test]
    fn test_load_applies_configured_index() {
        let controller = carousel(CarouselConfig::new().with_index(2), 5);
        assert_eq!(controller.current_index(), 2);

        let controller = carousel(CarouselConfig::new().with_index(9), 5);
        assert_eq!(controller.current_index(), 0);

        let controller = carousel(CarouselConfig::new().with_index(-1), 5);
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_reload_keeps_position_when_it_fits() {
        let mut controller = carousel(CarouselConfig::default(), 5);
        controller.go_to(3, NavigateOptions::default());
        controller.load(4);
        assert_eq!(controller.current_index(), 3);
        controller.load(2);
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_reload_reports_length_before_render() {
        let mut controller = carousel(CarouselConfig::default(), 2);
        controller.load(6);
        assert_eq!(
            controller.presenter_mut().take(),
            vec![
                Call::Loaded(6),
                Call::Render(0, NavigateOptions::immediate()),
                Call::Highlight(0)
            ]
        );
    }

    #[test]
    fn test_empty_carousel_ignores_navigation() {
        let mut controller = carousel(CarouselConfig::default(), 0);
        assert!(!controller.go_to(0, NavigateOptions::default()));
        assert!(!controller.move_by(1, NavigateOptions::default()));
        assert!(!controller.move_by(0, NavigateOptions::default()));
        assert_eq!(controller.current_index(), 0);
        assert!(controller.presenter().calls.is_empty());
    }

    #[test]
    fn test_go_to_in_and_out_of_range() {
        for length in 1..=6usize {
            let mut controller = carousel(CarouselConfig::default(), length);
            for i in 0..length {
                assert!(controller.go_to(i, NavigateOptions::default()));
                assert_eq!(controller.current_index(), i);
            }
            let before = controller.current_index();
            for i in [-3i64, -1, length as i64, length as i64 + 4] {
                assert!(!controller.go_to(i, NavigateOptions::default()));
                assert_eq!(controller.current_index(), before);
            }
        }
    }

    #[test]
    fn test_go_to_renders_and_highlights() {
        let mut controller = carousel(CarouselConfig::default(), 4);
        let options = NavigateOptions::default().thumbnail_scroll(ScrollBehavior::Instant);
        controller.go_to(2, options);
        assert_eq!(
            controller.presenter_mut().take(),
            vec![Call::Render(2, options), Call::Highlight(2)]
        );
    }

    #[test]
    fn test_move_by_looping_scenario() {
        let mut controller = carousel(CarouselConfig::new().with_loop(true), 5);
        controller.move_by(-1, NavigateOptions::default());
        assert_eq!(controller.current_index(), 4);
    }

    #[test]
    fn test_move_by_non_looping_scenario() {
        let mut controller = carousel(CarouselConfig::new().with_loop(false), 5);
        assert!(!controller.move_by(-1, NavigateOptions::default()));
        assert_eq!(controller.current_index(), 0);
        assert!(controller.presenter().calls.is_empty());
    }

    #[test]
    fn test_move_by_matches_modulo_when_looping() {
        let length = 6usize;
        for start in 0..length {
            for delta in -5i64..=5 {
                let mut controller = carousel(CarouselConfig::new().with_index(start as i64), length);
                controller.move_by(delta, NavigateOptions::default());
                let expected = (start as i64 + delta).rem_euclid(length as i64) as usize;
                assert_eq!(controller.current_index(), expected);
            }
        }
    }

    #[test]
    fn test_degenerate_moves_ignored_regardless_of_loop() {
        for looping in [true, false] {
            let mut controller = carousel(CarouselConfig::new().with_loop(looping).with_index(2), 5);
            for delta in [5i64, -5, 6, -100] {
                assert!(!controller.move_by(delta, NavigateOptions::default()));
                assert_eq!(controller.current_index(), 2);
            }
        }
    }

    #[test]
    fn test_coerced_inputs() {
        let mut controller = carousel(CarouselConfig::default(), 5);
        assert!(controller.go_to("3", NavigateOptions::default()));
        assert_eq!(controller.current_index(), 3);
        assert!(controller.move_by("-2", NavigateOptions::default()));
        assert_eq!(controller.current_index(), 1);
        assert!(controller.go_to(2.7f64, NavigateOptions::default()));
        assert_eq!(controller.current_index(), 2);
        assert!(!controller.go_to("next", NavigateOptions::default()));
        assert!(!controller.move_by(f64::NAN, NavigateOptions::default()));
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_keys() {
        let mut controller = carousel(CarouselConfig::default(), 3);
        assert!(controller.handle_key("ArrowRight"));
        assert_eq!(controller.current_index(), 1);
        assert!(controller.handle_key("ArrowLeft"));
        assert!(controller.handle_key("ArrowLeft"));
        assert_eq!(controller.current_index(), 2);
        assert!(!controller.handle_key("Enter"));
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_disabled_and_rebound_keys() {
        let mut controller = carousel(CarouselConfig::default(), 3);
        controller.set_attribute(Attribute::KeyBack, Some("false"));
        assert!(!controller.handle_key("ArrowLeft"));
        assert_eq!(controller.current_index(), 0);

        controller.set_key_forth(KeyBinding::new("l"));
        assert!(!controller.handle_key("ArrowRight"));
        assert!(controller.handle_key("l"));
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn test_bound_key_reports_handled_even_when_move_refused() {
        let mut controller = carousel(CarouselConfig::new().with_loop(false), 3);
        assert!(controller.handle_key("ArrowLeft"));
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_thumbnail_click() {
        let mut controller = carousel(CarouselConfig::default(), 4);
        assert!(controller.thumbnail_clicked(3));
        assert_eq!(controller.current_index(), 3);
        assert!(!controller.thumbnail_clicked(4));
        assert_eq!(controller.current_index(), 3);
    }

    #[test]
    fn test_drag_disabled_by_default() {
        let mut controller = carousel(CarouselConfig::default(), 5);
        assert!(!controller.drag_start(500.0));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drag_forward_scenario() {
        let config = CarouselConfig::new().with_drag(true).with_index(2);
        let mut controller = carousel(config, 5);

        assert!(controller.drag_start(500.0));
        assert!(controller.drag_move(400.0));
        let intent = controller.drag_end(Some(250.0));

        assert_eq!(intent, Some(NavigationIntent::MoveBy(1)));
        assert_eq!(controller.current_index(), 3);
        assert_eq!(
            controller.presenter_mut().take(),
            vec![
                Call::DragStarted,
                Call::Offset(-900.0),
                Call::DragEnded,
                Call::Render(3, NavigateOptions::default()),
                Call::Highlight(3),
            ]
        );
    }

    #[test]
    fn test_drag_within_threshold_snaps_back() {
        let config = CarouselConfig::new().with_drag(true).with_index(2);
        let mut controller = carousel(config, 5);

        controller.drag_start(500.0);
        controller.drag_move(350.0);
        assert_eq!(controller.drag_end(Some(350.0)), Some(NavigationIntent::GoTo(2)));
        assert_eq!(controller.current_index(), 2);
        assert_eq!(controller.presenter().offset, -800.0);
    }

    #[test]
    fn test_drag_never_wraps() {
        let config = CarouselConfig::new().with_drag(true).with_loop(true);
        let mut controller = carousel(config, 3);

        controller.drag_start(100.0);
        assert_eq!(controller.drag_end(Some(600.0)), Some(NavigationIntent::GoTo(0)));
        assert_eq!(controller.current_index(), 0);

        controller.go_to(2, NavigateOptions::default());
        controller.drag_start(600.0);
        assert!(!controller.drag_move(100.0));
        assert_eq!(controller.drag_end(Some(100.0)), Some(NavigationIntent::GoTo(2)));
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_drag_uses_live_threshold() {
        let config = CarouselConfig::new().with_drag(true);
        let mut controller = carousel(config, 3);
        controller.set_attribute(Attribute::DragThreshold, Some("50"));

        controller.drag_start(300.0);
        controller.drag_end(Some(240.0));
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn test_second_drag_start_ignored() {
        let config = CarouselConfig::new().with_drag(true);
        let mut controller = carousel(config, 3);
        assert!(controller.drag_start(300.0));
        assert!(!controller.drag_start(10.0));
        assert_eq!(
            controller.drag_tracker().gesture().unwrap().initial_pointer_x,
            300.0
        );
    }

    #[test]
    fn test_drag_end_without_gesture() {
        let mut controller = carousel(CarouselConfig::new().with_drag(true), 3);
        assert_eq!(controller.drag_end(Some(10.0)), None);
        assert!(!controller.drag_move(10.0));
        assert!(controller.presenter().calls.is_empty());
    }

    #[test]
    fn test_disabling_drag_lets_active_gesture_finish() {
        let mut controller = carousel(CarouselConfig::new().with_drag(true), 3);
        controller.drag_start(500.0);
        controller.set_drag_enabled(false);
        assert_eq!(controller.drag_end(Some(100.0)), Some(NavigationIntent::MoveBy(1)));
        assert!(!controller.drag_start(500.0));
    }

    #[test]
    fn test_teardown_drops_gesture() {
        let mut controller = carousel(CarouselConfig::new().with_drag(true), 3);
        controller.drag_start(500.0);
        controller.teardown();
        assert!(!controller.is_dragging());
        assert_eq!(controller.presenter_mut().take().last(), Some(&Call::DragEnded));
        assert_eq!(controller.drag_end(Some(0.0)), None);
    }

    #[test]
    fn test_set_index_navigates() {
        let mut controller = carousel(CarouselConfig::default(), 4);
        controller.set_attribute(Attribute::Index, Some("2"));
        assert_eq!(controller.current_index(), 2);
        controller.set_attribute(Attribute::Index, Some("7"));
        assert_eq!(controller.current_index(), 0);
        controller.set_attribute(Attribute::Index, Some("oops"));
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.config().index(), Some(7));
    }

    #[test]
    fn test_set_index_before_load_is_remembered() {
        let mut controller = NavigationController::new(CarouselConfig::default(), Recorder::default());
        controller.set_index(3);
        assert!(controller.presenter().calls.is_empty());
        controller.load(5);
        assert_eq!(controller.current_index(), 3);
    }

    #[test]
    fn test_loop_attribute() {
        let mut controller = carousel(CarouselConfig::default(), 3);
        controller.set_attribute(Attribute::Loop, Some("false"));
        assert!(!controller.move_by(-1, NavigateOptions::default()));
        controller.set_loop(true);
        assert!(controller.move_by(-1, NavigateOptions::default()));
        assert_eq!(controller.current_index(), 2);
    }
}
