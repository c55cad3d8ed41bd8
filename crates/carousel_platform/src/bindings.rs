//! Input bindings
//!
//! Connects a [`NavigationController`] to a [`ListenerRegistry`]:
//!
//! - keydown on [`Target::Window`] for the back/forth keys
//! - pointer-down on [`Target::Track`] while dragging is enabled
//! - click on each [`Target::Thumbnail`]
//! - pointer move/up on [`Target::Document`], only for the lifetime of a drag
//!
//! Every listener is tracked in a [`Registration`] and released by
//! [`InputBindings::detach`]. Listeners hold weak references, so if the
//! bindings are dropped without detaching, stale listeners do nothing.
//!
//! # Example
//!
//! ```ignore
//! let bindings = InputBindings::new(NavigationController::new(config, presenter));
//! let mut registry = ListenerRegistry::new();
//!
//! bindings.attach(&mut registry)?;
//! bindings.load(&mut registry, items.len());
//!
//! // From the platform event loop
//! registry.dispatch(&[Target::Window], &InputEvent::key_pressed(Key::Right));
//!
//! // When the carousel goes away
//! bindings.detach(&mut registry)?;
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use carousel_core::{Attribute, NavigationController, PresentationAdapter};
use tracing::{debug, trace, warn};

use crate::error::{PlatformError, Result};
use crate::input::{InputEvent, PointerId};
use crate::registry::{listener, ListenerCallback, ListenerKind, ListenerRegistry, Registration, Target};

/// Controller shared between the host and its listeners
pub type SharedController<P> = Rc<RefCell<NavigationController<P>>>;

type WeakController<P> = Weak<RefCell<NavigationController<P>>>;

#[derive(Debug, Default)]
struct BindingState {
    attached: bool,
    keyboard: Registration,
    track: Registration,
    gesture: Registration,
    thumbnails: Registration,
    /// Pointer that owns the active gesture
    pointer: Option<PointerId>,
}

/// Routes registry events into a navigation controller
pub struct InputBindings<P: PresentationAdapter + 'static> {
    controller: SharedController<P>,
    state: Rc<RefCell<BindingState>>,
}

impl<P: PresentationAdapter + 'static> InputBindings<P> {
    /// Wrap a controller; nothing is registered until [`attach`](Self::attach)
    pub fn new(controller: NavigationController<P>) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
            state: Rc::new(RefCell::new(BindingState::default())),
        }
    }

    /// Shared handle to the controller
    pub fn controller(&self) -> SharedController<P> {
        self.controller.clone()
    }

    /// Run `f` with the controller borrowed mutably
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut NavigationController<P>) -> R) -> R {
        f(&mut self.controller.borrow_mut())
    }

    /// Returns true while attached to a registry
    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    /// The pointer driving the active drag, if any
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.state.borrow().pointer
    }

    /// Register keyboard, track, and thumbnail listeners
    pub fn attach(&self, registry: &mut ListenerRegistry) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            if state.attached {
                return Err(PlatformError::AlreadyAttached);
            }
            state.attached = true;
            let id = registry.add_listener(
                Target::Window,
                ListenerKind::KeyDown,
                keyboard_listener(Rc::downgrade(&self.controller)),
            );
            state.keyboard.push(id);
        }

        self.sync_track(registry);
        self.register_thumbnails(registry);
        debug!("input bindings attached");
        Ok(())
    }

    /// Release every listener and drop any active gesture
    pub fn detach(&self, registry: &mut ListenerRegistry) -> Result<()> {
        let released = {
            let mut state = self.state.borrow_mut();
            if !state.attached {
                return Err(PlatformError::NotAttached);
            }
            state.attached = false;
            state.pointer = None;
            state.keyboard.release(registry)
                + state.track.release(registry)
                + state.gesture.release(registry)
                + state.thumbnails.release(registry)
        };

        self.controller.borrow_mut().teardown();
        debug!(released, "input bindings detached");
        Ok(())
    }

    /// Replace the content with `length` items
    pub fn load(&self, registry: &mut ListenerRegistry, length: usize) {
        self.controller.borrow_mut().load(length);
        if self.is_attached() {
            self.register_thumbnails(registry);
        }
    }

    /// Apply an attribute change, keeping the track listener in sync
    pub fn set_attribute(
        &self,
        registry: &mut ListenerRegistry,
        attribute: Attribute,
        value: Option<&str>,
    ) {
        self.controller.borrow_mut().set_attribute(attribute, value);
        if attribute == Attribute::Drag {
            self.sync_track(registry);
        }
    }

    /// Apply an attribute change by name
    pub fn set_attribute_str(
        &self,
        registry: &mut ListenerRegistry,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        let attribute = name.parse::<Attribute>()?;
        self.set_attribute(registry, attribute, value);
        Ok(())
    }

    /// Enable or disable dragging
    pub fn set_drag_enabled(&self, registry: &mut ListenerRegistry, enabled: bool) {
        self.controller.borrow_mut().set_drag_enabled(enabled);
        self.sync_track(registry);
    }

    fn sync_track(&self, registry: &mut ListenerRegistry) {
        let enabled = self.controller.borrow().config().drag_enabled();
        let mut state = self.state.borrow_mut();
        if !state.attached {
            return;
        }

        if enabled && !state.track.is_active() {
            let id = registry.add_listener(
                Target::Track,
                ListenerKind::PointerDown,
                track_listener(Rc::downgrade(&self.controller), Rc::downgrade(&self.state)),
            );
            state.track.push(id);
        } else if !enabled && state.track.is_active() {
            state.track.release(registry);
        }
    }

    fn register_thumbnails(&self, registry: &mut ListenerRegistry) {
        let length = self.controller.borrow().length();
        let mut state = self.state.borrow_mut();
        state.thumbnails.release(registry);
        for index in 0..length {
            let id = registry.add_listener(
                Target::Thumbnail(index),
                ListenerKind::Click,
                thumbnail_listener(Rc::downgrade(&self.controller), index),
            );
            state.thumbnails.push(id);
        }
    }
}

impl<P: PresentationAdapter + 'static> Drop for InputBindings<P> {
    fn drop(&mut self) {
        if let Ok(state) = self.state.try_borrow() {
            if state.attached {
                warn!("input bindings dropped while attached; listeners stay registered but inert");
            }
        }
    }
}

impl<P: PresentationAdapter + 'static> std::fmt::Debug for InputBindings<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBindings")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Listeners
// ============================================================================

fn keyboard_listener<P: PresentationAdapter + 'static>(
    controller: WeakController<P>,
) -> ListenerCallback {
    listener(move |event, _| {
        let InputEvent::Keyboard(key_event) = event else {
            return;
        };
        // Leave ctrl/meta chords to the host's shortcuts
        if key_event.modifiers.is_shortcut() {
            trace!(key = ?key_event.key, "key down ignored: shortcut modifier held");
            return;
        }
        let Some(controller) = controller.upgrade() else {
            return;
        };
        let handled = controller
            .borrow_mut()
            .handle_key(&key_event.key.identifier());
        trace!(key = ?key_event.key, handled, "key down");
    })
}

fn thumbnail_listener<P: PresentationAdapter + 'static>(
    controller: WeakController<P>,
    index: usize,
) -> ListenerCallback {
    listener(move |_, _| {
        if let Some(controller) = controller.upgrade() {
            controller.borrow_mut().thumbnail_clicked(index);
        }
    })
}

fn track_listener<P: PresentationAdapter + 'static>(
    controller: WeakController<P>,
    state: Weak<RefCell<BindingState>>,
) -> ListenerCallback {
    listener(move |event, registry| {
        let Some(sample) = event.pointer_sample() else {
            return;
        };
        let Some(x) = sample.x else {
            return;
        };
        let (Some(shared_controller), Some(shared_state)) = (controller.upgrade(), state.upgrade())
        else {
            return;
        };

        if shared_state.borrow().pointer.is_some() {
            trace!(pointer = ?sample.pointer, "press ignored: gesture already active");
            return;
        }
        if !shared_controller.borrow_mut().drag_start(x) {
            return;
        }

        let mut binding = shared_state.borrow_mut();
        binding.pointer = Some(sample.pointer);
        let move_id = registry.add_listener(
            Target::Document,
            ListenerKind::PointerMove,
            gesture_move_listener(controller.clone(), state.clone()),
        );
        let up_id = registry.add_listener(
            Target::Document,
            ListenerKind::PointerUp,
            gesture_up_listener(controller.clone(), state.clone()),
        );
        binding.gesture.extend([move_id, up_id]);
    })
}

fn gesture_move_listener<P: PresentationAdapter + 'static>(
    controller: WeakController<P>,
    state: Weak<RefCell<BindingState>>,
) -> ListenerCallback {
    listener(move |event, _| {
        let Some(sample) = event.pointer_sample() else {
            return;
        };
        let (Some(controller), Some(state)) = (controller.upgrade(), state.upgrade()) else {
            return;
        };
        if state.borrow().pointer != Some(sample.pointer) {
            return;
        }
        if let Some(x) = sample.x {
            controller.borrow_mut().drag_move(x);
        }
    })
}

fn gesture_up_listener<P: PresentationAdapter + 'static>(
    controller: WeakController<P>,
    state: Weak<RefCell<BindingState>>,
) -> ListenerCallback {
    listener(move |event, registry| {
        let Some(sample) = event.pointer_sample() else {
            return;
        };
        let (Some(controller), Some(state)) = (controller.upgrade(), state.upgrade()) else {
            return;
        };

        {
            let mut binding = state.borrow_mut();
            if binding.pointer != Some(sample.pointer) {
                return;
            }
            binding.pointer = None;
            binding.gesture.release(registry);
        }

        let intent = controller.borrow_mut().drag_end(sample.x);
        trace!(?intent, "gesture released");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{
        Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent, TouchEvent,
    };
    use carousel_core::{CarouselConfig, NavigateOptions};

    const TRACK: [Target; 3] = [Target::Track, Target::Document, Target::Window];
    const DOCUMENT: [Target; 2] = [Target::Document, Target::Window];

    #[derive(Debug, Default)]
    struct Track {
        offset: f32,
        highlighted: Option<usize>,
    }

    impl PresentationAdapter for Track {
        fn render_at(&mut self, index: usize, _options: NavigateOptions) {
            self.offset = -(index as f32) * 100.0;
        }

        fn set_visual_offset(&mut self, offset_px: f32) {
            self.offset = offset_px;
        }

        fn highlight_thumbnail(&mut self, index: usize) {
            self.highlighted = Some(index);
        }

        fn visual_offset(&self) -> f32 {
            self.offset
        }
    }

    fn attached(config: CarouselConfig, length: usize) -> (InputBindings<Track>, ListenerRegistry) {
        let bindings = InputBindings::new(NavigationController::new(config, Track::default()));
        let mut registry = ListenerRegistry::new();
        bindings.attach(&mut registry).unwrap();
        bindings.load(&mut registry, length);
        (bindings, registry)
    }

    fn index(bindings: &InputBindings<Track>) -> usize {
        bindings.with_controller(|c| c.current_index())
    }

    fn press(x: f32) -> InputEvent {
        InputEvent::Mouse(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x,
            y: 0.0,
        })
    }

    fn moved(x: f32) -> InputEvent {
        InputEvent::Mouse(MouseEvent::Moved { x, y: 0.0 })
    }

    fn release(x: f32) -> InputEvent {
        InputEvent::Mouse(MouseEvent::ButtonReleased {
            button: MouseButton::Left,
            x,
            y: 0.0,
        })
    }

    #[test]
    fn test_attach_registers_listeners() {
        let (_bindings, registry) = attached(CarouselConfig::default(), 3);
        assert_eq!(registry.count(Target::Window, ListenerKind::KeyDown), 1);
        assert_eq!(registry.count(Target::Track, ListenerKind::PointerDown), 0);
        for i in 0..3 {
            assert_eq!(registry.count(Target::Thumbnail(i), ListenerKind::Click), 1);
        }
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_attach_twice_and_detach_twice() {
        let (bindings, mut registry) = attached(CarouselConfig::default(), 1);
        assert_eq!(bindings.attach(&mut registry), Err(PlatformError::AlreadyAttached));
        assert!(bindings.detach(&mut registry).is_ok());
        assert_eq!(bindings.detach(&mut registry), Err(PlatformError::NotAttached));
    }

    #[test]
    fn test_keyboard_navigation() {
        let (bindings, mut registry) = attached(CarouselConfig::default(), 3);
        registry.dispatch(&[Target::Window], &InputEvent::key_pressed(Key::Right));
        assert_eq!(index(&bindings), 1);
        registry.dispatch(&[Target::Window], &InputEvent::key_pressed(Key::Left));
        registry.dispatch(&[Target::Window], &InputEvent::key_pressed(Key::Left));
        assert_eq!(index(&bindings), 2);
        registry.dispatch(&[Target::Window], &InputEvent::key_pressed(Key::Enter));
        assert_eq!(index(&bindings), 2);
    }

    #[test]
    fn test_shortcut_chords_do_not_navigate() {
        let (bindings, mut registry) = attached(CarouselConfig::default(), 3);
        let chord = |ctrl, meta, shift| {
            InputEvent::Keyboard(KeyboardEvent {
                key: Key::Right,
                state: KeyState::Pressed,
                modifiers: Modifiers {
                    ctrl,
                    meta,
                    shift,
                    alt: false,
                },
            })
        };

        registry.dispatch(&[Target::Window], &chord(true, false, false));
        registry.dispatch(&[Target::Window], &chord(false, true, false));
        assert_eq!(index(&bindings), 0);

        registry.dispatch(&[Target::Window], &chord(false, false, true));
        assert_eq!(index(&bindings), 1);
    }

    #[test]
    fn test_thumbnail_click() {
        let (bindings, mut registry) = attached(CarouselConfig::default(), 4);
        registry.dispatch(&[Target::Thumbnail(3), Target::Document], &InputEvent::Click);
        assert_eq!(index(&bindings), 3);
        assert_eq!(bindings.with_controller(|c| c.presenter().highlighted), Some(3));
    }

    #[test]
    fn test_reload_rebinds_thumbnails() {
        let (bindings, mut registry) = attached(CarouselConfig::default(), 4);
        bindings.load(&mut registry, 2);
        assert_eq!(registry.count(Target::Thumbnail(3), ListenerKind::Click), 0);
        assert_eq!(registry.count(Target::Thumbnail(1), ListenerKind::Click), 1);
    }

    #[test]
    fn test_drag_registers_and_releases_document_listeners() {
        let (bindings, mut registry) = attached(CarouselConfig::new().with_drag(true), 5);
        let resting = registry.len();

        registry.dispatch(&TRACK, &press(500.0));
        assert_eq!(registry.count(Target::Document, ListenerKind::PointerMove), 1);
        assert_eq!(registry.count(Target::Document, ListenerKind::PointerUp), 1);
        assert_eq!(bindings.active_pointer(), Some(PointerId::Mouse));

        registry.dispatch(&DOCUMENT, &moved(420.0));
        assert_eq!(bindings.with_controller(|c| c.presenter().offset), -80.0);

        registry.dispatch(&DOCUMENT, &release(250.0));
        assert_eq!(index(&bindings), 1);
        assert_eq!(registry.len(), resting);
        assert_eq!(bindings.active_pointer(), None);
    }

    #[test]
    fn test_moves_without_press_do_nothing() {
        let (bindings, mut registry) = attached(CarouselConfig::new().with_drag(true), 5);
        assert_eq!(registry.dispatch(&DOCUMENT, &moved(10.0)), 0);
        assert_eq!(registry.dispatch(&DOCUMENT, &release(10.0)), 0);
        assert_eq!(index(&bindings), 0);
    }

    #[test]
    fn test_press_outside_track_does_not_drag() {
        let (bindings, mut registry) = attached(CarouselConfig::new().with_drag(true), 5);
        registry.dispatch(&DOCUMENT, &press(500.0));
        registry.dispatch(&DOCUMENT, &release(100.0));
        assert_eq!(index(&bindings), 0);
    }

    #[test]
    fn test_other_pointers_cannot_hijack_gesture() {
        let (bindings, mut registry) = attached(CarouselConfig::new().with_drag(true), 5);
        let touch_start = InputEvent::Touch(TouchEvent::Started { id: 1, x: 500.0, y: 0.0 });
        let other_start = InputEvent::Touch(TouchEvent::Started { id: 2, x: 10.0, y: 0.0 });
        let other_end = InputEvent::Touch(TouchEvent::Ended { id: 2, x: 900.0, y: 0.0 });
        let touch_end = InputEvent::Touch(TouchEvent::Ended { id: 1, x: 200.0, y: 0.0 });

        registry.dispatch(&TRACK, &touch_start);
        registry.dispatch(&TRACK, &other_start);
        registry.dispatch(&DOCUMENT, &other_end);
        assert_eq!(bindings.active_pointer(), Some(PointerId::Touch(1)));
        assert_eq!(index(&bindings), 0);

        registry.dispatch(&DOCUMENT, &touch_end);
        assert_eq!(index(&bindings), 1);
        assert_eq!(bindings.active_pointer(), None);
    }

    #[test]
    fn test_touch_cancel_resolves_from_last_sample() {
        let (bindings, mut registry) = attached(CarouselConfig::new().with_drag(true), 5);
        registry.dispatch(&TRACK, &InputEvent::Touch(TouchEvent::Started { id: 4, x: 500.0, y: 0.0 }));
        registry.dispatch(&DOCUMENT, &InputEvent::Touch(TouchEvent::Moved { id: 4, x: 450.0, y: 0.0 }));
        registry.dispatch(&DOCUMENT, &InputEvent::Touch(TouchEvent::Cancelled { id: 4 }));
        assert_eq!(index(&bindings), 0);
        assert!(!bindings.with_controller(|c| c.is_dragging()));
    }

    #[test]
    fn test_drag_attribute_toggles_track_listener() {
        let (bindings, mut registry) = attached(CarouselConfig::default(), 3);
        bindings.set_attribute(&mut registry, Attribute::Drag, Some(""));
        assert_eq!(registry.count(Target::Track, ListenerKind::PointerDown), 1);
        bindings.set_attribute(&mut registry, Attribute::Drag, Some("true"));
        assert_eq!(registry.count(Target::Track, ListenerKind::PointerDown), 1);
        bindings.set_attribute_str(&mut registry, "drag", Some("false")).unwrap();
        assert_eq!(registry.count(Target::Track, ListenerKind::PointerDown), 0);
        bindings.set_drag_enabled(&mut registry, true);
        assert_eq!(registry.count(Target::Track, ListenerKind::PointerDown), 1);
    }

    #[test]
    fn test_unknown_attribute() {
        let (bindings, mut registry) = attached(CarouselConfig::default(), 3);
        assert!(matches!(
            bindings.set_attribute_str(&mut registry, "autoplay", Some("true")),
            Err(PlatformError::Attribute(_))
        ));
    }

    #[test]
    fn test_detach_releases_everything_mid_drag() {
        let (bindings, mut registry) = attached(CarouselConfig::new().with_drag(true), 5);
        registry.dispatch(&TRACK, &press(500.0));
        assert!(bindings.with_controller(|c| c.is_dragging()));

        bindings.detach(&mut registry).unwrap();
        assert!(registry.is_empty());
        assert!(!bindings.with_controller(|c| c.is_dragging()));

        registry.dispatch(&[Target::Window], &InputEvent::key_pressed(Key::Right));
        registry.dispatch(&DOCUMENT, &release(100.0));
        assert_eq!(index(&bindings), 0);
    }

    #[test]
    fn test_dropped_bindings_leave_inert_listeners() {
        let (bindings, mut registry) = attached(CarouselConfig::default(), 3);
        let controller = bindings.controller();
        drop(bindings);
        drop(controller);
        assert_eq!(registry.dispatch(&[Target::Window], &InputEvent::key_pressed(Key::Right)), 1);
    }
}
