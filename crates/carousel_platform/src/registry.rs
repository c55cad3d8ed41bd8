//! Listener registry
//!
//! The host's event surface: window, document, the carousel track, and its
//! thumbnails. Listeners are registered against a `(Target, ListenerKind)`
//! pair and identified by a [`ListenerId`] so they can be removed exactly.
//!
//! The host owns the registry and decides the propagation path for each
//! event, e.g.
//!
//! ```text
//! key press            [Window]
//! press over the track [Track, Document, Window]
//! move / release       [Document, Window]
//! thumbnail click      [Thumbnail(i), Document, Window]
//! ```
//!
//! Listeners may add or remove listeners while an event is being dispatched.
//! Listeners added during a dispatch do not see that event; listeners removed
//! during a dispatch are not called for it.

use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

use crate::input::InputEvent;

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

/// Where a listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The host window (keyboard focus)
    Window,
    /// The whole document (pointer tracking outside the carousel)
    Document,
    /// The carousel's item track
    Track,
    /// A thumbnail, by item index
    Thumbnail(usize),
}

/// Event category a listener receives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Key pressed
    KeyDown,
    /// Mouse button or touch went down
    PointerDown,
    /// Pointer moved
    PointerMove,
    /// Mouse button or touch went up
    PointerUp,
    /// Target activated
    Click,
}

/// Listener callback
///
/// Receives the registry so it can register or release listeners. Uses Rc
/// since input dispatch is single-threaded.
pub type ListenerCallback = Rc<dyn Fn(&InputEvent, &mut ListenerRegistry)>;

/// Wrap a closure as a [`ListenerCallback`]
pub fn listener<F>(callback: F) -> ListenerCallback
where
    F: Fn(&InputEvent, &mut ListenerRegistry) + 'static,
{
    Rc::new(callback)
}

struct Listener {
    target: Target,
    kind: ListenerKind,
    seq: u64,
    callback: ListenerCallback,
}

/// Event targets and their listeners
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: SlotMap<ListenerId, Listener>,
    next_seq: u64,
}

impl ListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `kind` events on `target`
    pub fn add_listener(
        &mut self,
        target: Target,
        kind: ListenerKind,
        callback: ListenerCallback,
    ) -> ListenerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.listeners.insert(Listener {
            target,
            kind,
            seq,
            callback,
        });
        trace!(?target, ?kind, "listener added");
        id
    }

    /// Remove a listener; returns false if it was already gone
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.remove(id) {
            Some(listener) => {
                trace!(target = ?listener.target, kind = ?listener.kind, "listener removed");
                true
            }
            None => false,
        }
    }

    /// Returns true if the listener is registered
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of listeners for `kind` on `target`
    pub fn count(&self, target: Target, kind: ListenerKind) -> usize {
        self.listeners
            .values()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    /// Deliver `event` along `path`
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, path: &[Target], event: &InputEvent) -> usize {
        let Some(kind) = event.kind() else {
            return 0;
        };

        let mut invoked = 0;
        for &target in path {
            let mut matching: SmallVec<[(u64, ListenerId, ListenerCallback); 4]> = self
                .listeners
                .iter()
                .filter(|(_, l)| l.target == target && l.kind == kind)
                .map(|(id, l)| (l.seq, id, l.callback.clone()))
                .collect();
            matching.sort_by_key(|(seq, _, _)| *seq);

            for (_, id, callback) in matching {
                // Removed by an earlier listener in this dispatch
                if !self.listeners.contains_key(id) {
                    continue;
                }
                callback(event, self);
                invoked += 1;
            }
        }
        invoked
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A group of listeners registered and released together
///
/// Owners must hand it back to the registry with [`release`](Self::release);
/// dropping it leaves the listeners in place.
#[derive(Debug, Default)]
pub struct Registration {
    ids: SmallVec<[ListenerId; 4]>,
}

impl Registration {
    /// Create an empty registration
    pub fn new() -> Self {
        Self::default()
    }

    /// Track another listener
    pub fn push(&mut self, id: ListenerId) {
        self.ids.push(id);
    }

    /// Returns true if any listener is held
    pub fn is_active(&self) -> bool {
        !self.ids.is_empty()
    }

    /// Number of listeners held
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no listener is held
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Remove every held listener from `registry`
    ///
    /// Returns how many were still registered.
    pub fn release(&mut self, registry: &mut ListenerRegistry) -> usize {
        self.ids
            .drain(..)
            .filter(|id| registry.remove_listener(*id))
            .count()
    }
}

impl Extend<ListenerId> for Registration {
    fn extend<I: IntoIterator<Item = ListenerId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> ListenerCallback {
        let log = log.clone();
        listener(move |_, _| log.borrow_mut().push(name))
    }

    #[test]
    fn test_dispatch_follows_path_and_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let key_down = ListenerKind::KeyDown;
        registry.add_listener(Target::Window, key_down, recorder(&log, "window"));
        registry.add_listener(Target::Document, key_down, recorder(&log, "doc-1"));
        registry.add_listener(Target::Document, key_down, recorder(&log, "doc-2"));
        registry.add_listener(Target::Track, key_down, recorder(&log, "track"));

        let event = InputEvent::key_pressed(Key::Left);
        let invoked = registry.dispatch(&[Target::Document, Target::Window], &event);

        assert_eq!(invoked, 3);
        assert_eq!(*log.borrow(), vec!["doc-1", "doc-2", "window"]);
    }

    #[test]
    fn test_dispatch_filters_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.add_listener(Target::Window, ListenerKind::Click, recorder(&log, "click"));

        let event = InputEvent::key_pressed(Key::Left);
        let invoked = registry.dispatch(&[Target::Window], &event);
        assert_eq!(invoked, 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_listener_removed_during_dispatch_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let victim = Rc::new(RefCell::new(None::<ListenerId>));

        let victim_for_first = victim.clone();
        let log_for_first = log.clone();
        registry.add_listener(
            Target::Window,
            ListenerKind::Click,
            listener(move |_, registry| {
                log_for_first.borrow_mut().push("first");
                if let Some(id) = *victim_for_first.borrow() {
                    registry.remove_listener(id);
                }
            }),
        );
        let second =
            registry.add_listener(Target::Window, ListenerKind::Click, recorder(&log, "second"));
        *victim.borrow_mut() = Some(second);

        assert_eq!(registry.dispatch(&[Target::Window], &InputEvent::Click), 1);
        assert_eq!(*log.borrow(), vec!["first"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_listener_added_during_dispatch_waits_for_next_event() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();

        let log_for_adder = log.clone();
        registry.add_listener(
            Target::Window,
            ListenerKind::Click,
            listener(move |_, registry| {
                let log = log_for_adder.clone();
                registry.add_listener(
                    Target::Window,
                    ListenerKind::Click,
                    listener(move |_, _| log.borrow_mut().push("late")),
                );
            }),
        );

        assert_eq!(registry.dispatch(&[Target::Window], &InputEvent::Click), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(registry.count(Target::Window, ListenerKind::Click), 2);
    }

    #[test]
    fn test_registration_release() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let mut registration = Registration::new();
        registration.extend([
            registry.add_listener(Target::Document, ListenerKind::PointerMove, recorder(&log, "m")),
            registry.add_listener(Target::Document, ListenerKind::PointerUp, recorder(&log, "u")),
        ]);
        let kept = registry.add_listener(Target::Window, ListenerKind::KeyDown, recorder(&log, "k"));

        assert_eq!(registration.len(), 2);
        assert_eq!(registration.release(&mut registry), 2);
        assert!(!registration.is_active());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(kept));
        assert_eq!(registration.release(&mut registry), 0);
    }
}
