//! Input event types for keyboard, mouse, and touch

use std::borrow::Cow;

use crate::registry::ListenerKind;

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse event
    Mouse(MouseEvent),
    /// Keyboard event
    Keyboard(KeyboardEvent),
    /// Touch event (mobile/touchscreen)
    Touch(TouchEvent),
    /// Activation of the target (synthesized by the host from press + release)
    Click,
}

impl InputEvent {
    /// Convenience constructor for a key press
    pub fn key_pressed(key: Key) -> Self {
        InputEvent::Keyboard(KeyboardEvent {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
        })
    }

    /// The listener kind this event is delivered to, if any
    pub fn kind(&self) -> Option<ListenerKind> {
        match self {
            InputEvent::Keyboard(event) if event.state == KeyState::Pressed => {
                Some(ListenerKind::KeyDown)
            }
            InputEvent::Keyboard(_) => None,
            InputEvent::Click => Some(ListenerKind::Click),
            _ => self.pointer_sample().map(|sample| sample.phase.listener_kind()),
        }
    }

    /// Single-pointer view of a mouse or touch event
    ///
    /// Only the primary mouse button produces presses and releases.
    pub fn pointer_sample(&self) -> Option<PointerSample> {
        match self {
            InputEvent::Mouse(MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                x,
                ..
            }) => Some(PointerSample::new(PointerId::Mouse, PointerPhase::Down, Some(*x))),
            InputEvent::Mouse(MouseEvent::Moved { x, .. }) => {
                Some(PointerSample::new(PointerId::Mouse, PointerPhase::Move, Some(*x)))
            }
            InputEvent::Mouse(MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                x,
                ..
            }) => Some(PointerSample::new(PointerId::Mouse, PointerPhase::Up, Some(*x))),
            InputEvent::Touch(touch) => {
                let phase = match touch {
                    TouchEvent::Started { .. } => PointerPhase::Down,
                    TouchEvent::Moved { .. } => PointerPhase::Move,
                    TouchEvent::Ended { .. } | TouchEvent::Cancelled { .. } => PointerPhase::Up,
                };
                let x = touch.position().map(|(x, _)| x);
                Some(PointerSample::new(PointerId::Touch(touch.id()), phase, x))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Pointer Samples
// ============================================================================

/// Which physical pointer produced a sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    /// The mouse
    Mouse,
    /// A touch point, by platform id
    Touch(u64),
}

/// Press / move / release
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer went down
    Down,
    /// Pointer moved
    Move,
    /// Pointer went up (or the touch was cancelled)
    Up,
}

impl PointerPhase {
    fn listener_kind(self) -> ListenerKind {
        match self {
            PointerPhase::Down => ListenerKind::PointerDown,
            PointerPhase::Move => ListenerKind::PointerMove,
            PointerPhase::Up => ListenerKind::PointerUp,
        }
    }
}

/// Horizontal pointer sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Source pointer
    pub pointer: PointerId,
    /// Phase of the gesture
    pub phase: PointerPhase,
    /// X position in window coordinates, if the platform reported one
    pub x: Option<f32>,
}

impl PointerSample {
    fn new(pointer: PointerId, phase: PointerPhase, x: Option<f32>) -> Self {
        Self { pointer, phase, x }
    }
}

// ============================================================================
// Mouse Events
// ============================================================================

/// Mouse events
#[derive(Clone, Debug, PartialEq)]
pub enum MouseEvent {
    /// Mouse moved to position
    Moved {
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// Mouse button pressed
    ButtonPressed {
        /// Which button was pressed
        button: MouseButton,
        /// X position when pressed
        x: f32,
        /// Y position when pressed
        y: f32,
    },
    /// Mouse button released
    ButtonReleased {
        /// Which button was released
        button: MouseButton,
        /// X position when released
        x: f32,
        /// Y position when released
        y: f32,
    },
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Other button with index
    Other(u16),
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Whether the key was pressed or released
    pub state: KeyState,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed
    Pressed,
    /// Key was released
    Released,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Returns true if no modifier is held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Returns true if ctrl or meta is held (an application shortcut)
    pub fn is_shortcut(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys
///
/// Named keys map to DOM-style identifiers, which is what carousel key
/// bindings are written in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing / control
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,

    // Character input
    Char(char),

    // Unknown key
    Unknown,
}

const NAMED_KEYS: [(Key, &str); 14] = [
    (Key::Left, "ArrowLeft"),
    (Key::Right, "ArrowRight"),
    (Key::Up, "ArrowUp"),
    (Key::Down, "ArrowDown"),
    (Key::Home, "Home"),
    (Key::End, "End"),
    (Key::PageUp, "PageUp"),
    (Key::PageDown, "PageDown"),
    (Key::Space, " "),
    (Key::Enter, "Enter"),
    (Key::Escape, "Escape"),
    (Key::Backspace, "Backspace"),
    (Key::Tab, "Tab"),
    (Key::Delete, "Delete"),
];

impl Key {
    /// DOM-style identifier (`"ArrowLeft"`, `"a"`, `" "`)
    pub fn identifier(&self) -> Cow<'static, str> {
        match self {
            Key::Char(c) => Cow::Owned(c.to_string()),
            Key::Unknown => Cow::Borrowed("Unidentified"),
            named => NAMED_KEYS
                .iter()
                .find(|(key, _)| key == named)
                .map(|(_, id)| Cow::Borrowed(*id))
                .unwrap_or(Cow::Borrowed("Unidentified")),
        }
    }

    /// Parse a DOM-style identifier; single characters become [`Key::Char`]
    pub fn from_identifier(identifier: &str) -> Key {
        if let Some((key, _)) = NAMED_KEYS.iter().find(|(_, id)| *id == identifier) {
            return key.clone();
        }
        let mut chars = identifier.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ => Key::Unknown,
        }
    }
}

// ============================================================================
// Touch Events
// ============================================================================

/// Touch events for touchscreens
#[derive(Clone, Debug, PartialEq)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// A touch moved
    Moved {
        /// Unique identifier for this touch
        id: u64,
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// A touch ended
    Ended {
        /// Unique identifier for this touch
        id: u64,
        /// X position when ended
        x: f32,
        /// Y position when ended
        y: f32,
    },
    /// A touch was cancelled (e.g., by system gesture)
    Cancelled {
        /// Unique identifier for this touch
        id: u64,
    },
}

impl TouchEvent {
    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id, .. } => *id,
            TouchEvent::Cancelled { id } => *id,
        }
    }

    /// Get the position (returns None for Cancelled)
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            TouchEvent::Started { x, y, .. } => Some((*x, *y)),
            TouchEvent::Moved { x, y, .. } => Some((*x, *y)),
            TouchEvent::Ended { x, y, .. } => Some((*x, *y)),
            TouchEvent::Cancelled { .. } => None,
        }
    }
}
