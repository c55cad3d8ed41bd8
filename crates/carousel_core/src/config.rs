//! Carousel configuration
//!
//! Configuration can come from three places: code (the typed setters), a
//! config file (`serde`), or markup-style attributes set after construction
//! ([`Attribute`] + [`CarouselConfig::apply_attribute`]). Every path funnels
//! through the same setters, so invariants like the non-negative drag
//! threshold hold no matter where a value came from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::coerce::parse_int;

/// Default drag distance (px) a release must exceed to navigate
pub const DEFAULT_DRAG_THRESHOLD: u32 = 200;

/// Default key for stepping back
pub const DEFAULT_KEY_BACK: &str = "ArrowLeft";

/// Default key for stepping forth
pub const DEFAULT_KEY_FORTH: &str = "ArrowRight";

/// Attribute value that disables a boolean or key setting
const DISABLED: &str = "false";

// ============================================================================
// Key Bindings
// ============================================================================

/// A key identifier bound to a navigation direction, or disabled
///
/// Identifiers use DOM-style key names (`"ArrowLeft"`, `"a"`, `"PageDown"`).
/// The string `"false"` disables the binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub struct KeyBinding(Option<String>);

impl KeyBinding {
    /// Bind to a key identifier
    pub fn new(identifier: impl Into<String>) -> Self {
        Self::from(identifier.into())
    }

    /// A binding that never matches
    pub fn disabled() -> Self {
        Self(None)
    }

    /// Build from an attribute value; a removed attribute disables the key
    pub fn from_attribute(value: Option<&str>) -> Self {
        value.map(Self::new).unwrap_or_else(Self::disabled)
    }

    /// The bound identifier, if enabled
    pub fn identifier(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns true if a key is bound
    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Returns true if `key` is the bound identifier
    pub fn matches(&self, key: &str) -> bool {
        self.0.as_deref() == Some(key)
    }
}

impl From<String> for KeyBinding {
    fn from(identifier: String) -> Self {
        if identifier == DISABLED {
            Self(None)
        } else {
            Self(Some(identifier))
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(id) => f.write_str(id),
            None => f.write_str("<disabled>"),
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Attribute name not recognized by the carousel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown carousel attribute: {0}")]
pub struct UnknownAttribute(pub String);

/// Settings that can be changed by name after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `index` - initial / current index
    Index,
    /// `loop` - wrap around at the ends
    Loop,
    /// `drag` - pointer dragging enabled
    Drag,
    /// `drag-threshold` - release distance needed to navigate
    DragThreshold,
    /// `key-back` - key for the previous item
    KeyBack,
    /// `key-forth` - key for the next item
    KeyForth,
}

impl Attribute {
    /// All attributes the carousel observes
    pub const ALL: [Attribute; 6] = [
        Attribute::Index,
        Attribute::DragThreshold,
        Attribute::Loop,
        Attribute::Drag,
        Attribute::KeyBack,
        Attribute::KeyForth,
    ];

    /// The attribute's markup name
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Index => "index",
            Attribute::Loop => "loop",
            Attribute::Drag => "drag",
            Attribute::DragThreshold => "drag-threshold",
            Attribute::KeyBack => "key-back",
            Attribute::KeyForth => "key-forth",
        }
    }
}

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Carousel configuration
///
/// Deserializes from TOML/JSON with the field names `index`, `loop`,
/// `drag_threshold`, `drag`, `key_back` and `key_forth`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    index: Option<i64>,
    #[serde(rename = "loop")]
    looping: bool,
    #[serde(deserialize_with = "deserialize_threshold")]
    drag_threshold: u32,
    #[serde(rename = "drag")]
    drag_enabled: bool,
    key_back: KeyBinding,
    key_forth: KeyBinding,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            index: None,
            looping: true,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            drag_enabled: false,
            key_back: KeyBinding::new(DEFAULT_KEY_BACK),
            key_forth: KeyBinding::new(DEFAULT_KEY_FORTH),
        }
    }
}

impl CarouselConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: requested index
    pub fn with_index(mut self, index: i64) -> Self {
        self.set_index(Some(index));
        self
    }

    /// Builder: looping
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.set_loop(looping);
        self
    }

    /// Builder: drag threshold (negative values clamp to 0)
    pub fn with_drag_threshold(mut self, threshold: i64) -> Self {
        self.set_drag_threshold(threshold);
        self
    }

    /// Builder: dragging
    pub fn with_drag(mut self, enabled: bool) -> Self {
        self.set_drag_enabled(enabled);
        self
    }

    /// Builder: key bindings
    pub fn with_keys(mut self, back: KeyBinding, forth: KeyBinding) -> Self {
        self.set_key_back(back);
        self.set_key_forth(forth);
        self
    }

    /// Requested index, applied whenever content is loaded
    pub fn index(&self) -> Option<i64> {
        self.index
    }

    /// Whether moves wrap around the ends
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Distance (px) a drag must exceed to navigate
    pub fn drag_threshold(&self) -> u32 {
        self.drag_threshold
    }

    /// Whether pointer dragging is enabled
    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    /// Key for the previous item
    pub fn key_back(&self) -> &KeyBinding {
        &self.key_back
    }

    /// Key for the next item
    pub fn key_forth(&self) -> &KeyBinding {
        &self.key_forth
    }

    /// Set the requested index
    pub fn set_index(&mut self, index: Option<i64>) {
        self.index = index;
    }

    /// Set looping
    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Set the drag threshold, clamping negatives to 0
    pub fn set_drag_threshold(&mut self, threshold: i64) {
        self.drag_threshold = clamp_threshold(threshold);
    }

    /// Enable or disable dragging
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.drag_enabled = enabled;
    }

    /// Set the back key
    pub fn set_key_back(&mut self, key: KeyBinding) {
        self.key_back = key;
    }

    /// Set the forth key
    pub fn set_key_forth(&mut self, key: KeyBinding) {
        self.key_forth = key;
    }

    /// Apply a markup attribute change
    ///
    /// `None` means the attribute was removed. Unparseable numbers leave the
    /// setting unchanged. Returns true if the configuration changed.
    pub fn apply_attribute(&mut self, attribute: Attribute, value: Option<&str>) -> bool {
        let before = self.clone();
        match attribute {
            Attribute::Index => {
                if let Some(index) = value.and_then(parse_int) {
                    self.set_index(Some(index));
                }
            }
            Attribute::Loop => self.set_loop(value != Some(DISABLED)),
            Attribute::Drag => self.set_drag_enabled(value != Some(DISABLED)),
            Attribute::DragThreshold => {
                if let Some(threshold) = value.and_then(parse_int) {
                    self.set_drag_threshold(threshold);
                }
            }
            Attribute::KeyBack => self.set_key_back(KeyBinding::from_attribute(value)),
            Attribute::KeyForth => self.set_key_forth(KeyBinding::from_attribute(value)),
        }
        *self != before
    }
}

fn clamp_threshold(threshold: i64) -> u32 {
    u32::try_from(threshold.max(0)).unwrap_or(u32::MAX)
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_threshold)
}
