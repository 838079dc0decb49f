//! Element model: canonical states, string properties, and the handle
//! capability the engine is driven through.
//!
//! The engine never talks to a real UI backend. Everything it knows about an
//! element arrives through [`ElementHandle`], implemented by whatever driver
//! hosts the tests (a mock, an accessibility bridge, a remote agent).

use serde::{Deserialize, Serialize};

// =============================================================================
// ELEMENT STATE
// =============================================================================

/// Canonical boolean states of a UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementState {
    /// Element is present in the hierarchy
    Exists,
    /// Element can receive a tap/click at its current position
    Hittable,
    /// Element accepts interaction
    Enabled,
    /// Element is in its selected state
    Selected,
    /// Element has keyboard focus
    Focused,
}

impl ElementState {
    /// All states, in message-table order
    pub const ALL: [Self; 5] = [
        Self::Exists,
        Self::Hittable,
        Self::Enabled,
        Self::Selected,
        Self::Focused,
    ];

    /// Get the state name used in diagnostics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Hittable => "hittable",
            Self::Enabled => "enabled",
            Self::Selected => "selected",
            Self::Focused => "focused",
        }
    }

    /// Phrase describing the expected condition for this state.
    ///
    /// Used by activity scopes: "Verifying if the Login button `is enabled`".
    /// The table is exhaustive over every `(state, expected)` pair.
    #[must_use]
    pub const fn expectation_phrase(&self, expected: bool) -> &'static str {
        match (*self, expected) {
            (Self::Exists, true) => "exists",
            (Self::Exists, false) => "doesn't exist",
            (Self::Hittable, true) => "is hittable",
            (Self::Hittable, false) => "isn't hittable",
            (Self::Enabled, true) => "is enabled",
            (Self::Enabled, false) => "is disabled",
            (Self::Selected, true) => "is selected",
            (Self::Selected, false) => "isn't selected",
            (Self::Focused, true) => "has focus",
            (Self::Focused, false) => "has no focus",
        }
    }

    /// Phrase describing the unwanted condition actually observed when an
    /// assertion on this state fails: the inverse pairing of
    /// [`expectation_phrase`](Self::expectation_phrase).
    ///
    /// Expecting existence and not finding it reads "doesn't exist";
    /// expecting absence and finding the element reads "exists".
    #[must_use]
    pub const fn failure_phrase(&self, expected: bool) -> &'static str {
        self.expectation_phrase(!expected)
    }
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// PROPERTY
// =============================================================================

/// Canonical string-valued attributes of a UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// Visible label text
    Label,
    /// Current value (text fields, sliders rendered as text)
    Value,
    /// Placeholder shown while the value is empty
    PlaceholderValue,
}

impl Property {
    /// Get the property name used in diagnostics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Value => "value",
            Self::PlaceholderValue => "placeholderValue",
        }
    }

    /// Phrase describing the expected comparison, e.g.
    /// "label is equal to Submit" / "value isn't equal to Jane Doe".
    #[must_use]
    pub fn phrase(&self, expected: bool, equal_to: &str) -> String {
        format!(
            "{} {} equal to {}",
            self.as_str(),
            if expected { "is" } else { "isn't" },
            equal_to
        )
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// ELEMENT HANDLE
// =============================================================================

/// Capability trait for a queryable UI element.
///
/// Boolean accessors mirror [`ElementState`]; string accessors mirror
/// [`Property`] plus the identifier used by predicate queries. `label` and
/// `identifier` are always present (possibly empty); `value` and
/// `placeholder_value` may be absent or non-string on the backend, surfacing
/// here as `None`.
pub trait ElementHandle {
    /// Whether the element is present in the hierarchy
    fn exists(&self) -> bool;

    /// Whether the element can be hit at its current position
    fn is_hittable(&self) -> bool;

    /// Whether the element accepts interaction
    fn is_enabled(&self) -> bool;

    /// Whether the element is selected
    fn is_selected(&self) -> bool;

    /// Whether the element has keyboard focus
    fn has_focus(&self) -> bool;

    /// Visible label text
    fn label(&self) -> String;

    /// Accessibility identifier
    fn identifier(&self) -> String;

    /// Current value, if string-typed
    fn value(&self) -> Option<String>;

    /// Placeholder value, if any
    fn placeholder_value(&self) -> Option<String>;

    /// Human-readable description for diagnostics ("Login button")
    fn description(&self) -> String;

    /// Read a canonical boolean state
    fn state(&self, state: ElementState) -> bool {
        match state {
            ElementState::Exists => self.exists(),
            ElementState::Hittable => self.is_hittable(),
            ElementState::Enabled => self.is_enabled(),
            ElementState::Selected => self.is_selected(),
            ElementState::Focused => self.has_focus(),
        }
    }

    /// Read a canonical string property
    fn property(&self, property: Property) -> Option<String> {
        match property {
            Property::Label => Some(self.label()),
            Property::Value => self.value(),
            Property::PlaceholderValue => self.placeholder_value(),
        }
    }
}
