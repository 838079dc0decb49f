//! Mock elements for testing verification flows without a UI backend.
//!
//! [`MockElement`] is a scriptable [`ElementHandle`] whose state lives behind
//! an `Arc<Mutex<_>>`: clones share it, so a test can flip a state or rewrite
//! a label from another thread while a wait is polling.

use std::sync::{Arc, Mutex};

use crate::element::{ElementHandle, ElementState};

#[derive(Debug, Clone)]
struct MockElementState {
    exists: bool,
    hittable: bool,
    enabled: bool,
    selected: bool,
    focused: bool,
    label: String,
    identifier: String,
    value: Option<String>,
    placeholder_value: Option<String>,
    description: String,
}

/// A scriptable element handle backed by shared mutable state.
///
/// New elements start present, hittable, and enabled, like an ordinary
/// interactive control. Builder methods configure the starting state;
/// `set_*` methods mutate it live through any clone.
///
/// # Example
///
/// ```
/// use verificar::mock::MockElement;
/// use verificar::{ElementHandle, ElementState};
///
/// let button = MockElement::new("Login button").with_label("Login");
/// let shared = button.clone();
/// shared.set_state(ElementState::Enabled, false);
/// assert!(!button.is_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct MockElement {
    shared: Arc<Mutex<MockElementState>>,
}

impl MockElement {
    /// Create an element that exists, is hittable, and is enabled
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(MockElementState {
                exists: true,
                hittable: true,
                enabled: true,
                selected: false,
                focused: false,
                label: String::new(),
                identifier: String::new(),
                value: None,
                placeholder_value: None,
                description: description.into(),
            })),
        }
    }

    /// Set the starting label
    #[must_use]
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.shared.lock().unwrap().label = label.into();
        self
    }

    /// Set the starting identifier
    #[must_use]
    pub fn with_identifier(self, identifier: impl Into<String>) -> Self {
        self.shared.lock().unwrap().identifier = identifier.into();
        self
    }

    /// Set the starting value
    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.shared.lock().unwrap().value = Some(value.into());
        self
    }

    /// Set the starting placeholder value
    #[must_use]
    pub fn with_placeholder_value(self, placeholder: impl Into<String>) -> Self {
        self.shared.lock().unwrap().placeholder_value = Some(placeholder.into());
        self
    }

    /// Set a starting boolean state
    #[must_use]
    pub fn with_state(self, state: ElementState, value: bool) -> Self {
        self.set_state(state, value);
        self
    }

    /// Flip a boolean state live
    pub fn set_state(&self, state: ElementState, value: bool) {
        let mut inner = self.shared.lock().unwrap();
        match state {
            ElementState::Exists => inner.exists = value,
            ElementState::Hittable => inner.hittable = value,
            ElementState::Enabled => inner.enabled = value,
            ElementState::Selected => inner.selected = value,
            ElementState::Focused => inner.focused = value,
        }
    }

    /// Rewrite the label live
    pub fn set_label(&self, label: impl Into<String>) {
        self.shared.lock().unwrap().label = label.into();
    }

    /// Rewrite the value live; `None` simulates a non-string value
    pub fn set_value(&self, value: Option<String>) {
        self.shared.lock().unwrap().value = value;
    }

    /// Rewrite the placeholder value live
    pub fn set_placeholder_value(&self, placeholder: Option<String>) {
        self.shared.lock().unwrap().placeholder_value = placeholder;
    }
}

impl ElementHandle for MockElement {
    fn exists(&self) -> bool {
        self.shared.lock().unwrap().exists
    }

    fn is_hittable(&self) -> bool {
        self.shared.lock().unwrap().hittable
    }

    fn is_enabled(&self) -> bool {
        self.shared.lock().unwrap().enabled
    }

    fn is_selected(&self) -> bool {
        self.shared.lock().unwrap().selected
    }

    fn has_focus(&self) -> bool {
        self.shared.lock().unwrap().focused
    }

    fn label(&self) -> String {
        self.shared.lock().unwrap().label.clone()
    }

    fn identifier(&self) -> String {
        self.shared.lock().unwrap().identifier.clone()
    }

    fn value(&self) -> Option<String> {
        self.shared.lock().unwrap().value.clone()
    }

    fn placeholder_value(&self) -> Option<String> {
        self.shared.lock().unwrap().placeholder_value.clone()
    }

    fn description(&self) -> String {
        self.shared.lock().unwrap().description.clone()
    }
}
