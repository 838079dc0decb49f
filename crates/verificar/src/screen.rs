//! Screen object support.
//!
//! A [`Screen`] groups the elements of one UI page behind an explicit name
//! and a readiness hook. [`verify_screen`] is the canonical entry check:
//! wait for readiness inside a screen-level activity scope and record one
//! outcome.

use std::collections::HashMap;
use std::panic::Location;

use crate::activity::{ActivityTrace, Icon};
use crate::assertion::{AssertionOutcome, FailureKind, ReportingSink};
use crate::wait::{ConditionWaiter, Timeout};

/// Trait for screen objects representing one page of the UI under test.
///
/// The name is supplied explicitly by the implementation; no runtime type
/// introspection is involved.
///
/// # Example
///
/// ```ignore
/// struct LoginScreen {
///     username_field: MockElement,
///     login_button: MockElement,
/// }
///
/// impl Screen for LoginScreen {
///     fn name(&self) -> &str {
///         "LoginScreen"
///     }
///
///     fn is_loaded(&self) -> bool {
///         self.login_button.exists()
///     }
/// }
/// ```
pub trait Screen {
    /// Screen name used in scopes and messages ("LoginScreen")
    fn name(&self) -> &str;

    /// Whether the screen is fully loaded and ready for interaction
    fn is_loaded(&self) -> bool {
        true
    }

    /// How long readiness may take
    fn load_timeout(&self) -> Timeout {
        Timeout::Loading
    }
}

/// Trait for type-erased screen info
pub trait ScreenInfo {
    /// Get the screen name
    fn name(&self) -> &str;

    /// Get the load timeout
    fn load_timeout(&self) -> Timeout;
}

impl<T: Screen> ScreenInfo for T {
    fn name(&self) -> &str {
        Screen::name(self)
    }

    fn load_timeout(&self) -> Timeout {
        Screen::load_timeout(self)
    }
}

/// Screen registry for managing the screens of one flow
#[derive(Default)]
pub struct ScreenRegistry {
    screens: HashMap<String, Box<dyn ScreenInfo>>,
}

impl std::fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenRegistry")
            .field("screens", &self.screens.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ScreenRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen under a key
    pub fn register<T: Screen + 'static>(&mut self, key: impl Into<String>, screen: T) {
        let _ = self.screens.insert(key.into(), Box::new(screen));
    }

    /// Get a screen by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn ScreenInfo> {
        self.screens.get(key).map(|s| s.as_ref())
    }

    /// List the registered keys
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.screens.keys().map(String::as_str).collect()
    }

    /// Number of registered screens
    #[must_use]
    pub fn count(&self) -> usize {
        self.screens.len()
    }
}

/// Verify a screen finished loading, inside a screen-level activity scope.
///
/// Waits (fast path included) for [`Screen::is_loaded`] within the screen's
/// load timeout and records exactly one outcome. Returns whether the screen
/// was ready.
#[track_caller]
pub fn verify_screen<T, S>(
    screen: &T,
    waiter: &ConditionWaiter,
    trace: &ActivityTrace,
    sink: &mut S,
) -> bool
where
    T: Screen + ?Sized,
    S: ReportingSink + ?Sized,
{
    let location = Location::caller();
    trace.run(
        Icon::Screen,
        format!("Verifying the {} screen is loaded", screen.name()),
        || {
            let outcome = waiter.wait(|| screen.is_loaded(), true, screen.load_timeout());
            let passed = outcome.is_satisfied();
            let record = if passed {
                AssertionOutcome {
                    passed: true,
                    message: format!("The {} screen is loaded", screen.name()),
                    failure: None,
                    file: location.file().to_string(),
                    line: location.line(),
                }
            } else {
                AssertionOutcome {
                    passed: false,
                    message: format!(
                        "{} - The {} screen didn't finish loading",
                        Icon::Error.glyph(),
                        screen.name()
                    ),
                    failure: Some(FailureKind::StateMismatch),
                    file: location.file().to_string(),
                    line: location.line(),
                }
            };
            sink.record(record);
            passed
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::CollectingSink;
    use crate::element::ElementHandle;
    use crate::element::ElementState;
    use crate::mock::MockElement;

    struct LoginScreen {
        login_button: MockElement,
    }

    impl LoginScreen {
        fn new() -> Self {
            Self {
                login_button: MockElement::new("Login button").with_label("Login"),
            }
        }
    }

    impl Screen for LoginScreen {
        fn name(&self) -> &str {
            "LoginScreen"
        }

        fn is_loaded(&self) -> bool {
            self.login_button.exists()
        }

        fn load_timeout(&self) -> Timeout {
            Timeout::Short
        }
    }

    mod screen_trait_tests {
        use super::*;

        #[test]
        fn test_explicit_name() {
            let screen = LoginScreen::new();
            assert_eq!(Screen::name(&screen), "LoginScreen");
        }

        #[test]
        fn test_default_load_timeout() {
            struct Bare;
            impl Screen for Bare {
                fn name(&self) -> &str {
                    "Bare"
                }
            }
            assert_eq!(Screen::load_timeout(&Bare), Timeout::Loading);
            assert!(Bare.is_loaded());
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_register_and_get() {
            let mut registry = ScreenRegistry::new();
            registry.register("login", LoginScreen::new());

            assert_eq!(registry.count(), 1);
            let info = registry.get("login").unwrap();
            assert_eq!(info.name(), "LoginScreen");
            assert_eq!(info.load_timeout(), Timeout::Short);
            assert!(registry.get("missing").is_none());
        }

        #[test]
        fn test_list() {
            let mut registry = ScreenRegistry::new();
            registry.register("login", LoginScreen::new());
            registry.register("home", LoginScreen::new());

            let keys = registry.list();
            assert_eq!(keys.len(), 2);
            assert!(keys.contains(&"login"));
        }
    }

    mod verify_screen_tests {
        use super::*;

        #[test]
        fn test_loaded_screen_passes() {
            let screen = LoginScreen::new();
            let waiter = ConditionWaiter::new();
            let trace = ActivityTrace::new();
            let mut sink = CollectingSink::new();

            assert!(verify_screen(&screen, &waiter, &trace, &mut sink));
            assert!(sink.all_passed());

            let records = trace.records();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].icon, Icon::Screen);
            assert!(records[0]
                .description
                .contains("Verifying the LoginScreen screen is loaded"));
        }

        #[test]
        fn test_unloaded_screen_fails_after_timeout() {
            let screen = LoginScreen::new();
            screen.login_button.set_state(ElementState::Exists, false);

            let waiter = ConditionWaiter::new();
            let trace = ActivityTrace::new();
            let mut sink = CollectingSink::new();

            assert!(!verify_screen(&screen, &waiter, &trace, &mut sink));
            let failures = sink.failures();
            assert_eq!(failures.len(), 1);
            assert!(failures[0]
                .message
                .contains("The LoginScreen screen didn't finish loading"));
        }

        #[test]
        fn test_screen_becomes_ready_mid_wait() {
            let screen = LoginScreen::new();
            screen.login_button.set_state(ElementState::Exists, false);
            let button = screen.login_button.clone();

            std::thread::spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(100));
                button.set_state(ElementState::Exists, true);
            });

            let waiter = ConditionWaiter::new();
            let trace = ActivityTrace::new();
            let mut sink = CollectingSink::new();

            assert!(verify_screen(&screen, &waiter, &trace, &mut sink));
        }
    }
}
