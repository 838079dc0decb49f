//! State and property assertions with structured reporting.
//!
//! Assertions never raise. Each call waits (fast path included, so a state
//! that is already wrong fails immediately instead of burning the full
//! timeout), then records exactly one pass/fail outcome through the injected
//! [`ReportingSink`]. Whether a failure aborts the scenario is the host
//! harness's policy, not the engine's.
//!
//! The free functions here operate over [`ElementHandle`] and
//! [`ReportingSink`] trait objects composed by the caller; shared behavior
//! lives in the message tables on [`ElementState`] and [`Property`], not in
//! inherited defaults.

use std::panic::Location;

use serde::{Deserialize, Serialize};

use crate::activity::Icon;
use crate::element::{ElementHandle, ElementState, Property};
use crate::wait::{ConditionWaiter, Timeout};

// =============================================================================
// OUTCOME
// =============================================================================

/// How an assertion failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The element was in the wrong boolean state after the timeout
    StateMismatch,
    /// The property held the wrong value after the timeout
    PropertyMismatch,
    /// The property was absent or not string-typed; detected synchronously,
    /// no wait performed
    PropertyTypeMismatch,
}

/// One recorded assertion outcome: verdict, message, and call site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionOutcome {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
    /// Failure classification, `None` on a pass
    pub failure: Option<FailureKind>,
    /// Source file of the asserting call site
    pub file: String,
    /// Source line of the asserting call site
    pub line: u32,
}

impl AssertionOutcome {
    /// Create a passing outcome tagged with the caller's location
    #[must_use]
    #[track_caller]
    pub fn pass(message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self {
            passed: true,
            message: message.into(),
            failure: None,
            file: location.file().to_string(),
            line: location.line(),
        }
    }

    /// Create a failing outcome tagged with the caller's location
    #[must_use]
    #[track_caller]
    pub fn fail(message: impl Into<String>, kind: FailureKind) -> Self {
        let location = Location::caller();
        Self {
            passed: false,
            message: message.into(),
            failure: Some(kind),
            file: location.file().to_string(),
            line: location.line(),
        }
    }
}

// =============================================================================
// REPORTING SINK
// =============================================================================

/// Destination for assertion outcomes.
///
/// The engine records exactly one outcome per assertion call. Failure policy
/// (stop the scenario, collect and continue) belongs to the implementation.
pub trait ReportingSink {
    /// Record one assertion outcome
    fn record(&mut self, outcome: AssertionOutcome);
}

/// In-memory [`ReportingSink`] that collects every outcome.
#[derive(Debug, Default)]
pub struct CollectingSink {
    outcomes: Vec<AssertionOutcome>,
    suite_name: String,
}

impl CollectingSink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self {
            suite_name: "Verification".to_string(),
            ..Default::default()
        }
    }

    /// Set the suite name used in the summary
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.suite_name = name.into();
        self
    }

    /// All recorded outcomes, in order
    #[must_use]
    pub fn outcomes(&self) -> &[AssertionOutcome] {
        &self.outcomes
    }

    /// Number of passing outcomes
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Number of failing outcomes
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    /// Total recorded outcomes
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether every outcome passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// The failing outcomes
    #[must_use]
    pub fn failures(&self) -> Vec<&AssertionOutcome> {
        self.outcomes.iter().filter(|o| !o.passed).collect()
    }

    /// Generate summary string
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} passed",
            self.suite_name,
            self.passed_count(),
            self.total_count()
        )
    }
}

impl ReportingSink for CollectingSink {
    fn record(&mut self, outcome: AssertionOutcome) {
        self.outcomes.push(outcome);
    }
}

// =============================================================================
// STATE ASSERTION
// =============================================================================

/// Assert that an element is in (or not in) a canonical boolean state within
/// `timeout`.
///
/// Waits with the fast path, so an element already in the expected state
/// passes without blocking and a negative expectation that already holds
/// ("doesn't exist") returns immediately. Records exactly one outcome; the
/// failure message names the unwanted condition actually observed.
///
/// # Example
///
/// ```
/// use verificar::{assert_state, CollectingSink, ConditionWaiter, ElementState, Timeout};
/// use verificar::mock::MockElement;
///
/// let element = MockElement::new("Login button");
/// let waiter = ConditionWaiter::new();
/// let mut sink = CollectingSink::new();
///
/// assert_state(&element, ElementState::Exists, true, Timeout::Short, &waiter, &mut sink);
/// assert!(sink.all_passed());
/// ```
#[track_caller]
pub fn assert_state<H, S>(
    element: &H,
    state: ElementState,
    expected: bool,
    timeout: Timeout,
    waiter: &ConditionWaiter,
    sink: &mut S,
) where
    H: ElementHandle + ?Sized,
    S: ReportingSink + ?Sized,
{
    let outcome = waiter.wait(|| element.state(state), expected, timeout);

    let record = if outcome.is_satisfied() {
        AssertionOutcome::pass(format!(
            "The {} {}",
            element.description(),
            state.expectation_phrase(expected)
        ))
    } else {
        let message = format!(
            "{} - The {} {}",
            Icon::Error.glyph(),
            element.description(),
            state.failure_phrase(expected)
        );
        tracing::warn!(state = %state, expected, %timeout, "state assertion failed");
        AssertionOutcome::fail(message, FailureKind::StateMismatch)
    };
    sink.record(record);
}

// =============================================================================
// PROPERTY ASSERTION
// =============================================================================

/// Assert that a string property of an element equals (or does not equal)
/// `equal_to` within `timeout`.
///
/// An absent or non-string property is a [`FailureKind::PropertyTypeMismatch`]
/// recorded immediately, with no wait performed. Otherwise the live property
/// is re-read on every poll until the comparison holds or the timeout
/// elapses; the failure message carries both the expected and the
/// last-observed value.
#[track_caller]
pub fn assert_property<H, S>(
    element: &H,
    property: Property,
    equal_to: &str,
    expected: bool,
    timeout: Timeout,
    waiter: &ConditionWaiter,
    sink: &mut S,
) where
    H: ElementHandle + ?Sized,
    S: ReportingSink + ?Sized,
{
    if element.property(property).is_none() {
        let message = format!(
            "{} - Property '{}' of the {} is missing or not a string",
            Icon::Error.glyph(),
            property.as_str(),
            element.description()
        );
        sink.record(AssertionOutcome::fail(
            message,
            FailureKind::PropertyTypeMismatch,
        ));
        return;
    }

    let outcome = waiter.wait(
        || element.property(property).as_deref() == Some(equal_to),
        expected,
        timeout,
    );

    let record = if outcome.is_satisfied() {
        AssertionOutcome::pass(format!(
            "The {} {}",
            element.description(),
            property.phrase(expected, equal_to)
        ))
    } else {
        let actual = element.property(property).unwrap_or_default();
        let message = format!(
            "{} - Expected {} of the {} {} '{}', but found '{}'",
            Icon::Error.glyph(),
            property.as_str(),
            element.description(),
            if expected {
                "to be equal to"
            } else {
                "not to be equal to"
            },
            equal_to,
            actual
        );
        tracing::warn!(property = %property, expected, %timeout, "property assertion failed");
        AssertionOutcome::fail(message, FailureKind::PropertyMismatch)
    };
    sink.record(record);
}
