//! Verificar: Element-State Verification Engine for UI Test Automation
//!
//! Verificar (Spanish: "to verify") is the assertion core of a screen-object
//! test suite: composable text-match predicates over element attributes,
//! bounded-time condition polling with a fast path for conditions that
//! already hold, state and property assertions with exhaustive message
//! tables, and nested diagnostic activity scopes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   VERIFICAR Architecture                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Predicate  │    │ Condition  │    │ Reporting  │            │
//! │   │ (narrow)   │───►│ Waiter     │───►│ Sink       │            │
//! │   │            │    │ (poll)     │    │ (record)   │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! │         ▲                 ▲                                      │
//! │   ┌────────────┐    ┌────────────┐                               │
//! │   │ Element    │    │ BoundedWait│   injected collaborators      │
//! │   │ Handle     │    │ primitive  │                               │
//! │   └────────────┘    └────────────┘                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine drives no UI backend itself. Elements arrive behind
//! [`ElementHandle`], suspension happens behind [`BoundedWait`], and
//! outcomes leave through [`ReportingSink`], all synchronous, on the
//! caller's thread.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Nested diagnostic activity scopes
pub mod activity;

/// State and property assertions with structured reporting
pub mod assertion;

/// Element model and the handle capability trait
pub mod element;

/// Mock elements for testing without a UI backend
pub mod mock;

/// Predicate construction for element queries
pub mod predicate;

mod result;

/// Screen object support
pub mod screen;

/// Bounded-time condition polling
pub mod wait;

pub use activity::{ActivityArchive, ActivityGuard, ActivityRecord, ActivityStatus, ActivityTrace, Icon};
pub use assertion::{
    assert_property, assert_state, AssertionOutcome, CollectingSink, FailureKind, ReportingSink,
};
pub use element::{ElementHandle, ElementState, Property};
pub use predicate::{Combinator, Criterion, MatchField, MatchMode, Predicate, PredicateBuilder};
pub use result::{VerificarError, VerificarResult};
pub use screen::{verify_screen, Screen, ScreenInfo, ScreenRegistry};
pub use wait::{
    BoundedWait, ConditionWaiter, PollingWait, Timeout, WaitOutcome, DEFAULT_POLL_INTERVAL_MS,
};
