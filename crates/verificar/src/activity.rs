//! Nested diagnostic activity scopes.
//!
//! An [`ActivityTrace`] records entry and exit around labeled sections of a
//! verification flow. Scopes are purely structural: the wrapped body's return
//! value and any panic propagate unchanged, and nesting is strict
//! last-entered, first-exited; diagnostic consumers rely on scope depth to
//! attribute failures to the correct caller, including under recursion and
//! panic unwinding.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{ElementState, Property};
use crate::result::VerificarResult;

// =============================================================================
// ICONS
// =============================================================================

/// Cosmetic icons prefixed to activity descriptions and failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    /// Screen-level verification
    Screen,
    /// Ordinary step
    Step,
    /// Assertion
    Assert,
    /// Failure
    Error,
    /// Test-level wrapper
    Test,
}

impl Icon {
    /// Get the display glyph
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Screen => "\u{23f9}\u{fe0f}",  // ⏹️
            Self::Step => "\u{1f539}",           // 🔹
            Self::Assert => "\u{2611}\u{fe0f}",  // ☑️
            Self::Error => "\u{274c}",           // ❌
            Self::Test => "\u{1f535}",           // 🔵
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Completion status of an activity scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    /// Scope is still open
    Running,
    /// Scope exited normally
    Ok,
    /// Scope exited while a panic was unwinding
    Failed,
}

/// One recorded activity scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Unique record ID
    pub id: String,
    /// Enclosing scope ID, if nested
    pub parent_id: Option<String>,
    /// Display icon
    pub icon: Icon,
    /// Scope description
    pub description: String,
    /// Nesting depth at entry (0 = top level)
    pub depth: usize,
    /// Entry timestamp (ms since trace start)
    pub start_ms: u64,
    /// Exit timestamp (ms since trace start)
    pub end_ms: Option<u64>,
    /// Completion status
    pub status: ActivityStatus,
}

impl ActivityRecord {
    fn new(
        icon: Icon,
        description: String,
        parent_id: Option<String>,
        depth: usize,
        start_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            parent_id,
            icon,
            description,
            depth,
            start_ms,
            end_ms: None,
            status: ActivityStatus::Running,
        }
    }

    fn close(&mut self, end_ms: u64, status: ActivityStatus) {
        self.end_ms = Some(end_ms);
        self.status = status;
    }

    /// Whether the scope has exited
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.end_ms.is_some()
    }

    /// Scope duration, once complete
    #[must_use]
    pub fn duration_ms(&self) -> Option<u64> {
        self.end_ms.map(|end| end.saturating_sub(self.start_ms))
    }
}

// =============================================================================
// TRACE
// =============================================================================

struct TraceInner {
    start: Instant,
    records: Vec<ActivityRecord>,
    stack: Vec<String>,
}

/// Records nested activity scopes for one verification flow.
///
/// # Example
///
/// ```
/// use verificar::{ActivityTrace, Icon};
///
/// let trace = ActivityTrace::new();
/// let total = trace.run(Icon::Step, "Submitting the form", || {
///     trace.run(Icon::Step, "Typing the username", || 2)
///         + trace.run(Icon::Step, "Typing the password", || 3)
/// });
/// assert_eq!(total, 5);
/// assert_eq!(trace.records().len(), 3);
/// ```
pub struct ActivityTrace {
    inner: RefCell<TraceInner>,
}

impl std::fmt::Debug for ActivityTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityTrace")
            .field("records", &self.inner.borrow().records.len())
            .field("open", &self.inner.borrow().stack.len())
            .finish()
    }
}

impl Default for ActivityTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityTrace {
    /// Create an empty trace
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(TraceInner {
                start: Instant::now(),
                records: Vec::new(),
                stack: Vec::new(),
            }),
        }
    }

    /// Open a scope; it closes when the returned guard drops.
    ///
    /// Prefer [`run`](Self::run) unless the scope must span non-lexical
    /// control flow.
    #[must_use]
    pub fn enter(&self, icon: Icon, description: impl Into<String>) -> ActivityGuard<'_> {
        let mut inner = self.inner.borrow_mut();
        let start_ms = inner.start.elapsed().as_millis() as u64;
        let parent_id = inner.stack.last().cloned();
        let depth = inner.stack.len();
        let record = ActivityRecord::new(icon, description.into(), parent_id, depth, start_ms);
        let id = record.id.clone();
        inner.stack.push(id.clone());
        inner.records.push(record);
        ActivityGuard { trace: self, id }
    }

    fn exit(&self, id: &str) {
        let mut inner = self.inner.borrow_mut();
        let end_ms = inner.start.elapsed().as_millis() as u64;
        let status = if std::thread::panicking() {
            ActivityStatus::Failed
        } else {
            ActivityStatus::Ok
        };
        while let Some(top) = inner.stack.pop() {
            if let Some(record) = inner.records.iter_mut().find(|r| r.id == top) {
                record.close(end_ms, status);
            }
            if top == id {
                break;
            }
        }
    }

    /// Run `body` inside a scope labeled `(icon, description)`.
    ///
    /// Purely structural: the return value propagates unchanged, and the
    /// scope closes in LIFO order even when `body` panics.
    pub fn run<T>(&self, icon: Icon, description: impl Into<String>, body: impl FnOnce() -> T) -> T {
        let _guard = self.enter(icon, description);
        body()
    }

    /// Run `body` inside an assertion scope whose text is derived from the
    /// state message table: "Verifying if the Login button is enabled".
    pub fn run_state<T>(
        &self,
        element_description: &str,
        state: ElementState,
        expected: bool,
        body: impl FnOnce() -> T,
    ) -> T {
        self.run(
            Icon::Assert,
            format!(
                "Verifying if the {element_description} {}",
                state.expectation_phrase(expected)
            ),
            body,
        )
    }

    /// Run `body` inside an assertion scope whose text is derived from the
    /// property phrasing: "Verifying if the Go button label is equal to Go".
    pub fn run_property<T>(
        &self,
        element_description: &str,
        property: Property,
        equal_to: &str,
        expected: bool,
        body: impl FnOnce() -> T,
    ) -> T {
        self.run(
            Icon::Assert,
            format!(
                "Verifying if the {element_description} {}",
                property.phrase(expected, equal_to)
            ),
            body,
        )
    }

    /// Number of currently open scopes
    #[must_use]
    pub fn open_depth(&self) -> usize {
        self.inner.borrow().stack.len()
    }

    /// Snapshot of the recorded scopes, in entry order
    #[must_use]
    pub fn records(&self) -> Vec<ActivityRecord> {
        self.inner.borrow().records.clone()
    }

    /// Freeze the trace into an archive
    #[must_use]
    pub fn archive(&self) -> ActivityArchive {
        ActivityArchive {
            records: self.records(),
        }
    }
}

/// Guard returned by [`ActivityTrace::enter`]; closes the scope on drop.
pub struct ActivityGuard<'a> {
    trace: &'a ActivityTrace,
    id: String,
}

impl std::fmt::Debug for ActivityGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityGuard").field("id", &self.id).finish()
    }
}

impl Drop for ActivityGuard<'_> {
    fn drop(&mut self) {
        self.trace.exit(&self.id);
    }
}

// =============================================================================
// ARCHIVE
// =============================================================================

/// A completed activity trace, ready for persistence or rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityArchive {
    /// Recorded scopes, in entry order
    pub records: Vec<ActivityRecord>,
}

impl ActivityArchive {
    /// Number of recorded scopes
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the archive is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get records carrying a given icon
    #[must_use]
    pub fn records_by_icon(&self, icon: Icon) -> Vec<&ActivityRecord> {
        self.records.iter().filter(|r| r.icon == icon).collect()
    }

    /// Save archive to JSON file
    pub fn save_json(&self, path: &Path) -> VerificarResult<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        Ok(())
    }

    /// Load archive from JSON file
    pub fn load_json(path: &Path) -> VerificarResult<Self> {
        let json = fs::read_to_string(path)?;
        let archive: Self = serde_json::from_str(&json)?;
        Ok(archive)
    }

    /// Render the trace as an indented text tree
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&"  ".repeat(record.depth));
            out.push_str(record.icon.glyph());
            out.push(' ');
            out.push_str(&record.description);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod icon_tests {
        use super::*;

        #[test]
        fn test_glyph_table() {
            assert_eq!(Icon::Step.glyph(), "\u{1f539}");
            assert_eq!(Icon::Error.glyph(), "\u{274c}");
            assert!(!Icon::Screen.glyph().is_empty());
            assert!(!Icon::Assert.glyph().is_empty());
            assert!(!Icon::Test.glyph().is_empty());
        }
    }

    mod scope_tests {
        use super::*;

        #[test]
        fn test_single_scope() {
            let trace = ActivityTrace::new();
            let value = trace.run(Icon::Step, "Tapping the Go button", || 42);
            assert_eq!(value, 42);

            let records = trace.records();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].description, "Tapping the Go button");
            assert_eq!(records[0].depth, 0);
            assert!(records[0].parent_id.is_none());
            assert_eq!(records[0].status, ActivityStatus::Ok);
            assert!(records[0].is_complete());
        }

        #[test]
        fn test_nested_scopes_track_parent_and_depth() {
            let trace = ActivityTrace::new();
            trace.run(Icon::Test, "outer", || {
                trace.run(Icon::Step, "inner", || {});
            });

            let records = trace.records();
            assert_eq!(records.len(), 2);
            let outer = &records[0];
            let inner = &records[1];
            assert_eq!(inner.parent_id.as_deref(), Some(outer.id.as_str()));
            assert_eq!(outer.depth, 0);
            assert_eq!(inner.depth, 1);
        }

        #[test]
        fn test_siblings_share_parent() {
            let trace = ActivityTrace::new();
            trace.run(Icon::Test, "outer", || {
                trace.run(Icon::Step, "first", || {});
                trace.run(Icon::Step, "second", || {});
            });

            let records = trace.records();
            assert_eq!(records[1].parent_id, records[2].parent_id);
            assert_eq!(records[1].depth, 1);
            assert_eq!(records[2].depth, 1);
        }

        #[test]
        fn test_recursive_scopes_preserve_lexical_nesting() {
            fn descend(trace: &ActivityTrace, remaining: usize) {
                if remaining == 0 {
                    return;
                }
                trace.run(Icon::Step, format!("level {remaining}"), || {
                    descend(trace, remaining - 1);
                });
            }

            let trace = ActivityTrace::new();
            descend(&trace, 4);

            let records = trace.records();
            assert_eq!(records.len(), 4);
            for (index, record) in records.iter().enumerate() {
                assert_eq!(record.depth, index);
            }
            assert_eq!(trace.open_depth(), 0);
        }

        #[test]
        fn test_scope_has_no_control_flow_effect() {
            let trace = ActivityTrace::new();
            let result: Result<u32, String> =
                trace.run(Icon::Step, "computing", || Err("boom".to_string()));
            assert_eq!(result, Err("boom".to_string()));
            assert_eq!(trace.records()[0].status, ActivityStatus::Ok);
        }

        #[test]
        fn test_panic_unwinds_scopes_in_lifo_order() {
            let trace = ActivityTrace::new();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                trace.run(Icon::Test, "outer", || {
                    trace.run(Icon::Step, "inner", || {
                        panic!("element vanished");
                    });
                });
            }));
            assert!(result.is_err());

            // Both scopes closed despite the panic, marked failed
            assert_eq!(trace.open_depth(), 0);
            let records = trace.records();
            assert!(records.iter().all(ActivityRecord::is_complete));
            assert!(records
                .iter()
                .all(|r| r.status == ActivityStatus::Failed));
        }

        #[test]
        fn test_explicit_guard() {
            let trace = ActivityTrace::new();
            {
                let _outer = trace.enter(Icon::Test, "outer");
                assert_eq!(trace.open_depth(), 1);
                {
                    let _inner = trace.enter(Icon::Step, "inner");
                    assert_eq!(trace.open_depth(), 2);
                }
                assert_eq!(trace.open_depth(), 1);
            }
            assert_eq!(trace.open_depth(), 0);
        }

        #[test]
        fn test_duration_recorded() {
            let trace = ActivityTrace::new();
            trace.run(Icon::Step, "sleeping", || {
                std::thread::sleep(std::time::Duration::from_millis(20));
            });
            let records = trace.records();
            assert!(records[0].duration_ms().unwrap() >= 20);
        }
    }

    mod derived_text_tests {
        use super::*;

        #[test]
        fn test_state_scope_text() {
            let trace = ActivityTrace::new();
            trace.run_state("Login button", ElementState::Enabled, true, || {});

            let records = trace.records();
            assert_eq!(
                records[0].description,
                "Verifying if the Login button is enabled"
            );
            assert_eq!(records[0].icon, Icon::Assert);
        }

        #[test]
        fn test_negated_state_scope_text() {
            let trace = ActivityTrace::new();
            trace.run_state("error alert", ElementState::Exists, false, || {});
            assert_eq!(
                trace.records()[0].description,
                "Verifying if the error alert doesn't exist"
            );
        }

        #[test]
        fn test_property_scope_text() {
            let trace = ActivityTrace::new();
            trace.run_property("Go button", Property::Label, "Go", true, || {});
            assert_eq!(
                trace.records()[0].description,
                "Verifying if the Go button label is equal to Go"
            );
        }
    }

    mod archive_tests {
        use super::*;
        use tempfile::TempDir;

        fn sample_trace() -> ActivityTrace {
            let trace = ActivityTrace::new();
            trace.run(Icon::Test, "test scope", || {
                trace.run(Icon::Assert, "assertion scope", || {});
            });
            trace
        }

        #[test]
        fn test_archive_snapshot() {
            let archive = sample_trace().archive();
            assert_eq!(archive.len(), 2);
            assert!(!archive.is_empty());
        }

        #[test]
        fn test_records_by_icon() {
            let archive = sample_trace().archive();
            assert_eq!(archive.records_by_icon(Icon::Assert).len(), 1);
            assert_eq!(archive.records_by_icon(Icon::Error).len(), 0);
        }

        #[test]
        fn test_save_and_load() {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("trace.json");

            let archive = sample_trace().archive();
            archive.save_json(&path).unwrap();
            assert!(path.exists());

            let loaded = ActivityArchive::load_json(&path).unwrap();
            assert_eq!(loaded.len(), 2);
            assert_eq!(loaded.records[1].description, "assertion scope");
        }

        #[test]
        fn test_render_text_indents_by_depth() {
            let rendered = sample_trace().archive().render_text();
            let lines: Vec<&str> = rendered.lines().collect();
            assert_eq!(lines.len(), 2);
            assert!(lines[0].starts_with(Icon::Test.glyph()));
            assert!(lines[1].starts_with("  "));
            assert!(lines[1].contains("assertion scope"));
        }
    }
}
