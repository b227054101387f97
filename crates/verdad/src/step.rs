//! Step-scoped execution and reporting.
//!
//! A step is a named, nestable unit of work. Running a body inside a step
//! tags any failure with the step's label path for diagnostics; the failure
//! itself propagates unchanged. The accumulated trace is a hierarchy of
//! spans exported as JSON for the surrounding runner/report collaborator;
//! the format is opaque to the verification core.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use uuid::Uuid;

use crate::result::VerdadResult;

/// Separator between labels in a rendered step path
pub const PATH_SEPARATOR: &str = " > ";

/// Outcome of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    /// Body still executing
    Running,
    /// Body returned Ok
    Passed,
    /// Body returned Err
    Failed,
}

/// One recorded step
#[derive(Debug, Clone, Serialize)]
pub struct StepSpan {
    /// Unique span id
    pub id: String,
    /// Enclosing span id, if nested
    pub parent_id: Option<String>,
    /// Human-readable label
    pub label: String,
    /// Full label path from the outermost scope
    pub path: String,
    /// Outcome
    pub status: StepStatus,
    /// Error rendering, if the body failed
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct TraceState {
    spans: Vec<StepSpan>,
    // indices into `spans` for the currently-open scopes
    stack: Vec<usize>,
}

/// Nestable step scope shared by a session's components.
///
/// Cloning shares the underlying trace; a test and every page object it
/// constructs record into the same hierarchy.
#[derive(Debug, Clone, Default)]
pub struct StepScope {
    state: Rc<RefCell<TraceState>>,
}

impl StepScope {
    /// Create an empty scope
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute `body` under `label`.
    ///
    /// The result is returned unchanged: a failure keeps its error variant
    /// and message, and the span records the label path it failed under.
    /// Scopes nest; calling `run` inside a running body attaches a child
    /// span.
    pub fn run<T>(&self, label: &str, body: impl FnOnce() -> VerdadResult<T>) -> VerdadResult<T> {
        let index = self.open(label);
        tracing::debug!(step = label, "step start");
        let result = body();
        self.close(index, result.as_ref().err().map(ToString::to_string));
        result
    }

    fn open(&self, label: &str) -> usize {
        let mut state = self.state.borrow_mut();
        let parent = state.stack.last().copied();
        let parent_id = parent.map(|i| state.spans[i].id.clone());
        let path = match parent {
            Some(i) => format!("{}{PATH_SEPARATOR}{label}", state.spans[i].path),
            None => label.to_string(),
        };
        let span = StepSpan {
            id: Uuid::new_v4().to_string(),
            parent_id,
            label: label.to_string(),
            path,
            status: StepStatus::Running,
            error: None,
        };
        state.spans.push(span);
        let index = state.spans.len() - 1;
        state.stack.push(index);
        index
    }

    fn close(&self, index: usize, error: Option<String>) {
        let mut state = self.state.borrow_mut();
        match error {
            Some(message) => {
                tracing::debug!(step = %state.spans[index].path, error = %message, "step failed");
                state.spans[index].status = StepStatus::Failed;
                state.spans[index].error = Some(message);
            }
            None => state.spans[index].status = StepStatus::Passed,
        }
        state.stack.pop();
    }

    /// Label path of the innermost failed step, if any step failed
    #[must_use]
    pub fn failure_path(&self) -> Option<String> {
        let state = self.state.borrow();
        state
            .spans
            .iter()
            .rev()
            .find(|s| s.status == StepStatus::Failed)
            .map(|s| s.path.clone())
    }

    /// Number of recorded spans
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().spans.len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().spans.is_empty()
    }

    /// Snapshot of all recorded spans, in open order
    #[must_use]
    pub fn spans(&self) -> Vec<StepSpan> {
        self.state.borrow().spans.clone()
    }

    /// Export the trace as JSON for the report collaborator.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn to_json(&self) -> VerdadResult<String> {
        Ok(serde_json::to_string_pretty(&self.state.borrow().spans)?)
    }
}
