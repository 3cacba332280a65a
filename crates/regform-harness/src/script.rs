#![forbid(unsafe_code)]

//! Session scripts: one JSON step per line, replayed against an in-memory
//! page with a deterministic clock.
//!
//! ```text
//! # comment
//! {"type":"input","field":"username","value":"user_1"}
//! {"type":"submit"}
//! {"type":"advance","ms":500}
//! ```

use core::time::Duration;
use std::fmt;
use std::io;

use regform_core::{FieldId, FormConfig, FormValues};
use regform_web::{
    DeterministicClock, FormEvent, Page, PageError, PageSnapshot, RecordingSink,
    RegistrationForm, SubmissionState,
};
use serde::{Deserialize, Serialize};

/// One step of a session script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Type `value` into `field` and dispatch its input event.
    Input { field: FieldId, value: String },
    /// Dispatch a submit attempt.
    Submit,
    /// Advance the clock by `ms` milliseconds and run due work.
    Advance { ms: u64 },
}

/// Failure to load or replay a script.
#[derive(Debug)]
pub enum ScriptError {
    /// A line is not a valid step.
    Parse { line: usize, message: String },
    /// The script could not be read.
    Io(io::Error),
    /// The page lacks an element the form needs.
    Page(PageError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, message } => write!(f, "line {line}: {message}"),
            Self::Io(err) => write!(f, "cannot read script: {err}"),
            Self::Page(err) => write!(f, "page error: {err}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { .. } => None,
            Self::Io(err) => Some(err),
            Self::Page(err) => Some(err),
        }
    }
}

impl From<io::Error> for ScriptError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<PageError> for ScriptError {
    fn from(err: PageError) -> Self {
        Self::Page(err)
    }
}

/// Parse a script. Blank lines and lines starting with `#` are skipped;
/// line numbers in errors are 1-based.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, text)| {
            serde_json::from_str(text).map_err(|err| ScriptError::Parse {
                line,
                message: err.to_string(),
            })
        })
        .collect()
}

/// Outcome of a replay, printed by the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub page: PageSnapshot,
    pub submissions: Vec<FormValues>,
    pub state: SubmissionState,
    pub trace_checksum: u64,
}

/// Replay `steps` on a fresh registration page.
pub fn replay(steps: &[ScriptStep], config: FormConfig) -> Result<ReplayReport, ScriptError> {
    let mut form = RegistrationForm::new(
        Page::registration(),
        RecordingSink::new(),
        DeterministicClock::new(),
        config,
    )?;
    for step in steps {
        match step {
            ScriptStep::Input { field, value } => {
                form.type_into(*field, value)?;
            }
            ScriptStep::Submit => {
                form.dispatch(FormEvent::Submit)?;
            }
            ScriptStep::Advance { ms } => {
                form.advance(Duration::from_millis(*ms))?;
            }
        }
    }

    let violations = form.trace().verify_invariants();
    for violation in &violations {
        tracing::warn!(%violation, "trace invariant violated");
    }
    let trace_checksum = form.trace().checksum();
    let state = form.state();
    tracing::debug!(
        steps = steps.len(),
        events = form.trace().len(),
        trace_checksum,
        "replay finished"
    );
    let (page, sink) = form.into_parts();
    Ok(ReplayReport {
        page: page.snapshot(),
        submissions: sink.into_submissions(),
        state,
        trace_checksum,
    })
}
