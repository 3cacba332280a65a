#![forbid(unsafe_code)]

//! Submission state and the sink that receives the payload.

use std::fmt;

use regform_core::FormValues;

/// Whether a submission is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubmissionState {
    #[default]
    Idle,
    /// The gate passed; the control is disabled and the submit is pending
    /// (or has fired). There is no transition back to `Idle`.
    Submitting,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
        })
    }
}

/// Work deferred through the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Read the current values and hand them to the sink.
    SubmitForm,
}

/// Receives the form values when the deferred submit fires.
pub trait SubmitSink {
    fn submit(&mut self, values: &FormValues);
}

impl<F: FnMut(&FormValues)> SubmitSink for F {
    fn submit(&mut self, values: &FormValues) {
        self(values);
    }
}

/// A sink that keeps every payload it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    submissions: Vec<FormValues>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads in arrival order.
    #[must_use]
    pub fn submissions(&self) -> &[FormValues] {
        &self.submissions
    }

    /// Consume the sink, returning its payloads.
    #[must_use]
    pub fn into_submissions(self) -> Vec<FormValues> {
        self.submissions
    }
}

impl SubmitSink for RecordingSink {
    fn submit(&mut self, values: &FormValues) {
        self.submissions.push(values.clone());
    }
}
