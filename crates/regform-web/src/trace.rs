#![forbid(unsafe_code)]

//! Event trace of a form session, for replay checks and golden comparison.
//!
//! Events carry the clock time in milliseconds and never carry field
//! values, so traces can be logged and stored freely.

use std::hash::{DefaultHasher, Hash, Hasher};

use regform_core::{FieldId, FieldState, StrengthScore};

use crate::scheduler::TaskId;

/// One observable step of the form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormTraceEvent {
    /// A field was rendered into a state.
    FieldRendered {
        field: FieldId,
        state: FieldState,
        at_ms: u64,
    },
    /// The strength indicator was rendered.
    StrengthRendered { score: StrengthScore, at_ms: u64 },
    /// A submit was rejected by the gate.
    GateRejected {
        missing: u8,
        invalid: u8,
        at_ms: u64,
    },
    /// The gate passed and the submit was deferred.
    SubmitScheduled {
        task: TaskId,
        due_ms: u64,
        at_ms: u64,
    },
    /// A submit arrived while one was already in flight.
    SubmitIgnored { at_ms: u64 },
    /// The deferred submit reached the sink.
    Submitted { task: TaskId, at_ms: u64 },
}

impl FormTraceEvent {
    /// Event type name for logging.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::FieldRendered { .. } => "field_rendered",
            Self::StrengthRendered { .. } => "strength_rendered",
            Self::GateRejected { .. } => "gate_rejected",
            Self::SubmitScheduled { .. } => "submit_scheduled",
            Self::SubmitIgnored { .. } => "submit_ignored",
            Self::Submitted { .. } => "submitted",
        }
    }

    /// Clock time the event was recorded at.
    #[must_use]
    pub fn at_ms(&self) -> u64 {
        match self {
            Self::FieldRendered { at_ms, .. }
            | Self::StrengthRendered { at_ms, .. }
            | Self::GateRejected { at_ms, .. }
            | Self::SubmitScheduled { at_ms, .. }
            | Self::SubmitIgnored { at_ms }
            | Self::Submitted { at_ms, .. } => *at_ms,
        }
    }
}

/// Ordered record of [`FormTraceEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormTrace {
    events: Vec<FormTraceEvent>,
}

impl FormTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FormTraceEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[FormTraceEvent] {
        &self.events
    }

    /// Number of events of the given type.
    #[must_use]
    pub fn count(&self, event_type: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }

    /// Checksum over every event and its position.
    #[must_use]
    pub fn checksum(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for event in &self.events {
            event.hash(&mut hasher);
        }
        hasher.finish()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// List every broken invariant; empty when the trace is sound.
    #[must_use]
    pub fn verify_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();

        // At most one submission per form.
        let submitted = self.count("submitted");
        if submitted > 1 {
            violations.push(format!("submitted {submitted} times"));
        }

        // Clock never runs backwards.
        for pair in self.events.windows(2) {
            if pair[1].at_ms() < pair[0].at_ms() {
                violations.push(format!(
                    "{} at {}ms recorded after {} at {}ms",
                    pair[1].event_type(),
                    pair[1].at_ms(),
                    pair[0].event_type(),
                    pair[0].at_ms()
                ));
            }
        }

        // Each submission follows its schedule, no earlier than the deadline.
        for (index, event) in self.events.iter().enumerate() {
            let FormTraceEvent::Submitted { task, at_ms } = event else {
                continue;
            };
            let scheduled = self.events[..index].iter().find_map(|e| match e {
                FormTraceEvent::SubmitScheduled {
                    task: t, due_ms, ..
                } if t == task => Some(*due_ms),
                _ => None,
            });
            match scheduled {
                None => violations.push(format!("{task} submitted without being scheduled")),
                Some(due_ms) if *at_ms < due_ms => violations.push(format!(
                    "{task} submitted at {at_ms}ms before its deadline {due_ms}ms"
                )),
                Some(_) => {}
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(task: u64, at_ms: u64, due_ms: u64) -> FormTraceEvent {
        FormTraceEvent::SubmitScheduled {
            task: TaskId::from_raw(task),
            due_ms,
            at_ms,
        }
    }

    fn submitted(task: u64, at_ms: u64) -> FormTraceEvent {
        FormTraceEvent::Submitted {
            task: TaskId::from_raw(task),
            at_ms,
        }
    }

    #[test]
    fn sound_trace_has_no_violations() {
        let mut trace = FormTrace::new();
        trace.push(FormTraceEvent::FieldRendered {
            field: FieldId::Username,
            state: FieldState::Success,
            at_ms: 0,
        });
        trace.push(scheduled(1, 10, 510));
        trace.push(FormTraceEvent::SubmitIgnored { at_ms: 20 });
        trace.push(submitted(1, 510));
        assert!(trace.verify_invariants().is_empty());
        assert_eq!(trace.count("submit_ignored"), 1);
        assert_eq!(trace.len(), 4);
    }

    #[test]
    fn early_submission_is_flagged() {
        let mut trace = FormTrace::new();
        trace.push(scheduled(1, 0, 500));
        trace.push(submitted(1, 499));
        let violations = trace.verify_invariants();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("before its deadline"));
    }

    #[test]
    fn unscheduled_and_double_submissions_are_flagged() {
        let mut trace = FormTrace::new();
        trace.push(submitted(9, 0));
        trace.push(submitted(9, 0));
        let violations = trace.verify_invariants();
        assert!(violations.iter().any(|v| v == "submitted 2 times"));
        assert!(violations.iter().any(|v| v.contains("without being scheduled")));
    }

    #[test]
    fn backwards_clock_is_flagged() {
        let mut trace = FormTrace::new();
        trace.push(FormTraceEvent::SubmitIgnored { at_ms: 5 });
        trace.push(FormTraceEvent::SubmitIgnored { at_ms: 4 });
        assert_eq!(trace.verify_invariants().len(), 1);
    }

    #[test]
    fn checksum_tracks_content_and_order() {
        let mut a = FormTrace::new();
        a.push(scheduled(1, 0, 500));
        a.push(submitted(1, 500));
        let mut b = FormTrace::new();
        b.push(scheduled(1, 0, 500));
        b.push(submitted(1, 500));
        assert_eq!(a.checksum(), b.checksum());

        let mut c = FormTrace::new();
        c.push(submitted(1, 500));
        c.push(scheduled(1, 0, 500));
        assert_ne!(a.checksum(), c.checksum());

        a.clear();
        assert!(a.is_empty());
    }
}
