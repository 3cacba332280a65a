#![forbid(unsafe_code)]

//! The registration form driver.
//!
//! # Event flow
//!
//! ```text
//! FormEvent::Input(field) ─► rules.check(field) ─► FieldView ─► presenter
//!                            (password: strength first)
//! FormEvent::Submit ───────► re-render non-empty fields ─► GateReport
//!                              ├─ closed: Rejected (optional highlight)
//!                              └─ open:   loading + disabled, schedule
//! tick() ──────────────────► due SubmitForm ─► read values ─► sink
//! ```
//!
//! Everything runs synchronously in the caller. The only deferred work is
//! the submit, which fires from [`RegistrationForm::tick`] once the clock
//! reaches its deadline.

use core::time::Duration;

use regform_core::{
    FieldId, FieldRules, FieldView, FormConfig, FormModel, FormValues, GateReport,
    StrengthScore,
};

use crate::clock::{Clock, DeterministicClock, millis};
use crate::presenter::FieldPresenter;
use crate::scheduler::{ScheduledTask, Scheduler};
use crate::submission::{Deferred, SubmissionState, SubmitSink};
use crate::surface::{ElementId, PageError, Surface};
use crate::trace::{FormTrace, FormTraceEvent};

/// An event the host dispatches to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEvent {
    /// The field's value changed.
    Input(FieldId),
    /// The form was submitted.
    Submit,
}

/// What handling an event did.
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// An input event rendered the field into this view.
    Rendered(FieldView),
    /// The gate stayed closed; nothing was scheduled.
    Rejected(GateReport),
    /// The gate opened; the submit fires when the task is due.
    Scheduled(ScheduledTask),
    /// A submit arrived while one was in flight.
    Ignored,
}

/// A registration form bound to a surface, a submit sink and a clock.
#[derive(Debug)]
pub struct RegistrationForm<S, K, C> {
    surface: S,
    sink: K,
    clock: C,
    config: FormConfig,
    rules: FieldRules,
    model: FormModel,
    state: SubmissionState,
    scheduler: Scheduler<Deferred>,
    pending: Option<ScheduledTask>,
    trace: FormTrace,
}

impl<S: Surface, K: SubmitSink, C: Clock> RegistrationForm<S, K, C> {
    /// Bind the form, checking that the markup has every required element.
    pub fn new(surface: S, sink: K, clock: C, config: FormConfig) -> Result<Self, PageError> {
        surface.verify()?;
        let rules = config.rules();
        tracing::debug!(
            locale = %config.locale,
            language = ?rules.catalog().language(),
            "registration form bound"
        );
        Ok(Self {
            surface,
            sink,
            clock,
            config,
            rules,
            model: FormModel::new(),
            state: SubmissionState::Idle,
            scheduler: Scheduler::new(),
            pending: None,
            trace: FormTrace::new(),
        })
    }

    /// Route an event to its handler.
    pub fn dispatch(&mut self, event: FormEvent) -> Result<Dispatch, PageError> {
        match event {
            FormEvent::Input(field) => self.handle_input(field).map(Dispatch::Rendered),
            FormEvent::Submit => self.handle_submit(),
        }
    }

    /// Set a field's value as typing would, then dispatch its input event.
    pub fn type_into(&mut self, field: FieldId, value: &str) -> Result<FieldView, PageError> {
        self.surface.set_value(ElementId::Field(field), value)?;
        self.handle_input(field)
    }

    /// Validate and render one field from the page's current values.
    ///
    /// A password input refreshes the strength indicator but leaves
    /// confirm-password untouched.
    pub fn handle_input(&mut self, field: FieldId) -> Result<FieldView, PageError> {
        let values = self.read_values()?;
        self.render_field(field, &values)
    }

    /// Handle a submit attempt.
    pub fn handle_submit(&mut self) -> Result<Dispatch, PageError> {
        let now = self.clock.now_mono();
        if self.state == SubmissionState::Submitting {
            tracing::warn!("submit ignored: a submission is already in flight");
            self.trace
                .push(FormTraceEvent::SubmitIgnored { at_ms: millis(now) });
            return Ok(Dispatch::Ignored);
        }

        let values = self.read_values()?;
        for field in FieldId::ALL {
            if !values.is_empty(field) {
                self.render_field(field, &values)?;
            }
        }

        let report = GateReport::evaluate(&self.rules, &values);
        if !report.is_open() {
            self.reject(&report, now)?;
            return Ok(Dispatch::Rejected(report));
        }

        self.state = SubmissionState::Submitting;
        FieldPresenter::render_submitting(&mut self.surface)?;
        let task = self
            .scheduler
            .schedule(now, self.config.submit_delay, Deferred::SubmitForm);
        self.trace.push(FormTraceEvent::SubmitScheduled {
            task: task.id,
            due_ms: millis(task.due),
            at_ms: millis(now),
        });
        tracing::info!(
            task = %task.id,
            delay_ms = millis(self.config.submit_delay),
            "submit scheduled"
        );
        self.pending = Some(task.clone());
        Ok(Dispatch::Scheduled(task))
    }

    /// Run deferred work that is due, returning how many submits fired.
    ///
    /// Values are read before any task leaves the queue, so a page error
    /// leaves due work pending for the next tick.
    pub fn tick(&mut self) -> Result<usize, PageError> {
        let now = self.clock.now_mono();
        if !self.scheduler.next_due().is_some_and(|due| due <= now) {
            return Ok(0);
        }
        let values = self.read_values()?;
        let mut fired = 0;
        for (id, _due, deferred) in self.scheduler.poll_due(now) {
            match deferred {
                Deferred::SubmitForm => {
                    self.sink.submit(&values);
                    self.trace.push(FormTraceEvent::Submitted {
                        task: id,
                        at_ms: millis(now),
                    });
                    tracing::info!(task = %id, "form submitted");
                    if self.pending.as_ref().is_some_and(|t| t.id == id) {
                        self.pending = None;
                    }
                    fired += 1;
                }
            }
        }
        Ok(fired)
    }

    /// Cancel the pending submit, if any. The control stays disabled.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(task) => {
                task.token.cancel();
                tracing::debug!(task = %task.id, "pending submit cancelled");
                true
            }
            None => false,
        }
    }

    /// Read the four field values from the page.
    pub fn read_values(&self) -> Result<FormValues, PageError> {
        let mut values = FormValues::default();
        for field in FieldId::ALL {
            values.set(field, self.surface.value(ElementId::Field(field))?);
        }
        Ok(values)
    }

    fn render_field(&mut self, field: FieldId, values: &FormValues) -> Result<FieldView, PageError> {
        let at_ms = millis(self.clock.now_mono());
        if field == FieldId::Password {
            let score = StrengthScore::of(&values.password);
            FieldPresenter::render_strength(&mut self.surface, score)?;
            self.model.set_strength(score);
            self.trace
                .push(FormTraceEvent::StrengthRendered { score, at_ms });
        }
        let view = self.rules.check(field, values).view();
        FieldPresenter::render(&mut self.surface, field, &view)?;
        self.model.apply(field, view.clone());
        self.trace.push(FormTraceEvent::FieldRendered {
            field,
            state: view.state,
            at_ms,
        });
        Ok(view)
    }

    fn reject(&mut self, report: &GateReport, now: Duration) -> Result<(), PageError> {
        let missing: Vec<FieldId> = report.missing().collect();
        let failing = report.failing().count();
        tracing::debug!(
            missing = ?missing,
            failing,
            highlight = self.config.highlight_missing,
            "submit rejected by gate"
        );
        self.trace.push(FormTraceEvent::GateRejected {
            missing: u8::try_from(missing.len()).unwrap_or(u8::MAX),
            invalid: u8::try_from(failing - missing.len()).unwrap_or(u8::MAX),
            at_ms: millis(now),
        });
        if self.config.highlight_missing {
            for field in missing {
                let message = self.rules.required_error(field).format_message();
                let view = FieldView::error(message);
                FieldPresenter::render(&mut self.surface, field, &view)?;
                self.model.apply(field, view.clone());
                self.trace.push(FormTraceEvent::FieldRendered {
                    field,
                    state: view.state,
                    at_ms: millis(now),
                });
            }
        }
        Ok(())
    }
}

impl<S, K, C> RegistrationForm<S, K, C> {
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable page access, for hosts that edit values without events.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Per-field views and strength as last rendered.
    #[must_use]
    pub fn model(&self) -> &FormModel {
        &self.model
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// The submit waiting for its deadline, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&ScheduledTask> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn trace(&self) -> &FormTrace {
        &self.trace
    }

    /// Release the page and the sink.
    pub fn into_parts(self) -> (S, K) {
        (self.surface, self.sink)
    }
}

impl<S: Surface, K: SubmitSink> RegistrationForm<S, K, DeterministicClock> {
    /// Advance the deterministic clock by `dt` and run due work.
    pub fn advance(&mut self, dt: Duration) -> Result<usize, PageError> {
        self.clock.advance(dt);
        self.tick()
    }
}
