#![forbid(unsafe_code)]

//! Structured logging integration tests.
//!
//! A capturing `tracing-subscriber` layer records every event emitted while
//! a form session runs, so the tests can check levels, messages and fields,
//! and that password values never reach the log.
//!
//! Run: `cargo test -p regform-web --test tracing_events`

use std::sync::{Arc, Mutex};

use core::time::Duration;

use regform_core::{FieldId, FormConfig};
use regform_web::{DeterministicClock, Page, RecordingSink, RegistrationForm};
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its level, message and fields.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: Vec<(String, String)>,
}

/// A tracing Layer that captures events.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Visitor that extracts event fields.
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn session(secret: &str) {
    let mut form = RegistrationForm::new(
        Page::registration(),
        RecordingSink::new(),
        DeterministicClock::new(),
        FormConfig::default(),
    )
    .unwrap();
    form.type_into(FieldId::Username, "user_1").unwrap();
    form.type_into(FieldId::Nickname, "Bob").unwrap();
    form.type_into(FieldId::Password, secret).unwrap();
    form.type_into(FieldId::ConfirmPassword, secret).unwrap();
    form.handle_submit().unwrap();
    form.handle_submit().unwrap();
    form.advance(Duration::from_millis(500)).unwrap();
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn submission_lifecycle_is_logged_at_info() {
    let events = capture(|| session("Secr3t!pw"));
    let info: Vec<&str> = events
        .iter()
        .filter(|e| e.level == tracing::Level::INFO)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(info, vec!["submit scheduled", "form submitted"]);
}

#[test]
fn duplicate_submit_is_logged_at_warn() {
    let events = capture(|| session("Secr3t!pw"));
    let warnings: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("already in flight"));
}

#[test]
fn rendering_is_logged_with_field_names() {
    let events = capture(|| session("Secr3t!pw"));
    let rendered: Vec<&str> = events
        .iter()
        .filter(|e| e.message == "field rendered")
        .flat_map(|e| e.fields.iter())
        .filter(|(name, _)| name == "field")
        .map(|(_, value)| value.as_str())
        .collect();
    assert!(rendered.contains(&"username"));
    assert!(rendered.contains(&"confirmPassword"));
    assert!(events.iter().any(|e| e.message == "strength rendered"));
}

#[test]
fn password_never_reaches_the_log() {
    let secret = "Secr3t!pw";
    let events = capture(|| session(secret));
    assert!(!events.is_empty());
    for event in &events {
        assert!(!event.message.contains(secret), "{event:?}");
        for (_, value) in &event.fields {
            assert!(!value.contains(secret), "{event:?}");
        }
    }
}
