#![forbid(unsafe_code)]

//! `regform-web` binds the registration-form core to a DOM-like page.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment dispatches input and
//!   submit events and advances time.
//! - **Deterministic time**: the deferred submit fires from
//!   [`RegistrationForm::tick`]; with [`DeterministicClock`] a replay is
//!   bit-for-bit reproducible.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The page itself sits behind the [`Surface`] trait. [`Page`] is the
//! in-memory implementation used by the replay harness and tests.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use regform_core::{FieldId, FormConfig};
//! use regform_web::{DeterministicClock, Page, RecordingSink, RegistrationForm};
//!
//! let mut form = RegistrationForm::new(
//!     Page::registration(),
//!     RecordingSink::new(),
//!     DeterministicClock::new(),
//!     FormConfig::default(),
//! )?;
//! form.type_into(FieldId::Username, "user_1")?;
//! form.type_into(FieldId::Nickname, "Bob")?;
//! form.type_into(FieldId::Password, "abcdef")?;
//! form.type_into(FieldId::ConfirmPassword, "abcdef")?;
//! form.handle_submit()?;
//! form.advance(Duration::from_millis(500))?;
//! assert_eq!(form.sink().submissions().len(), 1);
//! # Ok::<(), regform_web::PageError>(())
//! ```

pub mod clock;
pub mod form;
pub mod page;
pub mod presenter;
pub mod scheduler;
pub mod submission;
pub mod surface;
pub mod trace;

pub use clock::{Clock, DeterministicClock, SystemClock};
pub use form::{Dispatch, FormEvent, RegistrationForm};
pub use page::{Page, PageSnapshot};
pub use presenter::FieldPresenter;
pub use scheduler::{CancelToken, ScheduledTask, Scheduler, TaskId};
pub use submission::{Deferred, RecordingSink, SubmissionState, SubmitSink};
pub use surface::{ElementId, PageError, Surface};
pub use trace::{FormTrace, FormTraceEvent};
