//! Validation core for the user-registration form.
//!
//! # Role in regform
//! `regform-core` holds everything that can be decided without a page: the
//! four field rules, the password strength score, the projection of a
//! validation outcome onto a visual field state, and the aggregate gate that
//! decides whether a submit may proceed. It has no UI handles; the
//! `regform-web` crate renders its results onto a page.
//!
//! # Data flow
//! input → [`FieldRules::check`](validation::FieldRules::check) →
//! [`FieldOutcome`](field::FieldOutcome) → [`FieldView`](field::FieldView);
//! password input additionally → [`StrengthScore`](strength::StrengthScore);
//! submit → [`GateReport`](gate::GateReport).
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/Deserialize for values, states, scores and reports |

#![forbid(unsafe_code)]

pub mod config;
pub mod field;
pub mod gate;
pub mod messages;
pub mod strength;
pub mod text;
pub mod validation;
pub mod values;

pub use config::{ConfigError, FormConfig};
pub use field::{FieldId, FieldOutcome, FieldState, FieldView, FormModel};
pub use gate::{FieldVerdict, GateReport, gate_allows};
pub use messages::{Language, Locale, MessageCatalog};
pub use strength::{StrengthBand, StrengthChecks, StrengthScore, password_strength};
pub use text::{input_len, trim_input};
pub use validation::{FieldRules, ValidationError, ValidationKind, ValidationResult};
pub use values::FormValues;
