#![forbid(unsafe_code)]

//! Field validation: pure predicates from raw input to [`ValidationResult`].
//!
//! - [`Validator`] is the building-block trait (`Pattern`, `MinLength`,
//!   `MaxLength`, `MatchesPassword`).
//! - [`FieldRules`] assembles the four fixed field rules with localized
//!   messages and reports a [`FieldOutcome`](crate::field::FieldOutcome) per
//!   field.
//! - The `validate_*` functions are English-catalog shorthands.
//!
//! # Example
//!
//! ```rust
//! use regform_core::validation::{validate_confirm_password, validate_username};
//!
//! assert!(validate_username("user_1").is_valid());
//! assert!(validate_username("").is_valid()); // empty is neutral
//! assert!(!validate_username("no spaces").is_valid());
//! assert!(!validate_confirm_password("abcdef", "abcdeg").is_valid());
//! ```

mod rules;
mod validators;

pub use rules::{
    FieldRules, NICKNAME_MAX_LEN, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
    USERNAME_PATTERN, validate_confirm_password, validate_nickname, validate_password,
    validate_username,
};
pub use validators::{
    MatchesPassword, MaxLength, MinLength, PasswordPair, Pattern, ValidationError,
    ValidationKind, ValidationResult, Validator,
};
