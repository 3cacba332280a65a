#![forbid(unsafe_code)]

//! Core validation types and the building blocks the field rules are made of.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;

use crate::text::input_len;

// ---------------------------------------------------------------------------
// ValidationKind
// ---------------------------------------------------------------------------

/// Category of a failed validation.
///
/// The category drives which catalog message a field shows and is stable
/// across locales, so hosts can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValidationKind {
    /// Username pattern or nickname length violation.
    Format,
    /// Password shorter than the minimum.
    Length,
    /// Confirmation differs from the password.
    Mismatch,
    /// Required field left empty (only surfaced by missing-field highlighting).
    Required,
}

impl ValidationKind {
    /// Stable identifier for logs and i18n lookups.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Length => "too_short",
            Self::Mismatch => "mismatch",
            Self::Required => "required",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A failed validation: its kind, a message template and interpolation params.
///
/// Templates use `{key}` placeholders, filled from `params` by
/// [`format_message`](Self::format_message).
///
/// ```rust
/// use regform_core::validation::{ValidationError, ValidationKind};
///
/// let error = ValidationError::new(ValidationKind::Length, "At least {min} characters")
///     .with_param("min", 6);
///
/// assert_eq!(error.format_message(), "At least 6 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What went wrong.
    pub kind: ValidationKind,
    /// Message template.
    pub message: String,
    /// Parameters for message interpolation.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter for message interpolation.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Format the message with parameter substitution.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.clone();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The result of a validation operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The value is valid.
    #[default]
    Valid,
    /// The value is invalid with an error.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if the result is `Invalid`.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns the error if the result is `Invalid`, otherwise `None`.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Returns the formatted error message if the result is `Invalid`.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ValidationError::format_message)
    }

    /// Returns the error kind if the result is `Invalid`.
    #[must_use]
    pub fn kind(&self) -> Option<ValidationKind> {
        self.error().map(|e| e.kind)
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// A trait for validating values of type `T`.
pub trait Validator<T: ?Sized>: Send + Sync {
    /// Validate the given value.
    fn validate(&self, value: &T) -> ValidationResult;

    /// Return the message template this validator reports on failure.
    fn error_message(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Validates that a string matches a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    kind: ValidationKind,
    message: String,
}

impl Pattern {
    /// Wrap a compiled regex. Failures report `kind` with `message`.
    #[must_use]
    pub fn new(regex: Regex, kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            regex,
            kind,
            message: message.into(),
        }
    }

    /// The underlying expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Validator<str> for Pattern {
    fn validate(&self, value: &str) -> ValidationResult {
        if self.regex.is_match(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(self.kind, &self.message))
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Validates that a string has at least `min` characters.
///
/// Length counts UTF-16 code units (see [`input_len`]).
#[derive(Debug, Clone)]
pub struct MinLength {
    /// Minimum number of characters required.
    pub min: usize,
    kind: ValidationKind,
    message: String,
}

impl MinLength {
    /// Create a new `MinLength` validator.
    #[must_use]
    pub fn new(min: usize, kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            min,
            kind,
            message: message.into(),
        }
    }
}

impl Validator<str> for MinLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = input_len(value);
        if len < self.min {
            ValidationResult::Invalid(
                ValidationError::new(self.kind, &self.message)
                    .with_param("min", self.min)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Validates that a string has at most `max` UTF-16 code units.
#[derive(Debug, Clone)]
pub struct MaxLength {
    /// Maximum number of characters allowed.
    pub max: usize,
    kind: ValidationKind,
    message: String,
}

impl MaxLength {
    /// Create a new `MaxLength` validator.
    #[must_use]
    pub fn new(max: usize, kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            max,
            kind,
            message: message.into(),
        }
    }
}

impl Validator<str> for MaxLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = input_len(value);
        if len > self.max {
            ValidationResult::Invalid(
                ValidationError::new(self.kind, &self.message)
                    .with_param("max", self.max)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// A password together with its confirmation.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPair<'a> {
    /// Current password value.
    pub password: &'a str,
    /// Current confirmation value.
    pub confirm: &'a str,
}

/// Validates that the confirmation equals the password, byte for byte.
#[derive(Debug, Clone)]
pub struct MatchesPassword {
    message: String,
}

impl MatchesPassword {
    /// Create a new `MatchesPassword` validator.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<'a> Validator<PasswordPair<'a>> for MatchesPassword {
    fn validate(&self, pair: &PasswordPair<'a>) -> ValidationResult {
        if pair.password == pair.confirm {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(
                ValidationKind::Mismatch,
                &self.message,
            ))
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
