#![forbid(unsafe_code)]

//! Field identities, visual states and the pure reducer between them.
//!
//! A field's state is a projection of its latest [`FieldOutcome`]:
//!
//! | Outcome | State | Message |
//! |---------|-------|---------|
//! | empty value | `Normal` | none |
//! | non-empty, valid | `Success` | none |
//! | non-empty, invalid | `Error` | formatted error |
//!
//! Empty always maps to `Normal`, whatever the field's own rule says.

use std::fmt;

use crate::strength::StrengthScore;
use crate::validation::{ValidationKind, ValidationResult};

// ---------------------------------------------------------------------------
// FieldId
// ---------------------------------------------------------------------------

/// One of the four registration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FieldId {
    Username,
    Nickname,
    Password,
    ConfirmPassword,
}

impl FieldId {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [
        Self::Username,
        Self::Nickname,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Stable element identifier of the input control.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Nickname => "nickname",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Parse an element identifier back into a field.
    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.element_id() == id)
    }

    /// Whether emptiness and comparisons use the trimmed value.
    ///
    /// Password fields are compared verbatim.
    #[must_use]
    pub const fn trims_input(self) -> bool {
        matches!(self, Self::Username | Self::Nickname)
    }

    /// Position in [`FieldId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Username => 0,
            Self::Nickname => 1,
            Self::Password => 2,
            Self::ConfirmPassword => 3,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

// ---------------------------------------------------------------------------
// FieldState
// ---------------------------------------------------------------------------

/// Visual classification of one input control. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldState {
    #[default]
    Normal,
    Success,
    Error,
}

impl FieldState {
    /// The exclusive presentation class for this state, if any.
    #[must_use]
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Success => Some("success"),
            Self::Error => Some("error"),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldOutcome
// ---------------------------------------------------------------------------

/// What a field's validator concluded about its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    /// Which field was validated.
    pub field: FieldId,
    /// Whether the (trimmed, where applicable) value is empty.
    pub empty: bool,
    /// Validator verdict. Always `Valid` when `empty`.
    pub result: ValidationResult,
}

impl FieldOutcome {
    /// Lenient per-field verdict: empty counts as valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.empty || self.result.is_valid()
    }

    /// Strict verdict used by the aggregate gate: non-empty and valid.
    #[must_use]
    pub fn passes_gate(&self) -> bool {
        !self.empty && self.result.is_valid()
    }

    /// Project the outcome onto a visual state.
    #[must_use]
    pub fn state(&self) -> FieldState {
        if self.empty {
            FieldState::Normal
        } else if self.result.is_valid() {
            FieldState::Success
        } else {
            FieldState::Error
        }
    }

    /// Failure kind, if the non-empty value was rejected.
    #[must_use]
    pub fn kind(&self) -> Option<ValidationKind> {
        if self.empty { None } else { self.result.kind() }
    }

    /// Reduce to the view the presenter renders.
    #[must_use]
    pub fn view(&self) -> FieldView {
        let state = self.state();
        let message = match state {
            FieldState::Error => self.result.error_message(),
            FieldState::Normal | FieldState::Success => None,
        };
        FieldView { state, message }
    }
}

// ---------------------------------------------------------------------------
// FieldView / FormModel
// ---------------------------------------------------------------------------

/// Explicit per-field state: the visual state plus the inline message.
///
/// Invariant: `message.is_some()` iff `state == FieldState::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldView {
    pub state: FieldState,
    pub message: Option<String>,
}

impl FieldView {
    /// A view in the error state with the given message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            state: FieldState::Error,
            message: Some(message.into()),
        }
    }
}

/// The state of all four fields plus the strength score.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormModel {
    views: [FieldView; 4],
    strength: StrengthScore,
}

impl FormModel {
    /// A model with every field `Normal` and a zero score.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view of a field.
    #[must_use]
    pub fn view(&self, field: FieldId) -> &FieldView {
        &self.views[field.index()]
    }

    /// Replace a field's view, returning `true` if it changed.
    pub fn apply(&mut self, field: FieldId, view: FieldView) -> bool {
        let slot = &mut self.views[field.index()];
        if *slot == view {
            return false;
        }
        *slot = view;
        true
    }

    /// Latest password strength score.
    #[must_use]
    pub fn strength(&self) -> StrengthScore {
        self.strength
    }

    /// Record a new strength score.
    pub fn set_strength(&mut self, score: StrengthScore) {
        self.strength = score;
    }
}
