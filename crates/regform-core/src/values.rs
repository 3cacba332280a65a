#![forbid(unsafe_code)]

//! Raw field values, which double as the submission payload.

use std::fmt;

use crate::field::FieldId;
use crate::text::trim_input;

/// The four raw field values, exactly as typed.
///
/// Serialized with the registration DTO field names (`confirmPassword`).
/// `Debug` masks both password fields.
#[derive(Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FormValues {
    pub username: String,
    pub nickname: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormValues {
    /// Build values for all four fields.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        nickname: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            nickname: nickname.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Raw value of a field.
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Username => &self.username,
            FieldId::Nickname => &self.nickname,
            FieldId::Password => &self.password,
            FieldId::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Replace a field's raw value.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::Username => &mut self.username,
            FieldId::Nickname => &mut self.nickname,
            FieldId::Password => &mut self.password,
            FieldId::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }

    /// The value the field's rule sees: trimmed for text fields, verbatim
    /// for passwords.
    #[must_use]
    pub fn effective(&self, field: FieldId) -> &str {
        let raw = self.get(field);
        if field.trims_input() { trim_input(raw) } else { raw }
    }

    /// Whether the field counts as empty for state and gating.
    #[must_use]
    pub fn is_empty(&self, field: FieldId) -> bool {
        self.effective(field).is_empty()
    }
}

impl fmt::Debug for FormValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValues")
            .field("username", &self.username)
            .field("nickname", &self.nickname)
            .field("password", &Masked(self.password.chars().count()))
            .field("confirm_password", &Masked(self.confirm_password.chars().count()))
            .finish()
    }
}

struct Masked(usize);

impl fmt::Debug for Masked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} chars>", self.0)
    }
}
