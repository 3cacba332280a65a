#![forbid(unsafe_code)]

//! The four fixed field rules of the registration form.

use std::sync::LazyLock;

use regex::Regex;

use super::validators::{
    MatchesPassword, MaxLength, MinLength, PasswordPair, Pattern, ValidationError,
    ValidationKind, ValidationResult, Validator,
};
use crate::field::{FieldId, FieldOutcome};
use crate::messages::MessageCatalog;
use crate::values::FormValues;

/// Shortest accepted username.
pub const USERNAME_MIN_LEN: usize = 3;
/// Longest accepted username.
pub const USERNAME_MAX_LEN: usize = 50;
/// Accepted usernames: ASCII letters, digits and underscores.
pub const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9_]{3,50}$";
/// Longest accepted nickname (after trimming).
pub const NICKNAME_MAX_LEN: usize = 20;
/// Shortest accepted password.
pub const PASSWORD_MIN_LEN: usize = 6;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(USERNAME_PATTERN).expect("username pattern compiles"));

/// The rule set for all four fields, with messages from one catalog.
///
/// Every rule treats an empty value as neutral: the outcome is flagged
/// `empty` with a `Valid` result, so the field renders `normal` while the
/// aggregate gate still rejects it.
#[derive(Debug, Clone)]
pub struct FieldRules {
    catalog: MessageCatalog,
    username: Pattern,
    nickname: MaxLength,
    password: MinLength,
    confirm: MatchesPassword,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self::new(MessageCatalog::default())
    }
}

impl FieldRules {
    /// Build the rules with messages from `catalog`.
    #[must_use]
    pub fn new(catalog: MessageCatalog) -> Self {
        Self {
            username: Pattern::new(
                USERNAME_REGEX.clone(),
                ValidationKind::Format,
                catalog.template(FieldId::Username, ValidationKind::Format),
            ),
            nickname: MaxLength::new(
                NICKNAME_MAX_LEN,
                ValidationKind::Format,
                catalog.template(FieldId::Nickname, ValidationKind::Format),
            ),
            password: MinLength::new(
                PASSWORD_MIN_LEN,
                ValidationKind::Length,
                catalog.template(FieldId::Password, ValidationKind::Length),
            ),
            confirm: MatchesPassword::new(
                catalog.template(FieldId::ConfirmPassword, ValidationKind::Mismatch),
            ),
            catalog,
        }
    }

    /// The catalog the messages come from.
    #[must_use]
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Validate one field against the current values.
    ///
    /// Confirm-password reads the current password; no other field looks at
    /// its neighbours.
    #[must_use]
    pub fn check(&self, field: FieldId, values: &FormValues) -> FieldOutcome {
        let empty = values.is_empty(field);
        let result = if empty {
            ValidationResult::Valid
        } else {
            let value = values.effective(field);
            match field {
                FieldId::Username => self.check_username(value),
                FieldId::Nickname => self.nickname.validate(value),
                FieldId::Password => self.password.validate(value),
                FieldId::ConfirmPassword => self.confirm.validate(&PasswordPair {
                    password: &values.password,
                    confirm: value,
                }),
            }
        };
        tracing::trace!(
            field = %field,
            empty,
            valid = result.is_valid(),
            kind = ?result.kind(),
            "field checked"
        );
        FieldOutcome {
            field,
            empty,
            result,
        }
    }

    /// Validate all four fields, in form order.
    #[must_use]
    pub fn check_all(&self, values: &FormValues) -> [FieldOutcome; 4] {
        FieldId::ALL.map(|field| self.check(field, values))
    }

    /// The "required" error for a field left empty.
    #[must_use]
    pub fn required_error(&self, field: FieldId) -> ValidationError {
        ValidationError::new(
            ValidationKind::Required,
            self.catalog.template(field, ValidationKind::Required),
        )
    }

    fn check_username(&self, value: &str) -> ValidationResult {
        match self.username.validate(value) {
            ValidationResult::Valid => ValidationResult::Valid,
            ValidationResult::Invalid(err) => ValidationResult::Invalid(
                err.with_param("min", USERNAME_MIN_LEN)
                    .with_param("max", USERNAME_MAX_LEN),
            ),
        }
    }
}

fn check_single(field: FieldId, values: &FormValues) -> ValidationResult {
    FieldRules::default().check(field, values).result
}

/// Validate a username with the English catalog. Empty is neutral-valid.
#[must_use]
pub fn validate_username(value: &str) -> ValidationResult {
    let values = FormValues {
        username: value.to_owned(),
        ..FormValues::default()
    };
    check_single(FieldId::Username, &values)
}

/// Validate a nickname with the English catalog. Empty is neutral-valid.
#[must_use]
pub fn validate_nickname(value: &str) -> ValidationResult {
    let values = FormValues {
        nickname: value.to_owned(),
        ..FormValues::default()
    };
    check_single(FieldId::Nickname, &values)
}

/// Validate a password with the English catalog. Empty is neutral-valid.
#[must_use]
pub fn validate_password(value: &str) -> ValidationResult {
    let values = FormValues {
        password: value.to_owned(),
        ..FormValues::default()
    };
    check_single(FieldId::Password, &values)
}

/// Validate a confirmation against a password with the English catalog.
///
/// Valid exactly when `confirm` is empty or equal to `password`.
#[must_use]
pub fn validate_confirm_password(password: &str, confirm: &str) -> ValidationResult {
    let values = FormValues {
        password: password.to_owned(),
        confirm_password: confirm.to_owned(),
        ..FormValues::default()
    };
    check_single(FieldId::ConfirmPassword, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldState;

    // -- username --

    #[test]
    fn username_accepts_pattern() {
        assert!(validate_username("abc").is_valid());
        assert!(validate_username("user_1").is_valid());
        assert!(validate_username(&"a".repeat(50)).is_valid());
    }

    #[test]
    fn username_rejects_outside_pattern() {
        for bad in ["ab", "user name", "user-1", "用户名", &"a".repeat(51)] {
            let result = validate_username(bad);
            assert_eq!(result.kind(), Some(ValidationKind::Format), "{bad:?}");
        }
    }

    #[test]
    fn username_message_is_interpolated() {
        let message = validate_username("ab").error_message().unwrap();
        assert_eq!(
            message,
            "Invalid username: use 3-50 letters, digits or underscores"
        );
    }

    #[test]
    fn username_is_trimmed() {
        assert!(validate_username("  bob  ").is_valid());
        assert!(validate_username("   ").is_valid());
    }

    // -- nickname --

    #[test]
    fn nickname_length_bounds() {
        assert!(validate_nickname("B").is_valid());
        assert!(validate_nickname(&"n".repeat(20)).is_valid());
        assert!(validate_nickname(&"n".repeat(21)).is_invalid());
        assert!(validate_nickname(&format!("  {}  ", "n".repeat(20))).is_valid());
    }

    #[test]
    fn nickname_counts_characters() {
        assert!(validate_nickname(&"昵".repeat(20)).is_valid());
        assert!(validate_nickname(&"昵".repeat(21)).is_invalid());
    }

    #[test]
    fn emoji_count_as_two_units() {
        assert!(validate_nickname(&"😀".repeat(10)).is_valid());
        assert!(validate_nickname(&"😀".repeat(11)).is_invalid());
        assert!(validate_password("😀😀😀").is_valid());
        assert!(validate_password("😀😀").is_invalid());
    }

    #[test]
    fn byte_order_mark_is_trimmed_from_username() {
        assert!(validate_username("\u{FEFF}user_1").is_valid());
        assert!(validate_username("\u{0085}user_1").is_invalid());
    }

    // -- password --

    #[test]
    fn password_min_length() {
        assert!(validate_password("").is_valid());
        assert!(validate_password("abcdef").is_valid());
        let short = validate_password("abc");
        assert_eq!(short.kind(), Some(ValidationKind::Length));
        assert_eq!(
            short.error_message().as_deref(),
            Some("Password is too short: at least 6 characters required")
        );
    }

    #[test]
    fn password_is_not_trimmed() {
        assert!(validate_password("      ").is_valid());
        assert!(validate_password(" ab ").is_invalid());
    }

    // -- confirm --

    #[test]
    fn confirm_matches_or_empty() {
        assert!(validate_confirm_password("abcdef", "").is_valid());
        assert!(validate_confirm_password("abcdef", "abcdef").is_valid());
        assert!(validate_confirm_password("", "").is_valid());
        assert_eq!(
            validate_confirm_password("abcdef", "abcdeg").kind(),
            Some(ValidationKind::Mismatch)
        );
        assert!(validate_confirm_password("abcdef", "abcdef ").is_invalid());
    }

    // -- rule set --

    #[test]
    fn check_flags_empty_as_neutral() {
        let rules = FieldRules::default();
        let outcomes = rules.check_all(&FormValues::default());
        for outcome in outcomes {
            assert!(outcome.empty);
            assert_eq!(outcome.state(), FieldState::Normal);
            assert!(!outcome.passes_gate());
        }
    }

    #[test]
    fn chinese_rules_render_product_messages() {
        let rules = FieldRules::new(MessageCatalog::chinese());
        let values = FormValues::new("ab", &"昵".repeat(21), "abc", "abd");
        let messages: Vec<_> = rules
            .check_all(&values)
            .iter()
            .map(|o| o.result.error_message().unwrap())
            .collect();
        assert_eq!(
            messages,
            vec![
                "用户名格式不正确，请使用3-50个字母、数字或下划线".to_string(),
                "昵称不能为空且不能超过20个字符".to_string(),
                "密码至少需要6个字符".to_string(),
                "两次输入的密码不一致".to_string(),
            ]
        );
    }

    #[tracing_test::traced_test]
    #[test]
    fn check_logs_verdict_but_never_the_value() {
        let rules = FieldRules::default();
        let outcome = rules.check(
            FieldId::Password,
            &FormValues::new("", "", "s3cret-pw", ""),
        );
        assert!(outcome.passes_gate());
        assert!(logs_contain("field checked"));
        assert!(!logs_contain("s3cret-pw"));
    }

    #[test]
    fn required_error_uses_catalog() {
        let rules = FieldRules::new(MessageCatalog::chinese());
        let err = rules.required_error(FieldId::Nickname);
        assert_eq!(err.kind, ValidationKind::Required);
        assert_eq!(err.format_message(), "此项为必填项");
    }
}
