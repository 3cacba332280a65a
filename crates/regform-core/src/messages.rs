#![forbid(unsafe_code)]

//! Localized inline error messages.
//!
//! Templates may reference `{min}`, `{max}` and `{actual}`; the validators
//! fill them in. Once interpolated, the Chinese catalog yields the product
//! strings of the registration page verbatim.

use crate::field::FieldId;
use crate::validation::ValidationKind;

/// A normalized locale tag such as `en`, `en-US` or `zh-CN`.
pub type Locale = String;

/// Languages with a message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Language {
    /// English (default).
    #[default]
    English,
    /// Simplified Chinese.
    Chinese,
}

impl Language {
    /// Pick the catalog language for a locale tag.
    ///
    /// Any tag whose primary subtag is `zh` selects Chinese; everything else
    /// falls back to English.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let primary = locale.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("zh") {
            Self::Chinese
        } else {
            Self::English
        }
    }
}

/// Message templates for every inline error the form can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    language: Language,
    username_format: &'static str,
    nickname_format: &'static str,
    password_too_short: &'static str,
    password_mismatch: &'static str,
    required: &'static str,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageCatalog {
    /// English catalog.
    #[must_use]
    pub const fn english() -> Self {
        Self {
            language: Language::English,
            username_format: "Invalid username: use {min}-{max} letters, digits or underscores",
            nickname_format: "Nickname must not be empty or longer than {max} characters",
            password_too_short: "Password is too short: at least {min} characters required",
            password_mismatch: "Passwords do not match",
            required: "This field is required",
        }
    }

    /// Simplified Chinese catalog.
    #[must_use]
    pub const fn chinese() -> Self {
        Self {
            language: Language::Chinese,
            username_format: "用户名格式不正确，请使用{min}-{max}个字母、数字或下划线",
            nickname_format: "昵称不能为空且不能超过{max}个字符",
            password_too_short: "密码至少需要{min}个字符",
            password_mismatch: "两次输入的密码不一致",
            required: "此项为必填项",
        }
    }

    /// Catalog for a language.
    #[must_use]
    pub const fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::english(),
            Language::Chinese => Self::chinese(),
        }
    }

    /// Catalog for a locale tag.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        Self::for_language(Language::for_locale(locale))
    }

    /// Language of this catalog.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Template for a failure of `kind` on `field`.
    ///
    /// `Required` is shared by all fields. A kind a field never produces
    /// falls back to that field's own failure message.
    #[must_use]
    pub fn template(&self, field: FieldId, kind: ValidationKind) -> &'static str {
        if kind == ValidationKind::Required {
            return self.required;
        }
        match field {
            FieldId::Username => self.username_format,
            FieldId::Nickname => self.nickname_format,
            FieldId::Password => self.password_too_short,
            FieldId::ConfirmPassword => self.password_mismatch,
        }
    }
}
