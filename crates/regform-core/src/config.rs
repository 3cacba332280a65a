#![forbid(unsafe_code)]

//! Form configuration and environment overrides.
//!
//! | Setting | Default | Environment |
//! |---------|---------|-------------|
//! | submit delay | 500 ms | `REGFORM_SUBMIT_DELAY_MS` |
//! | locale | detected | `REGFORM_LOCALE`, `LC_ALL`, `LANG` |
//! | highlight missing | off | `REGFORM_HIGHLIGHT_MISSING` |

use std::env;
use std::fmt;
use std::time::Duration;

use crate::messages::{Locale, MessageCatalog};
use crate::validation::FieldRules;

/// Default cosmetic delay between a passing submit and the actual handoff.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(500);

/// Environment variable overriding the submit delay (milliseconds).
pub const ENV_SUBMIT_DELAY_MS: &str = "REGFORM_SUBMIT_DELAY_MS";
/// Environment variable overriding the message locale.
pub const ENV_LOCALE: &str = "REGFORM_LOCALE";
/// Environment variable enabling missing-field highlighting.
pub const ENV_HIGHLIGHT_MISSING: &str = "REGFORM_HIGHLIGHT_MISSING";

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// An environment override that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The value is not a non-negative integer number of milliseconds.
    InvalidDelay { var: &'static str, value: String },
    /// The value is not a recognised boolean.
    InvalidFlag { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDelay { var, value } => {
                write!(f, "{var}: expected milliseconds, got {value:?}")
            }
            Self::InvalidFlag { var, value } => {
                write!(f, "{var}: expected a boolean, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// FormConfig
// ---------------------------------------------------------------------------

/// Runtime configuration of the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Delay between a passing submit and the handoff to the sink.
    pub submit_delay: Duration,
    /// Locale tag selecting the message catalog.
    pub locale: Locale,
    /// Render empty required fields as errors when a submit is rejected.
    pub highlight_missing: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay: DEFAULT_SUBMIT_DELAY,
            locale: "en".to_string(),
            highlight_missing: false,
        }
    }
}

impl FormConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through `lookup` (one call per variable name).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self {
            locale: detect_locale_from(
                lookup(ENV_LOCALE).as_deref(),
                lookup("LC_ALL").as_deref(),
                lookup("LANG").as_deref(),
            ),
            ..Self::default()
        };

        if let Some(raw) = lookup(ENV_SUBMIT_DELAY_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidDelay {
                var: ENV_SUBMIT_DELAY_MS,
                value: raw.clone(),
            })?;
            config.submit_delay = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(ENV_HIGHLIGHT_MISSING) {
            config.highlight_missing =
                parse_flag(&raw).ok_or_else(|| ConfigError::InvalidFlag {
                    var: ENV_HIGHLIGHT_MISSING,
                    value: raw.clone(),
                })?;
        }

        tracing::debug!(
            submit_delay_ms = config.submit_delay_ms(),
            locale = %config.locale,
            highlight_missing = config.highlight_missing,
            "form config loaded"
        );
        Ok(config)
    }

    /// Submit delay in whole milliseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn submit_delay_ms(&self) -> u64 {
        u64::try_from(self.submit_delay.as_millis()).unwrap_or(u64::MAX)
    }

    /// Set the submit delay.
    #[must_use]
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    /// Set the locale; the tag is normalized, unusable tags become `en`.
    #[must_use]
    pub fn with_locale(mut self, locale: impl AsRef<str>) -> Self {
        self.locale = normalize_locale(locale.as_ref()).unwrap_or_else(|| "en".to_string());
        self
    }

    /// Enable or disable missing-field highlighting.
    #[must_use]
    pub fn with_highlight_missing(mut self, enabled: bool) -> Self {
        self.highlight_missing = enabled;
        self
    }

    /// Message catalog for the configured locale.
    #[must_use]
    pub fn catalog(&self) -> MessageCatalog {
        MessageCatalog::for_locale(&self.locale)
    }

    /// Field rules using the configured catalog.
    #[must_use]
    pub fn rules(&self) -> FieldRules {
        FieldRules::new(self.catalog())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Locale detection
// ---------------------------------------------------------------------------

/// First usable tag among the explicit override, `LC_ALL` and `LANG`.
fn detect_locale_from(
    explicit: Option<&str>,
    lc_all: Option<&str>,
    lang: Option<&str>,
) -> Locale {
    explicit
        .and_then(normalize_locale)
        .or_else(|| lc_all.and_then(normalize_locale))
        .or_else(|| lang.and_then(normalize_locale))
        .unwrap_or_else(|| "en".to_string())
}

/// Strip encoding and modifier suffixes, use `-` separators, map `C`/`POSIX`
/// to `en`. Returns `None` for blank input.
fn normalize_locale(raw: &str) -> Option<Locale> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return Some("en".to_string());
    }
    Some(raw.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Language;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = FormConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FormConfig::default());
        assert_eq!(config.submit_delay, Duration::from_millis(500));
    }

    #[test]
    fn explicit_locale_beats_system_locale() {
        let config = FormConfig::from_lookup(lookup(&[
            (ENV_LOCALE, "zh_CN.UTF-8"),
            ("LC_ALL", "fr_FR.UTF-8"),
            ("LANG", "en_US.UTF-8"),
        ]))
        .unwrap();
        assert_eq!(config.locale, "zh-CN");
        assert_eq!(config.catalog().language(), Language::Chinese);
    }

    #[test]
    fn lc_all_beats_lang() {
        let locale = detect_locale_from(None, Some("de_DE@euro"), Some("zh_CN.UTF-8"));
        assert_eq!(locale, "de-DE");
    }

    #[test]
    fn posix_and_blank_fall_back_to_en() {
        assert_eq!(detect_locale_from(None, Some("C"), None), "en");
        assert_eq!(detect_locale_from(Some("  "), None, Some("POSIX")), "en");
        assert_eq!(detect_locale_from(None, None, None), "en");
    }

    #[test]
    fn delay_override_parses_millis() {
        let config = FormConfig::from_lookup(lookup(&[(ENV_SUBMIT_DELAY_MS, " 1200 ")])).unwrap();
        assert_eq!(config.submit_delay, Duration::from_millis(1200));
    }

    #[test]
    fn delay_millis_saturate() {
        assert_eq!(FormConfig::default().submit_delay_ms(), 500);
        let config = FormConfig::default().with_submit_delay(Duration::MAX);
        assert_eq!(config.submit_delay_ms(), u64::MAX);
    }

    #[test]
    fn bad_delay_is_an_error() {
        let err = FormConfig::from_lookup(lookup(&[(ENV_SUBMIT_DELAY_MS, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDelay {
                var: ENV_SUBMIT_DELAY_MS,
                value: "soon".to_string()
            }
        );
        assert!(err.to_string().contains("REGFORM_SUBMIT_DELAY_MS"));
    }

    #[test]
    fn highlight_flag_parsing() {
        let on = FormConfig::from_lookup(lookup(&[(ENV_HIGHLIGHT_MISSING, "Yes")])).unwrap();
        assert!(on.highlight_missing);
        let off = FormConfig::from_lookup(lookup(&[(ENV_HIGHLIGHT_MISSING, "0")])).unwrap();
        assert!(!off.highlight_missing);
        assert!(FormConfig::from_lookup(lookup(&[(ENV_HIGHLIGHT_MISSING, "maybe")])).is_err());
    }

    #[test]
    fn builders_override_fields() {
        let config = FormConfig::default()
            .with_submit_delay(Duration::ZERO)
            .with_locale("zh_TW.Big5")
            .with_highlight_missing(true);
        assert_eq!(config.submit_delay, Duration::ZERO);
        assert_eq!(config.locale, "zh-TW");
        assert!(config.highlight_missing);
        assert_eq!(FormConfig::default().with_locale("").locale, "en");
    }
}
