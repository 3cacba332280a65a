#![forbid(unsafe_code)]

//! Password strength scoring.
//!
//! The score counts how many of five independent checks hold:
//!
//! 1. at least six UTF-16 code units
//! 2. an ASCII lowercase letter
//! 3. an ASCII uppercase letter
//! 4. an ASCII digit
//! 5. any character outside `[A-Za-z0-9]`
//!
//! Checks are counted, not ordered, so the score never depends on where a
//! character sits in the password.

use std::fmt;

use crate::text::input_len;

/// Minimum length counted by the length check.
pub const STRENGTH_MIN_LENGTH: usize = 6;

/// Which of the five strength checks a password satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrengthChecks {
    pub long_enough: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl StrengthChecks {
    /// Evaluate all checks against a password.
    #[must_use]
    pub fn of(password: &str) -> Self {
        let mut checks = Self {
            long_enough: input_len(password) >= STRENGTH_MIN_LENGTH,
            ..Self::default()
        };
        for c in password.chars() {
            match c {
                'a'..='z' => checks.lowercase = true,
                'A'..='Z' => checks.uppercase = true,
                '0'..='9' => checks.digit = true,
                _ => checks.symbol = true,
            }
        }
        checks
    }

    /// Number of checks that hold.
    #[must_use]
    pub fn count(self) -> u8 {
        [
            self.long_enough,
            self.lowercase,
            self.uppercase,
            self.digit,
            self.symbol,
        ]
        .into_iter()
        .map(u8::from)
        .sum()
    }
}

/// Password strength in `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StrengthScore(u8);

impl StrengthScore {
    /// Highest possible score.
    pub const MAX: Self = Self(5);

    /// Score a password.
    #[must_use]
    pub fn of(password: &str) -> Self {
        Self(StrengthChecks::of(password).count())
    }

    /// Which of the five checks `password` passes.
    #[must_use]
    pub fn breakdown(password: &str) -> StrengthChecks {
        StrengthChecks::of(password)
    }

    /// Build a score from a raw value, clamped to `[0, 5]`.
    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        if value > Self::MAX.0 { Self::MAX } else { Self(value) }
    }

    /// Raw score value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The cosmetic band this score falls into.
    #[must_use]
    pub const fn band(self) -> StrengthBand {
        match self.0 {
            0 => StrengthBand::Empty,
            1 | 2 => StrengthBand::Weak,
            3 => StrengthBand::Fair,
            4 => StrengthBand::Good,
            _ => StrengthBand::Strong,
        }
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX.0)
    }
}

/// Score a password. Shorthand for [`StrengthScore::of`].
#[must_use]
pub fn password_strength(password: &str) -> StrengthScore {
    StrengthScore::of(password)
}

/// Cosmetic category of a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrengthBand {
    /// Score 0: rendered as a zero-width indicator, not as "weak".
    Empty,
    /// Score 1–2.
    Weak,
    /// Score 3.
    Fair,
    /// Score 4.
    Good,
    /// Score 5.
    Strong,
}

impl StrengthBand {
    /// Presentation class added to the indicator, if any.
    #[must_use]
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Weak => Some("weak"),
            Self::Fair => Some("fair"),
            Self::Good => Some("good"),
            Self::Strong => Some("strong"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_scores_zero() {
        assert_eq!(password_strength("").get(), 0);
        assert_eq!(password_strength("").band(), StrengthBand::Empty);
    }

    #[test]
    fn all_classes_score_five() {
        assert_eq!(password_strength("Aa1!aa"), StrengthScore::MAX);
        assert_eq!(password_strength("Aa1!aa").band(), StrengthBand::Strong);
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(password_strength("abc123"), password_strength("123abc"));
        assert_eq!(password_strength("abc123").get(), 3);
    }

    #[test]
    fn short_password_counts_classes_only() {
        let checks = StrengthChecks::of("aA1");
        assert!(!checks.long_enough);
        assert!(checks.lowercase && checks.uppercase && checks.digit);
        assert!(!checks.symbol);
        assert_eq!(checks.count(), 3);
    }

    #[test]
    fn non_ascii_letters_count_as_symbols() {
        let checks = StrengthChecks::of("é");
        assert!(checks.symbol);
        assert!(!checks.lowercase);
        assert_eq!(password_strength("密码").get(), 1);
    }

    #[test]
    fn length_counts_utf16_units() {
        assert!(StrengthChecks::of("密码密码密码").long_enough);
        assert!(!StrengthChecks::of("密码").long_enough);
        assert!(StrengthChecks::of("😀😀😀").long_enough);
        assert_eq!(password_strength("😀😀😀").get(), 2);
    }

    #[test]
    fn breakdown_matches_score() {
        let checks = StrengthScore::breakdown("abc12!");
        assert_eq!(
            checks,
            StrengthChecks {
                long_enough: true,
                lowercase: true,
                uppercase: false,
                digit: true,
                symbol: true,
            }
        );
        assert_eq!(checks.count(), StrengthScore::of("abc12!").get());
    }

    #[test]
    fn bands_follow_score() {
        let bands: Vec<_> = (0..=5)
            .map(|n| StrengthScore::from_raw(n).band())
            .collect();
        assert_eq!(
            bands,
            vec![
                StrengthBand::Empty,
                StrengthBand::Weak,
                StrengthBand::Weak,
                StrengthBand::Fair,
                StrengthBand::Good,
                StrengthBand::Strong,
            ]
        );
        assert_eq!(StrengthBand::Empty.class(), None);
        assert_eq!(StrengthBand::Fair.class(), Some("fair"));
    }

    #[test]
    fn from_raw_clamps() {
        assert_eq!(StrengthScore::from_raw(9), StrengthScore::MAX);
        assert_eq!(StrengthScore::from_raw(2).to_string(), "2/5");
    }
}
