#![forbid(unsafe_code)]

//! Aggregate submission gate.
//!
//! The gate is strict where the per-field display is lenient: an empty field
//! renders `normal` but keeps the gate closed. The report records why each
//! field passed or failed so callers can log it or, if configured, highlight
//! missing fields.

use crate::field::{FieldId, FieldOutcome};
use crate::validation::{FieldRules, ValidationKind};
use crate::values::FormValues;

/// Gate verdict for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "verdict", content = "kind"))]
pub enum FieldVerdict {
    /// The field is empty.
    Missing,
    /// The field is non-empty but its rule rejected it.
    Invalid(ValidationKind),
    /// Non-empty and valid.
    Passed,
}

impl FieldVerdict {
    /// Verdict for a validator outcome.
    #[must_use]
    pub fn of(outcome: &FieldOutcome) -> Self {
        if outcome.empty {
            Self::Missing
        } else {
            match outcome.kind() {
                Some(kind) => Self::Invalid(kind),
                None => Self::Passed,
            }
        }
    }
}

/// Result of one submission attempt's validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateReport {
    verdicts: [FieldVerdict; 4],
}

impl GateReport {
    /// Build a report from four outcomes in form order.
    #[must_use]
    pub fn from_outcomes(outcomes: &[FieldOutcome; 4]) -> Self {
        Self {
            verdicts: outcomes.each_ref().map(FieldVerdict::of),
        }
    }

    /// Re-run every rule against `values` and report.
    #[must_use]
    pub fn evaluate(rules: &FieldRules, values: &FormValues) -> Self {
        Self::from_outcomes(&rules.check_all(values))
    }

    /// The aggregate boolean: every field non-empty and valid.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.verdicts.iter().all(|v| *v == FieldVerdict::Passed)
    }

    /// Verdict for one field.
    #[must_use]
    pub fn verdict(&self, field: FieldId) -> FieldVerdict {
        self.verdicts[field.index()]
    }

    /// Fields that are empty.
    pub fn missing(&self) -> impl Iterator<Item = FieldId> + '_ {
        FieldId::ALL
            .into_iter()
            .filter(|f| self.verdict(*f) == FieldVerdict::Missing)
    }

    /// Fields that keep the gate closed, with their verdicts.
    pub fn failing(&self) -> impl Iterator<Item = (FieldId, FieldVerdict)> + '_ {
        FieldId::ALL
            .into_iter()
            .map(|f| (f, self.verdict(f)))
            .filter(|(_, v)| *v != FieldVerdict::Passed)
    }
}

/// Shorthand: does this set of values open the gate under the default rules?
#[must_use]
pub fn gate_allows(values: &FormValues) -> bool {
    GateReport::evaluate(&FieldRules::default(), values).is_open()
}
