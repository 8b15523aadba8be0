//! In-process gestation threshold rule.
//!
//! `gestation > threshold` classifies as [`Label::Term`]; anything else, including a value exactly
//! at the threshold, is [`Label::Preterm`]. Only the `gestation` input is read.

use crate::constants::{INVALID_GESTATION_MESSAGE, TERM_THRESHOLD_WEEKS};
use crate::inputs::ClinicianInputs;
use crate::{PtbError, PtbResult};
use ptb_types::Label;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdRule {
    threshold_weeks: f64,
}

impl Default for ThresholdRule {
    fn default() -> Self {
        Self {
            threshold_weeks: TERM_THRESHOLD_WEEKS,
        }
    }
}

impl ThresholdRule {
    pub fn threshold_weeks(&self) -> f64 {
        self.threshold_weeks
    }

    /// Classifies from the clinician's `gestation` entry.
    ///
    /// # Errors
    ///
    /// Returns [`PtbError::Validation`] if `gestation` is missing, blank, non-numeric or not
    /// finite.
    pub fn classify(&self, inputs: &ClinicianInputs) -> PtbResult<Label> {
        let weeks = parse_gestation(inputs.get("gestation"))?;
        Ok(self.label_for(weeks))
    }

    pub fn label_for(&self, gestation_weeks: f64) -> Label {
        if gestation_weeks > self.threshold_weeks {
            Label::Term
        } else {
            Label::Preterm
        }
    }
}

/// Parses a gestation entry in weeks.
pub fn parse_gestation(raw: Option<&str>) -> PtbResult<f64> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| PtbError::Validation(INVALID_GESTATION_MESSAGE.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gestation(value: &str) -> ClinicianInputs {
        [("gestation", value)].into_iter().collect()
    }

    #[test]
    fn above_threshold_is_term() {
        let rule = ThresholdRule::default();
        assert_eq!(rule.classify(&gestation("40")).unwrap(), Label::Term);
        assert_eq!(rule.classify(&gestation("37.01")).unwrap(), Label::Term);
    }

    #[test]
    fn exactly_threshold_is_preterm() {
        let rule = ThresholdRule::default();
        assert_eq!(rule.classify(&gestation("37")).unwrap(), Label::Preterm);
        assert_eq!(rule.classify(&gestation("37.0")).unwrap(), Label::Preterm);
    }

    #[test]
    fn below_threshold_is_preterm() {
        let rule = ThresholdRule::default();
        assert_eq!(rule.classify(&gestation("35")).unwrap(), Label::Preterm);
        assert_eq!(rule.classify(&gestation(" 22.5 ")).unwrap(), Label::Preterm);
        assert_eq!(rule.classify(&gestation("-1")).unwrap(), Label::Preterm);
    }

    #[test]
    fn label_agrees_with_strict_comparison_across_range() {
        let rule = ThresholdRule::default();
        for tenths in 300..=450 {
            let weeks = tenths as f64 / 10.0;
            let expected = if weeks > 37.0 { Label::Term } else { Label::Preterm };
            assert_eq!(
                rule.classify(&gestation(&weeks.to_string())).unwrap(),
                expected,
                "gestation {weeks}"
            );
        }
    }

    #[test]
    fn non_numeric_or_missing_gestation_is_rejected() {
        let rule = ThresholdRule::default();
        for raw in ["abc", "", "   ", "NaN", "inf", "40 weeks"] {
            match rule.classify(&gestation(raw)) {
                Err(PtbError::Validation(msg)) => {
                    assert_eq!(msg, "Please enter a valid gestation value")
                }
                other => panic!("expected validation error for {raw:?}, got {other:?}"),
            }
        }

        assert!(matches!(
            rule.classify(&ClinicianInputs::default()),
            Err(PtbError::Validation(_))
        ));
    }

    #[test]
    fn other_fields_are_ignored() {
        let inputs: ClinicianInputs = [("gestation", "39"), ("age", "not a number")]
            .into_iter()
            .collect();
        assert_eq!(ThresholdRule::default().classify(&inputs).unwrap(), Label::Term);
    }
}
