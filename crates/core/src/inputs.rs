//! Clinician-entered form values.

use crate::patient::{PatientRecord, EDITABLE_FIELDS};
use crate::{PtbError, PtbResult};
use std::collections::BTreeMap;

/// Field name to raw text, exactly as typed on the prediction form.
///
/// Values stay as strings until a rule parses the ones it needs; an unparseable field the rule
/// ignores is not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ClinicianInputs(BTreeMap<String, String>);

impl ClinicianInputs {
    /// One empty entry per editable field of `patient`.
    ///
    /// The clinician re-enters observed values rather than trusting the stored row.
    pub fn blank_for(_patient: &PatientRecord) -> Self {
        Self(
            EDITABLE_FIELDS
                .iter()
                .map(|field| (field.to_string(), String::new()))
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Sets a value, rejecting names that are not editable patient fields.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> PtbResult<()> {
        if !EDITABLE_FIELDS.contains(&field) {
            return Err(PtbError::Validation(format!("Unknown input field: {}", field)));
        }
        self.0.insert(field.to_string(), value.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ClinicianInputs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::test_support::patient;

    #[test]
    fn blank_for_covers_all_editable_fields_with_empty_values() {
        let inputs = ClinicianInputs::blank_for(&patient(101, "Ada Obi", 40.0));
        assert_eq!(inputs.len(), EDITABLE_FIELDS.len());
        assert!(inputs.iter().all(|(_, v)| v.is_empty()));
        assert_eq!(inputs.get("patient_id"), None);
        assert_eq!(inputs.get("patient_name"), None);
        assert_eq!(inputs.get("gestation"), Some(""));
    }

    #[test]
    fn set_rejects_unknown_fields() {
        let mut inputs = ClinicianInputs::default();
        inputs.set("gestation", "38").unwrap();
        assert_eq!(inputs.get("gestation"), Some("38"));

        let err = inputs.set("patient_name", "Mallory").unwrap_err();
        assert!(matches!(err, PtbError::Validation(msg) if msg.contains("patient_name")));
    }
}
