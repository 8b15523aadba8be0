//! Patient records as read from the bulk-loaded patient table.
//!
//! Rows are created by an offline loader; nothing in PTB writes or updates them.

use ptb_types::PatientId;

/// Clinical fields a clinician re-enters on the prediction form, in table order.
///
/// Every `PatientRecord` attribute except `patient_id` and `patient_name`.
pub const EDITABLE_FIELDS: [&str; 16] = [
    "gestation",
    "age",
    "parity",
    "abortions",
    "weight",
    "hypertension",
    "diabetes",
    "placental_position",
    "bleeding_first_trimester",
    "bleeding_second_trimester",
    "funneling",
    "smoker",
    "root_mean_square",
    "median_frequency",
    "peak_frequency",
    "sample_entropy",
];

/// One row of the patient table.
///
/// Integer flags use `1` for yes and `0` for no. `placental_position` is `1` for normal and `0`
/// for abnormal.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientRecord {
    pub patient_id: PatientId,
    pub patient_name: String,
    /// Weeks of gestation.
    pub gestation: f64,
    pub age: i32,
    pub parity: i32,
    pub abortions: i32,
    /// Kilograms.
    pub weight: f64,
    pub hypertension: i32,
    pub diabetes: i32,
    pub placental_position: i32,
    pub bleeding_first_trimester: i32,
    pub bleeding_second_trimester: i32,
    pub funneling: i32,
    pub smoker: i32,
    // Uterine EHG signal features.
    pub root_mean_square: f64,
    pub median_frequency: f64,
    pub peak_frequency: f64,
    pub sample_entropy: f64,
}

impl PatientRecord {
    /// Stored value of an editable field, formatted for display.
    ///
    /// Returns `None` for names outside [`EDITABLE_FIELDS`].
    pub fn field_value(&self, field: &str) -> Option<String> {
        let value = match field {
            "gestation" => self.gestation.to_string(),
            "age" => self.age.to_string(),
            "parity" => self.parity.to_string(),
            "abortions" => self.abortions.to_string(),
            "weight" => self.weight.to_string(),
            "hypertension" => self.hypertension.to_string(),
            "diabetes" => self.diabetes.to_string(),
            "placental_position" => self.placental_position.to_string(),
            "bleeding_first_trimester" => self.bleeding_first_trimester.to_string(),
            "bleeding_second_trimester" => self.bleeding_second_trimester.to_string(),
            "funneling" => self.funneling.to_string(),
            "smoker" => self.smoker.to_string(),
            "root_mean_square" => self.root_mean_square.to_string(),
            "median_frequency" => self.median_frequency.to_string(),
            "peak_frequency" => self.peak_frequency.to_string(),
            "sample_entropy" => self.sample_entropy.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A complete patient row with plausible values.
    pub fn patient(id: i32, name: &str, gestation: f64) -> PatientRecord {
        PatientRecord {
            patient_id: PatientId::new(id),
            patient_name: name.to_string(),
            gestation,
            age: 29,
            parity: 1,
            abortions: 0,
            weight: 64.5,
            hypertension: 0,
            diabetes: 0,
            placental_position: 1,
            bleeding_first_trimester: 0,
            bleeding_second_trimester: 0,
            funneling: 0,
            smoker: 0,
            root_mean_square: 0.012,
            median_frequency: 0.41,
            peak_frequency: 0.38,
            sample_entropy: 0.72,
        }
    }
}
