//! Feature vector handed to the external classifier.

use crate::patient::PatientRecord;
use serde::{Deserialize, Serialize};

/// Order in which features are joined onto the classifier command line.
///
/// Gestation is deliberately absent: the external model was trained without it.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
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

pub const FEATURE_COUNT: usize = 15;

/// The fifteen numeric inputs of the external model, named as in the patient table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub age: f64,
    pub parity: f64,
    pub abortions: f64,
    pub weight: f64,
    pub hypertension: f64,
    pub diabetes: f64,
    pub placental_position: f64,
    pub bleeding_first_trimester: f64,
    pub bleeding_second_trimester: f64,
    pub funneling: f64,
    pub smoker: f64,
    pub root_mean_square: f64,
    pub median_frequency: f64,
    pub peak_frequency: f64,
    pub sample_entropy: f64,
}

impl FeatureVector {
    /// Values in [`FEATURE_ORDER`].
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.parity,
            self.abortions,
            self.weight,
            self.hypertension,
            self.diabetes,
            self.placental_position,
            self.bleeding_first_trimester,
            self.bleeding_second_trimester,
            self.funneling,
            self.smoker,
            self.root_mean_square,
            self.median_frequency,
            self.peak_frequency,
            self.sample_entropy,
        ]
    }

    /// Comma-joined values, e.g. `29,1,0,64.5,...`.
    pub fn to_arg_string(&self) -> String {
        self.values()
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<&PatientRecord> for FeatureVector {
    fn from(p: &PatientRecord) -> Self {
        Self {
            age: p.age.into(),
            parity: p.parity.into(),
            abortions: p.abortions.into(),
            weight: p.weight,
            hypertension: p.hypertension.into(),
            diabetes: p.diabetes.into(),
            placental_position: p.placental_position.into(),
            bleeding_first_trimester: p.bleeding_first_trimester.into(),
            bleeding_second_trimester: p.bleeding_second_trimester.into(),
            funneling: p.funneling.into(),
            smoker: p.smoker.into(),
            root_mean_square: p.root_mean_square,
            median_frequency: p.median_frequency,
            peak_frequency: p.peak_frequency,
            sample_entropy: p.sample_entropy,
        }
    }
}
