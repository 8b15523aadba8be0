//! Request and response bodies of the HTTP API.
//!
//! Identifiers and timestamps travel as strings: prediction IDs in canonical 32-hex form and
//! dates as RFC 3339.

use ptb_core::patient::EDITABLE_FIELDS;
use ptb_core::{FeatureVector, PatientRecord, PredictionOutcome, PredictionRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LandingRes {
    pub name: String,
    pub summary: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// A loaded patient plus the blank form the clinician fills in.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub patient_id: i32,
    pub patient_name: String,
    /// Values currently stored for each clinical field.
    pub stored: BTreeMap<String, String>,
    /// Editable fields, all empty.
    pub inputs: BTreeMap<String, String>,
}

impl PatientRes {
    pub fn new(patient: &PatientRecord, inputs: &ptb_core::ClinicianInputs) -> Self {
        Self {
            patient_id: patient.patient_id.value(),
            patient_name: patient.patient_name.clone(),
            stored: EDITABLE_FIELDS
                .iter()
                .filter_map(|f| patient.field_value(f).map(|v| (f.to_string(), v)))
                .collect(),
            inputs: inputs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictReq {
    /// Patient identifier as typed; must be an integer.
    pub patient_id: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictionRes {
    pub prediction_id: String,
    pub patient_id: i32,
    pub patient_name: String,
    pub prediction_result: String,
    pub prediction_date: String,
}

impl From<&PredictionRecord> for PredictionRes {
    fn from(r: &PredictionRecord) -> Self {
        Self {
            prediction_id: r.prediction_id.to_string(),
            patient_id: r.patient_id.value(),
            patient_name: r.patient_name.clone(),
            prediction_result: r.prediction_result.to_string(),
            prediction_date: r.prediction_date.to_rfc3339(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictRes {
    pub prediction_result: String,
    /// Whether the prediction reached the history table.
    pub saved: bool,
    pub record: PredictionRes,
    pub recent: Vec<PredictionRes>,
    pub warnings: Vec<String>,
}

impl From<&PredictionOutcome> for PredictRes {
    fn from(o: &PredictionOutcome) -> Self {
        Self {
            prediction_result: o.label.to_string(),
            saved: o.saved,
            record: PredictionRes::from(&o.record),
            recent: o.recent.iter().map(PredictionRes::from).collect(),
            warnings: o.warnings.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentPredictionsRes {
    pub predictions: Vec<PredictionRes>,
}

/// Body of `/api/predict`: the fifteen model features by name.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExternalPredictReq {
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

impl From<ExternalPredictReq> for FeatureVector {
    fn from(r: ExternalPredictReq) -> Self {
        FeatureVector {
            age: r.age,
            parity: r.parity,
            abortions: r.abortions,
            weight: r.weight,
            hypertension: r.hypertension,
            diabetes: r.diabetes,
            placental_position: r.placental_position,
            bleeding_first_trimester: r.bleeding_first_trimester,
            bleeding_second_trimester: r.bleeding_second_trimester,
            funneling: r.funneling,
            smoker: r.smoker,
            root_mean_square: r.root_mean_square,
            median_frequency: r.median_frequency,
            peak_frequency: r.peak_frequency,
            sample_entropy: r.sample_entropy,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExternalPredictRes {
    pub prediction: String,
}
