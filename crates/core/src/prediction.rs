//! Prediction history records.

use crate::patient::PatientRecord;
use chrono::{DateTime, Utc};
use ptb_types::{Label, PatientId};
use ptb_uuid::PredictionId;

/// One classification outcome. Written once, never updated or deleted.
///
/// `patient_id` and `patient_name` are copied from the patient row at prediction time, so the
/// history survives later changes to (or removal of) that row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionRecord {
    pub prediction_id: PredictionId,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub prediction_result: Label,
    pub prediction_date: DateTime<Utc>,
}

impl PredictionRecord {
    /// Builds a record for `patient` with a fresh identifier, timestamped now.
    pub fn new(patient: &PatientRecord, label: Label) -> Self {
        Self {
            prediction_id: PredictionId::new(),
            patient_id: patient.patient_id,
            patient_name: patient.patient_name.clone(),
            prediction_result: label,
            prediction_date: Utc::now(),
        }
    }
}

/// Result of a complete predict action.
#[derive(Clone, Debug)]
pub struct PredictionOutcome {
    pub label: Label,
    pub record: PredictionRecord,
    /// Whether `record` reached the history store.
    pub saved: bool,
    /// Fresh read of the history store after the write attempt.
    pub recent: Vec<PredictionRecord>,
    /// Non-fatal problems to show alongside the label.
    pub warnings: Vec<String>,
}
