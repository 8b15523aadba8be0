//! Form state for one clinician working through the predict screen.
//!
//! A session holds at most one loaded patient. Searching replaces that patient and throws away
//! any values typed for the previous one, so a prediction can never mix one patient's inputs with
//! another patient's identity.

use crate::constants::FETCH_FAILED_MESSAGE;
use crate::identity::CallerIdentity;
use crate::inputs::ClinicianInputs;
use crate::patient::PatientRecord;
use crate::prediction::PredictionRecord;
use crate::workflow::ClassificationWorkflow;
use crate::{PtbError, PtbResult};
use ptb_types::Label;
use std::sync::Arc;

pub struct PredictionSession {
    workflow: Arc<ClassificationWorkflow>,
    caller: CallerIdentity,
    patient: Option<PatientRecord>,
    inputs: ClinicianInputs,
    result: Option<Label>,
    error: Option<String>,
    recent: Vec<PredictionRecord>,
}

impl PredictionSession {
    pub fn new(workflow: Arc<ClassificationWorkflow>, caller: CallerIdentity) -> Self {
        Self {
            workflow,
            caller,
            patient: None,
            inputs: ClinicianInputs::default(),
            result: None,
            error: None,
            recent: Vec::new(),
        }
    }

    /// Loads a patient, replacing the current one and clearing inputs and result.
    ///
    /// On failure the session is left with no patient and the message in [`Self::error`].
    pub async fn search(&mut self, raw_id: &str) -> PtbResult<&PatientRecord> {
        self.patient = None;
        self.inputs = ClinicianInputs::default();
        self.result = None;
        self.error = None;

        match self.workflow.lookup_patient(raw_id).await {
            Ok(patient) => {
                self.inputs = ClassificationWorkflow::prepare_input_fields(&patient);
                Ok(&*self.patient.insert(patient))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Edits one form value of the loaded patient.
    pub fn set_input(&mut self, field: &str, value: impl Into<String>) -> PtbResult<()> {
        if self.patient.is_none() {
            return Err(PtbError::Validation(
                "Search for a patient before entering values".into(),
            ));
        }
        self.inputs.set(field, value)
    }

    /// Classifies the current inputs, records the outcome and refreshes the recent view.
    ///
    /// A failed write is not an error here: the label is still returned and the save failure is
    /// left in [`Self::error`].
    pub async fn submit(&mut self) -> PtbResult<Label> {
        let Some(patient) = self.patient.as_ref() else {
            return Err(PtbError::Validation(
                "Search for a patient before predicting".into(),
            ));
        };

        self.error = None;
        let outcome = match self
            .workflow
            .predict_for(&self.caller, patient, &self.inputs)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.result = Some(outcome.label);
        self.recent = outcome.recent;
        if !outcome.warnings.is_empty() {
            self.error = Some(outcome.warnings.join(" "));
        }
        Ok(outcome.label)
    }

    /// Re-reads the recent view from the store.
    pub async fn refresh_recent(&mut self) {
        match self
            .workflow
            .fetch_recent_predictions(self.workflow.recent_limit())
            .await
        {
            Ok(recent) => self.recent = recent,
            Err(e) => {
                tracing::error!("failed to refresh recent predictions: {}", e);
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn patient(&self) -> Option<&PatientRecord> {
        self.patient.as_ref()
    }

    pub fn inputs(&self) -> &ClinicianInputs {
        &self.inputs
    }

    pub fn result(&self) -> Option<Label> {
        self.result
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn recent(&self) -> &[PredictionRecord] {
        &self.recent
    }
}
