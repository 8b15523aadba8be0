//! Patient lookup, classification and history workflow.
//!
//! [`ClassificationWorkflow`] composes the patient repository, the threshold rule and the
//! prediction history store. Each call is independent; the only shared state is the store.
//!
//! The recent-history view returned by [`ClassificationWorkflow::predict`] is read back from the
//! store *after* the write attempt, so it only ever shows records that were actually saved.

use crate::constants::{FETCH_FAILED_MESSAGE, SAVE_FAILED_MESSAGE};
use crate::identity::CallerIdentity;
use crate::inputs::ClinicianInputs;
use crate::patient::PatientRecord;
use crate::prediction::{PredictionOutcome, PredictionRecord};
use crate::repositories::{HistoryOrder, PatientRepository, PredictionHistoryStore};
use crate::rule::ThresholdRule;
use crate::{PtbError, PtbResult};
use ptb_types::{Label, PatientId};
use std::sync::Arc;

#[derive(Clone)]
pub struct ClassificationWorkflow {
    patients: Arc<dyn PatientRepository>,
    history: Arc<dyn PredictionHistoryStore>,
    rule: ThresholdRule,
    recent_limit: u64,
}

impl ClassificationWorkflow {
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        history: Arc<dyn PredictionHistoryStore>,
        recent_limit: u64,
    ) -> Self {
        Self {
            patients,
            history,
            rule: ThresholdRule::default(),
            recent_limit,
        }
    }

    /// Default size of the recent-history view.
    pub fn recent_limit(&self) -> u64 {
        self.recent_limit
    }

    /// Looks up a patient by the identifier a clinician typed.
    ///
    /// # Errors
    ///
    /// - [`PtbError::Validation`] if `raw_id` is not an integer (no lookup is attempted).
    /// - [`PtbError::NotFound`] with `No patient found with ID <id>` if no row matches.
    /// - [`PtbError::Persistence`] if the repository read fails.
    pub async fn lookup_patient(&self, raw_id: &str) -> PtbResult<PatientRecord> {
        let id = PatientId::parse(raw_id)?;
        tracing::debug!(patient_id = %id, "looking up patient");

        self.patients
            .find_by_id(id)
            .await?
            .ok_or_else(|| PtbError::NotFound(format!("No patient found with ID {}", id)))
    }

    /// Blank form values for `patient`: every clinical field, each set to `""`.
    pub fn prepare_input_fields(patient: &PatientRecord) -> ClinicianInputs {
        ClinicianInputs::blank_for(patient)
    }

    /// Applies the gestation threshold rule. Pure; never touches the store.
    pub fn classify(&self, inputs: &ClinicianInputs) -> PtbResult<Label> {
        self.rule.classify(inputs)
    }

    /// Writes a new history record for `patient`.
    ///
    /// # Errors
    ///
    /// Returns [`PtbError::Persistence`] if the store rejects the write. Nothing is retried.
    pub async fn record_prediction(
        &self,
        caller: &CallerIdentity,
        patient: &PatientRecord,
        label: Label,
    ) -> PtbResult<PredictionRecord> {
        let record = PredictionRecord::new(patient, label);
        self.persist(caller, &record).await?;
        Ok(record)
    }

    /// Up to `limit` history records, newest first.
    pub async fn fetch_recent_predictions(&self, limit: u64) -> PtbResult<Vec<PredictionRecord>> {
        self.history.list(limit, HistoryOrder::NewestFirst).await
    }

    /// Full predict action: lookup, classify, record, then refresh the recent view.
    ///
    /// Lookup and validation failures abort before anything is written. A failed write or
    /// history read is reported through [`PredictionOutcome::warnings`] instead.
    pub async fn predict(
        &self,
        caller: &CallerIdentity,
        raw_id: &str,
        inputs: &ClinicianInputs,
    ) -> PtbResult<PredictionOutcome> {
        let patient = self.lookup_patient(raw_id).await?;
        self.predict_for(caller, &patient, inputs).await
    }

    /// Predict action for an already loaded patient.
    pub async fn predict_for(
        &self,
        caller: &CallerIdentity,
        patient: &PatientRecord,
        inputs: &ClinicianInputs,
    ) -> PtbResult<PredictionOutcome> {
        let label = self.classify(inputs)?;
        let record = PredictionRecord::new(patient, label);

        let mut warnings = Vec::new();
        let saved = match self.persist(caller, &record).await {
            Ok(()) => true,
            Err(_) => {
                warnings.push(SAVE_FAILED_MESSAGE.to_string());
                false
            }
        };

        let recent = match self.fetch_recent_predictions(self.recent_limit).await {
            Ok(recent) => recent,
            Err(e) => {
                tracing::error!("failed to refresh recent predictions: {}", e);
                warnings.push(FETCH_FAILED_MESSAGE.to_string());
                Vec::new()
            }
        };

        Ok(PredictionOutcome {
            label,
            record,
            saved,
            recent,
            warnings,
        })
    }

    async fn persist(&self, caller: &CallerIdentity, record: &PredictionRecord) -> PtbResult<()> {
        match self.history.append(record).await {
            Ok(()) => {
                tracing::info!(
                    prediction_id = %record.prediction_id,
                    patient_id = %record.patient_id,
                    result = %record.prediction_result,
                    clinician = caller.clinician(),
                    "prediction recorded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    patient_id = %record.patient_id,
                    clinician = caller.clinician(),
                    "failed to record prediction: {}",
                    e
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::repositories::patients::test_support::insert_patient;
    use crate::repositories::{SeaOrmPatientRepository, SeaOrmPredictionHistory};
    use crate::storage::establish_connection;
    use async_trait::async_trait;
    use sea_orm::DatabaseConnection;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Workflow over a fresh in-memory database seeded with patients 101 (gestation 40) and
    /// 202 (gestation 35).
    pub async fn seeded_workflow() -> (ClassificationWorkflow, DatabaseConnection) {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        insert_patient(
            &db,
            &crate::patient::test_support::patient(101, "Ada Obi", 40.0),
            Some("Ada Obi"),
        )
        .await;
        insert_patient(
            &db,
            &crate::patient::test_support::patient(202, "Bisi Ade", 35.0),
            Some("Bisi Ade"),
        )
        .await;

        let workflow = ClassificationWorkflow::new(
            Arc::new(SeaOrmPatientRepository::new(db.clone())),
            Arc::new(SeaOrmPredictionHistory::new(db.clone())),
            5,
        );
        (workflow, db)
    }

    /// History store whose writes (and optionally reads) fail.
    pub struct BrokenHistory {
        inner: SeaOrmPredictionHistory,
        pub fail_reads: AtomicBool,
    }

    impl BrokenHistory {
        pub fn new(db: DatabaseConnection) -> Self {
            Self {
                inner: SeaOrmPredictionHistory::new(db),
                fail_reads: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl PredictionHistoryStore for BrokenHistory {
        async fn append(&self, _record: &PredictionRecord) -> PtbResult<()> {
            Err(PtbError::Persistence("disk full".into()))
        }

        async fn list(&self, limit: u64, order: HistoryOrder) -> PtbResult<Vec<PredictionRecord>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(PtbError::Persistence("connection reset".into()));
            }
            self.inner.list(limit, order).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{seeded_workflow, BrokenHistory};
    use super::*;
    use crate::repositories::SeaOrmPatientRepository;
    use std::collections::HashSet;
    use std::sync::atomic::Ordering;

    fn clinician() -> CallerIdentity {
        CallerIdentity::new("dr.eze").unwrap()
    }

    fn gestation(value: &str) -> ClinicianInputs {
        [("gestation", value)].into_iter().collect()
    }

    #[tokio::test]
    async fn term_scenario_records_history() {
        let (workflow, _db) = seeded_workflow().await;

        let patient = workflow.lookup_patient("101").await.unwrap();
        let mut inputs = ClassificationWorkflow::prepare_input_fields(&patient);
        inputs.set("gestation", "40").unwrap();

        let label = workflow.classify(&inputs).unwrap();
        assert_eq!(label, Label::Term);

        let record = workflow
            .record_prediction(&clinician(), &patient, label)
            .await
            .unwrap();
        assert_eq!(record.patient_id, PatientId::new(101));
        assert_eq!(record.prediction_result, Label::Term);

        let recent = workflow.fetch_recent_predictions(5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].prediction_id, record.prediction_id);
        assert_eq!(recent[0].prediction_result.as_str(), "Term");
    }

    #[tokio::test]
    async fn preterm_scenario() {
        let (workflow, _db) = seeded_workflow().await;
        let outcome = workflow
            .predict(&clinician(), "202", &gestation("35"))
            .await
            .unwrap();

        assert_eq!(outcome.label, Label::Preterm);
        assert!(outcome.saved);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.recent[0].patient_name, "Bisi Ade");
    }

    #[tokio::test]
    async fn unknown_patient_surfaces_not_found_and_records_nothing() {
        let (workflow, _db) = seeded_workflow().await;

        let err = workflow.lookup_patient("999").await.unwrap_err();
        match &err {
            PtbError::NotFound(msg) => assert_eq!(msg, "No patient found with ID 999"),
            other => panic!("expected NotFound, got {other:?}"),
        }

        let err = workflow
            .predict(&clinician(), "999", &gestation("40"))
            .await
            .unwrap_err();
        assert!(matches!(err, PtbError::NotFound(_)));
        assert!(workflow.fetch_recent_predictions(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected_before_lookup() {
        let (workflow, _db) = seeded_workflow().await;
        for raw in ["abc", "", "10x"] {
            assert!(matches!(
                workflow.lookup_patient(raw).await,
                Err(PtbError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn invalid_gestation_records_nothing() {
        let (workflow, _db) = seeded_workflow().await;
        let err = workflow
            .predict(&clinician(), "101", &gestation("abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, PtbError::Validation(_)));
        assert!(workflow.fetch_recent_predictions(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_view_never_exceeds_limit_and_ids_are_unique() {
        let (workflow, _db) = seeded_workflow().await;
        let patient = workflow.lookup_patient("101").await.unwrap();

        let mut ids = HashSet::new();
        for _ in 0..12 {
            let record = workflow
                .record_prediction(&clinician(), &patient, Label::Term)
                .await
                .unwrap();
            assert!(ids.insert(record.prediction_id), "duplicate prediction id");
        }

        assert_eq!(workflow.fetch_recent_predictions(5).await.unwrap().len(), 5);

        let outcome = workflow
            .predict(&clinician(), "101", &gestation("41"))
            .await
            .unwrap();
        assert_eq!(outcome.recent.len(), 5);
        assert_eq!(outcome.recent[0].prediction_id, outcome.record.prediction_id);
    }

    #[tokio::test]
    async fn failed_write_is_reported_and_kept_out_of_recent_view() {
        let (_, db) = seeded_workflow().await;
        let workflow = ClassificationWorkflow::new(
            Arc::new(SeaOrmPatientRepository::new(db.clone())),
            Arc::new(BrokenHistory::new(db)),
            5,
        );

        let patient = workflow.lookup_patient("101").await.unwrap();
        assert!(matches!(
            workflow
                .record_prediction(&clinician(), &patient, Label::Term)
                .await,
            Err(PtbError::Persistence(_))
        ));

        let outcome = workflow
            .predict(&clinician(), "101", &gestation("40"))
            .await
            .unwrap();
        assert_eq!(outcome.label, Label::Term);
        assert!(!outcome.saved);
        assert_eq!(outcome.warnings, vec!["Error saving prediction".to_string()]);
        assert!(outcome
            .recent
            .iter()
            .all(|r| r.prediction_id != outcome.record.prediction_id));
    }

    #[tokio::test]
    async fn failed_history_read_is_a_warning() {
        let (_, db) = seeded_workflow().await;
        let history = Arc::new(BrokenHistory::new(db.clone()));
        history.fail_reads.store(true, Ordering::SeqCst);
        let workflow =
            ClassificationWorkflow::new(Arc::new(SeaOrmPatientRepository::new(db)), history, 5);

        let outcome = workflow
            .predict(&clinician(), "202", &gestation("30"))
            .await
            .unwrap();
        assert!(outcome.recent.is_empty());
        assert!(outcome
            .warnings
            .contains(&"Error fetching recent predictions.".to_string()));
    }
}
