//! Storage boundaries used by the classification workflow.
//!
//! The workflow only sees the two traits below. [`patients::SeaOrmPatientRepository`] and
//! [`history::SeaOrmPredictionHistory`] implement them over the sea-orm connection.

use crate::patient::PatientRecord;
use crate::prediction::PredictionRecord;
use crate::PtbResult;
use async_trait::async_trait;
use ptb_types::PatientId;

pub mod history;
pub mod patients;

pub use history::SeaOrmPredictionHistory;
pub use patients::SeaOrmPatientRepository;

/// Read access to the patient table.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// First row whose `patient_id` equals `id`, if any.
    async fn find_by_id(&self, id: PatientId) -> PtbResult<Option<PatientRecord>>;
}

/// Requested ordering of a history listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HistoryOrder {
    /// Most recent `prediction_date` first.
    #[default]
    NewestFirst,
    /// Whatever order the store returns; no recency guarantee.
    Unordered,
}

/// Append-only log of classification outcomes.
#[async_trait]
pub trait PredictionHistoryStore: Send + Sync {
    async fn append(&self, record: &PredictionRecord) -> PtbResult<()>;

    /// At most `limit` records.
    async fn list(&self, limit: u64, order: HistoryOrder) -> PtbResult<Vec<PredictionRecord>>;
}
