//! # PTB Core
//!
//! Core business logic for the preterm-birth classification service:
//! - patient lookup against the bulk-loaded patient table
//! - the in-process gestation threshold rule
//! - the append-only prediction history
//! - invocation of the external classifier
//!
//! **No API concerns**: authentication, HTTP servers and request/response shapes belong in
//! `api-shared` and `api-rest`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod identity;
pub mod inputs;
pub mod patient;
pub mod prediction;
pub mod repositories;
pub mod rule;
pub mod session;
pub mod storage;
pub mod workflow;

pub use classifier::ExternalClassifier;
pub use config::{ClassifierSettings, CoreConfig};
pub use error::{PtbError, PtbResult};
pub use features::FeatureVector;
pub use identity::CallerIdentity;
pub use inputs::ClinicianInputs;
pub use patient::PatientRecord;
pub use prediction::{PredictionOutcome, PredictionRecord};
pub use ptb_types::{Label, NonEmptyText, PatientId};
pub use ptb_uuid::PredictionId;
pub use repositories::{
    HistoryOrder, PatientRepository, PredictionHistoryStore, SeaOrmPatientRepository,
    SeaOrmPredictionHistory,
};
pub use session::PredictionSession;
pub use workflow::ClassificationWorkflow;

/// Connects to the configured database and wires a workflow over it.
pub async fn workflow_from_config(cfg: &CoreConfig) -> PtbResult<ClassificationWorkflow> {
    let db = storage::establish_connection(cfg.database_url()).await?;
    Ok(ClassificationWorkflow::new(
        std::sync::Arc::new(SeaOrmPatientRepository::new(db.clone())),
        std::sync::Arc::new(SeaOrmPredictionHistory::new(db)),
        cfg.recent_limit(),
    ))
}
