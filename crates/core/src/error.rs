use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PtbError {
    /// Bad or missing clinician input. The message is shown to the user as-is.
    #[error("{0}")]
    Validation(String),
    /// No patient matched the requested ID. The message is shown to the user as-is.
    #[error("{0}")]
    NotFound(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("external classifier failed: {0}")]
    ExternalProcess(String),
    #[error("external classifier timed out after {0:?}")]
    ClassifierTimeout(Duration),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<ptb_types::TypeError> for PtbError {
    fn from(err: ptb_types::TypeError) -> Self {
        PtbError::Validation(err.to_string())
    }
}

pub type PtbResult<T> = std::result::Result<T, PtbError>;
