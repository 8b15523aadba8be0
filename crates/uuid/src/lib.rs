//! Prediction identifiers.
//!
//! Every row in the prediction history is keyed by a random (v4) UUID generated at write time.
//! PTB renders these identifiers in a *canonical* form so that API responses, CLI output and log
//! lines all agree on one spelling: **32 lowercase hexadecimal characters** (no hyphens).
//!
//! - [`PredictionId::new`] allocates a fresh identifier.
//! - [`PredictionId::parse`] validates an identifier supplied from outside (API path, CLI
//!   argument) and rejects any non-canonical spelling.
//!
//! Example canonical value: `550e8400e29b41d4a716446655440000`

mod prediction_id;

pub use prediction_id::{PredictionId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type UuidResult<T> = Result<T, UuidError>;
