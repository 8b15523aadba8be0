//! Caller authentication for protected routes.
//!
//! A request is authenticated when it carries the configured API key in `x-api-key` and names
//! the clinician in `x-clinician`. The result is an explicit [`CallerIdentity`] handed to the
//! workflow.

use ptb_core::CallerIdentity;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const CLINICIAN_HEADER: &str = "x-clinician";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing x-api-key header")]
    MissingApiKey,
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("Missing x-clinician header")]
    MissingClinician,
}

/// Validates the provided API key against the key configured at startup.
pub fn validate_api_key(expected_key: &str, provided_key: Option<&str>) -> Result<(), AuthError> {
    let provided_key = provided_key.ok_or(AuthError::MissingApiKey)?;

    if provided_key == expected_key {
        Ok(())
    } else {
        Err(AuthError::InvalidApiKey)
    }
}

/// Checks the API key, then builds the caller identity from the clinician header.
pub fn authenticate(
    expected_key: &str,
    provided_key: Option<&str>,
    clinician: Option<&str>,
) -> Result<CallerIdentity, AuthError> {
    validate_api_key(expected_key, provided_key)?;

    clinician
        .and_then(|name| CallerIdentity::new(name).ok())
        .ok_or(AuthError::MissingClinician)
}
