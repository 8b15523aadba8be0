//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handling never reads process-wide environment variables, which keeps behaviour consistent in
//! multi-threaded runtimes and test harnesses.

use crate::constants::{
    DEFAULT_CLASSIFIER_ARGS, DEFAULT_CLASSIFIER_PROGRAM, DEFAULT_CLASSIFIER_TIMEOUT_SECS,
    DEFAULT_DATABASE_URL, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT,
};
use crate::{PtbError, PtbResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How to launch the external classifier.
///
/// The comma-joined feature vector is appended after `args` as the final argument.
#[derive(Clone, Debug)]
pub struct ClassifierSettings {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ClassifierSettings {
    pub fn new(program: PathBuf, args: Vec<String>, timeout: Duration) -> PtbResult<Self> {
        if program.as_os_str().is_empty() {
            return Err(PtbError::InvalidInput(
                "classifier program cannot be empty".into(),
            ));
        }
        if timeout.is_zero() {
            return Err(PtbError::InvalidInput(
                "classifier timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            program,
            args,
            timeout,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_url: String,
    classifier: ClassifierSettings,
    recent_limit: u64,
}

impl CoreConfig {
    pub fn new(
        database_url: String,
        classifier: ClassifierSettings,
        recent_limit: u64,
    ) -> PtbResult<Self> {
        if database_url.trim().is_empty() {
            return Err(PtbError::InvalidInput("database_url cannot be empty".into()));
        }
        validate_recent_limit(recent_limit)?;

        Ok(Self {
            database_url,
            classifier,
            recent_limit,
        })
    }

    /// Builds the configuration from `DATABASE_URL`, `PTB_CLASSIFIER_PROGRAM`,
    /// `PTB_CLASSIFIER_ARGS`, `PTB_CLASSIFIER_TIMEOUT_SECS` and `PTB_RECENT_LIMIT`.
    ///
    /// Intended for binaries only, after `dotenvy::dotenv()` has run.
    pub fn from_env() -> PtbResult<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let program = std::env::var("PTB_CLASSIFIER_PROGRAM")
            .unwrap_or_else(|_| DEFAULT_CLASSIFIER_PROGRAM.into());
        let args = classifier_args_from_env_value(std::env::var("PTB_CLASSIFIER_ARGS").ok());
        let timeout =
            classifier_timeout_from_env_value(std::env::var("PTB_CLASSIFIER_TIMEOUT_SECS").ok())?;
        let recent_limit = recent_limit_from_env_value(std::env::var("PTB_RECENT_LIMIT").ok())?;

        let classifier = ClassifierSettings::new(PathBuf::from(program), args, timeout)?;
        Self::new(database_url, classifier, recent_limit)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn classifier(&self) -> &ClassifierSettings {
        &self.classifier
    }

    pub fn recent_limit(&self) -> u64 {
        self.recent_limit
    }
}

fn validate_recent_limit(limit: u64) -> PtbResult<()> {
    if limit == 0 || limit > MAX_RECENT_LIMIT {
        return Err(PtbError::InvalidInput(format!(
            "recent limit must be between 1 and {}, got {}",
            MAX_RECENT_LIMIT, limit
        )));
    }
    Ok(())
}

/// Normalise an optional environment value: trimmed, with blank treated as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the classifier timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or blank, returns the default timeout.
pub fn classifier_timeout_from_env_value(value: Option<String>) -> PtbResult<Duration> {
    let Some(raw) = non_blank(value) else {
        return Ok(Duration::from_secs(DEFAULT_CLASSIFIER_TIMEOUT_SECS));
    };

    let secs = raw.parse::<u64>().map_err(|_| {
        PtbError::InvalidInput(format!(
            "PTB_CLASSIFIER_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
            raw
        ))
    })?;
    if secs == 0 {
        return Err(PtbError::InvalidInput(
            "PTB_CLASSIFIER_TIMEOUT_SECS must be greater than zero".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}

/// Parse the default recent-history size from an optional string value.
///
/// If `value` is `None` or blank, returns [`DEFAULT_RECENT_LIMIT`].
pub fn recent_limit_from_env_value(value: Option<String>) -> PtbResult<u64> {
    let Some(raw) = non_blank(value) else {
        return Ok(DEFAULT_RECENT_LIMIT);
    };

    let limit = raw.parse::<u64>().map_err(|_| {
        PtbError::InvalidInput(format!(
            "PTB_RECENT_LIMIT must be a positive integer, got '{}'",
            raw
        ))
    })?;
    validate_recent_limit(limit)?;

    Ok(limit)
}

/// Split classifier arguments on whitespace.
///
/// If `value` is `None` or blank, returns the default script argument.
pub fn classifier_args_from_env_value(value: Option<String>) -> Vec<String> {
    non_blank(value)
        .unwrap_or_else(|| DEFAULT_CLASSIFIER_ARGS.to_string())
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
