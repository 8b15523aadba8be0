//! Constants used throughout the PTB core crate.
//!
//! Defaults for configuration, table names and the user-facing messages shown by both the HTTP
//! API and the CLI live here so the two surfaces agree.

/// Default sea-orm connection URL when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://ptb.db?mode=rwc";

/// Default program used to run the external classifier.
pub const DEFAULT_CLASSIFIER_PROGRAM: &str = "python";

/// Default leading arguments passed to the classifier program (the script path).
pub const DEFAULT_CLASSIFIER_ARGS: &str = "ml_script.py";

/// Default time allowed for one external classifier run.
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 30;

/// Default size of the recent-predictions view.
pub const DEFAULT_RECENT_LIMIT: u64 = 5;

/// Upper bound on any recent-predictions request.
pub const MAX_RECENT_LIMIT: u64 = 100;

/// Gestation (weeks) above which a pregnancy is classified as term.
pub const TERM_THRESHOLD_WEEKS: f64 = 37.0;

/// Table holding bulk-loaded patient rows.
pub const PATIENT_TABLE: &str = "patient_data";

/// Append-only table of classification outcomes.
pub const PREDICTION_TABLE: &str = "prediction_history";

/// Name stored for patients loaded without one.
pub const UNKNOWN_PATIENT_NAME: &str = "Unknown";

pub const LOOKUP_FAILED_MESSAGE: &str = "Error fetching data.";
pub const CLASSIFIER_FAILED_MESSAGE: &str = "Error processing request";
pub const INVALID_GESTATION_MESSAGE: &str = "Please enter a valid gestation value";
pub const SAVE_FAILED_MESSAGE: &str = "Error saving prediction";
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching recent predictions.";
