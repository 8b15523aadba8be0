//! Validated value types shared across the PTB crates.
//!
//! Every type here is checked once at construction so downstream code can rely on it:
//! - [`NonEmptyText`] for trimmed, non-blank strings (clinician names, config values)
//! - [`PatientId`] for the integer key of the patient table
//! - [`Label`] for the two-valued gestation classification

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when constructing validated types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input did not parse to an integer patient identifier
    #[error("Patient ID must be an integer, got: '{0}'")]
    InvalidPatientId(String),
    /// The input was not one of the known classification labels
    #[error("Unknown prediction label: '{0}'")]
    UnknownLabel(String),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, returning [`TypeError::Empty`] for blank input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Integer key of a row in the patient table.
///
/// Clinicians type identifiers into a search box, so parsing from text is the usual way in.
/// Leading and trailing whitespace is ignored; anything else that is not an `i32` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(i32);

impl PatientId {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Parses a patient identifier typed by a user.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidPatientId`] if the trimmed input is not an integer.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        input
            .trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| TypeError::InvalidPatientId(input.to_owned()))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i32> for PatientId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Outcome of a gestation classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Label {
    Term,
    Preterm,
}

impl Label {
    /// Stored and displayed spelling of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Term => "Term",
            Label::Preterm => "Preterm",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = TypeError;

    /// Accepts exactly `Term` or `Preterm` (the spelling written to the history table).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Term" => Ok(Label::Term),
            "Preterm" => Ok(Label::Preterm),
            other => Err(TypeError::UnknownLabel(other.to_owned())),
        }
    }
}
