use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

pub use ::uuid::Uuid;

/// Primary key of a prediction history row.
///
/// Once constructed the wrapped UUID is known to be valid; `Display` always produces the
/// canonical 32-character form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PredictionId(Uuid);

impl Default for PredictionId {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionId {
    /// Allocates a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates a string that must already be in canonical form.
    ///
    /// Hyphenated or uppercase spellings are rejected rather than normalised.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not canonical.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "prediction ID must be 32 lowercase hex characters without hyphens, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(e.to_string()))
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Purely syntactic check: 32 bytes of `0-9a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl From<Uuid> for PredictionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for PredictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for PredictionId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PredictionId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PredictionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PredictionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PredictionId::parse(&s).map_err(serde::de::Error::custom)
    }
}
