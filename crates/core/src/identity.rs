//! Identity of the clinician making a request.

use crate::PtbResult;
use ptb_types::NonEmptyText;

/// Authenticated caller, passed explicitly into workflow entry points.
///
/// The HTTP layer builds this after the API key check; the CLI builds it from `--clinician`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
    clinician: NonEmptyText,
}

impl CallerIdentity {
    pub fn new(clinician: impl AsRef<str>) -> PtbResult<Self> {
        Ok(Self {
            clinician: NonEmptyText::new(clinician)?,
        })
    }

    pub fn clinician(&self) -> &str {
        self.clinician.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PtbError;

    #[test]
    fn blank_clinician_is_rejected() {
        assert!(matches!(
            CallerIdentity::new("   "),
            Err(PtbError::Validation(_))
        ));
        assert_eq!(CallerIdentity::new(" dr.adeyemi ").unwrap().clinician(), "dr.adeyemi");
    }
}
