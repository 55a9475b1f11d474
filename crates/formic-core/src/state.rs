//! Submission State
//!
//! Lifecycle of one form session's submit attempts.

use serde::Serialize;

/// Form submission lifecycle.
///
/// `Pristine → Validating → (Valid | Invalid)`, re-entered on every
/// submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    /// No submit attempted yet
    #[default]
    Pristine,
    /// A validation pass is running
    Validating,
    /// The last submit attempt passed validation
    Valid,
    /// The last submit attempt failed validation
    Invalid,
}

impl FormState {
    /// Whether at least one submit has been attempted
    pub fn has_submitted(self) -> bool {
        matches!(self, FormState::Valid | FormState::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_submitted() {
        assert!(!FormState::Pristine.has_submitted());
        assert!(!FormState::Validating.has_submitted());
        assert!(FormState::Valid.has_submitted());
        assert!(FormState::Invalid.has_submitted());
    }
}
