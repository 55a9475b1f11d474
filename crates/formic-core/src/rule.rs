//! Validation Rules
//!
//! Per-field constraints and their evaluation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

/// Email shape check shared by the standard profile rules
pub(crate) static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
        .expect("email pattern compiles")
});

/// Category of a failed field check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Field empty where a value is required
    MissingRequired,
    /// Value present but fails the shape check
    PatternMismatch,
    /// Value present and well-formed, but matches an explicit deny rule
    DisallowedValue,
}

impl FieldErrorKind {
    /// Stable string code
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequired => "required",
            Self::PatternMismatch => "pattern",
            Self::DisallowedValue => "disallowed",
        }
    }
}

impl Serialize for FieldErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// The first failing validation for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Named custom check: `Some(message)` on failure, `None` when the value passes
pub type CustomCheck = fn(&str) -> Option<String>;

/// Validation rule for a single field.
///
/// Evaluation order: required first, then pattern, then named checks in
/// declaration order. The first failure wins. An empty value on a field
/// that is not required short-circuits to valid; pattern and checks only
/// see present values.
#[derive(Debug, Clone, Default)]
pub struct ValidationRule {
    required: Option<String>,
    pattern: Option<(Regex, String)>,
    checks: Vec<(&'static str, CustomCheck)>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field required, failing with `message` when empty
    pub fn required(mut self, message: &str) -> Self {
        self.required = Some(message.to_string());
        self
    }

    /// Attach a shape check, failing with `message` on mismatch
    pub fn pattern(mut self, pattern: Regex, message: &str) -> Self {
        self.pattern = Some((pattern, message.to_string()));
        self
    }

    /// Append a named custom check
    pub fn check(mut self, name: &'static str, check: CustomCheck) -> Self {
        self.checks.push((name, check));
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Evaluate the rule against a raw value
    pub fn evaluate(&self, value: &str) -> Option<FieldError> {
        if value.is_empty() {
            return self
                .required
                .as_ref()
                .map(|message| FieldError::new(FieldErrorKind::MissingRequired, message));
        }
        if let Some((pattern, message)) = &self.pattern {
            if !pattern.is_match(value) {
                return Some(FieldError::new(FieldErrorKind::PatternMismatch, message));
            }
        }
        for (name, check) in &self.checks {
            if let Some(message) = check(value) {
                tracing::trace!(check = name, "custom check failed");
                return Some(FieldError::new(FieldErrorKind::DisallowedValue, message));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deny_root(value: &str) -> Option<String> {
        (value == "root").then(|| "root is taken".to_string())
    }

    fn deny_dash(value: &str) -> Option<String> {
        value.contains('-').then(|| "no dashes".to_string())
    }

    #[test]
    fn test_required_fails_on_empty() {
        let rule = ValidationRule::new().required("Name is required");
        let error = rule.evaluate("").unwrap();
        assert_eq!(error.kind, FieldErrorKind::MissingRequired);
        assert_eq!(error.message, "Name is required");
        assert!(rule.evaluate("ok").is_none());
    }

    #[test]
    fn test_empty_optional_value_passes_everything() {
        let rule = ValidationRule::new()
            .pattern(EMAIL_PATTERN.clone(), "bad shape")
            .check("deny-root", deny_root);
        assert!(rule.evaluate("").is_none());
    }

    #[test]
    fn test_pattern_mismatch() {
        let rule = ValidationRule::new().pattern(EMAIL_PATTERN.clone(), "Invalid email format");
        let error = rule.evaluate("not-an-email").unwrap();
        assert_eq!(error.kind, FieldErrorKind::PatternMismatch);
        assert!(rule.evaluate("a@b.co").is_none());
    }

    #[test]
    fn test_required_wins_over_pattern() {
        let rule = ValidationRule::new()
            .required("missing")
            .pattern(EMAIL_PATTERN.clone(), "bad shape");
        assert_eq!(rule.evaluate("").unwrap().message, "missing");
    }

    #[test]
    fn test_checks_run_in_declaration_order() {
        let rule = ValidationRule::new()
            .check("deny-root", deny_root)
            .check("deny-dash", deny_dash);
        // "root" trips the first check even though it has no dash
        assert_eq!(rule.evaluate("root").unwrap().message, "root is taken");
        let error = rule.evaluate("a-b").unwrap();
        assert_eq!(error.kind, FieldErrorKind::DisallowedValue);
        assert_eq!(error.message, "no dashes");
    }

    #[test]
    fn test_email_pattern_shapes() {
        assert!(EMAIL_PATTERN.is_match("user@example.com"));
        assert!(EMAIL_PATTERN.is_match("first.last+tag@sub-domain.co"));
        assert!(!EMAIL_PATTERN.is_match("user@"));
        assert!(!EMAIL_PATTERN.is_match("@example.com"));
        assert!(!EMAIL_PATTERN.is_match("user example.com"));
    }

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(FieldErrorKind::MissingRequired.as_str(), "required");
        assert_eq!(FieldErrorKind::PatternMismatch.as_str(), "pattern");
        assert_eq!(FieldErrorKind::DisallowedValue.as_str(), "disallowed");
    }
}
