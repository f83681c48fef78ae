//! Configuration validation utilities and rules

use crate::SigownersError;
use std::fmt;

/// Configuration validation result
pub type ValidationResult = Result<(), ValidationError>;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is required but missing or empty
    Required { field: String },
    /// Value format is invalid
    InvalidFormat {
        field: String,
        expected: String,
        actual: String,
    },
    /// Several rules failed at once
    Multiple(Vec<ValidationError>),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { field } => {
                write!(f, "Field '{field}' is required but missing")
            }
            ValidationError::InvalidFormat {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Field '{field}' has invalid format. Expected: {expected}, got: {actual}"
                )
            }
            ValidationError::Multiple(errors) => {
                let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "{}", joined.join("; "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for SigownersError {
    fn from(err: ValidationError) -> Self {
        SigownersError::invalid(err.to_string())
    }
}

/// Configuration validator that accumulates validation rules
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that a string is present and non-empty
    pub fn non_empty(&mut self, field_name: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Required {
                field: field_name.to_string(),
            });
        }
        self
    }

    /// Validate that a filename is a bare name without directory components
    pub fn bare_filename(&mut self, field_name: &str, value: &str) -> &mut Self {
        if value.contains('/') {
            self.errors.push(ValidationError::InvalidFormat {
                field: field_name.to_string(),
                expected: "a file name without '/'".to_string(),
                actual: value.to_string(),
            });
        }
        self
    }

    /// Validate that a value compiles as a regular expression
    pub fn regex(&mut self, field_name: &str, value: &str) -> &mut Self {
        if let Err(e) = regex::Regex::new(value) {
            self.errors.push(ValidationError::InvalidFormat {
                field: field_name.to_string(),
                expected: "a valid regular expression".to_string(),
                actual: e.to_string(),
            });
        }
        self
    }

    /// Finish validation
    pub fn finish(self) -> ValidationResult {
        let mut errors = self.errors;
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}
