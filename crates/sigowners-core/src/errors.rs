//! Unified error system for sigowners
//!
//! Only collaborator failures and configuration problems are errors. A denied
//! authorization is a normal outcome and never travels through this type.

use serde::{Deserialize, Serialize};

/// Unified error type for all sigowners operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SigownersError {
    /// Repository role lookup failed
    #[error("Role lookup failed: {message}")]
    RoleLookup {
        /// Error message reported by the role collaborator
        message: String,
    },

    /// Listing the files of a change failed
    #[error("Change listing failed: {message}")]
    ChangeListing {
        /// Error message reported by the change collaborator
        message: String,
    },

    /// Retrieving ownership files from the file cache failed
    #[error("Content retrieval failed: {message}")]
    ContentRetrieval {
        /// Error message reported by the file cache collaborator
        message: String,
    },

    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl SigownersError {
    /// Create a role lookup error
    pub fn role_lookup(message: impl Into<String>) -> Self {
        Self::RoleLookup {
            message: message.into(),
        }
    }

    /// Create a change listing error
    pub fn change_listing(message: impl Into<String>) -> Self {
        Self::ChangeListing {
            message: message.into(),
        }
    }

    /// Create a content retrieval error
    pub fn content_retrieval(message: impl Into<String>) -> Self {
        Self::ContentRetrieval {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error came from an external collaborator.
    ///
    /// Callers treat these as "unable to determine", not as a denial.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::RoleLookup { .. } | Self::ChangeListing { .. } | Self::ContentRetrieval { .. }
        )
    }
}

/// Standard Result type for sigowners operations
pub type Result<T> = std::result::Result<T, SigownersError>;

impl From<serde_json::Error> for SigownersError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid(format!("Invalid JSON: {err}"))
    }
}

impl From<toml::de::Error> for SigownersError {
    fn from(err: toml::de::Error) -> Self {
        Self::invalid(format!("Invalid TOML: {err}"))
    }
}

impl From<regex::Error> for SigownersError {
    fn from(err: regex::Error) -> Self {
        Self::invalid(format!("Invalid sig directory pattern: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_failures_are_classified() {
        assert!(SigownersError::role_lookup("timeout").is_collaborator_failure());
        assert!(SigownersError::change_listing("404").is_collaborator_failure());
        assert!(SigownersError::content_retrieval("cache down").is_collaborator_failure());
        assert!(!SigownersError::invalid("bad pattern").is_collaborator_failure());
    }

    #[test]
    fn display_includes_message() {
        let err = SigownersError::content_retrieval("cache down");
        assert_eq!(err.to_string(), "Content retrieval failed: cache down");
    }
}
