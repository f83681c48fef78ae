//! Authorization outcomes
//!
//! A denial is an ordinary value carrying the rule that produced it, so the
//! calling workflow can proceed as "not authorized" and operators can still
//! see why.

use serde::{Deserialize, Serialize};
use sigowners_core::RepoRole;
use std::fmt;

use crate::candidates::PathRejection;
use crate::decoder::OwnershipVariant;

/// Which rule produced an [`AccessDecision`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Admin or write role on the repository
    ElevatedRole {
        /// Role that granted access
        role: RepoRole,
    },
    /// Listed in the ownership file of every touched directory
    DirectoryOwner {
        /// Ownership variant consulted
        variant: OwnershipVariant,
        /// Number of directories covered
        directories: usize,
    },
    /// No elevated role and the action does not accept directory ownership
    RoleInsufficient {
        /// Role the identity holds
        role: RepoRole,
    },
    /// The change touches no files
    NoChangedFiles,
    /// A changed path is outside the governed sig directories
    PathOutsideGovernedTree {
        /// Offending path
        path: String,
    },
    /// A changed path is nested too deeply
    PathTooDeep {
        /// Offending path
        path: String,
        /// Separators counted in `path`
        separators: usize,
    },
    /// Neither ownership variant was found on the base branch
    NoOwnershipFiles,
    /// A touched directory's ownership file does not list the identity
    IdentityNotListed {
        /// Ownership variant consulted
        variant: OwnershipVariant,
        /// Directory whose file vetoed the change
        directory: String,
    },
    /// Some touched directories have no ownership file of the selected variant
    UncoveredDirectories {
        /// Ownership variant consulted
        variant: OwnershipVariant,
        /// Directories left without a file, in lexical order
        directories: Vec<String>,
    },
}

impl From<PathRejection> for DecisionReason {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::OutsideGovernedTree { path } => Self::PathOutsideGovernedTree { path },
            PathRejection::TooDeep { path, separators } => Self::PathTooDeep { path, separators },
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElevatedRole { role } => write!(f, "repository role {role}"),
            Self::DirectoryOwner {
                variant,
                directories,
            } => write!(f, "{variant} owner of all {directories} touched directories"),
            Self::RoleInsufficient { role } => {
                write!(f, "repository role {role} without directory check")
            }
            Self::NoChangedFiles => f.write_str("change has no files"),
            Self::PathOutsideGovernedTree { path } => {
                write!(f, "{path} is outside the governed sig directories")
            }
            Self::PathTooDeep { path, separators } => {
                write!(f, "{path} is nested too deeply ({separators} separators)")
            }
            Self::NoOwnershipFiles => f.write_str("no ownership files on the base branch"),
            Self::IdentityNotListed { variant, directory } => {
                write!(f, "not listed in {variant} file of {directory}")
            }
            Self::UncoveredDirectories {
                variant,
                directories,
            } => write!(
                f,
                "no {variant} file for {}",
                directories.join(", ")
            ),
        }
    }
}

/// Outcome of one authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether the identity may approve
    pub allowed: bool,
    /// Rule that decided
    pub reason: DecisionReason,
}

impl AccessDecision {
    /// Allow with the given reason
    pub fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    /// Deny with the given reason
    pub fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    /// Whether the identity may approve.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.allowed { "authorized" } else { "denied" };
        write!(f, "{verdict}: {}", self.reason)
    }
}
