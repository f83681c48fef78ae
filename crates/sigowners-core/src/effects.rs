//! Collaborator effect traits
//!
//! The decision core never talks to the platform or the file cache directly.
//! Each external question is one effect trait; handlers live in the hosting
//! service (production) or in `sigowners-testkit` (tests).
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: hosting webhook service, `sigowners-testkit`, `sigowners-cli`
//! - **Failure semantics**: every error returned here is a hard error for the
//!   resolution in progress; handlers own their own retries and caching

use async_trait::async_trait;

use crate::types::{Branch, ChangedFile, FilesInfo, RepoRole};
use crate::{Identity, Result};

/// Repository role lookup
#[async_trait]
pub trait RoleEffects: Send + Sync {
    /// Role of `identity` on `org/repo`.
    async fn get_role(&self, org: &str, repo: &str, identity: &Identity) -> Result<RepoRole>;
}

/// Changed-file listing for proposed changes
#[async_trait]
pub trait ChangeEffects: Send + Sync {
    /// Files touched by change `number` on `org/repo`.
    async fn get_changed_files(&self, org: &str, repo: &str, number: u64)
        -> Result<Vec<ChangedFile>>;
}

/// Versioned file cache
#[async_trait]
pub trait FileCacheEffects: Send + Sync {
    /// All files named `filename` stored for `branch`.
    ///
    /// An empty [`FilesInfo`] means none were stored; it is not an error.
    async fn get_files(&self, branch: &Branch, filename: &str, recursive: bool)
        -> Result<FilesInfo>;
}

/// Everything a permission resolution needs
pub trait OwnershipEffects: RoleEffects + ChangeEffects + FileCacheEffects + Send + Sync {}

// Blanket implementation
impl<T> OwnershipEffects for T where T: RoleEffects + ChangeEffects + FileCacheEffects + Send + Sync {}

