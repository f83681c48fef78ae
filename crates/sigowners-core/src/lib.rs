//! sigowners core - shared foundation
//!
//! Types and interfaces shared by every sigowners crate. Nothing here performs
//! I/O: collaborators that talk to the code-hosting platform or the file cache
//! are expressed as effect traits and implemented elsewhere.
//!
//! # Contents
//!
//! - [`Identity`] / [`IdentitySet`]: case-insensitive reviewer handles
//! - [`ChangedFile`], [`FileEntry`], [`FilesInfo`], [`Branch`], [`ChangeRef`]:
//!   the data model exchanged with collaborators
//! - [`RepoRole`]: repository role vocabulary returned by role lookup
//! - [`effects`]: `RoleEffects`, `ChangeEffects`, `FileCacheEffects`
//! - [`config`]: [`OwnershipConfig`] and the compiled [`SigDirRule`]
//! - [`SigownersError`]: unified error type

#![forbid(unsafe_code)]

/// Collaborator effect interfaces
pub mod effects;

/// Unified error handling
pub mod errors;

/// Ownership configuration
pub mod config;

/// Identity normalization
pub mod identity;

/// Data model exchanged with collaborators
pub mod types;

pub use config::{OwnershipConfig, SigDirRule, SigownersConfig};
pub use effects::{ChangeEffects, FileCacheEffects, OwnershipEffects, RoleEffects};
pub use errors::{Result, SigownersError};
pub use identity::{normalize_identity, Identity, IdentitySet};
pub use types::{Branch, ChangeRef, ChangedFile, FileEntry, FilesInfo, RepoRole};
