//! sigowners authorization
//!
//! Decides whether a reviewer may approve a proposed change using ownership
//! files discovered in the repository itself:
//!
//! - [`decoder`]: base64 + YAML decoding of `OWNERS` and `sig-info.yaml`
//!   files into identity sets, with contained (logged, never propagated)
//!   failures
//! - [`candidates`]: the set of directories touched by a change, and the path
//!   shape rules every changed file must satisfy
//! - [`authorizer`]: the unanimous-coverage rule over one ownership variant
//! - [`resolver`]: the entry point combining the elevated-role fast path with
//!   the directory check
//!
//! Denials are ordinary [`AccessDecision`] values. Only collaborator failures
//! surface as errors.

#![forbid(unsafe_code)]

pub mod authorizer;
pub mod candidates;
pub mod decision;
pub mod decoder;
pub mod resolver;

pub use authorizer::{DirectoryAuthorizer, OwnershipSource};
pub use candidates::{CandidateDirectorySet, PathRejection, MAX_PATH_SEPARATORS};
pub use decision::{AccessDecision, DecisionReason};
pub use decoder::{decode, DecodeDiagnostic, DecodeOutcome, OwnershipVariant};
pub use resolver::PermissionResolver;
