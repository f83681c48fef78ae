//! Ownership configuration
//!
//! The decision core consumes three externally supplied settings: which
//! paths live in a governed sig directory tree, the two ownership filenames,
//! and the platform name used as the file-cache key.

mod rule;
mod traits;
mod validation;

pub use rule::SigDirRule;
pub use traits::{OwnershipConfig, SigownersConfig, ENV_PREFIX};
pub use validation::{ConfigValidator, ValidationError, ValidationResult};
