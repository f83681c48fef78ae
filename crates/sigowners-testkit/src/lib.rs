//! sigowners testkit
//!
//! Test utilities shared by the sigowners crates:
//!
//! - [`MockOwnershipHandler`]: in-memory role, change and file-cache
//!   collaborators with injectable failures and a call log
//! - [`fixtures`]: base64 ownership-file entries for both schemas
//! - [`LogCapture`]: captures formatted `tracing` output for assertions

pub mod fixtures;
pub mod logging;
pub mod mock_effects;

pub use fixtures::{encode, owners_entry, raw_entry, sig_info_entry};
pub use logging::LogCapture;
pub use mock_effects::{CollaboratorCall, MockOwnershipHandler};
