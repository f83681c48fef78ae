//! sigowners CLI library
//!
//! Evaluates ownership decisions offline: the working tree of a checkout
//! stands in for the file cache, and the role and changed files come from the
//! command line.

pub mod checkout;
pub mod commands;

pub use checkout::LocalCheckout;
