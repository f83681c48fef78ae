//! Case-insensitive reviewer identities
//!
//! Platform handles compare without regard to case. Every construction path
//! of [`Identity`] goes through [`normalize_identity`], so stored and compared
//! values are always lowercase and callers never have to remember to fold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Fold a raw handle into its canonical lowercase form.
pub fn normalize_identity(raw: &str) -> String {
    raw.to_lowercase()
}

/// Lowercase handle of a reviewer, commenter or maintainer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Create an identity from any handle spelling.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize_identity(raw.as_ref()))
    }

    /// Normalized handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Identity {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for Identity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Set of authorized identities decoded from one ownership file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySet {
    members: BTreeSet<Identity>,
}

impl IdentitySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handle, folding its case.
    pub fn insert(&mut self, raw: impl AsRef<str>) -> bool {
        self.members.insert(Identity::new(raw))
    }

    /// Membership test for a handle in any spelling.
    pub fn contains(&self, raw: impl AsRef<str>) -> bool {
        self.members.contains(&Identity::new(raw))
    }

    /// Membership test for an already-normalized identity.
    pub fn contains_identity(&self, identity: &Identity) -> bool {
        self.members.contains(identity)
    }

    /// Number of distinct identities.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when nobody is authorized.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate members in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.members.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IdentitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for IdentitySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for raw in iter {
            self.insert(raw);
        }
    }
}

impl<'a> IntoIterator for &'a IdentitySet {
    type Item = &'a Identity;
    type IntoIter = std::collections::btree_set::Iter<'a, Identity>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
