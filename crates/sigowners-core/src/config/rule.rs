//! Compiled governed-directory rule

use regex::Regex;

use crate::Result;

/// Path rule identifying files under a governed sig directory tree.
#[derive(Debug, Clone)]
pub struct SigDirRule {
    pattern: Regex,
}

impl SigDirRule {
    /// Compile a rule from a regular expression.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Whether `path` lives under a governed directory.
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// Source pattern.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}
