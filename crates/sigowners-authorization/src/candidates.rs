//! Directories touched by a change

use sigowners_core::{ChangedFile, SigDirRule};
use std::collections::BTreeSet;

/// Deepest changed path accepted, counted in `/` separators.
pub const MAX_PATH_SEPARATORS: usize = 2;

/// Why a changed path disqualified the whole change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathRejection {
    /// Path is outside every governed sig directory
    #[error("{path} is outside the governed sig directories")]
    OutsideGovernedTree {
        /// Offending path
        path: String,
    },
    /// Path is nested deeper than an ownership directory allows
    #[error("{path} has {separators} separators, at most {max} allowed", max = MAX_PATH_SEPARATORS)]
    TooDeep {
        /// Offending path
        path: String,
        /// Separators counted in `path`
        separators: usize,
    },
}

/// Directories of a change still waiting for an ownership file to cover them.
///
/// Only built by [`DirectoryAuthorizer::candidates`](crate::DirectoryAuthorizer::candidates),
/// which refuses an empty change, so a fresh set always holds a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDirectorySet {
    remaining: BTreeSet<String>,
}

impl CandidateDirectorySet {
    /// Collect the parent directories of `files`.
    ///
    /// A single path failing `rule` or exceeding [`MAX_PATH_SEPARATORS`]
    /// rejects the whole change.
    pub(crate) fn collect(
        files: &[ChangedFile],
        rule: &SigDirRule,
    ) -> Result<Self, PathRejection> {
        let mut remaining = BTreeSet::new();
        for file in files {
            if !rule.matches(&file.path) {
                return Err(PathRejection::OutsideGovernedTree {
                    path: file.path.clone(),
                });
            }
            let separators = file.separator_count();
            if separators > MAX_PATH_SEPARATORS {
                return Err(PathRejection::TooDeep {
                    path: file.path.clone(),
                    separators,
                });
            }
            remaining.insert(file.dir());
        }
        Ok(Self { remaining })
    }

    /// Whether `dir` still needs covering.
    pub fn contains(&self, dir: &str) -> bool {
        self.remaining.contains(dir)
    }

    /// Mark `dir` as covered. Returns false if it was not pending.
    pub fn cover(&mut self, dir: &str) -> bool {
        self.remaining.remove(dir)
    }

    /// Number of uncovered directories.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// True once every directory is covered.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Pending directories in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.remaining.iter().map(String::as_str)
    }

    /// Uncovered directories, consuming the set.
    pub fn into_remaining(self) -> Vec<String> {
        self.remaining.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn rule() -> SigDirRule {
        SigDirRule::new(r"^sig/[^/]+/[^/]+$").unwrap()
    }

    fn files(paths: &[&str]) -> Vec<ChangedFile> {
        paths.iter().map(|p| ChangedFile::new(*p)).collect()
    }

    #[test]
    fn duplicates_collapse() {
        let set = CandidateDirectorySet::collect(
            &files(&[
                "sig/group-a/OWNERS",
                "sig/group-a/README.md",
                "sig/group-b/sig-info.yaml",
            ]),
            &rule(),
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.contains("sig/group-a"));
        assert!(set.contains("sig/group-b"));
    }

    #[test]
    fn one_ungoverned_path_rejects_everything() {
        let err = CandidateDirectorySet::collect(
            &files(&["sig/group-a/OWNERS", "src/main.rs"]),
            &rule(),
        )
        .unwrap_err();
        assert_matches!(err, PathRejection::OutsideGovernedTree { path } if path == "src/main.rs");
    }

    #[test]
    fn deep_path_is_rejected_even_when_pattern_matches() {
        let permissive = SigDirRule::new("^sig/").unwrap();
        let err = CandidateDirectorySet::collect(
            &files(&["sig/group-a/OWNERS", "sig/group-a/sub/OWNERS"]),
            &permissive,
        )
        .unwrap_err();
        assert_matches!(err, PathRejection::TooDeep { separators: 3, .. });
    }

    #[test]
    fn cover_removes_pending_directories_once() {
        let mut set =
            CandidateDirectorySet::collect(&files(&["sig/group-a/OWNERS"]), &rule()).unwrap();
        assert!(set.cover("sig/group-a"));
        assert!(!set.cover("sig/group-a"));
        assert!(set.is_empty());
    }
}
