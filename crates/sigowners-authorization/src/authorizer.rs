//! Directory ownership authorization
//!
//! An identity may approve a change through directory ownership only when
//! every directory the change touches has an ownership file listing it.
//! Coverage is unanimous: one directory whose file omits the identity, or one
//! directory without a file, denies the whole change.
//!
//! Only one ownership variant is consulted per decision. `OWNERS` files take
//! precedence; `sig-info.yaml` files are read only when the branch has no
//! `OWNERS` file at all.

use sigowners_core::{ChangedFile, FilesInfo, Identity, OwnershipConfig, Result, SigDirRule};

use crate::candidates::CandidateDirectorySet;
use crate::decision::{AccessDecision, DecisionReason};
use crate::decoder::{decode, OwnershipVariant};

/// Ownership files selected for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipSource<'a> {
    /// At least one `OWNERS` file exists
    Owners(&'a FilesInfo),
    /// No `OWNERS` file, at least one `sig-info.yaml`
    SigInfo(&'a FilesInfo),
    /// Neither variant exists
    None,
}

impl<'a> OwnershipSource<'a> {
    /// Apply variant precedence to the two retrieved collections.
    pub fn select(owners: &'a FilesInfo, sig_info: &'a FilesInfo) -> Self {
        if !owners.is_empty() {
            Self::Owners(owners)
        } else if !sig_info.is_empty() {
            Self::SigInfo(sig_info)
        } else {
            Self::None
        }
    }

    /// Variant being consulted, if any.
    pub fn variant(&self) -> Option<OwnershipVariant> {
        match self {
            Self::Owners(_) => Some(OwnershipVariant::Owners),
            Self::SigInfo(_) => Some(OwnershipVariant::SigInfo),
            Self::None => None,
        }
    }
}

/// Applies the unanimous-coverage rule to a change.
#[derive(Debug, Clone)]
pub struct DirectoryAuthorizer {
    rule: SigDirRule,
}

impl DirectoryAuthorizer {
    /// Create an authorizer for paths governed by `rule`.
    pub fn new(rule: SigDirRule) -> Self {
        Self { rule }
    }

    /// Create an authorizer from configuration.
    pub fn from_config(config: &OwnershipConfig) -> Result<Self> {
        Ok(Self::new(config.compile()?))
    }

    /// Governed-directory rule in use.
    pub fn rule(&self) -> &SigDirRule {
        &self.rule
    }

    /// Decide whether `identity` owns every directory touched by `changed`.
    pub fn authorize(
        &self,
        changed: &[ChangedFile],
        owners: &FilesInfo,
        sig_info: &FilesInfo,
        identity: &Identity,
    ) -> AccessDecision {
        match self.candidates(changed) {
            Ok(candidates) => self.authorize_candidates(candidates, owners, sig_info, identity),
            Err(reason) => deny(reason),
        }
    }

    /// Validate path shapes and collect the touched directories.
    ///
    /// Runs before any ownership file is fetched, so a change that can never
    /// pass costs no cache lookups.
    pub fn candidates(
        &self,
        changed: &[ChangedFile],
    ) -> std::result::Result<CandidateDirectorySet, DecisionReason> {
        if changed.is_empty() {
            return Err(DecisionReason::NoChangedFiles);
        }
        CandidateDirectorySet::collect(changed, &self.rule).map_err(DecisionReason::from)
    }

    /// Match collected directories against the retrieved ownership files.
    pub fn authorize_candidates(
        &self,
        mut pending: CandidateDirectorySet,
        owners: &FilesInfo,
        sig_info: &FilesInfo,
        identity: &Identity,
    ) -> AccessDecision {
        let source = OwnershipSource::select(owners, sig_info);
        let (variant, files) = match source {
            OwnershipSource::Owners(files) => (OwnershipVariant::Owners, files),
            OwnershipSource::SigInfo(files) => (OwnershipVariant::SigInfo, files),
            OwnershipSource::None => return deny(DecisionReason::NoOwnershipFiles),
        };
        let directories = pending.len();
        for entry in files.iter() {
            let dir = entry.dir();
            if !pending.contains(&dir) {
                continue;
            }

            let outcome = tracing::debug_span!("ownership_file", path = %entry.path)
                .in_scope(|| decode(variant, &entry.content));
            if !outcome.identities.contains_identity(identity) {
                return deny(DecisionReason::IdentityNotListed {
                    variant,
                    directory: dir,
                });
            }

            pending.cover(&dir);
            if pending.is_empty() {
                return AccessDecision::allow(DecisionReason::DirectoryOwner {
                    variant,
                    directories,
                });
            }
        }

        deny(DecisionReason::UncoveredDirectories {
            variant,
            directories: pending.into_remaining(),
        })
    }
}

fn deny(reason: DecisionReason) -> AccessDecision {
    tracing::debug!(reason = %reason, "directory ownership denied");
    AccessDecision::deny(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use sigowners_core::FileEntry;

    fn authorizer() -> DirectoryAuthorizer {
        DirectoryAuthorizer::from_config(&OwnershipConfig::default()).unwrap()
    }

    fn owners(path: &str, maintainers: &[&str]) -> FileEntry {
        let mut yaml = String::from("maintainers:\n");
        for m in maintainers {
            yaml.push_str(&format!("- {m}\n"));
        }
        FileEntry::new(
            path,
            base64::engine::general_purpose::STANDARD.encode(yaml),
        )
    }

    fn changed(paths: &[&str]) -> Vec<ChangedFile> {
        paths.iter().map(|p| ChangedFile::new(*p)).collect()
    }

    #[test]
    fn source_prefers_owners() {
        let some = FilesInfo::new(vec![owners("sig/a/OWNERS", &["x"])]);
        let none = FilesInfo::default();

        assert_eq!(
            OwnershipSource::select(&some, &some).variant(),
            Some(OwnershipVariant::Owners)
        );
        assert_eq!(
            OwnershipSource::select(&none, &some).variant(),
            Some(OwnershipVariant::SigInfo)
        );
        assert_eq!(OwnershipSource::select(&none, &none), OwnershipSource::None);
    }

    #[test]
    fn empty_change_is_denied() {
        let decision = authorizer().authorize(
            &[],
            &FilesInfo::new(vec![owners("sig/a/OWNERS", &["bob"])]),
            &FilesInfo::default(),
            &Identity::new("bob"),
        );
        assert_eq!(decision, AccessDecision::deny(DecisionReason::NoChangedFiles));
    }

    #[test]
    fn candidate_sets_start_non_empty() {
        assert_eq!(
            authorizer().candidates(&[]),
            Err(DecisionReason::NoChangedFiles)
        );

        let pending = authorizer()
            .candidates(&changed(&["sig/a/README.md", "sig/a/OWNERS"]))
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert!(pending.contains("sig/a"));
    }

    #[test]
    fn files_outside_candidates_are_ignored() {
        let decision = authorizer().authorize(
            &changed(&["sig/a/README.md"]),
            &FilesInfo::new(vec![
                owners("sig/b/OWNERS", &["mallory"]),
                owners("sig/a/OWNERS", &["bob"]),
            ]),
            &FilesInfo::default(),
            &Identity::new("Bob"),
        );
        assert!(decision.is_allowed());
    }

    #[test]
    fn first_relevant_file_wins_for_duplicated_directory() {
        let decision = authorizer().authorize(
            &changed(&["sig/a/README.md"]),
            &FilesInfo::new(vec![
                owners("sig/a/OWNERS", &["bob"]),
                owners("sig/a/OWNERS", &["mallory"]),
            ]),
            &FilesInfo::default(),
            &Identity::new("bob"),
        );
        assert!(decision.is_allowed());
    }

    #[test]
    fn uncovered_directories_are_reported() {
        let decision = authorizer().authorize(
            &changed(&["sig/a/README.md", "sig/b/README.md", "sig/c/README.md"]),
            &FilesInfo::new(vec![owners("sig/a/OWNERS", &["bob"])]),
            &FilesInfo::default(),
            &Identity::new("bob"),
        );
        assert_eq!(
            decision.reason,
            DecisionReason::UncoveredDirectories {
                variant: OwnershipVariant::Owners,
                directories: vec!["sig/b".to_string(), "sig/c".to_string()],
            }
        );
        assert!(!decision.allowed);
    }
}
