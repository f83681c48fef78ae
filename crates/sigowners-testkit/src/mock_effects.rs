//! Mock collaborator handlers for testing

use async_trait::async_trait;
use parking_lot::Mutex;
use sigowners_core::effects::{ChangeEffects, FileCacheEffects, RoleEffects};
use sigowners_core::{
    Branch, ChangedFile, FileEntry, FilesInfo, Identity, RepoRole, Result, SigownersError,
};
use std::collections::HashMap;
use std::sync::Arc;

/// One request received by [`MockOwnershipHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorCall {
    /// `RoleEffects::get_role`
    GetRole {
        org: String,
        repo: String,
        identity: String,
    },
    /// `ChangeEffects::get_changed_files`
    GetChangedFiles {
        org: String,
        repo: String,
        number: u64,
    },
    /// `FileCacheEffects::get_files`
    GetFiles {
        branch: Branch,
        filename: String,
        recursive: bool,
    },
}

#[derive(Debug, Default)]
struct MockState {
    roles: HashMap<String, RepoRole>,
    changes: HashMap<u64, Vec<ChangedFile>>,
    files: HashMap<(String, String), Vec<FileEntry>>,
    role_failure: Option<SigownersError>,
    change_failure: Option<SigownersError>,
    file_failures: HashMap<String, SigownersError>,
    calls: Vec<CollaboratorCall>,
}

/// In-memory role, change and file-cache collaborators.
///
/// Identities without a configured role are `read`. Files are keyed by branch
/// name and filename; platform, org and repo are recorded in the call log but
/// not used for lookup. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockOwnershipHandler {
    state: Arc<Mutex<MockState>>,
}

impl MockOwnershipHandler {
    /// Create an empty handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `identity` a repository role.
    pub fn with_role(self, identity: &str, role: RepoRole) -> Self {
        self.state
            .lock()
            .roles
            .insert(Identity::new(identity).as_str().to_string(), role);
        self
    }

    /// Register the files touched by change `number`.
    pub fn with_change(self, number: u64, paths: &[&str]) -> Self {
        self.state
            .lock()
            .changes
            .insert(number, paths.iter().map(|p| ChangedFile::new(*p)).collect());
        self
    }

    /// Store `entries` as the files named `filename` on `branch`.
    pub fn with_files(self, branch: &str, filename: &str, entries: Vec<FileEntry>) -> Self {
        self.state
            .lock()
            .files
            .entry((branch.to_string(), filename.to_string()))
            .or_default()
            .extend(entries);
        self
    }

    /// Make every role lookup fail.
    pub fn failing_role_lookup(self, message: &str) -> Self {
        self.state.lock().role_failure = Some(SigownersError::role_lookup(message));
        self
    }

    /// Make every change listing fail.
    pub fn failing_change_listing(self, message: &str) -> Self {
        self.state.lock().change_failure = Some(SigownersError::change_listing(message));
        self
    }

    /// Make file lookups for `filename` fail.
    pub fn failing_file_lookup(self, filename: &str, message: &str) -> Self {
        self.state.lock().file_failures.insert(
            filename.to_string(),
            SigownersError::content_retrieval(message),
        );
        self
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<CollaboratorCall> {
        self.state.lock().calls.clone()
    }

    /// Filenames requested from the file cache, in order.
    pub fn requested_files(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                CollaboratorCall::GetFiles { filename, .. } => Some(filename.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

#[async_trait]
impl RoleEffects for MockOwnershipHandler {
    async fn get_role(&self, org: &str, repo: &str, identity: &Identity) -> Result<RepoRole> {
        let mut state = self.state.lock();
        state.calls.push(CollaboratorCall::GetRole {
            org: org.to_string(),
            repo: repo.to_string(),
            identity: identity.to_string(),
        });
        if let Some(err) = &state.role_failure {
            return Err(err.clone());
        }
        Ok(state
            .roles
            .get(identity.as_str())
            .cloned()
            .unwrap_or(RepoRole::Read))
    }
}

#[async_trait]
impl ChangeEffects for MockOwnershipHandler {
    async fn get_changed_files(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<ChangedFile>> {
        let mut state = self.state.lock();
        state.calls.push(CollaboratorCall::GetChangedFiles {
            org: org.to_string(),
            repo: repo.to_string(),
            number,
        });
        if let Some(err) = &state.change_failure {
            return Err(err.clone());
        }
        Ok(state.changes.get(&number).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl FileCacheEffects for MockOwnershipHandler {
    async fn get_files(
        &self,
        branch: &Branch,
        filename: &str,
        recursive: bool,
    ) -> Result<FilesInfo> {
        let mut state = self.state.lock();
        state.calls.push(CollaboratorCall::GetFiles {
            branch: branch.clone(),
            filename: filename.to_string(),
            recursive,
        });
        if let Some(err) = state.file_failures.get(filename) {
            return Err(err.clone());
        }
        let files = state
            .files
            .get(&(branch.branch.clone(), filename.to_string()))
            .cloned()
            .unwrap_or_default();
        Ok(FilesInfo::new(files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::owners_entry;

    #[tokio::test]
    async fn unknown_identities_read_only() {
        let handler = MockOwnershipHandler::new().with_role("Admin1", RepoRole::Admin);

        let role = handler
            .get_role("org", "repo", &Identity::new("admin1"))
            .await
            .unwrap();
        assert_eq!(role, RepoRole::Admin);

        let role = handler
            .get_role("org", "repo", &Identity::new("someone"))
            .await
            .unwrap();
        assert_eq!(role, RepoRole::Read);
        assert_eq!(handler.calls().len(), 2);
    }

    #[tokio::test]
    async fn files_are_keyed_by_branch_and_name() {
        let handler = MockOwnershipHandler::new().with_files(
            "master",
            "OWNERS",
            vec![owners_entry("sig/a/OWNERS", &["bob"], &[])],
        );

        let on_master = Branch::new("gitee", "org", "repo", "master");
        let on_dev = Branch::new("gitee", "org", "repo", "dev");
        assert_eq!(handler.get_files(&on_master, "OWNERS", false).await.unwrap().len(), 1);
        assert!(handler.get_files(&on_dev, "OWNERS", false).await.unwrap().is_empty());
        assert!(handler
            .get_files(&on_master, "sig-info.yaml", false)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            handler.requested_files(),
            vec!["OWNERS", "OWNERS", "sig-info.yaml"]
        );
    }

    #[tokio::test]
    async fn injected_failures_are_returned() {
        let handler = MockOwnershipHandler::new()
            .failing_change_listing("api down")
            .failing_file_lookup("OWNERS", "cache down");

        let err = handler.get_changed_files("org", "repo", 1).await.unwrap_err();
        assert_eq!(err, SigownersError::change_listing("api down"));

        let branch = Branch::new("gitee", "org", "repo", "master");
        let err = handler.get_files(&branch, "OWNERS", false).await.unwrap_err();
        assert_eq!(err, SigownersError::content_retrieval("cache down"));
    }
}
