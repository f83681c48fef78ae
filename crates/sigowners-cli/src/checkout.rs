//! Local checkout collaborators
//!
//! Serves the collaborator effects from a working tree so a decision can be
//! reproduced without the platform API or the file cache.

use async_trait::async_trait;
use base64::Engine;
use sigowners_core::effects::{ChangeEffects, FileCacheEffects, RoleEffects};
use sigowners_core::{
    Branch, ChangedFile, FileEntry, FilesInfo, Identity, RepoRole, Result, SigownersError,
};
use std::path::{Path, PathBuf};

/// Working tree plus the role and change supplied by the operator.
#[derive(Debug, Clone)]
pub struct LocalCheckout {
    root: PathBuf,
    identity: Identity,
    role: RepoRole,
    changed: Vec<ChangedFile>,
}

impl LocalCheckout {
    /// `identity` holds `role`; every other identity is `read`.
    pub fn new(
        root: impl Into<PathBuf>,
        identity: &str,
        role: RepoRole,
        changed: Vec<ChangedFile>,
    ) -> Self {
        Self {
            root: root.into(),
            identity: Identity::new(identity),
            role,
            changed,
        }
    }

    /// Working-tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn repo_path(&self, path: &Path) -> Result<String> {
        let relative = path.strip_prefix(&self.root).map_err(|e| {
            SigownersError::content_retrieval(format!("{}: {e}", path.display()))
        })?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(parts.join("/"))
    }
}

#[async_trait]
impl RoleEffects for LocalCheckout {
    async fn get_role(&self, _org: &str, _repo: &str, identity: &Identity) -> Result<RepoRole> {
        if *identity == self.identity {
            Ok(self.role.clone())
        } else {
            Ok(RepoRole::Read)
        }
    }
}

#[async_trait]
impl ChangeEffects for LocalCheckout {
    async fn get_changed_files(
        &self,
        _org: &str,
        _repo: &str,
        _number: u64,
    ) -> Result<Vec<ChangedFile>> {
        Ok(self.changed.clone())
    }
}

#[async_trait]
impl FileCacheEffects for LocalCheckout {
    /// Every file named `filename` in the working tree, hidden directories
    /// excluded. The checkout is treated as the requested branch.
    async fn get_files(
        &self,
        branch: &Branch,
        filename: &str,
        _recursive: bool,
    ) -> Result<FilesInfo> {
        tracing::debug!(branch = %branch, root = %self.root.display(), filename, "scanning checkout");

        let pattern = format!(
            "{}/**/{}",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            glob::Pattern::escape(filename)
        );
        let options = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };
        let paths = glob::glob_with(&pattern, options)
            .map_err(|e| SigownersError::content_retrieval(format!("bad pattern {pattern}: {e}")))?;

        let mut files = Vec::new();
        for path in paths {
            let path = path.map_err(|e| SigownersError::content_retrieval(e.to_string()))?;
            if !path.is_file() {
                continue;
            }
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                SigownersError::content_retrieval(format!("{}: {e}", path.display()))
            })?;
            files.push(FileEntry::new(
                self.repo_path(&path)?,
                base64::engine::general_purpose::STANDARD.encode(bytes),
            ));
        }
        Ok(FilesInfo::new(files))
    }
}
