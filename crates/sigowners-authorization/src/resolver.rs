//! Permission resolution entry point
//!
//! Combines the repository-role fast path with the directory-ownership check.
//! Collaborator lookups run one after another: role, changed files, `OWNERS`
//! files, `sig-info.yaml` files. Any collaborator failure is returned as an
//! error and means "unable to determine"; every other outcome is an
//! [`AccessDecision`].

use sigowners_core::{
    Branch, ChangeRef, FilesInfo, Identity, OwnershipConfig, OwnershipEffects, Result,
};
use tracing::instrument;

use crate::authorizer::DirectoryAuthorizer;
use crate::decision::{AccessDecision, DecisionReason};

/// Resolves whether a commenter may approve a change.
///
/// Holds only configuration and the collaborator handle; every call builds and
/// drops its own working state, so one resolver serves concurrent requests.
#[derive(Debug, Clone)]
pub struct PermissionResolver<E: OwnershipEffects> {
    effects: E,
    config: OwnershipConfig,
    authorizer: DirectoryAuthorizer,
}

impl<E: OwnershipEffects> PermissionResolver<E> {
    /// Create a resolver, compiling the configured directory rule.
    pub fn new(effects: E, config: OwnershipConfig) -> Result<Self> {
        let authorizer = DirectoryAuthorizer::from_config(&config)?;
        Ok(Self {
            effects,
            config,
            authorizer,
        })
    }

    /// Collaborator handle.
    pub fn effects(&self) -> &E {
        &self.effects
    }

    /// Configuration the resolver was built with.
    pub fn config(&self) -> &OwnershipConfig {
        &self.config
    }

    /// Decide whether `identity` may approve `change` on `org/repo`.
    ///
    /// Admin and write roles always pass. Otherwise the identity passes only
    /// when `requires_directory_check` is set and it owns every touched
    /// directory.
    #[instrument(skip(self, change), fields(change = change.number))]
    pub async fn resolve(
        &self,
        org: &str,
        repo: &str,
        identity: &str,
        requires_directory_check: bool,
        change: &ChangeRef,
    ) -> Result<AccessDecision> {
        let identity = Identity::new(identity);

        let role = self.effects.get_role(org, repo, &identity).await?;
        if role.is_elevated() {
            tracing::debug!(role = %role, "elevated repository role");
            return Ok(AccessDecision::allow(DecisionReason::ElevatedRole { role }));
        }

        if !requires_directory_check {
            return Ok(AccessDecision::deny(DecisionReason::RoleInsufficient {
                role,
            }));
        }

        self.resolve_directory_owner(org, repo, &identity, change)
            .await
    }

    /// Boolean form of [`resolve`](Self::resolve).
    pub async fn has_permission(
        &self,
        org: &str,
        repo: &str,
        identity: &str,
        requires_directory_check: bool,
        change: &ChangeRef,
    ) -> Result<bool> {
        self.resolve(org, repo, identity, requires_directory_check, change)
            .await
            .map(|decision| decision.allowed)
    }

    async fn resolve_directory_owner(
        &self,
        org: &str,
        repo: &str,
        identity: &Identity,
        change: &ChangeRef,
    ) -> Result<AccessDecision> {
        let changed = self
            .effects
            .get_changed_files(org, repo, change.number)
            .await?;

        let candidates = match self.authorizer.candidates(&changed) {
            Ok(candidates) => candidates,
            Err(reason) => {
                tracing::debug!(reason = %reason, "change rejected before ownership lookup");
                return Ok(AccessDecision::deny(reason));
            }
        };

        let owners = self
            .fetch_files(org, repo, &change.base_ref, &self.config.owners_file)
            .await?;
        let sig_info = self
            .fetch_files(org, repo, &change.base_ref, &self.config.sig_info_file)
            .await?;

        Ok(self
            .authorizer
            .authorize_candidates(candidates, &owners, &sig_info, identity))
    }

    async fn fetch_files(
        &self,
        org: &str,
        repo: &str,
        branch: &str,
        filename: &str,
    ) -> Result<FilesInfo> {
        let key = Branch::new(&self.config.platform, org, repo, branch);
        let files = self.effects.get_files(&key, filename, false).await?;

        if files.is_empty() {
            tracing::info!(
                org = %org,
                repo = %repo,
                branch = %branch,
                "there is no {filename} file stored in cache"
            );
        }

        Ok(files)
    }
}
