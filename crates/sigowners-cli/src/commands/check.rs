//! `sigowners check`: decide a change against a local checkout

use anyhow::{Context, Result};
use clap::Args;
use sigowners_authorization::{AccessDecision, PermissionResolver};
use sigowners_core::{ChangeRef, ChangedFile, OwnershipConfig, RepoRole};
use std::path::PathBuf;

use crate::checkout::LocalCheckout;

/// Arguments for `sigowners check`
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Repository working tree holding the ownership files
    #[arg(long, default_value = ".")]
    pub checkout: PathBuf,

    /// Commenter asking to approve
    #[arg(long)]
    pub identity: String,

    /// Repository role of the commenter
    #[arg(long, default_value = "read")]
    pub role: String,

    /// Accept directory ownership in place of an elevated role
    #[arg(long)]
    pub require_directory_check: bool,

    /// Organization reported in logs
    #[arg(long, default_value = "local")]
    pub org: String,

    /// Repository reported in logs
    #[arg(long, default_value = "checkout")]
    pub repo: String,

    /// Base branch the checkout represents
    #[arg(long, default_value = "master")]
    pub base: String,

    /// Paths changed by the proposed change, relative to the repository root
    #[arg(required = true)]
    pub changed: Vec<String>,
}

/// Evaluate the decision described by `args`.
pub async fn run(args: &CheckArgs, config: OwnershipConfig) -> Result<AccessDecision> {
    let root = std::fs::canonicalize(&args.checkout)
        .with_context(|| format!("opening checkout {}", args.checkout.display()))?;
    let changed = args
        .changed
        .iter()
        .map(|path| ChangedFile::new(path.trim_start_matches("./")))
        .collect();
    let checkout = LocalCheckout::new(root, &args.identity, RepoRole::parse(&args.role), changed);

    let resolver = PermissionResolver::new(checkout, config)?;
    let decision = resolver
        .resolve(
            &args.org,
            &args.repo,
            &args.identity,
            args.require_directory_check,
            &ChangeRef::new(0, &args.base),
        )
        .await?;
    Ok(decision)
}
