//! `sigowners decode`: show who a local ownership file authorizes

use anyhow::{Context, Result};
use base64::Engine;
use clap::{Args, ValueEnum};
use sigowners_authorization::{decode, DecodeOutcome, OwnershipVariant};
use std::path::PathBuf;

/// Ownership file schema, as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// `OWNERS` maintainers and committers
    Owners,
    /// `sig-info.yaml` maintainers
    SigInfo,
}

impl From<VariantArg> for OwnershipVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Owners => OwnershipVariant::Owners,
            VariantArg::SigInfo => OwnershipVariant::SigInfo,
        }
    }
}

/// Arguments for `sigowners decode`
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Schema of the file
    #[arg(long, value_enum, default_value = "owners")]
    pub variant: VariantArg,

    /// Ownership file to read
    pub file: PathBuf,
}

/// Decode the file named in `args` the way the resolver would.
pub async fn run(args: &DecodeArgs) -> Result<DecodeOutcome> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("reading {}", args.file.display()))?;
    let content = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(decode(args.variant.into(), &content))
}
