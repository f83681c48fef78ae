//! Ownership file decoding
//!
//! Ownership files arrive from the file cache as standard base64. Decoding
//! never fails the caller: a corrupt file yields an empty identity set plus a
//! [`DecodeDiagnostic`], which is logged here. An empty set can only deny, so
//! one broken file never grants access and never aborts the other checks.

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use sigowners_core::IdentitySet;
use std::fmt;

/// Which of the two ownership schemas a file follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnershipVariant {
    /// `OWNERS`: `maintainers` and `committers` handle lists
    Owners,
    /// `sig-info.yaml`: `maintainers` entries carrying a `gitee_id`
    SigInfo,
}

impl fmt::Display for OwnershipVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owners => f.write_str("owners"),
            Self::SigInfo => f.write_str("sig-info"),
        }
    }
}

/// `OWNERS` file schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnersFile {
    /// Maintainer handles
    #[serde(deserialize_with = "null_as_empty")]
    pub maintainers: Vec<String>,
    /// Committer handles, equal to maintainers for approval
    #[serde(deserialize_with = "null_as_empty")]
    pub committers: Vec<String>,
}

/// `sig-info.yaml` file schema. Only the maintainer handles matter here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigInfoFile {
    /// Maintainer entries
    #[serde(deserialize_with = "null_as_empty")]
    pub maintainers: Vec<SigMaintainer>,
}

/// One maintainer entry of a `sig-info.yaml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigMaintainer {
    /// Platform handle, the only field used for approval
    pub gitee_id: String,
    /// Display name
    pub name: Option<String>,
    /// Contact address
    pub email: Option<String>,
    /// Affiliation
    pub organization: Option<String>,
}

// `maintainers:` with no value is an empty list, not a schema error.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a file contributed no identities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeDiagnostic {
    /// Content was not valid standard base64
    #[error("decode file: {0}")]
    InvalidBase64(String),
    /// Decoded payload did not match the variant's schema
    #[error("parse yaml file: {0}")]
    InvalidYaml(String),
}

/// Result of decoding one ownership file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Authorized identities, lowercase and duplicate-free
    pub identities: IdentitySet,
    /// Set when decoding failed and `identities` is empty because of it
    pub diagnostic: Option<DecodeDiagnostic>,
}

impl DecodeOutcome {
    fn failed(diagnostic: DecodeDiagnostic) -> Self {
        Self {
            identities: IdentitySet::new(),
            diagnostic: Some(diagnostic),
        }
    }

    /// Whether the file decoded cleanly.
    pub fn is_ok(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Decode base64 `content` as a `variant` file into its authorized identities.
pub fn decode(variant: OwnershipVariant, content: &str) -> DecodeOutcome {
    let outcome = decode_inner(variant, content);
    if let Some(diagnostic) = &outcome.diagnostic {
        tracing::error!(variant = %variant, error = %diagnostic, "ownership file rejected");
    }
    outcome
}

fn decode_inner(variant: OwnershipVariant, content: &str) -> DecodeOutcome {
    // Cached content may be wrapped across lines.
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let payload = match base64::engine::general_purpose::STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => return DecodeOutcome::failed(DecodeDiagnostic::InvalidBase64(e.to_string())),
    };

    if payload.iter().all(u8::is_ascii_whitespace) {
        return DecodeOutcome::default();
    }

    let handles: Vec<String> = match variant {
        OwnershipVariant::Owners => match serde_yaml::from_slice::<OwnersFile>(&payload) {
            Ok(file) => file.maintainers.into_iter().chain(file.committers).collect(),
            Err(e) => return DecodeOutcome::failed(DecodeDiagnostic::InvalidYaml(e.to_string())),
        },
        OwnershipVariant::SigInfo => match serde_yaml::from_slice::<SigInfoFile>(&payload) {
            Ok(file) => file.maintainers.into_iter().map(|m| m.gitee_id).collect(),
            Err(e) => return DecodeOutcome::failed(DecodeDiagnostic::InvalidYaml(e.to_string())),
        },
    };

    DecodeOutcome {
        identities: handles.into_iter().filter(|h| !h.is_empty()).collect(),
        diagnostic: None,
    }
}
