//! Data exchanged with the platform and file-cache collaborators

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parent directory of a `/`-separated repository path.
///
/// A path without a separator lives in the repository root, reported as `.`.
pub fn parent_dir(path: &str) -> String {
    match path.rfind('/') {
        None => ".".to_string(),
        Some(idx) => {
            let dir = path[..idx].trim_end_matches('/');
            if dir.is_empty() {
                "/".to_string()
            } else {
                dir.to_string()
            }
        }
    }
}

/// One entry in the diff of a proposed change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Path relative to the repository root
    pub path: String,
}

impl ChangedFile {
    /// Changed file at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Number of `/` separators in the path.
    pub fn separator_count(&self) -> usize {
        self.path.matches('/').count()
    }

    /// Directory containing the file.
    pub fn dir(&self) -> String {
        parent_dir(&self.path)
    }
}

/// A raw file returned by the file cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path of the file relative to the repository root
    pub path: String,
    /// Standard base64 encoding of the file body
    pub content: String,
}

impl FileEntry {
    /// Entry for `path` with base64 `content`.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Directory the file governs.
    pub fn dir(&self) -> String {
        parent_dir(&self.path)
    }
}

/// All files of one name found on a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesInfo {
    /// Matching files, in the order the cache returned them
    pub files: Vec<FileEntry>,
}

impl FilesInfo {
    /// Wrap retrieved entries.
    pub fn new(files: Vec<FileEntry>) -> Self {
        Self { files }
    }

    /// True when the cache holds no such file.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Entries in retrieval order.
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.iter()
    }
}

impl FromIterator<FileEntry> for FilesInfo {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Cache key for files stored for a branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    /// Code-hosting platform, e.g. `gitee`
    pub platform: String,
    /// Organization or namespace
    pub org: String,
    /// Repository name
    pub repo: String,
    /// Branch name
    pub branch: String,
}

impl Branch {
    /// Cache key for `branch` of `org/repo` on `platform`.
    pub fn new(
        platform: impl Into<String>,
        org: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            org: org.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}/{}@{}",
            self.platform, self.org, self.repo, self.branch
        )
    }
}

/// Reference to a proposed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRef {
    /// Change number on the platform
    pub number: u64,
    /// Branch the change targets; ownership files are read from here
    pub base_ref: String,
}

impl ChangeRef {
    /// Change `number` targeting `base_ref`.
    pub fn new(number: u64, base_ref: impl Into<String>) -> Self {
        Self {
            number,
            base_ref: base_ref.into(),
        }
    }
}

/// Repository role of a user, as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepoRole {
    /// Repository administrator
    Admin,
    /// Push access
    Write,
    /// Read-only access
    Read,
    /// Any other role string, preserved verbatim
    Other(String),
}

impl RepoRole {
    /// Parse a platform role string; unknown roles are kept as `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "write" => Self::Write,
            "read" => Self::Read,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Admin and write roles approve without consulting ownership files.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::Admin | Self::Write)
    }

    /// Lowercase role name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Write => "write",
            Self::Read => "read",
            Self::Other(raw) => raw,
        }
    }
}

impl FromStr for RepoRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for RepoRole {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<RepoRole> for String {
    fn from(role: RepoRole) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for RepoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
