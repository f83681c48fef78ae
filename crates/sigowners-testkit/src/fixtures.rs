//! Ownership-file fixtures
//!
//! Builders return [`FileEntry`] values exactly as the file cache would:
//! a repository path plus standard base64 content.

use base64::Engine;
use sigowners_core::FileEntry;

/// Standard base64 of `text`.
pub fn encode(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text)
}

/// `OWNERS` file at `path` listing `maintainers` and `committers`.
pub fn owners_entry(path: &str, maintainers: &[&str], committers: &[&str]) -> FileEntry {
    let mut yaml = String::new();
    push_list(&mut yaml, "maintainers", maintainers);
    push_list(&mut yaml, "committers", committers);
    FileEntry::new(path, encode(&yaml))
}

/// `sig-info.yaml` file at `path` whose maintainers carry `gitee_ids`.
pub fn sig_info_entry(path: &str, gitee_ids: &[&str]) -> FileEntry {
    let sig = path
        .rsplit('/')
        .nth(1)
        .unwrap_or("sig");
    let mut yaml = format!("name: {sig}\ndescription: fixture sig\nmaintainers:\n");
    for id in gitee_ids {
        yaml.push_str(&format!("- gitee_id: {id}\n  name: {id}\n"));
    }
    FileEntry::new(path, encode(&yaml))
}

/// File at `path` whose content is used verbatim, e.g. corrupt base64.
pub fn raw_entry(path: &str, content: &str) -> FileEntry {
    FileEntry::new(path, content)
}

fn push_list(yaml: &mut String, key: &str, values: &[&str]) {
    if values.is_empty() {
        return;
    }
    yaml.push_str(key);
    yaml.push_str(":\n");
    for value in values {
        yaml.push_str("- ");
        yaml.push_str(value);
        yaml.push('\n');
    }
}
