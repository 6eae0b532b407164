use std::{
    collections::HashSet,
    path::{Component, Path, PathBuf},
};

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize};

lazy_static! {
    /// Command words (and their abbreviations) that can never be used as aliases.
    pub static ref RESERVED: HashSet<&'static str> = [
        "init", "i", "editor", "e", "alias", "a", "remove", "r", "custom", "c", "help", "h",
        "git", "g", "migrate", "m",
    ]
    .into_iter()
    .collect();
}

pub fn is_reserved(alias: &str) -> bool {
    RESERVED.contains(alias)
}

/// The persisted document: editor configuration plus the ordered alias list.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "editorCmd", default)]
    pub editor_cmd: String,

    /// When true the editor is started without the path argument and is
    /// expected to open its working directory.
    #[serde(rename = "customBehaviour", default)]
    pub omit_path: bool,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub aliases: Vec<AliasEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub alias: String,
    pub path: PathBuf,
    #[serde(rename = "git_repo", default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

impl AliasEntry {
    pub fn new(alias: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            alias: alias.into(),
            path: path.into(),
            repo: None,
        }
    }

    /// Substring match against the alias name or its path (case-sensitive).
    pub fn matches(&self, needle: &str) -> bool {
        self.alias.contains(needle) || self.path.to_string_lossy().contains(needle)
    }
}

// Older documents were written with `"aliases": null` when empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AliasEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<AliasEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Resolve `path` against `cwd` and collapse `.`/`..` components lexically.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                if out.parent().is_some() {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}
