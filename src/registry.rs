//! Operations on an in-memory [`Registry`]. Nothing here touches the
//! document on disk; callers persist through [`crate::store`].

use std::{env, path::Path};

use tracing::debug;

use crate::{
    error::{Error, Result},
    model::{AliasEntry, Registry, absolutize, is_reserved},
};

impl Registry {
    /// One line per alias, right-aligned to the longest alias name:
    /// `"  x: /path/to/x"`. Calling it again restarts the sequence.
    pub fn list_formatted(&self) -> impl Iterator<Item = String> + '_ {
        let width = self
            .aliases
            .iter()
            .map(|e| e.alias.chars().count())
            .max()
            .unwrap_or(0);
        self.aliases
            .iter()
            .map(move |e| format!("{:>width$}: {}", e.alias, e.path.display()))
    }

    /// Bind `alias` to `path`, resolved against the current directory.
    pub fn add(&mut self, alias: &str, path: impl AsRef<Path>) -> Result<()> {
        let cwd = env::current_dir()?;
        self.add_in(alias, path.as_ref(), &cwd)
    }

    /// Like [`Registry::add`] with an explicit base directory for relative paths.
    ///
    /// An existing alias keeps its position and repository; only the path changes.
    pub fn add_in(&mut self, alias: &str, path: &Path, cwd: &Path) -> Result<()> {
        if alias.is_empty() {
            return Err(Error::Argument("alias must not be empty".into()));
        }
        if is_reserved(alias) {
            return Err(Error::Reserved {
                alias: alias.to_string(),
            });
        }

        let path = absolutize(path, cwd);
        match self.aliases.iter_mut().find(|e| e.alias == alias) {
            Some(existing) => {
                debug!(alias, path = %path.display(), "replacing alias");
                existing.path = path;
            }
            None => {
                debug!(alias, path = %path.display(), "adding alias");
                self.aliases.push(AliasEntry::new(alias, path));
            }
        }
        Ok(())
    }

    /// Drop every entry named `alias`. Returns how many were removed.
    pub fn remove(&mut self, alias: &str) -> usize {
        let before = self.aliases.len();
        self.aliases.retain(|e| e.alias != alias);
        before - self.aliases.len()
    }

    pub fn entry(&self, alias: &str) -> Option<&AliasEntry> {
        self.aliases.iter().find(|e| e.alias == alias)
    }

    pub fn get(&self, alias: &str) -> Result<&Path> {
        self.entry(alias)
            .map(|e| e.path.as_path())
            .ok_or_else(|| Error::AliasNotFound {
                alias: alias.to_string(),
            })
    }

    pub fn set_repo(&mut self, alias: &str, repo: &str) -> Result<()> {
        let entry = self
            .aliases
            .iter_mut()
            .find(|e| e.alias == alias)
            .ok_or_else(|| Error::AliasNotFound {
                alias: alias.to_string(),
            })?;
        entry.repo = Some(repo.to_string());
        Ok(())
    }
}

/// Parse the `custom` command's argument.
pub fn parse_flag(value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Error::Argument(format!(
            "invalid argument `{other}`, expected 'true' or 'false'"
        ))),
    }
}
