//! Whole-file JSON persistence for the registry document.

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{
    fs::{self, Permissions},
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{
    error::{Error, Result},
    model::Registry,
};

/// Create an empty document at `path`, creating parent directories as needed.
pub fn initialize(path: &Path) -> Result<Registry> {
    if path.exists() {
        return Err(Error::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(dir) = parent_dir(path) {
        fs::create_dir_all(dir)?;
    }
    let registry = Registry::default();
    save(&registry, path)?;
    debug!(path = %path.display(), "initialized registry");
    Ok(registry)
}

pub fn load(path: &Path) -> Result<Registry> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;
    let registry: Registry = serde_json::from_str(&raw).map_err(|reason| Error::Parse {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(path = %path.display(), aliases = registry.aliases.len(), "loaded registry");
    Ok(registry)
}

/// Serialize with two-space indentation and replace the document in one
/// rename. A symlinked document is written through to its target, and the
/// existing file mode is kept.
pub fn save(registry: &Registry, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(registry)?;
    json.push('\n');

    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(e.into()),
    };
    let permissions = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(),
        Err(e) => return Err(e.into()),
    };

    let dir = parent_dir(&target).unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(&target).map_err(|e| Error::Io(e.error))?;
    debug!(path = %target.display(), aliases = registry.aliases.len(), "saved registry");
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Rewrite an older document in the current format.
pub fn migrate(path: &Path) -> Result<Registry> {
    let registry = load(path)?;
    save(&registry, path)?;
    Ok(registry)
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
