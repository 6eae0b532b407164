//! Error taxonomy for registry, store and launcher operations.

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // Store
    #[error("registry already exists at {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("no registry found at {}; run `ropen init` to create one", path.display())]
    NotFound { path: PathBuf },

    #[error("malformed registry {}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        reason: serde_json::Error,
    },

    // Registry operations
    #[error("`{alias}` is reserved and can't be used as an alias")]
    Reserved { alias: String },

    #[error("alias `{alias}` doesn't exist")]
    AliasNotFound { alias: String },

    #[error("invalid command or non-existent alias `{alias}`; run `ropen help` for info")]
    UnknownAlias { alias: String },

    #[error("{0}")]
    Argument(String),

    // Launcher
    #[error("cannot enter {}: {reason}", path.display())]
    Chdir { path: PathBuf, reason: io::Error },

    #[error("failed to run `{program}`: {reason}")]
    Spawn { program: String, reason: io::Error },

    #[error("`{program}` exited with {status}")]
    ChildExit { program: String, status: ExitStatus },

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Failures caused by what the user typed rather than by the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::AlreadyExists { .. }
                | Error::NotFound { .. }
                | Error::Reserved { .. }
                | Error::AliasNotFound { .. }
                | Error::UnknownAlias { .. }
                | Error::Argument(_)
        )
    }
}
