use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

pub const TOOL_NAME: &str = "ropen";

#[derive(Parser, Debug)]
#[command(
    name = "ropen",
    version,
    about = "Jump into an aliased project directory and open your editor",
    disable_help_subcommand = true,
    after_help = "Run without arguments to pick an alias interactively.\n\
                  Commands can be abbreviated by their first letter (`ropen i` == `ropen init`)."
)]
pub struct Cli {
    /// Registry file (default: ~/.config/ropen/ropen.json)
    #[arg(long, global = true, value_name = "FILE", env = "ROPEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Initialize a new, empty registry file
    #[command(alias = "i")]
    Init,

    /// Get the editor command, or set it to CMD
    #[command(alias = "e")]
    Editor {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "CMD")]
        cmd: Vec<String>,
    },

    /// List all aliases, get the path of NAME, or assign PATH to NAME
    #[command(alias = "a")]
    Alias { name: Option<String>, path: Option<PathBuf> },

    /// Remove alias NAME
    #[command(alias = "r")]
    Remove { name: String },

    /// Get or set whether the path is left off the editor command
    #[command(alias = "c")]
    Custom {
        #[arg(value_name = "true|false")]
        value: Option<String>,
    },

    /// Get or set the git repository cloned when NAME's directory is missing
    #[command(alias = "g")]
    Git { name: String, repo: Option<String> },

    /// Rewrite the registry file in the current format
    #[command(alias = "m")]
    Migrate,

    /// Print this help message
    #[command(alias = "h")]
    Help,

    /// Open the project bound to an alias
    #[command(external_subcommand)]
    Open(Vec<String>),
}

impl Cli {
    pub fn resolve_config(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config {
            return Ok(path.clone());
        }
        default_config_path()
    }
}

fn default_config_path() -> Result<PathBuf> {
    let home = env::var("HOME").context("HOME not set; cannot resolve default registry location")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join(TOOL_NAME)
        .join(format!("{TOOL_NAME}.json")))
}
