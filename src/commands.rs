//! One handler per CLI command. Handlers load the registry, apply a single
//! operation and write the document back when it changed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::CommandFactory;
use tracing::warn;

use crate::{
    cli::{Cli, Command},
    error::Error,
    launch::{self, System},
    registry::parse_flag,
    store, tui,
};

pub fn run(cli: Cli) -> Result<()> {
    let path = cli.resolve_config()?;

    match cli.command {
        Some(Command::Init) => init(&path),
        Some(Command::Editor { cmd }) => editor(&path, &cmd),
        Some(Command::Alias { name, path: dir }) => alias(&path, name.as_deref(), dir),
        Some(Command::Remove { name }) => remove(&path, &name),
        Some(Command::Custom { value }) => custom(&path, value.as_deref()),
        Some(Command::Git { name, repo }) => git(&path, &name, repo.as_deref()),
        Some(Command::Migrate) => migrate(&path),
        Some(Command::Help) => {
            Cli::command().print_long_help()?;
            Ok(())
        }
        Some(Command::Open(words)) => open(&path, &words),
        None => pick(&path),
    }
}

fn init(path: &Path) -> Result<()> {
    store::initialize(path)?;
    println!("Created {}", path.display());
    Ok(())
}

fn editor(path: &Path, cmd: &[String]) -> Result<()> {
    let mut registry = store::load(path)?;
    if cmd.is_empty() {
        println!("{}", registry.editor_cmd);
        return Ok(());
    }
    registry.editor_cmd = cmd.join(" ");
    store::save(&registry, path)?;
    Ok(())
}

fn alias(path: &Path, name: Option<&str>, dir: Option<PathBuf>) -> Result<()> {
    let mut registry = store::load(path)?;
    match (name, dir) {
        (None, _) => {
            for line in registry.list_formatted() {
                println!("{line}");
            }
        }
        (Some(name), None) => println!("{}", registry.get(name)?.display()),
        (Some(name), Some(dir)) => {
            registry.add(name, dir)?;
            store::save(&registry, path)?;
        }
    }
    Ok(())
}

fn remove(path: &Path, name: &str) -> Result<()> {
    let mut registry = store::load(path)?;
    if registry.remove(name) == 0 {
        warn!(alias = name, "no such alias, nothing removed");
    }
    store::save(&registry, path)?;
    Ok(())
}

fn custom(path: &Path, value: Option<&str>) -> Result<()> {
    let mut registry = store::load(path)?;
    match value {
        None => println!("Custom behaviour is set to: {}", registry.omit_path),
        Some(value) => {
            registry.omit_path = parse_flag(value)?;
            store::save(&registry, path)?;
        }
    }
    Ok(())
}

fn git(path: &Path, name: &str, repo: Option<&str>) -> Result<()> {
    let mut registry = store::load(path)?;
    match repo {
        None => {
            let entry = registry.entry(name).ok_or_else(|| Error::AliasNotFound {
                alias: name.to_string(),
            })?;
            match &entry.repo {
                Some(repo) => println!("{repo}"),
                None => println!("No repository set for `{name}`"),
            }
        }
        Some(repo) => {
            registry.set_repo(name, repo)?;
            store::save(&registry, path)?;
        }
    }
    Ok(())
}

fn migrate(path: &Path) -> Result<()> {
    store::migrate(path)?;
    println!("Migrated {}", path.display());
    Ok(())
}

fn open(path: &Path, words: &[String]) -> Result<()> {
    let [alias] = words else {
        return Err(Error::Argument("too many arguments; expected a single alias".into()).into());
    };
    let registry = store::load(path)?;
    launch::open(&registry, alias, &mut System)?;
    Ok(())
}

fn pick(path: &Path) -> Result<()> {
    let registry = store::load(path)?;
    if registry.aliases.is_empty() {
        return Err(Error::Argument(
            "no aliases added yet; add one with `ropen alias <name> <path>`".into(),
        )
        .into());
    }
    if registry.editor_cmd.trim().is_empty() {
        return Err(
            Error::Argument("editor command not set; set it with `ropen editor <cmd>`".into())
                .into(),
        );
    }

    if let Some(alias) = tui::select(&registry.aliases)? {
        launch::open(&registry, &alias, &mut System)?;
    }
    Ok(())
}
