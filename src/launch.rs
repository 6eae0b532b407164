use std::{
    env,
    path::{Path, PathBuf},
    process::Command,
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    error::{Error, Result},
    model::Registry,
};

lazy_static! {
    // "quoted words", 'quoted words' or bare words
    static ref TOKEN: Regex = Regex::new(r#""([^"]*)"|'([^']*)'|(\S+)"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Side effects of launching, split out so they can be observed in tests.
pub trait Runner {
    /// Clone `repo` into `dest`.
    fn fetch(&mut self, repo: &str, dest: &Path) -> Result<()>;
    /// Enter `dir` and run `invocation` to completion with inherited stdio.
    fn run(&mut self, dir: &Path, invocation: &Invocation) -> Result<()>;
}

/// Runs things for real: changes the process directory and blocks on children.
pub struct System;

impl Runner for System {
    fn fetch(&mut self, repo: &str, dest: &Path) -> Result<()> {
        println!("{} not found, cloning {repo}", dest.display());
        let invocation = Invocation {
            program: "git".into(),
            args: vec!["clone".into(), repo.into(), dest.to_string_lossy().into_owned()],
        };
        spawn(&invocation)
    }

    fn run(&mut self, dir: &Path, invocation: &Invocation) -> Result<()> {
        env::set_current_dir(dir).map_err(|reason| Error::Chdir {
            path: dir.to_path_buf(),
            reason,
        })?;
        spawn(invocation)
    }
}

fn spawn(invocation: &Invocation) -> Result<()> {
    debug!(program = %invocation.program, args = ?invocation.args, "spawning");
    let status = Command::new(&invocation.program)
        .args(&invocation.args)
        .status()
        .map_err(|reason| Error::Spawn {
            program: invocation.program.clone(),
            reason,
        })?;

    if !status.success() {
        return Err(Error::ChildExit {
            program: invocation.program.clone(),
            status,
        });
    }
    Ok(())
}

pub fn split_command(cmd: &str) -> Vec<String> {
    TOKEN
        .captures_iter(cmd)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Build the editor command line for opening `path`.
pub fn invocation(registry: &Registry, path: &Path) -> Result<Invocation> {
    let mut words = split_command(&registry.editor_cmd).into_iter();
    let Some(program) = words.next() else {
        return Err(Error::Argument(
            "editor command not set; set it with `ropen editor <cmd>`".into(),
        ));
    };
    let mut args: Vec<String> = words.collect();
    if !registry.omit_path {
        args.push(path.to_string_lossy().into_owned());
    }
    Ok(Invocation { program, args })
}

/// Open the directory bound to `alias` in the configured editor.
pub fn open(registry: &Registry, alias: &str, runner: &mut impl Runner) -> Result<()> {
    let entry = registry.entry(alias).ok_or_else(|| Error::UnknownAlias {
        alias: alias.to_string(),
    })?;
    let dir: PathBuf = entry.path.clone();
    let invocation = invocation(registry, &dir)?;

    if let Some(repo) = &entry.repo
        && !dir.exists()
    {
        runner.fetch(repo, &dir)?;
    }
    runner.run(&dir, &invocation)
}
