use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn ropen(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ropen").unwrap();
    cmd.env_remove("ROPEN_CONFIG").arg("--config").arg(config);
    cmd
}

fn read(config: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(config).unwrap()).unwrap()
}

#[test]
fn init_uses_home_config_location() -> anyhow::Result<()> {
    let home = tempdir()?;
    Command::cargo_bin("ropen")?
        .env("HOME", home.path())
        .env_remove("ROPEN_CONFIG")
        .arg("init")
        .assert()
        .success();

    let doc = home.path().join(".config/ropen/ropen.json");
    let v = read(&doc);
    assert_eq!(v["editorCmd"], "");
    assert_eq!(v["customBehaviour"], false);
    assert_eq!(v["aliases"], serde_json::json!([]));
    Ok(())
}

#[test]
fn init_twice_reports_existing_document() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    ropen(&config).arg("i").assert().success();
    ropen(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    Ok(())
}

#[test]
fn alias_add_list_get_remove() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    let x = tmp.path().join("x");
    let abc = tmp.path().join("abc");
    fs::create_dir_all(&x)?;
    fs::create_dir_all(&abc)?;

    ropen(&config).arg("init").assert().success();
    ropen(&config).args(["alias", "x"]).arg(&x).assert().success();
    ropen(&config).args(["a", "abc"]).arg(&abc).assert().success();

    let expected = format!("  x: {}\nabc: {}\n", x.display(), abc.display());
    ropen(&config)
        .arg("alias")
        .assert()
        .success()
        .stdout(expected);

    ropen(&config)
        .args(["alias", "abc"])
        .assert()
        .success()
        .stdout(format!("{}\n", abc.display()));

    ropen(&config).args(["remove", "x"]).assert().success();
    ropen(&config).args(["r", "x"]).assert().success();
    ropen(&config)
        .args(["alias", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("doesn't exist"));

    let v = read(&config);
    assert_eq!(v["aliases"].as_array().map(Vec::len), Some(1));
    assert_eq!(v["aliases"][0]["alias"], "abc");
    Ok(())
}

#[test]
fn dot_path_resolves_to_working_directory() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    let work = tmp.path().join("work");
    fs::create_dir_all(&work)?;

    ropen(&config).arg("init").assert().success();
    ropen(&config)
        .current_dir(&work)
        .args(["alias", "here", "."])
        .assert()
        .success();

    let stored = read(&config)["aliases"][0]["path"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_default();
    assert_eq!(
        fs::canonicalize(stored)?,
        fs::canonicalize(&work)?,
    );
    Ok(())
}

#[test]
fn reserved_alias_is_rejected_without_writing() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    ropen(&config).arg("init").assert().success();
    let before = fs::read_to_string(&config)?;

    ropen(&config)
        .args(["alias", "help", "/tmp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reserved"));
    assert_eq!(fs::read_to_string(&config)?, before);
    Ok(())
}

#[test]
fn editor_and_custom_settings_persist() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    ropen(&config).arg("init").assert().success();

    ropen(&config).args(["editor", "code", "--wait"]).assert().success();
    ropen(&config)
        .arg("e")
        .assert()
        .success()
        .stdout("code --wait\n");

    ropen(&config).args(["custom", "true"]).assert().success();
    ropen(&config)
        .arg("c")
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
    ropen(&config)
        .args(["custom", "maybe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expected 'true' or 'false'"));
    assert_eq!(read(&config)["customBehaviour"], true);
    Ok(())
}

#[test]
fn unknown_alias_is_a_user_error() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    ropen(&config).arg("init").assert().success();
    ropen(&config).args(["editor", "true"]).assert().success();

    ropen(&config)
        .arg("nowhere")
        .assert()
        .success()
        .stdout(predicate::str::contains("ropen help"));
    Ok(())
}

#[test]
fn missing_document_suggests_init() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    ropen(&config)
        .arg("alias")
        .assert()
        .success()
        .stdout(predicate::str::contains("ropen init"));
    Ok(())
}

#[test]
fn malformed_document_is_fatal() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    fs::write(&config, "{ not json")?;
    ropen(&config)
        .arg("alias")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed registry"));
    Ok(())
}

#[test]
fn too_many_arguments_exit_zero() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    ropen(&config).arg("init").assert().success();
    ropen(&config)
        .args(["alias", "a1", "b", "c"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("unexpected argument")
                .and(predicate::str::contains("ropen help"))
                .and(predicate::function(|out: &str| out.lines().count() == 1)),
        )
        .stderr("");
    ropen(&config)
        .args(["proj", "extra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("too many arguments"));
    Ok(())
}

#[test]
fn migrate_upgrades_old_document() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    fs::write(&config, r#"{"editorCmd":"hx","aliases":null}"#)?;
    ropen(&config).arg("migrate").assert().success();
    let v = read(&config);
    assert_eq!(v["customBehaviour"], false);
    assert_eq!(v["aliases"], serde_json::json!([]));
    Ok(())
}

#[cfg(unix)]
#[test]
fn launch_runs_editor_and_propagates_failure() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    let proj = tmp.path().join("proj");
    fs::create_dir_all(&proj)?;

    ropen(&config).arg("init").assert().success();
    ropen(&config).args(["alias", "proj"]).arg(&proj).assert().success();

    ropen(&config).args(["editor", "true"]).assert().success();
    ropen(&config).arg("proj").assert().success();

    ropen(&config).args(["editor", "false"]).assert().success();
    ropen(&config)
        .arg("proj")
        .assert()
        .failure()
        .stderr(predicate::str::contains("`false` exited"));
    Ok(())
}

#[test]
fn deleted_alias_directory_is_fatal() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("ropen.json");
    let proj = tmp.path().join("proj");
    fs::create_dir_all(&proj)?;

    ropen(&config).arg("init").assert().success();
    ropen(&config).args(["editor", "true"]).assert().success();
    ropen(&config).args(["alias", "proj"]).arg(&proj).assert().success();
    fs::remove_dir(&proj)?;

    ropen(&config)
        .arg("proj")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot enter"));
    Ok(())
}

#[test]
fn help_lists_commands() {
    let tmp = tempdir().unwrap();
    ropen(&tmp.path().join("ropen.json"))
        .arg("h")
        .assert()
        .success()
        .stdout(predicate::str::contains("alias").and(predicate::str::contains("remove")));
}
