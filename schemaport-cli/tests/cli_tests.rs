//! Integration tests for the schemaport CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use schemaport_schema::{Entity, Field, FieldType, Index, IndexKind, ProjectVersion};

/// Get the schemaport binary
#[allow(deprecated)]
fn schemaport_cmd() -> Command {
    Command::cargo_bin("schemaport").unwrap()
}

fn write_version(dir: &Path) -> std::path::PathBuf {
    let id = Field::new("id", FieldType::Uuid).key(true);
    let email = Field::new("email", FieldType::Email);
    let created = Field::new("created_at", FieldType::DateTime);
    let users = Entity::new("users")
        .with_index(Index::new("idx_email", IndexKind::Index).with_field(email.id))
        .with_index(Index::new("idx_created", IndexKind::Index).with_field(created.id))
        .with_field(id)
        .with_field(email)
        .with_field(created);
    let version = ProjectVersion::new().with_entity(users);

    let path = dir.join("version.json");
    fs::write(&path, version.to_json().unwrap()).unwrap();
    path
}

#[test]
fn test_help_command() {
    schemaport_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: schemaport"))
        .stdout(predicate::str::contains("introspect"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("sql"));
}

#[test]
fn test_generate_help() {
    schemaport_cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--dialect"))
        .stdout(predicate::str::contains("--action"));
}

#[test]
fn test_generate_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_version(temp_dir.path());

    schemaport_cmd()
        .current_dir(temp_dir.path())
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .args(["--dialect", "mysql", "--action", "create,select_indexed_simple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE IF NOT EXISTS `users`"))
        .stdout(predicate::str::contains("-- UsersByEmail"))
        .stdout(predicate::str::contains("ORDER BY `created_at` DESC"));
}

#[test]
fn test_generate_to_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_version(temp_dir.path());
    let out = temp_dir.path().join("executions");

    schemaport_cmd()
        .current_dir(temp_dir.path())
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .args(["--dialect", "pg", "--action", "create", "--action", "delete"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let executions: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(executions.len(), 1);
    let dir = executions[0].as_ref().unwrap().path();
    let create = fs::read_to_string(dir.join("create.sql")).unwrap();
    assert!(create.contains("CREATE TABLE IF NOT EXISTS \"users\""));
    assert!(dir.join("delete.sql").exists());
}

#[test]
fn test_generate_uses_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_version(temp_dir.path());
    fs::write(
        temp_dir.path().join("schemaport.toml"),
        "[generate]\ndialect = \"pg\"\nactions = [\"insert\"]\n",
    )
    .unwrap();

    schemaport_cmd()
        .current_dir(temp_dir.path())
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "INSERT INTO \"users\" (\"id\", \"email\", \"created_at\") VALUES ($1, $2, $3);",
        ));
}

#[test]
fn test_generate_missing_input() {
    let temp_dir = TempDir::new().unwrap();

    schemaport_cmd()
        .current_dir(temp_dir.path())
        .args(["generate", "--input", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_introspect_requires_url() {
    let temp_dir = TempDir::new().unwrap();

    schemaport_cmd()
        .current_dir(temp_dir.path())
        .env_remove("SCHEMAPORT_DATABASE_URL")
        .arg("introspect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database URL"));
}

#[test]
fn test_introspect_rejects_unknown_scheme() {
    let temp_dir = TempDir::new().unwrap();

    schemaport_cmd()
        .current_dir(temp_dir.path())
        .args(["sql", "--url", "sqlite://app.db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported database URL scheme"));
}
