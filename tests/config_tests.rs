use std::fs;

use argdb::config::Settings;
use argdb::error::{ConfigError, Error};

#[test]
fn config_loads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("argdb.toml");
    fs::write(
        &path,
        r#"
[database]
host = "db.example.org"
port = 3307
name = "corpus"
pool_size = 3

[cache]
dir = "/tmp/argdb-cache"

[logging]
level = "warn"
format = "json"
"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.database.host, "db.example.org");
    assert_eq!(settings.database.port, 3307);
    assert_eq!(settings.database.name, "corpus");
    assert_eq!(settings.database.pool_size, 3);
    assert_eq!(settings.logging.format, "json");
}

#[test]
fn missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings.database.name, "argument-mining");
    assert_eq!(settings.database.port, 3306);
}

#[test]
fn config_rejects_zero_pool_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("argdb.toml");
    fs::write(&path, "[database]\npool_size = 0\n").unwrap();

    match Settings::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "pool_size", ..
        })) => {}
        Err(err) => panic!("Expected invalid pool size error, got {err}"),
        Ok(_) => panic!("Expected invalid pool size error"),
    }
}

#[test]
fn config_rejects_wrong_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("argdb.toml");
    fs::write(&path, "[database]\nport = \"not a port\"\n").unwrap();

    assert!(matches!(
        Settings::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
