use std::path::{Path, PathBuf};

use argdb::config::DatabaseSettings;
use argdb::db::{self, Engine, Session};
use tempfile::TempDir;

/// Migrated SQLite database in a temporary directory, removed on drop.
pub struct TempDb {
    dir: TempDir,
    path: PathBuf,
    engine: Engine,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("argdb-{name}.db"));

        let url = format!("sqlite://{}", path.display());
        let engine = db::get_engine(&DatabaseSettings::for_url(url)).expect("create engine");
        db::run_migrations(&engine).expect("run migrations");

        Self { dir, path, engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn session(&self) -> Session {
        self.engine.session().expect("check out session")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }
}
