//! Local cache for split queries.
//!
//! Both cache files hold all three splits, tagged with the number of claims
//! in the database when they were written. A file is served only while that
//! number is unchanged; any other state (missing, unreadable, stale) is a
//! miss that recomputes all three splits and rewrites the file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::example::{self, TrainingExample};
use super::split::Split;
use crate::config::CacheSettings;
use crate::error::Result;
use crate::model::Adu;
use crate::store::ArgumentStore;

const CLAIMS_CACHE_FILE: &str = "claims_cache.json";
const DATA_CACHE_FILE: &str = "data_cache.json";

#[derive(Debug, Serialize, Deserialize)]
struct SplitCache<T> {
    claim_count: i64,
    cached_at: DateTime<Utc>,
    training: Vec<T>,
    test: Vec<T>,
    benchmark: Vec<T>,
}

impl<T> SplitCache<T> {
    fn take(self, split: Split) -> Vec<T> {
        match split {
            Split::Training => self.training,
            Split::Test => self.test,
            Split::Benchmark => self.benchmark,
        }
    }
}

/// Split query front end with an optional on-disk cache.
#[derive(Debug, Clone)]
pub struct QueryCache {
    dir: PathBuf,
    enabled: bool,
}

impl QueryCache {
    #[must_use]
    pub fn new(settings: &CacheSettings) -> Self {
        Self {
            dir: settings.dir.clone(),
            enabled: settings.enabled,
        }
    }

    /// A cache that always queries the store.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Claims of `split`, from the cache when fresh.
    ///
    /// # Errors
    /// Propagates store errors. Cache read and write failures are not errors.
    pub fn claims<S: ArgumentStore + ?Sized>(
        &self,
        store: &mut S,
        split: Split,
    ) -> Result<Vec<Adu>> {
        self.cached(store, CLAIMS_CACHE_FILE, split, example::claims)
    }

    /// Training examples of `split`, from the cache when fresh.
    ///
    /// # Errors
    /// Propagates store errors. Cache read and write failures are not errors.
    pub fn examples<S: ArgumentStore + ?Sized>(
        &self,
        store: &mut S,
        split: Split,
    ) -> Result<Vec<TrainingExample>> {
        self.cached(store, DATA_CACHE_FILE, split, example::examples)
    }

    /// Cache files currently present on disk.
    #[must_use]
    pub fn existing_files(&self) -> Vec<PathBuf> {
        [CLAIMS_CACHE_FILE, DATA_CACHE_FILE]
            .iter()
            .map(|name| self.dir.join(name))
            .filter(|path| path.exists())
            .collect()
    }

    /// Delete both cache files. Returns how many were removed.
    ///
    /// # Errors
    /// Returns an IO error if an existing file cannot be removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for path in self.existing_files() {
            fs::remove_file(&path)?;
            removed += 1;
        }
        Ok(removed)
    }

    fn cached<S, T, F>(&self, store: &mut S, file: &str, split: Split, compute: F) -> Result<Vec<T>>
    where
        S: ArgumentStore + ?Sized,
        T: Serialize + DeserializeOwned,
        F: Fn(&mut S, Split) -> Result<Vec<T>>,
    {
        if !self.enabled {
            return compute(&mut *store, split);
        }

        let path = self.dir.join(file);
        let claim_count = store.count_claims()?;
        if let Some(entry) = load::<SplitCache<T>>(&path) {
            if entry.claim_count == claim_count {
                debug!(path = %path.display(), split = %split, "cache hit");
                return Ok(entry.take(split));
            }
            debug!(
                path = %path.display(),
                cached = entry.claim_count,
                current = claim_count,
                "cache stale"
            );
        } else {
            debug!(path = %path.display(), "cache miss");
        }

        let entry = SplitCache {
            claim_count,
            cached_at: Utc::now(),
            training: compute(&mut *store, Split::Training)?,
            test: compute(&mut *store, Split::Test)?,
            benchmark: compute(&mut *store, Split::Benchmark)?,
        };
        if let Err(e) = save(&self.dir, &path, &entry) {
            warn!(path = %path.display(), error = %e, "failed to write query cache");
        }
        Ok(entry.take(split))
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let bytes = fs::read(path).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unreadable cache file");
            None
        }
    }
}

fn save<T: Serialize>(dir: &Path, path: &Path, value: &T) -> Result<()> {
    fs::create_dir_all(dir)?;
    let bytes = serde_json::to_vec(value)?;
    // Write then rename so a crash never leaves a truncated cache behind.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
