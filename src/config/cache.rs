//! Query cache settings.

use std::path::PathBuf;

use serde::Deserialize;

/// Local cache for split queries.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Serve split queries from the cache when it is still fresh.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding the cache files. Created on first write.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

fn default_enabled() -> bool {
    true
}

fn default_dir() -> PathBuf {
    PathBuf::from(".cache")
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dir: default_dir(),
        }
    }
}
