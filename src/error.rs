//! Error type for the fallible edges of the overlay (config, host frames, snapshots).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("malformed host frame: {0}")]
    Frame(#[from] serde_json::Error),

    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("bridge request to {url} failed: {source}")]
    Bridge {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to write snapshot {path:?}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, HudError>;
