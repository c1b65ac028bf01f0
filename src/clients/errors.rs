use std::path::PathBuf;

use rspotify::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Spotify authentication failed: {0}")]
    Authentication(#[source] ClientError),

    #[error("Spotify API request failed: {0}")]
    Upstream(#[source] ClientError),

    #[error("Malformed track record at rank {rank}: missing {field}")]
    MalformedTrack { rank: usize, field: &'static str },

    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Theme {theme}: invalid {field} color {value:?}")]
    InvalidColor {
        theme: String,
        field: &'static str,
        value: String,
    },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Failed to write {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
