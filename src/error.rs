//! Error types for boundary loading and lookups.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while building a provider from boundary files.
///
/// Every variant carries the file that caused it, so a failed startup
/// points straight at the bad dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open boundary file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decompress boundary file {path}: {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse boundary file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("boundary file {path} is not a GeoJSON FeatureCollection")]
    NotFeatureCollection { path: PathBuf },

    #[error("feature #{index} in {path} has no numeric non-zero id")]
    MissingId { path: PathBuf, index: usize },
}

/// Non-fatal lookup failure surfaced to callers of the geocoder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("unknown key {0}")]
    UnknownKey(String),
}
