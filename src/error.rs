//! Fatal input errors. Any of these aborts the run before a deck is written.

use std::path::PathBuf;
use thiserror::Error;

pub const DOWNLOAD_URL: &str = "https://github.com/scriptin/jmdict-simplified/releases/latest";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} not found, download it from {}", .0.display(), DOWNLOAD_URL)]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but lacks a required top-level key.
    #[error("invalid file {}: missing '{key}' key", .path.display())]
    MissingKey { path: PathBuf, key: &'static str },
}
