use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong between reading the inputs and writing a PNG.
///
/// `Read` and `Parse` abort the run. `MissingKey` only skips one chart.
/// `Io`, `Render` and `Encode` fail the chart being written; the remaining
/// charts are still attempted.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("key '{key}' not found in data")]
    MissingKey { key: String },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to draw {}: {message}", .path.display())]
    Render { path: PathBuf, message: String },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
