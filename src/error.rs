use std::path::PathBuf;

use thiserror::Error;

/// Main library error type.
///
/// Retrieval errors point at user-correctable inputs (a URL or a file path),
/// checkpoint errors report an architecture/weight-file mismatch and are not
/// recoverable.
#[derive(Error, Debug)]
pub enum CamError {
    /// Network download failure.
    #[error("failed to fetch {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("fetching {url} returned status {status}")]
    HttpStatus { url: String, status: reqwest::StatusCode },

    /// A local input file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The category file contained no entries.
    #[error("no categories found in {}", .0.display())]
    EmptyCategories(PathBuf),

    /// The checkpoint does not match the model architecture.
    #[error("checkpoint mismatch: {0}")]
    Checkpoint(String),

    /// Errors returned by the Torch API.
    #[error(transparent)]
    Torch(#[from] tch::TchError),
}
