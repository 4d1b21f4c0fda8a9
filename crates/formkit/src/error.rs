use camino::Utf8PathBuf;
use thiserror::Error;

/// Why a [`reorder`](crate::FormDocument::reorder) was refused.
///
/// The document is left as it was whenever one of these is returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("Expected {expected} positions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Position {position} is outside 1..={len}")]
    InvalidPosition { position: usize, len: usize },
    #[error("Position {0} appears more than once")]
    DuplicatePosition(usize),
    #[error("Position {0} is missing from the new order")]
    MissingPosition(usize),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No output directory given and none configured")]
    MissingOutputDir,
    #[error("Invalid output file name: {0:?}")]
    InvalidFileName(String),
    #[error("Failed to write {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
