//! Segmentation error types.

use std::path::{Path, PathBuf};

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while segmenting a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Segment width or game height is zero.
    InvalidInput,
    /// The source image is missing or cannot be decoded.
    SourceUnreadable,
    /// The output directory, a segment or the metadata could not be written.
    OutputWriteFailure,
}

/// A structured error for segmentation runs.
///
/// Every kind is fatal to the run. A failure after the output directory was
/// prepared leaves it without `metadata.json`.
#[derive(Debug, Error)]
#[error("{}: {message}", .kind.as_ref())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Path of the file or directory involved, if any.
    pub path: Option<PathBuf>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Creates an error for a source image that cannot be read or decoded.
    pub fn source_unreadable(
        path: impl AsRef<Path>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let path = path.as_ref();
        Self::new(
            ErrorKind::SourceUnreadable,
            format!("cannot read image {}", path.display()),
        )
        .with_path(path)
        .with_source(source)
    }

    /// Creates an error for an output file or directory that cannot be written.
    pub fn output_write_failure(
        path: impl AsRef<Path>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let path = path.as_ref();
        Self::new(
            ErrorKind::OutputWriteFailure,
            format!("cannot write {}", path.display()),
        )
        .with_path(path)
        .with_source(source)
    }

    /// Attaches the path involved in the failure.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}
