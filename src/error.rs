//! Error types for pagetext.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pagetext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end an extraction run.
///
/// Every variant is terminal: a run that fails produces no transcript and
/// writes no output.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be opened as a document.
    #[error("Failed to open document: {0}")]
    OpenFailed(String),

    /// A single page could not be resolved or tokenized.
    #[error("Failed to read page {page}: {reason}")]
    PageReadFailed {
        /// 1-indexed page number
        page: u32,
        /// What went wrong
        reason: String,
    },

    /// The output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`Error::OpenFailed`]
    Open,
    /// See [`Error::PageReadFailed`]
    PageRead,
    /// See [`Error::WriteFailed`]
    Write,
    /// See [`Error::Render`]
    Render,
}

impl Error {
    /// Build a page read failure from any displayable cause.
    pub fn page_read(page: u32, reason: impl std::fmt::Display) -> Self {
        Error::PageReadFailed {
            page,
            reason: reason.to_string(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OpenFailed(_) => ErrorKind::Open,
            Error::PageReadFailed { .. } => ErrorKind::PageRead,
            Error::WriteFailed { .. } => ErrorKind::Write,
            Error::Render(_) => ErrorKind::Render,
        }
    }

    /// The failing page, for page read failures.
    pub fn page(&self) -> Option<u32> {
        match self {
            Error::PageReadFailed { page, .. } => Some(*page),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OpenFailed("not a PDF".to_string());
        assert_eq!(err.to_string(), "Failed to open document: not a PDF");

        let err = Error::page_read(2, "bad content stream");
        assert_eq!(err.to_string(), "Failed to read page 2: bad content stream");
    }

    #[test]
    fn test_write_failed_display() {
        let err = Error::WriteFailed {
            path: PathBuf::from("out/pdf_content.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write out/pdf_content.txt: denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::OpenFailed(String::new()).kind(), ErrorKind::Open);
        assert_eq!(Error::page_read(1, "x").kind(), ErrorKind::PageRead);
        assert_eq!(Error::Render(String::new()).kind(), ErrorKind::Render);
        assert_eq!(Error::page_read(7, "x").page(), Some(7));
        assert_eq!(Error::OpenFailed(String::new()).page(), None);
    }
}
