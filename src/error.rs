//! Error types for pdfqueue.
//!
//! Errors fall into three categories, matching how operations against the
//! remote service can fail:
//!
//! - **Validation errors**: caught client-side before any network I/O
//!   (wrong file type, empty text, bad indices or arguments).
//! - **Remote errors**: the service answered with an `error` field, which is
//!   surfaced verbatim.
//! - **Transport errors**: the request never completed (connection failure,
//!   timeout). Local state is left unchanged.
//!
//! Every error is terminal for the operation that raised it; there is no
//! automatic retry.

use std::path::PathBuf;

/// Result type alias for pdfqueue operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pdfqueue operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File is not a PDF (wrong extension or missing `%PDF-` header).
    #[error(
        "Not a PDF file: {}\n  Only PDF files can be uploaded to the merge service",
        path.display()
    )]
    InvalidFileType {
        /// Path to the rejected file.
        path: PathBuf,
    },

    /// Text for an add-text edit was empty.
    #[error("Text to add must not be empty")]
    EmptyText,

    /// Page number is invalid. Pages are 1-based on the command line.
    #[error("Invalid page number: {page}. Page numbers start at 1")]
    InvalidPage {
        /// The rejected 1-based page number.
        page: u32,
    },

    /// Rotation is not one of the angles the service accepts.
    #[error("Invalid rotation: {degrees}. Must be 90, 180, or 270")]
    InvalidRotation {
        /// The rejected angle in degrees.
        degrees: u16,
    },

    /// An index-based store operation was given an index outside `[0, len)`.
    #[error("Index {index} is out of range for a list of {len} file(s)")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// A descriptor with this server path is already in the list.
    #[error("File already in the list: {path}")]
    DuplicatePath {
        /// The duplicated server-side path.
        path: String,
    },

    /// No files are queued for merging.
    #[error("No files to merge")]
    NoFilesToMerge,

    /// Invalid configuration (bad URL, bad pattern, conflicting options).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what is wrong.
        message: String,
    },

    /// The service answered with an error message.
    #[error("Service error: {message}")]
    Remote {
        /// The `error` field returned by the service, verbatim.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request to {endpoint} timed out; the file list was left unchanged")]
    Timeout {
        /// Endpoint path the request was sent to.
        endpoint: String,
    },

    /// The request failed at the transport level.
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint path the request was sent to.
        endpoint: String,
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },

    /// Local I/O failure (reading a file to upload, writing a download).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a Remote error from a service `error` field.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check whether this error was caught client-side before any network
    /// call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileType { .. }
                | Self::EmptyText
                | Self::InvalidPage { .. }
                | Self::InvalidRotation { .. }
                | Self::OutOfRange { .. }
                | Self::DuplicatePath { .. }
                | Self::NoFilesToMerge
                | Self::InvalidConfig { .. }
        )
    }

    /// Check whether the service itself reported this failure.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Check whether the request never completed (connection or timeout).
    ///
    /// For these the local file list is guaranteed unchanged.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidFileType { .. }
            | Self::EmptyText
            | Self::InvalidPage { .. }
            | Self::InvalidRotation { .. }
            | Self::OutOfRange { .. }
            | Self::DuplicatePath { .. }
            | Self::NoFilesToMerge
            | Self::InvalidConfig { .. } => 1,
            Self::Remote { .. } => 3,
            Self::Timeout { .. } | Self::Transport { .. } => 4,
            Self::Io(_) => 5,
        }
    }
}
