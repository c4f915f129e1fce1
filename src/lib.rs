//! pdfqueue - client for a web PDF merge service.
//!
//! This library manages an ordered list of PDF files uploaded to a remote
//! merge service and keeps that order consistent with the server across
//! asynchronous round-trips. It provides:
//!
//! - An ordered file store with a narrow, index-checked mutation API
//! - Batch move/remove operations that preserve relative order
//! - A typed HTTP client for the service's upload/reorder/merge/edit
//!   endpoints
//! - A session layer that applies mutations optimistically and adopts the
//!   server's acknowledged list as authoritative
//!
//! The service owns everything PDF: page counting, merging, rotation. This
//! crate never parses PDF content beyond the `%PDF-` header check used to
//! reject non-PDF uploads early.
//!
//! # Examples
//!
//! ```no_run
//! use pdfqueue::config::Config;
//! use pdfqueue::client::ServiceClient;
//! use pdfqueue::selection::Selection;
//! use pdfqueue::session::Session;
//! use std::path::Path;
//!
//! # async fn example() -> pdfqueue::Result<()> {
//! let client = ServiceClient::new(Config::default())?;
//! let mut session = Session::new(client);
//!
//! session.upload(Path::new("a.pdf")).await?;
//! session.upload(Path::new("b.pdf")).await?;
//!
//! // Move the second file to the front, then merge.
//! session.move_up(&Selection::new([1])).await?;
//! let merged = session.merge().await?;
//! println!("merged into {}", merged.output_path);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod ordering;
pub mod output;
pub mod protocol;
pub mod selection;
pub mod session;
pub mod shell;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use selection::Selection;
pub use session::Session;
pub use store::{FileDescriptor, FileStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
