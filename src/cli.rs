//! CLI argument parsing for pdfqueue.
//!
//! This module defines the command-line interface structure using `clap`.
//! Every subcommand talks to a running merge service; the service address
//! comes from `--url` or the `PDFQUEUE_URL` environment variable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::Result;

/// Client for a web PDF merge service.
///
/// pdfqueue uploads local PDF files to the service, manages their merge
/// order, and asks the service to merge, edit, and serve the result.
#[derive(Parser, Debug)]
#[command(name = "pdfqueue")]
#[command(version)]
#[command(about = "Upload, reorder, merge, and edit PDFs via a merge service", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Base URL of the merge service
    #[arg(
        long,
        global = true,
        value_name = "URL",
        env = "PDFQUEUE_URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub url: String,

    /// Per-request timeout in seconds
    ///
    /// A request that exceeds the timeout fails without touching the
    /// local file list.
    #[arg(
        long,
        global = true,
        value_name = "SECONDS",
        env = "PDFQUEUE_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub timeout: u64,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show server paths and request details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the pdfqueue CLI.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload PDF files to the service
    ///
    /// Inputs may be plain paths or glob patterns; files are uploaded in
    /// the order given, which becomes their merge order.
    Upload {
        /// PDF files or glob patterns to upload
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,
    },

    /// Upload PDF files and merge them into a single document
    ///
    /// Equivalent to `upload` followed by a merge of the uploaded list.
    /// With --output the merged PDF is downloaded to a local file.
    Merge {
        /// PDF files or glob patterns to merge, in order
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,

        /// Download the merged PDF to this local path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Start an interactive session for reordering files
    ///
    /// Commands inside the shell: list, select, up, down, rm, clear,
    /// merge, download, theme, help, quit. Indices are 1-based.
    Shell,

    /// Download a produced PDF from the service
    Download {
        /// File name on the service, e.g. merged.pdf
        #[arg(value_name = "NAME")]
        filename: String,

        /// Local path to write to (defaults to the remote name)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Remove one page from a produced PDF
    RemovePage {
        /// Server-side path of the PDF, as printed by merge
        #[arg(value_name = "PDF_PATH")]
        pdf_path: String,

        /// Page to remove (1-based)
        #[arg(short, long, value_name = "N")]
        page: u32,
    },

    /// Rotate one page of a produced PDF
    RotatePage {
        /// Server-side path of the PDF, as printed by merge
        #[arg(value_name = "PDF_PATH")]
        pdf_path: String,

        /// Page to rotate (1-based)
        #[arg(short, long, value_name = "N")]
        page: u32,

        /// Rotation in degrees: 90, 180, or 270
        #[arg(short, long, value_name = "DEGREES")]
        degrees: u16,
    },

    /// Add text to one page of a produced PDF
    AddText {
        /// Server-side path of the PDF, as printed by merge
        #[arg(value_name = "PDF_PATH")]
        pdf_path: String,

        /// Page to annotate (1-based)
        #[arg(short, long, value_name = "N")]
        page: u32,

        /// Text to place on the page
        #[arg(short, long, value_name = "TEXT")]
        text: String,

        /// Horizontal position in points
        #[arg(short = 'x', long, value_name = "POINTS", default_value_t = 100)]
        x: i32,

        /// Vertical position in points
        #[arg(short = 'y', long, value_name = "POINTS", default_value_t = 750)]
        y: i32,
    },

    /// Toggle the service-wide dark mode and print the new state
    Theme,
}

impl Cli {
    /// Build the validated client configuration from the global arguments.
    pub fn config(&self) -> Result<Config> {
        Config::new(&self.url, self.timeout, self.quiet, self.verbose)
    }
}
