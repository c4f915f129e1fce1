//! Message formatting and display.
//!
//! Formatted terminal output for the CLI, with quiet and verbose modes and
//! the file-list table the interactive shell renders after every mutation.

use std::io::{self, IsTerminal};

use crate::config::Config;
use crate::store::{FileDescriptor, StoreStats};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

/// Output formatter with configurable verbosity.
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Detect if colored output should be used.
    ///
    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message. Always displayed, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message. Always displayed.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a debug/verbose message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    /// Print the current file list as a numbered table.
    ///
    /// Indices are 1-based, matching what move/remove commands accept.
    /// Suppressed in quiet mode.
    pub fn file_list(&self, files: &[FileDescriptor]) {
        if self.quiet {
            return;
        }
        if files.is_empty() {
            println!("  (no files uploaded)");
            return;
        }
        for (index, file) in files.iter().enumerate() {
            let pages = match file.pages {
                Some(pages) => format!("{pages} page(s)"),
                None => "? pages".to_string(),
            };
            println!("  {}. {} ({})", index + 1, file.name, pages);
            if self.verbose {
                println!("     path: {}", file.path);
            }
        }
    }

    /// Print the file/page totals line. Suppressed in quiet mode.
    pub fn stats(&self, stats: &StoreStats) {
        if self.quiet {
            return;
        }
        let pages = if stats.unknown_pages > 0 {
            format!("{}+?", stats.known_pages)
        } else {
            stats.known_pages.to_string()
        };
        println!(
            "Total files: {} | Total pages: {}",
            stats.total_files, pages
        );
    }

    /// Print a message with level-appropriate formatting.
    fn print_message(&self, level: MessageLevel, message: &str) {
        let (prefix, color_code) = match level {
            MessageLevel::Info => ("", ""),
            MessageLevel::Success => ("✓ ", "\x1b[32m"), // Green
            MessageLevel::Warning => ("⚠ ", "\x1b[33m"), // Yellow
            MessageLevel::Error => ("✗ ", "\x1b[31m"),   // Red
            MessageLevel::Debug => ("→ ", "\x1b[36m"),   // Cyan
        };

        let reset = "\x1b[0m";

        if self.colored && !color_code.is_empty() {
            println!("{color_code}{prefix}{message}{reset}");
        } else {
            println!("{prefix}{message}");
        }
    }
}
