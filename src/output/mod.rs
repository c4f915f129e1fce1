//! User-facing output.

pub mod formatter;

pub use formatter::OutputFormatter;
