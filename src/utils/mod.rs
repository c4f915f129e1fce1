//! Utilities for expanding input patterns into file paths.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// A pattern with no metacharacters passes through as a plain path even if
/// the file does not exist; the upload validation reports missing files
/// with better context than a silent empty expansion would.
///
/// Returns a flattened list of resolved paths, in pattern order.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern.as_ref())?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|err| Error::invalid_config(format!("bad input pattern '{pattern}': {err}")))?;

    let mut resolved_paths = Vec::new();
    for entry in paths {
        let path = entry
            .map_err(|err| Error::invalid_config(format!("cannot read matched path: {err}")))?;
        resolved_paths.push(path);
    }

    if resolved_paths.is_empty() && !pattern.contains(['*', '?', '[']) {
        resolved_paths.push(PathBuf::from(pattern));
    }

    Ok(resolved_paths)
}
