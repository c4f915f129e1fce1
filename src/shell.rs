//! Interactive session shell.
//!
//! A line-driven loop over a [`Session`], mirroring the controls of the
//! service's web page: select files, move them up or down, remove them,
//! clear the list, merge. Indices shown and accepted are 1-based.
//!
//! The selection refers to positions in the list, so it is dropped after
//! every mutation; commands that need one tell the user to re-select.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::output::OutputFormatter;
use crate::selection::{Controls, Selection};
use crate::session::Session;
use crate::utils::collect_paths_for_patterns;

/// Run the interactive shell until `quit` or end of input.
pub async fn run(session: &mut Session, formatter: &OutputFormatter) -> Result<()> {
    formatter.info("Interactive session. Type 'help' for commands, 'quit' to leave.");

    // Selection is only valid until the next list mutation.
    let mut selection = Selection::default();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("pdfqueue> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "help" | "?" => print_help(),
            "list" | "ls" => {
                formatter.file_list(session.files());
                formatter.stats(&session.stats());
            }
            "add" | "upload" => match upload(session, &args).await {
                Ok(count) => {
                    selection = Selection::default();
                    formatter.success(&format!("Uploaded {count} file(s)"));
                    formatter.file_list(session.files());
                }
                Err(err) => formatter.error(&err.to_string()),
            },
            "select" | "sel" => match parse_selection(&args, session.len()) {
                Ok(parsed) => {
                    selection = parsed;
                    let controls = Controls::for_list(&selection, session.len());
                    formatter.info(&format!(
                        "Selected {} file(s). Can move up: {}, down: {}",
                        selection.len(),
                        controls.move_up,
                        controls.move_down
                    ));
                }
                Err(err) => formatter.error(&err.to_string()),
            },
            "up" => match session.move_up(&selection).await {
                Ok(true) => {
                    selection = Selection::default();
                    formatter.file_list(session.files());
                }
                Ok(false) => formatter.info("Nothing to move"),
                Err(err) => formatter.error(&err.to_string()),
            },
            "down" => match session.move_down(&selection).await {
                Ok(true) => {
                    selection = Selection::default();
                    formatter.file_list(session.files());
                }
                Ok(false) => formatter.info("Nothing to move"),
                Err(err) => formatter.error(&err.to_string()),
            },
            "rm" | "remove" => match session.remove_selected(&selection).await {
                Ok(report) => {
                    selection = Selection::default();
                    formatter.success(&format!("Removed {} file(s)", report.removed.len()));
                    for (path, reason) in &report.failed_deletes {
                        formatter.warning(&format!(
                            "Server-side delete failed for {path}: {reason}"
                        ));
                    }
                    formatter.file_list(session.files());
                }
                Err(err) => formatter.error(&err.to_string()),
            },
            "clear" => match session.clear_all().await {
                Ok(()) => {
                    selection = Selection::default();
                    formatter.success("Cleared all files");
                }
                Err(err) => formatter.error(&err.to_string()),
            },
            "merge" => match session.merge().await {
                Ok(output) => {
                    formatter.success(&format!("Merged into {}", output.output_path));
                    if let Some(pages) = output.total_pages {
                        formatter.info(&format!("Total pages: {pages}"));
                    }
                }
                Err(err) => formatter.error(&err.to_string()),
            },
            "download" | "dl" => {
                let Some(filename) = args.first() else {
                    formatter.error("Usage: download <name> [local path]");
                    continue;
                };
                let dest = args
                    .get(1)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(filename));
                match session.client().download(filename, &dest).await {
                    Ok(bytes) => formatter.success(&format!(
                        "Wrote {} ({bytes} bytes)",
                        dest.display()
                    )),
                    Err(err) => formatter.error(&err.to_string()),
                }
            }
            "theme" => match session.client().toggle_theme().await {
                Ok(dark) => formatter.info(if dark {
                    "Dark mode enabled"
                } else {
                    "Dark mode disabled"
                }),
                Err(err) => formatter.error(&err.to_string()),
            },
            "quit" | "exit" | "q" => break,
            other => formatter.error(&format!("Unknown command: {other}. Try 'help'")),
        }
    }

    Ok(())
}

async fn upload(session: &mut Session, args: &[&str]) -> Result<usize> {
    if args.is_empty() {
        return Err(Error::invalid_config("Usage: add <file or pattern>..."));
    }
    let paths = collect_paths_for_patterns(args.iter().copied())?;
    let mut count = 0;
    for path in &paths {
        count += session.upload(path).await?;
    }
    Ok(count)
}

/// Parse 1-based indices into a selection over a list of `len` files.
fn parse_selection(args: &[&str], len: usize) -> Result<Selection> {
    if args.is_empty() {
        return Err(Error::invalid_config("Usage: select <index>..."));
    }
    let mut indices = Vec::with_capacity(args.len());
    for arg in args {
        let shown: usize = arg
            .parse()
            .map_err(|_| Error::invalid_config(format!("not an index: {arg}")))?;
        if shown == 0 || shown > len {
            return Err(Error::OutOfRange {
                index: shown,
                len,
            });
        }
        indices.push(shown - 1);
    }
    Ok(Selection::new(indices))
}

fn print_help() {
    println!("Commands:");
    println!("  list              Show the file list and totals");
    println!("  add <file>...     Upload PDF files (globs allowed)");
    println!("  select <n>...     Select files by 1-based index");
    println!("  up | down         Move the selection by one position");
    println!("  rm                Remove the selected files");
    println!("  clear             Remove every file");
    println!("  merge             Merge the list into one document");
    println!("  download <name>   Download a produced PDF");
    println!("  theme             Toggle the service's dark mode");
    println!("  quit              Leave the shell");
}
