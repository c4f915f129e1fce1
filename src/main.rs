use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pdfqueue::cli::{Cli, Command};
use pdfqueue::client::ServiceClient;
use pdfqueue::output::OutputFormatter;
use pdfqueue::protocol::Rotation;
use pdfqueue::session::Session;
use pdfqueue::utils::collect_paths_for_patterns;
use pdfqueue::{Error, Result};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("✗ {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    let formatter = OutputFormatter::from_config(&config);
    let client = ServiceClient::new(config)?;
    let mut session = Session::new(client);

    match cli.command {
        Command::Upload { inputs } => {
            upload_inputs(&mut session, &formatter, &inputs).await?;
            formatter.file_list(session.files());
            formatter.stats(&session.stats());
        }

        Command::Merge { inputs, output } => {
            upload_inputs(&mut session, &formatter, &inputs).await?;
            formatter.info(&format!("Merging {} file(s)...", session.len()));

            let merged = session.merge().await?;
            formatter.success(&format!("Merged into {}", merged.output_path));
            if let Some(pages) = merged.total_pages {
                formatter.info(&format!("Total pages: {pages}"));
            }

            if let Some(dest) = output {
                let name = remote_basename(&merged.output_path);
                let bytes = session.client().download(name, &dest).await?;
                formatter.success(&format!("Wrote {} ({bytes} bytes)", dest.display()));
            }
        }

        Command::Shell => pdfqueue::shell::run(&mut session, &formatter).await?,

        Command::Download { filename, output } => {
            let dest = output.unwrap_or_else(|| PathBuf::from(&filename));
            let bytes = session.client().download(&filename, &dest).await?;
            formatter.success(&format!("Wrote {} ({bytes} bytes)", dest.display()));
        }

        Command::RemovePage { pdf_path, page } => {
            let edited = session.client().remove_page(&pdf_path, page).await?;
            formatter.success(&format!("Page {page} removed: {}", edited.output_path));
            if let Some(pages) = edited.total_pages {
                formatter.info(&format!("Pages remaining: {pages}"));
            }
        }

        Command::RotatePage {
            pdf_path,
            page,
            degrees,
        } => {
            let rotation = Rotation::from_degrees(degrees)?;
            let edited = session.client().rotate_page(&pdf_path, page, rotation).await?;
            formatter.success(&format!(
                "Page {page} rotated {degrees} degrees: {}",
                edited.output_path
            ));
        }

        Command::AddText {
            pdf_path,
            page,
            text,
            x,
            y,
        } => {
            let edited = session
                .client()
                .add_text(&pdf_path, page, &text, x, y)
                .await?;
            formatter.success(&format!("Text added to page {page}: {}", edited.output_path));
        }

        Command::Theme => {
            let dark = session.client().toggle_theme().await?;
            formatter.info(if dark {
                "Dark mode enabled"
            } else {
                "Dark mode disabled"
            });
        }
    }

    Ok(())
}

/// Upload every file matched by the input patterns, in pattern order.
async fn upload_inputs(
    session: &mut Session,
    formatter: &OutputFormatter,
    inputs: &[String],
) -> Result<()> {
    let paths = collect_paths_for_patterns(inputs)?;
    if paths.is_empty() {
        return Err(Error::invalid_config("no input files matched"));
    }
    for path in &paths {
        let count = session.upload(path).await?;
        formatter.debug(&format!("{} -> {count} descriptor(s)", path.display()));
    }
    formatter.success(&format!("Uploaded {} file(s)", session.len()));
    Ok(())
}

/// The file name part of a server-side output path, for `/download/:name`.
fn remote_basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
