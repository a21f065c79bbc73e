//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstats::ChatstatsError;
use chatstats::cli::{Args, Command, resolve_format};
use chatstats::core::output::to_json;
use chatstats::core::{extract_by_kind, timeline};
use chatstats::format::{OutputFormat, to_format_string, write_to_format};
use chatstats::upload::{UploadedFile, load_upload};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        tracing::debug!(error = %e, "command failed");
        eprintln!("Error: {}", e.user_message());
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), ChatstatsError> {
    let args = <Args as ClapParser>::parse();
    let config = args.build_config()?;
    let file = UploadedFile::from_path(args.command.input())?;

    match &args.command {
        Command::Stats { json, .. } => {
            let (_, stats) = load_upload(&file, &config)?;
            if *json {
                println!("{}", to_json(&stats)?);
            } else {
                for line in stats.summary_lines() {
                    println!("{}", line);
                }
            }
        }
        Command::Timeline { format, output, .. } => {
            let (export, _) = load_upload(&file, &config)?;
            let buckets = timeline(&export)?;
            let format = resolve_format(*format, output.as_deref())?;
            emit(&buckets, format, output.as_deref())?;
        }
        Command::Content {
            kind,
            format,
            output,
            ..
        } => {
            let (export, _) = load_upload(&file, &config)?;
            let records = extract_by_kind(&export, *kind);
            let format = resolve_format(*format, output.as_deref())?;
            emit(&records, format, output.as_deref())?;
        }
    }

    Ok(())
}

fn emit<T>(
    rows: &[T],
    format: OutputFormat,
    output: Option<&std::path::Path>,
) -> Result<(), ChatstatsError>
where
    T: serde::Serialize + chatstats::core::output::CsvRecord,
{
    match output {
        Some(path) => {
            write_to_format(rows, &path.to_string_lossy(), format)?;
            eprintln!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            let text = to_format_string(rows, format)?;
            print!("{}", text);
            if format == OutputFormat::Json {
                println!();
            }
        }
    }
    Ok(())
}
