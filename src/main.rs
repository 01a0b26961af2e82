//! lastver - find the latest released version of a project
//!
//! Prints the latest version (or the latest three with `--multi-version`)
//! found in:
//! - the tags of a git repository (`--last-git-tag`)
//! - the download links of a website (`--last-website-version`)

use clap::{CommandFactory, Parser};
use colored::Colorize;
use lastver::cli::CliArgs;
use lastver::output::{create_formatter, OutputFormat};
use lastver::source::{create_source, HttpClient, DEFAULT_USER_AGENT};
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = lastver::logging::init(args.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    // Validate everything before touching the network
    let Some(query) = args.query()? else {
        eprintln!("{} No action given", "Error:".red().bold());
        CliArgs::command().write_help(&mut io::stderr())?;
        return Ok(ExitCode::FAILURE);
    };

    let client = HttpClient::with_config(Duration::from_secs(args.timeout), DEFAULT_USER_AGENT)?;
    let source = create_source(query, client)?;
    let result = source.latest_versions().await?;

    let format = OutputFormat::from_cli(args.json);

    // Nothing found: non-zero exit, and no output unless JSON was requested
    if !result.is_found() && format == OutputFormat::Text {
        return Ok(ExitCode::FAILURE);
    }

    let formatter = create_formatter(format);
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if result.is_found() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
