#![allow(missing_docs)]

use anyhow::{ensure, Context, Result};
use clap::Parser;
use deep_merge::{
    app_config::AppConfig,
    cli::Cli,
    document::{merge_documents, read_document, render_document, Format, STDIN_PATH},
};
use std::io::Write;
use tracing::{debug, error, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();

    initialize_tracing(cli.debug, cli.trace);

    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

/// Initialize tracing with the specified debug/trace flags
fn initialize_tracing(debug: bool, trace: bool) {
    let log_level = if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().with_default_directive(log_level.into()).from_env_lossy())
        .init();
}

/// Load application configuration and log its status
fn load_and_log_config() -> Result<AppConfig> {
    let app_config = AppConfig::load().context("Failed to load app configuration")?;

    if app_config.is_some() {
        debug!("Loaded app configuration from: {}", AppConfig::config_path()?.display());
    } else {
        debug!("No app configuration file found at: {}", AppConfig::config_path()?.display());
    }

    Ok(app_config.unwrap_or_default())
}

fn run(cli: &Cli) -> Result<()> {
    let stdin_inputs = cli.files.iter().filter(|path| path.as_os_str() == STDIN_PATH).count();
    ensure!(
        stdin_inputs <= 1,
        "Standard input (`-`) can only be read once, but was given {stdin_inputs} times"
    );

    let app_config = load_and_log_config()?;

    let output_format = cli.output_format.or_else(|| app_config.output_format()).unwrap_or(Format::Json);
    let compact = cli.compact || app_config.compact_output();

    let documents = cli
        .files
        .iter()
        .map(|path| {
            let format = cli
                .format
                .or_else(|| Format::from_path(path))
                .or_else(|| app_config.input_format());
            read_document(path, format)
                .with_context(|| format!("Failed to load document {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Merging {} document(s) into {:?} output", documents.len(), output_format);
    let merged = merge_documents(documents);

    let rendered = render_document(&merged, output_format, compact)
        .with_context(|| format!("Failed to render merged document as {output_format:?}"))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes()).context("Failed to write merged document")?;
    stdout.flush().context("Failed to flush stdout")?;

    Ok(())
}
