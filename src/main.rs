use anyhow::anyhow;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod discovery;
mod error;
mod output;
mod source;
mod template;

use cli::{Cli, Mode};
use config::STDOUT_TARGET;
use error::{Error, Result};
use source::Catalog;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pdh2zbx: {err}");
            err.exit_code()
        }
    }
}

/// Logs go to stderr; stdout is reserved for the generated document.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pdh2zbx={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let catalog = source::load(&cli.catalog)?;
    match cli.mode {
        Mode::Discovery => cmd_discovery(&catalog, cli),
        Mode::Template => cmd_template(&catalog, cli),
    }
}

fn cmd_discovery(catalog: &Catalog, cli: &Cli) -> Result<()> {
    let feed = discovery::discover(catalog, &cli.categories)?;
    let mut text = discovery::encode(&feed)?;
    text.push('\n');
    output::write_document(STDOUT_TARGET, &text)
}

fn cmd_template(catalog: &Catalog, cli: &Cli) -> Result<()> {
    let config =
        config::resolve(cli.config.as_deref(), cli.overrides()).map_err(Error::Config)?;
    if cli.categories.is_empty() {
        return Err(Error::Config(anyhow!(
            "template mode needs at least one counter category"
        )));
    }
    tracing::info!(
        categories = cli.categories.len(),
        output = %config.output,
        items_enabled = config.enable_items,
        "building template"
    );

    let export = template::build(catalog, &cli.categories, &config)?;
    let text = template::render(&export)?;
    output::write_document(&config.output, &text)
}
