mod cli;
mod cmd;
mod error;
mod format;
mod logging;

use std::io::IsTerminal as _;
use std::time::Duration;

use clap::Parser;
use taxid_core::{Validator, ValidatorConfig};
use taxid_registry::{COMPANIES_HOUSE_KEY_VAR, HMRC_TOKEN_VAR, RegistryConfig, bootstrap};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::format::OutputConfig;

fn main() {
    let cli = Cli::parse();
    let log_ansi = !cli.no_color && std::io::stderr().is_terminal();
    logging::init(cli.quiet, cli.verbose, log_ansi);

    if let Err(err) = run(&cli) {
        eprintln!("{}", err.message());
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let output = OutputConfig::from_flags(cli.format, cli.no_color);

    match &cli.command {
        Command::Rules { country } => cmd::rules::run(country.as_deref(), &output),
        Command::Validate {
            identifier,
            country,
        } => {
            let validator = build_validator(cli);
            let identifier = identifier.as_deref().unwrap_or_default();
            block_on(cmd::validate::run(&validator, identifier, country, &output))?
        }
        Command::CompanyNumber { number } => {
            let validator = build_validator(cli);
            block_on(cmd::company_number::run(&validator, number, &output))?
        }
        Command::Screen {
            country,
            vat_number,
        } => {
            let validator = build_validator(cli);
            block_on(cmd::screen::run(
                &validator,
                country,
                vat_number.as_deref(),
                &output,
            ))?
        }
    }
}

/// Wires the registry clients the flags and environment allow.
fn build_validator(cli: &Cli) -> Validator {
    let call_timeout = Duration::from_secs(cli.timeout_secs);
    let registry = RegistryConfig {
        offline: cli.offline,
        ..RegistryConfig::from_lookup(|name| match name {
            HMRC_TOKEN_VAR => cli.hmrc_token.clone(),
            COMPANIES_HOUSE_KEY_VAR => cli.companies_house_key.clone(),
            _ => None,
        })
        .with_timeout(call_timeout)
    };
    tracing::debug!(config = ?registry, "registry configuration");
    Validator::new(bootstrap(&registry), ValidatorConfig { call_timeout })
}

/// Drives `fut` to completion on a single-threaded runtime.
fn block_on<F: std::future::Future>(fut: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime {
            detail: e.to_string(),
        })?;
    Ok(runtime.block_on(fut))
}
