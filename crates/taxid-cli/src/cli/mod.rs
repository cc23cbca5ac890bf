//! Clap CLI definition: root struct, subcommands, and shared argument types.
use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI commands.
///
/// `Human` emits aligned, optionally colored text to stdout. `Json` emits a
/// single JSON object per command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// All top-level subcommands exposed by the `taxid` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Validate a business identifier (VAT number, UID, GST/QST, EIN) for a country.
    Validate {
        /// The identifier as written, e.g. "BE 0123.456.789". May be omitted
        /// for countries where it is optional (US).
        #[arg(value_name = "IDENTIFIER")]
        identifier: Option<String>,
        /// ISO 3166-1 alpha-2 country code (case-insensitive).
        #[arg(long, short = 'c', value_name = "CC")]
        country: String,
    },

    /// Validate a UK company registration number against Companies House.
    #[command(name = "company-number")]
    CompanyNumber {
        /// Eight-character company number, e.g. 12345678 or SC123456.
        #[arg(value_name = "NUMBER")]
        number: String,
    },

    /// Screen an optional VAT number the way account registration does.
    Screen {
        /// ISO 3166-1 alpha-2 country code of the business.
        #[arg(long, short = 'c', value_name = "CC")]
        country: String,
        /// VAT or tax number supplied at registration, if any.
        #[arg(long, value_name = "VAT")]
        vat_number: Option<String>,
    },

    /// Print the per-country format rules.
    Rules {
        /// Only show the rule for this country.
        #[arg(value_name = "CC")]
        country: Option<String>,
    },
}

/// Root CLI struct for the `taxid` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "taxid",
    version,
    about = "Business tax-identifier validator",
    long_about = "Validates VAT numbers, Swiss UIDs, Canadian GST/QST numbers, US EINs\n\
                  and UK company numbers, checking them against VIES, HMRC and\n\
                  Companies House where credentials allow."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log registry traffic and routing decisions to stderr
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Bearer token for the HMRC VAT lookup. Without it UK VAT numbers are
    /// format-checked only.
    #[arg(long, global = true, env = "HMRC_API_TOKEN", hide_env_values = true)]
    pub hmrc_token: Option<String>,

    /// API key for Companies House. Without it company numbers are
    /// format-checked only.
    #[arg(
        long,
        global = true,
        env = "COMPANIES_HOUSE_API_KEY",
        hide_env_values = true
    )]
    pub companies_house_key: Option<String>,

    /// Upper bound in seconds on each registry call.
    #[arg(long, global = true, default_value = "10", value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout_secs: u64,

    /// Do not contact any registry; format checks only.
    #[arg(long, global = true)]
    pub offline: bool,
}
