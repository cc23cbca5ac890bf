/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `taxid` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: the command could not run (bad country code, runtime
///   or stdout failure). Clap usage errors also exit 2.
/// - Exit code **1**: the command ran and the identifier was rejected.
///
/// `pending` and `format_only` outcomes are not errors and exit 0.
use std::fmt;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `taxid` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: the command could not run ---
    /// A `--country` value is not two ASCII letters.
    InvalidCountry {
        /// The value as given.
        input: String,
    },

    /// The async runtime could not be started.
    Runtime {
        /// The underlying I/O error message.
        detail: String,
    },

    /// Writing the result to stdout failed.
    Output {
        /// The underlying error message.
        detail: String,
    },

    // --- Exit code 1: the identifier was rejected ---
    /// The validator answered `invalid`.
    ///
    /// The result has already been printed; this variant carries the
    /// validator's message for stderr.
    IdentifierRejected {
        /// The validator's explanation.
        message: String,
    },

    /// Registration screening refused the identifier.
    RegistrationRefused {
        /// The screening error, already formatted.
        reason: String,
    },

    /// `rules` was asked for a country that has no format rule.
    NoRule {
        /// The uppercase country code.
        country: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidCountry { .. } | Self::Runtime { .. } | Self::Output { .. } => 2,

            Self::IdentifierRejected { .. }
            | Self::RegistrationRefused { .. }
            | Self::NoRule { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidCountry { input } => {
                format!("error: invalid country code {input:?}: expected two letters (e.g. FR)")
            }
            Self::Runtime { detail } => {
                format!("error: could not start async runtime: {detail}")
            }
            Self::Output { detail } => {
                format!("error: failed to write output: {detail}")
            }
            Self::IdentifierRejected { message } => {
                format!("error: identifier rejected: {message}")
            }
            Self::RegistrationRefused { reason } => format!("error: {reason}"),
            Self::NoRule { country } => {
                format!("error: no format rule for {country}; any identifier is accepted")
            }
        }
    }

    /// Wraps a stdout write failure.
    pub fn output(err: impl fmt::Display) -> Self {
        Self::Output {
            detail: err.to_string(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
