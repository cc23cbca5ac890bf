//! Implementation of `taxid rules [CC]`.
//!
//! Prints the format rule table, or the rule for one country.
//!
//! Exit codes: 0 = printed, 1 = the country has no rule.
use taxid_core::{all_rules, rule_for};

use crate::error::CliError;
use crate::format::{OutputConfig, write_rules};

/// Runs the `rules` command.
///
/// # Errors
///
/// Returns [`CliError::NoRule`] when `country` is given and unmodeled.
pub fn run(country: Option<&str>, output: &OutputConfig) -> Result<(), CliError> {
    let rules: Vec<_> = match country {
        Some(cc) => {
            let cc = cc.trim().to_ascii_uppercase();
            match rule_for(&cc) {
                Some(rule) => vec![rule],
                None => return Err(CliError::NoRule { country: cc }),
            }
        }
        None => all_rules().iter().collect(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_rules(&mut out, output, &rules).map_err(CliError::output)
}
