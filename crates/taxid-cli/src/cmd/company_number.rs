//! Implementation of `taxid company-number <NUMBER>`.
//!
//! Exit codes: 0 = verified, format_only or pending; 1 = invalid.
use taxid_core::{Validator, normalize_company_number};

use crate::error::CliError;
use crate::format::{OutputConfig, Subject, write_result};

/// Runs the `company-number` command.
///
/// # Errors
///
/// Returns [`CliError::IdentifierRejected`] when the number is malformed or
/// unknown to Companies House.
pub async fn run(
    validator: &Validator,
    number: &str,
    output: &OutputConfig,
) -> Result<(), CliError> {
    let result = validator.validate_uk_company_number(number).await;

    let normalized = normalize_company_number(number);
    let subject = Subject {
        identifier: &normalized,
        country: None,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, output, subject, &result).map_err(CliError::output)?;

    if result.is_invalid() {
        return Err(CliError::IdentifierRejected {
            message: result.message().to_owned(),
        });
    }
    Ok(())
}
