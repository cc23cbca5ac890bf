//! Implementation of `taxid validate [IDENTIFIER] --country <CC>`.
//!
//! Normalizes the identifier, checks it against the country's format rule,
//! and consults the country's registry when a client is configured. The
//! result is printed to stdout in the requested format.
//!
//! Exit codes: 0 = verified, format_only or pending; 1 = invalid.
use taxid_core::{ValidationRequest, Validator, canonical_form};

use crate::error::CliError;
use crate::format::{OutputConfig, Subject, write_result};

/// Runs the `validate` command.
///
/// # Errors
///
/// Returns [`CliError::IdentifierRejected`] when the result is `invalid`,
/// after the result has been printed.
pub async fn run(
    validator: &Validator,
    identifier: &str,
    country: &str,
    output: &OutputConfig,
) -> Result<(), CliError> {
    let request = ValidationRequest::new(identifier, country);
    let result = validator.validate_request(&request).await;

    let canonical = canonical_form(request.raw_identifier());
    let subject = Subject {
        identifier: &canonical,
        country: Some(request.country_code()),
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
