//! Implementation of `taxid screen --country <CC> [--vat-number <VAT>]`.
//!
//! Runs the registration screening a signup workflow performs: a missing
//! number is accepted as `pending`, an `invalid` one is refused, anything
//! else is accepted with its canonical form and payment tax-ID type.
//!
//! Exit codes: 0 = accepted, 1 = refused, 2 = malformed country code.
use taxid_core::{CountryCode, Validator, screen_registration};

use crate::error::CliError;
use crate::format::{OutputConfig, write_screening};

/// Runs the `screen` command.
///
/// # Errors
///
/// Returns [`CliError::InvalidCountry`] for a malformed `--country`, or
/// [`CliError::RegistrationRefused`] when the identifier is rejected.
pub async fn run(
    validator: &Validator,
    country: &str,
    vat_number: Option<&str>,
    output: &OutputConfig,
) -> Result<(), CliError> {
    let country = CountryCode::try_from(country).map_err(|_| CliError::InvalidCountry {
        input: country.to_owned(),
    })?;

    let screening = screen_registration(validator, vat_number, &country)
        .await
        .map_err(|e| CliError::RegistrationRefused {
            reason: e.to_string(),
        })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_screening(&mut out, output, &screening).map_err(CliError::output)
}
