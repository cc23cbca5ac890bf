//! Screening a business identifier during account registration.
//!
//! A registration workflow calls [`screen_registration`] before it creates a
//! billable account. The only outcome that blocks is an `invalid` result;
//! `verified`, `format_only` and `pending` identifiers are accepted and their
//! status, registered name and address are carried along for later
//! reconciliation.
use serde::Serialize;

use crate::jurisdiction::{Jurisdiction, TaxIdType};
use crate::newtypes::CountryCode;
use crate::normalize::{canonical_form, normalize};
use crate::result::VerificationStatus;
use crate::rules;
use crate::validator::Validator;

/// Why a registration was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The identifier was rejected by its format rule or by a registry.
    #[error("business identifier rejected: {message}")]
    Rejected {
        /// The validator's explanation.
        message: String,
    },
}

/// A screened identifier, ready to be stored on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessIdentity {
    /// Storage key for uniqueness checks across accounts.
    pub canonical_number: String,
    /// Country the identifier was registered for.
    pub country: CountryCode,
    /// Verification status at registration time.
    pub status: VerificationStatus,
    /// Registered name, when a registry supplied one.
    pub registered_name: Option<String>,
    /// Registered address, when a registry supplied one.
    pub registered_address: Option<String>,
    /// The payment processor's tax-ID type, when it has one for this country.
    pub payment_tax_id_type: Option<TaxIdType>,
}

/// Result of a successful screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screening {
    /// Status recorded on the account. `pending` when no identifier was
    /// supplied.
    pub vat_status: VerificationStatus,
    /// The identity to attach, absent when no identifier was supplied.
    pub identity: Option<BusinessIdentity>,
}

/// Screens an optional VAT number for a new account in `country`.
///
/// A missing or blank number is accepted with status `pending`.
///
/// # Errors
///
/// Returns [`RegistrationError::Rejected`] when the validator answers
/// `invalid`; the caller must not create a billable account.
pub async fn screen_registration(
    validator: &Validator,
    vat_number: Option<&str>,
    country: &CountryCode,
) -> Result<Screening, RegistrationError> {
    let Some(raw) = vat_number.filter(|s| !normalize(s).is_empty()) else {
        return Ok(Screening {
            vat_status: VerificationStatus::Pending,
            identity: None,
        });
    };

    let result = validator.validate(raw, country.as_str()).await;
    if !result.status().permits_registration() {
        tracing::info!(country = %country, "registration refused: {}", result.message());
        return Err(RegistrationError::Rejected {
            message: result.message().to_owned(),
        });
    }

    let canonical_number = canonical_form(raw);
    let shape = rules::rule_for(country.as_str())
        .and_then(|rule| rule.classify(&canonical_number))
        .map(|m| m.kind);
    let payment_tax_id_type =
        TaxIdType::for_identifier(Jurisdiction::route(country.as_str()), shape);

    Ok(Screening {
        vat_status: result.status(),
        identity: Some(BusinessIdentity {
            registered_name: result.registered_name().map(str::to_owned),
            registered_address: result.registered_address().map(str::to_owned),
            status: result.status(),
            canonical_number,
            country: country.clone(),
            payment_tax_id_type,
        }),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::sync::Arc;

    use super::*;
    use crate::registry::RegistryClients;
    use crate::test_stubs::StubEu;
    use crate::validator::ValidatorConfig;

    fn country(code: &str) -> CountryCode {
        CountryCode::try_from(code).expect("valid country code")
    }

    #[tokio::test]
    async fn missing_number_is_pending_without_identity() {
        let v = Validator::offline();
        for input in [None, Some(""), Some(" - ")] {
            let s = screen_registration(&v, input, &country("FR"))
                .await
                .expect("accepted");
            assert_eq!(s.vat_status, VerificationStatus::Pending);
            assert!(s.identity.is_none());
        }
    }

    #[tokio::test]
    async fn invalid_number_is_refused() {
        let err = screen_registration(&Validator::offline(), Some("12345"), &country("CA"))
            .await
            .expect_err("refused");
        assert!(matches!(err, RegistrationError::Rejected { .. }));
    }

    #[tokio::test]
    async fn verified_eu_number_carries_details() {
        let stub = Arc::new(StubEu::valid(Some("Dupont SARL"), Some("Rue X, Brussels")));
        let v = Validator::new(
            RegistryClients::none().with_eu(stub),
            ValidatorConfig::default(),
        );
        let s = screen_registration(&v, Some("be 0123.456.789"), &country("BE"))
            .await
            .expect("accepted");
        let identity = s.identity.expect("identity");
        assert_eq!(s.vat_status, VerificationStatus::Verified);
        assert_eq!(identity.canonical_number, "BE0123456789");
        assert_eq!(identity.registered_name.as_deref(), Some("Dupont SARL"));
        assert_eq!(identity.payment_tax_id_type, Some(TaxIdType::EuVat));
    }

    #[tokio::test]
    async fn pending_eu_number_is_accepted() {
        let s = screen_registration(&Validator::offline(), Some("DE123456789"), &country("DE"))
            .await
            .expect("accepted");
        assert_eq!(s.vat_status, VerificationStatus::Pending);
        assert!(s.identity.is_some());
    }

    #[tokio::test]
    async fn canadian_qst_maps_to_processor_type() {
        let s = screen_registration(
            &Validator::offline(),
            Some("1234567890 TQ 0001"),
            &country("CA"),
        )
        .await
        .expect("accepted");
        let identity = s.identity.expect("identity");
        assert_eq!(identity.status, VerificationStatus::FormatOnly);
        assert_eq!(identity.payment_tax_id_type, Some(TaxIdType::CaQst));
    }

    #[tokio::test]
    async fn unmodeled_country_has_no_processor_type() {
        let s = screen_registration(&Validator::offline(), Some("T1234567"), &country("JP"))
            .await
            .expect("accepted");
        assert_eq!(s.identity.expect("identity").payment_tax_id_type, None);
    }
}
