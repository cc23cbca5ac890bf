/// UK company registration numbers (Companies House).
///
/// A company number is eight characters, digits or uppercase letters
/// (`"12345678"`, `"SC123456"`, `"NI012345"`). Input is trimmed and
/// uppercased before the check; internal separators are not tolerated.
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::registry::{CompanyRegistry, UkLookup, bounded};
use crate::result::ValidationResult;

static COMPANY_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{8}$").unwrap_or_else(|_| {
        Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
});

const UNAVAILABLE: &str =
    "UK Company Number format valid (Companies House API temporarily unavailable)";

/// Trims and uppercases a company number.
pub fn normalize_company_number(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Returns `true` if `number` (already normalized) has the Companies House
/// shape.
pub fn is_company_number(number: &str) -> bool {
    COMPANY_NUMBER.is_match(number)
}

/// Checks a company number and, when a registry handle is present, looks it
/// up.
pub(crate) async fn verify(
    registry: Option<&dyn CompanyRegistry>,
    timeout: Duration,
    raw: &str,
) -> ValidationResult {
    let number = normalize_company_number(raw);
    if !is_company_number(&number) {
        return ValidationResult::format_rejected(
            "Invalid UK Company Number format (must be 8 alphanumeric characters)",
        );
    }

    let Some(registry) = registry else {
        return ValidationResult::format_only(
            "UK Company Number format valid (Companies House verification not configured)",
        );
    };

    match bounded(timeout, registry.company(&number)).await {
        Ok(UkLookup::Registered { name, address }) => ValidationResult::verified(
            name,
            address,
            "UK Company Number verified via Companies House",
        ),
        Ok(UkLookup::NotRegistered) => ValidationResult::rejected_by_registry(
            "UK Company Number not found in Companies House registry",
        ),
        Ok(UkLookup::Unexpected { status }) => {
            tracing::warn!(status, "Companies House returned an unexpected status");
            ValidationResult::format_only(UNAVAILABLE)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Companies House lookup failed");
            ValidationResult::format_only(UNAVAILABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::VerificationStatus;
    use crate::test_stubs::{Behaviour, StubUk};

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn accepts_digits_and_scottish_prefix() {
        assert!(is_company_number("12345678"));
        assert!(is_company_number("SC123456"));
        assert!(is_company_number(&normalize_company_number(" ni012345 ")));
    }

    #[test]
    fn rejects_wrong_length_and_separators() {
        assert!(!is_company_number("1234567"));
        assert!(!is_company_number("123456789"));
        assert!(!is_company_number("1234-678"));
        assert!(!is_company_number(""));
    }

    #[tokio::test]
    async fn malformed_number_makes_no_call() {
        let stub = StubUk::registered("Acme Ltd", "1 Road, AB1 2CD");
        let r = verify(Some(&stub), TIMEOUT, "12 34").await;
        assert_eq!(r.status(), VerificationStatus::Invalid);
        assert!(!r.is_format_valid());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn registered_company_is_verified() {
        let stub = StubUk::registered("Acme Ltd", "1 Road, AB1 2CD");
        let r = verify(Some(&stub), TIMEOUT, "sc123456").await;
        assert_eq!(r.status(), VerificationStatus::Verified);
        assert_eq!(r.registered_name(), Some("Acme Ltd"));
        assert_eq!(r.registered_address(), Some("1 Road, AB1 2CD"));
        assert_eq!(stub.last_call().as_deref(), Some("SC123456"));
    }

    #[tokio::test]
    async fn unknown_company_is_rejected_by_registry() {
        let stub = StubUk::new(UkLookup::NotRegistered);
        let r = verify(Some(&stub), TIMEOUT, "12345678").await;
        assert_eq!(r.status(), VerificationStatus::Invalid);
        assert!(r.is_verified());
    }

    #[tokio::test]
    async fn transport_failure_is_format_only() {
        let stub = StubUk::with(Behaviour::Transport);
        let r = verify(Some(&stub), TIMEOUT, "12345678").await;
        assert_eq!(r.status(), VerificationStatus::FormatOnly);
        assert_eq!(r.message(), UNAVAILABLE);
    }

    #[tokio::test]
    async fn without_registry_is_format_only() {
        let r = verify(None, TIMEOUT, "12345678").await;
        assert_eq!(r.status(), VerificationStatus::FormatOnly);
    }
}
