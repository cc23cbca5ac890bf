use std::time::Duration;

use async_trait::async_trait;

use super::{Candidate, VerificationStrategy};
use crate::normalize::strip_country_prefix;
use crate::registry::{UkLookup, UkVatRegistry, bounded};
use crate::result::ValidationResult;

const UNAVAILABLE: &str = "UK VAT format valid (HMRC API temporarily unavailable)";

/// Verifies UK VAT registration numbers against HMRC.
pub struct UkStrategy<'a> {
    registry: Option<&'a dyn UkVatRegistry>,
    timeout: Duration,
}

impl<'a> UkStrategy<'a> {
    pub fn new(registry: Option<&'a dyn UkVatRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }
}

fn is_vrn(s: &str) -> bool {
    s.len() == 9 && s.bytes().all(|b| b.is_ascii_digit())
}

#[async_trait]
impl VerificationStrategy for UkStrategy<'_> {
    async fn check(&self, candidate: &Candidate<'_>) -> ValidationResult {
        let vrn = strip_country_prefix(candidate.identifier, &["GB"]);
        if !is_vrn(vrn) {
            return ValidationResult::format_rejected("Invalid UK VAT format (must be 9 digits)");
        }

        let Some(registry) = self.registry else {
            return ValidationResult::format_only(
                "UK VAT format valid (HMRC verification not configured)",
            );
        };

        match bounded(self.timeout, registry.lookup(vrn)).await {
            Ok(UkLookup::Registered { name, address }) => {
                ValidationResult::verified(name, address, "UK VAT verified via HMRC")
            }
            Ok(UkLookup::NotRegistered) => {
                ValidationResult::rejected_by_registry("UK VAT number not found in HMRC registry")
            }
            Ok(UkLookup::Unexpected { status }) => {
                tracing::warn!(status, "HMRC returned an unexpected status");
                ValidationResult::format_only(UNAVAILABLE)
            }
            Err(err) => {
                tracing::warn!(error = %err, "HMRC lookup failed");
                ValidationResult::format_only(UNAVAILABLE)
            }
        }
    }
}
