use async_trait::async_trait;

use super::{Candidate, VerificationStrategy};
use crate::result::ValidationResult;

/// The United States has no VAT; an EIN is optional and only format-checked.
#[derive(Debug, Default)]
pub struct UsaStrategy;

#[async_trait]
impl VerificationStrategy for UsaStrategy {
    async fn check(&self, candidate: &Candidate<'_>) -> ValidationResult {
        if candidate.identifier.is_empty() {
            return ValidationResult::verified(None, None, "USA has no VAT");
        }
        let well_formed = candidate
            .rule
            .is_none_or(|rule| rule.matches(candidate.identifier));
        if well_formed {
            ValidationResult::format_only("US EIN format valid")
        } else {
            ValidationResult::format_rejected("Invalid US EIN format (must be 9 digits)")
        }
    }
}
