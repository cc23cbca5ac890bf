use async_trait::async_trait;

use super::{Candidate, VerificationStrategy};
use crate::result::ValidationResult;

/// Accepts identifiers from countries no strategy models.
///
/// An unknown country never blocks a registration.
#[derive(Debug, Default)]
pub struct FallbackStrategy;

#[async_trait]
impl VerificationStrategy for FallbackStrategy {
    async fn check(&self, candidate: &Candidate<'_>) -> ValidationResult {
        tracing::debug!(country = candidate.country, "no validator for country");
        if candidate.rule.is_some() {
            ValidationResult::format_only("Identifier format valid (no registry for this country)")
        } else {
            ValidationResult::format_only("No validator for this country")
        }
    }
}
