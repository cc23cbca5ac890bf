use std::time::Duration;

use async_trait::async_trait;

use super::{Candidate, VerificationStrategy};
use crate::jurisdiction::EuMember;
use crate::normalize::strip_country_prefix;
use crate::registry::{EuVatRegistry, RegistryError, bounded};
use crate::result::ValidationResult;

/// Verifies EU VAT numbers against VIES.
pub struct EuStrategy<'a> {
    member: EuMember,
    registry: Option<&'a dyn EuVatRegistry>,
    timeout: Duration,
}

impl<'a> EuStrategy<'a> {
    pub fn new(
        member: EuMember,
        registry: Option<&'a dyn EuVatRegistry>,
        timeout: Duration,
    ) -> Self {
        Self {
            member,
            registry,
            timeout,
        }
    }

    /// The number VIES expects: no country prefix, no separators.
    fn national_part<'s>(&self, candidate: &Candidate<'s>) -> &'s str {
        candidate
            .rule
            .and_then(|rule| rule.classify(candidate.identifier))
            .map_or_else(
                || strip_country_prefix(candidate.identifier, self.member.prefixes()),
                |m| m.national,
            )
    }
}

#[async_trait]
impl VerificationStrategy for EuStrategy<'_> {
    async fn check(&self, candidate: &Candidate<'_>) -> ValidationResult {
        let Some(registry) = self.registry else {
            tracing::warn!(country = candidate.country, "VIES client not available");
            return ValidationResult::pending("VIES unavailable");
        };

        let country = self.member.vies_code();
        let national = self.national_part(candidate);
        tracing::debug!(country, national, "querying VIES");

        match bounded(self.timeout, registry.check_vat(country, national)).await {
            Ok(reply) if reply.valid => {
                ValidationResult::verified(reply.name, reply.address, "VAT verified via VIES")
            }
            Ok(_) => ValidationResult::rejected_by_registry("VAT number not found in VIES registry"),
            Err(err @ RegistryError::Fault { .. }) => {
                tracing::warn!(country, error = %err, "VIES returned a fault");
                ValidationResult::pending("VIES verification failed, will retry later")
            }
            Err(
                err @ (RegistryError::Transport(_)
                | RegistryError::Timeout(_)
                | RegistryError::Protocol(_)
                | RegistryError::Status(_)),
            ) => {
                tracing::warn!(country, error = %err, "VIES unreachable");
                ValidationResult::pending("VIES temporarily unavailable")
            }
        }
    }
}
