use async_trait::async_trait;

use super::{Candidate, VerificationStrategy};
use crate::result::ValidationResult;

/// Format check for Swiss enterprise identification numbers.
///
/// The federal UID register needs credentials this service does not hold,
/// so a well-formed UID is `format_only`.
#[derive(Debug, Default)]
pub struct SwissStrategy;

#[async_trait]
impl VerificationStrategy for SwissStrategy {
    async fn check(&self, candidate: &Candidate<'_>) -> ValidationResult {
        let Some(rule) = candidate.rule else {
            tracing::warn!("no format rule for Swiss UID");
            return ValidationResult::pending("UID verification unavailable");
        };
        if rule.matches(candidate.identifier) {
            ValidationResult::format_only(
                "Swiss UID format valid (full verification requires API key)",
            )
        } else {
            ValidationResult::format_rejected("Invalid Swiss UID format")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::result::VerificationStatus;
    use crate::rules::rule_for;

    async fn run(raw: &str) -> ValidationResult {
        let identifier = normalize(raw);
        let candidate = Candidate {
            country: "CH",
            identifier: &identifier,
            rule: rule_for("CH"),
        };
        SwissStrategy.check(&candidate).await
    }

    #[tokio::test]
    async fn labelled_uid_is_format_only() {
        for raw in ["CHE-123.456.789 TVA", "CHE-123.456.789 MWST", "CHE123456789"] {
            let r = run(raw).await;
            assert_eq!(r.status(), VerificationStatus::FormatOnly, "{raw}");
            assert!(!r.is_verified());
        }
    }

    #[tokio::test]
    async fn malformed_uid_is_invalid() {
        let r = run("CHE-123.456.78").await;
        assert_eq!(r.status(), VerificationStatus::Invalid);
        assert!(!r.is_format_valid());
    }

    #[tokio::test]
    async fn missing_rule_is_pending() {
        let candidate = Candidate {
            country: "CH",
            identifier: "CHE123456789",
            rule: None,
        };
        let r = SwissStrategy.check(&candidate).await;
        assert_eq!(r.status(), VerificationStatus::Pending);
    }
}
