use async_trait::async_trait;

use super::{Candidate, VerificationStrategy};
use crate::result::ValidationResult;
use crate::rules::ShapeKind;

/// Classifies Canadian and Quebec business numbers.
///
/// Neither the CRA nor Revenu Québec offers an unauthenticated lookup, so
/// the outcome is at best `format_only`. The message names the shape that
/// matched first: registry number, then provincial, then federal.
#[derive(Debug, Default)]
pub struct CanadaStrategy;

fn format_message(kind: ShapeKind) -> String {
    let authority = match kind {
        ShapeKind::Neq => "Registraire des entreprises",
        ShapeKind::Tvq => "Revenu Quebec",
        ShapeKind::GstHst => "CRA",
        ShapeKind::Vat | ShapeKind::Uid | ShapeKind::Ein => "registry",
    };
    format!(
        "{} format valid ({authority} API verification requires credentials)",
        kind.label()
    )
}

#[async_trait]
impl VerificationStrategy for CanadaStrategy {
    async fn check(&self, candidate: &Candidate<'_>) -> ValidationResult {
        let Some(rule) = candidate.rule else {
            tracing::warn!("no format rule for Canada");
            return ValidationResult::pending("Canadian tax number verification unavailable");
        };
        match rule.classify(candidate.identifier) {
            Some(m) => ValidationResult::format_only(format_message(m.kind)),
            None => ValidationResult::format_rejected("Invalid Quebec TVQ/GST format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::VerificationStatus;
    use crate::rules::rule_for;

    async fn run(identifier: &str) -> ValidationResult {
        let candidate = Candidate {
            country: "CA",
            identifier,
            rule: rule_for("CA"),
        };
        CanadaStrategy.check(&candidate).await
    }

    #[tokio::test]
    async fn gst_number_is_format_only() {
        let r = run("123456789RT0001").await;
        assert_eq!(r.status(), VerificationStatus::FormatOnly);
        assert!(r.message().starts_with("Canada GST/HST number"), "{}", r.message());
    }

    #[tokio::test]
    async fn tvq_number_names_quebec() {
        let r = run("1234567890TQ0001").await;
        assert_eq!(r.status(), VerificationStatus::FormatOnly);
        assert!(r.message().contains("Quebec TVQ"), "{}", r.message());
    }

    #[tokio::test]
    async fn registry_number_wins_tie_break() {
        let r = run("1123456789").await;
        assert!(r.message().contains("NEQ"), "{}", r.message());
    }

    #[tokio::test]
    async fn short_number_is_invalid() {
        let r = run("12345").await;
        assert_eq!(r.status(), VerificationStatus::Invalid);
        assert!(!r.is_verified());
    }
}
