//! The validation entry point.
//!
//! [`Validator::validate`] runs the same pipeline for every identifier:
//!
//! 1. normalize the identifier once;
//! 2. look up the country's format rule and reject a non-matching identifier
//!    before any registry is contacted;
//! 3. route the country to its jurisdiction family and hand the candidate to
//!    that family's strategy.
//!
//! The validator holds no mutable state. One instance can serve any number of
//! concurrent calls.
use std::time::Duration;

use crate::company_number;
use crate::jurisdiction::Jurisdiction;
use crate::normalize::normalize;
use crate::registry::RegistryClients;
use crate::result::{ValidationRequest, ValidationResult};
use crate::rules::{self, FormatRule};
use crate::strategy::{
    CanadaStrategy, Candidate, EuStrategy, FallbackStrategy, SwissStrategy, UkStrategy,
    UsaStrategy, VerificationStrategy,
};

/// Upper bound on a single registry call unless configured otherwise.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for a [`Validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Upper bound on each outbound registry call.
    pub call_timeout: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

/// Routes identifiers to their jurisdiction's verification strategy.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    clients: RegistryClients,
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(clients: RegistryClients, config: ValidatorConfig) -> Self {
        Self { clients, config }
    }

    /// A validator with no registry handles: EU identifiers come back
    /// `pending`, UK ones `format_only`.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> &RegistryClients {
        &self.clients
    }

    pub fn config(&self) -> ValidatorConfig {
        self.config
    }

    /// Validates `identifier` for `country`.
    ///
    /// `country` is case-insensitive. An unknown or malformed country code is
    /// not an error; it routes to the default strategy. The call never fails:
    /// registry trouble is reported through the result's status.
    pub async fn validate(&self, identifier: &str, country: &str) -> ValidationResult {
        let country = country.trim().to_ascii_uppercase();
        let identifier = normalize(identifier);
        let jurisdiction = Jurisdiction::route(&country);
        let rule = rules::rule_for(&country);

        tracing::debug!(
            country = %country,
            jurisdiction = %jurisdiction,
            has_rule = rule.is_some(),
            "routing identifier"
        );

        if let Some(rule) = rule {
            let exempt = identifier.is_empty() && jurisdiction.identifier_optional();
            if !exempt && !rule.matches(&identifier) {
                return reject_format(&country, rule);
            }
        }

        let candidate = Candidate {
            country: &country,
            identifier: &identifier,
            rule,
        };
        self.dispatch(jurisdiction, &candidate).await
    }

    /// Validates a prepared [`ValidationRequest`].
    pub async fn validate_request(&self, request: &ValidationRequest) -> ValidationResult {
        self.validate(request.raw_identifier(), request.country_code())
            .await
    }

    /// Validates a UK company registration number against Companies House.
    pub async fn validate_uk_company_number(&self, number: &str) -> ValidationResult {
        company_number::verify(self.clients.companies(), self.config.call_timeout, number).await
    }

    async fn dispatch(
        &self,
        jurisdiction: Jurisdiction,
        candidate: &Candidate<'_>,
    ) -> ValidationResult {
        let timeout = self.config.call_timeout;
        match jurisdiction {
            Jurisdiction::EuropeanUnion(member) => {
                EuStrategy::new(member, self.clients.eu(), timeout)
                    .check(candidate)
                    .await
            }
            Jurisdiction::Switzerland => SwissStrategy.check(candidate).await,
            Jurisdiction::UnitedKingdom => {
                UkStrategy::new(self.clients.uk(), timeout)
                    .check(candidate)
                    .await
            }
            Jurisdiction::Canada => CanadaStrategy.check(candidate).await,
            Jurisdiction::UnitedStates => UsaStrategy.check(candidate).await,
            Jurisdiction::Unmodeled => FallbackStrategy.check(candidate).await,
        }
    }
}

fn reject_format(country: &str, rule: &FormatRule) -> ValidationResult {
    tracing::debug!(country, "identifier failed format rule");
    ValidationResult::format_rejected(format!(
        "Invalid {country} identifier format (expected {})",
        rule.summary()
    ))
}
