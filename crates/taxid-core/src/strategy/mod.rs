//! Per-jurisdiction verification strategies.
//!
//! Every strategy implements [`VerificationStrategy`] and receives a
//! [`Candidate`] that has already been normalized and, where the country has
//! a format rule, already passed it. Strategies never fail: registry errors
//! become `pending` or `format_only` results inside the strategy.
use async_trait::async_trait;

use crate::result::ValidationResult;
use crate::rules::FormatRule;

pub mod canada;
pub mod eu;
pub mod fallback;
pub mod swiss;
pub mod uk;
pub mod usa;

pub use canada::CanadaStrategy;
pub use eu::EuStrategy;
pub use fallback::FallbackStrategy;
pub use swiss::SwissStrategy;
pub use uk::UkStrategy;
pub use usa::UsaStrategy;

/// A normalized identifier on its way to a strategy.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Uppercase country code as supplied.
    pub country: &'a str,
    /// Normalized identifier (see [`crate::normalize::normalize`]).
    pub identifier: &'a str,
    /// The country's format rule, when the table has one.
    pub rule: Option<&'static FormatRule>,
}

/// The capability shared by all jurisdiction families.
#[async_trait]
pub trait VerificationStrategy: Send + Sync {
    /// Produces the result for one candidate.
    async fn check(&self, candidate: &Candidate<'_>) -> ValidationResult;
}
