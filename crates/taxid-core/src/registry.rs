//! Collaborator traits for remote tax registries.
//!
//! `taxid-core` performs no network I/O. Strategies that consult a registry
//! receive a handle to one of the traits below; the concrete HTTP clients live
//! in `taxid-registry`, and tests supply stubs. Each handle is optional: a
//! registry whose client failed to initialize, or whose credentials are not
//! configured, is simply absent, and the dependent strategy degrades to a
//! non-blocking result.
//!
//! Errors from a registry never escape [`crate::Validator::validate`]; the
//! strategies turn every [`RegistryError`] into a `pending` or `format_only`
//! result.
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// The answer of the EU VIES service for one VAT number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EuRegistryReply {
    /// Whether the number is currently registered.
    pub valid: bool,
    /// Registered trader name, when the member state discloses it.
    pub name: Option<String>,
    /// Registered trader address, when the member state discloses it.
    pub address: Option<String>,
}

/// The answer of a UK registry lookup (HMRC VAT or Companies House).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UkLookup {
    /// The registry returned a record.
    Registered {
        /// Registered name.
        name: Option<String>,
        /// Registered address, flattened to a single line.
        address: Option<String>,
    },
    /// The registry answered that the number does not exist.
    NotRegistered,
    /// Any other HTTP status; treated as "registry unavailable".
    Unexpected {
        /// The HTTP status code received.
        status: u16,
    },
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Failure talking to a remote registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The request could not be sent or the response body not read.
    #[error("transport error: {0}")]
    Transport(String),
    /// No answer arrived within the call timeout.
    #[error("no response within {0:?}")]
    Timeout(Duration),
    /// The service answered with a SOAP fault.
    #[error("service fault {code}: {message}")]
    Fault {
        /// Fault code, e.g. `soap:Server`.
        code: String,
        /// Fault string, e.g. `MS_UNAVAILABLE`.
        message: String,
    },
    /// The response body did not have the expected structure.
    #[error("malformed response: {0}")]
    Protocol(String),
    /// The service answered with an unexpected HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Awaits `fut`, failing with [`RegistryError::Timeout`] after `limit`.
pub async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, RegistryError>
where
    F: Future<Output = Result<T, RegistryError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_elapsed) => Err(RegistryError::Timeout(limit)),
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// The EU VAT Information Exchange System (VIES).
#[async_trait]
pub trait EuVatRegistry: Send + Sync {
    /// Checks a VAT number.
    ///
    /// `country` is the VIES country code (`EL` for Greece); `national` is the
    /// number without its country prefix.
    async fn check_vat(
        &self,
        country: &str,
        national: &str,
    ) -> Result<EuRegistryReply, RegistryError>;
}

/// HMRC's VAT registration lookup.
#[async_trait]
pub trait UkVatRegistry: Send + Sync {
    /// Looks up a 9-digit VAT registration number (no `GB` prefix).
    async fn lookup(&self, vrn: &str) -> Result<UkLookup, RegistryError>;
}

/// The UK Companies House register.
#[async_trait]
pub trait CompanyRegistry: Send + Sync {
    /// Fetches the company profile for an 8-character company number.
    async fn company(&self, number: &str) -> Result<UkLookup, RegistryError>;
}

// ---------------------------------------------------------------------------
// RegistryClients
// ---------------------------------------------------------------------------

/// The registry handles available to a [`crate::Validator`].
///
/// Built once at startup and read-only afterwards. A `None` handle means the
/// corresponding registry is not available in this process.
#[derive(Clone, Default)]
pub struct RegistryClients {
    eu: Option<Arc<dyn EuVatRegistry>>,
    uk: Option<Arc<dyn UkVatRegistry>>,
    companies: Option<Arc<dyn CompanyRegistry>>,
}

impl RegistryClients {
    /// No registries at all; every strategy stays local.
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_eu(mut self, client: Arc<dyn EuVatRegistry>) -> Self {
        self.eu = Some(client);
        self
    }

    #[must_use]
    pub fn with_uk(mut self, client: Arc<dyn UkVatRegistry>) -> Self {
        self.uk = Some(client);
        self
    }

    #[must_use]
    pub fn with_companies(mut self, client: Arc<dyn CompanyRegistry>) -> Self {
        self.companies = Some(client);
        self
    }

    pub fn eu(&self) -> Option<&dyn EuVatRegistry> {
        self.eu.as_deref()
    }

    pub fn uk(&self) -> Option<&dyn UkVatRegistry> {
        self.uk.as_deref()
    }

    pub fn companies(&self) -> Option<&dyn CompanyRegistry> {
        self.companies.as_deref()
    }
}

impl fmt::Debug for RegistryClients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryClients")
            .field("eu", &self.eu.is_some())
            .field("uk", &self.uk.is_some())
            .field("companies", &self.companies.is_some())
            .finish()
    }
}
