//! Startup configuration and wiring of the registry clients.
//!
//! Credentials are read once, at startup. A missing credential is a
//! capability downgrade, never an error: the affected strategy falls back to
//! a format check. A client that fails to build is logged and left out.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use taxid_core::{DEFAULT_CALL_TIMEOUT, RegistryClients};

use crate::companies_house::CompaniesHouseClient;
use crate::hmrc::HmrcClient;
use crate::vies::ViesClient;

/// Environment variable holding the HMRC bearer token.
pub const HMRC_TOKEN_VAR: &str = "HMRC_API_TOKEN";
/// Environment variable holding the Companies House API key.
pub const COMPANIES_HOUSE_KEY_VAR: &str = "COMPANIES_HOUSE_API_KEY";

/// Everything needed to build the registry clients.
#[derive(Clone)]
pub struct RegistryConfig {
    /// HMRC bearer token; `None` disables the UK VAT lookup.
    pub hmrc_token: Option<String>,
    /// Companies House API key; `None` disables the company lookup.
    pub companies_house_key: Option<String>,
    /// Request timeout applied by the HTTP clients.
    pub request_timeout: Duration,
    /// Build no clients at all.
    pub offline: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            hmrc_token: None,
            companies_house_key: None,
            request_timeout: DEFAULT_CALL_TIMEOUT,
            offline: false,
        }
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("hmrc_token", &self.hmrc_token.as_ref().map(|_| "<redacted>"))
            .field(
                "companies_house_key",
                &self.companies_house_key.as_ref().map(|_| "<redacted>"),
            )
            .field("request_timeout", &self.request_timeout)
            .field("offline", &self.offline)
            .finish()
    }
}

impl RegistryConfig {
    /// Reads credentials from [`HMRC_TOKEN_VAR`] and
    /// [`COMPANIES_HOUSE_KEY_VAR`]. Blank values count as absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`RegistryConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            hmrc_token: non_blank(lookup(HMRC_TOKEN_VAR)),
            companies_house_key: non_blank(lookup(COMPANIES_HOUSE_KEY_VAR)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builds the registry handles described by `config`.
///
/// The VIES client needs no credentials and is always attempted unless
/// `offline` is set.
pub fn bootstrap(config: &RegistryConfig) -> RegistryClients {
    let mut clients = RegistryClients::none();
    if config.offline {
        tracing::info!("offline mode: no registry clients");
        return clients;
    }

    match ViesClient::new(config.request_timeout) {
        Ok(client) => clients = clients.with_eu(Arc::new(client)),
        Err(err) => tracing::error!(error = %err, "VIES client unavailable"),
    }

    match config.hmrc_token.as_deref() {
        Some(token) => match HmrcClient::new(token, config.request_timeout) {
            Ok(client) => clients = clients.with_uk(Arc::new(client)),
            Err(err) => tracing::error!(error = %err, "HMRC client unavailable"),
        },
        None => tracing::info!("{HMRC_TOKEN_VAR} not set; UK VAT numbers are format-checked only"),
    }

    match config.companies_house_key.as_deref() {
        Some(key) => match CompaniesHouseClient::new(key, config.request_timeout) {
            Ok(client) => clients = clients.with_companies(Arc::new(client)),
            Err(err) => tracing::error!(error = %err, "Companies House client unavailable"),
        },
        None => tracing::info!(
            "{COMPANIES_HOUSE_KEY_VAR} not set; UK company numbers are format-checked only"
        ),
    }

    clients
}
