//! Client for HMRC's "check a UK VAT number" API.
//!
//! `GET {base}/organisations/vat/check-vat-number/lookup/{vrn}` with a bearer
//! token. A 200 carries the registered trader under `target`; a 404 means the
//! number is not registered. Every other status is reported as
//! [`UkLookup::Unexpected`].
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use taxid_core::{RegistryError, UkLookup, UkVatRegistry};

use crate::error::{ClientInitError, transport};
use crate::http::{build_client, join_address};

/// Production base URL of the HMRC API platform.
pub const HMRC_BASE_URL: &str = "https://api.service.hmrc.gov.uk";

const ACCEPT_V2: &str = "application/vnd.hmrc.2.0+json";

/// HMRC VAT-number lookup client.
#[derive(Debug, Clone)]
pub struct HmrcClient {
    http: Client,
    base_url: String,
}

impl HmrcClient {
    /// Creates a client for the production API.
    pub fn new(token: &str, timeout: Duration) -> Result<Self, ClientInitError> {
        Self::with_base_url(HMRC_BASE_URL, token, timeout)
    }

    /// Creates a client for an arbitrary base URL (a mock server in tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, ClientInitError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(
            |e| ClientInitError::InvalidCredential {
                service: "HMRC",
                reason: e.to_string(),
            },
        )?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V2));

        Ok(Self {
            http: build_client(timeout, headers)?,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn lookup_url(&self, vrn: &str) -> String {
        format!(
            "{}/organisations/vat/check-vat-number/lookup/{vrn}",
            self.base_url
        )
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    target: Target,
}

#[derive(Debug, Deserialize)]
struct Target {
    name: Option<String>,
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Address {
    line1: Option<String>,
    line2: Option<String>,
    line3: Option<String>,
    line4: Option<String>,
    line5: Option<String>,
    postcode: Option<String>,
    country_code: Option<String>,
}

impl Address {
    fn flatten(&self) -> Option<String> {
        join_address([
            self.line1.as_deref(),
            self.line2.as_deref(),
            self.line3.as_deref(),
            self.line4.as_deref(),
            self.line5.as_deref(),
            self.postcode.as_deref(),
            self.country_code.as_deref(),
        ])
    }
}

#[async_trait]
impl UkVatRegistry for HmrcClient {
    async fn lookup(&self, vrn: &str) -> Result<UkLookup, RegistryError> {
        let response = self
            .http
            .get(self.lookup_url(vrn))
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "HMRC responded");

        if status == StatusCode::NOT_FOUND {
            return Ok(UkLookup::NotRegistered);
        }
        if status != StatusCode::OK {
            return Ok(UkLookup::Unexpected {
                status: status.as_u16(),
            });
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| RegistryError::Protocol(e.to_string()))?;
        Ok(UkLookup::Registered {
            name: body.target.name.filter(|n| !n.trim().is_empty()),
            address: body.target.address.as_ref().and_then(Address::flatten),
        })
    }
}
