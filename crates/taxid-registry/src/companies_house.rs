//! Client for the Companies House public data API.
//!
//! Authentication is HTTP basic auth with the API key as the username and an
//! empty password.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use taxid_core::{CompanyRegistry, RegistryError, UkLookup};

use crate::error::{ClientInitError, transport};
use crate::http::{build_client, join_address};

/// Production base URL of the Companies House API.
pub const COMPANIES_HOUSE_BASE_URL: &str = "https://api.company-information.service.gov.uk";

/// Companies House client.
#[derive(Clone)]
pub struct CompaniesHouseClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for CompaniesHouseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompaniesHouseClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CompaniesHouseClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, ClientInitError> {
        Self::with_base_url(COMPANIES_HOUSE_BASE_URL, api_key, timeout)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, ClientInitError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ClientInitError::InvalidCredential {
                service: "Companies House",
                reason: "API key is empty".to_owned(),
            });
        }
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(Self {
            http: build_client(timeout, headers)?,
            api_key: api_key.to_owned(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CompanyProfile {
    company_name: Option<String>,
    registered_office_address: Option<OfficeAddress>,
}

#[derive(Debug, Deserialize)]
struct OfficeAddress {
    address_line_1: Option<String>,
    postal_code: Option<String>,
}

#[async_trait]
impl CompanyRegistry for CompaniesHouseClient {
    async fn company(&self, number: &str) -> Result<UkLookup, RegistryError> {
        let url = format!("{}/company/{number}", self.base_url);
        let response = self
            .http
            .get(url)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Companies House responded");

        if status == StatusCode::NOT_FOUND {
            return Ok(UkLookup::NotRegistered);
        }
        if status != StatusCode::OK {
            return Ok(UkLookup::Unexpected {
                status: status.as_u16(),
            });
        }

        let profile: CompanyProfile = response
            .json()
            .await
            .map_err(|e| RegistryError::Protocol(e.to_string()))?;
        let address = profile.registered_office_address.as_ref().and_then(|a| {
            join_address([a.address_line_1.as_deref(), a.postal_code.as_deref()])
        });
        Ok(UkLookup::Registered {
            name: profile.company_name,
            address,
        })
    }
}
