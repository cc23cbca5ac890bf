//! HMRC and Companies House clients against mock REST endpoints.
#![allow(clippy::expect_used)]

use std::time::Duration;

use serde_json::json;
use taxid_core::{CompanyRegistry, UkLookup, UkVatRegistry};
use taxid_registry::{CompaniesHouseClient, HmrcClient};
use wiremock::matchers::{basic_auth, bearer_token, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);
const LOOKUP: &str = "/organisations/vat/check-vat-number/lookup/123456789";

fn hmrc(server: &MockServer) -> HmrcClient {
    HmrcClient::with_base_url(server.uri(), "test-token", TIMEOUT).expect("client")
}

fn companies(server: &MockServer) -> CompaniesHouseClient {
    CompaniesHouseClient::with_base_url(server.uri(), "ch-key", TIMEOUT).expect("client")
}

#[tokio::test]
async fn hmrc_registered_trader() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOOKUP))
        .and(bearer_token("test-token"))
        .and(header("accept", "application/vnd.hmrc.2.0+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "target": {
                "name": "Widgets Ltd",
                "vatNumber": "123456789",
                "address": {
                    "line1": "1 High St",
                    "line2": "London",
                    "postcode": "SW1A 1AA",
                    "countryCode": "GB"
                }
            },
            "processingDate": "2026-10-18T10:00:00+01:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = hmrc(&server).lookup("123456789").await.expect("lookup");
    assert_eq!(
        lookup,
        UkLookup::Registered {
            name: Some("Widgets Ltd".to_owned()),
            address: Some("1 High St, London, SW1A 1AA, GB".to_owned()),
        }
    );
}

#[tokio::test]
async fn hmrc_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOOKUP))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "NOT_FOUND",
            "message": "targetVrn does not match a registered company"
        })))
        .mount(&server)
        .await;

    let lookup = hmrc(&server).lookup("123456789").await.expect("lookup");
    assert_eq!(lookup, UkLookup::NotRegistered);
}

#[tokio::test]
async fn hmrc_rate_limited_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let lookup = hmrc(&server).lookup("123456789").await.expect("lookup");
    assert_eq!(lookup, UkLookup::Unexpected { status: 429 });
}

#[tokio::test]
async fn hmrc_malformed_body_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = hmrc(&server).lookup("123456789").await.expect_err("protocol");
    assert!(matches!(err, taxid_core::RegistryError::Protocol(_)), "{err}");
}

#[tokio::test]
async fn companies_house_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company/SC123456"))
        .and(basic_auth("ch-key", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "company_name": "ACME WIDGETS LIMITED",
            "company_number": "SC123456",
            "registered_office_address": {
                "address_line_1": "1 Road",
                "locality": "Edinburgh",
                "postal_code": "EH1 1AA"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = companies(&server).company("SC123456").await.expect("lookup");
    assert_eq!(
        lookup,
        UkLookup::Registered {
            name: Some("ACME WIDGETS LIMITED".to_owned()),
            address: Some("1 Road, EH1 1AA".to_owned()),
        }
    );
}

#[tokio::test]
async fn companies_house_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company/12345678"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let lookup = companies(&server).company("12345678").await.expect("lookup");
    assert_eq!(lookup, UkLookup::NotRegistered);
}
