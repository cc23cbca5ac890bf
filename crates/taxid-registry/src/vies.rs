//! Client for the EU VIES `checkVat` SOAP service.
//!
//! The request is a fixed envelope with two parameters; the response is read
//! with a streaming `quick-xml` reader that only looks at the handful of
//! elements it needs (`valid`, `name`, `address`, `faultcode`,
//! `faultstring`). Namespace prefixes are ignored.
//!
//! VIES reports member-state outages as SOAP faults, usually with HTTP 500;
//! a fault is recognised whatever the status code.
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use taxid_core::{EuRegistryReply, EuVatRegistry, RegistryError};

use crate::error::{ClientInitError, transport};
use crate::http::{build_client, join_address};

/// Production endpoint of the VIES SOAP service.
pub const VIES_ENDPOINT: &str =
    "https://ec.europa.eu/taxation_customs/vies/services/checkVatService";

/// VIES SOAP client.
#[derive(Debug, Clone)]
pub struct ViesClient {
    http: Client,
    endpoint: String,
}

impl ViesClient {
    /// Creates a client for the production endpoint.
    pub fn new(timeout: Duration) -> Result<Self, ClientInitError> {
        Self::with_endpoint(VIES_ENDPOINT, timeout)
    }

    /// Creates a client for an arbitrary endpoint (a mock server in tests).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientInitError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/xml; charset=utf-8"),
        );
        headers.insert("soapaction", HeaderValue::from_static(""));
        Ok(Self {
            http: build_client(timeout, headers)?,
            endpoint: endpoint.into(),
        })
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EuVatRegistry for ViesClient {
    async fn check_vat(
        &self,
        country: &str,
        national: &str,
    ) -> Result<EuRegistryReply, RegistryError> {
        let response = self
            .http
            .post(&self.endpoint)
            .body(envelope(country, national))
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport(&e))?;
        tracing::debug!(status = status.as_u16(), country, "VIES responded");

        match (parse_response(&body), status.is_success()) {
            (Ok(SoapBody::Fault { code, message }), _) => {
                Err(RegistryError::Fault { code, message })
            }
            (Ok(SoapBody::Reply(reply)), true) => Ok(reply),
            (Ok(SoapBody::Reply(_)) | Err(_), false) => {
                Err(RegistryError::Status(status.as_u16()))
            }
            (Err(err), true) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Builds the `checkVat` request envelope.
pub(crate) fn envelope(country: &str, national: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" "#,
            r#"xmlns:urn="urn:ec.europa.eu:taxud:vies:services:checkVat:types">"#,
            "<soapenv:Header/>",
            "<soapenv:Body>",
            "<urn:checkVat>",
            "<urn:countryCode>{country}</urn:countryCode>",
            "<urn:vatNumber>{number}</urn:vatNumber>",
            "</urn:checkVat>",
            "</soapenv:Body>",
            "</soapenv:Envelope>",
        ),
        country = escape(country),
        number = escape(national),
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// The meaningful content of a VIES response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SoapBody {
    Reply(EuRegistryReply),
    Fault { code: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Valid,
    Name,
    Address,
    FaultCode,
    FaultString,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"valid" => Some(Self::Valid),
            b"name" => Some(Self::Name),
            b"address" => Some(Self::Address),
            b"faultcode" => Some(Self::FaultCode),
            b"faultstring" => Some(Self::FaultString),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Collected {
    valid: Option<String>,
    name: Option<String>,
    address: Option<String>,
    fault_code: Option<String>,
    fault_string: Option<String>,
}

impl Collected {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Valid => &mut self.valid,
            Field::Name => &mut self.name,
            Field::Address => &mut self.address,
            Field::FaultCode => &mut self.fault_code,
            Field::FaultString => &mut self.fault_string,
        }
    }
}

/// Extracts the reply or fault from a VIES response body.
#[allow(clippy::wildcard_enum_match_arm)]
pub(crate) fn parse_response(xml: &str) -> Result<SoapBody, RegistryError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut collected = Collected::default();
    let mut current: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => current = Field::from_local_name(e.local_name().as_ref()),
            Ok(Event::Text(t)) => {
                if let Some(field) = current {
                    let text = t
                        .unescape()
                        .map_err(|e| RegistryError::Protocol(e.to_string()))?;
                    *collected.slot(field) = Some(text.into_owned());
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(RegistryError::Protocol(e.to_string())),
            Ok(_) => {}
        }
    }

    if collected.fault_code.is_some() || collected.fault_string.is_some() {
        return Ok(SoapBody::Fault {
            code: collected.fault_code.unwrap_or_default(),
            message: collected.fault_string.unwrap_or_default(),
        });
    }

    let valid = match collected.valid.as_deref().map(str::trim) {
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            return Err(RegistryError::Protocol(format!(
                "unexpected <valid> value {other:?}"
            )));
        }
        None => return Err(RegistryError::Protocol("missing <valid> element".to_owned())),
    };

    Ok(SoapBody::Reply(EuRegistryReply {
        valid,
        name: disclosed(collected.name.as_deref()),
        address: disclosed(collected.address.as_deref()),
    }))
}

/// Drops the `---` placeholder VIES uses for withheld details and flattens
/// multi-line addresses.
fn disclosed(value: Option<&str>) -> Option<String> {
    let value = value?;
    if value.trim() == "---" {
        return None;
    }
    join_address(value.lines().map(Some))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn production_client_targets_vies() {
        let client = ViesClient::new(Duration::from_secs(1)).expect("client");
        assert_eq!(client.endpoint(), VIES_ENDPOINT);
    }

    #[test]
    fn custom_endpoint_is_kept() {
        let client =
            ViesClient::with_endpoint("http://127.0.0.1:9/vies", Duration::from_secs(1))
                .expect("client");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/vies");
    }

    const VALID: &str = r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
  <env:Header/>
  <env:Body>
    <ns2:checkVatResponse xmlns:ns2="urn:ec.europa.eu:taxud:vies:services:checkVat:types">
      <ns2:countryCode>BE</ns2:countryCode>
      <ns2:vatNumber>0123456789</ns2:vatNumber>
      <ns2:requestDate>2026-10-18+02:00</ns2:requestDate>
      <ns2:valid>true</ns2:valid>
      <ns2:name>Dupont SARL</ns2:name>
      <ns2:address>Rue X 1
1000 Brussels</ns2:address>
    </ns2:checkVatResponse>
  </env:Body>
</env:Envelope>"#;

    const WITHHELD: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <checkVatResponse>
      <valid>true</valid>
      <name>---</name>
      <address>---</address>
    </checkVatResponse>
  </soap:Body>
</soap:Envelope>"#;

    const FAULT: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>MS_UNAVAILABLE</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

    #[test]
    fn parses_valid_reply_with_details() {
        let body = parse_response(VALID).expect("parse");
        assert_eq!(
            body,
            SoapBody::Reply(EuRegistryReply {
                valid: true,
                name: Some("Dupont SARL".to_owned()),
                address: Some("Rue X 1, 1000 Brussels".to_owned()),
            })
        );
    }

    #[test]
    fn placeholders_become_none() {
        let body = parse_response(WITHHELD).expect("parse");
        assert_eq!(
            body,
            SoapBody::Reply(EuRegistryReply {
                valid: true,
                name: None,
                address: None,
            })
        );
    }

    #[test]
    fn empty_elements_become_none() {
        let xml = "<r><valid>false</valid><name/><address></address></r>";
        let body = parse_response(xml).expect("parse");
        assert_eq!(body, SoapBody::Reply(EuRegistryReply::default()));
    }

    #[test]
    fn parses_fault() {
        let body = parse_response(FAULT).expect("parse");
        assert_eq!(
            body,
            SoapBody::Fault {
                code: "soap:Server".to_owned(),
                message: "MS_UNAVAILABLE".to_owned(),
            }
        );
    }

    #[test]
    fn unescapes_entities() {
        let xml = "<r><valid>true</valid><name>Smith &amp; Sons</name></r>";
        let body = parse_response(xml).expect("parse");
        assert_eq!(
            body,
            SoapBody::Reply(EuRegistryReply {
                valid: true,
                name: Some("Smith & Sons".to_owned()),
                address: None,
            })
        );
    }

    #[test]
    fn missing_valid_is_protocol_error() {
        let err = parse_response("<r><name>x</name></r>").expect_err("should fail");
        assert!(matches!(err, RegistryError::Protocol(_)));
    }

    #[test]
    fn garbage_is_protocol_error() {
        let err = parse_response("<r><valid>maybe</valid></r>").expect_err("should fail");
        assert!(matches!(err, RegistryError::Protocol(_)));
    }

    #[test]
    fn envelope_escapes_parameters() {
        let xml = envelope("BE", "0123<456>");
        assert!(xml.contains("<urn:countryCode>BE</urn:countryCode>"));
        assert!(xml.contains("<urn:vatNumber>0123&lt;456&gt;</urn:vatNumber>"));
    }
}
