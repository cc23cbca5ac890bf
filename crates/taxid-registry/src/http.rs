//! Shared HTTP client construction.
use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderMap;

use crate::error::ClientInitError;

/// `User-Agent` sent to every registry.
pub const USER_AGENT: &str = concat!("taxid/", env!("CARGO_PKG_VERSION"));

/// Builds a client with the request timeout and any per-service default
/// headers.
pub(crate) fn build_client(
    timeout: Duration,
    headers: HeaderMap,
) -> Result<Client, ClientInitError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Joins the non-blank parts of an address with `", "`.
///
/// Returns `None` when every part is blank.
pub(crate) fn join_address<'a>(
    parts: impl IntoIterator<Item = Option<&'a str>>,
) -> Option<String> {
    let joined = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() { None } else { Some(joined) }
}
