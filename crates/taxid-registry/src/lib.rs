#![deny(clippy::print_stdout, clippy::print_stderr)]

//! HTTP implementations of the `taxid-core` registry traits.
//!
//! - [`ViesClient`]: EU VIES `checkVat` (SOAP).
//! - [`HmrcClient`]: HMRC VAT registration lookup (REST, bearer token).
//! - [`CompaniesHouseClient`]: Companies House company profile (REST, basic
//!   auth).
//!
//! [`bootstrap`] builds whichever clients the [`RegistryConfig`] allows.

pub mod companies_house;
pub mod config;
pub mod error;
pub mod hmrc;
mod http;
pub mod vies;

pub use companies_house::{COMPANIES_HOUSE_BASE_URL, CompaniesHouseClient};
pub use config::{COMPANIES_HOUSE_KEY_VAR, HMRC_TOKEN_VAR, RegistryConfig, bootstrap};
pub use error::ClientInitError;
pub use hmrc::{HMRC_BASE_URL, HmrcClient};
pub use http::USER_AGENT;
pub use vies::{VIES_ENDPOINT, ViesClient};
