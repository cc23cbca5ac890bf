#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod company_number;
pub mod jurisdiction;
pub mod newtypes;
pub mod normalize;
pub mod registration;
pub mod registry;
pub mod result;
pub mod rules;
pub mod strategy;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_stubs;

pub use company_number::{is_company_number, normalize_company_number};
pub use jurisdiction::{EuMember, Jurisdiction, TaxIdType};
pub use newtypes::{CountryCode, NewtypeError};
pub use normalize::{canonical_form, normalize};
pub use registration::{BusinessIdentity, RegistrationError, Screening, screen_registration};
pub use registry::{
    CompanyRegistry, EuRegistryReply, EuVatRegistry, RegistryClients, RegistryError, UkLookup,
    UkVatRegistry,
};
pub use result::{ValidationRequest, ValidationResult, VerificationStatus};
pub use rules::{FormatRule, Shape, ShapeKind, ShapeMatch, all_rules, rule_for};
pub use strategy::{Candidate, VerificationStrategy};
pub use validator::{DEFAULT_CALL_TIMEOUT, Validator, ValidatorConfig};

/// Returns the current version of the taxid-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
