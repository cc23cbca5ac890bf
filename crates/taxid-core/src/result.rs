/// Request and result types for a single validation call.
///
/// [`ValidationResult`] is built only through its named constructors, each
/// of which fixes the `is_format_valid` / `is_verified` / `status`
/// combination for one outcome. Callers read it through getters; there is no
/// way to assemble an inconsistent result from outside this module.
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// ValidationRequest
// ---------------------------------------------------------------------------

/// An identifier and the country it is claimed for, as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    raw_identifier: String,
    country_code: String,
}

impl ValidationRequest {
    /// Builds a request. The country code is trimmed and uppercased; the
    /// identifier is kept exactly as typed.
    pub fn new(raw_identifier: impl Into<String>, country_code: &str) -> Self {
        Self {
            raw_identifier: raw_identifier.into(),
            country_code: country_code.trim().to_ascii_uppercase(),
        }
    }

    /// The identifier as supplied, separators and prefix included.
    pub fn raw_identifier(&self) -> &str {
        &self.raw_identifier
    }

    /// The uppercase country code.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

// ---------------------------------------------------------------------------
// VerificationStatus
// ---------------------------------------------------------------------------

/// Outcome category of a validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// A registry confirmed the identifier (or none is needed, as for a US
    /// business without an EIN).
    Verified,
    /// Rejected, either by the format rule or by a registry.
    Invalid,
    /// The format rule passed and no registry answer is available.
    FormatOnly,
    /// A registry call was attempted and failed transiently; retry later.
    Pending,
}

impl VerificationStatus {
    /// Returns the wire form (`"verified"`, `"invalid"`, `"format_only"`,
    /// `"pending"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Invalid => "invalid",
            Self::FormatOnly => "format_only",
            Self::Pending => "pending",
        }
    }

    /// Returns `true` when a billable account may be created with this status.
    pub fn permits_registration(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The uniform answer every verification strategy produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_format_valid: bool,
    is_verified: bool,
    status: VerificationStatus,
    registered_name: Option<String>,
    registered_address: Option<String>,
    message: String,
}

impl ValidationResult {
    /// A registry confirmed the identifier.
    pub fn verified(
        name: Option<String>,
        address: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            is_format_valid: true,
            is_verified: true,
            status: VerificationStatus::Verified,
            registered_name: name,
            registered_address: address,
            message: message.into(),
        }
    }

    /// The identifier passed its format rule but the registry does not know it.
    pub fn rejected_by_registry(message: impl Into<String>) -> Self {
        Self {
            is_format_valid: true,
            is_verified: true,
            status: VerificationStatus::Invalid,
            registered_name: None,
            registered_address: None,
            message: message.into(),
        }
    }

    /// The identifier failed its format rule; no registry was contacted.
    pub fn format_rejected(message: impl Into<String>) -> Self {
        Self {
            is_format_valid: false,
            is_verified: false,
            status: VerificationStatus::Invalid,
            registered_name: None,
            registered_address: None,
            message: message.into(),
        }
    }

    /// The format is acceptable and no registry answer is available.
    pub fn format_only(message: impl Into<String>) -> Self {
        Self {
            is_format_valid: true,
            is_verified: false,
            status: VerificationStatus::FormatOnly,
            registered_name: None,
            registered_address: None,
            message: message.into(),
        }
    }

    /// A registry check failed transiently.
    pub fn pending(message: impl Into<String>) -> Self {
        Self {
            is_format_valid: true,
            is_verified: false,
            status: VerificationStatus::Pending,
            registered_name: None,
            registered_address: None,
            message: message.into(),
        }
    }

    pub fn is_format_valid(&self) -> bool {
        self.is_format_valid
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    /// Registered legal name. Only present on `verified` results.
    pub fn registered_name(&self) -> Option<&str> {
        self.registered_name.as_deref()
    }

    /// Registered address. Only present on `verified` results.
    pub fn registered_address(&self) -> Option<&str> {
        self.registered_address.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Shorthand for `status() == Invalid`.
    pub fn is_invalid(&self) -> bool {
        self.status == VerificationStatus::Invalid
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
