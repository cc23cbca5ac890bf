//! Country routing: maps a country code onto a closed set of jurisdiction
//! families.
//!
//! Routing is a total function. Any code that is not an EU member state,
//! Switzerland, the United Kingdom, Canada or the United States lands in
//! [`Jurisdiction::Unmodeled`], including malformed codes; the validator never
//! rejects an identifier because its country is unknown.
use std::fmt;

use serde::Serialize;

use crate::rules::ShapeKind;

/// The 27 member states of the European Union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EuMember {
    /// Austria.
    Austria,
    /// Belgium.
    Belgium,
    /// Bulgaria.
    Bulgaria,
    /// Croatia.
    Croatia,
    /// Cyprus.
    Cyprus,
    /// Czechia.
    Czechia,
    /// Denmark.
    Denmark,
    /// Estonia.
    Estonia,
    /// Finland.
    Finland,
    /// France.
    France,
    /// Germany.
    Germany,
    /// Greece.
    Greece,
    /// Hungary.
    Hungary,
    /// Ireland.
    Ireland,
    /// Italy.
    Italy,
    /// Latvia.
    Latvia,
    /// Lithuania.
    Lithuania,
    /// Luxembourg.
    Luxembourg,
    /// Malta.
    Malta,
    /// Netherlands.
    Netherlands,
    /// Poland.
    Poland,
    /// Portugal.
    Portugal,
    /// Romania.
    Romania,
    /// Slovakia.
    Slovakia,
    /// Slovenia.
    Slovenia,
    /// Spain.
    Spain,
    /// Sweden.
    Sweden,
}

impl EuMember {
    /// Every member state.
    pub const ALL: [EuMember; 27] = [
        Self::Austria,
        Self::Belgium,
        Self::Bulgaria,
        Self::Cyprus,
        Self::Czechia,
        Self::Germany,
        Self::Denmark,
        Self::Estonia,
        Self::Greece,
        Self::Spain,
        Self::Finland,
        Self::France,
        Self::Croatia,
        Self::Hungary,
        Self::Ireland,
        Self::Italy,
        Self::Lithuania,
        Self::Luxembourg,
        Self::Latvia,
        Self::Malta,
        Self::Netherlands,
        Self::Poland,
        Self::Portugal,
        Self::Romania,
        Self::Sweden,
        Self::Slovenia,
        Self::Slovakia,
    ];

    /// Returns the ISO 3166-1 alpha-2 code.
    pub fn iso_code(self) -> &'static str {
        match self {
            Self::Austria => "AT",
            Self::Belgium => "BE",
            Self::Bulgaria => "BG",
            Self::Croatia => "HR",
            Self::Cyprus => "CY",
            Self::Czechia => "CZ",
            Self::Denmark => "DK",
            Self::Estonia => "EE",
            Self::Finland => "FI",
            Self::France => "FR",
            Self::Germany => "DE",
            Self::Greece => "GR",
            Self::Hungary => "HU",
            Self::Ireland => "IE",
            Self::Italy => "IT",
            Self::Latvia => "LV",
            Self::Lithuania => "LT",
            Self::Luxembourg => "LU",
            Self::Malta => "MT",
            Self::Netherlands => "NL",
            Self::Poland => "PL",
            Self::Portugal => "PT",
            Self::Romania => "RO",
            Self::Slovakia => "SK",
            Self::Slovenia => "SI",
            Self::Spain => "ES",
            Self::Sweden => "SE",
        }
    }

    /// Returns the country code the VIES service expects.
    ///
    /// Identical to the ISO code except for Greece, which VIES knows as `EL`.
    pub fn vies_code(self) -> &'static str {
        if self == Self::Greece {
            "EL"
        } else {
            self.iso_code()
        }
    }

    /// Returns the prefixes a user may have typed in front of the number.
    pub fn prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Greece => &["EL", "GR"],
            Self::Austria => &["AT"],
            Self::Belgium => &["BE"],
            Self::Bulgaria => &["BG"],
            Self::Croatia => &["HR"],
            Self::Cyprus => &["CY"],
            Self::Czechia => &["CZ"],
            Self::Denmark => &["DK"],
            Self::Estonia => &["EE"],
            Self::Finland => &["FI"],
            Self::France => &["FR"],
            Self::Germany => &["DE"],
            Self::Hungary => &["HU"],
            Self::Ireland => &["IE"],
            Self::Italy => &["IT"],
            Self::Latvia => &["LV"],
            Self::Lithuania => &["LT"],
            Self::Luxembourg => &["LU"],
            Self::Malta => &["MT"],
            Self::Netherlands => &["NL"],
            Self::Poland => &["PL"],
            Self::Portugal => &["PT"],
            Self::Romania => &["RO"],
            Self::Slovakia => &["SK"],
            Self::Slovenia => &["SI"],
            Self::Spain => &["ES"],
            Self::Sweden => &["SE"],
        }
    }

    /// Looks up a member state by uppercase ISO code.
    pub fn from_iso(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.iso_code() == code)
    }
}

/// A jurisdiction family, each served by exactly one verification strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jurisdiction {
    /// An EU member state; verified against the shared VIES registry.
    EuropeanUnion(EuMember),
    /// Switzerland; UID format check only.
    Switzerland,
    /// United Kingdom; HMRC VAT-number lookup.
    UnitedKingdom,
    /// Canada, including Quebec; format classification only.
    Canada,
    /// United States; EIN format check, identifier optional.
    UnitedStates,
    /// Every other country code, including malformed ones.
    Unmodeled,
}

impl Jurisdiction {
    /// Routes an uppercase country code to its jurisdiction family.
    ///
    /// Greece is reached through either `GR` or its VAT code `EL`.
    pub fn route(country: &str) -> Self {
        match country {
            "CH" => Self::Switzerland,
            "GB" => Self::UnitedKingdom,
            "CA" => Self::Canada,
            "US" => Self::UnitedStates,
            "EL" => Self::EuropeanUnion(EuMember::Greece),
            other => EuMember::from_iso(other).map_or(Self::Unmodeled, Self::EuropeanUnion),
        }
    }

    /// Returns `true` when a missing identifier is itself acceptable.
    pub fn identifier_optional(self) -> bool {
        matches!(self, Self::UnitedStates)
    }

    /// Returns a short name for logs and messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::EuropeanUnion(_) => "EU",
            Self::Switzerland => "Switzerland",
            Self::UnitedKingdom => "UK",
            Self::Canada => "Canada",
            Self::UnitedStates => "USA",
            Self::Unmodeled => "unmodeled",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::EuropeanUnion(member) = self {
            write!(f, "EU ({})", member.iso_code())
        } else {
            f.write_str(self.name())
        }
    }
}

/// The tax-ID type codes used by the payment processor when a business
/// identifier is attached to a billing customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxIdType {
    /// EU VAT number (`eu_vat`).
    EuVat,
    /// UK VAT number (`gb_vat`).
    GbVat,
    /// Swiss VAT number (`ch_vat`).
    ChVat,
    /// Canadian GST/HST number (`ca_gst_hst`).
    CaGstHst,
    /// Quebec QST number (`ca_qst`).
    CaQst,
    /// US EIN (`us_ein`).
    UsEin,
}

impl TaxIdType {
    /// Picks the processor type for a routed identifier.
    ///
    /// `shape` is the rule shape the identifier matched, when known. Canada
    /// needs it to tell GST/HST from QST; a Quebec registry number (NEQ) has no
    /// processor counterpart and yields `None`.
    pub fn for_identifier(jurisdiction: Jurisdiction, shape: Option<ShapeKind>) -> Option<Self> {
        match jurisdiction {
            Jurisdiction::EuropeanUnion(_) => Some(Self::EuVat),
            Jurisdiction::UnitedKingdom => Some(Self::GbVat),
            Jurisdiction::Switzerland => Some(Self::ChVat),
            Jurisdiction::UnitedStates => Some(Self::UsEin),
            Jurisdiction::Canada => match shape {
                Some(ShapeKind::GstHst) => Some(Self::CaGstHst),
                Some(ShapeKind::Tvq) => Some(Self::CaQst),
                Some(
                    ShapeKind::Neq | ShapeKind::Vat | ShapeKind::Uid | ShapeKind::Ein,
                )
                | None => None,
            },
            Jurisdiction::Unmodeled => None,
        }
    }

    /// Returns the processor's wire code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EuVat => "eu_vat",
            Self::GbVat => "gb_vat",
            Self::ChVat => "ch_vat",
            Self::CaGstHst => "ca_gst_hst",
            Self::CaQst => "ca_qst",
            Self::UsEin => "us_ein",
        }
    }
}

impl fmt::Display for TaxIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
