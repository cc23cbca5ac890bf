/// Per-country structural rules for business identifiers.
///
/// Each modeled country has one [`FormatRule`]: an ordered list of
/// [`Shape`]s, each a regex applied to the *normalized* identifier (see
/// [`crate::normalize::normalize`]). A country without a rule is not an
/// error; it means "no structural constraint".
///
/// Shapes that accept an optional country prefix capture the national part
/// of the identifier in a named group `national`, which is what the EU
/// registry expects on the wire.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Shape kinds
// ---------------------------------------------------------------------------

/// The kind of identifier a [`Shape`] recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A value-added-tax registration number (EU member states, UK).
    Vat,
    /// Swiss enterprise identification number (`CHE-NNN.NNN.NNN`).
    Uid,
    /// Quebec enterprise registry number (NEQ).
    Neq,
    /// Quebec sales tax number (TVQ).
    Tvq,
    /// Canadian federal GST/HST business number.
    GstHst,
    /// US employer identification number.
    Ein,
}

impl ShapeKind {
    /// Returns a short human-readable label for messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Vat => "VAT number",
            Self::Uid => "Swiss UID",
            Self::Neq => "Quebec NEQ registry number",
            Self::Tvq => "Quebec TVQ number",
            Self::GstHst => "Canada GST/HST number",
            Self::Ein => "US EIN",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Shape / FormatRule
// ---------------------------------------------------------------------------

/// One accepted structure for a country's identifier.
#[derive(Debug)]
pub struct Shape {
    /// What this shape identifies.
    pub kind: ShapeKind,
    /// Human-readable description of the structure.
    pub description: &'static str,
    /// A well-formed sample, written the way a user might type it.
    pub example: &'static str,
    regex: Regex,
}

impl Shape {
    fn new(
        kind: ShapeKind,
        pattern: &'static str,
        description: &'static str,
        example: &'static str,
    ) -> Self {
        Self {
            kind,
            description,
            example,
            regex: compile(pattern),
        }
    }

    /// Returns the regex source this shape matches against.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// A successful match of a normalized identifier against a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatch<'r, 's> {
    /// The first shape that accepted the identifier.
    pub kind: ShapeKind,
    /// The shape's description, for messages.
    pub description: &'r str,
    /// The identifier without its country prefix, or the whole identifier
    /// when the shape has no `national` group.
    pub national: &'s str,
}

/// The structural rule for one country.
#[derive(Debug)]
pub struct FormatRule {
    /// Uppercase ISO 3166-1 alpha-2 code this rule applies to.
    pub country: &'static str,
    /// Accepted shapes, in tie-break order.
    pub shapes: Vec<Shape>,
}

impl FormatRule {
    fn new(country: &'static str, shapes: Vec<Shape>) -> Self {
        Self { country, shapes }
    }

    /// Returns the first shape that accepts `normalized`, or `None`.
    ///
    /// `normalized` must already have passed through
    /// [`crate::normalize::normalize`]; separators and lowercase letters are
    /// not tolerated here.
    pub fn classify<'r, 's>(&'r self, normalized: &'s str) -> Option<ShapeMatch<'r, 's>> {
        self.shapes.iter().find_map(|shape| {
            let caps = shape.regex.captures(normalized)?;
            let national = caps.name("national").map_or(normalized, |m| m.as_str());
            Some(ShapeMatch {
                kind: shape.kind,
                description: shape.description,
                national,
            })
        })
    }

    /// Returns `true` if any shape accepts `normalized`.
    pub fn matches(&self, normalized: &str) -> bool {
        self.classify(normalized).is_some()
    }

    /// Joins the shape descriptions for use in rejection messages.
    pub fn summary(&self) -> String {
        self.shapes
            .iter()
            .map(|s| s.description)
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Compiles a table pattern.
///
/// All patterns are string literals; `Regex::new` never returns `Err` for
/// them. The fallback `a^` never matches anything, so a broken pattern would
/// reject rather than admit.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| {
        Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
}

static RULES: LazyLock<Vec<FormatRule>> = LazyLock::new(|| {
    use ShapeKind::{Ein, GstHst, Neq, Tvq, Uid, Vat};

    vec![
        FormatRule::new(
            "AT",
            vec![Shape::new(
                Vat,
                r"^(?:AT)?(?P<national>U[0-9]{8})$",
                "optional AT prefix + U + 8 digits",
                "ATU12345678",
            )],
        ),
        FormatRule::new(
            "BE",
            vec![Shape::new(
                Vat,
                r"^(?:BE)?(?P<national>[0-9]{10})$",
                "optional BE prefix + 10 digits",
                "BE 0123.456.789",
            )],
        ),
        FormatRule::new(
            "DE",
            vec![Shape::new(
                Vat,
                r"^(?:DE)?(?P<national>[0-9]{9})$",
                "optional DE prefix + 9 digits",
                "DE123456789",
            )],
        ),
        FormatRule::new(
            "DK",
            vec![Shape::new(
                Vat,
                r"^(?:DK)?(?P<national>[0-9]{8})$",
                "optional DK prefix + 8 digits",
                "DK 12 34 56 78",
            )],
        ),
        FormatRule::new(
            "ES",
            vec![Shape::new(
                Vat,
                r"^(?:ES)?(?P<national>[A-Z][0-9]{8}|[0-9]{8}[A-Z]|[A-Z][0-9]{7}[A-Z])$",
                "optional ES prefix + (letter + 8 digits | 8 digits + letter | letter + 7 digits + letter)",
                "ESB12345678",
            )],
        ),
        FormatRule::new(
            "FI",
            vec![Shape::new(
                Vat,
                r"^(?:FI)?(?P<national>[0-9]{8})$",
                "optional FI prefix + 8 digits",
                "FI12345678",
            )],
        ),
        FormatRule::new(
            "FR",
            vec![Shape::new(
                Vat,
                r"^(?:FR)?(?P<national>(?:[0-9][0-9A-Z]|[A-Z][0-9]|[A-EG-Z][A-Z]|F[A-QS-Z])[0-9]{9})$",
                "optional FR prefix + 2 alphanumeric key (not FR) + 9 digits",
                "FR 12 345678901",
            )],
        ),
        FormatRule::new(
            "GR",
            vec![Shape::new(
                Vat,
                r"^(?:EL|GR)?(?P<national>[0-9]{9})$",
                "optional EL prefix + 9 digits",
                "EL123456789",
            )],
        ),
        FormatRule::new(
            "IE",
            vec![Shape::new(
                Vat,
                r"^(?:IE)?(?P<national>[0-9]{7}[A-Z]{1,2}|[0-9][A-Z+*][0-9]{5}[A-Z])$",
                "optional IE prefix + 7 digits + 1-2 letters",
                "IE1234567T",
            )],
        ),
        FormatRule::new(
            "IT",
            vec![Shape::new(
                Vat,
                r"^(?:IT)?(?P<national>[0-9]{11})$",
                "optional IT prefix + 11 digits",
                "IT12345678901",
            )],
        ),
        FormatRule::new(
            "LU",
            vec![Shape::new(
                Vat,
                r"^(?:LU)?(?P<national>[0-9]{8})$",
                "optional LU prefix + 8 digits",
                "LU12345678",
            )],
        ),
        FormatRule::new(
            "NL",
            vec![Shape::new(
                Vat,
                r"^(?:NL)?(?P<national>[0-9]{9}B[0-9]{2})$",
                "optional NL prefix + 9 digits + B + 2 digits",
                "NL123456789B01",
            )],
        ),
        FormatRule::new(
            "PL",
            vec![Shape::new(
                Vat,
                r"^(?:PL)?(?P<national>[0-9]{10})$",
                "optional PL prefix + 10 digits",
                "PL1234567890",
            )],
        ),
        FormatRule::new(
            "PT",
            vec![Shape::new(
                Vat,
                r"^(?:PT)?(?P<national>[0-9]{9})$",
                "optional PT prefix + 9 digits",
                "PT123456789",
            )],
        ),
        FormatRule::new(
            "SE",
            vec![Shape::new(
                Vat,
                r"^(?:SE)?(?P<national>[0-9]{10}01)$",
                "optional SE prefix + 10 digits + 01",
                "SE123456789001",
            )],
        ),
        FormatRule::new(
            "BG",
            vec![Shape::new(
                Vat,
                r"^(?:BG)?(?P<national>[0-9]{9,10})$",
                "optional BG prefix + 9 or 10 digits",
                "BG123456789",
            )],
        ),
        FormatRule::new(
            "HR",
            vec![Shape::new(
                Vat,
                r"^(?:HR)?(?P<national>[0-9]{11})$",
                "optional HR prefix + 11 digits",
                "HR12345678901",
            )],
        ),
        FormatRule::new(
            "CY",
            vec![Shape::new(
                Vat,
                r"^(?:CY)?(?P<national>[0-9]{8}[A-Z])$",
                "optional CY prefix + 8 digits + letter",
                "CY12345678L",
            )],
        ),
        FormatRule::new(
            "CZ",
            vec![Shape::new(
                Vat,
                r"^(?:CZ)?(?P<national>[0-9]{8,10})$",
                "optional CZ prefix + 8 to 10 digits",
                "CZ12345678",
            )],
        ),
        FormatRule::new(
            "EE",
            vec![Shape::new(
                Vat,
                r"^(?:EE)?(?P<national>[0-9]{9})$",
                "optional EE prefix + 9 digits",
                "EE123456789",
            )],
        ),
        FormatRule::new(
            "HU",
            vec![Shape::new(
                Vat,
                r"^(?:HU)?(?P<national>[0-9]{8})$",
                "optional HU prefix + 8 digits",
                "HU12345678",
            )],
        ),
        FormatRule::new(
            "LV",
            vec![Shape::new(
                Vat,
                r"^(?:LV)?(?P<national>[0-9]{11})$",
                "optional LV prefix + 11 digits",
                "LV12345678901",
            )],
        ),
        FormatRule::new(
            "LT",
            vec![Shape::new(
                Vat,
                r"^(?:LT)?(?P<national>[0-9]{9}|[0-9]{12})$",
                "optional LT prefix + 9 or 12 digits",
                "LT123456789012",
            )],
        ),
        FormatRule::new(
            "MT",
            vec![Shape::new(
                Vat,
                r"^(?:MT)?(?P<national>[0-9]{8})$",
                "optional MT prefix + 8 digits",
                "MT12345678",
            )],
        ),
        FormatRule::new(
            "RO",
            vec![Shape::new(
                Vat,
                r"^(?:RO)?(?P<national>[0-9]{2,10})$",
                "optional RO prefix + 2 to 10 digits",
                "RO1234567",
            )],
        ),
        FormatRule::new(
            "SK",
            vec![Shape::new(
                Vat,
                r"^(?:SK)?(?P<national>[0-9]{10})$",
                "optional SK prefix + 10 digits",
                "SK1234567890",
            )],
        ),
        FormatRule::new(
            "SI",
            vec![Shape::new(
                Vat,
                r"^(?:SI)?(?P<national>[0-9]{8})$",
                "optional SI prefix + 8 digits",
                "SI12345678",
            )],
        ),
        FormatRule::new(
            "CH",
            vec![Shape::new(
                Uid,
                r"^CHE(?P<national>[0-9]{9})(?:TVA|MWST|IVA)?$",
                "CHE-NNN.NNN.NNN with optional TVA/MWST/IVA label",
                "CHE-123.456.789 TVA",
            )],
        ),
        FormatRule::new(
            "GB",
            vec![Shape::new(
                Vat,
                r"^(?:GB)?(?P<national>[0-9]{9})$",
                "optional GB prefix + 9 digits",
                "GB 123 4567 89",
            )],
        ),
        FormatRule::new(
            "CA",
            vec![
                Shape::new(
                    Neq,
                    r"^(?:11|22|33|88)[0-9]{8}$",
                    "10 digits starting with 11, 22, 33 or 88",
                    "1123456789",
                ),
                Shape::new(
                    Tvq,
                    r"^[0-9]{10}TQ[0-9]{4}$",
                    "10 digits + TQ + 4 digits",
                    "1234567890TQ0001",
                ),
                Shape::new(
                    GstHst,
                    r"^[0-9]{9}RT[0-9]{4}$",
                    "9 digits + RT + 4 digits",
                    "123456789RT0001",
                ),
            ],
        ),
        FormatRule::new(
            "US",
            vec![Shape::new(Ein, r"^[0-9]{9}$", "9 digits", "12-3456789")],
        ),
    ]
});

/// Returns the rule for an uppercase country code, or `None` when the
/// country is unmodeled. `EL` finds the Greek rule.
pub fn rule_for(country: &str) -> Option<&'static FormatRule> {
    // Greece's VAT code doubles as a country code.
    let country = if country == "EL" { "GR" } else { country };
    RULES.iter().find(|rule| rule.country == country)
}

/// Returns every rule in the table, in table order.
pub fn all_rules() -> &'static [FormatRule] {
    &RULES
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
