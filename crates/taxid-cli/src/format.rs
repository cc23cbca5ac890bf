/// Result formatting: human-readable and JSON modes.
///
/// - **Human mode** (default): aligned key/value lines on stdout, the status
///   color-coded. Colors are disabled when `--no-color` is set, the
///   `NO_COLOR` environment variable is present (per <https://no-color.org>),
///   or stdout is not a TTY.
/// - **JSON mode**: one JSON object per command on stdout, never colored.
use std::io::{self, IsTerminal as _, Write};

use taxid_core::{FormatRule, Screening, ValidationResult, VerificationStatus};

use crate::cli::OutputFormat;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stdout.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    // NO_COLOR env var: presence of the variable (any value) disables color.
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

// ---------------------------------------------------------------------------
// ANSI escape sequences
// ---------------------------------------------------------------------------

const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_CYAN: &str = "\x1b[36m";
const ANSI_RESET: &str = "\x1b[0m";

fn status_color(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Verified => ANSI_GREEN,
        VerificationStatus::Invalid => ANSI_RED,
        VerificationStatus::FormatOnly => ANSI_YELLOW,
        VerificationStatus::Pending => ANSI_CYAN,
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// How command output is rendered, derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Human or JSON.
    pub format: OutputFormat,
    /// Whether ANSI colors are enabled (human mode only).
    pub colors: bool,
}

impl OutputConfig {
    /// Constructs an [`OutputConfig`] from the raw CLI flags.
    pub fn from_flags(format: OutputFormat, no_color_flag: bool) -> Self {
        Self {
            format,
            colors: format == OutputFormat::Human && colors_enabled(no_color_flag),
        }
    }

    fn paint(&self, status: VerificationStatus) -> String {
        if self.colors {
            format!("{}{status}{ANSI_RESET}", status_color(status))
        } else {
            status.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Validation results
// ---------------------------------------------------------------------------

/// What was validated, echoed alongside the result.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    /// Canonical form of the identifier.
    pub identifier: &'a str,
    /// Uppercase country code, or `None` for company numbers.
    pub country: Option<&'a str>,
}

/// Writes a validation result in the configured format.
pub fn write_result<W: Write>(
    w: &mut W,
    config: &OutputConfig,
    subject: Subject<'_>,
    result: &ValidationResult,
) -> io::Result<()> {
    match config.format {
        OutputFormat::Human => write_result_human(w, config, subject, result),
        OutputFormat::Json => write_result_json(w, subject, result),
    }
}

fn write_result_human<W: Write>(
    w: &mut W,
    config: &OutputConfig,
    subject: Subject<'_>,
    result: &ValidationResult,
) -> io::Result<()> {
    let identifier = if subject.identifier.is_empty() {
        "(none)"
    } else {
        subject.identifier
    };
    writeln!(w, "identifier:  {identifier}")?;
    if let Some(country) = subject.country {
        writeln!(w, "country:     {country}")?;
    }
    writeln!(w, "status:      {}", config.paint(result.status()))?;
    writeln!(w, "message:     {}", result.message())?;
    if let Some(name) = result.registered_name() {
        writeln!(w, "name:        {name}")?;
    }
    if let Some(address) = result.registered_address() {
        writeln!(w, "address:     {address}")?;
    }
    Ok(())
}

fn write_result_json<W: Write>(
    w: &mut W,
    subject: Subject<'_>,
    result: &ValidationResult,
) -> io::Result<()> {
    let mut value = serde_json::to_value(result)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "identifier".to_owned(),
            serde_json::Value::String(subject.identifier.to_owned()),
        );
        if let Some(country) = subject.country {
            obj.insert(
                "country".to_owned(),
                serde_json::Value::String(country.to_owned()),
            );
        }
    }
    serde_json::to_writer(&mut *w, &value)?;
    writeln!(w)
}

// ---------------------------------------------------------------------------
// Registration screening
// ---------------------------------------------------------------------------

/// Writes an accepted screening in the configured format.
pub fn write_screening<W: Write>(
    w: &mut W,
    config: &OutputConfig,
    screening: &Screening,
) -> io::Result<()> {
    if config.format == OutputFormat::Json {
        serde_json::to_writer(&mut *w, screening)?;
        return writeln!(w);
    }

    writeln!(w, "vat_status:  {}", config.paint(screening.vat_status))?;
    let Some(identity) = &screening.identity else {
        return writeln!(w, "identity:    (none supplied)");
    };
    writeln!(w, "number:      {}", identity.canonical_number)?;
    writeln!(w, "country:     {}", identity.country)?;
    if let Some(name) = &identity.registered_name {
        writeln!(w, "name:        {name}")?;
    }
    if let Some(address) = &identity.registered_address {
        writeln!(w, "address:     {address}")?;
    }
    match identity.payment_tax_id_type {
        Some(kind) => writeln!(w, "tax_id_type: {}", kind.as_str()),
        None => writeln!(w, "tax_id_type: (none)"),
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Writes format rules in the configured format.
pub fn write_rules<W: Write>(
    w: &mut W,
    config: &OutputConfig,
    rules: &[&FormatRule],
) -> io::Result<()> {
    if config.format == OutputFormat::Json {
        let list: Vec<serde_json::Value> = rules.iter().map(|r| rule_json(r)).collect();
        serde_json::to_writer(&mut *w, &serde_json::Value::Array(list))?;
        return writeln!(w);
    }

    for rule in rules {
        writeln!(w, "{}", rule.country)?;
        for shape in &rule.shapes {
            writeln!(
                w,
                "  {:<28} {} (e.g. {})",
                shape.kind.label(),
                shape.description,
                shape.example
            )?;
        }
    }
    Ok(())
}

fn rule_json(rule: &FormatRule) -> serde_json::Value {
    let shapes: Vec<serde_json::Value> = rule
        .shapes
        .iter()
        .map(|shape| {
            serde_json::json!({
                "kind": shape.kind.label(),
                "description": shape.description,
                "example": shape.example,
                "pattern": shape.pattern(),
            })
        })
        .collect();
    serde_json::json!({
        "country": rule.country,
        "shapes": shapes,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use taxid_core::rule_for;

    use super::*;

    fn plain(format: OutputFormat) -> OutputConfig {
        OutputConfig {
            format,
            colors: false,
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("write to Vec");
        String::from_utf8(buf).expect("utf8")
    }

    const BE: Subject<'static> = Subject {
        identifier: "BE0123456789",
        country: Some("BE"),
    };

    #[test]
    fn no_color_flag_disables_colors() {
        assert!(!colors_enabled(true));
    }

    #[test]
    fn json_config_never_colors() {
        let cfg = OutputConfig::from_flags(OutputFormat::Json, false);
        assert!(!cfg.colors);
    }

    #[test]
    fn human_result_lists_registry_details() {
        let result = ValidationResult::verified(
            Some("ACME SA".to_owned()),
            Some("Rue X 1, 1000 Brussels".to_owned()),
            "VAT verified via VIES",
        );
        let out = render(|w| write_result(w, &plain(OutputFormat::Human), BE, &result));
        assert!(out.contains("identifier:  BE0123456789"), "{out}");
        assert!(out.contains("status:      verified"), "{out}");
        assert!(out.contains("name:        ACME SA"), "{out}");
        assert!(out.contains("address:     Rue X 1, 1000 Brussels"), "{out}");
    }

    #[test]
    fn human_result_omits_absent_fields() {
        let result = ValidationResult::pending("VIES unavailable");
        let out = render(|w| write_result(w, &plain(OutputFormat::Human), BE, &result));
        assert!(!out.contains("name:"), "{out}");
        assert!(!out.contains("address:"), "{out}");
        assert!(!out.contains('\x1b'), "{out}");
    }

    #[test]
    fn human_result_colors_status_when_enabled() {
        let cfg = OutputConfig {
            format: OutputFormat::Human,
            colors: true,
        };
        let result = ValidationResult::format_rejected("bad");
        let out = render(|w| write_result(w, &cfg, BE, &result));
        assert!(out.contains(&format!("{ANSI_RED}invalid{ANSI_RESET}")), "{out}");
    }

    #[test]
    fn empty_identifier_is_shown_as_none() {
        let subject = Subject {
            identifier: "",
            country: Some("US"),
        };
        let result = ValidationResult::verified(None, None, "USA has no VAT");
        let out = render(|w| write_result(w, &plain(OutputFormat::Human), subject, &result));
        assert!(out.contains("identifier:  (none)"), "{out}");
    }

    #[test]
    fn json_result_is_one_object_with_subject() {
        let result = ValidationResult::format_only("No validator for this country");
        let out = render(|w| write_result(w, &plain(OutputFormat::Json), BE, &result));
        assert_eq!(out.lines().count(), 1);
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(v["identifier"], "BE0123456789");
        assert_eq!(v["country"], "BE");
        assert_eq!(v["status"], "format_only");
        assert_eq!(v["is_format_valid"], true);
        assert_eq!(v["is_verified"], false);
    }

    #[test]
    fn json_company_result_has_no_country() {
        let subject = Subject {
            identifier: "12345678",
            country: None,
        };
        let result = ValidationResult::pending("x");
        let out = render(|w| write_result(w, &plain(OutputFormat::Json), subject, &result));
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert!(v.get("country").is_none(), "{out}");
    }

    #[test]
    fn screening_without_identity() {
        let screening = Screening {
            vat_status: VerificationStatus::Pending,
            identity: None,
        };
        let out = render(|w| write_screening(w, &plain(OutputFormat::Human), &screening));
        assert!(out.contains("vat_status:  pending"), "{out}");
        assert!(out.contains("(none supplied)"), "{out}");
    }

    #[test]
    fn rules_human_lists_every_shape() {
        let ca = rule_for("CA").expect("CA rule");
        let out = render(|w| write_rules(w, &plain(OutputFormat::Human), &[ca]));
        assert!(out.starts_with("CA\n"), "{out}");
        assert_eq!(out.lines().count(), 1 + ca.shapes.len());
        assert!(out.contains("1234567890TQ0001"), "{out}");
    }

    #[test]
    fn rules_json_carries_patterns() {
        let gb = rule_for("GB").expect("GB rule");
        let out = render(|w| write_rules(w, &plain(OutputFormat::Json), &[gb]));
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(v[0]["country"], "GB");
        assert_eq!(v[0]["shapes"][0]["kind"], "VAT number");
        assert!(
            v[0]["shapes"][0]["pattern"]
                .as_str()
                .is_some_and(|p| p.contains("[0-9]{9}")),
            "{out}"
        );
    }
}
