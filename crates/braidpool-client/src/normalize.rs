// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Category and work normalization
//!
//! Both normalizers are total: any input, including absent or malformed values,
//! maps to a well-defined output.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use shared_types::TransactionCategory;

use crate::config::CategoryMatching;

/// Hash-rate unit assumed when the payload does not name one
pub const DEFAULT_WORK_UNIT: &str = "TH";

// Checked in order; the first stem contained in the input wins.
const SUBSTRING_RULES: [(&str, TransactionCategory); 6] = [
    ("confirm", TransactionCategory::Confirmed),
    ("schedule", TransactionCategory::Scheduled),
    ("propose", TransactionCategory::Proposed),
    ("commit", TransactionCategory::Committed),
    ("mempool", TransactionCategory::Mempool),
    ("replace", TransactionCategory::Replaced),
];

static WORK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9.]+)\s*([TPE]H)?").expect("work pattern is valid"));

/// Work magnitude together with its hash-rate unit
#[derive(Debug, Clone, PartialEq)]
pub struct Work {
    /// Numeric magnitude
    pub magnitude: f64,
    /// Upper-case unit (`TH`, `PH`, `EH`)
    pub unit: String,
}

impl Work {
    /// Work expressed in the default unit
    pub fn in_default_unit(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: DEFAULT_WORK_UNIT.to_string(),
        }
    }
}

impl Default for Work {
    fn default() -> Self {
        Self::in_default_unit(0.0)
    }
}

/// Map a free-form category string onto one of the known categories
///
/// Absent, empty and unrecognized input all map to
/// [`TransactionCategory::Mempool`].
pub fn normalize_category(
    category: Option<&str>,
    matching: CategoryMatching,
) -> TransactionCategory {
    let Some(category) = category else {
        return TransactionCategory::default();
    };

    match matching {
        CategoryMatching::Exact => category.parse().unwrap_or_default(),
        CategoryMatching::Substring => {
            let lowered = category.to_lowercase();
            SUBSTRING_RULES
                .iter()
                .find(|(stem, _)| lowered.contains(stem))
                .map_or_else(TransactionCategory::default, |(_, category)| *category)
        }
    }
}

/// Parse a work value that may be a number, a unit-suffixed string, or absent
pub fn parse_work(work: Option<&Value>) -> Work {
    match work {
        Some(Value::Number(number)) => Work::in_default_unit(number.as_f64().unwrap_or_default()),
        Some(Value::String(text)) => parse_work_str(text),
        _ => Work::default(),
    }
}

/// Parse a work string such as `"250 PH"` or `"12.5eh"`
pub fn parse_work_str(text: &str) -> Work {
    let Some(captures) = WORK_PATTERN.captures(text) else {
        return Work::default();
    };
    let Some(magnitude) = leading_decimal(&captures[1]) else {
        return Work::default();
    };

    let unit = captures
        .get(2)
        .map_or_else(|| DEFAULT_WORK_UNIT.to_string(), |unit| unit.as_str().to_ascii_uppercase());

    Work { magnitude, unit }
}

/// Reads the longest `digits[.digits]` prefix, so `"1.2.3"` yields 1.2.
fn leading_decimal(digits: &str) -> Option<f64> {
    let end = digits
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map_or(digits.len(), |(index, _)| index);

    digits[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn exact(category: Option<&str>) -> TransactionCategory {
        normalize_category(category, CategoryMatching::Exact)
    }

    fn substring(category: &str) -> TransactionCategory {
        normalize_category(Some(category), CategoryMatching::Substring)
    }

    #[test]
    fn exact_matches_canonical_names_in_any_case() {
        for category in TransactionCategory::all() {
            let name = category.as_str();
            assert_eq!(exact(Some(name)), *category);
            assert_eq!(exact(Some(&name.to_uppercase())), *category);
            assert_eq!(exact(Some(&format!("  {name}\t"))), *category);
        }
        assert_eq!(exact(Some("unconfirmed")), TransactionCategory::Mempool);
    }

    #[test]
    fn exact_defaults_to_mempool() {
        for input in [
            Some("unknown"),
            Some(""),
            Some("   "),
            Some("confirming"),
            Some("unconfirmed-foo"),
            None,
        ] {
            assert_eq!(exact(input), TransactionCategory::Mempool, "{input:?}");
        }
    }

    #[test]
    fn substring_policy_matches_stems() {
        assert_eq!(substring("confirming"), TransactionCategory::Confirmed);
        assert_eq!(substring("Schedule"), TransactionCategory::Scheduled);
        assert_eq!(substring("PROPOSE"), TransactionCategory::Proposed);
        assert_eq!(substring("COMMIT"), TransactionCategory::Committed);
        assert_eq!(substring("replaced-by-fee"), TransactionCategory::Replaced);
        assert_eq!(substring("confirm-pending"), TransactionCategory::Confirmed);
        assert_eq!(substring("unknown"), TransactionCategory::Mempool);
        assert_eq!(
            normalize_category(None, CategoryMatching::Substring),
            TransactionCategory::Mempool
        );
    }

    #[test]
    fn work_absent_or_null() {
        assert_eq!(parse_work(None), Work::in_default_unit(0.0));
        assert_eq!(parse_work(Some(&Value::Null)), Work::in_default_unit(0.0));
        assert_eq!(parse_work(Some(&json!(true))), Work::default());
    }

    #[test]
    fn work_numeric_uses_default_unit() {
        assert_eq!(parse_work(Some(&json!(150))), Work::in_default_unit(150.0));
        assert_eq!(parse_work(Some(&json!(0.25))), Work::in_default_unit(0.25));
    }

    #[test]
    fn work_string_with_unit() {
        let work = parse_work(Some(&json!("250 PH")));
        assert_eq!(work.magnitude, 250.0);
        assert_eq!(work.unit, "PH");

        let work = parse_work_str("12.5eh");
        assert_eq!(work.magnitude, 12.5);
        assert_eq!(work.unit, "EH");

        let work = parse_work_str("100");
        assert_eq!(work, Work::in_default_unit(100.0));
    }

    #[test]
    fn work_string_without_number() {
        assert_eq!(parse_work(Some(&json!("abc"))), Work::default());
        assert_eq!(parse_work_str("."), Work::default());
        assert_eq!(parse_work_str(""), Work::default());
    }

    #[test]
    fn work_string_reads_leading_decimal() {
        let work = parse_work_str("1.2.3 PH");
        assert_eq!(work.magnitude, 1.2);
        assert_eq!(work.unit, "PH");

        assert_eq!(parse_work_str("about 7 TH").magnitude, 7.0);
    }

    #[test]
    fn work_string_reads_ascii_digits_only() {
        let work = parse_work_str("\u{663} then 5 PH");
        assert_eq!(work.magnitude, 5.0);
        assert_eq!(work.unit, "PH");
    }
}
