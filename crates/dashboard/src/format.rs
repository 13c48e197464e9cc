// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Display helpers for the transaction table

const HASH_EDGE: usize = 8;
const MISSING: &str = "-";

/// Show the first and last 8 characters of a hash, or `N/A` when empty
pub fn truncate_hash(hash: &str) -> String {
    if hash.is_empty() {
        return "N/A".to_string();
    }

    let chars: Vec<char> = hash.chars().collect();
    let head: String = chars.iter().take(HASH_EDGE).collect();
    let tail: String = chars[chars.len().saturating_sub(HASH_EDGE)..].iter().collect();

    format!("{head}...{tail}")
}

/// Fee with 8 decimal places
pub fn format_fee(fee: f64) -> String {
    format!("{fee:.8}")
}

/// Fee rate with 1 decimal place
pub fn format_fee_rate(fee_rate: f64) -> String {
    format!("{fee_rate:.1}")
}

/// Relative age of `timestamp` at `now`, both in epoch seconds
///
/// A zero timestamp renders as `-`; timestamps in the future count as "Just now".
pub fn format_relative_time(timestamp: u64, now: u64) -> String {
    if timestamp == 0 {
        return MISSING.to_string();
    }

    match now.saturating_sub(timestamp) {
        diff if diff < 60 => "Just now".to_string(),
        diff if diff < 3_600 => format!("{}m ago", diff / 60),
        diff if diff < 86_400 => format!("{}h ago", diff / 3_600),
        diff => format!("{}d ago", diff / 86_400),
    }
}

/// Integer with thousands separators, or `-` for zero
pub fn format_count(value: u64) -> String {
    if value == 0 {
        return MISSING.to_string();
    }

    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Confirmation count, or `Pending` when unconfirmed
pub fn format_confirmations(confirmations: u64) -> String {
    if confirmations == 0 {
        "Pending".to_string()
    } else {
        confirmations.to_string()
    }
}

/// Input/output counts as `in/out`, with `?` for unknown counts
pub fn format_io(inputs: u64, outputs: u64) -> String {
    let show = |count: u64| {
        if count == 0 {
            "?".to_string()
        } else {
            count.to_string()
        }
    };
    format!("{}/{}", show(inputs), show(outputs))
}
