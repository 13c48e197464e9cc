// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Conversion of loosely-typed node records into strict [`Transaction`]s
//!
//! The node payload is untrusted: every field except `txid` may be missing,
//! `null`, or of an unexpected type. Fields of the wrong type are treated as
//! absent and replaced with their defaults, so conversion never fails for a
//! record that carries a txid. Records without one are skipped.

use serde::Deserialize;
use serde_json::Value;
use serde_with::{DefaultOnError, serde_as};
use shared_types::{Transaction, TransactionInput, TransactionOutput, TransactionStatus};
use tracing::warn;

use crate::{
    config::CategoryMatching,
    normalize::{normalize_category, parse_work},
};

/// Transaction record as served by the node API
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiTransaction {
    txid: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    hash: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    category: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    size: Option<f64>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    weight: Option<f64>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    fee: Option<f64>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    fee_rate: Option<f64>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    inputs: Option<f64>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    outputs: Option<f64>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    confirmations: Option<f64>,
    #[serde(default)]
    work: Option<Value>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    work_unit: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    timestamp: Option<f64>,
    #[serde(default)]
    rbf_signaled: Option<Value>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    status: Option<TransactionStatus>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    vin: Option<Vec<Value>>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    vout: Option<Vec<Value>>,
}

/// Convert one node record into a strict transaction
///
/// `now` (epoch seconds) stands in for a missing timestamp.
pub(crate) fn transform_transaction(
    tx: ApiTransaction,
    now: u64,
    matching: CategoryMatching,
) -> Transaction {
    let work = parse_work(tx.work.as_ref());
    let confirmations = whole_number(tx.confirmations);
    let hash = tx
        .hash
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| tx.txid.clone());

    Transaction {
        txid: tx.txid,
        hash,
        category: normalize_category(tx.category.as_deref(), matching),
        size: whole_number(tx.size),
        weight: whole_number(tx.weight),
        fee: tx.fee.unwrap_or_default(),
        fee_rate: tx.fee_rate.unwrap_or_default(),
        inputs: whole_number(tx.inputs),
        outputs: whole_number(tx.outputs),
        confirmations,
        work: work.magnitude,
        work_unit: tx
            .work_unit
            .filter(|unit| !unit.is_empty())
            .unwrap_or(work.unit),
        vin: tx
            .vin
            .unwrap_or_default()
            .iter()
            .map(TransactionInput::from_value)
            .collect(),
        vout: tx
            .vout
            .unwrap_or_default()
            .iter()
            .map(TransactionOutput::from_value)
            .collect(),
        status: tx
            .status
            .unwrap_or_else(|| TransactionStatus::from_confirmations(confirmations)),
        timestamp: Some(whole_number(tx.timestamp))
            .filter(|ts| *ts > 0)
            .unwrap_or(now),
        rbf_signaled: tx.rbf_signaled.as_ref().is_some_and(is_truthy),
    }
}

/// Convert a raw node payload, preserving order and skipping records without a txid
pub fn transform_records(
    records: Vec<Value>,
    now: u64,
    matching: CategoryMatching,
) -> Vec<Transaction> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            match serde_json::from_value::<ApiTransaction>(record) {
                Ok(tx) => Some(transform_transaction(tx, now, matching)),
                Err(error) => {
                    warn!(index, %error, "skipping transaction record without a usable txid");
                    None
                }
            }
        })
        .collect()
}

/// Counts may arrive as `250` or `250.0`; fractions truncate and negatives read as 0
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: Option<f64>) -> u64 {
    value
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map_or(0, |n| n as u64)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared_types::TransactionCategory;

    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn transform(record: Value) -> Transaction {
        let mut transformed = transform_records(vec![record], NOW, CategoryMatching::Exact);
        assert_eq!(transformed.len(), 1);
        transformed.remove(0)
    }

    #[test]
    fn full_record() {
        let tx = transform(json!({
            "txid": "abc123",
            "hash": "abc123hash",
            "category": "mempool",
            "size": 250,
            "weight": 1000,
            "fee": 0.000_01,
            "fee_rate": 10.5,
            "inputs": 2,
            "outputs": 3,
            "confirmations": 0,
            "work": "100 TH",
            "work_unit": "TH",
            "timestamp": 1_234_567_890,
            "rbf_signaled": true,
            "status": { "confirmed": false },
            "vin": [{ "txid": "input1", "vout": 0, "sequence": 4_294_967_295_u32 }],
            "vout": [{ "value": 1_000_000, "scriptpubkey_type": "p2pkh" }]
        }));

        assert_eq!(tx.txid, "abc123");
        assert_eq!(tx.hash, "abc123hash");
        assert_eq!(tx.category, TransactionCategory::Mempool);
        assert_eq!(tx.size, 250);
        assert_eq!(tx.weight, 1000);
        assert_eq!(tx.inputs, 2);
        assert_eq!(tx.outputs, 3);
        assert_eq!(tx.work, 100.0);
        assert_eq!(tx.work_unit, "TH");
        assert_eq!(tx.timestamp, 1_234_567_890);
        assert!(tx.rbf_signaled);
        assert!(!tx.status.confirmed);
        assert_eq!(tx.vin.len(), 1);
        assert_eq!(tx.vin[0].txid, "input1");
        assert_eq!(tx.vout.len(), 1);
        assert_eq!(tx.vout[0].scriptpubkey_type, "p2pkh");
    }

    #[test]
    fn minimal_record_gets_defaults() {
        let tx = transform(json!({ "txid": "x", "confirmations": 0 }));

        assert_eq!(tx.hash, "x");
        assert_eq!(tx.category, TransactionCategory::Mempool);
        assert_eq!(tx.size, 0);
        assert_eq!(tx.weight, 0);
        assert_eq!(tx.fee, 0.0);
        assert_eq!(tx.fee_rate, 0.0);
        assert_eq!(tx.inputs, 0);
        assert_eq!(tx.outputs, 0);
        assert_eq!(tx.confirmations, 0);
        assert_eq!(tx.work, 0.0);
        assert_eq!(tx.work_unit, "TH");
        assert!(!tx.rbf_signaled);
        assert!(tx.vin.is_empty());
        assert!(tx.vout.is_empty());
        assert_eq!(tx.timestamp, NOW);
        assert_eq!(tx.status, TransactionStatus::from_confirmations(0));
    }

    #[test]
    fn malformed_fields_are_treated_as_absent() {
        let tx = transform(json!({
            "txid": "bad",
            "hash": 7,
            "size": "large",
            "fee": null,
            "fee_rate": [1],
            "confirmations": -3,
            "timestamp": "yesterday",
            "status": { "block_height": 5 },
            "vin": "none",
            "vout": { "value": 1 }
        }));

        assert_eq!(tx.hash, "bad");
        assert_eq!(tx.size, 0);
        assert_eq!(tx.fee, 0.0);
        assert_eq!(tx.fee_rate, 0.0);
        assert_eq!(tx.confirmations, 0);
        assert_eq!(tx.timestamp, NOW);
        assert!(!tx.status.confirmed);
        assert!(tx.vin.is_empty());
        assert!(tx.vout.is_empty());
    }

    #[test]
    fn whole_numbers_written_as_floats() {
        let tx = transform(json!({
            "txid": "f",
            "size": 250.0,
            "weight": 1000.0,
            "inputs": 2.0,
            "outputs": 3.7,
            "confirmations": 3.0,
            "timestamp": 1_600_000_000.5
        }));

        assert_eq!(tx.size, 250);
        assert_eq!(tx.weight, 1000);
        assert_eq!(tx.inputs, 2);
        assert_eq!(tx.outputs, 3);
        assert_eq!(tx.confirmations, 3);
        assert!(tx.status.confirmed);
        assert_eq!(tx.timestamp, 1_600_000_000);
    }

    #[test]
    fn status_defaults_from_confirmations() {
        let tx = transform(json!({ "txid": "c", "confirmations": 6 }));
        assert!(tx.status.confirmed);
        assert!(tx.status.block_height.is_none());
    }

    #[test]
    fn empty_hash_and_zero_timestamp_fall_back() {
        let tx = transform(json!({ "txid": "t", "hash": "", "timestamp": 0 }));
        assert_eq!(tx.hash, "t");
        assert_eq!(tx.timestamp, NOW);
    }

    #[test]
    fn explicit_work_unit_overrides_parsed_unit() {
        let tx = transform(json!({ "txid": "w", "work": "3 EH", "work_unit": "PH" }));
        assert_eq!(tx.work, 3.0);
        assert_eq!(tx.work_unit, "PH");

        let tx = transform(json!({ "txid": "w", "work": "3 EH", "work_unit": "" }));
        assert_eq!(tx.work_unit, "EH");
    }

    #[test]
    fn rbf_flag_is_coerced() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(false), false),
            (json!(1), true),
            (json!(0), false),
            (json!("yes"), true),
            (json!(""), false),
            (json!(null), false),
            (json!({}), true),
        ] {
            let tx = transform(json!({ "txid": "r", "rbf_signaled": raw }));
            assert_eq!(tx.rbf_signaled, expected, "{raw}");
        }
    }

    #[test]
    fn records_without_txid_are_skipped() {
        let transformed = transform_records(
            vec![
                json!({ "txid": "first" }),
                json!({ "hash": "orphan" }),
                json!(42),
                json!({ "txid": 9 }),
                json!({ "txid": "second" }),
            ],
            NOW,
            CategoryMatching::Exact,
        );

        let ids: Vec<_> = transformed.iter().map(|tx| tx.txid.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[test]
    fn category_policy_is_applied() {
        let records = vec![json!({ "txid": "p", "category": "confirming" })];

        let exact = transform_records(records.clone(), NOW, CategoryMatching::Exact);
        assert_eq!(exact[0].category, TransactionCategory::Mempool);

        let substring = transform_records(records, NOW, CategoryMatching::Substring);
        assert_eq!(substring[0].category, TransactionCategory::Confirmed);
    }
}
