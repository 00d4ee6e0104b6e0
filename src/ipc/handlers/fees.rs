use serde_json::json;

use crate::fees;
use crate::ipc::error::{engine_err, err, ok};
use crate::ipc::types::Request;
use crate::models::FeeRecord;

/// Ingestion boundary for fee ledgers: amounts must be finite and
/// non-negative before any sums run.
pub(crate) fn parse_fee_records(
    req: &Request,
    key: &str,
) -> Result<Vec<FeeRecord>, serde_json::Value> {
    let Some(raw) = req.params.get(key) else {
        return Err(err(&req.id, "bad_params", format!("missing {}", key), None));
    };
    let records: Vec<FeeRecord> = serde_json::from_value(raw.clone())
        .map_err(|e| err(&req.id, "bad_params", format!("{}: {}", key, e), None))?;
    for (index, record) in records.iter().enumerate() {
        if !record.due.is_finite() || record.due < 0.0 {
            return Err(err(
                &req.id,
                "bad_params",
                "due must be a non-negative amount",
                Some(json!({ "index": index, "due": record.due })),
            ));
        }
        if !record.paid.is_finite() || record.paid < 0.0 {
            return Err(err(
                &req.id,
                "bad_params",
                "paid must be a non-negative amount",
                Some(json!({ "index": index, "paid": record.paid })),
            ));
        }
    }
    Ok(records)
}

fn handle_summary(req: &Request) -> serde_json::Value {
    let records = match parse_fee_records(req, "records") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match fees::collection_summary(&records) {
        Ok(summary) => match serde_json::to_value(&summary) {
            Ok(v) => ok(&req.id, v),
            Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
        },
        Err(e) => engine_err(&req.id, e),
    }
}

fn handle_monthly_collection(req: &Request) -> serde_json::Value {
    let records = match parse_fee_records(req, "records") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let months = fees::monthly_collection(&records);
    ok(&req.id, json!({ "months": months }))
}

pub fn try_handle(req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fees.summary" => Some(handle_summary(req)),
        "fees.monthlyCollection" => Some(handle_monthly_collection(req)),
        _ => None,
    }
}
