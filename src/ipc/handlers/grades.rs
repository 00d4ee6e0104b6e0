use serde_json::json;

use crate::grade::{self, GRADES};
use crate::ipc::error::{engine_err, err, ok};
use crate::ipc::types::Request;
use crate::models::ScoredRecord;
use crate::stats;

/// Ingestion boundary for score collections: shape-checks the payload and
/// rejects out-of-range scores before any aggregation runs. The grade scale
/// itself saturates, but a record collection with a score outside [0,100] is
/// a data-entry mistake and must not be averaged away.
pub(crate) fn parse_records(req: &Request) -> Result<Vec<ScoredRecord>, serde_json::Value> {
    let Some(raw) = req.params.get("records") else {
        return Err(err(&req.id, "bad_params", "missing records", None));
    };
    let records: Vec<ScoredRecord> = serde_json::from_value(raw.clone())
        .map_err(|e| err(&req.id, "bad_params", format!("records: {}", e), None))?;
    for (index, record) in records.iter().enumerate() {
        if !(0.0..=100.0).contains(&record.score) {
            return Err(err(
                &req.id,
                "invalid_score",
                "score must be within 0..=100",
                Some(json!({ "index": index, "score": record.score })),
            ));
        }
    }
    Ok(records)
}

pub(crate) fn parse_pass_mark(req: &Request) -> Result<f64, serde_json::Value> {
    match req.params.get("passMark") {
        None => Ok(50.0),
        Some(v) if v.is_null() => Ok(50.0),
        Some(v) => v
            .as_f64()
            .filter(|m| (0.0..=100.0).contains(m))
            .ok_or_else(|| {
                err(
                    &req.id,
                    "bad_params",
                    "passMark must be a number within 0..=100",
                    None,
                )
            }),
    }
}

fn group_key_fn(group_by: &str) -> Option<fn(&ScoredRecord) -> Option<String>> {
    match group_by {
        "subject" => Some(|r| Some(r.subject.clone())),
        "term" => Some(|r| Some(r.term.clone())),
        _ => None,
    }
}

pub(crate) fn grouped_averages(
    req: &Request,
    records: &[ScoredRecord],
    group_by: &str,
) -> Result<Vec<stats::GroupAverage>, serde_json::Value> {
    let Some(key_fn) = group_key_fn(group_by) else {
        return Err(err(
            &req.id,
            "bad_params",
            "groupBy must be one of: subject, term",
            Some(json!({ "groupBy": group_by })),
        ));
    };
    stats::group_averages(records, key_fn).map_err(|e| engine_err(&req.id, e))
}

fn handle_grade_for(req: &Request) -> serde_json::Value {
    let Some(score) = req.params.get("score").and_then(|v| v.as_f64()) else {
        return err(&req.id, "bad_params", "missing score", None);
    };
    match grade::grade_for(score) {
        Ok(grade) => ok(&req.id, json!({ "score": score, "grade": grade })),
        Err(e) => engine_err(&req.id, e),
    }
}

fn handle_scale(req: &Request) -> serde_json::Value {
    let bands: Vec<serde_json::Value> = GRADES
        .iter()
        .map(|g| json!({ "grade": g, "floor": g.floor() }))
        .collect();
    ok(&req.id, json!({ "bands": bands }))
}

fn handle_summary(req: &Request) -> serde_json::Value {
    let records = match parse_records(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let pass_mark = match parse_pass_mark(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let summary = match stats::summarize(&records) {
        Ok(v) => v,
        Err(e) => return engine_err(&req.id, e),
    };
    let pass_rate = match stats::pass_rate(&records, pass_mark) {
        Ok(v) => v,
        Err(e) => return engine_err(&req.id, e),
    };
    let most_common = stats::most_common_grade(&summary.distribution);
    ok(
        &req.id,
        json!({
            "average": summary.average,
            "median": summary.median,
            "count": summary.count,
            "passRate": pass_rate,
            "distribution": summary.distribution,
            "mostCommonGrade": most_common,
        }),
    )
}

fn handle_distribution(req: &Request) -> serde_json::Value {
    let records = match parse_records(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match stats::grade_distribution(&records) {
        Ok(dist) => {
            let total = dist.total();
            ok(&req.id, json!({ "distribution": dist, "total": total }))
        }
        Err(e) => engine_err(&req.id, e),
    }
}

fn handle_group_averages(req: &Request) -> serde_json::Value {
    let records = match parse_records(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let group_by = req
        .params
        .get("groupBy")
        .and_then(|v| v.as_str())
        .unwrap_or("subject");
    match grouped_averages(req, &records, group_by) {
        Ok(groups) => ok(&req.id, json!({ "groups": groups })),
        Err(e) => e,
    }
}

pub fn try_handle(req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.gradeFor" => Some(handle_grade_for(req)),
        "grades.scale" => Some(handle_scale(req)),
        "grades.summary" => Some(handle_summary(req)),
        "grades.distribution" => Some(handle_distribution(req)),
        "grades.groupAverages" => Some(handle_group_averages(req)),
        _ => None,
    }
}
