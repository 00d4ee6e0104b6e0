use serde_json::json;

use crate::ipc::error::{engine_err, err, ok};
use crate::ipc::types::Request;
use crate::trend::{self, TrendPoint};
use crate::{attendance, export, fees, stats};

use super::{attendance as attendance_params, fees as fee_params, grades as grade_params};

fn parse_trend_points(req: &Request) -> Result<Vec<TrendPoint>, serde_json::Value> {
    let Some(raw) = req.params.get("points") else {
        return Err(err(&req.id, "bad_params", "missing points", None));
    };
    serde_json::from_value(raw.clone())
        .map_err(|e| err(&req.id, "bad_params", format!("points: {}", e), None))
}

fn handle_trend(req: &Request) -> serde_json::Value {
    let points = match parse_trend_points(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let points = trend::build_trend(points);
    ok(&req.id, json!({ "points": points }))
}

fn performance_section(req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let records = grade_params::parse_records(req)?;
    let pass_mark = grade_params::parse_pass_mark(req)?;
    let summary = stats::summarize(&records).map_err(|e| engine_err(&req.id, e))?;
    let pass_rate =
        stats::pass_rate(&records, pass_mark).map_err(|e| engine_err(&req.id, e))?;
    let subjects = grade_params::grouped_averages(req, &records, "subject")?;
    Ok(json!({
        "average": summary.average,
        "median": summary.median,
        "count": summary.count,
        "passRate": pass_rate,
        "distribution": summary.distribution,
        "mostCommonGrade": stats::most_common_grade(&summary.distribution),
        "subjectAverages": subjects,
    }))
}

fn attendance_section(req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let marks = attendance_params::parse_marks(req)?;
    let rate = attendance::attendance_rate(&marks).map_err(|e| engine_err(&req.id, e))?;
    let counts = attendance::count_by_status(&marks);
    Ok(json!({
        "attendanceRate": rate,
        "counts": counts,
        "totalDays": counts.total(),
        "monthly": attendance::monthly_breakdown(&marks),
    }))
}

fn fees_section(req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let records = fee_params::parse_fee_records(req, "fees")?;
    let summary = fees::collection_summary(&records).map_err(|e| engine_err(&req.id, e))?;
    Ok(json!({
        "totalDue": summary.total_due,
        "totalPaid": summary.total_paid,
        "outstanding": summary.outstanding,
        "collectionRate": summary.collection_rate,
        "monthly": fees::monthly_collection(&records),
    }))
}

/// One combined report over whichever collections the request supplies --
/// the sidecar's version of the dashboard's "Download Report" payload. A
/// supplied-but-empty collection still fails with `empty_input`: omitting a
/// section is the caller's explicit choice, an empty one is a mistake.
fn handle_analytics(req: &Request) -> serde_json::Value {
    let mut sections = serde_json::Map::new();
    if req.params.get("records").is_some() {
        match performance_section(req) {
            Ok(v) => {
                sections.insert("performance".to_string(), v);
            }
            Err(e) => return e,
        }
    }
    if req.params.get("marks").is_some() {
        match attendance_section(req) {
            Ok(v) => {
                sections.insert("attendance".to_string(), v);
            }
            Err(e) => return e,
        }
    }
    if req.params.get("fees").is_some() {
        match fees_section(req) {
            Ok(v) => {
                sections.insert("fees".to_string(), v);
            }
            Err(e) => return e,
        }
    }
    if sections.is_empty() {
        return err(
            &req.id,
            "bad_params",
            "provide at least one of: records, marks, fees",
            None,
        );
    }
    ok(&req.id, serde_json::Value::Object(sections))
}

fn render_csv(req: &Request, kind: &str) -> Result<String, serde_json::Value> {
    match kind {
        "gradeDistribution" => {
            let records = grade_params::parse_records(req)?;
            let dist = stats::grade_distribution(&records).map_err(|e| engine_err(&req.id, e))?;
            export::grade_distribution_csv(&dist).map_err(|e| render_err(req, e))
        }
        "groupAverages" => {
            let records = grade_params::parse_records(req)?;
            let group_by = req
                .params
                .get("groupBy")
                .and_then(|v| v.as_str())
                .unwrap_or("subject");
            let groups = grade_params::grouped_averages(req, &records, group_by)?;
            export::group_averages_csv(&groups).map_err(|e| render_err(req, e))
        }
        "monthlyAttendance" => {
            let marks = attendance_params::parse_marks(req)?;
            let months = attendance::monthly_breakdown(&marks);
            export::monthly_attendance_csv(&months).map_err(|e| render_err(req, e))
        }
        "monthlyCollection" => {
            let records = fee_params::parse_fee_records(req, "fees")?;
            let months = fees::monthly_collection(&records);
            export::monthly_collection_csv(&months).map_err(|e| render_err(req, e))
        }
        "trend" => {
            let points = trend::build_trend(parse_trend_points(req)?);
            export::trend_csv(&points).map_err(|e| render_err(req, e))
        }
        other => Err(err(
            &req.id,
            "bad_params",
            "kind must be one of: gradeDistribution, groupAverages, monthlyAttendance, monthlyCollection, trend",
            Some(json!({ "kind": other })),
        )),
    }
}

fn render_err(req: &Request, e: anyhow::Error) -> serde_json::Value {
    err(&req.id, "export_failed", e.to_string(), None)
}

fn handle_export_csv(req: &Request) -> serde_json::Value {
    let Some(kind) = req.params.get("kind").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing kind", None);
    };
    match render_csv(req, kind) {
        Ok(csv) => ok(&req.id, json!({ "kind": kind, "csv": csv })),
        Err(e) => e,
    }
}

pub fn try_handle(req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.trend" => Some(handle_trend(req)),
        "reports.analytics" => Some(handle_analytics(req)),
        "reports.exportCsv" => Some(handle_export_csv(req)),
        _ => None,
    }
}
