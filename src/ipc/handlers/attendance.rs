use serde_json::json;

use crate::attendance;
use crate::ipc::error::{engine_err, err, ok};
use crate::ipc::types::Request;
use crate::models::AttendanceMark;

/// Ingestion boundary for attendance marks. Dates and statuses are validated
/// by the typed parse; anything else (`"sick"`, a malformed date) fails the
/// request before aggregation.
pub(crate) fn parse_marks(req: &Request) -> Result<Vec<AttendanceMark>, serde_json::Value> {
    let Some(raw) = req.params.get("marks") else {
        return Err(err(&req.id, "bad_params", "missing marks", None));
    };
    serde_json::from_value(raw.clone())
        .map_err(|e| err(&req.id, "bad_params", format!("marks: {}", e), None))
}

fn handle_summary(req: &Request) -> serde_json::Value {
    let marks = match parse_marks(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let rate = match attendance::attendance_rate(&marks) {
        Ok(v) => v,
        Err(e) => return engine_err(&req.id, e),
    };
    let counts = attendance::count_by_status(&marks);
    ok(
        &req.id,
        json!({
            "attendanceRate": rate,
            "counts": counts,
            "totalDays": counts.total(),
        }),
    )
}

fn handle_monthly_breakdown(req: &Request) -> serde_json::Value {
    let marks = match parse_marks(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let months = attendance::monthly_breakdown(&marks);
    ok(&req.id, json!({ "months": months }))
}

pub fn try_handle(req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.summary" => Some(handle_summary(req)),
        "attendance.monthlyBreakdown" => Some(handle_monthly_breakdown(req)),
        _ => None,
    }
}
