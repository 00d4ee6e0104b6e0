
use serde_json::json;
use test_support::{error_code, request_err, request_ok, spawn_sidecar};

fn csv_of(result: &serde_json::Value) -> Vec<String> {
    result
        .get("csv")
        .and_then(|v| v.as_str())
        .expect("csv string")
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn grade_distribution_exports_all_twelve_bands() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "reports.exportCsv",
        json!({ "kind": "gradeDistribution", "records": [
            { "subject": "Math", "term": "Term 2, 2025", "score": 85.0 },
            { "subject": "English", "term": "Term 2, 2025", "score": 60.0 }
        ] }),
    );
    assert_eq!(
        result.get("kind").and_then(|v| v.as_str()),
        Some("gradeDistribution")
    );
    let lines = csv_of(&result);
    assert_eq!(lines.len(), 13, "header plus twelve grade rows");
    assert_eq!(lines[0], "grade,count");
    assert_eq!(lines[1], "A,1");
    assert!(lines.contains(&"B-,1".to_string()));
    assert!(lines.contains(&"E,0".to_string()));
}

#[test]
fn group_averages_export_keeps_first_seen_order() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "reports.exportCsv",
        json!({ "kind": "groupAverages", "records": [
            { "subject": "Math", "term": "Term 2, 2025", "score": 75.0 },
            { "subject": "Math", "term": "Term 2, 2025", "score": 85.0 },
            { "subject": "English", "term": "Term 2, 2025", "score": 60.0 }
        ] }),
    );
    let lines = csv_of(&result);
    assert_eq!(lines[0], "group,average,count");
    assert_eq!(lines[1], "Math,80.00,2");
    assert_eq!(lines[2], "English,60.00,1");
}

#[test]
fn monthly_attendance_export_is_chronological() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "reports.exportCsv",
        json!({ "kind": "monthlyAttendance", "marks": [
            { "date": "2025-01-15", "status": "present" },
            { "date": "2024-12-20", "status": "absent" }
        ] }),
    );
    let lines = csv_of(&result);
    assert_eq!(lines[0], "month,present,absent,late,attendanceRate");
    assert_eq!(lines[1], "Dec 2024,0,1,0,0.0");
    assert_eq!(lines[2], "Jan 2025,1,0,0,100.0");
}

#[test]
fn unknown_export_kind_is_bad_params() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let error = request_err(
        &mut stdin,
        &mut reader,
        "1",
        "reports.exportCsv",
        json!({ "kind": "seatingChart", "records": [] }),
    );
    assert_eq!(error_code(&error), "bad_params");
}
