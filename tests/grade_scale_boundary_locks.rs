
use serde_json::json;
use test_support::{request_ok, spawn_sidecar};

fn grade_of(
    stdin: &mut std::process::ChildStdin,
    reader: &mut std::io::BufReader<std::process::ChildStdout>,
    id: &str,
    score: f64,
) -> String {
    let result = request_ok(stdin, reader, id, "grades.gradeFor", json!({ "score": score }));
    result
        .get("grade")
        .and_then(|v| v.as_str())
        .expect("grade in result")
        .to_string()
}

#[test]
fn every_threshold_is_lower_inclusive() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let locks = [
        (80.0, "A"),
        (75.0, "A-"),
        (70.0, "B+"),
        (65.0, "B"),
        (60.0, "B-"),
        (55.0, "C+"),
        (50.0, "C"),
        (45.0, "C-"),
        (40.0, "D+"),
        (35.0, "D"),
        (30.0, "D-"),
        (0.0, "E"),
    ];
    for (i, (score, expected)) in locks.iter().enumerate() {
        let id = format!("at-{}", i);
        assert_eq!(
            grade_of(&mut stdin, &mut reader, &id, *score),
            *expected,
            "score {}",
            score
        );
    }
    // A hair below each boundary lands in the band below.
    let below = [
        (79.999, "A-"),
        (74.999, "B+"),
        (69.999, "B"),
        (64.999, "B-"),
        (59.999, "C+"),
        (54.999, "C"),
        (49.999, "C-"),
        (44.999, "D+"),
        (39.999, "D"),
        (34.999, "D-"),
        (29.999, "E"),
    ];
    for (i, (score, expected)) in below.iter().enumerate() {
        let id = format!("below-{}", i);
        assert_eq!(
            grade_of(&mut stdin, &mut reader, &id, *score),
            *expected,
            "score {}",
            score
        );
    }
}

#[test]
fn out_of_range_lookups_saturate_to_the_end_grades() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    assert_eq!(grade_of(&mut stdin, &mut reader, "1", 100.0), "A");
    assert_eq!(grade_of(&mut stdin, &mut reader, "2", 112.0), "A");
    assert_eq!(grade_of(&mut stdin, &mut reader, "3", -4.5), "E");
}

#[test]
fn scale_lists_all_twelve_bands_best_first() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let result = request_ok(&mut stdin, &mut reader, "1", "grades.scale", json!({}));
    let bands = result.get("bands").and_then(|v| v.as_array()).expect("bands");
    assert_eq!(bands.len(), 12);
    assert_eq!(bands[0].get("grade").and_then(|v| v.as_str()), Some("A"));
    assert_eq!(bands[0].get("floor").and_then(|v| v.as_f64()), Some(80.0));
    assert_eq!(bands[11].get("grade").and_then(|v| v.as_str()), Some("E"));
    let floors: Vec<f64> = bands
        .iter()
        .map(|b| b.get("floor").and_then(|v| v.as_f64()).unwrap())
        .collect();
    for pair in floors.windows(2) {
        assert!(pair[0] > pair[1], "floors must descend: {:?}", floors);
    }
}
