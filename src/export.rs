//! CSV renderings of engine output for export collaborators.
//!
//! Headers and cells only: where the bytes end up (download, file, clipboard)
//! is the caller's concern, so everything here returns a `String`.

use anyhow::Result;

use crate::attendance::MonthlyAttendance;
use crate::fees::MonthlyCollection;
use crate::stats::{GradeDistribution, GroupAverage};
use crate::trend::TrendPoint;

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush csv buffer: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// `grade,count` rows in scale order, all twelve grades present.
pub fn grade_distribution_csv(dist: &GradeDistribution) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["grade", "count"])?;
    for (grade, count) in dist.iter() {
        writer.write_record([grade.as_str().to_string(), count.to_string()])?;
    }
    into_string(writer)
}

pub fn group_averages_csv(groups: &[GroupAverage]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["group", "average", "count"])?;
    for group in groups {
        writer.write_record([
            group.group.clone(),
            format!("{:.2}", group.average),
            group.count.to_string(),
        ])?;
    }
    into_string(writer)
}

pub fn monthly_attendance_csv(months: &[MonthlyAttendance]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["month", "present", "absent", "late", "attendanceRate"])?;
    for month in months {
        writer.write_record([
            month.month.clone(),
            month.present.to_string(),
            month.absent.to_string(),
            month.late.to_string(),
            format!("{:.1}", month.attendance_rate),
        ])?;
    }
    into_string(writer)
}

pub fn monthly_collection_csv(months: &[MonthlyCollection]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["month", "amountPaid", "outstanding", "collectionRate"])?;
    for month in months {
        let rate = month
            .collection_rate
            .map(|r| format!("{:.1}", r))
            .unwrap_or_default();
        writer.write_record([
            month.month.clone(),
            format!("{:.2}", month.amount_paid),
            format!("{:.2}", month.outstanding),
            rate,
        ])?;
    }
    into_string(writer)
}

pub fn trend_csv(points: &[TrendPoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["period", "startsOn", "value"])?;
    for point in points {
        writer.write_record([
            point.period.label.clone(),
            point.period.starts_on.to_string(),
            format!("{:.2}", point.value),
        ])?;
    }
    into_string(writer)
}
