use crate::models::TrafficRecord;
use crate::utils::constants::{DEFAULT_MAX_LISTED_ISSUES, DEFAULT_SENTINEL_TEMP_KELVIN};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};
use validator::Validate;

/// Run of missing hourly observations between two consecutive rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGap {
    pub after: NaiveDateTime,
    pub before: NaiveDateTime,
    pub missing_hours: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspectTemperature {
    pub date_time: NaiveDateTime,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeViolation {
    pub date_time: NaiveDateTime,
    pub fields: Vec<String>,
}

/// Findings of the audit; nothing here alters the records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub total_records: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub expected_hours: i64,
    pub distinct_hours: usize,
    pub missing_hours: i64,
    pub gap_count: usize,
    pub gaps: Vec<TimeGap>,
    pub duplicate_timestamps: usize,
    pub out_of_order: usize,
    pub sentinel_temperature_count: usize,
    pub sentinel_temperatures: Vec<SuspectTemperature>,
    pub range_violation_count: usize,
    pub range_violations: Vec<RangeViolation>,
}

impl QualityReport {
    pub fn coverage_percentage(&self) -> f64 {
        if self.expected_hours <= 0 {
            return 0.0;
        }
        100.0 * self.distinct_hours as f64 / self.expected_hours as f64
    }

    pub fn is_clean(&self) -> bool {
        self.gap_count == 0
            && self.duplicate_timestamps == 0
            && self.out_of_order == 0
            && self.sentinel_temperature_count == 0
            && self.range_violation_count == 0
    }
}

pub struct QualityChecker {
    sentinel_temp_kelvin: f64,
    max_listed: usize,
}

impl QualityChecker {
    pub fn new() -> Self {
        Self {
            sentinel_temp_kelvin: DEFAULT_SENTINEL_TEMP_KELVIN,
            max_listed: DEFAULT_MAX_LISTED_ISSUES,
        }
    }

    pub fn with_sentinel_temp(mut self, kelvin: f64) -> Self {
        self.sentinel_temp_kelvin = kelvin;
        self
    }

    pub fn with_max_listed(mut self, max_listed: usize) -> Self {
        self.max_listed = max_listed;
        self
    }

    /// Audit the records in source order
    pub fn check(&self, records: &[TrafficRecord]) -> QualityReport {
        let first_timestamp = records.iter().map(|r| r.date_time).min();
        let last_timestamp = records.iter().map(|r| r.date_time).max();

        let expected_hours = match (first_timestamp, last_timestamp) {
            (Some(first), Some(last)) => (last - first).num_hours() + 1,
            _ => 0,
        };

        let distinct: HashSet<NaiveDateTime> = records.iter().map(|r| r.date_time).collect();

        let mut report = QualityReport {
            total_records: records.len(),
            first_timestamp,
            last_timestamp,
            expected_hours,
            distinct_hours: distinct.len(),
            missing_hours: (expected_hours - distinct.len() as i64).max(0),
            gap_count: 0,
            gaps: Vec::new(),
            duplicate_timestamps: 0,
            out_of_order: 0,
            sentinel_temperature_count: 0,
            sentinel_temperatures: Vec::new(),
            range_violation_count: 0,
            range_violations: Vec::new(),
        };

        self.check_sequence(records, &mut report);

        for record in records {
            self.check_record(record, &mut report);
        }

        if report.sentinel_temperature_count > 0 {
            warn!(
                count = report.sentinel_temperature_count,
                threshold = self.sentinel_temp_kelvin,
                "Temperatures near absolute zero are kept and will skew temperature statistics"
            );
        }
        info!(
            records = report.total_records,
            gaps = report.gap_count,
            missing_hours = report.missing_hours,
            duplicates = report.duplicate_timestamps,
            "Data quality audit complete"
        );

        report
    }

    fn check_sequence(&self, records: &[TrafficRecord], report: &mut QualityReport) {
        let one_hour = Duration::hours(1);

        for window in records.windows(2) {
            let prev = window[0].date_time;
            let curr = window[1].date_time;
            let step = curr - prev;

            if step == Duration::zero() {
                report.duplicate_timestamps += 1;
            } else if step < Duration::zero() {
                report.out_of_order += 1;
            } else if step > one_hour {
                report.gap_count += 1;
                if report.gaps.len() < self.max_listed {
                    report.gaps.push(TimeGap {
                        after: prev,
                        before: curr,
                        missing_hours: step.num_hours() - 1,
                    });
                }
            }
        }
    }

    fn check_record(&self, record: &TrafficRecord, report: &mut QualityReport) {
        if record.temp < self.sentinel_temp_kelvin {
            report.sentinel_temperature_count += 1;
            if report.sentinel_temperatures.len() < self.max_listed {
                report.sentinel_temperatures.push(SuspectTemperature {
                    date_time: record.date_time,
                    temp: record.temp,
                });
            }
        }

        if let Err(errors) = record.validate() {
            report.range_violation_count += 1;
            if report.range_violations.len() < self.max_listed {
                let mut fields: Vec<String> =
                    errors.field_errors().keys().map(|k| k.to_string()).collect();
                fields.sort();
                report.range_violations.push(RangeViolation {
                    date_time: record.date_time,
                    fields,
                });
            }
        }
    }

    /// Generate a plain-text summary of the audit
    pub fn generate_summary(&self, report: &QualityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Data Quality Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));

        if let (Some(first), Some(last)) = (report.first_timestamp, report.last_timestamp) {
            summary.push_str(&format!("Time Span: {} to {}\n", first, last));
        }

        summary.push_str(&format!(
            "Hourly Coverage: {}/{} hours ({:.1}%), {} missing\n",
            report.distinct_hours,
            report.expected_hours,
            report.coverage_percentage(),
            report.missing_hours
        ));
        summary.push_str(&format!("Gaps: {}\n", report.gap_count));
        summary.push_str(&format!(
            "Duplicate Timestamps: {}\n",
            report.duplicate_timestamps
        ));
        summary.push_str(&format!("Out-of-order Rows: {}\n", report.out_of_order));
        summary.push_str(&format!(
            "Temperatures Below {:.0} K: {}\n",
            self.sentinel_temp_kelvin, report.sentinel_temperature_count
        ));
        summary.push_str(&format!(
            "Range Violations: {}\n",
            report.range_violation_count
        ));

        if !report.gaps.is_empty() {
            summary.push_str(&format!("\nFirst {} Gaps:\n", report.gaps.len()));
            for (i, gap) in report.gaps.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. {} -> {} ({} hours missing)\n",
                    i + 1,
                    gap.after,
                    gap.before,
                    gap.missing_hours
                ));
            }
        }

        if !report.sentinel_temperatures.is_empty() {
            summary.push_str("\nSuspect Temperatures (kept as-is):\n");
            for (i, suspect) in report.sentinel_temperatures.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. {}: {:.2} K\n",
                    i + 1,
                    suspect.date_time,
                    suspect.temp
                ));
            }
        }

        if !report.range_violations.is_empty() {
            summary.push_str("\nRange Violations (kept as-is):\n");
            for (i, violation) in report.range_violations.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. {}: {}\n",
                    i + 1,
                    violation.date_time,
                    violation.fields.join(", ")
                ));
            }
        }

        summary
    }
}

impl Default for QualityChecker {
    fn default() -> Self {
        Self::new()
    }
}
