use crate::models::{NumericColumn, TrafficRecord};
use crate::processors::statistics::pearson;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub column: NumericColumn,
    pub coefficient: f64,
}

/// Pearson coefficients of one target column against a set of columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationTable {
    pub target: NumericColumn,
    pub sample_size: usize,
    /// Columns whose coefficient is undefined (constant series, too few rows) are absent
    pub entries: Vec<Correlation>,
}

impl CorrelationTable {
    pub fn get(&self, column: NumericColumn) -> Option<f64> {
        self.entries
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.coefficient)
    }

    /// Strongest relationship with any column other than the target itself
    pub fn strongest(&self) -> Option<&Correlation> {
        self.entries
            .iter()
            .filter(|c| c.column != self.target)
            .max_by(|a, b| a.coefficient.abs().total_cmp(&b.coefficient.abs()))
    }
}

pub fn correlate<'a, I>(
    records: I,
    target: NumericColumn,
    columns: &[NumericColumn],
) -> CorrelationTable
where
    I: IntoIterator<Item = &'a TrafficRecord>,
{
    let records: Vec<&TrafficRecord> = records.into_iter().collect();
    let target_values: Vec<f64> = records.iter().map(|r| target.value(r)).collect();

    let entries: Vec<Correlation> = columns
        .iter()
        .filter_map(|column| {
            let values: Vec<f64> = records.iter().map(|r| column.value(r)).collect();
            pearson(&target_values, &values).map(|coefficient| Correlation {
                column: *column,
                coefficient,
            })
        })
        .collect();

    debug!(
        target = %target,
        rows = records.len(),
        defined = entries.len(),
        "Computed correlations"
    );

    CorrelationTable {
        target,
        sample_size: records.len(),
        entries,
    }
}

/// Correlation of traffic volume with every numeric column
pub fn correlate_traffic<'a, I>(records: I) -> CorrelationTable
where
    I: IntoIterator<Item = &'a TrafficRecord>,
{
    correlate(records, NumericColumn::TrafficVolume, &NumericColumn::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(hour: u32, volume: u32, temp: f64, rain: f64) -> TrafficRecord {
        TrafficRecord::new(
            NaiveDate::from_ymd_opt(2016, 7, 12)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            volume,
            temp,
            rain,
            0.0,
            40,
            "Clouds".to_string(),
            "broken clouds".to_string(),
            None,
        )
    }

    #[test]
    fn test_traffic_self_correlation() {
        let records = vec![
            record(7, 6000, 290.1, 0.0),
            record(8, 5900, 291.4, 0.3),
            record(9, 4700, 293.0, 0.0),
        ];

        let table = correlate_traffic(&records);

        assert_eq!(table.sample_size, 3);
        assert_eq!(table.get(NumericColumn::TrafficVolume), Some(1.0));
    }

    #[test]
    fn test_constant_columns_are_omitted() {
        let records = vec![
            record(7, 6000, 290.0, 0.0),
            record(8, 5000, 291.0, 0.0),
            record(9, 4000, 292.0, 0.0),
        ];

        let table = correlate_traffic(&records);

        // snow, clouds, rain, month, year and weekday never vary here
        assert_eq!(table.get(NumericColumn::Snow1h), None);
        assert_eq!(table.get(NumericColumn::Rain1h), None);
        assert_eq!(table.get(NumericColumn::Year), None);
        assert!((table.get(NumericColumn::Temp).unwrap() + 1.0).abs() < 1e-12);
        assert!((table.get(NumericColumn::Hour).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_strongest_skips_target() {
        let records = vec![
            record(7, 6000, 290.0, 0.0),
            record(8, 5000, 290.5, 1.0),
            record(9, 4000, 289.0, 0.0),
        ];

        let table = correlate(
            &records,
            NumericColumn::TrafficVolume,
            &[NumericColumn::TrafficVolume, NumericColumn::Hour, NumericColumn::Temp],
        );

        let strongest = table.strongest().unwrap();
        assert_eq!(strongest.column, NumericColumn::Hour);
    }

    #[test]
    fn test_empty_subset_has_no_entries() {
        let records: Vec<TrafficRecord> = Vec::new();
        let table = correlate_traffic(&records);
        assert_eq!(table.sample_size, 0);
        assert!(table.entries.is_empty());
    }
}
