use crate::models::{GroupKey, GroupLabel, NumericColumn, TrafficRecord};
use crate::processors::statistics::{mean, Summary};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Reduction of one group of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub label: GroupLabel,
    pub count: usize,
    pub means: BTreeMap<NumericColumn, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

impl Aggregate {
    pub fn mean(&self, column: NumericColumn) -> Option<f64> {
        self.means.get(&column).copied()
    }

    pub fn traffic_mean(&self) -> Option<f64> {
        self.mean(NumericColumn::TrafficVolume)
    }
}

/// Aggregates of one subset under one grouping key, in label order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMeans {
    pub key: GroupKey,
    pub groups: Vec<Aggregate>,
}

impl GroupedMeans {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, label: &GroupLabel) -> Option<&Aggregate> {
        self.groups.iter().find(|g| &g.label == label)
    }

    /// Group with the highest mean of the given column
    pub fn peak(&self, column: NumericColumn) -> Option<&Aggregate> {
        self.groups
            .iter()
            .filter(|g| g.mean(column).is_some())
            .max_by(|a, b| {
                let a = a.mean(column).unwrap_or(f64::NEG_INFINITY);
                let b = b.mean(column).unwrap_or(f64::NEG_INFINITY);
                a.total_cmp(&b)
            })
    }
}

/// Groups records by a key and averages numeric columns per group.
///
/// Only groups that receive at least one record appear in the output, so an
/// empty input yields no groups.
pub struct Aggregator {
    columns: Vec<NumericColumn>,
    summary_column: Option<NumericColumn>,
}

impl Aggregator {
    /// Columns keep the order given; repeats are dropped
    pub fn new(columns: &[NumericColumn]) -> Self {
        let mut columns = columns.to_vec();
        let mut seen = BTreeSet::new();
        columns.retain(|column| seen.insert(*column));

        Self {
            columns,
            summary_column: None,
        }
    }

    /// Also attach quartiles of one column to every group
    pub fn with_summary_of(mut self, column: NumericColumn) -> Self {
        self.summary_column = Some(column);
        self
    }

    pub fn columns(&self) -> &[NumericColumn] {
        &self.columns
    }

    pub fn group_by<'a, I>(&self, records: I, key: GroupKey) -> GroupedMeans
    where
        I: IntoIterator<Item = &'a TrafficRecord>,
    {
        let groups = self.group_by_with(records, |r| key.label(r));
        debug!(key = %key, groups = groups.len(), "Grouped records");
        GroupedMeans { key, groups }
    }

    /// Group by an arbitrary label extractor
    pub fn group_by_with<'a, I, F>(&self, records: I, key_fn: F) -> Vec<Aggregate>
    where
        I: IntoIterator<Item = &'a TrafficRecord>,
        F: Fn(&TrafficRecord) -> GroupLabel,
    {
        let mut buckets: BTreeMap<GroupLabel, Vec<&TrafficRecord>> = BTreeMap::new();
        for record in records {
            buckets.entry(key_fn(record)).or_default().push(record);
        }

        buckets
            .into_iter()
            .map(|(label, members)| self.reduce(label, &members))
            .collect()
    }

    fn reduce(&self, label: GroupLabel, members: &[&TrafficRecord]) -> Aggregate {
        let means = self
            .columns
            .iter()
            .filter_map(|column| {
                let values: Vec<f64> = members.iter().map(|r| column.value(r)).collect();
                mean(&values).map(|m| (*column, m))
            })
            .collect();

        let summary = self.summary_column.and_then(|column| {
            let values: Vec<f64> = members.iter().map(|r| column.value(r)).collect();
            Summary::from_values(&values)
        });

        Aggregate {
            label,
            count: members.len(),
            means,
            summary,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(&NumericColumn::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::partitioner::TimePartitioner;
    use chrono::NaiveDate;

    fn record(day: u32, hour: u32, volume: u32, weather: &str) -> TrafficRecord {
        TrafficRecord::new(
            NaiveDate::from_ymd_opt(2018, 9, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            volume,
            285.0 + hour as f64,
            0.0,
            0.0,
            90,
            weather.to_string(),
            format!("{} description", weather.to_lowercase()),
            None,
        )
    }

    #[test]
    fn test_day_groups_by_hour_exclude_early_morning() {
        // Monday 2018-09-03
        let records = vec![
            record(3, 6, 100, "Clear"),
            record(3, 7, 6000, "Clear"),
            record(3, 8, 5900, "Clear"),
        ];
        let day = TimePartitioner::new().split_day_night(&records).day;

        let by_hour = Aggregator::default().group_by(day, GroupKey::Hour);

        assert_eq!(by_hour.groups.len(), 2);
        assert_eq!(by_hour.groups[0].label, GroupLabel::Number(7));
        assert_eq!(by_hour.groups[0].traffic_mean(), Some(6000.0));
        assert_eq!(by_hour.groups[1].label, GroupLabel::Number(8));
        assert_eq!(by_hour.groups[1].traffic_mean(), Some(5900.0));
        assert!(by_hour.get(&GroupLabel::Number(6)).is_none());
    }

    #[test]
    fn test_means_per_group() {
        let records = vec![
            record(3, 9, 1000, "Rain"),
            record(4, 9, 3000, "Rain"),
            record(3, 10, 5000, "Clear"),
        ];

        let by_weather = Aggregator::default().group_by(&records, GroupKey::WeatherMain);

        let labels: Vec<String> = by_weather.groups.iter().map(|g| g.label.to_string()).collect();
        assert_eq!(labels, vec!["Clear", "Rain"]);

        let rain = by_weather
            .get(&GroupLabel::Category("Rain".to_string()))
            .unwrap();
        assert_eq!(rain.count, 2);
        assert_eq!(rain.traffic_mean(), Some(2000.0));
        assert_eq!(rain.mean(NumericColumn::Temp), Some(294.0));
        assert_eq!(rain.mean(NumericColumn::CloudsAll), Some(90.0));
        assert_eq!(rain.mean(NumericColumn::DayOfWeek), Some(0.5));
    }

    #[test]
    fn test_mean_within_group_bounds() {
        let records: Vec<TrafficRecord> = (0..24)
            .map(|h| record(3 + (h % 7), h, 37 * h + 11, if h % 3 == 0 { "Mist" } else { "Fog" }))
            .collect();

        for key in [GroupKey::Hour, GroupKey::DayOfWeek, GroupKey::WeatherMain] {
            for group in Aggregator::default().group_by(&records, key).groups {
                let members: Vec<f64> = records
                    .iter()
                    .filter(|r| key.label(r) == group.label)
                    .map(|r| r.traffic_volume as f64)
                    .collect();
                let lo = members.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = members.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let m = group.traffic_mean().unwrap();
                assert!(lo <= m && m <= hi, "{m} outside [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn test_empty_subset_yields_no_groups() {
        let records = vec![record(3, 9, 1000, "Rain")];
        let thunder: Vec<&TrafficRecord> = records
            .iter()
            .filter(|r| r.weather_main == "Thunderstorm")
            .collect();

        let grouped = Aggregator::default().group_by(thunder, GroupKey::WeatherDescription);
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_selected_columns_and_summary() {
        let records = vec![
            record(3, 9, 1000, "Rain"),
            record(4, 9, 2000, "Rain"),
            record(5, 9, 3000, "Rain"),
        ];

        let grouped = Aggregator::new(&[NumericColumn::TrafficVolume])
            .with_summary_of(NumericColumn::TrafficVolume)
            .group_by(&records, GroupKey::Hour);

        let group = &grouped.groups[0];
        assert_eq!(group.means.len(), 1);
        assert_eq!(group.mean(NumericColumn::Temp), None);
        let summary = group.summary.as_ref().unwrap();
        assert_eq!(summary.median, 2000.0);
        assert_eq!(summary.q1, 1500.0);
    }

    #[test]
    fn test_columns_keep_given_order() {
        let aggregator = Aggregator::new(&[
            NumericColumn::Temp,
            NumericColumn::TrafficVolume,
            NumericColumn::Temp,
        ]);
        assert_eq!(
            aggregator.columns(),
            &[NumericColumn::Temp, NumericColumn::TrafficVolume]
        );
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let records = vec![
            record(3, 9, 1000, "Rain"),
            record(4, 12, 3000, "Snow"),
            record(8, 16, 6100, "Clouds"),
        ];
        let aggregator = Aggregator::default();

        assert_eq!(
            aggregator.group_by(&records, GroupKey::DayOfWeek),
            aggregator.group_by(&records, GroupKey::DayOfWeek)
        );
    }

    #[test]
    fn test_peak_group() {
        let records = vec![
            record(3, 7, 6000, "Clear"),
            record(3, 16, 6400, "Clear"),
            record(3, 12, 4800, "Clear"),
        ];
        let by_hour = Aggregator::default().group_by(&records, GroupKey::Hour);

        let peak = by_hour.peak(NumericColumn::TrafficVolume).unwrap();
        assert_eq!(peak.label, GroupLabel::Number(16));
    }
}
