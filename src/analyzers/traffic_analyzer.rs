use crate::error::{AnalysisError, Result};
use crate::models::{GroupKey, GroupLabel, NumericColumn, TrafficRecord};
use crate::processors::{
    correlate_traffic, Aggregator, CorrelationTable, GroupedMeans, Histogram, Subset, Summary,
    TimePartitioner,
};
use crate::utils::AnalysisSettings;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

/// Distribution of traffic volume over one subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficProfile {
    pub records: usize,
    pub summary: Option<Summary>,
    pub histogram: Option<Histogram>,
}

/// Group whose mean hourly traffic exceeds the heavy-traffic threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeavyTrafficIndicator {
    pub subset: Subset,
    pub key: GroupKey,
    pub label: GroupLabel,
    pub display_label: String,
    pub mean_traffic: f64,
    pub records: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub traffic_volume: f64,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficReport {
    pub total_records: usize,
    pub first_timestamp: NaiveDateTime,
    pub last_timestamp: NaiveDateTime,
    pub overall: TrafficProfile,
    pub day: TrafficProfile,
    pub night: TrafficProfile,
    pub day_by_month: GroupedMeans,
    pub focus_month: u32,
    pub focus_month_by_year: GroupedMeans,
    pub day_by_weekday: GroupedMeans,
    pub business_by_hour: GroupedMeans,
    pub weekend_by_hour: GroupedMeans,
    pub day_correlations: CorrelationTable,
    /// Traffic against temperature for every day record
    pub temperature_scatter: Vec<ScatterPoint>,
    pub day_by_weather_main: GroupedMeans,
    pub day_by_weather_description: GroupedMeans,
    pub heavy_traffic_threshold: f64,
    pub indicators: Vec<HeavyTrafficIndicator>,
}

/// Runs the day-time traffic investigation end to end over a loaded dataset
pub struct TrafficAnalyzer {
    settings: AnalysisSettings,
    partitioner: TimePartitioner,
}

impl TrafficAnalyzer {
    pub fn new() -> Self {
        Self::with_settings(AnalysisSettings::default())
    }

    pub fn with_settings(settings: AnalysisSettings) -> Self {
        Self {
            settings,
            partitioner: TimePartitioner::new(),
        }
    }

    pub fn analyze(&self, records: &[TrafficRecord]) -> Result<TrafficReport> {
        let (first_timestamp, last_timestamp) = match (
            records.iter().map(|r| r.date_time).min(),
            records.iter().map(|r| r.date_time).max(),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(AnalysisError::EmptyDataset),
        };

        let split = self.partitioner.split_day_night(records);
        let week = self.partitioner.split_business_weekend(split.day.iter().copied());
        info!(
            day = split.day.len(),
            night = split.night.len(),
            business = week.business.len(),
            weekend = week.weekend.len(),
            "Partitioned records"
        );

        let aggregator = Aggregator::default();

        let day_by_month = aggregator.group_by(split.day.iter().copied(), GroupKey::Month);

        let focus = self
            .partitioner
            .filter_month(split.day.iter().copied(), self.settings.focus_month);
        let focus_month_by_year = aggregator.group_by(focus, GroupKey::Year);

        let day_by_weekday = aggregator.group_by(split.day.iter().copied(), GroupKey::DayOfWeek);
        let business_by_hour = aggregator.group_by(week.business.iter().copied(), GroupKey::Hour);
        let weekend_by_hour = aggregator.group_by(week.weekend.iter().copied(), GroupKey::Hour);

        let day_correlations = correlate_traffic(split.day.iter().copied());

        let temperature_scatter = split
            .day
            .iter()
            .map(|r| ScatterPoint {
                traffic_volume: r.traffic_volume as f64,
                temp: r.temp,
            })
            .collect();

        let day_by_weather_main =
            aggregator.group_by(split.day.iter().copied(), GroupKey::WeatherMain);
        let day_by_weather_description =
            aggregator.group_by(split.day.iter().copied(), GroupKey::WeatherDescription);

        let threshold = self.settings.heavy_traffic_threshold;
        let mut indicators = Vec::new();
        for (subset, grouped) in [
            (Subset::Day, &day_by_month),
            (Subset::Day, &day_by_weekday),
            (Subset::Business, &business_by_hour),
            (Subset::Weekend, &weekend_by_hour),
            (Subset::Day, &day_by_weather_main),
            (Subset::Day, &day_by_weather_description),
        ] {
            indicators.extend(heavy_traffic_groups(subset, grouped, threshold));
        }
        info!(
            indicators = indicators.len(),
            threshold, "Identified heavy traffic indicators"
        );

        Ok(TrafficReport {
            total_records: records.len(),
            first_timestamp,
            last_timestamp,
            overall: self.profile(records.iter()),
            day: self.profile(split.day.iter().copied()),
            night: self.profile(split.night.iter().copied()),
            day_by_month,
            focus_month: self.settings.focus_month,
            focus_month_by_year,
            day_by_weekday,
            business_by_hour,
            weekend_by_hour,
            day_correlations,
            temperature_scatter,
            day_by_weather_main,
            day_by_weather_description,
            heavy_traffic_threshold: threshold,
            indicators,
        })
    }

    /// Traffic volume distribution of a subset
    pub fn profile<'a, I>(&self, records: I) -> TrafficProfile
    where
        I: IntoIterator<Item = &'a TrafficRecord>,
    {
        self.column_profile(records, NumericColumn::TrafficVolume)
    }

    pub fn column_profile<'a, I>(&self, records: I, column: NumericColumn) -> TrafficProfile
    where
        I: IntoIterator<Item = &'a TrafficRecord>,
    {
        let values: Vec<f64> = records.into_iter().map(|r| column.value(r)).collect();
        TrafficProfile {
            records: values.len(),
            summary: Summary::from_values(&values),
            histogram: Histogram::from_values(&values, self.settings.histogram_bins),
        }
    }
}

impl Default for TrafficAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups above the threshold, heaviest first
fn heavy_traffic_groups(
    subset: Subset,
    grouped: &GroupedMeans,
    threshold: f64,
) -> Vec<HeavyTrafficIndicator> {
    let mut heavy: Vec<HeavyTrafficIndicator> = grouped
        .groups
        .iter()
        .filter_map(|group| {
            let mean_traffic = group.traffic_mean()?;
            (mean_traffic > threshold).then(|| HeavyTrafficIndicator {
                subset,
                key: grouped.key,
                label: group.label.clone(),
                display_label: grouped.key.describe_label(&group.label),
                mean_traffic,
                records: group.count,
            })
        })
        .collect();

    heavy.sort_by(|a, b| b.mean_traffic.total_cmp(&a.mean_traffic));
    heavy
}
