use crate::models::TrafficRecord;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric attributes of a record, observed or derived from the timestamp.
///
/// Categorical attributes (weather labels, holiday) have no variant here, so
/// they can never take part in a mean or a correlation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum NumericColumn {
    #[serde(rename = "traffic_volume")]
    #[value(name = "traffic_volume")]
    TrafficVolume,
    #[serde(rename = "temp")]
    #[value(name = "temp")]
    Temp,
    #[serde(rename = "rain_1h")]
    #[value(name = "rain_1h")]
    Rain1h,
    #[serde(rename = "snow_1h")]
    #[value(name = "snow_1h")]
    Snow1h,
    #[serde(rename = "clouds_all")]
    #[value(name = "clouds_all")]
    CloudsAll,
    #[serde(rename = "month")]
    #[value(name = "month")]
    Month,
    #[serde(rename = "year")]
    #[value(name = "year")]
    Year,
    #[serde(rename = "dayofweek")]
    #[value(name = "dayofweek")]
    DayOfWeek,
    #[serde(rename = "hour")]
    #[value(name = "hour")]
    Hour,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 9] = [
        NumericColumn::TrafficVolume,
        NumericColumn::Temp,
        NumericColumn::Rain1h,
        NumericColumn::Snow1h,
        NumericColumn::CloudsAll,
        NumericColumn::Month,
        NumericColumn::Year,
        NumericColumn::DayOfWeek,
        NumericColumn::Hour,
    ];

    /// Columns read directly from the dataset
    pub const OBSERVED: [NumericColumn; 5] = [
        NumericColumn::TrafficVolume,
        NumericColumn::Temp,
        NumericColumn::Rain1h,
        NumericColumn::Snow1h,
        NumericColumn::CloudsAll,
    ];

    pub fn value(&self, record: &TrafficRecord) -> f64 {
        match self {
            NumericColumn::TrafficVolume => record.traffic_volume as f64,
            NumericColumn::Temp => record.temp,
            NumericColumn::Rain1h => record.rain_1h,
            NumericColumn::Snow1h => record.snow_1h,
            NumericColumn::CloudsAll => record.clouds_all as f64,
            NumericColumn::Month => record.month() as f64,
            NumericColumn::Year => record.year() as f64,
            NumericColumn::DayOfWeek => record.day_of_week() as f64,
            NumericColumn::Hour => record.hour() as f64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::TrafficVolume => "traffic_volume",
            NumericColumn::Temp => "temp",
            NumericColumn::Rain1h => "rain_1h",
            NumericColumn::Snow1h => "snow_1h",
            NumericColumn::CloudsAll => "clouds_all",
            NumericColumn::Month => "month",
            NumericColumn::Year => "year",
            NumericColumn::DayOfWeek => "dayofweek",
            NumericColumn::Hour => "hour",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
