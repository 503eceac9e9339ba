use crate::models::TrafficRecord;
use crate::utils::constants::NO_HOLIDAY;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value a record is bucketed under.
///
/// Temporal keys produce numbers and sort numerically; categorical keys
/// produce the label found in the data and sort lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupLabel {
    Number(i32),
    Category(String),
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::Number(n) => write!(f, "{}", n),
            GroupLabel::Category(c) => f.write_str(c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Month,
    Year,
    #[serde(rename = "dayofweek")]
    #[value(name = "dayofweek")]
    DayOfWeek,
    Hour,
    #[value(name = "weather_main")]
    WeatherMain,
    #[value(name = "weather_description")]
    WeatherDescription,
    Holiday,
}

impl GroupKey {
    pub fn label(&self, record: &TrafficRecord) -> GroupLabel {
        match self {
            GroupKey::Month => GroupLabel::Number(record.month() as i32),
            GroupKey::Year => GroupLabel::Number(record.year()),
            GroupKey::DayOfWeek => GroupLabel::Number(record.day_of_week() as i32),
            GroupKey::Hour => GroupLabel::Number(record.hour() as i32),
            GroupKey::WeatherMain => GroupLabel::Category(record.weather_main.clone()),
            GroupKey::WeatherDescription => {
                GroupLabel::Category(record.weather_description.clone())
            }
            GroupKey::Holiday => GroupLabel::Category(
                record
                    .holiday
                    .clone()
                    .unwrap_or_else(|| NO_HOLIDAY.to_string()),
            ),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GroupKey::Month => "month",
            GroupKey::Year => "year",
            GroupKey::DayOfWeek => "day of week",
            GroupKey::Hour => "hour",
            GroupKey::WeatherMain => "weather type",
            GroupKey::WeatherDescription => "weather description",
            GroupKey::Holiday => "holiday",
        }
    }

    /// Human-readable form of a label produced by this key
    pub fn describe_label(&self, label: &GroupLabel) -> String {
        const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        match (self, label) {
            (GroupKey::DayOfWeek, GroupLabel::Number(n)) => WEEKDAYS
                .get(*n as usize)
                .map(|d| d.to_string())
                .unwrap_or_else(|| n.to_string()),
            (GroupKey::Month, GroupLabel::Number(n)) => MONTHS
                .get((*n as usize).wrapping_sub(1))
                .map(|m| m.to_string())
                .unwrap_or_else(|| n.to_string()),
            (GroupKey::Hour, GroupLabel::Number(n)) => format!("{:02}:00", n),
            _ => label.to_string(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
