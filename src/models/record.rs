use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One hourly observation of traffic and weather at the counting station.
///
/// The declared ranges are checked by the data-quality audit only; a record
/// outside them is still analysed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrafficRecord {
    pub date_time: NaiveDateTime,

    pub traffic_volume: u32,

    /// Kelvin
    #[validate(range(min = 0.0))]
    pub temp: f64,

    /// Millimetres of rain in the hour
    #[validate(range(min = 0.0))]
    pub rain_1h: f64,

    /// Millimetres of snow (water equivalent) in the hour
    #[validate(range(min = 0.0))]
    pub snow_1h: f64,

    /// Cloud cover percentage
    #[validate(range(min = 0, max = 100))]
    pub clouds_all: u32,

    pub weather_main: String,
    pub weather_description: String,
    pub holiday: Option<String>,
}

impl TrafficRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date_time: NaiveDateTime,
        traffic_volume: u32,
        temp: f64,
        rain_1h: f64,
        snow_1h: f64,
        clouds_all: u32,
        weather_main: String,
        weather_description: String,
        holiday: Option<String>,
    ) -> Self {
        Self {
            date_time,
            traffic_volume,
            temp,
            rain_1h,
            snow_1h,
            clouds_all,
            weather_main,
            weather_description,
            holiday,
        }
    }

    pub fn hour(&self) -> u32 {
        self.date_time.hour()
    }

    /// 0 = Monday .. 6 = Sunday
    pub fn day_of_week(&self) -> u32 {
        self.date_time.weekday().num_days_from_monday()
    }

    pub fn month(&self) -> u32 {
        self.date_time.month()
    }

    pub fn year(&self) -> i32 {
        self.date_time.year()
    }

    pub fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }
}
