use crate::models::TrafficRecord;
use crate::utils::constants::{
    DAY_START_HOUR, FIRST_WEEKEND_DAY, LAST_BUSINESS_DAY, NIGHT_START_HOUR,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A filtered view over the loaded records; the records themselves are borrowed.
pub type RecordSubset<'a> = Vec<&'a TrafficRecord>;

#[derive(Debug, Clone, PartialEq)]
pub struct DayNightSplit<'a> {
    pub day: RecordSubset<'a>,
    pub night: RecordSubset<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekSplit<'a> {
    pub business: RecordSubset<'a>,
    pub weekend: RecordSubset<'a>,
}

/// Named subsets selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Subset {
    All,
    Day,
    Night,
    /// Day hours, Monday to Friday
    Business,
    /// Day hours, Saturday and Sunday
    Weekend,
}

/// Day is [07:00, 19:00); night is everything else
pub fn is_day_hour(hour: u32) -> bool {
    (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour)
}

/// Monday (0) through Friday (4)
pub fn is_business_day(day_of_week: u32) -> bool {
    day_of_week <= LAST_BUSINESS_DAY
}

pub fn is_weekend_day(day_of_week: u32) -> bool {
    day_of_week >= FIRST_WEEKEND_DAY
}

pub struct TimePartitioner;

impl TimePartitioner {
    pub fn new() -> Self {
        Self
    }

    /// Split records into disjoint day and night subsets, preserving source order
    pub fn split_day_night<'a, I>(&self, records: I) -> DayNightSplit<'a>
    where
        I: IntoIterator<Item = &'a TrafficRecord>,
    {
        let (day, night): (RecordSubset<'a>, RecordSubset<'a>) =
            records.into_iter().partition(|r| is_day_hour(r.hour()));

        debug!(day = day.len(), night = night.len(), "Split day/night");
        DayNightSplit { day, night }
    }

    /// Split records by day of week into business days and weekend
    pub fn split_business_weekend<'a, I>(&self, records: I) -> WeekSplit<'a>
    where
        I: IntoIterator<Item = &'a TrafficRecord>,
    {
        let mut business = Vec::new();
        let mut weekend = Vec::new();

        for record in records {
            let weekday = record.day_of_week();
            if is_business_day(weekday) {
                business.push(record);
            } else if is_weekend_day(weekday) {
                weekend.push(record);
            }
        }

        debug!(
            business = business.len(),
            weekend = weekend.len(),
            "Split business/weekend"
        );
        WeekSplit { business, weekend }
    }

    /// Records falling in the given calendar month (1-12)
    pub fn filter_month<'a, I>(&self, records: I, month: u32) -> RecordSubset<'a>
    where
        I: IntoIterator<Item = &'a TrafficRecord>,
    {
        records.into_iter().filter(|r| r.month() == month).collect()
    }

    /// Resolve a named subset against the full record set
    pub fn select<'a>(&self, records: &'a [TrafficRecord], subset: Subset) -> RecordSubset<'a> {
        match subset {
            Subset::All => records.iter().collect(),
            Subset::Day => self.split_day_night(records).day,
            Subset::Night => self.split_day_night(records).night,
            Subset::Business => {
                let day = self.split_day_night(records).day;
                self.split_business_weekend(day).business
            }
            Subset::Weekend => {
                let day = self.split_day_night(records).day;
                self.split_business_weekend(day).weekend
            }
        }
    }
}

impl Default for TimePartitioner {
    fn default() -> Self {
        Self::new()
    }
}
