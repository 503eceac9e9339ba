use crate::error::{AnalysisError, Result};
use crate::models::TrafficRecord;
use crate::utils::constants::{
    DATE_TIME_FORMATS, DEFAULT_BUFFER_SIZE, NO_HOLIDAY, REQUIRED_COLUMNS,
};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use memmap2::Mmap;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

/// Row as it appears in the file, before timestamp and holiday conversion
#[derive(Debug, Deserialize)]
struct RawTrafficRow {
    date_time: String,
    traffic_volume: u32,
    temp: f64,
    rain_1h: f64,
    snow_1h: f64,
    clouds_all: u32,
    weather_main: String,
    weather_description: String,
    holiday: String,
}

pub struct TrafficReader {
    use_mmap: bool,
}

impl TrafficReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Load every record from a `.csv` file or a `.zip` archive holding one.
    ///
    /// Any schema or parse problem aborts the whole load.
    pub fn read_path(&self, path: &Path) -> Result<Vec<TrafficRecord>> {
        let is_zip = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("zip"));

        let records = if is_zip {
            self.read_zip(path)?
        } else if self.use_mmap {
            self.read_mmap(path)?
        } else {
            let file = File::open(path)?;
            self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))?
        };

        info!(
            records = records.len(),
            path = %path.display(),
            "Loaded traffic dataset"
        );
        Ok(records)
    }

    /// Parse CSV content from any reader; columns are matched by header name
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<TrafficRecord>> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        Self::check_headers(&headers)?;

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map_or(0, |p| p.line());

            let raw: RawTrafficRow = row.deserialize(Some(&headers)).map_err(|e| {
                AnalysisError::InvalidRecord {
                    line,
                    message: e.to_string(),
                }
            })?;

            records.push(Self::convert_row(raw, line)?);
        }

        debug!(records = records.len(), "Parsed CSV rows");
        Ok(records)
    }

    fn read_mmap(&self, path: &Path) -> Result<Vec<TrafficRecord>> {
        let file = File::open(path)?;
        // The file is opened read-only and not modified while mapped
        let mmap = unsafe { Mmap::map(&file)? };
        self.read_from(&mmap[..])
    }

    fn read_zip(&self, path: &Path) -> Result<Vec<TrafficRecord>> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        let entry_name = archive
            .file_names()
            .filter(|name| !name.starts_with("__MACOSX"))
            .find(|name| name.to_ascii_lowercase().ends_with(".csv"))
            .map(str::to_string)
            .ok_or_else(|| {
                AnalysisError::InvalidFormat(format!(
                    "No CSV file found in archive {}",
                    path.display()
                ))
            })?;

        debug!(entry = %entry_name, "Reading dataset from archive");
        let entry = archive.by_name(&entry_name)?;
        self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, entry))
    }

    fn check_headers(headers: &StringRecord) -> Result<()> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !headers.iter().any(|h| h == **required))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::MissingColumns { columns: missing })
        }
    }

    fn convert_row(raw: RawTrafficRow, line: u64) -> Result<TrafficRecord> {
        let date_time = parse_date_time(&raw.date_time).ok_or_else(|| {
            AnalysisError::InvalidRecord {
                line,
                message: format!("Invalid date_time: '{}'", raw.date_time),
            }
        })?;

        for (column, value) in [
            ("temp", raw.temp),
            ("rain_1h", raw.rain_1h),
            ("snow_1h", raw.snow_1h),
        ] {
            if !value.is_finite() {
                return Err(AnalysisError::InvalidRecord {
                    line,
                    message: format!("Non-finite {}: {}", column, value),
                });
            }
        }

        let holiday = match raw.holiday.as_str() {
            "" | NO_HOLIDAY => None,
            name => Some(name.to_string()),
        };

        Ok(TrafficRecord::new(
            date_time,
            raw.traffic_volume,
            raw.temp,
            raw.rain_1h,
            raw.snow_1h,
            raw.clouds_all,
            raw.weather_main,
            raw.weather_description,
            holiday,
        ))
    }
}

impl Default for TrafficReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a timestamp in any of the accepted layouts
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
