use crate::error::{AnalysisError, Result};
use crate::utils::constants::*;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the analysis and its text rendering.
///
/// Values come from serde defaults, then an optional TOML file, then
/// `TRAFFIC_*` environment variables (e.g. `TRAFFIC_FOCUS_MONTH=12`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub histogram_bins: usize,
    pub chart_width: usize,
    pub heavy_traffic_threshold: f64,
    pub focus_month: u32,
    pub sentinel_temp_kelvin: f64,
    pub scatter_temp_min: f64,
    pub scatter_temp_max: f64,
    pub max_listed_issues: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            chart_width: DEFAULT_CHART_WIDTH,
            heavy_traffic_threshold: DEFAULT_HEAVY_TRAFFIC_THRESHOLD,
            focus_month: DEFAULT_FOCUS_MONTH,
            sentinel_temp_kelvin: DEFAULT_SENTINEL_TEMP_KELVIN,
            scatter_temp_min: DEFAULT_SCATTER_TEMP_MIN,
            scatter_temp_max: DEFAULT_SCATTER_TEMP_MAX,
            max_listed_issues: DEFAULT_MAX_LISTED_ISSUES,
        }
    }
}

impl AnalysisSettings {
    /// Load settings, layering an optional file and the environment over the defaults.
    ///
    /// An explicitly given path must exist; the default config file is only
    /// read when present in the working directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: AnalysisSettings = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            return Err(AnalysisError::Config(
                "histogram_bins must be at least 1".to_string(),
            ));
        }

        if !(1..=12).contains(&self.focus_month) {
            return Err(AnalysisError::Config(format!(
                "focus_month must be between 1 and 12, got {}",
                self.focus_month
            )));
        }

        if self.scatter_temp_min >= self.scatter_temp_max {
            return Err(AnalysisError::Config(format!(
                "scatter_temp_min ({}) must be below scatter_temp_max ({})",
                self.scatter_temp_min, self.scatter_temp_max
            )));
        }

        if self.chart_width < 10 {
            return Err(AnalysisError::Config(format!(
                "chart_width must be at least 10, got {}",
                self.chart_width
            )));
        }

        Ok(())
    }
}
