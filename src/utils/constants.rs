/// Hour boundaries of the day/night split: day is [7, 19), night is the rest
pub const DAY_START_HOUR: u32 = 7;
pub const NIGHT_START_HOUR: u32 = 19;

/// Day-of-week numbering starts at Monday = 0
pub const LAST_BUSINESS_DAY: u32 = 4; // Friday
pub const FIRST_WEEKEND_DAY: u32 = 5; // Saturday

/// Required dataset columns
pub const COL_DATE_TIME: &str = "date_time";
pub const COL_TRAFFIC_VOLUME: &str = "traffic_volume";
pub const COL_TEMP: &str = "temp";
pub const COL_RAIN_1H: &str = "rain_1h";
pub const COL_SNOW_1H: &str = "snow_1h";
pub const COL_CLOUDS_ALL: &str = "clouds_all";
pub const COL_WEATHER_MAIN: &str = "weather_main";
pub const COL_WEATHER_DESCRIPTION: &str = "weather_description";
pub const COL_HOLIDAY: &str = "holiday";

pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_DATE_TIME,
    COL_TRAFFIC_VOLUME,
    COL_TEMP,
    COL_RAIN_1H,
    COL_SNOW_1H,
    COL_CLOUDS_ALL,
    COL_WEATHER_MAIN,
    COL_WEATHER_DESCRIPTION,
    COL_HOLIDAY,
];

/// Timestamp layouts accepted in the date_time column, tried in order
pub const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Holiday cell value meaning "not a holiday"
pub const NO_HOLIDAY: &str = "None";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_CONFIG_FILE: &str = "traffic-analyzer.toml";
pub const ENV_PREFIX: &str = "TRAFFIC";

/// Analysis defaults
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;
pub const DEFAULT_CHART_WIDTH: usize = 50;
pub const DEFAULT_HEAVY_TRAFFIC_THRESHOLD: f64 = 5000.0;
pub const DEFAULT_FOCUS_MONTH: u32 = 7;
pub const DEFAULT_SENTINEL_TEMP_KELVIN: f64 = 200.0;
pub const DEFAULT_SCATTER_TEMP_MIN: f64 = 230.0;
pub const DEFAULT_SCATTER_TEMP_MAX: f64 = 320.0;
pub const DEFAULT_MAX_LISTED_ISSUES: usize = 10;

/// Scatter plot grid size in characters
pub const SCATTER_ROWS: usize = 20;
