use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Dataset contains no records")]
    EmptyDataset,
}

impl From<config::ConfigError> for AnalysisError {
    fn from(err: config::ConfigError) -> Self {
        AnalysisError::Config(err.to_string())
    }
}
