pub mod constants;
pub mod logging;
pub mod progress;
pub mod settings;

pub use constants::*;
pub use logging::init_logging;
pub use progress::ProgressReporter;
pub use settings::AnalysisSettings;
