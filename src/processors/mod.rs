pub mod aggregator;
pub mod correlation;
pub mod partitioner;
pub mod quality_checker;
pub mod statistics;

pub use aggregator::{Aggregate, Aggregator, GroupedMeans};
pub use correlation::{correlate, correlate_traffic, Correlation, CorrelationTable};
pub use partitioner::{
    is_business_day, is_day_hour, DayNightSplit, RecordSubset, Subset, TimePartitioner, WeekSplit,
};
pub use quality_checker::{QualityChecker, QualityReport};
pub use statistics::{pearson, Histogram, HistogramBin, Summary};
