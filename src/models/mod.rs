pub mod columns;
pub mod grouping;
pub mod record;

pub use columns::NumericColumn;
pub use grouping::{GroupKey, GroupLabel};
pub use record::TrafficRecord;
