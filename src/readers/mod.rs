pub mod traffic_reader;

pub use traffic_reader::{parse_date_time, TrafficReader};
