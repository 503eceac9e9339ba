pub mod traffic_analyzer;

pub use traffic_analyzer::{
    HeavyTrafficIndicator, ScatterPoint, TrafficAnalyzer, TrafficProfile, TrafficReport,
};
