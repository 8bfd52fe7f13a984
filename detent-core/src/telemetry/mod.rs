//! Print telemetry: extrusion rate, time remaining, progress

pub mod flow;
pub mod progress;
pub mod time;

pub use flow::{BlockObservation, FlowConfig, FlowEstimator};
pub use progress::{progress_units, HeatupProgress, PROGRESS_SPAN};
pub use time::TimeEstimator;
