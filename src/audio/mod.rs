//! Audio inspection.

mod duration;

pub use duration::measure_duration;
