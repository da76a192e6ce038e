pub mod comparison;
pub mod snapshot;
pub mod time_series;
