pub mod error;
pub mod rate_series;
pub mod time_value;
pub mod types;

pub mod deposit;
pub mod inflation;
pub mod mortgage;
pub mod renovation;
pub mod rental;
pub mod strategies;

pub use error::HomesteadError;
pub use rate_series::RateSeries;
pub use strategies::comparison::{compare, run_comparison};
pub use strategies::snapshot::InputSnapshot;
pub use types::*;

/// Standard result type for all homestead operations
pub type HomesteadResult<T> = Result<T, HomesteadError>;
