use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in whole currency units once they leave an engine.
pub type Money = Decimal;

/// Rates expressed as percentages (6 = 6%). Never as fractions.
pub type RatePct = Decimal;

/// Pessimistic / base / optimistic triple produced by one projection
/// evaluated under three rate adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioValue {
    pub pessimistic: Money,
    pub base: Money,
    pub optimistic: Money,
}

impl ScenarioValue {
    pub fn uniform(value: Money) -> Self {
        Self {
            pessimistic: value,
            base: value,
            optimistic: value,
        }
    }

    /// Apply `f` to every scenario.
    pub fn map(self, f: impl Fn(Money) -> Money) -> Self {
        Self {
            pessimistic: f(self.pessimistic),
            base: f(self.base),
            optimistic: f(self.optimistic),
        }
    }

    /// Subtract a scalar from every scenario.
    pub fn less(self, amount: Money) -> Self {
        self.map(|v| v - amount)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit, rounded to whole units per step".to_string(),
        },
    }
}
