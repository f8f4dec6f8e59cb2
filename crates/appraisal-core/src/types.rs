use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.13 = 13%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Outcome of an IRR search.
///
/// A cash-flow vector with no sign change has no internal rate of return;
/// that is a legitimate answer, not an error, and it is never collapsed
/// to a zero rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "rate", rename_all = "snake_case")]
pub enum Irr {
    Rate(Rate),
    NotComputable,
}

impl Irr {
    pub fn as_rate(&self) -> Option<Rate> {
        match self {
            Irr::Rate(r) => Some(*r),
            Irr::NotComputable => None,
        }
    }
}

/// Outcome of a payback-period scan (plain or discounted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "years", rename_all = "snake_case")]
pub enum Payback {
    Years(Years),
    NeverRecovers,
}

impl Payback {
    pub fn as_years(&self) -> Option<Years> {
        match self {
            Payback::Years(y) => Some(*y),
            Payback::NeverRecovers => None,
        }
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
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
