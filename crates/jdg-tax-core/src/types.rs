use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values, in PLN. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.19 = 19%). Never as percentages.
pub type Rate = Decimal;

/// Largest single amount a request may carry. Sixty months of such amounts
/// stay far inside the range of `Decimal`.
pub const MAX_AMOUNT: Money = dec!(1000000000000);

/// Number of fractional digits kept when amounts leave the engine.
pub const PRESENTATION_DP: u32 = 2;

/// Round an exact amount for presentation. Banker's rounding, two places.
///
/// Only the report layer calls this; the engine itself never rounds.
pub fn round_money(value: Money) -> Money {
    let mut rounded =
        value.round_dp_with_strategy(PRESENTATION_DP, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(PRESENTATION_DP);
    rounded
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
    pub tax_year: i32,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    tax_year: i32,
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
            tax_year,
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
