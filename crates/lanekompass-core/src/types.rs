use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values (SEK). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Interest rates as quoted on a loan, in percent (3.79 = 3.79%).
pub type Percent = Decimal;

/// Plain ratios and shares expressed as decimals (0.37 = 37%).
pub type Rate = Decimal;

/// Months per year, used to annualise monthly figures.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Largest accepted monetary amount. Keeps every derived product inside
/// `Decimal` range.
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000_000);

/// Largest accepted rate or rate adjustment, in percent.
pub const MAX_RATE: Percent = dec!(1_000);

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

/// Monthly interest on a balance at an annual percentage rate:
/// `principal * rate / 100 / 12`.
pub fn monthly_interest(principal: Money, rate: Percent) -> Money {
    principal * rate / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
}
