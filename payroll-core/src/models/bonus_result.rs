use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of the separately-taxed year-end bonus calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusResult {
    pub tax: Decimal,
    /// Marginal rate of the matched bracket, as a percentage figure.
    pub tax_rate_percent: Decimal,
    pub after_tax: Decimal,
}
