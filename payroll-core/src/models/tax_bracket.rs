use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive tax rate table.
///
/// Rows are ordered ascending by `upper_bound`; the final row has
/// `upper_bound: None` and matches any amount. Tax for a matched row is
/// `amount × tax_rate − quick_deduction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of taxable income for this row; `None` is unbounded.
    pub upper_bound: Option<Decimal>,
    pub tax_rate: Decimal,
    pub quick_deduction: Decimal,
}

impl TaxBracket {
    /// Whether this row applies to `amount` under first-match selection.
    pub fn matches(&self, amount: Decimal) -> bool {
        self.upper_bound.map_or(true, |bound| amount <= bound)
    }
}
