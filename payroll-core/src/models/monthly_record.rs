use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month of the year breakdown, rounded to 2 decimal places.
///
/// `taxable_income` is the cumulative taxable income as of this month, the
/// value the withholding bracket was selected against; everything else is a
/// single-month amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Month index, 1 through 12.
    pub month: u32,
    pub pre_tax_income: Decimal,
    pub pension: Decimal,
    pub medical: Decimal,
    pub unemployment: Decimal,
    pub housing_fund: Decimal,
    pub taxable_income: Decimal,
    pub current_tax: Decimal,
    pub takehome: Decimal,
}
