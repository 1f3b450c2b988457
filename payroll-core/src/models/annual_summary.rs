use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole-year totals, rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub total_pre_tax: Decimal,
    /// Employee-side housing fund only; the employer match is not included.
    pub total_housing_fund: Decimal,
    pub total_tax: Decimal,
    /// Cash take-home: income minus benefits withheld minus tax.
    pub total_takehome: Decimal,
    /// Cash take-home plus both sides of the housing fund. The employer side
    /// is modeled from [`WithholdingYearConfig::employer_fund_match`], not
    /// from any per-employer data.
    ///
    /// [`WithholdingYearConfig::employer_fund_match`]: crate::models::WithholdingYearConfig
    pub total_takehome_with_housing: Decimal,
}
