use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Year-level withholding parameters.
///
/// These change by policy year, not by employee, so they live in one place
/// instead of being scattered through the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingYearConfig {
    /// Fixed personal deduction applied once per month (起征点), currently 5000.
    pub monthly_deduction: Decimal,
    /// Statutory employee-side pension rate, currently 8%.
    pub pension_rate: Decimal,
    /// Statutory employee-side medical rate, currently 2%.
    pub medical_rate: Decimal,
    /// Statutory employee-side unemployment rate, currently 0.5%.
    pub unemployment_rate: Decimal,
    /// Employer housing-fund contribution expressed as a multiple of the
    /// employee contribution. 1.0 assumes a symmetric match. This is a
    /// modeling assumption, not a statutory fact; employers can differ.
    pub employer_fund_match: Decimal,
}

impl Default for WithholdingYearConfig {
    fn default() -> Self {
        Self {
            monthly_deduction: Decimal::new(5000, 0),
            pension_rate: Decimal::new(8, 2),
            medical_rate: Decimal::new(2, 2),
            unemployment_rate: Decimal::new(5, 3),
            employer_fund_match: Decimal::ONE,
        }
    }
}
