pub mod calculations;
pub mod models;

pub use calculations::{
    BonusCalculator, BonusError, ContributionCalculator, ContributionError, MONTHS_PER_YEAR,
    MonthlyContributions, MonthlySeries, WithholdingEngine, WithholdingError,
    YearWithholdingInput, YearWithholdingResult,
};
pub use models::*;
