//! Monthly social-insurance and housing-fund contributions.
//!
//! For a given social-insurance base, each insurance line is the base times
//! its statutory employee-side rate, capped at the city's monthly limit. The
//! housing fund caps the *base* instead (where the city publishes a cap) and
//! then applies the caller's fund rate to the capped base.
//!
//! All amounts are returned unrounded; rounding happens where the values are
//! externalized into output records.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::ContributionCalculator;
//! use payroll_core::models::{CityLimitTable, SocialInsuranceCaps, WithholdingYearConfig};
//!
//! let mut limits = CityLimitTable::new();
//! limits.insert_city(
//!     "北京",
//!     SocialInsuranceCaps {
//!         pension: dec!(2711.28),
//!         medical: dec!(677.82),
//!         unemployment: dec!(169.46),
//!     },
//!     Some(dec!(33891)),
//! );
//!
//! let calculator = ContributionCalculator::for_city(
//!     &limits,
//!     "北京",
//!     &WithholdingYearConfig::default(),
//!     dec!(0.12),
//! ).unwrap();
//!
//! // A 40000 base hits every cap in this city.
//! let contributions = calculator.calculate(dec!(40000)).unwrap();
//! assert_eq!(contributions.pension, dec!(2711.28));
//! assert_eq!(contributions.medical, dec!(677.82));
//! assert_eq!(contributions.housing_fund, dec!(33891) * dec!(0.12));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CityLimitTable, SocialInsuranceCaps, WithholdingYearConfig};

/// Errors that can occur while deriving monthly contributions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContributionError {
    /// The requested city has no entry in the limit table. This is a
    /// configuration problem, not an input problem.
    #[error("city '{0}' not present in the contribution limit table")]
    UnknownCity(String),

    /// The social-insurance base must be non-negative.
    #[error("social-insurance base must be non-negative, got {0}")]
    NegativeBase(Decimal),
}

/// Employee-side contribution amounts for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyContributions {
    pub pension: Decimal,
    pub medical: Decimal,
    pub unemployment: Decimal,
    pub housing_fund: Decimal,
}

impl MonthlyContributions {
    /// Sum of the three insurance lines.
    pub fn social_total(&self) -> Decimal {
        self.pension + self.medical + self.unemployment
    }

    /// Everything withheld for benefits: insurances plus housing fund.
    pub fn total_withheld(&self) -> Decimal {
        self.social_total() + self.housing_fund
    }
}

/// Per-city contribution calculator.
///
/// City resolution happens once at construction so an unknown city fails
/// before any month is computed.
#[derive(Debug, Clone)]
pub struct ContributionCalculator {
    caps: SocialInsuranceCaps,
    housing_fund_base_cap: Option<Decimal>,
    pension_rate: Decimal,
    medical_rate: Decimal,
    unemployment_rate: Decimal,
    housing_fund_rate: Decimal,
}

impl ContributionCalculator {
    /// Resolves `city` against the limit table and fixes the rates.
    ///
    /// # Errors
    ///
    /// Returns [`ContributionError::UnknownCity`] when the city has no entry.
    pub fn for_city(
        limits: &CityLimitTable,
        city: &str,
        config: &WithholdingYearConfig,
        housing_fund_rate: Decimal,
    ) -> Result<Self, ContributionError> {
        let caps = limits
            .social_caps(city)
            .ok_or_else(|| ContributionError::UnknownCity(city.to_string()))?;

        Ok(Self {
            caps,
            housing_fund_base_cap: limits.housing_fund_base_cap(city),
            pension_rate: config.pension_rate,
            medical_rate: config.medical_rate,
            unemployment_rate: config.unemployment_rate,
            housing_fund_rate,
        })
    }

    /// Derives the four contribution amounts for one month's base.
    ///
    /// Cap comparisons are inclusive: a base sitting exactly on a cap
    /// boundary contributes exactly the cap.
    ///
    /// # Errors
    ///
    /// Returns [`ContributionError::NegativeBase`] for a negative base.
    pub fn calculate(
        &self,
        social_base: Decimal,
    ) -> Result<MonthlyContributions, ContributionError> {
        if social_base < Decimal::ZERO {
            return Err(ContributionError::NegativeBase(social_base));
        }

        Ok(MonthlyContributions {
            pension: (social_base * self.pension_rate).min(self.caps.pension),
            medical: (social_base * self.medical_rate).min(self.caps.medical),
            unemployment: (social_base * self.unemployment_rate).min(self.caps.unemployment),
            housing_fund: self.fund_eligible_base(social_base) * self.housing_fund_rate,
        })
    }

    /// The portion of the base the housing-fund rate applies to.
    fn fund_eligible_base(
        &self,
        social_base: Decimal,
    ) -> Decimal {
        match self.housing_fund_base_cap {
            Some(cap) => social_base.min(cap),
            None => social_base,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    /// Beijing-like limits used throughout these tests.
    fn test_limits() -> CityLimitTable {
        let mut limits = CityLimitTable::new();
        limits.insert_city(
            "北京",
            SocialInsuranceCaps {
                pension: dec!(2711.28),
                medical: dec!(677.82),
                unemployment: dec!(169.46),
            },
            Some(dec!(33891)),
        );
        limits.insert_city(
            "广州",
            SocialInsuranceCaps {
                pension: dec!(2278.56),
                medical: dec!(569.64),
                unemployment: dec!(142.41),
            },
            None,
        );
        limits
    }

    fn calculator_for(city: &str) -> ContributionCalculator {
        ContributionCalculator::for_city(
            &test_limits(),
            city,
            &WithholdingYearConfig::default(),
            dec!(0.12),
        )
        .unwrap()
    }

    // =========================================================================
    // for_city tests
    // =========================================================================

    #[test]
    fn for_city_rejects_unknown_city() {
        let result = ContributionCalculator::for_city(
            &test_limits(),
            "Atlantis",
            &WithholdingYearConfig::default(),
            dec!(0.12),
        );

        assert_eq!(
            result.unwrap_err(),
            ContributionError::UnknownCity("Atlantis".to_string())
        );
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_rejects_negative_base() {
        let calculator = calculator_for("北京");

        let result = calculator.calculate(dec!(-1));

        assert_eq!(result.unwrap_err(), ContributionError::NegativeBase(dec!(-1)));
    }

    #[test]
    fn zero_base_yields_zero_contributions() {
        let calculator = calculator_for("北京");

        let contributions = calculator.calculate(dec!(0)).unwrap();

        assert_eq!(contributions.pension, dec!(0));
        assert_eq!(contributions.medical, dec!(0));
        assert_eq!(contributions.unemployment, dec!(0));
        assert_eq!(contributions.housing_fund, dec!(0));
        assert_eq!(contributions.total_withheld(), dec!(0));
    }

    #[test]
    fn uncapped_base_uses_statutory_rates() {
        let calculator = calculator_for("北京");

        let contributions = calculator.calculate(dec!(10000)).unwrap();

        assert_eq!(contributions.pension, dec!(800));
        assert_eq!(contributions.medical, dec!(200));
        assert_eq!(contributions.unemployment, dec!(50));
        assert_eq!(contributions.housing_fund, dec!(1200));
        assert_eq!(contributions.social_total(), dec!(1050));
        assert_eq!(contributions.total_withheld(), dec!(2250));
    }

    #[test]
    fn high_base_is_capped_per_line() {
        let calculator = calculator_for("北京");

        let contributions = calculator.calculate(dec!(40000)).unwrap();

        assert_eq!(contributions.pension, dec!(2711.28));
        assert_eq!(contributions.medical, dec!(677.82));
        assert_eq!(contributions.unemployment, dec!(169.46));
        // Housing fund caps the base, then applies the rate.
        assert_eq!(contributions.housing_fund, dec!(4066.92));
    }

    #[test]
    fn base_exactly_at_pension_cap_boundary_is_inclusive() {
        // 33891 × 0.08 == 2711.28, the cap itself: no off-by-one at the boundary.
        let calculator = calculator_for("北京");

        let contributions = calculator.calculate(dec!(33891)).unwrap();

        assert_eq!(contributions.pension, dec!(2711.28));
        assert_eq!(contributions.medical, dec!(677.82));
        assert_eq!(contributions.unemployment, dec!(169.455));
    }

    #[test]
    fn city_without_housing_cap_funds_the_full_base() {
        let calculator = calculator_for("广州");

        let contributions = calculator.calculate(dec!(50000)).unwrap();

        assert_eq!(contributions.housing_fund, dec!(6000));
        // The insurance lines still cap.
        assert_eq!(contributions.pension, dec!(2278.56));
    }

    #[test]
    fn contributions_never_exceed_caps() {
        let calculator = calculator_for("北京");

        for base in [dec!(33891), dec!(50000), dec!(100000), dec!(1000000)] {
            let contributions = calculator.calculate(base).unwrap();

            assert!(contributions.pension <= dec!(2711.28));
            assert!(contributions.medical <= dec!(677.82));
            assert!(contributions.unemployment <= dec!(169.46));
        }
    }
}
