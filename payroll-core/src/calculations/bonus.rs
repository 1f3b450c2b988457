//! Separately-taxed year-end bonus (全年一次性奖金).
//!
//! The bonus never enters the cumulative mechanism. Its twelfth determines
//! the bracket in a monthly-equivalent rate table, and the matched rate and
//! quick deduction then apply to the *full* bonus amount.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::BonusCalculator;
//! use payroll_core::models::TaxBracket;
//!
//! let brackets = vec![
//!     TaxBracket {
//!         upper_bound: Some(dec!(3000)),
//!         tax_rate: dec!(0.03),
//!         quick_deduction: dec!(0),
//!     },
//!     TaxBracket {
//!         upper_bound: Some(dec!(12000)),
//!         tax_rate: dec!(0.10),
//!         quick_deduction: dec!(210),
//!     },
//!     TaxBracket {
//!         upper_bound: None,
//!         tax_rate: dec!(0.20),
//!         quick_deduction: dec!(1410),
//!     },
//! ];
//!
//! let calculator = BonusCalculator::new(&brackets);
//! let result = calculator.calculate(dec!(100000)).unwrap();
//!
//! // 100000 / 12 = 8333.33… falls in the 10% row.
//! assert_eq!(result.tax, dec!(9790.00));
//! assert_eq!(result.tax_rate_percent, dec!(10));
//! assert_eq!(result.after_tax, dec!(90210.00));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::calculations::withholding::MONTHS_PER_YEAR;
use crate::models::{BonusResult, TaxBracket};

/// Errors that can occur during the bonus tax calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BonusError {
    /// The bonus amount must be non-negative.
    #[error("bonus amount must be non-negative, got {0}")]
    NegativeBonus(Decimal),

    /// The bonus bracket table was empty.
    #[error("no bonus tax brackets provided")]
    NoTaxBrackets,

    /// The bracket table was exhausted without a match.
    #[error("no bonus tax bracket found for monthly-equivalent amount {0}")]
    NoMatchingBracket(Decimal),
}

/// Calculator for the one-time bonus tax.
///
/// Holds a borrow of the monthly-equivalent bracket table; independent of
/// the cumulative withholding engine and invoked at most once per year.
#[derive(Debug, Clone)]
pub struct BonusCalculator<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BonusCalculator<'a> {
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Computes tax, marginal rate and the after-tax amount for `bonus`.
    ///
    /// A bonus of exactly zero is a well-defined degenerate input: it
    /// short-circuits to an all-zero result without consulting the table.
    ///
    /// # Errors
    ///
    /// Returns [`BonusError`] for a negative bonus, an empty table, or a
    /// table that is exhausted without a match.
    pub fn calculate(
        &self,
        bonus: Decimal,
    ) -> Result<BonusResult, BonusError> {
        if bonus < Decimal::ZERO {
            return Err(BonusError::NegativeBonus(bonus));
        }
        if bonus == Decimal::ZERO {
            return Ok(BonusResult {
                tax: Decimal::ZERO,
                tax_rate_percent: Decimal::ZERO,
                after_tax: Decimal::ZERO,
            });
        }
        if self.brackets.is_empty() {
            return Err(BonusError::NoTaxBrackets);
        }

        let monthly_equivalent = bonus / Decimal::from(MONTHS_PER_YEAR as u32);
        let bracket = self
            .brackets
            .iter()
            .find(|bracket| bracket.matches(monthly_equivalent))
            .ok_or(BonusError::NoMatchingBracket(monthly_equivalent))?;

        let tax = bonus * bracket.tax_rate - bracket.quick_deduction;

        Ok(BonusResult {
            tax: round_half_up(tax),
            tax_rate_percent: bracket.tax_rate * Decimal::ONE_HUNDRED,
            after_tax: round_half_up(bonus - tax),
        })
    }
}
