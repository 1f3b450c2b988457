//! Cumulative monthly withholding over a full year.
//!
//! China withholds salary income tax on a cumulative basis: each month the
//! year-to-date tax liability is recomputed against the progressive annual
//! table, and the month's tax is the difference from what was already
//! assessed. The engine runs this loop for months 1–12.
//!
//! # Monthly steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Accumulate salary and the month's contributions (see [`ContributionCalculator`]) |
//! | 2    | Cumulative taxable income = income − monthly deduction × m − benefits withheld |
//! | 3    | First-match bracket lookup; cumulative owed = taxable × rate − quick deduction |
//! | 4    | Month's tax = cumulative owed − previously assessed, clamped at zero |
//! | 5    | Carry the *unclamped* cumulative owed forward as the next baseline |
//! | 6    | Take-home = salary − insurances − housing fund − month's tax, floored at zero |
//!
//! Step 5 is deliberate and easy to miscopy: clamping affects only the
//! reported monthly figure, never the running baseline, so a clamped month is
//! not carried forward as a credit.
//!
//! Cumulative taxable income may be negative early in the year; no floor is
//! applied before the lookup and the lowest bracket matches trivially.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::{WithholdingEngine, YearWithholdingInput};
//! use payroll_core::models::{
//!     CityLimitTable, ReferenceTables, SocialInsuranceCaps, TaxBracket, WithholdingYearConfig,
//! };
//!
//! let mut city_limits = CityLimitTable::new();
//! city_limits.insert_city(
//!     "北京",
//!     SocialInsuranceCaps {
//!         pension: dec!(2711.28),
//!         medical: dec!(677.82),
//!         unemployment: dec!(169.46),
//!     },
//!     Some(dec!(33891)),
//! );
//!
//! let tables = ReferenceTables {
//!     city_limits,
//!     annual_brackets: vec![
//!         TaxBracket {
//!             upper_bound: Some(dec!(36000)),
//!             tax_rate: dec!(0.03),
//!             quick_deduction: dec!(0),
//!         },
//!         TaxBracket {
//!             upper_bound: None,
//!             tax_rate: dec!(0.10),
//!             quick_deduction: dec!(2520),
//!         },
//!     ],
//!     bonus_brackets: vec![],
//! };
//!
//! let engine = WithholdingEngine::new(&tables, WithholdingYearConfig::default());
//! let input = YearWithholdingInput {
//!     monthly_salaries: dec!(10000).into(),
//!     social_security_bases: dec!(10000).into(),
//!     city: "北京".to_string(),
//!     insurance_rate: dec!(0.105),
//!     housing_fund_rate: dec!(0.12),
//! };
//!
//! let result = engine.calculate(&input).unwrap();
//!
//! assert_eq!(result.monthly.len(), 12);
//! // Month 1: taxable 10000 − 5000 − 2250 = 2750, lowest bracket at 3%.
//! assert_eq!(result.monthly[0].current_tax, dec!(82.50));
//! assert_eq!(result.annual.total_tax, dec!(990.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::{max, round_half_up};
use crate::calculations::contributions::{
    ContributionCalculator, ContributionError, MonthlyContributions,
};
use crate::models::{
    AnnualSummary, MonthlyRecord, ReferenceTables, TaxBracket, WithholdingYearConfig,
};

/// Number of months in a calculation year. The loop never runs shorter or longer.
pub const MONTHS_PER_YEAR: usize = 12;

/// Errors that can occur during the year withholding calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WithholdingError {
    /// A per-month sequence had the wrong length.
    #[error("monthly series must be a single value or 12 entries, got {0}")]
    InputShape(usize),

    /// A rate fell outside the open interval (0, 1).
    #[error("{name} must be within (0, 1), got {value}")]
    RateOutOfRange { name: &'static str, value: Decimal },

    /// A currency amount that must be non-negative was negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },

    /// The annual bracket table was empty.
    #[error("no tax brackets provided")]
    NoTaxBrackets,

    /// The bracket table was exhausted without a match. Well-formed tables
    /// end in an unbounded bracket, so this indicates broken reference data.
    #[error("no tax bracket found for cumulative taxable income {0}")]
    NoMatchingBracket(Decimal),

    #[error(transparent)]
    Contribution(#[from] ContributionError),
}

/// A per-month input: one scalar broadcast to all 12 months, or exactly 12 values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonthlySeries {
    Uniform(Decimal),
    PerMonth(Vec<Decimal>),
}

impl MonthlySeries {
    /// Expands to exactly [`MONTHS_PER_YEAR`] values.
    ///
    /// # Errors
    ///
    /// Returns [`WithholdingError::InputShape`] for any other length.
    pub fn resolve(&self) -> Result<Vec<Decimal>, WithholdingError> {
        match self {
            Self::Uniform(value) => Ok(vec![*value; MONTHS_PER_YEAR]),
            Self::PerMonth(values) if values.len() == MONTHS_PER_YEAR => Ok(values.clone()),
            Self::PerMonth(values) => Err(WithholdingError::InputShape(values.len())),
        }
    }
}

impl From<Decimal> for MonthlySeries {
    fn from(value: Decimal) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<Decimal>> for MonthlySeries {
    fn from(values: Vec<Decimal>) -> Self {
        Self::PerMonth(values)
    }
}

/// Input values for a full-year calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWithholdingInput {
    /// Gross salary per month.
    pub monthly_salaries: MonthlySeries,

    /// Social-insurance contribution base per month.
    pub social_security_bases: MonthlySeries,

    /// City whose contribution limits apply. Must exist in the limit table.
    pub city: String,

    /// Aggregate five-insurance personal rate as entered by the caller.
    /// Range-checked for sanity; the computation applies the statutory
    /// per-line rates from [`WithholdingYearConfig`] instead.
    pub insurance_rate: Decimal,

    /// Employee-side housing-fund rate, open interval (0, 1).
    pub housing_fund_rate: Decimal,
}

/// Twelve monthly records plus the annual roll-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWithholdingResult {
    pub monthly: Vec<MonthlyRecord>,
    pub annual: AnnualSummary,
}

/// The cumulative withholding engine.
///
/// Holds a borrow of the read-only reference tables plus the year
/// configuration; each [`calculate`](Self::calculate) call is a pure function
/// of its input, so one engine can serve any number of calls.
#[derive(Debug, Clone)]
pub struct WithholdingEngine<'a> {
    tables: &'a ReferenceTables,
    config: WithholdingYearConfig,
}

impl<'a> WithholdingEngine<'a> {
    pub fn new(
        tables: &'a ReferenceTables,
        config: WithholdingYearConfig,
    ) -> Self {
        Self { tables, config }
    }

    /// Runs the full 12-month calculation.
    ///
    /// All-or-nothing: any validation or lookup failure aborts the
    /// invocation without partial results.
    ///
    /// # Errors
    ///
    /// Returns [`WithholdingError`] if the bracket table is empty or
    /// exhausted, a rate is out of range, an amount is negative, a monthly
    /// sequence has the wrong shape, or the city is unknown.
    pub fn calculate(
        &self,
        input: &YearWithholdingInput,
    ) -> Result<YearWithholdingResult, WithholdingError> {
        if self.tables.annual_brackets.is_empty() {
            return Err(WithholdingError::NoTaxBrackets);
        }
        self.validate_config()?;
        validate_rate("insurance_rate", input.insurance_rate)?;
        validate_rate("housing_fund_rate", input.housing_fund_rate)?;

        let salaries = input.monthly_salaries.resolve()?;
        let bases = input.social_security_bases.resolve()?;
        validate_non_negative("monthly salary", &salaries)?;

        let contributions = ContributionCalculator::for_city(
            &self.tables.city_limits,
            &input.city,
            &self.config,
            input.housing_fund_rate,
        )?;

        let mut cumulative_income = Decimal::ZERO;
        let mut cumulative_withheld = Decimal::ZERO;
        let mut cumulative_housing_fund = Decimal::ZERO;
        // Two-variable tax state: the unclamped baseline the next month
        // reconciles against, and the clamped amounts actually reported.
        let mut cumulative_tax_assessed = Decimal::ZERO;
        let mut total_tax_reported = Decimal::ZERO;

        let mut monthly = Vec::with_capacity(MONTHS_PER_YEAR);

        for (index, (&salary, &base)) in salaries.iter().zip(&bases).enumerate() {
            let month = index as u32 + 1;
            let contribution = contributions.calculate(base)?;

            cumulative_income += salary;
            cumulative_withheld += contribution.total_withheld();
            cumulative_housing_fund += contribution.housing_fund;

            let taxable = self.cumulative_taxable_income(
                cumulative_income,
                month,
                cumulative_withheld,
            );
            let cumulative_owed = self.cumulative_tax_owed(taxable)?;
            let current_tax = reported_increment(month, cumulative_owed, cumulative_tax_assessed);
            cumulative_tax_assessed = cumulative_owed;
            total_tax_reported += current_tax;

            let takehome = monthly_takehome(month, salary, &contribution, current_tax);

            monthly.push(MonthlyRecord {
                month,
                pre_tax_income: round_half_up(salary),
                pension: round_half_up(contribution.pension),
                medical: round_half_up(contribution.medical),
                unemployment: round_half_up(contribution.unemployment),
                housing_fund: round_half_up(contribution.housing_fund),
                taxable_income: round_half_up(taxable),
                current_tax: round_half_up(current_tax),
                takehome: round_half_up(takehome),
            });
        }

        let total_takehome = cumulative_income - cumulative_withheld - total_tax_reported;
        let both_sides_factor = Decimal::ONE + self.config.employer_fund_match;

        let annual = AnnualSummary {
            total_pre_tax: round_half_up(cumulative_income),
            total_housing_fund: round_half_up(cumulative_housing_fund),
            total_tax: round_half_up(total_tax_reported),
            total_takehome: round_half_up(total_takehome),
            total_takehome_with_housing: round_half_up(
                total_takehome + both_sides_factor * cumulative_housing_fund,
            ),
        };

        Ok(YearWithholdingResult { monthly, annual })
    }

    /// Year-to-date taxable income as of month `m` (step 2).
    ///
    /// May be negative when benefits and the fixed deduction outrun income;
    /// the caller looks the raw value up anyway.
    fn cumulative_taxable_income(
        &self,
        cumulative_income: Decimal,
        month: u32,
        cumulative_withheld: Decimal,
    ) -> Decimal {
        let taxable = cumulative_income
            - self.config.monthly_deduction * Decimal::from(month)
            - cumulative_withheld;

        if taxable < Decimal::ZERO {
            warn!(
                month,
                taxable = %taxable,
                "cumulative taxable income is negative; lowest bracket applies"
            );
        }

        taxable
    }

    /// First-match bracket scan (step 3).
    fn cumulative_tax_owed(
        &self,
        taxable: Decimal,
    ) -> Result<Decimal, WithholdingError> {
        let bracket = lookup_bracket(&self.tables.annual_brackets, taxable)
            .ok_or(WithholdingError::NoMatchingBracket(taxable))?;

        Ok(taxable * bracket.tax_rate - bracket.quick_deduction)
    }

    fn validate_config(&self) -> Result<(), WithholdingError> {
        validate_rate("pension_rate", self.config.pension_rate)?;
        validate_rate("medical_rate", self.config.medical_rate)?;
        validate_rate("unemployment_rate", self.config.unemployment_rate)?;
        if self.config.monthly_deduction < Decimal::ZERO {
            return Err(WithholdingError::NegativeAmount {
                name: "monthly_deduction",
                value: self.config.monthly_deduction,
            });
        }
        if self.config.employer_fund_match < Decimal::ZERO {
            return Err(WithholdingError::NegativeAmount {
                name: "employer_fund_match",
                value: self.config.employer_fund_match,
            });
        }
        Ok(())
    }
}

/// Selects the first bracket whose upper bound admits `amount`.
fn lookup_bracket(
    brackets: &[TaxBracket],
    amount: Decimal,
) -> Option<&TaxBracket> {
    brackets.iter().find(|bracket| bracket.matches(amount))
}

/// The month's reported tax (step 4): the cumulative delta, clamped at zero.
fn reported_increment(
    month: u32,
    cumulative_owed: Decimal,
    cumulative_assessed: Decimal,
) -> Decimal {
    let increment = cumulative_owed - cumulative_assessed;

    if increment < Decimal::ZERO {
        warn!(
            month,
            increment = %increment,
            "negative incremental tax clamped to zero; baseline is unaffected"
        );
    }

    max(increment, Decimal::ZERO)
}

/// Cash left this month (step 6), floored at zero.
fn monthly_takehome(
    month: u32,
    salary: Decimal,
    contribution: &MonthlyContributions,
    current_tax: Decimal,
) -> Decimal {
    let takehome = salary - contribution.social_total() - contribution.housing_fund - current_tax;

    if takehome < Decimal::ZERO {
        warn!(
            month,
            takehome = %takehome,
            "take-home went negative after withholding; floored at zero"
        );
    }

    max(takehome, Decimal::ZERO)
}

fn validate_rate(
    name: &'static str,
    value: Decimal,
) -> Result<(), WithholdingError> {
    if value <= Decimal::ZERO || value >= Decimal::ONE {
        return Err(WithholdingError::RateOutOfRange { name, value });
    }
    Ok(())
}

fn validate_non_negative(
    name: &'static str,
    values: &[Decimal],
) -> Result<(), WithholdingError> {
    match values.iter().find(|value| **value < Decimal::ZERO) {
        Some(value) => Err(WithholdingError::NegativeAmount { name, value: *value }),
        None => Ok(()),
    }
}
