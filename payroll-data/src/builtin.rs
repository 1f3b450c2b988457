//! Built-in reference dataset for mainland China, policy year 2024.

use payroll_core::ReferenceTables;

use crate::loader::{BracketTableLoader, CityLimitLoader, LoaderError};

const CITY_LIMITS_CSV: &str = include_str!("../data/city_limits_2024.csv");
const ANNUAL_BRACKETS_CSV: &str = include_str!("../data/annual_brackets_2024.csv");
const BONUS_BRACKETS_CSV: &str = include_str!("../data/bonus_brackets_2024.csv");

/// Reference tables for mainland China, 2024.
///
/// Covers five cities (北京, 上海, 广州, 深圳, 杭州 — 广州 publishes no
/// housing-fund base cap), the 7-row cumulative annual table and the 7-row
/// monthly-equivalent bonus table, both in force since the 2019 reform.
///
/// The data ships as embedded CSV and goes through the same loaders as
/// external files, so a malformed edit fails loudly here rather than deep in
/// a calculation.
pub fn china_2024() -> Result<ReferenceTables, LoaderError> {
    Ok(ReferenceTables {
        city_limits: CityLimitLoader::load(CITY_LIMITS_CSV.as_bytes())?,
        annual_brackets: BracketTableLoader::load(ANNUAL_BRACKETS_CSV.as_bytes())?,
        bonus_brackets: BracketTableLoader::load(BONUS_BRACKETS_CSV.as_bytes())?,
    })
}
