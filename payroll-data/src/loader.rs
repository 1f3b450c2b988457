use std::io::Read;

use payroll_core::{CityLimitTable, SocialInsuranceCaps, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading reference data.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("duplicate city '{0}' in limit table")]
    DuplicateCity(String),

    #[error("bracket table is empty")]
    EmptyBracketTable,

    #[error("bracket upper bounds must be strictly ascending (row {row})")]
    NonAscendingBound { row: usize },

    #[error("only the last bracket may be unbounded (row {row})")]
    UnboundedBeforeLast { row: usize },

    #[error("the last bracket must be unbounded")]
    BoundedLastBracket,
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a city limit CSV file.
///
/// Columns:
/// - `city`: city name as the engines will look it up
/// - `pension_cap`, `medical_cap`, `unemployment_cap`: monthly employee-side
///   contribution caps
/// - `housing_fund_base_cap`: monthly housing-fund base cap; empty means the
///   city does not cap the fund base
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CityLimitRecord {
    pub city: String,
    pub pension_cap: Decimal,
    pub medical_cap: Decimal,
    pub unemployment_cap: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub housing_fund_base_cap: Option<Decimal>,
}

/// A single record from a bracket table CSV file.
///
/// Columns:
/// - `upper_bound`: inclusive upper bound of the row; empty means unbounded
///   (only legal on the last row)
/// - `tax_rate`: marginal rate as a decimal fraction (e.g. 0.10 for 10%)
/// - `quick_deduction`: the fixed deduction subtracted after applying the rate
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub tax_rate: Decimal,
    pub quick_deduction: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for city contribution limit tables.
pub struct CityLimitLoader;

impl CityLimitLoader {
    /// Parses city limit records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CityLimitRecord>, LoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: CityLimitRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Builds the lookup table, rejecting duplicate city names.
    pub fn build(records: &[CityLimitRecord]) -> Result<CityLimitTable, LoaderError> {
        let mut table = CityLimitTable::new();

        for record in records {
            if table.contains_city(&record.city) {
                return Err(LoaderError::DuplicateCity(record.city.clone()));
            }
            table.insert_city(
                record.city.clone(),
                SocialInsuranceCaps {
                    pension: record.pension_cap,
                    medical: record.medical_cap,
                    unemployment: record.unemployment_cap,
                },
                record.housing_fund_base_cap,
            );
        }

        Ok(table)
    }

    /// Parses and builds in one step.
    pub fn load<R: Read>(reader: R) -> Result<CityLimitTable, LoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }
}

/// Loader for progressive bracket tables (annual cumulative or bonus).
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parses bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, LoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Validates the table shape and converts to engine brackets.
    ///
    /// The engines select the first row whose bound admits the amount, so a
    /// usable table must be strictly ascending with exactly one unbounded
    /// row at the end.
    pub fn build(records: &[BracketRecord]) -> Result<Vec<TaxBracket>, LoaderError> {
        if records.is_empty() {
            return Err(LoaderError::EmptyBracketTable);
        }

        let last = records.len() - 1;
        let mut previous: Option<Decimal> = None;

        for (index, record) in records.iter().enumerate() {
            match (index == last, record.upper_bound) {
                (false, None) => {
                    return Err(LoaderError::UnboundedBeforeLast { row: index + 1 });
                }
                (true, Some(_)) => return Err(LoaderError::BoundedLastBracket),
                (false, Some(bound)) => {
                    if previous.is_some_and(|p| bound <= p) {
                        return Err(LoaderError::NonAscendingBound { row: index + 1 });
                    }
                    previous = Some(bound);
                }
                (true, None) => {}
            }
        }

        Ok(records
            .iter()
            .map(|record| TaxBracket {
                upper_bound: record.upper_bound,
                tax_rate: record.tax_rate,
                quick_deduction: record.quick_deduction,
            })
            .collect())
    }

    /// Parses and builds in one step.
    pub fn load<R: Read>(reader: R) -> Result<Vec<TaxBracket>, LoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }
}
