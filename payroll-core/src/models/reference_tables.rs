use serde::{Deserialize, Serialize};

use crate::models::{CityLimitTable, TaxBracket};

/// The read-only reference data a calculation runs against.
///
/// Built once at startup (from embedded or external CSV, see the data crate)
/// and treated as immutable from then on; swapping jurisdiction or year means
/// supplying a different bundle, never touching the algorithms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub city_limits: CityLimitTable,
    /// Cumulative-withholding table, indexed by cumulative annual taxable income.
    pub annual_brackets: Vec<TaxBracket>,
    /// One-time bonus table, indexed by the monthly-equivalent bonus amount.
    pub bonus_brackets: Vec<TaxBracket>,
}
