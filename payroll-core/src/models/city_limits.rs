use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly employee-side contribution caps for one city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsuranceCaps {
    pub pension: Decimal,
    pub medical: Decimal,
    pub unemployment: Decimal,
}

/// City-indexed contribution limits.
///
/// Holds the social-insurance caps for every known city and, separately, the
/// housing-fund contribution base cap. A city may legitimately have no
/// housing-fund cap, in which case the full base is fund-eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityLimitTable {
    social_caps: BTreeMap<String, SocialInsuranceCaps>,
    housing_fund_caps: BTreeMap<String, Decimal>,
}

impl CityLimitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a city. Replaces any previous entry for the same name.
    pub fn insert_city(
        &mut self,
        city: impl Into<String>,
        caps: SocialInsuranceCaps,
        housing_fund_base_cap: Option<Decimal>,
    ) {
        let city = city.into();
        if let Some(cap) = housing_fund_base_cap {
            self.housing_fund_caps.insert(city.clone(), cap);
        } else {
            self.housing_fund_caps.remove(&city);
        }
        self.social_caps.insert(city, caps);
    }

    pub fn contains_city(&self, city: &str) -> bool {
        self.social_caps.contains_key(city)
    }

    pub fn social_caps(&self, city: &str) -> Option<SocialInsuranceCaps> {
        self.social_caps.get(city).copied()
    }

    /// Housing-fund base cap for `city`, or `None` when the base is uncapped.
    pub fn housing_fund_base_cap(&self, city: &str) -> Option<Decimal> {
        self.housing_fund_caps.get(city).copied()
    }

    /// Known city names in a stable order, for pickers and diagnostics.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.social_caps.keys().map(String::as_str)
    }
}
