mod annual_summary;
mod bonus_result;
mod city_limits;
mod monthly_record;
mod reference_tables;
mod tax_bracket;
mod year_config;

pub use annual_summary::AnnualSummary;
pub use bonus_result::BonusResult;
pub use city_limits::{CityLimitTable, SocialInsuranceCaps};
pub use monthly_record::MonthlyRecord;
pub use reference_tables::ReferenceTables;
pub use tax_bracket::TaxBracket;
pub use year_config::WithholdingYearConfig;
