//! Reference-data provisioning for the payroll calculation engines.
//!
//! The engines in `payroll-core` treat city contribution limits and tax
//! bracket tables as read-only inputs. This crate turns CSV — embedded or
//! external — into those structures, so a jurisdiction or policy-year swap
//! is a data change, never a code change.

mod builtin;
mod loader;

pub use builtin::china_2024;
pub use loader::{
    BracketRecord, BracketTableLoader, CityLimitLoader, CityLimitRecord, LoaderError,
};
