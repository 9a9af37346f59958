//! Household cash-flow planner
//!
//! Command-line front end over `nestegg_core`: an example two-earner
//! household configurable through YAML profiles, ledger export, and logging
//! setup for the binary.

pub mod household;
pub mod logging;
pub mod report;

#[cfg(test)]
mod tests;

pub use household::{
    AccountProfile, EarnerProfile, ExampleHousehold, ExpenseProfile, HouseholdProfile,
    MortgageProfile, RsuProfile,
};
pub use logging::init_logging;
pub use report::{LedgerFormat, export_ledgers};
