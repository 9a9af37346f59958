//! Monthly household cash-flow simulation library
//!
//! This crate projects a household's finances decades ahead under stochastic
//! market returns. It supports:
//! - Accounts with a basis/gain split, per-account returns and withdrawal tax
//! - Mortgages with separate interest and principal service
//! - Incomes, RSU grants, noisy expenses and scheduled transfers
//! - Activity windows on every account and flow
//! - Layered marginal income taxes
//! - Single deterministic traces and seeded Monte Carlo batches
//!
//! # Example
//!
//! ```ignore
//! use nestegg_core::{Account, Household, HouseholdModel, SimulationConfig, simulate};
//!
//! struct Saver { household: Household, checking: AccountId, rent: ExpenseId }
//!
//! impl HouseholdModel for Saver {
//!     fn household(&self) -> &Household { &self.household }
//!     fn household_mut(&mut self) -> &mut Household { &mut self.household }
//!     fn run_month<R: Rng + ?Sized>(&mut self, _now: YearMonth, rng: &mut R)
//!         -> Result<(), SimulationError>
//!     {
//!         self.household.pay_expense(self.rent, &[self.checking], rng)?;
//!         Ok(())
//!     }
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod format;
pub mod household;
pub mod monte_carlo;
pub mod simulation;
pub mod taxes;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{ConfigError, SimulationError};
pub use household::{Household, Shortfall};
pub use model::*;
pub use monte_carlo::{monte_carlo_simulate, run_trial};
pub use simulation::{HouseholdModel, SimulationConfig, simulate};
pub use taxes::{IncomeTax, TaxBracket};
