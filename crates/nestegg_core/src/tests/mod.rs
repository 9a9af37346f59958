//! Integration tests for the nestegg simulation engine
//!
//! Tests are organized by topic:
//! - `household` - Multi-month cash-flow scenarios on a bare household
//! - `simulation` - Driver mechanics: balance rows, summaries, failures
//! - `monte_carlo` - Batch seeding, reproducibility and failure rates

mod household;

use rand::Rng;

use crate::error::{ConfigError, SimulationError};
use crate::household::Household;
use crate::model::{Account, AccountId, Dist, Expense, ExpenseId, Income, IncomeId, YearMonth};
use crate::simulation::HouseholdModel;

/// Salary into checking, rent out of checking then brokerage, excess cash
/// swept into the brokerage.
pub(crate) struct Saver {
    pub household: Household,
    pub checking: AccountId,
    pub brokerage: AccountId,
    pub salary: IncomeId,
    pub rent: ExpenseId,
}

impl Saver {
    /// With `volatile` the brokerage tracks the market with its own noise;
    /// otherwise nothing grows and every balance is exact.
    pub fn new(salary: f64, rent: f64, volatile: bool) -> Result<Self, ConfigError> {
        let mut household = Household::new();
        let checking = household.add_account(
            "Checking",
            Account::new(10_000.0).with_category("Cash"),
        )?;
        let mut brokerage = Account::new(0.0).with_category("Investments");
        if volatile {
            brokerage = brokerage.with_beta(1.0).with_alpha(Dist::new(0.0, 0.05)?);
        }
        let brokerage = household.add_account("Brokerage", brokerage)?;
        household.add_account("Clearing", Account::new(0.0).unreported())?;
        let salary = household.add_income("Salary", Income::new(salary, Dist::fixed(0.0)))?;
        let rent = household.add_expense("Rent", Expense::monthly(rent, 0.0)?)?;

        Ok(Self {
            household,
            checking,
            brokerage,
            salary,
            rent,
        })
    }
}

impl HouseholdModel for Saver {
    fn household(&self) -> &Household {
        &self.household
    }

    fn household_mut(&mut self) -> &mut Household {
        &mut self.household
    }

    fn run_month<R: Rng + ?Sized>(
        &mut self,
        _now: YearMonth,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        let hh = &mut self.household;
        hh.collect_income(self.salary, self.checking);
        hh.pay_expense(self.rent, &[self.checking, self.brokerage], rng)?;
        hh.sweep(self.checking, self.brokerage, 10_000.0);
        Ok(())
    }
}
