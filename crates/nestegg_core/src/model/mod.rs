mod accounts;
mod distribution;
mod flows;
mod ids;
mod ledger;
mod period;
mod results;

pub use accounts::{Account, AccountKind, MortgageTerms, Withdrawal};
pub use distribution::{Dist, DistParams};
pub use flows::{Expense, Income, RsuGrant, Transfer};
pub use ids::{AccountId, ExpenseId, IncomeId, RsuId, TransferId};
pub use ledger::{EPSILON, LedgerEntry, LedgerTable};
pub use period::{ActiveWindow, Clock, Temporal, YearMonth};
pub use results::{
    BalanceRow, BalanceTable, CategoryPercentiles, MonteCarloResult, MonteCarloSummary,
    SimulationResult, YearPercentiles,
};
