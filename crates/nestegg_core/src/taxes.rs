//! Marginal income tax over stacked monthly income layers
//!
//! Tax is accrued in two phases. [`IncomeTax::calculate`] walks a list of
//! accounts, treating each balance as one more layer of this month's income on
//! top of the layers before it, and queues the tax owed on each layer.
//! [`IncomeTax::commit`] then withholds every queued amount from the account it
//! was computed for. Monthly amounts are annualised against the bracket table
//! and the result is brought back to a monthly figure.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::household::Household;
use crate::model::AccountId;

const MONTHS_PER_YEAR: f64 = 12.0;

/// One marginal bracket: income up to `upper` (annual) is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper: f64,
    pub rate: f64,
}

#[derive(Debug, Clone)]
pub struct IncomeTax {
    name: String,
    brackets: Vec<TaxBracket>,
    pending: Vec<(AccountId, f64)>,
}

impl IncomeTax {
    /// Build a tax from brackets ordered by strictly increasing upper bound.
    ///
    /// Income beyond the last bound is taxed at the last rate.
    pub fn new(name: impl Into<String>, brackets: Vec<TaxBracket>) -> Result<Self, ConfigError> {
        let name = name.into();
        let invalid = |reason| ConfigError::InvalidBrackets {
            name: name.clone(),
            reason,
        };

        if brackets.is_empty() {
            return Err(invalid("at least one bracket is required"));
        }
        if brackets.iter().any(|b| !(0.0..=1.0).contains(&b.rate)) {
            return Err(invalid("rates must be within [0, 1]"));
        }
        for pair in brackets.windows(2) {
            if pair[1].upper <= pair[0].upper {
                return Err(invalid("upper bounds must be strictly increasing"));
            }
            if pair[1].rate < pair[0].rate {
                return Err(invalid("rates must not decrease"));
            }
        }

        Ok(Self {
            name,
            brackets,
            pending: Vec::new(),
        })
    }

    fn preset(name: &str, uppers: &[f64], rates: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            brackets: uppers
                .iter()
                .zip(rates)
                .map(|(&upper, &rate)| TaxBracket { upper, rate })
                .collect(),
            pending: Vec::new(),
        }
    }

    /// 2020 single-filer federal brackets.
    pub fn federal() -> Self {
        Self::preset(
            "Federal income tax",
            &[19_750.0, 80_250.0, 171_050.0, 326_600.0, 414_700.0, 622_050.0, 99_999_999.0],
            &[0.10, 0.12, 0.22, 0.24, 0.32, 0.35, 0.37],
        )
    }

    /// 2020 single-filer state brackets.
    pub fn state() -> Self {
        Self::preset(
            "State income tax",
            &[
                17_150.0,
                23_600.0,
                27_900.0,
                43_000.0,
                161_550.0,
                323_200.0,
                2_155_350.0,
                99_999_999.0,
            ],
            &[0.04, 0.045, 0.0525, 0.059, 0.0609, 0.0641, 0.0685, 0.0882],
        )
    }

    /// 2020 single-filer city brackets.
    pub fn city() -> Self {
        Self::preset(
            "City income tax",
            &[12_000.0, 25_000.0, 50_000.0, 99_999_999.0],
            &[0.03078, 0.03762, 0.03819, 0.03876],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Taxes queued by [`calculate`](Self::calculate) and not yet committed.
    pub fn pending(&self) -> &[(AccountId, f64)] {
        &self.pending
    }

    /// Monthly tax on the monthly income layer `[total, total + marginal]`.
    pub fn layer_tax(&self, total: f64, marginal: f64) -> f64 {
        let mut taxed = total * MONTHS_PER_YEAR;
        let mut left = marginal * MONTHS_PER_YEAR;
        let mut tax = 0.0;

        for bracket in &self.brackets {
            if left <= 0.0 {
                break;
            }
            if taxed < bracket.upper {
                let amount = left.min(bracket.upper - taxed);
                tax += amount * bracket.rate;
                taxed += amount;
                left -= amount;
            }
        }
        if left > 0.0
            && let Some(top) = self.brackets.last()
        {
            tax += left * top.rate;
        }

        tax / MONTHS_PER_YEAR
    }

    /// Queue the tax owed on each account's balance, stacking the balances in
    /// the order given.
    pub fn calculate(&mut self, household: &Household, accounts: &[AccountId]) {
        let mut total = 0.0;
        for &id in accounts {
            let balance = household.balance(id);
            let tax = self.layer_tax(total, balance);
            self.pending.push((id, tax));
            total += balance;
        }
    }

    /// Withhold every queued amount from its account and clear the queue.
    ///
    /// Returns the total actually withheld.
    pub fn commit(&mut self, household: &mut Household) -> f64 {
        let mut withheld = 0.0;
        for (id, amount) in self.pending.drain(..) {
            withheld += household.account_mut(id).withdraw(amount, &self.name);
        }
        withheld
    }
}
