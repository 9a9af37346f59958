//! Month-by-month simulation driver
//!
//! The driver owns the calendar. Each month it draws one market factor shared by
//! every account, advances the whole household to the new month, then hands
//! control to the model's [`HouseholdModel::run_month`] policy, which decides
//! what money moves where.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SimulationError};
use crate::household::Household;
use crate::model::{BalanceTable, DistParams, SimulationResult, YearMonth};

/// A household plus the monthly policy that moves its money.
pub trait HouseholdModel {
    fn household(&self) -> &Household;

    fn household_mut(&mut self) -> &mut Household;

    /// Run one month of cash flows. Called after every entity has been advanced
    /// to `now`.
    fn run_month<R: Rng + ?Sized>(
        &mut self,
        now: YearMonth,
        rng: &mut R,
    ) -> Result<(), SimulationError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// First simulated year
    pub start_year: i32,
    /// Year of the closing balance row; not itself simulated
    pub end_year: i32,
    /// Annual market factor
    pub market: DistParams,
    /// Record category totals after December of every year divisible by this
    pub summary_every: i32,
    /// Base seed; Monte Carlo trial `i` uses `seed + i`
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_year: 2021,
            end_year: 2070,
            market: DistParams::new(0.10, 0.18),
            summary_every: 10,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_year > self.end_year {
            return Err(ConfigError::InvalidYearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if self.summary_every < 1 {
            return Err(ConfigError::InvalidSummaryCadence);
        }
        self.market.build()?;
        Ok(())
    }
}

fn balances(household: &Household) -> Vec<f64> {
    household.reported_accounts().map(|a| a.balance()).collect()
}

/// Run `model` from `start_year` through December of `end_year - 1`.
///
/// Running out of money is not an error here: the run stops and the failure
/// is stored on the returned result alongside everything recorded so far.
pub fn simulate<M, R>(
    model: &mut M,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationResult, ConfigError>
where
    M: HouseholdModel,
    R: Rng + ?Sized,
{
    config.validate()?;
    let market = config.market.build()?;

    let columns = model
        .household()
        .reported_accounts()
        .map(|a| a.name().to_string())
        .collect();
    let mut result = SimulationResult {
        table: BalanceTable::new(columns),
        ..Default::default()
    };

    for year in config.start_year..config.end_year {
        result.table.push(year, balances(model.household()));

        for month in 1..=12 {
            let now = YearMonth::new(year, month);
            let factor = market.sample_monthly(rng);
            model.household_mut().advance_all(now, factor, rng);
            if let Err(err) = model.run_month(now, rng) {
                tracing::debug!(%err, "simulation stopped");
                result.failure = Some(err);
                return Ok(result);
            }
        }

        if year % config.summary_every == 0 {
            result
                .summaries
                .insert(year, model.household().category_totals());
        }
    }

    result
        .table
        .push(config.end_year, balances(model.household()));
    Ok(result)
}
