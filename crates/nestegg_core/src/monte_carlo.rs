//! Monte Carlo batches of independent trials
//!
//! Every trial builds a fresh household from the factory and owns a generator
//! seeded with `config.seed + trial`, so a batch is reproducible regardless of
//! how trials are scheduled across threads.

use rand::SeedableRng;
use rand::rngs::StdRng;
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::model::{MonteCarloResult, SimulationResult};
use crate::simulation::{HouseholdModel, SimulationConfig, simulate};

/// Run trial `trial` of a batch on its own seeded generator.
pub fn run_trial<F, M>(
    factory: &F,
    config: &SimulationConfig,
    trial: usize,
) -> Result<SimulationResult, ConfigError>
where
    F: Fn() -> Result<M, ConfigError>,
    M: HouseholdModel,
{
    let mut model = factory()?;
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(trial as u64));
    let result = simulate(&mut model, config, &mut rng)?;
    if let Some(err) = &result.failure {
        debug!(trial, %err, "trial ran out of money");
    }
    Ok(result)
}

/// Run `trials` independent simulations and collect their category snapshots.
pub fn monte_carlo_simulate<F, M>(
    factory: F,
    config: &SimulationConfig,
    trials: usize,
) -> Result<MonteCarloResult, ConfigError>
where
    F: Fn() -> Result<M, ConfigError> + Sync,
    M: HouseholdModel,
{
    if trials == 0 {
        return Err(ConfigError::NoTrials);
    }
    config.validate()?;
    info!(
        trials,
        seed = config.seed,
        start = config.start_year,
        end = config.end_year,
        "starting monte carlo batch"
    );

    let run = |trial: usize| run_trial(&factory, config, trial);

    #[cfg(feature = "parallel")]
    let results = (0..trials)
        .into_par_iter()
        .map(run)
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let results = (0..trials).map(run).collect::<Result<Vec<_>, _>>()?;

    let mut batch = MonteCarloResult::default();
    for result in &results {
        batch.record(result);
    }

    info!(
        trials,
        failures = batch.failures,
        failure_rate = batch.failure_rate(),
        "monte carlo batch finished"
    );
    Ok(batch)
}
