//! Simulation and Monte Carlo results
//!
//! A single run produces a year-by-year [`BalanceTable`] plus per-category
//! snapshots at the summary cadence. A Monte Carlo batch collects those
//! snapshots across trials and reduces them to percentiles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::format::format_currency_short;

/// Percentiles reported for every category, as fractions of the trial count.
pub const PERCENTILES: [f64; 4] = [0.10, 0.20, 0.50, 0.80];

/// Reported account balances at the start of one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub year: i32,
    /// One balance per column of the owning table, in the same order
    pub balances: Vec<f64>,
    pub total: f64,
}

/// Year-by-year balances of every reported account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceTable {
    /// Reported account names in registration order
    pub columns: Vec<String>,
    pub rows: Vec<BalanceRow>,
}

impl BalanceTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, year: i32, balances: Vec<f64>) {
        let total = balances.iter().sum();
        self.rows.push(BalanceRow {
            year,
            balances,
            total,
        });
    }

    pub fn last(&self) -> Option<&BalanceRow> {
        self.rows.last()
    }
}

impl fmt::Display for BalanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Year")?;
        for column in &self.columns {
            write!(f, "{column:>13}")?;
        }
        write!(f, "{:>13}", "Total")?;
        for row in &self.rows {
            write!(f, "\n{}", row.year)?;
            for balance in row.balances.iter().chain(std::iter::once(&row.total)) {
                write!(f, "{:>13}", format_currency_short(*balance))?;
            }
        }
        Ok(())
    }
}

/// Output of one simulated trace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    pub table: BalanceTable,
    /// Category totals after December of each summary year
    pub summaries: BTreeMap<i32, BTreeMap<String, f64>>,
    /// Set when the run stopped early because an outflow could not be funded
    #[serde(skip)]
    pub failure: Option<SimulationError>,
}

impl SimulationResult {
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Raw samples collected across a Monte Carlo batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub trials: usize,
    pub failures: usize,
    /// year -> category -> one value per trial that reached that year
    pub samples: BTreeMap<i32, BTreeMap<String, Vec<f64>>>,
}

impl MonteCarloResult {
    /// Fraction of trials that ran out of money, in `[0, 1]`.
    pub fn failure_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.failures as f64 / self.trials as f64
        }
    }

    /// Fold one trial's snapshots into the batch.
    pub fn record(&mut self, result: &SimulationResult) {
        self.trials += 1;
        if result.failed() {
            self.failures += 1;
        }
        for (year, totals) in &result.summaries {
            let categories = self.samples.entry(*year).or_default();
            for (category, value) in totals {
                categories.entry(category.clone()).or_default().push(*value);
            }
        }
    }

    /// Reduce samples to percentiles.
    ///
    /// Trials that failed before a summary year contribute zero to it, so each
    /// sample list is padded with zeros up to the trial count before sorting.
    pub fn summary(&self) -> MonteCarloSummary {
        let n = self.trials;
        let years = self
            .samples
            .iter()
            .map(|(year, categories)| YearPercentiles {
                year: *year,
                categories: categories
                    .iter()
                    .map(|(category, values)| CategoryPercentiles::from_samples(category, values, n))
                    .collect(),
            })
            .collect();

        MonteCarloSummary {
            trials: n,
            years,
            failure_rate: self.failure_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPercentiles {
    pub category: String,
    pub p10: f64,
    pub p20: f64,
    pub p50: f64,
    pub p80: f64,
    pub mean: f64,
}

impl CategoryPercentiles {
    fn from_samples(category: &str, values: &[f64], trials: usize) -> Self {
        let n = trials.max(values.len());
        let mut sorted = vec![0.0; n - values.len()];
        sorted.extend_from_slice(values);
        sorted.sort_by(|a, b| a.total_cmp(b));

        let at = |p: f64| {
            let index = ((n as f64 * p).floor() as usize).min(n.saturating_sub(1));
            sorted.get(index).copied().unwrap_or(0.0)
        };
        let mean = if n == 0 {
            0.0
        } else {
            sorted.iter().sum::<f64>() / n as f64
        };

        Self {
            category: category.to_string(),
            p10: at(PERCENTILES[0]),
            p20: at(PERCENTILES[1]),
            p50: at(PERCENTILES[2]),
            p80: at(PERCENTILES[3]),
            mean,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearPercentiles {
    pub year: i32,
    pub categories: Vec<CategoryPercentiles>,
}

/// Percentile report of a Monte Carlo batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub trials: usize,
    pub years: Vec<YearPercentiles>,
    pub failure_rate: f64,
}

impl fmt::Display for MonteCarloSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for year in &self.years {
            writeln!(
                f,
                "\n{:>18}  {:>13} {:>13} {:>13} {:>13} {:>13}",
                year.year, "10%", "20%", "50%", "80%", "Mean"
            )?;
            for c in &year.categories {
                writeln!(
                    f,
                    "{:>18}: {:>13} {:>13} {:>13} {:>13} {:>13}",
                    c.category,
                    format_currency_short(c.p10),
                    format_currency_short(c.p20),
                    format_currency_short(c.p50),
                    format_currency_short(c.p80),
                    format_currency_short(c.mean),
                )?;
            }
        }
        write!(f, "\nFailure rate: {:.1}%", self.failure_rate * 100.0)
    }
}
