use thiserror::Error;

/// Errors raised while building a household or a simulation run.
///
/// These are fatal setup errors: they are surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid distribution parameters (mean={mean}, std_dev={std_dev}): {reason}")]
    InvalidDistribution {
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },

    #[error("invalid tax brackets for {name}: {reason}")]
    InvalidBrackets { name: String, reason: &'static str },

    #[error("{kind} '{name}' is already registered")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{kind} '{name}' is not registered")]
    UnknownName { kind: &'static str, name: String },

    #[error("{kind} handle {index} does not belong to this household")]
    UnknownHandle { kind: &'static str, index: usize },

    #[error("income period must divide 12 months, got {0}")]
    InvalidIncomePeriod(u32),

    #[error("invalid year range {start}..{end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("summary cadence must be at least one year")]
    InvalidSummaryCadence,

    #[error("monte carlo batch needs at least one trial")]
    NoTrials,
}

/// Errors raised while a simulation is running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// An ordered list of sources could not cover a required outflow.
    #[error("not enough in accounts to pay ${shortfall:.2} for {entity} on {month}/{year}")]
    InsufficientFunds {
        entity: String,
        year: i32,
        month: u32,
        shortfall: f64,
    },
}
