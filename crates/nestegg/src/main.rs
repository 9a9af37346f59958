use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{self, WrapErr};
use nestegg::{ExampleHousehold, HouseholdProfile, LedgerFormat, export_ledgers, init_logging};
use nestegg_core::{HouseholdModel, SimulationConfig, monte_carlo_simulate, simulate};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "nestegg")]
#[command(about = "Monthly household cash-flow simulator")]
struct Cli {
    /// YAML household profile (default: built-in example household)
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Horizon {
    /// First simulated year
    #[arg(long, default_value_t = 2021)]
    start: i32,

    /// Year of the closing balances
    #[arg(long, default_value_t = 2070)]
    end: i32,

    /// Base random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Record category totals every this many years
    #[arg(long, default_value_t = 10)]
    summary_every: i32,
}

impl Horizon {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            start_year: self.start,
            end_year: self.end,
            seed: self.seed,
            summary_every: self.summary_every,
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one trace and print year-by-year balances
    Run {
        #[command(flatten)]
        horizon: Horizon,

        /// Write every account's ledger into this directory
        #[arg(long)]
        ledgers: Option<PathBuf>,

        /// Ledger file format
        #[arg(long, value_enum, default_value_t = LedgerFormat::Text)]
        format: LedgerFormat,
    },
    /// Run many independent trials and print outcome percentiles
    MonteCarlo {
        #[command(flatten)]
        horizon: Horizon,

        /// Number of trials
        #[arg(short = 'n', long, default_value_t = 100)]
        trials: usize,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the built-in profile as YAML, as a starting point for edits
    Profile,
}

fn load_profile(path: Option<&PathBuf>) -> eyre::Result<HouseholdProfile> {
    match path {
        Some(path) => HouseholdProfile::load(path),
        None => Ok(HouseholdProfile::default()),
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_file.as_deref())?;
    let profile = load_profile(cli.profile.as_ref())?;

    match cli.command {
        Command::Run {
            horizon,
            ledgers,
            format,
        } => {
            let config = horizon.config();
            let mut model = ExampleHousehold::new(&profile)?;
            let mut rng = StdRng::seed_from_u64(config.seed);
            let result = simulate(&mut model, &config, &mut rng)?;

            println!("{}", result.table);
            if let Some(err) = &result.failure {
                println!("\nSimulation failed: {err}");
            }
            if let Some(dir) = ledgers {
                let written = export_ledgers(model.household(), &dir, format)?;
                println!("\nWrote {} ledgers to {}", written.len(), dir.display());
            }
        }
        Command::MonteCarlo {
            horizon,
            trials,
            json,
        } => {
            let config = horizon.config();
            let batch = monte_carlo_simulate(|| ExampleHousehold::new(&profile), &config, trials)?;
            let summary = batch.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
        }
        Command::Profile => {
            let yaml = profile
                .to_yaml()
                .wrap_err("failed to serialize household profile")?;
            print!("{yaml}");
        }
    }

    tracing::info!("nestegg finished");
    Ok(())
}
