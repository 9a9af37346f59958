use nestegg_core::{
    ConfigError, DistParams, HouseholdModel, SimulationConfig, YearMonth, monte_carlo_simulate,
    simulate,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::household::{ExampleHousehold, HouseholdProfile};
use crate::logging::default_filter;

fn config(start_year: i32, end_year: i32) -> SimulationConfig {
    SimulationConfig {
        start_year,
        end_year,
        ..Default::default()
    }
}

/// The default household without any spending, so it never runs short.
fn frugal() -> HouseholdProfile {
    HouseholdProfile {
        expenses: Vec::new(),
        ..Default::default()
    }
}

#[test]
fn test_reported_columns() {
    let model = ExampleHousehold::new(&HouseholdProfile::default()).unwrap();
    let columns: Vec<&str> = model
        .household()
        .reported_accounts()
        .map(|a| a.name())
        .collect();

    assert_eq!(
        columns,
        vec![
            "Checking",
            "Brokerage",
            "Trading",
            "Jordan 401k",
            "Jordan IRA",
            "Jordan Roth",
            "Casey 401k",
            "Casey IRA",
            "Casey Roth",
            "College 529",
            "Mortgage",
            "Home",
        ]
    );
}

#[test]
fn test_first_decade_summary_categories() {
    let mut model = ExampleHousehold::new(&frugal()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let result = simulate(&mut model, &config(2021, 2031), &mut rng).unwrap();

    assert!(result.failure.is_none());
    let totals = &result.summaries[&2030];
    let categories: Vec<&str> = totals.keys().map(String::as_str).collect();
    assert_eq!(categories, vec!["Investments", "Real estate", "Retirement"]);
}

#[test]
fn test_clearing_accounts_emptied_each_month() {
    let mut model = ExampleHousehold::new(&frugal()).unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    simulate(&mut model, &config(2021, 2024), &mut rng).unwrap();

    let hh = model.household();
    for name in ["Income", "RSUs"] {
        let id = hh.find_account(name).unwrap();
        assert!(hh.balance(id).abs() < 1e-6, "{name} not emptied");
    }
    assert!(hh.balance(model.checking()) <= 20_000.0 + 1e-6);
    let trading = hh.find_account("Trading").unwrap();
    assert!(hh.balance(trading) <= 250_000.0 + 1e-6);
}

#[test]
fn test_mortgage_paid_off_on_schedule() {
    let mut model = ExampleHousehold::new(&frugal()).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let result = simulate(&mut model, &config(2021, 2052), &mut rng).unwrap();

    assert!(result.failure.is_none());
    let mortgage = model.household().account(model.mortgage());
    assert!(mortgage.balance().abs() < 1e-6);
    let last = mortgage.ledger().last().unwrap();
    assert_eq!(last.at(), YearMonth::new(2050, 12));
}

#[test]
fn test_college_paid_from_529_first() {
    let mut model = ExampleHousehold::new(&HouseholdProfile::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    simulate(&mut model, &config(2021, 2031), &mut rng).unwrap();

    let plan = model.household().account(model.college_529());
    assert!(
        plan.ledger()
            .iter()
            .any(|e| e.note == "First child college" && e.year == 2030)
    );
}

#[test]
fn test_same_seed_same_trace() {
    let run = || {
        let mut model = ExampleHousehold::new(&HouseholdProfile::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        simulate(&mut model, &config(2021, 2031), &mut rng).unwrap()
    };
    assert_eq!(run().table, run().table);
}

#[test]
fn test_monte_carlo_reproducible() {
    let profile = HouseholdProfile::default();
    let config = SimulationConfig {
        seed: 5,
        ..config(2021, 2031)
    };
    let a = monte_carlo_simulate(|| ExampleHousehold::new(&profile), &config, 6).unwrap();
    let b = monte_carlo_simulate(|| ExampleHousehold::new(&profile), &config, 6).unwrap();

    assert_eq!(a.trials, 6);
    assert_eq!(a.summary().to_string(), b.summary().to_string());
}

#[test]
fn test_invalid_profile_rejected() {
    let mut profile = HouseholdProfile::default();
    profile.earners[0].raise = DistParams::new(0.03, -0.02);

    assert!(matches!(
        ExampleHousehold::new(&profile),
        Err(ConfigError::InvalidDistribution { .. })
    ));
}

#[test]
fn test_profile_yaml_round_trip() {
    let profile = HouseholdProfile::default();
    let yaml = profile.to_yaml().unwrap();
    let parsed = HouseholdProfile::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, profile);
}

#[test]
fn test_partial_profile_uses_defaults() {
    let parsed = HouseholdProfile::from_yaml("checking_target: 30000.0\ntrading_target: 100000.0\n").unwrap();

    assert_eq!(parsed.checking_target, 30_000.0);
    assert_eq!(parsed.trading_target, 100_000.0);
    assert_eq!(parsed.earners, HouseholdProfile::default().earners);
}

#[test]
fn test_profile_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.yaml");
    std::fs::write(&path, "college_savings: 0.0\n").unwrap();

    let profile = HouseholdProfile::load(&path).unwrap();
    assert_eq!(profile.college_savings, 0.0);

    assert!(HouseholdProfile::load(&dir.path().join("missing.yaml")).is_err());
}

#[test]
fn test_default_log_filter() {
    assert_eq!(default_filter("info"), "nestegg=info,nestegg_core=info");
}
