//! Multi-month cash-flow scenarios on a bare household

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::household::{Household, Shortfall};
use crate::model::{Account, Dist, EPSILON, Expense, Income, Temporal, Transfer, YearMonth};
use crate::taxes::IncomeTax;

fn months(start_year: i32, count: usize) -> impl Iterator<Item = YearMonth> {
    (0..count).map(move |i| YearMonth::new(start_year + (i / 12) as i32, (i % 12) as u32 + 1))
}

#[test]
fn test_mortgage_paid_down_to_zero() {
    let mut household = Household::new();
    let checking = household.add_account("Checking", Account::new(100_000.0)).unwrap();
    let mortgage = household
        .add_account("Mortgage", Account::mortgage(12_000.0, 1_100.0, 0.06))
        .unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let mut interest_paid = 0.0;
    let mut principal_paid = 0.0;
    for now in months(2025, 24) {
        household.advance_all(now, 0.0, &mut rng);
        interest_paid += household.pay_mortgage_interest(mortgage, &[checking]).unwrap();
        principal_paid += household.pay_mortgage_principal(mortgage, &[checking]).unwrap();
        assert!(household.balance(mortgage) <= EPSILON);
    }

    assert!(household.balance(mortgage).abs() < 1e-6);
    assert!((principal_paid - 12_000.0).abs() < 1e-6);
    assert!(interest_paid > 0.0);
    assert!((household.balance(checking) - (100_000.0 - principal_paid - interest_paid)).abs() < 1e-6);
}

#[test]
fn test_scheduled_payoff() {
    let mut household = Household::new();
    let savings = household.add_account("Savings", Account::new(100_000.0)).unwrap();
    let mortgage = household
        .add_account("Mortgage", Account::mortgage(50_000.0, 500.0, 0.04))
        .unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    for now in months(2026, 12) {
        household.advance_all(now, 0.0, &mut rng);
        household.pay_mortgage_interest(mortgage, &[savings]).unwrap();
        if now == YearMonth::new(2026, 6) {
            let paid = household.pay_off_mortgage(mortgage, &[savings]).unwrap();
            assert!(paid > 45_000.0);
        } else {
            household.pay_mortgage_principal(mortgage, &[savings]).unwrap();
        }
    }

    assert!(household.balance(mortgage).abs() < 1e-6);
    let last = household.account(mortgage).ledger().last().unwrap();
    assert_eq!(last.note, "Transfer from Savings");
    assert_eq!((last.year, last.month), (2026, 6));
}

#[test]
fn test_pre_tax_contribution_then_withholding() {
    let mut household = Household::new();
    let income = household
        .add_account("Income", Account::new(0.0).unreported())
        .unwrap();
    let checking = household.add_account("Checking", Account::new(0.0)).unwrap();
    let retirement = household.add_account("401k", Account::new(0.0)).unwrap();
    let salary = household
        .add_income("Salary", Income::new(120_000.0, Dist::fixed(0.0)))
        .unwrap();
    let contribution = household
        .add_transfer("401k contribution", Transfer::annual(19_500.0))
        .unwrap();
    let mut federal = IncomeTax::federal();
    let mut rng = StdRng::seed_from_u64(0);

    household.advance_all(YearMonth::new(2025, 1), 0.0, &mut rng);
    household.collect_income(salary, income);
    household
        .run_transfer(contribution, &[income], retirement, Shortfall::Fail)
        .unwrap();
    federal.calculate(&household, &[income]);
    let withheld = federal.commit(&mut household);
    household.transfer(income, checking, None);

    let taxable = 10_000.0 - 1_625.0;
    assert!((withheld - federal.layer_tax(0.0, taxable)).abs() < 1e-9);
    assert!(household.balance(income).abs() < 1e-9);
    assert!((household.balance(retirement) - 1_625.0).abs() < 1e-9);
    assert!((household.balance(checking) - (taxable - withheld)).abs() < 1e-9);
}

#[test]
fn test_retirement_account_locked_until_window() {
    let mut household = Household::new();
    let retirement = household
        .add_account("401k", Account::new(500_000.0).active_from(2040, 1))
        .unwrap();
    let checking = household.add_account("Checking", Account::new(0.0)).unwrap();
    let draw = household
        .add_transfer("Retirement income", Transfer::monthly(4_000.0).active_from(2040, 1))
        .unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    household.advance_all(YearMonth::new(2039, 12), 0.0, &mut rng);
    assert!(!household.account(retirement).is_active());
    assert_eq!(household.transfer(retirement, checking, Some(1_000.0)), 0.0);
    // Scheduled draws outside their window never touch the sources
    assert_eq!(
        household
            .run_transfer(draw, &[retirement], checking, Shortfall::Fail)
            .unwrap(),
        0.0
    );

    household.advance_all(YearMonth::new(2040, 1), 0.0, &mut rng);
    assert_eq!(
        household
            .run_transfer(draw, &[retirement], checking, Shortfall::Fail)
            .unwrap(),
        4_000.0
    );
    assert_eq!(household.balance(checking), 4_000.0);
    assert_eq!(household.balance(retirement), 496_000.0);
}

#[test]
fn test_college_expense_draws_529_first() {
    let mut household = Household::new();
    let plan = household.add_account("529", Account::new(3_000.0)).unwrap();
    let checking = household.add_account("Checking", Account::new(10_000.0)).unwrap();
    let tuition = household
        .add_expense(
            "College",
            Expense::monthly(2_000.0, 0.0)
                .unwrap()
                .active_from(2030, 9),
        )
        .unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let mut paid = Vec::new();
    for now in months(2030, 12) {
        household.advance_all(now, 0.0, &mut rng);
        paid.push(household.pay_expense(tuition, &[plan, checking], &mut rng).unwrap());
    }

    assert_eq!(paid.iter().filter(|p| **p > 0.0).count(), 4);
    assert_eq!(household.balance(plan), 0.0);
    assert_eq!(household.balance(checking), 5_000.0);
}

#[test]
fn test_truncating_transfer_tolerates_locked_sources() {
    let mut household = Household::new();
    let ira = household
        .add_account("IRA", Account::new(50_000.0).active_from(2043, 1))
        .unwrap();
    let income = household.add_account("Income", Account::new(0.0)).unwrap();
    let draw = household
        .add_transfer("Pre-tax retirement income", Transfer::annual(120_000.0))
        .unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    household.advance_all(YearMonth::new(2030, 1), 0.0, &mut rng);
    let moved = household
        .run_transfer(draw, &[ira], income, Shortfall::Truncate)
        .unwrap();
    assert_eq!(moved, 0.0);
    assert!(
        household
            .run_transfer(draw, &[ira], income, Shortfall::Fail)
            .is_err()
    );
    assert_eq!(household.balance(ira), 50_000.0);
}
