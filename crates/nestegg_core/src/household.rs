//! Household registry and cash-flow primitives
//!
//! A [`Household`] owns every account and flow of a scenario. Entities are
//! registered once at setup under a unique name and are afterwards addressed
//! through the typed handle returned by registration. All money movement goes
//! through the methods here so that every debit and credit lands in the right
//! ledger and every shortfall is detected in one place.

use std::collections::BTreeMap;

use rand::Rng;
use rustc_hash::FxHashMap;

use crate::error::{ConfigError, SimulationError};
use crate::model::{
    Account, AccountId, EPSILON, Expense, ExpenseId, Income, IncomeId, LedgerEntry, RsuGrant,
    RsuId, Temporal, Transfer, TransferId, YearMonth,
};

/// What a waterfall does when its sources cannot cover the requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortfall {
    /// Raise [`SimulationError::InsufficientFunds`]
    Fail,
    /// Move what is available and drop the remainder
    Truncate,
}

/// Name index for one kind of entity.
#[derive(Debug, Clone, Default)]
struct Names {
    kind: &'static str,
    index: FxHashMap<String, usize>,
}

impl Names {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            index: FxHashMap::default(),
        }
    }

    fn claim(&mut self, name: &str, next: usize) -> Result<(), ConfigError> {
        if self.index.contains_key(name) {
            return Err(ConfigError::DuplicateName {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        self.index.insert(name.to_string(), next);
        Ok(())
    }

    fn find(&self, name: &str) -> Result<usize, ConfigError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownName {
                kind: self.kind,
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Clone)]
pub struct Household {
    accounts: Vec<Account>,
    incomes: Vec<Income>,
    rsus: Vec<RsuGrant>,
    expenses: Vec<Expense>,
    transfers: Vec<Transfer>,
    account_names: Names,
    income_names: Names,
    rsu_names: Names,
    expense_names: Names,
    transfer_names: Names,
    now: YearMonth,
}

impl Default for Household {
    fn default() -> Self {
        Self::new()
    }
}

impl Household {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            incomes: Vec::new(),
            rsus: Vec::new(),
            expenses: Vec::new(),
            transfers: Vec::new(),
            account_names: Names::new("account"),
            income_names: Names::new("income"),
            rsu_names: Names::new("RSU grant"),
            expense_names: Names::new("expense"),
            transfer_names: Names::new("transfer"),
            now: YearMonth::default(),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    pub fn add_account(
        &mut self,
        name: impl Into<String>,
        mut account: Account,
    ) -> Result<AccountId, ConfigError> {
        let name = name.into();
        self.account_names.claim(&name, self.accounts.len())?;
        account.name = name;
        self.accounts.push(account);
        Ok(AccountId(self.accounts.len() - 1))
    }

    pub fn add_income(
        &mut self,
        name: impl Into<String>,
        mut income: Income,
    ) -> Result<IncomeId, ConfigError> {
        let name = name.into();
        self.income_names.claim(&name, self.incomes.len())?;
        income.name = name;
        self.incomes.push(income);
        Ok(IncomeId(self.incomes.len() - 1))
    }

    /// Register an RSU grant. Its price account must already be registered.
    pub fn add_rsu(
        &mut self,
        name: impl Into<String>,
        mut grant: RsuGrant,
    ) -> Result<RsuId, ConfigError> {
        let price = grant.price_account();
        if price.0 >= self.accounts.len() {
            return Err(ConfigError::UnknownHandle {
                kind: "account",
                index: price.0,
            });
        }
        let name = name.into();
        self.rsu_names.claim(&name, self.rsus.len())?;
        grant.name = name;
        self.rsus.push(grant);
        Ok(RsuId(self.rsus.len() - 1))
    }

    pub fn add_expense(
        &mut self,
        name: impl Into<String>,
        mut expense: Expense,
    ) -> Result<ExpenseId, ConfigError> {
        let name = name.into();
        self.expense_names.claim(&name, self.expenses.len())?;
        expense.name = name;
        self.expenses.push(expense);
        Ok(ExpenseId(self.expenses.len() - 1))
    }

    pub fn add_transfer(
        &mut self,
        name: impl Into<String>,
        mut transfer: Transfer,
    ) -> Result<TransferId, ConfigError> {
        let name = name.into();
        self.transfer_names.claim(&name, self.transfers.len())?;
        transfer.name = name;
        self.transfers.push(transfer);
        Ok(TransferId(self.transfers.len() - 1))
    }

    pub fn find_account(&self, name: &str) -> Result<AccountId, ConfigError> {
        self.account_names.find(name).map(AccountId)
    }

    pub fn find_income(&self, name: &str) -> Result<IncomeId, ConfigError> {
        self.income_names.find(name).map(IncomeId)
    }

    pub fn find_rsu(&self, name: &str) -> Result<RsuId, ConfigError> {
        self.rsu_names.find(name).map(RsuId)
    }

    pub fn find_expense(&self, name: &str) -> Result<ExpenseId, ConfigError> {
        self.expense_names.find(name).map(ExpenseId)
    }

    pub fn find_transfer(&self, name: &str) -> Result<TransferId, ConfigError> {
        self.transfer_names.find(name).map(TransferId)
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn now(&self) -> YearMonth {
        self.now
    }

    pub fn account(&self, id: AccountId) -> &Account {
        &self.accounts[id.0]
    }

    pub fn account_mut(&mut self, id: AccountId) -> &mut Account {
        &mut self.accounts[id.0]
    }

    pub fn income(&self, id: IncomeId) -> &Income {
        &self.incomes[id.0]
    }

    pub fn rsu(&self, id: RsuId) -> &RsuGrant {
        &self.rsus[id.0]
    }

    pub fn expense(&self, id: ExpenseId) -> &Expense {
        &self.expenses[id.0]
    }

    pub fn scheduled_transfer(&self, id: TransferId) -> &Transfer {
        &self.transfers[id.0]
    }

    pub fn balance(&self, id: AccountId) -> f64 {
        self.accounts[id.0].balance()
    }

    /// Accounts in registration order.
    pub fn accounts(&self) -> impl Iterator<Item = (AccountId, &Account)> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(i, account)| (AccountId(i), account))
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Advance every registered entity to `now`: accounts, incomes, RSU
    /// grants, expenses, then transfers, each in registration order.
    pub fn advance_all<R: Rng + ?Sized>(&mut self, now: YearMonth, market: f64, rng: &mut R) {
        self.now = now;
        for account in &mut self.accounts {
            account.advance(now, market, rng);
        }
        for income in &mut self.incomes {
            income.advance(now, market, rng);
        }
        for grant in &mut self.rsus {
            grant.advance(now, market, rng);
        }
        for expense in &mut self.expenses {
            expense.advance(now, market, rng);
        }
        for transfer in &mut self.transfers {
            transfer.advance(now, market, rng);
        }
    }

    // =========================================================================
    // Waterfalls
    // =========================================================================

    /// Draw `amount` from `sources` in order, at most one withdrawal per
    /// source, stopping once the remaining need is immaterial. Withdrawn money
    /// is deposited into `destination`, or leaves the household when there is
    /// none. Returns the amount actually moved.
    pub fn waterfall(
        &mut self,
        who: &str,
        amount: f64,
        sources: &[AccountId],
        destination: Option<AccountId>,
        policy: Shortfall,
    ) -> Result<f64, SimulationError> {
        let remaining = self.drain(who, amount, sources, destination);
        if policy == Shortfall::Fail && remaining > EPSILON {
            return Err(SimulationError::InsufficientFunds {
                entity: who.to_string(),
                year: self.now.year,
                month: self.now.month,
                shortfall: remaining,
            });
        }
        Ok(amount - remaining.max(0.0))
    }

    fn drain(
        &mut self,
        who: &str,
        amount: f64,
        sources: &[AccountId],
        destination: Option<AccountId>,
    ) -> f64 {
        let mut remaining = amount;
        for &source in sources {
            if remaining <= EPSILON {
                break;
            }
            if Some(source) == destination {
                continue;
            }
            let note = match destination {
                Some(dst) => format!("Transfer to {}", self.accounts[dst.0].name),
                None => who.to_string(),
            };
            let taken = self.accounts[source.0].withdraw(remaining, &note);
            if let Some(dst) = destination {
                let note = format!("Transfer from {}", self.accounts[source.0].name);
                self.accounts[dst.0].deposit(taken, &note);
            }
            remaining -= taken;
        }
        remaining
    }

    // =========================================================================
    // Account to account
    // =========================================================================

    /// Move `amount` (the whole balance when `None`) from `src` to `dst`.
    ///
    /// The transfer is gated on the source being active: an inactive source
    /// moves nothing and the destination is untouched. The destination receives
    /// what the source actually delivered after tax.
    pub fn transfer(&mut self, src: AccountId, dst: AccountId, amount: Option<f64>) -> f64 {
        if src == dst || !self.accounts[src.0].is_active() {
            return 0.0;
        }
        let balance = self.accounts[src.0].balance();
        let amount = amount.map_or(balance, |a| a.min(balance));
        let note = format!("Transfer to {}", self.accounts[dst.0].name);
        let moved = self.accounts[src.0].withdraw(amount, &note);
        let note = format!("Transfer from {}", self.accounts[src.0].name);
        self.accounts[dst.0].deposit(moved, &note);
        moved
    }

    /// Pull up to `amount` into `dst` from `sources` in order. Any shortfall is dropped.
    pub fn fill_from(&mut self, dst: AccountId, amount: f64, sources: &[AccountId]) -> f64 {
        let who = self.accounts[dst.0].name.clone();
        amount - self.drain(&who, amount, sources, Some(dst)).max(0.0)
    }

    /// Move everything above `keep` from `src` into `dst`.
    pub fn sweep(&mut self, src: AccountId, dst: AccountId, keep: f64) -> f64 {
        let balance = self.accounts[src.0].balance();
        if balance > keep {
            self.transfer(src, dst, Some(balance - keep))
        } else {
            0.0
        }
    }

    /// Hold `account` between `keep_min` and `keep_max`: sweep any excess into
    /// `dst`, or top it up from `sources` in order until it reaches `keep_min`
    /// or the sources run dry.
    pub fn keep(
        &mut self,
        account: AccountId,
        dst: AccountId,
        sources: &[AccountId],
        keep_max: f64,
        keep_min: f64,
    ) {
        let mut balance = self.accounts[account.0].balance();
        if balance > keep_max {
            self.transfer(account, dst, Some(balance - keep_max));
        } else if balance < keep_min {
            for &src in sources {
                if balance >= keep_min {
                    break;
                }
                self.transfer(src, account, Some(keep_min - balance));
                balance = self.accounts[account.0].balance();
            }
        }
    }

    // =========================================================================
    // Flows
    // =========================================================================

    /// Deposit this month's pay from `income` into `dst`.
    pub fn collect_income(&mut self, income: IncomeId, dst: AccountId) -> f64 {
        let income = &self.incomes[income.0];
        let amount = income.amount();
        self.accounts[dst.0].deposit(amount, &income.name);
        amount
    }

    /// Deposit this month's vesting value of `grant` into `dst`.
    pub fn collect_rsu(&mut self, grant: RsuId, dst: AccountId) -> f64 {
        let grant = &self.rsus[grant.0];
        let price = self.accounts[grant.price_account().0].balance();
        let amount = grant.amount(price);
        self.accounts[dst.0].deposit(amount, &grant.name);
        amount
    }

    /// Pay this month's amount of `expense` from `sources` in order.
    pub fn pay_expense<R: Rng + ?Sized>(
        &mut self,
        expense: ExpenseId,
        sources: &[AccountId],
        rng: &mut R,
    ) -> Result<f64, SimulationError> {
        let expense = &self.expenses[expense.0];
        let amount = expense.amount(rng);
        let who = expense.name.clone();
        self.waterfall(&who, amount, sources, None, Shortfall::Fail)
    }

    /// Fund `dst` with this month's scheduled amount of `transfer`.
    pub fn run_transfer(
        &mut self,
        transfer: TransferId,
        sources: &[AccountId],
        dst: AccountId,
        policy: Shortfall,
    ) -> Result<f64, SimulationError> {
        let transfer = &self.transfers[transfer.0];
        let amount = transfer.amount();
        if amount == 0.0 {
            return Ok(0.0);
        }
        let who = transfer.name.clone();
        self.waterfall(&who, amount, sources, Some(dst), policy)
    }

    /// Pay this month's accrued interest on `mortgage` from `sources`.
    pub fn pay_mortgage_interest(
        &mut self,
        mortgage: AccountId,
        sources: &[AccountId],
    ) -> Result<f64, SimulationError> {
        let amount = self.accounts[mortgage.0].interest_due();
        self.service(mortgage, amount, sources)
    }

    /// Pay this month's scheduled principal on `mortgage` from `sources`.
    pub fn pay_mortgage_principal(
        &mut self,
        mortgage: AccountId,
        sources: &[AccountId],
    ) -> Result<f64, SimulationError> {
        let amount = self.accounts[mortgage.0].principal_due();
        self.service(mortgage, amount, sources)
    }

    /// Repay the whole outstanding balance of `mortgage` from `sources`.
    pub fn pay_off_mortgage(
        &mut self,
        mortgage: AccountId,
        sources: &[AccountId],
    ) -> Result<f64, SimulationError> {
        let loan = &self.accounts[mortgage.0];
        if !loan.is_active() {
            return Ok(0.0);
        }
        let amount = (-loan.balance()).max(0.0);
        self.service(mortgage, amount, sources)
    }

    fn service(
        &mut self,
        mortgage: AccountId,
        amount: f64,
        sources: &[AccountId],
    ) -> Result<f64, SimulationError> {
        if amount <= EPSILON {
            return Ok(0.0);
        }
        let who = self.accounts[mortgage.0].name.clone();
        self.waterfall(&who, amount, sources, Some(mortgage), Shortfall::Fail)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Accounts shown in balance tables, in registration order.
    pub fn reported_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|a| a.is_reported())
    }

    /// Sum of reported balances.
    pub fn net_worth(&self) -> f64 {
        self.reported_accounts().map(Account::balance).sum()
    }

    /// Reported balances grouped by category. Uncategorised accounts are skipped.
    pub fn category_totals(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for account in self.reported_accounts() {
            if let Some(category) = account.category() {
                *totals.entry(category.to_string()).or_insert(0.0) += account.balance();
            }
        }
        totals
    }

    /// Every account's ledger keyed by account name, in registration order.
    pub fn ledgers(&self) -> impl Iterator<Item = (&str, &[LedgerEntry])> {
        self.accounts.iter().map(|a| (a.name(), a.ledger()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dist;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn start(household: &mut Household) -> StdRng {
        let mut rng = StdRng::seed_from_u64(5);
        household.advance_all(YearMonth::new(2025, 1), 0.0, &mut rng);
        rng
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut household = Household::new();
        household.add_account("Checking", Account::new(0.0)).unwrap();
        let err = household
            .add_account("Checking", Account::new(1.0))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { kind: "account", .. }));

        // Names are scoped per kind
        household
            .add_transfer("Checking", Transfer::monthly(1.0))
            .unwrap();
    }

    #[test]
    fn test_lookup_by_name() {
        let mut household = Household::new();
        let checking = household.add_account("Checking", Account::new(0.0)).unwrap();
        assert_eq!(household.find_account("Checking").unwrap(), checking);
        assert_eq!(household.account(checking).name(), "Checking");
        assert!(matches!(
            household.find_expense("Rent"),
            Err(ConfigError::UnknownName { kind: "expense", .. })
        ));
    }

    #[test]
    fn test_lookup_every_kind() {
        let mut household = Household::new();
        let price = household.add_account("Stock", Account::new(50.0)).unwrap();
        let salary = household
            .add_income("Salary", Income::new(60_000.0, Dist::fixed(0.0)))
            .unwrap();
        let grant = household.add_rsu("Grant", RsuGrant::new(4.0, price)).unwrap();
        let rent = household
            .add_expense("Rent", Expense::monthly(1_500.0, 0.0).unwrap())
            .unwrap();
        let saving = household.add_transfer("Saving", Transfer::monthly(300.0)).unwrap();

        assert_eq!(household.find_income("Salary").unwrap(), salary);
        assert_eq!(household.find_rsu("Grant").unwrap(), grant);
        assert_eq!(household.find_expense("Rent").unwrap(), rent);
        assert_eq!(household.find_transfer("Saving").unwrap(), saving);
        assert!(household.find_transfer("Salary").is_err());

        assert_eq!(household.income(salary).name(), "Salary");
        assert_eq!(household.income(salary).annual(), 60_000.0);
        assert_eq!(household.rsu(grant).price_account(), price);
        assert_eq!(household.expense(rent).base_amount(), 1_500.0);
        assert_eq!(household.scheduled_transfer(saving).name(), "Saving");
    }

    #[test]
    fn test_rsu_requires_registered_price() {
        let mut household = Household::new();
        let err = household
            .add_rsu("Grant", RsuGrant::new(10.0, AccountId(3)))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownHandle { index: 3, .. }));
    }

    #[test]
    fn test_waterfall_draws_in_order() {
        let mut household = Household::new();
        let a = household.add_account("A", Account::new(100.0)).unwrap();
        let b = household.add_account("B", Account::new(100.0)).unwrap();
        let c = household.add_account("C", Account::new(100.0)).unwrap();
        start(&mut household);

        let paid = household
            .waterfall("Rent", 150.0, &[a, b, c], None, Shortfall::Fail)
            .unwrap();

        assert_eq!(paid, 150.0);
        assert_eq!(household.balance(a), 0.0);
        assert_eq!(household.balance(b), 50.0);
        assert_eq!(household.balance(c), 100.0);
        // Satisfied before reaching C
        assert!(household.account(c).ledger().is_empty());
    }

    #[test]
    fn test_waterfall_one_withdrawal_per_source() {
        let mut household = Household::new();
        let sources: Vec<AccountId> = (0..4)
            .map(|i| household.add_account(format!("S{i}"), Account::new(10.0)).unwrap())
            .collect();
        start(&mut household);

        let moved = household
            .waterfall("Big", 1_000.0, &sources, None, Shortfall::Truncate)
            .unwrap();

        assert_eq!(moved, 40.0);
        for id in sources {
            assert_eq!(household.account(id).ledger().len(), 1);
        }
    }

    #[test]
    fn test_waterfall_fail_reports_shortfall() {
        let mut household = Household::new();
        let a = household.add_account("A", Account::new(30.0)).unwrap();
        start(&mut household);

        let err = household
            .waterfall("Tuition", 100.0, &[a], None, Shortfall::Fail)
            .unwrap_err();

        let SimulationError::InsufficientFunds {
            entity,
            year,
            month,
            shortfall,
        } = err;
        assert_eq!(entity, "Tuition");
        assert_eq!((year, month), (2025, 1));
        assert!((shortfall - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_waterfall_skips_inactive_sources() {
        let mut household = Household::new();
        let locked = household
            .add_account("401k", Account::new(1_000.0).active_from(2040, 1))
            .unwrap();
        let checking = household.add_account("Checking", Account::new(500.0)).unwrap();
        let dst = household.add_account("Dst", Account::new(0.0)).unwrap();
        start(&mut household);

        let moved = household.fill_from(dst, 800.0, &[locked, checking]);

        assert_eq!(moved, 500.0);
        assert_eq!(household.balance(locked), 1_000.0);
        assert_eq!(household.balance(dst), 500.0);
    }

    #[test]
    fn test_transfer_gated_on_source_activity() {
        let mut household = Household::new();
        let closed = household
            .add_account("Closed", Account::new(1_000.0).active_until(2020, 12))
            .unwrap();
        let dst = household.add_account("Dst", Account::new(0.0)).unwrap();
        start(&mut household);

        assert_eq!(household.transfer(closed, dst, None), 0.0);
        assert_eq!(household.balance(closed), 1_000.0);
        assert_eq!(household.balance(dst), 0.0);
    }

    #[test]
    fn test_transfer_conserves_untaxed_money() {
        let mut household = Household::new();
        let src = household.add_account("Src", Account::new(1_000.0)).unwrap();
        let dst = household.add_account("Dst", Account::new(0.0)).unwrap();
        start(&mut household);

        household.transfer(src, dst, Some(400.0));

        assert_eq!(household.balance(src), 600.0);
        assert_eq!(household.balance(dst), 400.0);
        assert_eq!(household.account(dst).ledger()[0].note, "Transfer from Src");
        assert_eq!(household.account(src).ledger()[0].note, "Transfer to Dst");
    }

    #[test]
    fn test_sweep_and_keep() {
        let mut household = Household::new();
        let checking = household.add_account("Checking", Account::new(30_000.0)).unwrap();
        let savings = household.add_account("Savings", Account::new(5_000.0)).unwrap();
        start(&mut household);

        household.keep(checking, savings, &[savings], 20_000.0, 0.0);
        assert_eq!(household.balance(checking), 20_000.0);
        assert_eq!(household.balance(savings), 15_000.0);

        household.sweep(savings, checking, 10_000.0);
        assert_eq!(household.balance(savings), 10_000.0);
        assert_eq!(household.balance(checking), 25_000.0);
    }

    #[test]
    fn test_keep_tops_up_from_sources() {
        let mut household = Household::new();
        let checking = household.add_account("Checking", Account::new(1_000.0)).unwrap();
        let small = household.add_account("Small", Account::new(2_000.0)).unwrap();
        let big = household.add_account("Big", Account::new(50_000.0)).unwrap();
        start(&mut household);

        household.keep(checking, big, &[small, big], 20_000.0, 10_000.0);

        assert_eq!(household.balance(checking), 10_000.0);
        assert_eq!(household.balance(small), 0.0);
        assert_eq!(household.balance(big), 43_000.0);
    }

    #[test]
    fn test_expense_beyond_all_sources_fails() {
        let mut household = Household::new();
        let a = household.add_account("A", Account::new(1_000.0)).unwrap();
        let b = household.add_account("B", Account::new(1_000.0)).unwrap();
        let rent = household
            .add_expense("Rent", Expense::monthly(5_000.0, 0.0).unwrap())
            .unwrap();
        let mut rng = start(&mut household);

        let err = household.pay_expense(rent, &[a, b], &mut rng).unwrap_err();
        assert!(matches!(err, SimulationError::InsufficientFunds { ref entity, .. } if entity == "Rent"));
    }

    #[test]
    fn test_income_and_rsu_collection() {
        let mut household = Household::new();
        let stock = household
            .add_account("Stock", Account::new(50.0).unreported())
            .unwrap();
        let pay = household.add_account("Income", Account::new(0.0)).unwrap();
        let salary = household
            .add_income("Salary", Income::new(120_000.0, Dist::fixed(0.0)))
            .unwrap();
        let grant = household
            .add_rsu("Grant", RsuGrant::new(100.0, stock))
            .unwrap();
        start(&mut household);

        assert_eq!(household.collect_income(salary, pay), 10_000.0);
        assert_eq!(household.collect_rsu(grant, pay), 5_000.0);
        assert_eq!(household.balance(pay), 15_000.0);
        assert_eq!(household.reported_accounts().count(), 1);
    }

    #[test]
    fn test_mortgage_service() {
        let mut household = Household::new();
        let checking = household.add_account("Checking", Account::new(10_000.0)).unwrap();
        let mortgage = household
            .add_account("Mortgage", Account::mortgage(120_000.0, 1_000.0, 0.06))
            .unwrap();
        start(&mut household);

        let interest = household.pay_mortgage_interest(mortgage, &[checking]).unwrap();
        let principal = household.pay_mortgage_principal(mortgage, &[checking]).unwrap();

        assert!((interest - 600.0).abs() < 1e-9);
        assert!((principal - 400.0).abs() < 1e-9);
        assert!((household.balance(mortgage) + 119_600.0).abs() < 1e-9);
        assert!((household.balance(checking) - 9_000.0).abs() < 1e-9);

        household.pay_off_mortgage(mortgage, &[checking]).unwrap_err();
    }

    #[test]
    fn test_category_totals() {
        let mut household = Household::new();
        household
            .add_account("A", Account::new(10.0).with_category("Investments"))
            .unwrap();
        household
            .add_account("B", Account::new(5.0).with_category("Investments"))
            .unwrap();
        household
            .add_account("C", Account::new(7.0).with_category("Retirement"))
            .unwrap();
        household.add_account("D", Account::new(100.0)).unwrap();

        let totals = household.category_totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Investments"], 15.0);
        assert_eq!(totals["Retirement"], 7.0);
        assert_eq!(household.net_worth(), 122.0);
    }
}
