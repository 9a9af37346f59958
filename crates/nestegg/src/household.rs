//! Example two-earner household
//!
//! [`HouseholdProfile`] holds every tunable number of the scenario and can be
//! loaded from YAML. [`ExampleHousehold`] turns a profile into a registered
//! household and implements the monthly orchestration policy: which flows run,
//! in what order, and which accounts fund them.

use std::path::Path;

use color_eyre::eyre::{self, WrapErr};
use nestegg_core::{
    Account, AccountId, ConfigError, DistParams, Expense, ExpenseId, Household, HouseholdModel,
    Income, IncomeId, IncomeTax, RsuGrant, RsuId, Shortfall, SimulationError, Temporal, Transfer,
    TransferId, YearMonth,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

const INVESTMENTS: &str = "Investments";
const RETIREMENT: &str = "Retirement";
const REAL_ESTATE: &str = "Real estate";

/// Starting state and return model of one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountProfile {
    pub balance: f64,
    /// After-tax principal; defaults to the whole balance
    pub basis: Option<f64>,
    pub beta: f64,
    pub alpha: Option<DistParams>,
    pub tax_rate: f64,
}

impl Default for AccountProfile {
    fn default() -> Self {
        Self {
            balance: 0.0,
            basis: None,
            beta: 0.0,
            alpha: None,
            tax_rate: 0.0,
        }
    }
}

impl AccountProfile {
    fn invested(balance: f64, beta: f64, alpha: DistParams) -> Self {
        Self {
            balance,
            beta,
            alpha: Some(alpha),
            ..Default::default()
        }
    }

    fn taxable(balance: f64, basis: f64, beta: f64, alpha: DistParams) -> Self {
        Self {
            basis: Some(basis),
            tax_rate: 0.2,
            ..Self::invested(balance, beta, alpha)
        }
    }

    fn build(&self) -> Result<Account, ConfigError> {
        let mut account = Account::new(self.balance)
            .with_beta(self.beta)
            .with_tax_rate(self.tax_rate);
        if let Some(basis) = self.basis {
            account = account.with_basis(basis);
        }
        if let Some(alpha) = self.alpha {
            account = account.with_alpha(alpha.build()?);
        }
        Ok(account)
    }
}

/// One wage earner with their own retirement accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnerProfile {
    pub name: String,
    pub salary: f64,
    /// Annual raise applied every January
    pub raise: DistParams,
    /// Bonus as a fraction of salary, paid in February
    pub bonus: f64,
    /// First year without a paycheck or 401k contributions
    pub retire_year: i32,
    /// First year retirement accounts can be drawn on
    pub access_year: i32,
    /// Annual 401k contribution
    pub contribution: f64,
    pub k401: AccountProfile,
    pub ira: AccountProfile,
    pub roth: AccountProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsuProfile {
    /// Shares vesting each quarter
    pub quantity: f64,
    /// Last month a tranche can vest
    pub vest_until: YearMonth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageProfile {
    pub principal: f64,
    pub payment: f64,
    pub rate: f64,
    /// Month the remaining balance is paid off in full
    pub payoff: YearMonth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseProfile {
    pub name: String,
    pub monthly: f64,
    /// One standard deviation of month-to-month variation, in dollars
    #[serde(default)]
    pub variation: f64,
    #[serde(default)]
    pub growth: Option<DistParams>,
    #[serde(default)]
    pub from: Option<YearMonth>,
    #[serde(default)]
    pub until: Option<YearMonth>,
    /// Paid from the 529 plan before any other account
    #[serde(default)]
    pub college: bool,
}

impl ExpenseProfile {
    fn new(name: &str, monthly: f64, variation: f64, growth: Option<DistParams>) -> Self {
        Self {
            name: name.to_string(),
            monthly,
            variation,
            growth,
            from: None,
            until: None,
            college: false,
        }
    }

    fn college(name: &str, annual: f64, first_year: i32, last_year: i32) -> Self {
        Self {
            from: Some(YearMonth::new(first_year, 1)),
            until: Some(YearMonth::new(last_year, 12)),
            college: true,
            ..Self::new(name, annual / 12.0, 0.0, None)
        }
    }

    fn build(&self) -> Result<Expense, ConfigError> {
        let mut expense = Expense::monthly(self.monthly, self.variation)?;
        if let Some(growth) = self.growth {
            expense = expense.with_growth(growth.build()?);
        }
        Ok(with_window(expense, self.from, self.until))
    }
}

/// Every tunable parameter of the example household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdProfile {
    pub earners: Vec<EarnerProfile>,
    /// Share price tracker for RSU grants
    pub stock: AccountProfile,
    pub rsus: Vec<RsuProfile>,
    pub checking: AccountProfile,
    /// Long-term taxable account that absorbs excess cash
    pub brokerage: AccountProfile,
    /// Taxable account receiving vested RSUs
    pub trading: AccountProfile,
    pub college_529: AccountProfile,
    pub mortgage: MortgageProfile,
    pub home: AccountProfile,
    pub expenses: Vec<ExpenseProfile>,
    /// Annual draw from 401k and IRA accounts, before tax
    pub pre_tax_retirement_income: f64,
    /// Annual draw from Roth accounts
    pub post_tax_retirement_income: f64,
    /// Annual escalation of contributions and retirement draws
    pub transfer_growth: f64,
    /// Annual 529 contribution, deductible for state tax
    pub college_savings: f64,
    pub college_savings_until: YearMonth,
    /// Checking balance above which cash moves to the brokerage
    pub checking_target: f64,
    /// Trading balance above which holdings move to the brokerage
    pub trading_target: f64,
}

impl Default for HouseholdProfile {
    fn default() -> Self {
        let managed = DistParams::new(0.0, 0.005);
        Self {
            earners: vec![
                EarnerProfile {
                    name: "Jordan".to_string(),
                    salary: 150_000.0,
                    raise: DistParams::new(0.03, 0.02),
                    bonus: 0.10,
                    retire_year: 2035,
                    access_year: 2040,
                    contribution: 19_500.0,
                    k401: AccountProfile::invested(148_000.0, 0.8, DistParams::new(0.01, 0.005)),
                    ira: AccountProfile::invested(230_000.0, 0.8, managed),
                    roth: AccountProfile::invested(57_000.0, 0.8, managed),
                },
                EarnerProfile {
                    name: "Casey".to_string(),
                    salary: 130_000.0,
                    raise: DistParams::new(0.03, 0.005),
                    bonus: 0.05,
                    retire_year: 2038,
                    access_year: 2043,
                    contribution: 19_500.0,
                    k401: AccountProfile::invested(230_000.0, 0.8, managed),
                    ira: AccountProfile::invested(98_000.0, 0.8, managed),
                    roth: AccountProfile::invested(157_000.0, 0.8, managed),
                },
            ],
            stock: AccountProfile::invested(42.0, 0.1, DistParams::new(0.02, 0.1)),
            rsus: vec![
                RsuProfile {
                    quantity: 200.0,
                    vest_until: YearMonth::new(2022, 4),
                },
                RsuProfile {
                    quantity: 120.0,
                    vest_until: YearMonth::new(2023, 4),
                },
            ],
            checking: AccountProfile {
                balance: 26_000.0,
                ..Default::default()
            },
            brokerage: AccountProfile::taxable(
                210_000.0,
                150_000.0,
                0.2,
                DistParams::new(0.01, 0.005),
            ),
            trading: AccountProfile::taxable(82_000.0, 51_000.0, 1.5, DistParams::new(0.0, 0.03)),
            college_529: AccountProfile::invested(98_000.0, 0.6, managed),
            mortgage: MortgageProfile {
                principal: 612_800.0,
                payment: 2_421.30,
                rate: 0.025,
                payoff: YearMonth::new(2050, 12),
            },
            home: AccountProfile::invested(945_000.0, 0.0, DistParams::new(0.02, 0.005)),
            expenses: vec![
                ExpenseProfile::new(
                    "Credit card",
                    3_500.0,
                    800.0,
                    Some(DistParams::new(0.03, 0.005)),
                ),
                ExpenseProfile {
                    until: Some(YearMonth::new(2025, 12)),
                    ..ExpenseProfile::new("Nanny", 2_500.0, 200.0, Some(DistParams::new(0.05, 0.0)))
                },
                ExpenseProfile::college("First child college", 50_000.0, 2030, 2033),
                ExpenseProfile::college("Second child college", 60_000.0, 2034, 2037),
                ExpenseProfile::college("Third child college", 65_000.0, 2036, 2039),
                ExpenseProfile::new(
                    "Travel",
                    2_000.0 / 12.0,
                    500.0,
                    Some(DistParams::new(0.03, 0.0)),
                ),
            ],
            pre_tax_retirement_income: 120_000.0,
            post_tax_retirement_income: 60_000.0,
            transfer_growth: 0.03,
            college_savings: 10_000.0,
            college_savings_until: YearMonth::new(2024, 12),
            checking_target: 20_000.0,
            trading_target: 250_000.0,
        }
    }
}

impl HouseholdProfile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Read a profile from a YAML file.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read profile {}", path.display()))?;
        Self::from_yaml(&content)
            .wrap_err_with(|| format!("failed to parse profile {}", path.display()))
    }
}

fn with_window<T: Temporal>(entity: T, from: Option<YearMonth>, until: Option<YearMonth>) -> T {
    let entity = match from {
        Some(at) => entity.active_from(at.year, at.month),
        None => entity,
    };
    match until {
        Some(at) => entity.active_until(at.year, at.month),
        None => entity,
    }
}

/// Last month before January of `year`.
fn before(year: i32) -> YearMonth {
    YearMonth::new(year - 1, 12)
}

#[derive(Debug, Clone)]
struct Earner {
    paycheck: IncomeId,
    contribution: TransferId,
    k401: AccountId,
}

#[derive(Debug, Clone)]
struct Bill {
    expense: ExpenseId,
    college: bool,
}

/// The example household and its monthly cash-flow policy.
#[derive(Debug, Clone)]
pub struct ExampleHousehold {
    household: Household,
    earners: Vec<Earner>,
    rsus: Vec<RsuId>,
    bills: Vec<Bill>,

    income: AccountId,
    vested: AccountId,
    checking: AccountId,
    brokerage: AccountId,
    trading: AccountId,
    college_529: AccountId,
    mortgage: AccountId,

    pre_tax_sources: Vec<AccountId>,
    roth_sources: Vec<AccountId>,
    savings: Vec<AccountId>,
    expense_sources: Vec<AccountId>,

    pre_tax_income: TransferId,
    post_tax_income: TransferId,
    college_savings: TransferId,

    federal: IncomeTax,
    state: IncomeTax,
    city: IncomeTax,

    payoff: YearMonth,
    checking_target: f64,
    trading_target: f64,
}

impl ExampleHousehold {
    pub fn new(profile: &HouseholdProfile) -> Result<Self, ConfigError> {
        let mut hh = Household::new();
        let growth = DistParams::new(profile.transfer_growth, 0.0).build()?;

        let stock = hh.add_account("Stock", profile.stock.build()?.unreported())?;
        let income = hh.add_account("Income", Account::new(0.0).unreported())?;
        let vested = hh.add_account("RSUs", Account::new(0.0).unreported())?;

        let checking = hh.add_account(
            "Checking",
            profile.checking.build()?.with_category(INVESTMENTS),
        )?;
        let brokerage = hh.add_account(
            "Brokerage",
            profile.brokerage.build()?.with_category(INVESTMENTS),
        )?;
        let trading = hh.add_account(
            "Trading",
            profile.trading.build()?.with_category(INVESTMENTS),
        )?;

        let mut earners = Vec::with_capacity(profile.earners.len());
        let mut k401s = Vec::new();
        let mut iras = Vec::new();
        let mut roths = Vec::new();
        for earner in &profile.earners {
            let retirement = |account: &AccountProfile| -> Result<Account, ConfigError> {
                Ok(account
                    .build()?
                    .with_category(RETIREMENT)
                    .active_from(earner.access_year, 1))
            };
            let k401 = hh.add_account(format!("{} 401k", earner.name), retirement(&earner.k401)?)?;
            iras.push(hh.add_account(format!("{} IRA", earner.name), retirement(&earner.ira)?)?);
            roths.push(hh.add_account(format!("{} Roth", earner.name), retirement(&earner.roth)?)?);
            k401s.push(k401);

            let last_paid = before(earner.retire_year);
            let paycheck = hh.add_income(
                format!("{} paycheck", earner.name),
                Income::new(earner.salary, earner.raise.build()?)
                    .with_bonus(earner.bonus)
                    .active_until(last_paid.year, last_paid.month),
            )?;
            let contribution = hh.add_transfer(
                format!("{} 401k", earner.name),
                Transfer::annual(earner.contribution)
                    .with_growth(growth)
                    .active_until(last_paid.year, last_paid.month),
            )?;
            earners.push(Earner {
                paycheck,
                contribution,
                k401,
            });
        }

        let college_529 = hh.add_account("College 529", profile.college_529.build()?)?;
        let m = &profile.mortgage;
        let mortgage = hh.add_account(
            "Mortgage",
            Account::mortgage(m.principal, m.payment, m.rate)
                .with_category(REAL_ESTATE)
                .active_until(m.payoff.year, m.payoff.month),
        )?;
        hh.add_account("Home", profile.home.build()?.with_category(REAL_ESTATE))?;

        let rsus = profile
            .rsus
            .iter()
            .enumerate()
            .map(|(i, grant)| {
                hh.add_rsu(
                    format!("RSU {}", i + 1),
                    RsuGrant::new(grant.quantity, stock)
                        .active_until(grant.vest_until.year, grant.vest_until.month),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bills = profile
            .expenses
            .iter()
            .map(|bill| -> Result<Bill, ConfigError> {
                Ok(Bill {
                    expense: hh.add_expense(bill.name.clone(), bill.build()?)?,
                    college: bill.college,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pre_tax_income = hh.add_transfer(
            "Pre-tax retirement income",
            Transfer::annual(profile.pre_tax_retirement_income).with_growth(growth),
        )?;
        let post_tax_income = hh.add_transfer(
            "Post-tax retirement income",
            Transfer::annual(profile.post_tax_retirement_income).with_growth(growth),
        )?;
        let until = profile.college_savings_until;
        let college_savings = hh.add_transfer(
            "College savings",
            Transfer::annual(profile.college_savings).active_until(until.year, until.month),
        )?;

        let savings = vec![brokerage, trading];
        let mut expense_sources = vec![checking];
        expense_sources.extend(&savings);
        expense_sources.extend(&roths);

        let mut pre_tax_sources = k401s;
        pre_tax_sources.extend(iras);

        Ok(Self {
            household: hh,
            earners,
            rsus,
            bills,
            income,
            vested,
            checking,
            brokerage,
            trading,
            college_529,
            mortgage,
            pre_tax_sources,
            roth_sources: roths,
            savings,
            expense_sources,
            pre_tax_income,
            post_tax_income,
            college_savings,
            federal: IncomeTax::federal(),
            state: IncomeTax::state(),
            city: IncomeTax::city(),
            payoff: m.payoff,
            checking_target: profile.checking_target,
            trading_target: profile.trading_target,
        })
    }

    pub fn checking(&self) -> AccountId {
        self.checking
    }

    pub fn mortgage(&self) -> AccountId {
        self.mortgage
    }

    pub fn college_529(&self) -> AccountId {
        self.college_529
    }

    /// The gross income account followed by every account that pays expenses.
    fn with_income_first(&self) -> Vec<AccountId> {
        let mut sources = vec![self.income];
        sources.extend(&self.expense_sources);
        sources
    }
}

impl HouseholdModel for ExampleHousehold {
    fn household(&self) -> &Household {
        &self.household
    }

    fn household_mut(&mut self) -> &mut Household {
        &mut self.household
    }

    fn run_month<R: Rng + ?Sized>(
        &mut self,
        now: YearMonth,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        let pre_tax = self.with_income_first();
        let hh = &mut self.household;
        let taxed = [self.income, self.vested];

        // Income
        for earner in &self.earners {
            hh.collect_income(earner.paycheck, self.income);
        }
        for &grant in &self.rsus {
            hh.collect_rsu(grant, self.vested);
        }
        for earner in &self.earners {
            hh.run_transfer(earner.contribution, &[self.income], earner.k401, Shortfall::Fail)?;
        }
        hh.run_transfer(
            self.pre_tax_income,
            &self.pre_tax_sources,
            self.income,
            Shortfall::Truncate,
        )?;

        // Pre-tax expenses
        hh.pay_mortgage_interest(self.mortgage, &pre_tax)?;

        // Taxes; 529 contributions are deductible for state tax only
        self.federal.calculate(hh, &taxed);
        self.city.calculate(hh, &taxed);
        hh.run_transfer(self.college_savings, &pre_tax, self.college_529, Shortfall::Fail)?;
        self.state.calculate(hh, &taxed);
        self.federal.commit(hh);
        self.state.commit(hh);
        self.city.commit(hh);

        hh.run_transfer(
            self.post_tax_income,
            &self.roth_sources,
            self.income,
            Shortfall::Truncate,
        )?;

        // Post-tax income
        hh.transfer(self.income, self.checking, None);
        hh.transfer(self.vested, self.trading, None);

        // Expenses
        let mut college_first = vec![self.college_529];
        college_first.extend(&self.expense_sources);
        for bill in &self.bills {
            let sources = if bill.college {
                &college_first
            } else {
                &self.expense_sources
            };
            hh.pay_expense(bill.expense, sources, rng)?;
        }

        hh.pay_mortgage_principal(self.mortgage, &self.expense_sources)?;
        if now == self.payoff {
            hh.pay_off_mortgage(self.mortgage, &self.expense_sources)?;
        }

        // Rebalance
        hh.keep(
            self.checking,
            self.brokerage,
            &self.savings,
            self.checking_target,
            0.0,
        );
        hh.sweep(self.trading, self.brokerage, self.trading_target);
        Ok(())
    }
}
