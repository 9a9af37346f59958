//! Accounts: stores of value with a basis/gain split and a ledger
//!
//! An account's balance is always `basis + gain`. Basis is after-tax principal,
//! gain is unrealized appreciation. Withdrawals realize gain proportionally and
//! withhold tax on the realized portion at the account's `tax_rate`.
//!
//! Mortgages are accounts with a negative balance and a fixed payment schedule;
//! they share the same ledger and bookkeeping but expose the monthly interest
//! and principal portions separately so the household can fund them from
//! different sources.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::distribution::Dist;
use super::ledger::{EPSILON, LedgerEntry};
use super::period::{ActiveWindow, Clock, Temporal, YearMonth};

/// Fixed-rate, fixed-payment loan terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    /// Monthly payment covering interest and principal
    pub payment: f64,
    /// Nominal annual interest rate
    pub rate: f64,
    /// Interest accrued in the current month
    pub interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccountKind {
    Standard,
    Mortgage(MortgageTerms),
}

/// Breakdown of a single withdrawal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Withdrawal {
    /// Amount delivered to the caller
    pub net: f64,
    /// Amount that left the account
    pub gross: f64,
    /// Amount withheld as tax on realized gain
    pub tax: f64,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub(crate) name: String,
    basis: f64,
    gain: f64,
    beta: f64,
    alpha: Option<Dist>,
    tax_rate: f64,
    category: Option<String>,
    reported: bool,
    kind: AccountKind,
    window: ActiveWindow,
    clock: Clock,
    ledger: Vec<LedgerEntry>,
}

impl Account {
    /// An account holding `total`, all of it basis.
    pub fn new(total: f64) -> Self {
        Self {
            name: String::new(),
            basis: total,
            gain: 0.0,
            beta: 0.0,
            alpha: None,
            tax_rate: 0.0,
            category: None,
            reported: true,
            kind: AccountKind::Standard,
            window: ActiveWindow::ALWAYS,
            clock: Clock::default(),
            ledger: Vec::new(),
        }
    }

    /// A loan with `principal` outstanding.
    pub fn mortgage(principal: f64, payment: f64, rate: f64) -> Self {
        Self {
            kind: AccountKind::Mortgage(MortgageTerms {
                payment,
                rate,
                interest: 0.0,
            }),
            ..Self::new(-principal)
        }
    }

    /// Split the current balance so that `basis` is principal and the rest is gain.
    #[must_use]
    pub fn with_basis(mut self, basis: f64) -> Self {
        let total = self.balance();
        self.basis = basis;
        self.gain = total - basis;
        self
    }

    /// Sensitivity to the shared market factor.
    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Idiosyncratic annual return. Without one the account does not grow.
    #[must_use]
    pub fn with_alpha(mut self, alpha: Dist) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Fraction of realized gain withheld on withdrawal.
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Leave this account out of balance tables (clearing accounts, price trackers).
    #[must_use]
    pub fn unreported(mut self) -> Self {
        self.reported = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn basis(&self) -> f64 {
        self.basis
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn balance(&self) -> f64 {
        self.basis + self.gain
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_reported(&self) -> bool {
        self.reported
    }

    pub fn is_mortgage(&self) -> bool {
        matches!(self.kind, AccountKind::Mortgage(_))
    }

    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// Monthly return under the current market factor: `market * beta + alpha`.
    pub fn monthly_rate<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.alpha {
            Some(alpha) => self.clock.market * self.beta + alpha.sample_monthly(rng),
            None => 0.0,
        }
    }

    fn record(&mut self, note: &str, amount: f64, tax: f64) {
        if amount.abs() > EPSILON {
            self.ledger.push(LedgerEntry::new(
                self.clock.now,
                note,
                amount,
                tax,
                self.balance(),
            ));
        }
    }

    /// Add principal. Deposits are accepted whether or not the account is active.
    pub fn deposit(&mut self, amount: f64, note: &str) {
        self.basis += amount;
        self.record(note, amount, 0.0);
    }

    /// Withdraw up to `amount` net of tax and return what was delivered.
    pub fn withdraw(&mut self, amount: f64, note: &str) -> f64 {
        self.withdraw_detailed(amount, note).net
    }

    /// Withdraw up to `amount` net of tax.
    ///
    /// Inactive accounts and accounts without a positive balance deliver
    /// nothing. Otherwise the gross reduction is sized so that, after tax on
    /// the realized share of gain, `amount` remains; the request is clamped so
    /// the gross never exceeds the balance. A loss is realized untaxed.
    pub fn withdraw_detailed(&mut self, amount: f64, note: &str) -> Withdrawal {
        let balance = self.balance();
        if !self.is_active() || amount <= 0.0 || balance <= 0.0 {
            return Withdrawal::default();
        }

        let gain_fraction = self.gain / balance;
        let taxable = gain_fraction.clamp(0.0, 1.0) * self.tax_rate;
        let net = amount.min(balance * (1.0 - taxable));
        if net <= 0.0 {
            return Withdrawal::default();
        }

        let gross = net / (1.0 - taxable);
        let tax = gross * taxable;
        self.basis -= gross * (1.0 - gain_fraction);
        self.gain -= gross * gain_fraction;
        self.record(note, -net, -tax);

        Withdrawal { net, gross, tax }
    }

    /// Interest accrued this month; zero outside the mortgage's window.
    pub fn interest_due(&self) -> f64 {
        match self.kind {
            AccountKind::Mortgage(terms) if self.is_active() => terms.interest,
            _ => 0.0,
        }
    }

    /// Principal scheduled this month, never more than the outstanding debt.
    pub fn principal_due(&self) -> f64 {
        match self.kind {
            AccountKind::Mortgage(terms) if self.is_active() => {
                let owed = (-self.balance()).max(0.0);
                (terms.payment - terms.interest).clamp(0.0, owed)
            }
            _ => 0.0,
        }
    }
}

impl Temporal for Account {
    fn window(&self) -> &ActiveWindow {
        &self.window
    }

    fn window_mut(&mut self) -> &mut ActiveWindow {
        &mut self.window
    }

    fn clock(&self) -> &Clock {
        &self.clock
    }

    fn advance<R: Rng + ?Sized>(&mut self, now: YearMonth, market: f64, rng: &mut R) {
        self.clock = Clock { now, market };

        let growth = self.balance() * self.monthly_rate(rng);
        self.gain += growth;
        self.record("Gain", growth, 0.0);

        if let AccountKind::Mortgage(terms) = self.kind {
            let interest = if self.is_active() {
                -self.balance() * terms.rate / 12.0
            } else {
                0.0
            };
            self.kind = AccountKind::Mortgage(MortgageTerms { interest, ..terms });
            if interest != 0.0 {
                self.deposit(-interest, "Interest");
            }
        }
    }
}
