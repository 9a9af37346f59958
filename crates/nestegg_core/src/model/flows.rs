//! Cash flow generators and consumers
//!
//! Incomes, RSU grants, expenses and scheduled transfers hold no balance of
//! their own. Each month they report how much they produce or demand, and the
//! household moves that money between accounts.

use rand::Rng;

use super::distribution::Dist;
use super::ids::AccountId;
use super::period::{ActiveWindow, Clock, Temporal, YearMonth};
use crate::error::ConfigError;

const MONTHS_PER_YEAR: f64 = 12.0;

/// A salary-like income paid every `n` months plus an annual bonus.
#[derive(Debug, Clone)]
pub struct Income {
    pub(crate) name: String,
    annual: f64,
    growth: Dist,
    bonus: f64,
    bonus_month: u32,
    every_n_months: u32,
    window: ActiveWindow,
    clock: Clock,
}

impl Income {
    /// Annual income escalated every January by a draw from `growth`,
    /// paid monthly with no bonus.
    pub fn new(annual: f64, growth: Dist) -> Self {
        Self {
            name: String::new(),
            annual,
            growth,
            bonus: 0.0,
            bonus_month: 2,
            every_n_months: 1,
            window: ActiveWindow::ALWAYS,
            clock: Clock::default(),
        }
    }

    /// Pay `fraction` of the annual amount as a bonus in February.
    #[must_use]
    pub fn with_bonus(mut self, fraction: f64) -> Self {
        self.bonus = fraction;
        self
    }

    #[must_use]
    pub fn with_bonus_month(mut self, month: u32) -> Self {
        self.bonus_month = month;
        self
    }

    /// Pay every `months` months instead of monthly. Must divide twelve.
    pub fn paid_every(mut self, months: u32) -> Result<Self, ConfigError> {
        if months == 0 || 12 % months != 0 {
            return Err(ConfigError::InvalidIncomePeriod(months));
        }
        self.every_n_months = months;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annual(&self) -> f64 {
        self.annual
    }

    /// Amount paid in the current month.
    pub fn amount(&self) -> f64 {
        if !self.is_active() {
            return 0.0;
        }
        let month = self.now().month;
        let mut amount = 0.0;
        if month % self.every_n_months == 0 {
            amount += self.annual / (MONTHS_PER_YEAR / self.every_n_months as f64);
        }
        if month == self.bonus_month {
            amount += self.annual * self.bonus;
        }
        amount
    }
}

impl Temporal for Income {
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
        if now.is_new_year() {
            self.annual += self.annual * self.growth.sample(rng);
        }
    }
}

/// Restricted stock vesting quarterly at the price tracked by an account.
#[derive(Debug, Clone)]
pub struct RsuGrant {
    pub(crate) name: String,
    quantity: f64,
    price: AccountId,
    window: ActiveWindow,
    clock: Clock,
}

impl RsuGrant {
    /// `quantity` shares vest each quarter, valued at `price`'s balance.
    pub fn new(quantity: f64, price: AccountId) -> Self {
        Self {
            name: String::new(),
            quantity,
            price,
            window: ActiveWindow::ALWAYS,
            clock: Clock::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price_account(&self) -> AccountId {
        self.price
    }

    /// Value vesting this month given the current share price.
    pub fn amount(&self, price: f64) -> f64 {
        if self.is_active() && self.now().is_quarter_start() {
            self.quantity * price
        } else {
            0.0
        }
    }
}

impl Temporal for RsuGrant {
    fn window(&self) -> &ActiveWindow {
        &self.window
    }

    fn window_mut(&mut self) -> &mut ActiveWindow {
        &mut self.window
    }

    fn clock(&self) -> &Clock {
        &self.clock
    }

    fn advance<R: Rng + ?Sized>(&mut self, now: YearMonth, market: f64, _rng: &mut R) {
        self.clock = Clock { now, market };
    }
}

/// Recurring spending with random month-to-month variation.
#[derive(Debug, Clone)]
pub struct Expense {
    pub(crate) name: String,
    monthly: f64,
    scale: f64,
    noise: Dist,
    growth: Option<Dist>,
    window: ActiveWindow,
    clock: Clock,
}

impl Expense {
    /// Spend `monthly` on average, varying by `variation` (one standard
    /// deviation, in currency units) from month to month.
    pub fn monthly(monthly: f64, variation: f64) -> Result<Self, ConfigError> {
        let relative = if monthly == 0.0 {
            0.0
        } else {
            (variation / monthly).abs()
        };
        Ok(Self {
            name: String::new(),
            monthly,
            scale: 1.0,
            noise: Dist::new(1.0, relative)?,
            growth: None,
            window: ActiveWindow::ALWAYS,
            clock: Clock::default(),
        })
    }

    /// Spend `annual / 12` each month.
    pub fn annual(annual: f64, variation: f64) -> Result<Self, ConfigError> {
        Self::monthly(annual / MONTHS_PER_YEAR, variation)
    }

    /// Escalate the expense every January by a draw from `growth`.
    #[must_use]
    pub fn with_growth(mut self, growth: Dist) -> Self {
        self.growth = Some(growth);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current average monthly amount, before noise.
    pub fn base_amount(&self) -> f64 {
        self.monthly * self.scale
    }

    /// Amount owed this month. Noise is drawn on every call and not persisted.
    pub fn amount<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if !self.is_active() {
            return 0.0;
        }
        self.noise.sample(rng) * self.base_amount()
    }
}

impl Temporal for Expense {
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
        if now.is_new_year()
            && let Some(growth) = &self.growth
        {
            self.scale += self.scale * growth.sample(rng);
        }
    }
}

/// A scheduled recurring movement of money between accounts.
#[derive(Debug, Clone)]
pub struct Transfer {
    pub(crate) name: String,
    monthly: f64,
    growth: Option<Dist>,
    window: ActiveWindow,
    clock: Clock,
}

impl Transfer {
    pub fn monthly(monthly: f64) -> Self {
        Self {
            name: String::new(),
            monthly,
            growth: None,
            window: ActiveWindow::ALWAYS,
            clock: Clock::default(),
        }
    }

    pub fn annual(annual: f64) -> Self {
        Self::monthly(annual / MONTHS_PER_YEAR)
    }

    /// Escalate the amount every January by a draw from `growth`.
    #[must_use]
    pub fn with_growth(mut self, growth: Dist) -> Self {
        self.growth = Some(growth);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Amount scheduled this month; zero when inactive.
    pub fn amount(&self) -> f64 {
        if self.is_active() { self.monthly } else { 0.0 }
    }
}

impl Temporal for Transfer {
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
        if now.is_new_year()
            && let Some(growth) = &self.growth
        {
            self.monthly += self.monthly * growth.sample(rng);
        }
    }
}
