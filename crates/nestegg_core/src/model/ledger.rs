//! Per-account transaction ledger
//!
//! Every material change to an account's balance appends exactly one
//! [`LedgerEntry`]. Entries are never modified after they are recorded.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::period::YearMonth;
use crate::format::format_currency;

/// Amounts smaller than this are treated as zero when recording ledger entries
/// and when deciding whether a waterfall has been satisfied.
pub const EPSILON: f64 = 0.001;

/// One transaction against one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub year: i32,
    pub month: u32,
    pub note: String,
    /// Positive for inflows, negative for outflows
    pub amount: f64,
    /// Portion of an outflow retained as tax (zero or negative)
    pub tax: f64,
    /// Account balance after this transaction
    pub balance: f64,
}

impl LedgerEntry {
    pub fn new(at: YearMonth, note: impl Into<String>, amount: f64, tax: f64, balance: f64) -> Self {
        Self {
            year: at.year,
            month: at.month,
            note: note.into(),
            amount,
            tax,
            balance,
        }
    }

    pub fn at(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tax = if self.tax.abs() < EPSILON {
            "-".to_string()
        } else {
            format_currency(self.tax)
        };
        write!(
            f,
            "{} {:2} {:<30} {:>15} {:>15} {:>15}",
            self.year,
            self.month,
            self.note,
            format_currency(self.amount),
            tax,
            format_currency(self.balance)
        )
    }
}

/// Printable view over a whole account ledger.
pub struct LedgerTable<'a>(pub &'a [LedgerEntry]);

impl fmt::Display for LedgerTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Year Mo {:<30} {:>15} {:>15} {:>15}",
            "Note", "Amount", "Tax", "Balance"
        )?;
        for entry in self.0 {
            write!(f, "\n{entry}")?;
        }
        Ok(())
    }
}
