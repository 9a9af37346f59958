//! Ledger export
//!
//! Writes one file per account containing its full transaction history.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use color_eyre::eyre::{self, WrapErr};
use nestegg_core::{Household, LedgerTable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LedgerFormat {
    /// Aligned plain-text table
    #[default]
    Text,
    /// Pretty-printed JSON array of entries
    Json,
}

impl LedgerFormat {
    fn extension(self) -> &'static str {
        match self {
            LedgerFormat::Text => "txt",
            LedgerFormat::Json => "json",
        }
    }
}

/// File name for an account's ledger: the account name with anything other
/// than ASCII alphanumerics, `-` and `_` replaced by `_`.
pub fn ledger_file_name(account: &str, format: LedgerFormat) -> String {
    let stem: String = account
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.{}", format.extension())
}

/// Write every account's ledger into `dir`, creating it if needed.
///
/// Returns the paths written, in account registration order.
pub fn export_ledgers(
    household: &Household,
    dir: &Path,
    format: LedgerFormat,
) -> eyre::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create ledger directory {}", dir.display()))?;

    let mut written = Vec::new();
    for (name, ledger) in household.ledgers() {
        let path = dir.join(ledger_file_name(name, format));
        let content = match format {
            LedgerFormat::Text => LedgerTable(ledger).to_string(),
            LedgerFormat::Json => serde_json::to_string_pretty(ledger)?,
        };
        fs::write(&path, content)
            .wrap_err_with(|| format!("failed to write ledger {}", path.display()))?;
        written.push(path);
    }

    tracing::info!(
        accounts = written.len(),
        dir = %dir.display(),
        "exported ledgers"
    );
    Ok(written)
}
