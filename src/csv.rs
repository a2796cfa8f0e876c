use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::bank::Account;
use crate::{AccountNumber, Amount, Command};

/// Errors that can occur when reading a command script or writing a report
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to open script: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized command '{command}'")]
    UnrecognizedCommand { line: usize, command: String },

    #[error("line {line}: {command} missing {field}")]
    MissingField {
        line: usize,
        command: String,
        field: &'static str,
    },

    #[error("line {line}: '{value}' is not an amount")]
    InvalidAmount { line: usize, value: String },

    #[error("failed to write report: {0}")]
    Write(#[source] csv::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    account: Option<AccountNumber>,
    name: Option<String>,
    amount: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    account: AccountNumber,
    name: &'a str,
    kind: &'static str,
    balance: String,
    available: String,
    overdraft_limit: String,
    card: String,
    closed: bool,
}

/// Read commands from a csv script
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, ScriptError>>, ScriptError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(ScriptError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| ScriptError::Parse { line, source })?;
            parse_row(line, row)
        }))
}

fn parse_row(line: usize, row: InputRow) -> Result<Command, ScriptError> {
    let command = row.r#type.as_str();
    let missing = |field: &'static str| ScriptError::MissingField {
        line,
        command: command.to_string(),
        field,
    };

    match command {
        "open_basic" => Ok(Command::OpenBasic {
            name: row.name.ok_or_else(|| missing("name"))?,
            opening: opening_balance(row.amount.ok_or_else(|| missing("amount"))?),
        }),
        "open_premium" => Ok(Command::OpenPremium {
            name: row.name.ok_or_else(|| missing("name"))?,
            opening: opening_balance(row.amount.ok_or_else(|| missing("amount"))?),
            overdraft_limit: amount(line, row.limit.ok_or_else(|| missing("limit"))?)?,
        }),
        "deposit" => Ok(Command::Deposit {
            account: row.account.ok_or_else(|| missing("account"))?,
            amount: amount(line, row.amount.ok_or_else(|| missing("amount"))?)?,
        }),
        "withdraw" => Ok(Command::Withdraw {
            account: row.account.ok_or_else(|| missing("account"))?,
            amount: amount(line, row.amount.ok_or_else(|| missing("amount"))?)?,
        }),
        "issue_card" => Ok(Command::IssueCard {
            account: row.account.ok_or_else(|| missing("account"))?,
        }),
        "set_overdraft" => Ok(Command::SetOverdraftLimit {
            account: row.account.ok_or_else(|| missing("account"))?,
            limit: amount(line, row.limit.ok_or_else(|| missing("limit"))?)?,
        }),
        "close" => Ok(Command::Close {
            account: row.account.ok_or_else(|| missing("account"))?,
        }),
        other => Err(ScriptError::UnrecognizedCommand {
            line,
            command: other.to_string(),
        }),
    }
}

/// Opening balances are never rejected here: text that is not a number is
/// passed on as NaN so the account coerces it like any other invalid value.
fn opening_balance(value: String) -> f64 {
    value.parse().unwrap_or(f64::NAN)
}

fn amount(line: usize, value: String) -> Result<Amount, ScriptError> {
    value
        .parse::<f64>()
        .ok()
        .and_then(Amount::try_from_float)
        .ok_or(ScriptError::InvalidAmount { line, value })
}

/// Write an account report in csv format
pub fn write_accounts<'a>(
    writer: impl io::Write,
    accounts: impl IntoIterator<Item = &'a Account>,
) -> Result<(), ScriptError> {
    let mut writer = csv::Writer::from_writer(writer);

    for account in accounts {
        let row = OutputRow {
            account: account.number(),
            name: account.name(),
            kind: account.kind().label(),
            balance: account.balance().to_string(),
            available: account.available_balance().to_string(),
            overdraft_limit: account.overdraft_limit().to_string(),
            card: account
                .card()
                .map(|card| card.number.digits())
                .unwrap_or_default(),
            closed: account.is_closed(),
        };
        writer.serialize(&row).map_err(ScriptError::Write)?;
    }

    writer.flush()?;
    Ok(())
}
