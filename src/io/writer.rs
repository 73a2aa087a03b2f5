use std::io::Write;

use crate::domain::{account::Account, transaction::TransactionRecord};

#[derive(serde::Serialize)]
/// Internal CSV output row for the account statement.
///
/// Headers written (in this order): `email,name,balance,transactions,games,bonus`.
/// Balances are formatted to 8 decimal places as strings.
struct AccountRow<'a> {
    email: &'a str,
    name: &'a str,
    balance: String,
    transactions: usize,
    games: usize,
    bonus: bool,
}

#[derive(serde::Serialize)]
/// Internal CSV output row for a transaction log.
struct TransactionRow<'a> {
    id: u32,
    #[serde(rename = "type")]
    kind: String,
    amount: String,
    game: &'a str,
    status: String,
    timestamp: String,
}

/// Writes one statement row per account.
///
/// For deterministic output, accounts are sorted by email before writing.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use casino_ledger::io::writer::write_accounts;
/// use casino_ledger::domain::account::Account;
///
/// let accounts = vec![
///     Account::new("b@casino.com", "secret1", "B"),
///     Account::new("a@casino.com", "secret1", "A"),
/// ];
///
/// let mut out = Vec::new();
/// write_accounts(&mut out, &accounts).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.starts_with("email,name,balance,transactions,games,bonus\n"));
/// assert!(s.contains("\na@casino.com,A,0.00000000,0,0,false\nb@casino.com,"));
/// ```
pub fn write_accounts<W: Write>(writer: W, accounts: &[Account]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    let mut sorted: Vec<&Account> = accounts.iter().collect();
    sorted.sort_unstable_by(|a, b| a.email.cmp(&b.email));

    for acc in sorted {
        wtr.serialize(AccountRow {
            email: &acc.email,
            name: &acc.display_name,
            balance: acc.balance().to_string_8dp(),
            transactions: acc.transactions.len(),
            games: acc.game_history.len(),
            bonus: acc.has_received_bonus,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a transaction log in the order given (newest first for ledgers).
///
/// Headers: `id,type,amount,game,status,timestamp`; timestamps are RFC 3339.
pub fn write_transactions<W: Write>(
    writer: W,
    transactions: &[TransactionRecord],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for tx in transactions {
        wtr.serialize(TransactionRow {
            id: tx.id,
            kind: tx.kind.to_string(),
            amount: tx.amount.to_string_8dp(),
            game: tx.game.as_deref().unwrap_or(""),
            status: tx.status.to_string(),
            timestamp: tx.timestamp.to_rfc3339(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
