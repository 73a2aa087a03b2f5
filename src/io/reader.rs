use crate::common::{event::SessionEvent, money::Money};
use std::{io::Read, str::FromStr};

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the session script headers.
/// Columns an action does not use stay empty.
struct CsvRow {
    action: String,
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    amount: Option<String>,
    game: Option<u32>,
    address: Option<String>,
}

/// Reads and validates session script rows from a CSV reader.
///
/// Supported headers: `action,email,password,name,amount,game,address`.
/// Normalizes `action` to lowercase and requires the columns each action
/// needs; errors name the row (1-based, header excluded) and the missing
/// column.
///
/// # Examples
///
/// ```
/// use casino_ledger::io::reader::read_events;
/// use casino_ledger::common::event::SessionEvent;
/// use csv::ReaderBuilder;
///
/// let data = "action,email,password,name,amount,game,address\n\
/// login,demo@casino.com,password123,,,,\n\
/// play,,,,,2,\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let events: Vec<_> = read_events(&mut rdr).collect();
///
/// assert!(matches!(events[0], Ok(SessionEvent::Login { .. })));
/// assert!(matches!(events[1], Ok(SessionEvent::Play { game: 2, amount: None })));
/// ```
pub fn read_events<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<SessionEvent, String>> + '_ {
    rdr.deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, res)| {
            let row_no = idx + 1;
            let row = res.map_err(|e| e.to_string())?;
            let action = row.action.trim().to_ascii_lowercase();
            let missing = |field: &str| format!("row {row_no}: {action} missing {field}");

            match action.as_str() {
                "register" => Ok(SessionEvent::Register {
                    email: row.email.ok_or_else(|| missing("email"))?,
                    password: row.password.ok_or_else(|| missing("password"))?,
                    name: row.name.unwrap_or_default(),
                }),
                "login" => Ok(SessionEvent::Login {
                    email: row.email.ok_or_else(|| missing("email"))?,
                    password: row.password.ok_or_else(|| missing("password"))?,
                }),
                "logout" => Ok(SessionEvent::Logout),
                "deposit" => {
                    let amt_str = row.amount.ok_or_else(|| missing("amount"))?;
                    Ok(SessionEvent::Deposit {
                        amount: parse_amount(row_no, &amt_str)?,
                    })
                }
                "withdraw" => {
                    let amt_str = row.amount.ok_or_else(|| missing("amount"))?;
                    Ok(SessionEvent::Withdraw {
                        amount: parse_amount(row_no, &amt_str)?,
                        address: row.address.ok_or_else(|| missing("address"))?,
                    })
                }
                "play" => Ok(SessionEvent::Play {
                    game: row.game.ok_or_else(|| missing("game"))?,
                    amount: row
                        .amount
                        .map(|a| parse_amount(row_no, &a))
                        .transpose()?,
                }),
                other => Err(format!("row {row_no}: unknown action: {other}")),
            }
        })
}

fn parse_amount(row_no: usize, raw: &str) -> Result<Money, String> {
    Money::from_str(raw).map_err(|e| format!("row {row_no}: invalid amount {raw:?}: {e}"))
}
