use std::fs;
use std::io::Cursor;
use std::str::FromStr;

use casino_ledger::common::config::{CasinoConfig, StoreBackend};
use casino_ledger::common::error::{AppError, CasinoError};
use casino_ledger::common::money::Money;
use casino_ledger::domain::history::GameResult;
use casino_ledger::domain::transaction::{TxFilter, TxKind, TxStatus};
use casino_ledger::games::outcome::Outcome;
use casino_ledger::worker::casino::Casino;

fn test_config(store: StoreBackend) -> CasinoConfig {
    CasinoConfig {
        resolve_delay_ms: 0,
        rng_seed: Some(2024),
        store,
        ..CasinoConfig::default()
    }
}

fn run_script(casino: &mut Casino, input_csv: &str) {
    let mut worker = casino_ledger::worker::processor::Processor::new();

    let rdr = Cursor::new(input_csv.as_bytes());
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    for row in casino_ledger::io::reader::read_events(&mut csv_reader) {
        let ev = row.expect("failed to parse input row");
        // rejected events are part of the scenarios
        let _ = worker.process(casino, ev);
    }
}

fn run_case(input_csv: &str, store: StoreBackend) -> String {
    let mut casino = Casino::new(test_config(store)).unwrap();
    run_script(&mut casino, input_csv);

    let mut out = Vec::<u8>::new();
    casino_ledger::io::writer::write_accounts(&mut out, &casino.accounts().unwrap())
        .expect("failed to write output CSV");
    String::from_utf8(out).expect("output was not valid UTF-8")
}

fn normalize_csv(s: &str) -> String {
    // Normalize line endings + trim trailing whitespace lines.
    s.replace("\r\n", "\n")
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

#[test]
fn case1_register_deposit_withdraw() {
    let input = fs::read_to_string("tests/fixtures/case1_input.csv").unwrap();
    let expected = fs::read_to_string("tests/fixtures/case1_expected.csv").unwrap();

    for store in [StoreBackend::Memory, StoreBackend::Kv] {
        let actual = run_case(&input, store);
        assert_eq!(normalize_csv(&actual), normalize_csv(&expected), "{store}");
    }
}

#[test]
fn case2_rejected_actions_leave_no_trace() {
    let input = fs::read_to_string("tests/fixtures/case2_input.csv").unwrap();
    let expected = fs::read_to_string("tests/fixtures/case2_expected.csv").unwrap();

    let actual = run_case(&input, StoreBackend::Memory);

    assert_eq!(normalize_csv(&actual), normalize_csv(&expected));
}

#[test]
fn case3_games_keep_ledger_consistent() {
    let input = fs::read_to_string("tests/fixtures/case3_input.csv").unwrap();
    let mut casino = Casino::new(test_config(StoreBackend::Kv)).unwrap();
    run_script(&mut casino, &input);

    let acc = casino.current_account().unwrap().expect("erin is logged in");
    assert!(acc.is_balanced());
    assert_eq!(acc.game_history.len(), 10);

    let bets = acc
        .transactions
        .iter()
        .filter(|t| t.kind == TxKind::Bet)
        .count();
    let wins = acc
        .transactions
        .iter()
        .filter(|t| t.kind == TxKind::Win)
        .count();
    assert_eq!(bets, 10);
    let stats = casino.game_stats().unwrap();
    assert_eq!(stats.wins, wins);
    assert_eq!(stats.wins + stats.losses, 10);

    let history_net: Money = acc.game_history.iter().map(|h| h.net_amount).sum();
    assert_eq!(acc.balance(), money("0.252222") + history_net);

    for entry in &acc.game_history {
        match entry.result {
            GameResult::Win => assert!(entry.win_amount >= entry.bet_amount),
            GameResult::Loss => assert_eq!(entry.win_amount, Money::zero()),
        }
    }
}

#[test]
fn fresh_account_then_bet_and_win() {
    let mut casino = Casino::new(test_config(StoreBackend::Memory)).unwrap();
    casino.register("scenario@casino.com", "scenario1", "Scenario").unwrap();
    casino.login("scenario@casino.com", "scenario1").unwrap();

    let acc = casino.current_account().unwrap().unwrap();
    assert_eq!(acc.balance(), money("0.002222"));
    assert_eq!(acc.transactions.len(), 1);
    assert_eq!(acc.transactions[0].kind, TxKind::Bonus);
    assert_eq!(acc.transactions[0].amount, money("0.002222"));

    let handle = casino.place_wager(1, money("0.001")).unwrap();
    let acc = casino.current_account().unwrap().unwrap();
    assert_eq!(acc.balance(), money("0.001222"));
    assert_eq!(acc.transactions[0].kind, TxKind::Bet);
    assert_eq!(acc.transactions[0].amount, -money("0.001"));

    let outcome = casino.resolve_wager(&handle).unwrap();
    let acc = casino.current_account().unwrap().unwrap();
    match outcome.result {
        GameResult::Win => {
            assert_eq!(acc.balance(), money("0.001222") + outcome.payout);
            assert_eq!(acc.transactions[0].kind, TxKind::Win);
            assert_eq!(acc.transactions[0].amount, outcome.payout);
            assert!(outcome.payout >= money("0.001") && outcome.payout <= money("0.005"));
        }
        GameResult::Loss => {
            assert_eq!(acc.balance(), money("0.001222"));
            assert_eq!(acc.transactions[0].kind, TxKind::Bet);
        }
    }
    let entry = &acc.game_history[0];
    assert_eq!(entry.bet_amount, money("0.001"));
    assert_eq!(entry.win_amount, outcome.payout);
    assert_eq!(entry.net_amount, outcome.payout - money("0.001"));
    assert!(acc.is_balanced());
}

#[test]
fn example_win_of_three_thousandths() {
    use casino_ledger::domain::store::{AccountStore, MemoryStore};
    use casino_ledger::games::catalog;
    use casino_ledger::worker::handlers::{account, wager};

    let config = CasinoConfig::default();
    let mut store = MemoryStore::new();
    account::register(&mut store, &config, "ex@casino.com", "example1", "Ex").unwrap();
    let game = catalog::find(1).unwrap();

    wager::place(&mut store, game, "ex@casino.com", money("0.001")).unwrap();
    let balance = wager::settle(
        &mut store,
        game,
        "ex@casino.com",
        money("0.001"),
        &Outcome::win(money("0.003"), 3.0),
    )
    .unwrap();
    assert_eq!(balance, money("0.004222"));

    let acc = store.lookup("ex@casino.com").unwrap().unwrap();
    assert_eq!(acc.transactions[0].kind, TxKind::Win);
    assert_eq!(acc.transactions[0].amount, money("0.003"));
    assert_eq!(acc.transactions[0].status, TxStatus::Completed);
    let entry = &acc.game_history[0];
    assert_eq!(
        (entry.bet_amount, entry.win_amount, entry.net_amount, entry.result),
        (money("0.001"), money("0.003"), money("0.002"), GameResult::Win)
    );
}

#[test]
fn transaction_filters_split_the_ledger() {
    let input = fs::read_to_string("tests/fixtures/case3_input.csv").unwrap();
    let mut casino = Casino::new(test_config(StoreBackend::Memory)).unwrap();
    run_script(&mut casino, &input);
    casino
        .withdraw(money("0.001"), "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2")
        .unwrap();

    let all = casino.list_transactions(TxFilter::All).unwrap();
    let deposits = casino.list_transactions(TxFilter::Deposits).unwrap();
    let withdrawals = casino.list_transactions(TxFilter::Withdrawals).unwrap();
    let games = casino.list_transactions(TxFilter::Games).unwrap();

    assert_eq!(deposits.len(), 2);
    assert_eq!(withdrawals.len(), 1);
    assert_eq!(withdrawals[0].status, TxStatus::Pending);
    assert_eq!(all.len(), deposits.len() + withdrawals.len() + games.len());
    assert_eq!(all[0].kind, TxKind::Withdraw);
}

#[test]
fn run_requires_a_script_path() {
    let err = casino_ledger::app::run(vec!["casino_ledger"]).unwrap_err();
    assert!(matches!(err, AppError::MissingArg));
    assert!(err.to_string().contains("CASINO_RESOLVE_DELAY_MS=0"));
    assert_eq!(
        CasinoError::BelowMinimum { minimum: money("0.001") }.to_string(),
        "amount is below the minimum of 0.00100000"
    );
}

#[test]
fn run_accepts_a_transaction_filter() {
    casino_ledger::app::run(vec![
        "casino_ledger",
        "tests/fixtures/case1_input.csv",
        "--transactions=deposits",
    ])
    .unwrap();

    let err = casino_ledger::app::run(vec![
        "casino_ledger",
        "tests/fixtures/case1_input.csv",
        "--transactions=refunds",
    ])
    .unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
}
