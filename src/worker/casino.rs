//! The casino service: one object owning the account store, the session and
//! the wager book, constructed once and passed to whoever drives it.

use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, warn};

use crate::{
    common::{config::CasinoConfig, error::CasinoError, money::Money},
    domain::{
        account::Account,
        history::{GameHistoryEntry, GameStats},
        session::Session,
        store::{self, AccountStore},
        transaction::{TransactionRecord, TxFilter},
    },
    games::{catalog, outcome::Outcome},
    worker::{
        handlers::{account, load_account, wager, wallet},
        wagers::{WagerBook, WagerHandle, WagerState},
    },
};

pub const DEMO_EMAIL: &str = "demo@casino.com";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_NAME: &str = "Demo User";

#[derive(Debug)]
pub struct Casino {
    config: CasinoConfig,
    store: Box<dyn AccountStore>,
    session: Session,
    wagers: WagerBook,
    rng: StdRng,
}

impl Casino {
    /// Opens the store backend named by `config`.
    pub fn new(config: CasinoConfig) -> Result<Self, CasinoError> {
        let store = store::open(config.store);
        Self::with_store(config, store)
    }

    pub fn with_store(
        config: CasinoConfig,
        store: Box<dyn AccountStore>,
    ) -> Result<Self, CasinoError> {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut casino = Self {
            config,
            store,
            session: Session::new(),
            wagers: WagerBook::new(),
            rng,
        };
        if casino.config.seed_demo_user {
            casino.seed_demo_user()?;
        }
        Ok(casino)
    }

    pub fn config(&self) -> &CasinoConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn register(&mut self, email: &str, password: &str, name: &str) -> Result<Account, CasinoError> {
        account::register(self.store.as_mut(), &self.config, email, password, name)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Account, CasinoError> {
        let account = account::authenticate(self.store.as_ref(), email, password)?;
        self.session.login(&account.email);
        info!(email = %account.email, "logged in");
        Ok(account)
    }

    pub fn logout(&mut self) {
        if let Some(email) = self.session.email() {
            info!(email, "logged out");
        }
        self.session.logout();
    }

    pub fn current_account(&self) -> Result<Option<Account>, CasinoError> {
        self.session.current(self.store.as_ref())
    }

    pub fn deposit(&mut self, amount: Money) -> Result<Money, CasinoError> {
        let email = self.session.require_email()?;
        wallet::deposit(self.store.as_mut(), &self.config, email, amount)
    }

    pub fn withdraw(&mut self, amount: Money, address: &str) -> Result<Money, CasinoError> {
        let email = self.session.require_email()?;
        wallet::withdraw(self.store.as_mut(), &self.config, email, amount, address)
    }

    pub fn max_withdrawable(&self) -> Result<Option<Money>, CasinoError> {
        let account = self.require_account()?;
        Ok(wallet::max_withdrawable(&account, &self.config))
    }

    /// Debits the bet and moves the account to `BetPlaced`.
    pub fn place_wager(&mut self, game_id: u32, amount: Money) -> Result<WagerHandle, CasinoError> {
        let email = self.session.require_email()?;
        let game = catalog::find(game_id).ok_or(CasinoError::UnknownGame(game_id))?;
        self.wagers.ensure_idle(email)?;

        wager::place(self.store.as_mut(), game, email, amount)?;
        self.wagers
            .open(email, game, amount, self.config.resolve_delay())
    }

    /// Waits out the simulated delay, draws the outcome and settles it. The
    /// account is back to `Idle` afterwards. A wager whose settlement fails
    /// stays `BetPlaced` with its drawn outcome, which a retry settles as is.
    pub fn resolve_wager(&mut self, handle: &WagerHandle) -> Result<Outcome, CasinoError> {
        let mut pending = self.wagers.take(handle)?;

        let remaining = pending
            .ready_at
            .saturating_duration_since(std::time::Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }

        let outcome = match pending.outcome.take() {
            Some(outcome) => outcome,
            None => match pending.game.model.resolve(&mut self.rng, pending.amount) {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.wagers.restore(pending);
                    return Err(e);
                }
            },
        };

        match wager::settle(
            self.store.as_mut(),
            pending.game,
            &pending.handle.email,
            pending.amount,
            &outcome,
        ) {
            Ok(_) => Ok(outcome),
            Err(e) => {
                warn!(id = handle.id, error = %e, "settlement failed, wager kept pending");
                pending.outcome = Some(outcome);
                self.wagers.restore(pending);
                Err(e)
            }
        }
    }

    /// Places and resolves one wager; `amount` defaults to the game's minimum.
    pub fn play(&mut self, game_id: u32, amount: Option<Money>) -> Result<Outcome, CasinoError> {
        let game = catalog::find(game_id).ok_or(CasinoError::UnknownGame(game_id))?;
        let handle = self.place_wager(game_id, amount.unwrap_or(game.min_bet))?;
        self.resolve_wager(&handle)
    }

    /// Wager state of the logged-in account.
    pub fn wager_state(&self) -> Result<WagerState, CasinoError> {
        let email = self.session.require_email()?;
        Ok(self.wagers.state(email))
    }

    pub fn list_transactions(&self, filter: TxFilter) -> Result<Vec<TransactionRecord>, CasinoError> {
        let account = self.require_account()?;
        Ok(account
            .transactions
            .into_iter()
            .filter(|t| filter.matches(t.kind))
            .collect())
    }

    pub fn list_game_history(&self) -> Result<Vec<GameHistoryEntry>, CasinoError> {
        Ok(self.require_account()?.game_history)
    }

    pub fn game_stats(&self) -> Result<GameStats, CasinoError> {
        let account = self.require_account()?;
        Ok(GameStats::from_history(&account.game_history))
    }

    pub fn accounts(&self) -> Result<Vec<Account>, CasinoError> {
        self.store.accounts()
    }

    /// Registers the demo account when the store is empty.
    pub fn seed_demo_user(&mut self) -> Result<bool, CasinoError> {
        if !self.store.is_empty() {
            return Ok(false);
        }
        self.register(DEMO_EMAIL, DEMO_PASSWORD, DEMO_NAME)?;
        info!(email = DEMO_EMAIL, "demo user created");
        Ok(true)
    }

    /// Drops every account, the session and all pending wagers.
    pub fn clear_all_data(&mut self) {
        self.store.clear();
        self.session.logout();
        self.wagers.clear();
        info!("all data cleared");
    }

    fn require_account(&self) -> Result<Account, CasinoError> {
        let email = self.session.require_email()?;
        load_account(self.store.as_ref(), email)
    }
}
