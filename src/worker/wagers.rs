//! Per-account wager lifecycle: `Idle -> BetPlaced -> Idle`.
//!
//! An account with a pending wager cannot place another one until that wager
//! is resolved.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::{
    common::{error::CasinoError, money::Money},
    domain::account::normalize_email,
    games::{catalog::GameDef, outcome::Outcome},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WagerHandle {
    pub id: u64,
    /// Owner of the wager, independent of the current session.
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WagerState {
    Idle,
    BetPlaced,
}

#[derive(Debug, Clone)]
pub struct PendingWager {
    pub handle: WagerHandle,
    pub game: &'static GameDef,
    pub amount: Money,
    /// Earliest moment the wager may resolve.
    pub ready_at: Instant,
    /// Drawn result awaiting settlement; kept across a failed settle so a
    /// retry commits the same outcome.
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Default)]
pub struct WagerBook {
    next_id: u64,
    pending: HashMap<String, PendingWager>,
}

impl WagerBook {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: HashMap::new(),
        }
    }

    pub fn state(&self, email: &str) -> WagerState {
        if self.pending.contains_key(&normalize_email(email)) {
            WagerState::BetPlaced
        } else {
            WagerState::Idle
        }
    }

    pub fn ensure_idle(&self, email: &str) -> Result<(), CasinoError> {
        match self.state(email) {
            WagerState::Idle => Ok(()),
            WagerState::BetPlaced => Err(CasinoError::WagerInProgress),
        }
    }

    /// Moves the account to `BetPlaced`. The bet must already be debited.
    pub fn open(
        &mut self,
        email: &str,
        game: &'static GameDef,
        amount: Money,
        delay: Duration,
    ) -> Result<WagerHandle, CasinoError> {
        self.ensure_idle(email)?;

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let handle = WagerHandle {
            id,
            email: normalize_email(email),
        };
        self.pending.insert(
            handle.email.clone(),
            PendingWager {
                handle: handle.clone(),
                game,
                amount,
                ready_at: Instant::now() + delay,
                outcome: None,
            },
        );
        Ok(handle)
    }

    /// Removes the pending wager for `handle`, returning the account to `Idle`.
    pub fn take(&mut self, handle: &WagerHandle) -> Result<PendingWager, CasinoError> {
        match self.pending.get(&handle.email) {
            Some(p) if p.handle.id == handle.id => {}
            _ => return Err(CasinoError::UnknownWager(handle.id)),
        }
        self.pending
            .remove(&handle.email)
            .ok_or(CasinoError::UnknownWager(handle.id))
    }

    /// Puts back a wager whose settlement failed.
    pub fn restore(&mut self, wager: PendingWager) {
        self.pending.insert(wager.handle.email.clone(), wager);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::catalog;

    fn dice() -> &'static GameDef {
        catalog::find(2).unwrap()
    }

    #[test]
    fn second_wager_is_rejected_until_resolved() {
        let mut book = WagerBook::new();
        let handle = book
            .open("p@c.io", dice(), Money::new(100_000), Duration::ZERO)
            .unwrap();
        assert_eq!(book.state("P@c.io"), WagerState::BetPlaced);

        let err = book
            .open("p@c.io", dice(), Money::new(100_000), Duration::ZERO)
            .unwrap_err();
        assert_eq!(err, CasinoError::WagerInProgress);

        let pending = book.take(&handle).unwrap();
        assert_eq!(pending.amount, Money::new(100_000));
        assert_eq!(book.state("p@c.io"), WagerState::Idle);
        assert!(book.open("p@c.io", dice(), Money::new(1), Duration::ZERO).is_ok());
    }

    #[test]
    fn accounts_are_independent() {
        let mut book = WagerBook::new();
        let a = book.open("a@c.io", dice(), Money::new(1), Duration::ZERO).unwrap();
        let b = book.open("b@c.io", dice(), Money::new(1), Duration::ZERO).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(book.pending_count(), 2);
    }

    #[test]
    fn stale_or_unknown_handles_are_rejected() {
        let mut book = WagerBook::new();
        let first = book.open("p@c.io", dice(), Money::new(1), Duration::ZERO).unwrap();
        book.take(&first).unwrap();
        let second = book.open("p@c.io", dice(), Money::new(1), Duration::ZERO).unwrap();

        assert_eq!(book.take(&first).unwrap_err(), CasinoError::UnknownWager(first.id));
        assert_eq!(book.state("p@c.io"), WagerState::BetPlaced);
        assert!(book.take(&second).is_ok());
    }

    #[test]
    fn restore_returns_to_bet_placed() {
        let mut book = WagerBook::new();
        let handle = book.open("p@c.io", dice(), Money::new(1), Duration::ZERO).unwrap();
        let mut pending = book.take(&handle).unwrap();
        assert_eq!(pending.outcome, None);
        pending.outcome = Some(Outcome::win(Money::new(2), 2.0));
        book.restore(pending);
        assert_eq!(book.state("p@c.io"), WagerState::BetPlaced);

        let again = book.take(&handle).unwrap();
        assert_eq!(again.outcome, Some(Outcome::win(Money::new(2), 2.0)));
        book.restore(again);
        book.clear();
        assert_eq!(book.pending_count(), 0);
    }
}
