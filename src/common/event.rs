use crate::common::money::Money;

/// One step of a session script, sent from the reader to the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Register {
        email: String,
        password: String,
        name: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    Deposit {
        amount: Money,
    },
    Withdraw {
        amount: Money,
        address: String,
    },
    /// `amount` falls back to the game's minimum bet.
    Play {
        game: u32,
        amount: Option<Money>,
    },
}
