use crate::{
    common::money::Money,
    games::outcome::{OutcomeModel, WIN_PROBABILITY},
};

/// A game offered in the lobby.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameDef {
    pub id: u32,
    pub name: &'static str,
    pub min_bet: Money,
    pub model: OutcomeModel,
}

const fn threshold(max_multiplier: f64) -> OutcomeModel {
    OutcomeModel::Threshold {
        max_multiplier,
        win_probability: WIN_PROBABILITY,
    }
}

pub static GAMES: [GameDef; 7] = [
    GameDef {
        id: 1,
        name: "Slot Machine",
        min_bet: Money::new(100_000),
        model: threshold(5.0),
    },
    GameDef {
        id: 2,
        name: "Dice Roll",
        min_bet: Money::new(100_000),
        model: threshold(3.0),
    },
    GameDef {
        id: 3,
        name: "Blackjack",
        min_bet: Money::new(500_000),
        model: threshold(2.5),
    },
    GameDef {
        id: 4,
        name: "Roulette",
        min_bet: Money::new(200_000),
        model: threshold(35.0),
    },
    GameDef {
        id: 5,
        name: "Wheel of Fortune",
        min_bet: Money::new(300_000),
        model: threshold(10.0),
    },
    GameDef {
        id: 6,
        name: "Crash",
        min_bet: Money::new(100_000),
        model: threshold(100.0),
    },
    GameDef {
        id: 7,
        name: "Classic Slots",
        min_bet: Money::new(100_000),
        model: OutcomeModel::Slots,
    },
];

pub fn find(id: u32) -> Option<&'static GameDef> {
    GAMES.iter().find(|g| g.id == id)
}
