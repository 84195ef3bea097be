use crate::{BlindKind, PackKind, Rarity, SetType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    RunStarted { seed: u64 },
    BlindStarted {
        ante: u8,
        blind: BlindKind,
        target: i64,
        boards: u32,
        discards: u32,
    },
    SetScored {
        set_type: SetType,
        level: u32,
        chips: i64,
        mult: f64,
        total: i64,
    },
    CardsDiscarded { count: usize, discards_left: u32 },
    CardsShattered { count: usize },
    ShopEntered { jokers: usize, packs: usize },
    JokerBought { id: String, price: i64, money: i64 },
    JokerSold {
        id: String,
        sell_value: i64,
        money: i64,
    },
    PackOpened {
        kind: PackKind,
        rarity: Rarity,
        options: usize,
        picks: u8,
    },
    PackChosen { picks: usize },
    ConsumableUsed { id: String },
    JokersReordered,
    BlindCleared { score: i64, reward: i64, money: i64 },
    InterestEarned { amount: i64, money: i64 },
    BlindFailed { score: i64 },
    RunWon { ante: u8 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
