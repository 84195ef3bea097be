use crate::{priority, Badge, EffectBlock, EffectOp, JokerData, TarotOp, Trigger};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Variant {
    Basic,
    Foil,
    Holographic,
    Polychrome,
    Negative,
}

impl Variant {
    /// Whether the variant brings the extra slot it occupies.
    pub fn grants_joker_slot(self) -> bool {
        matches!(self, Variant::Negative)
    }

    /// Bindings a variant adds on top of the joker's own.
    pub fn bonus_blocks(self) -> Vec<EffectBlock> {
        match self {
            Variant::Basic => Vec::new(),
            Variant::Foil => vec![EffectBlock::new(
                Trigger::OnScoreCalculation,
                EffectOp::AddChips(50),
            )],
            Variant::Holographic => vec![EffectBlock::new(
                Trigger::OnScoreCalculation,
                EffectOp::AddMult(10.0),
            )],
            Variant::Polychrome => vec![EffectBlock::new(
                Trigger::OnScoreCalculation,
                EffectOp::MultiplyMult(1.5),
            )
            .priority(priority::MULTIPLICATIVE)],
            Variant::Negative => vec![
                EffectBlock::new(Trigger::OnBuySelf, EffectOp::AddJokerSlots(1)),
                EffectBlock::new(Trigger::OnDestroySelf, EffectOp::AddJokerSlots(-1)),
            ],
        }
    }
}

/// An owned (or offered) joker. `blocks` is behavior and never persisted;
/// it is rebuilt from the catalogue on load.
#[derive(Debug, Clone)]
pub struct Joker {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub variant: Variant,
    pub price: i64,
    pub blocks: Vec<EffectBlock>,
    pub data: JokerData,
    pub badge: Option<Badge>,
}

impl Joker {
    pub fn sell_value(&self) -> i64 {
        self.price / 2
    }
}

#[derive(Debug, Clone)]
pub struct Tarot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tooltip: Option<String>,
    pub rarity: Rarity,
    pub target_count: usize,
    pub effects: Vec<TarotOp>,
}

#[derive(Debug, Clone)]
pub struct Inventory {
    pub joker_slots: usize,
    pub consumable_slots: usize,
    pub jokers: Vec<Joker>,
    pub consumables: Vec<Tarot>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("no joker slots")]
    NoJokerSlots,
    #[error("no consumable slots")]
    NoConsumableSlots,
}

impl Inventory {
    pub fn with_slots(joker_slots: usize, consumable_slots: usize) -> Self {
        Self {
            joker_slots,
            consumable_slots,
            jokers: Vec::new(),
            consumables: Vec::new(),
        }
    }

    pub fn empty_joker_slots(&self) -> usize {
        self.joker_slots.saturating_sub(self.jokers.len())
    }

    pub fn has_joker_room(&self) -> bool {
        self.jokers.len() < self.joker_slots
    }

    pub fn has_consumable_room(&self) -> bool {
        self.consumables.len() < self.consumable_slots
    }

    pub fn add_joker(&mut self, joker: Joker) -> Result<usize, InventoryError> {
        if !self.has_joker_room() && !joker.variant.grants_joker_slot() {
            return Err(InventoryError::NoJokerSlots);
        }
        self.jokers.push(joker);
        Ok(self.jokers.len() - 1)
    }

    pub fn add_consumable(&mut self, tarot: Tarot) -> Result<(), InventoryError> {
        if !self.has_consumable_room() {
            return Err(InventoryError::NoConsumableSlots);
        }
        self.consumables.push(tarot);
        Ok(())
    }

    pub fn count_rarity(&self, rarity: Rarity) -> usize {
        self.jokers
            .iter()
            .filter(|joker| joker.rarity == rarity)
            .count()
    }

    pub fn owns(&self, id: &str) -> bool {
        self.jokers.iter().any(|joker| joker.id == id)
    }
}
