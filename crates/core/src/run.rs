use crate::{InventoryError, Phase, ScoreLogEntry, SetType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod blind;
mod consumable;
mod dispatch;
mod play;
mod shop;
mod state;

pub use dispatch::Scope;

#[derive(Debug, Error, PartialEq)]
pub enum RunError {
    #[error("missing config for ante {0}")]
    MissingAnteRule(u8),
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("no boards left")]
    NoBoardsLeft,
    #[error("no discards left")]
    NoDiscardsLeft,
    #[error("invalid card selection")]
    InvalidSelection,
    #[error("invalid card count")]
    InvalidCardCount,
    #[error("selected cards do not form a set")]
    NotASet,
    #[error("not enough money")]
    NotEnoughMoney,
    #[error("invalid shop offer index")]
    InvalidOfferIndex,
    #[error("offer already purchased")]
    OfferSoldOut,
    #[error("invalid joker index")]
    InvalidJokerIndex,
    #[error("invalid consumable index")]
    InvalidConsumableIndex,
    #[error("consumable cannot be used: {0}")]
    ConsumableUnusable(String),
    #[error("pack not available")]
    PackNotAvailable,
    #[error("invalid pack choice: {0}")]
    InvalidPackChoice(String),
    #[error("too many pack picks")]
    TooManyPicks,
    #[error("invalid joker order")]
    InvalidOrder,
    #[error("ability of {joker} failed: {reason}")]
    AbilityFault { joker: String, reason: String },
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlindOutcome {
    Cleared,
    Failed,
    Continue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayOutcome {
    pub set_type: SetType,
    pub score_gained: i64,
    pub chips: i64,
    pub mult: f64,
    pub score_log: Vec<ScoreLogEntry>,
    pub blind: BlindOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UseOutcome {
    pub id: String,
    pub message: String,
}

/// Checks a board selection: every index in range and no index repeated.
pub(crate) fn validate_selection(indices: &[usize], len: usize) -> Result<(), RunError> {
    for (position, index) in indices.iter().enumerate() {
        if *index >= len || indices[..position].contains(index) {
            return Err(RunError::InvalidSelection);
        }
    }
    Ok(())
}
