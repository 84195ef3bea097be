use crate::{Card, Catalog, GameConfig, Inventory, PackOpen, RngState, SetType, ShopState, Tarot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    Shop,
    PackOpening,
    GameOver,
    RunWon,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlindKind {
    Small,
    Big,
    Boss,
}

impl BlindKind {
    pub const ORDER: [BlindKind; 3] = [BlindKind::Small, BlindKind::Big, BlindKind::Boss];

    pub fn index(self) -> usize {
        match self {
            BlindKind::Small => 0,
            BlindKind::Big => 1,
            BlindKind::Boss => 2,
        }
    }

    pub fn next(self) -> Option<BlindKind> {
        match self {
            BlindKind::Small => Some(BlindKind::Big),
            BlindKind::Big => Some(BlindKind::Boss),
            BlindKind::Boss => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BossEffect {
    /// The first joker sits out aggregate scoring.
    DebuffFirstJoker,
    /// The board shrinks for the blind.
    ReduceBoardSize,
}

/// Aggregate root of one run.
#[derive(Debug, Clone)]
pub struct GameState {
    pub deck: Vec<Card>,
    pub board: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub ante: u8,
    pub blind: BlindKind,
    pub money: i64,
    pub round_score: i64,
    pub boards_per_round: u32,
    pub boards_remaining: u32,
    pub discards_per_round: u32,
    pub discards_remaining: u32,
    pub discards_used: u32,
    pub base_board_size: usize,
    pub board_size: usize,
    pub played_set_types: Vec<SetType>,
    pub set_levels: BTreeMap<SetType, u32>,
    pub inventory: Inventory,
    pub last_consumable: Option<Tarot>,
    pub shop: ShopState,
    pub pack: Option<PackOpen>,
    pub boss_effect: Option<BossEffect>,
    pub phase: Phase,
    pub rng: RngState,
    pub catalog: Arc<Catalog>,
    pub config: Arc<GameConfig>,
}

impl GameState {
    pub fn set_level(&self, set_type: SetType) -> u32 {
        self.set_levels.get(&set_type).copied().unwrap_or(1)
    }

    pub fn target(&self) -> i64 {
        self.config.target_for(self.ante, self.blind).unwrap_or(0)
    }

    pub fn blind_name(&self) -> String {
        self.config
            .blind_name(self.ante, self.blind)
            .unwrap_or_else(|| "Boss Blind".to_string())
    }

    pub fn card_count(&self) -> usize {
        self.deck.len() + self.board.len() + self.discard_pile.len()
    }
}
