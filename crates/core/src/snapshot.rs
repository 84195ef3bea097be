use crate::{
    BlindKind, BossEffect, Card, Catalog, GameConfig, GameState, Inventory, Joker, JokerData,
    JokerOffer, PackOffer, PackOpen, Phase, Rarity, RngState, SetType, ShopState, Tarot, Variant,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

pub const SAVE_SCHEMA_VERSION: u32 = 1;

/// A joker as stored: identity, display fields and instance data. Its
/// bindings come back from the catalogue on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JokerRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub variant: Variant,
    pub price: i64,
    #[serde(default)]
    pub custom_data: JokerData,
    #[serde(default)]
    pub display_badge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TarotRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tooltip: Option<String>,
    pub rarity: Rarity,
    pub target_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JokerOfferRecord {
    pub joker: JokerRecord,
    pub purchased: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopSnapshot {
    pub jokers: Vec<JokerOfferRecord>,
    pub packs: Vec<PackOffer>,
}

/// Everything needed to resume a run, without behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub version: u32,
    pub deck: Vec<Card>,
    pub board: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub ante: u8,
    pub blind: BlindKind,
    #[serde(default)]
    pub current_blind: String,
    #[serde(default)]
    pub blind_score_required: i64,
    pub money: i64,
    pub round_score: i64,
    pub boards_per_round: u32,
    pub boards_remaining: u32,
    pub discards_per_round: u32,
    pub discards_remaining: u32,
    #[serde(default)]
    pub discards_used: u32,
    pub base_board_size: usize,
    pub board_size: usize,
    pub played_set_types: Vec<SetType>,
    pub set_levels: BTreeMap<SetType, u32>,
    pub jokers: Vec<JokerRecord>,
    pub joker_slots: usize,
    pub consumables: Vec<TarotRecord>,
    pub consumable_slots: usize,
    #[serde(default)]
    pub last_consumable: Option<TarotRecord>,
    #[serde(default)]
    pub shop: ShopSnapshot,
    #[serde(default)]
    pub pack: Option<PackOpen>,
    #[serde(default)]
    pub boss_effect: Option<BossEffect>,
    pub phase: Phase,
    pub rng: RngState,
}

/// One row of a save listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveSummary {
    pub id: String,
    pub ante: u8,
    pub current_blind: String,
    pub blind_score_required: i64,
    pub round_score: i64,
    pub game_phase: Phase,
    pub money: i64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// A rehydrated run plus the ids that no longer exist in the catalogue.
#[derive(Debug)]
pub struct Restored {
    pub state: GameState,
    pub dropped: Vec<String>,
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SAVE_SCHEMA_VERSION,
            deck: self.deck.clone(),
            board: self.board.clone(),
            discard_pile: self.discard_pile.clone(),
            ante: self.ante,
            blind: self.blind,
            current_blind: self.blind_name(),
            blind_score_required: self.target(),
            money: self.money,
            round_score: self.round_score,
            boards_per_round: self.boards_per_round,
            boards_remaining: self.boards_remaining,
            discards_per_round: self.discards_per_round,
            discards_remaining: self.discards_remaining,
            discards_used: self.discards_used,
            base_board_size: self.base_board_size,
            board_size: self.board_size,
            played_set_types: self.played_set_types.clone(),
            set_levels: self.set_levels.clone(),
            jokers: self
                .inventory
                .jokers
                .iter()
                .map(|joker| self.joker_record(joker))
                .collect(),
            joker_slots: self.inventory.joker_slots,
            consumables: self.inventory.consumables.iter().map(tarot_record).collect(),
            consumable_slots: self.inventory.consumable_slots,
            last_consumable: self.last_consumable.as_ref().map(tarot_record),
            shop: ShopSnapshot {
                jokers: self
                    .shop
                    .jokers
                    .iter()
                    .map(|offer| JokerOfferRecord {
                        joker: self.joker_record(&offer.joker),
                        purchased: offer.purchased,
                    })
                    .collect(),
                packs: self.shop.packs.clone(),
            },
            pack: self.pack.clone(),
            boss_effect: self.boss_effect,
            phase: self.phase,
            rng: self.rng.clone(),
        }
    }

    fn joker_record(&self, joker: &Joker) -> JokerRecord {
        JokerRecord {
            id: joker.id.clone(),
            name: joker.name.clone(),
            description: joker.description.clone(),
            rarity: joker.rarity,
            variant: joker.variant,
            price: joker.price,
            custom_data: joker.data.clone(),
            display_badge: self.badge_text(joker),
        }
    }

    /// Rebuilds a run from a snapshot, re-attaching joker and tarot behavior
    /// by catalogue id. Records whose id is unknown are dropped and listed.
    pub fn restore(
        snapshot: GameSnapshot,
        catalog: Arc<Catalog>,
        config: Arc<GameConfig>,
    ) -> Result<Restored, SnapshotError> {
        if snapshot.version != SAVE_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SAVE_SCHEMA_VERSION,
            });
        }
        let mut dropped = Vec::new();
        let mut joker_slots = snapshot.joker_slots;
        let mut jokers = Vec::new();
        for record in &snapshot.jokers {
            match rebind_joker(&catalog, record) {
                Some(joker) => jokers.push(joker),
                None => {
                    // The slot a dropped Negative joker brought leaves with it.
                    if record.variant.grants_joker_slot() {
                        joker_slots = joker_slots.saturating_sub(1);
                    }
                    dropped.push(record.id.clone());
                }
            }
        }
        let mut inventory = Inventory::with_slots(joker_slots, snapshot.consumable_slots);
        inventory.jokers = jokers;
        for record in &snapshot.consumables {
            match rebind_tarot(&catalog, record) {
                Some(tarot) => inventory.consumables.push(tarot),
                None => dropped.push(record.id.clone()),
            }
        }
        let last_consumable = match &snapshot.last_consumable {
            Some(record) => {
                let tarot = rebind_tarot(&catalog, record);
                if tarot.is_none() {
                    dropped.push(record.id.clone());
                }
                tarot
            }
            None => None,
        };
        let mut shop = ShopState {
            jokers: Vec::new(),
            packs: snapshot.shop.packs,
        };
        for offer in &snapshot.shop.jokers {
            match rebind_joker(&catalog, &offer.joker) {
                Some(joker) => shop.jokers.push(JokerOffer {
                    joker,
                    purchased: offer.purchased,
                }),
                None => dropped.push(offer.joker.id.clone()),
            }
        }
        if !dropped.is_empty() {
            warn!(?dropped, "unknown ids dropped while restoring a run");
        }

        let state = GameState {
            deck: snapshot.deck,
            board: snapshot.board,
            discard_pile: snapshot.discard_pile,
            ante: snapshot.ante,
            blind: snapshot.blind,
            money: snapshot.money,
            round_score: snapshot.round_score,
            boards_per_round: snapshot.boards_per_round,
            boards_remaining: snapshot.boards_remaining,
            discards_per_round: snapshot.discards_per_round,
            discards_remaining: snapshot.discards_remaining,
            discards_used: snapshot.discards_used,
            base_board_size: snapshot.base_board_size,
            board_size: snapshot.board_size,
            played_set_types: snapshot.played_set_types,
            set_levels: snapshot.set_levels,
            inventory,
            last_consumable,
            shop,
            pack: snapshot.pack,
            boss_effect: snapshot.boss_effect,
            phase: snapshot.phase,
            rng: snapshot.rng,
            catalog,
            config,
        };
        Ok(Restored { state, dropped })
    }
}

fn tarot_record(tarot: &Tarot) -> TarotRecord {
    TarotRecord {
        id: tarot.id.clone(),
        name: tarot.name.clone(),
        description: tarot.description.clone(),
        tooltip: tarot.tooltip.clone(),
        rarity: tarot.rarity,
        target_count: tarot.target_count,
    }
}

/// Template bindings plus the variant bonus, then the stored instance data
/// when it still has the shape the template expects.
fn rebind_joker(catalog: &Catalog, record: &JokerRecord) -> Option<Joker> {
    let template = catalog.joker(&record.id)?;
    let mut joker = template.instantiate(record.variant, record.price);
    if record.custom_data.same_kind(&joker.data) {
        joker.data = record.custom_data.clone();
    }
    Some(joker)
}

fn rebind_tarot(catalog: &Catalog, record: &TarotRecord) -> Option<Tarot> {
    catalog.tarot(&record.id).map(|template| template.instantiate())
}
