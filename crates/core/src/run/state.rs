use super::*;
use crate::*;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::info;

impl GameState {
    /// Starts a fresh run: full shuffled deck, starting money and levels,
    /// first small blind dealt.
    pub fn new_run(
        catalog: Arc<Catalog>,
        config: Arc<GameConfig>,
        seed: u64,
        events: &mut EventBus,
    ) -> Result<Self, RunError> {
        let mut rng = RngState::from_seed(seed);
        let mut deck = full_deck();
        rng.shuffle(&mut deck);
        let set_levels: BTreeMap<SetType, u32> = SetType::ALL
            .iter()
            .map(|set_type| (*set_type, config.round.starting_level))
            .collect();
        let mut state = Self {
            deck,
            board: Vec::new(),
            discard_pile: Vec::new(),
            ante: 1,
            blind: BlindKind::Small,
            money: config.economy.starting_money,
            round_score: 0,
            boards_per_round: config.round.boards_per_round,
            boards_remaining: config.round.boards_per_round,
            discards_per_round: config.round.discards_per_round,
            discards_remaining: config.round.discards_per_round,
            discards_used: 0,
            base_board_size: config.round.board_size,
            board_size: config.round.board_size,
            played_set_types: Vec::new(),
            set_levels,
            inventory: Inventory::with_slots(
                config.inventory.joker_slots,
                config.inventory.consumable_slots,
            ),
            last_consumable: None,
            shop: ShopState::default(),
            pack: None,
            boss_effect: None,
            phase: Phase::Playing,
            rng,
            catalog,
            config,
        };
        info!(seed, "run started");
        events.push(Event::RunStarted { seed });
        state.start_blind(events)?;
        Ok(state)
    }

    pub(crate) fn require_phase(&self, phase: Phase) -> Result<(), RunError> {
        if self.phase != phase {
            return Err(RunError::InvalidPhase(self.phase));
        }
        Ok(())
    }

    /// Tops the board up to its size, folding the discard pile back into the
    /// deck when the deck cannot cover the gap.
    pub(crate) fn replenish_board(&mut self) {
        let needed = self.board_size.saturating_sub(self.board.len());
        if needed == 0 {
            return;
        }
        if self.deck.len() < needed && !self.discard_pile.is_empty() {
            self.deck.append(&mut self.discard_pile);
            self.rng.shuffle(&mut self.deck);
        }
        for _ in 0..needed {
            match self.deck.pop() {
                Some(card) => self.board.push(card),
                None => break,
            }
        }
    }

    pub(crate) fn owned_joker_ids(&self) -> HashSet<String> {
        self.inventory
            .jokers
            .iter()
            .map(|joker| joker.id.clone())
            .collect()
    }

    pub fn level_up(&mut self, set_type: SetType, amount: u32) {
        let level = self.set_level(set_type);
        self.set_levels.insert(set_type, level.saturating_add(amount));
    }

    /// Adds a random tarot if there is room. Returns the new tarot's id.
    pub(crate) fn add_random_tarot(&mut self) -> Option<String> {
        if !self.inventory.has_consumable_room() {
            return None;
        }
        let catalog = Arc::clone(&self.catalog);
        let templates = catalog.tarots();
        if templates.is_empty() {
            return None;
        }
        let template = &templates[self.rng.below(templates.len())];
        let id = template.id.clone();
        self.inventory.add_consumable(template.instantiate()).ok()?;
        Some(id)
    }

    /// Display text for a joker's badge, if it has one.
    pub fn badge_text(&self, joker: &Joker) -> Option<String> {
        let text = match (joker.badge?, &joker.data) {
            (Badge::ChipsPerDiscardLeft(per), _) => {
                format!("+{} C", per * self.discards_remaining as i64)
            }
            (Badge::EmptySlots, _) => format!("x{} M", self.inventory.empty_joker_slots()),
            (Badge::MultPerJoker(per), _) => format!(
                "+{} M",
                format_number(per * self.inventory.jokers.len() as f64)
            ),
            (Badge::Countdown, JokerData::Countdown { hands_left }) => {
                format!("{hands_left} remaining")
            }
            (Badge::StoredXMult, JokerData::XMult { x_mult }) => format!("{x_mult:.1}x M"),
            (Badge::UncommonFactor(per), JokerData::UncommonCount { count }) => {
                format!("x{:.2} M", per.powi(*count as i32))
            }
            (Badge::ChipsPerMoney(per), _) => format!("+{} C", per * self.money.max(0)),
            (Badge::DecayingMult { start, step }, JokerData::RoundsPlayed { rounds_played }) => {
                format!(
                    "+{} M",
                    format_number((start - step * *rounds_played as f64).max(0.0))
                )
            }
            (Badge::StoredChips, JokerData::Chips { chips }) => format!("+{chips} C"),
            (Badge::StoredMult, JokerData::Accumulated { mult }) => {
                format!("+{} M", format_number(*mult))
            }
            _ => return None,
        };
        Some(text)
    }

    /// Per-session summary row for save listings.
    pub fn summary(&self, id: &str) -> SaveSummary {
        SaveSummary {
            id: id.to_string(),
            ante: self.ante,
            current_blind: self.blind_name(),
            blind_score_required: self.target(),
            round_score: self.round_score,
            game_phase: self.phase,
            money: self.money,
        }
    }
}
