use super::*;
use crate::*;
use tracing::debug;

/// What a dispatch can see besides the game state: the hand being scored,
/// the cards just discarded, and for self-scoped triggers the joker
/// concerned.
#[derive(Debug, Default)]
pub struct Scope<'a> {
    pub scoring: Option<&'a mut ScoringContext>,
    pub discarded: &'a [Card],
    pub only: Option<usize>,
}

impl<'a> Scope<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn scoring(scoring: &'a mut ScoringContext) -> Self {
        Self {
            scoring: Some(scoring),
            ..Self::default()
        }
    }

    pub fn discarding(discarded: &'a [Card]) -> Self {
        Self {
            discarded,
            ..Self::default()
        }
    }

    pub fn joker(index: usize) -> Self {
        Self {
            only: Some(index),
            ..Self::default()
        }
    }
}

impl GameState {
    /// Runs every matching binding of every active joker once, ordered by
    /// ascending priority with roster order breaking ties. Score-moving
    /// effects are logged when a scoring context is present.
    pub fn dispatch(&mut self, trigger: Trigger, scope: &mut Scope<'_>) -> Result<(), RunError> {
        let skip_first = trigger == Trigger::OnScoreCalculation
            && self.boss_effect == Some(BossEffect::DebuffFirstJoker);
        let mut bindings: Vec<(usize, usize, i32)> = Vec::new();
        for (joker_index, joker) in self.inventory.jokers.iter().enumerate() {
            if skip_first && joker_index == 0 {
                continue;
            }
            if trigger.is_self_scoped() && scope.only != Some(joker_index) {
                continue;
            }
            for (block_index, block) in joker.blocks.iter().enumerate() {
                if block.trigger == trigger {
                    bindings.push((joker_index, block_index, block.priority));
                }
            }
        }
        bindings.sort_by_key(|(_, _, priority)| *priority);

        let phase = if trigger == Trigger::OnScoreCalculation {
            TriggerPhase::EndScoring
        } else {
            TriggerPhase::CardScoring
        };
        for (joker_index, block_index, priority) in bindings {
            let Some(joker) = self.inventory.jokers.get(joker_index) else {
                continue;
            };
            let Some(block) = joker.blocks.get(block_index).cloned() else {
                continue;
            };
            let name = joker.name.clone();
            debug!(joker = %name, ?trigger, priority, "dispatch");
            let before = scope.scoring.as_deref().map(ScoringContext::accumulators);
            self.run_block(joker_index, &block, trigger, scope)?;
            if let (Some(before), Some(scoring)) = (before, scope.scoring.as_deref_mut()) {
                scoring.log_joker(&name, phase, before);
            }
        }
        Ok(())
    }

    fn run_block(
        &mut self,
        owner: usize,
        block: &EffectBlock,
        trigger: Trigger,
        scope: &mut Scope<'_>,
    ) -> Result<(), RunError> {
        for condition in &block.conditions {
            if !self.condition_holds(condition, scope) {
                return Ok(());
            }
        }
        for effect in &block.effects {
            self.apply_effect(owner, effect, trigger, scope)?;
        }
        Ok(())
    }

    fn condition_holds(&mut self, condition: &Condition, scope: &Scope<'_>) -> bool {
        let scoring = scope.scoring.as_deref();
        match condition {
            Condition::CardAttr { attr, value } => scoring
                .and_then(ScoringContext::current)
                .map_or(false, |card| card.has_attr(*attr, *value)),
            Condition::CardEnhanced => scoring
                .and_then(ScoringContext::current)
                .map_or(false, Card::is_enhanced),
            Condition::SetTypeIs(set_type) => {
                let played = scoring
                    .map(|ctx| ctx.set_type)
                    .or_else(|| self.played_set_types.last().copied());
                played == Some(*set_type)
            }
            Condition::SetTypeRepeated(times) => {
                let types = &self.played_set_types;
                types.iter().any(|set_type| {
                    types.iter().filter(|other| *other == set_type).count() >= *times as usize
                })
            }
            Condition::BoardsRemaining(count) => self.boards_remaining == *count,
            Condition::DiscardsRemaining(count) => self.discards_remaining == *count,
            Condition::DiscardsUnused => self.discards_used == 0,
            Condition::MoneyAtMost(limit) => self.money <= *limit,
            Condition::ScoredCardMatches(pairs) => scoring.map_or(false, |ctx| {
                ctx.cards.iter().any(|card| {
                    pairs
                        .iter()
                        .all(|(attr, value)| card.has_attr(*attr, *value))
                })
            }),
            Condition::ScoredCoverAttr(attr) => scoring.map_or(false, |ctx| {
                (0..ATTRIBUTE_VALUES)
                    .all(|value| ctx.cards.iter().any(|card| card.has_attr(*attr, value)))
            }),
            Condition::DiscardedAtLeast { attr, value, count } => {
                scope
                    .discarded
                    .iter()
                    .filter(|card| card.has_attr(*attr, *value))
                    .count()
                    >= *count
            }
            Condition::Chance(probability) => self.rng.chance(*probability),
        }
    }

    fn quantity(&self, quantity: Quantity, scoring: Option<&ScoringContext>) -> i64 {
        match quantity {
            Quantity::UniformFeatures => scoring.map_or(0, |ctx| ctx.uniform_features() as i64),
            Quantity::LadderFeatures => scoring.map_or(0, |ctx| ctx.ladder_features() as i64),
            Quantity::Money => self.money.max(0),
            Quantity::MoneyPer(step) if step > 0 => self.money.max(0) / step,
            Quantity::MoneyPer(_) => 0,
            Quantity::DiscardsUsed => self.discards_used as i64,
            Quantity::DiscardsRemaining => self.discards_remaining as i64,
            Quantity::BoardCardsWithAttr { attr, value } => self
                .board
                .iter()
                .filter(|card| card.has_attr(attr, value))
                .count() as i64,
            Quantity::BoardPairs => (self.board.len() / 2) as i64,
            Quantity::EmptyJokerSlots => self.inventory.empty_joker_slots() as i64,
            Quantity::JokerCount => self.inventory.jokers.len() as i64,
        }
    }

    fn apply_effect(
        &mut self,
        owner: usize,
        effect: &EffectOp,
        trigger: Trigger,
        scope: &mut Scope<'_>,
    ) -> Result<(), RunError> {
        match effect {
            EffectOp::AddChips(amount) => {
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.flat_chips += amount;
                }
            }
            EffectOp::AddMult(amount) => {
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.additive_mult += amount;
                }
            }
            EffectOp::MultiplyMult(factor) => {
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.multiply(*factor);
                }
            }
            EffectOp::AddMoney(amount) => self.money += amount,
            EffectOp::AddChipsPer { per, amount } => {
                let count = self.quantity(*per, scope.scoring.as_deref());
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.flat_chips += amount * count;
                }
            }
            EffectOp::AddMultPer { per, amount } => {
                let count = self.quantity(*per, scope.scoring.as_deref());
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.additive_mult += amount * count as f64;
                }
            }
            EffectOp::MultiplyPer { per, amount } => {
                let count = self.quantity(*per, scope.scoring.as_deref());
                let factor = amount * count as f64;
                // Nothing to count, or a factor of one, leaves the multiplier as is.
                if count > 0 && factor != 1.0 {
                    if let Some(ctx) = scope.scoring.as_deref_mut() {
                        ctx.multiply(factor);
                    }
                }
            }
            EffectOp::AddMoneyPer { per, amount } => {
                let count = self.quantity(*per, scope.scoring.as_deref());
                self.money += amount * count;
            }
            EffectOp::AddRandomMult { min, max } => {
                let roll = self.rng.range_inclusive(*min, *max);
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.additive_mult += roll as f64;
                }
            }
            EffectOp::AddStoredMult => {
                let stored = match self.joker_data(owner)? {
                    JokerData::Accumulated { mult } => *mult,
                    other => return Err(self.data_fault(owner, "accumulated", other)),
                };
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.additive_mult += stored;
                }
            }
            EffectOp::GrowMult(amount) => self.grow_mult(owner, *amount)?,
            EffectOp::GrowMultPer { per, amount } => {
                let count = self.quantity(*per, scope.scoring.as_deref());
                self.grow_mult(owner, amount * count as f64)?;
            }
            EffectOp::AddStoredChips => {
                let stored = match self.joker_data(owner)? {
                    JokerData::Chips { chips } => *chips,
                    other => return Err(self.data_fault(owner, "chips", other)),
                };
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.flat_chips += stored;
                }
            }
            EffectOp::GrowChips(amount) => match self.joker_data_mut(owner)? {
                JokerData::Chips { chips } => *chips += amount,
                other => {
                    let other = other.clone();
                    return Err(self.data_fault(owner, "chips", &other));
                }
            },
            EffectOp::MultiplyStored => {
                let factor = match self.joker_data(owner)? {
                    JokerData::XMult { x_mult } => *x_mult,
                    other => return Err(self.data_fault(owner, "x_mult", other)),
                };
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.multiply(factor);
                }
            }
            EffectOp::DrainEnhancement { gain } => {
                let drained = match scope.scoring.as_deref_mut().and_then(ScoringContext::current_mut) {
                    Some(card) if card.is_enhanced() => {
                        card.enhancement = None;
                        true
                    }
                    _ => false,
                };
                if drained {
                    match self.joker_data_mut(owner)? {
                        JokerData::XMult { x_mult } => *x_mult += gain,
                        other => {
                            let other = other.clone();
                            return Err(self.data_fault(owner, "x_mult", &other));
                        }
                    }
                }
            }
            EffectOp::ChipsToMult { divisor } => {
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    if ctx.flat_chips > 0 && *divisor > 0.0 {
                        ctx.multiply(1.0 + ctx.flat_chips as f64 / divisor);
                        ctx.flat_chips = 0;
                    }
                }
            }
            EffectOp::CopyNextJoker => {
                let target = owner + 1;
                let copied: Vec<EffectBlock> = match self.inventory.jokers.get(target) {
                    Some(next) => next
                        .blocks
                        .iter()
                        .filter(|block| block.trigger == trigger && !block.copies_other())
                        .cloned()
                        .collect(),
                    None => Vec::new(),
                };
                for block in &copied {
                    self.run_block(target, block, trigger, scope)?;
                }
            }
            EffectOp::Gamble { chance, factor } => {
                let hit = self.rng.chance(*chance);
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    if hit {
                        ctx.multiply(*factor);
                    } else {
                        ctx.additive_mult = 1.0 - ctx.base_mult;
                    }
                }
            }
            EffectOp::LevelUpLastSetType => {
                if let Some(set_type) = self.played_set_types.last().copied() {
                    self.level_up(set_type, 1);
                }
            }
            EffectOp::FirstCardChips(amount) => {
                let first = match self.joker_data_mut(owner)? {
                    JokerData::CardsScored { count } => {
                        let first = *count % 3 == 0;
                        *count = (*count + 1) % 3;
                        first
                    }
                    other => {
                        let other = other.clone();
                        return Err(self.data_fault(owner, "cards_scored", &other));
                    }
                };
                if first {
                    if let Some(ctx) = scope.scoring.as_deref_mut() {
                        ctx.flat_chips += amount;
                    }
                }
            }
            EffectOp::Countdown { every, factor } => {
                let fire = match self.joker_data_mut(owner)? {
                    JokerData::Countdown { hands_left } => {
                        if *hands_left == 0 {
                            *hands_left = every.saturating_sub(1);
                            true
                        } else {
                            *hands_left -= 1;
                            false
                        }
                    }
                    other => {
                        let other = other.clone();
                        return Err(self.data_fault(owner, "countdown", &other));
                    }
                };
                if fire {
                    if let Some(ctx) = scope.scoring.as_deref_mut() {
                        ctx.multiply(*factor);
                    }
                }
            }
            EffectOp::CreateTarot(count) => {
                for _ in 0..*count {
                    if self.add_random_tarot().is_none() {
                        break;
                    }
                }
            }
            EffectOp::EnhanceCurrentCard(enhancement) => {
                if let Some(card) = scope
                    .scoring
                    .as_deref_mut()
                    .and_then(ScoringContext::current_mut)
                {
                    card.enhancement = Some(*enhancement);
                }
            }
            EffectOp::AddJokerSlots(delta) => {
                let slots = self.inventory.joker_slots as i64 + delta;
                self.inventory.joker_slots = slots.max(0) as usize;
            }
            EffectOp::AddDiscards(delta) => {
                let per_round = self.discards_per_round as i64 + delta;
                let remaining = self.discards_remaining as i64 + delta;
                self.discards_per_round = per_round.max(0) as u32;
                self.discards_remaining = remaining.max(0) as u32;
            }
            EffectOp::CountUncommon => {
                let others = self
                    .inventory
                    .jokers
                    .iter()
                    .enumerate()
                    .filter(|(index, joker)| *index != owner && joker.rarity == Rarity::Uncommon)
                    .count() as u32;
                match self.joker_data_mut(owner)? {
                    JokerData::UncommonCount { count } => *count = others,
                    other => {
                        let other = other.clone();
                        return Err(self.data_fault(owner, "uncommon_count", &other));
                    }
                }
            }
            EffectOp::MultiplyPerUncommon(per) => {
                let count = match self.joker_data(owner)? {
                    JokerData::UncommonCount { count } => *count,
                    other => return Err(self.data_fault(owner, "uncommon_count", other)),
                };
                if count > 0 {
                    if let Some(ctx) = scope.scoring.as_deref_mut() {
                        ctx.multiply(per.powi(count as i32));
                    }
                }
            }
            EffectOp::DecayingMult { start, step } => {
                let rounds = match self.joker_data(owner)? {
                    JokerData::RoundsPlayed { rounds_played } => *rounds_played,
                    other => return Err(self.data_fault(owner, "rounds_played", other)),
                };
                let amount = (start - step * rounds as f64).max(0.0);
                if let Some(ctx) = scope.scoring.as_deref_mut() {
                    ctx.additive_mult += amount;
                }
            }
            EffectOp::TickRounds => match self.joker_data_mut(owner)? {
                JokerData::RoundsPlayed { rounds_played } => *rounds_played += 1,
                other => {
                    let other = other.clone();
                    return Err(self.data_fault(owner, "rounds_played", &other));
                }
            },
        }
        Ok(())
    }

    fn grow_mult(&mut self, owner: usize, amount: f64) -> Result<(), RunError> {
        match self.joker_data_mut(owner)? {
            JokerData::Accumulated { mult } => {
                *mult += amount;
                Ok(())
            }
            other => {
                let other = other.clone();
                Err(self.data_fault(owner, "accumulated", &other))
            }
        }
    }

    fn joker_data(&self, owner: usize) -> Result<&JokerData, RunError> {
        self.inventory
            .jokers
            .get(owner)
            .map(|joker| &joker.data)
            .ok_or(RunError::InvalidJokerIndex)
    }

    fn joker_data_mut(&mut self, owner: usize) -> Result<&mut JokerData, RunError> {
        self.inventory
            .jokers
            .get_mut(owner)
            .map(|joker| &mut joker.data)
            .ok_or(RunError::InvalidJokerIndex)
    }

    fn data_fault(&self, owner: usize, expected: &str, found: &JokerData) -> RunError {
        let joker = self
            .inventory
            .jokers
            .get(owner)
            .map(|joker| joker.id.clone())
            .unwrap_or_default();
        RunError::AbilityFault {
            joker,
            reason: format!("expected {expected} data, found {found:?}"),
        }
    }
}
