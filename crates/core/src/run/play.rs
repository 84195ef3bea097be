use super::*;
use crate::*;
use std::sync::Arc;
use tracing::info;

impl GameState {
    pub fn play_set(
        &mut self,
        indices: &[usize],
        events: &mut EventBus,
    ) -> Result<PlayOutcome, RunError> {
        self.require_phase(Phase::Playing)?;
        if indices.len() != 3 {
            return Err(RunError::InvalidCardCount);
        }
        validate_selection(indices, self.board.len())?;
        if self.boards_remaining == 0 {
            return Err(RunError::NoBoardsLeft);
        }
        let cards: Vec<Card> = indices.iter().map(|index| self.board[*index]).collect();
        if !is_valid_set(&cards) {
            return Err(RunError::NotASet);
        }
        let set_type = classify(&cards);
        self.played_set_types.push(set_type);

        let scoring = self.score_set(cards, set_type)?;
        let score = scoring.score();
        let gained = score.total();
        self.round_score += gained;

        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        for index in sorted {
            self.board.remove(index);
        }
        let shattered = self.shatter_glass(&scoring.cards);
        self.replenish_board();
        self.boards_remaining -= 1;

        events.push(Event::SetScored {
            set_type,
            level: scoring.level,
            chips: score.chips,
            mult: score.mult,
            total: gained,
        });
        if shattered > 0 {
            events.push(Event::CardsShattered { count: shattered });
        }
        let blind = self.settle_blind(events);
        Ok(PlayOutcome {
            set_type,
            score_gained: gained,
            chips: score.chips,
            mult: score.mult,
            score_log: scoring.log,
            blind,
        })
    }

    /// Runs the scoring pipeline for a validated set: base score, per-card
    /// phase, then aggregate phase.
    pub fn score_set(
        &mut self,
        cards: Vec<Card>,
        set_type: SetType,
    ) -> Result<ScoringContext, RunError> {
        let level = self.set_level(set_type);
        let config = Arc::clone(&self.config);
        let rule = &config.scoring;
        let mut scoring = ScoringContext::new(cards, set_type, level, rule);
        scoring.log_base();

        for index in 0..scoring.cards.len() {
            scoring.current_card = Some(index);
            self.apply_card_enhancement(&mut scoring, index, rule);
            self.dispatch(Trigger::OnScoreCard, &mut Scope::scoring(&mut scoring))?;
            apply_late_enhancement(&mut scoring, index, rule);
        }
        scoring.current_card = None;
        self.dispatch(Trigger::OnScoreCalculation, &mut Scope::scoring(&mut scoring))?;
        Ok(scoring)
    }

    fn apply_card_enhancement(&mut self, scoring: &mut ScoringContext, index: usize, rule: &ScoringRule) {
        let Some(enhancement) = scoring.cards.get(index).and_then(|card| card.enhancement) else {
            return;
        };
        let before = scoring.accumulators();
        match enhancement {
            Enhancement::BonusChips => {
                scoring.flat_chips += rule.bonus_chips;
                scoring.log_card("Bonus Chips", format_chips(rule.bonus_chips), before);
            }
            Enhancement::BonusMult => {
                scoring.additive_mult += rule.bonus_mult;
                scoring.log_card("Bonus Mult", format_mult(rule.bonus_mult), before);
            }
            Enhancement::Gold => {
                self.money += rule.gold_money;
                scoring.log_card("Gold Card", format!("+${}", rule.gold_money), before);
            }
            Enhancement::Wildcard => {
                scoring.log_card("Wildcard", "Wildcard (no score)".to_string(), before);
            }
            Enhancement::Lucky => {
                let odds = &rule.chance_cards;
                if self.rng.chance(odds.lucky_mult_chance) {
                    scoring.additive_mult += odds.lucky_mult;
                    scoring.log_card("Lucky Card", format_mult(odds.lucky_mult), before);
                }
                if self.rng.chance(odds.lucky_money_chance) {
                    self.money += odds.lucky_money;
                    let before = scoring.accumulators();
                    scoring.log_card("Lucky Card", format!("+${}", odds.lucky_money), before);
                }
            }
            Enhancement::XMult | Enhancement::Amplify | Enhancement::Glass => {}
        }
    }

    pub fn discard(&mut self, indices: &[usize], events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Playing)?;
        if indices.is_empty() || indices.len() > self.config.round.max_discard {
            return Err(RunError::InvalidCardCount);
        }
        validate_selection(indices, self.board.len())?;
        if self.discards_remaining == 0 {
            return Err(RunError::NoDiscardsLeft);
        }
        let discarded: Vec<Card> = indices.iter().map(|index| self.board[*index]).collect();
        let mut sorted = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        for index in sorted {
            self.board.remove(index);
        }
        self.discard_pile.extend(discarded.iter().copied());
        self.dispatch(Trigger::OnDiscard, &mut Scope::discarding(&discarded))?;
        self.replenish_board();
        self.discards_remaining -= 1;
        self.discards_used += 1;
        events.push(Event::CardsDiscarded {
            count: discarded.len(),
            discards_left: self.discards_remaining,
        });
        Ok(())
    }

    /// Sends played cards to the discard pile, except Glass cards that
    /// break. Returns how many broke.
    fn shatter_glass(&mut self, played: &[Card]) -> usize {
        let odds = self.config.scoring.chance_cards.glass_break_chance;
        let mut shattered = 0;
        for card in played {
            if card.enhancement == Some(Enhancement::Glass) && self.rng.chance(odds) {
                shattered += 1;
                continue;
            }
            self.discard_pile.push(*card);
        }
        if shattered > 0 {
            info!(shattered, "glass cards broke");
        }
        shattered
    }

    /// Moves to the shop when the target is met, or ends the run when the
    /// boards ran out below it.
    fn settle_blind(&mut self, events: &mut EventBus) -> BlindOutcome {
        let target = self.target();
        if self.round_score >= target {
            let reward = self.config.economy.clear_reward
                + self.config.economy.per_board_reward * self.boards_remaining as i64;
            self.money += reward;
            info!(ante = self.ante, blind = ?self.blind, score = self.round_score, "blind cleared");
            events.push(Event::BlindCleared {
                score: self.round_score,
                reward,
                money: self.money,
            });
            self.enter_shop(events);
            BlindOutcome::Cleared
        } else if self.boards_remaining == 0 {
            self.phase = Phase::GameOver;
            info!(ante = self.ante, score = self.round_score, target, "blind failed");
            events.push(Event::BlindFailed {
                score: self.round_score,
            });
            BlindOutcome::Failed
        } else {
            BlindOutcome::Continue
        }
    }
}

/// Enhancements applied after the card's own dispatch. The card is read
/// again since an ability may have changed it.
fn apply_late_enhancement(scoring: &mut ScoringContext, index: usize, rule: &ScoringRule) {
    let Some(enhancement) = scoring.cards.get(index).and_then(|card| card.enhancement) else {
        return;
    };
    let before = scoring.accumulators();
    match enhancement {
        Enhancement::XMult => {
            scoring.multiply(rule.x_mult);
            scoring.log_card("X-Mult Card", format_ratio(rule.x_mult), before);
        }
        Enhancement::Amplify => {
            scoring.flat_chips = (scoring.flat_chips as f64 * rule.amplify).round() as i64;
            scoring.additive_mult *= rule.amplify;
            scoring.log_card("Amplified Card", "Doubled Chips and Mult".to_string(), before);
        }
        Enhancement::Glass => {
            let factor = rule.chance_cards.glass_mult;
            scoring.multiply(factor);
            scoring.log_card("Glass Card", format_ratio(factor), before);
        }
        _ => {}
    }
}
