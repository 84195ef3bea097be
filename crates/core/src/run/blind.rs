use super::*;
use crate::*;
use tracing::info;

impl GameState {
    /// Deals a fresh board for the current ante and blind: counters reset,
    /// every card reshuffled into the deck, boss effect applied.
    pub fn start_blind(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        let target = self
            .config
            .target_for(self.ante, self.blind)
            .ok_or(RunError::MissingAnteRule(self.ante))?;

        self.round_score = 0;
        self.boards_remaining = self.boards_per_round;
        self.discards_remaining = self.discards_per_round;
        self.discards_used = 0;
        self.played_set_types.clear();
        self.board_size = self.base_board_size;

        self.deck.append(&mut self.board);
        self.deck.append(&mut self.discard_pile);
        self.rng.shuffle(&mut self.deck);
        self.replenish_board();

        self.boss_effect = self.config.boss_effect_for(self.ante, self.blind);
        if self.boss_effect == Some(BossEffect::ReduceBoardSize) {
            self.shrink_board(self.config.round.reduced_board_size);
        }
        self.phase = Phase::Playing;
        self.dispatch(Trigger::OnStartRound, &mut Scope::none())?;

        info!(
            ante = self.ante,
            blind = ?self.blind,
            target,
            boss = ?self.boss_effect,
            "blind started"
        );
        events.push(Event::BlindStarted {
            ante: self.ante,
            blind: self.blind,
            target,
            boards: self.boards_remaining,
            discards: self.discards_remaining,
        });
        Ok(())
    }

    /// Closes the shop: end-of-round abilities, interest, then the next
    /// blind or the end of the run.
    pub fn leave_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Shop)?;
        self.dispatch(Trigger::OnEndOfRound, &mut Scope::none())?;

        let interest = self.interest();
        self.money += interest;
        events.push(Event::InterestEarned {
            amount: interest,
            money: self.money,
        });

        self.shop.clear();
        match self.blind.next() {
            Some(next) => self.blind = next,
            None => {
                self.blind = BlindKind::Small;
                self.ante = self.ante.saturating_add(1);
            }
        }
        let last_ante = self.config.max_ante().unwrap_or(0);
        if self.ante > last_ante {
            self.phase = Phase::RunWon;
            info!(ante = last_ante, money = self.money, "run won");
            events.push(Event::RunWon { ante: last_ante });
            return Ok(());
        }
        self.start_blind(events)
    }

    pub fn interest(&self) -> i64 {
        let rule = &self.config.economy;
        if rule.interest_step <= 0 {
            return 0;
        }
        (self.money.max(0) / rule.interest_step * rule.interest_per).min(rule.interest_cap)
    }

    /// Sends random board cards to the discard pile until the board fits.
    fn shrink_board(&mut self, size: usize) {
        self.board_size = size;
        while self.board.len() > size {
            let index = self.rng.below(self.board.len());
            let card = self.board.remove(index);
            self.discard_pile.push(card);
        }
    }
}
