use super::*;
use crate::*;
use tracing::info;

const COLOR_NAMES: [&str; 3] = ["red", "purple", "green"];

impl GameState {
    /// Uses a held tarot on the current board. The tarot is consumed and
    /// becomes the last used one, unless it is itself a copying tarot.
    pub fn use_consumable(
        &mut self,
        index: usize,
        targets: &[usize],
        events: &mut EventBus,
    ) -> Result<UseOutcome, RunError> {
        self.require_phase(Phase::Playing)?;
        let tarot = self
            .inventory
            .consumables
            .get(index)
            .cloned()
            .ok_or(RunError::InvalidConsumableIndex)?;
        if tarot.target_count > 0 && targets.len() != tarot.target_count {
            return Err(RunError::InvalidCardCount);
        }
        validate_selection(targets, self.board.len())?;
        let sacrifices = tarot
            .effects
            .iter()
            .any(|op| matches!(op, TarotOp::SacrificeJoker { .. }));
        if sacrifices && self.inventory.jokers.is_empty() {
            return Err(RunError::ConsumableUnusable(format!(
                "{} needs a joker to destroy",
                tarot.name
            )));
        }

        self.inventory.consumables.remove(index);
        let previous = self.last_consumable.take();
        let mut messages = Vec::new();
        for op in &tarot.effects {
            messages.push(self.apply_tarot(op, targets, previous.as_ref())?);
        }
        let copies = tarot
            .effects
            .iter()
            .any(|op| matches!(op, TarotOp::CopyLastUsed));
        self.last_consumable = if copies { previous } else { Some(tarot.clone()) };
        self.dispatch(Trigger::OnConsumableUse, &mut Scope::none())?;

        info!(id = %tarot.id, "consumable used");
        events.push(Event::ConsumableUsed {
            id: tarot.id.clone(),
        });
        let message = if messages.is_empty() {
            format!("Used {}.", tarot.name)
        } else {
            messages.join(" ")
        };
        Ok(UseOutcome {
            id: tarot.id,
            message,
        })
    }

    fn apply_tarot(
        &mut self,
        op: &TarotOp,
        targets: &[usize],
        previous: Option<&Tarot>,
    ) -> Result<String, RunError> {
        let message = match op {
            TarotOp::EnhanceRandom { count, enhancement } => {
                let amount = (*count).min(self.board.len());
                for index in self.rng.sample_indices(self.board.len(), amount) {
                    self.board[index].enhancement = Some(*enhancement);
                }
                format!("Enhanced {amount} card{}.", plural(amount))
            }
            TarotOp::EnhanceSelected(enhancement) => {
                for index in targets {
                    self.board[*index].enhancement = Some(*enhancement);
                }
                format!(
                    "Enhanced {} selected card{}.",
                    targets.len(),
                    plural(targets.len())
                )
            }
            TarotOp::RecolorBoard => {
                let color = self.rng.below(ATTRIBUTE_VALUES as usize);
                for card in &mut self.board {
                    card.attributes[COLOR] = color as i8;
                }
                format!("The board turned {}.", COLOR_NAMES[color])
            }
            TarotOp::RetrieveFromDiscard(count) => {
                let mut retrieved = 0;
                while retrieved < *count
                    && self.board.len() < self.board_size
                    && !self.discard_pile.is_empty()
                {
                    let index = self.rng.below(self.discard_pile.len());
                    let card = self.discard_pile.remove(index);
                    self.board.push(card);
                    retrieved += 1;
                }
                format!("Retrieved {retrieved} card{} from the discard pile.", plural(retrieved))
            }
            TarotOp::SacrificeJoker { money } => {
                if self.inventory.jokers.is_empty() {
                    return Ok("No Joker to destroy.".to_string());
                }
                let index = self.rng.below(self.inventory.jokers.len());
                self.dispatch(Trigger::OnDestroySelf, &mut Scope::joker(index))?;
                let joker = self.inventory.jokers.remove(index);
                self.money += money;
                self.dispatch(Trigger::OnDestroyJoker, &mut Scope::none())?;
                format!("{} was destroyed. Gained ${money}.", joker.name)
            }
            TarotOp::CreateWildcard => {
                self.board.push(Card::wildcard());
                if self.board.len() > self.board_size {
                    let last = self.board.len() - 1;
                    let index = self.rng.below(last);
                    let card = self.board.remove(index);
                    self.discard_pile.push(card);
                }
                "A Wildcard joined the board.".to_string()
            }
            TarotOp::AddBoardsAndDiscards { boards, discards } => {
                self.boards_remaining += boards;
                self.discards_remaining += discards;
                format!("Gained +{boards} Board and +{discards} Discard.")
            }
            TarotOp::CopySelectedOverRandom(count) => {
                let Some(selected) = targets.first().copied() else {
                    return Ok("Select a card to copy.".to_string());
                };
                let others: Vec<usize> = (0..self.board.len())
                    .filter(|index| *index != selected)
                    .collect();
                if others.is_empty() {
                    return Ok("No other card to overwrite.".to_string());
                }
                let picks = self.rng.sample_indices(others.len(), *count);
                for pick in &picks {
                    self.board[others[*pick]] = self.board[selected];
                }
                if picks.len() == 1 {
                    "A random card became a copy of the selected card.".to_string()
                } else {
                    format!("{} random cards became copies of the selected card.", picks.len())
                }
            }
            TarotOp::DestroySelected => {
                let mut sorted = targets.to_vec();
                sorted.sort_unstable_by(|a, b| b.cmp(a));
                for index in &sorted {
                    self.board.remove(*index);
                }
                self.replenish_board();
                format!("Destroyed {} card{}.", sorted.len(), plural(sorted.len()))
            }
            TarotOp::CreateTarots(count) => {
                let mut created = 0;
                for _ in 0..*count {
                    if self.add_random_tarot().is_none() {
                        break;
                    }
                    created += 1;
                }
                format!("Created {created} Tarot card{}.", plural(created))
            }
            TarotOp::CopyLastUsed => match previous {
                Some(tarot) if self.inventory.has_consumable_room() => {
                    self.inventory.add_consumable(tarot.clone())?;
                    format!("Created a copy of {}.", tarot.name)
                }
                Some(_) => "No room for another Tarot.".to_string(),
                None => "No Tarot has been used yet.".to_string(),
            },
            TarotOp::JokerSellValue { cap } => {
                let total: i64 = self.inventory.jokers.iter().map(Joker::sell_value).sum();
                let gained = total.clamp(0, *cap);
                self.money += gained;
                format!("Gained ${gained}.")
            }
        };
        Ok(message)
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
