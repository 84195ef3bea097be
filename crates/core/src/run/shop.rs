use super::*;
use crate::*;
use std::sync::Arc;
use tracing::info;

impl GameState {
    pub(crate) fn enter_shop(&mut self, events: &mut EventBus) {
        self.phase = Phase::Shop;
        self.pack = None;
        let owned = self.owned_joker_ids();
        self.shop = ShopState::generate(&self.config, &self.catalog, &mut self.rng, &owned);
        info!(
            ante = self.ante,
            jokers = self.shop.jokers.len(),
            money = self.money,
            "shop entered"
        );
        events.push(Event::ShopEntered {
            jokers: self.shop.jokers.len(),
            packs: self.shop.packs.len(),
        });
    }

    pub fn buy_joker(&mut self, slot: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Shop)?;
        let offer = self.shop.jokers.get(slot).ok_or(RunError::InvalidOfferIndex)?;
        if !self.inventory.has_joker_room() && !offer.joker.variant.grants_joker_slot() {
            return Err(InventoryError::NoJokerSlots.into());
        }
        if offer.purchased {
            return Err(RunError::OfferSoldOut);
        }
        let price = offer.joker.price;
        if self.money < price {
            return Err(RunError::NotEnoughMoney);
        }
        let joker = offer.joker.clone();
        let id = joker.id.clone();

        let index = self.inventory.add_joker(joker)?;
        if let Some(offer) = self.shop.jokers.get_mut(slot) {
            offer.purchased = true;
        }
        self.money -= price;
        self.dispatch(Trigger::OnBuySelf, &mut Scope::joker(index))?;
        self.dispatch(Trigger::OnBuyJoker, &mut Scope::none())?;
        events.push(Event::JokerBought {
            id,
            price,
            money: self.money,
        });
        Ok(())
    }

    pub fn sell_joker(&mut self, index: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Shop)?;
        if index >= self.inventory.jokers.len() {
            return Err(RunError::InvalidJokerIndex);
        }
        self.dispatch(Trigger::OnDestroySelf, &mut Scope::joker(index))?;
        let joker = self.inventory.jokers.remove(index);
        let sell_value = joker.sell_value();
        self.money += sell_value;
        self.dispatch(Trigger::OnDestroyJoker, &mut Scope::none())?;
        events.push(Event::JokerSold {
            id: joker.id,
            sell_value,
            money: self.money,
        });
        Ok(())
    }

    pub fn buy_booster_pack(&mut self, slot: usize, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::Shop)?;
        let offer = self.shop.packs.get(slot).ok_or(RunError::InvalidOfferIndex)?;
        if offer.purchased {
            return Err(RunError::OfferSoldOut);
        }
        let (kind, price) = (offer.kind, offer.price);
        if self.money < price {
            return Err(RunError::NotEnoughMoney);
        }
        if kind == PackKind::Tarot && !self.inventory.has_consumable_room() {
            return Err(InventoryError::NoConsumableSlots.into());
        }

        let config = Arc::clone(&self.config);
        let catalog = Arc::clone(&self.catalog);
        let rarity = roll_pack_rarity(&config, &mut self.rng);
        let open = open_pack(&config, &catalog, &mut self.rng, kind, rarity);
        if let Some(offer) = self.shop.packs.get_mut(slot) {
            offer.purchased = true;
        }
        self.money -= price;
        events.push(Event::PackOpened {
            kind,
            rarity,
            options: open.choices.len(),
            picks: open.choose,
        });
        self.pack = Some(open);
        self.phase = Phase::PackOpening;
        Ok(())
    }

    /// Takes the picked rewards from the open pack and returns to the shop.
    /// Celestial picks level up their set type; tarot picks are added while
    /// consumable slots remain.
    pub fn choose_pack_reward(&mut self, ids: &[String], events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::PackOpening)?;
        let pack = self.pack.as_ref().ok_or(RunError::PackNotAvailable)?;
        if ids.len() > pack.choose as usize {
            return Err(RunError::TooManyPicks);
        }
        for (position, id) in ids.iter().enumerate() {
            if !pack.choices.contains(id) || ids[..position].contains(id) {
                return Err(RunError::InvalidPackChoice(id.clone()));
            }
        }
        let kind = pack.kind;
        let level_ups = match kind {
            PackKind::Celestial => ids
                .iter()
                .map(|id| SetType::parse(id).ok_or_else(|| RunError::InvalidPackChoice(id.clone())))
                .collect::<Result<Vec<_>, _>>()?,
            PackKind::Tarot => Vec::new(),
        };

        for set_type in level_ups {
            self.level_up(set_type, 1);
        }
        if kind == PackKind::Tarot {
            let catalog = Arc::clone(&self.catalog);
            for id in ids {
                if !self.inventory.has_consumable_room() {
                    break;
                }
                if let Some(template) = catalog.tarot(id) {
                    self.inventory.add_consumable(template.instantiate())?;
                }
            }
        }
        self.pack = None;
        self.phase = Phase::Shop;
        events.push(Event::PackChosen { picks: ids.len() });
        Ok(())
    }

    pub fn skip_pack(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::PackOpening)?;
        self.pack = None;
        self.phase = Phase::Shop;
        events.push(Event::PackChosen { picks: 0 });
        Ok(())
    }

    /// Rearranges the roster; `order[i]` is the current index of the joker
    /// that moves to position `i`.
    pub fn reorder_jokers(&mut self, order: &[usize], events: &mut EventBus) -> Result<(), RunError> {
        if !matches!(self.phase, Phase::Playing | Phase::Shop) {
            return Err(RunError::InvalidPhase(self.phase));
        }
        let count = self.inventory.jokers.len();
        if order.len() != count || validate_selection(order, count).is_err() {
            return Err(RunError::InvalidOrder);
        }
        let reordered: Vec<Joker> = order
            .iter()
            .map(|index| self.inventory.jokers[*index].clone())
            .collect();
        self.inventory.jokers = reordered;
        events.push(Event::JokersReordered);
        Ok(())
    }
}
