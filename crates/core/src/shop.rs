use crate::{
    Catalog, GameConfig, Joker, JokerTemplate, Rarity, RarityWeight, RngState, SetType,
    TarotTemplate, Variant,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct JokerOffer {
    pub joker: Joker,
    pub purchased: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PackKind {
    Celestial,
    Tarot,
}

impl PackKind {
    pub fn name(self) -> &'static str {
        match self {
            PackKind::Celestial => "Celestial Pack",
            PackKind::Tarot => "Tarot Pack",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackOffer {
    pub kind: PackKind,
    pub price: i64,
    pub purchased: bool,
}

/// An opened pack waiting for the player's picks. `choices` holds set type
/// keys for celestial packs and tarot ids for tarot packs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackOpen {
    pub kind: PackKind,
    pub rarity: Rarity,
    pub choose: u8,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ShopState {
    pub jokers: Vec<JokerOffer>,
    pub packs: Vec<PackOffer>,
}

impl ShopState {
    /// Fills the joker slots with distinct jokers the player does not own,
    /// and offers one pack of each kind.
    pub fn generate(
        config: &GameConfig,
        catalog: &Catalog,
        rng: &mut RngState,
        owned: &HashSet<String>,
    ) -> Self {
        let mut excluded = owned.clone();
        let mut jokers = Vec::new();
        for _ in 0..config.shop.joker_slots {
            let Some(template) = draw_joker(config, catalog, rng, &excluded) else {
                break;
            };
            excluded.insert(template.id.clone());
            let variant = roll_variant(config, rng);
            let price = joker_price(config, template.rarity, variant);
            jokers.push(JokerOffer {
                joker: template.instantiate(variant, price),
                purchased: false,
            });
        }
        let packs = vec![
            PackOffer {
                kind: PackKind::Celestial,
                price: config.shop.celestial_pack_price,
                purchased: false,
            },
            PackOffer {
                kind: PackKind::Tarot,
                price: config.shop.tarot_pack_price,
                purchased: false,
            },
        ];
        Self { jokers, packs }
    }

    pub fn clear(&mut self) {
        self.jokers.clear();
        self.packs.clear();
    }
}

/// Picks a rarity among the non-empty classes, then a template uniformly
/// within it.
fn draw_weighted<'a, T>(
    items: &[&'a T],
    rarity_of: impl Fn(&T) -> Rarity,
    weights: &[RarityWeight],
    rng: &mut RngState,
) -> Option<&'a T> {
    let classes: Vec<(Rarity, u32)> = weights
        .iter()
        .filter(|rule| items.iter().any(|item| rarity_of(*item) == rule.rarity))
        .map(|rule| (rule.rarity, rule.weight))
        .collect();
    let class_weights: Vec<u32> = classes.iter().map(|(_, weight)| *weight).collect();
    let rarity = classes.get(rng.weighted_index(&class_weights)?)?.0;
    let pool: Vec<&'a T> = items
        .iter()
        .copied()
        .filter(|item| rarity_of(*item) == rarity)
        .collect();
    pool.get(rng.below(pool.len())).copied()
}

pub fn draw_joker<'a>(
    config: &GameConfig,
    catalog: &'a Catalog,
    rng: &mut RngState,
    excluded: &HashSet<String>,
) -> Option<&'a JokerTemplate> {
    let available: Vec<&JokerTemplate> = catalog
        .jokers()
        .iter()
        .filter(|joker| !excluded.contains(&joker.id))
        .collect();
    draw_weighted(
        &available,
        |joker| joker.rarity,
        &config.shop.joker_rarity_weights,
        rng,
    )
}

pub fn draw_tarot<'a>(
    config: &GameConfig,
    catalog: &'a Catalog,
    rng: &mut RngState,
    excluded: &HashSet<String>,
) -> Option<&'a TarotTemplate> {
    let available: Vec<&TarotTemplate> = catalog
        .tarots()
        .iter()
        .filter(|tarot| !excluded.contains(&tarot.id))
        .collect();
    draw_weighted(
        &available,
        |tarot| tarot.rarity,
        &config.shop.tarot_rarity_weights,
        rng,
    )
}

pub fn roll_variant(config: &GameConfig, rng: &mut RngState) -> Variant {
    let weights: Vec<u32> = config.shop.variants.iter().map(|rule| rule.weight).collect();
    rng.weighted_index(&weights)
        .and_then(|index| config.shop.variants.get(index))
        .map(|rule| rule.variant)
        .unwrap_or(Variant::Basic)
}

pub fn joker_price(config: &GameConfig, rarity: Rarity, variant: Variant) -> i64 {
    let base = config.joker_price(rarity) as f64;
    let mult = config
        .variant_rule(variant)
        .map(|rule| rule.price_mult)
        .unwrap_or(1.0);
    // 4.0 * 1.0 must stay 4, not round up on float noise.
    ((base * mult) - 1e-9).ceil() as i64
}

pub fn roll_pack_rarity(config: &GameConfig, rng: &mut RngState) -> Rarity {
    let weights: Vec<u32> = config
        .shop
        .pack_rarities
        .iter()
        .map(|rule| rule.weight)
        .collect();
    rng.weighted_index(&weights)
        .and_then(|index| config.shop.pack_rarities.get(index))
        .map(|rule| rule.rarity)
        .unwrap_or(Rarity::Common)
}

/// Builds the choices for an opened pack of the given rarity.
pub fn open_pack(
    config: &GameConfig,
    catalog: &Catalog,
    rng: &mut RngState,
    kind: PackKind,
    rarity: Rarity,
) -> PackOpen {
    let (show, choose) = config
        .pack_rule(rarity)
        .map(|rule| (rule.show as usize, rule.choose))
        .unwrap_or((2, 1));
    let choices = match kind {
        PackKind::Celestial => {
            let eligible: Vec<SetType> = SetType::ALL
                .iter()
                .copied()
                .filter(|set_type| *set_type != SetType::new(4, 0))
                .collect();
            rng.sample_indices(eligible.len(), show)
                .into_iter()
                .map(|index| eligible[index].key())
                .collect()
        }
        PackKind::Tarot => {
            let mut picked = HashSet::new();
            let mut ids = Vec::new();
            for _ in 0..show {
                let Some(tarot) = draw_tarot(config, catalog, rng, &picked) else {
                    break;
                };
                picked.insert(tarot.id.clone());
                ids.push(tarot.id.clone());
            }
            ids
        }
    };
    PackOpen {
        kind,
        rarity,
        choose,
        choices,
    }
}
