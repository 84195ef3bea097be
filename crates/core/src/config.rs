use crate::{BlindKind, BossEffect, Rarity, Variant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnteRule {
    pub ante: u8,
    /// Targets for the small, big and boss blind.
    pub targets: [i64; 3],
    pub boss_name: String,
    #[serde(default)]
    pub boss_effect: Option<BossEffect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRule {
    pub boards_per_round: u32,
    pub discards_per_round: u32,
    pub board_size: usize,
    pub reduced_board_size: usize,
    pub max_discard: usize,
    pub starting_level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyRule {
    pub starting_money: i64,
    pub clear_reward: i64,
    pub per_board_reward: i64,
    pub interest_step: i64,
    pub interest_per: i64,
    pub interest_cap: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRule {
    pub base_chips: i64,
    pub chips_per_uniform: i64,
    pub chips_per_level: i64,
    pub mult_per_ladder: f64,
    pub mult_per_level: f64,
    pub bonus_chips: i64,
    pub bonus_mult: f64,
    pub gold_money: i64,
    pub x_mult: f64,
    pub amplify: f64,
    #[serde(default)]
    pub chance_cards: ChanceCardRule,
}

/// Odds and payouts of the Lucky and Glass enhancements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChanceCardRule {
    pub lucky_mult: f64,
    pub lucky_mult_chance: f64,
    pub lucky_money: i64,
    pub lucky_money_chance: f64,
    pub glass_mult: f64,
    pub glass_break_chance: f64,
}

impl Default for ChanceCardRule {
    fn default() -> Self {
        Self {
            lucky_mult: 20.0,
            lucky_mult_chance: 1.0 / 5.0,
            lucky_money: 20,
            lucky_money_chance: 1.0 / 15.0,
            glass_mult: 2.0,
            glass_break_chance: 1.0 / 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RarityWeight {
    pub rarity: Rarity,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RarityPrice {
    pub rarity: Rarity,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRule {
    pub variant: Variant,
    pub weight: u32,
    pub price_mult: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackRarityRule {
    pub rarity: Rarity,
    pub show: u8,
    pub choose: u8,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopRule {
    pub joker_slots: u8,
    pub joker_rarity_weights: Vec<RarityWeight>,
    pub joker_prices: Vec<RarityPrice>,
    pub variants: Vec<VariantRule>,
    pub pack_rarities: Vec<PackRarityRule>,
    pub tarot_rarity_weights: Vec<RarityWeight>,
    pub celestial_pack_price: i64,
    pub tarot_pack_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRule {
    pub joker_slots: usize,
    pub consumable_slots: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub antes: Vec<AnteRule>,
    pub round: RoundRule,
    pub economy: EconomyRule,
    pub scoring: ScoringRule,
    pub shop: ShopRule,
    pub inventory: InventoryRule,
}

impl GameConfig {
    pub fn ante_rule(&self, ante: u8) -> Option<&AnteRule> {
        self.antes.iter().find(|rule| rule.ante == ante)
    }

    pub fn target_for(&self, ante: u8, blind: BlindKind) -> Option<i64> {
        self.ante_rule(ante)
            .map(|rule| rule.targets[blind.index()])
    }

    pub fn blind_name(&self, ante: u8, blind: BlindKind) -> Option<String> {
        match blind {
            BlindKind::Small => Some("Small Blind".to_string()),
            BlindKind::Big => Some("Big Blind".to_string()),
            BlindKind::Boss => self.ante_rule(ante).map(|rule| rule.boss_name.clone()),
        }
    }

    pub fn boss_effect_for(&self, ante: u8, blind: BlindKind) -> Option<BossEffect> {
        if blind != BlindKind::Boss {
            return None;
        }
        self.ante_rule(ante).and_then(|rule| rule.boss_effect)
    }

    pub fn max_ante(&self) -> Option<u8> {
        self.antes.iter().map(|rule| rule.ante).max()
    }

    pub fn joker_price(&self, rarity: Rarity) -> i64 {
        self.shop
            .joker_prices
            .iter()
            .find(|rule| rule.rarity == rarity)
            .map(|rule| rule.price)
            .unwrap_or(0)
    }

    pub fn variant_rule(&self, variant: Variant) -> Option<&VariantRule> {
        self.shop.variants.iter().find(|rule| rule.variant == variant)
    }

    pub fn pack_rule(&self, rarity: Rarity) -> Option<&PackRarityRule> {
        self.shop.pack_rarities.iter().find(|rule| rule.rarity == rarity)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let targets: [[i64; 3]; 8] = [
            [300, 450, 600],
            [800, 1200, 1600],
            [2000, 3000, 4000],
            [6000, 9000, 12000],
            [15000, 22000, 30000],
            [40000, 60000, 80000],
            [100000, 150000, 200000],
            [250000, 375000, 500000],
        ];
        let antes = targets
            .iter()
            .enumerate()
            .map(|(index, targets)| {
                let ante = index as u8 + 1;
                let (boss_name, boss_effect) = match ante {
                    1 => ("The Wall", Some(BossEffect::DebuffFirstJoker)),
                    2 => ("The Needle", Some(BossEffect::ReduceBoardSize)),
                    3 => ("The Mark", None),
                    _ => ("Boss Blind", None),
                };
                AnteRule {
                    ante,
                    targets: *targets,
                    boss_name: boss_name.to_string(),
                    boss_effect,
                }
            })
            .collect();
        let weights = |common, uncommon, rare, legendary| {
            vec![
                RarityWeight { rarity: Rarity::Common, weight: common },
                RarityWeight { rarity: Rarity::Uncommon, weight: uncommon },
                RarityWeight { rarity: Rarity::Rare, weight: rare },
                RarityWeight { rarity: Rarity::Legendary, weight: legendary },
            ]
        };
        Self {
            antes,
            round: RoundRule {
                boards_per_round: 4,
                discards_per_round: 3,
                board_size: 12,
                reduced_board_size: 9,
                max_discard: 5,
                starting_level: 1,
            },
            economy: EconomyRule {
                starting_money: 4,
                clear_reward: 3,
                per_board_reward: 1,
                interest_step: 5,
                interest_per: 1,
                interest_cap: 5,
            },
            scoring: ScoringRule {
                base_chips: 10,
                chips_per_uniform: 5,
                chips_per_level: 15,
                mult_per_ladder: 2.0,
                mult_per_level: 0.5,
                bonus_chips: 30,
                bonus_mult: 2.0,
                gold_money: 3,
                x_mult: 1.5,
                amplify: 2.0,
                chance_cards: ChanceCardRule::default(),
            },
            shop: ShopRule {
                joker_slots: 2,
                joker_rarity_weights: weights(70, 20, 8, 2),
                joker_prices: vec![
                    RarityPrice { rarity: Rarity::Common, price: 4 },
                    RarityPrice { rarity: Rarity::Uncommon, price: 6 },
                    RarityPrice { rarity: Rarity::Rare, price: 8 },
                    RarityPrice { rarity: Rarity::Legendary, price: 10 },
                ],
                variants: vec![
                    VariantRule { variant: Variant::Basic, weight: 75, price_mult: 1.0 },
                    VariantRule { variant: Variant::Foil, weight: 10, price_mult: 1.15 },
                    VariantRule { variant: Variant::Holographic, weight: 7, price_mult: 1.3 },
                    VariantRule { variant: Variant::Polychrome, weight: 5, price_mult: 1.45 },
                    VariantRule { variant: Variant::Negative, weight: 3, price_mult: 1.6 },
                ],
                pack_rarities: vec![
                    PackRarityRule { rarity: Rarity::Common, show: 2, choose: 1, weight: 70 },
                    PackRarityRule { rarity: Rarity::Uncommon, show: 4, choose: 1, weight: 20 },
                    PackRarityRule { rarity: Rarity::Rare, show: 4, choose: 2, weight: 8 },
                    PackRarityRule { rarity: Rarity::Legendary, show: 5, choose: 2, weight: 2 },
                ],
                tarot_rarity_weights: weights(70, 25, 5, 0),
                celestial_pack_price: 4,
                tarot_pack_price: 3,
            },
            inventory: InventoryRule {
                joker_slots: 5,
                consumable_slots: 2,
            },
        }
    }
}
