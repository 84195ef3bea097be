use crate::{
    priority, Badge, Condition, EffectBlock, EffectOp, Enhancement, Joker, JokerData, Quantity,
    Rarity, SetType, Tarot, TarotOp, Trigger, Variant, COLOR, COUNT, GREEN, ONE, OVAL, PURPLE,
    RECTANGLE, RED, SHADING, SHAPE, SOLID, STRIPED, THREE, TRIANGLE,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Immutable joker definition. Instances copy `blocks`.
#[derive(Debug, Clone)]
pub struct JokerTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub blocks: Vec<EffectBlock>,
    pub data: JokerData,
    pub badge: Option<Badge>,
}

impl JokerTemplate {
    pub fn new(id: &str, name: &str, description: &str, rarity: Rarity) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            rarity,
            blocks: Vec::new(),
            data: JokerData::Empty,
            badge: None,
        }
    }

    pub fn on(mut self, block: EffectBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn data(mut self, data: JokerData) -> Self {
        self.data = data;
        self
    }

    pub fn badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Builds an instance with its own copy of the bindings plus the
    /// variant's bonus bindings.
    pub fn instantiate(&self, variant: Variant, price: i64) -> Joker {
        let mut blocks = self.blocks.clone();
        blocks.extend(variant.bonus_blocks());
        Joker {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            rarity: self.rarity,
            variant,
            price,
            blocks,
            data: self.data.clone(),
            badge: self.badge,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TarotTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tooltip: Option<String>,
    pub rarity: Rarity,
    pub target_count: usize,
    pub effects: Vec<TarotOp>,
}

impl TarotTemplate {
    pub fn new(id: &str, name: &str, description: &str, rarity: Rarity, effect: TarotOp) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            tooltip: None,
            rarity,
            target_count: 0,
            effects: vec![effect],
        }
    }

    pub fn tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.to_string());
        self
    }

    pub fn targets(mut self, count: usize) -> Self {
        self.target_count = count;
        self
    }

    pub fn instantiate(&self) -> Tarot {
        Tarot {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            tooltip: self.tooltip.clone(),
            rarity: self.rarity,
            target_count: self.target_count,
            effects: self.effects.clone(),
        }
    }
}

/// Joker and tarot templates keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    jokers: Vec<JokerTemplate>,
    tarots: Vec<TarotTemplate>,
}

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(Catalog::standard()));

impl Catalog {
    pub fn new(jokers: Vec<JokerTemplate>, tarots: Vec<TarotTemplate>) -> Self {
        Self { jokers, tarots }
    }

    /// Shared handle to the built-in catalogue.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn jokers(&self) -> &[JokerTemplate] {
        &self.jokers
    }

    pub fn tarots(&self) -> &[TarotTemplate] {
        &self.tarots
    }

    pub fn joker(&self, id: &str) -> Option<&JokerTemplate> {
        self.jokers.iter().find(|joker| joker.id == id)
    }

    pub fn tarot(&self, id: &str) -> Option<&TarotTemplate> {
        self.tarots.iter().find(|tarot| tarot.id == id)
    }

    pub fn standard() -> Self {
        Self::new(standard_jokers(), standard_tarots())
    }
}

fn calc(effect: EffectOp) -> EffectBlock {
    EffectBlock::new(Trigger::OnScoreCalculation, effect)
}

fn per_card(effect: EffectOp) -> EffectBlock {
    EffectBlock::new(Trigger::OnScoreCard, effect)
}

fn card_is(attr: usize, value: i8) -> Condition {
    Condition::CardAttr { attr, value }
}

fn set_is(uniform: u8, ladder: u8) -> Condition {
    Condition::SetTypeIs(SetType::new(uniform, ladder))
}

fn standard_jokers() -> Vec<JokerTemplate> {
    use EffectOp::*;
    use Rarity::*;
    let mult = priority::MULTIPLICATIVE;
    vec![
        JokerTemplate::new("J_CHIPS", "Joker", "+10 Chips", Common).on(calc(AddChips(10))),
        JokerTemplate::new("J_MULT", "Droll Joker", "+2 Mult", Common).on(calc(AddMult(2.0))),
        JokerTemplate::new("J_XMULT", "Wild Joker", "x2 Mult", Uncommon)
            .on(calc(MultiplyMult(2.0)).priority(mult)),
        JokerTemplate::new(
            "J_UNIFORM_CHIPS",
            "Uniform Joker",
            "+20 Chips for each uniform feature",
            Uncommon,
        )
        .on(calc(AddChipsPer {
            per: Quantity::UniformFeatures,
            amount: 20,
        })),
        JokerTemplate::new(
            "J_LADDER_MULT",
            "Crafty Joker",
            "+1 Mult for each ladder feature",
            Uncommon,
        )
        .on(calc(AddMultPer {
            per: Quantity::LadderFeatures,
            amount: 1.0,
        })),
        JokerTemplate::new("J_MONEY_MULT", "Piggy Bank", "+1 Mult for every $5 you have", Rare)
            .on(calc(AddMultPer {
                per: Quantity::MoneyPer(5),
                amount: 1.0,
            })),
        JokerTemplate::new(
            "J_DISCARD_MULT",
            "Throwback",
            "+1 Mult for every discard used this round",
            Uncommon,
        )
        .on(calc(AddMultPer {
            per: Quantity::DiscardsUsed,
            amount: 1.0,
        })),
        JokerTemplate::new(
            "J_ETERNAL_MULT",
            "Eternal",
            "Gains +1 Mult at the end of every round",
            Legendary,
        )
        .data(JokerData::Accumulated { mult: 0.0 })
        .badge(Badge::StoredMult)
        .on(calc(AddStoredMult))
        .on(EffectBlock::new(Trigger::OnEndOfRound, GrowMult(1.0))),
        JokerTemplate::new(
            "J_FULL_HOUSE",
            "Collector",
            "x3 Mult if you have played 3 of the same type of Set this round",
            Rare,
        )
        .on(calc(MultiplyMult(3.0))
            .priority(mult)
            .when(Condition::SetTypeRepeated(3))),
        JokerTemplate::new(
            "J_SYNERGY_GREEN",
            "Green Synergy",
            "+10 Chips for each green card on the board",
            Uncommon,
        )
        .on(calc(AddChipsPer {
            per: Quantity::BoardCardsWithAttr {
                attr: COLOR,
                value: GREEN,
            },
            amount: 10,
        })),
        JokerTemplate::new(
            "J_SYNERGY_RED",
            "Red Synergy",
            "+2 Mult for each red card on the board",
            Uncommon,
        )
        .on(calc(AddMultPer {
            per: Quantity::BoardCardsWithAttr {
                attr: COLOR,
                value: RED,
            },
            amount: 2.0,
        })),
        JokerTemplate::new(
            "J_PURPLE_CARD_MULT",
            "Purple Power",
            "x2 Mult when scoring a purple card",
            Rare,
        )
        .on(per_card(MultiplyMult(2.0))
            .priority(mult)
            .when(card_is(COLOR, PURPLE))),
        JokerTemplate::new(
            "J_OVAL_BOOST",
            "Oval Enthusiast",
            "+15 Chips when scoring an oval card",
            Common,
        )
        .on(per_card(AddChips(15)).when(card_is(SHAPE, OVAL))),
        JokerTemplate::new(
            "J_SOLID_MULT",
            "Solidarity",
            "+3 Mult when scoring a solid card",
            Common,
        )
        .on(per_card(AddMult(3.0)).when(card_is(SHADING, SOLID))),
        JokerTemplate::new(
            "J_ENHANCED_POWER",
            "Enhancement Amplifier",
            "x3 Mult when scoring an enhanced card",
            Rare,
        )
        .on(per_card(MultiplyMult(3.0))
            .priority(mult)
            .when(Condition::CardEnhanced)),
        JokerTemplate::new(
            "J_FIRST_CARD",
            "First Strike",
            "+50 Chips for the first card scored in a set",
            Uncommon,
        )
        .data(JokerData::CardsScored { count: 0 })
        .on(per_card(FirstCardChips(50))),
        JokerTemplate::new(
            "J_JUGGLER",
            "The Juggler",
            "Gains +1 Mult for every 2 cards on your board at end of round",
            Uncommon,
        )
        .data(JokerData::Accumulated { mult: 0.0 })
        .badge(Badge::StoredMult)
        .on(EffectBlock::new(
            Trigger::OnEndOfRound,
            GrowMultPer {
                per: Quantity::BoardPairs,
                amount: 1.0,
            },
        ))
        .on(calc(AddStoredMult)),
        JokerTemplate::new(
            "J_SCAVENGER",
            "Scavenger",
            "Gains +1 Mult permanently whenever you discard",
            Uncommon,
        )
        .data(JokerData::Accumulated { mult: 0.0 })
        .badge(Badge::StoredMult)
        .on(EffectBlock::new(Trigger::OnDiscard, GrowMult(1.0)))
        .on(calc(AddStoredMult)),
        JokerTemplate::new(
            "J_ALCHEMIST",
            "The Alchemist",
            "Converts all flat Chips into xMult at 100 Chips to x2, then sets them to 0",
            Rare,
        )
        .on(calc(ChipsToMult { divisor: 100.0 }).priority(priority::CONVERSION)),
        JokerTemplate::new(
            "J_LAST_STAND",
            "Last Stand",
            "x4 Mult on your final board of the round",
            Uncommon,
        )
        .on(calc(MultiplyMult(4.0))
            .priority(mult)
            .when(Condition::BoardsRemaining(1))),
        JokerTemplate::new(
            "J_MIMIC",
            "The Mimic",
            "Copies all scoring abilities of the Joker to its right",
            Rare,
        )
        .on(calc(CopyNextJoker).priority(priority::COPY))
        .on(per_card(CopyNextJoker).priority(priority::COPY)),
        JokerTemplate::new(
            "J_GAMBLER",
            "Gambler",
            "50% chance to x3 Mult, 50% chance to set Mult to 1",
            Rare,
        )
        .on(calc(Gamble {
            chance: 0.5,
            factor: 3.0,
        })
        .priority(priority::LAST_WORD)),
        JokerTemplate::new(
            "J_OBSERVATORY",
            "Observatory",
            "Levels up the last played Set type at end of round",
            Uncommon,
        )
        .on(EffectBlock::new(Trigger::OnEndOfRound, LevelUpLastSetType)),
        JokerTemplate::new(
            "J_GREEDY",
            "Greedy Joker",
            "Played green cards give +3 Mult",
            Common,
        )
        .on(per_card(AddMult(3.0)).when(card_is(COLOR, GREEN))),
        JokerTemplate::new("J_LUSTY", "Lusty Joker", "Played red cards give +3 Mult", Common)
            .on(per_card(AddMult(3.0)).when(card_is(COLOR, RED))),
        JokerTemplate::new(
            "J_WRATHFUL",
            "Wrathful Joker",
            "Played purple cards give +3 Mult",
            Common,
        )
        .on(per_card(AddMult(3.0)).when(card_is(COLOR, PURPLE))),
        JokerTemplate::new("J_JOLLY", "Jolly Joker", "+8 Mult if played set is (3U, 1L)", Common)
            .on(calc(AddMult(8.0)).when(set_is(3, 1))),
        JokerTemplate::new("J_ZANNY", "Zany Joker", "+12 Mult if played set is (2U, 2L)", Common)
            .on(calc(AddMult(12.0)).when(set_is(2, 2))),
        JokerTemplate::new("J_MAD", "Mad Joker", "+16 Mult if played set is (1U, 3L)", Common)
            .on(calc(AddMult(16.0)).when(set_is(1, 3))),
        JokerTemplate::new("J_CRAZY", "Crazy Joker", "+20 Mult if played set is (0U, 4L)", Common)
            .on(calc(AddMult(20.0)).when(set_is(0, 4))),
        JokerTemplate::new("J_SLY", "Sly Joker", "+50 Chips if played set is (3U, 1L)", Common)
            .on(calc(AddChips(50)).when(set_is(3, 1))),
        JokerTemplate::new("J_WILY", "Wily Joker", "+100 Chips if played set is (2U, 2L)", Common)
            .on(calc(AddChips(100)).when(set_is(2, 2))),
        JokerTemplate::new(
            "J_CLEVER",
            "Clever Joker",
            "+150 Chips if played set is (1U, 3L)",
            Common,
        )
        .on(calc(AddChips(150)).when(set_is(1, 3))),
        JokerTemplate::new(
            "J_STENCIL",
            "Joker Stencil",
            "x1 Mult for each empty Joker slot",
            Uncommon,
        )
        .badge(Badge::EmptySlots)
        .on(calc(MultiplyPer {
            per: Quantity::EmptyJokerSlots,
            amount: 1.0,
        })
        .priority(mult)),
        JokerTemplate::new(
            "J_BANNER",
            "Banner",
            "+30 Chips for each remaining discard",
            Common,
        )
        .badge(Badge::ChipsPerDiscardLeft(30))
        .on(calc(AddChipsPer {
            per: Quantity::DiscardsRemaining,
            amount: 30,
        })),
        JokerTemplate::new(
            "J_MYSTIC_SUMMIT",
            "Mystic Summit",
            "+15 Mult when 0 discards remaining",
            Common,
        )
        .on(calc(AddMult(15.0)).when(Condition::DiscardsRemaining(0))),
        JokerTemplate::new(
            "J_LOYALTY_CARD",
            "Loyalty Card",
            "x4 Mult every 6 sets played",
            Uncommon,
        )
        .data(JokerData::Countdown { hands_left: 5 })
        .badge(Badge::Countdown)
        .on(calc(Countdown {
            every: 6,
            factor: 4.0,
        })
        .priority(mult)),
        JokerTemplate::new(
            "J_8_BALL",
            "8-Ball",
            "1 in 4 chance to create a Tarot card when scoring",
            Common,
        )
        .on(calc(CreateTarot(1)).when(Condition::Chance(0.25))),
        JokerTemplate::new("J_MISPRINT", "Misprint", "+0-23 Mult", Common)
            .on(calc(AddRandomMult { min: 0, max: 23 })),
        JokerTemplate::new(
            "J_FIBONACCI",
            "Fibonacci",
            "Each played solid oval card gives +8 Mult",
            Common,
        )
        .on(per_card(AddMult(8.0))
            .when(card_is(SHAPE, OVAL))
            .when(card_is(SHADING, SOLID))),
        JokerTemplate::new(
            "J_SCARY_FACE",
            "Scary Face",
            "Each played card with 3 symbols gives +30 Chips",
            Common,
        )
        .on(per_card(AddChips(30)).when(card_is(COUNT, THREE))),
        JokerTemplate::new("J_ABSTRACT", "Abstract Joker", "+3 Mult for each Joker held", Common)
            .badge(Badge::MultPerJoker(3.0))
            .on(calc(AddMultPer {
                per: Quantity::JokerCount,
                amount: 3.0,
            })),
        JokerTemplate::new(
            "J_DELAYED_GRATIFICATION",
            "Delayed Gratification",
            "Earn $2 per discard if no discards are used by end of round",
            Common,
        )
        .on(EffectBlock::new(
            Trigger::OnEndOfRound,
            AddMoneyPer {
                per: Quantity::DiscardsRemaining,
                amount: 2,
            },
        )
        .when(Condition::DiscardsUnused)),
        JokerTemplate::new(
            "J_FACELESS",
            "Faceless Joker",
            "Earn $5 if 3 or more triangle cards are discarded at the same time",
            Common,
        )
        .on(EffectBlock::new(Trigger::OnDiscard, AddMoney(5)).when(
            Condition::DiscardedAtLeast {
                attr: SHAPE,
                value: TRIANGLE,
                count: 3,
            },
        )),
        JokerTemplate::new(
            "J_SUPERPOSITION",
            "Superposition",
            "Create a Tarot card when scoring a set with a striped green card",
            Rare,
        )
        .on(calc(CreateTarot(1)).when(Condition::ScoredCardMatches(vec![
            (COLOR, GREEN),
            (SHADING, STRIPED),
        ]))),
        JokerTemplate::new(
            "J_VAMPIRE",
            "Vampire",
            "Gains x0.1 Mult per scoring enhanced card played, removes card Enhancement",
            Uncommon,
        )
        .data(JokerData::XMult { x_mult: 1.0 })
        .badge(Badge::StoredXMult)
        .on(per_card(DrainEnhancement { gain: 0.1 }))
        .on(calc(MultiplyStored).priority(mult)),
        JokerTemplate::new(
            "J_VAGABOND",
            "Vagabond",
            "Create a Tarot card if a set is played with $4 or less",
            Rare,
        )
        .on(calc(CreateTarot(1)).when(Condition::MoneyAtMost(4))),
        JokerTemplate::new(
            "J_MIDAS_MASK",
            "Midas Mask",
            "All played solid rectangle cards become Gold when scored",
            Uncommon,
        )
        .on(per_card(EnhanceCurrentCard(Enhancement::Gold))
            .when(card_is(SHAPE, RECTANGLE))
            .when(card_is(SHADING, SOLID))),
        JokerTemplate::new("J_DRUNKARD", "Drunkard", "+1 Discard each round", Common)
            .on(EffectBlock::new(Trigger::OnBuySelf, AddDiscards(1)))
            .on(EffectBlock::new(Trigger::OnDestroySelf, AddDiscards(-1))),
        JokerTemplate::new("J_GOLDEN", "Golden Joker", "Earn $4 at end of round", Common)
            .on(EffectBlock::new(Trigger::OnEndOfRound, AddMoney(4))),
        JokerTemplate::new(
            "J_BASEBALL",
            "Baseball Card",
            "x1.5 Mult for each other Uncommon Joker held",
            Uncommon,
        )
        .data(JokerData::UncommonCount { count: 0 })
        .badge(Badge::UncommonFactor(1.5))
        .on(calc(MultiplyPerUncommon(1.5)).priority(mult))
        .on(EffectBlock::new(Trigger::OnBuySelf, CountUncommon))
        .on(EffectBlock::new(Trigger::OnBuyJoker, CountUncommon))
        .on(EffectBlock::new(Trigger::OnDestroyJoker, CountUncommon))
        .on(EffectBlock::new(Trigger::OnDiscard, CountUncommon)),
        JokerTemplate::new("J_BULL", "Bull", "+2 Chips for each $1 you have", Uncommon)
            .badge(Badge::ChipsPerMoney(2))
            .on(calc(AddChipsPer {
                per: Quantity::Money,
                amount: 2,
            })),
        JokerTemplate::new("J_POPCORN", "Popcorn", "+20 Mult, -4 Mult per round played", Common)
            .data(JokerData::RoundsPlayed { rounds_played: 0 })
            .badge(Badge::DecayingMult {
                start: 20.0,
                step: 4.0,
            })
            .on(calc(DecayingMult {
                start: 20.0,
                step: 4.0,
            }))
            .on(EffectBlock::new(Trigger::OnEndOfRound, TickRounds)),
        JokerTemplate::new(
            "J_ACROBAT",
            "Acrobat",
            "x3 Mult on the final played set of the round",
            Uncommon,
        )
        .on(calc(MultiplyMult(3.0))
            .priority(mult)
            .when(Condition::BoardsRemaining(1))),
        JokerTemplate::new("J_ROUGH_GEM", "Rough Gem", "Played green cards earn $1", Uncommon)
            .on(per_card(AddMoney(1)).when(card_is(COLOR, GREEN))),
        JokerTemplate::new(
            "J_BLOODSTONE",
            "Bloodstone",
            "Played red cards have a 1 in 2 chance to give x1.5 Mult",
            Uncommon,
        )
        .on(per_card(MultiplyMult(1.5))
            .priority(mult)
            .when(card_is(COLOR, RED))
            .when(Condition::Chance(0.5))),
        JokerTemplate::new("J_ONYX", "Onyx Agate", "Played purple cards give +50 Chips", Uncommon)
            .on(per_card(AddChips(50)).when(card_is(COLOR, PURPLE))),
        JokerTemplate::new(
            "J_FLOWER",
            "Flower Pot",
            "x3 Mult if played set contains a green, a red and a purple card",
            Uncommon,
        )
        .on(calc(MultiplyMult(3.0))
            .priority(mult)
            .when(Condition::ScoredCoverAttr(COLOR))),
        JokerTemplate::new(
            "J_WEE",
            "Wee Joker",
            "Gains +8 Chips for each played single triangle card",
            Rare,
        )
        .data(JokerData::Chips { chips: 0 })
        .badge(Badge::StoredChips)
        .on(per_card(GrowChips(8))
            .when(card_is(SHAPE, TRIANGLE))
            .when(card_is(COUNT, ONE)))
        .on(calc(AddStoredChips)),
    ]
}

fn standard_tarots() -> Vec<TarotTemplate> {
    use Rarity::*;
    use TarotOp::*;
    vec![
        TarotTemplate::new(
            "T_THE_EMPRESS",
            "The Empress",
            "Enhance 2 random cards to +30 Chips each.",
            Common,
            EnhanceRandom {
                count: 2,
                enhancement: Enhancement::BonusChips,
            },
        ),
        TarotTemplate::new(
            "T_THE_HIEROPHANT",
            "The Hierophant",
            "Enhance 2 random cards to +2 Mult each.",
            Common,
            EnhanceRandom {
                count: 2,
                enhancement: Enhancement::BonusMult,
            },
        ),
        TarotTemplate::new(
            "T_THE_TOWER",
            "The Tower",
            "Enhance 1 random card to x1.5 Mult.",
            Uncommon,
            EnhanceRandom {
                count: 1,
                enhancement: Enhancement::XMult,
            },
        ),
        TarotTemplate::new(
            "T_THE_SUN",
            "The Sun",
            "Enhance 2 random cards to become Gold.",
            Uncommon,
            EnhanceRandom {
                count: 2,
                enhancement: Enhancement::Gold,
            },
        )
        .tooltip("(Gold: +$3 when scored)"),
        TarotTemplate::new(
            "T_THE_WORLD",
            "The World",
            "Make all cards on the board one random color.",
            Rare,
            RecolorBoard,
        ),
        TarotTemplate::new(
            "T_JUDGEMENT",
            "Judgement",
            "Retrieve 3 random cards from your discard pile.",
            Common,
            RetrieveFromDiscard(3),
        )
        .tooltip("Adds cards from the discard pile to your board. Limited by board size."),
        TarotTemplate::new(
            "T_THE_DEVIL",
            "The Devil",
            "Gain $15, but destroy a random Joker.",
            Rare,
            SacrificeJoker { money: 15 },
        )
        .tooltip("The Joker is permanently lost. Cannot be used if you have no Jokers."),
        TarotTemplate::new(
            "T_STRENGTH",
            "Strength",
            "Enhance 1 random card to double the Chips and Mult gathered so far in the scored set.",
            Rare,
            EnhanceRandom {
                count: 1,
                enhancement: Enhancement::Amplify,
            },
        ),
        TarotTemplate::new(
            "T_THE_FOOL",
            "The Fool",
            "Create 1 Wildcard on the board.",
            Uncommon,
            CreateWildcard,
        )
        .tooltip("(Wildcard: Can be part of any Set. Provides no Chips or Mult itself)"),
        TarotTemplate::new(
            "T_THE_HERMIT",
            "The Hermit",
            "Gain +1 Board and +1 Discard for the current round.",
            Common,
            AddBoardsAndDiscards {
                boards: 1,
                discards: 1,
            },
        ),
        TarotTemplate::new(
            "T_THE_LOVERS",
            "The Lovers",
            "Enhance 1 selected card to +30 Chips.",
            Common,
            EnhanceSelected(Enhancement::BonusChips),
        )
        .targets(1),
        TarotTemplate::new(
            "T_THE_CHARIOT",
            "The Chariot",
            "Enhance 1 selected card to +2 Mult.",
            Common,
            EnhanceSelected(Enhancement::BonusMult),
        )
        .targets(1),
        TarotTemplate::new(
            "T_THE_WHEEL_OF_FORTUNE",
            "The Wheel of Fortune",
            "Make one random card a copy of the selected card.",
            Uncommon,
            CopySelectedOverRandom(1),
        )
        .targets(1),
        TarotTemplate::new(
            "T_DEATH",
            "Death",
            "Turn 2 random other cards into a copy of 1 selected card.",
            Common,
            CopySelectedOverRandom(2),
        )
        .targets(1),
        TarotTemplate::new(
            "T_THE_MAGICIAN",
            "The Magician",
            "Enhance 2 selected cards to Lucky Cards.",
            Common,
            EnhanceSelected(Enhancement::Lucky),
        )
        .tooltip("(Lucky: 1 in 5 chance for +20 Mult, 1 in 15 chance to win $20)")
        .targets(2),
        TarotTemplate::new(
            "T_JUSTICE",
            "Justice",
            "Enhance 1 selected card into a Glass Card.",
            Common,
            EnhanceSelected(Enhancement::Glass),
        )
        .tooltip("(x2 Mult, 1 in 4 chance to be destroyed when played)")
        .targets(1),
        TarotTemplate::new(
            "T_THE_HANGED_MAN",
            "The Hanged Man",
            "Destroy 2 selected cards.",
            Common,
            DestroySelected,
        )
        .tooltip("Destroyed cards leave the run for good.")
        .targets(2),
        TarotTemplate::new(
            "T_THE_EMPEROR",
            "The Emperor",
            "Create 2 random Tarot cards.",
            Common,
            CreateTarots(2),
        )
        .tooltip("(must have room)"),
        TarotTemplate::new(
            "T_THE_HIGH_PRIESTESS",
            "The High Priestess",
            "Create a copy of the last Tarot card used.",
            Common,
            CopyLastUsed,
        ),
        TarotTemplate::new(
            "T_TEMPERANCE",
            "Temperance",
            "Gain the total sell value of all current Jokers.",
            Common,
            JokerSellValue { cap: 50 },
        )
        .tooltip("(Max of $50)"),
    ]
}
