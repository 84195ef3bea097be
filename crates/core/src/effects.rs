use crate::{Enhancement, SetType};
use serde::{Deserialize, Serialize};

/// Lifecycle points at which joker bindings fire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trigger {
    OnScoreCard,
    OnScoreCalculation,
    OnDiscard,
    OnEndOfRound,
    OnBuySelf,
    OnDestroySelf,
    OnBuyJoker,
    OnDestroyJoker,
    OnConsumableUse,
    OnStartRound,
}

impl Trigger {
    /// Self-scoped triggers only run the bindings of the joker concerned.
    pub fn is_self_scoped(self) -> bool {
        matches!(self, Trigger::OnBuySelf | Trigger::OnDestroySelf)
    }

    pub fn is_scoring(self) -> bool {
        matches!(self, Trigger::OnScoreCard | Trigger::OnScoreCalculation)
    }
}

pub mod priority {
    pub const DEFAULT: i32 = 10;
    pub const CONVERSION: i32 = 90;
    pub const MULTIPLICATIVE: i32 = 100;
    pub const COPY: i32 = 110;
    pub const LAST_WORD: i32 = 200;
}

/// One trigger-bound binding: when `trigger` fires and every condition
/// holds, the effects run in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectBlock {
    pub trigger: Trigger,
    pub priority: i32,
    pub conditions: Vec<Condition>,
    pub effects: Vec<EffectOp>,
}

impl EffectBlock {
    pub fn new(trigger: Trigger, effect: EffectOp) -> Self {
        Self {
            trigger,
            priority: priority::DEFAULT,
            conditions: Vec::new(),
            effects: vec![effect],
        }
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn and_then(mut self, effect: EffectOp) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn copies_other(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, EffectOp::CopyNextJoker))
    }
}

/// Quantities an effect can scale with. All are non-negative integers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Quantity {
    UniformFeatures,
    LadderFeatures,
    Money,
    MoneyPer(i64),
    DiscardsUsed,
    DiscardsRemaining,
    BoardCardsWithAttr { attr: usize, value: i8 },
    BoardPairs,
    EmptyJokerSlots,
    JokerCount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Condition {
    /// The card currently being scored has `attr == value`.
    CardAttr { attr: usize, value: i8 },
    CardEnhanced,
    /// The set just played has this type.
    SetTypeIs(SetType),
    /// Some set type has been played at least this many times this round.
    SetTypeRepeated(u32),
    BoardsRemaining(u32),
    DiscardsRemaining(u32),
    DiscardsUnused,
    MoneyAtMost(i64),
    /// Some scored card matches every `(attr, value)` pair.
    ScoredCardMatches(Vec<(usize, i8)>),
    /// The scored cards cover all values of the attribute.
    ScoredCoverAttr(usize),
    /// At least `count` of the just-discarded cards have `attr == value`.
    DiscardedAtLeast { attr: usize, value: i8, count: usize },
    Chance(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EffectOp {
    AddChips(i64),
    AddMult(f64),
    MultiplyMult(f64),
    AddMoney(i64),
    AddChipsPer { per: Quantity, amount: i64 },
    AddMultPer { per: Quantity, amount: f64 },
    MultiplyPer { per: Quantity, amount: f64 },
    AddMoneyPer { per: Quantity, amount: i64 },
    AddRandomMult { min: i64, max: i64 },
    /// Add the joker's stored mult.
    AddStoredMult,
    GrowMult(f64),
    GrowMultPer { per: Quantity, amount: f64 },
    AddStoredChips,
    GrowChips(i64),
    /// Multiply by the joker's stored factor.
    MultiplyStored,
    /// Gain `gain` stored factor from an enhanced card, stripping its
    /// enhancement.
    DrainEnhancement { gain: f64 },
    /// Turn flat chips into a multiplier of `1 + chips / divisor`.
    ChipsToMult { divisor: f64 },
    /// Run the next joker's bindings for the same trigger.
    CopyNextJoker,
    /// Either multiply by `factor`, or pin the pre-multiplier mult to 1.
    Gamble { chance: f64, factor: f64 },
    LevelUpLastSetType,
    /// Chips on the first card of each scored triple.
    FirstCardChips(i64),
    Countdown { every: u32, factor: f64 },
    CreateTarot(u8),
    EnhanceCurrentCard(Enhancement),
    AddJokerSlots(i64),
    AddDiscards(i64),
    CountUncommon,
    MultiplyPerUncommon(f64),
    DecayingMult { start: f64, step: f64 },
    TickRounds,
}

/// Statically typed per-instance data. Which variant a joker carries is
/// fixed by its template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JokerData {
    #[default]
    Empty,
    Accumulated { mult: f64 },
    Countdown { hands_left: u32 },
    XMult { x_mult: f64 },
    Chips { chips: i64 },
    RoundsPlayed { rounds_played: u32 },
    CardsScored { count: u32 },
    UncommonCount { count: u32 },
}

impl JokerData {
    pub fn same_kind(&self, other: &JokerData) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Computed display text shown on a joker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Badge {
    ChipsPerDiscardLeft(i64),
    EmptySlots,
    MultPerJoker(f64),
    Countdown,
    StoredXMult,
    UncommonFactor(f64),
    ChipsPerMoney(i64),
    DecayingMult { start: f64, step: f64 },
    StoredChips,
    StoredMult,
}

/// One-shot effects of a tarot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TarotOp {
    EnhanceRandom { count: usize, enhancement: Enhancement },
    EnhanceSelected(Enhancement),
    RecolorBoard,
    RetrieveFromDiscard(usize),
    SacrificeJoker { money: i64 },
    CreateWildcard,
    AddBoardsAndDiscards { boards: u32, discards: u32 },
    /// Overwrite up to this many other random cards with the selected one.
    CopySelectedOverRandom(usize),
    /// Remove the selected cards from the run.
    DestroySelected,
    CreateTarots(u8),
    CopyLastUsed,
    JokerSellValue { cap: i64 },
}

