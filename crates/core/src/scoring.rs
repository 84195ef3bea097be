use crate::{Card, ScoringRule, SetType};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Chips and total mult at one point of the pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub chips: i64,
    pub mult: f64,
}

impl Score {
    pub fn total(self) -> i64 {
        let chips = self.chips.max(0) as f64;
        (chips * self.mult).floor().max(0.0) as i64
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Set,
    Card,
    Joker,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPhase {
    SetBase,
    CardScoring,
    EndScoring,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreLogEntry {
    pub source: String,
    pub source_type: SourceType,
    pub trigger_phase: TriggerPhase,
    pub description: String,
    pub before: Score,
    pub after: Score,
}

/// Accumulator state captured around one effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulators {
    pub score: Score,
    pub flat_chips: i64,
    pub additive_mult: f64,
    pub multiplicative_mult: f64,
}

/// Transient record for one played set.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub base_chips: i64,
    pub base_mult: f64,
    pub flat_chips: i64,
    pub additive_mult: f64,
    multiplicative_mult: f64,
    pub set_type: SetType,
    pub level: u32,
    pub cards: Vec<Card>,
    pub current_card: Option<usize>,
    pub log: Vec<ScoreLogEntry>,
}

impl ScoringContext {
    pub fn new(cards: Vec<Card>, set_type: SetType, level: u32, rule: &ScoringRule) -> Self {
        let (base_chips, base_mult) = base_score(set_type, level, rule);
        Self {
            base_chips,
            base_mult,
            flat_chips: 0,
            additive_mult: 0.0,
            multiplicative_mult: 1.0,
            set_type,
            level,
            cards,
            current_card: None,
            log: Vec::new(),
        }
    }

    pub fn uniform_features(&self) -> u8 {
        self.set_type.uniform
    }

    pub fn ladder_features(&self) -> u8 {
        self.set_type.ladder
    }

    pub fn multiplicative_mult(&self) -> f64 {
        self.multiplicative_mult
    }

    /// Non-positive factors are ignored so the multiplier never collapses.
    pub fn multiply(&mut self, factor: f64) {
        if factor > 0.0 && factor.is_finite() {
            self.multiplicative_mult *= factor;
        } else {
            warn!(factor, "ignored non-positive multiplier");
        }
    }

    pub fn reset_multiplier(&mut self) {
        self.multiplicative_mult = 1.0;
    }

    pub fn current(&self) -> Option<&Card> {
        self.current_card.and_then(|index| self.cards.get(index))
    }

    pub fn current_mut(&mut self) -> Option<&mut Card> {
        match self.current_card {
            Some(index) => self.cards.get_mut(index),
            None => None,
        }
    }

    pub fn chips(&self) -> i64 {
        self.base_chips + self.flat_chips
    }

    pub fn mult(&self) -> f64 {
        (self.base_mult + self.additive_mult) * self.multiplicative_mult
    }

    pub fn score(&self) -> Score {
        Score {
            chips: self.chips(),
            mult: self.mult(),
        }
    }

    pub fn total(&self) -> i64 {
        self.score().total()
    }

    pub fn accumulators(&self) -> Accumulators {
        Accumulators {
            score: self.score(),
            flat_chips: self.flat_chips,
            additive_mult: self.additive_mult,
            multiplicative_mult: self.multiplicative_mult,
        }
    }

    pub fn log_base(&mut self) {
        let after = self.score();
        self.log.push(ScoreLogEntry {
            source: format!("Played Set ({})", self.set_type.label()),
            source_type: SourceType::Set,
            trigger_phase: TriggerPhase::SetBase,
            description: format!("Base score for a level {} set.", self.level),
            before: Score { chips: 0, mult: 0.0 },
            after,
        });
    }

    pub fn log_card(&mut self, source: &str, description: String, before: Accumulators) {
        let after = self.score();
        self.log.push(ScoreLogEntry {
            source: source.to_string(),
            source_type: SourceType::Card,
            trigger_phase: TriggerPhase::CardScoring,
            description,
            before: before.score,
            after,
        });
    }

    /// Records a joker effect if it moved any accumulator. Returns whether
    /// an entry was written.
    pub fn log_joker(&mut self, source: &str, phase: TriggerPhase, before: Accumulators) -> bool {
        let chips_delta = self.flat_chips - before.flat_chips;
        let mult_delta = self.additive_mult - before.additive_mult;
        let ratio = if before.multiplicative_mult.abs() > f64::EPSILON {
            self.multiplicative_mult / before.multiplicative_mult
        } else {
            1.0
        };
        let description = if chips_delta != 0 {
            format_chips(chips_delta)
        } else if mult_delta != 0.0 {
            format_mult(mult_delta)
        } else if (ratio - 1.0).abs() > 1e-3 {
            format_ratio(ratio)
        } else {
            return false;
        };
        let after = self.score();
        self.log.push(ScoreLogEntry {
            source: source.to_string(),
            source_type: SourceType::Joker,
            trigger_phase: phase,
            description,
            before: before.score,
            after,
        });
        true
    }
}

pub fn base_score(set_type: SetType, level: u32, rule: &ScoringRule) -> (i64, f64) {
    let extra = level.saturating_sub(1);
    let chips = rule.base_chips
        + rule.chips_per_uniform * set_type.uniform as i64
        + rule.chips_per_level * extra as i64;
    let mult = (1.0 + rule.mult_per_ladder * set_type.ladder as f64)
        * (1.0 + rule.mult_per_level * extra as f64);
    (chips, mult)
}

pub fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

pub fn format_chips(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta} Chips")
    } else {
        format!("{delta} Chips")
    }
}

pub fn format_mult(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{} Mult", format_number(delta))
    } else {
        format!("{} Mult", format_number(delta))
    }
}

pub fn format_ratio(ratio: f64) -> String {
    format!("x{} Mult", format_number(ratio))
}
