use crate::{Card, ATTRIBUTES, WILD};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Feature classification of a played triple: how many attributes are all
/// equal (uniform) and how many are all distinct (ladder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SetType {
    pub uniform: u8,
    pub ladder: u8,
}

impl SetType {
    pub const fn new(uniform: u8, ladder: u8) -> Self {
        Self { uniform, ladder }
    }

    /// The five types a wild-free set can have.
    pub const ALL: [SetType; 5] = [
        SetType::new(4, 0),
        SetType::new(3, 1),
        SetType::new(2, 2),
        SetType::new(1, 3),
        SetType::new(0, 4),
    ];

    pub fn key(&self) -> String {
        format!("{}_uniform_{}_ladder", self.uniform, self.ladder)
    }

    pub fn parse(key: &str) -> Option<Self> {
        let (uniform, rest) = key.split_once("_uniform_")?;
        let ladder = rest.strip_suffix("_ladder")?;
        Some(Self {
            uniform: uniform.parse().ok()?,
            ladder: ladder.parse().ok()?,
        })
    }

    pub fn label(&self) -> String {
        format!("{}U, {}L", self.uniform, self.ladder)
    }
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<SetType> for String {
    fn from(value: SetType) -> Self {
        value.key()
    }
}

impl TryFrom<String> for SetType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SetType::parse(&value).ok_or_else(|| format!("invalid set type key: {value}"))
    }
}

/// Whether three cards form a set. Anything other than exactly three cards
/// is rejected.
pub fn is_valid_set(cards: &[Card]) -> bool {
    if cards.len() != 3 {
        return false;
    }
    (0..ATTRIBUTES).all(|attr| {
        let real: Vec<i8> = cards
            .iter()
            .map(|card| card.attributes[attr])
            .filter(|value| *value != WILD)
            .collect();
        if real.len() <= 2 {
            return true;
        }
        let distinct: BTreeSet<i8> = real.into_iter().collect();
        distinct.len() == 1 || distinct.len() == 3
    })
}

/// Counts uniform and ladder attributes over the raw values, wildcards
/// included as their own value.
pub fn classify(cards: &[Card]) -> SetType {
    let mut uniform = 0;
    let mut ladder = 0;
    for attr in 0..ATTRIBUTES {
        let distinct: BTreeSet<i8> = cards.iter().map(|card| card.attributes[attr]).collect();
        match distinct.len() {
            1 => uniform += 1,
            3 => ladder += 1,
            _ => {}
        }
    }
    SetType { uniform, ladder }
}

/// First valid triple on the board, by ascending indices.
pub fn find_set(board: &[Card]) -> Option<[usize; 3]> {
    all_sets(board).into_iter().next()
}

pub fn all_sets(board: &[Card]) -> Vec<[usize; 3]> {
    let mut found = Vec::new();
    for a in 0..board.len() {
        for b in (a + 1)..board.len() {
            for c in (b + 1)..board.len() {
                if is_valid_set(&[board[a], board[b], board[c]]) {
                    found.push([a, b, c]);
                }
            }
        }
    }
    found
}
