use serde::{Deserialize, Serialize};

/// Number of attributes on a card.
pub const ATTRIBUTES: usize = 4;
/// Values each attribute ranges over.
pub const ATTRIBUTE_VALUES: i8 = 3;
/// Attribute value that matches anything.
pub const WILD: i8 = -1;

pub const COLOR: usize = 0;
pub const SHAPE: usize = 1;
pub const COUNT: usize = 2;
pub const SHADING: usize = 3;

pub const RED: i8 = 0;
pub const PURPLE: i8 = 1;
pub const GREEN: i8 = 2;

pub const OVAL: i8 = 0;
pub const TRIANGLE: i8 = 1;
pub const RECTANGLE: i8 = 2;

pub const ONE: i8 = 0;
pub const THREE: i8 = 2;

pub const SOLID: i8 = 0;
pub const STRIPED: i8 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Enhancement {
    BonusChips,
    BonusMult,
    XMult,
    Gold,
    Wildcard,
    Amplify,
    Lucky,
    Glass,
}

impl Enhancement {
    pub fn id(self) -> &'static str {
        match self {
            Enhancement::BonusChips => "bonus_chips",
            Enhancement::BonusMult => "bonus_mult",
            Enhancement::XMult => "x_mult",
            Enhancement::Gold => "gold",
            Enhancement::Wildcard => "wildcard",
            Enhancement::Amplify => "amplify",
            Enhancement::Lucky => "lucky",
            Enhancement::Glass => "glass",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub attributes: [i8; ATTRIBUTES],
    #[serde(default)]
    pub enhancement: Option<Enhancement>,
}

impl Card {
    pub fn new(attributes: [i8; ATTRIBUTES]) -> Self {
        Self {
            attributes,
            enhancement: None,
        }
    }

    pub fn with_enhancement(mut self, enhancement: Enhancement) -> Self {
        self.enhancement = Some(enhancement);
        self
    }

    /// A fully wild card, as created by The Fool.
    pub fn wildcard() -> Self {
        Self::new([WILD; ATTRIBUTES]).with_enhancement(Enhancement::Wildcard)
    }

    pub fn attr(&self, index: usize) -> Option<i8> {
        self.attributes.get(index).copied()
    }

    pub fn has_attr(&self, index: usize, value: i8) -> bool {
        self.attr(index) == Some(value)
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhancement.is_some()
    }
}

/// The 81 distinct attribute vectors, in lexicographic order.
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(81);
    for color in 0..ATTRIBUTE_VALUES {
        for shape in 0..ATTRIBUTE_VALUES {
            for count in 0..ATTRIBUTE_VALUES {
                for shading in 0..ATTRIBUTE_VALUES {
                    cards.push(Card::new([color, shape, count, shading]));
                }
            }
        }
    }
    cards
}
