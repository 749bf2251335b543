//! Submitted hands.
//!
//! A `Hand` is whatever cards a side put forward for a round. A legal hand has
//! exactly five distinct cards, but submissions are kept as-is so validation
//! can report what was wrong with them.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::Card;

/// Number of cards in a legal hand.
pub const HAND_SIZE: usize = 5;

/// The cards one side submitted for a round.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create a hand from cards.
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a hand from whitespace-separated cards like "A♠ 2♠ 3♠ 4♠ 5♠".
    pub fn from_str(s: &str) -> Option<Self> {
        let cards = s.split_whitespace().map(Card::from_str).collect::<Option<Vec<_>>>()?;
        Some(Self::new(cards))
    }

    /// Get the cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards submitted.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum of raw rank values (A=1 .. K=13). Does not check the hand size.
    pub fn sum(&self) -> u32 {
        self.cards.iter().map(Card::value).sum()
    }

    /// The first card whose identity already appeared earlier in the hand.
    pub fn first_duplicate(&self) -> Option<Card> {
        let mut seen = FxHashSet::default();
        self.cards.iter().copied().find(|&card| !seen.insert(card))
    }

    /// The cards as a fixed five-card array, if there are exactly five.
    pub fn five(&self) -> Option<[Card; HAND_SIZE]> {
        self.cards.as_slice().try_into().ok()
    }
}

impl From<[Card; HAND_SIZE]> for Hand {
    fn from(cards: [Card; HAND_SIZE]) -> Self {
        Self::new(cards.to_vec())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}
