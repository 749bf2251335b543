//! Card representation for Air Poker.
//!
//! This module provides the fundamental card types used throughout the game:
//! - `Suit`: One of the four suits
//! - `Card`: A single playing card with a rank (Ace = 1 .. King = 13) and a suit
//!
//! A rank has two readings. Its raw value (Ace = 1) is what counts towards a
//! target sum. Its strength (Ace = 14) is what counts when hands are compared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank of a card (1-13: A-K).
pub type Rank = u8;

pub const ACE: Rank = 1;
pub const TWO: Rank = 2;
pub const THREE: Rank = 3;
pub const FOUR: Rank = 4;
pub const FIVE: Rank = 5;
pub const SIX: Rank = 6;
pub const SEVEN: Rank = 7;
pub const EIGHT: Rank = 8;
pub const NINE: Rank = 9;
pub const TEN: Rank = 10;
pub const JACK: Rank = 11;
pub const QUEEN: Rank = 12;
pub const KING: Rank = 13;

/// Number of distinct ranks.
pub const NUM_RANKS: usize = 13;
/// Number of distinct suits.
pub const NUM_SUITS: usize = 4;
/// Number of distinct cards in a standard deck.
pub const NUM_CARDS: usize = NUM_RANKS * NUM_SUITS;

/// Rank characters for display, indexed by `rank - 1`.
const RANK_CHARS: [char; NUM_RANKS] = ['A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K'];

/// Comparison strength of a rank: Ace counts as 14, everything else as its raw value.
#[inline]
pub fn strength(rank: Rank) -> u8 {
    if rank == ACE {
        14
    } else {
        rank
    }
}

/// Suit of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Suit; NUM_SUITS] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Get suit index (0-3).
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get the suit symbol.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    /// Parse a suit from its symbol or letter (`s`, `h`, `d`, `c`).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            's' | '♠' => Some(Suit::Spades),
            'h' | '♥' => Some(Suit::Hearts),
            'd' | '♦' => Some(Suit::Diamonds),
            'c' | '♣' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card.
///
/// Identity is the (rank, suit) pair. Cards are plain values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "CardRepr")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

/// Unchecked wire form of a card, validated on deserialization.
#[derive(Deserialize)]
struct CardRepr {
    rank: Rank,
    suit: Suit,
}

impl TryFrom<CardRepr> for Card {
    type Error = String;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        Card::try_new(repr.rank, repr.suit).ok_or_else(|| format!("rank {} is out of range 1-13", repr.rank))
    }
}

impl Card {
    /// Create a new card from rank (1-13) and suit.
    #[inline]
    pub fn new(rank: Rank, suit: Suit) -> Self {
        debug_assert!((ACE..=KING).contains(&rank), "rank must be 1-13");
        Self { rank, suit }
    }

    /// Create a card, returning `None` if the rank is out of range.
    pub fn try_new(rank: Rank, suit: Suit) -> Option<Self> {
        if (ACE..=KING).contains(&rank) {
            Some(Self { rank, suit })
        } else {
            None
        }
    }

    /// Create a card from its ID (0-51, suit-major).
    #[inline]
    pub fn from_id(id: usize) -> Self {
        debug_assert!(id < NUM_CARDS, "card id must be 0-51");
        Self {
            rank: (id % NUM_RANKS) as Rank + 1,
            suit: Suit::ALL[id / NUM_RANKS],
        }
    }

    /// Parse a card from strings like "As", "A♠", "10h", "Th", "kd".
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        let suit_char = s.chars().last()?;
        let suit = Suit::from_char(suit_char)?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];

        let rank = match rank_part.to_ascii_uppercase().as_str() {
            "A" | "1" => ACE,
            "T" | "10" => TEN,
            "J" => JACK,
            "Q" => QUEEN,
            "K" => KING,
            other => {
                let n: Rank = other.parse().ok()?;
                if !(TWO..=NINE).contains(&n) {
                    return None;
                }
                n
            }
        };

        Some(Self::new(rank, suit))
    }

    /// Get the card's ID (0-51). Matches the canonical full-deck order.
    #[inline]
    pub fn id(&self) -> usize {
        self.suit.index() * NUM_RANKS + (self.rank as usize - 1)
    }

    /// Get the card's raw rank (1-13: A-K).
    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Get the card's suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Raw value used for target sums (Ace = 1).
    #[inline]
    pub fn value(&self) -> u32 {
        self.rank as u32
    }

    /// Comparison strength (Ace = 14).
    #[inline]
    pub fn strength(&self) -> u8 {
        strength(self.rank)
    }

    /// Stable identity key, e.g. `1♠` for the Ace of spades.
    pub fn key(&self) -> String {
        format!("{}{}", self.rank, self.suit.symbol())
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank as usize - 1]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit.symbol())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
