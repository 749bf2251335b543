//! The shared play deck and its multiset operations.
//!
//! A `Deck` is an ordered list of cards treated as a multiset. Order only keeps
//! removal stable and reproducible; it carries no game meaning. Every operation
//! returns a new deck and leaves the receiver untouched.
//!
//! Requested card lists may contain the same identity more than once. Each
//! request consumes one copy, so asking twice for a card held once leaves one
//! request unsatisfied.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::{Card, Rank, Suit, ACE, KING, NUM_CARDS, NUM_RANKS};

/// Per-identity card counts, indexed by `Card::id()`.
type Counts = [u32; NUM_CARDS];

fn counts_of(cards: &[Card]) -> Counts {
    let mut counts = [0u32; NUM_CARDS];
    for card in cards {
        counts[card.id()] += 1;
    }
    counts
}

/// An ordered collection of cards with multiset semantics.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a full 52-card deck in canonical order (suit-major, Ace to King).
    pub fn full() -> Self {
        let mut cards = Vec::with_capacity(NUM_CARDS);
        for suit in Suit::ALL {
            for rank in ACE..=KING {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Create a deck from an explicit card list, keeping its order.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Get the cards in deck order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over the cards in deck order.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Number of cards left.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no cards are left.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if the deck holds at least one copy of `card`.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Return a uniformly shuffled copy (Fisher-Yates).
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut cards = self.cards.clone();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Remove each requested card exactly once.
    ///
    /// Returns `None` if any request cannot be satisfied.
    pub fn remove_exact(&self, wanted: &[Card]) -> Option<Self> {
        let mut counts = counts_of(&self.cards);
        for card in wanted {
            let n = &mut counts[card.id()];
            if *n == 0 {
                return None;
            }
            *n -= 1;
        }
        Some(self.rebuild(counts))
    }

    /// Remove each requested card once if present, skipping the rest.
    pub fn remove_best_effort(&self, wanted: &[Card]) -> Self {
        let mut counts = counts_of(&self.cards);
        for card in wanted {
            let n = &mut counts[card.id()];
            *n = n.saturating_sub(1);
        }
        self.rebuild(counts)
    }

    /// True iff `remove_exact(wanted)` would succeed.
    pub fn contains_all(&self, wanted: &[Card]) -> bool {
        self.first_missing(wanted).is_none()
    }

    /// The first requested card the deck cannot supply, counting repeats.
    pub fn first_missing(&self, wanted: &[Card]) -> Option<Card> {
        let mut counts = counts_of(&self.cards);
        wanted.iter().copied().find(|card| {
            let n = &mut counts[card.id()];
            if *n == 0 {
                true
            } else {
                *n -= 1;
                false
            }
        })
    }

    /// Pick `n` distinct positions uniformly without replacement (partial Fisher-Yates).
    ///
    /// Returns the whole deck when `n` is at least its size.
    pub fn sample_distinct<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Card> {
        if n >= self.cards.len() {
            return self.cards.clone();
        }
        let mut cards = self.cards.clone();
        for i in 0..n {
            let j = rng.gen_range(i..cards.len());
            cards.swap(i, j);
        }
        cards.truncate(n);
        cards
    }

    /// Number of cards of the given rank.
    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank() == rank).count()
    }

    /// Cards per raw rank, indexed by rank (index 0 unused).
    pub fn rank_counts(&self) -> [usize; NUM_RANKS + 1] {
        let mut counts = [0usize; NUM_RANKS + 1];
        for card in &self.cards {
            counts[card.rank() as usize] += 1;
        }
        counts
    }

    /// Identity -> count map, for spotting duplicates or unexpected burns.
    pub fn histogram(&self) -> FxHashMap<Card, usize> {
        let mut map = FxHashMap::default();
        for &card in &self.cards {
            *map.entry(card).or_insert(0) += 1;
        }
        map
    }

    /// Keep cards in original order while spending the remaining counts.
    fn rebuild(&self, mut counts: Counts) -> Self {
        let mut cards = Vec::with_capacity(self.cards.len());
        for &card in &self.cards {
            let n = &mut counts[card.id()];
            if *n > 0 {
                cards.push(card);
                *n -= 1;
            }
        }
        Self { cards }
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.len())
    }
}
