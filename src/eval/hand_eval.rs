//! Poker hand evaluation and comparison.
//!
//! This module ranks exactly five cards into one of nine categories plus a
//! tiebreak vector, and orders two such scores. Strengths are used for every
//! tiebreak (Ace = 14) except inside the A-2-3-4-5 straight, which is 5-high.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::cards::{Card, Hand, Rank, ACE, HAND_SIZE, NUM_RANKS, NUM_SUITS};

/// Hand categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandCategory {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

impl HandCategory {
    /// All categories from weakest to strongest.
    pub const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    /// Category rank, 1 (high card) through 9 (straight flush).
    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    /// Stable code, matching the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "high-card",
            HandCategory::OnePair => "one-pair",
            HandCategory::TwoPair => "two-pair",
            HandCategory::ThreeOfAKind => "three-of-a-kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full-house",
            HandCategory::FourOfAKind => "four-of-a-kind",
            HandCategory::StraightFlush => "straight-flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The score of a five-card hand.
///
/// Scores compare by category first, then by `tiebreak` element by element,
/// where a missing trailing element counts as 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandScore {
    /// The hand category.
    pub category: HandCategory,
    /// Strengths to compare within the category, most significant first.
    pub tiebreak: Vec<u8>,
}

impl HandScore {
    fn new(category: HandCategory, tiebreak: Vec<u8>) -> Self {
        Self { category, tiebreak }
    }

    /// Category rank, 1 through 9.
    pub fn category_rank(&self) -> u8 {
        self.category.rank()
    }
}

impl Ord for HandScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category_rank().cmp(&other.category_rank()).then_with(|| {
            let n = self.tiebreak.len().max(other.tiebreak.len());
            (0..n)
                .map(|i| {
                    let a = self.tiebreak.get(i).copied().unwrap_or(0);
                    let b = other.tiebreak.get(i).copied().unwrap_or(0);
                    a.cmp(&b)
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl PartialOrd for HandScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandScore {}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreak)
    }
}

/// High card of the straight formed by `ranks`, if any.
///
/// Requires five distinct raw ranks. A-2-3-4-5 is 5-high, 10-J-Q-K-A is
/// 14-high, and anything else must be numerically consecutive.
pub fn straight_high(ranks: &[Rank]) -> Option<u8> {
    if ranks.len() != HAND_SIZE {
        return None;
    }
    let mut asc = ranks.to_vec();
    asc.sort_unstable();
    if asc.windows(2).any(|w| w[0] == w[1]) {
        return None;
    }

    if asc == [ACE, 2, 3, 4, 5] {
        return Some(5);
    }
    if asc == [ACE, 10, 11, 12, 13] {
        return Some(14);
    }
    if asc.windows(2).all(|w| w[1] == w[0] + 1) {
        return Some(asc[HAND_SIZE - 1]);
    }
    None
}

/// Counts and shape facts derived once per hand.
struct Analysis {
    /// (count, strength) per distinct rank, sorted by count desc then strength desc.
    groups: Vec<(u8, u8)>,
    /// All five strengths, descending.
    strengths_desc: Vec<u8>,
    is_flush: bool,
    straight_high: Option<u8>,
}

impl Analysis {
    fn of(cards: &[Card; HAND_SIZE]) -> Self {
        let mut rank_counts = [0u8; NUM_RANKS + 1];
        let mut suit_counts = [0u8; NUM_SUITS];
        for card in cards {
            rank_counts[card.rank() as usize] += 1;
            suit_counts[card.suit().index()] += 1;
        }

        let mut groups: Vec<(u8, u8)> = rank_counts
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(rank, &n)| (n, crate::cards::strength(rank as Rank)))
            .collect();
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let mut strengths_desc: Vec<u8> = cards.iter().map(Card::strength).collect();
        strengths_desc.sort_unstable_by(|a, b| b.cmp(a));

        let ranks: Vec<Rank> = cards.iter().map(Card::rank).collect();

        Self {
            groups,
            strengths_desc,
            is_flush: suit_counts.iter().any(|&n| n as usize == HAND_SIZE),
            straight_high: straight_high(&ranks),
        }
    }

    fn shape(&self) -> Vec<u8> {
        self.groups.iter().map(|&(n, _)| n).collect()
    }

    /// Strengths of every group after the first, in group order.
    fn kickers(&self) -> impl Iterator<Item = u8> + '_ {
        self.groups.iter().skip(1).map(|&(_, s)| s)
    }
}

/// Evaluate a five-card hand.
///
/// Categories are tried strongest first and the first match wins.
pub fn evaluate(cards: &[Card; HAND_SIZE]) -> HandScore {
    let a = Analysis::of(cards);
    let shape = a.shape();
    let lead = a.groups[0].1;

    // Straight flush
    if let (true, Some(high)) = (a.is_flush, a.straight_high) {
        return HandScore::new(HandCategory::StraightFlush, vec![high]);
    }

    // Four of a kind
    if shape[0] == 4 {
        return HandScore::new(HandCategory::FourOfAKind, std::iter::once(lead).chain(a.kickers()).collect());
    }

    // Full house
    if shape == [3, 2] {
        return HandScore::new(HandCategory::FullHouse, vec![lead, a.groups[1].1]);
    }

    if a.is_flush {
        return HandScore::new(HandCategory::Flush, a.strengths_desc);
    }

    if let Some(high) = a.straight_high {
        return HandScore::new(HandCategory::Straight, vec![high]);
    }

    // Three of a kind
    if shape == [3, 1, 1] {
        return HandScore::new(HandCategory::ThreeOfAKind, std::iter::once(lead).chain(a.kickers()).collect());
    }

    // Two pair: groups are already ordered higher pair, lower pair, kicker
    if shape == [2, 2, 1] {
        return HandScore::new(HandCategory::TwoPair, a.groups.iter().map(|&(_, s)| s).collect());
    }

    // One pair
    if shape == [2, 1, 1, 1] {
        return HandScore::new(HandCategory::OnePair, std::iter::once(lead).chain(a.kickers()).collect());
    }

    HandScore::new(HandCategory::HighCard, a.strengths_desc)
}

/// Score a submitted hand, if it has exactly five cards.
pub fn score_hand(hand: &Hand) -> Option<HandScore> {
    hand.five().map(|cards| evaluate(&cards))
}

/// Compare two scores. `Greater` means `a` wins.
pub fn compare_scores(a: &HandScore, b: &HandScore) -> Ordering {
    a.cmp(b)
}

/// Evaluate and compare two five-card hands. `Greater` means `a` wins.
pub fn compare_hands(a: &[Card; HAND_SIZE], b: &[Card; HAND_SIZE]) -> Ordering {
    compare_scores(&evaluate(a), &evaluate(b))
}
