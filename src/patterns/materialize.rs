//! Pattern feasibility and materialization.
//!
//! Turns an abstract rank pattern into five concrete cards drawn from the
//! remaining deck, either at random or deterministically with a preference for
//! single-suit (flush / straight flush) shapes.

use rand::seq::SliceRandom;
use rand::Rng;

use super::index::RankPattern;
use crate::cards::{Card, Deck, Rank, Suit, ACE, HAND_SIZE, KING, NUM_CARDS, NUM_RANKS};

/// Required cards per raw rank, indexed by rank (index 0 unused).
fn need_counts(pattern: &RankPattern) -> [usize; NUM_RANKS + 1] {
    let mut need = [0usize; NUM_RANKS + 1];
    for &rank in pattern {
        need[rank as usize] += 1;
    }
    need
}

/// Distinct ranks of a pattern with their multiplicities, ascending by rank.
fn requirements(pattern: &RankPattern) -> impl Iterator<Item = (Rank, usize)> {
    let need = need_counts(pattern);
    (ACE..=KING).map(move |r| (r, need[r as usize])).filter(|&(_, n)| n > 0)
}

fn into_five(cards: Vec<Card>) -> Option<[Card; HAND_SIZE]> {
    cards.try_into().ok()
}

/// Check whether the deck holds enough cards of every rank the pattern needs.
pub fn is_feasible(pattern: &RankPattern, deck: &Deck) -> bool {
    let have = deck.rank_counts();
    need_counts(pattern).iter().zip(have.iter()).all(|(need, have)| need <= have)
}

/// Draw the pattern's cards at random: for each rank, shuffle the deck's cards
/// of that rank and take as many as needed.
pub fn materialize_random<R: Rng + ?Sized>(pattern: &RankPattern, deck: &Deck, rng: &mut R) -> Option<[Card; HAND_SIZE]> {
    if !is_feasible(pattern, deck) {
        return None;
    }

    let mut chosen = Vec::with_capacity(HAND_SIZE);
    for (rank, n) in requirements(pattern) {
        let mut options: Vec<Card> = deck.iter().filter(|c| c.rank() == rank).copied().collect();
        options.shuffle(rng);
        chosen.extend(options.into_iter().take(n));
    }
    into_five(chosen)
}

/// Deterministically draw the strongest card set for the pattern.
///
/// Paired shapes cannot gain from suits, so the first cards of each rank in
/// deck order are taken. With five distinct ranks every suit is tried in turn
/// for a complete single-suit set, which is a straight flush when the ranks run
/// and a flush otherwise. Failing that, the first card of each rank is used.
pub fn materialize_best(pattern: &RankPattern, deck: &Deck) -> Option<[Card; HAND_SIZE]> {
    if !is_feasible(pattern, deck) {
        return None;
    }

    let paired = requirements(pattern).any(|(_, n)| n > 1);
    if paired {
        let mut chosen = Vec::with_capacity(HAND_SIZE);
        for (rank, n) in requirements(pattern) {
            chosen.extend(deck.iter().filter(|c| c.rank() == rank).take(n).copied());
        }
        return into_five(chosen);
    }

    if let Some(cards) = single_suit(pattern, deck) {
        return Some(cards);
    }

    let first_per_rank = pattern
        .iter()
        .map(|&rank| deck.iter().find(|c| c.rank() == rank).copied())
        .collect::<Option<Vec<Card>>>()?;
    into_five(first_per_rank)
}

/// The first suit (in canonical order) holding every rank of the pattern.
fn single_suit(pattern: &RankPattern, deck: &Deck) -> Option<[Card; HAND_SIZE]> {
    let mut present = [false; NUM_CARDS];
    for card in deck {
        present[card.id()] = true;
    }

    Suit::ALL.iter().find_map(|&suit| {
        let cards = pattern
            .iter()
            .map(|&rank| Card::new(rank, suit))
            .filter(|card| present[card.id()])
            .collect::<Vec<Card>>();
        into_five(cards)
    })
}
