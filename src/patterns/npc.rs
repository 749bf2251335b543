//! Automated opponent hand search.
//!
//! For a target sum the opponent looks up every rank pattern with that sum,
//! keeps the ones the remaining deck can still supply, materializes each one
//! into its strongest concrete hand and plays the best of them.
//!
//! When no pattern is feasible the deck is too depleted to hit the target at
//! all. The opponent then plays five random cards that ignore the sum, which
//! loses the round as invalid but keeps the game moving. This degradation is
//! intentional.

use rand::Rng;
use std::cmp::Ordering;

use super::index::PatternIndex;
use super::materialize::{is_feasible, materialize_best};
use crate::cards::{Card, Deck, Hand, HAND_SIZE};
use crate::eval::{evaluate, score_hand, HandScore};

/// The opponent's choice together with how it was reached.
#[derive(Debug, Clone)]
pub struct OpponentPick {
    /// The hand to submit.
    pub hand: Hand,
    /// Score of the hand, if it has five cards.
    pub score: Option<HandScore>,
    /// Patterns for the target sum the deck could still supply.
    pub feasible_patterns: usize,
    /// Candidates sharing the best score (the pick was drawn among them).
    pub tied_best: usize,
    /// True if no pattern was feasible and the hand ignores the target sum.
    pub fallback: bool,
}

/// Search for the strongest hand hitting `target_sum` from `deck`.
///
/// Ties for the best score are broken uniformly with `rng`, so a fixed seed
/// always yields the same pick.
pub fn choose_opponent_pick<R: Rng + ?Sized>(
    index: &PatternIndex,
    target_sum: u32,
    deck: &Deck,
    rng: &mut R,
) -> OpponentPick {
    let feasible: Vec<_> = index
        .patterns_for(target_sum)
        .iter()
        .filter(|pattern| is_feasible(pattern, deck))
        .collect();

    let mut best: Option<HandScore> = None;
    let mut best_hands: Vec<[Card; HAND_SIZE]> = Vec::new();

    for pattern in &feasible {
        let Some(cards) = materialize_best(pattern, deck) else {
            continue;
        };
        let score = evaluate(&cards);

        match best.as_ref().map(|b| score.cmp(b)) {
            None | Some(Ordering::Greater) => {
                best = Some(score);
                best_hands.clear();
                best_hands.push(cards);
            }
            Some(Ordering::Equal) => best_hands.push(cards),
            Some(Ordering::Less) => {}
        }
    }

    if best_hands.is_empty() {
        log::warn!(
            "no feasible pattern for sum {} in {} remaining cards, playing random cards",
            target_sum,
            deck.len()
        );
        let hand = Hand::new(deck.sample_distinct(HAND_SIZE, rng));
        return OpponentPick {
            score: score_hand(&hand),
            hand,
            feasible_patterns: feasible.len(),
            tied_best: 0,
            fallback: true,
        };
    }

    let tied_best = best_hands.len();
    let cards = best_hands.swap_remove(rng.gen_range(0..tied_best));
    let hand = Hand::from(cards);

    log::debug!(
        "opponent picked {} for sum {} ({} feasible, {} tied)",
        hand,
        target_sum,
        feasible.len(),
        tied_best
    );

    OpponentPick {
        hand,
        score: best,
        feasible_patterns: feasible.len(),
        tied_best,
        fallback: false,
    }
}

/// Search for the strongest hand hitting `target_sum` from `deck`.
pub fn choose_opponent_hand<R: Rng + ?Sized>(index: &PatternIndex, target_sum: u32, deck: &Deck, rng: &mut R) -> Hand {
    choose_opponent_pick(index, target_sum, deck, rng).hand
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::HandCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card(s: &str) -> Card {
        Card::from_str(s).unwrap()
    }

    #[test]
    fn test_wheel_straight_flush_for_fifteen() {
        let index = PatternIndex::shared();
        let deck = Deck::full();
        let pick = choose_opponent_pick(index, 15, &deck, &mut StdRng::seed_from_u64(1));

        assert!(!pick.fallback);
        assert_eq!(pick.hand, Hand::from_str("As 2s 3s 4s 5s").unwrap());
        let score = pick.score.unwrap();
        assert_eq!(score.category, HandCategory::StraightFlush);
        assert_eq!(score.tiebreak, vec![5]);
    }

    #[test]
    fn test_royal_flush_for_forty_seven() {
        let index = PatternIndex::shared();
        let deck = Deck::full().remove_best_effort(&[card("Qs")]);
        let hand = choose_opponent_hand(index, 47, &deck, &mut StdRng::seed_from_u64(1));

        // Spades broken, hearts is next
        assert_eq!(hand.sum(), 47);
        assert_eq!(evaluate(&hand.five().unwrap()).tiebreak, vec![14]);
        assert!(hand.cards().iter().all(|c| c.suit() == crate::cards::Suit::Hearts));
    }

    #[test]
    fn test_quads_outrank_everything_without_straights() {
        let index = PatternIndex::shared();
        let deck = Deck::full();
        let pick = choose_opponent_pick(index, 12, &deck, &mut StdRng::seed_from_u64(9));
        let score = pick.score.unwrap();
        assert_eq!(score.category, HandCategory::FourOfAKind);
        assert_eq!(score.tiebreak, vec![14, 8]);

        // Without all four aces the twos take over
        let deck = deck.remove_best_effort(&[card("Ad")]);
        let pick = choose_opponent_pick(index, 12, &deck, &mut StdRng::seed_from_u64(9));
        assert_eq!(pick.score.unwrap().tiebreak, vec![2, 4]);
    }

    #[test]
    fn test_pick_is_legal_across_sums() {
        let index = PatternIndex::shared();
        let mut rng = StdRng::seed_from_u64(77);
        let deck = Deck::full().shuffled(&mut rng);
        let deck = Deck::from_cards(deck.cards()[..35].to_vec());

        for sum in 6..=64 {
            let pick = choose_opponent_pick(index, sum, &deck, &mut rng);
            assert_eq!(pick.hand.len(), HAND_SIZE);
            assert!(deck.contains_all(pick.hand.cards()));
            assert!(pick.hand.first_duplicate().is_none());
            if !pick.fallback {
                assert_eq!(pick.hand.sum(), sum);
                assert!(pick.tied_best >= 1);
            }
        }
    }

    #[test]
    fn test_fallback_ignores_sum() {
        let index = PatternIndex::shared();
        let deck = Deck::from_cards(vec![card("Ks"), card("Kh"), card("Kd"), card("Kc"), card("Qs"), card("Qh")]);
        let pick = choose_opponent_pick(index, 10, &deck, &mut StdRng::seed_from_u64(4));

        assert!(pick.fallback);
        assert_eq!(pick.feasible_patterns, 0);
        assert_eq!(pick.hand.len(), HAND_SIZE);
        assert!(deck.contains_all(pick.hand.cards()));
        assert_ne!(pick.hand.sum(), 10);

        // Fewer than five cards left: the whole deck is played
        let tiny = Deck::from_cards(vec![card("2s"), card("3s")]);
        let hand = choose_opponent_hand(index, 20, &tiny, &mut StdRng::seed_from_u64(4));
        assert_eq!(hand.cards(), tiny.cards());
    }

    #[test]
    fn test_deterministic_given_seed() {
        let index = PatternIndex::shared();
        let deck = Deck::full().shuffled(&mut StdRng::seed_from_u64(123));
        let deck = deck.remove_best_effort(&deck.cards()[..20].to_vec());

        for sum in [18u32, 27, 36, 44] {
            let a = choose_opponent_hand(index, sum, &deck, &mut StdRng::seed_from_u64(5));
            let b = choose_opponent_hand(index, sum, &deck, &mut StdRng::seed_from_u64(5));
            assert_eq!(a, b);

            // Distinct patterns never score equal, so the seed cannot change the pick
            let c = choose_opponent_pick(index, sum, &deck, &mut StdRng::seed_from_u64(6));
            if !c.fallback {
                assert_eq!(c.tied_best, 1);
                assert_eq!(c.hand, a);
            }
        }
    }
}
