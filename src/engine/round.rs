//! Round resolution.
//!
//! ```text
//! submissions ──validate──► outcomes ──decide──► winner, reason
//!      │                                              │
//!      └──── union of both hands ──burn──► deck ──────┴──► next state
//! ```
//!
//! Resolution never fails. Any bad submission is folded into the round
//! result as an invalid or busted side.

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::state::{GameState, RoundResult, Side, SideOutcome, WinReason, Winner};
use super::targets::{DealError, PileDealer, TargetDealer};
use super::validate::validate_submission;
use crate::cards::{Card, Hand};
use crate::eval::score_hand;

/// One side's play for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// The target the side claims to hit.
    pub target_sum: u32,
    /// The cards played.
    pub hand: Hand,
}

impl Submission {
    /// Create a submission.
    pub fn new(target_sum: u32, hand: Hand) -> Self {
        Self { target_sum, hand }
    }
}

/// Deal a new game with the default pile dealer.
pub fn new_game<R: Rng + ?Sized>(max_rounds: u32, rng: &mut R) -> Result<GameState, DealError> {
    new_game_with(&PileDealer, max_rounds, rng)
}

/// Deal a new game with `dealer`, rejecting deals that break the contract.
pub fn new_game_with<D, R>(dealer: &D, max_rounds: u32, rng: &mut R) -> Result<GameState, DealError>
where
    D: TargetDealer,
    R: Rng + ?Sized,
{
    let deal = dealer.deal(rng);
    deal.check()?;
    Ok(GameState::new(max_rounds, deal.deck, deal.player, deal.npc))
}

fn judge(state: &GameState, submission: &Submission) -> SideOutcome {
    let validation = validate_submission(&submission.hand, submission.target_sum, &state.deck);
    let category = score_hand(&submission.hand).map(|s| s.category);
    SideOutcome::new(submission.target_sum, validation, category)
}

/// Decide a round from both outcomes. Busts take priority over other
/// invalid hands; only two valid hands are compared by strength.
fn decide(player: &SideOutcome, npc: &SideOutcome, player_hand: &Hand, npc_hand: &Hand) -> (Winner, WinReason) {
    match (player.bust, npc.bust) {
        (true, true) => return (Winner::Tie, WinReason::Tie),
        (true, false) => return (Winner::of(Side::Npc), WinReason::Bust),
        (false, true) => return (Winner::of(Side::Player), WinReason::Bust),
        (false, false) => {}
    }

    match (player.valid, npc.valid) {
        (false, false) => return (Winner::Tie, WinReason::Tie),
        (false, true) => return (Winner::of(Side::Npc), WinReason::Invalid),
        (true, false) => return (Winner::of(Side::Player), WinReason::Invalid),
        (true, true) => {}
    }

    let ordering = match (score_hand(player_hand), score_hand(npc_hand)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    };
    match ordering {
        Ordering::Greater => (Winner::Player, WinReason::HandRank),
        Ordering::Less => (Winner::Npc, WinReason::HandRank),
        Ordering::Equal => (Winner::Tie, WinReason::Tie),
    }
}

/// Every card either side attempted, each identity once, in play order.
fn attempted_cards(player: &Hand, npc: &Hand) -> Vec<Card> {
    let mut seen = FxHashSet::default();
    player
        .cards()
        .iter()
        .chain(npc.cards())
        .copied()
        .filter(|&card| seen.insert(card))
        .collect()
}

/// Resolve one round and return its result together with the next state.
///
/// Both hands burn whether or not they were valid. A card played by both
/// sides burns once; cards already gone are skipped.
pub fn resolve_round(state: &GameState, player: &Submission, npc: &Submission) -> (RoundResult, GameState) {
    let player_outcome = judge(state, player);
    let npc_outcome = judge(state, npc);
    let (winner, win_reason) = decide(&player_outcome, &npc_outcome, &player.hand, &npc.hand);

    let burned = attempted_cards(&player.hand, &npc.hand);
    let deck = state.deck.remove_best_effort(&burned);

    log::debug!(
        "round {}: player {} for {}, npc {} for {} -> {} ({}), {} cards left",
        state.round,
        player.hand,
        player.target_sum,
        npc.hand,
        npc.target_sum,
        winner,
        win_reason,
        deck.len()
    );

    let result = RoundResult {
        round: state.round,
        player: player_outcome,
        npc: npc_outcome,
        winner,
        win_reason,
    };
    let next = state.advance(result.clone(), deck);
    (result, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::engine::targets::{TargetCard, TargetDeal};
    use crate::engine::validate::InvalidReason;
    use crate::eval::HandCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card(s: &str) -> Card {
        Card::from_str(s).unwrap()
    }

    fn hand(s: &str) -> Hand {
        Hand::from_str(s).unwrap()
    }

    fn fresh(deck: Deck) -> GameState {
        GameState::new(5, deck, Vec::new(), Vec::new())
    }

    #[test]
    fn test_new_game() {
        let state = new_game(5, &mut StdRng::seed_from_u64(10)).unwrap();
        assert_eq!(state.round, 1);
        assert_eq!(state.max_rounds, 5);
        assert_eq!(state.deck.len(), 52);
        assert_eq!(state.player_targets.len(), 5);
        assert_eq!(state.npc_targets.len(), 5);
        assert_eq!((state.player_score, state.npc_score), (0, 0));
        assert!(state.history.is_empty());
        assert!(!state.is_game_over());
    }

    struct ShortDealer;

    impl TargetDealer for ShortDealer {
        fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> TargetDeal {
            let mut deal = PileDealer.deal(rng);
            deal.player.truncate(3);
            deal
        }
    }

    #[test]
    fn test_new_game_rejects_bad_deal() {
        let err = new_game_with(&ShortDealer, 5, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, DealError::TargetCount { side: Side::Player, count: 3 });
    }

    #[test]
    fn test_bust_scenario() {
        // Simulate an earlier round that burned 9♦
        let state = fresh(Deck::full().remove_best_effort(&[card("9d")]));

        // Player: wheel straight flush, sum 15, every card still present
        let player = Submission::new(15, hand("As 2s 3s 4s 5s"));
        // Npc reuses the player's A♠ and plays the burnt 9♦: 1 + 9 + 10 + 11 + 12 = 43
        let npc = Submission::new(43, hand("As 9d Th Jh Qh"));

        let (result, next) = resolve_round(&state, &player, &npc);

        assert!(result.player.valid);
        assert_eq!(result.player.hand_category, Some(HandCategory::StraightFlush));
        assert!(result.npc.bust);
        assert_eq!(result.npc.reason, Some(InvalidReason::BurntCard));
        assert_eq!(result.winner, Winner::Player);
        assert_eq!(result.win_reason, WinReason::Bust);

        // Union of both hands burned once: 51 - 5 (player) - 3 (Th Jh Qh) = 43
        assert_eq!(next.deck.len(), 43);
        for c in player.hand.cards().iter().chain(npc.hand.cards()) {
            assert!(!next.deck.contains(*c));
        }
        assert_eq!(next.player_score, 1);
        assert_eq!(next.npc_score, 0);
        assert_eq!(next.round, 2);
        assert_eq!(next.history, vec![result]);

        // The input state is untouched
        assert_eq!(state.deck.len(), 51);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_both_bust_is_tie() {
        let state = fresh(Deck::full().remove_best_effort(&[card("As")]));
        let player = Submission::new(15, hand("As 2s 3s 4s 5s"));
        let npc = Submission::new(15, hand("As 2h 3h 4h 5h"));
        let (result, next) = resolve_round(&state, &player, &npc);
        assert_eq!((result.winner, result.win_reason), (Winner::Tie, WinReason::Tie));
        assert_eq!((next.player_score, next.npc_score), (0, 0));
    }

    #[test]
    fn test_bust_beats_invalid() {
        let state = fresh(Deck::full().remove_best_effort(&[card("Kc")]));
        // Wrong sum but otherwise fine
        let player = Submission::new(20, hand("As 2s 3s 4s 5s"));
        let npc = Submission::new(49, hand("Kc Qc Jc Tc 3h"));
        let (result, _) = resolve_round(&state, &player, &npc);
        assert_eq!(result.player.reason, Some(InvalidReason::SumMismatch));
        assert!(!result.player.bust);
        assert_eq!((result.winner, result.win_reason), (Winner::Player, WinReason::Bust));
    }

    #[test]
    fn test_invalid_loses_to_valid() {
        let state = fresh(Deck::full());
        let player = Submission::new(10, hand("As 2s 3s 4s"));
        let npc = Submission::new(15, hand("Ah 2h 3h 4h 5d"));
        let (result, next) = resolve_round(&state, &player, &npc);

        assert_eq!(result.player.reason, Some(InvalidReason::HandSize));
        assert_eq!(result.player.hand_category, None);
        assert_eq!(result.npc.hand_category, Some(HandCategory::Straight));
        assert_eq!((result.winner, result.win_reason), (Winner::Npc, WinReason::Invalid));
        assert_eq!(next.npc_score, 1);
        // The short hand still burns
        assert_eq!(next.deck.len(), 52 - 4 - 5);
    }

    #[test]
    fn test_both_invalid_is_tie() {
        let state = fresh(Deck::full());
        let player = Submission::new(16, hand("As 2s 3s 4s 5s"));
        let npc = Submission::new(14, hand("Ah Ah 3h 4h 5h"));
        let (result, next) = resolve_round(&state, &player, &npc);
        assert_eq!(result.npc.reason, Some(InvalidReason::DuplicateCard));
        assert_eq!(result.npc.hand_category, Some(HandCategory::Flush));
        assert_eq!((result.winner, result.win_reason), (Winner::Tie, WinReason::Tie));
        // A♥ burns once even though it was played twice
        assert_eq!(next.deck.len(), 52 - 5 - 4);
    }

    #[test]
    fn test_hand_rank_decides_valid_hands() {
        let state = fresh(Deck::full());
        // Full house 7-7-7-2-2 (sum 25) against a flush (3+6+9+11+13 = 42)
        let player = Submission::new(25, hand("7s 7h 7d 2s 2h"));
        let npc = Submission::new(42, hand("3c 6c 9c Jc Kc"));
        let (result, next) = resolve_round(&state, &player, &npc);
        assert_eq!((result.winner, result.win_reason), (Winner::Player, WinReason::HandRank));
        assert_eq!(result.player.hand_category, Some(HandCategory::FullHouse));
        assert_eq!(result.npc.hand_category, Some(HandCategory::Flush));
        assert_eq!(next.deck.len(), 42);
    }

    #[test]
    fn test_equal_hands_tie() {
        let state = fresh(Deck::full());
        let player = Submission::new(40, hand("6s 7h 8d 9c Ts"));
        let npc = Submission::new(40, hand("6h 7d 8c 9s Th"));
        let (result, _) = resolve_round(&state, &player, &npc);
        assert_eq!((result.winner, result.win_reason), (Winner::Tie, WinReason::Tie));
        assert!(result.player.valid && result.npc.valid);
    }

    #[test]
    fn test_overlapping_valid_hands_both_count() {
        // Both sides play A♠ in the same round: both are valid, it burns once
        let state = fresh(Deck::full());
        let player = Submission::new(15, hand("As 2s 3s 4s 5s"));
        let npc = Submission::new(15, hand("As 2h 3h 4h 5h"));
        let (result, next) = resolve_round(&state, &player, &npc);
        assert!(result.player.valid && result.npc.valid);
        assert_eq!((result.winner, result.win_reason), (Winner::Player, WinReason::HandRank));
        assert_eq!(next.deck.len(), 52 - 9);
    }

    #[test]
    fn test_game_runs_to_completion() {
        let mut state = GameState::new(2, Deck::full(), vec![TargetCard::new("S0", 15)], Vec::new());
        let rounds = [
            (hand("As 2s 3s 4s 5s"), hand("Ah 2h 3h 4h 5h")),
            (hand("Ad 2d 3d 4d 5d"), hand("Ac 2c 3c 4c 5c")),
        ];
        for (p, n) in rounds {
            let (_, next) = resolve_round(&state, &Submission::new(15, p), &Submission::new(15, n));
            state = next;
        }
        assert!(state.is_game_over());
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.deck.len(), 32);
        assert_eq!(state.leader(), Winner::Tie);
    }
}
