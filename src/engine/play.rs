//! Round drivers for a human side playing against the automated side.

use rand::Rng;

use super::round::{resolve_round, Submission};
use super::state::{GameState, RoundResult};
use super::targets::{pick_random_target, remove_target_by_id, TargetCard};
use crate::cards::Hand;
use crate::patterns::{choose_opponent_pick, OpponentPick, PatternIndex};

/// Everything one driven round produced.
#[derive(Debug, Clone)]
pub struct PlayedRound {
    /// The resolved round.
    pub result: RoundResult,
    /// State after the round.
    pub next_state: GameState,
    /// The automated side's hand and how it was chosen.
    pub npc_pick: OpponentPick,
    /// Target the player played for.
    pub player_target_sum: u32,
    /// Target the automated side played for.
    pub npc_target_sum: u32,
}

impl PlayedRound {
    /// The hand the automated side played.
    pub fn npc_hand(&self) -> &Hand {
        &self.npc_pick.hand
    }
}

/// Let the automated side search for its hand, then resolve the round.
///
/// Target pools are left as they are; see [`play_round_dealt`] for the
/// variant that consumes targets.
pub fn play_round_vs_npc<R: Rng + ?Sized>(
    state: &GameState,
    index: &PatternIndex,
    player_target_sum: u32,
    player_hand: Hand,
    npc_target_sum: u32,
    rng: &mut R,
) -> PlayedRound {
    let npc_pick = choose_opponent_pick(index, npc_target_sum, &state.deck, rng);
    let player = Submission::new(player_target_sum, player_hand);
    let npc = Submission::new(npc_target_sum, npc_pick.hand.clone());
    let (result, next_state) = resolve_round(state, &player, &npc);

    PlayedRound {
        result,
        next_state,
        npc_pick,
        player_target_sum,
        npc_target_sum,
    }
}

/// Play a round from the dealt target pools and consume the targets used.
///
/// The player's target is looked up by id, falling back to the first one
/// left. The automated side draws a random target from its own pool. A side
/// with an empty pool plays for 0.
pub fn play_round_dealt<R: Rng + ?Sized>(
    state: &GameState,
    index: &PatternIndex,
    player_target_id: &str,
    player_hand: Hand,
    rng: &mut R,
) -> PlayedRound {
    let player_target: Option<TargetCard> = state
        .player_targets
        .iter()
        .find(|t| t.id == player_target_id)
        .or_else(|| state.player_targets.first())
        .cloned();
    let npc_target: Option<TargetCard> = pick_random_target(&state.npc_targets, rng).cloned();

    let player_sum = player_target.as_ref().map_or(0, |t| t.sum);
    let npc_sum = npc_target.as_ref().map_or(0, |t| t.sum);

    let mut played = play_round_vs_npc(state, index, player_sum, player_hand, npc_sum, rng);

    let player_targets = match &player_target {
        Some(t) => remove_target_by_id(&state.player_targets, &t.id),
        None => state.player_targets.clone(),
    };
    let npc_targets = match &npc_target {
        Some(t) => remove_target_by_id(&state.npc_targets, &t.id),
        None => state.npc_targets.clone(),
    };
    played.next_state = played.next_state.with_targets(player_targets, npc_targets);
    played
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::engine::round::new_game;
    use crate::engine::state::{WinReason, Winner};
    use crate::eval::HandCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hand(s: &str) -> Hand {
        Hand::from_str(s).unwrap()
    }

    #[test]
    fn test_play_vs_npc() {
        let index = PatternIndex::shared();
        let state = GameState::new(5, Deck::full(), Vec::new(), Vec::new());
        let mut rng = StdRng::seed_from_u64(1);

        // Player plays a plain straight; the npc finds the wheel straight flush
        let played = play_round_vs_npc(&state, index, 15, hand("Ah 2d 3c 4h 5d"), 15, &mut rng);
        assert_eq!(played.npc_hand(), &hand("As 2s 3s 4s 5s"));
        assert_eq!(played.result.npc.hand_category, Some(HandCategory::StraightFlush));
        assert_eq!((played.result.winner, played.result.win_reason), (Winner::Npc, WinReason::HandRank));
        assert_eq!(played.next_state.deck.len(), 42);
        assert_eq!(played.next_state.npc_score, 1);
    }

    #[test]
    fn test_npc_avoids_burnt_cards() {
        let index = PatternIndex::shared();
        let mut state = GameState::new(5, Deck::full(), Vec::new(), Vec::new());
        let mut rng = StdRng::seed_from_u64(2);

        for sum in [30u32, 25, 40, 20] {
            let before = state.deck.clone();
            let played = play_round_vs_npc(&state, index, 99, hand("As Ah Ad Ac Ks"), sum, &mut rng);
            if !played.npc_pick.fallback {
                assert!(played.result.npc.valid);
                assert!(before.contains_all(played.npc_hand().cards()));
            }
            state = played.next_state;
        }
        assert_eq!(state.history.len(), 4);
    }

    #[test]
    fn test_dealt_round_consumes_targets() {
        let mut rng = StdRng::seed_from_u64(12);
        let index = PatternIndex::shared();
        let state = new_game(5, &mut rng).unwrap();
        let chosen = state.player_targets[2].clone();

        let played = play_round_dealt(&state, index, &chosen.id, hand("As 2s 3s 4s 5s"), &mut rng);

        assert_eq!(played.player_target_sum, chosen.sum);
        assert_eq!(played.result.player.target_sum, chosen.sum);
        assert!(state.npc_targets.iter().any(|t| t.sum == played.npc_target_sum));

        let next = &played.next_state;
        assert_eq!(next.player_targets.len(), 4);
        assert_eq!(next.npc_targets.len(), 4);
        assert!(next.player_targets.iter().all(|t| t.id != chosen.id));
        assert_eq!(next.round, 2);

        // The previous state keeps its pools
        assert_eq!(state.player_targets.len(), 5);
        assert_eq!(state.npc_targets.len(), 5);
    }

    #[test]
    fn test_unknown_target_id_uses_first() {
        let mut rng = StdRng::seed_from_u64(3);
        let index = PatternIndex::shared();
        let state = new_game(5, &mut rng).unwrap();
        let first = state.player_targets[0].clone();

        let played = play_round_dealt(&state, index, "nope", hand("As 2s 3s 4s 5s"), &mut rng);
        assert_eq!(played.player_target_sum, first.sum);
        assert!(played.next_state.player_targets.iter().all(|t| t.id != first.id));
    }

    #[test]
    fn test_empty_pools_play_for_zero() {
        let index = PatternIndex::shared();
        let state = GameState::new(5, Deck::full(), Vec::new(), Vec::new());
        let played = play_round_dealt(&state, index, "S0", hand("As 2s 3s 4s 5s"), &mut StdRng::seed_from_u64(4));

        assert_eq!(played.player_target_sum, 0);
        assert_eq!(played.npc_target_sum, 0);
        assert!(played.npc_pick.fallback);
        // Neither side can hit 0
        assert_eq!((played.result.winner, played.result.win_reason), (Winner::Tie, WinReason::Tie));
    }

    #[test]
    fn test_full_dealt_game() {
        let mut rng = StdRng::seed_from_u64(2024);
        let index = PatternIndex::shared();
        let mut state = new_game(5, &mut rng).unwrap();

        while !state.is_game_over() {
            let target = state.player_targets[0].clone();
            let player_hand = crate::patterns::choose_opponent_hand(index, target.sum, &state.deck, &mut rng);
            state = play_round_dealt(&state, index, &target.id, player_hand, &mut rng).next_state;
        }

        assert_eq!(state.history.len(), 5);
        assert!(state.player_targets.is_empty());
        assert!(state.npc_targets.is_empty());
        assert!(state.player_score + state.npc_score <= 5);
    }
}
