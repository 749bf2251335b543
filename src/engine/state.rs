//! Game state and round records.
//!
//! States are values. Every transition builds a new `GameState` from the
//! previous one plus the round's deltas; the previous state, including its
//! history, is never touched.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::targets::TargetCard;
use super::validate::{InvalidReason, Rejection};
use crate::cards::Deck;
use crate::eval::HandCategory;

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    /// The human side.
    Player,
    /// The automated side.
    Npc,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Npc => write!(f, "npc"),
        }
    }
}

/// Who took a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Winner {
    /// The human side took the round.
    Player,
    /// The automated side took the round.
    Npc,
    /// Nobody scored.
    Tie,
}

impl Winner {
    /// The winning side, or `None` on a tie.
    pub fn side(&self) -> Option<Side> {
        match self {
            Winner::Player => Some(Side::Player),
            Winner::Npc => Some(Side::Npc),
            Winner::Tie => None,
        }
    }

    pub(crate) fn of(side: Side) -> Self {
        match side {
            Side::Player => Winner::Player,
            Side::Npc => Winner::Npc,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side() {
            Some(side) => write!(f, "{}", side),
            None => write!(f, "tie"),
        }
    }
}

/// Which rule decided a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinReason {
    /// The loser played a burnt card.
    Bust,
    /// The loser's hand broke another rule.
    Invalid,
    /// Both hands were valid and the stronger one won.
    HandRank,
    /// Nobody won.
    Tie,
}

impl WinReason {
    /// Stable code, matching the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            WinReason::Bust => "bust",
            WinReason::Invalid => "invalid",
            WinReason::HandRank => "hand-rank",
            WinReason::Tie => "tie",
        }
    }
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How one side's submission fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideOutcome {
    /// The target the side claimed.
    pub target_sum: u32,
    /// Passed every validation rule.
    pub valid: bool,
    /// Failed because of a burnt card.
    pub bust: bool,
    /// Failing rule, if any.
    pub reason: Option<InvalidReason>,
    /// Message for the failing rule, if any.
    pub message: Option<String>,
    /// Category of the hand, reported whenever it had five cards.
    pub hand_category: Option<HandCategory>,
}

impl SideOutcome {
    /// Build an outcome from a validation result.
    pub fn new(target_sum: u32, validation: Result<(), Rejection>, hand_category: Option<HandCategory>) -> Self {
        match validation {
            Ok(()) => Self {
                target_sum,
                valid: true,
                bust: false,
                reason: None,
                message: None,
                hand_category,
            },
            Err(rejection) => Self {
                target_sum,
                valid: false,
                bust: rejection.reason.is_bust(),
                reason: Some(rejection.reason),
                message: Some(rejection.message),
                hand_category,
            },
        }
    }
}

/// Record of one resolved round. Never changed once appended to history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number, starting at 1.
    pub round: u32,
    /// The human side's outcome.
    pub player: SideOutcome,
    /// The automated side's outcome.
    pub npc: SideOutcome,
    /// Who took the round.
    pub winner: Winner,
    /// The rule that decided it.
    pub win_reason: WinReason,
}

impl RoundResult {
    /// Outcome for the given side.
    pub fn outcome(&self, side: Side) -> &SideOutcome {
        match side {
            Side::Player => &self.player,
            Side::Npc => &self.npc,
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round {}: {} ({})", self.round, self.winner, self.win_reason)
    }
}

/// A snapshot of a game between rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Next round to play, starting at 1.
    pub round: u32,
    /// Rounds in a full game.
    pub max_rounds: u32,
    /// The shared play deck, shrinking as cards burn.
    pub deck: Deck,
    /// Rounds won by the human side.
    pub player_score: u32,
    /// Rounds won by the automated side.
    pub npc_score: u32,
    /// Targets the human side has not used yet.
    pub player_targets: Vec<TargetCard>,
    /// Targets the automated side has not used yet.
    pub npc_targets: Vec<TargetCard>,
    /// Resolved rounds, oldest first.
    pub history: Vec<RoundResult>,
}

impl GameState {
    /// A fresh game at round 1 with zero scores.
    pub fn new(max_rounds: u32, deck: Deck, player_targets: Vec<TargetCard>, npc_targets: Vec<TargetCard>) -> Self {
        Self {
            round: 1,
            max_rounds,
            deck,
            player_score: 0,
            npc_score: 0,
            player_targets,
            npc_targets,
            history: Vec::new(),
        }
    }

    /// True once every round has been played. Resolution does not enforce this.
    pub fn is_game_over(&self) -> bool {
        self.round > self.max_rounds
    }

    /// Score of the given side.
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Npc => self.npc_score,
        }
    }

    /// Target pool of the given side.
    pub fn targets(&self, side: Side) -> &[TargetCard] {
        match side {
            Side::Player => &self.player_targets,
            Side::Npc => &self.npc_targets,
        }
    }

    /// The side ahead on points, or `Winner::Tie` when level.
    pub fn leader(&self) -> Winner {
        match self.player_score.cmp(&self.npc_score) {
            std::cmp::Ordering::Greater => Winner::Player,
            std::cmp::Ordering::Less => Winner::Npc,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }

    /// The state after `result`: new deck, score credited, history extended
    /// and round advanced. History is copied, not shared.
    pub fn advance(&self, result: RoundResult, deck: Deck) -> Self {
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend(self.history.iter().cloned());
        let (player_score, npc_score) = match result.winner {
            Winner::Player => (self.player_score + 1, self.npc_score),
            Winner::Npc => (self.player_score, self.npc_score + 1),
            Winner::Tie => (self.player_score, self.npc_score),
        };
        history.push(result);

        Self {
            round: self.round + 1,
            max_rounds: self.max_rounds,
            deck,
            player_score,
            npc_score,
            player_targets: self.player_targets.clone(),
            npc_targets: self.npc_targets.clone(),
            history,
        }
    }

    /// The same state with both target pools replaced.
    pub fn with_targets(&self, player_targets: Vec<TargetCard>, npc_targets: Vec<TargetCard>) -> Self {
        Self {
            player_targets,
            npc_targets,
            ..self.clone()
        }
    }
}
