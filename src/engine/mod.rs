//! Game flow: validation, dealing, round resolution and configuration.
//!
//! ## Modules
//!
//! - `validate`: Submission rules and rejection reasons
//! - `targets`: Target cards and the pile dealer
//! - `state`: Game state and round records
//! - `round`: Round resolution and new games
//! - `play`: Rounds against the automated side
//! - `config`: JSON game configuration

pub mod config;
pub mod play;
pub mod round;
pub mod state;
pub mod targets;
pub mod validate;

pub use config::{ConfigError, GameConfig};
pub use play::{play_round_dealt, play_round_vs_npc, PlayedRound};
pub use round::{new_game, new_game_with, resolve_round, Submission};
pub use state::{GameState, RoundResult, Side, SideOutcome, WinReason, Winner};
pub use targets::{
    pick_random_target, remove_target_by_id, DealError, PileDealer, TargetCard, TargetDeal, TargetDealer,
    TARGETS_PER_SIDE,
};
pub use validate::{validate_against_deck, validate_submission, InvalidReason, Rejection};
