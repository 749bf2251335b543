//! # Air Poker
//!
//! The core of a two-player card game where each side must play five cards
//! whose ranks add up to a dealt target number. Among hands that hit their
//! targets, the stronger poker hand wins. Every card played burns from a
//! shared deck, whether the hand was valid or not.
//!
//! ## Features
//!
//! - **Hand Evaluator**: Exact poker categories with tiebreaks, Ace high or low
//! - **Pattern Index**: All 6175 five-rank shapes, grouped by rank sum
//! - **Opponent Search**: Strongest legal hand for a target against a depleted deck
//! - **Round Resolution**: Busts, invalid hands and burns as pure state transitions
//! - **Reproducible**: Every random choice takes an injected `Rng`
//!
//! ## Quick Start
//!
//! ```
//! use air_poker::engine::{play_round_dealt, GameConfig};
//! use air_poker::patterns::PatternIndex;
//! use air_poker::Hand;
//!
//! let config = GameConfig::default().with_seed(42);
//! let mut rng = config.rng();
//! let state = air_poker::engine::new_game(config.max_rounds, &mut rng).unwrap();
//!
//! let target = state.player_targets[0].clone();
//! let hand = Hand::from_str("As 2s 3s 4s 5s").unwrap();
//! let played = play_round_dealt(&state, PatternIndex::shared(), &target.id, hand, &mut rng);
//! println!("{}", played.result);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Card, deck and hand values
//! - [`eval`]: Hand evaluation and comparison
//! - [`patterns`]: Rank patterns and the automated opponent
//! - [`engine`]: Validation, dealing and round resolution
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Round Resolution (engine)                    │
//! │  - Validate submissions   - Decide winner                       │
//! │  - Burn attempted cards   - Advance immutable state             │
//! └─────────────────────────────────────────────────────────────────┘
//!                   │                               │
//!                   ▼                               ▼
//!         ┌──────────────────┐            ┌──────────────────┐
//!         │ Opponent Search  │───────────►│  Hand Evaluator  │
//!         │    (patterns)    │            │      (eval)      │
//!         └──────────────────┘            └──────────────────┘
//!                   │                               │
//!                   ▼                               ▼
//!         ┌─────────────────────────────────────────────────┐
//!         │              Card / Deck (cards)                │
//!         └─────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

/// Card, deck and hand value types.
pub mod cards;

/// Five-card hand evaluation.
pub mod eval;

/// Rank patterns, feasibility and the automated opponent.
pub mod patterns;

/// Validation, target dealing, state and round resolution.
pub mod engine;

// Re-export commonly used types at crate root for convenience
pub use cards::{Card, Deck, Hand, Suit};
pub use engine::{new_game, resolve_round, validate_submission, GameConfig, GameState, RoundResult, Submission};
pub use eval::{evaluate, HandCategory, HandScore};
pub use patterns::{choose_opponent_hand, PatternIndex};
