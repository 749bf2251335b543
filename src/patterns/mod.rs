//! Rank patterns and the automated opponent built on them.
//!
//! ## Modules
//!
//! - `index`: Every five-rank pattern, grouped by rank sum
//! - `materialize`: Feasibility checks and concrete card selection
//! - `npc`: Opponent hand search

pub mod index;
pub mod materialize;
pub mod npc;

pub use index::{pattern_sum, PatternIndex, RankPattern, MAX_SUM, MIN_SUM};
pub use materialize::{is_feasible, materialize_best, materialize_random};
pub use npc::{choose_opponent_hand, choose_opponent_pick, OpponentPick};
