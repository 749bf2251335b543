//! Hand evaluation.
//!
//! - `hand_eval`: Five-card categorization, tiebreaks and comparison

pub mod hand_eval;

pub use hand_eval::{compare_hands, compare_scores, evaluate, score_hand, straight_high, HandCategory, HandScore};
