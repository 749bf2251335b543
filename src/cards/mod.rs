//! Card, deck and hand value types.
//!
//! ## Modules
//!
//! - `card`: Card, suit and rank representations
//! - `deck`: The shared play deck and its multiset operations
//! - `hand`: Submitted hands

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{strength, Card, Rank, Suit, ACE, KING, NUM_CARDS, NUM_RANKS, NUM_SUITS};
pub use deck::Deck;
pub use hand::{Hand, HAND_SIZE};
