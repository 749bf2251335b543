//! Submission validation.
//!
//! Rules are checked in a fixed order and the first failure is reported:
//! hand size, duplicate cards, sum mismatch, burnt cards. Validation never
//! mutates anything, so it doubles as pre-submission feedback for callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{Deck, Hand, HAND_SIZE};

/// Why a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    /// Not exactly five cards.
    HandSize,
    /// The same card appears more than once.
    DuplicateCard,
    /// Rank sum differs from the chosen target.
    SumMismatch,
    /// A card is no longer in the shared deck.
    BurntCard,
}

impl InvalidReason {
    /// Stable code, matching the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            InvalidReason::HandSize => "hand-size",
            InvalidReason::DuplicateCard => "duplicate-card",
            InvalidReason::SumMismatch => "sum-mismatch",
            InvalidReason::BurntCard => "burnt-card",
        }
    }

    /// Burnt cards bust the round; every other reason is a plain invalid hand.
    pub fn is_bust(&self) -> bool {
        matches!(self, InvalidReason::BurntCard)
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A failed validation: the reason code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Machine-readable reason.
    pub reason: InvalidReason,
    /// Message suitable for display.
    pub message: String,
}

impl Rejection {
    fn new(reason: InvalidReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.reason)
    }
}

impl std::error::Error for Rejection {}

fn check_basics(hand: &Hand) -> Result<(), Rejection> {
    if hand.len() != HAND_SIZE {
        return Err(Rejection::new(
            InvalidReason::HandSize,
            format!("Hand must contain exactly {} cards, got {}", HAND_SIZE, hand.len()),
        ));
    }
    if let Some(card) = hand.first_duplicate() {
        return Err(Rejection::new(
            InvalidReason::DuplicateCard,
            format!("Duplicate card detected: {}", card),
        ));
    }
    Ok(())
}

fn check_available(hand: &Hand, deck: &Deck) -> Result<(), Rejection> {
    match deck.first_missing(hand.cards()) {
        Some(card) => Err(Rejection::new(
            InvalidReason::BurntCard,
            format!("Your hand contains a burnt card: {}", card),
        )),
        None => Ok(()),
    }
}

/// Validate a hand for a target sum against the current shared deck.
pub fn validate_submission(hand: &Hand, target_sum: u32, deck: &Deck) -> Result<(), Rejection> {
    check_basics(hand)?;

    let sum = hand.sum();
    if sum != target_sum {
        return Err(Rejection::new(
            InvalidReason::SumMismatch,
            format!("Your hand adds up to {} but the target is {}", sum, target_sum),
        ));
    }

    check_available(hand, deck)
}

/// Validate size, duplicates and availability only, ignoring any target.
pub fn validate_against_deck(hand: &Hand, deck: &Deck) -> Result<(), Rejection> {
    check_basics(hand)?;
    check_available(hand, deck)
}
