//! Target ("metal") cards and how they are dealt.
//!
//! Each side receives five target cards. A target card shows a number; to
//! score with it a side must play five cards whose raw ranks add up to that
//! number. Targets are produced by a `TargetDealer`. The default
//! `PileDealer` derives them from a separate 52-card deck:
//!
//! ```text
//! target deck (shuffled, 52)
//! ├── 2 cards set aside
//! └── 50 cards → 10 piles of 5 → 10 targets (pile rank sums, ids S0..S9)
//!                                 └── shuffled: 5 to the player (sorted by sum), 5 to the npc
//! play deck (independent, shuffled, 52)
//! ```

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::Side;
use crate::cards::{Card, Deck, HAND_SIZE, NUM_CARDS};

/// Target cards dealt to each side.
pub const TARGETS_PER_SIDE: usize = 5;

/// Cards set aside from the target deck before making piles.
const SET_ASIDE: usize = 2;

/// A target a side may choose for one round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetCard {
    /// Stable identifier, distinguishes targets with equal sums.
    pub id: String,
    /// The number that must be matched.
    pub sum: u32,
}

impl TargetCard {
    /// Create a target card.
    pub fn new(id: impl Into<String>, sum: u32) -> Self {
        Self { id: id.into(), sum }
    }
}

impl fmt::Display for TargetCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.sum)
    }
}

/// Everything a deal produces: both target pools and the play deck.
#[derive(Debug, Clone)]
pub struct TargetDeal {
    /// The shuffled play deck for the game.
    pub deck: Deck,
    /// Target-deck cards left out of every pile.
    pub set_aside: Vec<Card>,
    /// The piles the targets were summed from.
    pub piles: Vec<Vec<Card>>,
    /// The player's targets.
    pub player: Vec<TargetCard>,
    /// The automated side's targets.
    pub npc: Vec<TargetCard>,
}

impl TargetDeal {
    /// Check the deal contract: five targets per side with unique ids, and a
    /// full play deck of 52 distinct cards.
    pub fn check(&self) -> Result<(), DealError> {
        for (side, pool) in [(Side::Player, &self.player), (Side::Npc, &self.npc)] {
            if pool.len() != TARGETS_PER_SIDE {
                return Err(DealError::TargetCount { side, count: pool.len() });
            }
            let mut ids = FxHashSet::default();
            if let Some(dup) = pool.iter().find(|t| !ids.insert(t.id.as_str())) {
                return Err(DealError::DuplicateTargetId { side, id: dup.id.clone() });
            }
        }

        if self.deck.len() != NUM_CARDS {
            return Err(DealError::DeckSize(self.deck.len()));
        }
        if let Some((&card, _)) = self.deck.histogram().iter().find(|&(_, &n)| n > 1) {
            return Err(DealError::DuplicateDeckCard(card));
        }
        Ok(())
    }
}

/// Produces the target pools and play deck for a new game.
pub trait TargetDealer {
    /// Deal a new game.
    fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> TargetDeal;
}

/// Deals targets from piles of an independent shuffled deck.
#[derive(Debug, Clone, Copy, Default)]
pub struct PileDealer;

impl TargetDealer for PileDealer {
    fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> TargetDeal {
        let target_deck = Deck::full().shuffled(rng);
        let (set_aside, rest) = target_deck.cards().split_at(SET_ASIDE);
        let piles: Vec<Vec<Card>> = rest.chunks(HAND_SIZE).map(<[Card]>::to_vec).collect();

        let mut targets: Vec<TargetCard> = piles
            .iter()
            .enumerate()
            .map(|(i, pile)| TargetCard::new(format!("S{}", i), pile.iter().map(Card::value).sum()))
            .collect();
        targets.shuffle(rng);

        let npc = targets.split_off(TARGETS_PER_SIDE);
        let mut player = targets;
        player.sort_by_key(|t| t.sum);

        // The play deck is independent of the target deck
        let deck = Deck::full().shuffled(rng);

        TargetDeal {
            deck,
            set_aside: set_aside.to_vec(),
            piles,
            player,
            npc,
        }
    }
}

/// A copy of `pool` without the target with `id`. Unchanged if absent.
pub fn remove_target_by_id(pool: &[TargetCard], id: &str) -> Vec<TargetCard> {
    let mut next = pool.to_vec();
    if let Some(i) = next.iter().position(|t| t.id == id) {
        next.remove(i);
    }
    next
}

/// A uniformly random target from `pool`, or `None` if it is empty.
pub fn pick_random_target<'a, R: Rng + ?Sized>(pool: &'a [TargetCard], rng: &mut R) -> Option<&'a TargetCard> {
    if pool.is_empty() {
        return None;
    }
    pool.get(rng.gen_range(0..pool.len()))
}

/// A deal that breaks the dealing contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    /// A side did not receive exactly five targets.
    TargetCount { side: Side, count: usize },
    /// A side holds two targets with the same id.
    DuplicateTargetId { side: Side, id: String },
    /// The play deck does not hold 52 cards.
    DeckSize(usize),
    /// The play deck holds a card more than once.
    DuplicateDeckCard(Card),
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::TargetCount { side, count } => {
                write!(f, "{} was dealt {} targets, expected {}", side, count, TARGETS_PER_SIDE)
            }
            DealError::DuplicateTargetId { side, id } => {
                write!(f, "{} holds target id {} more than once", side, id)
            }
            DealError::DeckSize(n) => write!(f, "play deck has {} cards, expected {}", n, NUM_CARDS),
            DealError::DuplicateDeckCard(card) => write!(f, "play deck holds {} more than once", card),
        }
    }
}

impl std::error::Error for DealError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pile_deal_shape() {
        let deal = PileDealer.deal(&mut StdRng::seed_from_u64(8));
        assert!(deal.check().is_ok());
        assert_eq!(deal.set_aside.len(), 2);
        assert_eq!(deal.piles.len(), 10);
        assert!(deal.piles.iter().all(|p| p.len() == 5));

        // Every target is the sum of its pile
        let all: Vec<&TargetCard> = deal.player.iter().chain(deal.npc.iter()).collect();
        for target in &all {
            let i: usize = target.id[1..].parse().unwrap();
            let pile_sum: u32 = deal.piles[i].iter().map(Card::value).sum();
            assert_eq!(target.sum, pile_sum);
        }

        // All ranks of the target deck are accounted for (4 * (1 + ... + 13) = 364)
        let aside: u32 = deal.set_aside.iter().map(Card::value).sum();
        let targets: u32 = all.iter().map(|t| t.sum).sum();
        assert_eq!(aside + targets, 364);
    }

    #[test]
    fn test_player_targets_sorted() {
        let deal = PileDealer.deal(&mut StdRng::seed_from_u64(21));
        assert!(deal.player.windows(2).all(|w| w[0].sum <= w[1].sum));
    }

    #[test]
    fn test_deal_is_reproducible() {
        let a = PileDealer.deal(&mut StdRng::seed_from_u64(3));
        let b = PileDealer.deal(&mut StdRng::seed_from_u64(3));
        assert_eq!(a.deck, b.deck);
        assert_eq!(a.player, b.player);
        assert_eq!(a.npc, b.npc);
    }

    #[test]
    fn test_contract_violations() {
        let mut deal = PileDealer.deal(&mut StdRng::seed_from_u64(1));
        deal.npc.pop();
        assert_eq!(deal.check(), Err(DealError::TargetCount { side: Side::Npc, count: 4 }));

        let mut deal = PileDealer.deal(&mut StdRng::seed_from_u64(1));
        deal.player[1].id = deal.player[0].id.clone();
        assert!(matches!(deal.check(), Err(DealError::DuplicateTargetId { side: Side::Player, .. })));

        let mut deal = PileDealer.deal(&mut StdRng::seed_from_u64(1));
        let first = deal.deck.cards()[0];
        let mut cards = deal.deck.cards().to_vec();
        cards[1] = first;
        deal.deck = Deck::from_cards(cards);
        assert_eq!(deal.check(), Err(DealError::DuplicateDeckCard(first)));

        let mut deal = PileDealer.deal(&mut StdRng::seed_from_u64(1));
        deal.deck = Deck::full().remove_best_effort(&[first]);
        assert_eq!(deal.check(), Err(DealError::DeckSize(51)));
    }

    #[test]
    fn test_remove_target_by_id() {
        let pool = vec![TargetCard::new("S1", 20), TargetCard::new("S2", 20), TargetCard::new("S3", 31)];
        let next = remove_target_by_id(&pool, "S2");
        assert_eq!(next, vec![TargetCard::new("S1", 20), TargetCard::new("S3", 31)]);
        assert_eq!(pool.len(), 3);
        assert_eq!(remove_target_by_id(&pool, "S9"), pool);
    }

    #[test]
    fn test_pick_random_target() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(pick_random_target(&[], &mut rng).is_none());

        let pool = vec![TargetCard::new("S1", 20), TargetCard::new("S2", 25)];
        for _ in 0..10 {
            let picked = pick_random_target(&pool, &mut rng).unwrap();
            assert!(pool.contains(picked));
        }
    }
}
