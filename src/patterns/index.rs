//! Rank pattern index.
//!
//! A rank pattern is a non-decreasing five-rank multiset: the shape of a hand
//! with suits abstracted away. The index groups every pattern a standard deck
//! can produce by its raw rank sum. It depends only on rank multiplicities, so
//! it is built once and shared read-only for the life of the process.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use crate::cards::{Rank, ACE, HAND_SIZE, KING};

/// A non-decreasing five-tuple of raw ranks.
pub type RankPattern = [Rank; HAND_SIZE];

/// Smallest sum any pattern reaches (A-A-A-A-2).
pub const MIN_SUM: u32 = 6;
/// Largest sum any pattern reaches (Q-K-K-K-K).
pub const MAX_SUM: u32 = 64;

/// Raw rank sum of a pattern.
pub fn pattern_sum(pattern: &RankPattern) -> u32 {
    pattern.iter().map(|&r| r as u32).sum()
}

/// Every achievable rank pattern, grouped by sum.
#[derive(Debug, Clone)]
pub struct PatternIndex {
    by_sum: FxHashMap<u32, Vec<RankPattern>>,
    total: usize,
}

impl PatternIndex {
    /// Enumerate all non-decreasing five-rank tuples, dropping five-of-a-kind.
    pub fn build() -> Self {
        let mut by_sum: FxHashMap<u32, Vec<RankPattern>> = FxHashMap::default();
        let mut total = 0;

        for a in ACE..=KING {
            for b in a..=KING {
                for c in b..=KING {
                    for d in c..=KING {
                        for e in d..=KING {
                            // Only four cards of a rank exist
                            if a == e {
                                continue;
                            }
                            let pattern = [a, b, c, d, e];
                            by_sum.entry(pattern_sum(&pattern)).or_default().push(pattern);
                            total += 1;
                        }
                    }
                }
            }
        }

        log::debug!("built pattern index: {} patterns over {} sums", total, by_sum.len());
        Self { by_sum, total }
    }

    /// The process-wide index, built on first use.
    pub fn shared() -> &'static PatternIndex {
        static INDEX: OnceLock<PatternIndex> = OnceLock::new();
        INDEX.get_or_init(PatternIndex::build)
    }

    /// All patterns summing to `sum`, in enumeration order. Empty if unreachable.
    pub fn patterns_for(&self, sum: u32) -> &[RankPattern] {
        self.by_sum.get(&sum).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of patterns.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Check if the index holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Every reachable sum, ascending.
    pub fn sums(&self) -> Vec<u32> {
        let mut sums: Vec<u32> = self.by_sum.keys().copied().collect();
        sums.sort_unstable();
        sums
    }
}

impl Default for PatternIndex {
    fn default() -> Self {
        Self::build()
    }
}
