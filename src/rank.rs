//! Intent-aware design ranking.

use std::cmp::Reverse;
use std::fmt;

use crate::design::Design;
use crate::encoding::IntentMap;

/// A design paired with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredDesign {
    /// The design.
    pub design: Design,
    /// Sum of encoding scores.
    pub score: i32,
}

impl ScoredDesign {
    /// Score `design` under `intents`.
    #[must_use]
    pub fn new(design: Design, intents: Option<&IntentMap>) -> Self {
        let score = design.score(intents);
        Self { design, score }
    }

    /// Design description followed by its score.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScoredDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (score {})", self.design, self.score)
    }
}

/// Score every design and sort by score, highest first.
///
/// The sort is stable: equal scores keep their input order.
#[must_use]
pub fn rank_scored(designs: Vec<Design>, intents: Option<&IntentMap>) -> Vec<ScoredDesign> {
    let mut scored: Vec<ScoredDesign> = designs
        .into_iter()
        .map(|d| ScoredDesign::new(d, intents))
        .collect();
    scored.sort_by_key(|s| Reverse(s.score));
    scored
}

/// Sort designs by score, highest first, keeping input order among ties.
#[must_use]
pub fn rank(designs: Vec<Design>, intents: Option<&IntentMap>) -> Vec<Design> {
    rank_scored(designs, intents)
        .into_iter()
        .map(|s| s.design)
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::channel::Channel;
    use crate::encoding::Encoding;
    use proptest::prelude::*;

    proptest! {
        /// Equal-score designs appear in input order.
        #[test]
        fn prop_rank_stable(channels in prop::collection::vec(prop::sample::select(Channel::ALL.to_vec()), 0..40)) {
            let designs: Vec<Design> = channels
                .iter()
                .enumerate()
                .map(|(i, &c)| Design::single(Encoding::new(format!("v{i}"), c)))
                .collect();
            let ranked = rank_scored(designs.clone(), None);

            for w in ranked.windows(2) {
                prop_assert!(w[0].score >= w[1].score);
                if w[0].score == w[1].score {
                    let a = designs.iter().position(|d| *d == w[0].design);
                    let b = designs.iter().position(|d| *d == w[1].design);
                    prop_assert!(a < b);
                }
            }
        }
    }
}
