//! Equivalence Points - collapse a stat vector into one comparable number
//!
//! EP of a candidate is `Σ weight[s] × candidate[s]` over the specialization's
//! scored stats. Weights are expressed relative to a reference stat whose own
//! weight is the normalization anchor (conventionally 1.0).

use crate::stat_vector::{InvalidStatError, StatVector};
use crate::types::UnitStat;
use std::cmp::Ordering;
use thiserror::Error;

/// Why a weight vector cannot anchor EP comparisons
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightsError {
    #[error("reference stat {0} has no weight")]
    MissingReference(UnitStat),
    #[error("reference stat {stat} weight must be positive, got {weight}")]
    NonPositiveReference { stat: UnitStat, weight: f64 },
    #[error("normalization anchor must be positive and finite, got {0}")]
    InvalidAnchor(f64),
    #[error(transparent)]
    Stat(#[from] InvalidStatError),
}

/// Per-stat marginal values normalized against a reference stat
#[derive(Debug, Clone, PartialEq)]
pub struct EpWeights {
    weights: StatVector,
    reference: UnitStat,
}

impl EpWeights {
    /// Wrap a weight vector, requiring a positive weight on `reference`
    pub fn new(weights: StatVector, reference: UnitStat) -> Result<Self, WeightsError> {
        let anchor = weights.get(reference);
        if anchor == 0.0 {
            return Err(WeightsError::MissingReference(reference));
        }
        if anchor < 0.0 {
            return Err(WeightsError::NonPositiveReference {
                stat: reference,
                weight: anchor,
            });
        }
        Ok(EpWeights { weights, reference })
    }

    pub fn reference(&self) -> UnitStat {
        self.reference
    }

    /// Weight of the reference stat
    pub fn anchor(&self) -> f64 {
        self.weights.get(self.reference)
    }

    /// EP value of one unit of `stat`
    pub fn ep_of(&self, stat: impl Into<UnitStat>) -> f64 {
        self.weights.get(stat)
    }

    pub fn vector(&self) -> &StatVector {
        &self.weights
    }

    /// Rescale so the reference stat's weight equals `anchor`
    pub fn normalized(&self, anchor: f64) -> Result<Self, WeightsError> {
        if !(anchor.is_finite() && anchor > 0.0) {
            return Err(WeightsError::InvalidAnchor(anchor));
        }
        let weights = self.weights.scale(anchor / self.anchor())?;
        Ok(EpWeights {
            weights,
            reference: self.reference,
        })
    }
}

/// Scores candidates against a fixed scored-stat list and weight vector
#[derive(Debug, Clone, PartialEq)]
pub struct EpScorer {
    scored: Vec<UnitStat>,
    weights: EpWeights,
}

impl EpScorer {
    pub fn new(scored: Vec<UnitStat>, weights: EpWeights) -> Self {
        EpScorer { scored, weights }
    }

    pub fn scored_stats(&self) -> &[UnitStat] {
        &self.scored
    }

    pub fn weights(&self) -> &EpWeights {
        &self.weights
    }

    /// EP of `candidate`; stats outside the scored list contribute nothing
    pub fn score(&self, candidate: &StatVector) -> Result<f64, InvalidStatError> {
        candidate.dot(self.weights.vector(), &self.scored)
    }

    /// Indices of `candidates` by descending score; equal scores keep input order
    pub fn rank(&self, candidates: &[StatVector]) -> Result<Vec<usize>, InvalidStatError> {
        let scores = candidates
            .iter()
            .map(|c| self.score(c))
            .collect::<Result<Vec<_>, _>>()?;
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        // sort_by is stable, so ties stay first-seen
        order.sort_by(|a, b| {
            scores[*b]
                .partial_cmp(&scores[*a])
                .unwrap_or(Ordering::Equal)
        });
        tracing::debug!(
            candidates = candidates.len(),
            top = ?order.first().map(|i| scores[*i]),
            "ranked candidates"
        );
        Ok(order)
    }

    /// First-seen candidate with the highest score
    pub fn best<'a, T>(
        &self,
        candidates: impl IntoIterator<Item = &'a T>,
        stats_of: impl Fn(&T) -> &StatVector,
    ) -> Result<Option<(&'a T, f64)>, InvalidStatError>
    where
        T: 'a,
    {
        let mut best: Option<(&'a T, f64)> = None;
        for candidate in candidates {
            let score = self.score(stats_of(candidate))?;
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((candidate, score)),
            }
        }
        Ok(best)
    }
}
