//! Optimization boundary - how an external gear/gem optimizer plugs in
//!
//! The optimizer gets a scorer, the current loadout and a candidate pool, and
//! answers with a replacement assignment or "no improvement". Scoring is pure,
//! so it may be called any number of times. Applying a result is
//! all-or-nothing: on any error the loadout is left exactly as it was.

mod gems;
mod pool;

pub use gems::GemOptimizer;
pub use pool::{CandidatePool, GemColor, GemInfo, ItemInfo};

use crate::ep::EpScorer;
use crate::loadout::LoadoutBundle;
use crate::preset::EquippedItem;
use crate::stat_vector::InvalidStatError;
use crate::types::ItemSlot;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("optimizer failed: {0}")]
    Internal(String),
    #[error("scoring failed: {0}")]
    Scoring(#[from] InvalidStatError),
    #[error("assignment targets empty slot {0:?}")]
    EmptySlot(ItemSlot),
}

/// Everything an optimizer may read
#[derive(Debug, Clone, Copy)]
pub struct OptimizationRequest<'a> {
    pub scorer: &'a EpScorer,
    pub loadout: &'a LoadoutBundle,
    pub pool: &'a CandidatePool,
}

impl OptimizationRequest<'_> {
    /// EP of the loadout's current gear
    pub fn current_score(&self) -> Result<f64, InvalidStatError> {
        self.scorer.score(&self.pool.gear_stats(&self.loadout.gear)?)
    }
}

/// New items for a subset of slots, with the resulting gear score
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub changes: Vec<(ItemSlot, EquippedItem)>,
    pub score: f64,
}

pub trait GearOptimizer {
    /// `Ok(None)` when nothing beats the current gear
    fn optimize(&self, request: &OptimizationRequest<'_>) -> Result<Option<Assignment>, OptimizerError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationOutcome {
    Improved {
        changed_slots: Vec<ItemSlot>,
        previous_score: f64,
        score: f64,
    },
    NoImprovement {
        score: f64,
    },
}

/// Run `optimizer` against `loadout` and apply its assignment atomically
pub fn apply_optimization(
    loadout: &mut LoadoutBundle,
    scorer: &EpScorer,
    pool: &CandidatePool,
    optimizer: &dyn GearOptimizer,
) -> Result<OptimizationOutcome, OptimizerError> {
    let (previous_score, assignment) = {
        let request = OptimizationRequest {
            scorer,
            loadout: &*loadout,
            pool,
        };
        let previous_score = request.current_score()?;
        (previous_score, optimizer.optimize(&request)?)
    };

    let Some(assignment) = assignment else {
        tracing::info!(score = previous_score, "no improvement found");
        return Ok(OptimizationOutcome::NoImprovement {
            score: previous_score,
        });
    };

    let mut gear = loadout.gear.clone();
    let mut changed_slots = Vec::with_capacity(assignment.changes.len());
    for (slot, item) in assignment.changes {
        let current = gear.items.get_mut(&slot).ok_or(OptimizerError::EmptySlot(slot))?;
        *current = item;
        changed_slots.push(slot);
    }
    loadout.gear = gear;

    tracing::info!(
        previous = previous_score,
        score = assignment.score,
        slots = changed_slots.len(),
        "applied optimization"
    );
    Ok(OptimizationOutcome::Improved {
        changed_slots,
        previous_score,
        score: assignment.score,
    })
}
