//! UI actions offered by this specialization

use ep_core::optimize::{apply_optimization, CandidatePool, GemOptimizer, OptimizationOutcome, OptimizerError};
use ep_core::{LoadoutBundle, RegistryEntry};
use thiserror::Error;

/// Action id for gem suggestions
pub const SUGGEST_GEMS: &str = "suggest_gems";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("specialization `{0}` does not offer action `{1}`")]
    Unsupported(String, &'static str),
    #[error(transparent)]
    Optimizer(#[from] OptimizerError),
}

/// Re-gem the loadout's gear for the best EP under the entry's weights
///
/// On failure the loadout is untouched.
pub fn suggest_gems(
    entry: &RegistryEntry,
    loadout: &mut LoadoutBundle,
    pool: &CandidatePool,
) -> Result<OptimizationOutcome, ActionError> {
    if !entry.ui().has_action(SUGGEST_GEMS) {
        return Err(ActionError::Unsupported(entry.id().to_string(), SUGGEST_GEMS));
    }
    tracing::debug!(spec = %entry.id(), gear = %loadout.gear_preset, "suggesting gems");
    Ok(apply_optimization(loadout, entry.scorer(), pool, &GemOptimizer::new())?)
}
