//! ep_core - Stat weighting and preset resolution for specialization configs
//!
//! This library provides:
//! - StatVector: Immutable per-stat values, including pseudo-stats
//! - EpScorer: Equivalence Points, a weighted sum normalized to a reference stat
//! - PresetCatalog: Named talent/rotation/gear presets with default resolution
//! - SpecRegistry: Exactly-once registration of validated specializations
//! - Optimization boundary: Plugging gear/gem optimizers into EP scoring

pub mod config;
pub mod ep;
pub mod loadout;
pub mod optimize;
pub mod preset;
pub mod registry;
pub mod stat_vector;
pub mod types;

pub mod prelude;

// Re-export core types for convenience
pub use config::{ConfigError, SpecDeclaration};
pub use ep::{EpScorer, EpWeights, WeightsError};
pub use loadout::{BuffToggle, Buffs, LoadoutBundle, Tristate};
pub use optimize::{
    apply_optimization, Assignment, CandidatePool, GearOptimizer, GemOptimizer,
    OptimizationOutcome, OptimizationRequest, OptimizerError,
};
pub use preset::{EquippedItem, Preset, PresetAxis, PresetCatalog, PresetNotFoundError};
pub use registry::{LoadoutRequest, RegistryEntry, RegistryError, SpecRegistry};
pub use stat_vector::{InvalidStatError, StatVector};
pub use types::{Faction, ItemSlot, PseudoStat, SpecId, Stat, UnitStat};
