//! Prelude module for convenient imports
//!
//! ```rust
//! use ep_core::prelude::*;
//! ```

// Core types
pub use crate::stat_vector::StatVector;
pub use crate::types::{ItemSlot, PseudoStat, SpecId, Stat, UnitStat};

// Scoring
pub use crate::ep::{EpScorer, EpWeights};

// Presets and loadouts
pub use crate::loadout::LoadoutBundle;
pub use crate::preset::{PresetAxis, PresetCatalog};

// Registry
pub use crate::registry::{LoadoutRequest, RegistryEntry, SpecRegistry};

// Optimization
pub use crate::optimize::{apply_optimization, CandidatePool, GearOptimizer, GemOptimizer};
