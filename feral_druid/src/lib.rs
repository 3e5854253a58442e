//! feral_druid - Feral druid (cat) specialization
//!
//! Supplies the static declaration (EP weights, presets, default loadout and
//! buffs), registers it with an [`ep_core::SpecRegistry`], and provides the
//! "Suggest Gems" action.

mod actions;

pub use actions::{suggest_gems, ActionError, SUGGEST_GEMS};

use ep_core::config::{parse_declaration, ConfigError, SpecDeclaration};
use ep_core::registry::{self, RegistryEntry, RegistryError, SpecRegistry};
use ep_core::SpecId;
use std::sync::Arc;
use thiserror::Error;

/// Registry identity of this specialization
pub const SPEC_ID: &str = "feral_druid";

const DECLARATION: &str = include_str!("../config/feral_druid.toml");

#[derive(Error, Debug)]
pub enum SpecError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub fn spec_id() -> SpecId {
    SpecId::from(SPEC_ID)
}

/// The built-in declaration
pub fn declaration() -> Result<SpecDeclaration, ConfigError> {
    parse_declaration(DECLARATION)
}

/// Register the built-in declaration in `registry`
pub fn register(registry: &mut SpecRegistry) -> Result<Arc<RegistryEntry>, SpecError> {
    Ok(registry.register_declaration(declaration()?)?)
}

/// Register the built-in declaration in the process-wide registry
pub fn register_global() -> Result<Arc<RegistryEntry>, SpecError> {
    Ok(registry::register_global(declaration()?)?)
}
