//! Specialization registry - append-only table of registry entries
//!
//! Each specialization registers exactly once. An entry only becomes visible
//! to [`SpecRegistry::lookup`] after its declaration fully validated.

mod entry;

pub use entry::{LoadoutRequest, RegistryEntry};

use crate::config::SpecDeclaration;
use crate::types::SpecId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("specialization `{0}` is already registered")]
    DuplicateRegistration(SpecId),
    #[error("unknown specialization `{0}`")]
    UnknownSpecialization(SpecId),
    #[error("invalid configuration for `{spec}`: {reason}")]
    InvalidConfiguration { spec: SpecId, reason: String },
}

/// Registered specializations in registration order
#[derive(Debug, Default)]
pub struct SpecRegistry {
    entries: Vec<Arc<RegistryEntry>>,
    index: HashMap<SpecId, usize>,
}

impl SpecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an already validated entry
    pub fn register(&mut self, entry: RegistryEntry) -> Result<Arc<RegistryEntry>, RegistryError> {
        if self.index.contains_key(entry.id()) {
            return Err(RegistryError::DuplicateRegistration(entry.id().clone()));
        }
        let entry = Arc::new(entry);
        self.index.insert(entry.id().clone(), self.entries.len());
        self.entries.push(Arc::clone(&entry));
        tracing::info!(
            spec = %entry.id(),
            scored = entry.scored_stats().len(),
            reference = %entry.reference_stat(),
            "registered specialization"
        );
        Ok(entry)
    }

    /// Validate a declaration and register the resulting entry
    pub fn register_declaration(
        &mut self,
        declaration: SpecDeclaration,
    ) -> Result<Arc<RegistryEntry>, RegistryError> {
        if self.index.contains_key(&declaration.id) {
            return Err(RegistryError::DuplicateRegistration(declaration.id));
        }
        let entry = RegistryEntry::from_declaration(declaration)?;
        self.register(entry)
    }

    pub fn lookup(&self, id: &SpecId) -> Result<Arc<RegistryEntry>, RegistryError> {
        self.index
            .get(id)
            .map(|i| Arc::clone(&self.entries[*i]))
            .ok_or_else(|| RegistryError::UnknownSpecialization(id.clone()))
    }

    pub fn contains(&self, id: &SpecId) -> bool {
        self.index.contains_key(id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &SpecId> {
        self.entries.iter().map(|e| e.id())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide registry populated at startup
pub fn global() -> &'static RwLock<SpecRegistry> {
    static GLOBAL: OnceLock<RwLock<SpecRegistry>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(SpecRegistry::new()))
}

/// Validate and register a declaration in the process-wide registry
pub fn register_global(declaration: SpecDeclaration) -> Result<Arc<RegistryEntry>, RegistryError> {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register_declaration(declaration)
}

pub fn lookup_global(id: &SpecId) -> Result<Arc<RegistryEntry>, RegistryError> {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(id)
}
