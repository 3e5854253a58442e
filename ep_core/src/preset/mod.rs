//! Presets - named snapshots of one configuration axis
//!
//! A catalog keeps presets in declaration order. Resolution is by exact,
//! case-sensitive name; without a name the catalog default is used: the
//! preset flagged `default`, otherwise the first declared.

use crate::types::ItemSlot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Configuration axis a preset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetAxis {
    Talents,
    Rotation,
    Gear,
}

impl fmt::Display for PresetAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PresetAxis::Talents => "talents",
            PresetAxis::Rotation => "rotation",
            PresetAxis::Gear => "gear",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no {axis} preset named `{name}`")]
pub struct PresetNotFoundError {
    pub axis: PresetAxis,
    pub name: String,
}

/// Named immutable snapshot of one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset<T> {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Explicit catalog default; overrides declaration order
    #[serde(default)]
    pub default: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Preset<T> {
    pub fn new(name: impl Into<String>, data: T) -> Self {
        Preset {
            name: name.into(),
            tooltip: None,
            default: false,
            data,
        }
    }

    /// Mark this preset as the catalog default
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }
}

/// Talent build, encoded as the simulator's talent string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentsData {
    pub talents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<Glyphs>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    #[serde(default)]
    pub major: Vec<u32>,
    #[serde(default)]
    pub minor: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationKind {
    /// Spec-specific option struct
    Legacy,
    /// Action priority list
    Apl,
}

/// Rotation settings; the payload is opaque to the core and handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationData {
    pub kind: RotationKind,
    #[serde(default)]
    pub rotation: serde_json::Value,
}

/// One equipped item with its enchant and socketed gems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enchant: Option<u32>,
    /// Gem ids by socket index; `0` is an empty socket
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gems: Vec<u32>,
}

impl EquippedItem {
    pub fn new(id: u32) -> Self {
        EquippedItem {
            id,
            enchant: None,
            gems: Vec::new(),
        }
    }
}

/// Full gear set by slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearData {
    #[serde(default)]
    pub phase: Option<u8>,
    #[serde(default)]
    pub items: BTreeMap<ItemSlot, EquippedItem>,
}

pub type TalentsPreset = Preset<TalentsData>;
pub type RotationPreset = Preset<RotationData>;
pub type GearPreset = Preset<GearData>;

/// Presets of one axis in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetCatalog<T> {
    presets: Vec<Preset<T>>,
}

impl<T> PresetCatalog<T> {
    pub fn new(presets: Vec<Preset<T>>) -> Self {
        PresetCatalog { presets }
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset<T>> {
        self.presets.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Preset<T>> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The flagged default, or the first declared preset
    pub fn default_preset(&self) -> Option<&Preset<T>> {
        self.presets
            .iter()
            .find(|p| p.default)
            .or_else(|| self.presets.first())
    }

    /// Pick a preset by exact name, or the catalog default when `name` is `None`
    ///
    /// A catalog that passed [`PresetCatalog::check`] is never empty, so the
    /// default path only fails on unvalidated catalogs.
    pub fn resolve(
        &self,
        axis: PresetAxis,
        name: Option<&str>,
    ) -> Result<&Preset<T>, PresetNotFoundError> {
        let found = match name {
            Some(name) => self.get(name),
            None => self.default_preset(),
        };
        tracing::debug!(%axis, requested = ?name, found = ?found.map(|p| &p.name), "resolve preset");
        found.ok_or_else(|| PresetNotFoundError {
            axis,
            name: name.unwrap_or_default().to_string(),
        })
    }

    /// Structural problems that make this catalog unusable
    pub fn check(&self, axis: PresetAxis) -> Result<(), String> {
        if self.presets.is_empty() {
            return Err(format!("{axis} preset catalog is empty"));
        }
        let mut seen = HashSet::new();
        for preset in &self.presets {
            if !seen.insert(preset.name.as_str()) {
                return Err(format!("duplicate {axis} preset `{}`", preset.name));
            }
        }
        let flagged = self.presets.iter().filter(|p| p.default).count();
        if flagged > 1 {
            return Err(format!("{flagged} {axis} presets are flagged default"));
        }
        Ok(())
    }
}
