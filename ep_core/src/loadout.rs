//! Loadout bundles - one resolved preset per axis plus buffs and consumables

use crate::preset::{GearData, RotationData, TalentsData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strength of a raid buff or debuff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tristate {
    Off,
    Regular,
    Improved,
}

/// A buff toggle is either on/off or a [`Tristate`] level
///
/// Declarations write `bloodlust = true` or `gift_of_the_wild = "improved"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuffToggle {
    Enabled(bool),
    Level(Tristate),
}

impl BuffToggle {
    pub fn is_active(self) -> bool {
        match self {
            BuffToggle::Enabled(on) => on,
            BuffToggle::Level(level) => level != Tristate::Off,
        }
    }
}

/// Raid, party, individual buffs and target debuffs by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffs {
    #[serde(default)]
    pub raid: BTreeMap<String, BuffToggle>,
    #[serde(default)]
    pub party: BTreeMap<String, BuffToggle>,
    #[serde(default)]
    pub individual: BTreeMap<String, BuffToggle>,
    #[serde(default)]
    pub debuffs: BTreeMap<String, BuffToggle>,
}

impl Buffs {
    /// Names of every active toggle across all groups
    pub fn active(&self) -> impl Iterator<Item = &str> {
        [&self.raid, &self.party, &self.individual, &self.debuffs]
            .into_iter()
            .flat_map(|group| group.iter())
            .filter(|(_, toggle)| toggle.is_active())
            .map(|(name, _)| name.as_str())
    }
}

/// Consumables by category (flask, food, potions, ...) mapped to an item id
pub type Consumes = BTreeMap<String, u32>;

/// Spec-specific options passed through to the engine untouched
pub type SpecOptions = BTreeMap<String, serde_json::Value>;

/// Ready-to-simulate character configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutBundle {
    pub talents_preset: String,
    pub talents: TalentsData,
    pub rotation_preset: String,
    pub rotation: RotationData,
    pub gear_preset: String,
    pub gear: GearData,
    #[serde(default)]
    pub consumes: Consumes,
    #[serde(default)]
    pub spec_options: SpecOptions,
    #[serde(default)]
    pub buffs: Buffs,
}
