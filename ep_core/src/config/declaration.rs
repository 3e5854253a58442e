//! Static specialization declaration as written in TOML

use crate::loadout::{Buffs, Consumes, SpecOptions};
use crate::preset::{GearData, PresetCatalog, RotationData, TalentsData};
use crate::stat_vector::StatVector;
use crate::types::{Faction, PseudoStat, SpecId, Stat, UnitStat};
use serde::{Deserialize, Serialize};

/// Everything one specialization declares to join the shared pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDeclaration {
    pub id: SpecId,
    pub class: String,
    #[serde(default)]
    pub css_class: String,
    #[serde(default)]
    pub css_scheme: String,
    /// Known bugs shown on the site
    #[serde(default)]
    pub known_issues: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Stats for which EP is calculated
    pub ep_stats: Vec<Stat>,
    #[serde(default)]
    pub ep_pseudo_stats: Vec<PseudoStat>,
    /// Stat all other EP weights are normalized against
    pub ep_reference_stat: UnitStat,
    /// Stats shown in the character stats panel
    pub display_stats: Vec<Stat>,

    pub defaults: DefaultsDeclaration,
    #[serde(default)]
    pub ui: UiCapabilities,
    /// Rotation preset used when the player asks for an automatic rotation
    #[serde(default)]
    pub auto_rotation: Option<String>,
    pub presets: PresetsDeclaration,
    #[serde(default)]
    pub raid_sim_presets: Vec<RaidSimPreset>,
}

/// Default loadout; preset fields name entries of [`PresetsDeclaration`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsDeclaration {
    #[serde(default)]
    pub gear: Option<String>,
    #[serde(default)]
    pub talents: Option<String>,
    #[serde(default)]
    pub rotation: Option<String>,
    /// Default EP weights for sorting gear in the gear picker
    pub ep_weights: StatVector,
    #[serde(default)]
    pub consumes: Consumes,
    #[serde(default)]
    pub spec_options: SpecOptions,
    #[serde(default)]
    pub buffs: Buffs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetsDeclaration {
    pub talents: PresetCatalog<TalentsData>,
    pub rotations: PresetCatalog<RotationData>,
    pub gear: PresetCatalog<GearData>,
}

/// Which optional settings sections apply to this specialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiCapabilities {
    #[serde(default)]
    pub player_icon_inputs: Vec<String>,
    #[serde(default)]
    pub rotation_inputs: Vec<String>,
    /// Buff and debuff inputs to force on, overriding the EP-based defaults
    #[serde(default)]
    pub include_buff_debuff_inputs: Vec<String>,
    #[serde(default)]
    pub exclude_buff_debuff_inputs: Vec<String>,
    #[serde(default)]
    pub other_inputs: Vec<String>,
    /// Whether the encounter section offers 'Execute Duration (%)'
    #[serde(default)]
    pub show_execute_proportion: bool,
    /// Extra actions, e.g. `suggest_gems`
    #[serde(default)]
    pub actions: Vec<String>,
}

impl UiCapabilities {
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

/// Entry for the raid simulator's player picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidSimPreset {
    pub default_name: String,
    #[serde(default)]
    pub tooltip: String,
    #[serde(default)]
    pub icon_url: String,
    /// Talents preset; the default loadout's talents when unset
    #[serde(default)]
    pub talents: Option<String>,
    /// Replaces the default consumes when set
    #[serde(default)]
    pub consumes: Option<Consumes>,
    #[serde(default)]
    pub spec_options: Option<SpecOptions>,
    #[serde(default)]
    pub default_races: Vec<FactionRace>,
    #[serde(default)]
    pub default_gear: Vec<FactionGear>,
}

impl RaidSimPreset {
    pub fn race_for(&self, faction: Faction) -> Option<&str> {
        self.default_races
            .iter()
            .find(|r| r.faction == faction)
            .map(|r| r.race.as_str())
    }

    /// Gear preset name for a faction and content phase
    pub fn gear_for(&self, faction: Faction, phase: u8) -> Option<&str> {
        self.default_gear
            .iter()
            .find(|g| g.faction == faction && g.phase == phase)
            .map(|g| g.preset.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionRace {
    pub faction: Faction,
    pub race: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionGear {
    pub faction: Faction,
    pub phase: u8,
    pub preset: String,
}
