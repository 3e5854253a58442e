//! RegistryEntry - validated, immutable capability bundle for one specialization

use super::RegistryError;
use crate::config::{DefaultsDeclaration, RaidSimPreset, SpecDeclaration, UiCapabilities};
use crate::ep::{EpScorer, EpWeights};
use crate::loadout::LoadoutBundle;
use crate::preset::{
    GearData, PresetAxis, PresetCatalog, PresetNotFoundError, RotationData, RotationPreset,
    TalentsData,
};
use crate::types::{Faction, SpecId, Stat, UnitStat};
use std::collections::HashSet;

/// Optional preset name per axis; `None` falls back to the default loadout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadoutRequest {
    pub talents: Option<String>,
    pub rotation: Option<String>,
    pub gear: Option<String>,
}

/// One specialization as seen by the shared evaluation pipeline and UI shell
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    id: SpecId,
    class: String,
    css_class: String,
    css_scheme: String,
    known_issues: Vec<String>,
    warnings: Vec<String>,
    display_stats: Vec<Stat>,
    scorer: EpScorer,
    defaults: DefaultsDeclaration,
    talents: PresetCatalog<TalentsData>,
    rotations: PresetCatalog<RotationData>,
    gear: PresetCatalog<GearData>,
    ui: UiCapabilities,
    auto_rotation: Option<String>,
    raid_sim_presets: Vec<RaidSimPreset>,
}

impl RegistryEntry {
    /// Validate a declaration and build the entry
    ///
    /// Nothing about the declaration is accepted partially: any structural
    /// problem yields [`RegistryError::InvalidConfiguration`].
    pub fn from_declaration(declaration: SpecDeclaration) -> Result<Self, RegistryError> {
        let id = declaration.id.clone();
        let invalid = |reason: String| RegistryError::InvalidConfiguration {
            spec: id.clone(),
            reason,
        };

        let scored = scored_stats(&declaration).map_err(&invalid)?;
        let reference = declaration.ep_reference_stat;
        if !scored.contains(&reference) {
            return Err(invalid(format!("reference stat {reference} is not a scored stat")));
        }
        let weights = EpWeights::new(declaration.defaults.ep_weights, reference)
            .map_err(|e| invalid(e.to_string()))?;
        for (stat, _) in weights.vector().iter() {
            if !scored.contains(&stat) {
                tracing::warn!(spec = %id, %stat, "EP weight declared for unscored stat is ignored");
            }
        }

        if declaration.display_stats.is_empty() {
            return Err(invalid("display stats are empty".to_string()));
        }

        let presets = declaration.presets;
        presets.talents.check(PresetAxis::Talents).map_err(&invalid)?;
        presets.rotations.check(PresetAxis::Rotation).map_err(&invalid)?;
        presets.gear.check(PresetAxis::Gear).map_err(&invalid)?;

        let defaults = declaration.defaults;
        check_reference(&presets.talents, "default talents", defaults.talents.as_deref())
            .map_err(&invalid)?;
        check_reference(&presets.rotations, "default rotation", defaults.rotation.as_deref())
            .map_err(&invalid)?;
        check_reference(&presets.gear, "default gear", defaults.gear.as_deref())
            .map_err(&invalid)?;
        check_reference(
            &presets.rotations,
            "auto rotation",
            declaration.auto_rotation.as_deref(),
        )
        .map_err(&invalid)?;
        for raid_preset in &declaration.raid_sim_presets {
            let name = &raid_preset.default_name;
            check_reference(
                &presets.talents,
                &format!("raid sim `{name}` talents"),
                raid_preset.talents.as_deref(),
            )
            .map_err(&invalid)?;
            for gear in &raid_preset.default_gear {
                check_reference(
                    &presets.gear,
                    &format!("raid sim `{name}` {:?} phase {} gear", gear.faction, gear.phase),
                    Some(gear.preset.as_str()),
                )
                .map_err(&invalid)?;
            }
        }

        Ok(RegistryEntry {
            id: declaration.id,
            class: declaration.class,
            css_class: declaration.css_class,
            css_scheme: declaration.css_scheme,
            known_issues: declaration.known_issues,
            warnings: declaration.warnings,
            display_stats: declaration.display_stats,
            scorer: EpScorer::new(scored, weights),
            defaults,
            talents: presets.talents,
            rotations: presets.rotations,
            gear: presets.gear,
            ui: declaration.ui,
            auto_rotation: declaration.auto_rotation,
            raid_sim_presets: declaration.raid_sim_presets,
        })
    }

    pub fn id(&self) -> &SpecId {
        &self.id
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn css_class(&self) -> &str {
        &self.css_class
    }

    pub fn css_scheme(&self) -> &str {
        &self.css_scheme
    }

    pub fn known_issues(&self) -> &[String] {
        &self.known_issues
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Stats EP is computed over, real stats first then pseudo-stats
    pub fn scored_stats(&self) -> &[UnitStat] {
        self.scorer.scored_stats()
    }

    pub fn display_stats(&self) -> &[Stat] {
        &self.display_stats
    }

    pub fn reference_stat(&self) -> UnitStat {
        self.scorer.weights().reference()
    }

    pub fn ep_weights(&self) -> &EpWeights {
        self.scorer.weights()
    }

    pub fn scorer(&self) -> &EpScorer {
        &self.scorer
    }

    pub fn defaults(&self) -> &DefaultsDeclaration {
        &self.defaults
    }

    pub fn talent_presets(&self) -> &PresetCatalog<TalentsData> {
        &self.talents
    }

    pub fn rotation_presets(&self) -> &PresetCatalog<RotationData> {
        &self.rotations
    }

    pub fn gear_presets(&self) -> &PresetCatalog<GearData> {
        &self.gear
    }

    pub fn ui(&self) -> &UiCapabilities {
        &self.ui
    }

    pub fn raid_sim_presets(&self) -> &[RaidSimPreset] {
        &self.raid_sim_presets
    }

    /// Rotation used for automatic rotation requests; the catalog default when
    /// none is declared
    pub fn auto_rotation(&self) -> Result<&RotationPreset, PresetNotFoundError> {
        self.rotations
            .resolve(PresetAxis::Rotation, self.auto_rotation.as_deref())
    }

    /// Resolve one preset per axis: requested name, then the default loadout's
    /// name, then the catalog default
    pub fn loadout(&self, request: &LoadoutRequest) -> Result<LoadoutBundle, PresetNotFoundError> {
        let talents = self.talents.resolve(
            PresetAxis::Talents,
            request.talents.as_deref().or(self.defaults.talents.as_deref()),
        )?;
        let rotation = self.rotations.resolve(
            PresetAxis::Rotation,
            request.rotation.as_deref().or(self.defaults.rotation.as_deref()),
        )?;
        let gear = self.gear.resolve(
            PresetAxis::Gear,
            request.gear.as_deref().or(self.defaults.gear.as_deref()),
        )?;

        Ok(LoadoutBundle {
            talents_preset: talents.name.clone(),
            talents: talents.data.clone(),
            rotation_preset: rotation.name.clone(),
            rotation: rotation.data.clone(),
            gear_preset: gear.name.clone(),
            gear: gear.data.clone(),
            consumes: self.defaults.consumes.clone(),
            spec_options: self.defaults.spec_options.clone(),
            buffs: self.defaults.buffs.clone(),
        })
    }

    /// Loadout a raid simulator player starts with for `faction` in content
    /// `phase`; unset preset fields fall back to the default loadout
    pub fn raid_sim_loadout(
        &self,
        preset: &RaidSimPreset,
        faction: Faction,
        phase: u8,
    ) -> Result<LoadoutBundle, PresetNotFoundError> {
        let request = LoadoutRequest {
            talents: preset.talents.clone(),
            rotation: None,
            gear: preset.gear_for(faction, phase).map(str::to_string),
        };
        let mut loadout = self.loadout(&request)?;
        if let Some(consumes) = &preset.consumes {
            loadout.consumes = consumes.clone();
        }
        if let Some(spec_options) = &preset.spec_options {
            loadout.spec_options = spec_options.clone();
        }
        Ok(loadout)
    }

    /// Loadout built from the declared defaults alone
    pub fn default_loadout(&self) -> Result<LoadoutBundle, PresetNotFoundError> {
        self.loadout(&LoadoutRequest::default())
    }
}

fn scored_stats(declaration: &SpecDeclaration) -> Result<Vec<UnitStat>, String> {
    let scored: Vec<UnitStat> = declaration
        .ep_stats
        .iter()
        .map(|s| UnitStat::Stat(*s))
        .chain(declaration.ep_pseudo_stats.iter().map(|p| UnitStat::Pseudo(*p)))
        .collect();
    if scored.is_empty() {
        return Err("no EP stats declared".to_string());
    }
    let mut seen = HashSet::new();
    for stat in &scored {
        if !seen.insert(*stat) {
            return Err(format!("EP stat {stat} listed twice"));
        }
    }
    Ok(scored)
}

/// `field` names the declaration field holding `name` in the error message
fn check_reference<T>(
    catalog: &PresetCatalog<T>,
    field: &str,
    name: Option<&str>,
) -> Result<(), String> {
    match name {
        Some(name) if !catalog.contains(name) => {
            Err(format!("{field} preset `{name}` does not exist"))
        }
        _ => Ok(()),
    }
}
