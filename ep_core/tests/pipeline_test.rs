//! Integration test: declare -> register -> lookup -> score -> optimize
//!
//! Two independent specializations share one registry and one scoring path.

use ep_core::config::parse_declaration;
use ep_core::registry::{self, RegistryError, SpecRegistry};
use ep_core::{
    apply_optimization, Assignment, CandidatePool, GearOptimizer, OptimizationRequest,
    OptimizerError, SpecId, Stat, StatVector,
};

fn declaration(id: &str, reference: &str, weights: &str) -> String {
    format!(
        r#"
id = "{id}"
class = "test"
ep_stats = ["strength", "agility", "attack_power", "spell_power", "intellect"]
ep_reference_stat = "{reference}"
display_stats = ["health"]

[defaults]
[defaults.ep_weights]
{weights}

[[presets.talents]]
name = "Standard"
talents = "000"

[[presets.rotations]]
name = "Default"
kind = "apl"

[[presets.gear]]
name = "P1"

[presets.gear.items.head]
id = 1

[[presets.gear]]
name = "P2"

[[presets.gear]]
name = "P3"
"#
    )
}

fn melee() -> String {
    declaration(
        "melee",
        "attack_power",
        "strength = 2.4\nagility = 2.39\nattack_power = 1",
    )
}

fn caster() -> String {
    declaration("caster", "spell_power", "spell_power = 1\nintellect = 0.3")
}

#[test]
fn test_two_specs_share_registry() {
    let mut registry = SpecRegistry::new();
    registry.register_declaration(parse_declaration(&melee()).unwrap()).unwrap();
    registry.register_declaration(parse_declaration(&caster()).unwrap()).unwrap();
    assert_eq!(
        registry.ids().map(|id| id.0.as_str()).collect::<Vec<_>>(),
        ["melee", "caster"]
    );

    let candidate = StatVector::from_mapping([
        (Stat::Strength, 10.0),
        (Stat::Agility, 5.0),
        (Stat::AttackPower, 100.0),
        (Stat::SpellPower, 40.0),
        (Stat::Intellect, 10.0),
    ])
    .unwrap();

    let melee = registry.lookup(&"melee".into()).unwrap();
    let caster = registry.lookup(&"caster".into()).unwrap();
    assert!((melee.scorer().score(&candidate).unwrap() - 135.95).abs() < 1e-9);
    assert!((caster.scorer().score(&candidate).unwrap() - 43.0).abs() < 1e-9);
}

#[test]
fn test_preset_resolution_through_entry() {
    let mut registry = SpecRegistry::new();
    let entry = registry
        .register_declaration(parse_declaration(&melee()).unwrap())
        .unwrap();

    let catalog = entry.gear_presets();
    let before = catalog.clone();
    assert!(catalog.resolve(ep_core::PresetAxis::Gear, Some("P4")).is_err());
    assert_eq!(catalog, &before);
    assert_eq!(catalog.resolve(ep_core::PresetAxis::Gear, Some("P3")).unwrap().name, "P3");
    assert_eq!(catalog.resolve(ep_core::PresetAxis::Gear, None).unwrap().name, "P1");
}

#[test]
fn test_global_registry() {
    let declaration = parse_declaration(&declaration(
        "global_only",
        "attack_power",
        "attack_power = 1",
    ))
    .unwrap();

    let first = registry::register_global(declaration.clone()).unwrap();
    assert_eq!(
        registry::register_global(declaration).unwrap_err(),
        RegistryError::DuplicateRegistration(SpecId::from("global_only"))
    );
    let found = registry::lookup_global(&"global_only".into()).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &found));

    assert!(matches!(
        registry::lookup_global(&"never_registered".into()),
        Err(RegistryError::UnknownSpecialization(_))
    ));
}

#[test]
fn test_invalid_declaration_is_not_registered() {
    // Reference weight missing from the weights table
    let broken = parse_declaration(&declaration("broken", "spell_power", "strength = 1")).unwrap();
    let mut registry = SpecRegistry::new();
    assert!(matches!(
        registry.register_declaration(broken),
        Err(RegistryError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        registry.lookup(&"broken".into()),
        Err(RegistryError::UnknownSpecialization(_))
    ));
}

#[test]
fn test_non_finite_weight_rejected_at_parse() {
    let nan = declaration("nan", "attack_power", "attack_power = nan");
    assert!(parse_declaration(&nan).is_err());
}

/// Scores every trial it is offered, then fails
struct Exhausting;

impl GearOptimizer for Exhausting {
    fn optimize(
        &self,
        request: &OptimizationRequest<'_>,
    ) -> Result<Option<Assignment>, OptimizerError> {
        let first = request.current_score()?;
        for _ in 0..100 {
            assert_eq!(request.current_score()?, first);
        }
        Err(OptimizerError::Internal("timeout".to_string()))
    }
}

#[test]
fn test_failed_optimization_keeps_loadout() {
    let mut registry = SpecRegistry::new();
    let entry = registry
        .register_declaration(parse_declaration(&melee()).unwrap())
        .unwrap();
    let mut loadout = entry.default_loadout().unwrap();
    let before = loadout.clone();

    let result = apply_optimization(&mut loadout, entry.scorer(), &CandidatePool::default(), &Exhausting);
    assert!(matches!(result, Err(OptimizerError::Internal(_))));
    assert_eq!(loadout, before);
}
