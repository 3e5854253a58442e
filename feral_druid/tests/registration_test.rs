//! Integration test: register the feral declaration -> resolve loadouts -> score

use ep_core::config::load_toml;
use ep_core::registry::{RegistryError, SpecRegistry};
use ep_core::{
    CandidatePool, Faction, ItemSlot, LoadoutRequest, OptimizationOutcome, PresetAxis, PseudoStat,
    Stat, StatVector,
};
use std::path::Path;

fn registry() -> SpecRegistry {
    let mut registry = SpecRegistry::new();
    feral_druid::register(&mut registry).unwrap();
    registry
}

#[test]
fn test_weights_and_reference() {
    let registry = registry();
    let entry = registry.lookup(&feral_druid::spec_id()).unwrap();

    assert_eq!(entry.reference_stat(), Stat::AttackPower.into());
    assert!((entry.ep_weights().anchor() - 1.0).abs() < f64::EPSILON);
    assert!((entry.ep_weights().ep_of(Stat::MeleeHit) - 2.51).abs() < f64::EPSILON);
    assert!((entry.ep_weights().ep_of(PseudoStat::MainHandDps) - 16.5).abs() < f64::EPSILON);

    // Eight real stats, then the weapon DPS pseudo-stat
    assert_eq!(entry.scored_stats().len(), 9);
    assert_eq!(entry.scored_stats()[8], PseudoStat::MainHandDps.into());
    assert_eq!(entry.display_stats().first(), Some(&Stat::Health));
    assert_eq!(entry.display_stats().last(), Some(&Stat::Mana));
}

#[test]
fn test_score_scenario() {
    let registry = registry();
    let entry = registry.lookup(&feral_druid::spec_id()).unwrap();

    let candidate = StatVector::from_mapping([
        (Stat::Strength, 10.0),
        (Stat::Agility, 5.0),
        (Stat::AttackPower, 100.0),
    ])
    .unwrap();
    let score = entry.scorer().score(&candidate).unwrap();
    assert!((score - 135.95).abs() < 1e-9, "got {score}");

    // Stamina is displayed-only, so it is not worth anything
    let stamina = StatVector::from_mapping([(Stat::Stamina, 500.0)]).unwrap();
    assert_eq!(entry.scorer().score(&stamina).unwrap(), 0.0);

    let weapon = StatVector::from_mapping([(PseudoStat::MainHandDps, 2.0)]).unwrap();
    assert!((entry.scorer().score(&weapon).unwrap() - 33.0).abs() < 1e-9);
}

#[test]
fn test_default_loadout() {
    let registry = registry();
    let entry = registry.lookup(&feral_druid::spec_id()).unwrap();

    let loadout = entry.default_loadout().unwrap();
    assert_eq!(loadout.gear_preset, "P4");
    assert_eq!(loadout.gear.phase, Some(4));
    assert_eq!(loadout.talents_preset, "Standard");
    assert_eq!(loadout.rotation_preset, "Legacy Default");
    assert_eq!(loadout.consumes["flask"], 46377);
    assert!(loadout.buffs.active().any(|b| b == "heroic_presence"));

    assert_eq!(entry.auto_rotation().unwrap().name, "Legacy Default");
}

#[test]
fn test_missing_gear_preset() {
    let registry = registry();
    let entry = registry.lookup(&feral_druid::spec_id()).unwrap();

    let request = LoadoutRequest {
        gear: Some("P5".to_string()),
        ..LoadoutRequest::default()
    };
    let err = entry.loadout(&request).unwrap_err();
    assert_eq!(err.axis, PresetAxis::Gear);
    assert_eq!(err.name, "P5");
    assert_eq!(entry.gear_presets().names().collect::<Vec<_>>(), ["Pre-Raid", "P1", "P2", "P3", "P4"]);
}

#[test]
fn test_capabilities_and_raid_presets() {
    let registry = registry();
    let entry = registry.lookup(&feral_druid::spec_id()).unwrap();

    assert!(entry.ui().has_action(feral_druid::SUGGEST_GEMS));
    assert!(!entry.ui().show_execute_proportion);
    assert_eq!(entry.css_class(), "feral-druid-sim-ui");

    let raid = &entry.raid_sim_presets()[0];
    assert_eq!(raid.default_name, "Cat");
    assert_eq!(raid.race_for(Faction::Horde), Some("tauren"));
    assert_eq!(raid.gear_for(Faction::Alliance, 2), Some("P2"));
    assert_eq!(raid.gear_for(Faction::Unknown, 1), None);

    let horde = entry.raid_sim_loadout(raid, Faction::Horde, 2).unwrap();
    assert_eq!(horde.gear_preset, "P2");
    assert_eq!(horde.talents_preset, "Standard");
    assert_eq!(horde.consumes, entry.defaults().consumes);
    // No per-faction gear for unknown faction: default gear
    let unknown = entry.raid_sim_loadout(raid, Faction::Unknown, 1).unwrap();
    assert_eq!(unknown.gear_preset, "P4");
}

#[test]
fn test_register_twice() {
    let mut registry = registry();
    let err = feral_druid::register(&mut registry).unwrap_err();
    assert!(matches!(
        err,
        feral_druid::SpecError::Registry(RegistryError::DuplicateRegistration(_))
    ));
    assert!(registry.lookup(&feral_druid::spec_id()).is_ok());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_suggest_gems() {
    let registry = registry();
    let entry = registry.lookup(&feral_druid::spec_id()).unwrap();
    let pool: CandidatePool =
        load_toml(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gem_pool.toml")))
            .unwrap();

    let mut loadout = entry.default_loadout().unwrap();
    let outcome = feral_druid::suggest_gems(&entry, &mut loadout, &pool).unwrap();

    match outcome {
        OptimizationOutcome::Improved {
            changed_slots,
            previous_score,
            score,
        } => {
            assert!(score > previous_score);
            assert_eq!(changed_slots, vec![ItemSlot::Head, ItemSlot::Chest]);
        }
        other => panic!("expected an improvement, got {other:?}"),
    }

    // Delicate (20 agi = 47.8 EP) beats Fractured (20 arp = 41.6 EP)
    assert_eq!(loadout.gear.items[&ItemSlot::Head].gems, vec![41398, 40112]);
    // Two delicates beat delicate + shifting with a 6 agi bonus
    assert_eq!(loadout.gear.items[&ItemSlot::Chest].gems, vec![40112, 40112]);
    // Items not in the pool are left alone
    assert_eq!(loadout.gear.items[&ItemSlot::MainHand].gems, vec![40117, 40117, 40117]);

    // Running again finds nothing better
    let again = feral_druid::suggest_gems(&entry, &mut loadout, &pool).unwrap();
    assert!(matches!(again, OptimizationOutcome::NoImprovement { .. }));
}
