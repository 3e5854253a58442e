//! GemOptimizer - fills every socket of the current gear with the best gems
//!
//! Per item, two fillings are compared: the best gem for each socket ignoring
//! color, and the best color-matching gem for each socket plus the socket
//! bonus. The higher-scoring filling wins; on a tie the color-blind one does.
//! A socket with no acceptable gem in the pool keeps whatever it holds.

use super::pool::{socketed_stats, CandidatePool, GemColor, GemInfo, ItemInfo};
use super::{Assignment, GearOptimizer, OptimizationRequest, OptimizerError};
use crate::ep::EpScorer;
use crate::preset::EquippedItem;

/// Greedy per-item gem suggestion
#[derive(Debug, Clone, Copy, Default)]
pub struct GemOptimizer;

/// Gem ids by socket index (0 = empty) with their pool entries
struct Filling<'p> {
    ids: Vec<u32>,
    gems: Vec<Option<&'p GemInfo>>,
}

impl GemOptimizer {
    pub fn new() -> Self {
        GemOptimizer
    }

    /// Best first-seen gem satisfying `accept` for each socket, falling back
    /// to the socket's `current` gem
    fn fill<'p>(
        scorer: &EpScorer,
        pool: &'p CandidatePool,
        sockets: &[GemColor],
        current: &[u32],
        accept: impl Fn(GemColor, GemColor) -> bool,
    ) -> Result<Filling<'p>, OptimizerError> {
        let mut filling = Filling {
            ids: Vec::with_capacity(sockets.len()),
            gems: Vec::with_capacity(sockets.len()),
        };
        for (i, socket) in sockets.iter().enumerate() {
            let candidates = pool.gems.iter().filter(|g| accept(g.color, *socket));
            match scorer.best(candidates, |g| &g.stats)? {
                Some((gem, _)) => {
                    filling.ids.push(gem.id);
                    filling.gems.push(Some(gem));
                }
                None => {
                    let id = current.get(i).copied().unwrap_or(0);
                    filling.ids.push(id);
                    filling.gems.push(pool.gem(id));
                }
            }
        }
        Ok(filling)
    }

    fn filling_score(
        scorer: &EpScorer,
        info: &ItemInfo,
        filling: &Filling<'_>,
    ) -> Result<f64, OptimizerError> {
        Ok(scorer.score(&socketed_stats(info, &filling.gems)?)?)
    }

    /// Best gem ids for one item and the item's score with them
    fn best_filling(
        scorer: &EpScorer,
        pool: &CandidatePool,
        info: &ItemInfo,
        current: &[u32],
    ) -> Result<(Vec<u32>, f64), OptimizerError> {
        let any = Self::fill(scorer, pool, &info.sockets, current, GemColor::fits)?;
        let matching = Self::fill(scorer, pool, &info.sockets, current, GemColor::matches)?;
        let any_score = Self::filling_score(scorer, info, &any)?;
        let matching_score = Self::filling_score(scorer, info, &matching)?;
        tracing::debug!(item = info.id, any_score, matching_score, "compared gem fillings");

        if matching_score > any_score {
            Ok((matching.ids, matching_score))
        } else {
            Ok((any.ids, any_score))
        }
    }
}

impl GearOptimizer for GemOptimizer {
    fn optimize(
        &self,
        request: &OptimizationRequest<'_>,
    ) -> Result<Option<Assignment>, OptimizerError> {
        let mut changes = Vec::new();
        let mut gear = request.loadout.gear.clone();

        for (slot, equipped) in &request.loadout.gear.items {
            let Some(info) = request.pool.item(equipped.id) else {
                tracing::debug!(?slot, item = equipped.id, "item not in candidate pool, skipped");
                continue;
            };
            if info.sockets.is_empty() {
                continue;
            }
            let socketed = request.scorer.score(&request.pool.equipped_stats(equipped)?)?;
            let (gems, score) =
                Self::best_filling(request.scorer, request.pool, info, &equipped.gems)?;
            // Only items that actually gain EP are reported as changed
            if score > socketed {
                let item = EquippedItem {
                    gems,
                    ..equipped.clone()
                };
                gear.items.insert(*slot, item.clone());
                changes.push((*slot, item));
            }
        }

        if changes.is_empty() {
            return Ok(None);
        }
        let current = request.current_score()?;
        let score = request.scorer.score(&request.pool.gear_stats(&gear)?)?;
        if score > current {
            Ok(Some(Assignment { changes, score }))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ep::EpWeights;
    use crate::loadout::{Buffs, LoadoutBundle};
    use crate::optimize::{apply_optimization, OptimizationOutcome};
    use crate::preset::{GearData, RotationData, RotationKind, TalentsData};
    use crate::stat_vector::StatVector;
    use crate::types::{ItemSlot, Stat};

    fn scorer() -> EpScorer {
        let weights = StatVector::from_mapping([
            (Stat::Agility, 2.39),
            (Stat::Strength, 2.4),
            (Stat::AttackPower, 1.0),
            (Stat::MeleeHit, 2.51),
        ])
        .unwrap();
        EpScorer::new(
            vec![
                Stat::Agility.into(),
                Stat::Strength.into(),
                Stat::AttackPower.into(),
                Stat::MeleeHit.into(),
            ],
            EpWeights::new(weights, Stat::AttackPower.into()).unwrap(),
        )
    }

    fn gem(id: u32, color: GemColor, stats: &[(Stat, f64)]) -> GemInfo {
        GemInfo {
            id,
            name: format!("gem {id}"),
            color,
            stats: StatVector::from_mapping(stats.iter().copied()).unwrap(),
        }
    }

    fn pool(bonus_agility: f64) -> CandidatePool {
        CandidatePool {
            items: vec![ItemInfo {
                id: 100,
                name: "Headguard".to_string(),
                stats: StatVector::from_mapping([(Stat::Agility, 50.0)]).unwrap(),
                sockets: vec![GemColor::Meta, GemColor::Blue],
                socket_bonus: StatVector::from_mapping([(Stat::Agility, bonus_agility)]).unwrap(),
            }],
            gems: vec![
                gem(1, GemColor::Red, &[(Stat::Agility, 20.0)]),
                gem(2, GemColor::Purple, &[(Stat::Agility, 10.0)]),
                gem(3, GemColor::Meta, &[(Stat::AttackPower, 42.0)]),
                // Same EP as gem 1, declared later
                gem(4, GemColor::Red, &[(Stat::Agility, 20.0)]),
            ],
        }
    }

    fn loadout(gems: Vec<u32>) -> LoadoutBundle {
        let mut gear = GearData::default();
        gear.items.insert(
            ItemSlot::Head,
            EquippedItem {
                id: 100,
                enchant: Some(3817),
                gems,
            },
        );
        gear.items.insert(ItemSlot::Feet, EquippedItem::new(555));
        LoadoutBundle {
            talents_preset: "Standard".to_string(),
            talents: TalentsData {
                talents: "-553002".to_string(),
                glyphs: None,
            },
            rotation_preset: "Legacy".to_string(),
            rotation: RotationData {
                kind: RotationKind::Legacy,
                rotation: serde_json::Value::Null,
            },
            gear_preset: "P1".to_string(),
            gear,
            consumes: Default::default(),
            spec_options: Default::default(),
            buffs: Buffs::default(),
        }
    }

    #[test]
    fn test_small_bonus_ignores_colors() {
        let pool = pool(6.0);
        let current = loadout(vec![]);
        let request = OptimizationRequest {
            scorer: &scorer(),
            loadout: &current,
            pool: &pool,
        };
        let assignment = GemOptimizer::new().optimize(&request).unwrap().unwrap();
        // Red 20 agi beats purple 10 agi + 6 agi bonus; first-seen red wins the tie
        assert_eq!(assignment.changes.len(), 1);
        assert_eq!(assignment.changes[0].1.gems, vec![3, 1]);
        assert_eq!(assignment.changes[0].1.enchant, Some(3817));
    }

    #[test]
    fn test_large_bonus_matches_colors() {
        let pool = pool(16.0);
        let current = loadout(vec![]);
        let request = OptimizationRequest {
            scorer: &scorer(),
            loadout: &current,
            pool: &pool,
        };
        let assignment = GemOptimizer::new().optimize(&request).unwrap().unwrap();
        assert_eq!(assignment.changes[0].1.gems, vec![3, 2]);
        let expected = 42.0 + (50.0 + 10.0 + 16.0) * 2.39;
        assert!((assignment.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_already_optimal_is_no_improvement() {
        let pool = pool(6.0);
        let mut current = loadout(vec![3, 1]);
        let before = current.clone();
        let outcome =
            apply_optimization(&mut current, &scorer(), &pool, &GemOptimizer::new()).unwrap();
        assert!(matches!(outcome, OptimizationOutcome::NoImprovement { .. }));
        assert_eq!(current, before);
    }

    #[test]
    fn test_apply_fills_sockets() {
        let pool = pool(6.0);
        let mut current = loadout(vec![0, 2]);
        apply_optimization(&mut current, &scorer(), &pool, &GemOptimizer::new()).unwrap();
        assert_eq!(current.gear.items[&ItemSlot::Head].gems, vec![3, 1]);
        assert_eq!(current.gear.items[&ItemSlot::Feet], EquippedItem::new(555));
    }

    #[test]
    fn test_socket_without_candidates_keeps_its_gem() {
        // No meta gem in the pool: the meta socket keeps its gem, the red one is filled
        let pool = CandidatePool {
            items: vec![ItemInfo {
                id: 100,
                name: "Headguard".to_string(),
                stats: StatVector::zero(),
                sockets: vec![GemColor::Meta, GemColor::Red],
                socket_bonus: StatVector::from_mapping([(Stat::Agility, 6.0)]).unwrap(),
            }],
            gems: vec![gem(1, GemColor::Red, &[(Stat::Agility, 20.0)])],
        };
        let current = loadout(vec![41398, 0]);
        let request = OptimizationRequest {
            scorer: &scorer(),
            loadout: &current,
            pool: &pool,
        };
        let assignment = GemOptimizer::new().optimize(&request).unwrap().unwrap();
        assert_eq!(assignment.changes.len(), 1);
        assert_eq!(assignment.changes[0].1.gems, vec![41398, 1]);
        // Meta gem unknown to the pool, so the socket bonus is not earned
        assert!((assignment.score - 20.0 * 2.39).abs() < 1e-9);
    }

    #[test]
    fn test_equal_scoring_gems_are_not_reported() {
        let mut pool = pool(6.0);
        pool.items.push(ItemInfo {
            id: 200,
            name: "Boots".to_string(),
            stats: StatVector::zero(),
            sockets: vec![GemColor::Red],
            socket_bonus: StatVector::zero(),
        });
        let mut current = loadout(vec![]);
        // Gem 4 scores the same as gem 1, which the optimizer would pick
        current.gear.items.insert(
            ItemSlot::Feet,
            EquippedItem {
                id: 200,
                enchant: None,
                gems: vec![4],
            },
        );
        let before = current.clone();
        let outcome =
            apply_optimization(&mut current, &scorer(), &pool, &GemOptimizer::new()).unwrap();
        match outcome {
            OptimizationOutcome::Improved { changed_slots, .. } => {
                assert_eq!(changed_slots, vec![ItemSlot::Head])
            }
            other => panic!("expected improvement, got {other:?}"),
        }
        assert_eq!(current.gear.items[&ItemSlot::Feet], before.gear.items[&ItemSlot::Feet]);
    }
}
