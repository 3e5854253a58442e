//! Candidate pool - item and gem stats the optimizer may choose from

use crate::preset::{EquippedItem, GearData};
use crate::stat_vector::{InvalidStatError, StatVector};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GemColor {
    Meta,
    Red,
    Yellow,
    Blue,
    Orange,
    Green,
    Purple,
    Prismatic,
}

impl GemColor {
    /// Whether a gem of this color can be placed in `socket` at all
    pub fn fits(self, socket: GemColor) -> bool {
        (self == GemColor::Meta) == (socket == GemColor::Meta)
    }

    /// Whether a gem of this color counts toward `socket`'s bonus
    pub fn matches(self, socket: GemColor) -> bool {
        use GemColor::*;
        match socket {
            Meta => self == Meta,
            Red => matches!(self, Red | Orange | Purple | Prismatic),
            Yellow => matches!(self, Yellow | Orange | Green | Prismatic),
            Blue => matches!(self, Blue | Green | Purple | Prismatic),
            // Sockets are only ever meta, red, yellow or blue
            Orange | Green | Purple | Prismatic => self.fits(socket),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stats: StatVector,
    #[serde(default)]
    pub sockets: Vec<GemColor>,
    #[serde(default)]
    pub socket_bonus: StatVector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemInfo {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub color: GemColor,
    #[serde(default)]
    pub stats: StatVector,
}

/// Items and gems known to the optimizer, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidatePool {
    #[serde(default)]
    pub items: Vec<ItemInfo>,
    #[serde(default)]
    pub gems: Vec<GemInfo>,
}

impl CandidatePool {
    pub fn item(&self, id: u32) -> Option<&ItemInfo> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn gem(&self, id: u32) -> Option<&GemInfo> {
        self.gems.iter().find(|g| g.id == id)
    }

    /// Stats of one equipped item including gems and an earned socket bonus
    ///
    /// Items or gems missing from the pool contribute nothing.
    pub fn equipped_stats(&self, equipped: &EquippedItem) -> Result<StatVector, InvalidStatError> {
        let Some(info) = self.item(equipped.id) else {
            return Ok(StatVector::zero());
        };
        let gems: Vec<Option<&GemInfo>> = (0..info.sockets.len())
            .map(|i| equipped.gems.get(i).and_then(|id| self.gem(*id)))
            .collect();
        socketed_stats(info, &gems)
    }

    /// Total stats of a gear set
    pub fn gear_stats(&self, gear: &GearData) -> Result<StatVector, InvalidStatError> {
        gear.items
            .values()
            .try_fold(StatVector::zero(), |total, item| {
                total.combine(&self.equipped_stats(item)?)
            })
    }
}

/// Item stats plus `gems` by socket index, with the socket bonus when every
/// socket holds a matching gem
pub(crate) fn socketed_stats(
    info: &ItemInfo,
    gems: &[Option<&GemInfo>],
) -> Result<StatVector, InvalidStatError> {
    let mut total = info.stats;
    let mut bonus_earned = !info.sockets.is_empty();
    for (i, socket) in info.sockets.iter().enumerate() {
        match gems.get(i).copied().flatten() {
            Some(gem) => {
                total = total.combine(&gem.stats)?;
                bonus_earned &= gem.color.matches(*socket);
            }
            None => bonus_earned = false,
        }
    }
    if bonus_earned {
        total = total.combine(&info.socket_bonus)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stat;

    #[test]
    fn test_color_rules() {
        assert!(GemColor::Orange.matches(GemColor::Red));
        assert!(GemColor::Orange.matches(GemColor::Yellow));
        assert!(!GemColor::Orange.matches(GemColor::Blue));
        assert!(GemColor::Prismatic.matches(GemColor::Blue));
        assert!(!GemColor::Prismatic.matches(GemColor::Meta));

        assert!(GemColor::Red.fits(GemColor::Blue));
        assert!(!GemColor::Red.fits(GemColor::Meta));
        assert!(!GemColor::Meta.fits(GemColor::Red));
        assert!(GemColor::Meta.fits(GemColor::Meta));
    }

    #[test]
    fn test_socket_bonus_needs_all_matching() {
        let item = ItemInfo {
            id: 1,
            name: "Helm".to_string(),
            stats: StatVector::from_mapping([(Stat::Agility, 40.0)]).unwrap(),
            sockets: vec![GemColor::Red, GemColor::Blue],
            socket_bonus: StatVector::from_mapping([(Stat::Agility, 6.0)]).unwrap(),
        };
        let red = GemInfo {
            id: 10,
            name: "Delicate".to_string(),
            color: GemColor::Red,
            stats: StatVector::from_mapping([(Stat::Agility, 20.0)]).unwrap(),
        };
        let purple = GemInfo {
            id: 11,
            name: "Shifting".to_string(),
            color: GemColor::Purple,
            stats: StatVector::from_mapping([(Stat::Agility, 10.0)]).unwrap(),
        };

        let mismatched = socketed_stats(&item, &[Some(&red), Some(&red)]).unwrap();
        assert!((mismatched.get(Stat::Agility) - 80.0).abs() < f64::EPSILON);

        let matched = socketed_stats(&item, &[Some(&red), Some(&purple)]).unwrap();
        assert!((matched.get(Stat::Agility) - 76.0).abs() < f64::EPSILON);

        let empty = socketed_stats(&item, &[Some(&red), None]).unwrap();
        assert!((empty.get(Stat::Agility) - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_item_contributes_nothing() {
        let pool = CandidatePool::default();
        let stats = pool.equipped_stats(&EquippedItem::new(12345)).unwrap();
        assert!(stats.is_zero());
    }
}
