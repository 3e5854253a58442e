//! Core identifiers shared by every specialization

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Character stat tracked by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    // Primary
    Strength,
    Agility,
    Stamina,
    Intellect,
    Spirit,
    // Spell
    SpellPower,
    Mp5,
    SpellHit,
    SpellCrit,
    SpellHaste,
    SpellPenetration,
    // Physical
    AttackPower,
    RangedAttackPower,
    MeleeHit,
    MeleeCrit,
    MeleeHaste,
    ArmorPenetration,
    Expertise,
    // Defensive
    Armor,
    BonusArmor,
    Defense,
    Block,
    BlockValue,
    Dodge,
    Parry,
    Resilience,
    // Resources
    Health,
    Mana,
    Energy,
    Rage,
    // Resistances
    ArcaneResistance,
    FireResistance,
    FrostResistance,
    NatureResistance,
    ShadowResistance,
}

impl Stat {
    /// Number of stats in the enumeration
    pub const COUNT: usize = 35;

    /// Get all stats in declaration order
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Strength,
            Stat::Agility,
            Stat::Stamina,
            Stat::Intellect,
            Stat::Spirit,
            Stat::SpellPower,
            Stat::Mp5,
            Stat::SpellHit,
            Stat::SpellCrit,
            Stat::SpellHaste,
            Stat::SpellPenetration,
            Stat::AttackPower,
            Stat::RangedAttackPower,
            Stat::MeleeHit,
            Stat::MeleeCrit,
            Stat::MeleeHaste,
            Stat::ArmorPenetration,
            Stat::Expertise,
            Stat::Armor,
            Stat::BonusArmor,
            Stat::Defense,
            Stat::Block,
            Stat::BlockValue,
            Stat::Dodge,
            Stat::Parry,
            Stat::Resilience,
            Stat::Health,
            Stat::Mana,
            Stat::Energy,
            Stat::Rage,
            Stat::ArcaneResistance,
            Stat::FireResistance,
            Stat::FrostResistance,
            Stat::NatureResistance,
            Stat::ShadowResistance,
        ]
    }

    /// Position of this stat in [`Stat::all`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// snake_case name used in declarations
    pub fn name(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Agility => "agility",
            Stat::Stamina => "stamina",
            Stat::Intellect => "intellect",
            Stat::Spirit => "spirit",
            Stat::SpellPower => "spell_power",
            Stat::Mp5 => "mp5",
            Stat::SpellHit => "spell_hit",
            Stat::SpellCrit => "spell_crit",
            Stat::SpellHaste => "spell_haste",
            Stat::SpellPenetration => "spell_penetration",
            Stat::AttackPower => "attack_power",
            Stat::RangedAttackPower => "ranged_attack_power",
            Stat::MeleeHit => "melee_hit",
            Stat::MeleeCrit => "melee_crit",
            Stat::MeleeHaste => "melee_haste",
            Stat::ArmorPenetration => "armor_penetration",
            Stat::Expertise => "expertise",
            Stat::Armor => "armor",
            Stat::BonusArmor => "bonus_armor",
            Stat::Defense => "defense",
            Stat::Block => "block",
            Stat::BlockValue => "block_value",
            Stat::Dodge => "dodge",
            Stat::Parry => "parry",
            Stat::Resilience => "resilience",
            Stat::Health => "health",
            Stat::Mana => "mana",
            Stat::Energy => "energy",
            Stat::Rage => "rage",
            Stat::ArcaneResistance => "arcane_resistance",
            Stat::FireResistance => "fire_resistance",
            Stat::FrostResistance => "frost_resistance",
            Stat::NatureResistance => "nature_resistance",
            Stat::ShadowResistance => "shadow_resistance",
        }
    }
}

/// Derived quantity that is not a character attribute but still carries EP
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PseudoStat {
    MainHandDps,
    OffHandDps,
    RangedDps,
}

impl PseudoStat {
    pub const COUNT: usize = 3;

    pub fn all() -> &'static [PseudoStat] {
        &[PseudoStat::MainHandDps, PseudoStat::OffHandDps, PseudoStat::RangedDps]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PseudoStat::MainHandDps => "main_hand_dps",
            PseudoStat::OffHandDps => "off_hand_dps",
            PseudoStat::RangedDps => "ranged_dps",
        }
    }
}

/// Either a [`Stat`] or a [`PseudoStat`]; the key type of a stat vector
///
/// Serialized as its snake_case name so it can be used as a TOML table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UnitStat {
    Stat(Stat),
    Pseudo(PseudoStat),
}

impl UnitStat {
    pub fn name(self) -> &'static str {
        match self {
            UnitStat::Stat(stat) => stat.name(),
            UnitStat::Pseudo(pseudo) => pseudo.name(),
        }
    }
}

impl From<Stat> for UnitStat {
    fn from(stat: Stat) -> Self {
        UnitStat::Stat(stat)
    }
}

impl From<PseudoStat> for UnitStat {
    fn from(pseudo: PseudoStat) -> Self {
        UnitStat::Pseudo(pseudo)
    }
}

impl fmt::Display for UnitStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitStat {
    type Err = crate::stat_vector::InvalidStatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(stat) = Stat::all().iter().find(|stat| stat.name() == s) {
            return Ok(UnitStat::Stat(*stat));
        }
        if let Some(pseudo) = PseudoStat::all().iter().find(|p| p.name() == s) {
            return Ok(UnitStat::Pseudo(*pseudo));
        }
        Err(crate::stat_vector::InvalidStatError::UnknownStat(s.to_string()))
    }
}

impl TryFrom<String> for UnitStat {
    type Error = crate::stat_vector::InvalidStatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<UnitStat> for String {
    fn from(stat: UnitStat) -> Self {
        stat.name().to_string()
    }
}

/// Equipment slot for gear
///
/// Serialized as its snake_case name; gear tables are keyed by slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemSlot {
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Finger1,
    Finger2,
    Trinket1,
    Trinket2,
    MainHand,
    OffHand,
    Ranged,
}

impl ItemSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [ItemSlot] {
        &[
            ItemSlot::Head,
            ItemSlot::Neck,
            ItemSlot::Shoulder,
            ItemSlot::Back,
            ItemSlot::Chest,
            ItemSlot::Wrist,
            ItemSlot::Hands,
            ItemSlot::Waist,
            ItemSlot::Legs,
            ItemSlot::Feet,
            ItemSlot::Finger1,
            ItemSlot::Finger2,
            ItemSlot::Trinket1,
            ItemSlot::Trinket2,
            ItemSlot::MainHand,
            ItemSlot::OffHand,
            ItemSlot::Ranged,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemSlot::Head => "head",
            ItemSlot::Neck => "neck",
            ItemSlot::Shoulder => "shoulder",
            ItemSlot::Back => "back",
            ItemSlot::Chest => "chest",
            ItemSlot::Wrist => "wrist",
            ItemSlot::Hands => "hands",
            ItemSlot::Waist => "waist",
            ItemSlot::Legs => "legs",
            ItemSlot::Feet => "feet",
            ItemSlot::Finger1 => "finger1",
            ItemSlot::Finger2 => "finger2",
            ItemSlot::Trinket1 => "trinket1",
            ItemSlot::Trinket2 => "trinket2",
            ItemSlot::MainHand => "main_hand",
            ItemSlot::OffHand => "off_hand",
            ItemSlot::Ranged => "ranged",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown item slot `{0}`")]
pub struct UnknownItemSlot(pub String);

impl TryFrom<String> for ItemSlot {
    type Error = UnknownItemSlot;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ItemSlot::all()
            .iter()
            .find(|slot| slot.name() == s)
            .copied()
            .ok_or(UnknownItemSlot(s))
    }
}

impl From<ItemSlot> for String {
    fn from(slot: ItemSlot) -> Self {
        slot.name().to_string()
    }
}

/// Identifier for a specialization (e.g. `feral_druid`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecId(pub String);

impl From<&str> for SpecId {
    fn from(s: &str) -> Self {
        SpecId(s.to_string())
    }
}

impl From<String> for SpecId {
    fn from(s: String) -> Self {
        SpecId(s)
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Unknown,
    Alliance,
    Horde,
}
