//! StatVector - Immutable per-stat numeric container
//!
//! A stat vector holds one value per [`Stat`] plus one per [`PseudoStat`].
//! Absent stats are zero. Every operation returns a new vector and rejects
//! results that are NaN or infinite.

use crate::types::{PseudoStat, Stat, UnitStat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Malformed numeric or stat-name input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidStatError {
    #[error("unknown stat `{0}`")]
    UnknownStat(String),
    #[error("stat {stat} has non-finite value {value}")]
    NonFinite { stat: UnitStat, value: f64 },
    #[error("scale factor {0} is not finite")]
    NonFiniteFactor(f64),
    #[error("score is not finite")]
    NonFiniteScore,
}

/// Character stats plus derived pseudo-stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<UnitStat, f64>", into = "BTreeMap<UnitStat, f64>")]
pub struct StatVector {
    stats: [f64; Stat::COUNT],
    pseudo: [f64; PseudoStat::COUNT],
}

impl Default for StatVector {
    fn default() -> Self {
        Self::zero()
    }
}

impl StatVector {
    /// Vector with every stat at zero
    pub fn zero() -> Self {
        StatVector {
            stats: [0.0; Stat::COUNT],
            pseudo: [0.0; PseudoStat::COUNT],
        }
    }

    /// Build a vector from `(stat, value)` pairs; repeated keys keep the last value
    pub fn from_mapping<I, S>(values: I) -> Result<Self, InvalidStatError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<UnitStat>,
    {
        let mut vector = Self::zero();
        for (stat, value) in values {
            let stat = stat.into();
            check_finite(stat, value)?;
            *vector.slot_mut(stat) = value;
        }
        Ok(vector)
    }

    /// Build a vector from stat names, failing on names outside the enumeration
    pub fn from_named<'a, I>(values: I) -> Result<Self, InvalidStatError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let pairs = values
            .into_iter()
            .map(|(name, value)| name.parse::<UnitStat>().map(|stat| (stat, value)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_mapping(pairs)
    }

    /// Value of a stat; zero when absent
    pub fn get(&self, stat: impl Into<UnitStat>) -> f64 {
        match stat.into() {
            UnitStat::Stat(stat) => self.stats[stat.index()],
            UnitStat::Pseudo(pseudo) => self.pseudo[pseudo.index()],
        }
    }

    /// Copy of this vector with one stat replaced
    pub fn with(&self, stat: impl Into<UnitStat>, value: f64) -> Result<Self, InvalidStatError> {
        let stat = stat.into();
        check_finite(stat, value)?;
        let mut vector = *self;
        *vector.slot_mut(stat) = value;
        Ok(vector)
    }

    /// Elementwise sum
    pub fn combine(&self, other: &StatVector) -> Result<Self, InvalidStatError> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise multiply by `factor`
    pub fn scale(&self, factor: f64) -> Result<Self, InvalidStatError> {
        if !factor.is_finite() {
            return Err(InvalidStatError::NonFiniteFactor(factor));
        }
        self.map(|v| v * factor)
    }

    /// Dot product restricted to `stats`; other entries are ignored
    pub fn dot(&self, other: &StatVector, stats: &[UnitStat]) -> Result<f64, InvalidStatError> {
        let total: f64 = stats.iter().map(|s| self.get(*s) * other.get(*s)).sum();
        if total.is_finite() {
            Ok(total)
        } else {
            Err(InvalidStatError::NonFiniteScore)
        }
    }

    /// Whether every entry is zero
    pub fn is_zero(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Non-zero entries in stat order, pseudo-stats last
    pub fn iter(&self) -> impl Iterator<Item = (UnitStat, f64)> + '_ {
        let stats = Stat::all()
            .iter()
            .map(|s| (UnitStat::Stat(*s), self.stats[s.index()]));
        let pseudo = PseudoStat::all()
            .iter()
            .map(|p| (UnitStat::Pseudo(*p), self.pseudo[p.index()]));
        stats.chain(pseudo).filter(|(_, v)| *v != 0.0)
    }

    fn slot_mut(&mut self, stat: UnitStat) -> &mut f64 {
        match stat {
            UnitStat::Stat(stat) => &mut self.stats[stat.index()],
            UnitStat::Pseudo(pseudo) => &mut self.pseudo[pseudo.index()],
        }
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Result<Self, InvalidStatError> {
        self.zip_with(&Self::zero(), |a, _| f(a))
    }

    fn zip_with(
        &self,
        other: &StatVector,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, InvalidStatError> {
        let mut out = Self::zero();
        for stat in Stat::all() {
            let i = stat.index();
            out.stats[i] = f(self.stats[i], other.stats[i]);
            check_finite(UnitStat::Stat(*stat), out.stats[i])?;
        }
        for pseudo in PseudoStat::all() {
            let i = pseudo.index();
            out.pseudo[i] = f(self.pseudo[i], other.pseudo[i]);
            check_finite(UnitStat::Pseudo(*pseudo), out.pseudo[i])?;
        }
        Ok(out)
    }
}

fn check_finite(stat: UnitStat, value: f64) -> Result<(), InvalidStatError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidStatError::NonFinite { stat, value })
    }
}

impl TryFrom<BTreeMap<UnitStat, f64>> for StatVector {
    type Error = InvalidStatError;

    fn try_from(map: BTreeMap<UnitStat, f64>) -> Result<Self, Self::Error> {
        Self::from_mapping(map)
    }
}

impl From<StatVector> for BTreeMap<UnitStat, f64> {
    fn from(vector: StatVector) -> Self {
        vector.iter().collect()
    }
}
