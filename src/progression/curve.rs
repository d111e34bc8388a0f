//! Progression domain: experience needed per level.

use crate::content::LevelingDefaults;

/// `experience_required(level) = floor(base * level^exponent)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelingCurve {
    pub base: f64,
    pub exponent: f64,
}

impl Default for LevelingCurve {
    fn default() -> Self {
        Self::from(&LevelingDefaults::default())
    }
}

impl From<&LevelingDefaults> for LevelingCurve {
    fn from(defaults: &LevelingDefaults) -> Self {
        Self {
            base: defaults.base,
            exponent: defaults.exponent,
        }
    }
}

impl LevelingCurve {
    /// Experience needed to advance from `level` to `level + 1`.
    /// Levels below 1 are treated as level 1. Never less than 1, and
    /// saturates at `u64::MAX`.
    pub fn experience_required(&self, level: u32) -> u64 {
        let level = f64::from(level.max(1));
        (self.base * level.powf(self.exponent)).floor().max(1.0) as u64
    }
}
