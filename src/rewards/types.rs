//! Rewards domain: reward outcomes and roll tables.

use crate::content::{LootDef, RollTableDef};

/// Direction of a completion toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleDirection {
    /// Pending -> completed; rolls for critical and loot
    Completing,
    /// Completed -> pending; flat penalty of the base value
    Reverting,
}

impl ToggleDirection {
    /// Direction for flipping an item that is currently `completed`
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            ToggleDirection::Reverting
        } else {
            ToggleDirection::Completing
        }
    }

    pub fn is_completing(&self) -> bool {
        matches!(self, ToggleDirection::Completing)
    }
}

/// Result of a single toggle, applied to the ledger by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewardOutcome {
    pub experience_delta: i64,
    pub currency_delta: i64,
    /// Set by a critical experience roll or by any loot bonus
    pub is_critical: bool,
}

impl RewardOutcome {
    /// No-op result for refused or view-only toggles
    pub const NONE: RewardOutcome = RewardOutcome {
        experience_delta: 0,
        currency_delta: 0,
        is_critical: false,
    };
}

/// Coin bonus granted by a successful loot roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loot {
    /// Uniform integer in `[min, max)`
    Range { min: u32, max: u32 },
    Fixed(u32),
}

impl From<&LootDef> for Loot {
    fn from(def: &LootDef) -> Self {
        match *def {
            LootDef::Range { min, max } => Loot::Range { min, max },
            LootDef::Fixed(amount) => Loot::Fixed(amount),
        }
    }
}

/// Odds for one kind of completion (task or prerequisite)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollTable {
    pub critical_chance: f64,
    pub critical_multiplier: f64,
    pub loot_chance: f64,
    pub loot: Loot,
}

impl From<&RollTableDef> for RollTable {
    fn from(def: &RollTableDef) -> Self {
        Self {
            critical_chance: def.critical_chance,
            critical_multiplier: def.critical_multiplier,
            loot_chance: def.loot_chance,
            loot: Loot::from(&def.loot),
        }
    }
}

/// What a reward was granted for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardSource {
    Task {
        task_id: String,
    },
    Prerequisite {
        task_id: String,
        prerequisite_id: String,
    },
    #[cfg(feature = "dev-tools")]
    DevGrant,
}
