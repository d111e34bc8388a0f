//! Progression domain: the per-user ledger of experience, level and coins.

use bevy::prelude::*;

use crate::content::GameplayDefaults;
use crate::progression::curve::LevelingCurve;
use crate::rewards::RewardOutcome;

/// Levels crossed by a single experience change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub from: u32,
    pub to: u32,
}

impl LevelChange {
    pub fn levels_gained(&self) -> u32 {
        self.to - self.from
    }

    pub fn leveled_up(&self) -> bool {
        self.to > self.from
    }
}

/// Resource tracking the player's progression.
///
/// Experience and coins are clamped at zero. Level only ever goes up: a
/// reversal that would dip below the current level's floor just empties the
/// experience bar.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ProgressionLedger {
    experience: u64,
    level: u32,
    coins: u64,
    curve: LevelingCurve,
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self::new(LevelingCurve::default())
    }
}

impl FromWorld for ProgressionLedger {
    fn from_world(world: &mut World) -> Self {
        let curve = world
            .get_resource::<GameplayDefaults>()
            .map(|defaults| LevelingCurve::from(&defaults.leveling))
            .unwrap_or_default();
        Self::new(curve)
    }
}

impl ProgressionLedger {
    pub fn new(curve: LevelingCurve) -> Self {
        Self {
            experience: 0,
            level: 1,
            coins: 0,
            curve,
        }
    }

    /// Rebuild a ledger from persisted values
    pub fn restore(experience: u64, level: u32, coins: u64, curve: LevelingCurve) -> Self {
        Self {
            experience,
            level: level.max(1),
            coins,
            curve,
        }
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Experience needed to leave the current level
    pub fn experience_to_next_level(&self) -> u64 {
        self.curve.experience_required(self.level)
    }

    /// Add (or remove) experience, cascading through as many level-ups as
    /// the total covers.
    pub fn apply_experience(&mut self, delta: i64) -> LevelChange {
        let from = self.level;
        let mut total = i128::from(self.experience) + i128::from(delta);
        let mut needed = i128::from(self.curve.experience_required(self.level));

        while total >= needed && self.level < u32::MAX {
            total -= needed;
            self.level += 1;
            needed = i128::from(self.curve.experience_required(self.level));
        }

        self.experience = u64::try_from(total.max(0)).unwrap_or(u64::MAX);

        LevelChange {
            from,
            to: self.level,
        }
    }

    pub fn apply_currency(&mut self, delta: i64) {
        self.coins = self.coins.saturating_add_signed(delta);
    }

    pub fn apply_reward(&mut self, outcome: &RewardOutcome) -> LevelChange {
        let change = self.apply_experience(outcome.experience_delta);
        self.apply_currency(outcome.currency_delta);
        change
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.coins >= amount
    }

    pub fn spend(&mut self, amount: u64) -> bool {
        if self.coins >= amount {
            self.coins -= amount;
            true
        } else {
            false
        }
    }

    pub fn rank_title(&self) -> &'static str {
        rank_title(self.level)
    }
}

/// Title shown next to the level
pub fn rank_title(level: u32) -> &'static str {
    if level < 5 {
        "Fragment Seeker"
    } else if level < 10 {
        "Momentum Builder"
    } else {
        "Pattern Mapper"
    }
}
