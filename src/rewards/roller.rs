//! Rewards domain: weighted reward rolls for completions and reversals.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::content::GameplayDefaults;
use crate::core::SessionConfig;
use crate::rewards::types::{Loot, RewardOutcome, RollTable, ToggleDirection};
use crate::tasks::Difficulty;

/// Source of the random draws behind a reward roll.
pub trait RollSource {
    /// Uniform draw in `[0, 1)`
    fn chance(&mut self) -> f64;
    /// Uniform integer in `[low, high)`
    fn pick(&mut self, low: u32, high: u32) -> u32;
}

impl RollSource for ChaCha8Rng {
    fn chance(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn pick(&mut self, low: u32, high: u32) -> u32 {
        self.random_range(low..high)
    }
}

/// Resource holding the session's reward RNG
#[derive(Resource, Debug)]
pub struct RewardRng(pub ChaCha8Rng);

impl RewardRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl FromWorld for RewardRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<SessionConfig>()
            .map(|session| session.seed)
            .unwrap_or_else(|| rand::rng().random());
        Self::from_seed(seed)
    }
}

impl RollSource for RewardRng {
    fn chance(&mut self) -> f64 {
        self.0.chance()
    }

    fn pick(&mut self, low: u32, high: u32) -> u32 {
        self.0.pick(low, high)
    }
}

/// Base values and odds for every kind of completion
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RewardTables {
    pub easy_experience: u32,
    pub medium_experience: u32,
    pub hard_experience: u32,
    pub task: RollTable,
    pub prerequisite_experience: u32,
    pub prerequisite: RollTable,
}

impl RewardTables {
    pub fn from_defaults(defaults: &GameplayDefaults) -> Self {
        Self {
            easy_experience: defaults.difficulty_experience.easy,
            medium_experience: defaults.difficulty_experience.medium,
            hard_experience: defaults.difficulty_experience.hard,
            task: RollTable::from(&defaults.task_rewards),
            prerequisite_experience: defaults.prerequisite_rewards.base_experience,
            prerequisite: RollTable::from(&defaults.prerequisite_rewards.roll),
        }
    }

    /// Base experience for a task of the given difficulty
    pub fn task_base(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_experience,
            Difficulty::Medium => self.medium_experience,
            Difficulty::Hard => self.hard_experience,
        }
    }

    pub fn roll_task(
        &self,
        difficulty: Difficulty,
        direction: ToggleDirection,
        rolls: &mut impl RollSource,
    ) -> RewardOutcome {
        roll_reward(self.task_base(difficulty), direction, &self.task, rolls)
    }

    pub fn roll_prerequisite(
        &self,
        direction: ToggleDirection,
        rolls: &mut impl RollSource,
    ) -> RewardOutcome {
        roll_reward(
            self.prerequisite_experience,
            direction,
            &self.prerequisite,
            rolls,
        )
    }
}

impl Default for RewardTables {
    fn default() -> Self {
        Self::from_defaults(&GameplayDefaults::default())
    }
}

impl FromWorld for RewardTables {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<GameplayDefaults>()
            .map(Self::from_defaults)
            .unwrap_or_default()
    }
}

/// Roll the reward for flipping an item with the given base value.
///
/// Completion draws the critical roll first, then the loot roll, then the
/// loot amount for ranged loot. Reversal draws nothing and always costs the
/// flat base, whatever the completion originally granted.
fn roll_reward(
    base: u32,
    direction: ToggleDirection,
    table: &RollTable,
    rolls: &mut impl RollSource,
) -> RewardOutcome {
    let base = i64::from(base);

    if !direction.is_completing() {
        return RewardOutcome {
            experience_delta: -base,
            currency_delta: -base,
            is_critical: false,
        };
    }

    let critical = rolls.chance() < table.critical_chance;
    let experience = if critical {
        (base as f64 * table.critical_multiplier).floor() as i64
    } else {
        base
    };

    let loot = if rolls.chance() < table.loot_chance {
        match table.loot {
            Loot::Range { min, max } => i64::from(rolls.pick(min, max)),
            Loot::Fixed(amount) => i64::from(amount),
        }
    } else {
        0
    };

    RewardOutcome {
        experience_delta: experience,
        currency_delta: experience.saturating_add(loot),
        is_critical: critical || loot > 0,
    }
}

/// Roll source replaying fixed draws, for exercising each branch in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedRolls {
    pub chances: std::collections::VecDeque<f64>,
    pub picks: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedRolls {
    pub fn new(chances: &[f64], picks: &[u32]) -> Self {
        Self {
            chances: chances.iter().copied().collect(),
            picks: picks.iter().copied().collect(),
        }
    }

    /// Draws that never hit any chance
    pub fn plain() -> Self {
        Self::new(&[0.99; 16], &[])
    }

    pub fn is_exhausted(&self) -> bool {
        self.chances.is_empty() && self.picks.is_empty()
    }
}

#[cfg(test)]
impl RollSource for ScriptedRolls {
    fn chance(&mut self) -> f64 {
        self.chances.pop_front().expect("scripted chance exhausted")
    }

    fn pick(&mut self, low: u32, high: u32) -> u32 {
        let value = self.picks.pop_front().expect("scripted pick exhausted");
        assert!((low..high).contains(&value), "scripted pick out of range");
        value
    }
}
