//! Data definitions for the gameplay defaults RON file.
//!
//! These structs mirror the structure in assets/data/gameplay_defaults.ron
//! and are used for deserialization. Built-in defaults reproduce the file
//! exactly so the app still runs when the file is missing.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tasks::{Category, Difficulty};

// ============================================================================
// Gameplay Defaults (gameplay_defaults.ron) - Single struct, not a list
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Resource)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    pub leveling: LevelingDefaults,
    pub difficulty_experience: DifficultyExperienceDef,
    pub task_rewards: RollTableDef,
    pub prerequisite_rewards: PrerequisiteRewardsDef,
    pub avatar_catalog: AvatarCatalogDef,
    pub starter_tasks: Vec<StarterTaskDef>,
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        Self {
            schema_version: 1,
            leveling: LevelingDefaults::default(),
            difficulty_experience: DifficultyExperienceDef::default(),
            task_rewards: RollTableDef {
                critical_chance: 0.20,
                critical_multiplier: 2.5,
                loot_chance: 0.15,
                loot: LootDef::Range { min: 50, max: 200 },
            },
            prerequisite_rewards: PrerequisiteRewardsDef {
                base_experience: 25,
                roll: RollTableDef {
                    critical_chance: 0.15,
                    critical_multiplier: 4.0,
                    loot_chance: 0.10,
                    loot: LootDef::Fixed(25),
                },
            },
            avatar_catalog: AvatarCatalogDef::default(),
            starter_tasks: vec![StarterTaskDef {
                title: "Notice Your Life".to_string(),
                description: "Insert the tasks that occupy your current spacetime to visualize their weight.".to_string(),
                category: Category::Habits,
                difficulty: Difficulty::Medium,
                prerequisite_labels: vec![String::new()],
            }],
        }
    }
}

// ============================================================================
// Leveling
// ============================================================================

/// `experience_required(level) = floor(base * level^exponent)`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelingDefaults {
    pub base: f64,
    pub exponent: f64,
}

impl Default for LevelingDefaults {
    fn default() -> Self {
        Self {
            base: 500.0,
            exponent: 1.2,
        }
    }
}

// ============================================================================
// Reward tables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DifficultyExperienceDef {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl Default for DifficultyExperienceDef {
    fn default() -> Self {
        Self {
            easy: 100,
            medium: 250,
            hard: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RollTableDef {
    /// Probability in [0, 1] that a completion is critical
    pub critical_chance: f64,
    /// Experience multiplier applied on a critical roll (result is floored)
    pub critical_multiplier: f64,
    /// Probability in [0, 1] of an extra coin bonus
    pub loot_chance: f64,
    pub loot: LootDef,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum LootDef {
    /// Uniform integer in `[min, max)`
    Range { min: u32, max: u32 },
    Fixed(u32),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrerequisiteRewardsDef {
    /// Flat base for every prerequisite, independent of the parent's difficulty
    pub base_experience: u32,
    pub roll: RollTableDef,
}

// ============================================================================
// Avatar catalog
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AvatarCatalogDef {
    pub priced_count: u32,
    pub price_step: u32,
}

impl Default for AvatarCatalogDef {
    fn default() -> Self {
        Self {
            priced_count: 100,
            price_step: 500,
        }
    }
}

// ============================================================================
// Starter board
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StarterTaskDef {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub prerequisite_labels: Vec<String>,
}
