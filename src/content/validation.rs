//! Validation for gameplay defaults after loading.

use super::data::*;

/// A validation error with context about what failed.
#[derive(Debug, thiserror::Error)]
#[error("{section}.{field} {problem}")]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub problem: String,
}

/// Helper macro for checking a probability lies in [0, 1]
macro_rules! check_chance {
    ($errors:expr, $section:expr, $field:expr, $value:expr) => {
        if !(0.0..=1.0).contains(&$value) {
            $errors.push(ValidationError {
                section: $section,
                field: $field,
                problem: format!("must be within [0, 1], got {}", $value),
            });
        }
    };
}

/// Level the curve must reach without saturating `u64`
const CURVE_HEADROOM_LEVEL: u32 = 10_000;

fn validate_roll_table(errors: &mut Vec<ValidationError>, section: &'static str, table: &RollTableDef) {
    check_chance!(errors, section, "critical_chance", table.critical_chance);
    check_chance!(errors, section, "loot_chance", table.loot_chance);

    if !table.critical_multiplier.is_finite() || table.critical_multiplier < 1.0 {
        errors.push(ValidationError {
            section,
            field: "critical_multiplier",
            problem: format!("must be at least 1.0, got {}", table.critical_multiplier),
        });
    }

    if let LootDef::Range { min, max } = table.loot {
        if min >= max {
            errors.push(ValidationError {
                section,
                field: "loot",
                problem: format!("range {}..{} is empty", min, max),
            });
        }
    }
}

/// Validate gameplay defaults.
/// Returns a list of validation errors, empty if the defaults are usable.
pub fn validate_defaults(defaults: &GameplayDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Leveling curve must be finite, strictly increasing and positive from level 1
    let leveling = &defaults.leveling;
    if !leveling.base.is_finite() || leveling.base < 1.0 {
        errors.push(ValidationError {
            section: "leveling",
            field: "base",
            problem: format!("must be a finite number of at least 1, got {}", leveling.base),
        });
    }
    if !leveling.exponent.is_finite() || leveling.exponent <= 0.0 {
        errors.push(ValidationError {
            section: "leveling",
            field: "exponent",
            problem: format!("must be finite and positive, got {}", leveling.exponent),
        });
    }
    if errors.is_empty() {
        let ceiling = leveling.base * f64::from(CURVE_HEADROOM_LEVEL).powf(leveling.exponent);
        if ceiling >= u64::MAX as f64 {
            errors.push(ValidationError {
                section: "leveling",
                field: "exponent",
                problem: format!(
                    "outgrows u64 before level {}, got base {} and exponent {}",
                    CURVE_HEADROOM_LEVEL, leveling.base, leveling.exponent
                ),
            });
        }
    }

    let tiers = &defaults.difficulty_experience;
    for (field, value) in [("easy", tiers.easy), ("medium", tiers.medium), ("hard", tiers.hard)] {
        if value == 0 {
            errors.push(ValidationError {
                section: "difficulty_experience",
                field,
                problem: "must be positive".to_string(),
            });
        }
    }
    if defaults.prerequisite_rewards.base_experience == 0 {
        errors.push(ValidationError {
            section: "prerequisite_rewards",
            field: "base_experience",
            problem: "must be positive".to_string(),
        });
    }

    validate_roll_table(&mut errors, "task_rewards", &defaults.task_rewards);
    validate_roll_table(
        &mut errors,
        "prerequisite_rewards.roll",
        &defaults.prerequisite_rewards.roll,
    );

    if defaults.avatar_catalog.price_step == 0 {
        errors.push(ValidationError {
            section: "avatar_catalog",
            field: "price_step",
            problem: "must be positive".to_string(),
        });
    }

    for starter in &defaults.starter_tasks {
        if starter.title.trim().is_empty() {
            errors.push(ValidationError {
                section: "starter_tasks",
                field: "title",
                problem: "must not be blank".to_string(),
            });
        }
    }

    errors
}
