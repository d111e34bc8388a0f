//! Content domain: gameplay defaults loaded from RON.

use bevy::prelude::*;
use std::path::{Path, PathBuf};

pub mod data;
pub mod loader;
pub mod validation;

pub use data::*;
pub use loader::{ContentLoadError, load_gameplay_defaults};
pub use validation::{ValidationError, validate_defaults};


/// Loads `gameplay_defaults.ron` from `data_dir` and inserts it as a resource.
pub struct ContentPlugin {
    pub data_dir: PathBuf,
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(resolve_defaults(&self.data_dir));
    }
}

/// Load and validate defaults, falling back to the built-in values on any error.
pub fn resolve_defaults(data_dir: &Path) -> GameplayDefaults {
    let defaults = match load_gameplay_defaults(data_dir) {
        Ok(defaults) => defaults,
        Err(e) => {
            warn!("{}; using built-in gameplay defaults", e);
            return GameplayDefaults::default();
        }
    };

    let errors = validate_defaults(&defaults);
    if errors.is_empty() {
        info!(
            "Loaded gameplay defaults v{} ({} starter tasks)",
            defaults.schema_version,
            defaults.starter_tasks.len()
        );
        defaults
    } else {
        for error in &errors {
            warn!("Invalid gameplay defaults: {}", error);
        }
        warn!(
            "{} validation errors; using built-in gameplay defaults",
            errors.len()
        );
        GameplayDefaults::default()
    }
}
