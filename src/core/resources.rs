//! Core domain: shared resources for the running session.

use bevy::prelude::*;
use rand::Rng;

/// Who is playing and how the reward rolls are seeded.
#[derive(Resource, Debug, Clone)]
pub struct SessionConfig {
    /// Device or account identity; snapshots are keyed by it
    pub user_id: String,
    /// Seed for the reward RNG
    pub seed: u64,
}

impl SessionConfig {
    pub fn new(user_id: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            user_id: user_id.into(),
            seed: seed.unwrap_or_else(|| rand::rng().random()),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new("local", None)
    }
}
