//! Core domain: session configuration and frame ordering.

use bevy::prelude::*;

pub mod resources;

pub use resources::SessionConfig;

/// Ordering of one frame. A console command is turned into request messages
/// before the frame runs, so every transition completes within one update.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifeSet {
    /// Request messages are turned into state transitions and reward rolls
    Input,
    /// Rewards are applied to the progression ledger
    Apply,
    /// Outcomes are reported to the player
    Report,
    /// Changed state is handed to the snapshot store
    Persist,
}

pub struct CorePlugin {
    pub session: SessionConfig,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        info!(
            "Starting session for '{}' with reward seed {}",
            self.session.user_id, self.session.seed
        );

        app.insert_resource(self.session.clone()).configure_sets(
            Update,
            (
                LifeSet::Input,
                LifeSet::Apply,
                LifeSet::Report,
                LifeSet::Persist,
            )
                .chain(),
        );
    }
}
