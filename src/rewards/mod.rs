//! Rewards domain: experience and coin rolls for completing work.

use bevy::ecs::message::Message;
use bevy::prelude::*;

pub mod roller;
pub mod types;

pub use roller::{RewardRng, RewardTables, RollSource};
pub use types::{RewardOutcome, RewardSource, ToggleDirection};

#[cfg(test)]
pub(crate) use roller::ScriptedRolls;


/// Event fired when a toggle produced a reward (or a reversal penalty)
#[derive(Debug, Clone)]
pub struct RewardGrantedEvent {
    pub source: RewardSource,
    pub outcome: RewardOutcome,
}

impl Message for RewardGrantedEvent {}

pub struct RewardsPlugin;

impl Plugin for RewardsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RewardTables>()
            .init_resource::<RewardRng>()
            .add_message::<RewardGrantedEvent>();
    }
}
