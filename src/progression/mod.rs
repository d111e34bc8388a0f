//! Progression domain: leveling curve and the experience/coin ledger.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

pub mod curve;
pub mod ledger;

pub use curve::LevelingCurve;
pub use ledger::{LevelChange, ProgressionLedger, rank_title};

use crate::core::LifeSet;
use crate::rewards::RewardGrantedEvent;

#[cfg(feature = "dev-tools")]
use crate::rewards::{RewardOutcome, RewardSource};


/// Event fired when one reward carries the player across level thresholds
#[derive(Debug, Clone)]
pub struct LevelUpEvent {
    pub from_level: u32,
    pub to_level: u32,
    pub rank_title: &'static str,
}

impl Message for LevelUpEvent {}

/// Request to grant experience and coins directly, bypassing the roller
#[cfg(feature = "dev-tools")]
#[derive(Debug, Clone)]
pub struct DevGrantRequested {
    pub experience: i64,
    pub coins: i64,
}

#[cfg(feature = "dev-tools")]
impl Message for DevGrantRequested {}

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProgressionLedger>()
            .add_message::<LevelUpEvent>()
            .add_systems(Update, apply_reward_events.in_set(LifeSet::Apply));

        #[cfg(feature = "dev-tools")]
        {
            app.add_message::<DevGrantRequested>()
                .add_systems(Update, handle_dev_grants.in_set(LifeSet::Input));
        }
    }
}

/// Apply granted rewards to the ledger and announce level-ups
pub(crate) fn apply_reward_events(
    mut rewards: MessageReader<RewardGrantedEvent>,
    mut ledger: ResMut<ProgressionLedger>,
    mut level_ups: MessageWriter<LevelUpEvent>,
) {
    for event in rewards.read() {
        let change = ledger.apply_reward(&event.outcome);
        info!(
            "Applied {:+} XP / {:+} coins from {:?}. Level {} ({}/{} XP), {} coins",
            event.outcome.experience_delta,
            event.outcome.currency_delta,
            event.source,
            ledger.level(),
            ledger.experience(),
            ledger.experience_to_next_level(),
            ledger.coins()
        );

        if change.leveled_up() {
            info!(
                "Level up! {} -> {} (+{})",
                change.from,
                change.to,
                change.levels_gained()
            );
            level_ups.write(LevelUpEvent {
                from_level: change.from,
                to_level: change.to,
                rank_title: ledger.rank_title(),
            });
        }
    }
}

#[cfg(feature = "dev-tools")]
pub(crate) fn handle_dev_grants(
    mut requests: MessageReader<DevGrantRequested>,
    mut rewards: MessageWriter<RewardGrantedEvent>,
) {
    for request in requests.read() {
        rewards.write(RewardGrantedEvent {
            source: RewardSource::DevGrant,
            outcome: RewardOutcome {
                experience_delta: request.experience,
                currency_delta: request.coins,
                is_critical: false,
            },
        });
    }
}
