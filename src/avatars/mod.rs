//! Avatars domain: catalog, ownership and purchase requests.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;
use std::fmt;

pub mod catalog;
pub mod wardrobe;

pub use catalog::{AvatarCatalog, AvatarDef, DEFAULT_AVATAR_ID};
pub use wardrobe::Wardrobe;

use crate::core::LifeSet;
use crate::progression::ProgressionLedger;

#[cfg(test)]
mod tests;

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone)]
pub struct BuyAvatarRequested {
    pub avatar_id: String,
}

impl Message for BuyAvatarRequested {}

#[derive(Debug, Clone)]
pub struct SelectAvatarRequested {
    pub avatar_id: String,
}

impl Message for SelectAvatarRequested {}

/// Event fired when coins were exchanged for an avatar
#[derive(Debug, Clone)]
pub struct AvatarPurchasedEvent {
    pub avatar_id: String,
    pub price: u64,
}

impl Message for AvatarPurchasedEvent {}

#[derive(Debug, Clone)]
pub struct AvatarEquippedEvent {
    pub avatar_id: String,
}

impl Message for AvatarEquippedEvent {}

/// Why a buy or equip request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    InsufficientCoins { price: u64, coins: u64 },
    AlreadyOwned,
    NotOwned,
    UnknownAvatar,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::InsufficientCoins { price, coins } => {
                write!(f, "costs {} coins, you have {}", price, coins)
            }
            DenialReason::AlreadyOwned => write!(f, "already owned"),
            DenialReason::NotOwned => write!(f, "not owned yet"),
            DenialReason::UnknownAvatar => write!(f, "no such avatar"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AvatarRequestDenied {
    pub avatar_id: String,
    pub reason: DenialReason,
}

impl Message for AvatarRequestDenied {}

// ============================================================================
// Plugin
// ============================================================================

pub struct AvatarsPlugin;

impl Plugin for AvatarsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AvatarCatalog>()
            .init_resource::<Wardrobe>()
            .add_message::<BuyAvatarRequested>()
            .add_message::<SelectAvatarRequested>()
            .add_message::<AvatarPurchasedEvent>()
            .add_message::<AvatarEquippedEvent>()
            .add_message::<AvatarRequestDenied>()
            .add_systems(
                Update,
                (handle_buy_requests, handle_select_requests)
                    .chain()
                    .in_set(LifeSet::Input),
            );
    }
}

// ============================================================================
// Systems
// ============================================================================

pub(crate) fn handle_buy_requests(
    mut requests: MessageReader<BuyAvatarRequested>,
    catalog: Res<AvatarCatalog>,
    mut wardrobe: ResMut<Wardrobe>,
    mut ledger: ResMut<ProgressionLedger>,
    mut purchased: MessageWriter<AvatarPurchasedEvent>,
    mut denied: MessageWriter<AvatarRequestDenied>,
) {
    for request in requests.read() {
        let Some(avatar) = catalog.get(&request.avatar_id) else {
            denied.write(AvatarRequestDenied {
                avatar_id: request.avatar_id.clone(),
                reason: DenialReason::UnknownAvatar,
            });
            continue;
        };

        let reason = if wardrobe.owns(&avatar.id) {
            DenialReason::AlreadyOwned
        } else if wardrobe.buy(&avatar.id, avatar.price, &mut ledger) {
            info!(
                "Bought {} for {} coins ({} left)",
                avatar.name,
                avatar.price,
                ledger.coins()
            );
            purchased.write(AvatarPurchasedEvent {
                avatar_id: avatar.id.clone(),
                price: avatar.price,
            });
            continue;
        } else {
            DenialReason::InsufficientCoins {
                price: avatar.price,
                coins: ledger.coins(),
            }
        };

        warn!("Purchase of '{}' denied: {}", avatar.id, reason);
        denied.write(AvatarRequestDenied {
            avatar_id: avatar.id.clone(),
            reason,
        });
    }
}

pub(crate) fn handle_select_requests(
    mut requests: MessageReader<SelectAvatarRequested>,
    catalog: Res<AvatarCatalog>,
    mut wardrobe: ResMut<Wardrobe>,
    mut equipped: MessageWriter<AvatarEquippedEvent>,
    mut denied: MessageWriter<AvatarRequestDenied>,
) {
    for request in requests.read() {
        if wardrobe.select(&request.avatar_id) {
            info!("Equipped '{}'", request.avatar_id);
            equipped.write(AvatarEquippedEvent {
                avatar_id: request.avatar_id.clone(),
            });
            continue;
        }

        let reason = if catalog.get(&request.avatar_id).is_some() {
            DenialReason::NotOwned
        } else {
            DenialReason::UnknownAvatar
        };
        warn!("Equip of '{}' denied: {}", request.avatar_id, reason);
        denied.write(AvatarRequestDenied {
            avatar_id: request.avatar_id.clone(),
            reason,
        });
    }
}
