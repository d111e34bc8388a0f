//! Avatars domain: the generated catalog of cosmetic shells.

use bevy::prelude::*;

use crate::content::{AvatarCatalogDef, GameplayDefaults};

/// Id of the free avatar every player owns
pub const DEFAULT_AVATAR_ID: &str = "default";

/// One purchasable avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarDef {
    pub id: String,
    pub name: String,
    pub price: u64,
    /// Seed handed to the image generator; the same seed always yields the same shell
    pub image_seed: String,
}

/// Resource listing every avatar in shop order
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AvatarCatalog {
    avatars: Vec<AvatarDef>,
}

impl AvatarCatalog {
    /// `default` at price 0, followed by `shell-0..shell-{n-1}` priced in equal steps
    pub fn generate(def: &AvatarCatalogDef) -> Self {
        let origin = AvatarDef {
            id: DEFAULT_AVATAR_ID.to_string(),
            name: "Origin Shell".to_string(),
            price: 0,
            image_seed: DEFAULT_AVATAR_ID.to_string(),
        };

        let shells = (0..def.priced_count).map(|i| AvatarDef {
            id: format!("shell-{}", i),
            name: format!("Shell v{}.0", i + 1),
            price: u64::from(i + 1) * u64::from(def.price_step),
            image_seed: format!("quantum-shell-{}", i),
        });

        Self {
            avatars: std::iter::once(origin).chain(shells).collect(),
        }
    }

    pub fn avatars(&self) -> &[AvatarDef] {
        &self.avatars
    }

    pub fn get(&self, avatar_id: &str) -> Option<&AvatarDef> {
        self.avatars.iter().find(|a| a.id == avatar_id)
    }
}

impl Default for AvatarCatalog {
    fn default() -> Self {
        Self::generate(&AvatarCatalogDef::default())
    }
}

impl FromWorld for AvatarCatalog {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<GameplayDefaults>()
            .map(|defaults| Self::generate(&defaults.avatar_catalog))
            .unwrap_or_default()
    }
}
