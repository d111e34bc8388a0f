//! Avatars domain: which avatars the player owns and which one is equipped.

use bevy::prelude::*;
use std::collections::BTreeSet;

use crate::avatars::catalog::DEFAULT_AVATAR_ID;
use crate::progression::ProgressionLedger;

/// Resource holding avatar ownership.
///
/// The owned set always contains `default`, and the equipped id is always owned.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Wardrobe {
    owned: BTreeSet<String>,
    selected: String,
}

impl Default for Wardrobe {
    fn default() -> Self {
        Self {
            owned: BTreeSet::from([DEFAULT_AVATAR_ID.to_string()]),
            selected: DEFAULT_AVATAR_ID.to_string(),
        }
    }
}

impl Wardrobe {
    /// Rebuild from persisted ids, repairing a selection that is not owned
    pub fn restore(owned: impl IntoIterator<Item = String>, selected: impl Into<String>) -> Self {
        let mut owned: BTreeSet<String> = owned.into_iter().collect();
        owned.insert(DEFAULT_AVATAR_ID.to_string());

        let selected = selected.into();
        let selected = if owned.contains(&selected) {
            selected
        } else {
            DEFAULT_AVATAR_ID.to_string()
        };

        Self { owned, selected }
    }

    pub fn owns(&self, avatar_id: &str) -> bool {
        self.owned.contains(avatar_id)
    }

    pub fn owned(&self) -> impl Iterator<Item = &str> {
        self.owned.iter().map(String::as_str)
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Buy an avatar with coins from the ledger. Fails without side effects
    /// when it is already owned or the player cannot afford it.
    pub fn buy(
        &mut self,
        avatar_id: &str,
        price: u64,
        ledger: &mut ProgressionLedger,
    ) -> bool {
        if self.owns(avatar_id) || !ledger.spend(price) {
            return false;
        }
        self.owned.insert(avatar_id.to_string());
        true
    }

    /// Equip an owned avatar
    pub fn select(&mut self, avatar_id: &str) -> bool {
        if !self.owns(avatar_id) {
            return false;
        }
        self.selected = avatar_id.to_string();
        true
    }
}
