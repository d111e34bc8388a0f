//! Storage domain: loading and write-through saving of player snapshots.

use bevy::prelude::*;
use std::path::PathBuf;

pub mod snapshot;
pub mod store;

pub use snapshot::Snapshot;
pub use store::{LocalStore, SnapshotStore, StoreError};

use crate::avatars::Wardrobe;
use crate::content::GameplayDefaults;
use crate::core::{LifeSet, SessionConfig};
use crate::progression::{LevelingCurve, ProgressionLedger};
use crate::tasks::TaskBoard;


/// Outcome of the most recent save
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Synced,
    Error(String),
}

/// Resource wrapping the active snapshot store
#[derive(Resource)]
pub struct ActiveStore(pub Box<dyn SnapshotStore + Send + Sync>);

/// Restores the player's last snapshot (if any) and saves after every change.
///
/// Must be added after `CorePlugin` and `ContentPlugin` and before the plugins
/// that init the board, ledger and wardrobe, so a restored state wins over
/// their fresh defaults.
pub struct StoragePlugin {
    pub store_dir: PathBuf,
}

impl Plugin for StoragePlugin {
    fn build(&self, app: &mut App) {
        let store = LocalStore::new(&self.store_dir);
        let user_id = app
            .world()
            .get_resource::<SessionConfig>()
            .map(|session| session.user_id.clone())
            .unwrap_or_else(|| SessionConfig::default().user_id);
        let curve = app
            .world()
            .get_resource::<GameplayDefaults>()
            .map(|defaults| LevelingCurve::from(&defaults.leveling))
            .unwrap_or_default();

        let status = match store.load(&user_id) {
            Ok(Some(snapshot)) => {
                info!(
                    "Restored snapshot for '{}' from {}",
                    user_id,
                    store.path_for(&user_id).display()
                );
                let (board, ledger, wardrobe) = snapshot.into_state(curve);
                app.insert_resource(board)
                    .insert_resource(ledger)
                    .insert_resource(wardrobe);
                SyncStatus::Synced
            }
            Ok(None) => {
                info!("No snapshot for '{}'; starting a fresh board", user_id);
                SyncStatus::Idle
            }
            Err(e) => {
                error!("{}; starting a fresh board", e);
                SyncStatus::Error(e.to_string())
            }
        };

        app.insert_resource(status)
            .insert_resource(ActiveStore(Box::new(store)))
            .add_systems(
                Update,
                save_snapshot
                    .run_if(
                        resource_changed::<TaskBoard>
                            .or(resource_changed::<ProgressionLedger>)
                            .or(resource_changed::<Wardrobe>),
                    )
                    .in_set(LifeSet::Persist),
            );
    }
}

/// Hand the full state to the store. Failures are logged and recorded but
/// never roll back the in-memory state.
pub(crate) fn save_snapshot(
    board: Res<TaskBoard>,
    ledger: Res<ProgressionLedger>,
    wardrobe: Res<Wardrobe>,
    session: Res<SessionConfig>,
    store: Res<ActiveStore>,
    mut status: ResMut<SyncStatus>,
) {
    *status = SyncStatus::Syncing;
    let snapshot = Snapshot::capture(&board, &ledger, &wardrobe);

    match store.0.save(&session.user_id, &snapshot) {
        Ok(()) => {
            debug!("Saved snapshot for '{}'", session.user_id);
            *status = SyncStatus::Synced;
        }
        Err(e) => {
            error!("Failed to save snapshot: {}", e);
            *status = SyncStatus::Error(e.to_string());
        }
    }
}
