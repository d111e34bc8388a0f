//! Storage domain: the persisted shape of one player's state.

use serde::{Deserialize, Serialize};

use crate::avatars::{DEFAULT_AVATAR_ID, Wardrobe};
use crate::progression::{LevelingCurve, ProgressionLedger};
use crate::tasks::{Task, TaskBoard};

/// Everything needed to resume a player's session.
///
/// Missing fields load as a fresh player's values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub coins: u64,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default = "starting_avatars")]
    pub owned_avatar_ids: Vec<String>,
    #[serde(default = "starting_avatar")]
    pub selected_avatar_id: String,
}

fn first_level() -> u32 {
    1
}

fn starting_avatars() -> Vec<String> {
    vec![DEFAULT_AVATAR_ID.to_string()]
}

fn starting_avatar() -> String {
    DEFAULT_AVATAR_ID.to_string()
}

impl Snapshot {
    pub fn capture(board: &TaskBoard, ledger: &ProgressionLedger, wardrobe: &Wardrobe) -> Self {
        Self {
            tasks: board.tasks().to_vec(),
            experience: ledger.experience(),
            coins: ledger.coins(),
            level: ledger.level(),
            owned_avatar_ids: wardrobe.owned().map(str::to_string).collect(),
            selected_avatar_id: wardrobe.selected().to_string(),
        }
    }

    /// Split back into live resources, repairing level and avatar ownership
    pub fn into_state(self, curve: LevelingCurve) -> (TaskBoard, ProgressionLedger, Wardrobe) {
        (
            TaskBoard::new(self.tasks),
            ProgressionLedger::restore(self.experience, self.level, self.coins, curve),
            Wardrobe::restore(self.owned_avatar_ids, self.selected_avatar_id),
        )
    }
}
