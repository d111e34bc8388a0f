//! Tasks domain: toggles that also roll their reward.

use chrono::{DateTime, Utc};

use crate::rewards::{RewardOutcome, RewardTables, RollSource};
use crate::tasks::board::{TaskBoard, TaskToggle};

/// Toggle a task and roll its reward. Expanding a task with prerequisites or
/// toggling an unknown id yields no reward.
pub fn toggle_task(
    board: &mut TaskBoard,
    tables: &RewardTables,
    rolls: &mut impl RollSource,
    task_id: &str,
    now: DateTime<Utc>,
) -> RewardOutcome {
    match board.toggle_task(task_id, now) {
        TaskToggle::Flipped { direction } => {
            let Some(task) = board.get(task_id) else {
                return RewardOutcome::NONE;
            };
            tables.roll_task(task.difficulty, direction, rolls)
        }
        TaskToggle::Expanded { .. } | TaskToggle::Missing => RewardOutcome::NONE,
    }
}

/// Toggle a prerequisite and roll its reward. Returns `None` when the toggle
/// is refused (unknown ids, unlabeled prerequisites).
pub fn toggle_prerequisite(
    board: &mut TaskBoard,
    tables: &RewardTables,
    rolls: &mut impl RollSource,
    task_id: &str,
    prerequisite_id: &str,
    now: DateTime<Utc>,
) -> Option<RewardOutcome> {
    board
        .toggle_prerequisite(task_id, prerequisite_id, now)
        .map(|direction| tables.roll_prerequisite(direction, rolls))
}
