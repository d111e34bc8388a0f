//! Tasks domain: task board, prerequisite rules and toggle requests.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;
use chrono::Utc;
use rand::Rng;

pub mod actions;
pub mod board;
pub mod types;

pub use board::{TaskBoard, TaskToggle, derive_task_status};
pub use types::{Category, Difficulty, NewTask, Prerequisite, Task, TaskStatus};

use crate::core::LifeSet;
use crate::rewards::{RewardGrantedEvent, RewardRng, RewardSource, RewardTables};

#[cfg(test)]
mod tests;

// ============================================================================
// Events
// ============================================================================

/// Request to toggle a task (or expand it when it has prerequisites)
#[derive(Debug, Clone)]
pub struct ToggleTaskRequested {
    pub task_id: String,
}

impl Message for ToggleTaskRequested {}

#[derive(Debug, Clone)]
pub struct TogglePrerequisiteRequested {
    pub task_id: String,
    pub prerequisite_id: String,
}

impl Message for TogglePrerequisiteRequested {}

#[derive(Debug, Clone)]
pub struct AddPrerequisiteRequested {
    pub task_id: String,
}

impl Message for AddPrerequisiteRequested {}

#[derive(Debug, Clone)]
pub struct UpdatePrerequisiteLabelRequested {
    pub task_id: String,
    pub prerequisite_id: String,
    pub label: String,
}

impl Message for UpdatePrerequisiteLabelRequested {}

#[derive(Debug, Clone)]
pub struct AddTaskRequested {
    pub task: NewTask,
}

impl Message for AddTaskRequested {}

/// Event fired when a task's prerequisite list is expanded or collapsed
#[derive(Debug, Clone)]
pub struct TaskExpansionChanged {
    pub task_id: String,
    pub expanded: bool,
}

impl Message for TaskExpansionChanged {}

/// Event fired when a task or prerequisite was created
#[derive(Debug, Clone)]
pub enum TaskCreatedEvent {
    Task {
        task_id: String,
    },
    Prerequisite {
        task_id: String,
        prerequisite_id: String,
    },
}

impl Message for TaskCreatedEvent {}

// ============================================================================
// Plugin
// ============================================================================

pub struct TasksPlugin;

impl Plugin for TasksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TaskBoard>()
            .add_message::<ToggleTaskRequested>()
            .add_message::<TogglePrerequisiteRequested>()
            .add_message::<AddPrerequisiteRequested>()
            .add_message::<UpdatePrerequisiteLabelRequested>()
            .add_message::<AddTaskRequested>()
            .add_message::<TaskExpansionChanged>()
            .add_message::<TaskCreatedEvent>()
            .add_systems(
                Update,
                (
                    handle_add_task,
                    handle_add_prerequisite,
                    handle_update_prerequisite_label,
                    handle_toggle_task,
                    handle_toggle_prerequisite,
                )
                    .chain()
                    .in_set(LifeSet::Input),
            );
    }
}

/// Random 9-character lowercase alphanumeric id
pub fn generate_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    (0..9)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

// ============================================================================
// Systems
// ============================================================================

pub(crate) fn handle_toggle_task(
    mut requests: MessageReader<ToggleTaskRequested>,
    mut board: ResMut<TaskBoard>,
    tables: Res<RewardTables>,
    mut rng: ResMut<RewardRng>,
    mut rewards: MessageWriter<RewardGrantedEvent>,
    mut expansions: MessageWriter<TaskExpansionChanged>,
) {
    for request in requests.read() {
        let Some(gated) = board
            .get(&request.task_id)
            .map(|task| !task.prerequisites.is_empty())
        else {
            warn!("Toggle ignored: no task '{}'", request.task_id);
            continue;
        };

        let outcome = actions::toggle_task(
            &mut board,
            &tables,
            &mut *rng,
            &request.task_id,
            Utc::now(),
        );

        if gated {
            expansions.write(TaskExpansionChanged {
                task_id: request.task_id.clone(),
                expanded: board.is_expanded(&request.task_id),
            });
            continue;
        }

        if let Some(task) = board.get(&request.task_id) {
            info!(
                "Task '{}' is now {:?}: {:+} XP, {:+} coins{}",
                task.title,
                task.status,
                outcome.experience_delta,
                outcome.currency_delta,
                if outcome.is_critical { " (critical)" } else { "" }
            );
        }
        rewards.write(RewardGrantedEvent {
            source: RewardSource::Task {
                task_id: request.task_id.clone(),
            },
            outcome,
        });
    }
}

pub(crate) fn handle_toggle_prerequisite(
    mut requests: MessageReader<TogglePrerequisiteRequested>,
    mut board: ResMut<TaskBoard>,
    tables: Res<RewardTables>,
    mut rng: ResMut<RewardRng>,
    mut rewards: MessageWriter<RewardGrantedEvent>,
) {
    for request in requests.read() {
        let Some(outcome) = actions::toggle_prerequisite(
            &mut board,
            &tables,
            &mut *rng,
            &request.task_id,
            &request.prerequisite_id,
            Utc::now(),
        ) else {
            warn!(
                "Toggle ignored: prerequisite '{}' of task '{}' is missing or unlabeled",
                request.prerequisite_id, request.task_id
            );
            continue;
        };

        if let Some(task) = board.get(&request.task_id) {
            info!(
                "Prerequisite '{}' toggled: {:+} XP, {:+} coins; task '{}' is {:?}",
                request.prerequisite_id,
                outcome.experience_delta,
                outcome.currency_delta,
                task.title,
                task.status
            );
        }
        rewards.write(RewardGrantedEvent {
            source: RewardSource::Prerequisite {
                task_id: request.task_id.clone(),
                prerequisite_id: request.prerequisite_id.clone(),
            },
            outcome,
        });
    }
}

pub(crate) fn handle_add_prerequisite(
    mut requests: MessageReader<AddPrerequisiteRequested>,
    mut board: ResMut<TaskBoard>,
    mut created: MessageWriter<TaskCreatedEvent>,
) {
    for request in requests.read() {
        let prerequisite_id = generate_id();
        if board.add_prerequisite(&request.task_id, prerequisite_id.clone(), Utc::now()) {
            created.write(TaskCreatedEvent::Prerequisite {
                task_id: request.task_id.clone(),
                prerequisite_id,
            });
        } else {
            warn!(
                "Prerequisite not added to '{}': unknown task or last prerequisite unlabeled",
                request.task_id
            );
        }
    }
}

pub(crate) fn handle_update_prerequisite_label(
    mut requests: MessageReader<UpdatePrerequisiteLabelRequested>,
    mut board: ResMut<TaskBoard>,
) {
    for request in requests.read() {
        if !board.update_prerequisite_label(
            &request.task_id,
            &request.prerequisite_id,
            request.label.clone(),
        ) {
            warn!(
                "Label ignored: no prerequisite '{}' on task '{}'",
                request.prerequisite_id, request.task_id
            );
        }
    }
}

pub(crate) fn handle_add_task(
    mut requests: MessageReader<AddTaskRequested>,
    mut board: ResMut<TaskBoard>,
    mut created: MessageWriter<TaskCreatedEvent>,
) {
    for request in requests.read() {
        match board.add_task(request.task.clone(), generate_id(), Utc::now()) {
            Some(task) => {
                info!("Added task '{}' ({})", task.title, task.id);
                created.write(TaskCreatedEvent::Task {
                    task_id: task.id.clone(),
                });
            }
            None => warn!("Task not added: title is blank"),
        }
    }
}
