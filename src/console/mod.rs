//! Console domain: line commands in, text views and reward popups out.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

pub mod commands;
pub mod render;
pub mod runner;

pub use commands::{CommandParseError, ConsoleCommand, parse_command};
pub use runner::console_runner;

use crate::avatars::{
    AvatarCatalog, AvatarEquippedEvent, AvatarPurchasedEvent, AvatarRequestDenied,
    BuyAvatarRequested, SelectAvatarRequested, Wardrobe,
};
use crate::core::LifeSet;
use crate::progression::{LevelUpEvent, ProgressionLedger};
use crate::rewards::RewardGrantedEvent;
use crate::tasks::{
    AddPrerequisiteRequested, AddTaskRequested, NewTask, TaskBoard, TaskCreatedEvent,
    TaskExpansionChanged, TogglePrerequisiteRequested, ToggleTaskRequested,
    UpdatePrerequisiteLabelRequested,
};

#[cfg(feature = "dev-tools")]
use crate::progression::DevGrantRequested;


/// Lines waiting to be printed after the current frame
#[derive(Resource, Debug, Default)]
pub struct ConsoleOutput {
    lines: Vec<String>,
}

impl ConsoleOutput {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

/// Whether the console keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFlow {
    Continue,
    Quit,
}

pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConsoleOutput>().add_systems(
            Update,
            (
                report_rewards,
                report_level_ups,
                report_task_changes,
                report_avatar_outcomes,
            )
                .chain()
                .in_set(LifeSet::Report),
        );
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Resolve a task reference: list number first, then raw id
fn resolve_task(board: &TaskBoard, reference: &str) -> Option<String> {
    if let Ok(number) = reference.parse::<usize>() {
        if let Some(task) = number.checked_sub(1).and_then(|i| board.tasks().get(i)) {
            return Some(task.id.clone());
        }
    }
    board.get(reference).map(|task| task.id.clone())
}

fn resolve_prerequisite(board: &TaskBoard, task_id: &str, reference: &str) -> Option<String> {
    let task = board.get(task_id)?;
    if let Ok(number) = reference.parse::<usize>() {
        if let Some(prerequisite) = number.checked_sub(1).and_then(|i| task.prerequisites.get(i)) {
            return Some(prerequisite.id.clone());
        }
    }
    task.find_prerequisite(reference).map(|p| p.id.clone())
}

fn print(world: &mut World, text: impl Into<String>) {
    world.resource_mut::<ConsoleOutput>().push(text);
}

/// Turn a command into request messages (or render a view directly).
/// Requests take effect on the next `App::update`.
pub fn dispatch(world: &mut World, command: ConsoleCommand) -> ConsoleFlow {
    match command {
        ConsoleCommand::List => {
            let text = render::render_board(world.resource::<TaskBoard>());
            print(world, text);
        }
        ConsoleCommand::Add { difficulty, title } => {
            let mut task = NewTask::titled(title);
            task.difficulty = difficulty;
            world.write_message(AddTaskRequested { task });
        }
        ConsoleCommand::Toggle { task } => {
            match resolve_task(world.resource::<TaskBoard>(), &task) {
                Some(task_id) => {
                    world.write_message(ToggleTaskRequested { task_id });
                }
                None => print(world, format!("No task '{}'", task)),
            }
        }
        ConsoleCommand::Check { task, prerequisite } => {
            let board = world.resource::<TaskBoard>();
            let resolved = resolve_task(board, &task).and_then(|task_id| {
                resolve_prerequisite(board, &task_id, &prerequisite)
                    .map(|prerequisite_id| (task_id, prerequisite_id))
            });
            match resolved {
                Some((task_id, prerequisite_id)) => {
                    world.write_message(TogglePrerequisiteRequested {
                        task_id,
                        prerequisite_id,
                    });
                }
                None => print(
                    world,
                    format!("No prerequisite '{}' on task '{}'", prerequisite, task),
                ),
            }
        }
        ConsoleCommand::Prereq { task } => {
            match resolve_task(world.resource::<TaskBoard>(), &task) {
                Some(task_id) => {
                    world.write_message(AddPrerequisiteRequested { task_id });
                }
                None => print(world, format!("No task '{}'", task)),
            }
        }
        ConsoleCommand::Label {
            task,
            prerequisite,
            label,
        } => {
            let board = world.resource::<TaskBoard>();
            let resolved = resolve_task(board, &task).and_then(|task_id| {
                resolve_prerequisite(board, &task_id, &prerequisite)
                    .map(|prerequisite_id| (task_id, prerequisite_id))
            });
            match resolved {
                Some((task_id, prerequisite_id)) => {
                    world.write_message(UpdatePrerequisiteLabelRequested {
                        task_id,
                        prerequisite_id,
                        label,
                    });
                }
                None => print(
                    world,
                    format!("No prerequisite '{}' on task '{}'", prerequisite, task),
                ),
            }
        }
        ConsoleCommand::Shop => {
            let text = render::render_shop(
                world.resource::<AvatarCatalog>(),
                world.resource::<Wardrobe>(),
                world.resource::<ProgressionLedger>(),
            );
            print(world, text);
        }
        ConsoleCommand::Buy { avatar_id } => {
            world.write_message(BuyAvatarRequested { avatar_id });
        }
        ConsoleCommand::Equip { avatar_id } => {
            world.write_message(SelectAvatarRequested { avatar_id });
        }
        ConsoleCommand::Stats => {
            let text = render::render_stats(
                world.resource::<ProgressionLedger>(),
                world.resource::<TaskBoard>(),
            );
            print(world, text);
        }
        ConsoleCommand::History { query } => {
            let text = render::render_history(world.resource::<TaskBoard>(), query.as_deref());
            print(world, text);
        }
        ConsoleCommand::Help => print(world, render::HELP),
        ConsoleCommand::Quit => return ConsoleFlow::Quit,
        #[cfg(feature = "dev-tools")]
        ConsoleCommand::Grant { experience, coins } => {
            world.write_message(DevGrantRequested { experience, coins });
        }
    }
    ConsoleFlow::Continue
}

// ============================================================================
// Report systems
// ============================================================================

pub(crate) fn report_rewards(
    mut rewards: MessageReader<RewardGrantedEvent>,
    mut output: ResMut<ConsoleOutput>,
) {
    for event in rewards.read() {
        output.push(render::reward_popup(&event.outcome));
    }
}

pub(crate) fn report_level_ups(
    mut level_ups: MessageReader<LevelUpEvent>,
    mut output: ResMut<ConsoleOutput>,
) {
    for event in level_ups.read() {
        output.push(format!(
            "LEVEL UP! {} -> {}  {}",
            event.from_level, event.to_level, event.rank_title
        ));
    }
}

pub(crate) fn report_task_changes(
    mut expansions: MessageReader<TaskExpansionChanged>,
    mut created: MessageReader<TaskCreatedEvent>,
    board: Res<TaskBoard>,
    mut output: ResMut<ConsoleOutput>,
) {
    let mut show_board = false;

    for event in expansions.read() {
        let verb = if event.expanded { "Expanded" } else { "Collapsed" };
        output.push(format!("{} '{}'", verb, event.task_id));
        show_board = true;
    }

    for event in created.read() {
        match event {
            TaskCreatedEvent::Task { task_id } => {
                output.push(format!("Added task '{}'", task_id));
            }
            TaskCreatedEvent::Prerequisite {
                task_id,
                prerequisite_id,
            } => {
                output.push(format!(
                    "Added prerequisite '{}' to '{}'; label it before adding another",
                    prerequisite_id, task_id
                ));
            }
        }
        show_board = true;
    }

    if show_board {
        output.push(render::render_board(&board));
    }
}

pub(crate) fn report_avatar_outcomes(
    mut purchased: MessageReader<AvatarPurchasedEvent>,
    mut equipped: MessageReader<AvatarEquippedEvent>,
    mut denied: MessageReader<AvatarRequestDenied>,
    mut output: ResMut<ConsoleOutput>,
) {
    for event in purchased.read() {
        output.push(format!("Unlocked '{}' for {} coins", event.avatar_id, event.price));
    }
    for event in equipped.read() {
        output.push(format!("Equipped '{}'", event.avatar_id));
    }
    for event in denied.read() {
        output.push(format!("Cannot use '{}': {}", event.avatar_id, event.reason));
    }
}
