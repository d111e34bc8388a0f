//! Tasks domain: the task board and its status transitions.
//!
//! Unknown task or prerequisite ids are silent no-ops, so duplicate or
//! stale requests leave the board untouched.

use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::content::{GameplayDefaults, StarterTaskDef};
use crate::rewards::ToggleDirection;
use crate::tasks::types::{NewTask, Prerequisite, Task, TaskStatus, DEFAULT_PROJECT_ID};

/// What a task toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskToggle {
    /// No task with that id
    Missing,
    /// Task has prerequisites; only its expanded view flag flipped
    Expanded { expanded: bool },
    /// Status flipped in the given direction
    Flipped { direction: ToggleDirection },
}

/// Derived status of a task with prerequisites: completed iff there is at
/// least one prerequisite and every one is completed with a label.
pub fn derive_task_status(prerequisites: &[Prerequisite]) -> TaskStatus {
    let all_done = !prerequisites.is_empty()
        && prerequisites.iter().all(|p| p.completed && p.has_label());

    if all_done {
        TaskStatus::Completed
    } else {
        TaskStatus::Pending
    }
}

/// Resource holding the player's tasks in display order
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    /// Tasks whose prerequisite list is expanded in the view
    expanded: HashSet<String>,
}

impl FromWorld for TaskBoard {
    fn from_world(world: &mut World) -> Self {
        let defaults = world
            .get_resource::<GameplayDefaults>()
            .cloned()
            .unwrap_or_default();
        Self::seeded(&defaults.starter_tasks, Utc::now())
    }
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            expanded: HashSet::new(),
        }
    }

    /// Board for a first-time player
    pub fn seeded(starters: &[StarterTaskDef], now: DateTime<Utc>) -> Self {
        let tasks = starters
            .iter()
            .enumerate()
            .map(|(index, starter)| {
                let task_id = format!("starter-{}", index + 1);
                let prerequisites = starter
                    .prerequisite_labels
                    .iter()
                    .enumerate()
                    .map(|(p_index, label)| Prerequisite {
                        id: format!("{}-{}", task_id, p_index + 1),
                        label: label.clone(),
                        completed: false,
                        completed_at: None,
                    })
                    .collect();

                Task {
                    id: task_id,
                    project_id: DEFAULT_PROJECT_ID.to_string(),
                    title: starter.title.clone(),
                    description: starter.description.clone(),
                    category: starter.category,
                    status: TaskStatus::Pending,
                    difficulty: starter.difficulty,
                    created_at: now,
                    completed_at: None,
                    prerequisites,
                }
            })
            .collect();

        Self::new(tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    fn get_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    pub fn is_expanded(&self, task_id: &str) -> bool {
        self.expanded.contains(task_id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len() - self.completed_count()
    }

    /// Share of completed tasks, rounded to a whole percent
    pub fn progress(&self) -> u32 {
        if self.tasks.is_empty() {
            return 0;
        }
        (self.completed_count() as f64 / self.tasks.len() as f64 * 100.0).round() as u32
    }

    /// Flip a task without prerequisites between pending and completed.
    /// Tasks with prerequisites only complete through them, so toggling one
    /// expands or collapses its prerequisite list instead.
    pub fn toggle_task(&mut self, task_id: &str, now: DateTime<Utc>) -> TaskToggle {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return TaskToggle::Missing;
        };

        if !task.prerequisites.is_empty() {
            let expanded = if self.expanded.remove(task_id) {
                false
            } else {
                self.expanded.insert(task_id.to_string());
                true
            };
            return TaskToggle::Expanded { expanded };
        }

        let direction = ToggleDirection::from_completed(task.is_completed());
        let next = if direction.is_completing() {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        };
        task.set_status(next, now);

        TaskToggle::Flipped { direction }
    }

    /// Flip one labeled prerequisite and re-derive its task's status.
    /// Returns `None` when nothing changed.
    pub fn toggle_prerequisite(
        &mut self,
        task_id: &str,
        prerequisite_id: &str,
        now: DateTime<Utc>,
    ) -> Option<ToggleDirection> {
        let task = self.get_mut(task_id)?;
        let prerequisite = task
            .prerequisites
            .iter_mut()
            .find(|p| p.id == prerequisite_id)?;

        if !prerequisite.has_label() {
            return None;
        }

        let direction = ToggleDirection::from_completed(prerequisite.completed);
        prerequisite.completed = direction.is_completing();
        prerequisite.completed_at = direction.is_completing().then_some(now);

        let status = derive_task_status(&task.prerequisites);
        task.set_status(status, now);

        Some(direction)
    }

    /// Append an empty prerequisite. Refused while the last prerequisite is
    /// still unlabeled.
    pub fn add_prerequisite(
        &mut self,
        task_id: &str,
        prerequisite_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(task) = self.get_mut(task_id) else {
            return false;
        };

        if task.prerequisites.last().is_some_and(|p| !p.has_label()) {
            return false;
        }

        task.prerequisites.push(Prerequisite::empty(prerequisite_id));
        let status = derive_task_status(&task.prerequisites);
        task.set_status(status, now);
        true
    }

    /// Rename a prerequisite. Status and rewards are untouched.
    pub fn update_prerequisite_label(
        &mut self,
        task_id: &str,
        prerequisite_id: &str,
        label: impl Into<String>,
    ) -> bool {
        let Some(prerequisite) = self
            .get_mut(task_id)
            .and_then(|t| t.prerequisites.iter_mut().find(|p| p.id == prerequisite_id))
        else {
            return false;
        };

        prerequisite.label = label.into();
        true
    }

    /// Append a new pending task. Blank titles are refused.
    pub fn add_task(
        &mut self,
        new_task: NewTask,
        task_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Option<&Task> {
        if new_task.title.trim().is_empty() {
            return None;
        }

        self.tasks.push(Task {
            id: task_id.into(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            title: new_task.title,
            description: new_task.description,
            category: new_task.category,
            status: TaskStatus::Pending,
            difficulty: new_task.difficulty,
            created_at: now,
            completed_at: None,
            prerequisites: Vec::new(),
        });
        self.tasks.last()
    }
}
