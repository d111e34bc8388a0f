//! Tasks domain: task and prerequisite records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty tier; decides the base reward of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy Start",
            Difficulty::Medium => "Some Weight",
            Difficulty::Hard => "Heavy Weight",
        }
    }

    /// Label shown on a task card. Medium tasks advertise how many tasks
    /// the player has already finished.
    pub fn display_label(&self, completed_tasks: usize) -> &'static str {
        match (self, completed_tasks) {
            (Difficulty::Medium, 1..=4) => "1-4 Finished Tasks",
            (Difficulty::Medium, 5..=9) => "5-9 Finished Tasks",
            (Difficulty::Medium, 10..=14) => "10-14 Finished Tasks",
            (Difficulty::Medium, 15..) => "14+ Finished Tasks",
            _ => self.display_name(),
        }
    }

    /// Parse a console keyword (`easy`, `medium`, `hard`)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Category {
    #[default]
    Habits,
    Energy,
    Desire,
    Choices,
    Time,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Habits => "Habits",
            Category::Energy => "Energy",
            Category::Desire => "Desire",
            Category::Choices => "Choices",
            Category::Time => "Time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

/// A labeled sub-item of a task
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prerequisite {
    pub id: String,
    pub label: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Prerequisite {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            completed: false,
            completed_at: None,
        }
    }

    /// Only labeled prerequisites can be toggled or count toward completion
    pub fn has_label(&self) -> bool {
        !self.label.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default = "default_project_id")]
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
}

pub const DEFAULT_PROJECT_ID: &str = "p1";

fn default_project_id() -> String {
    DEFAULT_PROJECT_ID.to_string()
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn find_prerequisite(&self, prerequisite_id: &str) -> Option<&Prerequisite> {
        self.prerequisites.iter().find(|p| p.id == prerequisite_id)
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        match status {
            TaskStatus::Completed if !self.is_completed() => {
                self.status = TaskStatus::Completed;
                self.completed_at = Some(now);
            }
            TaskStatus::Completed => {}
            TaskStatus::Pending => {
                self.status = TaskStatus::Pending;
                self.completed_at = None;
            }
        }
    }
}

/// Fields the player supplies for a new task
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: Category,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            difficulty: Difficulty::Medium,
            category: Category::Habits,
        }
    }
}
