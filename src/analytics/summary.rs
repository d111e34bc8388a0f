//! Analytics domain: completion summary over tasks and their prerequisites.

use crate::tasks::{Category, Task};

/// Completed and total items for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTally {
    pub category: Category,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClutterLevel {
    Low,
    Moderate,
    High,
}

impl ClutterLevel {
    pub fn from_pending(pending: usize) -> Self {
        if pending >= 10 {
            ClutterLevel::High
        } else if pending >= 5 {
            ClutterLevel::Moderate
        } else {
            ClutterLevel::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClutterLevel::Low => "Low",
            ClutterLevel::Moderate => "Moderate",
            ClutterLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResilienceLevel {
    Developing,
    Growing,
    Strong,
    Unshakeable,
}

impl ResilienceLevel {
    pub fn from_rate(completion_rate: u32) -> Self {
        match completion_rate {
            76.. => ResilienceLevel::Unshakeable,
            51..=75 => ResilienceLevel::Strong,
            26..=50 => ResilienceLevel::Growing,
            _ => ResilienceLevel::Developing,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResilienceLevel::Developing => "Developing",
            ResilienceLevel::Growing => "Growing",
            ResilienceLevel::Strong => "Strong",
            ResilienceLevel::Unshakeable => "Unshakeable",
        }
    }
}

/// Snapshot of how the board is going. Every prerequisite counts as an item
/// of its parent's category alongside the task itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    pub completed: usize,
    pub pending: usize,
    pub categories: Vec<CategoryTally>,
}

impl BoardSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut summary = Self {
            completed: 0,
            pending: 0,
            categories: Vec::new(),
        };

        for task in tasks {
            summary.count(task.category, task.is_completed());
            for prerequisite in &task.prerequisites {
                summary.count(task.category, prerequisite.completed);
            }
        }

        summary
    }

    fn count(&mut self, category: Category, completed: bool) {
        if completed {
            self.completed += 1;
        } else {
            self.pending += 1;
        }

        let index = match self.categories.iter().position(|t| t.category == category) {
            Some(index) => index,
            None => {
                self.categories.push(CategoryTally {
                    category,
                    completed: 0,
                    total: 0,
                });
                self.categories.len() - 1
            }
        };
        let tally = &mut self.categories[index];
        tally.total += 1;
        if completed {
            tally.completed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.pending
    }

    /// Completed share in whole percent, 0 for an empty board
    pub fn completion_rate(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        (self.completed as f64 / self.total() as f64 * 100.0).round() as u32
    }

    pub fn clutter(&self) -> ClutterLevel {
        ClutterLevel::from_pending(self.pending)
    }

    pub fn resilience(&self) -> ResilienceLevel {
        ResilienceLevel::from_rate(self.completion_rate())
    }

    /// One-line reading of the summary for the stats view
    pub fn narrative(&self, rank_title: &str) -> String {
        if self.total() == 0 {
            return "The canvas of your journey is blank. Begin by defining your first quests."
                .to_string();
        }
        if self.clutter() == ClutterLevel::High {
            return "The noise of unfinished tasks is accumulating. Focus on clearing 'Heavy Weight' items to restore equilibrium."
                .to_string();
        }
        if self.resilience() == ResilienceLevel::Unshakeable {
            return "You are moving with absolute momentum. Your flow is clear, and your actions are precise."
                .to_string();
        }
        format!(
            "Your journey as a {} is unfolding. Continue to balance your energy between new habits and completing active quests.",
            rank_title
        )
    }
}
