//! Analytics domain: searchable log of completed tasks.

use crate::tasks::Task;

/// Completed tasks, most recent first. A non-blank query keeps only tasks
/// whose title or description contains it, ignoring case.
pub fn completed_history<'a>(tasks: &'a [Task], query: Option<&str>) -> Vec<&'a Task> {
    let needle = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut history: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.is_completed())
        .filter(|t| match &needle {
            Some(needle) => {
                t.title.to_lowercase().contains(needle)
                    || t.description.to_lowercase().contains(needle)
            }
            None => true,
        })
        .collect();

    history.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    history
}
