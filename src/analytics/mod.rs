//! Analytics domain: read-only views over the task board.

pub mod history;
pub mod summary;

pub use history::completed_history;
pub use summary::{BoardSummary, CategoryTally, ClutterLevel, ResilienceLevel};
