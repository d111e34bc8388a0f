//! Console domain: text views of the board, stats, shop and history.

use std::fmt::Write;

use crate::analytics::{BoardSummary, completed_history};
use crate::avatars::{AvatarCatalog, Wardrobe};
use crate::progression::ProgressionLedger;
use crate::rewards::RewardOutcome;
use crate::tasks::{Task, TaskBoard};

pub const HELP: &str = "\
Commands:
  list                         show the task board
  add <easy|medium|hard> <title>
                               add a task
  toggle <task>                complete/reopen a task, or expand one with prerequisites
  check <task> <prereq>        complete/reopen a prerequisite
  prereq <task>                add an empty prerequisite
  label <task> <prereq> <text> rename a prerequisite
  shop                         list avatars
  buy <avatar>                 buy an avatar
  equip <avatar>               equip an owned avatar
  stats                        level, coins and analytics
  history [query]              completed tasks, newest first
  help                         this text
  quit                         leave";

fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

fn write_task(out: &mut String, number: usize, task: &Task, board: &TaskBoard) {
    let _ = writeln!(
        out,
        "{:>3}. {} {}  <{} | {}>  ({})",
        number,
        checkbox(task.is_completed()),
        task.title,
        task.difficulty.display_label(board.completed_count()),
        task.category.name(),
        task.id
    );

    if task.prerequisites.is_empty() {
        return;
    }

    if !board.is_expanded(&task.id) {
        let done = task.prerequisites.iter().filter(|p| p.completed).count();
        let _ = writeln!(
            out,
            "       {}/{} prerequisites done (toggle {} to expand)",
            done,
            task.prerequisites.len(),
            number
        );
        return;
    }

    for (index, prerequisite) in task.prerequisites.iter().enumerate() {
        let label = if prerequisite.has_label() {
            prerequisite.label.as_str()
        } else {
            "(unlabeled)"
        };
        let _ = writeln!(
            out,
            "       {}. {} {}",
            index + 1,
            checkbox(prerequisite.completed),
            label
        );
    }
}

pub fn render_board(board: &TaskBoard) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Board: {}/{} complete ({}%), {} pending",
        board.completed_count(),
        board.tasks().len(),
        board.progress(),
        board.pending_count()
    );

    if board.tasks().is_empty() {
        out.push_str("  No tasks yet. Try: add easy Drink a glass of water\n");
    }
    for (index, task) in board.tasks().iter().enumerate() {
        write_task(&mut out, index + 1, task, board);
    }
    out
}

pub fn render_stats(ledger: &ProgressionLedger, board: &TaskBoard) -> String {
    let summary = BoardSummary::from_tasks(board.tasks());
    let mut out = String::new();

    let _ = writeln!(out, "Level {} {}", ledger.level(), ledger.rank_title());
    let _ = writeln!(
        out,
        "  XP {}/{}   Coins {}",
        ledger.experience(),
        ledger.experience_to_next_level(),
        ledger.coins()
    );
    let _ = writeln!(
        out,
        "  Completion {}% ({} of {})   Clutter {}   Resilience {}",
        summary.completion_rate(),
        summary.completed,
        summary.total(),
        summary.clutter().name(),
        summary.resilience().name()
    );
    for tally in &summary.categories {
        let _ = writeln!(
            out,
            "  {:<8} {}/{}",
            tally.category.name(),
            tally.completed,
            tally.total
        );
    }
    let _ = writeln!(out, "  {}", summary.narrative(ledger.rank_title()));
    out
}

pub fn render_shop(catalog: &AvatarCatalog, wardrobe: &Wardrobe, ledger: &ProgressionLedger) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Avatar vault: {} shells ({} coins)",
        catalog.avatars().len(),
        ledger.coins()
    );

    for avatar in catalog.avatars() {
        let state = if wardrobe.selected() == avatar.id {
            "equipped".to_string()
        } else if wardrobe.owns(&avatar.id) {
            "owned".to_string()
        } else if ledger.can_afford(avatar.price) {
            format!("{} coins", avatar.price)
        } else {
            format!("{} coins (locked)", avatar.price)
        };
        let _ = writeln!(out, "  {:<10} {:<14} {}", avatar.id, avatar.name, state);
    }
    out
}

pub fn render_history(board: &TaskBoard, query: Option<&str>) -> String {
    let history = completed_history(board.tasks(), query);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} result{}",
        history.len(),
        if history.len() == 1 { "" } else { "s" }
    );

    if history.is_empty() {
        out.push_str("  History empty.\n");
    }
    for task in history {
        let when = task
            .completed_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "  {}  {}  <{}>", when, task.title, task.category.name());
    }
    out
}

/// Floating reward text, e.g. `+625 XP +625 coins CRITICAL!`
pub fn reward_popup(outcome: &RewardOutcome) -> String {
    let mut line = format!(
        "{:+} XP {:+} coins",
        outcome.experience_delta, outcome.currency_delta
    );
    if outcome.is_critical {
        line.push_str(" CRITICAL!");
    }
    line
}
