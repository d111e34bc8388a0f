//! Tasks domain: tests for the board state machine and toggle systems.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::*;
use crate::core::{CorePlugin, LifeSet, SessionConfig};
use crate::progression::{LevelUpEvent, ProgressionLedger, ProgressionPlugin};
use crate::rewards::{
    RewardGrantedEvent, RewardOutcome, RewardTables, RewardsPlugin, ScriptedRolls, ToggleDirection,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn task(id: &str, difficulty: Difficulty) -> Task {
    Task {
        id: id.to_string(),
        project_id: "p1".to_string(),
        title: format!("Task {}", id),
        description: String::new(),
        category: Category::Habits,
        status: TaskStatus::Pending,
        difficulty,
        created_at: t0(),
        completed_at: None,
        prerequisites: Vec::new(),
    }
}

fn labeled(id: &str, label: &str) -> Prerequisite {
    Prerequisite {
        id: id.to_string(),
        label: label.to_string(),
        completed: false,
        completed_at: None,
    }
}

/// Board with one plain Medium task `t1` and one task `t2` with prerequisites A and B
fn board() -> TaskBoard {
    let mut gated = task("t2", Difficulty::Hard);
    gated.prerequisites = vec![labeled("a", "Stretch"), labeled("b", "Walk")];
    TaskBoard::new(vec![task("t1", Difficulty::Medium), gated])
}

// -----------------------------------------------------------------------------
// Derived status
// -----------------------------------------------------------------------------

#[test]
fn test_derive_status_empty_list_is_pending() {
    assert_eq!(derive_task_status(&[]), TaskStatus::Pending);
}

#[test]
fn test_derive_status_requires_every_labeled_prerequisite() {
    let mut prerequisites = vec![labeled("a", "Stretch"), labeled("b", "Walk")];
    prerequisites[0].completed = true;
    assert_eq!(derive_task_status(&prerequisites), TaskStatus::Pending);

    prerequisites[1].completed = true;
    assert_eq!(derive_task_status(&prerequisites), TaskStatus::Completed);

    prerequisites[1].label = "   ".to_string();
    assert_eq!(derive_task_status(&prerequisites), TaskStatus::Pending);
}

// -----------------------------------------------------------------------------
// Task toggles
// -----------------------------------------------------------------------------

#[test]
fn test_toggle_plain_task_stamps_and_clears_completion() {
    let mut board = board();

    let toggle = board.toggle_task("t1", t0());
    assert_eq!(
        toggle,
        TaskToggle::Flipped {
            direction: ToggleDirection::Completing
        }
    );
    let done = board.get("t1").unwrap();
    assert!(done.is_completed());
    assert_eq!(done.completed_at, Some(t0()));

    let toggle = board.toggle_task("t1", t0() + Duration::hours(1));
    assert_eq!(
        toggle,
        TaskToggle::Flipped {
            direction: ToggleDirection::Reverting
        }
    );
    let undone = board.get("t1").unwrap();
    assert_eq!(undone.status, TaskStatus::Pending);
    assert_eq!(undone.completed_at, None);
}

#[test]
fn test_toggle_task_with_prerequisites_only_expands() {
    let mut board = board();

    assert_eq!(
        board.toggle_task("t2", t0()),
        TaskToggle::Expanded { expanded: true }
    );
    assert!(board.is_expanded("t2"));
    assert_eq!(board.get("t2").unwrap().status, TaskStatus::Pending);

    assert_eq!(
        board.toggle_task("t2", t0()),
        TaskToggle::Expanded { expanded: false }
    );
    assert!(!board.is_expanded("t2"));
}

#[test]
fn test_toggle_unknown_task_is_noop() {
    let mut board = board();
    let before = board.clone();
    assert_eq!(board.toggle_task("nope", t0()), TaskToggle::Missing);
    assert_eq!(board, before);
}

// -----------------------------------------------------------------------------
// Prerequisite toggles
// -----------------------------------------------------------------------------

#[test]
fn test_last_prerequisite_completes_task() {
    let mut board = board();

    let first = t0();
    let second = t0() + Duration::minutes(30);

    assert_eq!(
        board.toggle_prerequisite("t2", "a", first),
        Some(ToggleDirection::Completing)
    );
    let task = board.get("t2").unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.find_prerequisite("a").unwrap().completed_at, Some(first));

    board.toggle_prerequisite("t2", "b", second);
    let task = board.get("t2").unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.completed_at, Some(second));
}

#[test]
fn test_unchecking_prerequisite_reopens_task() {
    let mut board = board();
    board.toggle_prerequisite("t2", "a", t0());
    board.toggle_prerequisite("t2", "b", t0());

    assert_eq!(
        board.toggle_prerequisite("t2", "a", t0()),
        Some(ToggleDirection::Reverting)
    );
    let task = board.get("t2").unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.completed_at, None);
    assert_eq!(task.find_prerequisite("a").unwrap().completed_at, None);
}

#[test]
fn test_unlabeled_prerequisite_is_not_toggleable() {
    let mut board = board();
    board.update_prerequisite_label("t2", "b", "  ");
    let before = board.clone();

    assert_eq!(board.toggle_prerequisite("t2", "b", t0()), None);
    assert_eq!(board, before);

    let outcome = actions::toggle_prerequisite(
        &mut board,
        &RewardTables::default(),
        &mut ScriptedRolls::new(&[], &[]),
        "t2",
        "b",
        t0(),
    );
    assert_eq!(outcome, None);
    assert_eq!(board, before);
}

#[test]
fn test_unknown_prerequisite_is_noop() {
    let mut board = board();
    assert_eq!(board.toggle_prerequisite("t2", "zzz", t0()), None);
    assert_eq!(board.toggle_prerequisite("nope", "a", t0()), None);
}

// -----------------------------------------------------------------------------
// Prerequisite editing
// -----------------------------------------------------------------------------

#[test]
fn test_add_prerequisite_refused_while_last_is_blank() {
    let mut board = board();
    assert!(board.add_prerequisite("t1", "p-new", t0()));
    assert!(!board.add_prerequisite("t1", "p-other", t0()));
    assert_eq!(board.get("t1").unwrap().prerequisites.len(), 1);

    assert!(board.update_prerequisite_label("t1", "p-new", "Drink water"));
    assert!(board.add_prerequisite("t1", "p-other", t0()));
    assert_eq!(board.get("t1").unwrap().prerequisites.len(), 2);
}

#[test]
fn test_add_prerequisite_reopens_completed_task() {
    let mut board = board();
    board.toggle_prerequisite("t2", "a", t0());
    board.toggle_prerequisite("t2", "b", t0());
    assert!(board.get("t2").unwrap().is_completed());

    assert!(board.add_prerequisite("t2", "c", t0()));
    let task = board.get("t2").unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.completed_at, None);
}

#[test]
fn test_label_update_leaves_status_alone() {
    let mut board = board();
    board.toggle_prerequisite("t2", "a", t0());
    board.toggle_prerequisite("t2", "b", t0());

    assert!(board.update_prerequisite_label("t2", "b", ""));
    assert!(board.get("t2").unwrap().is_completed());
    assert!(!board.update_prerequisite_label("t2", "zzz", "x"));
}

// -----------------------------------------------------------------------------
// Task creation and queries
// -----------------------------------------------------------------------------

#[test]
fn test_add_task_appends_pending_task() {
    let mut board = TaskBoard::default();
    let mut new_task = NewTask::titled("Plan the week");
    new_task.difficulty = Difficulty::Hard;
    new_task.category = Category::Time;

    let created = board.add_task(new_task, "abc123xyz", t0()).cloned().unwrap();
    assert_eq!(created.id, "abc123xyz");
    assert_eq!(created.project_id, "p1");
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.difficulty, Difficulty::Hard);
    assert_eq!(created.category, Category::Time);
    assert!(created.prerequisites.is_empty());
    assert_eq!(board.tasks().len(), 1);
}

#[test]
fn test_add_task_refuses_blank_title() {
    let mut board = TaskBoard::default();
    assert!(board.add_task(NewTask::titled("   "), "x", t0()).is_none());
    assert!(board.tasks().is_empty());
}

#[test]
fn test_progress_rounds_to_whole_percent() {
    let mut board = TaskBoard::new(vec![
        task("t1", Difficulty::Easy),
        task("t2", Difficulty::Easy),
        task("t3", Difficulty::Easy),
    ]);
    assert_eq!(board.progress(), 0);

    board.toggle_task("t1", t0());
    assert_eq!(board.progress(), 33);
    board.toggle_task("t2", t0());
    assert_eq!(board.progress(), 67);
    assert_eq!(board.pending_count(), 1);
    assert_eq!(TaskBoard::default().progress(), 0);
}

#[test]
fn test_seeded_board_has_starter_task() {
    let board = TaskBoard::seeded(&crate::content::GameplayDefaults::default().starter_tasks, t0());
    let starter = &board.tasks()[0];
    assert_eq!(starter.id, "starter-1");
    assert_eq!(starter.title, "Notice Your Life");
    assert_eq!(starter.difficulty, Difficulty::Medium);
    assert_eq!(starter.prerequisites.len(), 1);
    assert!(!starter.prerequisites[0].has_label());
}

#[test]
fn test_medium_display_label_tracks_finished_tasks() {
    assert_eq!(Difficulty::Medium.display_label(0), "Some Weight");
    assert_eq!(Difficulty::Medium.display_label(3), "1-4 Finished Tasks");
    assert_eq!(Difficulty::Medium.display_label(9), "5-9 Finished Tasks");
    assert_eq!(Difficulty::Medium.display_label(14), "10-14 Finished Tasks");
    assert_eq!(Difficulty::Medium.display_label(15), "14+ Finished Tasks");
    assert_eq!(Difficulty::Hard.display_label(7), "Heavy Weight");
    assert_eq!(Difficulty::Easy.display_label(2), "Easy Start");
}

#[test]
fn test_generate_id_shape() {
    let id = generate_id();
    assert_eq!(id.len(), 9);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

// -----------------------------------------------------------------------------
// Toggle actions with rewards
// -----------------------------------------------------------------------------

#[test]
fn test_medium_complete_then_revert_nets_zero() {
    let mut board = board();
    let tables = RewardTables::default();
    let mut ledger = ProgressionLedger::default();

    let mut rolls = ScriptedRolls::plain();
    let gained = actions::toggle_task(&mut board, &tables, &mut rolls, "t1", t0());
    assert_eq!(gained.experience_delta, 250);
    ledger.apply_reward(&gained);

    let lost = actions::toggle_task(&mut board, &tables, &mut rolls, "t1", t0());
    assert_eq!(lost.experience_delta, -250);
    ledger.apply_reward(&lost);

    assert_eq!(ledger.experience(), 0);
    assert_eq!(ledger.coins(), 0);
}

#[test]
fn test_hard_revert_clamps_coins_at_zero() {
    let mut hard = TaskBoard::new(vec![task("h", Difficulty::Hard)]);
    hard.toggle_task("h", t0());

    let mut ledger = ProgressionLedger::default();
    ledger.apply_currency(10);
    let outcome = actions::toggle_task(
        &mut hard,
        &RewardTables::default(),
        &mut ScriptedRolls::new(&[], &[]),
        "h",
        t0(),
    );
    assert_eq!(outcome.currency_delta, -500);
    ledger.apply_reward(&outcome);
    assert_eq!(ledger.coins(), 0);
}

#[test]
fn test_expanding_task_yields_no_reward() {
    let mut board = board();
    let outcome = actions::toggle_task(
        &mut board,
        &RewardTables::default(),
        &mut ScriptedRolls::new(&[], &[]),
        "t2",
        t0(),
    );
    assert_eq!(outcome, RewardOutcome::NONE);
}

#[test]
fn test_zero_value_prerequisite_toggle_still_applies() {
    let mut board = board();
    let mut tables = RewardTables::default();
    tables.prerequisite_experience = 0;
    tables.prerequisite.loot_chance = 0.0;

    let outcome = actions::toggle_prerequisite(
        &mut board,
        &tables,
        &mut ScriptedRolls::plain(),
        "t2",
        "a",
        t0(),
    );
    assert_eq!(outcome, Some(RewardOutcome::NONE));
    assert!(board.get("t2").unwrap().find_prerequisite("a").unwrap().completed_at.is_some());
}

#[test]
fn test_prerequisite_toggle_rolls_prerequisite_reward() {
    let mut board = board();
    // Critical (0.1 < 0.15), no loot
    let mut rolls = ScriptedRolls::new(&[0.1, 0.5], &[]);
    let outcome = actions::toggle_prerequisite(
        &mut board,
        &RewardTables::default(),
        &mut rolls,
        "t2",
        "a",
        t0(),
    )
    .expect("labeled prerequisite should toggle");
    assert_eq!(outcome.experience_delta, 100);
    assert!(outcome.is_critical);
    assert!(rolls.is_exhausted());
}

// -----------------------------------------------------------------------------
// System tests
// -----------------------------------------------------------------------------

#[derive(Resource, Default)]
struct Seen {
    expansions: Vec<(String, bool)>,
    level_ups: Vec<(u32, u32)>,
    rewards: Vec<RewardOutcome>,
}

fn record(
    mut expansions: MessageReader<TaskExpansionChanged>,
    mut level_ups: MessageReader<LevelUpEvent>,
    mut rewards: MessageReader<RewardGrantedEvent>,
    mut seen: ResMut<Seen>,
) {
    for event in expansions.read() {
        seen.expansions.push((event.task_id.clone(), event.expanded));
    }
    for event in rewards.read() {
        seen.rewards.push(event.outcome);
    }
    for event in level_ups.read() {
        seen.level_ups.push((event.from_level, event.to_level));
    }
}

/// Reward tables that never roll a critical or loot
fn flat_tables() -> RewardTables {
    let mut tables = RewardTables::default();
    tables.task.critical_chance = 0.0;
    tables.task.loot_chance = 0.0;
    tables.prerequisite.critical_chance = 0.0;
    tables.prerequisite.loot_chance = 0.0;
    tables
}

fn tasks_app(board: TaskBoard) -> App {
    let mut app = App::new();
    app.add_plugins((
        CorePlugin {
            session: SessionConfig::new("test", Some(42)),
        },
        RewardsPlugin,
        ProgressionPlugin,
        TasksPlugin,
    ))
    .insert_resource(board)
    .insert_resource(flat_tables())
    .init_resource::<Seen>()
    .add_systems(Update, record.in_set(LifeSet::Report));
    app
}

#[test]
fn test_toggle_request_levels_up_within_one_update() {
    let mut app = tasks_app(TaskBoard::new(vec![task("h", Difficulty::Hard)]));
    app.insert_resource(ProgressionLedger::restore(
        100,
        1,
        0,
        crate::progression::LevelingCurve::default(),
    ));

    app.world_mut().write_message(ToggleTaskRequested {
        task_id: "h".to_string(),
    });
    app.update();

    let ledger = app.world().resource::<ProgressionLedger>();
    assert_eq!(ledger.level(), 2);
    assert_eq!(ledger.experience(), 100);
    assert_eq!(ledger.coins(), 500);
    assert_eq!(app.world().resource::<Seen>().level_ups, vec![(1, 2)]);
    assert!(app.world().resource::<TaskBoard>().get("h").unwrap().is_completed());
}

#[test]
fn test_toggle_request_on_gated_task_reports_expansion() {
    let mut app = tasks_app(board());

    app.world_mut().write_message(ToggleTaskRequested {
        task_id: "t2".to_string(),
    });
    app.update();

    assert_eq!(
        app.world().resource::<Seen>().expansions,
        vec![("t2".to_string(), true)]
    );
    assert_eq!(app.world().resource::<ProgressionLedger>().experience(), 0);
}

#[test]
fn test_prerequisite_requests_complete_task_and_pay_out() {
    let mut app = tasks_app(board());

    for prerequisite_id in ["a", "b"] {
        app.world_mut().write_message(TogglePrerequisiteRequested {
            task_id: "t2".to_string(),
            prerequisite_id: prerequisite_id.to_string(),
        });
    }
    app.update();

    assert!(app.world().resource::<TaskBoard>().get("t2").unwrap().is_completed());
    let ledger = app.world().resource::<ProgressionLedger>();
    assert_eq!(ledger.experience(), 50);
    assert_eq!(ledger.coins(), 50);
}

#[test]
fn test_zero_value_prerequisite_request_is_reported() {
    let mut app = tasks_app(board());
    let mut tables = flat_tables();
    tables.prerequisite_experience = 0;
    app.insert_resource(tables);

    app.world_mut().write_message(TogglePrerequisiteRequested {
        task_id: "t2".to_string(),
        prerequisite_id: "a".to_string(),
    });
    app.update();

    assert_eq!(app.world().resource::<Seen>().rewards, vec![RewardOutcome::NONE]);
    let board = app.world().resource::<TaskBoard>();
    assert!(board.get("t2").unwrap().find_prerequisite("a").unwrap().completed_at.is_some());
}

#[test]
fn test_add_requests_grow_the_board() {
    let mut app = tasks_app(TaskBoard::default());

    app.world_mut().write_message(AddTaskRequested {
        task: NewTask::titled("Call a friend"),
    });
    app.update();

    let task_id = app.world().resource::<TaskBoard>().tasks()[0].id.clone();
    app.world_mut().write_message(AddPrerequisiteRequested {
        task_id: task_id.clone(),
    });
    app.update();

    let board = app.world().resource::<TaskBoard>();
    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.get(&task_id).unwrap().prerequisites.len(), 1);
}
