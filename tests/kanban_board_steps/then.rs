//! Then steps for kanban board BDD scenarios.

use super::world::KanbanWorld;
use eyre::{OptionExt, ensure};
use quadro::board::{
    domain::{StatusId, Task},
    services::{KanbanError, MoveOutcome},
};
use rstest_bdd_macros::then;

fn column(world: &KanbanWorld, status: &str) -> Result<Vec<Task>, eyre::Report> {
    Ok(world.board()?.column(&StatusId::new(status)?).to_vec())
}

#[then("the move is confirmed")]
fn move_confirmed(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_move
        .as_ref()
        .ok_or_eyre("missing drag result in scenario world")?;
    ensure!(
        matches!(outcome, Ok(MoveOutcome::Confirmed)),
        "expected a confirmed move, found {outcome:?}"
    );
    Ok(())
}

#[then("the move is rolled back")]
fn move_rolled_back(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_move
        .as_ref()
        .ok_or_eyre("missing drag result in scenario world")?;
    ensure!(
        matches!(outcome, Err(KanbanError::StatusUpdate { .. })),
        "expected a rolled back move, found {outcome:?}"
    );
    Ok(())
}

#[then("the drag is ignored")]
fn drag_ignored(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_move
        .as_ref()
        .ok_or_eyre("missing drag result in scenario world")?;
    ensure!(
        matches!(outcome, Ok(MoveOutcome::NoOp)),
        "expected the drag to be ignored, found {outcome:?}"
    );
    Ok(())
}

#[then(r#"column "{status}" holds "{tasks}""#)]
fn column_holds(world: &KanbanWorld, status: String, tasks: String) -> Result<(), eyre::Report> {
    let actual: Vec<String> = column(world, &status)?
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect();
    let expected: Vec<&str> = tasks.split(',').collect();
    ensure!(actual == expected, "column {status} holds {actual:?}");
    for task in column(world, &status)? {
        ensure!(task.status_id().as_str() == status, "task {} has a stale status", task.id());
    }
    Ok(())
}

#[then(r#"column "{status}" is empty"#)]
fn column_is_empty(world: &KanbanWorld, status: String) -> Result<(), eyre::Report> {
    let tasks = column(world, &status)?;
    ensure!(tasks.is_empty(), "column {status} holds {} task(s)", tasks.len());
    Ok(())
}

#[then(r#"column "{status}" has {count} tasks"#)]
fn column_has_count(
    world: &KanbanWorld,
    status: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let actual = world.view()?.count_in_status(&StatusId::new(status)?)?;
    ensure!(actual == count, "expected {count} tasks, found {actual}");
    Ok(())
}

#[then(r#"the first task in "{status}" is named "{name}""#)]
fn first_task_named(
    world: &KanbanWorld,
    status: String,
    name: String,
) -> Result<(), eyre::Report> {
    let tasks = column(world, &status)?;
    let first = tasks.first().ok_or_eyre("column is empty")?;
    ensure!(first.name() == name, "first task is {}", first.name());
    Ok(())
}

#[then("the board has {count} status columns")]
fn status_column_count(world: &KanbanWorld, count: usize) -> Result<(), eyre::Report> {
    let statuses = world.view()?.list_statuses()?;
    ensure!(statuses.len() == count, "found {} status columns", statuses.len());
    Ok(())
}

#[then(r#"the deletion is blocked with "{message}""#)]
fn deletion_blocked(world: &KanbanWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_deletion
        .as_ref()
        .ok_or_eyre("missing deletion result in scenario world")?;
    let Err(err) = result else {
        eyre::bail!("expected the deletion to be blocked");
    };
    ensure!(err.user_message() == message, "unexpected message: {}", err.user_message());
    Ok(())
}
