//! In-memory integration tests for drag reconciliation.

use std::sync::Arc;

use super::helpers::{backend, column_ids, drag, open};
use eyre::{OptionExt, ensure};
use quadro::board::{
    adapters::memory::InMemoryProjectBackend,
    domain::{StatusId, TaskId},
    ports::BackendError,
    services::{KanbanError, MoveOutcome},
};
use rstest::rstest;

type Backend = Result<Arc<InMemoryProjectBackend>, BackendError>;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_moves_survive_a_reload(backend: Backend) -> eyre::Result<()> {
    let store = backend?;
    let view = open(&store).await?;

    let outcome = view.drag_end(&drag("t1", ("TODO", 0), ("DONE", 0))?).await?;
    ensure!(outcome == MoveOutcome::Confirmed);
    view.close();

    let reopened = open(&store).await?.board()?;
    ensure!(column_ids(&reopened, "TODO")? == ["t2"]);
    ensure!(column_ids(&reopened, "DONE")? == ["t1"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_can_be_retried(backend: Backend) -> eyre::Result<()> {
    let store = backend?;
    store.fail_next_status_updates(1)?;
    let view = open(&store).await?;
    let gesture = drag("t3", ("IN_PROGRESS", 0), ("REVIEW", 0))?;

    let first = view.drag_end(&gesture).await;
    ensure!(matches!(first, Err(KanbanError::StatusUpdate { .. })));
    ensure!(column_ids(&view.board()?, "IN_PROGRESS")? == ["t3"]);

    let second = view.drag_end(&gesture).await?;
    ensure!(second == MoveOutcome::Confirmed);
    ensure!(column_ids(&view.board()?, "REVIEW")? == ["t3"]);
    let stored = store
        .stored_task(&TaskId::new("t3")?)?
        .ok_or_eyre("t3 should be stored")?;
    ensure!(stored.status_id().as_str() == "REVIEW");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn background_confirmation_failure_rolls_back(backend: Backend) -> eyre::Result<()> {
    let store = backend?;
    store.fail_next_status_updates(1)?;
    let view = open(&store).await?;
    let before = view.board()?.store().clone();

    let handle = view
        .spawn_drag_end(&drag("t2", ("TODO", 1), ("TODO", 0))?)?
        .ok_or_eyre("reorder should be pending")?;
    let result = handle.await?;

    ensure!(matches!(result, Err(KanbanError::StatusUpdate { .. })));
    ensure!(view.board()?.store() == &before);
    ensure!(view.board()?.pending_moves() == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn card_in_synthesized_column_can_be_moved_out(backend: Backend) -> eyre::Result<()> {
    let store = backend?;
    let view = open(&store).await?;
    let blocked = StatusId::new("BLOCKED")?;
    ensure!(view.list_statuses()?.iter().any(|status| status.id() == &blocked));

    view.drag_end(&drag("t4", ("BLOCKED", 0), ("IN_PROGRESS", 1))?)
        .await?;

    let board = view.board()?;
    ensure!(column_ids(&board, "IN_PROGRESS")? == ["t3", "t4"]);
    ensure!(board.count_in_status(&blocked) == 0);
    ensure!(board.store().has_column(&blocked));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_series_of_moves_never_loses_cards(backend: Backend) -> eyre::Result<()> {
    let store = backend?;
    let view = open(&store).await?;
    let total = view.board()?.store().total_tasks();

    let gestures = [
        drag("t1", ("TODO", 0), ("IN_PROGRESS", 0))?,
        drag("t3", ("IN_PROGRESS", 1), ("DONE", 0))?,
        drag("t2", ("TODO", 0), ("DONE", 5))?,
        drag("t1", ("IN_PROGRESS", 0), ("TODO", 0))?,
        drag("t4", ("BLOCKED", 0), ("BLOCKED", 0))?,
    ];
    for gesture in &gestures {
        view.drag_end(gesture).await?;
        ensure!(view.board()?.store().total_tasks() == total);
    }

    let board = view.board()?;
    ensure!(column_ids(&board, "TODO")? == ["t1"]);
    ensure!(column_ids(&board, "DONE")? == ["t3", "t2"]);
    ensure!(store.status_updates()?.len() == 4);
    Ok(())
}
