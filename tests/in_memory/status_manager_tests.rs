//! In-memory integration tests for status column management.

use std::sync::Arc;

use super::helpers::{backend, open};
use eyre::ensure;
use quadro::board::{
    adapters::memory::InMemoryProjectBackend,
    domain::{BoardDomainError, Status, StatusColor, StatusId},
    ports::BackendError,
    services::KanbanError,
};
use rstest::rstest;

type Backend = Result<Arc<InMemoryProjectBackend>, BackendError>;

fn column_order(statuses: &[Status]) -> Vec<String> {
    statuses
        .iter()
        .map(|status| status.id().as_str().to_owned())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn synthesized_column_is_appended_after_configured_ones(
    backend: Backend,
) -> eyre::Result<()> {
    let view = open(&backend?).await?;

    let statuses = view.list_statuses()?;
    ensure!(column_order(&statuses) == ["TODO", "IN_PROGRESS", "REVIEW", "DONE", "BLOCKED"]);
    let blocked = statuses.last().map(Status::title);
    ensure!(blocked == Some("BLOCKED"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn columns_can_be_added_renamed_and_reordered(backend: Backend) -> eyre::Result<()> {
    let view = open(&backend?).await?;
    let palette = view.palette().to_vec();
    let color = palette.get(4).cloned().unwrap_or_default();

    let added = view.add_status("Waiting on client", color.clone())?;
    ensure!(added.id().as_str() == "WAITING_ON_CLIENT");
    ensure!(added.color() == &color);

    let renamed = view.edit_status(added.id(), "Client review", StatusColor::new("#14b8a6")?)?;
    ensure!(renamed.id() == added.id());
    ensure!(renamed.title() == "Client review");
    ensure!(renamed.color().as_str() == "#14B8A6");

    view.move_status(added.id(), 1)?;
    ensure!(
        column_order(&view.list_statuses()?)
            == ["TODO", "WAITING_ON_CLIENT", "IN_PROGRESS", "REVIEW", "DONE", "BLOCKED"]
    );
    ensure!(view.count_in_status(added.id())? == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_empty_columns_cannot_be_deleted(backend: Backend) -> eyre::Result<()> {
    let view = open(&backend?).await?;
    let blocked = StatusId::new("BLOCKED")?;

    let result = view.delete_status(&blocked);

    ensure!(matches!(
        result,
        Err(KanbanError::Domain(BoardDomainError::StatusInUse { task_count: 1, .. }))
    ));
    ensure!(view.list_statuses()?.len() == 5);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn emptied_columns_can_be_deleted(backend: Backend) -> eyre::Result<()> {
    let view = open(&backend?).await?;
    let blocked = StatusId::new("BLOCKED")?;
    view.drag_end(&super::helpers::drag("t4", ("BLOCKED", 0), ("DONE", 0))?)
        .await?;

    let removed = view.delete_status(&blocked)?;

    ensure!(removed.id() == &blocked);
    ensure!(!view.board()?.store().has_column(&blocked));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_titles_and_duplicates_are_rejected(backend: Backend) -> eyre::Result<()> {
    let view = open(&backend?).await?;

    let blank = view.add_status("   ", StatusColor::synthesized());
    ensure!(matches!(
        blank,
        Err(KanbanError::Domain(BoardDomainError::EmptyStatusTitle))
    ));
    let duplicate = view.add_status("In Progress", StatusColor::synthesized());
    ensure!(matches!(
        duplicate,
        Err(KanbanError::Domain(BoardDomainError::DuplicateStatus(_)))
    ));
    ensure!(view.list_statuses()?.len() == 5);
    Ok(())
}
