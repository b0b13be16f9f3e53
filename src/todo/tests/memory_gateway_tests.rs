//! Unit tests for the in-memory todo gateway.

use super::support::{SteppingClock, persisted_todo};
use crate::todo::{
    adapters::memory::InMemoryTodoGateway,
    domain::{
        ReflectionMemo, TodoCreationRequest, TodoFilter, TodoId, TodoPriority, TodoStatus,
        TodoUpdateRequest,
    },
    ports::{TodoGateway, TodoGatewayError},
};
use eyre::{bail, ensure};
use mockable::Clock;
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn clock() -> Arc<SteppingClock> {
    Arc::new(SteppingClock::new())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_sequential_ids_and_server_defaults(
    clock: Arc<SteppingClock>,
) -> eyre::Result<()> {
    let gateway = InMemoryTodoGateway::with_clock(Arc::clone(&clock));
    let first = gateway
        .create(&TodoCreationRequest::new("Draft report", 1800)?)
        .await?;
    let second = gateway
        .create(&TodoCreationRequest::new("Review", 600)?.with_priority(TodoPriority::Low))
        .await?;

    ensure!(first.id().value() == 1);
    ensure!(second.id().value() == 2);
    ensure!(first.status() == TodoStatus::Todo);
    ensure!(first.actual_time_sec() == 0);
    ensure!(first.priority() == TodoPriority::Medium);
    ensure!(second.priority() == TodoPriority::Low);
    ensure!(first.created_at() == Some(clock.utc()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_applies_patch_and_stamps_time(clock: Arc<SteppingClock>) -> eyre::Result<()> {
    let gateway = InMemoryTodoGateway::with_clock(Arc::clone(&clock));
    let created = gateway
        .create(&TodoCreationRequest::new("Draft report", 1800)?)
        .await?;
    clock.advance_secs(90);

    let patch = TodoUpdateRequest::builder()
        .status(TodoStatus::Done)
        .actual_time_sec(90)
        .reflection_memo(ReflectionMemo::new("went fine")?)
        .build()?;
    let updated = gateway.update(created.id(), &patch).await?;

    ensure!(updated.status() == TodoStatus::Done);
    ensure!(updated.actual_time_sec() == 90);
    ensure!(updated.updated_at() == Some(clock.utc()));
    ensure!(updated.created_at() == created.created_at());
    ensure!(gateway.stored(created.id())? == Some(updated));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_ids_are_not_found() -> eyre::Result<()> {
    let gateway = InMemoryTodoGateway::new();
    let id = TodoId::new(77)?;
    let patch = TodoUpdateRequest::builder().priority(TodoPriority::High).build()?;

    match gateway.update(id, &patch).await {
        Err(TodoGatewayError::NotFound(missing)) => ensure!(missing == id),
        other => bail!("expected not found, got {other:?}"),
    }
    match gateway.delete(id).await {
        Err(TodoGatewayError::NotFound(missing)) => ensure!(missing == id),
        other => bail!("expected not found, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn memo_on_unfinished_todo_is_rejected() -> eyre::Result<()> {
    let gateway = InMemoryTodoGateway::new();
    gateway.seed(persisted_todo(4, TodoStatus::Doing, 0)?)?;
    let patch = TodoUpdateRequest::builder()
        .reflection_memo(ReflectionMemo::new("early")?)
        .status(TodoStatus::Done)
        .build()?;
    gateway.update(TodoId::new(4)?, &patch).await?;

    let reopen = TodoUpdateRequest::builder().status(TodoStatus::Doing).build()?;
    let result = gateway.update(TodoId::new(4)?, &reopen).await;
    ensure!(
        matches!(result, Err(TodoGatewayError::Rejected { code: 400, .. })),
        "unexpected result: {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_applies_filters() -> eyre::Result<()> {
    let gateway = InMemoryTodoGateway::new();
    gateway.seed(persisted_todo(1, TodoStatus::Todo, 0)?)?;
    gateway.seed(persisted_todo(2, TodoStatus::Doing, 30)?)?;
    gateway.seed(persisted_todo(3, TodoStatus::Done, 60)?)?;

    let all = gateway.list(&TodoFilter::all()).await?;
    ensure!(all.len() == 3);

    let doing = gateway
        .list(&TodoFilter::all().with_status(TodoStatus::Doing))
        .await?;
    ensure!(doing.iter().map(|todo| todo.id().value()).collect::<Vec<_>>() == vec![2]);

    let next = gateway
        .create(&TodoCreationRequest::new("After seed", 60)?)
        .await?;
    ensure!(next.id().value() == 4, "ids continue after seeded todos");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_failures_are_consumed_in_order() -> eyre::Result<()> {
    let gateway = InMemoryTodoGateway::new();
    gateway.fail_next(TodoGatewayError::Server {
        code: 503,
        message: "maintenance".to_owned(),
    })?;

    let failed = gateway.list(&TodoFilter::all()).await;
    ensure!(failed.as_ref().err().and_then(TodoGatewayError::code) == Some(503));
    ensure!(gateway.list(&TodoFilter::all()).await?.is_empty());
    Ok(())
}
