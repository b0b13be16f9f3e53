//! Lifecycle flows exercised through the public controller API.

use super::helpers::{TrackerFixture, tracker};
use eyre::{bail, ensure};
use rstest::rstest;
use yojitsu_tracker::todo::{
    domain::{TodoCreationRequest, TodoFilter, TodoPriority, TodoStatus},
    ports::{TodoGateway, TodoGatewayError},
    services::TodoLifecycleError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planned_and_actual_time_are_both_kept(tracker: TrackerFixture) -> eyre::Result<()> {
    let request = TodoCreationRequest::new("Write retrospective", 45 * 60)?
        .with_description("Sprint 12")?
        .with_due_date("2025-04-30")?
        .with_priority(TodoPriority::Low);
    let created = tracker.controller.create_todo(&request).await?;
    let id = created.id();

    tracker.controller.start(id).await?;
    tracker.clock.advance_secs(20 * 60);
    tracker.controller.pause(id).await?;
    tracker.controller.start(id).await?;
    tracker.clock.advance_secs(35 * 60);
    tracker.controller.request_completion(id)?;
    let done = tracker
        .controller
        .confirm_completion(id, "took longer than planned")
        .await?;

    ensure!(done.estimated_time().as_secs() == 45 * 60);
    ensure!(done.actual_time_sec() == 55 * 60);
    ensure!(done.due_date().map(|due| due.to_string()).as_deref() == Some("2025-04-30"));
    ensure!(done.priority() == TodoPriority::Low);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_restores_state_for_a_new_controller(tracker: TrackerFixture) -> eyre::Result<()> {
    let id = tracker
        .controller
        .create_todo(&TodoCreationRequest::new("Draft report", 1800)?)
        .await?
        .id();
    tracker.controller.start(id).await?;
    tracker.clock.advance_secs(90);
    tracker.controller.pause(id).await?;

    let reopened = tracker.reopen();
    let listed = reopened
        .list_todos(&TodoFilter::all().with_status(TodoStatus::Pending))
        .await?;

    ensure!(listed.len() == 1);
    ensure!(reopened.current_total(id)? == 90);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn doing_todo_keeps_counting_after_reopening(tracker: TrackerFixture) -> eyre::Result<()> {
    let id = tracker
        .controller
        .create_todo(&TodoCreationRequest::new("Draft report", 1800)?)
        .await?
        .id();
    tracker.controller.start(id).await?;
    tracker.clock.advance_secs(300);

    let reopened = tracker.reopen();
    reopened.list_todos(&TodoFilter::all()).await?;
    tracker.clock.advance_secs(60);

    ensure!(
        reopened.current_total(id)? == 60,
        "unpersisted time of the closed session is not recovered"
    );
    let paused = reopened.pause(id).await?;
    ensure!(paused.actual_time_sec() == 60);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn server_failure_surfaces_and_local_state_recovers(
    tracker: TrackerFixture,
) -> eyre::Result<()> {
    let id = tracker
        .controller
        .create_todo(&TodoCreationRequest::new("Draft report", 1800)?)
        .await?
        .id();
    tracker.gateway.fail_next(TodoGatewayError::Server {
        code: 503,
        message: "try later".to_owned(),
    })?;

    match tracker.controller.start(id).await {
        Err(TodoLifecycleError::Gateway(err)) => ensure!(err.code() == Some(503)),
        other => bail!("expected gateway failure, got {other:?}"),
    }
    let retried = tracker.controller.start(id).await?;
    ensure!(retried.status() == TodoStatus::Doing);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_creation_input_is_rejected_before_any_call(
    tracker: TrackerFixture,
) -> eyre::Result<()> {
    ensure!(TodoCreationRequest::new("", 1800).is_err());
    ensure!(TodoCreationRequest::new("Plan", 0).is_err());
    ensure!(tracker.gateway.list(&TodoFilter::all()).await?.is_empty());
    Ok(())
}
