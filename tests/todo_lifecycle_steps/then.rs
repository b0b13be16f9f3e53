//! Then steps for todo lifecycle BDD scenarios.

use super::world::TodoLifecycleWorld;
use rstest_bdd_macros::then;
use yojitsu_tracker::todo::{
    domain::{TodoDomainError, TodoStatus},
    services::TodoLifecycleError,
};

#[then(r#"the todo status is "{status}""#)]
fn todo_status_is(world: &TodoLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected_status = TodoStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let tracked = world
        .controller
        .get(world.todo_id()?)
        .ok_or_else(|| eyre::eyre!("todo is no longer tracked"))?;

    if tracked.todo().status() != expected_status {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected_status.as_str(),
            tracked.todo().status().as_str()
        ));
    }
    Ok(())
}

#[then("the recorded actual time is {seconds:u64} seconds")]
fn recorded_actual_time_is(world: &TodoLifecycleWorld, seconds: u64) -> Result<(), eyre::Report> {
    let todo = world
        .last_todo
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing persisted todo"))?;
    if todo.actual_time_sec() != seconds {
        return Err(eyre::eyre!(
            "expected {seconds}s of actual time, found {}s",
            todo.actual_time_sec()
        ));
    }
    Ok(())
}

#[then(r#"the reflection memo is "{memo}""#)]
fn reflection_memo_is(world: &TodoLifecycleWorld, memo: String) -> Result<(), eyre::Report> {
    let todo = world
        .last_todo
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing persisted todo"))?;
    let stored = todo.reflection_memo().map(|reflection| reflection.as_str());
    if stored != Some(memo.as_str()) {
        return Err(eyre::eyre!("expected memo {memo:?}, found {stored:?}"));
    }
    Ok(())
}

#[then("the operation fails with an invalid transition error")]
fn operation_fails_with_invalid_transition(
    world: &TodoLifecycleWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    if !matches!(
        result,
        Err(TodoLifecycleError::Domain(
            TodoDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("no completion is pending")]
fn no_completion_pending(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let tracked = world
        .controller
        .get(world.todo_id()?)
        .ok_or_else(|| eyre::eyre!("todo is no longer tracked"))?;
    if tracked.completion_requested() {
        return Err(eyre::eyre!("completion request is still pending"));
    }
    Ok(())
}
