//! When steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, run_async};
use rstest_bdd_macros::when;

#[when("the todo is started")]
fn start_todo(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.todo_id()?;
    let result = run_async(world.controller.start(id));
    world.record(result);
    Ok(())
}

#[when("the todo is paused")]
fn pause_todo(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.todo_id()?;
    let result = run_async(world.controller.pause(id));
    world.record(result);
    Ok(())
}

#[when("{seconds:i64} seconds pass")]
fn seconds_pass(world: &mut TodoLifecycleWorld, seconds: i64) {
    world.clock.advance_secs(seconds);
}

#[when("completion is requested")]
fn request_completion(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.todo_id()?;
    world.controller.request_completion(id)?;
    Ok(())
}

#[when(r#"completion is confirmed with memo "{memo}""#)]
fn confirm_completion(world: &mut TodoLifecycleWorld, memo: String) -> Result<(), eyre::Report> {
    let id = world.todo_id()?;
    let result = run_async(world.controller.confirm_completion(id, &memo));
    world.record(result);
    Ok(())
}

#[when("completion is cancelled")]
fn cancel_completion(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.todo_id()?;
    if !world.controller.cancel_completion(id)? {
        return Err(eyre::eyre!("expected a pending completion to cancel"));
    }
    Ok(())
}
