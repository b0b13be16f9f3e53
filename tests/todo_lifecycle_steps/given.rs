//! Given steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use yojitsu_tracker::todo::domain::{TodoCreationRequest, TodoPriority};

#[given(r#"a todo "{name}" estimated at {estimate:i64} seconds with priority "{priority}""#)]
fn todo_exists(
    world: &mut TodoLifecycleWorld,
    name: String,
    estimate: i64,
    priority: String,
) -> Result<(), eyre::Report> {
    let parsed_priority = TodoPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let request = TodoCreationRequest::new(name, estimate)?.with_priority(parsed_priority);
    let created = run_async(world.controller.create_todo(&request))
        .wrap_err("create todo for lifecycle scenario")?;
    world.current_id = Some(created.id());
    world.last_todo = Some(created);
    Ok(())
}

#[given("the todo has been started")]
fn todo_has_been_started(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.todo_id()?;
    let started = run_async(world.controller.start(id)).wrap_err("start todo in scenario setup")?;
    world.last_todo = Some(started);
    Ok(())
}
