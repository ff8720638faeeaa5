//! Given steps for kanban board BDD scenarios.

use super::world::KanbanWorld;
use eyre::WrapErr;
use quadro::board::domain::{BoardConfig, Status, StatusColor, StatusId, Task, TaskDetails, TaskId};
use rstest_bdd_macros::given;

#[given(r#"a project whose "{status}" column holds "{tasks}""#)]
fn project_with_column(
    world: &mut KanbanWorld,
    status: String,
    tasks: String,
) -> Result<(), eyre::Report> {
    let status_id = StatusId::new(status).wrap_err("parse seeded status")?;
    for id in tasks.split(',') {
        let task_id = TaskId::new(id).wrap_err("parse seeded task id")?;
        let name = format!("Task {task_id}");
        world
            .tasks
            .push(Task::new(task_id, TaskDetails::new(name, status_id.clone())));
    }
    Ok(())
}

#[given(r#"a board configured with only the "{status}" status"#)]
fn board_with_single_status(
    world: &mut KanbanWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let id = StatusId::new(status).wrap_err("parse configured status")?;
    let only = Status::new(id.clone(), id.as_str(), StatusColor::synthesized())?;
    world.config = BoardConfig::with_statuses(vec![only]);
    Ok(())
}

#[given("the backend rejects the next status update")]
fn backend_rejects_next_update(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    world.backend.fail_next_status_updates(1)?;
    Ok(())
}

#[given("the board is open")]
fn board_is_open(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    world.open_board().wrap_err("open board for scenario")
}
