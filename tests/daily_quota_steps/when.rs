//! When steps for daily quota BDD scenarios.

use super::world::{QuotaWorld, run_async};
use daily_quota::quota::services::CreateTaskRequest;
use rstest_bdd_macros::when;

#[when(r#""{user}" creates a task "{content}" on "{date}""#)]
fn create_task(world: &mut QuotaWorld, user: String, content: String, date: String) {
    let result = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(user, content, date)),
    );
    world.last_result = Some(result);
}
