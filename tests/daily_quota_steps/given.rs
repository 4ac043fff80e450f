//! Given steps for daily quota BDD scenarios.

use super::world::{QuotaWorld, run_async};
use daily_quota::quota::services::{CreateTaskRequest, RegisterUserRequest};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a user "{user}" with a daily quota of {limit:u32}"#)]
fn registered_user(world: &mut QuotaWorld, user: String, limit: u32) -> Result<(), eyre::Report> {
    let max_todo = i32::try_from(limit).wrap_err("quota does not fit the stored column")?;
    run_async(
        world
            .service
            .register_user(RegisterUserRequest::new(user, "secret", max_todo)),
    )
    .wrap_err("register scenario user")?;
    Ok(())
}

#[given(r#""{user}" has created {count:u32} tasks on "{date}""#)]
fn existing_tasks(
    world: &mut QuotaWorld,
    user: String,
    count: u32,
    date: String,
) -> Result<(), eyre::Report> {
    for n in 0..count {
        run_async(world.service.create_task(CreateTaskRequest::new(
            user.as_str(),
            format!("task {n}"),
            date.as_str(),
        )))
        .wrap_err("seed task within quota")?;
    }
    Ok(())
}
