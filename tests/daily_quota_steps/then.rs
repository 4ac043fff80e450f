//! Then steps for daily quota BDD scenarios.

use super::world::{QuotaWorld, run_async};
use daily_quota::quota::{
    domain::{TaskDate, UserId},
    ports::QuotaRepository,
    services::AdmissionError,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then("the task is accepted")]
fn task_accepted(world: &QuotaWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected task to be created, got {err}")),
        None => Err(eyre::eyre!("missing creation result")),
    }
}

#[then("the task is rejected because the daily quota is reached")]
fn task_rejected_over_quota(world: &QuotaWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result"))?;
    if !matches!(result, Err(AdmissionError::QuotaExceeded { .. })) {
        return Err(eyre::eyre!("expected QuotaExceeded, got {result:?}"));
    }
    Ok(())
}

#[then("the task is rejected because the quota is unknown")]
fn task_rejected_unknown_quota(world: &QuotaWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result"))?;
    if !matches!(result, Err(AdmissionError::QuotaUnknown { .. })) {
        return Err(eyre::eyre!("expected QuotaUnknown, got {result:?}"));
    }
    Ok(())
}

#[then(r#""{user}" has {count:u32} tasks on "{date}""#)]
fn bucket_holds(
    world: &QuotaWorld,
    user: String,
    count: u32,
    date: String,
) -> Result<(), eyre::Report> {
    let user_id = UserId::new(user).wrap_err("scenario user id")?;
    let bucket = TaskDate::new(date).wrap_err("scenario date")?;
    let stored = run_async(world.repository.count_tasks(&user_id, &bucket))
        .wrap_err("count tasks in bucket")?;
    if stored != count {
        return Err(eyre::eyre!("expected {count} tasks, found {stored}"));
    }
    Ok(())
}
