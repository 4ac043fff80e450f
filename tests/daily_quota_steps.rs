//! Behaviour tests for daily quota enforcement.

#[path = "daily_quota_steps/mod.rs"]
mod daily_quota_steps_defs;

use daily_quota_steps_defs::world::{QuotaWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/daily_quota.feature",
    name = "Alice fills her quota for one day and starts afresh the next"
)]
#[tokio::test(flavor = "multi_thread")]
async fn alice_two_day_walkthrough(world: QuotaWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/daily_quota.feature",
    name = "Reject the task that would exceed the daily quota"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_task_over_quota(world: QuotaWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/daily_quota.feature",
    name = "A new date starts with an empty quota"
)]
#[tokio::test(flavor = "multi_thread")]
async fn new_date_starts_empty(world: QuotaWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/daily_quota.feature",
    name = "A zero quota admits nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn zero_quota_admits_nothing(world: QuotaWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/daily_quota.feature",
    name = "Unregistered users cannot create tasks"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unregistered_user_is_refused(world: QuotaWorld) {
    let _ = world;
}
