//! CLI command implementations

pub mod plan;
pub mod report;
pub mod status;

use crate::client::PlanRequest;
use crate::ProfileArgs;

/// Build the request payload shared by the plan and report endpoints
pub fn plan_request(profile: &ProfileArgs) -> PlanRequest {
    PlanRequest {
        gender: profile.gender.clone(),
        age: profile.age,
        height_cm: profile.height_cm,
        weight_kg: profile.weight_kg,
        activity: profile.activity.clone(),
        goal: profile.goal.clone(),
    }
}
