use tracing::debug;

use crate::api::{ApiError, Backend};
use crate::domain::problem::{Problem, ProblemStatus};

/// Outcome of the entitlement pre-check before navigating to a problem.
/// `UpgradeRequired` is a first-class branch, not a failure: the caller shows
/// the subscription prompt instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    UpgradeRequired,
    Denied(String),
}

/// Single probe, no retry. Free problems are always granted without a
/// network round trip.
pub async fn check_problem_access(backend: &dyn Backend, problem: &Problem) -> AccessDecision {
    if problem.status != ProblemStatus::Premium {
        return AccessDecision::Granted;
    }

    match backend.probe_problem(&problem.slug).await {
        Ok(()) => AccessDecision::Granted,
        Err(ApiError::PremiumRequired) => {
            debug!(slug = %problem.slug, "premium access denied");
            AccessDecision::UpgradeRequired
        }
        Err(_) => AccessDecision::Denied("Failed to access problem".to_string()),
    }
}
