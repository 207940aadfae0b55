use std::collections::HashMap;

use crate::domain::problem::{Problem, UserProblemStatus};
use crate::domain::stats::RevenuePoint;

/// A problem annotated with the user's solved status, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRow {
    pub problem: Problem,
    pub solved: bool,
}

/// Merges the primary list with the independently-fetched status overlay.
///
/// The overlay may not have arrived yet (`None`) and entries may be missing;
/// both mean "not solved" and never delay list rendering. Administratively
/// blocked records are dropped here so they cannot reach a user-facing view
/// no matter what the server included.
pub fn reconcile_problems(
    problems: &[Problem],
    overlay: Option<&[UserProblemStatus]>,
) -> Vec<ProblemRow> {
    let solved: HashMap<&str, bool> = overlay
        .unwrap_or_default()
        .iter()
        .map(|status| (status.problem_id.as_str(), status.solved))
        .collect();

    problems
        .iter()
        .filter(|problem| !problem.is_blocked)
        .map(|problem| ProblemRow {
            solved: solved.get(problem.id.as_str()).copied().unwrap_or(false),
            problem: problem.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueSummary {
    pub total: f64,
    /// Highest-earning point; ties resolve to the first occurrence in server
    /// order.
    pub top: Option<RevenuePoint>,
}

pub fn summarize_revenue(points: &[RevenuePoint]) -> RevenueSummary {
    let total = points.iter().map(|point| point.revenue).sum();
    let mut top: Option<&RevenuePoint> = None;
    for point in points {
        match top {
            Some(current) if point.revenue <= current.revenue => {}
            _ => top = Some(point),
        }
    }
    RevenueSummary {
        total,
        top: top.cloned(),
    }
}
