//! REST paths, relative to the configured API base URL.

pub const PROBLEM_LIST: &str = "/problems";
pub const DASHBOARD_STATS: &str = "/admin/dashboard-stats";
pub const REVENUE_STATS: &str = "/admin/revenue-stats";
pub const SUBMISSION_LIST: &str = "/submissions";

pub fn problem_detail(slug: &str) -> String {
    format!("/problems/{slug}")
}

pub fn admin_problem(id: &str) -> String {
    format!("/admin/problems/{id}")
}

pub fn admin_problem_status(id: &str) -> String {
    format!("/admin/problems/{id}/status")
}

pub fn admin_problem_block(id: &str) -> String {
    format!("/admin/problems/{id}/block")
}

pub fn admin_problem_unblock(id: &str) -> String {
    format!("/admin/problems/{id}/unblock")
}
