mod dashboard;
mod problem_details;
mod problem_list;
mod submissions;

pub use dashboard::{DashboardScreen, format_count};
pub use problem_details::ProblemDetailsScreen;
pub use problem_list::{OpenOutcome, ProblemListScreen, RefreshOutcome};
pub use submissions::SubmissionsScreen;
