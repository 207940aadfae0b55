mod access;
mod notify;

pub use access::{AccessDecision, check_problem_access};
pub use notify::{LogNotifier, Notice, Notifier, RecordingNotifier};
