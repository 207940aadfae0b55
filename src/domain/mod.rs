pub mod problem;
pub mod stats;
pub mod submission;
