use async_trait::async_trait;
use mockall::automock;

use super::error::ApiError;
use crate::domain::problem::{Difficulty, Problem, ProblemPage, ProblemStatus};
use crate::domain::stats::{DashboardStats, RevenuePeriod, RevenuePoint};
use crate::domain::submission::{Submission, SubmissionQuery};
use crate::sync::query::QueryDescriptor;

/// The REST collaborator as seen by the core. Everything above this trait is
/// transport-agnostic; tests substitute `MockBackend`.
#[automock]
#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_problems(&self, query: QueryDescriptor) -> Result<ProblemPage, ApiError>;

    /// Entitlement pre-check: a plain GET against the gated resource that
    /// either succeeds or signals `ApiError::PremiumRequired`.
    async fn probe_problem(&self, slug: &str) -> Result<(), ApiError>;

    async fn fetch_admin_problem(&self, id: &str) -> Result<Problem, ApiError>;

    async fn update_difficulty(&self, id: &str, difficulty: Difficulty)
    -> Result<Problem, ApiError>;

    async fn update_status(&self, id: &str, status: ProblemStatus) -> Result<Problem, ApiError>;

    async fn set_blocked(&self, id: &str, blocked: bool) -> Result<Problem, ApiError>;

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, ApiError>;

    async fn fetch_revenue(&self, period: RevenuePeriod) -> Result<Vec<RevenuePoint>, ApiError>;

    async fn fetch_submissions(&self, query: SubmissionQuery)
    -> Result<Vec<Submission>, ApiError>;
}
