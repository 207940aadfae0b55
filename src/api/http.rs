use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::client::Backend;
use super::endpoints;
use super::envelope::ApiEnvelope;
use super::error::ApiError;
use crate::config::AppConfig;
use crate::domain::problem::{Difficulty, Problem, ProblemPage, ProblemStatus};
use crate::domain::stats::{DashboardStats, RevenuePeriod, RevenuePoint};
use crate::domain::submission::{Submission, SubmissionQuery};
use crate::sync::query::QueryDescriptor;

/// reqwest-backed implementation of [`Backend`].
///
/// Error responses still carry the standard envelope, so the HTTP status is
/// not inspected; the envelope's `success` flag is authoritative.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Admin problem endpoints nest the record one level down.
#[derive(Debug, Deserialize)]
struct ProblemData {
    problem: Problem,
}

#[derive(Debug, Deserialize)]
struct SubmissionData {
    #[serde(default)]
    submissions: Vec<Submission>,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: impl AsRef<str>) -> String {
        format!("{}{}", self.base_url, path.as_ref())
    }

    async fn get_envelope<T: serde::de::DeserializeOwned>(
        &self,
        path: impl AsRef<str>,
        params: &[(String, String)],
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self.client.get(&url).query(params).send().await?;
        Ok(response.json().await?)
    }

    async fn patch_problem(
        &self,
        path: impl AsRef<str>,
        body: serde_json::Value,
        default_message: &str,
    ) -> Result<Problem, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "PATCH");
        let response = self.client.patch(&url).json(&body).send().await?;
        let envelope: ApiEnvelope<ProblemData> = response.json().await?;
        envelope.into_result(default_message).map(|data| data.problem)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_problems(&self, query: QueryDescriptor) -> Result<ProblemPage, ApiError> {
        let envelope: ApiEnvelope<ProblemPage> = self
            .get_envelope(endpoints::PROBLEM_LIST, &query.to_params())
            .await?;
        envelope.into_result("Failed to load problems")
    }

    async fn probe_problem(&self, slug: &str) -> Result<(), ApiError> {
        let envelope: ApiEnvelope<serde_json::Value> = self
            .get_envelope(endpoints::problem_detail(slug), &[])
            .await?;
        envelope.into_ack("Failed to access problem")
    }

    async fn fetch_admin_problem(&self, id: &str) -> Result<Problem, ApiError> {
        let envelope: ApiEnvelope<ProblemData> = self
            .get_envelope(endpoints::admin_problem(id), &[])
            .await?;
        envelope
            .into_result("Failed to load problem details")
            .map(|data| data.problem)
    }

    async fn update_difficulty(
        &self,
        id: &str,
        difficulty: Difficulty,
    ) -> Result<Problem, ApiError> {
        self.patch_problem(
            endpoints::admin_problem(id),
            json!({ "difficulty": difficulty }),
            "Failed to update difficulty",
        )
        .await
    }

    async fn update_status(&self, id: &str, status: ProblemStatus) -> Result<Problem, ApiError> {
        self.patch_problem(
            endpoints::admin_problem_status(id),
            json!({ "status": status }),
            "Failed to update status",
        )
        .await
    }

    async fn set_blocked(&self, id: &str, blocked: bool) -> Result<Problem, ApiError> {
        let (path, default_message) = if blocked {
            (endpoints::admin_problem_block(id), "Failed to block problem")
        } else {
            (endpoints::admin_problem_unblock(id), "Failed to unblock problem")
        };
        self.patch_problem(path, json!({}), default_message).await
    }

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let envelope: ApiEnvelope<DashboardStats> = self
            .get_envelope(endpoints::DASHBOARD_STATS, &[])
            .await?;
        envelope.into_result("Failed to fetch dashboard stats")
    }

    async fn fetch_revenue(&self, period: RevenuePeriod) -> Result<Vec<RevenuePoint>, ApiError> {
        let params = [("period".to_string(), period.as_str().to_string())];
        let envelope: ApiEnvelope<Vec<RevenuePoint>> = self
            .get_envelope(endpoints::REVENUE_STATS, &params)
            .await?;
        envelope.into_result("Failed to fetch revenue stats")
    }

    async fn fetch_submissions(
        &self,
        query: SubmissionQuery,
    ) -> Result<Vec<Submission>, ApiError> {
        let envelope: ApiEnvelope<SubmissionData> = self
            .get_envelope(endpoints::SUBMISSION_LIST, &query.to_params())
            .await?;
        envelope
            .into_result("Failed to fetch submissions")
            .map(|data| data.submissions)
    }
}
