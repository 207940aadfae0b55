use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A past submission. Read-only on the client; the verdict string is owned by
/// the backend and rendered verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: String,
    pub problem_slug: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionQuery {
    pub problem_slug: Option<String>,
    pub contest_id: Option<String>,
}

impl SubmissionQuery {
    pub fn for_problem(slug: impl Into<String>) -> Self {
        Self {
            problem_slug: Some(slug.into()),
            contest_id: None,
        }
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(slug) = &self.problem_slug {
            params.push(("problemSlug".to_string(), slug.clone()));
        }
        if let Some(contest) = &self.contest_id {
            params.push(("contestId".to_string(), contest.clone()));
        }
        params
    }
}
