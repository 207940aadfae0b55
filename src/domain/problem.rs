use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

/// Free vs premium gating of a problem. Blocked/active is a separate flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProblemStatus {
    Free,
    Premium,
}

impl ProblemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemStatus::Free => "free",
            ProblemStatus::Premium => "premium",
        }
    }
}

/// One named input or output value of a test case. Values are kept as raw
/// JSON since the backend owns their shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IoValue {
    pub name: String,
    pub value: Value,
}

impl IoValue {
    fn render(&self) -> String {
        match &self.value {
            Value::String(s) => format!("{}: {}", self.name, s),
            other => format!("{}: {}", self.name, other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub inputs: Vec<IoValue>,
    #[serde(default)]
    pub outputs: Vec<IoValue>,
}

impl TestCase {
    pub fn input_text(&self) -> String {
        self.inputs.iter().map(IoValue::render).collect::<Vec<_>>().join("\n")
    }

    pub fn output_text(&self) -> String {
        self.outputs.iter().map(IoValue::render).collect::<Vec<_>>().join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub status: ProblemStatus,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(rename = "testCaseIds", default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Problem {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            status: ProblemStatus::Free,
            is_blocked: false,
            test_cases: Vec::new(),
            updated_at: None,
        }
    }
}

/// Per-user solved annotation, fetched alongside the problem list. A missing
/// entry means "not solved", never an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProblemStatus {
    pub problem_id: String,
    #[serde(default)]
    pub solved: bool,
}

fn first_page() -> u32 {
    1
}

/// Wire shape of one page of `GET /problems`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemPage {
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub user_problem_status: Vec<UserProblemStatus>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub total_problems_in_db: u64,
}

impl Default for ProblemPage {
    fn default() -> Self {
        Self {
            problems: Vec::new(),
            user_problem_status: Vec::new(),
            total_pages: 1,
            current_page: 1,
            total_problems_in_db: 0,
        }
    }
}
