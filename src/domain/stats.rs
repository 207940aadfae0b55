use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub subscribers: u64,
    #[serde(default)]
    pub total_problems: u64,
    #[serde(default)]
    pub total_contests: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RevenuePeriod {
    Monthly,
    Yearly,
}

impl RevenuePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenuePeriod::Monthly => "monthly",
            RevenuePeriod::Yearly => "yearly",
        }
    }
}

/// One bar of the revenue series. Ordering is server-provided and must be
/// preserved as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenuePoint {
    pub period: String,
    #[serde(default)]
    pub revenue: f64,
    pub date: DateTime<Utc>,
}

impl RevenuePoint {
    /// Human label for a chart axis: the month and year for monthly series,
    /// the raw period value (a year) otherwise.
    pub fn label(&self, granularity: RevenuePeriod) -> String {
        match granularity {
            RevenuePeriod::Monthly => self.date.format("%b %Y").to_string(),
            RevenuePeriod::Yearly => self.period.clone(),
        }
    }
}
