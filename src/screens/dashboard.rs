use std::sync::Arc;

use crate::api::{ApiError, Backend};
use crate::domain::stats::{DashboardStats, RevenuePeriod, RevenuePoint};
use crate::services::Notifier;
use crate::sync::fetch::{FetchChannel, FetchTicket, SettleOutcome};
use crate::sync::reconcile::{RevenueSummary, summarize_revenue};

/// Compact display form of a counter: `999`, `1.5k`, `2.1M`.
pub fn format_count(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Admin dashboard: the counters and the revenue series live on independent
/// channels, so a failure in one never clears the other. The revenue series
/// is keyed by period; switching periods supersedes any in-flight fetch.
pub struct DashboardScreen {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    stats: FetchChannel<DashboardStats>,
    revenue: FetchChannel<Vec<RevenuePoint>>,
    period: RevenuePeriod,
}

impl DashboardScreen {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            stats: FetchChannel::new(),
            revenue: FetchChannel::new(),
            period: RevenuePeriod::Yearly,
        }
    }

    pub async fn load_stats(&mut self) {
        let ticket = self.stats.begin();
        let backend = Arc::clone(&self.backend);
        let result = backend.fetch_dashboard_stats().await;
        if self.stats.settle(ticket, result) == SettleOutcome::Failed {
            self.notifier.error("Failed to load dashboard stats");
        }
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.data()
    }

    pub fn period(&self) -> RevenuePeriod {
        self.period
    }

    /// Returns true when the period actually changed and the series must be
    /// refetched.
    pub fn set_period(&mut self, period: RevenuePeriod) -> bool {
        if period == self.period {
            return false;
        }
        self.period = period;
        true
    }

    pub fn begin_revenue_refresh(&mut self) -> (RevenuePeriod, FetchTicket) {
        (self.period, self.revenue.begin())
    }

    pub fn finish_revenue_refresh(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<RevenuePoint>, ApiError>,
    ) -> SettleOutcome {
        let outcome = self.revenue.settle(ticket, result);
        if outcome == SettleOutcome::Failed {
            self.notifier.error("Failed to load revenue data");
        }
        outcome
    }

    pub async fn refresh_revenue(&mut self) {
        let (period, ticket) = self.begin_revenue_refresh();
        let backend = Arc::clone(&self.backend);
        let result = backend.fetch_revenue(period).await;
        let _ = self.finish_revenue_refresh(ticket, result);
    }

    /// Committed series in server order.
    pub fn revenue(&self) -> &[RevenuePoint] {
        self.revenue.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn revenue_loading(&self) -> bool {
        self.revenue.is_loading()
    }

    pub fn summary(&self) -> RevenueSummary {
        summarize_revenue(self.revenue())
    }
}
