use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiError, Backend};
use crate::domain::problem::{Problem, ProblemPage};
use crate::services::{AccessDecision, Notifier, check_problem_access};
use crate::sync::debounce::Debouncer;
use crate::sync::fetch::{FetchChannel, FetchTicket, SettleOutcome};
use crate::sync::query::{ProblemFilters, QueryDescriptor, QueryState};
use crate::sync::reconcile::{ProblemRow, reconcile_problems};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum RefreshOutcome {
    Committed,
    /// The server reported fewer pages than requested; the query was clamped
    /// and must be re-issued.
    NeedsRefetch,
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Navigate(String),
    UpgradeRequired,
    Denied,
}

/// State machine behind the problem list view: search box (debounced),
/// structured filters, pagination, the list fetch channel, and the premium
/// access gate. Rendering reads `rows()` and the flags; it never owns state.
pub struct ProblemListScreen {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    query: QueryState,
    list: FetchChannel<ProblemPage>,
    search_gate: Debouncer<String>,
    search_rx: mpsc::UnboundedReceiver<String>,
    premium_prompt: bool,
}

impl ProblemListScreen {
    pub fn new(
        backend: Arc<dyn Backend>,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
        search_debounce: Duration,
    ) -> Self {
        let (search_gate, search_rx) = Debouncer::new(search_debounce);
        Self {
            backend,
            notifier,
            query: QueryState::new(page_size),
            list: FetchChannel::new(),
            search_gate,
            search_rx,
            premium_prompt: false,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Raw keystrokes from the search box. Only the value that survives the
    /// quiet period reaches the query, via `settled_search`.
    pub fn search_input(&mut self, text: impl Into<String>) {
        self.search_gate.schedule(text.into());
    }

    /// Next search value that made it through the debounce gate. The driver
    /// feeds this into `apply_search` and refreshes when it returns true.
    pub async fn settled_search(&mut self) -> Option<String> {
        self.search_rx.recv().await
    }

    pub fn apply_search(&mut self, text: String) -> bool {
        self.query.set_search(text)
    }

    pub fn set_filters(&mut self, filters: ProblemFilters) -> bool {
        self.query.set_filters(filters)
    }

    pub fn clear_filters(&mut self) {
        self.query.clear();
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.set_page(page);
    }

    /// Explicit subscription split: `begin_refresh` snapshots the descriptor
    /// and opens a ticket; `finish_refresh` settles it. A driver (or test)
    /// may interleave several of these; the channel discards stale results.
    pub fn begin_refresh(&mut self) -> (QueryDescriptor, FetchTicket) {
        let descriptor = self.query.descriptor();
        debug!(page = descriptor.page, search = %descriptor.search, "issuing problem list fetch");
        (descriptor, self.list.begin())
    }

    pub fn finish_refresh(
        &mut self,
        ticket: FetchTicket,
        result: Result<ProblemPage, ApiError>,
    ) -> RefreshOutcome {
        match self.list.settle(ticket, result) {
            SettleOutcome::Stale => RefreshOutcome::Stale,
            SettleOutcome::Failed => {
                if let Some(message) = self.list.error() {
                    self.notifier.error(message);
                }
                RefreshOutcome::Failed
            }
            SettleOutcome::Committed => {
                let total_pages = self
                    .list
                    .data()
                    .map(|page| page.total_pages)
                    .unwrap_or(1);
                if self.query.clamp_to(total_pages) {
                    RefreshOutcome::NeedsRefetch
                } else {
                    RefreshOutcome::Committed
                }
            }
        }
    }

    /// One-shot refresh for the common sequential case, re-issuing once if
    /// the requested page turned out to be past the end.
    pub async fn refresh(&mut self) {
        loop {
            let (descriptor, ticket) = self.begin_refresh();
            let backend = Arc::clone(&self.backend);
            let result = backend.fetch_problems(descriptor).await;
            if self.finish_refresh(ticket, result) != RefreshOutcome::NeedsRefetch {
                break;
            }
        }
    }

    /// Reconciled, blocked-filtered view model.
    pub fn rows(&self) -> Vec<ProblemRow> {
        match self.list.data() {
            Some(page) => reconcile_problems(&page.problems, Some(&page.user_problem_status)),
            None => Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn total_pages(&self) -> u32 {
        self.list.data().map(|page| page.total_pages).unwrap_or(1)
    }

    pub fn total_problems_in_db(&self) -> u64 {
        self.list
            .data()
            .map(|page| page.total_problems_in_db)
            .unwrap_or(0)
    }

    /// Row activation: free problems navigate straight away, premium ones go
    /// through the entitlement gate first.
    pub async fn open_problem(&mut self, problem: &Problem) -> OpenOutcome {
        match check_problem_access(self.backend.as_ref(), problem).await {
            AccessDecision::Granted => {
                OpenOutcome::Navigate(format!("/user/problems/{}", problem.slug))
            }
            AccessDecision::UpgradeRequired => {
                self.premium_prompt = true;
                OpenOutcome::UpgradeRequired
            }
            AccessDecision::Denied(message) => {
                self.notifier.error(&message);
                OpenOutcome::Denied
            }
        }
    }

    pub fn premium_prompt(&self) -> bool {
        self.premium_prompt
    }

    pub fn dismiss_premium_prompt(&mut self) {
        self.premium_prompt = false;
    }
}
