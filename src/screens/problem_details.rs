use std::sync::Arc;

use tracing::warn;

use crate::api::{ApiError, Backend};
use crate::domain::problem::{Difficulty, Problem, ProblemStatus, TestCase};
use crate::services::Notifier;
use crate::sync::fetch::{FetchChannel, SettleOutcome};
use crate::sync::mutate::{EditOutcome, OptimisticField};

const TEST_CASES_PER_PAGE: usize = 10;

/// Admin problem editor. Three inline-editable fields share one optimistic
/// state machine each: the edit shows immediately, persists in the
/// background, and reverts together with the error notice if persistence
/// fails. The canonical record in the fetch channel is only updated from
/// server replies.
pub struct ProblemDetailsScreen {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    id: String,
    record: FetchChannel<Problem>,
    difficulty: OptimisticField<Difficulty>,
    status: OptimisticField<ProblemStatus>,
    active: OptimisticField<bool>,
    test_case_page: usize,
}

impl ProblemDetailsScreen {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            id: String::new(),
            record: FetchChannel::new(),
            difficulty: OptimisticField::new(Difficulty::Medium),
            status: OptimisticField::new(ProblemStatus::Free),
            active: OptimisticField::new(true),
            test_case_page: 1,
        }
    }

    /// Loads the canonical record. A blank id fails fast with a user-visible
    /// error before any network call.
    pub async fn load(&mut self, id: &str) {
        let ticket = self.record.begin();
        if id.trim().is_empty() {
            warn!("problem details requested without an id");
            let _ = self.record.settle(ticket, Err(ApiError::InvalidId));
            self.notifier.error("No problem ID provided");
            return;
        }

        self.id = id.to_string();
        let backend = Arc::clone(&self.backend);
        let result = backend.fetch_admin_problem(id).await;
        match self.record.settle(ticket, result) {
            SettleOutcome::Committed => {
                if let Some(problem) = self.record.data() {
                    self.difficulty.reset(problem.difficulty);
                    self.status.reset(problem.status);
                    self.active.reset(!problem.is_blocked);
                }
                self.test_case_page = 1;
            }
            SettleOutcome::Failed => {
                if let Some(message) = self.record.error() {
                    self.notifier.error(message);
                }
            }
            SettleOutcome::Stale => {}
        }
    }

    pub fn problem(&self) -> Option<&Problem> {
        self.record.data()
    }

    pub fn error(&self) -> Option<&str> {
        self.record.error()
    }

    pub fn is_loading(&self) -> bool {
        self.record.is_loading()
    }

    pub fn difficulty(&self) -> Difficulty {
        *self.difficulty.value()
    }

    pub fn status(&self) -> ProblemStatus {
        *self.status.value()
    }

    pub fn is_active(&self) -> bool {
        *self.active.value()
    }

    pub async fn set_difficulty(&mut self, next: Difficulty) {
        let ticket = self.difficulty.begin(next);
        let backend = Arc::clone(&self.backend);
        match backend.update_difficulty(&self.id, next).await {
            Ok(updated) => {
                if self.difficulty.commit(ticket) == EditOutcome::Committed {
                    if let Some(problem) = self.record.data_mut() {
                        problem.difficulty = updated.difficulty;
                    }
                    self.notifier.success("Difficulty updated successfully");
                }
            }
            Err(err) => {
                if self.difficulty.rollback(ticket) == EditOutcome::RolledBack {
                    self.notifier.error(&err.to_string());
                }
            }
        }
    }

    pub async fn set_status(&mut self, next: ProblemStatus) {
        let ticket = self.status.begin(next);
        let backend = Arc::clone(&self.backend);
        match backend.update_status(&self.id, next).await {
            Ok(updated) => {
                if self.status.commit(ticket) == EditOutcome::Committed {
                    if let Some(problem) = self.record.data_mut() {
                        problem.status = updated.status;
                    }
                    self.notifier.success("Status updated successfully");
                }
            }
            Err(err) => {
                if self.status.rollback(ticket) == EditOutcome::RolledBack {
                    self.notifier.error(&err.to_string());
                }
            }
        }
    }

    /// Active is the inverse of the record's blocked flag.
    pub async fn set_active(&mut self, next: bool) {
        let ticket = self.active.begin(next);
        let backend = Arc::clone(&self.backend);
        match backend.set_blocked(&self.id, !next).await {
            Ok(updated) => {
                if self.active.commit(ticket) == EditOutcome::Committed {
                    if let Some(problem) = self.record.data_mut() {
                        problem.is_blocked = updated.is_blocked;
                    }
                    let verb = if next { "activated" } else { "deactivated" };
                    self.notifier
                        .success(&format!("Problem {verb} successfully"));
                }
            }
            Err(err) => {
                if self.active.rollback(ticket) == EditOutcome::RolledBack {
                    self.notifier.error(&err.to_string());
                }
            }
        }
    }

    pub fn set_test_case_page(&mut self, page: usize) {
        self.test_case_page = page.max(1).min(self.total_test_case_pages());
    }

    pub fn test_case_page(&self) -> usize {
        self.test_case_page
    }

    pub fn total_test_case_pages(&self) -> usize {
        let count = self
            .record
            .data()
            .map(|problem| problem.test_cases.len())
            .unwrap_or(0);
        count.div_ceil(TEST_CASES_PER_PAGE).max(1)
    }

    /// The current page of the record's embedded test cases.
    pub fn visible_test_cases(&self) -> &[TestCase] {
        let Some(problem) = self.record.data() else {
            return &[];
        };
        let start = (self.test_case_page - 1) * TEST_CASES_PER_PAGE;
        let end = (start + TEST_CASES_PER_PAGE).min(problem.test_cases.len());
        if start >= problem.test_cases.len() {
            return &[];
        }
        &problem.test_cases[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBackend;
    use crate::services::{Notice, RecordingNotifier};
    use mockall::predicate::eq;

    fn problem(difficulty: Difficulty) -> Problem {
        let mut problem = Problem::new("p1", "two-sum", "Two Sum");
        problem.difficulty = difficulty;
        problem
    }

    fn screen_with(backend: MockBackend) -> (ProblemDetailsScreen, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let screen = ProblemDetailsScreen::new(Arc::new(backend), notifier.clone());
        (screen, notifier)
    }

    #[tokio::test]
    async fn test_blank_id_fails_fast_without_network() {
        let mut backend = MockBackend::new();
        backend.expect_fetch_admin_problem().times(0);

        let (mut screen, notifier) = screen_with(backend);
        screen.load("  ").await;

        assert!(screen.problem().is_none());
        assert_eq!(screen.error(), Some("Invalid or missing identifier"));
        assert_eq!(notifier.errors(), vec!["No problem ID provided".to_string()]);
    }

    #[tokio::test]
    async fn test_load_seeds_editable_fields() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_admin_problem()
            .with(eq("p1"))
            .returning(|_| {
                let mut p = problem(Difficulty::Hard);
                p.is_blocked = true;
                p.status = ProblemStatus::Premium;
                Ok(p)
            });

        let (mut screen, _notifier) = screen_with(backend);
        screen.load("p1").await;

        assert_eq!(screen.difficulty(), Difficulty::Hard);
        assert_eq!(screen.status(), ProblemStatus::Premium);
        assert!(!screen.is_active());
    }

    #[tokio::test]
    async fn test_successful_edit_commits_and_updates_record() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_admin_problem()
            .returning(|_| Ok(problem(Difficulty::Medium)));
        backend
            .expect_update_difficulty()
            .with(eq("p1"), eq(Difficulty::Hard))
            .times(1)
            .returning(|_, _| Ok(problem(Difficulty::Hard)));

        let (mut screen, notifier) = screen_with(backend);
        screen.load("p1").await;
        screen.set_difficulty(Difficulty::Hard).await;

        assert_eq!(screen.difficulty(), Difficulty::Hard);
        assert_eq!(screen.problem().unwrap().difficulty, Difficulty::Hard);
        assert!(
            notifier
                .notices()
                .contains(&Notice::Success("Difficulty updated successfully".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_edit_rolls_back_exactly_and_notifies() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_admin_problem()
            .returning(|_| Ok(problem(Difficulty::Medium)));
        backend
            .expect_update_difficulty()
            .returning(|_, _| Err(ApiError::rejected("Failed to update difficulty")));

        let (mut screen, notifier) = screen_with(backend);
        screen.load("p1").await;
        screen.set_difficulty(Difficulty::Hard).await;

        // The reverted value and the error are visible together; the failed
        // value never sticks.
        assert_eq!(screen.difficulty(), Difficulty::Medium);
        assert_eq!(screen.problem().unwrap().difficulty, Difficulty::Medium);
        assert_eq!(
            notifier.errors(),
            vec!["Failed to update difficulty".to_string()]
        );
    }

    #[tokio::test]
    async fn test_deactivate_persists_blocked_flag() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_admin_problem()
            .returning(|_| Ok(problem(Difficulty::Easy)));
        backend
            .expect_set_blocked()
            .with(eq("p1"), eq(true))
            .times(1)
            .returning(|_, _| {
                let mut p = problem(Difficulty::Easy);
                p.is_blocked = true;
                Ok(p)
            });

        let (mut screen, notifier) = screen_with(backend);
        screen.load("p1").await;
        screen.set_active(false).await;

        assert!(!screen.is_active());
        assert!(screen.problem().unwrap().is_blocked);
        assert!(
            notifier
                .notices()
                .contains(&Notice::Success("Problem deactivated successfully".to_string()))
        );
    }

    #[tokio::test]
    async fn test_test_case_pagination() {
        let mut backend = MockBackend::new();
        backend.expect_fetch_admin_problem().returning(|_| {
            let mut p = problem(Difficulty::Easy);
            p.test_cases = (0..23)
                .map(|i| TestCase {
                    id: format!("t{i}"),
                    inputs: vec![],
                    outputs: vec![],
                })
                .collect();
            Ok(p)
        });

        let (mut screen, _notifier) = screen_with(backend);
        screen.load("p1").await;

        assert_eq!(screen.total_test_case_pages(), 3);
        assert_eq!(screen.visible_test_cases().len(), 10);

        screen.set_test_case_page(3);
        assert_eq!(screen.visible_test_cases().len(), 3);

        // Out-of-range requests clamp to the last page.
        screen.set_test_case_page(9);
        assert_eq!(screen.test_case_page(), 3);
    }
}
