use std::sync::Arc;

use crate::api::Backend;
use crate::domain::submission::{Submission, SubmissionQuery};
use crate::services::Notifier;
use crate::sync::fetch::{FetchChannel, SettleOutcome};

/// Read-only submission history. One fetch channel, no mutation concerns.
pub struct SubmissionsScreen {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    list: FetchChannel<Vec<Submission>>,
}

impl SubmissionsScreen {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            list: FetchChannel::new(),
        }
    }

    pub async fn load(&mut self, query: SubmissionQuery) {
        let ticket = self.list.begin();
        let backend = Arc::clone(&self.backend);
        let result = backend.fetch_submissions(query).await;
        if self.list.settle(ticket, result) == SettleOutcome::Failed {
            if let Some(message) = self.list.error() {
                self.notifier.error(message);
            }
        }
    }

    pub fn submissions(&self) -> &[Submission] {
        self.list.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }
}
