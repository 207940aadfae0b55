use tracing::{debug, warn};

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Identifies one issued request. Settling with a ticket older than the
/// latest `begin` is a stale completion and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SettleOutcome {
    Committed,
    Failed,
    Stale,
}

/// Owns the request lifecycle for one logical query channel.
///
/// Exactly one request is logically current at any moment: `begin` bumps a
/// monotonic sequence and every completion is checked against it before it
/// may touch state. The last committed payload survives both `Loading` and
/// `Failed`, so a transient failure never blanks an already-rendered list.
#[derive(Debug)]
pub struct FetchChannel<T> {
    phase: FetchPhase,
    data: Option<T>,
    error: Option<String>,
    seq: u64,
}

impl<T> Default for FetchChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchChannel<T> {
    pub fn new() -> Self {
        Self {
            phase: FetchPhase::Idle,
            data: None,
            error: None,
            seq: 0,
        }
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// Last committed payload, if any request ever succeeded.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin(&mut self) -> FetchTicket {
        self.seq += 1;
        self.phase = FetchPhase::Loading;
        self.error = None;
        FetchTicket(self.seq)
    }

    pub fn settle(&mut self, ticket: FetchTicket, result: Result<T, ApiError>) -> SettleOutcome {
        if ticket.0 != self.seq {
            debug!(
                issued = ticket.0,
                current = self.seq,
                "dropping superseded fetch result"
            );
            return SettleOutcome::Stale;
        }
        match result {
            Ok(payload) => {
                self.data = Some(payload);
                self.phase = FetchPhase::Success;
                self.error = None;
                SettleOutcome::Committed
            }
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "fetch failed, keeping last committed payload");
                self.phase = FetchPhase::Failed;
                self.error = Some(message);
                SettleOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_commits_payload() {
        let mut channel = FetchChannel::new();
        let ticket = channel.begin();
        assert!(channel.is_loading());

        let outcome = channel.settle(ticket, Ok(vec![1, 2, 3]));
        assert_eq!(outcome, SettleOutcome::Committed);
        assert_eq!(channel.phase(), FetchPhase::Success);
        assert_eq!(channel.data(), Some(&vec![1, 2, 3]));
        assert!(channel.error().is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut channel = FetchChannel::new();
        let first = channel.begin();
        let second = channel.begin();

        // First request settles after being superseded; its payload must
        // never reach state.
        assert_eq!(channel.settle(first, Ok(vec![1])), SettleOutcome::Stale);
        assert_eq!(channel.data(), None);
        assert!(channel.is_loading());

        assert_eq!(channel.settle(second, Ok(vec![2])), SettleOutcome::Committed);
        assert_eq!(channel.data(), Some(&vec![2]));
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut channel = FetchChannel::new();
        let first = channel.begin();
        let second = channel.begin();

        let outcome = channel.settle(first, Err(ApiError::rejected("old request died")));
        assert_eq!(outcome, SettleOutcome::Stale);
        assert!(channel.error().is_none());

        let _ = channel.settle(second, Ok(vec![9]));
        assert_eq!(channel.phase(), FetchPhase::Success);
    }

    #[test]
    fn test_failure_preserves_last_committed_payload() {
        let mut channel = FetchChannel::new();
        let ticket = channel.begin();
        let _ = channel.settle(ticket, Ok(vec![1, 2]));

        let ticket = channel.begin();
        let outcome = channel.settle(ticket, Err(ApiError::rejected("server down")));
        assert_eq!(outcome, SettleOutcome::Failed);
        assert_eq!(channel.phase(), FetchPhase::Failed);
        assert_eq!(channel.data(), Some(&vec![1, 2]));
        assert_eq!(channel.error(), Some("server down"));
    }

    #[test]
    fn test_failure_without_previous_payload_leaves_none() {
        let mut channel: FetchChannel<Vec<u8>> = FetchChannel::new();
        let ticket = channel.begin();
        let _ = channel.settle(ticket, Err(ApiError::rejected("boom")));
        assert_eq!(channel.data(), None);
        assert_eq!(channel.phase(), FetchPhase::Failed);
    }

    #[test]
    fn test_begin_clears_stale_error_but_keeps_data() {
        let mut channel = FetchChannel::new();
        let ticket = channel.begin();
        let _ = channel.settle(ticket, Ok(vec![5]));
        let ticket = channel.begin();
        let _ = channel.settle(ticket, Err(ApiError::rejected("flaky")));

        let _ = channel.begin();
        assert!(channel.error().is_none());
        assert_eq!(channel.data(), Some(&vec![5]));
        assert!(channel.is_loading());
    }
}
