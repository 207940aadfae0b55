use tracing::debug;

/// Identifies one in-flight edit attempt on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum EditOutcome {
    Committed,
    RolledBack,
    /// The attempt was superseded by a newer edit before it settled; its
    /// result must not touch the field.
    Stale,
}

/// Optimistic edit state machine for one (entity, field) pair.
///
/// `begin` applies the new value locally before any network round trip and
/// retains the pre-edit value as the rollback target. A second edit arriving
/// while one is pending supersedes it: the rollback target stays the original
/// clean value, and the superseded attempt's settlement is stale. Commit
/// keeps the local value; rollback restores the clean value synchronously.
#[derive(Debug, Clone)]
pub struct OptimisticField<T: Clone> {
    value: T,
    clean: Option<T>,
    epoch: u64,
}

impl<T: Clone> OptimisticField<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            clean: None,
            epoch: 0,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_pending(&self) -> bool {
        self.clean.is_some()
    }

    /// Replaces the field wholesale, e.g. after loading the canonical record.
    /// Any pending edit is forgotten.
    pub fn reset(&mut self, value: T) {
        self.value = value;
        self.clean = None;
        self.epoch += 1;
    }

    pub fn begin(&mut self, next: T) -> EditTicket {
        if self.clean.is_none() {
            self.clean = Some(self.value.clone());
        }
        self.value = next;
        self.epoch += 1;
        EditTicket(self.epoch)
    }

    pub fn commit(&mut self, ticket: EditTicket) -> EditOutcome {
        if ticket.0 != self.epoch {
            debug!("dropping settlement of superseded edit");
            return EditOutcome::Stale;
        }
        self.clean = None;
        EditOutcome::Committed
    }

    pub fn rollback(&mut self, ticket: EditTicket) -> EditOutcome {
        if ticket.0 != self.epoch {
            debug!("dropping rollback of superseded edit");
            return EditOutcome::Stale;
        }
        if let Some(clean) = self.clean.take() {
            self.value = clean;
        }
        EditOutcome::RolledBack
    }
}
