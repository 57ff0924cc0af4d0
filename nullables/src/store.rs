//! Nullable store: wraps a real backend and fails writes on demand.

use ballot_store::{ElectionStore, MemoryStore, StoreError, VoterStore, WeightStore};
use ballot_types::{Election, ElectionId, Voter, VoterId, WeightTable};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Faults {
    fail_writes: AtomicBool,
    rejected_writes: AtomicU64,
}

/// A store whose writes can be made to fail, for testing that a failed
/// commit leaves no partial state behind. Reads always pass through.
///
/// Clones share the same backend and fault switch.
pub struct FailingStore<S = MemoryStore> {
    inner: Arc<S>,
    faults: Arc<Faults>,
}

impl<S> Clone for FailingStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            faults: Arc::clone(&self.faults),
        }
    }
}

impl FailingStore<MemoryStore> {
    pub fn new() -> Self {
        Self::wrap(MemoryStore::new())
    }
}

impl Default for FailingStore<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FailingStore<S> {
    pub fn wrap(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
            faults: Arc::new(Faults::default()),
        }
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.faults.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// How many writes have been refused so far.
    pub fn rejected_writes(&self) -> u64 {
        self.faults.rejected_writes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn check_write(&self, what: &str) -> Result<(), StoreError> {
        if self.faults.fail_writes.load(Ordering::SeqCst) {
            self.faults.rejected_writes.fetch_add(1, Ordering::SeqCst);
            return Err(StoreError::Backend(format!("injected failure writing {what}")));
        }
        Ok(())
    }
}

impl<S: VoterStore> VoterStore for FailingStore<S> {
    fn get_voter(&self, id: &VoterId) -> Result<Option<Voter>, StoreError> {
        self.inner.get_voter(id)
    }

    fn put_voter(&self, voter: &Voter) -> Result<(), StoreError> {
        self.check_write("voter")?;
        self.inner.put_voter(voter)
    }

    fn iter_voters(&self) -> Result<Vec<Voter>, StoreError> {
        self.inner.iter_voters()
    }
}

impl<S: WeightStore> WeightStore for FailingStore<S> {
    fn get_weights(&self) -> Result<WeightTable, StoreError> {
        self.inner.get_weights()
    }

    fn put_weights(&self, table: &WeightTable) -> Result<(), StoreError> {
        self.check_write("weights")?;
        self.inner.put_weights(table)
    }
}

impl<S: ElectionStore> ElectionStore for FailingStore<S> {
    fn get_election(&self, id: ElectionId) -> Result<Option<Election>, StoreError> {
        self.inner.get_election(id)
    }

    fn put_election(&self, election: &Election) -> Result<(), StoreError> {
        self.check_write("election")?;
        self.inner.put_election(election)
    }

    fn insert_election(&self, election: &Election) -> Result<(), StoreError> {
        self.check_write("election")?;
        self.inner.insert_election(election)
    }

    fn next_election_id(&self) -> Result<ElectionId, StoreError> {
        self.inner.next_election_id()
    }

    fn iter_elections(&self) -> Result<Vec<Election>, StoreError> {
        self.inner.iter_elections()
    }
}
