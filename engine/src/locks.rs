//! Lock table serialising operations on the same election.

use crate::error::ElectionError;
use ballot_store::StoreError;
use ballot_types::ElectionId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One mutex per election id, created on first use.
///
/// Operations on different elections take different mutexes and never block
/// each other; the table's own lock is held only long enough to look up or
/// insert an entry.
#[derive(Default)]
pub struct ElectionLocks {
    table: Mutex<HashMap<ElectionId, Arc<Mutex<()>>>>,
}

impl ElectionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `id`. Lock it with [`acquire`].
    pub fn handle(&self, id: ElectionId) -> Result<Arc<Mutex<()>>, ElectionError> {
        let mut table = acquire(&self.table, "election lock table")?;
        Ok(Arc::clone(table.entry(id).or_default()))
    }

    /// Number of elections that have a lock allocated.
    pub fn len(&self) -> usize {
        self.table.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lock `mutex`, reporting poisoning as a backend failure instead of panicking.
pub(crate) fn acquire<'a, T>(
    mutex: &'a Mutex<T>,
    what: &str,
) -> Result<MutexGuard<'a, T>, ElectionError> {
    mutex
        .lock()
        .map_err(|_| ElectionError::Store(StoreError::Backend(format!("{what} poisoned"))))
}
