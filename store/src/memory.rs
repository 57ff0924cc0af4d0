//! In-memory store. Records are kept bincode-encoded, the way a disk
//! backend would hold them, so every read hands back an owned copy.

use crate::{ElectionStore, StoreError, VoterStore, WeightStore};
use ballot_types::{Election, ElectionId, Voter, VoterId, WeightTable};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    voters: HashMap<VoterId, Vec<u8>>,
    weights: Option<Vec<u8>>,
    elections: BTreeMap<ElectionId, Vec<u8>>,
    next_election_id: ElectionId,
}

/// A thread-safe in-memory backend implementing every store trait.
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VoterStore for MemoryStore {
    fn get_voter(&self, id: &VoterId) -> Result<Option<Voter>, StoreError> {
        self.lock()?
            .voters
            .get(id)
            .map(|bytes| bincode::deserialize(bytes).map_err(StoreError::from))
            .transpose()
    }

    fn put_voter(&self, voter: &Voter) -> Result<(), StoreError> {
        let bytes = bincode::serialize(voter)?;
        self.lock()?.voters.insert(voter.id.clone(), bytes);
        Ok(())
    }

    fn iter_voters(&self) -> Result<Vec<Voter>, StoreError> {
        let tables = self.lock()?;
        let mut voters = tables
            .voters
            .values()
            .map(|bytes| bincode::deserialize::<Voter>(bytes).map_err(StoreError::from))
            .collect::<Result<Vec<_>, _>>()?;
        voters.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(voters)
    }

    fn voter_exists(&self, id: &VoterId) -> Result<bool, StoreError> {
        Ok(self.lock()?.voters.contains_key(id))
    }

    fn voter_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.voters.len() as u64)
    }
}

impl WeightStore for MemoryStore {
    fn get_weights(&self) -> Result<WeightTable, StoreError> {
        match &self.lock()?.weights {
            Some(bytes) => Ok(bincode::deserialize(bytes)?),
            None => Ok(WeightTable::default()),
        }
    }

    fn put_weights(&self, table: &WeightTable) -> Result<(), StoreError> {
        let bytes = bincode::serialize(table)?;
        self.lock()?.weights = Some(bytes);
        Ok(())
    }
}

impl ElectionStore for MemoryStore {
    fn get_election(&self, id: ElectionId) -> Result<Option<Election>, StoreError> {
        self.lock()?
            .elections
            .get(&id)
            .map(|bytes| bincode::deserialize(bytes).map_err(StoreError::from))
            .transpose()
    }

    fn put_election(&self, election: &Election) -> Result<(), StoreError> {
        let bytes = bincode::serialize(election)?;
        let mut tables = self.lock()?;
        match tables.elections.get_mut(&election.id) {
            Some(slot) => {
                *slot = bytes;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("election {}", election.id))),
        }
    }

    fn insert_election(&self, election: &Election) -> Result<(), StoreError> {
        let bytes = bincode::serialize(election)?;
        let mut tables = self.lock()?;
        if election.id != tables.next_election_id || tables.elections.contains_key(&election.id) {
            return Err(StoreError::Duplicate(format!(
                "election {} (next id is {})",
                election.id, tables.next_election_id
            )));
        }
        tables.elections.insert(election.id, bytes);
        tables.next_election_id += 1;
        Ok(())
    }

    fn next_election_id(&self) -> Result<ElectionId, StoreError> {
        Ok(self.lock()?.next_election_id)
    }

    fn iter_elections(&self) -> Result<Vec<Election>, StoreError> {
        self.lock()?
            .elections
            .values()
            .map(|bytes| bincode::deserialize(bytes).map_err(StoreError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_types::{NewElection, Role, Timestamp};

    fn test_voter(id: &str) -> Voter {
        Voter::new(VoterId::new(id), format!("{id} name"), Role::Student)
    }

    fn test_election(id: ElectionId) -> Election {
        Election::new(
            id,
            NewElection::new("e", "d", vec!["A".into(), "B".into()], 1),
            VoterId::new("creator"),
            Timestamp::new(100),
        )
    }

    #[test]
    fn test_put_get_voter() {
        let store = MemoryStore::new();
        let voter = test_voter("alice");
        store.put_voter(&voter).unwrap();
        assert_eq!(store.get_voter(&voter.id).unwrap(), Some(voter));
        assert!(store.voter_exists(&VoterId::new("alice")).unwrap());
        assert_eq!(store.get_voter(&VoterId::new("bob")).unwrap(), None);
    }

    #[test]
    fn test_iter_voters_sorted_by_id() {
        let store = MemoryStore::new();
        for id in ["carol", "alice", "bob"] {
            store.put_voter(&test_voter(id)).unwrap();
        }
        let ids: Vec<_> = store
            .iter_voters()
            .unwrap()
            .into_iter()
            .map(|v| v.id.to_string())
            .collect();
        assert_eq!(ids, vec!["alice", "bob", "carol"]);
        assert_eq!(store.voter_count().unwrap(), 3);
    }

    #[test]
    fn test_weights_default_until_written() {
        let store = MemoryStore::new();
        assert_eq!(store.get_weights().unwrap(), WeightTable::default());
        let table = WeightTable::new(3, 2, 1);
        store.put_weights(&table).unwrap();
        assert_eq!(store.get_weights().unwrap(), table);
    }

    #[test]
    fn test_insert_election_advances_counter() {
        let store = MemoryStore::new();
        assert_eq!(store.next_election_id().unwrap(), 0);
        store.insert_election(&test_election(0)).unwrap();
        store.insert_election(&test_election(1)).unwrap();
        assert_eq!(store.next_election_id().unwrap(), 2);
        let ids: Vec<_> = store.iter_elections().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_insert_election_rejects_out_of_sequence_id() {
        let store = MemoryStore::new();
        let err = store.insert_election(&test_election(5)).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.next_election_id().unwrap(), 0);
    }

    #[test]
    fn test_put_election_requires_existing_record() {
        let store = MemoryStore::new();
        let err = store.put_election(&test_election(0)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        store.insert_election(&test_election(0)).unwrap();
        let mut updated = test_election(0);
        updated.active = true;
        store.put_election(&updated).unwrap();
        assert!(store.get_election(0).unwrap().unwrap().active);
    }
}
