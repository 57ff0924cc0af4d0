//! Voter table storage trait.

use crate::StoreError;
use ballot_types::{Voter, VoterId};

/// Trait for the voter table: identity → voter record.
pub trait VoterStore {
    fn get_voter(&self, id: &VoterId) -> Result<Option<Voter>, StoreError>;

    /// Insert or replace the record keyed by `voter.id`.
    fn put_voter(&self, voter: &Voter) -> Result<(), StoreError>;

    fn iter_voters(&self) -> Result<Vec<Voter>, StoreError>;

    fn voter_exists(&self, id: &VoterId) -> Result<bool, StoreError> {
        self.get_voter(id).map(|v| v.is_some())
    }

    fn voter_count(&self) -> Result<u64, StoreError> {
        self.iter_voters().map(|v| v.len() as u64)
    }
}
