//! Election table storage trait.

use crate::StoreError;
use ballot_types::{Election, ElectionId};

/// Trait for election records and the election id counter.
///
/// An [`Election`] embeds its proposals, has-voted set and winner slot, so a
/// single `put_election` commits a whole vote or compilation at once.
pub trait ElectionStore {
    fn get_election(&self, id: ElectionId) -> Result<Option<Election>, StoreError>;

    /// Replace an existing election record.
    ///
    /// Fails with [`StoreError::NotFound`] if the id was never inserted.
    fn put_election(&self, election: &Election) -> Result<(), StoreError>;

    /// Persist a brand-new election and advance the id counter past it, in one write.
    ///
    /// Fails with [`StoreError::Duplicate`] unless `election.id` equals
    /// [`next_election_id`](Self::next_election_id).
    fn insert_election(&self, election: &Election) -> Result<(), StoreError>;

    /// The id the next created election will receive.
    fn next_election_id(&self) -> Result<ElectionId, StoreError>;

    /// All elections in id order.
    fn iter_elections(&self) -> Result<Vec<Election>, StoreError>;
}
