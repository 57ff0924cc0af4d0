//! Weight table storage trait.

use crate::StoreError;
use ballot_types::WeightTable;

/// Trait for the three-entry role weight table.
pub trait WeightStore {
    /// The stored table, or the default table if none was ever written.
    fn get_weights(&self) -> Result<WeightTable, StoreError>;

    fn put_weights(&self, table: &WeightTable) -> Result<(), StoreError>;
}
