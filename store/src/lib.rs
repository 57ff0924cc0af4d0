//! Abstract storage traits for the ballot engine.
//!
//! Every storage backend implements these traits; the engine depends only on
//! them. Each trait method is a single atomic read or write; the engine
//! composes them under its own locks.

pub mod election;
pub mod error;
pub mod memory;
pub mod voter;
pub mod weight;

pub use election::ElectionStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use voter::VoterStore;
pub use weight::WeightStore;

/// Everything the engine needs from a backend.
pub trait BallotStore: VoterStore + WeightStore + ElectionStore + Send + Sync {}

impl<T> BallotStore for T where T: VoterStore + WeightStore + ElectionStore + Send + Sync {}
