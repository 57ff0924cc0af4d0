//! Fundamental types for the ballot engine.
//!
//! This crate defines the records shared across every other crate in the workspace:
//! voter identities, roles and their weights, voter records, elections with their
//! proposals, and timestamps.

pub mod election;
pub mod error;
pub mod identity;
pub mod role;
pub mod time;
pub mod voter;
pub mod weight;

pub use election::{Election, ElectionId, ElectionPhase, NewElection, Proposal, SECS_PER_HOUR};
pub use error::TypesError;
pub use identity::VoterId;
pub use role::Role;
pub use time::{Clock, SystemClock, Timestamp};
pub use voter::Voter;
pub use weight::{Weight, WeightTable};
