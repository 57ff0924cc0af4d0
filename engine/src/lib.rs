//! Weighted election engine.
//!
//! Voters are registered under a [`Role`](ballot_types::Role); Directors and
//! Teachers create elections; a single administrator manages voters, weights,
//! and opens and closes elections. Each registered voter casts at most one
//! vote per election, counted with their role's weight at the moment of
//! casting. Compiling an election closes it and records the first proposal
//! holding the highest count as the winner.
//!
//! Lifecycle: `Created → Active → Closed → Computed`. An election stays
//! active past its expiry until stopped; only casting checks the clock.
//!
//! Every mutation runs under a lock scoped to what it touches (one election,
//! the registry, the weight table, or id allocation) and commits with a
//! single store write, so a failed precondition or write leaves no trace.

pub mod access;
pub mod cast;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod locks;
pub mod query;
pub mod registry;
pub mod tally;
pub mod weights;

pub use config::{ConfigError, EngineConfig, WeightsConfig};
pub use engine::VotingEngine;
pub use error::{ElectionError, ErrorKind};
pub use event::{BallotEvent, EventBus};
pub use lifecycle::{validate_new_election, MIN_CHOICES};
pub use query::{ElectionResult, ElectionStats, ElectionView, TallyView, VoterStat, WhoAmI};
pub use tally::ResultCompiler;
