//! The voting engine: shared state, construction, and the commit helper
//! every election mutation goes through.
//!
//! Operations are split by concern across `registry`, `weights`,
//! `lifecycle`, `cast` and `query`; each adds an `impl` block here.

use crate::config::EngineConfig;
use crate::error::ElectionError;
use crate::event::{BallotEvent, EventBus};
use crate::locks::{acquire, ElectionLocks};
use ballot_store::BallotStore;
use ballot_types::{Clock, Election, ElectionId, Role, SystemClock, Voter, VoterId, WeightTable};
use std::sync::Mutex;

/// Orchestrates every state transition of the election system.
///
/// All operations take `&self`; wrap the engine in an `Arc` to share it
/// across threads. Each mutation either commits through a single store write
/// or leaves the store untouched.
pub struct VotingEngine<S, C = SystemClock> {
    store: S,
    clock: C,
    administrator: VoterId,
    events: EventBus,
    election_locks: ElectionLocks,
    /// Serialises voter read-modify-write (register, ban, unban).
    pub(crate) registry_lock: Mutex<()>,
    /// Serialises weight table updates.
    pub(crate) weight_lock: Mutex<()>,
    /// Serialises election id allocation.
    pub(crate) create_lock: Mutex<()>,
}

impl<S: BallotStore> VotingEngine<S, SystemClock> {
    /// Build an engine on the system clock.
    pub fn new(config: &EngineConfig, store: S) -> Result<Self, ElectionError> {
        Self::with_clock(config, store, SystemClock)
    }
}

impl<S: BallotStore, C: Clock> VotingEngine<S, C> {
    /// Build an engine on an explicit clock.
    ///
    /// Registers the administrator as a Director if the store does not know
    /// it yet, and writes the configured weights when the config has any.
    pub fn with_clock(config: &EngineConfig, store: S, clock: C) -> Result<Self, ElectionError> {
        let engine = Self {
            store,
            clock,
            administrator: config.administrator.clone(),
            events: EventBus::new(),
            election_locks: ElectionLocks::new(),
            registry_lock: Mutex::new(()),
            weight_lock: Mutex::new(()),
            create_lock: Mutex::new(()),
        };
        engine.initialize(config)?;
        Ok(engine)
    }

    fn initialize(&self, config: &EngineConfig) -> Result<(), ElectionError> {
        if !self.store.voter_exists(&self.administrator)? {
            let admin = Voter::new(
                self.administrator.clone(),
                config.administrator_name.clone(),
                Role::Director,
            );
            self.store.put_voter(&admin)?;
            tracing::info!(administrator = %self.administrator, "registered administrator as director");
        }
        if let Some(weights) = config.weights {
            let table = WeightTable::from(weights);
            self.store.put_weights(&table)?;
            tracing::info!(?table, "applied configured weights");
        }
        Ok(())
    }

    /// Add a listener for every committed change. Subscribe before sharing the engine.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&BallotEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn administrator(&self) -> &VoterId {
        &self.administrator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub(crate) fn emit(&self, event: BallotEvent) {
        tracing::trace!(?event, "emitting event");
        self.events.emit(&event);
    }

    pub(crate) fn load_election(&self, id: ElectionId) -> Result<Election, ElectionError> {
        self.store
            .get_election(id)?
            .ok_or_else(|| ElectionError::election_not_found(id))
    }

    /// Run `apply` on a working copy of election `id` under that election's
    /// lock, then commit the copy with a single store write.
    ///
    /// If `apply` or the write fails, the stored election is unchanged.
    pub(crate) fn with_election<T>(
        &self,
        id: ElectionId,
        apply: impl FnOnce(&mut Election) -> Result<T, ElectionError>,
    ) -> Result<(T, Election), ElectionError> {
        let handle = self.election_locks.handle(id)?;
        let _guard = acquire(&handle, "election lock")?;
        let mut working = self.load_election(id)?;
        let out = apply(&mut working)?;
        self.store.put_election(&working)?;
        Ok((out, working))
    }
}

/// Log a failed operation and pass the result through.
///
/// Store failures are logged at `warn`; rule violations are expected traffic
/// and go to `debug`.
pub(crate) fn logged<T>(op: &'static str, result: Result<T, ElectionError>) -> Result<T, ElectionError> {
    if let Err(e) = &result {
        match e {
            ElectionError::Store(_) => tracing::warn!(op, error = %e, "store failure"),
            _ => tracing::debug!(op, error = %e, "operation rejected"),
        }
    }
    result
}
