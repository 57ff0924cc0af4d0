//! Notifications raised to external collaborators after a mutation commits.

use ballot_types::{ElectionId, Role, Timestamp, VoterId, Weight};
use serde::Serialize;

/// Every notification the engine emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum BallotEvent {
    /// A new voter was registered.
    VoterCreated {
        role: Role,
        name: String,
        identity: VoterId,
    },
    /// An election was created.
    BallotCreated {
        id: ElectionId,
        name: String,
        expiry: Timestamp,
    },
    /// A weighted vote was recorded.
    VoteCast {
        election_id: ElectionId,
        identity: VoterId,
    },
    BallotStarted {
        id: ElectionId,
        name: String,
        timestamp: Timestamp,
    },
    BallotStopped {
        id: ElectionId,
        name: String,
        timestamp: Timestamp,
    },
    /// The winner slot was filled.
    BallotResultCompiled {
        id: ElectionId,
        name: String,
        timestamp: Timestamp,
    },
    VoterBanned {
        name: String,
        identity: VoterId,
    },
    VoterUnbanned {
        name: String,
        identity: VoterId,
    },
    /// The administrator changed a role's weight.
    WeightChanged {
        role: Role,
        weight: Weight,
    },
}

/// Synchronous fan-out event bus for ballot events.
///
/// Listeners run inline on the thread that committed the change, after every
/// engine lock has been released, so a listener may call back into the engine.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&BallotEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&BallotEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &BallotEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
