//! Elections, their proposals, and the lifecycle phases they move through.

use crate::identity::VoterId;
use crate::time::Timestamp;
use crate::weight::Weight;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Election ids are allocated sequentially from 0.
pub type ElectionId = u64;

pub const SECS_PER_HOUR: u64 = 3_600;

/// One selectable option. Its index in [`Election::proposals`] is the ballot choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub name: String,
    /// Sum of the weights of every vote cast for this proposal.
    pub vote_count: Weight,
}

impl Proposal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vote_count: 0,
        }
    }
}

/// Lifecycle phase, derived from the stored flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionPhase {
    /// Never started, never stopped.
    Created,
    /// `active` is set. Stays here past the expiry until explicitly stopped.
    Active,
    /// Stopped but not yet compiled.
    Closed,
    /// Result compiled. Terminal.
    Computed,
}

/// Parameters for a new election, as submitted by its creator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewElection {
    pub name: String,
    pub description: String,
    /// Declared number of choices; must match `choices.len()`.
    pub num_choices: usize,
    pub choices: Vec<String>,
    pub duration_hours: u64,
}

impl NewElection {
    /// Build a request whose declared choice count matches `choices`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        choices: Vec<String>,
        duration_hours: u64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            num_choices: choices.len(),
            choices,
            duration_hours,
        }
    }
}

/// A stored election together with its has-voted set and winner slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: ElectionId,
    pub name: String,
    pub description: String,
    /// Fixed at creation; never reordered.
    pub proposals: Vec<Proposal>,
    pub active: bool,
    pub computed: bool,
    /// Casting is refused once the clock is past this. Reset to the stop time on stop.
    pub expiry: Timestamp,
    pub created_at: Timestamp,
    pub created_by: VoterId,
    /// Time of the most recent stop, if any.
    pub stopped_at: Option<Timestamp>,
    /// Identities that have already cast a vote. Append-only.
    pub has_voted: HashSet<VoterId>,
    /// Set exactly once, by compilation.
    pub winner: Option<Proposal>,
}

impl Election {
    /// Build a fresh election in the `Created` phase with zeroed proposals.
    pub fn new(id: ElectionId, spec: NewElection, created_by: VoterId, now: Timestamp) -> Self {
        let expiry = now.plus_secs(spec.duration_hours.saturating_mul(SECS_PER_HOUR));
        Self {
            id,
            name: spec.name,
            description: spec.description,
            proposals: spec.choices.into_iter().map(Proposal::new).collect(),
            active: false,
            computed: false,
            expiry,
            created_at: now,
            created_by,
            stopped_at: None,
            has_voted: HashSet::new(),
            winner: None,
        }
    }

    pub fn phase(&self) -> ElectionPhase {
        if self.computed {
            ElectionPhase::Computed
        } else if self.active {
            ElectionPhase::Active
        } else if self.stopped_at.is_some() {
            ElectionPhase::Closed
        } else {
            ElectionPhase::Created
        }
    }

    pub fn has_voted(&self, voter: &VoterId) -> bool {
        self.has_voted.contains(voter)
    }

    pub fn choice_names(&self) -> Vec<String> {
        self.proposals.iter().map(|p| p.name.clone()).collect()
    }

    /// Sum of all proposal counts. Saturates rather than overflowing.
    pub fn total_weight(&self) -> Weight {
        self.proposals
            .iter()
            .fold(0, |acc: Weight, p| acc.saturating_add(p.vote_count))
    }
}
