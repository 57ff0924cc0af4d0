//! Election lifecycle: create → start → stop → compile.

use crate::access::{self, ELECTION_MANAGERS};
use crate::engine::{logged, VotingEngine};
use crate::error::ElectionError;
use crate::event::BallotEvent;
use crate::locks::acquire;
use crate::tally::ResultCompiler;
use ballot_store::BallotStore;
use ballot_types::{Clock, Election, ElectionId, NewElection, Proposal, Timestamp, VoterId};

/// Smallest number of proposals an election may offer.
pub const MIN_CHOICES: usize = 2;

/// Check a creation request before anything is allocated.
pub fn validate_new_election(spec: &NewElection) -> Result<(), ElectionError> {
    if spec.choices.len() != spec.num_choices {
        return Err(ElectionError::InvalidElectionParams(format!(
            "declared {} choices but named {}",
            spec.num_choices,
            spec.choices.len()
        )));
    }
    if spec.choices.len() < MIN_CHOICES {
        return Err(ElectionError::InvalidElectionParams(format!(
            "an election needs at least {MIN_CHOICES} choices, got {}",
            spec.choices.len()
        )));
    }
    Ok(())
}

/// Deactivate and stamp the stop time into the expiry.
fn stop_in_place(election: &mut Election, now: Timestamp) {
    election.active = false;
    election.expiry = now;
    election.stopped_at = Some(now);
}

impl<S: BallotStore, C: Clock> VotingEngine<S, C> {
    /// Create an election in the `Created` phase. Directors and Teachers only.
    ///
    /// On any failure no election is stored and the id counter does not move.
    pub fn create_election(
        &self,
        caller: &VoterId,
        spec: NewElection,
    ) -> Result<ElectionId, ElectionError> {
        let election = logged("create_election", self.try_create_election(caller, spec))?;
        tracing::info!(
            election_id = election.id,
            name = %election.name,
            choices = election.proposals.len(),
            expiry = %election.expiry,
            by = %caller,
            "election created"
        );
        let id = election.id;
        self.emit(BallotEvent::BallotCreated {
            id,
            name: election.name,
            expiry: election.expiry,
        });
        Ok(id)
    }

    fn try_create_election(
        &self,
        caller: &VoterId,
        spec: NewElection,
    ) -> Result<Election, ElectionError> {
        access::require_any_role(self.store(), caller, ELECTION_MANAGERS, "create elections")?;
        validate_new_election(&spec)?;

        let _guard = acquire(&self.create_lock, "create lock")?;
        let id = self.store().next_election_id()?;
        let election = Election::new(id, spec, caller.clone(), self.clock().now());
        self.store().insert_election(&election)?;
        Ok(election)
    }

    /// Open an election for voting. Administrator only.
    ///
    /// Re-entrant: starting an active election succeeds again, and a closed
    /// election may be re-opened (its expiry is not extended). A computed
    /// election can never be restarted.
    pub fn start_election(&self, caller: &VoterId, id: ElectionId) -> Result<(), ElectionError> {
        let (now, election) = logged("start_election", self.try_start_election(caller, id))?;
        tracing::info!(election_id = id, "election started");
        self.emit(BallotEvent::BallotStarted {
            id,
            name: election.name,
            timestamp: now,
        });
        Ok(())
    }

    fn try_start_election(
        &self,
        caller: &VoterId,
        id: ElectionId,
    ) -> Result<(Timestamp, Election), ElectionError> {
        access::require_administrator(self.administrator(), caller, "start elections")?;
        self.with_election(id, |election| {
            if election.computed {
                return Err(ElectionError::InvalidState(format!(
                    "election {id} is computed and cannot be restarted"
                )));
            }
            election.active = true;
            Ok(self.clock().now())
        })
    }

    /// Close an election and reset its expiry to now. Administrator only.
    pub fn stop_election(&self, caller: &VoterId, id: ElectionId) -> Result<(), ElectionError> {
        let (now, election) = logged("stop_election", self.try_stop_election(caller, id))?;
        tracing::info!(election_id = id, at = %now, "election stopped");
        self.emit(BallotEvent::BallotStopped {
            id,
            name: election.name,
            timestamp: now,
        });
        Ok(())
    }

    fn try_stop_election(
        &self,
        caller: &VoterId,
        id: ElectionId,
    ) -> Result<(Timestamp, Election), ElectionError> {
        access::require_administrator(self.administrator(), caller, "stop elections")?;
        self.with_election(id, |election| {
            let now = self.clock().now();
            stop_in_place(election, now);
            Ok(now)
        })
    }

    /// Stop the election, mark it computed, and fill its winner slot.
    /// Directors and Teachers only.
    ///
    /// The stop, the computed flag and the winner are committed together.
    /// Fails with `InvalidState` if the election was already computed.
    pub fn compile_results(
        &self,
        caller: &VoterId,
        id: ElectionId,
    ) -> Result<Proposal, ElectionError> {
        let ((now, winner), election) =
            logged("compile_results", self.try_compile_results(caller, id))?;
        tracing::info!(
            election_id = id,
            winner = %winner.name,
            votes = winner.vote_count,
            "election result compiled"
        );
        self.emit(BallotEvent::BallotStopped {
            id,
            name: election.name.clone(),
            timestamp: now,
        });
        self.emit(BallotEvent::BallotResultCompiled {
            id,
            name: election.name,
            timestamp: now,
        });
        Ok(winner)
    }

    fn try_compile_results(
        &self,
        caller: &VoterId,
        id: ElectionId,
    ) -> Result<((Timestamp, Proposal), Election), ElectionError> {
        access::require_any_role(self.store(), caller, ELECTION_MANAGERS, "compile results")?;
        self.with_election(id, |election| {
            if election.computed {
                return Err(ElectionError::InvalidState(format!(
                    "election {id} has already been computed"
                )));
            }
            let now = self.clock().now();
            stop_in_place(election, now);
            let (_, winner) = ResultCompiler
                .select_winner(&election.proposals)
                .ok_or_else(|| ElectionError::InvalidState(format!("election {id} has no proposals")))?;
            election.computed = true;
            election.winner = Some(winner.clone());
            Ok((now, winner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn spec(num_choices: usize, choices: &[&str]) -> NewElection {
        NewElection {
            name: "e".into(),
            description: "d".into(),
            num_choices,
            choices: choices.iter().map(|c| c.to_string()).collect(),
            duration_hours: 1,
        }
    }

    #[test]
    fn validate_requires_two_choices() {
        let err = validate_new_election(&spec(1, &["A"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidElectionParams);
        assert!(validate_new_election(&spec(2, &["A", "B"])).is_ok());
    }

    #[test]
    fn validate_requires_matching_count() {
        let err = validate_new_election(&spec(2, &["A", "B", "C"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidElectionParams);
    }
}
