//! Voter registry operations.

use crate::access;
use crate::engine::{logged, VotingEngine};
use crate::error::ElectionError;
use crate::event::BallotEvent;
use crate::locks::acquire;
use ballot_store::BallotStore;
use ballot_types::{Clock, Role, Voter, VoterId};

impl<S: BallotStore, C: Clock> VotingEngine<S, C> {
    /// Register `identity` under `role`.
    ///
    /// Idempotent: if the identity is already registered nothing changes, no
    /// event is emitted, and `Ok(false)` is returned; the earliest name and
    /// role are kept. Returns `Ok(true)` when a new voter was inserted.
    pub fn register(
        &self,
        caller: &VoterId,
        identity: VoterId,
        name: impl Into<String>,
        role: Role,
    ) -> Result<bool, ElectionError> {
        logged("register", self.try_register(caller, identity, name.into(), role))
    }

    fn try_register(
        &self,
        caller: &VoterId,
        identity: VoterId,
        name: String,
        role: Role,
    ) -> Result<bool, ElectionError> {
        access::require_can_register(self.store(), self.administrator(), caller, &identity, role)?;

        let voter = {
            let _guard = acquire(&self.registry_lock, "registry lock")?;
            if self.store().voter_exists(&identity)? {
                tracing::debug!(voter = %identity, "already registered, keeping existing record");
                return Ok(false);
            }
            let voter = Voter::new(identity, name, role);
            self.store().put_voter(&voter)?;
            voter
        };

        tracing::info!(voter = %voter.id, %role, by = %caller, "voter registered");
        self.emit(BallotEvent::VoterCreated {
            role,
            name: voter.name,
            identity: voter.id,
        });
        Ok(true)
    }

    /// Revoke a voter's right to cast votes. Administrator only.
    ///
    /// Fails with `NotFound` for an unknown identity.
    pub fn ban(&self, caller: &VoterId, identity: &VoterId) -> Result<(), ElectionError> {
        let voter = logged("ban", self.set_can_vote(caller, identity, false, "ban voters"))?;
        tracing::info!(voter = %voter.id, "voter banned");
        self.emit(BallotEvent::VoterBanned {
            name: voter.name,
            identity: voter.id,
        });
        Ok(())
    }

    /// Restore a voter's right to cast votes. Administrator only.
    ///
    /// Fails with `NotFound` for an unknown identity.
    pub fn unban(&self, caller: &VoterId, identity: &VoterId) -> Result<(), ElectionError> {
        let voter = logged("unban", self.set_can_vote(caller, identity, true, "unban voters"))?;
        tracing::info!(voter = %voter.id, "voter unbanned");
        self.emit(BallotEvent::VoterUnbanned {
            name: voter.name,
            identity: voter.id,
        });
        Ok(())
    }

    fn set_can_vote(
        &self,
        caller: &VoterId,
        identity: &VoterId,
        can_vote: bool,
        action: &str,
    ) -> Result<Voter, ElectionError> {
        access::require_administrator(self.administrator(), caller, action)?;
        let _guard = acquire(&self.registry_lock, "registry lock")?;
        let mut voter = self
            .store()
            .get_voter(identity)?
            .ok_or_else(|| ElectionError::NotFound(format!("voter {identity}")))?;
        voter.can_vote = can_vote;
        self.store().put_voter(&voter)?;
        Ok(voter)
    }

    /// The stored record for `identity`, if registered.
    pub fn lookup(&self, identity: &VoterId) -> Result<Option<Voter>, ElectionError> {
        Ok(self.store().get_voter(identity)?)
    }
}
