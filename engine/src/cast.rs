//! Casting a weighted vote.

use crate::engine::{logged, VotingEngine};
use crate::error::ElectionError;
use crate::event::BallotEvent;
use ballot_store::BallotStore;
use ballot_types::{Clock, ElectionId, VoterId, Weight};

impl<S: BallotStore, C: Clock> VotingEngine<S, C> {
    /// Cast the caller's single vote for proposal `choice` of election `id`.
    ///
    /// Checked in order: the election exists, is active, is not computed, is
    /// not past its expiry; the caller is registered and may vote, has not
    /// voted here yet, and `choice` is in range. The weighted count and the
    /// has-voted entry are committed together under the election's lock.
    ///
    /// Returns the weight the vote was counted with.
    pub fn cast_vote(
        &self,
        caller: &VoterId,
        id: ElectionId,
        choice: usize,
    ) -> Result<Weight, ElectionError> {
        let weight = logged("cast_vote", self.try_cast_vote(caller, id, choice))?;
        tracing::info!(election_id = id, voter = %caller, choice, weight, "vote cast");
        self.emit(BallotEvent::VoteCast {
            election_id: id,
            identity: caller.clone(),
        });
        Ok(weight)
    }

    fn try_cast_vote(
        &self,
        caller: &VoterId,
        id: ElectionId,
        choice: usize,
    ) -> Result<Weight, ElectionError> {
        let (weight, _) = self.with_election(id, |election| {
            if !election.active {
                return Err(ElectionError::InvalidState(format!("election {id} is not active")));
            }
            if election.computed {
                return Err(ElectionError::InvalidState(format!("election {id} is already computed")));
            }
            let now = self.clock().now();
            if election.expiry.is_passed(now) {
                return Err(ElectionError::Expired {
                    id,
                    expiry: election.expiry,
                    now,
                });
            }

            let voter = self
                .store()
                .get_voter(caller)?
                .ok_or_else(|| ElectionError::NotFound(format!("voter {caller}")))?;
            if !voter.can_vote {
                return Err(ElectionError::Unauthorized(format!("{caller} is banned from voting")));
            }
            if election.has_voted(caller) {
                return Err(ElectionError::AlreadyVoted(caller.to_string()));
            }
            let len = election.proposals.len();
            let proposal = election
                .proposals
                .get_mut(choice)
                .ok_or(ElectionError::IndexOutOfRange { index: choice, len })?;

            let weight = self.store().get_weights()?.weight_of(voter.role);
            proposal.vote_count = proposal
                .vote_count
                .checked_add(weight)
                .ok_or(ElectionError::TallyOverflow)?;
            election.has_voted.insert(caller.clone());
            Ok(weight)
        })?;
        Ok(weight)
    }
}
