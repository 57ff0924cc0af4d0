//! Read-only projections. None of these take a guard or a lock.

use crate::access;
use crate::engine::VotingEngine;
use crate::error::ElectionError;
use ballot_store::BallotStore;
use ballot_types::{Clock, Election, ElectionId, ElectionPhase, Proposal, Role, Timestamp, VoterId, Weight};
use serde::Serialize;

/// Public detail of one election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElectionView {
    pub id: ElectionId,
    pub name: String,
    pub description: String,
    pub choices: Vec<String>,
    /// The stored flag; not cleared when the expiry passes.
    pub active: bool,
    pub computed: bool,
    pub expiry: Timestamp,
    pub phase: ElectionPhase,
}

impl From<&Election> for ElectionView {
    fn from(e: &Election) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            description: e.description.clone(),
            choices: e.choice_names(),
            active: e.active,
            computed: e.computed,
            expiry: e.expiry,
            phase: e.phase(),
        }
    }
}

/// One registered voter's standing in a given election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoterStat {
    pub identity: VoterId,
    pub name: String,
    pub role: Role,
    pub can_vote: bool,
    pub has_voted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElectionStats {
    pub election_id: ElectionId,
    /// Every registered voter, ordered by identity.
    pub voters: Vec<VoterStat>,
    pub voted: usize,
    pub eligible: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElectionResult {
    pub election_id: ElectionId,
    pub election_name: String,
    pub winner_name: String,
    pub winner_count: Weight,
}

/// Final per-proposal counts of a computed election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TallyView {
    pub election_id: ElectionId,
    pub proposals: Vec<Proposal>,
    pub total: Weight,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WhoAmI {
    pub identity: VoterId,
    pub name: String,
    pub role: &'static str,
    pub can_vote: bool,
}

impl<S: BallotStore, C: Clock> VotingEngine<S, C> {
    pub fn view_election(&self, id: ElectionId) -> Result<ElectionView, ElectionError> {
        Ok(ElectionView::from(&self.load_election(id)?))
    }

    pub fn view_election_stats(&self, id: ElectionId) -> Result<ElectionStats, ElectionError> {
        let election = self.load_election(id)?;
        let voters: Vec<VoterStat> = self
            .store()
            .iter_voters()?
            .into_iter()
            .map(|v| VoterStat {
                has_voted: election.has_voted(&v.id),
                identity: v.id,
                name: v.name,
                role: v.role,
                can_vote: v.can_vote,
            })
            .collect();
        let voted = voters.iter().filter(|v| v.has_voted).count();
        let eligible = voters.iter().filter(|v| v.can_vote).count();
        Ok(ElectionStats {
            election_id: id,
            voters,
            voted,
            eligible,
        })
    }

    /// The winner of a computed election; `NotComputed` before compilation.
    pub fn view_result(&self, id: ElectionId) -> Result<ElectionResult, ElectionError> {
        let election = self.load_election(id)?;
        match (election.computed, election.winner) {
            (true, Some(winner)) => Ok(ElectionResult {
                election_id: id,
                election_name: election.name,
                winner_name: winner.name,
                winner_count: winner.vote_count,
            }),
            _ => Err(ElectionError::NotComputed(id)),
        }
    }

    /// Per-proposal counts, published only once the result is compiled.
    pub fn view_tally(&self, id: ElectionId) -> Result<TallyView, ElectionError> {
        let election = self.load_election(id)?;
        if !election.computed {
            return Err(ElectionError::NotComputed(id));
        }
        Ok(TallyView {
            election_id: id,
            total: election.total_weight(),
            proposals: election.proposals,
        })
    }

    /// Every election, in id order.
    pub fn list_elections(&self) -> Result<Vec<ElectionView>, ElectionError> {
        Ok(self
            .store()
            .iter_elections()?
            .iter()
            .map(ElectionView::from)
            .collect())
    }

    pub fn whoami(&self, identity: &VoterId) -> Result<WhoAmI, ElectionError> {
        let voter = self
            .lookup(identity)?
            .ok_or_else(|| ElectionError::NotFound(format!("voter {identity}")))?;
        Ok(WhoAmI {
            identity: voter.id,
            name: voter.name,
            role: voter.role.label(),
            can_vote: voter.can_vote,
        })
    }

    pub fn is_administrator(&self, identity: &VoterId) -> bool {
        access::is_administrator(self.administrator(), identity)
    }
}
