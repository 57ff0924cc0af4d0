//! Weight table operations.

use crate::access;
use crate::engine::{logged, VotingEngine};
use crate::error::ElectionError;
use crate::event::BallotEvent;
use crate::locks::acquire;
use ballot_store::BallotStore;
use ballot_types::{Clock, Role, VoterId, Weight, WeightTable};

impl<S: BallotStore, C: Clock> VotingEngine<S, C> {
    /// Set the weight for the role named by `stakeholder`. Administrator only.
    ///
    /// `stakeholder` is a role label (`"teacher"`) or table index (`"1"`);
    /// anything else fails with `InvalidStakeholder`. Already-cast votes keep
    /// the weight they were cast with.
    pub fn set_weight(
        &self,
        caller: &VoterId,
        stakeholder: &str,
        weight: Weight,
    ) -> Result<(), ElectionError> {
        let role = logged("set_weight", self.try_set_weight(caller, stakeholder, weight))?;
        tracing::info!(%role, weight, "weight changed");
        self.emit(BallotEvent::WeightChanged { role, weight });
        Ok(())
    }

    fn try_set_weight(
        &self,
        caller: &VoterId,
        stakeholder: &str,
        weight: Weight,
    ) -> Result<Role, ElectionError> {
        access::require_administrator(self.administrator(), caller, "set weights")?;
        let role: Role = stakeholder
            .parse()
            .map_err(|_| ElectionError::InvalidStakeholder(stakeholder.to_string()))?;

        let _guard = acquire(&self.weight_lock, "weight lock")?;
        let mut table = self.store().get_weights()?;
        table.set(role, weight);
        self.store().put_weights(&table)?;
        Ok(role)
    }

    /// Current weight for `role`.
    pub fn weight_of(&self, role: Role) -> Result<Weight, ElectionError> {
        Ok(self.store().get_weights()?.weight_of(role))
    }

    /// The whole current table.
    pub fn weights(&self) -> Result<WeightTable, ElectionError> {
        Ok(self.store().get_weights()?)
    }
}
