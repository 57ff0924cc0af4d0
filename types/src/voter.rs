//! Registered voter records.

use crate::identity::VoterId;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// A registered voter.
///
/// Created once at registration and never deleted; only `can_vote` changes
/// afterwards (ban / unban).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: VoterId,
    pub name: String,
    pub role: Role,
    pub can_vote: bool,
}

impl Voter {
    /// A freshly registered voter, allowed to vote.
    pub fn new(id: VoterId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            can_vote: true,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}
