//! Access-control guards.
//!
//! Every predicate takes the caller and the registry explicitly; nothing here
//! holds state. A guard that fails aborts its operation before any state is
//! read for mutation.

use crate::error::ElectionError;
use ballot_store::{StoreError, VoterStore};
use ballot_types::{Role, Voter, VoterId};

/// Roles allowed to create and compile elections.
pub const ELECTION_MANAGERS: &[Role] = &[Role::Director, Role::Teacher];

pub fn is_administrator(administrator: &VoterId, caller: &VoterId) -> bool {
    administrator == caller
}

pub fn has_role<V>(registry: &V, caller: &VoterId, role: Role) -> Result<bool, StoreError>
where
    V: VoterStore + ?Sized,
{
    Ok(registry.get_voter(caller)?.is_some_and(|v| v.has_role(role)))
}

pub fn has_any_role<V>(registry: &V, caller: &VoterId, roles: &[Role]) -> Result<bool, StoreError>
where
    V: VoterStore + ?Sized,
{
    Ok(registry
        .get_voter(caller)?
        .is_some_and(|v| v.has_any_role(roles)))
}

pub fn require_administrator(
    administrator: &VoterId,
    caller: &VoterId,
    action: &str,
) -> Result<(), ElectionError> {
    if is_administrator(administrator, caller) {
        Ok(())
    } else {
        Err(ElectionError::Unauthorized(format!(
            "{caller} is not the administrator and cannot {action}"
        )))
    }
}

/// Require the caller to be registered under one of `roles`; returns their record.
pub fn require_any_role<V>(
    registry: &V,
    caller: &VoterId,
    roles: &[Role],
    action: &str,
) -> Result<Voter, ElectionError>
where
    V: VoterStore + ?Sized,
{
    match registry.get_voter(caller)? {
        Some(voter) if voter.has_any_role(roles) => Ok(voter),
        Some(voter) => Err(ElectionError::Unauthorized(format!(
            "{caller} is a {} and cannot {action}",
            voter.role
        ))),
        None => Err(ElectionError::Unauthorized(format!(
            "{caller} is not registered and cannot {action}"
        ))),
    }
}

/// Registration is scoped by the role being granted.
///
/// Directors and Teachers are appointed by the administrator. Students may be
/// enrolled by the administrator, by any Director or Teacher, or may enrol
/// themselves.
pub fn require_can_register<V>(
    registry: &V,
    administrator: &VoterId,
    caller: &VoterId,
    identity: &VoterId,
    role: Role,
) -> Result<(), ElectionError>
where
    V: VoterStore + ?Sized,
{
    if is_administrator(administrator, caller) {
        return Ok(());
    }
    match role {
        Role::Director | Role::Teacher => Err(ElectionError::Unauthorized(format!(
            "only the administrator can register a {role}"
        ))),
        Role::Student => {
            if caller == identity || has_any_role(registry, caller, ELECTION_MANAGERS)? {
                Ok(())
            } else {
                Err(ElectionError::Unauthorized(format!(
                    "{caller} cannot register student {identity}"
                )))
            }
        }
    }
}
