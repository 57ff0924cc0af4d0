//! Operation scripts: a JSON array of steps replayed against an engine.
//!
//! ```json
//! [
//!   {"caller": "admin", "op": "register", "identity": "tom", "name": "Tom", "role": "teacher"},
//!   {"caller": "tom", "op": "create_election", "name": "Rep", "choices": ["A", "B"], "duration_hours": 1}
//! ]
//! ```

use anyhow::Context;
use ballot_engine::{ElectionError, VotingEngine};
use ballot_store::BallotStore;
use ballot_types::{Clock, ElectionId, NewElection, Role, VoterId, Weight};
use ballot_utils::format_duration;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

/// One line of a script: who is calling, and what they ask for.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    pub caller: VoterId,
    #[serde(flatten)]
    pub op: Operation,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Register {
        identity: VoterId,
        name: String,
        /// Role label or index, as accepted by `Role::from_str`.
        #[serde(deserialize_with = "role_label")]
        role: Role,
    },
    SetWeight {
        stakeholder: String,
        weight: Weight,
    },
    Ban {
        identity: VoterId,
    },
    Unban {
        identity: VoterId,
    },
    CreateElection {
        name: String,
        #[serde(default)]
        description: String,
        choices: Vec<String>,
        /// Declared choice count; defaults to `choices.len()`.
        #[serde(default)]
        num_choices: Option<usize>,
        duration_hours: u64,
    },
    StartElection {
        election_id: ElectionId,
    },
    StopElection {
        election_id: ElectionId,
    },
    CastVote {
        election_id: ElectionId,
        choice: usize,
    },
    CompileResults {
        election_id: ElectionId,
    },
    ViewElection {
        election_id: ElectionId,
    },
    ViewElectionStats {
        election_id: ElectionId,
    },
    ViewResult {
        election_id: ElectionId,
    },
    ViewTally {
        election_id: ElectionId,
    },
    ListElections,
    Whoami,
    IsAdministrator,
}

fn role_label<'de, D: Deserializer<'de>>(d: D) -> Result<Role, D::Error> {
    let raw = String::deserialize(d)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Register { .. } => "register",
            Operation::SetWeight { .. } => "set_weight",
            Operation::Ban { .. } => "ban",
            Operation::Unban { .. } => "unban",
            Operation::CreateElection { .. } => "create_election",
            Operation::StartElection { .. } => "start_election",
            Operation::StopElection { .. } => "stop_election",
            Operation::CastVote { .. } => "cast_vote",
            Operation::CompileResults { .. } => "compile_results",
            Operation::ViewElection { .. } => "view_election",
            Operation::ViewElectionStats { .. } => "view_election_stats",
            Operation::ViewResult { .. } => "view_result",
            Operation::ViewTally { .. } => "view_tally",
            Operation::ListElections => "list_elections",
            Operation::Whoami => "whoami",
            Operation::IsAdministrator => "is_administrator",
        }
    }
}

/// What happened to one step. Printed as one JSON line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outcome {
    pub step: usize,
    pub caller: VoterId,
    pub op: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

pub fn parse_script(json: &str) -> anyhow::Result<Vec<Step>> {
    serde_json::from_str(json).context("script must be a JSON array of steps")
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<Step>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&json)
}

/// Run every step in order. A rejected step is reported and replay moves on.
pub fn replay<S: BallotStore, C: Clock>(
    engine: &VotingEngine<S, C>,
    steps: &[Step],
) -> anyhow::Result<Vec<Outcome>> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let result = apply(engine, step)
                .with_context(|| format!("step {i} ({}) produced unencodable output", step.op.name()))?;
            let mut outcome = Outcome {
                step: i,
                caller: step.caller.clone(),
                op: step.op.name(),
                ok: result.is_ok(),
                value: None,
                error: None,
                kind: None,
            };
            match result {
                Ok(value) => outcome.value = value,
                Err(e) => {
                    tracing::debug!(step = i, op = outcome.op, error = %e, "step rejected");
                    outcome.kind = Some(format!("{:?}", e.kind()));
                    outcome.error = Some(e.to_string());
                }
            }
            Ok(outcome)
        })
        .collect()
}

type StepResult = Result<Option<Value>, ElectionError>;

fn json<T: Serialize>(result: Result<T, ElectionError>) -> serde_json::Result<StepResult> {
    match result {
        Ok(v) => Ok(Ok(Some(serde_json::to_value(v)?))),
        Err(e) => Ok(Err(e)),
    }
}

fn done(result: Result<(), ElectionError>) -> serde_json::Result<StepResult> {
    Ok(result.map(|()| None))
}

fn apply<S: BallotStore, C: Clock>(
    engine: &VotingEngine<S, C>,
    step: &Step,
) -> serde_json::Result<StepResult> {
    let caller = &step.caller;
    match &step.op {
        Operation::Register {
            identity,
            name,
            role,
        } => json(engine.register(caller, identity.clone(), name.clone(), *role)),
        Operation::SetWeight {
            stakeholder,
            weight,
        } => done(engine.set_weight(caller, stakeholder, *weight)),
        Operation::Ban { identity } => done(engine.ban(caller, identity)),
        Operation::Unban { identity } => done(engine.unban(caller, identity)),
        Operation::CreateElection {
            name,
            description,
            choices,
            num_choices,
            duration_hours,
        } => {
            let mut spec =
                NewElection::new(name.clone(), description.clone(), choices.clone(), *duration_hours);
            if let Some(n) = num_choices {
                spec.num_choices = *n;
            }
            let created = engine.create_election(caller, spec);
            if let Ok(id) = &created {
                if let Ok(view) = engine.view_election(*id) {
                    let remaining = view.expiry.remaining_from(engine.clock().now());
                    tracing::info!(election_id = *id, closes_in = %format_duration(remaining), "voting window scheduled");
                }
            }
            json(created)
        }
        Operation::StartElection { election_id } => done(engine.start_election(caller, *election_id)),
        Operation::StopElection { election_id } => done(engine.stop_election(caller, *election_id)),
        Operation::CastVote {
            election_id,
            choice,
        } => json(engine.cast_vote(caller, *election_id, *choice)),
        Operation::CompileResults { election_id } => {
            json(engine.compile_results(caller, *election_id))
        }
        Operation::ViewElection { election_id } => json(engine.view_election(*election_id)),
        Operation::ViewElectionStats { election_id } => {
            json(engine.view_election_stats(*election_id))
        }
        Operation::ViewResult { election_id } => json(engine.view_result(*election_id)),
        Operation::ViewTally { election_id } => json(engine.view_tally(*election_id)),
        Operation::ListElections => json(engine.list_elections()),
        Operation::Whoami => json(engine.whoami(caller)),
        Operation::IsAdministrator => json(Ok(engine.is_administrator(caller))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_engine::{BallotEvent, EngineConfig};
    use ballot_nullables::NullClock;
    use ballot_store::MemoryStore;
    use ballot_types::Timestamp;

    const SCENARIO: &str = r#"[
        {"caller": "admin", "op": "register", "identity": "dora", "name": "Dora", "role": "director"},
        {"caller": "admin", "op": "register", "identity": "tom", "name": "Tom", "role": "teacher"},
        {"caller": "admin", "op": "set_weight", "stakeholder": "teacher", "weight": 2},
        {"caller": "tom", "op": "create_election", "name": "Rep", "choices": ["A", "B"], "duration_hours": 1},
        {"caller": "admin", "op": "start_election", "election_id": 0},
        {"caller": "dora", "op": "cast_vote", "election_id": 0, "choice": 0},
        {"caller": "tom", "op": "cast_vote", "election_id": 0, "choice": 1},
        {"caller": "tom", "op": "cast_vote", "election_id": 0, "choice": 1},
        {"caller": "dora", "op": "view_result", "election_id": 0},
        {"caller": "dora", "op": "compile_results", "election_id": 0},
        {"caller": "dora", "op": "view_result", "election_id": 0},
        {"caller": "tom", "op": "whoami"}
    ]"#;

    fn engine() -> VotingEngine<MemoryStore, NullClock> {
        let config = EngineConfig::with_administrator(VoterId::new("admin"));
        VotingEngine::with_clock(&config, MemoryStore::new(), NullClock::new(1_000)).unwrap()
    }

    #[test]
    fn parses_tagged_steps() {
        let steps = parse_script(SCENARIO).unwrap();
        assert_eq!(steps.len(), 12);
        assert_eq!(steps[0].caller, VoterId::new("admin"));
        assert_eq!(
            steps[3].op,
            Operation::CreateElection {
                name: "Rep".into(),
                description: String::new(),
                choices: vec!["A".into(), "B".into()],
                num_choices: None,
                duration_hours: 1,
            }
        );
        assert_eq!(steps[11].op, Operation::Whoami);
    }

    #[test]
    fn rejects_unknown_operations() {
        let err = parse_script(r#"[{"caller": "admin", "op": "delete_everything"}]"#);
        assert!(err.is_err());
    }

    #[test]
    fn replays_weighted_scenario() {
        let engine = engine();
        let steps = parse_script(SCENARIO).unwrap();
        let outcomes = replay(&engine, &steps).unwrap();

        assert!(outcomes[..7].iter().all(|o| o.ok));
        assert_eq!(outcomes[3].value, Some(serde_json::json!(0)));
        assert_eq!(outcomes[6].value, Some(serde_json::json!(2)));

        assert!(!outcomes[7].ok);
        assert_eq!(outcomes[7].kind.as_deref(), Some("AlreadyVoted"));
        assert_eq!(outcomes[8].kind.as_deref(), Some("NotComputed"));

        let result = outcomes[10].value.as_ref().unwrap();
        assert_eq!(result["winner_name"], "B");
        assert_eq!(result["winner_count"], 2);

        let me = outcomes[11].value.as_ref().unwrap();
        assert_eq!(me["role"], "teacher");
    }

    #[test]
    fn mismatched_choice_count_is_reported() {
        let engine = engine();
        let steps = parse_script(
            r#"[{"caller": "admin", "op": "create_election", "name": "Bad",
                 "choices": ["A", "B", "C"], "num_choices": 2, "duration_hours": 1}]"#,
        )
        .unwrap();
        let outcomes = replay(&engine, &steps).unwrap();
        assert_eq!(outcomes[0].kind.as_deref(), Some("InvalidElectionParams"));
    }

    #[test]
    fn unknown_role_label_fails_to_parse() {
        let err = parse_script(
            r#"[{"caller": "admin", "op": "register", "identity": "x", "name": "X", "role": "janitor"}]"#,
        );
        assert!(err.is_err());

        let steps = parse_script(
            r#"[{"caller": "admin", "op": "register", "identity": "x", "name": "X", "role": "2"}]"#,
        )
        .unwrap();
        assert!(matches!(steps[0].op, Operation::Register { role: Role::Student, .. }));
    }

    #[test]
    fn blank_identities_fail_to_parse() {
        assert!(parse_script(r#"[{"caller": "", "op": "whoami"}]"#).is_err());
        assert!(parse_script(
            r#"[{"caller": "admin", "op": "register", "identity": " ", "name": "X", "role": "student"}]"#
        )
        .is_err());
    }

    #[test]
    fn outcome_line_omits_empty_fields() {
        let outcome = Outcome {
            step: 4,
            caller: VoterId::new("admin"),
            op: "start_election",
            ok: true,
            value: None,
            error: None,
            kind: None,
        };
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"step":4,"caller":"admin","op":"start_election","ok":true}"#
        );
    }

    #[test]
    fn events_serialize_with_tag() {
        let event = BallotEvent::BallotStarted {
            id: 3,
            name: "Rep".into(),
            timestamp: Timestamp::new(1_000),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({"event": "BallotStarted", "id": 3, "name": "Rep", "timestamp": 1000})
        );
    }
}
