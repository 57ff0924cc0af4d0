use ballot_store::StoreError;
use ballot_types::{ElectionId, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid election parameters: {0}")]
    InvalidElectionParams(String),

    #[error("election is not in the correct state: {0}")]
    InvalidState(String),

    #[error("election {id} expired at {expiry} (now {now})")]
    Expired {
        id: ElectionId,
        expiry: Timestamp,
        now: Timestamp,
    },

    #[error("voter {0} has already voted in this election")]
    AlreadyVoted(String),

    #[error("choice index {index} out of range: election has {len} proposals")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid stakeholder: {0}")]
    InvalidStakeholder(String),

    #[error("election {0} has not been computed yet")]
    NotComputed(ElectionId),

    #[error("arithmetic overflow while tallying")]
    TallyOverflow,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Fieldless discriminant of [`ElectionError`], for callers that only branch on the failure mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    InvalidElectionParams,
    InvalidState,
    Expired,
    AlreadyVoted,
    IndexOutOfRange,
    InvalidStakeholder,
    NotComputed,
    TallyOverflow,
    Store,
}

impl ElectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidElectionParams(_) => ErrorKind::InvalidElectionParams,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::Expired { .. } => ErrorKind::Expired,
            Self::AlreadyVoted(_) => ErrorKind::AlreadyVoted,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::InvalidStakeholder(_) => ErrorKind::InvalidStakeholder,
            Self::NotComputed(_) => ErrorKind::NotComputed,
            Self::TallyOverflow => ErrorKind::TallyOverflow,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    pub(crate) fn election_not_found(id: ElectionId) -> Self {
        Self::NotFound(format!("election {id}"))
    }
}
