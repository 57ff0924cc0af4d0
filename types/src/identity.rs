//! Voter identity: the already-authenticated key under which a caller acts.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque voter identity.
///
/// Authentication happens outside the engine; by the time a `VoterId` reaches
/// an engine operation it is trusted to belong to the caller.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct VoterId(String);

impl VoterId {
    /// Create a new identity from a raw string.
    ///
    /// # Panics
    /// Panics if the string is empty. Use [`VoterId::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(!s.is_empty(), "voter identity must not be empty");
        Self(s)
    }

    /// Fallible constructor for identities arriving from outside the process.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(TypesError::EmptyIdentity);
        }
        Ok(Self(s))
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VoterId {
    type Error = TypesError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<&str> for VoterId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
