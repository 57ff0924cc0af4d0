//! Errors raised while constructing or parsing the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("voter identity must not be empty")]
    EmptyIdentity,
}
