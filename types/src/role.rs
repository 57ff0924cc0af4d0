//! Voter roles.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a voter is registered under.
///
/// Directors and Teachers may create and compile elections. The role also
/// selects the voter's weight from the [`WeightTable`](crate::WeightTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Director,
    Teacher,
    Student,
}

impl Role {
    /// Every role, in table order.
    pub const ALL: [Role; 3] = [Role::Director, Role::Teacher, Role::Student];

    /// Position of this role in the weight table.
    pub fn index(&self) -> usize {
        match self {
            Self::Director => 0,
            Self::Teacher => 1,
            Self::Student => 2,
        }
    }

    /// Lower-case label, as shown by `whoami` and accepted by [`Role::from_str`].
    pub fn label(&self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a case-insensitive label (`"teacher"`) or a table index (`"1"`).
impl FromStr for Role {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "director" | "0" => Ok(Self::Director),
            "teacher" | "1" => Ok(Self::Teacher),
            "student" | "2" => Ok(Self::Student),
            _ => Err(TypesError::UnknownRole(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| TypesError::UnknownRole(value.to_string()))
    }
}
