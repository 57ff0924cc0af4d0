//! Role → vote weight table.

use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Integer multiplier applied to a single cast vote.
pub type Weight = u64;

/// The weight each role's vote carries.
///
/// Read only at cast time: changing an entry never touches counts already
/// accumulated on proposals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTable {
    weights: [Weight; 3],
}

impl WeightTable {
    /// Every role starts at weight 1.
    pub const DEFAULT_WEIGHT: Weight = 1;

    pub fn new(director: Weight, teacher: Weight, student: Weight) -> Self {
        Self {
            weights: [director, teacher, student],
        }
    }

    pub fn weight_of(&self, role: Role) -> Weight {
        self.weights[role.index()]
    }

    pub fn set(&mut self, role: Role, weight: Weight) {
        self.weights[role.index()] = weight;
    }

    /// `(role, weight)` pairs in table order.
    pub fn entries(&self) -> impl Iterator<Item = (Role, Weight)> + '_ {
        Role::ALL.iter().map(move |&r| (r, self.weight_of(r)))
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WEIGHT,
            Self::DEFAULT_WEIGHT,
            Self::DEFAULT_WEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one_for_every_role() {
        let table = WeightTable::default();
        for role in Role::ALL {
            assert_eq!(table.weight_of(role), 1);
        }
    }

    #[test]
    fn set_touches_only_the_given_role() {
        let mut table = WeightTable::default();
        table.set(Role::Teacher, 5);
        assert_eq!(table.weight_of(Role::Director), 1);
        assert_eq!(table.weight_of(Role::Teacher), 5);
        assert_eq!(table.weight_of(Role::Student), 1);
        let entries: Vec<_> = table.entries().collect();
        assert_eq!(
            entries,
            vec![(Role::Director, 1), (Role::Teacher, 5), (Role::Student, 1)]
        );
    }
}
