//! Result compilation.

use ballot_types::Proposal;

/// Picks the winner of a closed election.
pub struct ResultCompiler;

impl ResultCompiler {
    /// Index and snapshot of the winning proposal.
    ///
    /// A single scan keeps a running maximum, replaced only by a strictly
    /// greater count, so the lowest-index proposal wins every tie. `None`
    /// only for an empty slice.
    pub fn select_winner(&self, proposals: &[Proposal]) -> Option<(usize, Proposal)> {
        let mut best: Option<(usize, &Proposal)> = None;
        for (index, proposal) in proposals.iter().enumerate() {
            match best {
                Some((_, current)) if proposal.vote_count <= current.vote_count => {}
                _ => best = Some((index, proposal)),
            }
        }
        best.map(|(index, p)| (index, p.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn proposals(counts: &[u64]) -> Vec<Proposal> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| Proposal {
                name: format!("p{i}"),
                vote_count: c,
            })
            .collect()
    }

    #[test]
    fn highest_count_wins() {
        let (index, winner) = ResultCompiler.select_winner(&proposals(&[1, 5, 3])).unwrap();
        assert_eq!(index, 1);
        assert_eq!(winner.name, "p1");
        assert_eq!(winner.vote_count, 5);
    }

    #[test]
    fn first_of_tied_maxima_wins() {
        let (index, _) = ResultCompiler.select_winner(&proposals(&[2, 7, 7, 1, 7])).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn all_zero_picks_first() {
        let (index, winner) = ResultCompiler.select_winner(&proposals(&[0, 0, 0])).unwrap();
        assert_eq!(index, 0);
        assert_eq!(winner.vote_count, 0);
    }

    #[test]
    fn empty_has_no_winner() {
        assert!(ResultCompiler.select_winner(&[]).is_none());
    }

    proptest! {
        /// The winner is the lowest index holding the maximum count.
        #[test]
        fn winner_is_lowest_index_of_max(counts in prop::collection::vec(0u64..20, 1..16)) {
            let max = *counts.iter().max().unwrap();
            let expected = counts.iter().position(|&c| c == max).unwrap();
            let (index, winner) = ResultCompiler.select_winner(&proposals(&counts)).unwrap();
            prop_assert_eq!(index, expected);
            prop_assert_eq!(winner.vote_count, max);
        }
    }
}
