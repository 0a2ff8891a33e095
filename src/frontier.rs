use crate::matching::Verdict;
use crate::sequence::SizeSequence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Antichain of size sequences known to admit no matching.
///
/// A member dominating a sequence settles that sequence as failing too, so
/// only the maximal failures are kept. No member dominates another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DominanceFrontier {
    members: BTreeSet<SizeSequence>,
}

impl DominanceFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some member dominates `sequence`.
    pub fn is_subsumed(&self, sequence: &SizeSequence) -> bool {
        self.members.iter().any(|member| member.dominates(sequence))
    }

    /// Records a verdict. Only failures are kept; returns whether the
    /// frontier changed.
    pub fn consider(&mut self, sequence: SizeSequence, verdict: Verdict) -> bool {
        match verdict {
            Verdict::Feasible => false,
            Verdict::Infeasible => self.insert_failing(sequence),
        }
    }

    fn insert_failing(&mut self, sequence: SizeSequence) -> bool {
        if self.is_subsumed(&sequence) {
            return false;
        }
        self.members.retain(|member| !sequence.dominates(member));
        self.members.insert(sequence)
    }

    /// Folds another frontier into this one, member by member.
    pub fn merge(&mut self, other: DominanceFrontier) {
        for sequence in other.members {
            self.insert_failing(sequence);
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, sequence: &SizeSequence) -> bool {
        self.members.contains(sequence)
    }

    /// Members in ascending lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &SizeSequence> {
        self.members.iter()
    }

    /// No member dominates another.
    pub fn is_antichain(&self) -> bool {
        self.members.iter().all(|a| {
            self.members
                .iter()
                .filter(|b| *b != a)
                .all(|b| !a.dominates(b))
        })
    }
}

impl FromIterator<SizeSequence> for DominanceFrontier {
    fn from_iter<I: IntoIterator<Item = SizeSequence>>(iter: I) -> Self {
        let mut frontier = Self::new();
        for sequence in iter {
            frontier.insert_failing(sequence);
        }
        frontier
    }
}

impl IntoIterator for DominanceFrontier {
    type Item = SizeSequence;
    type IntoIter = std::collections::btree_set::IntoIter<SizeSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}
