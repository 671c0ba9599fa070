//! Mutual-exclusion constraints among operating units.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// An ordered group of operating units of which at most one may be active in
/// a feasible solution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutualExclusionSet {
    members: Vec<NodeId>,
}

impl MutualExclusionSet {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<S: Into<NodeId>> FromIterator<S> for MutualExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Build exclusion sets from nested id lists, e.g. `[["O1", "O2"]]`.
pub fn exclusion_sets<I, J, S>(sets: I) -> Vec<MutualExclusionSet>
where
    I: IntoIterator<Item = J>,
    J: IntoIterator<Item = S>,
    S: Into<NodeId>,
{
    sets.into_iter().map(MutualExclusionSet::new).collect()
}
