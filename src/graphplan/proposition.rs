use std::collections::BTreeSet;
use std::fmt;

use super::action::ActionId;

/// Index of a proposition name in the problem's proposition registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropositionId(pub usize);

impl fmt::Display for PropositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A proposition as it appears in one layer, together with the actions of
/// the preceding action layer that produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposition {
    id: PropositionId,
    producers: BTreeSet<ActionId>,
}

impl Proposition {
    pub fn new(id: PropositionId) -> Self {
        Self { id, producers: BTreeSet::new() }
    }

    pub fn id(&self) -> PropositionId {
        self.id
    }

    pub fn add_producer(&mut self, action: ActionId) {
        self.producers.insert(action);
    }

    pub fn producers(&self) -> &BTreeSet<ActionId> {
        &self.producers
    }
}
