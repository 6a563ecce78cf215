use std::collections::BTreeMap;

use super::action::Action;
use super::pair::PairSet;
use super::proposition::{Proposition, PropositionId};

/// Propositions reachable at one level of the graph, keyed by proposition
/// name, and the mutex pairs among them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropositionLayer {
    propositions: BTreeMap<PropositionId, Proposition>,
    mutex_props: PairSet<PropositionId>,
}

impl PropositionLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any proposition already stored under the same name.
    pub fn add_proposition(&mut self, proposition: Proposition) {
        self.propositions.insert(proposition.id(), proposition);
    }

    pub fn add_mutex(&mut self, p1: PropositionId, p2: PropositionId) {
        self.mutex_props.add(p1, p2);
    }

    pub fn all_preconds_satisfied(&self, action: &Action) -> bool {
        action.pre.iter().all(|p| self.propositions.contains_key(p))
    }

    pub fn propositions(&self) -> impl Iterator<Item = &Proposition> {
        self.propositions.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = PropositionId> + '_ {
        self.propositions.keys().copied()
    }

    pub fn get(&self, id: PropositionId) -> Option<&Proposition> {
        self.propositions.get(&id)
    }

    pub fn mutex_props(&self) -> &PairSet<PropositionId> {
        &self.mutex_props
    }

    pub fn contains(&self, id: PropositionId) -> bool {
        self.propositions.contains_key(&id)
    }

    pub fn is_mutex(&self, p1: PropositionId, p2: PropositionId) -> bool {
        self.mutex_props.contains(p1, p2)
    }

    pub fn len(&self) -> usize {
        self.propositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.propositions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Proposition, PropositionId, PropositionLayer};
    use crate::graphplan::action::ActionId;

    #[test]
    fn test_preconditions() {
        let mut layer = PropositionLayer::new();
        layer.add_proposition(Proposition::new(PropositionId(0)));
        layer.add_proposition(Proposition::new(PropositionId(1)));
        let enabled = Action::new("a", vec![PropositionId(0), PropositionId(1)], vec![], vec![]);
        let blocked = Action::new("b", vec![PropositionId(0), PropositionId(2)], vec![], vec![]);
        let free = Action::new("c", vec![], vec![PropositionId(3)], vec![]);
        assert!(layer.all_preconds_satisfied(&enabled));
        assert!(!layer.all_preconds_satisfied(&blocked));
        assert!(layer.all_preconds_satisfied(&free));
    }

    #[test]
    fn test_add_overwrites_by_name() {
        let mut layer = PropositionLayer::new();
        let mut first = Proposition::new(PropositionId(0));
        first.add_producer(ActionId(0));
        layer.add_proposition(first);
        let mut second = Proposition::new(PropositionId(0));
        second.add_producer(ActionId(1));
        layer.add_proposition(second);
        assert_eq!(layer.len(), 1);
        let stored = layer.get(PropositionId(0)).unwrap();
        assert_eq!(stored.producers().iter().copied().collect::<Vec<_>>(), vec![ActionId(1)]);
    }

    #[test]
    fn test_mutex() {
        let mut layer = PropositionLayer::new();
        layer.add_mutex(PropositionId(1), PropositionId(0));
        assert!(layer.is_mutex(PropositionId(0), PropositionId(1)));
        assert!(!layer.is_mutex(PropositionId(0), PropositionId(2)));
    }
}
