use std::collections::BTreeSet;

use super::action::ActionId;
use super::pair::PairSet;

/// Actions enabled at one level of the graph and the mutex pairs among them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLayer {
    actions: BTreeSet<ActionId>,
    mutex_actions: PairSet<ActionId>,
}

impl ActionLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: ActionId) {
        self.actions.insert(action);
    }

    pub fn add_mutex(&mut self, a1: ActionId, a2: ActionId) {
        self.mutex_actions.add(a1, a2);
    }

    pub fn actions(&self) -> &BTreeSet<ActionId> {
        &self.actions
    }

    pub fn mutex_actions(&self) -> &PairSet<ActionId> {
        &self.mutex_actions
    }

    pub fn contains(&self, action: ActionId) -> bool {
        self.actions.contains(&action)
    }

    pub fn is_mutex(&self, a1: ActionId, a2: ActionId) -> bool {
        self.mutex_actions.contains(a1, a2)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionId, ActionLayer};

    #[test]
    fn test_add_action_is_idempotent() {
        let mut layer = ActionLayer::new();
        layer.add_action(ActionId(1));
        layer.add_action(ActionId(1));
        layer.add_action(ActionId(0));
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.actions().iter().copied().collect::<Vec<_>>(), vec![ActionId(0), ActionId(1)]);
    }

    #[test]
    fn test_mutex_is_unordered() {
        let mut layer = ActionLayer::new();
        layer.add_mutex(ActionId(2), ActionId(5));
        assert!(layer.is_mutex(ActionId(5), ActionId(2)));
        assert!(!layer.is_mutex(ActionId(2), ActionId(3)));
        assert_eq!(layer.mutex_actions().len(), 1);
    }
}
