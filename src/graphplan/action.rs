use std::collections::BTreeSet;
use std::fmt;

use super::proposition::PropositionId;

/// Index of an action in the problem's action registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub usize);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// Grounded operator. The name carries any parameter binding, e.g. `move(a,b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub pre: BTreeSet<PropositionId>,
    pub add: BTreeSet<PropositionId>,
    pub delete: BTreeSet<PropositionId>,
    /// Persistence (no-op) actions carry a single proposition forward.
    pub persistence: bool,
}

impl Action {
    pub fn new<P, A, D>(name: &str, pre: P, add: A, delete: D) -> Self
    where
        P: IntoIterator<Item = PropositionId>,
        A: IntoIterator<Item = PropositionId>,
        D: IntoIterator<Item = PropositionId>,
    {
        Self {
            name: name.to_owned(),
            pre: pre.into_iter().collect(),
            add: add.into_iter().collect(),
            delete: delete.into_iter().collect(),
            persistence: false,
        }
    }

    pub fn persistence(name: &str, proposition: PropositionId) -> Self {
        Self {
            name: name.to_owned(),
            pre: BTreeSet::from([proposition]),
            add: BTreeSet::from([proposition]),
            delete: BTreeSet::new(),
            persistence: true,
        }
    }

    pub fn is_pre(&self, p: PropositionId) -> bool {
        self.pre.contains(&p)
    }

    pub fn is_add(&self, p: PropositionId) -> bool {
        self.add.contains(&p)
    }

    /// Same preconditions and effects. Name and persistence flag are ignored.
    pub fn same_definition(&self, other: &Action) -> bool {
        self.pre == other.pre && self.add == other.add && self.delete == other.delete
    }

    /// Classical GraphPlan interference: either action deletes a precondition
    /// or an add-effect of the other.
    pub fn interferes_with(&self, other: &Action) -> bool {
        fn deletes_needs(x: &Action, y: &Action) -> bool {
            x.delete.iter().any(|p| y.is_pre(*p) || y.is_add(*p))
        }
        deletes_needs(self, other) || deletes_needs(other, self)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, PropositionId};

    const P: PropositionId = PropositionId(0);
    const Q: PropositionId = PropositionId(1);
    const R: PropositionId = PropositionId(2);

    #[test]
    fn test_persistence() {
        let noop = Action::persistence("noop-P", P);
        assert!(noop.persistence);
        assert!(noop.is_pre(P) && noop.is_add(P));
        assert!(noop.delete.is_empty());
    }

    #[test]
    fn test_same_definition() {
        let noop = Action::persistence("noop-P", P);
        let spelled_out = Action::new("noop-P", vec![P], vec![P], vec![]);
        let deleting = Action::new("noop-P", vec![P], vec![P], vec![Q]);
        assert!(noop.same_definition(&spelled_out));
        assert!(spelled_out.same_definition(&noop));
        assert!(!noop.same_definition(&deleting));
    }

    #[test]
    fn test_interference() {
        let a = Action::new("a", vec![P], vec![Q], vec![R]);
        let needs_r = Action::new("b", vec![R], vec![], vec![]);
        let adds_r = Action::new("c", vec![], vec![R], vec![]);
        let unrelated = Action::new("d", vec![P], vec![Q], vec![]);
        assert!(a.interferes_with(&needs_r));
        assert!(needs_r.interferes_with(&a));
        assert!(a.interferes_with(&adds_r));
        assert!(!a.interferes_with(&unrelated));
    }
}
