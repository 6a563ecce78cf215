use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;
use tracing::{debug, warn};

use super::action::{Action, ActionId};
use super::pair::PairSet;
use super::proposition::PropositionId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("action `{0}` is defined twice with different preconditions or effects")]
    DuplicateAction(String),
    #[error("independence declared for unknown action `{0}`")]
    UnknownAction(String),
    #[error("action `{0}` is declared independent of itself")]
    SelfIndependence(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid problem definition:{}", list_errors(.0))]
    Definition(Vec<DefinitionError>),
    #[error("unknown proposition `{0}`")]
    UnknownProposition(String),
    #[error("plan graph level has already been expanded")]
    AlreadyExpanded,
    #[error("previous level was built against a different problem")]
    ForeignLayer,
}

fn list_errors(errors: &[DefinitionError]) -> String {
    errors.iter().fold(String::new(), |acc, e| acc + "\n\t" + &e.to_string())
}

static NEXT_PROBLEM_ID: AtomicUsize = AtomicUsize::new(0);

/// Identity of a built `Problem`. Levels remember the problem they were
/// built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProblemId(usize);

/// Problem-wide context shared by every level of the graph: all grounded
/// actions, all proposition names and the independent-action whitelist.
/// Immutable once built.
#[derive(Debug)]
pub struct Problem {
    id: ProblemId,
    propositions: Vec<String>,
    proposition_mapping: HashMap<String, PropositionId>,
    actions: Vec<Action>,
    action_mapping: HashMap<String, ActionId>,
    independent: PairSet<ActionId>,
}

impl Problem {
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder::new()
    }

    pub fn id(&self) -> ProblemId {
        self.id
    }

    pub fn proposition_id(&self, name: &str) -> Option<PropositionId> {
        self.proposition_mapping.get(name).copied()
    }

    pub fn proposition_name(&self, id: PropositionId) -> Option<&str> {
        self.propositions.get(id.0).map(String::as_str)
    }

    pub fn proposition_count(&self) -> usize {
        self.propositions.len()
    }

    pub fn action_id(&self, name: &str) -> Option<ActionId> {
        self.action_mapping.get(name).copied()
    }

    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.0)
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions.iter().enumerate().map(|(i, a)| (ActionId(i), a))
    }

    pub fn independent_actions(&self) -> &PairSet<ActionId> {
        &self.independent
    }

    pub fn is_independent(&self, a1: ActionId, a2: ActionId) -> bool {
        self.independent.contains(a1, a2)
    }
}

/// Collects actions, propositions and independence declarations. Errors are
/// gathered and reported together by `build`.
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    propositions: Vec<String>,
    proposition_mapping: HashMap<String, PropositionId>,
    actions: Vec<Action>,
    action_mapping: HashMap<String, ActionId>,
    independent: Vec<(String, String)>,
    persistence_actions: bool,
    derived_independence: bool,
    errors: Vec<DefinitionError>,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, name: &str) -> PropositionId {
        if let Some(id) = self.proposition_mapping.get(name) {
            *id
        } else {
            let id = PropositionId(self.propositions.len());
            self.propositions.push(name.to_owned());
            self.proposition_mapping.insert(name.to_owned(), id);
            id
        }
    }

    fn insert_action(&mut self, action: Action) {
        match self.action_mapping.get(&action.name) {
            Some(id) => {
                let existing = &mut self.actions[id.0];
                if existing.same_definition(&action) {
                    existing.persistence |= action.persistence;
                } else {
                    warn!(action = %action.name, "divergent redefinition of action");
                    self.errors.push(DefinitionError::DuplicateAction(action.name));
                }
            }
            None => {
                self.action_mapping.insert(action.name.clone(), ActionId(self.actions.len()));
                self.actions.push(action);
            }
        }
    }

    pub fn proposition(mut self, name: &str) -> Self {
        self.intern(name);
        self
    }

    /// Propositions named here but never declared are registered implicitly.
    pub fn action(mut self, name: &str, pre: &[&str], add: &[&str], delete: &[&str]) -> Self {
        let pre: Vec<_> = pre.iter().map(|p| self.intern(p)).collect();
        let add: Vec<_> = add.iter().map(|p| self.intern(p)).collect();
        let delete: Vec<_> = delete.iter().map(|p| self.intern(p)).collect();
        self.insert_action(Action::new(name, pre, add, delete));
        self
    }

    pub fn independent(mut self, a1: &str, a2: &str) -> Self {
        self.independent.push((a1.to_owned(), a2.to_owned()));
        self
    }

    /// Generate a `noop-<name>` persistence action for every proposition.
    pub fn with_persistence_actions(mut self) -> Self {
        self.persistence_actions = true;
        self
    }

    /// Whitelist every action pair that does not interfere.
    pub fn with_derived_independence(mut self) -> Self {
        self.derived_independence = true;
        self
    }

    pub fn build(mut self) -> Result<Problem, Error> {
        if self.persistence_actions {
            for i in 0..self.propositions.len() {
                let name = format!("noop-{}", self.propositions[i]);
                self.insert_action(Action::persistence(&name, PropositionId(i)));
            }
        }

        let mut independent = PairSet::new();
        for (a1, a2) in std::mem::take(&mut self.independent) {
            match (self.action_mapping.get(&a1), self.action_mapping.get(&a2)) {
                (Some(_), Some(_)) if a1 == a2 => self.errors.push(DefinitionError::SelfIndependence(a1)),
                (Some(id1), Some(id2)) => { independent.add(*id1, *id2); },
                (None, _) => self.errors.push(DefinitionError::UnknownAction(a1)),
                (_, None) => self.errors.push(DefinitionError::UnknownAction(a2)),
            }
        }
        if self.derived_independence {
            for i in 0..self.actions.len() {
                for j in (i + 1)..self.actions.len() {
                    if !self.actions[i].interferes_with(&self.actions[j]) {
                        independent.add(ActionId(i), ActionId(j));
                    }
                }
            }
        }

        if !self.errors.is_empty() {
            return Err(Error::Definition(self.errors));
        }
        debug!(
            propositions = self.propositions.len(),
            actions = self.actions.len(),
            independent_pairs = independent.len(),
            "problem built"
        );
        Ok(Problem {
            id: ProblemId(NEXT_PROBLEM_ID.fetch_add(1, Ordering::Relaxed)),
            propositions: self.propositions,
            proposition_mapping: self.proposition_mapping,
            actions: self.actions,
            action_mapping: self.action_mapping,
            independent,
        })
    }
}
