use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use super::action::{Action, ActionId};
use super::action_layer::ActionLayer;
use super::pair::PairSet;
use super::problem::{Error, Problem, ProblemId};
use super::proposition::{Proposition, PropositionId};
use super::proposition_layer::PropositionLayer;

/// One level of the planning graph: the action layer followed by the
/// proposition layer it produces.
///
/// A level starts empty and is filled exactly once by `expand` or
/// `expand_without_mutex`. After that it is only read, typically as the
/// previous level of the next expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanGraphLevel {
    action_layer: ActionLayer,
    proposition_layer: PropositionLayer,
    /// Problem this level was built against; `None` while still empty.
    problem: Option<ProblemId>,
}

impl PlanGraphLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level 0: the initial state as a proposition layer with no actions and
    /// no mutexes.
    pub fn initial(problem: &Problem, state: &[&str]) -> Result<Self, Error> {
        let mut proposition_layer = PropositionLayer::new();
        for name in state {
            let id = problem.proposition_id(name).ok_or_else(|| Error::UnknownProposition((*name).to_owned()))?;
            proposition_layer.add_proposition(Proposition::new(id));
        }
        Ok(Self { action_layer: ActionLayer::new(), proposition_layer, problem: Some(problem.id()) })
    }

    pub fn action_layer(&self) -> &ActionLayer {
        &self.action_layer
    }

    pub fn proposition_layer(&self) -> &PropositionLayer {
        &self.proposition_layer
    }

    pub fn is_expanded(&self) -> bool {
        self.problem.is_some()
    }

    /// An empty previous level has no owner and is accepted by any problem.
    fn begin(&mut self, problem: &Problem, previous: &PlanGraphLevel) -> Result<(), Error> {
        if self.is_expanded() {
            return Err(Error::AlreadyExpanded);
        }
        if previous.problem.map_or(false, |owner| owner != problem.id()) {
            return Err(Error::ForeignLayer);
        }
        self.problem = Some(problem.id());
        Ok(())
    }

    fn update_action_layer(&mut self, problem: &Problem, previous: &PropositionLayer) {
        for (id, action) in problem.actions() {
            if previous.all_preconds_satisfied(action) {
                self.action_layer.add_action(id);
            }
        }
        debug!(actions = self.action_layer.len(), "action layer populated");
    }

    fn update_mutex_actions(&mut self, problem: &Problem, previous_mutex: &PairSet<PropositionId>) {
        let current: Vec<ActionId> = self.action_layer.actions().iter().copied().collect();
        for (i, id1) in current.iter().enumerate() {
            for id2 in &current[i + 1..] {
                if let (Some(a1), Some(a2)) = (problem.action(*id1), problem.action(*id2)) {
                    if mutex_actions(problem, (*id1, a1), (*id2, a2), previous_mutex) {
                        trace!(a1 = %a1, a2 = %a2, "mutex actions");
                        self.action_layer.add_mutex(*id1, *id2);
                    }
                }
            }
        }
        debug!(mutex_actions = self.action_layer.mutex_actions().len(), "action mutexes computed");
    }

    fn update_proposition_layer(&mut self, problem: &Problem) {
        let mut produced: BTreeMap<PropositionId, Proposition> = BTreeMap::new();
        for id in self.action_layer.actions() {
            if let Some(action) = problem.action(*id) {
                for p in &action.add {
                    produced.entry(*p).or_insert_with(|| Proposition::new(*p)).add_producer(*id);
                }
            }
        }
        for proposition in produced.into_values() {
            self.proposition_layer.add_proposition(proposition);
        }
        debug!(propositions = self.proposition_layer.len(), "proposition layer populated");
    }

    fn update_mutex_propositions(&mut self) {
        let current: Vec<&Proposition> = self.proposition_layer.propositions().collect();
        let mutex = self.action_layer.mutex_actions();
        let mut found = Vec::new();
        for (i, p1) in current.iter().enumerate() {
            for p2 in &current[i + 1..] {
                if mutex_propositions(p1, p2, mutex) {
                    trace!(p1 = %p1.id(), p2 = %p2.id(), "mutex propositions");
                    found.push((p1.id(), p2.id()));
                }
            }
        }
        for (p1, p2) in found {
            self.proposition_layer.add_mutex(p1, p2);
        }
        debug!(mutex_props = self.proposition_layer.mutex_props().len(), "proposition mutexes computed");
    }

    /// Builds this level from `previous`: enabled actions, their mutexes,
    /// the propositions they add and the mutexes among those.
    pub fn expand(&mut self, problem: &Problem, previous: &PlanGraphLevel) -> Result<(), Error> {
        self.begin(problem, previous)?;
        let previous_layer = previous.proposition_layer();
        self.update_action_layer(problem, previous_layer);
        self.update_mutex_actions(problem, previous_layer.mutex_props());
        self.update_proposition_layer(problem);
        self.update_mutex_propositions();
        Ok(())
    }

    /// Same as `expand` without any mutex bookkeeping.
    pub fn expand_without_mutex(&mut self, problem: &Problem, previous: &PlanGraphLevel) -> Result<(), Error> {
        self.begin(problem, previous)?;
        let previous_layer = previous.proposition_layer();
        self.update_action_layer(problem, previous_layer);
        self.update_proposition_layer(problem);
        Ok(())
    }

    pub fn display<'a>(&'a self, problem: &'a Problem) -> LevelDisplay<'a> {
        LevelDisplay { level: self, problem }
    }
}

/// Actions outside the independence whitelist always interfere; whitelisted
/// ones are still mutex when they have competing needs.
pub fn mutex_actions(problem: &Problem, a1: (ActionId, &Action), a2: (ActionId, &Action), mutex_props: &PairSet<PropositionId>) -> bool {
    if !problem.is_independent(a1.0, a2.0) {
        return true;
    }
    have_competing_needs(a1.1, a2.1, mutex_props)
}

pub fn have_competing_needs(a1: &Action, a2: &Action, mutex_props: &PairSet<PropositionId>) -> bool {
    a1.pre.iter().any(|pre1| a2.pre.iter().any(|pre2| mutex_props.contains(*pre1, *pre2)))
}

/// True when every producer of `p1` is mutex with every producer of `p2`.
/// A proposition without producers makes this vacuously true.
pub fn mutex_propositions(p1: &Proposition, p2: &Proposition, mutex_actions: &PairSet<ActionId>) -> bool {
    p1.producers().iter().all(|a1| p2.producers().iter().all(|a2| mutex_actions.contains(*a1, *a2)))
}

pub struct LevelDisplay<'a> {
    level: &'a PlanGraphLevel,
    problem: &'a Problem,
}

impl LevelDisplay<'_> {
    fn action_name(&self, id: ActionId) -> String {
        self.problem.action(id).map_or_else(|| id.to_string(), |a| a.name.clone())
    }

    fn proposition_name(&self, id: PropositionId) -> String {
        self.problem.proposition_name(id).map_or_else(|| id.to_string(), str::to_owned)
    }
}

impl fmt::Display for LevelDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let actions = self.level.action_layer.actions().iter().fold(String::new(), |acc, id| acc + " " + &self.action_name(*id));
        writeln!(f, "actions:{}", actions)?;
        let mut mutex_actions: Vec<_> = self.level.action_layer.mutex_actions().iter()
            .map(|p| format!("({},{})", self.action_name(*p.low()), self.action_name(*p.high())))
            .collect();
        mutex_actions.sort();
        writeln!(f, "mutex actions: {}", mutex_actions.join(" "))?;
        let propositions = self.level.proposition_layer.propositions().fold(String::new(), |acc, p| {
            let producers: Vec<_> = p.producers().iter().map(|a| self.action_name(*a)).collect();
            acc + " " + &self.proposition_name(p.id()) + "[" + &producers.join(",") + "]"
        });
        writeln!(f, "propositions:{}", propositions)?;
        let mut mutex_props: Vec<_> = self.level.proposition_layer.mutex_props().iter()
            .map(|p| format!("({},{})", self.proposition_name(*p.low()), self.proposition_name(*p.high())))
            .collect();
        mutex_props.sort();
        write!(f, "mutex propositions: {}", mutex_props.join(" "))
    }
}
