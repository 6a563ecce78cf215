pub mod action;
pub mod action_layer;
pub mod level;
pub mod pair;
pub mod problem;
pub mod proposition;
pub mod proposition_layer;

pub use action::{Action, ActionId};
pub use action_layer::ActionLayer;
pub use level::PlanGraphLevel;
pub use pair::{Pair, PairSet};
pub use problem::{DefinitionError, Error, Problem, ProblemBuilder, ProblemId};
pub use proposition::{Proposition, PropositionId};
pub use proposition_layer::PropositionLayer;
