pub mod graphplan;

pub use graphplan::{Action, ActionId, ActionLayer, Pair, PairSet, PlanGraphLevel, Proposition, PropositionId, PropositionLayer};
pub use graphplan::{DefinitionError, Error, Problem, ProblemBuilder, ProblemId};

#[cfg(test)]
mod tests {
    use crate::{DefinitionError, Error, Problem, ProblemBuilder};

    #[test]
    fn test_definition_errors_from_crate_root() {
        let result = ProblemBuilder::new().action("A", &[], &["P"], &[]).independent("A", "B").build();
        match result {
            Err(Error::Definition(errors)) => assert_eq!(errors, vec![DefinitionError::UnknownAction("B".to_owned())]),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(Problem::builder().build().is_ok());
    }
}
