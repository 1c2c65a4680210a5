//! Symbolic transition relations, represented as Bdds over doubled (current, next)
//! variables (spec §2, §4.2).

use crate::error::CheckerResult;
use crate::symbolic::space::StateSpace;
use crate::symbolic::state_set::StateSet;
use biodivine_lib_bdd::Bdd;
use std::rc::Rc;

/// A relation `R ⊆ States × States`, used by this crate exclusively in its
/// "precedence"/"pred" role: `pred(S) = {s | ∃s'. (s, s') ∈ R ∧ s' ∈ S}`.
#[derive(Clone)]
pub struct Relation {
    space: Rc<StateSpace>,
    bdd: Bdd,
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.bdd == other.bdd
    }
}
impl Eq for Relation {}

impl Relation {
    pub(crate) fn new(space: Rc<StateSpace>, bdd: Bdd) -> Relation {
        Relation { space, bdd }
    }

    pub fn space(&self) -> &Rc<StateSpace> {
        &self.space
    }

    pub fn empty(space: &Rc<StateSpace>) -> Relation {
        Relation::new(space.clone(), space.var_set().mk_false())
    }

    /// Builds a relation from an explicit list of `(from, to)` edges, each side a
    /// partial assignment of variable name to value (unmentioned variables are free on
    /// that side). Intended for tests and the CLI's plain-text transition-system
    /// loader, not for large state spaces.
    pub fn from_transitions(
        space: &Rc<StateSpace>,
        edges: &[(Vec<(&str, bool)>, Vec<(&str, bool)>)],
    ) -> CheckerResult<Relation> {
        let mut acc = space.var_set().mk_false();
        for (from, to) in edges {
            let mut edge = space.var_set().mk_true();
            for (name, value) in from {
                let var = space.current_var(name)?;
                edge = edge.and(&space.var_set().mk_literal(var, *value));
            }
            for (name, value) in to {
                let var = space.current_var(name)?;
                // `to` assignments are expressed over the *next*-state counterpart of
                // the named variable.
                let next_name = format!("{name}__next");
                let next_var = space
                    .var_set()
                    .var_by_name(&next_name)
                    .expect("next-variable always registered alongside its current twin");
                edge = edge.and(&space.var_set().mk_literal(next_var, *value));
            }
            acc = acc.or(&edge);
        }
        Ok(Relation::new(space.clone(), acc))
    }

    pub fn union(&self, other: &Relation) -> Relation {
        Relation::new(self.space.clone(), self.bdd.or(&other.bdd))
    }

    pub fn intersect(&self, other: &Relation) -> Relation {
        Relation::new(self.space.clone(), self.bdd.and(&other.bdd))
    }

    /// `self \ other`.
    pub fn minus(&self, other: &Relation) -> Relation {
        Relation::new(self.space.clone(), self.bdd.and_not(&other.bdd))
    }

    pub fn is_empty(&self) -> bool {
        self.bdd.is_false()
    }

    /// `pred(states) = {s | ∃s'. (s, s') ∈ self ∧ s' ∈ states}`.
    pub fn apply(&self, states: &StateSet) -> StateSet {
        let states_next = states.rename_to_next();
        let joined = self.bdd.and(&states_next);
        let projected = joined.exists(self.space.next_vars());
        StateSet::new(self.space.clone(), projected)
    }
}
