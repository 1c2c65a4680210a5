//! Shared variable space for a state universe: registers every state variable twice
//! (once for "current" states, once for "next" states) against a single
//! `biodivine_lib_bdd::BddVariableSet`, and precomputes the current<=>next comparator
//! used to implement [`crate::symbolic::relation::Relation::apply`].

use crate::error::{CheckerError, CheckerResult};
use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet, BddVariableSetBuilder};
use std::collections::HashMap;
use std::rc::Rc;

/// The variable universe `V` a [`crate::symbolic::state_set::StateSet`] and
/// [`crate::symbolic::relation::Relation`] are built over.
///
/// Every [`StateSpace`] is reference-counted: `StateSet`/`Relation` values hold an
/// `Rc<StateSpace>` rather than a lifetime, so callers can pass them around and store
/// them in longer-lived structures (a [`crate::checker::Checker`], an action table)
/// without fighting borrowck over a shared BDD context.
pub struct StateSpace {
    var_set: BddVariableSet,
    names: Vec<String>,
    index_of: HashMap<String, usize>,
    current: Vec<BddVariable>,
    next: Vec<BddVariable>,
    comparator: Bdd,
}

impl StateSpace {
    /// Builds a fresh space over the given ordered variable names. Names must be
    /// pairwise distinct.
    pub fn new(names: Vec<String>) -> CheckerResult<Rc<StateSpace>> {
        let mut index_of = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index_of.insert(name.clone(), i).is_some() {
                return Err(CheckerError::BadType(format!(
                    "duplicate variable name '{name}'"
                )));
            }
        }

        let mut builder = BddVariableSetBuilder::new();
        let mut current = Vec::with_capacity(names.len());
        let mut next = Vec::with_capacity(names.len());
        for name in &names {
            current.push(builder.make_variable(name));
            next.push(builder.make_variable(&format!("{name}__next")));
        }
        let var_set = builder.build();

        let mut comparator = var_set.mk_true();
        for (v, v_next) in current.iter().zip(next.iter()) {
            let lhs = var_set.mk_literal(*v, true);
            let rhs = var_set.mk_literal(*v_next, true);
            comparator = comparator.and(&lhs.iff(&rhs));
        }

        Ok(Rc::new(StateSpace {
            var_set,
            names,
            index_of,
            current,
            next,
            comparator,
        }))
    }

    pub fn variables(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn var_set(&self) -> &BddVariableSet {
        &self.var_set
    }

    pub(crate) fn current_vars(&self) -> &[BddVariable] {
        &self.current
    }

    pub(crate) fn next_vars(&self) -> &[BddVariable] {
        &self.next
    }

    pub(crate) fn comparator(&self) -> &Bdd {
        &self.comparator
    }

    pub(crate) fn current_var(&self, name: &str) -> CheckerResult<BddVariable> {
        let i = self
            .index_of
            .get(name)
            .ok_or_else(|| CheckerError::BadVariable(name.to_string()))?;
        Ok(self.current[*i])
    }

    /// Re-expresses a Bdd over `current` variables in terms of `next` variables, by
    /// conjoining with the current<=>next comparator and projecting the current
    /// variables out. Used by [`crate::symbolic::relation::Relation::apply`] to align a
    /// `StateSet`'s variables with a `Relation`'s "to" side.
    pub(crate) fn rename_to_next(&self, bdd: &Bdd) -> Bdd {
        bdd.and(&self.comparator).exists(&self.current)
    }
}
