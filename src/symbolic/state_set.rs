//! Symbolic, Boolean-algebra-closed sets of states (spec §2, §4.1).

use crate::error::CheckerResult;
use crate::symbolic::space::StateSpace;
use biodivine_lib_bdd::Bdd;
use std::rc::Rc;

/// A set of states, represented as a `Bdd` over a [`StateSpace`]'s current variables.
///
/// `StateSet` values are cheap to clone (an `Rc` and a `Bdd`, the latter itself
/// reference-counted internally by `biodivine_lib_bdd`) and compare equal exactly when
/// they denote the same set of states, by the canonicity of reduced, ordered BDDs built
/// from the same [`StateSpace`].
#[derive(Clone)]
pub struct StateSet {
    pub(crate) space: Rc<StateSpace>,
    pub(crate) bdd: Bdd,
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.bdd == other.bdd
    }
}
impl Eq for StateSet {}

impl StateSet {
    pub(crate) fn new(space: Rc<StateSpace>, bdd: Bdd) -> StateSet {
        StateSet { space, bdd }
    }

    pub fn space(&self) -> &Rc<StateSpace> {
        &self.space
    }

    pub fn empty(space: &Rc<StateSpace>) -> StateSet {
        StateSet::new(space.clone(), space.var_set().mk_false())
    }

    pub fn universe(space: &Rc<StateSpace>) -> StateSet {
        StateSet::new(space.clone(), space.var_set().mk_true())
    }

    /// `{s | s(var) = value}`, per spec §4.1: pins one variable, leaves every other
    /// variable of the space free. Callers normally go through
    /// [`crate::atoms::AtomCompiler`], which additionally memoises and intersects with
    /// the enclosing universe.
    pub fn literal(space: &Rc<StateSpace>, var: &str, value: bool) -> CheckerResult<StateSet> {
        let bdd_var = space.current_var(var)?;
        let bdd = space.var_set().mk_literal(bdd_var, value);
        Ok(StateSet::new(space.clone(), bdd))
    }

    pub fn is_empty(&self) -> bool {
        self.bdd.is_false()
    }

    pub fn union(&self, other: &StateSet) -> StateSet {
        StateSet::new(self.space.clone(), self.bdd.or(&other.bdd))
    }

    pub fn intersect(&self, other: &StateSet) -> StateSet {
        StateSet::new(self.space.clone(), self.bdd.and(&other.bdd))
    }

    /// `self \ other`.
    pub fn minus(&self, other: &StateSet) -> StateSet {
        StateSet::new(self.space.clone(), self.bdd.and_not(&other.bdd))
    }

    pub(crate) fn rename_to_next(&self) -> Bdd {
        self.space.rename_to_next(&self.bdd)
    }

    /// Every full variable assignment (in `space.variables()` order) this set
    /// contains. Built by brute-force enumeration over `2^|V|` candidate assignments,
    /// so intended for the CLI's "print full results" path against small,
    /// demonstration-sized state spaces, not as a scalable solution enumerator.
    pub fn enumerate(&self) -> Vec<Vec<bool>> {
        let names = self.space.variables();
        let var_set = self.space.var_set();
        let mut out = Vec::new();
        for mask in 0u64..(1u64 << names.len()) {
            let mut conjunction = var_set.mk_true();
            let mut bits = Vec::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let bit = (mask >> i) & 1 == 1;
                bits.push(bit);
                let var = self
                    .space
                    .current_var(name)
                    .expect("space.variables() only yields registered variable names");
                conjunction = conjunction.and(&var_set.mk_literal(var, bit));
            }
            if !self.bdd.and(&conjunction).is_false() {
                out.push(bits);
            }
        }
        out
    }
}
