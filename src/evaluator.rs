//! The single recursive dispatcher every formula tree is evaluated through (spec
//! §4.2-§4.5), grounded on `evaluation/algorithm.rs::eval_node`'s role as the
//! high-level recursive entry point that hands temporal operators off to the
//! dedicated operator implementations.
//!
//! Boolean connectives and atoms are evaluated here directly (§4.2). A path
//! quantifier with no decoration is evaluated against the ambient `(universe, pred)`
//! pair via [`crate::ctl::Ops`]; one with an `actions` decoration (and no fairness) is
//! evaluated against a freshly compiled `pred_α` (§4.4); one with any fairness list is
//! handed to [`crate::fair`] (§4.5).

use crate::action_compiler::ActionCompiler;
use crate::action_table::ActionTable;
use crate::ast::{Atomic, Node, NodeKind, PathDecoration};
use crate::atoms::AtomCompiler;
use crate::ctl::Ops;
use crate::diagnostics::Diagnostics;
use crate::error::{CheckerError, CheckerResult};
use crate::fair;
use crate::symbolic::{Relation, StateSet, StateSpace};
use std::rc::Rc;

pub struct Evaluator<'a> {
    pub(crate) space: Rc<StateSpace>,
    pub(crate) universe: StateSet,
    pub(crate) pred: Relation,
    pub(crate) atoms: &'a AtomCompiler,
    pub(crate) actions: Option<&'a ActionTable>,
    pub(crate) diagnostics: &'a dyn Diagnostics,
}

impl<'a> Evaluator<'a> {
    /// Borrows the checker's long-lived `AtomCompiler`/`ActionTable`/`Diagnostics` for
    /// the duration of one `eval` call, so their caches persist across calls instead of
    /// being rebuilt per-formula.
    pub fn new(
        universe: StateSet,
        pred: Relation,
        atoms: &'a AtomCompiler,
        actions: Option<&'a ActionTable>,
        diagnostics: &'a dyn Diagnostics,
    ) -> Evaluator<'a> {
        Evaluator {
            space: universe.space().clone(),
            universe,
            pred,
            atoms,
            actions,
            diagnostics,
        }
    }

    pub fn space(&self) -> &Rc<StateSpace> {
        &self.space
    }

    pub fn universe(&self) -> &StateSet {
        &self.universe
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics
    }

    pub fn eval(&self, node: &Node) -> CheckerResult<StateSet> {
        match &node.kind {
            NodeKind::Terminal(atomic) => self.eval_terminal(atomic),
            NodeKind::Not(child) => Ok(self.universe.minus(&self.eval(child)?)),
            NodeKind::And(a, b) => Ok(self.eval(a)?.intersect(&self.eval(b)?)),
            NodeKind::Or(a, b) => Ok(self.eval(a)?.union(&self.eval(b)?)),
            NodeKind::Imply(a, b) => {
                Ok(self.universe.minus(&self.eval(a)?).union(&self.eval(b)?))
            }
            NodeKind::Iff(a, b) => {
                let ea = self.eval(a)?;
                let eb = self.eval(b)?;
                let both = ea.intersect(&eb);
                let neither = self.universe.minus(&ea).intersect(&self.universe.minus(&eb));
                Ok(both.union(&neither))
            }
            NodeKind::Unary(op, child, decoration) => {
                let pred_alpha = self.resolve_pred(decoration)?;
                if decoration.ufair.is_empty() && decoration.wfair.is_empty() && decoration.sfair.is_empty() {
                    let value = self.eval(child)?;
                    let ops = Ops::new(self.universe.clone(), pred_alpha).with_diagnostics(self.diagnostics);
                    Ok(ops.unary(*op, &value))
                } else {
                    fair::eval_fair_unary(self, *op, child, decoration, pred_alpha)
                }
            }
            NodeKind::Binary(op, a, b, decoration) => {
                let pred_alpha = self.resolve_pred(decoration)?;
                if decoration.ufair.is_empty() && decoration.wfair.is_empty() && decoration.sfair.is_empty() {
                    let va = self.eval(a)?;
                    let vb = self.eval(b)?;
                    let ops = Ops::new(self.universe.clone(), pred_alpha).with_diagnostics(self.diagnostics);
                    Ok(ops.binary(*op, &va, &vb))
                } else {
                    fair::eval_fair_binary(self, *op, a, b, decoration, pred_alpha)
                }
            }
        }
    }

    fn eval_terminal(&self, atomic: &Atomic) -> CheckerResult<StateSet> {
        match atomic {
            Atomic::Bool(true) => Ok(self.universe.clone()),
            Atomic::Bool(false) => Ok(StateSet::empty(&self.space)),
            Atomic::Name(name) => self.atoms.compile(name),
        }
    }

    /// Resolves the relation a path quantifier instance should use: the ambient `pred`
    /// when undecorated, or the action compiler's output for its `actions` field
    /// (defaulting to `bool(true)`, i.e. the union of every rule, per §9) otherwise.
    pub(crate) fn resolve_pred(&self, decoration: &PathDecoration) -> CheckerResult<Relation> {
        if decoration.is_empty() {
            return Ok(self.pred.clone());
        }
        let table = self.action_table()?;
        let compiler = ActionCompiler::new(table);
        match &decoration.actions {
            Some(alpha) => compiler.compile(alpha),
            None => Ok(table.full_relation()),
        }
    }

    pub(crate) fn action_table(&self) -> CheckerResult<&'a ActionTable> {
        self.actions.ok_or_else(|| {
            CheckerError::BadKind(
                "actions/fairness decoration requires a checker built with an action table".to_string(),
            )
        })
    }
}
