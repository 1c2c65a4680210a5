//! The monotone-fixpoint operator family path quantifiers are built from (spec §4.2),
//! parameterised over whichever `(universe, pred)` pair the caller needs -- the ambient
//! one for plain CTL, an action-compiled one for ARCTL, or a fairness-restricted one
//! for Fair-(AR)CTL. Grounded on `evaluation/hctl_operators_eval.rs`'s operator
//! definitions and the distilled source's `unarymod`/`binarymod` dispatch tables.

use crate::ast::{BinaryOp, UnaryOp};
use crate::diagnostics::Diagnostics;
use crate::fixpoint::{gfp, lfp};
use crate::symbolic::{Relation, StateSet};

/// One `(universe, pred)` pair and the handful of quantities (`EX`, `deadlock`) every
/// path operator is defined in terms of.
#[derive(Clone)]
pub struct Ops<'a> {
    universe: StateSet,
    pred: Relation,
    deadlock: StateSet,
    diagnostics: Option<&'a dyn Diagnostics>,
}

impl<'a> Ops<'a> {
    pub fn new(universe: StateSet, pred: Relation) -> Ops<'a> {
        let ex_universe = pred.apply(&universe).intersect(&universe);
        let deadlock = universe.minus(&ex_universe);
        Ops { universe, pred, deadlock, diagnostics: None }
    }

    /// Attaches a diagnostics sink so every fixpoint-based operator below reports a
    /// [`crate::diagnostics::Diagnostic::FixpointStep`] per iteration.
    pub fn with_diagnostics(mut self, diagnostics: &'a dyn Diagnostics) -> Ops<'a> {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn diagnostics(&self) -> Option<&'a dyn Diagnostics> {
        self.diagnostics
    }

    fn report(&self, operator: &'a str) -> Option<(&'a dyn Diagnostics, &'a str)> {
        self.diagnostics.map(|d| (d, operator))
    }

    pub fn universe(&self) -> &StateSet {
        &self.universe
    }

    pub fn pred(&self) -> &Relation {
        &self.pred
    }

    pub fn deadlock(&self) -> &StateSet {
        &self.deadlock
    }

    pub fn neg(&self, phi: &StateSet) -> StateSet {
        self.universe.minus(phi)
    }

    /// `EX φ = pred(φ) ∩ U`.
    pub fn ex(&self, phi: &StateSet) -> StateSet {
        self.pred.apply(phi).intersect(&self.universe)
    }

    pub fn ef(&self, phi: &StateSet) -> StateSet {
        lfp(StateSet::empty(phi.space()), |z| phi.union(&self.ex(z)), self.report("EF"))
    }

    pub fn eg(&self, phi: &StateSet) -> StateSet {
        gfp(
            self.universe.clone(),
            |z| phi.intersect(&self.ex(z).union(&self.deadlock)),
            self.report("EG"),
        )
    }

    pub fn eu(&self, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        lfp(
            StateSet::empty(phi1.space()),
            |z| phi2.union(&phi1.intersect(&self.ex(z))),
            self.report("EU"),
        )
    }

    pub fn ew(&self, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        gfp(
            self.universe.clone(),
            |z| phi2.union(&phi1.intersect(&self.ex(z).union(&self.deadlock))),
            self.report("EW"),
        )
    }

    pub fn er(&self, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        gfp(
            self.universe.clone(),
            |z| phi2.intersect(&phi1.union(&self.ex(z)).union(&self.deadlock)),
            self.report("ER"),
        )
    }

    pub fn em(&self, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        lfp(
            StateSet::empty(phi1.space()),
            |z| phi2.intersect(&phi1.union(&self.ex(z))),
            self.report("EM"),
        )
    }

    pub fn ax(&self, phi: &StateSet) -> StateSet {
        self.ex(&self.universe).intersect(&self.neg(&self.ex(&self.neg(phi))))
    }

    pub fn af(&self, phi: &StateSet) -> StateSet {
        lfp(StateSet::empty(phi.space()), |z| phi.union(&self.ax(z)), self.report("AF"))
    }

    pub fn ag(&self, phi: &StateSet) -> StateSet {
        gfp(
            self.universe.clone(),
            |z| phi.intersect(&self.ax(z).union(&self.deadlock)),
            self.report("AG"),
        )
    }

    pub fn au(&self, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        lfp(
            StateSet::empty(phi1.space()),
            |z| phi2.union(&phi1.intersect(&self.ax(z))),
            self.report("AU"),
        )
    }

    pub fn aw(&self, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        gfp(
            self.universe.clone(),
            |z| phi2.union(&phi1.intersect(&self.ax(z).union(&self.deadlock))),
            self.report("AW"),
        )
    }

    pub fn ar(&self, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        gfp(
            self.universe.clone(),
            |z| phi2.intersect(&phi1.union(&self.ax(z)).union(&self.deadlock)),
            self.report("AR"),
        )
    }

    pub fn am(&self, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        lfp(
            StateSet::empty(phi1.space()),
            |z| phi2.intersect(&phi1.union(&self.ax(z))),
            self.report("AM"),
        )
    }

    pub fn unary(&self, op: UnaryOp, phi: &StateSet) -> StateSet {
        match op {
            UnaryOp::EX => self.ex(phi),
            UnaryOp::AX => self.ax(phi),
            UnaryOp::EF => self.ef(phi),
            UnaryOp::AF => self.af(phi),
            UnaryOp::EG => self.eg(phi),
            UnaryOp::AG => self.ag(phi),
        }
    }

    pub fn binary(&self, op: BinaryOp, phi1: &StateSet, phi2: &StateSet) -> StateSet {
        match op {
            BinaryOp::EU => self.eu(phi1, phi2),
            BinaryOp::AU => self.au(phi1, phi2),
            BinaryOp::EW => self.ew(phi1, phi2),
            BinaryOp::AW => self.aw(phi1, phi2),
            BinaryOp::ER => self.er(phi1, phi2),
            BinaryOp::AR => self.ar(phi1, phi2),
            BinaryOp::EM => self.em(phi1, phi2),
            BinaryOp::AM => self.am(phi1, phi2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::StateSpace;

    /// p --> q, q self-loops. Over `U = {p,q}`, `EF q` must be everything, and `EG q`
    /// must be exactly `{q}`.
    #[test]
    fn flip_flop_reachability_and_invariance() {
        let space = StateSpace::new(vec!["at".into()]).unwrap();
        let p = StateSet::literal(&space, "at", true).unwrap(); // "p"
        let q = StateSet::literal(&space, "at", false).unwrap(); // "q"
        let universe = p.union(&q);
        let pred = Relation::from_transitions(
            &space,
            &[
                (vec![("at", true)], vec![("at", false)]),
                (vec![("at", false)], vec![("at", false)]),
            ],
        )
        .unwrap();
        let ops = Ops::new(universe.clone(), pred);

        assert_eq!(ops.ef(&q), universe);
        assert_eq!(ops.eg(&q), q);
    }

    #[test]
    fn deadlock_self_witnesses_eg() {
        let space = StateSpace::new(vec!["halted".into()]).unwrap();
        let halted = StateSet::literal(&space, "halted", true).unwrap();
        let running = StateSet::literal(&space, "halted", false).unwrap();
        let universe = halted.union(&running);
        // running -> halted, halted has no outgoing edge at all.
        let pred =
            Relation::from_transitions(&space, &[(vec![("halted", false)], vec![("halted", true)])]).unwrap();
        let ops = Ops::new(universe, pred);

        assert_eq!(*ops.deadlock(), halted);
        // EG halted holds at halted itself: the `∪ deadlock` disjunct lets the gfp
        // stay there without needing an actual successor.
        assert_eq!(ops.eg(&halted), halted);
        // AX is defined over EX(U), which excludes deadlock states by construction
        // (deadlock = U \ EX(U)) -- so unlike EG, AX never holds at a deadlock.
        assert_eq!(ops.ax(&StateSet::universe(&space)).intersect(&halted), StateSet::empty(&space));
    }
}
