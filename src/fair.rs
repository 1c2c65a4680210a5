//! Fair-(AR)CTL (spec §4.5): the `EXevent`/`EXnotevent`/`τ` construction behind
//! `EG_fair`, and the re-derivation of every other operator over the restricted
//! universe `U' = EG_fair(U)`. Grounded on the distilled source's `FairCTL_Evaluator`,
//! which rebinds `self.EX`/`self.deadlock`/`self.EU` to the fairness-restricted
//! universe once at construction and then reuses the plain-CTL lambdas verbatim; here
//! that rebinding is a second [`Ops`] instance (`ops_prime`) built over `U'`.

use crate::action_compiler::ActionCompiler;
use crate::ast::{ActionFormula, BinaryOp, Event, FairnessRecord, Node, PathDecoration, UnaryOp};
use crate::ctl::Ops;
use crate::diagnostics::Diagnostic;
use crate::error::{CheckerError, CheckerResult};
use crate::evaluator::Evaluator;
use crate::fixpoint::try_gfp;
use crate::symbolic::{Relation, StateSet};

/// A strong-fairness condition must not itself be an action-event (spec §4.5): there
/// would be no state-space meaning to "infinitely often an action fires" as a
/// *condition* to escape, only as a `then` target.
fn validate_fairness(decoration: &PathDecoration) -> CheckerResult<()> {
    for record in &decoration.sfair {
        if matches!(record.condition, Event::Action(_)) {
            return Err(CheckerError::BadFairness(
                "a strong-fairness condition must be a state formula, not an action event".to_string(),
            ));
        }
    }
    Ok(())
}

/// `EXevent(α, e)(Z)` (spec §4.5).
fn ex_event(ev: &Evaluator, ops: &Ops, alpha: &ActionFormula, event: &Event, z: &StateSet) -> CheckerResult<StateSet> {
    match event {
        Event::Action(beta) => {
            let combined = ActionFormula::mk_and(alpha.clone(), beta.clone());
            let relation = compile_action(ev, &combined)?;
            Ok(ex_under(ops, &relation, z))
        }
        Event::State(node) => {
            let value = ev.eval(node)?;
            Ok(value.intersect(&ops.ex(z).union(ops.deadlock())))
        }
    }
}

/// `EXnotevent(α, e)(Z)` (spec §4.5).
fn ex_not_event(
    ev: &Evaluator,
    ops: &Ops,
    alpha: &ActionFormula,
    event: &Event,
    z: &StateSet,
) -> CheckerResult<StateSet> {
    match event {
        Event::Action(beta) => {
            let combined = ActionFormula::mk_and(alpha.clone(), ActionFormula::mk_not(beta.clone()));
            let relation = compile_action(ev, &combined)?;
            Ok(ex_under(ops, &relation, z).union(ops.deadlock()))
        }
        Event::State(node) => {
            let value = ev.eval(node)?;
            let not_value = ops.universe().minus(&value);
            Ok(not_value.intersect(&ops.ex(z).union(ops.deadlock())))
        }
    }
}

fn compile_action(ev: &Evaluator, formula: &ActionFormula) -> CheckerResult<Relation> {
    let table = ev.action_table()?;
    ActionCompiler::new(table).compile(formula)
}

fn ex_under(ops: &Ops, relation: &Relation, z: &StateSet) -> StateSet {
    relation.apply(z).intersect(ops.universe())
}

/// `τ_u(Z) = ⋂_f E[Z U (Z ∩ EXevent(α, f.then)(Z))]`.
fn tau_u(
    ev: &Evaluator,
    ops: &Ops,
    alpha: &ActionFormula,
    ufair: &[Event],
    z: &StateSet,
) -> CheckerResult<StateSet> {
    let mut acc = ops.universe().clone();
    for then_event in ufair {
        let target = z.intersect(&ex_event(ev, ops, alpha, then_event, z)?);
        acc = acc.intersect(&ops.eu(z, &target));
    }
    Ok(acc)
}

/// `τ_w(Z) = ⋂_f E[Z U (Z ∩ (EXnotevent(α, f.condition)(Z) ∪ EXevent(α, f.then)(Z)))]`.
fn tau_w(
    ev: &Evaluator,
    ops: &Ops,
    alpha: &ActionFormula,
    wfair: &[FairnessRecord],
    z: &StateSet,
) -> CheckerResult<StateSet> {
    let mut acc = ops.universe().clone();
    for record in wfair {
        let escape = ex_not_event(ev, ops, alpha, &record.condition, z)?;
        let fulfil = ex_event(ev, ops, alpha, &record.then, z)?;
        let target = z.intersect(&escape.union(&fulfil));
        acc = acc.intersect(&ops.eu(z, &target));
    }
    Ok(acc)
}

/// `τ_s(Z) = ⋂_f (EXnotevent(α, f.condition)(Z) ∪ E[Z U (Z ∩ EXevent(α, f.then)(Z))])`.
fn tau_s(
    ev: &Evaluator,
    ops: &Ops,
    alpha: &ActionFormula,
    sfair: &[FairnessRecord],
    z: &StateSet,
) -> CheckerResult<StateSet> {
    let mut acc = ops.universe().clone();
    for record in sfair {
        let escape = ex_not_event(ev, ops, alpha, &record.condition, z)?;
        let target = z.intersect(&ex_event(ev, ops, alpha, &record.then, z)?);
        let term = escape.union(&ops.eu(z, &target));
        acc = acc.intersect(&term);
    }
    Ok(acc)
}

/// `EG_fair(φ) = E[φ U gfp Z. (φ ∩ τ_u(Z) ∩ τ_w(Z) ∩ τ_s(Z))]`, evaluated against
/// whichever `ops` the caller is currently working over (the ambient `(U, pred_α)`
/// pair when bootstrapping `U'`, or `(U', pred_α)` when re-derived at the end).
fn eg_fair(
    ev: &Evaluator,
    ops: &Ops,
    alpha: &ActionFormula,
    decoration: &PathDecoration,
    phi: &StateSet,
) -> CheckerResult<StateSet> {
    let inner = try_gfp(
        ops.universe().clone(),
        |z| {
            let tu = tau_u(ev, ops, alpha, &decoration.ufair, z)?;
            let tw = tau_w(ev, ops, alpha, &decoration.wfair, z)?;
            let ts = tau_s(ev, ops, alpha, &decoration.sfair, z)?;
            Ok(phi.intersect(&tu).intersect(&tw).intersect(&ts))
        },
        ops.diagnostics().map(|d| (d, "EG_fair")),
    )?;
    Ok(ops.eu(phi, &inner))
}

/// Builds `U' = EG_fair(U)` over the ambient `(U, pred_α)` pair, reports
/// [`Diagnostic::EmptyFairUniverse`] if it collapses to nothing, and returns the
/// `Ops` family every other fair operator re-derives from.
fn bootstrap<'e>(
    ev: &'e Evaluator,
    alpha: &ActionFormula,
    decoration: &PathDecoration,
    pred_alpha: Relation,
) -> CheckerResult<Ops<'e>> {
    let ops_base = Ops::new(ev.universe().clone(), pred_alpha.clone()).with_diagnostics(ev.diagnostics());
    let restricted = eg_fair(ev, &ops_base, alpha, decoration, ev.universe())?;
    if restricted.is_empty() {
        ev.diagnostics().report(&Diagnostic::EmptyFairUniverse {
            decoration: decoration.clone(),
        });
    }
    Ok(Ops::new(restricted, pred_alpha).with_diagnostics(ev.diagnostics()))
}

pub(crate) fn eval_fair_unary(
    ev: &Evaluator,
    op: UnaryOp,
    child: &Node,
    decoration: &PathDecoration,
    pred_alpha: Relation,
) -> CheckerResult<StateSet> {
    validate_fairness(decoration)?;
    let alpha = decoration.actions.clone().unwrap_or(ActionFormula::Bool(true));
    let ops = bootstrap(ev, &alpha, decoration, pred_alpha)?;
    let phi = ev.eval(child)?;

    match op {
        UnaryOp::EX => Ok(ops.ex(&phi)),
        UnaryOp::AX => Ok(ops.ax(&phi)),
        UnaryOp::EF => Ok(ops.ef(&phi)),
        UnaryOp::EG => eg_fair(ev, &ops, &alpha, decoration, &phi),
        UnaryOp::AF => {
            let not_phi = ops.neg(&phi);
            let eg = eg_fair(ev, &ops, &alpha, decoration, &not_phi)?;
            Ok(ops.neg(&eg))
        }
        UnaryOp::AG => {
            let not_phi = ops.neg(&phi);
            Ok(ops.neg(&ops.ef(&not_phi)))
        }
    }
}

pub(crate) fn eval_fair_binary(
    ev: &Evaluator,
    op: BinaryOp,
    a: &Node,
    b: &Node,
    decoration: &PathDecoration,
    pred_alpha: Relation,
) -> CheckerResult<StateSet> {
    validate_fairness(decoration)?;
    let alpha = decoration.actions.clone().unwrap_or(ActionFormula::Bool(true));
    let ops = bootstrap(ev, &alpha, decoration, pred_alpha)?;
    let phi1 = ev.eval(a)?;
    let phi2 = ev.eval(b)?;

    match op {
        BinaryOp::EU => Ok(ops.eu(&phi1, &phi2)),
        BinaryOp::EM => Ok(ops.em(&phi1, &phi2)),
        BinaryOp::EW => {
            let eu = ops.eu(&phi1, &phi2);
            let eg = eg_fair(ev, &ops, &alpha, decoration, &phi1)?;
            Ok(eu.union(&eg))
        }
        BinaryOp::ER => {
            // ER_fair(phi1, phi2) = EW_fair(phi2, phi1 ∩ phi2)
            let inter = phi1.intersect(&phi2);
            let eu = ops.eu(&phi2, &inter);
            let eg = eg_fair(ev, &ops, &alpha, decoration, &phi2)?;
            Ok(eu.union(&eg))
        }
        BinaryOp::AU => {
            let not2 = ops.neg(&phi2);
            let not1 = ops.neg(&phi1);
            let eu = ops.eu(&not2, &not1.intersect(&not2));
            let eg = eg_fair(ev, &ops, &alpha, decoration, &not2)?;
            Ok(ops.neg(&eu).intersect(&ops.neg(&eg)))
        }
        BinaryOp::AW => {
            let not2 = ops.neg(&phi2);
            let not1 = ops.neg(&phi1);
            let eu = ops.eu(&not2, &not1.intersect(&not2));
            Ok(ops.neg(&eu))
        }
        BinaryOp::AR => {
            // AR_fair(phi1, phi2) = AW_fair(phi2, phi1 ∩ phi2)
            let inter = phi1.intersect(&phi2);
            let not_inter = ops.neg(&inter);
            let not_phi2 = ops.neg(&phi2);
            let eu = ops.eu(&not_inter, &not_phi2.intersect(&not_inter));
            Ok(ops.neg(&eu))
        }
        BinaryOp::AM => {
            // AM_fair(phi1, phi2) = AU_fair(phi2, phi1 ∩ phi2)
            let inter = phi1.intersect(&phi2);
            let not_inter = ops.neg(&inter);
            let not_phi2 = ops.neg(&phi2);
            let eu = ops.eu(&not_inter, &not_phi2.intersect(&not_inter));
            let eg = eg_fair(ev, &ops, &alpha, decoration, &not_inter)?;
            Ok(ops.neg(&eu).intersect(&ops.neg(&eg)))
        }
    }
}
