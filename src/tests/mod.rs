//! End-to-end scenarios driven entirely through the public `Checker` surface (plus, for
//! the fairness diagnostics case, the internal `Evaluator` directly), one module-level
//! test per concrete walkthrough plus a handful of cross-cutting algebraic invariants.

use crate::action_table::{ActionRule, ActionTable};
use crate::ast::parse_formula;
use crate::atoms::AtomCompiler;
use crate::checker::{CheckInput, Checker, CheckerConfig};
use crate::ctl::Ops;
use crate::diagnostics::{Diagnostic, Diagnostics, Verbosity};
use crate::evaluator::Evaluator;
use crate::symbolic::{Relation, StateSet, StateSpace};
use std::cell::RefCell;
use std::collections::HashSet;

struct RecordingDiagnostics {
    seen: RefCell<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    fn new() -> RecordingDiagnostics {
        RecordingDiagnostics { seen: RefCell::new(Vec::new()) }
    }

    fn count(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn verbosity(&self) -> Verbosity {
        Verbosity::Verbose
    }

    fn report(&self, diagnostic: &Diagnostic) {
        self.seen.borrow_mut().push(diagnostic.clone());
    }
}

/// Variables `{p}`, `pred` takes `p=0` to `p=1` and self-loops at `p=1` -- the unique
/// infinite continuation from `p=0` makes `p` permanently true from the first step on.
#[test]
fn two_state_flip_flop() {
    let space = StateSpace::new(vec!["p".into()]).unwrap();
    let universe = StateSet::universe(&space);
    let pred = Relation::from_transitions(
        &space,
        &[
            (vec![("p", false)], vec![("p", true)]),
            (vec![("p", true)], vec![("p", true)]),
        ],
    )
    .unwrap();
    let mut checker = Checker::new_ctl(universe.clone(), pred, CheckerConfig::default());

    let p = StateSet::literal(&space, "p", true).unwrap();
    assert_eq!(checker.check(CheckInput::Formula("EG p")).unwrap(), p);
    assert_eq!(checker.check(CheckInput::Formula("AG(EF p)")).unwrap(), universe);

    // p0's only successor is p1 (p holds there), p1 self-loops into itself (p still
    // holds) -- so AX p holds everywhere, in particular at p0.
    let not_p = StateSet::literal(&space, "p", false).unwrap();
    assert_eq!(checker.check(CheckInput::Formula("AX p")).unwrap().intersect(&not_p), not_p);
}

/// Three states `s0 -> s1 -> s2`, `s2` deadlocked; `p` true only at `s2`. Demonstrates
/// `EG`'s deadlock self-witnessing (`s2` satisfies `EG p` with no successor of its own)
/// and, contrastingly, that `AX` -- defined over `EX(U)`, which excludes deadlocks by
/// construction -- never holds at a deadlock state regardless of its argument.
#[test]
fn deadlock_inclusion() {
    let space = StateSpace::new(vec!["p".into(), "aux".into()]).unwrap();
    let s0 = StateSet::literal(&space, "p", false).unwrap().intersect(&StateSet::literal(&space, "aux", false).unwrap());
    let s1 = StateSet::literal(&space, "p", false).unwrap().intersect(&StateSet::literal(&space, "aux", true).unwrap());
    let s2 = StateSet::literal(&space, "p", true).unwrap().intersect(&StateSet::literal(&space, "aux", false).unwrap());
    let universe = s0.union(&s1).union(&s2);
    let pred = Relation::from_transitions(
        &space,
        &[
            (vec![("p", false), ("aux", false)], vec![("p", false), ("aux", true)]),
            (vec![("p", false), ("aux", true)], vec![("p", true), ("aux", false)]),
        ],
    )
    .unwrap();
    let ops = Ops::new(universe.clone(), pred.clone());
    assert_eq!(*ops.deadlock(), s2);

    let mut checker = Checker::new_ctl(universe, pred, CheckerConfig::default());
    assert_eq!(checker.check(CheckInput::Formula("EG p")).unwrap(), s2);
    assert_eq!(checker.check(CheckInput::Formula("AX false")).unwrap().intersect(&s2), StateSet::empty(&space));
}

/// Same three-state chain, but checks `E[~p U p]`: `~p` holds at `s0`/`s1` (standing
/// in for a second proposition "q", since `p`'s own negation already has exactly that
/// shape here), `p` only at `s2`. Every state reaches `p` through a `~p`-chain (or
/// satisfies `p` immediately), so the result is the whole universe.
#[test]
fn until_reaches_every_state() {
    let space = StateSpace::new(vec!["p".into(), "aux".into()]).unwrap();
    let s0 = StateSet::literal(&space, "p", false).unwrap().intersect(&StateSet::literal(&space, "aux", false).unwrap());
    let s1 = StateSet::literal(&space, "p", false).unwrap().intersect(&StateSet::literal(&space, "aux", true).unwrap());
    let s2 = StateSet::literal(&space, "p", true).unwrap().intersect(&StateSet::literal(&space, "aux", false).unwrap());
    let universe = s0.union(&s1).union(&s2);
    let pred = Relation::from_transitions(
        &space,
        &[
            (vec![("p", false), ("aux", false)], vec![("p", false), ("aux", true)]),
            (vec![("p", false), ("aux", true)], vec![("p", true), ("aux", false)]),
            (vec![("p", true), ("aux", false)], vec![("p", true), ("aux", false)]),
        ],
    )
    .unwrap();
    let mut checker = Checker::new_ctl(universe.clone(), pred, CheckerConfig::default());

    let result = checker.check(CheckInput::Formula("(~p) EU p")).unwrap();
    assert_eq!(result, universe);
}

/// Two action-labelled rules over one boolean variable: `a` always sets it, `b` always
/// clears it. `EX[act(a)] on` must be everywhere, `EX[act(b)] on` nowhere.
#[test]
fn action_restriction() {
    let space = StateSpace::new(vec!["on".into()]).unwrap();
    let rule_a = ActionRule {
        relation: Relation::from_transitions(&space, &[(vec![], vec![("on", true)])]).unwrap(),
        labels: HashSet::from(["a".to_string()]),
    };
    let rule_b = ActionRule {
        relation: Relation::from_transitions(&space, &[(vec![], vec![("on", false)])]).unwrap(),
        labels: HashSet::from(["b".to_string()]),
    };
    let universe = StateSet::universe(&space);
    let table = ActionTable::new(vec![rule_a, rule_b], None).unwrap();
    let mut checker = Checker::new_farctl(universe.clone(), table, CheckerConfig::default()).unwrap();

    assert_eq!(checker.check(CheckInput::Formula("EX[act(a)] on")).unwrap(), universe);
    assert_eq!(checker.check(CheckInput::Formula("EX[act(b)] on")).unwrap(), StateSet::empty(&space));
}

/// A rule tagged with the table's `tau` label matches any action predicate, even one
/// naming an entirely different label -- `act(a)` still picks up the invisible rule's
/// transitions alongside `a`'s own.
#[test]
fn invisible_action_matches_every_predicate() {
    let space = StateSpace::new(vec!["q".into()]).unwrap();
    let rule_a = ActionRule {
        relation: Relation::from_transitions(&space, &[(vec![], vec![("q", false)])]).unwrap(),
        labels: HashSet::from(["a".to_string()]),
    };
    let rule_tau = ActionRule {
        relation: Relation::from_transitions(&space, &[(vec![], vec![("q", true)])]).unwrap(),
        labels: HashSet::from(["silent".to_string()]),
    };
    let universe = StateSet::universe(&space);
    let table = ActionTable::new(vec![rule_a, rule_tau], Some("silent".to_string())).unwrap();
    let mut checker = Checker::new_farctl(universe.clone(), table, CheckerConfig::default()).unwrap();

    // rule_a alone only ever sets q=false, yet the tau rule's q=true transitions are
    // folded in for every action predicate, so both polarities are reachable from
    // every source state.
    assert_eq!(checker.check(CheckInput::Formula("EX[act(a)] q")).unwrap(), universe);
    assert_eq!(checker.check(CheckInput::Formula("EX[act(a)] (~q)")).unwrap(), universe);
}

fn tau_action_table(pred: Relation) -> ActionTable {
    let rule = ActionRule { relation: pred, labels: HashSet::from(["step".to_string()]) };
    ActionTable::new(vec![rule], Some("step".to_string())).unwrap()
}

/// Strong fairness over the flip-flop system: the assumption "if `true` holds
/// infinitely often (trivially), then `p` eventually holds" is satisfiable along the
/// system's unique path, so `EG_fair(true)` covers the whole universe.
#[test]
fn strong_fairness_satisfiable() {
    let space = StateSpace::new(vec!["p".into()]).unwrap();
    let universe = StateSet::universe(&space);
    let pred = Relation::from_transitions(
        &space,
        &[
            (vec![("p", false)], vec![("p", true)]),
            (vec![("p", true)], vec![("p", true)]),
        ],
    )
    .unwrap();
    let table = tau_action_table(pred.clone());
    let mut checker = Checker::new_farctl(universe.clone(), table, CheckerConfig::default()).unwrap();

    let result = checker.check(CheckInput::Formula("EG[S((true), (p))] true")).unwrap();
    assert_eq!(result, universe);
}

/// Strong fairness that can never be honoured (the "then" event is the literal `false`
/// state) makes every trajectory unfair, so the restricted universe `EG_fair(true)`
/// collapses to `∅` and the checker reports exactly one `EmptyFairUniverse` diagnostic.
#[test]
fn strong_fairness_unsatisfiable_reports_empty_universe() {
    let space = StateSpace::new(vec!["p".into()]).unwrap();
    let universe = StateSet::universe(&space);
    let pred = Relation::from_transitions(
        &space,
        &[
            (vec![("p", false)], vec![("p", true)]),
            (vec![("p", true)], vec![("p", true)]),
        ],
    )
    .unwrap();
    let table = tau_action_table(pred.clone());

    let atoms = AtomCompiler::new(space.clone(), universe.clone());
    let recorder = RecordingDiagnostics::new();
    let evaluator = Evaluator::new(universe.clone(), pred, &atoms, Some(&table), &recorder);

    let node = parse_formula("EG[S((true), (false))] true").unwrap();
    let result = evaluator.eval(&node).unwrap();

    assert!(result.is_empty());
    assert_eq!(recorder.count(), 1);
    let seen = recorder.seen.borrow();
    assert!(matches!(seen[0], Diagnostic::EmptyFairUniverse { .. }));
}

/// Enabling or disabling atom memoisation must never change a check's result.
#[test]
fn atom_memoization_toggle_is_bit_identical() {
    let space = StateSpace::new(vec!["p".into(), "q".into()]).unwrap();
    let universe = StateSet::universe(&space);
    let pred = Relation::from_transitions(
        &space,
        &[
            (vec![("p", false)], vec![("p", true), ("q", true)]),
            (vec![("p", true)], vec![("p", true), ("q", false)]),
        ],
    )
    .unwrap();

    let mut memoized = Checker::new_ctl(
        universe.clone(),
        pred.clone(),
        CheckerConfig { verbosity: Verbosity::Quiet, memoize_atoms: true },
    );
    let mut unmemoized = Checker::new_ctl(
        universe,
        pred,
        CheckerConfig { verbosity: Verbosity::Quiet, memoize_atoms: false },
    );

    for formula in ["EF(p & q)", "AG(p => AX p)", "p EU q", "p <=> (~q)"] {
        let a = memoized.check(CheckInput::Formula(formula)).unwrap();
        let b = unmemoized.check(CheckInput::Formula(formula)).unwrap();
        assert_eq!(a, b, "formula {formula} diverged between memoized/unmemoized atom compilation");
    }
}

/// De Morgan-style identities tying the universal operators to their existential
/// duals, checked on the three-state deadlock system (so the `deadlock` term in `AG`
/// and `EG`'s fixpoints is exercised, not just the total-relation case).
#[test]
fn universal_operators_are_existential_duals() {
    let space = StateSpace::new(vec!["p".into(), "aux".into()]).unwrap();
    let s0 = StateSet::literal(&space, "p", false).unwrap().intersect(&StateSet::literal(&space, "aux", false).unwrap());
    let s1 = StateSet::literal(&space, "p", false).unwrap().intersect(&StateSet::literal(&space, "aux", true).unwrap());
    let s2 = StateSet::literal(&space, "p", true).unwrap().intersect(&StateSet::literal(&space, "aux", false).unwrap());
    let universe = s0.union(&s1).union(&s2);
    let pred = Relation::from_transitions(
        &space,
        &[
            (vec![("p", false), ("aux", false)], vec![("p", false), ("aux", true)]),
            (vec![("p", false), ("aux", true)], vec![("p", true), ("aux", false)]),
        ],
    )
    .unwrap();
    let ops = Ops::new(universe.clone(), pred);

    let p = StateSet::literal(&space, "p", true).unwrap().intersect(&universe);
    let not_p = universe.minus(&p);

    assert_eq!(ops.ag(&p), ops.neg(&ops.ef(&not_p)));
    assert_eq!(ops.af(&p), ops.neg(&ops.eg(&not_p)));

    // EF/EG are idempotent: re-applying them to their own result changes nothing.
    let ef_p = ops.ef(&p);
    assert_eq!(ops.ef(&ef_p), ef_p);
    let eg_p = ops.eg(&p);
    assert_eq!(ops.eg(&eg_p), eg_p);
}

/// `Node`'s precomputed `Display` text round-trips back through the parser to an
/// identical tree.
#[test]
fn formula_display_round_trips_through_the_parser() {
    for text in ["EF(p & ~q)", "p EU[act(a & !b)] q", "EG[S((p), act(c))] true", "AG(p => AX p)"] {
        let node = parse_formula(text).unwrap();
        let reparsed = parse_formula(&node.to_string()).unwrap();
        assert_eq!(node, reparsed);
    }
}

/// A decorated path quantifier's fairness lists are threaded through to
/// `PathDecoration::is_empty` correctly -- undecorated nodes fall through to plain CTL.
#[test]
fn undecorated_path_quantifier_has_empty_decoration() {
    let node = parse_formula("EG p").unwrap();
    match node.kind {
        crate::ast::NodeKind::Unary(_, _, decoration) => assert!(decoration.is_empty()),
        _ => panic!("expected a unary path quantifier"),
    }
}
