//! The least/greatest-fixpoint kernel every CTL/ARCTL/Fair path operator is built from
//! (spec §4.2), grounded directly on the old/new convergence loop the distilled source
//! uses (`fixpoint(fonction, start)`).

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::CheckerResult;
use crate::symbolic::StateSet;

/// Where to send per-iteration [`Diagnostic::FixpointStep`] progress reports, and
/// which operator name to tag them with. `None` means nobody asked for progress
/// reporting on this particular fixpoint (e.g. a test building an [`crate::ctl::Ops`]
/// with no diagnostics sink attached).
pub type Report<'a> = Option<(&'a dyn Diagnostics, &'a str)>;

fn report_step(report: Report, iteration: u32) {
    if let Some((diagnostics, operator)) = report {
        diagnostics.report(&Diagnostic::FixpointStep {
            operator: operator.to_string(),
            iteration,
        });
    }
}

/// Iterates `step` from `start` until two consecutive iterates are equal, returning
/// that fixpoint. Termination is guaranteed by the finiteness of the variable space:
/// the chain of iterates is monotone (increasing for `lfp`, decreasing for `gfp`) in a
/// finite lattice, so it stabilises after at most as many steps as there are distinct
/// subsets reachable from `start`.
fn converge<F: FnMut(&StateSet) -> StateSet>(start: StateSet, mut step: F, report: Report) -> StateSet {
    let mut current = start;
    let mut iteration = 0;
    loop {
        let next = step(&current);
        report_step(report, iteration);
        iteration += 1;
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Least fixpoint of `step`, seeded at the empty set.
pub fn lfp<F: FnMut(&StateSet) -> StateSet>(empty: StateSet, step: F, report: Report) -> StateSet {
    converge(empty, step, report)
}

/// Greatest fixpoint of `step`, seeded at the full universe.
pub fn gfp<F: FnMut(&StateSet) -> StateSet>(universe: StateSet, step: F, report: Report) -> StateSet {
    converge(universe, step, report)
}

/// Fallible variant of [`converge`] for steps that can themselves fail (the
/// fair-CTL `τ` construction compiles action formulas and evaluates nested state
/// formulas as part of its step function, either of which can error).
fn try_converge<F: FnMut(&StateSet) -> CheckerResult<StateSet>>(
    start: StateSet,
    mut step: F,
    report: Report,
) -> CheckerResult<StateSet> {
    let mut current = start;
    let mut iteration = 0;
    loop {
        let next = step(&current)?;
        report_step(report, iteration);
        iteration += 1;
        if next == current {
            return Ok(next);
        }
        current = next;
    }
}

/// Fallible least fixpoint, seeded at the empty set.
pub fn try_lfp<F: FnMut(&StateSet) -> CheckerResult<StateSet>>(
    empty: StateSet,
    step: F,
    report: Report,
) -> CheckerResult<StateSet> {
    try_converge(empty, step, report)
}

/// Fallible greatest fixpoint, seeded at the full universe.
pub fn try_gfp<F: FnMut(&StateSet) -> CheckerResult<StateSet>>(
    universe: StateSet,
    step: F,
    report: Report,
) -> CheckerResult<StateSet> {
    try_converge(universe, step, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::StateSpace;

    #[test]
    fn lfp_of_identity_is_the_seed() {
        let space = StateSpace::new(vec!["p".into()]).unwrap();
        let empty = StateSet::empty(&space);
        let result = lfp(empty.clone(), |z| z.clone(), None);
        assert_eq!(result, empty);
    }

    #[test]
    fn gfp_of_identity_is_the_universe() {
        let space = StateSpace::new(vec!["p".into()]).unwrap();
        let universe = StateSet::universe(&space);
        let result = gfp(universe.clone(), |z| z.clone(), None);
        assert_eq!(result, universe);
    }

    #[test]
    fn lfp_grows_until_it_covers_the_seed_atom() {
        let space = StateSpace::new(vec!["p".into()]).unwrap();
        let p = StateSet::literal(&space, "p", true).unwrap();
        let universe = StateSet::universe(&space);
        let result = lfp(StateSet::empty(&space), |z| z.union(&p).intersect(&universe), None);
        assert_eq!(result, p);
    }

    #[test]
    fn lfp_reports_one_step_per_iteration() {
        use crate::diagnostics::{Diagnostic, Diagnostics, Verbosity};
        use std::cell::RefCell;

        struct Recorder(RefCell<Vec<Diagnostic>>);
        impl Diagnostics for Recorder {
            fn verbosity(&self) -> Verbosity {
                Verbosity::Verbose
            }
            fn report(&self, diagnostic: &Diagnostic) {
                self.0.borrow_mut().push(diagnostic.clone());
            }
        }

        let space = StateSpace::new(vec!["p".into()]).unwrap();
        let p = StateSet::literal(&space, "p", true).unwrap();
        let universe = StateSet::universe(&space);
        let recorder = Recorder(RefCell::new(Vec::new()));

        let result = lfp(
            StateSet::empty(&space),
            |z| z.union(&p).intersect(&universe),
            Some((&recorder, "EF")),
        );
        assert_eq!(result, p);

        let seen = recorder.0.borrow();
        assert!(!seen.is_empty());
        for (i, diagnostic) in seen.iter().enumerate() {
            match diagnostic {
                Diagnostic::FixpointStep { operator, iteration } => {
                    assert_eq!(operator, "EF");
                    assert_eq!(*iteration, i as u32);
                }
                other => panic!("unexpected diagnostic {other:?}"),
            }
        }
    }
}
