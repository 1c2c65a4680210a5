//! The public entry point (spec §6): construct once from `(U, pred)` or an
//! [`ActionTable`], then call `check` any number of times. Grounded on the teacher's
//! top-level `model_checking.rs`, which similarly wraps graph + context construction
//! behind a couple of constructor functions and a single `check`-style entry point.

use crate::action_table::ActionTable;
use crate::ast::{parse_formula, Node};
use crate::atoms::{AtomCompiler, AtomResolver};
use crate::diagnostics::{Diagnostics, SilentDiagnostics, TermDiagnostics, Verbosity};
use crate::error::{CheckerError, CheckerResult};
use crate::evaluator::Evaluator;
use crate::symbolic::{Relation, StateSet};

/// Bundles the ambient knobs every checker constructor accepts (spec §3.1), mirroring
/// the teacher's `PrintOptions`/CLI-argument layering: explicit configuration rather
/// than hidden globals.
#[derive(Clone, Copy, Debug)]
pub struct CheckerConfig {
    pub verbosity: Verbosity,
    pub memoize_atoms: bool,
}

impl Default for CheckerConfig {
    fn default() -> CheckerConfig {
        CheckerConfig {
            verbosity: Verbosity::Normal,
            memoize_atoms: true,
        }
    }
}

impl CheckerConfig {
    fn diagnostics(&self) -> Box<dyn Diagnostics> {
        match self.verbosity {
            Verbosity::Quiet => Box::new(SilentDiagnostics),
            verbosity => Box::new(TermDiagnostics::new(verbosity)),
        }
    }
}

/// A formula to check: either a string (parsed internally) or an already-built
/// [`Node`] (e.g. constructed by hand in a test, or reused across several `check`
/// calls without re-parsing).
pub enum CheckInput<'a> {
    Formula(&'a str),
    Parsed(Node),
}

/// One checker instance: an immutable `(U, pred)` pair (plus, for ARCTL/Fair, an
/// [`ActionTable`]) and the mutable memoisation caches ([`AtomCompiler`], the action
/// compiler's cache is held per-call since it is cheap to rebuild) that persist across
/// `check` calls.
pub struct Checker {
    universe: StateSet,
    pred: Relation,
    atoms: AtomCompiler,
    actions: Option<ActionTable>,
    diagnostics: Box<dyn Diagnostics>,
}

impl Checker {
    /// Plain CTL, with the default `v`/`v+`/`v-` atom grammar (spec §4.1).
    pub fn new_ctl(universe: StateSet, pred: Relation, config: CheckerConfig) -> Checker {
        let atoms = AtomCompiler::new(universe.space().clone(), universe.clone())
            .with_memoization(config.memoize_atoms);
        Checker {
            universe,
            pred,
            atoms,
            actions: None,
            diagnostics: config.diagnostics(),
        }
    }

    /// Plain CTL with a custom atom resolver overriding the default grammar.
    pub fn new_ctl_with_atoms(
        universe: StateSet,
        pred: Relation,
        resolver: Box<dyn AtomResolver>,
        config: CheckerConfig,
    ) -> Checker {
        let atoms = AtomCompiler::new(universe.space().clone(), universe.clone())
            .with_resolver(resolver)
            .with_memoization(config.memoize_atoms);
        Checker {
            universe,
            pred,
            atoms,
            actions: None,
            diagnostics: config.diagnostics(),
        }
    }

    /// ARCTL / Fair (AR)CTL: the ambient `pred` is the union of every rule in
    /// `action_table` (spec §4.4's "α absent -> ambient pred" fallback), and path
    /// quantifiers may additionally carry `actions`/fairness decorations (spec §4.5).
    pub fn new_farctl(
        universe: StateSet,
        action_table: ActionTable,
        config: CheckerConfig,
    ) -> CheckerResult<Checker> {
        let pred = action_table.full_relation();
        let atoms = AtomCompiler::new(universe.space().clone(), universe.clone())
            .with_memoization(config.memoize_atoms);
        Ok(Checker {
            universe,
            pred,
            atoms,
            actions: Some(action_table),
            diagnostics: config.diagnostics(),
        })
    }

    pub fn check(&mut self, input: CheckInput) -> CheckerResult<StateSet> {
        let node = match input {
            CheckInput::Formula(text) => parse_formula(text).map_err(CheckerError::Parse)?,
            CheckInput::Parsed(node) => node,
        };
        let evaluator = Evaluator::new(
            self.universe.clone(),
            self.pred.clone(),
            &self.atoms,
            self.actions.as_ref(),
            self.diagnostics.as_ref(),
        );
        evaluator.eval(&node)
    }
}

/// Parses a plain-CTL formula (no `actions`/fairness decorations expected, though the
/// parser does not itself reject them -- a `Checker::new_ctl` instance simply ignores
/// any present via [`crate::evaluator::Evaluator::resolve_pred`]'s action-table check).
pub fn parse_ctl(input: &str) -> CheckerResult<Node> {
    parse_formula(input).map_err(CheckerError::Parse)
}

/// Parses an ARCTL / Fair (AR)CTL formula; syntactically identical to [`parse_ctl`]
/// (decorations are always optional in the grammar), kept as a distinct entry point
/// per spec §6 for callers who want the name to document intent.
pub fn parse_arctl(input: &str) -> CheckerResult<Node> {
    parse_formula(input).map_err(CheckerError::Parse)
}
