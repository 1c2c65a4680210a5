//! Loads a transition system and a list of formulae from plain-text files for the CLI
//! binary, grounded on the teacher's `load_formulae` (read-to-string, skip blank/`#`
//! lines) but reading a transition system instead of a BN model file, since this
//! crate's state space is declared directly rather than derived from a regulatory
//! network.
//!
//! Transition-system file grammar (one directive per line, blank lines and lines
//! starting with `#` ignored):
//!
//!     VARS <name> <name> ...
//!     TRANS <assignment>... -> <assignment>...
//!     ACTION <label> <assignment>... -> <assignment>...
//!
//! where an `<assignment>` is `name=0` or `name=1`. `VARS` must appear exactly once,
//! before any `TRANS`/`ACTION` line. `TRANS` lines build the ambient `pred` relation;
//! `ACTION` lines build one single-label rule apiece for an [`ActionTable`].

use crate::action_table::{ActionRule, ActionTable};
use crate::error::{CheckerError, CheckerResult};
use crate::symbolic::{Relation, StateSet, StateSpace};
use std::collections::HashSet;
use std::fs::read_to_string;
use std::rc::Rc;

/// Reads formulae from a file, one per line; blank lines and `#`-comments are ignored.
pub fn load_formulae(formulae_path: &str) -> CheckerResult<Vec<String>> {
    let text = read_to_string(formulae_path).map_err(|e| CheckerError::Parse(e.to_string()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

pub struct TransitionSystem {
    pub space: Rc<StateSpace>,
    pub universe: StateSet,
    pub pred: Relation,
    pub actions: Vec<(String, Vec<(String, bool)>, Vec<(String, bool)>)>,
}

pub fn load_transition_system(path: &str) -> CheckerResult<TransitionSystem> {
    let text = read_to_string(path).map_err(|e| CheckerError::Parse(e.to_string()))?;

    let mut vars: Option<Vec<String>> = None;
    let mut transitions = Vec::new();
    let mut actions = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("VARS ") {
            vars = Some(rest.split_whitespace().map(str::to_string).collect());
        } else if let Some(rest) = line.strip_prefix("TRANS ") {
            let (from, to) = split_arrow(rest)?;
            transitions.push((parse_assignment(from)?, parse_assignment(to)?));
        } else if let Some(rest) = line.strip_prefix("ACTION ") {
            let (label, rest) = rest
                .split_once(' ')
                .ok_or_else(|| CheckerError::Parse(format!("missing action body in line: {line}")))?;
            let (from, to) = split_arrow(rest)?;
            actions.push((label.to_string(), parse_assignment(from)?, parse_assignment(to)?));
        } else {
            return Err(CheckerError::Parse(format!("unrecognised line: {line}")));
        }
    }

    let vars = vars.ok_or_else(|| CheckerError::Parse("transition system is missing a VARS line".to_string()))?;
    let space = StateSpace::new(vars)?;
    let universe = StateSet::universe(&space);

    let edges: Vec<(Vec<(&str, bool)>, Vec<(&str, bool)>)> = transitions
        .iter()
        .map(|(from, to)| (as_refs(from), as_refs(to)))
        .collect();
    let pred = Relation::from_transitions(&space, &edges)?;

    Ok(TransitionSystem {
        space,
        universe,
        pred,
        actions,
    })
}

/// Builds an [`ActionTable`] from the `ACTION` lines of a loaded [`TransitionSystem`].
pub fn build_action_table(system: &TransitionSystem, tau: Option<&str>) -> CheckerResult<ActionTable> {
    let mut rules = Vec::with_capacity(system.actions.len());
    for (label, from, to) in &system.actions {
        let edge = [(as_refs(from), as_refs(to))];
        let relation = Relation::from_transitions(&system.space, &edge)?;
        rules.push(ActionRule {
            relation,
            labels: HashSet::from([label.clone()]),
        });
    }
    ActionTable::new(rules, tau.map(str::to_string))
}

fn split_arrow(text: &str) -> CheckerResult<(&str, &str)> {
    text.split_once("->")
        .map(|(from, to)| (from.trim(), to.trim()))
        .ok_or_else(|| CheckerError::Parse(format!("expected '->' in line: {text}")))
}

fn parse_assignment(text: &str) -> CheckerResult<Vec<(String, bool)>> {
    text.split_whitespace()
        .map(|token| {
            let (name, value) = token
                .split_once('=')
                .ok_or_else(|| CheckerError::Parse(format!("malformed assignment '{token}'")))?;
            let value = match value {
                "1" => true,
                "0" => false,
                other => return Err(CheckerError::Parse(format!("expected 0/1, found '{other}'"))),
            };
            Ok((name.to_string(), value))
        })
        .collect()
}

fn as_refs(assignment: &[(String, bool)]) -> Vec<(&str, bool)> {
    assignment.iter().map(|(name, value)| (name.as_str(), *value)).collect()
}
