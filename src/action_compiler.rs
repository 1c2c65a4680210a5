//! Compiles an action formula `α` against an [`ActionTable`] into a `Relation` (spec
//! §4.3): the union of every rule whose label set satisfies `α`, with the table's
//! `tau` label (if any) short-circuiting a rule to "always matches".
//!
//! Compiled relations are memoised per `α`'s canonical (`Display`) text, mirroring the
//! canonical-form cache the distilled evaluator keys its own sub-formula cache on.

use crate::action_table::ActionTable;
use crate::ast::ActionFormula;
use crate::error::{CheckerError, CheckerResult};
use crate::symbolic::Relation;
use std::cell::RefCell;
use std::collections::HashSet;
use std::collections::HashMap;

pub struct ActionCompiler<'a> {
    table: &'a ActionTable,
    cache: RefCell<HashMap<String, Relation>>,
}

impl<'a> ActionCompiler<'a> {
    pub fn new(table: &'a ActionTable) -> ActionCompiler<'a> {
        ActionCompiler {
            table,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn compile(&self, formula: &ActionFormula) -> CheckerResult<Relation> {
        let key = formula.to_string();
        if let Some(hit) = self.cache.borrow().get(&key) {
            return Ok(hit.clone());
        }

        let mut matched: Option<Relation> = None;
        for rule in self.table.rules() {
            if satisfies(formula, &rule.labels, self.table.tau(), self.table.labels())? {
                matched = Some(match matched {
                    Some(acc) => acc.union(&rule.relation),
                    None => rule.relation.clone(),
                });
            }
        }
        let result = matched.unwrap_or_else(|| {
            let space = self.table.full_relation().space().clone();
            Relation::empty(&space)
        });

        self.cache.borrow_mut().insert(key, result.clone());
        Ok(result)
    }
}

/// Whether a rule tagged with `labels` matches `formula`, given the table's `tau`
/// label and its full universe of known labels `known`.
fn satisfies(
    formula: &ActionFormula,
    labels: &HashSet<String>,
    tau: Option<&str>,
    known: &HashSet<String>,
) -> CheckerResult<bool> {
    if let Some(tau) = tau {
        if labels.contains(tau) {
            return Ok(true);
        }
    }
    Ok(match formula {
        ActionFormula::Bool(b) => *b,
        ActionFormula::Name(name) => {
            if !known.contains(name) {
                return Err(CheckerError::UnknownLabel(name.clone()));
            }
            labels.contains(name)
        }
        ActionFormula::Not(inner) => !satisfies(inner, labels, tau, known)?,
        ActionFormula::And(a, b) => {
            satisfies(a, labels, tau, known)? && satisfies(b, labels, tau, known)?
        }
        ActionFormula::Or(a, b) => {
            satisfies(a, labels, tau, known)? || satisfies(b, labels, tau, known)?
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_table::ActionRule;
    use crate::symbolic::StateSpace;
    use std::collections::HashSet;

    fn table() -> ActionTable {
        let space = StateSpace::new(vec!["p".into()]).unwrap();
        let rule_a = ActionRule {
            relation: Relation::from_transitions(&space, &[(vec![], vec![("p", true)])]).unwrap(),
            labels: HashSet::from(["a".to_string()]),
        };
        let rule_b = ActionRule {
            relation: Relation::from_transitions(&space, &[(vec![], vec![("p", false)])]).unwrap(),
            labels: HashSet::from(["b".to_string(), "tau".to_string()]),
        };
        ActionTable::new(vec![rule_a, rule_b], Some("tau".to_string())).unwrap()
    }

    #[test]
    fn tau_rule_matches_any_predicate() {
        let table = table();
        let compiler = ActionCompiler::new(&table);
        let only_a = ActionFormula::Name("a".to_string());
        let compiled = compiler.compile(&only_a).unwrap();
        // rule_b carries "tau" so it must be included even though it lacks label "a".
        assert!(!compiled.is_empty());
        let full = table.full_relation();
        assert!(compiled.union(&full) == full);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let table = table();
        let compiler = ActionCompiler::new(&table);
        let formula = ActionFormula::Name("nope".to_string());
        assert_eq!(
            compiler.compile(&formula).unwrap_err(),
            CheckerError::UnknownLabel("nope".to_string())
        );
    }
}
