//! The action table `A` (spec §3): a set of labelled transition rules plus the
//! distinguished "tau" label that matches every action predicate.

use crate::error::{CheckerError, CheckerResult};
use crate::symbolic::Relation;
use std::collections::HashSet;

/// One labelled rule: a relation together with the (non-empty) set of labels it is
/// tagged with.
pub struct ActionRule {
    pub relation: Relation,
    pub labels: HashSet<String>,
}

/// `A`, the full action table a [`crate::checker::Checker`] built with `new_farctl` is
/// parameterised over.
pub struct ActionTable {
    rules: Vec<ActionRule>,
    tau: Option<String>,
    all_labels: HashSet<String>,
}

impl ActionTable {
    pub fn new(rules: Vec<ActionRule>, tau: Option<String>) -> CheckerResult<ActionTable> {
        if rules.is_empty() {
            return Err(CheckerError::EmptyActions);
        }
        let mut all_labels = HashSet::new();
        for rule in &rules {
            if rule.labels.is_empty() {
                return Err(CheckerError::BadType(
                    "an action-table rule must carry at least one label".to_string(),
                ));
            }
            all_labels.extend(rule.labels.iter().cloned());
        }
        Ok(ActionTable { rules, tau, all_labels })
    }

    pub fn rules(&self) -> &[ActionRule] {
        &self.rules
    }

    pub fn tau(&self) -> Option<&str> {
        self.tau.as_deref()
    }

    /// `L`, the universe of every label occurring in the table.
    pub fn labels(&self) -> &HashSet<String> {
        &self.all_labels
    }

    /// The union of every rule's relation, i.e. `pred` restricted to no action at all
    /// (`bool(true)`) -- the ambient relation ARCTL/Fair-CTL fall back to when a path
    /// quantifier carries no `actions` decoration.
    pub fn full_relation(&self) -> Relation {
        let mut acc: Option<Relation> = None;
        for rule in &self.rules {
            acc = Some(match acc {
                Some(current) => current.union(&rule.relation),
                None => rule.relation.clone(),
            });
        }
        acc.expect("ActionTable::new rejects an empty rule list")
    }
}
