//! Typed error taxonomy for the checker's public surface.

use std::fmt;

/// Every way a checker construction or `check` call can fail.
///
/// All variants are fatal at the `check` boundary: no partial `StateSet` is ever
/// returned alongside an error. Non-fatal conditions (an empty fair universe, an
/// empty fairness list) are surfaced through [`crate::diagnostics::Diagnostics`]
/// instead, never through this type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CheckerError {
    /// A constructor argument did not have the shape the contract requires
    /// (e.g. an action-table entry pairing a relation with an empty label list).
    BadType(String),
    /// `new_farctl` was called with an empty action table.
    EmptyActions,
    /// A `name` atom referenced a variable absent from the universe's variable list.
    BadVariable(String),
    /// An action predicate referenced a label absent from the action table's label set.
    UnknownLabel(String),
    /// A `bool` node carried a non-boolean value (only reachable via hand-built trees).
    BadBool,
    /// An AST node's `kind` is not recognised under the current logic.
    BadKind(String),
    /// A strong-fairness condition was an action-event, or a fairness list was attached
    /// to a node that is not a path quantifier.
    BadFairness(String),
    /// Tokenizing or parsing a formula string failed.
    Parse(String),
}

impl fmt::Display for CheckerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CheckerError::BadType(msg) => write!(f, "bad type: {msg}"),
            CheckerError::EmptyActions => {
                write!(f, "action table must not be empty")
            }
            CheckerError::BadVariable(name) => {
                write!(f, "'{name}' is not a variable of this universe")
            }
            CheckerError::UnknownLabel(label) => {
                write!(f, "'{label}' is not a known action label")
            }
            CheckerError::BadBool => write!(f, "bool node carries a non-boolean value"),
            CheckerError::BadKind(kind) => write!(f, "'{kind}' is not valid in this logic"),
            CheckerError::BadFairness(msg) => write!(f, "bad fairness assumption: {msg}"),
            CheckerError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CheckerError {}

impl From<String> for CheckerError {
    fn from(msg: String) -> Self {
        CheckerError::Parse(msg)
    }
}

pub type CheckerResult<T> = Result<T, CheckerError>;
