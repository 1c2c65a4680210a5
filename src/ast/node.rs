//! The formula syntax tree (spec §2, §4.2-§4.5).

use crate::ast::action::{ActionFormula, Event, FairnessRecord};
use crate::ast::operators::{Atomic, BinaryOp, UnaryOp};
use std::fmt;

/// The `actions`/`ufair`/`wfair`/`sfair` decorations a path quantifier may carry
/// (spec §4.3, §4.5). Absent entries (`None` / empty `Vec`) mean "no restriction":
/// an un-decorated path quantifier inside a Fair-enabled checker behaves exactly as it
/// would in plain CTL (spec §9, "fall-through").
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PathDecoration {
    pub actions: Option<ActionFormula>,
    pub ufair: Vec<Event>,
    pub wfair: Vec<FairnessRecord>,
    pub sfair: Vec<FairnessRecord>,
}

impl PathDecoration {
    pub fn is_empty(&self) -> bool {
        self.actions.is_none() && self.ufair.is_empty() && self.wfair.is_empty() && self.sfair.is_empty()
    }
}

impl fmt::Display for PathDecoration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "[")?;
        let mut parts = Vec::new();
        if let Some(a) = &self.actions {
            parts.push(format!("act({a})"));
        }
        for e in &self.ufair {
            parts.push(format!("U({e})"));
        }
        for r in &self.wfair {
            parts.push(format!("W{r}"));
        }
        for r in &self.sfair {
            parts.push(format!("S{r}"));
        }
        write!(f, "{}]", parts.join(";"))
    }
}

/// The shape of a single node, mirroring the distilled source's `kind`/`children` split
/// but as a typed Rust enum rather than a string tag plus a generic child list.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum NodeKind {
    Terminal(Atomic),
    Not(Box<Node>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Imply(Box<Node>, Box<Node>),
    Iff(Box<Node>, Box<Node>),
    Unary(UnaryOp, Box<Node>, PathDecoration),
    Binary(BinaryOp, Box<Node>, Box<Node>, PathDecoration),
}

/// A single formula node. `text` is a canonical, precomputed string representation,
/// built bottom-up at construction time so that repeated `Display`/hashing does not
/// re-walk the tree -- the same shortcut the distilled source takes by caching
/// `formula_str` on every node.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Node {
    pub text: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn mk_bool(value: bool) -> Node {
        Node {
            text: value.to_string(),
            kind: NodeKind::Terminal(Atomic::Bool(value)),
        }
    }

    pub fn mk_name(name: impl Into<String>) -> Node {
        let name = name.into();
        Node {
            text: name.clone(),
            kind: NodeKind::Terminal(Atomic::Name(name)),
        }
    }

    pub fn mk_not(child: Node) -> Node {
        Node {
            text: format!("~{child}"),
            kind: NodeKind::Not(Box::new(child)),
        }
    }

    pub fn mk_and(a: Node, b: Node) -> Node {
        Node {
            text: format!("({a} & {b})"),
            kind: NodeKind::And(Box::new(a), Box::new(b)),
        }
    }

    pub fn mk_or(a: Node, b: Node) -> Node {
        Node {
            text: format!("({a} | {b})"),
            kind: NodeKind::Or(Box::new(a), Box::new(b)),
        }
    }

    pub fn mk_imply(a: Node, b: Node) -> Node {
        Node {
            text: format!("({a} => {b})"),
            kind: NodeKind::Imply(Box::new(a), Box::new(b)),
        }
    }

    pub fn mk_iff(a: Node, b: Node) -> Node {
        Node {
            text: format!("({a} <=> {b})"),
            kind: NodeKind::Iff(Box::new(a), Box::new(b)),
        }
    }

    pub fn mk_unary(op: UnaryOp, child: Node, decoration: PathDecoration) -> Node {
        Node {
            text: format!("({op}{decoration} {child})"),
            kind: NodeKind::Unary(op, Box::new(child), decoration),
        }
    }

    pub fn mk_binary(op: BinaryOp, a: Node, b: Node, decoration: PathDecoration) -> Node {
        Node {
            text: format!("{op}{decoration}({a}, {b})"),
            kind: NodeKind::Binary(op, Box::new(a), Box::new(b), decoration),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
