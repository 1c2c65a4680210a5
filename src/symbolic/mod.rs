//! The decision-diagram algebra this checker evaluates formulae over: a shared
//! variable space, Boolean-algebra-closed state sets, and a doubled-variable
//! transition relation with an `apply` (pred-image) operation.

pub mod relation;
pub mod space;
pub mod state_set;

pub use relation::Relation;
pub use space::StateSpace;
pub use state_set::StateSet;
