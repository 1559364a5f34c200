//! Symbolic analysis phase of an unsymmetric-pattern multifrontal sparse LU
//! factorization: given a compressed-column pattern (and, optionally, its
//! numeric values), decides a fill-reducing column order, finds singleton
//! pivots, derives a column elimination tree amalgamated into fronts and
//! chains, and produces upper-bound cost estimates for the numeric phase
//! that follows.
//!
//! The pipeline, component by component:
//!
//! 1. [`pattern`] validates the caller's compressed-column input.
//! 2. [`singleton`] peels off degree-1 rows/columns (component 4.1).
//! 3. [`prune`] extracts the remaining reduced submatrix `S` (component 4.2).
//! 4. [`symmetry`] scores `S`'s pattern symmetry when relevant (component 4.3).
//! 5. [`strategy`] picks symmetric vs. unsymmetric handling (component 4.4).
//! 6. [`ordering`] dispatches to AMD, COLAMD, a user callback, or an
//!    external-library stand-in, then combines the result with the
//!    singleton pre-order (component 4.5).
//! 7. [`frontal`] builds the column elimination tree, amalgamates it into
//!    fronts, and segments fronts into chains (component 4.6).
//! 8. [`cost`] walks the front tree to bound flops, nonzeros, and memory
//!    (component 4.7).
//! 9. [`symbolic`] assembles everything into a [`symbolic::SymbolicObject`]
//!    and exposes the public entry points (component 4.8).

pub mod control;
pub mod cost;
pub mod error;
pub mod frontal;
pub mod info;
pub mod ordering;
pub mod pattern;
pub mod perm;
pub mod prune;
pub mod singleton;
pub mod strategy;
pub mod symbolic;
pub mod symmetry;
pub mod workspace;

pub use control::{Control, FixQ, OrderingChoice, Strategy};
pub use error::SymbolicError;
pub use info::Info;
pub use ordering::user::UserOrdering;
pub use strategy::ResolvedStrategy;
pub use symbolic::{
    fsymbolic, free_symbolic, free_workspace, paru_symbolic, symbolic, SymbolicObject,
};
pub use workspace::AnalysisWorkspace;
