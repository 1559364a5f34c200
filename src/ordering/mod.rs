//! Ordering driver (component 4.5) and the ordering-adapter contract
//! (component, SYSTEM OVERVIEW item 1).
//!
//! Every backend shares the contract `(nrow, ncol, sym, Ap, Ai) -> P +
//! {dmax, lnz, flops}?`, modeled here as the `OrderingBackend` trait. AMD and
//! COLAMD are real: they delegate to `faer::sparse::linalg::{amd, colamd}`,
//! already proven in the teacher's `linalg::cholesky`/`linalg::lu`. CHOLMOD
//! and METIS are named as external black-box orderers by the design (the
//! libraries themselves are an explicit out-of-scope collaborator); their
//! adapters implement the full dispatch contract but, absent a real
//! CHOLMOD/METIS binding in this corpus, route to the AMD/COLAMD pair this
//! crate already owns -- see `cholmod.rs` and DESIGN.md.

pub mod amd;
pub mod cholmod;
pub mod colamd;
pub mod identity;
pub mod user;

use problemo::Problem;

use crate::control::{Control, OrderingChoice};
use crate::error::SymbolicError;
use crate::prune::Submatrix;
use crate::symmetry::SymmetryInfo;

/// A preliminary front tree COLAMD can produce as a side effect of its own
/// dense-row/column handling; when present, the frontal analyzer may adopt
/// it instead of redoing the column-elimination-tree walk (see frontal.rs).
#[derive(Debug, Clone)]
pub struct PreliminaryFronts {
    pub row_to_front: Vec<Option<usize>>,
    pub front_npivcol: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderingStats {
    pub dmax: f64,
    pub lnz: f64,
    pub flops: f64,
    pub preliminary_fronts: Option<PreliminaryFronts>,
}

/// Shared contract every ordering backend implements.
pub trait OrderingBackend {
    /// `sym` is `Some` only when the caller already ran the symmetry
    /// analyzer (the symmetric-candidate path); AMD requires it, COLAMD
    /// ignores it.
    fn order(
        &self,
        s: &Submatrix,
        sym: Option<&SymmetryInfo>,
        control: &Control,
    ) -> Result<(Vec<usize>, OrderingStats), Problem>;
}

/// Dispatches to the concrete backend selected by `choice`, applying the
/// METIS_GUARD rule when requested.
pub fn dispatch(
    choice: OrderingChoice,
    symmetric_mode: bool,
    s: &Submatrix,
    sym: Option<&SymmetryInfo>,
    control: &Control,
    user_ordering: Option<&user::UserOrdering>,
) -> Result<(Vec<usize>, OrderingStats), Problem> {
    match choice {
        OrderingChoice::None => identity::IdentityOrder.order(s, sym, control),
        OrderingChoice::Amd => {
            // AMD orders S+Sᵀ and requires a square, symmetric-candidate
            // pattern; under the unsymmetric strategy it falls back to
            // COLAMD over the rectangular submatrix instead, the same split
            // `cholmod::LibraryOrder` makes for its own symmetric/unsymmetric
            // branches.
            if symmetric_mode {
                amd::AmdOrder.order(s, sym, control)
            } else {
                colamd::ColamdOrder.order(s, sym, control)
            }
        }
        OrderingChoice::Cholmod | OrderingChoice::Metis | OrderingChoice::Best => {
            cholmod::LibraryOrder { symmetric_mode }.order(s, sym, control)
        }
        OrderingChoice::User => {
            let cb = user_ordering.ok_or(SymbolicError::ArgumentMissing)?;
            user::order_via_callback(cb, s, symmetric_mode, control)
        }
        OrderingChoice::Given => {
            // `Given` is handled by the driver before dispatch (the
            // caller's Q is accepted verbatim); reaching here means no
            // Quser was actually supplied, which is a driver bug, not a
            // caller error.
            Err(SymbolicError::Internal {
                message: "Given ordering requested with no Quser".into(),
            }
            .into())
        }
        OrderingChoice::MetisGuard => {
            if s.ncols == 0 || s.nrows == 0 {
                colamd::ColamdOrder.order(s, sym, control)
            } else if symmetric_mode {
                amd::AmdOrder.order(s, sym, control)
            } else {
                let max_rdeg = max_row_degree(s);
                let threshold = Control::dense_degree_threshold(control.dense_row, s.ncols);
                if max_rdeg > threshold {
                    colamd::ColamdOrder.order(s, sym, control)
                } else {
                    cholmod::LibraryOrder { symmetric_mode }.order(s, sym, control)
                }
            }
        }
    }
}

fn max_row_degree(s: &Submatrix) -> usize {
    let mut rdeg = vec![0usize; s.nrows];
    for &r in &s.row_idx {
        rdeg[r] += 1;
    }
    rdeg.into_iter().max().unwrap_or(0)
}

/// Merges the singleton pre-order `Cperm1` with the new ordering `Qinv`
/// (the inverse permutation the backend returned, over S's reduced index
/// space): leading `n1` positions stay singletons, middle positions are
/// filled by inverting `Qinv` and shifting by `n1`, trailing `nempty`
/// positions stay as-is.
///
/// Post-condition: `Cperm_init` is a permutation of `0..n` and empty
/// columns occupy the trailing slots.
pub fn combine_ordering(
    n1: usize,
    nempty: usize,
    cperm1: &[usize],
    qinv: &[usize],
) -> Result<Vec<usize>, Problem> {
    let n = cperm1.len();
    let n2 = n - n1 - nempty;
    debug_assert_eq!(qinv.len(), n2);

    let q = crate::perm::invert(qinv, n2)?;

    let mut cperm_init = Vec::with_capacity(n);
    cperm_init.extend_from_slice(&cperm1[0..n1]);
    for &s_col in &q {
        cperm_init.push(cperm1[n1 + s_col]);
    }
    cperm_init.extend_from_slice(&cperm1[n1 + n2..n]);

    debug_assert!(crate::perm::is_permutation(&cperm_init, n));
    Ok(cperm_init)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_ordering_is_identity_when_qinv_is_identity() {
        let cperm1 = vec![0usize, 1, 2, 3, 4];
        let qinv: Vec<usize> = (0..3).collect();
        let combined = combine_ordering(1, 1, &cperm1, &qinv).unwrap();
        assert_eq!(combined, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn combine_ordering_permutes_only_the_middle_block() {
        let cperm1 = vec![10usize, 11, 20, 21, 22, 30];
        // reverse the 3-element middle block
        let qinv = vec![2usize, 1, 0];
        let combined = combine_ordering(2, 1, &cperm1, &qinv).unwrap();
        assert_eq!(combined, vec![10, 11, 22, 21, 20, 30]);
    }

    #[test]
    fn amd_choice_on_rectangular_unsymmetric_routes_to_colamd() {
        let s = Submatrix {
            nrows: 3,
            ncols: 5,
            col_ptr: vec![0, 1, 2, 3, 4, 6],
            row_idx: vec![0, 1, 2, 0, 1, 2],
        };
        let control = Control::default();
        let (qinv, _stats) =
            dispatch(OrderingChoice::Amd, false, &s, None, &control, None).unwrap();
        assert!(crate::perm::is_permutation(&qinv, 5));
    }

    #[test]
    fn amd_choice_on_square_symmetric_routes_to_amd() {
        let s = Submatrix {
            nrows: 3,
            ncols: 3,
            col_ptr: vec![0, 3, 6, 9],
            row_idx: vec![0, 1, 2, 0, 1, 2, 0, 1, 2],
        };
        let control = Control::default();
        let (qinv, _stats) =
            dispatch(OrderingChoice::Amd, true, &s, None, &control, None).unwrap();
        assert!(crate::perm::is_permutation(&qinv, 3));
    }
}
