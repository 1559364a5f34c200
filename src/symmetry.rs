//! Symmetry analyzer (component 4.3).
//!
//! For the square reduced block S, computes the symmetry ratio, `nzaat`
//! (nnz of S+Sᵀ excluding the diagonal), and the per-vertex degree vector of
//! S+Sᵀ (`Sdeg`), which AMD consumes directly as its degree hint. Skipped
//! entirely when the strategy is already forced to `Unsymmetric`.

use std::collections::HashSet;

use crate::prune::Submatrix;

#[derive(Debug, Clone)]
pub struct SymmetryInfo {
    pub sym_ratio: f64,
    pub nzaat: usize,
    pub sdeg: Vec<usize>,
}

/// `S` must be square; callers only invoke this on the symmetric-candidate
/// path (see `strategy::select`).
pub fn analyze(s: &Submatrix) -> SymmetryInfo {
    debug_assert_eq!(s.nrows, s.ncols);
    let n = s.nrows;

    let mut present: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    for j in 0..n {
        for k in s.col_ptr[j]..s.col_ptr[j + 1] {
            let i = s.row_idx[k];
            if i != j {
                present[j].insert(i);
            }
        }
    }

    let mut matched = 0usize;
    let mut off_diag_total = 0usize;
    for j in 0..n {
        for &i in &present[j] {
            off_diag_total += 1;
            if present[i].contains(&j) {
                matched += 1;
            }
        }
    }

    let sym_ratio = if off_diag_total == 0 { 1.0 } else { matched as f64 / off_diag_total as f64 };

    // nzaat: union of (i,j) and (j,i) for every off-diagonal entry, counted
    // once per unordered pair, each contributing 2 to S+Sᵀ (both (i,j) and
    // (j,i) become present there).
    let mut union_pairs: HashSet<(usize, usize)> = HashSet::new();
    for j in 0..n {
        for &i in &present[j] {
            let key = if i < j { (i, j) } else { (j, i) };
            union_pairs.insert(key);
        }
    }
    let nzaat = union_pairs.len() * 2;

    let mut sdeg = vec![0usize; n];
    for &(i, j) in &union_pairs {
        sdeg[i] += 1;
        sdeg[j] += 1;
    }

    SymmetryInfo { sym_ratio, nzaat, sdeg }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_symmetric_pattern_has_ratio_one() {
        let s = Submatrix {
            nrows: 3,
            ncols: 3,
            col_ptr: vec![0, 2, 4, 6],
            row_idx: vec![1, 2, 0, 2, 0, 1],
        };
        let info = analyze(&s);
        assert_eq!(info.sym_ratio, 1.0);
        assert_eq!(info.nzaat, 6);
    }

    #[test]
    fn fully_unsymmetric_pattern_has_ratio_zero() {
        // column 0 has row 1 only; row 0 has no off-diagonal column at all.
        let s = Submatrix {
            nrows: 2,
            ncols: 2,
            col_ptr: vec![0, 1, 1],
            row_idx: vec![1],
        };
        let info = analyze(&s);
        assert_eq!(info.sym_ratio, 0.0);
        assert_eq!(info.nzaat, 2);
    }

    #[test]
    fn diagonal_only_pattern_has_no_off_diagonal_entries() {
        let s = Submatrix { nrows: 2, ncols: 2, col_ptr: vec![0, 1, 2], row_idx: vec![0, 1] };
        let info = analyze(&s);
        assert_eq!(info.sym_ratio, 1.0);
        assert_eq!(info.nzaat, 0);
        assert_eq!(info.sdeg, vec![0, 0]);
    }
}
