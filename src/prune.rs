//! Submatrix pruner (component 4.2).
//!
//! Extracts `S = A[Rperm1[n1..n_row-nempty_row], Cperm1[n1..n_col-nempty_col]]`
//! in the reduced index space, and optionally counts `nzdiag`: entries
//! present in the pattern *and* numerically nonzero on the diagonal of `S`.

use crate::pattern::PatternRef;
use crate::singleton::SingletonResult;

/// The pruned, reduced-index-space submatrix S, in compressed-column form.
#[derive(Debug, Clone)]
pub struct Submatrix {
    pub nrows: usize,
    pub ncols: usize,
    pub col_ptr: Vec<usize>,
    pub row_idx: Vec<usize>,
}

impl Submatrix {
    pub fn as_pattern(&self) -> PatternRef<'_> {
        PatternRef::new(self.nrows, self.ncols, &self.col_ptr, &self.row_idx)
    }
}

/// Builds S from A's pattern and the singleton pre-ordering. `orig_to_new_row`
/// maps an original row index to its position in `Rperm1` (i.e.
/// `InvRperm1`); positions `< n1` or `>= nrows(S) + n1` are outside S.
pub fn prune(pattern: PatternRef, singles: &SingletonResult) -> Submatrix {
    let n1 = singles.n1;
    let s_nrows = pattern.nrows - n1 - singles.nempty_row;
    let s_ncols = pattern.ncols - n1 - singles.nempty_col;

    // Map original row -> position in S (or None if outside S).
    let mut row_to_s = vec![None; pattern.nrows];
    for (new_pos, &orig_row) in singles.rperm1.iter().enumerate().skip(n1).take(s_nrows) {
        row_to_s[orig_row] = Some(new_pos - n1);
    }

    let mut col_ptr = vec![0usize; s_ncols + 1];
    let mut row_idx = Vec::new();

    for (s_col, &orig_col) in singles.cperm1.iter().enumerate().skip(n1).take(s_ncols) {
        let mut rows_in_col: Vec<usize> = pattern
            .col(orig_col)
            .iter()
            .filter_map(|&r| row_to_s[r])
            .collect();
        rows_in_col.sort_unstable();
        row_idx.extend_from_slice(&rows_in_col);
        col_ptr[s_col + 1] = row_idx.len();
    }

    Submatrix { nrows: s_nrows, ncols: s_ncols, col_ptr, row_idx }
}

/// Counts diagonal entries of S that are both structurally present and
/// numerically nonzero, given S's original-space column order and the
/// matching values array `Ax` of A (indexed the same way as `Ai`).
pub fn count_nzdiag(
    pattern: PatternRef,
    values: &[f64],
    singles: &SingletonResult,
    sub: &Submatrix,
) -> usize {
    let n1 = singles.n1;
    let mut row_to_s = vec![None; pattern.nrows];
    for (new_pos, &orig_row) in singles.rperm1.iter().enumerate().skip(n1).take(sub.nrows) {
        row_to_s[orig_row] = Some(new_pos - n1);
    }

    let mut count = 0;
    for (s_col, &orig_col) in singles.cperm1.iter().enumerate().skip(n1).take(sub.ncols) {
        if s_col >= sub.nrows {
            // S need not be square; a diagonal entry only exists for
            // columns with a matching row index.
            continue;
        }
        let start = pattern.col_ptr[orig_col];
        let end = pattern.col_ptr[orig_col + 1];
        for k in start..end {
            let orig_row = pattern.row_idx[k];
            if row_to_s[orig_row] == Some(s_col) && values[k] != 0.0 {
                count += 1;
                break;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::singleton::find_singletons;

    #[test]
    fn prune_dense_3x3_leaves_the_whole_matrix() {
        let col_ptr = [0usize, 3, 6, 9];
        let row_idx = [0usize, 1, 2, 0, 1, 2, 0, 1, 2];
        let pattern = PatternRef::new(3, 3, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        let sub = prune(pattern, &singles);
        assert_eq!(sub.nrows, 3);
        assert_eq!(sub.ncols, 3);
        assert_eq!(sub.col_ptr[3], 9);
    }

    #[test]
    fn prune_identity_leaves_nothing() {
        let col_ptr = [0usize, 1, 2, 3, 4];
        let row_idx = [0usize, 1, 2, 3];
        let pattern = PatternRef::new(4, 4, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        let sub = prune(pattern, &singles);
        assert_eq!(sub.nrows, 0);
        assert_eq!(sub.ncols, 0);
        assert_eq!(sub.col_ptr, vec![0]);
    }

    #[test]
    fn nzdiag_counts_only_numerically_nonzero_diagonal() {
        let col_ptr = [0usize, 2, 4];
        let row_idx = [0usize, 1, 0, 1];
        let values = [1.0, 2.0, 3.0, 0.0]; // (1,1) entry is structurally present but 0.0
        let pattern = PatternRef::new(2, 2, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, false).unwrap();
        let sub = prune(pattern, &singles);
        let nzdiag = count_nzdiag(pattern, &values, &singles, &sub);
        assert_eq!(nzdiag, 1);
    }
}
