//! Singleton finder (component 4.1).
//!
//! Repeatedly finds a column (or row) whose current remaining degree is 1
//! and moves its unique nonzero's row (resp. column) to the singleton
//! block, updating remaining degrees as it goes. Builds a row-major
//! adjacency once (the structural transpose) so that eliminating a row or
//! column can cheaply decrement the degree of every neighbor it touches,
//! the same CSC-to-CSR conversion idea `linalg/pardiso.rs` uses for a
//! different purpose.

use std::collections::VecDeque;

use problemo::Problem;

use crate::pattern::PatternRef;

/// Pre-ordering and remnant-degree output of the singleton finder.
#[derive(Debug, Clone)]
pub struct SingletonResult {
    pub n1c: usize,
    pub n1r: usize,
    pub n1: usize,
    pub nempty_col: usize,
    pub nempty_row: usize,
    pub is_sym: bool,
    pub max_rdeg: usize,
    /// Permutation of `0..ncol`: singletons first, empty columns last.
    pub cperm1: Vec<usize>,
    /// Permutation of `0..nrow`: singletons first, empty rows last.
    pub rperm1: Vec<usize>,
    pub inv_rperm1: Vec<usize>,
    /// Remaining degree of each column in the original index space, as of
    /// the end of singleton removal (0 for eliminated/empty columns).
    pub cdeg: Vec<usize>,
    /// Remaining degree of each row in the original index space.
    pub rdeg: Vec<usize>,
    /// Column degree each singleton pivot's column had at the moment of its
    /// own elimination (parallel to `cperm1[0..n1]`); used by the cost
    /// estimator's up-front singleton LU storage accounting.
    pub singleton_cdeg: Vec<usize>,
    /// Row degree each singleton pivot's row had at the moment of its own
    /// elimination (parallel to `rperm1[0..n1]`).
    pub singleton_rdeg: Vec<usize>,
}

struct Csr {
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
}

fn transpose(pattern: PatternRef) -> Csr {
    let nrow = pattern.nrows;
    let ncol = pattern.ncols;
    let mut row_ptr = vec![0usize; nrow + 1];
    for &i in pattern.row_idx {
        row_ptr[i + 1] += 1;
    }
    for i in 0..nrow {
        row_ptr[i + 1] += row_ptr[i];
    }
    let mut col_idx = vec![0usize; pattern.nnz()];
    let mut cursor = row_ptr.clone();
    for j in 0..ncol {
        for &i in pattern.col(j) {
            col_idx[cursor[i]] = j;
            cursor[i] += 1;
        }
    }
    Csr { row_ptr, col_idx }
}

/// Finds singletons. `quser`, if given, dictates the column scan order so
/// that only column singletons discovered in the caller's order are
/// honored; row singletons remain free to interleave in degree order.
pub fn find_singletons(
    pattern: PatternRef,
    quser: Option<&[usize]>,
    do_singletons: bool,
) -> Result<SingletonResult, Problem> {
    pattern.validate()?;

    let nrow = pattern.nrows;
    let ncol = pattern.ncols;

    let mut cdeg = vec![0usize; ncol];
    for j in 0..ncol {
        cdeg[j] = pattern.col(j).len();
    }
    let mut rdeg = vec![0usize; nrow];
    for &i in pattern.row_idx {
        rdeg[i] += 1;
    }

    let csr = transpose(pattern);

    let mut col_done = vec![false; ncol];
    let mut row_done = vec![false; nrow];

    let mut cperm1 = Vec::with_capacity(ncol);
    let mut rperm1 = Vec::with_capacity(nrow);

    // A pivot is classified as a column singleton if its column had
    // remaining degree 1 when eliminated, a row singleton if its row had
    // remaining degree 1, and both when the two conditions coincide (e.g.
    // every pivot of an identity matrix) -- `n1 = n1c + n1r` only when no
    // pivot is of the latter, "mutual", kind.
    let mut n1c_count = 0usize;
    let mut n1r_count = 0usize;
    let mut singleton_cdeg = Vec::new();
    let mut singleton_rdeg = Vec::new();

    if do_singletons {
        // Column singletons are queued in `quser`'s order when given (else
        // natural order), so that among several columns becoming eligible at
        // once, the caller's intended order decides which is taken first;
        // row singletons are free to interleave in whatever order their
        // degree drops to 1.
        let col_scan_order: Vec<usize> = match quser {
            Some(q) => q.to_vec(),
            None => (0..ncol).collect(),
        };
        let mut col_queue: VecDeque<usize> =
            col_scan_order.iter().copied().filter(|&j| cdeg[j] == 1).collect();
        let mut row_queue: VecDeque<usize> =
            (0..nrow).filter(|&r| rdeg[r] == 1).collect();

        loop {
            let mut progressed = false;

            while let Some(j) = col_queue.pop_front() {
                if col_done[j] || cdeg[j] != 1 {
                    continue;
                }
                let Some(row) = pattern.col(j).iter().copied().find(|&i| !row_done[i]) else {
                    cdeg[j] = 0;
                    continue;
                };
                cperm1.push(j);
                rperm1.push(row);
                col_done[j] = true;
                row_done[row] = true;
                progressed = true;
                n1c_count += 1;
                if rdeg[row] == 1 {
                    n1r_count += 1;
                }
                singleton_cdeg.push(1);
                singleton_rdeg.push(rdeg[row]);

                for &c in &csr.col_idx[csr.row_ptr[row]..csr.row_ptr[row + 1]] {
                    if !col_done[c] && cdeg[c] > 0 {
                        cdeg[c] -= 1;
                        if cdeg[c] == 1 {
                            col_queue.push_back(c);
                        }
                    }
                }
                for &r2 in pattern.col(j) {
                    if !row_done[r2] && rdeg[r2] > 0 {
                        rdeg[r2] -= 1;
                        if rdeg[r2] == 1 {
                            row_queue.push_back(r2);
                        }
                    }
                }
            }

            while let Some(row) = row_queue.pop_front() {
                if row_done[row] || rdeg[row] != 1 {
                    continue;
                }
                let Some(col) = csr.col_idx[csr.row_ptr[row]..csr.row_ptr[row + 1]]
                    .iter()
                    .copied()
                    .find(|&c| !col_done[c])
                else {
                    rdeg[row] = 0;
                    continue;
                };
                cperm1.push(col);
                rperm1.push(row);
                col_done[col] = true;
                row_done[row] = true;
                progressed = true;
                n1r_count += 1;
                if cdeg[col] == 1 {
                    n1c_count += 1;
                }
                singleton_cdeg.push(cdeg[col]);
                singleton_rdeg.push(1);

                for &c2 in &csr.col_idx[csr.row_ptr[row]..csr.row_ptr[row + 1]] {
                    if !col_done[c2] && cdeg[c2] > 0 {
                        cdeg[c2] -= 1;
                        if cdeg[c2] == 1 {
                            col_queue.push_back(c2);
                        }
                    }
                }
                for &r2 in pattern.col(col) {
                    if !row_done[r2] && rdeg[r2] > 0 {
                        rdeg[r2] -= 1;
                        if rdeg[r2] == 1 {
                            row_queue.push_back(r2);
                        }
                    }
                }
            }

            if !progressed {
                break;
            }
        }
    }

    let n1 = cperm1.len();
    let n1c = n1c_count;
    let n1r = n1r_count;

    // Remaining, non-empty columns/rows in natural order, then empties last.
    let mut rest_cols = Vec::with_capacity(ncol - cperm1.len());
    let mut empty_cols = Vec::new();
    for j in 0..ncol {
        if col_done[j] {
            continue;
        }
        if cdeg[j] == 0 {
            empty_cols.push(j);
        } else {
            rest_cols.push(j);
        }
    }
    let nempty_col = empty_cols.len();
    cperm1.extend(rest_cols);
    cperm1.extend(empty_cols);

    let mut rest_rows = Vec::with_capacity(nrow - rperm1.len());
    let mut empty_rows = Vec::new();
    for i in 0..nrow {
        if row_done[i] {
            continue;
        }
        if rdeg[i] == 0 {
            empty_rows.push(i);
        } else {
            rest_rows.push(i);
        }
    }
    let nempty_row = empty_rows.len();
    rperm1.extend(rest_rows);
    rperm1.extend(empty_rows);

    debug_assert_eq!(cperm1.len(), ncol);
    debug_assert_eq!(rperm1.len(), nrow);

    let inv_rperm1 = crate::perm::invert(&rperm1, nrow)?;

    let max_rdeg = rdeg.iter().copied().max().unwrap_or(0);

    let remaining_len = (nrow.saturating_sub(nempty_row)).min(ncol.saturating_sub(nempty_col));
    let is_sym = nrow == ncol
        && nempty_row == nempty_col
        && (n1..remaining_len).all(|k| cperm1[k] == rperm1[k]);

    Ok(SingletonResult {
        n1c,
        n1r,
        n1,
        nempty_col,
        nempty_row,
        is_sym,
        max_rdeg,
        cperm1,
        rperm1,
        inv_rperm1,
        cdeg,
        rdeg,
        singleton_cdeg,
        singleton_rdeg,
    })
}
