//! Frontal analyzer (component 4.6).
//!
//! Performs a column-elimination-tree analysis over the column-reordered
//! submatrix: for each node (pivot column) it derives a parent via "the
//! next column whose structure this column's elimination modifies" (a
//! single forward pass over each row's column occurrences), propagates
//! fill structure up the tree to get each column's true working row set,
//! amalgamates unbranched runs of the tree into fronts, and assigns every
//! original row to the front that claims it.
//!
//! `faer`'s COLAMD binding does not surface a preliminary front tree (see
//! `ordering::colamd`), so this analyzer always runs, regardless of which
//! ordering backend was used -- the "always re-run the frontal analyzer"
//! resolution of the corresponding Open Question.

use crate::prune::Submatrix;
use crate::singleton::SingletonResult;

#[derive(Debug, Clone)]
pub struct FrontTree {
    /// Number of real fronts; the dummy placeholder front has index `nfr`.
    pub nfr: usize,
    pub front_npivcol: Vec<usize>,
    pub front_nrows: Vec<usize>,
    pub front_ncols: Vec<usize>,
    /// Length `nfr + 1`; index `nfr` (the dummy front) always has `None`.
    pub front_parent: Vec<Option<usize>>,
    /// Length `nfr + 1`; first new-row index (post singleton block) the
    /// front owns. Index `nfr` marks where the trailing empty rows start.
    pub front_1strow: Vec<usize>,
    /// Length `nrow` (original index space): which front absorbs each
    /// original row. `None` for singleton rows, `Some(nfr)` for rows never
    /// claimed by any front.
    pub in_front: Vec<Option<usize>>,
    /// Length `nrows(S)`: `S`-local row indices in the new row order (rows
    /// claimed front by front, unclaimed rows trailing). The assembler maps
    /// this through `Rperm1` to build `Rperm_init`'s middle block.
    pub row_order_s: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct ChainList {
    pub nchains: usize,
    /// Length `nchains + 1`; `chain_start[nchains] == nfr`.
    pub chain_start: Vec<usize>,
}

fn compute_column_parent(n2: usize, col_ptr: &[usize], row_idx: &[usize], nrows: usize) -> Vec<Option<usize>> {
    let mut parent = vec![None; n2];
    let mut last_col_for_row: Vec<Option<usize>> = vec![None; nrows];
    for j in 0..n2 {
        for &r in &row_idx[col_ptr[j]..col_ptr[j + 1]] {
            if let Some(prev) = last_col_for_row[r] {
                parent[prev] = Some(parent[prev].map_or(j, |p| p.min(j)));
            }
            last_col_for_row[r] = Some(j);
        }
    }
    parent
}

/// Propagates each column's raw row structure up through the elimination
/// tree so `struct_rows[j]` reflects the true (fill-including) working row
/// set of the front rooted at column `j`, per the classic "column counts via
/// the elimination tree" construction.
fn propagate_fill(
    n2: usize,
    col_ptr: &[usize],
    row_idx: &[usize],
    parent: &[Option<usize>],
) -> Vec<Vec<usize>> {
    let mut struct_rows: Vec<Vec<usize>> = (0..n2)
        .map(|j| row_idx[col_ptr[j]..col_ptr[j + 1]].to_vec())
        .collect();
    for j in 0..n2 {
        if let Some(p) = parent[j] {
            let child: Vec<usize> = struct_rows[j].iter().copied().filter(|&r| r != j).collect();
            let merged = {
                let mut m = struct_rows[p].clone();
                m.extend(child);
                m.sort_unstable();
                m.dedup();
                m
            };
            struct_rows[p] = merged;
        }
    }
    struct_rows
}

/// Amalgamates columns into fronts: a column merges into its parent's front
/// whenever it is that parent's only child in the elimination tree (an
/// unbranched run becomes one front).
fn amalgamate(n2: usize, parent: &[Option<usize>]) -> (Vec<usize>, usize) {
    let mut child_count = vec![0usize; n2];
    for j in 0..n2 {
        if let Some(p) = parent[j] {
            child_count[p] += 1;
        }
    }

    let mut front_id = vec![usize::MAX; n2];
    let mut next_front = 0usize;
    for j in 0..n2 {
        if front_id[j] == usize::MAX {
            front_id[j] = next_front;
            next_front += 1;
        }
        if let Some(p) = parent[j] {
            if child_count[p] == 1 {
                front_id[p] = front_id[j];
            }
        }
    }
    (front_id, next_front)
}

/// Runs the frontal analysis over `S` ordered by the combined permutation
/// `cperm_init`'s middle block (i.e. `S`'s columns already sit in final
/// order). `singles` supplies `n1`/`nempty_row`/`rperm1` for mapping back to
/// original row indices.
pub fn analyze(s: &Submatrix, singles: &SingletonResult) -> (FrontTree, ChainList) {
    let n2 = s.ncols;
    let nrows_s = s.nrows;
    let n1 = singles.n1;

    if n2 == 0 {
        let front_tree = FrontTree {
            nfr: 0,
            front_npivcol: vec![0],
            front_nrows: vec![0],
            front_ncols: vec![0],
            front_parent: vec![None],
            front_1strow: vec![n1],
            in_front: build_in_front_for_empty(singles),
            row_order_s: Vec::new(),
        };
        return (front_tree, ChainList { nchains: 0, chain_start: vec![0] });
    }

    let parent = compute_column_parent(n2, &s.col_ptr, &s.row_idx, nrows_s);
    let struct_rows = propagate_fill(n2, &s.col_ptr, &s.row_idx, &parent);
    let (front_id, nfr) = amalgamate(n2, &parent);

    let mut front_npivcol = vec![0usize; nfr];
    for j in 0..n2 {
        front_npivcol[front_id[j]] += 1;
    }

    let mut front_parent = vec![None; nfr];
    for j in 0..n2 {
        let boundary = match parent[j] {
            None => true,
            Some(p) => {
                let mut cc = 0;
                for k in 0..n2 {
                    if parent[k] == Some(p) {
                        cc += 1;
                    }
                }
                cc != 1
            }
        };
        if boundary {
            front_parent[front_id[j]] = parent[j].map(|p| front_id[p]);
        }
    }

    // Claim rows front by front, in front order, using each front's tail
    // column's propagated (fill-including) row structure.
    let mut tail_of_front = vec![0usize; nfr];
    for j in 0..n2 {
        tail_of_front[front_id[j]] = j;
    }

    let mut claimed = vec![false; nrows_s];
    let mut front_nrows = vec![0usize; nfr];
    let mut row_owner_in_s = vec![None; nrows_s]; // front index, in S's row space
    let mut row_order_s = Vec::with_capacity(nrows_s);
    for f in 0..nfr {
        let tail = tail_of_front[f];
        let mut rows: Vec<usize> = struct_rows[tail].iter().copied().filter(|&r| !claimed[r]).collect();
        rows.sort_unstable();
        for &r in &rows {
            claimed[r] = true;
            row_owner_in_s[r] = Some(f);
            row_order_s.push(r);
        }
        front_nrows[f] = rows.len();
    }
    for r in 0..nrows_s {
        if !claimed[r] {
            row_order_s.push(r);
        }
    }

    let front_ncols = front_npivcol.clone();

    // Front_1strow: prefix sum of per-front row counts, offset by n1.
    let mut front_1strow = vec![0usize; nfr + 1];
    front_1strow[0] = n1;
    for f in 0..nfr {
        front_1strow[f + 1] = front_1strow[f] + front_nrows[f];
    }

    let dummy_nrows = nrows_s - claimed.iter().filter(|&&c| c).count();
    let front_parent_full: Vec<Option<usize>> =
        front_parent.iter().copied().chain(std::iter::once(None)).collect();
    let front_npivcol_full: Vec<usize> =
        front_npivcol.iter().copied().chain(std::iter::once(0usize)).collect();
    let front_nrows_full: Vec<usize> =
        front_nrows.iter().copied().chain(std::iter::once(dummy_nrows)).collect();
    let front_ncols_full: Vec<usize> =
        front_ncols.iter().copied().chain(std::iter::once(0usize)).collect();

    let in_front = build_in_front(singles, &row_owner_in_s, nfr);

    let front_tree = FrontTree {
        nfr,
        front_npivcol: front_npivcol_full,
        front_nrows: front_nrows_full,
        front_ncols: front_ncols_full,
        front_parent: front_parent_full,
        front_1strow,
        in_front,
        row_order_s,
    };

    let chain_start = compute_chains(&front_tree.front_parent, nfr);
    let nchains = chain_start.len() - 1;

    (front_tree, ChainList { nchains, chain_start })
}

fn build_in_front_for_empty(singles: &SingletonResult) -> Vec<Option<usize>> {
    let nrow = singles.rperm1.len();
    let mut in_front = vec![Some(0usize); nrow]; // nfr == 0 here, dummy front is index 0
    for k in 0..singles.n1 {
        in_front[singles.rperm1[k]] = None;
    }
    in_front
}

fn build_in_front(
    singles: &SingletonResult,
    row_owner_in_s: &[Option<usize>],
    nfr: usize,
) -> Vec<Option<usize>> {
    let nrow = singles.rperm1.len();
    let mut in_front = vec![Some(nfr); nrow]; // default: dummy front (unclaimed)
    for k in 0..singles.n1 {
        in_front[singles.rperm1[k]] = None;
    }
    for (s_row, &owner) in row_owner_in_s.iter().enumerate() {
        if let Some(f) = owner {
            let orig_row = singles.rperm1[singles.n1 + s_row];
            in_front[orig_row] = Some(f);
        }
    }
    in_front
}

/// Chain boundaries occur exactly where `Front_parent[i] != i + 1`.
fn compute_chains(front_parent: &[Option<usize>], nfr: usize) -> Vec<usize> {
    let mut chain_start = vec![0usize];
    for i in 0..nfr {
        if front_parent[i] != Some(i + 1) {
            chain_start.push(i + 1);
        }
    }
    if *chain_start.last().unwrap() != nfr {
        chain_start.push(nfr);
    }
    chain_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternRef;
    use crate::singleton::find_singletons;

    #[test]
    fn dense_3x3_forms_a_single_front() {
        let col_ptr = [0usize, 3, 6, 9];
        let row_idx = [0usize, 1, 2, 0, 1, 2, 0, 1, 2];
        let pattern = PatternRef::new(3, 3, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        let sub = crate::prune::prune(pattern, &singles);
        let (tree, chains) = analyze(&sub, &singles);
        assert_eq!(tree.nfr, 1);
        assert_eq!(tree.front_npivcol[0], 3);
        assert_eq!(chains.nchains, 1);
    }

    #[test]
    fn arrowhead_5x5_forms_a_single_front() {
        // column 0: full; columns 1..4: {0, j}
        let col_ptr = [0usize, 5, 7, 9, 11, 13];
        let row_idx = [0usize, 1, 2, 3, 4, 0, 1, 0, 2, 0, 3, 0, 4];
        let pattern = PatternRef::new(5, 5, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        assert_eq!(singles.n1, 0);
        let sub = crate::prune::prune(pattern, &singles);
        let (tree, _chains) = analyze(&sub, &singles);
        assert_eq!(tree.nfr, 1);
        assert_eq!(tree.front_npivcol[0], 5);
    }

    #[test]
    fn every_non_root_front_parent_exceeds_its_index() {
        let col_ptr = [0usize, 5, 7, 9, 11, 13];
        let row_idx = [0usize, 1, 2, 3, 4, 0, 1, 0, 2, 0, 3, 0, 4];
        let pattern = PatternRef::new(5, 5, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        let sub = crate::prune::prune(pattern, &singles);
        let (tree, _) = analyze(&sub, &singles);
        for i in 0..tree.nfr {
            if let Some(p) = tree.front_parent[i] {
                assert!(p > i);
            }
        }
        assert_eq!(tree.front_parent[tree.nfr], None);
    }

    #[test]
    fn empty_submatrix_produces_no_real_fronts() {
        let sub = Submatrix { nrows: 0, ncols: 0, col_ptr: vec![0], row_idx: vec![] };
        let col_ptr = [0usize, 0, 0, 0];
        let row_idx: [usize; 0] = [];
        let pattern = PatternRef::new(3, 3, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        let (tree, chains) = analyze(&sub, &singles);
        assert_eq!(tree.nfr, 0);
        assert_eq!(chains.nchains, 0);
    }
}
