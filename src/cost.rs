//! Cost estimator (component 4.7).
//!
//! Walks the front tree chain by chain and simulates, without ever touching
//! a numeric value, the flop count and nonzero/memory bounds the numeric
//! phase would need. All figures are canonical upper bounds: no numerical
//! cancellation is assumed to reduce work.
//!
//! A front is modeled here as `fpiv` pivots plus a square `r x r`
//! contribution block; this crate's column-oriented frontal analyzer does
//! not track a front's "extra contribution columns" independently of its
//! rows (see `frontal.rs`), so `c` is taken equal to `r` -- a documented
//! simplification, not a literal transcription of a column/row-asymmetric
//! model.

use crate::control::Control;
use crate::frontal::{ChainList, FrontTree};
use crate::singleton::SingletonResult;

/// Per-flop weights: a division costs `DIV` flops, a fused multiply-subtract
/// costs `MULTSUB` flops.
const DIV: f64 = 1.0;
const MULTSUB: f64 = 2.0;

const ENTRY_BYTES: usize = std::mem::size_of::<f64>();
const INT_BYTES: usize = std::mem::size_of::<usize>();
/// Allocator unit size, matching the original's `DUNITS`/`UNITS` macros: one
/// unit holds one `Entry`'s worth of bytes.
const UNIT_BYTES: usize = ENTRY_BYTES;

fn dunits(elem_bytes: usize, count: usize) -> usize {
    (count * elem_bytes).div_ceil(UNIT_BYTES)
}

/// Header-plus-data footprint of a dense frontal contribution block of `r`
/// rows by `c` columns: the dense entries plus one index slot per row and
/// column plus a small fixed header.
fn element_size(r: usize, c: usize) -> usize {
    r * c + r + c + 1
}

fn round_up_odd(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

#[derive(Debug, Clone, Default)]
pub struct CostEstimate {
    pub flops: f64,
    pub lunz_bound: usize,
    pub maxnrows: usize,
    pub maxncols: usize,
    pub dmaxfrsize: usize,
    pub num_mem_init_usage: usize,
    pub num_mem_usage_est: usize,
    pub num_mem_size_est: usize,
    pub chain_maxrows: Vec<usize>,
    pub chain_maxcols: Vec<usize>,
}

/// Simulates the numeric phase over `tree`/`chains` to produce upper-bound
/// cost figures. `n1` singleton pivots are charged up front from the degree
/// each singleton's row/column had at the moment of its own elimination.
pub fn estimate(
    tree: &FrontTree,
    chains: &ChainList,
    singles: &SingletonResult,
    control: &Control,
) -> CostEstimate {
    let nb = control.normalized_block_size();

    let mut lunz_bound = 0usize;
    let mut flops = 0.0f64;

    // Singleton LU storage: each singleton pivot contributes its own
    // diagonal entry plus (cdeg-1) L fill and (rdeg-1) U fill in its row
    // and column of the reduced matrix.
    for k in 0..singles.n1 {
        lunz_bound += singles.singleton_cdeg[k] + singles.singleton_rdeg[k] - 1;
    }
    let singleton_init_usage = dunits(ENTRY_BYTES, lunz_bound) + dunits(INT_BYTES, 2 * singles.n1);

    let mut maxnrows = 0usize;
    let mut maxncols = 0usize;
    let mut chain_maxrows = Vec::with_capacity(chains.nchains);
    let mut chain_maxcols = Vec::with_capacity(chains.nchains);

    let mut head = 0usize; // persistent L/U factor storage, monotonically grows
    let mut tail_peak = 0usize;
    let mut num_mem_usage_est = 0usize;

    for ci in 0..chains.nchains {
        let start = chains.chain_start[ci];
        let end = chains.chain_start[ci + 1];

        let mut tail = 0usize;
        let mut chain_max_r = 0usize;
        let mut chain_max_c = 0usize;

        for i in start..end {
            let npivcol = tree.front_npivcol[i];
            let totrows = tree.front_nrows[i];
            let totcols = tree.front_ncols[i].max(npivcol);

            let f = npivcol.min(totrows.max(npivcol));
            let r = totrows.saturating_sub(f);
            let c = r.max(totcols.saturating_sub(f));

            let ff = f as f64;
            let rf = r as f64;
            let cf = c as f64;

            flops += DIV * (ff * rf + (ff - 1.0).max(0.0) * ff / 2.0)
                + MULTSUB
                    * (ff * rf * cf
                        + (rf + cf) * (ff - 1.0).max(0.0) * ff / 2.0
                        + (ff - 1.0).max(0.0) * ff * (2.0 * ff - 1.0).max(0.0) / 6.0);

            let dlf = (f * f).saturating_sub(f) / 2 + f * r;
            let duf = (f * f).saturating_sub(f) / 2 + f * c;
            lunz_bound += dlf + duf + f;

            head += dunits(ENTRY_BYTES, dlf + duf) + dunits(INT_BYTES, r + c + f);

            // This front's own contribution block is pushed onto the tail
            // when it has a parent (a non-root creates a contribution
            // block its parent will later assemble).
            if tree.front_parent[i].is_some() {
                tail += element_size(r, c);
            }
            tail_peak = tail_peak.max(head + tail);

            chain_max_r = chain_max_r.max(totrows);
            chain_max_c = chain_max_c.max(totcols);
        }

        // Between chains, reserve the nb-padded active frontal working
        // array: dr*dc + nb*dc + dr*nb + nb^2, approximated here with a flat
        // nb^2 reserve since dr/dc rounding remainders are not tracked
        // independently of nb in this model.
        num_mem_usage_est = num_mem_usage_est.max(head + tail_peak + nb * nb);

        let chain_max_r_odd = round_up_odd(chain_max_r);
        maxnrows = maxnrows.max(chain_max_r_odd);
        maxncols = maxncols.max(chain_max_c);
        chain_maxrows.push(chain_max_r_odd);
        chain_maxcols.push(chain_max_c);
    }

    let dmaxfrsize = chain_maxrows
        .iter()
        .zip(chain_maxcols.iter())
        .map(|(&r, &c)| r * c)
        .max()
        .unwrap_or(0);

    // Initial tuples + row-pointer arrays + dense-row compressions + front
    // headers, on top of the singleton storage computed above.
    let row_ptr_usage = dunits(INT_BYTES, tree.in_front.len() + 1);
    let front_header_usage = dunits(INT_BYTES, 4 * (tree.nfr + 1));
    let num_mem_init_usage = singleton_init_usage + row_ptr_usage + front_header_usage;

    let num_mem_usage_est = num_mem_usage_est.max(num_mem_init_usage);
    let num_mem_size_est = num_mem_usage_est;

    CostEstimate {
        flops,
        lunz_bound,
        maxnrows,
        maxncols,
        dmaxfrsize,
        num_mem_init_usage,
        num_mem_usage_est,
        num_mem_size_est,
        chain_maxrows,
        chain_maxcols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Control;
    use crate::pattern::PatternRef;
    use crate::singleton::find_singletons;

    #[test]
    fn identity_4x4_lunz_bound_is_four() {
        let col_ptr = [0usize, 1, 2, 3, 4];
        let row_idx = [0usize, 1, 2, 3];
        let pattern = PatternRef::new(4, 4, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        let sub = crate::prune::prune(pattern, &singles);
        let (tree, chains) = crate::frontal::analyze(&sub, &singles);
        let control = Control::default();
        let est = estimate(&tree, &chains, &singles, &control);
        assert_eq!(est.lunz_bound, 4);
    }

    #[test]
    fn empty_matrix_has_positive_header_only_usage() {
        let col_ptr = [0usize, 0, 0, 0];
        let row_idx: [usize; 0] = [];
        let pattern = PatternRef::new(3, 3, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        let sub = crate::prune::prune(pattern, &singles);
        let (tree, chains) = crate::frontal::analyze(&sub, &singles);
        let control = Control::default();
        let est = estimate(&tree, &chains, &singles, &control);
        assert_eq!(est.lunz_bound, 0);
        assert!(est.num_mem_usage_est > 0);
    }

    #[test]
    fn dense_3x3_chain_maxrows_is_odd() {
        let col_ptr = [0usize, 3, 6, 9];
        let row_idx = [0usize, 1, 2, 0, 1, 2, 0, 1, 2];
        let pattern = PatternRef::new(3, 3, &col_ptr, &row_idx);
        let singles = find_singletons(pattern, None, true).unwrap();
        let sub = crate::prune::prune(pattern, &singles);
        let (tree, chains) = crate::frontal::analyze(&sub, &singles);
        let control = Control::default();
        let est = estimate(&tree, &chains, &singles, &control);
        assert_eq!(est.chain_maxrows.len(), 1);
        assert_eq!(est.chain_maxrows[0] % 2, 1);
    }

    #[test]
    fn doubling_n_at_least_doubles_lunz_bound() {
        let n_small = 4usize;
        let col_ptr_small: Vec<usize> = (0..=n_small * n_small).step_by(n_small).collect();
        let row_idx_small: Vec<usize> =
            (0..n_small).flat_map(|_| 0..n_small).collect();
        let pattern_small = PatternRef::new(n_small, n_small, &col_ptr_small, &row_idx_small);
        let singles_small = find_singletons(pattern_small, None, true).unwrap();
        let sub_small = crate::prune::prune(pattern_small, &singles_small);
        let (tree_small, chains_small) = crate::frontal::analyze(&sub_small, &singles_small);
        let control = Control::default();
        let est_small = estimate(&tree_small, &chains_small, &singles_small, &control);

        let n_big = 8usize;
        let col_ptr_big: Vec<usize> = (0..=n_big * n_big).step_by(n_big).collect();
        let row_idx_big: Vec<usize> = (0..n_big).flat_map(|_| 0..n_big).collect();
        let pattern_big = PatternRef::new(n_big, n_big, &col_ptr_big, &row_idx_big);
        let singles_big = find_singletons(pattern_big, None, true).unwrap();
        let sub_big = crate::prune::prune(pattern_big, &singles_big);
        let (tree_big, chains_big) = crate::frontal::analyze(&sub_big, &singles_big);
        let est_big = estimate(&tree_big, &chains_big, &singles_big, &control);

        assert!(est_big.lunz_bound >= 2 * est_small.lunz_bound);
    }
}
