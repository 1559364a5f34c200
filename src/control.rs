//! Control knobs for the symbolic analysis phase.
//!
//! Replaces the original's sparse-indexed `double Control[]` vector with a
//! plain struct. The teacher's `macros::build_options!` registry is built for
//! a much larger, multi-algorithm options surface (LP/NLP/QP solver knobs);
//! this phase has a dozen knobs with fixed types, so a flat struct with a
//! `Default` impl is the idiomatic fit.

use serde::{Deserialize, Serialize};

/// Which overall strategy to use for ordering and the frontal analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Choose based on shape, symmetry ratio, and diagonal density.
    #[default]
    Auto,
    Unsymmetric,
    Symmetric,
}

/// Which ordering backend to use. Out-of-range values in the original map to
/// `Auto`-like defaults; here an unrecognized external encoding simply fails
/// to parse rather than being silently coerced, since the enum is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderingChoice {
    Amd,
    #[default]
    Given,
    Cholmod,
    Metis,
    None,
    Best,
    User,
    MetisGuard,
}

/// Override for `fixQ`, applied after the strategy table has made its own
/// choice (see `strategy::select`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FixQ {
    #[default]
    Auto,
    Force(bool),
}

/// Maximum permitted block size for the numeric phase's frontal working
/// array; `block_size` is clamped into `[2, MAXNB]` and rounded up to even.
pub const MAXNB: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub strategy: Strategy,
    pub ordering: OrderingChoice,
    pub do_singletons: bool,
    pub force_fixq: FixQ,
    pub dense_row: f64,
    pub dense_col: f64,
    pub amd_dense: f64,
    pub block_size: usize,
    pub aggressive: bool,
    pub print_level: i32,
    pub strategy_thresh_sym: f64,
    pub strategy_thresh_nnzdiag: f64,
}

impl Default for Control {
    fn default() -> Self {
        Control {
            strategy: Strategy::Auto,
            ordering: OrderingChoice::Amd,
            do_singletons: true,
            force_fixq: FixQ::Auto,
            dense_row: 10.0,
            dense_col: 10.0,
            amd_dense: 10.0,
            block_size: 32,
            aggressive: true,
            print_level: 1,
            strategy_thresh_sym: 0.5,
            strategy_thresh_nnzdiag: 0.9,
        }
    }
}

impl Control {
    /// Degree cutoff above which a row/column of dimension `n` is "dense"
    /// and compressed/ignored by ordering and frontal packing. Shared by
    /// COLAMD's dense-row/col knobs and the METIS_GUARD threshold.
    pub fn dense_degree_threshold(alpha: f64, n: usize) -> usize {
        (16.0_f64).max(alpha * (n as f64).sqrt()).floor() as usize
    }

    /// `block_size` clamped to `[2, MAXNB]` and rounded up to an even number.
    pub fn normalized_block_size(&self) -> usize {
        let nb = self.block_size.clamp(2, MAXNB);
        if nb % 2 == 1 { nb + 1 } else { nb }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_match_spec() {
        let c = Control::default();
        assert_eq!(c.strategy_thresh_sym, 0.5);
        assert_eq!(c.strategy_thresh_nnzdiag, 0.9);
    }

    #[test]
    fn block_size_clamped_and_even() {
        let mut c = Control::default();
        c.block_size = 1;
        assert_eq!(c.normalized_block_size(), 2);
        c.block_size = 3;
        assert_eq!(c.normalized_block_size(), 4);
        c.block_size = 1000;
        assert_eq!(c.normalized_block_size(), MAXNB);
    }

    #[test]
    fn dense_threshold_has_floor_of_16() {
        assert_eq!(Control::dense_degree_threshold(10.0, 1), 16);
        assert_eq!(Control::dense_degree_threshold(10.0, 100), 100);
    }
}
