//! Statistics returned alongside a `SymbolicObject`, replacing the original's
//! fixed-width `double Info[]` vector with named fields.

use crate::control::{OrderingChoice, Strategy};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub n_row: usize,
    pub n_col: usize,
    pub nz: usize,

    pub strategy_used: Strategy,
    pub ordering_used: OrderingChoice,

    pub n1: usize,
    pub n1r: usize,
    pub n1c: usize,
    pub nempty_row: usize,
    pub nempty_col: usize,

    pub n_dense_row: usize,
    pub n_dense_col: usize,

    pub sym_ratio: f64,
    pub nzaat: usize,
    pub nzdiag: usize,

    pub symmetric_lunz: f64,
    pub symmetric_flops: f64,
    pub symmetric_dmax: f64,
    pub symmetric_ndense: usize,

    pub lunz_bound: f64,
    pub num_mem_size_est: f64,
    pub num_mem_usage_est: f64,
    pub max_front_size: usize,

    pub symbolic_walltime_secs: f64,
    pub symbolic_cputime_secs: f64,
}
