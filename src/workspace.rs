//! `AnalysisWorkspace` (SW): transient scratch owned by the analysis
//! routine unless handed off to the caller for a parallel numeric phase.
//!
//! The original repurposes a single scratch array `Ci` for several logical
//! roles during analysis and frees members one at a time at checkpoints.
//! Here every role gets its own named, owned `Vec`, and `Drop` discharges
//! the "free everything on any path" requirement structurally: there is
//! nothing to do by hand.

/// Per-front scratch accumulated by the frontal analyzer, kept around in
/// case a parallel numeric phase wants it (the `paru_symbolic` hand-off
/// path).
#[derive(Debug, Clone, Default)]
pub struct AnalysisWorkspace {
    pub si: Vec<usize>,
    pub sp: Vec<usize>,
    pub ci: Vec<usize>,
    pub cperm1: Vec<usize>,
    pub rperm1: Vec<usize>,
    pub inv_rperm1: Vec<usize>,
    pub in_front: Vec<Option<usize>>,
    pub front_npivcol: Vec<usize>,
    pub front_nrows: Vec<usize>,
    pub front_ncols: Vec<usize>,
    pub front_parent: Vec<Option<usize>>,
    pub front_cols: Vec<Vec<usize>>,
    /// Unused during analysis; reserved for the parallel numeric phase.
    pub rs: Option<Vec<f64>>,
}

impl AnalysisWorkspace {
    /// Releases the parts no longer needed once the submatrix has been
    /// pruned and ordered (`Si`, `Sp`, `Cperm1`), matching the "partly
    /// released at mid-flow" lifecycle in the design. Front-tree fields
    /// survive until the end (or the hand-off).
    pub fn release_prune_scratch(&mut self) {
        self.si = Vec::new();
        self.sp = Vec::new();
        self.cperm1 = Vec::new();
    }
}
