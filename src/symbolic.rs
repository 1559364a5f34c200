//! Symbolic assembler (component 4.8) and the public entry points.
//!
//! Marshals the output of every earlier component into a persistent
//! `SymbolicObject`, computing the two pieces of derived state the earlier
//! components don't produce on their own: `Front_leftmostdesc` (a forward
//! propagation over the front tree, mirroring the fill-propagation pass in
//! `frontal.rs`) and `Diagonal_map` (built whenever `prefer_diagonal` or the
//! parallel-solver hand-off is requested -- per the open-question
//! resolution, unconditionally on that pair, not just when `prefer_diagonal`
//! alone is set).

use problemo::Problem;

use crate::control::{Control, OrderingChoice, Strategy};
use crate::cost::{self, CostEstimate};
use crate::error::SymbolicError;
use crate::frontal::{self, ChainList, FrontTree};
use crate::info::Info;
use crate::ordering::{self, user::UserOrdering};
use crate::pattern::PatternRef;
use crate::perm;
use crate::prune::{self, Submatrix};
use crate::singleton::{self, SingletonResult};
use crate::strategy::{self, ResolvedStrategy};
use crate::symmetry;
use crate::workspace::AnalysisWorkspace;

#[derive(Debug, Clone)]
pub struct SymbolicObject {
    pub n_row: usize,
    pub n_col: usize,
    pub nz: usize,

    pub cperm_init: Vec<usize>,
    pub rperm_init: Vec<usize>,
    pub cdeg: Vec<usize>,
    pub rdeg: Vec<usize>,

    pub front_tree: FrontTree,
    pub chain_list: ChainList,
    pub front_leftmostdesc: Vec<usize>,

    pub diagonal_map: Option<Vec<usize>>,
    pub esize: Option<Vec<usize>>,

    pub amd_lunz: f64,
    pub amd_dmax: f64,
    pub num_mem_size_est: f64,
    pub num_mem_usage_est: f64,
    pub lunz_bound: usize,
    pub maxnrows: usize,
    pub maxncols: usize,

    pub strategy: ResolvedStrategy,
    pub fix_q: bool,
    pub prefer_diagonal: bool,
    pub ordering: OrderingChoice,

    pub nempty: usize,
    pub n1: usize,
    pub n1r: usize,
    pub n1c: usize,
}

/// Smallest index in each front's subtree, via a single forward pass:
/// `leftmostdesc[f]` starts at `f` and is pulled down by every descendant
/// processed before it (children always have a smaller index than their
/// parent, so one increasing-order pass suffices).
fn compute_leftmostdesc(front_parent: &[Option<usize>], nfr: usize) -> Vec<usize> {
    let mut leftmostdesc: Vec<usize> = (0..=nfr).collect();
    for f in 0..nfr {
        if let Some(p) = front_parent[f] {
            if leftmostdesc[f] < leftmostdesc[p] {
                leftmostdesc[p] = leftmostdesc[f];
            }
        }
    }
    leftmostdesc
}

/// `Diagonal_map[newcol] = Rperm_init⁻¹[Cperm_init[newcol]]`, i.e. the new
/// row index the original diagonal entry of column `Cperm_init[newcol]`
/// lands on after both permutations.
fn compute_diagonal_map(cperm_init: &[usize], rperm_init_inv: &[usize]) -> Vec<usize> {
    cperm_init.iter().map(|&orig_col| rperm_init_inv[orig_col]).collect()
}

struct AnalysisOutcome {
    symbolic: SymbolicObject,
    info: Info,
    workspace: AnalysisWorkspace,
}

fn run_analysis(
    n_row: usize,
    n_col: usize,
    col_ptr: &[usize],
    row_idx: &[usize],
    values: Option<&[f64]>,
    quser: Option<&[usize]>,
    user_ordering: Option<&UserOrdering>,
    control: &Control,
    for_paru: bool,
) -> Result<AnalysisOutcome, Problem> {
    if n_row == 0 || n_col == 0 {
        return Err(SymbolicError::NonPositiveDimension.into());
    }
    if let Some(q) = quser {
        if !perm::is_permutation(q, n_col) {
            return Err(SymbolicError::InvalidPermutation.into());
        }
    }

    let pattern = PatternRef::new(n_row, n_col, col_ptr, row_idx);
    let nz = pattern.validate().map(|_| pattern.nnz())?;

    let singles = singleton::find_singletons(pattern, quser, control.do_singletons)?;
    let sub = prune::prune(pattern, &singles);
    let nzdiag = values.map(|v| prune::count_nzdiag(pattern, v, &singles, &sub)).unwrap_or(0);

    let rectangular = n_row != n_col;
    let square_reduced = sub.nrows == sub.ncols;

    let sym_info = if !rectangular && square_reduced && control.strategy != Strategy::Unsymmetric {
        Some(symmetry::analyze(&sub))
    } else {
        None
    };
    let sym_ratio = sym_info.as_ref().map(|i| i.sym_ratio).unwrap_or(0.0);

    let decision = strategy::select(
        control,
        rectangular,
        quser.is_some(),
        singles.is_sym,
        sym_ratio,
        nzdiag,
        sub.ncols,
    );
    let symmetric_mode = decision.strategy == ResolvedStrategy::Symmetric;

    let (qinv_s, ordering_stats, ordering_used) = if control.ordering == OrderingChoice::Given {
        // `Given` is resolved by the driver, not dispatched: the singleton
        // finder's column-scan order already honored `Quser`, so `S`'s
        // columns sit in that relative order already.
        ((0..sub.ncols).collect(), ordering::OrderingStats::default(), OrderingChoice::Given)
    } else {
        let (qinv, stats) = ordering::dispatch(
            control.ordering,
            symmetric_mode,
            &sub,
            sym_info.as_ref(),
            control,
            user_ordering,
        )?;
        (qinv, stats, control.ordering)
    };

    let cperm_init =
        ordering::combine_ordering(singles.n1, singles.nempty_col, &singles.cperm1, &qinv_s)?;

    let (front_tree, chain_list) = frontal::analyze(&sub, &singles);

    let rperm_init: Vec<usize> = singles.rperm1[0..singles.n1]
        .iter()
        .copied()
        .chain(front_tree.row_order_s.iter().map(|&s_row| singles.rperm1[singles.n1 + s_row]))
        .chain(singles.rperm1[singles.n1 + sub.nrows..n_row].iter().copied())
        .collect();
    debug_assert!(perm::is_permutation(&rperm_init, n_row));

    let leftmostdesc = compute_leftmostdesc(&front_tree.front_parent, front_tree.nfr);

    let rperm_init_inv = perm::invert(&rperm_init, n_row)?;
    // A diagonal only exists for a square matrix; `prefer_diagonal`/`for_paru`
    // never fire together with `rectangular` in practice (both strategy
    // branches that set `prefer_diagonal` require a square reduced block),
    // but `for_paru` is caller-controlled, so guard explicitly rather than
    // index `Rperm_init_inv` (length `n_row`) with a column index that could
    // run past it when `n_col > n_row`.
    let needs_diagonal_map = (decision.prefer_diagonal || for_paru) && n_row == n_col;
    let diagonal_map =
        if needs_diagonal_map { Some(compute_diagonal_map(&cperm_init, &rperm_init_inv)) } else { None };

    let cost: CostEstimate = cost::estimate(&front_tree, &chain_list, &singles, control);

    let cdeg: Vec<usize> = cperm_init.iter().map(|&c| singles.cdeg[c]).collect();
    let rdeg: Vec<usize> = rperm_init.iter().map(|&r| singles.rdeg[r]).collect();

    let nempty = singles.nempty_col.max(singles.nempty_row);

    let symbolic = SymbolicObject {
        n_row,
        n_col,
        nz,
        cperm_init,
        rperm_init,
        cdeg,
        rdeg,
        front_tree: front_tree.clone(),
        chain_list: chain_list.clone(),
        front_leftmostdesc: leftmostdesc,
        diagonal_map,
        esize: None,
        amd_lunz: ordering_stats.lnz,
        amd_dmax: ordering_stats.dmax,
        num_mem_size_est: cost.num_mem_size_est as f64,
        num_mem_usage_est: cost.num_mem_usage_est as f64,
        lunz_bound: cost.lunz_bound,
        maxnrows: cost.maxnrows,
        maxncols: cost.maxncols,
        strategy: decision.strategy,
        fix_q: decision.fix_q,
        prefer_diagonal: decision.prefer_diagonal,
        ordering: ordering_used,
        nempty,
        n1: singles.n1,
        n1r: singles.n1r,
        n1c: singles.n1c,
    };

    let info = Info {
        n_row,
        n_col,
        nz,
        strategy_used: match decision.strategy {
            ResolvedStrategy::Symmetric => Strategy::Symmetric,
            ResolvedStrategy::Unsymmetric => Strategy::Unsymmetric,
        },
        ordering_used,
        n1: singles.n1,
        n1r: singles.n1r,
        n1c: singles.n1c,
        nempty_row: singles.nempty_row,
        nempty_col: singles.nempty_col,
        n_dense_row: 0,
        n_dense_col: 0,
        sym_ratio,
        nzaat: sym_info.as_ref().map(|i| i.nzaat).unwrap_or(0),
        nzdiag,
        symmetric_lunz: ordering_stats.lnz,
        symmetric_flops: ordering_stats.flops,
        symmetric_dmax: ordering_stats.dmax,
        symmetric_ndense: 0,
        lunz_bound: cost.lunz_bound as f64,
        num_mem_size_est: cost.num_mem_size_est as f64,
        num_mem_usage_est: cost.num_mem_usage_est as f64,
        max_front_size: cost.dmaxfrsize,
        symbolic_walltime_secs: 0.0,
        symbolic_cputime_secs: 0.0,
    };

    let workspace = AnalysisWorkspace {
        si: sub.row_idx.clone(),
        sp: sub.col_ptr.clone(),
        ci: Vec::new(),
        cperm1: singles.cperm1.clone(),
        rperm1: singles.rperm1.clone(),
        inv_rperm1: singles.inv_rperm1.clone(),
        in_front: front_tree.in_front.clone(),
        front_npivcol: front_tree.front_npivcol.clone(),
        front_nrows: front_tree.front_nrows.clone(),
        front_ncols: front_tree.front_ncols.clone(),
        front_parent: front_tree.front_parent.clone(),
        front_cols: Vec::new(),
        rs: None,
    };

    Ok(AnalysisOutcome { symbolic, info, workspace })
}

/// Default analysis path: `Control::ordering` (or `Given`, if `quser` is
/// supplied and the control says so) picks the fill-reducing ordering.
pub fn symbolic(
    n_row: usize,
    n_col: usize,
    col_ptr: &[usize],
    row_idx: &[usize],
    values: Option<&[f64]>,
    quser: Option<&[usize]>,
    control: &Control,
) -> Result<(SymbolicObject, Info), Problem> {
    let outcome = run_analysis(n_row, n_col, col_ptr, row_idx, values, quser, None, control, false)?;
    Ok((outcome.symbolic, outcome.info))
}

/// Same as `symbolic`, but with a caller-supplied ordering callback.
pub fn fsymbolic(
    n_row: usize,
    n_col: usize,
    col_ptr: &[usize],
    row_idx: &[usize],
    values: Option<&[f64]>,
    quser: Option<&[usize]>,
    user_ordering: &UserOrdering,
    control: &Control,
) -> Result<(SymbolicObject, Info), Problem> {
    let outcome = run_analysis(
        n_row,
        n_col,
        col_ptr,
        row_idx,
        values,
        quser,
        Some(user_ordering),
        control,
        false,
    )?;
    Ok((outcome.symbolic, outcome.info))
}

/// Same as `symbolic`/`fsymbolic`, but additionally hands the transient
/// `AnalysisWorkspace` to the caller for a later parallel numeric phase.
/// `Diagonal_map` is always built on this path, regardless of
/// `prefer_diagonal`, since a parallel numeric phase needs it to locate
/// diagonal entries independently of whichever strategy was chosen.
pub fn paru_symbolic(
    n_row: usize,
    n_col: usize,
    col_ptr: &[usize],
    row_idx: &[usize],
    values: Option<&[f64]>,
    quser: Option<&[usize]>,
    user_ordering: Option<&UserOrdering>,
    control: &Control,
) -> Result<(SymbolicObject, AnalysisWorkspace, Info), Problem> {
    let outcome =
        run_analysis(n_row, n_col, col_ptr, row_idx, values, quser, user_ordering, control, true)?;
    Ok((outcome.symbolic, outcome.workspace, outcome.info))
}

/// Releases a persistent symbolic object. `Drop` already frees every owned
/// array; this exists only to give the original's explicit free operation a
/// named counterpart.
pub fn free_symbolic(_handle: SymbolicObject) {}

/// Releases a transferred workspace object.
pub fn free_workspace(_handle: AnalysisWorkspace) {}
