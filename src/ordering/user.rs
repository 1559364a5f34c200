//! User-callback ordering backend: `user_ordering(nrow, ncol, sym_flag, Ap,
//! Ai, out_P, user_params, out_info[3])` returning truthy on success, with
//! `user_info` optionally reporting `{dmax, lnz, flops}`.

use problemo::Problem;

use crate::control::Control;
use crate::error::SymbolicError;
use crate::ordering::OrderingStats;
use crate::prune::Submatrix;

/// `user_params` is opaque to this crate; it is threaded straight through to
/// the callback, the way `fsymbolic`/`paru_symbolic` pass it along in the
/// original.
pub struct UserOrdering {
    pub callback:
        Box<dyn Fn(&Submatrix, bool, &[u8]) -> Option<(Vec<usize>, Option<UserOrderingInfo>)>>,
    pub user_params: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserOrderingInfo {
    pub dmax: f64,
    pub lnz: f64,
    pub flops: f64,
}

pub fn order_via_callback(
    cb: &UserOrdering,
    s: &Submatrix,
    symmetric_mode: bool,
    _control: &Control,
) -> Result<(Vec<usize>, OrderingStats), Problem> {
    let Some((qinv, info)) = (cb.callback)(s, symmetric_mode, &cb.user_params) else {
        return Err(SymbolicError::OrderingFailed {
            message: "user ordering callback returned failure".into(),
        }
        .into());
    };

    if !crate::perm::is_permutation(&qinv, s.ncols) {
        return Err(SymbolicError::OrderingFailed {
            message: "user ordering callback returned an invalid permutation".into(),
        }
        .into());
    }

    let stats = info
        .map(|i| OrderingStats { dmax: i.dmax, lnz: i.lnz, flops: i.flops, preliminary_fronts: None })
        .unwrap_or_default();

    Ok((qinv, stats))
}
