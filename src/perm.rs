//! Permutation validation and inversion, shared by every component that
//! produces or consumes a `Permutation` (singleton finder, ordering
//! adapters, the combined `Cperm_init`/`Rperm_init`).

use problemo::Problem;

use crate::error::SymbolicError;

/// Returns the inverse of `p` (a permutation of `0..n`), or `None` if `p` is
/// not a bijection of `0..n`.
pub fn try_invert(p: &[usize], n: usize) -> Option<Vec<usize>> {
    if p.len() != n {
        return None;
    }
    let mut seen = vec![false; n];
    let mut inv = vec![0usize; n];
    for (k, &i) in p.iter().enumerate() {
        if i >= n || seen[i] {
            return None;
        }
        seen[i] = true;
        inv[i] = k;
    }
    Some(inv)
}

/// Same as `try_invert`, but converts absence of a valid permutation into the
/// crate's `InvalidPermutation` error.
pub fn invert(p: &[usize], n: usize) -> Result<Vec<usize>, Problem> {
    Ok(try_invert(p, n).ok_or(SymbolicError::InvalidPermutation)?)
}

/// Checks that `p` is a bijection of `0..n` without constructing the
/// inverse.
pub fn is_permutation(p: &[usize], n: usize) -> bool {
    try_invert(p, n).is_some()
}
