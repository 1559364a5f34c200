//! `OrderingChoice::None`: no reordering, `P = 0..ncols`. Used directly and
//! as the `MetisGuard` fallback for an empty reduced pattern.

use problemo::Problem;

use crate::control::Control;
use crate::ordering::{OrderingBackend, OrderingStats};
use crate::prune::Submatrix;
use crate::symmetry::SymmetryInfo;

pub struct IdentityOrder;

impl OrderingBackend for IdentityOrder {
    fn order(
        &self,
        s: &Submatrix,
        _sym: Option<&SymmetryInfo>,
        _control: &Control,
    ) -> Result<(Vec<usize>, OrderingStats), Problem> {
        Ok(((0..s.ncols).collect(), OrderingStats::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_order_is_the_identity_permutation() {
        let s = Submatrix { nrows: 3, ncols: 3, col_ptr: vec![0, 0, 0, 0], row_idx: vec![] };
        let control = Control::default();
        let (qinv, _) = IdentityOrder.order(&s, None, &control).unwrap();
        assert_eq!(qinv, vec![0, 1, 2]);
    }
}
