//! Strategy selector (component 4.4).
//!
//! Combines the user's `strategy` control, matrix shape, `Quser` presence,
//! and (when relevant) the symmetry ratio/diagonal density to choose
//! between the symmetric and unsymmetric strategies, per the decision table
//! in the design.

use crate::control::{Control, FixQ, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedStrategy {
    Symmetric,
    Unsymmetric,
}

#[derive(Debug, Clone, Copy)]
pub struct StrategyDecision {
    pub strategy: ResolvedStrategy,
    pub fix_q: bool,
    pub prefer_diagonal: bool,
}

/// `sym_ratio`/`nzdiag` are only meaningful (and only needed) on the `Auto`,
/// square, `is_sym == true` row of the table; callers may pass `0.0`/`0` when
/// the symmetry analyzer was skipped.
#[allow(clippy::too_many_arguments)]
pub fn select(
    control: &Control,
    rectangular: bool,
    quser_set: bool,
    is_sym: bool,
    sym_ratio: f64,
    nzdiag: usize,
    n2: usize,
) -> StrategyDecision {
    let strategy = if rectangular {
        ResolvedStrategy::Unsymmetric
    } else {
        match control.strategy {
            Strategy::Symmetric => ResolvedStrategy::Symmetric,
            Strategy::Unsymmetric => ResolvedStrategy::Unsymmetric,
            Strategy::Auto => {
                if !is_sym {
                    ResolvedStrategy::Unsymmetric
                } else if !quser_set {
                    let dense_enough =
                        sym_ratio >= control.strategy_thresh_sym
                            && nzdiag as f64 >= control.strategy_thresh_nnzdiag * n2 as f64;
                    if dense_enough { ResolvedStrategy::Symmetric } else { ResolvedStrategy::Unsymmetric }
                } else {
                    ResolvedStrategy::Symmetric
                }
            }
        }
    };

    let (mut fix_q, prefer_diagonal) = match strategy {
        ResolvedStrategy::Symmetric => (true, true),
        ResolvedStrategy::Unsymmetric => (false, false),
    };

    // `force_fixQ` is read and applied after the strategy table decision,
    // overriding whatever `fixQ` the strategy implied -- not folded into
    // the table itself.
    if let FixQ::Force(forced) = control.force_fixq {
        fix_q = forced;
    }

    StrategyDecision { strategy, fix_q, prefer_diagonal }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn default_control() -> Control {
        Control::default()
    }

    #[test]
    fn rectangular_always_unsymmetric() {
        let c = default_control();
        let d = select(&c, true, false, true, 1.0, 100, 100);
        assert_eq!(d.strategy, ResolvedStrategy::Unsymmetric);
    }

    #[test]
    fn explicit_symmetric_honored_even_if_not_is_sym() {
        let mut c = default_control();
        c.strategy = Strategy::Symmetric;
        let d = select(&c, false, false, false, 0.0, 0, 100);
        assert_eq!(d.strategy, ResolvedStrategy::Symmetric);
        assert!(d.fix_q);
        assert!(d.prefer_diagonal);
    }

    /// Every `Auto`-strategy row of the decision table: rectangular-ness is
    /// fixed at `false` here (covered separately above), so only `is_sym`,
    /// `Quser` presence, and the density thresholds vary.
    #[rstest]
    #[case::not_sym(false, false, 0.0, 0, ResolvedStrategy::Unsymmetric)]
    #[case::sym_with_quser(true, true, 0.0, 0, ResolvedStrategy::Symmetric)]
    #[case::sym_dense_enough(true, false, 0.9, 95, ResolvedStrategy::Symmetric)]
    #[case::sym_too_sparse(true, false, 0.1, 95, ResolvedStrategy::Unsymmetric)]
    fn auto_strategy_table(
        #[case] is_sym: bool,
        #[case] quser_set: bool,
        #[case] sym_ratio: f64,
        #[case] nzdiag: usize,
        #[case] expected: ResolvedStrategy,
    ) {
        let c = default_control();
        let d = select(&c, false, quser_set, is_sym, sym_ratio, nzdiag, 100);
        assert_eq!(d.strategy, expected);
    }

    #[test]
    fn force_fixq_overrides_strategy_default() {
        let mut c = default_control();
        c.strategy = Strategy::Unsymmetric;
        c.force_fixq = FixQ::Force(true);
        let d = select(&c, false, false, false, 0.0, 0, 100);
        assert_eq!(d.strategy, ResolvedStrategy::Unsymmetric);
        assert!(d.fix_q);
    }
}
