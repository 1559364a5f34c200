//! Benchmarks the symbolic analysis pipeline end to end on synthetic banded
//! and dense patterns of growing size.

use umf_symbolic::control::Control;
use umf_symbolic::symbolic;

fn main() {
    divan::main();
}

/// A pentadiagonal pattern: column `j` has rows `j-2..=j+2` (clipped at the
/// boundary), representative of a discretized 1-D operator.
fn banded_pattern(n: usize, half_bandwidth: usize) -> (Vec<usize>, Vec<usize>) {
    let mut col_ptr = Vec::with_capacity(n + 1);
    let mut row_idx = Vec::new();
    col_ptr.push(0);
    for j in 0..n {
        let lo = j.saturating_sub(half_bandwidth);
        let hi = (j + half_bandwidth).min(n - 1);
        for i in lo..=hi {
            row_idx.push(i);
        }
        col_ptr.push(row_idx.len());
    }
    (col_ptr, row_idx)
}

#[divan::bench(args = [64, 256, 1024])]
fn banded_symbolic(bencher: divan::Bencher, n: usize) {
    let (col_ptr, row_idx) = banded_pattern(n, 2);
    let control = Control::default();
    bencher.bench_local(|| {
        symbolic(n, n, &col_ptr, &row_idx, None, None, &control).unwrap();
    });
}

#[divan::bench(args = [8, 16, 32])]
fn dense_symbolic(bencher: divan::Bencher, n: usize) {
    let mut col_ptr = Vec::with_capacity(n + 1);
    let mut row_idx = Vec::with_capacity(n * n);
    col_ptr.push(0);
    for _ in 0..n {
        row_idx.extend(0..n);
        col_ptr.push(row_idx.len());
    }
    let control = Control::default();
    bencher.bench_local(|| {
        symbolic(n, n, &col_ptr, &row_idx, None, None, &control).unwrap();
    });
}
