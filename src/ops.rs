//! CPU kernels for the matrix algebra the layers are built from.
//!
//! Every kernel operates on [`Ten64`] buffers and panics on incompatible
//! shapes; a bad shape means the network topology is wrong and there is
//! nothing sensible to recover to.
//!
//! ## Implemented ops
//!
//! - `matmul`: dense matrix multiplication, rows parallelized with
//!   [`rayon`](https://docs.rs/rayon)
//! - `transpose`: 2-D transpose
//! - `sum_rows`: leading-axis reduction to a single row
//! - `axpy`: in-place scaled accumulate, `y += alpha * x`
//! - `scale`: in-place scalar multiply
//! - `add_row`: broadcast-add a row vector across every row of a matrix
//!
//! `axpy` and `scale` carry the whole SGD update: gradient accumulation,
//! weight decay, the parameter step, and the momentum carryover are all
//! expressed through them.

use rayon::prelude::*;

use crate::tensors::{Ten64, Tensor};

/// Multiplies two matrices, `A: m x k` by `B: k x n`, into `C: m x n`.
///
/// Output rows are computed in parallel.
///
/// # Panics
/// Panics if either operand is not rank 2 or the inner dimensions differ.
pub fn matmul(a: &Ten64, b: &Ten64) -> Ten64 {
    assert_eq!(a.rank(), 2, "matmul lhs must be a matrix, got {:?}", a.shape);
    assert_eq!(b.rank(), 2, "matmul rhs must be a matrix, got {:?}", b.shape);

    let m = a.shape[0];
    let k = a.shape[1];
    let n = b.shape[1];
    assert_eq!(
        k, b.shape[0],
        "matmul shape mismatch: {:?} x {:?}",
        a.shape, b.shape
    );

    let a_data = &a.data;
    let b_data = &b.data;

    let mut out_data = vec![0.0; m * n];

    out_data.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
        for (j, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for l in 0..k {
                sum += a_data[i * k + l] * b_data[l * n + j];
            }
            *out = sum;
        }
    });

    Tensor::new(vec![m, n], out_data)
}

/// Transposes a matrix, `m x n` to `n x m`.
///
/// # Panics
/// Panics if the input is not rank 2.
pub fn transpose(a: &Ten64) -> Ten64 {
    assert_eq!(a.rank(), 2, "transpose expects a matrix, got {:?}", a.shape);

    let m = a.shape[0];
    let n = a.shape[1];
    let mut out_data = vec![0.0; m * n];

    out_data.par_chunks_mut(m).enumerate().for_each(|(j, col)| {
        for (i, out) in col.iter_mut().enumerate() {
            *out = a.data[i * n + j];
        }
    });

    Tensor::new(vec![n, m], out_data)
}

/// Sums a tensor along its leading axis, producing a `[1, row_len]` row.
///
/// Trailing axes are flattened, so a `[b, n]` gradient reduces to the
/// `[1, n]` shape of a bias vector.
///
/// # Panics
/// Panics if the input is below rank 2.
pub fn sum_rows(a: &Ten64) -> Ten64 {
    let rows = a.rows();
    let width = a.row_len();
    let mut out_data = vec![0.0; width];

    for i in 0..rows {
        for (out, &v) in out_data.iter_mut().zip(a.row(i)) {
            *out += v;
        }
    }

    Tensor::new(vec![1, width], out_data)
}

/// Scaled accumulate: `y += alpha * x`, elementwise in place.
///
/// # Panics
/// Panics if the operands hold different element counts.
pub fn axpy(alpha: f64, x: &Ten64, y: &mut Ten64) {
    assert_eq!(
        x.len(),
        y.len(),
        "axpy length mismatch: {} vs {}",
        x.len(),
        y.len()
    );

    y.data
        .par_iter_mut()
        .zip(x.data.par_iter())
        .for_each(|(yi, &xi)| *yi += alpha * xi);
}

/// Scales a tensor in place: `y *= alpha`.
pub fn scale(alpha: f64, y: &mut Ten64) {
    y.data.par_iter_mut().for_each(|yi| *yi *= alpha);
}

/// Adds a `[1, n]` row vector to every row of an `m x n` matrix, returning
/// a new matrix.
///
/// # Panics
/// Panics if `row` is not shaped `[1, n]` for the matrix's row length.
pub fn add_row(m: &Ten64, row: &Ten64) -> Ten64 {
    let width = m.row_len();
    assert_eq!(
        row.shape,
        vec![1, width],
        "cannot broadcast row {:?} across {:?}",
        row.shape,
        m.shape
    );

    let mut out = m.clone();
    out.data.par_chunks_mut(width).for_each(|chunk| {
        for (c, &r) in chunk.iter_mut().zip(&row.data) {
            *c += r;
        }
    });

    out
}
