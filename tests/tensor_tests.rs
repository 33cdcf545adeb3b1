use dendrite::ops::{add_row, axpy, matmul, scale, sum_rows, transpose};
use dendrite::tensor;
use dendrite::tensors::{Ten64, Tensor, WithGrad};

#[test]
fn test_tensor_creation() {
    let t = Tensor::new(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(t.shape, vec![2, 2]);
    assert_eq!(t.data, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_tensor_macro() {
    let t = tensor!([[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(t.shape, vec![2, 2]);
    assert_eq!(t.data, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_tensor_shape_mismatch_panics() {
    let result = std::panic::catch_unwind(|| {
        Tensor::new(vec![2, 2], vec![1.0, 2.0, 3.0]);
    });
    assert!(result.is_err());
}

#[test]
fn test_reshape_is_a_view() {
    let t = tensor!([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).reshape(vec![2, 3]);
    assert_eq!(t.shape, vec![2, 3]);
    assert_eq!(t.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_reshape_rejects_wrong_count() {
    let result = std::panic::catch_unwind(|| {
        tensor!([[1.0, 2.0]]).reshape(vec![3, 1]);
    });
    assert!(result.is_err());
}

#[test]
fn test_row_access_flattens_trailing_axes() {
    let t = Tensor::new(vec![2, 2, 2], (1..=8).map(f64::from).collect());
    assert_eq!(t.rows(), 2);
    assert_eq!(t.row_len(), 4);
    assert_eq!(t.row(1), &[5.0, 6.0, 7.0, 8.0]);
}

#[test]
fn test_with_grad_starts_zeroed() {
    let w = WithGrad::new(tensor!([[1.0, 2.0]]));
    assert_eq!(w.grad.shape, w.value.shape);
    assert_eq!(w.grad.data, vec![0.0, 0.0]);
}

#[test]
fn test_matmul_known_values() {
    let a = tensor!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let b = tensor!([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
    let c = matmul(&a, &b);
    assert_eq!(c.shape, vec![2, 2]);
    assert_eq!(c.data, vec![58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn test_matmul_inner_mismatch_panics() {
    let a = tensor!([[1.0, 2.0]]);
    let b = tensor!([[1.0, 2.0]]);
    let result = std::panic::catch_unwind(|| matmul(&a, &b));
    assert!(result.is_err());
}

#[test]
fn test_transpose_round_trip() {
    let a = tensor!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let at = transpose(&a);
    assert_eq!(at.shape, vec![3, 2]);
    assert_eq!(at.data, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(transpose(&at), a);
}

#[test]
fn test_sum_rows_matches_bias_shape() {
    let dy = tensor!([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    let s = sum_rows(&dy);
    assert_eq!(s.shape, vec![1, 2]);
    assert_eq!(s.data, vec![9.0, 12.0]);
}

#[test]
fn test_axpy_accumulates_in_place() {
    let x = tensor!([[1.0, 2.0]]);
    let mut y = tensor!([[10.0, 20.0]]);
    axpy(0.5, &x, &mut y);
    assert_eq!(y.data, vec![10.5, 21.0]);
    axpy(0.5, &x, &mut y);
    assert_eq!(y.data, vec![11.0, 22.0]);
}

#[test]
fn test_scale_in_place() {
    let mut y = tensor!([[2.0, -4.0]]);
    scale(0.5, &mut y);
    assert_eq!(y.data, vec![1.0, -2.0]);
    scale(0.0, &mut y);
    assert_eq!(y.data, vec![0.0, 0.0]);
}

#[test]
fn test_add_row_broadcasts() {
    let m = tensor!([[1.0, 1.0], [2.0, 2.0]]);
    let row = tensor!([[10.0, 20.0]]);
    let out = add_row(&m, &row);
    assert_eq!(out.data, vec![11.0, 21.0, 12.0, 22.0]);
    // input untouched
    assert_eq!(m.data, vec![1.0, 1.0, 2.0, 2.0]);
}

#[test]
fn test_zeros_shape() {
    let z = Ten64::zeros(vec![2, 3]);
    assert_eq!(z.shape, vec![2, 3]);
    assert_eq!(z.data, vec![0.0; 6]);
}
