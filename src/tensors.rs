//! Core tensor data structures.
//!
//! This module defines the numeric buffer the layers consume: an
//! N-dimensional tensor with shape metadata and flat row-major data.
//!
//! It supports:
//! - Construction of N-dimensional tensors with shape checking
//! - Metadata-only reshaping (views)
//! - Per-row access for row-wise operations such as softmax
//! - `WithGrad` pairing of a parameter tensor with its gradient accumulator
//! - Compile-time tensor literals via the [`tensor!`] macro
//!
//! ## Design notes
//! - Shape is a `Vec<usize>` enforced at runtime; layer inputs are expected
//!   to be at least rank 2 (batch axis first, feature axes after).
//! - "Row" always means all elements sharing the leading-axis index, with
//!   any trailing axes flattened.
//! - Shape violations panic. A mismatched shape is a misconfigured network
//!   topology, not a recoverable condition.
//!
//! ## Example
//!
//! ```rust
//! use dendrite::tensors::Tensor;
//! let t = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! assert_eq!(t.shape, vec![2, 3]);
//! assert_eq!(t.row(1), &[4.0, 5.0, 6.0]);
//! ```

/// An N-dimensional tensor with a shape and flat row-major data.
///
/// - All elements are the same type (`T`).
/// - `shape` defines the structure, e.g. `[2, 3]` for a 2x3 matrix.
/// - `data` holds the flattened content in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

/// The element type every layer computes in.
pub type Ten64 = Tensor<f64>;

impl<T> Tensor<T> {
    /// Creates a new tensor with the given shape and flat data.
    ///
    /// # Panics
    /// Panics if the number of elements in `data` does not match the shape
    /// product.
    pub fn new(shape: impl Into<Vec<usize>>, data: Vec<T>) -> Self {
        let shape = shape.into();
        assert_eq!(
            shape.iter().product::<usize>(),
            data.len(),
            "shape {:?} is incompatible with {} data elements",
            shape,
            data.len()
        );
        Self { shape, data }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Reinterprets the tensor under a new shape without touching the data.
    ///
    /// # Panics
    /// Panics if the new shape does not cover the same number of elements.
    pub fn reshape(mut self, shape: impl Into<Vec<usize>>) -> Self {
        let shape = shape.into();
        assert_eq!(
            shape.iter().product::<usize>(),
            self.data.len(),
            "cannot view {} elements as shape {:?}",
            self.data.len(),
            shape
        );
        self.shape = shape;
        self
    }

    /// Size of the leading axis.
    ///
    /// # Panics
    /// Panics on tensors below rank 2; a lone axis has no row structure.
    pub fn rows(&self) -> usize {
        assert!(
            self.rank() >= 2,
            "row access needs batch and feature axes, got shape {:?}",
            self.shape
        );
        self.shape[0]
    }

    /// Elements per row, i.e. all trailing axes flattened.
    pub fn row_len(&self) -> usize {
        self.data.len() / self.rows()
    }

    /// Borrows row `i` as a flat slice.
    pub fn row(&self, i: usize) -> &[T] {
        let w = self.row_len();
        &self.data[i * w..(i + 1) * w]
    }

    /// Mutably borrows row `i` as a flat slice.
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let w = self.row_len();
        &mut self.data[i * w..(i + 1) * w]
    }
}

impl Ten64 {
    /// Creates a zero-filled tensor of the given shape.
    pub fn zeros(shape: impl Into<Vec<usize>>) -> Self {
        let shape = shape.into();
        let len = shape.iter().product();
        Self {
            shape,
            data: vec![0.0; len],
        }
    }
}

/// A parameter tensor paired with its gradient accumulator.
///
/// The gradient is never cleared by the operations in this crate; the
/// momentum update scales it down instead, and any full reset belongs to
/// the caller.
#[derive(Debug, Clone)]
pub struct WithGrad<T> {
    pub value: T,
    pub grad: T,
}

impl WithGrad<Ten64> {
    /// Wraps a value with a zeroed gradient of the same shape.
    pub fn new(value: Ten64) -> Self {
        let grad = Ten64::zeros(value.shape.clone());
        Self { value, grad }
    }

    /// Splits into simultaneous parameter and gradient borrows, for update
    /// steps that read one while writing the other.
    pub fn split_mut(&mut self) -> (&mut Ten64, &mut Ten64) {
        (&mut self.value, &mut self.grad)
    }
}

/// Defines a tensor from nested literal arrays.
///
/// Supports arbitrary dimensionality as long as sublists are uniform in
/// shape.
///
/// # Example
/// ```
/// use dendrite::tensor;
/// let t = tensor!([[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(t.shape, vec![2, 2]);
/// ```
#[macro_export]
macro_rules! tensor {
    (- $lit:literal) => {
        $crate::tensors::Tensor::new(Vec::<usize>::new(), vec![- $lit])
    };

    ($lit:literal) => {
        $crate::tensors::Tensor::new(Vec::<usize>::new(), vec![$lit])
    };

    ([ $( $inner:tt )+ ]) => {{
        let children = $crate::tensor_elems!(@acc [] $( $inner )+);
        let first_shape = &children[0].shape;
        assert!(children.iter().all(|c| c.shape == *first_shape),
            "ragged tensor literal (rows have mismatched shapes)");
        let mut shape = vec![children.len()];
        shape.extend_from_slice(first_shape);
        let mut data = Vec::with_capacity(children.len() * children[0].data.len());
        for c in children { data.extend(c.data); }
        $crate::tensors::Tensor::new(shape, data)
    }};
}

/// Splits a comma-separated tensor literal body into child tensors,
/// tolerating the leading `-` of negative literals (which is a separate
/// token tree from the number it negates).
#[doc(hidden)]
#[macro_export]
macro_rules! tensor_elems {
    (@acc [ $( $ch:expr ),* ]) => {
        vec![ $( $ch ),* ]
    };
    (@acc [ $( $ch:expr ),* ] ,) => {
        vec![ $( $ch ),* ]
    };
    (@acc [ $( $ch:expr ),* ] , $( $rest:tt )+) => {
        $crate::tensor_elems!(@acc [ $( $ch ),* ] $( $rest )+)
    };
    (@acc [ $( $ch:expr ),* ] - $lit:literal $( $rest:tt )*) => {
        $crate::tensor_elems!(@acc [ $( $ch, )* $crate::tensor!(- $lit) ] $( $rest )*)
    };
    (@acc [ $( $ch:expr ),* ] $e:tt $( $rest:tt )*) => {
        $crate::tensor_elems!(@acc [ $( $ch, )* $crate::tensor!($e) ] $( $rest )*)
    };
}
