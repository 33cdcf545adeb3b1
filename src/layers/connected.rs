//! The fully-connected (dense) layer: affine forward, accumulating
//! backward, momentum SGD update.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::layers::Layer;
use crate::ops::{add_row, axpy, matmul, scale, sum_rows, transpose};
use crate::tensors::{Ten64, WithGrad};

/// A dense layer computing `y = x * w + b`.
///
/// Holds the weight matrix `w` (`[inputs, outputs]`) and bias row `b`
/// (`[1, outputs]`), each paired with a gradient accumulator of the same
/// shape. The accumulators also carry the momentum term between steps:
/// after [`ConnectedLayer::update`] they hold `momentum * update`, and the
/// next backward pass adds fresh gradient on top.
pub struct ConnectedLayer {
    x: Option<Ten64>,
    weights: WithGrad<Ten64>,
    bias: WithGrad<Ten64>,
}

impl ConnectedLayer {
    /// Creates a layer mapping `inputs` features to `outputs`.
    ///
    /// Weights use He initialization, a Gaussian with standard deviation
    /// `sqrt(2 / inputs)`; biases start at zero.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(inputs: usize, outputs: usize, rng: &mut impl Rng) -> Self {
        assert!(
            inputs > 0 && outputs > 0,
            "connected layer needs nonzero dimensions, got {inputs}x{outputs}"
        );

        let normal = Normal::new(0.0, (2.0 / inputs as f64).sqrt()).unwrap();
        let data = (0..inputs * outputs).map(|_| normal.sample(rng)).collect();

        Self {
            x: None,
            weights: WithGrad::new(Ten64::new(vec![inputs, outputs], data)),
            bias: WithGrad::new(Ten64::zeros(vec![1, outputs])),
        }
    }

    /// Creates a layer from explicit parameters, for deterministic setups.
    ///
    /// # Panics
    /// Panics if `w` is not a matrix or `b` is not a `[1, outputs]` row
    /// matching it.
    pub fn with_params(w: Ten64, b: Ten64) -> Self {
        assert_eq!(w.rank(), 2, "weights must be a matrix, got {:?}", w.shape);
        assert_eq!(
            b.shape,
            vec![1, w.shape[1]],
            "bias {:?} does not match weight columns {:?}",
            b.shape,
            w.shape
        );

        Self {
            x: None,
            weights: WithGrad::new(w),
            bias: WithGrad::new(b),
        }
    }

    /// The weight matrix and its accumulated gradient.
    pub fn weights(&self) -> &WithGrad<Ten64> {
        &self.weights
    }

    /// The bias row and its accumulated gradient.
    pub fn bias(&self) -> &WithGrad<Ten64> {
        &self.bias
    }
}

impl Layer for ConnectedLayer {
    /// Computes `y = x * w + b`, broadcasting the bias across the batch.
    ///
    /// Inputs above rank 2 are viewed as `[batch, flattened]` before the
    /// multiply; the cached copy keeps that flattened shape.
    ///
    /// # Panics
    /// Panics if the flattened feature count does not match the weight
    /// matrix's input dimension.
    fn forward(&mut self, x: &Ten64) -> Ten64 {
        assert!(
            x.rank() >= 2,
            "connected input needs batch and feature axes, got {:?}",
            x.shape
        );

        let batch = x.shape[0];
        let x = if x.rank() > 2 {
            x.clone().reshape(vec![batch, x.len() / batch])
        } else {
            x.clone()
        };

        let inputs = self.weights.value.shape[0];
        assert_eq!(
            x.shape[1], inputs,
            "input features {} do not match weight rows {}",
            x.shape[1], inputs
        );

        let y = add_row(&matmul(&x, &self.weights.value), &self.bias.value);
        self.x = Some(x);
        y
    }

    /// Accumulates `db += sum_rows(dy)` and `dw += x^T * dy`, and returns
    /// `dx = dy * w^T`.
    ///
    /// Shape checks run before either accumulator is touched, so a
    /// mismatched gradient never leaves the layer partially updated.
    fn backward(&mut self, dy: &Ten64) -> Ten64 {
        let x = self
            .x
            .as_ref()
            .expect("connected backward called before forward");
        assert_eq!(
            dy.shape,
            vec![x.shape[0], self.weights.value.shape[1]],
            "output gradient {:?} does not match batch {} x outputs {}",
            dy.shape,
            x.shape[0],
            self.weights.value.shape[1]
        );

        let delta = sum_rows(dy);
        axpy(1.0, &delta, &mut self.bias.grad);

        let dw = matmul(&transpose(x), dy);
        axpy(1.0, &dw, &mut self.weights.grad);

        matmul(dy, &transpose(&self.weights.value))
    }

    /// One SGD step with momentum and L2 weight decay.
    ///
    /// The order matters: decay folds into the gradient before the step
    /// reads it, and the momentum scale-down happens after, leaving
    /// `momentum * update` in the accumulator for the next backward pass.
    /// Biases step the same way but skip decay.
    fn update(&mut self, rate: f64, momentum: f64, decay: f64) {
        let (w, dw) = self.weights.split_mut();
        axpy(decay, w, dw);
        axpy(-rate, dw, w);
        scale(momentum, dw);

        let (b, db) = self.bias.split_mut();
        axpy(-rate, db, b);
        scale(momentum, db);
    }
}
