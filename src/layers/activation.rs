//! Elementwise and row-wise nonlinearities as a stateless layer.

use crate::layers::Layer;
use crate::tensors::Ten64;

/// Slope of the leaky ReLU on its inactive branch.
const LEAKY_SLOPE: f64 = 0.01;

/// The nonlinearity an [`ActivationLayer`] applies.
///
/// Invalid kinds are unrepresentable; the enum carries the whole contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// `1 / (1 + e^-x)`, elementwise.
    Logistic,
    /// `max(x, 0)`, elementwise.
    Relu,
    /// `x` if `x > 0`, else `0.01 * x`, elementwise.
    LeakyRelu,
    /// `e^x_j / sum_k e^x_k`, normalized independently per row.
    Softmax,
}

/// A layer applying a fixed nonlinearity. No trainable parameters; the
/// only state is the cached forward input the backward pass derives from.
pub struct ActivationLayer {
    kind: Activation,
    x: Option<Ten64>,
}

impl ActivationLayer {
    pub fn new(kind: Activation) -> Self {
        Self { kind, x: None }
    }

    pub fn kind(&self) -> Activation {
        self.kind
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Layer for ActivationLayer {
    /// Applies the activation, elementwise except for softmax which
    /// normalizes each leading-axis row over its flattened elements.
    ///
    /// # Panics
    /// Panics if `x` is below rank 2; the row convention needs a batch
    /// axis and a feature axis even when the activation is elementwise.
    fn forward(&mut self, x: &Ten64) -> Ten64 {
        assert!(
            x.rank() >= 2,
            "activation input needs batch and feature axes, got {:?}",
            x.shape
        );

        // assignment drops the previously cached copy
        self.x = Some(x.clone());

        let mut y = x.clone();
        match self.kind {
            Activation::Logistic => {
                y.data.iter_mut().for_each(|v| *v = logistic(*v));
            }
            Activation::Relu => {
                y.data.iter_mut().for_each(|v| {
                    if *v < 0.0 {
                        *v = 0.0;
                    }
                });
            }
            Activation::LeakyRelu => {
                y.data.iter_mut().for_each(|v| {
                    if *v < 0.0 {
                        *v *= LEAKY_SLOPE;
                    }
                });
            }
            Activation::Softmax => {
                // Each row is shifted by its max before exponentiation, so
                // large logits saturate instead of overflowing. This
                // changes nothing for in-range inputs.
                for i in 0..y.rows() {
                    let row = y.row_mut(i);
                    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    let mut sum = 0.0;
                    for v in row.iter_mut() {
                        *v = (*v - max).exp();
                        sum += *v;
                    }
                    for v in row.iter_mut() {
                        *v /= sum;
                    }
                }
            }
        }

        y
    }

    /// Computes `dx = dy * f'(x)` from the cached forward input.
    ///
    /// The derivative is taken at the original `x`, not at the forward
    /// output; the logistic is recomputed here rather than saved.
    fn backward(&mut self, dy: &Ten64) -> Ten64 {
        let x = self
            .x
            .as_ref()
            .expect("activation backward called before forward");
        assert_eq!(
            dy.shape, x.shape,
            "output gradient {:?} does not match cached input {:?}",
            dy.shape, x.shape
        );

        let mut dx = dy.clone();
        match self.kind {
            Activation::Logistic => {
                dx.data.iter_mut().zip(&x.data).for_each(|(g, &xi)| {
                    let s = logistic(xi);
                    *g *= s * (1.0 - s);
                });
            }
            // x == 0 takes the inactive branch: the subgradient there is
            // pinned to 0 (or the leaky slope), never 1.
            Activation::Relu => {
                dx.data.iter_mut().zip(&x.data).for_each(|(g, &xi)| {
                    if xi <= 0.0 {
                        *g = 0.0;
                    }
                });
            }
            Activation::LeakyRelu => {
                dx.data.iter_mut().zip(&x.data).for_each(|(g, &xi)| {
                    if xi <= 0.0 {
                        *g *= LEAKY_SLOPE;
                    }
                });
            }
            Activation::Softmax => {
                // Treated as identity: softmax here is always paired with
                // a cross-entropy loss that folds the real Jacobian into
                // the loss gradient. Not a general-purpose softmax
                // derivative.
            }
        }

        dx
    }

    /// Nothing to update; the layer is stateless.
    fn update(&mut self, _rate: f64, _momentum: f64, _decay: f64) {}
}
