//! The shared layer contract and the layer types implementing it.
//!
//! A network is a sequence of layers, each exposing the same three
//! operations. The driver calls [`Layer::forward`] in feed order, feeds
//! each layer's output gradient back through [`Layer::backward`] in
//! reverse order, and calls [`Layer::update`] on every layer once per
//! optimization step.

use crate::tensors::Ten64;

mod activation;
mod connected;

pub use activation::{Activation, ActivationLayer};
pub use connected::ConnectedLayer;

/// One layer of a feed-forward network.
///
/// Layers own whatever state their backward pass needs. Every layer caches
/// an owned copy of its most recent forward input, replaced atomically on
/// the next call; callers keep ownership of the tensors they pass in and
/// receive back.
pub trait Layer {
    /// Runs the layer on `x`, returning `y = f(x)`.
    fn forward(&mut self, x: &Ten64) -> Ten64;

    /// Given `dL/dy` for this layer's output, returns `dL/dx`.
    ///
    /// Stateful layers also fold the parameter gradients from this call
    /// into their accumulators. Accumulation is additive across calls; a
    /// layer never resets its own accumulators, the optimizer owns that
    /// decision.
    ///
    /// # Panics
    /// Panics if called before any `forward`, or if `dy` does not match
    /// the shape implied by the cached input.
    fn backward(&mut self, dy: &Ten64) -> Ten64;

    /// Applies one SGD step with momentum and L2 weight decay.
    ///
    /// A no-op for layers without trainable parameters.
    fn update(&mut self, rate: f64, momentum: f64, decay: f64);
}
