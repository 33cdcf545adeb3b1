//! dendrite: minimal from-scratch feed-forward network layers.
//!
//! Each layer exposes three explicit operations: `forward` (inference),
//! `backward` (gradient computation), and `update` (the SGD-with-momentum
//! parameter step). There is no autodiff and no graph; backpropagation is
//! spelled out one layer at a time.
//!
//! # Features
//!
//! - Dynamic row-major tensors with shape checking and cheap views.
//! - An activation layer covering logistic, ReLU, leaky ReLU, and row-wise
//!   softmax.
//! - A fully-connected layer with He-initialized weights, additive gradient
//!   accumulation, and momentum + weight-decay SGD.
//! - A sequential [`net::Net`] driver chaining layers through the shared
//!   [`layers::Layer`] trait.
//!
//! # Goals
//!
//! - Keep every formula visible; this crate is written to be read.
//! - Prioritize correctness and explicitness over black-box abstraction.
//! - Fail fast: shape mismatches panic instead of limping on with corrupt
//!   dimensions.
//!
//! # Modules
//!
//! - [`tensors`] — tensor buffers, gradients, and the `tensor!` macro.
//! - [`ops`] — the CPU matrix kernels the layers are assembled from.
//! - [`layers`] — the `Layer` contract and its activation/connected
//!   implementations.
//! - [`net`] — a minimal sequential driver.
//!
//! # Example
//!
//! ```rust
//! use dendrite::layers::{Activation, ActivationLayer, Layer};
//! use dendrite::tensor;
//!
//! let mut relu = ActivationLayer::new(Activation::Relu);
//! let y = relu.forward(&tensor!([[-1.0, 2.0]]));
//! assert_eq!(y.data, vec![0.0, 2.0]);
//!
//! let dx = relu.backward(&tensor!([[1.0, 1.0]]));
//! assert_eq!(dx.data, vec![0.0, 1.0]);
//! ```

pub mod layers;
pub mod net;
pub mod ops;
pub mod tensors;
