//! A minimal sequential driver over boxed layers.
//!
//! The net owns its layers and threads tensors through them: forward in
//! feed order, gradients backward in reverse order, one update per layer
//! per optimization step. Loss functions, data loading, and epoch
//! scheduling stay with the caller.

use crate::layers::Layer;
use crate::tensors::Ten64;

/// An ordered stack of layers forming a feed-forward network.
#[derive(Default)]
pub struct Net {
    layers: Vec<Box<dyn Layer>>,
}

impl Net {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a layer to the end of the stack.
    pub fn push(&mut self, layer: impl Layer + 'static) {
        self.layers.push(Box::new(layer));
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Runs the input through every layer in order.
    pub fn forward(&mut self, x: &Ten64) -> Ten64 {
        let mut y = x.clone();
        for layer in &mut self.layers {
            y = layer.forward(&y);
        }
        y
    }

    /// Propagates a loss gradient back through every layer in reverse,
    /// returning the gradient with respect to the network input.
    pub fn backward(&mut self, dy: &Ten64) -> Ten64 {
        let mut grad = dy.clone();
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad);
        }
        grad
    }

    /// Applies one SGD step to every layer.
    pub fn update(&mut self, rate: f64, momentum: f64, decay: f64) {
        for layer in &mut self.layers {
            layer.update(rate, momentum, decay);
        }
    }
}
