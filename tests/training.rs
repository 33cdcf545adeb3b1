//! End-to-end: a two-layer net trained with momentum SGD learns XOR.

use rand::SeedableRng;
use rand::rngs::StdRng;

use dendrite::layers::{Activation, ActivationLayer, ConnectedLayer};
use dendrite::net::Net;
use dendrite::tensor;
use dendrite::tensors::Ten64;

/// dL/dy for mean squared error, supplied by the caller as the driver
/// contract expects.
fn mse_prime(y: &Ten64, t: &Ten64) -> Ten64 {
    let n = y.len() as f64;
    let data = y
        .data
        .iter()
        .zip(&t.data)
        .map(|(&yi, &ti)| 2.0 * (yi - ti) / n)
        .collect();
    Ten64::new(y.shape.clone(), data)
}

fn mse(y: &Ten64, t: &Ten64) -> f64 {
    y.data
        .iter()
        .zip(&t.data)
        .map(|(&yi, &ti)| (yi - ti) * (yi - ti))
        .sum::<f64>()
        / y.len() as f64
}

#[test]
fn xor_net_converges() {
    let inputs = tensor!([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
    let labels = tensor!([[0.0], [1.0], [1.0], [0.0]]);

    let mut rng = StdRng::seed_from_u64(7);
    let mut net = Net::new();
    net.push(ConnectedLayer::new(2, 8, &mut rng));
    net.push(ActivationLayer::new(Activation::LeakyRelu));
    net.push(ConnectedLayer::new(8, 1, &mut rng));
    net.push(ActivationLayer::new(Activation::Logistic));

    for _ in 0..20_000 {
        let outputs = net.forward(&inputs);
        let dy = mse_prime(&outputs, &labels);
        net.backward(&dy);
        net.update(0.1, 0.9, 0.0);
    }

    let outputs = net.forward(&inputs);
    let error = mse(&outputs, &labels);
    assert!(error < 0.05, "xor failed to converge, mse = {error}");

    // every prediction lands on the right side of 0.5
    for (&y, &t) in outputs.data.iter().zip(&labels.data) {
        assert_eq!(y > 0.5, t > 0.5);
    }
}

#[test]
fn training_reduces_loss_monotonically_enough() {
    // weaker property than convergence: after a chunk of steps the loss
    // must have dropped from its starting point
    let inputs = tensor!([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
    let labels = tensor!([[0.0], [1.0], [1.0], [0.0]]);

    let mut rng = StdRng::seed_from_u64(1234);
    let mut net = Net::new();
    net.push(ConnectedLayer::new(2, 8, &mut rng));
    net.push(ActivationLayer::new(Activation::LeakyRelu));
    net.push(ConnectedLayer::new(8, 1, &mut rng));
    net.push(ActivationLayer::new(Activation::Logistic));

    let before = mse(&net.forward(&inputs), &labels);

    for _ in 0..2_000 {
        let outputs = net.forward(&inputs);
        let dy = mse_prime(&outputs, &labels);
        net.backward(&dy);
        net.update(0.1, 0.9, 0.0);
    }

    let after = mse(&net.forward(&inputs), &labels);
    assert!(
        after < before,
        "loss did not improve: {before} -> {after}"
    );
}
