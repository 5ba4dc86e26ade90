use std::num::NonZeroUsize;

use approx::assert_relative_eq;
use mlp::{
    MlErr, Network, NetworkSpec,
    arch::activations::ActFn,
    initialization::{ConstParamGen, RandParamGen},
};
use ndarray::{Array1, Array2, ArrayView2, Axis, array};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn seeded_network(widths: Vec<usize>, activation: &str) -> Network {
    let spec = NetworkSpec::new(widths, activation, 0.1);
    let rng = StdRng::seed_from_u64(7);
    let param_gen = RandParamGen::small(rng, spec.num_weights()).unwrap();
    Network::new(&spec, param_gen).unwrap()
}

fn outer(lr: f32, a: ndarray::ArrayView1<f32>, b: ndarray::ArrayView1<f32>) -> Array2<f32> {
    a.insert_axis(Axis(1)).dot(&b.insert_axis(Axis(0))) * lr
}

fn assert_close(got: ArrayView2<f32>, expected: ArrayView2<f32>) {
    assert_eq!(got.dim(), expected.dim());
    for (g, e) in got.iter().zip(expected) {
        assert!((g - e).abs() < 1e-6, "got {got}, expected {expected}");
    }
}

#[test]
fn fresh_network_shapes_and_biases() {
    let widths = vec![784, 256, 128, 64, 10];
    let net = seeded_network(widths.clone(), "relu");

    assert_eq!(net.num_layers(), 5);
    assert_eq!(net.widths(), widths);

    for i in 0..net.num_layers() - 1 {
        assert_eq!(net.weights(i).dim(), (widths[i], widths[i + 1]));
        assert!(net.weight_grad(i).iter().all(|&g| g == 0.));
    }

    for i in 0..net.num_layers() {
        assert_eq!(net.bias(i).len(), widths[i]);
        assert!(net.bias(i).iter().all(|&b| b == 0.));
    }
}

#[test]
fn construction_errors() {
    let unknown = NetworkSpec::new(vec![2, 2], "swish", 0.1);
    let err = Network::new(&unknown, ConstParamGen::new(0., 4)).unwrap_err();
    assert!(matches!(err, MlErr::UnknownActivation(_)));

    let mismatch = NetworkSpec {
        num_layers: 4,
        widths: vec![2, 3, 2],
        activation: "relu".into(),
        learning_rate: 0.1,
    };
    let err = Network::new(&mismatch, ConstParamGen::new(0., 12)).unwrap_err();
    assert!(matches!(err, MlErr::LayerCountMismatch { got: 3, expected: 4 }));
}

#[test]
fn softmax_output_sums_to_one() {
    let mut rng = StdRng::seed_from_u64(1);

    for activation in ["relu", "sigmoid", "tanh", "linear"] {
        let mut net = seeded_network(vec![8, 6, 4, 3], activation);

        for _ in 0..10 {
            let x: Array1<f32> = (0..8).map(|_| rng.random_range(-50.0..50.0)).collect();
            let y = net.forward(x.view()).unwrap();
            assert_relative_eq!(y.sum(), 1., epsilon = 1e-5);
        }
    }
}

#[test]
fn forward_is_idempotent() {
    let mut net = seeded_network(vec![4, 5, 3], "sigmoid");
    let x = array![0.3, -1.2, 4.0, 0.];

    net.forward(x.view()).unwrap();
    let outputs: Vec<_> = (0..3).map(|i| net.output(i).to_owned()).collect();
    let derivatives: Vec<_> = (0..3).map(|i| net.derivative(i).to_owned()).collect();

    net.forward(x.view()).unwrap();
    for i in 0..3 {
        assert_eq!(net.output(i), outputs[i]);
        assert_eq!(net.derivative(i), derivatives[i]);
    }
}

#[test]
fn linear_identity_network_forward() {
    // z = Iᵗ·[1, 0] + 0 = [1, 0]
    // softmax(z) = [e / (e + 1), 1 / (e + 1)] = [0.7310586, 0.2689414]
    let weights = vec![array![[1., 0.], [0., 1.]]];
    let mut net = Network::with_weights(ActFn::linear(1., 0.), 0.1, weights).unwrap();

    let y = net.forward(array![1., 0.].view()).unwrap().to_owned();
    let e = std::f32::consts::E;

    assert_relative_eq!(y[0], e / (e + 1.), epsilon = 1e-6);
    assert_relative_eq!(y[1], 1. / (e + 1.), epsilon = 1e-6);
    assert_relative_eq!(y[0], 0.7310586, epsilon = 1e-6);

    // input derivative is the linear slope, output derivative is the scaled activation
    assert_eq!(net.derivative(0), array![1., 1.]);
    assert_relative_eq!(net.derivative(1)[0], y[0] / 10.);
}

#[test]
fn hidden_deltas_follow_the_chain_rule() {
    let weights = vec![array![[0.5, -0.5], [1., 0.]], array![[1., 0.], [0., 1.]]];
    let mut net = Network::with_weights(ActFn::relu(), 1., weights).unwrap();

    net.forward(array![2., 1.].view()).unwrap();
    net.backward(array![0., 1.].view(), false, NonZeroUsize::new(1).unwrap())
        .unwrap();

    // hidden z = [0.5*2 + 1*1, -0.5*2 + 0] = [2, -1] -> relu [2, 0], relu' [1, 0]
    assert_eq!(net.output(1), array![2., 0.]);
    assert_eq!(net.derivative(1), array![1., 0.]);

    let d2 = net.delta(2).to_owned();
    let expected = net.weights(1).dot(&d2) * &net.derivative(1);
    assert_eq!(net.delta(1), expected);
    assert_eq!(net.delta(1)[1], 0.);
}

#[test]
fn mini_batch_update_order() {
    const B: usize = 3;
    let batch_size = NonZeroUsize::new(B).unwrap();
    let lr = 0.1;

    let mut net = seeded_network(vec![3, 4, 2], "tanh");
    let initial: Vec<_> = net.all_weights().map(|w| w.to_owned()).collect();

    let xs = array![[1., 0.5, -1.], [0., 2., 1.], [-1., 1., 3.]];
    let targets = array![[1., 0.], [0., 1.], [1., 0.]];

    let mut contributions = vec![];
    for (k, (x, t)) in xs.rows().into_iter().zip(targets.rows()).enumerate() {
        net.forward(x).unwrap();
        net.backward(t, k == B - 1, batch_size).unwrap();

        let c: Vec<_> = (0..2)
            .map(|i| outer(lr, net.output(i), net.delta(i + 1)))
            .collect();
        contributions.push(c);
    }

    for i in 0..2 {
        // the closing sample's own step starts the next batch
        let applied = (&contributions[0][i] + &contributions[1][i]) / B as f32;
        assert_close(net.weights(i), (&initial[i] + &applied).view());
        assert_close(net.weight_grad(i), contributions[2][i].view());
    }
}

#[test]
fn standalone_update_applies_the_average_and_resets() {
    const B: usize = 4;
    let batch_size = NonZeroUsize::new(B).unwrap();
    let lr = 0.1;

    let mut net = seeded_network(vec![2, 3, 2], "sigmoid");
    let initial: Vec<_> = net.all_weights().map(|w| w.to_owned()).collect();
    let mut sums: Vec<_> = initial.iter().map(|w| Array2::zeros(w.raw_dim())).collect();

    for k in 0..B {
        let x = array![k as f32, 1. - k as f32];
        let t = if k % 2 == 0 { array![1., 0.] } else { array![0., 1.] };

        net.forward(x.view()).unwrap();
        net.backward(t.view(), false, batch_size).unwrap();

        for (i, sum) in sums.iter_mut().enumerate() {
            *sum += &outer(lr, net.output(i), net.delta(i + 1));
        }
    }

    for (i, sum) in sums.iter().enumerate() {
        assert_close(net.weight_grad(i), sum.view());
    }

    net.apply_update(batch_size);

    for (i, sum) in sums.iter().enumerate() {
        assert!(net.weight_grad(i).iter().all(|&g| g == 0.));
        assert_close(net.weights(i), (&initial[i] + &(sum / B as f32)).view());
    }
}

#[test]
fn biases_learn_every_sample() {
    let mut net = seeded_network(vec![2, 3, 2], "relu");
    let batch_size = NonZeroUsize::new(100).unwrap();

    net.forward(array![1., 2.].view()).unwrap();
    net.backward(array![1., 0.].view(), false, batch_size).unwrap();

    assert!(net.bias(2).iter().any(|&b| b != 0.));
    assert_relative_eq!(net.bias(2)[0], 0.1 * net.delta(2)[0]);
}
