use std::{fs, num::NonZeroUsize};

use mlp::{
    Network, NetworkSpec, Trainer,
    initialization::RandParamGen,
    persistence::{load_weights, read_matrix, save_weights, weights_path, write_matrix},
};
use ndarray::array;
use rand::{SeedableRng, rngs::StdRng};

fn seeded_network(activation: &str) -> Network {
    let spec = NetworkSpec::new(vec![3, 5, 4, 2], activation, 0.1);
    let rng = StdRng::seed_from_u64(3);
    let param_gen = RandParamGen::normal(rng, spec.num_weights(), 0., 1.).unwrap();
    Network::new(&spec, param_gen).unwrap()
}

#[test]
fn matrix_round_trip_is_exact() {
    let net = seeded_network("tanh");

    for w in net.all_weights() {
        let mut buf = Vec::new();
        write_matrix(&mut buf, w).unwrap();
        let read = read_matrix(buf.as_slice()).unwrap();
        assert_eq!(read, w);
    }

    let tricky = array![[f32::MIN_POSITIVE, -0.1, 1. / 3.], [1e30, -7.5e-12, 0.]];
    let mut buf = Vec::new();
    write_matrix(&mut buf, tricky.view()).unwrap();
    assert_eq!(read_matrix(buf.as_slice()).unwrap(), tricky);
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("weights");
    let net = seeded_network("sigmoid");

    save_weights(&net, &out).unwrap();
    for i in 0..3 {
        assert!(weights_path(&out, net.act_fn(), i).is_file());
    }
    assert!(out.join("weights_sigmoid_3").is_file());

    let loaded = load_weights(&out, net.act_fn(), 3).unwrap();
    for (i, w) in loaded.iter().enumerate() {
        assert_eq!(w, &net.weights(i));
    }

    let mut original = net.clone();
    let mut restored = Network::with_weights(net.act_fn(), 0.1, loaded).unwrap();
    let x = array![0.5, -2., 1.];
    assert_eq!(
        original.predict(x.view()).unwrap(),
        restored.predict(x.view()).unwrap()
    );
}

#[test]
fn fit_exports_weights() {
    let dir = tempfile::tempdir().unwrap();
    let mut net = seeded_network("relu");

    let x = array![[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
    let y = array![0, 1, 0];

    let trainer = Trainer::new(NonZeroUsize::new(2).unwrap(), 3, 2).export_to(dir.path());
    trainer.fit(&mut net, x.view(), y.view()).unwrap();

    let mut names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, ["weights_relu_1", "weights_relu_2", "weights_relu_3"]);

    let loaded = load_weights(dir.path(), net.act_fn(), 3).unwrap();
    for (i, w) in loaded.iter().enumerate() {
        assert_eq!(w, &net.weights(i));
    }
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let net = seeded_network("linear");
    assert!(load_weights(dir.path(), net.act_fn(), 3).is_err());
}
