use polars::prelude::*;
use rand::prelude::*;
use rand_distr::Normal;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use gamboost::prelude::*;


/// An additive target: `y = 2 x1 + sin(pi x2) + noise`.
fn synthetic_sample(n: usize, seed: u64) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.1).unwrap();

    let x1 = (0..n)
        .map(|_| rng.gen_range(-3.0..3.0))
        .collect::<Vec<_>>();
    let x2 = (0..n)
        .map(|_| rng.gen_range(0.0..1.0))
        .collect::<Vec<_>>();
    let y = x1.iter()
        .zip(&x2)
        .map(|(&a, &b)| {
            2.0 * a
                + (std::f64::consts::PI * b).sin()
                + noise.sample(&mut rng)
        })
        .collect::<Vec<_>>();

    let data = df!("x1" => &x1, "x2" => &x2).unwrap();
    let target = Series::new("y", &y);
    Sample::from_dataframe(data, target).unwrap()
}


fn l2_loss<H: Regressor>(sample: &Sample, f: &H) -> f64 {
    let n_sample = sample.shape().0 as f64;
    let target = sample.target();

    f.predict_all(sample)
        .into_iter()
        .zip(target.iter())
        .map(|(fx, &y)| (y - fx).powi(2))
        .sum::<f64>()
        / n_sample
}


#[test]
fn training_beats_the_mean_baseline() {
    let sample = synthetic_sample(500, 777);

    let f = GamBoost::init(&sample)
        .n_rounds(300)
        .learning_rate(0.1)
        .max_bins(32)
        .run()
        .unwrap();

    let n_sample = sample.shape().0 as f64;
    let target = sample.target();
    let mean = target.iter().sum::<f64>() / n_sample;
    let baseline = target.iter()
        .map(|&y| (y - mean).powi(2))
        .sum::<f64>()
        / n_sample;

    let loss = l2_loss(&sample, &f);
    println!("L2-Loss (synthetic, GamBoost): {loss} (baseline {baseline})");
    assert!(loss < 0.5 * baseline);
}


#[test]
fn l1_training_also_beats_the_mean_baseline() {
    let sample = synthetic_sample(500, 13);

    let f = GamBoost::init(&sample)
        .n_rounds(300)
        .learning_rate(0.1)
        .max_bins(32)
        .loss(GamLoss::L1)
        .run()
        .unwrap();

    let n_sample = sample.shape().0 as f64;
    let target = sample.target();
    let mean = target.iter().sum::<f64>() / n_sample;
    let baseline = target.iter()
        .map(|&y| (y - mean).abs())
        .sum::<f64>()
        / n_sample;

    let loss = sample.target()
        .iter()
        .zip(f.predict_all(&sample))
        .map(|(&y, fx)| (y - fx).abs())
        .sum::<f64>()
        / n_sample;
    assert!(loss < 0.7 * baseline);
}


#[test]
fn one_round_is_a_single_scaled_update() {
    let x = vec![0.0, 0.5, 1.5, 2.5, 3.5, 4.0];
    let y = vec![1.0, 2.0, 0.0, 4.0, 3.0, 5.0];
    let n_sample = x.len();

    let data = df!("x" => &x).unwrap();
    let target = Series::new("y", &y);
    let sample = Sample::from_dataframe(data, target).unwrap();

    let learning_rate = 0.25;
    let f = GamBoost::init(&sample)
        .n_rounds(1)
        .learning_rate(learning_rate)
        .max_bins(4)
        .run()
        .unwrap();

    let mean = y.iter().sum::<f64>() / n_sample as f64;
    assert!((f.mean_effect() - mean).abs() < 1e-12);

    // Recompute the single round by hand: the average residual of
    // every bin, scaled by the learning rate.
    assert_eq!(f.feature_map(), &[0]);
    let binner = f.binner();
    let n_bins = f.bin_effects()[0].len();

    let mut sums = vec![0.0; n_bins];
    let mut counts = vec![0.0; n_bins];
    for (&xi, &yi) in x.iter().zip(&y) {
        let b = binner.bin_index(0, xi);
        sums[b] += yi - mean;
        counts[b] += 1.0;
    }

    for (b, &effect) in f.bin_effects()[0].iter().enumerate() {
        let expected = if counts[b] > 0.0 {
            learning_rate * sums[b] / counts[b]
        } else {
            0.0
        };
        assert!((effect - expected).abs() < 1e-12);
    }
}


#[test]
fn tiny_learning_rate_degenerates_to_the_mean() {
    let sample = synthetic_sample(200, 5);

    let f = GamBoost::init(&sample)
        .n_rounds(10)
        .learning_rate(1e-12)
        .max_bins(16)
        .run()
        .unwrap();

    for effects in f.bin_effects() {
        assert!(effects.iter().all(|e| e.abs() < 1e-9));
    }

    let (x, _) = sample.at(0);
    let score = f.score(&x).unwrap();
    assert!((score - f.mean_effect()).abs() < 1e-9);
}


#[test]
fn score_is_idempotent_and_matches_predict() {
    let sample = synthetic_sample(200, 42);

    let f = GamBoost::init(&sample)
        .n_rounds(50)
        .learning_rate(0.1)
        .max_bins(16)
        .run()
        .unwrap();

    let (x, _) = sample.at(7);
    let first = f.score(&x).unwrap();
    let second = f.score(&x).unwrap();
    assert_eq!(first, second);

    assert_eq!(first, f.predict(&sample, 7));
}


#[test]
fn short_feature_vectors_are_rejected() {
    let sample = synthetic_sample(100, 99);

    let f = GamBoost::init(&sample)
        .n_rounds(5)
        .learning_rate(0.1)
        .run()
        .unwrap();

    let x = vec![0.0; f.input_length() - 1];
    match f.score(&x) {
        Err(GamError::Dimension { expected, actual }) => {
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        },
        other => panic!("expected a dimension error, got {other:?}"),
    }
}


#[test]
fn invalid_configurations_are_rejected() {
    let sample = synthetic_sample(50, 1);

    let result = GamBoost::init(&sample).n_rounds(0).run();
    assert!(matches!(result, Err(GamError::Config(_))));

    let result = GamBoost::init(&sample).learning_rate(0.0).run();
    assert!(matches!(result, Err(GamError::Config(_))));

    let result = GamBoost::init(&sample).max_bins(1).run();
    assert!(matches!(result, Err(GamError::Config(_))));
}


#[test]
fn non_real_targets_are_rejected_before_training() {
    let data = df!("x" => &[1.0, 2.0, 3.0]).unwrap();
    let target = Series::new("y", &[1.0, f64::NAN, 3.0]);
    let sample = Sample::from_dataframe(data, target).unwrap();

    let result = GamBoost::init(&sample).n_rounds(5).run();
    assert!(matches!(result, Err(GamError::Label(_))));
}


#[test]
fn stop_flag_set_upfront_yields_the_mean_model() {
    let sample = synthetic_sample(100, 3);

    let flag = Arc::new(AtomicBool::new(true));
    let f = GamBoost::init(&sample)
        .n_rounds(100)
        .learning_rate(0.1)
        .stop_flag(flag)
        .run()
        .unwrap();

    for effects in f.bin_effects() {
        assert!(effects.iter().all(|&e| e == 0.0));
    }

    let (x, _) = sample.at(0);
    assert_eq!(f.score(&x).unwrap(), f.mean_effect());
}


#[test]
fn zero_weight_rows_do_not_move_the_mean_effect() {
    let data = df!(
        "x" => &[0.0, 0.0, 1.0, 1.0],
        "w" => &[1.0, 1.0, 1.0, 0.0],
    ).unwrap();
    let target = Series::new("y", &[1.0, 3.0, 5.0, 7.0]);
    let sample = Sample::from_dataframe(data, target)
        .unwrap()
        .set_weight("w");

    let f = GamBoost::init(&sample)
        .n_rounds(1)
        .learning_rate(0.5)
        .run()
        .unwrap();

    // (1 + 3 + 5) / 3, the fourth row weighs nothing.
    assert!((f.mean_effect() - 3.0).abs() < 1e-12);
}


#[test]
fn validation_pruning_returns_a_usable_predictor() {
    let train = synthetic_sample(400, 21);
    let valid = synthetic_sample(100, 22);

    let f = GamBoost::init(&train)
        .n_rounds(100)
        .learning_rate(0.1)
        .max_bins(32)
        .validation(&valid)
        .pruning_metric(GamLoss::L2)
        .run()
        .unwrap();

    let loss = l2_loss(&valid, &f);
    assert!(loss.is_finite());

    let n_sample = valid.shape().0 as f64;
    let target = valid.target();
    let mean = target.iter().sum::<f64>() / n_sample;
    let baseline = target.iter()
        .map(|&y| (y - mean).powi(2))
        .sum::<f64>()
        / n_sample;
    assert!(loss < baseline);
}
