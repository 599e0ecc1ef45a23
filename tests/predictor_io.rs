use polars::prelude::*;
use rand::prelude::*;

use gamboost::prelude::*;


fn trained_predictor(seed: u64) -> (Sample, GamPredictor) {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = 200;
    let x1 = (0..n)
        .map(|_| rng.gen_range(-1.0..1.0))
        .collect::<Vec<_>>();
    let x2 = (0..n)
        .map(|_| rng.gen_range(0.0..10.0))
        .collect::<Vec<_>>();
    let y = x1.iter()
        .zip(&x2)
        .map(|(&a, &b)| 3.0 * a - 0.5 * b)
        .collect::<Vec<_>>();

    let data = df!("x1" => &x1, "x2" => &x2).unwrap();
    let target = Series::new("y", &y);
    let sample = Sample::from_dataframe(data, target).unwrap();

    let f = GamBoost::init(&sample)
        .n_rounds(80)
        .learning_rate(0.1)
        .max_bins(16)
        .run()
        .unwrap();
    (sample, f)
}


#[test]
fn roundtrip_scores_are_bit_identical() {
    let (sample, f) = trained_predictor(101);

    let mut bytes = Vec::new();
    f.save(&mut bytes).unwrap();

    let loaded = GamPredictor::load(
        &mut bytes.as_slice(), f.binner().clone(),
    ).unwrap();

    let n_sample = sample.shape().0;
    for row in 0..n_sample {
        let (x, _) = sample.at(row);
        assert_eq!(f.score(&x).unwrap(), loaded.score(&x).unwrap());
    }
}


#[test]
fn roundtrip_through_files() {
    let (sample, f) = trained_predictor(55);

    let dir = std::env::temp_dir();
    let model_path = dir.join("gamboost_io_test.model");
    let binner_path = dir.join("gamboost_io_test.bins.json");

    f.save_to_path(&model_path).unwrap();
    f.binner().to_json_file(&binner_path).unwrap();

    let binner = Binner::from_json_file(&binner_path).unwrap();
    let loaded = GamPredictor::load_from_path(&model_path, binner)
        .unwrap();

    for row in 0..sample.shape().0 {
        let (x, _) = sample.at(row);
        assert_eq!(f.score(&x).unwrap(), loaded.score(&x).unwrap());
    }

    std::fs::remove_file(&model_path).unwrap();
    std::fs::remove_file(&binner_path).unwrap();
}


#[test]
fn one_letter_off_signature_is_rejected() {
    let (_, f) = trained_predictor(7);

    let mut bytes = Vec::new();
    f.save(&mut bytes).unwrap();
    // "GAM REGP" -> "GAM REGQ"
    bytes[7] = b'Q';

    let result = GamPredictor::load(
        &mut bytes.as_slice(), f.binner().clone(),
    );
    assert!(matches!(result, Err(GamError::Signature { .. })));
}


#[test]
fn truncated_files_never_yield_a_partial_predictor() {
    let (_, f) = trained_predictor(7);

    let mut bytes = Vec::new();
    f.save(&mut bytes).unwrap();

    for len in [4, 16, 24, bytes.len() - 1] {
        let mut cut = bytes.clone();
        cut.truncate(len);
        let result = GamPredictor::load(
            &mut cut.as_slice(), f.binner().clone(),
        );
        assert!(result.is_err());
    }
}
