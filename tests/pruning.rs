use gamboost::prelude::*;


#[test]
fn earliest_minimum_wins() {
    let mut history = PruningHistory::new(GamLoss::L2);

    let losses = [5.0, 3.0, 4.0, 3.0];
    let mut best = 0;
    for (it, &loss) in losses.iter().enumerate() {
        best = history.record_and_get_best(it + 1, loss);
    }

    assert_eq!(best, 2);
    assert_eq!(history.best_iteration(), Some(2));
}


#[test]
fn the_running_best_is_returned_after_every_round() {
    let mut history = PruningHistory::new(GamLoss::L2);

    assert_eq!(history.record_and_get_best(1, 5.0), 1);
    assert_eq!(history.record_and_get_best(2, 3.0), 2);
    assert_eq!(history.record_and_get_best(3, 4.0), 2);
    assert_eq!(history.record_and_get_best(4, 3.0), 2);
}


#[test]
fn the_full_history_is_retained() {
    let mut history = PruningHistory::new(GamLoss::L1);

    history.record_and_get_best(1, 0.9);
    history.record_and_get_best(2, 0.7);
    history.record_and_get_best(3, 0.8);

    assert_eq!(history.len(), 3);
    assert_eq!(history.history(), &[(1, 0.9), (2, 0.7), (3, 0.8)]);
}


#[test]
fn evaluate_computes_the_weighted_mean_loss() {
    let history = PruningHistory::new(GamLoss::L2);

    let predictions = [1.0, 2.0];
    let target = [0.0, 4.0];

    // Uniform weights.
    let loss = history.evaluate(&predictions, &target, &[]);
    assert!((loss - (1.0 + 4.0) / 2.0).abs() < 1e-12);

    // The second row dominates.
    let loss = history.evaluate(&predictions, &target, &[1.0, 3.0]);
    assert!((loss - (1.0 + 3.0 * 4.0) / 4.0).abs() < 1e-12);

    let history = PruningHistory::new(GamLoss::L1);
    let loss = history.evaluate(&predictions, &target, &[]);
    assert!((loss - (1.0 + 2.0) / 2.0).abs() < 1e-12);
}


#[test]
fn metric_kinds_parse_from_names_and_codes() {
    assert_eq!("L1".parse::<GamLoss>().unwrap(), GamLoss::L1);
    assert_eq!("l2".parse::<GamLoss>().unwrap(), GamLoss::L2);
    assert!(matches!(
        "huber".parse::<GamLoss>(),
        Err(GamError::Config(_))
    ));

    assert_eq!(GamLoss::from_code(2).unwrap(), GamLoss::L2);
    assert!(matches!(GamLoss::from_code(0), Err(GamError::Config(_))));
}
