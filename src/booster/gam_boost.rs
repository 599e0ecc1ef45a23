//! Provides the Generalized Additive Model trainer for regression.
use colored::Colorize;
use rayon::prelude::*;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::binning::{BinnedSample, Binner};
use crate::common::{checker, utils, GamLoss, ObjectiveFunction};
use crate::error::GamError;
use crate::predictor::GamPredictor;
use crate::sample::Sample;

use super::pruning::PruningHistory;


/// The default number of boosting rounds.
pub const DEFAULT_N_ROUNDS: usize = 9_500;
/// The default learning rate.
/// Additive models work best with a small learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.002;
/// The default cap on the number of bins per feature.
pub const DEFAULT_MAX_BINS: usize = 255;

const WIDTH: usize = 9;


// The running additive model:
// a global mean effect plus one effect table per kept feature.
#[derive(Debug, Clone)]
struct GamModel {
    mean_effect: f64,
    tables: Vec<Vec<f64>>,
    feature_map: Vec<usize>,
}


impl GamModel {
    fn new(mean_effect: f64, binner: &Binner, feature_map: Vec<usize>)
        -> Self
    {
        let tables = feature_map.iter()
            .map(|&col| vec![0.0; binner.n_bins(col)])
            .collect::<Vec<_>>();
        Self { mean_effect, tables, feature_map }
    }


    // Fold one round of per-feature, per-bin deltas into the tables.
    fn apply(&mut self, deltas: &[Vec<f64>]) {
        self.tables.iter_mut()
            .zip(deltas)
            .for_each(|(table, delta)| {
                table.iter_mut()
                    .zip(delta)
                    .for_each(|(t, d)| { *t += d; });
            });
    }
}


/// The Generalized Additive Model trainer for regression.
///
/// `GamBoost` fits one effect table per feature by gradient boosting:
/// each round computes the pseudo-residuals of the running model and,
/// for every feature independently, averages them per value bin
/// (a one-dimensional histogram regression). The averaged deltas are
/// scaled by the learning rate and folded into the model, so the
/// resulting predictor stays a sum of per-feature contributions with
/// no interaction terms.
///
/// When a validation sample is supplied, the loss of every round is
/// recorded and the round with the lowest held-out loss is the one
/// returned, which keeps extra rounds from overfitting the predictor.
///
/// # Example
/// The following code shows a small example for running [`GamBoost`].
///
/// ```no_run
/// use gamboost::prelude::*;
///
/// // Read the training sample from the CSV file.
/// // We use the column named `medv` as the target.
/// let train = SampleReader::new()
///     .file("/path/to/train.csv")
///     .has_header(true)
///     .target_feature("medv")
///     .read()
///     .unwrap();
/// let valid = SampleReader::new()
///     .file("/path/to/valid.csv")
///     .has_header(true)
///     .target_feature("medv")
///     .read()
///     .unwrap();
///
/// // Run `GamBoost` and obtain the resulting predictor `f`.
/// let f = GamBoost::init(&train)
///     .n_rounds(500)
///     .learning_rate(0.01)
///     .validation(&valid)
///     .run()
///     .unwrap();
///
/// // Get the predictions on the training set.
/// let predictions = f.predict_all(&train);
///
/// let n_sample = train.shape().0 as f64;
/// let training_loss = train.target()
///     .iter()
///     .zip(predictions)
///     .map(|(y, fx)| (y - fx).powi(2))
///     .sum::<f64>()
///     / n_sample;
///
/// println!("Training Loss is: {training_loss}");
/// ```
pub struct GamBoost<'a> {
    // Training data
    sample: &'a Sample,

    // Held-out data for pruning
    validation: Option<&'a Sample>,


    // Number of boosting rounds
    n_rounds: usize,

    // Scale of each additive update
    learning_rate: f64,

    // Cap on the number of bins per feature
    max_bins: usize,


    // Objective minimized on the training set
    loss: GamLoss,

    // Metric scored on the validation set
    pruning_metric: GamLoss,


    // Cooperative cancellation, checked once per round boundary
    stop_flag: Option<Arc<AtomicBool>>,

    verbose: bool,
}


impl<'a> GamBoost<'a> {
    /// Initialize the `GamBoost` trainer.
    /// This method sets the hyperparameters to their defaults.
    pub fn init(sample: &'a Sample) -> Self {
        Self {
            sample,
            validation: None,

            n_rounds: DEFAULT_N_ROUNDS,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_bins: DEFAULT_MAX_BINS,

            loss: GamLoss::L2,
            pruning_metric: GamLoss::L2,

            stop_flag: None,
            verbose: false,
        }
    }


    /// Set the number of boosting rounds.
    #[inline]
    pub fn n_rounds(mut self, n_rounds: usize) -> Self {
        self.n_rounds = n_rounds;
        self
    }


    /// Set the learning rate.
    #[inline]
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }


    /// Set the cap on the number of bins per feature.
    /// Features with fewer distinct values get fewer bins.
    #[inline]
    pub fn max_bins(mut self, max_bins: usize) -> Self {
        self.max_bins = max_bins;
        self
    }


    /// Set the training loss.
    #[inline]
    pub fn loss(mut self, loss: GamLoss) -> Self {
        self.loss = loss;
        self
    }


    /// Set the metric scored on the validation sample.
    /// Default is `GamLoss::L2`.
    #[inline]
    pub fn pruning_metric(mut self, metric: GamLoss) -> Self {
        self.pruning_metric = metric;
        self
    }


    /// Set the validation sample used for pruning.
    /// Without one, the model of the final round is returned.
    #[inline]
    pub fn validation(mut self, validation: &'a Sample) -> Self {
        self.validation = Some(validation);
        self
    }


    /// Set a cooperative stop flag.
    /// The flag is checked once per round boundary; once set,
    /// training stops after the current round completes and the best
    /// round of the partial history is selected.
    #[inline]
    pub fn stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `GamBoost` prints the loss values for each round.
    /// Default is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    fn stop_requested(&self) -> bool {
        self.stop_flag
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }


    fn print_header(&self) {
        println!(
            "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "ROUND".bold().red(),
            "TRAIN".bold().green(),
            "VALID".bold().yellow(),
        );
    }


    fn print_round(
        &self,
        round: usize,
        train_loss: f64,
        valid_loss: Option<f64>,
    )
    {
        let valid = valid_loss
            .map(|v| format!("{v:>WIDTH$.5}"))
            .unwrap_or_else(|| format!("{:>WIDTH$}", "-"));
        println!("      {round:>WIDTH$}\t{train_loss:>WIDTH$.5}\t{valid}");
    }


    /// Run the boosting rounds and return the resulting predictor.
    ///
    /// # Errors
    /// Returns [`GamError::Config`] when a hyperparameter is out of
    /// range and [`GamError::Label`] when the target column of the
    /// training or validation sample is missing or non-real.
    /// Both are checked before the first round runs.
    pub fn run(&self) -> Result<GamPredictor, GamError> {
        checker::check_sample(self.sample)?;
        checker::check_rounds(self.n_rounds)?;
        checker::check_learning_rate(self.learning_rate)?;
        checker::check_max_bins(self.max_bins)?;

        self.sample.check_regression_target()?;
        if let Some(validation) = self.validation {
            validation.check_regression_target()?;

            let expected = self.sample.shape().1;
            let actual = validation.shape().1;
            if expected != actual {
                return Err(GamError::Config(format!(
                    "the validation sample has {actual} feature \
                     column(s), expected {expected}"
                )));
            }
        }

        let n_feature = self.sample.shape().1;
        let binner = Binner::fit(self.sample, self.max_bins);

        // Constant columns carry no signal; leave them out.
        let feature_map = (0..n_feature)
            .filter(|&col| binner.n_bins(col) > 1)
            .collect::<Vec<_>>();

        let train = BinnedSample::from_sample(
            self.sample, &binner, &feature_map,
        );
        let valid = self.validation.map(|validation|
            BinnedSample::from_sample(validation, &binner, &feature_map)
        );

        let n_sample = train.n_sample();
        let mean_effect = utils::weighted_mean(
            train.target(), train.weight(),
        );

        let mut model = GamModel::new(
            mean_effect, &binner, feature_map.clone(),
        );

        // Append-only log of every round's deltas. Any prefix sum of
        // this log reproduces the model as of that round exactly,
        // which is what best-round selection needs.
        let mut delta_log: Vec<Vec<Vec<f64>>> =
            Vec::with_capacity(self.n_rounds);

        let mut predictions = vec![mean_effect; n_sample];
        let mut valid_predictions = valid.as_ref()
            .map(|v| vec![mean_effect; v.n_sample()]);

        let mut history = PruningHistory::new(self.pruning_metric);

        if self.verbose {
            self.print_header();
        }

        let learning_rate = self.learning_rate;
        let mut completed = 0_usize;
        for round in 1..=self.n_rounds {
            if self.stop_requested() {
                break;
            }

            let gradients = self.loss.gradient(
                &predictions, train.target(),
            );

            // One-dimensional histogram regression per feature:
            // the weighted average pseudo-residual of every bin,
            // computed independently for each feature.
            let deltas = (0..train.n_feature())
                .into_par_iter()
                .map(|f| bin_deltas(
                    train.bin_indices(f),
                    &gradients,
                    train.weight(),
                    model.tables[f].len(),
                    learning_rate,
                ))
                .collect::<Vec<_>>();

            model.apply(&deltas);

            update_predictions(&mut predictions, &train, &deltas);
            if let (Some(vp), Some(vb)) =
                (valid_predictions.as_mut(), valid.as_ref())
            {
                update_predictions(vp, vb, &deltas);
            }

            let valid_loss = match (&valid_predictions, &valid) {
                (Some(vp), Some(vb)) => {
                    let loss = history.evaluate(
                        vp, vb.target(), vb.weight(),
                    );
                    history.record_and_get_best(round, loss);
                    Some(loss)
                },
                _ => None,
            };

            if self.verbose {
                let train_loss = self.loss.eval(
                    &predictions, train.target(), train.weight(),
                );
                self.print_round(round, train_loss, valid_loss);
            }

            delta_log.push(deltas);
            completed = round;
        }

        // Without a validation sample, the final completed round wins.
        let best = history.best_iteration().unwrap_or(completed);

        // Materialize the model as of round `best`. The running model
        // already is that prefix sum when the final round won;
        // otherwise replay the delta log up to `best`.
        let final_model = if best == completed {
            model
        } else {
            let mut rewound = GamModel::new(
                mean_effect, &binner, feature_map,
            );
            delta_log.iter()
                .take(best)
                .for_each(|deltas| rewound.apply(deltas));
            rewound
        };

        Ok(GamPredictor::from_parts(
            final_model.mean_effect,
            final_model.tables,
            final_model.feature_map,
            n_feature,
            binner,
        ))
    }
}


// Weighted average gradient per bin, scaled by the learning rate.
// Bins that no row falls in keep a zero delta.
fn bin_deltas(
    indices: &[u32],
    gradients: &[f64],
    weight: &[f64],
    n_bins: usize,
    learning_rate: f64,
) -> Vec<f64>
{
    let mut grad_sum = vec![0.0; n_bins];
    let mut weight_sum = vec![0.0; n_bins];

    indices.iter()
        .zip(gradients)
        .zip(weight)
        .for_each(|((&b, &g), &w)| {
            grad_sum[b as usize] += w * g;
            weight_sum[b as usize] += w;
        });

    grad_sum.into_iter()
        .zip(weight_sum)
        .map(|(g, w)| if w > 0.0 { learning_rate * g / w } else { 0.0 })
        .collect()
}


fn update_predictions(
    predictions: &mut [f64],
    binned: &BinnedSample,
    deltas: &[Vec<f64>],
) {
    predictions.par_iter_mut()
        .enumerate()
        .for_each(|(row, p)| {
            let acc = deltas.iter()
                .enumerate()
                .map(|(f, delta)| {
                    delta[binned.bin_indices(f)[row] as usize]
                })
                .sum::<f64>();
            *p += acc;
        });
}


impl fmt::Display for GamBoost<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n_sample, n_feature) = self.sample.shape();
        write!(
            f,
            "\
            ----------\n\
            # GAM Boosting Trainer\n\n\
            - # of examples: {n_sample}\n\
            - # of features: {n_feature}\n\
            - Rounds: {}\n\
            - Learning rate: {}\n\
            - Max bins: {}\n\
            - Loss: {}\n\
            - Pruning metric: {}\n\
            ----------\
            ",
            self.n_rounds,
            self.learning_rate,
            self.max_bins,
            self.loss,
            self.pruning_metric,
        )
    }
}
