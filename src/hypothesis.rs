//! Defines the traits implemented by finalized hypotheses.
use crate::sample::Sample;


/// A trait that defines the behavior of regressor.
/// You only need to implement the `predict` method.
pub trait Regressor {
    /// Predicts the target value of the `row`-th row of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> f64;


    /// Predicts the target values of all rows of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<f64>
    {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }
}
