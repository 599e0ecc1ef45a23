//! Validation-loss tracking for pruning.
use crate::common::{GamLoss, ObjectiveFunction};


/// Append-only record of per-round validation losses.
///
/// One entry is recorded per completed boosting round. After training,
/// the round with the lowest held-out loss is the one worth keeping;
/// ties resolve to the earliest round.
#[derive(Debug, Clone)]
pub struct PruningHistory {
    metric: GamLoss,
    history: Vec<(usize, f64)>,
    best: Option<(usize, f64)>,
}


impl PruningHistory {
    /// Create an empty history scored with `metric`.
    pub fn new(metric: GamLoss) -> Self {
        Self {
            metric,
            history: Vec::new(),
            best: None,
        }
    }


    /// Mean validation loss of `predictions` under the configured metric.
    /// An empty `weight` slice means uniform weights.
    pub fn evaluate(
        &self,
        predictions: &[f64],
        target: &[f64],
        weight: &[f64],
    ) -> f64
    {
        self.metric.eval(predictions, target, weight)
    }


    /// Append `(iteration, loss)` and return the best iteration so far.
    /// Only a strict improvement replaces the current best,
    /// so equal losses keep the earliest iteration.
    pub fn record_and_get_best(&mut self, iteration: usize, loss: f64)
        -> usize
    {
        self.history.push((iteration, loss));

        let improved = match self.best {
            None => true,
            Some((_, best_loss)) => loss < best_loss,
        };
        if improved {
            self.best = Some((iteration, loss));
        }

        self.best.unwrap().0
    }


    /// The iteration with the lowest recorded loss, if any round
    /// has been recorded.
    pub fn best_iteration(&self) -> Option<usize> {
        self.best.map(|(it, _)| it)
    }


    /// All recorded `(iteration, loss)` pairs, in recording order.
    pub fn history(&self) -> &[(usize, f64)] {
        &self.history[..]
    }


    /// Number of recorded rounds.
    pub fn len(&self) -> usize {
        self.history.len()
    }


    /// Returns `true` if no round has been recorded.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
