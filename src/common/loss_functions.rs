//! Objective functions for GAM boosting.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::error::GamError;


/// This trait defines the objective functions.
/// An objective turns the current predictions into per-example
/// pseudo-residuals, and scores a prediction vector against the target.
pub trait ObjectiveFunction {
    /// The name of the objective function.
    fn name(&self) -> &str;

    /// Loss value for a single point.
    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64;


    /// Weighted mean loss over all points.
    /// An empty `weight` slice means uniform weights.
    fn eval(&self, predictions: &[f64], target: &[f64], weight: &[f64])
        -> f64
    {
        let n_items = predictions.len();

        assert_eq!(n_items, target.len());

        if weight.is_empty() {
            return predictions.iter()
                .zip(target)
                .map(|(&p, &y)| self.eval_at_point(p, y))
                .sum::<f64>()
                / n_items as f64;
        }

        assert_eq!(n_items, weight.len());

        let total = weight.iter().sum::<f64>();
        predictions.iter()
            .zip(target)
            .zip(weight)
            .map(|((&p, &y), &w)| w * self.eval_at_point(p, y))
            .sum::<f64>()
            / total
    }


    /// Pseudo-residual per example at the current predictions.
    fn gradient(&self, predictions: &[f64], target: &[f64]) -> Vec<f64>;
}


/// The loss kinds recognized for training and pruning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamLoss {
    /// `L1`-loss.
    /// This loss function is also known as
    /// **Least Absolute Deviation (LAD)**.
    L1,

    /// `L2`-loss.
    /// This loss function is also known as
    /// **Mean Squared Error (MSE)**.
    L2,
}


impl GamLoss {
    /// Parse a numeric metric code: `1` for L1, `2` for L2.
    pub fn from_code(code: u8) -> Result<Self, GamError> {
        match code {
            1 => Ok(Self::L1),
            2 => Ok(Self::L2),
            _ => Err(GamError::Config(format!(
                "unknown pruning metric code `{code}`, \
                 expected 1 (L1) or 2 (L2)"
            ))),
        }
    }
}


impl FromStr for GamLoss {
    type Err = GamError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L1" => Ok(Self::L1),
            "L2" => Ok(Self::L2),
            _ => Err(GamError::Config(format!(
                "unknown loss kind `{s}`, expected `L1` or `L2`"
            ))),
        }
    }
}


impl fmt::Display for GamLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


impl ObjectiveFunction for GamLoss {
    fn name(&self) -> &str {
        match self {
            Self::L1 => "L1 loss",
            Self::L2 => "L2 loss",
        }
    }


    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64 {
        match self {
            Self::L1 => (prediction - true_value).abs(),
            Self::L2 => (prediction - true_value).powi(2),
        }
    }


    fn gradient(&self, predictions: &[f64], target: &[f64]) -> Vec<f64>
    {
        let n_sample = predictions.len();
        assert_eq!(n_sample, target.len());


        match self {
            Self::L1 => {
                target.iter()
                    .zip(predictions)
                    .map(|(y, p)| {
                        let diff = y - p;
                        // `f64::signum` maps `0.0` to `1.0`.
                        if diff == 0.0 { 0.0 } else { diff.signum() }
                    })
                    .collect()
            },
            Self::L2 => {
                target.iter()
                    .zip(predictions)
                    .map(|(y, p)| y - p)
                    .collect()
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_gradient_is_residual() {
        let target = [3.0, -1.0, 0.5];
        let predictions = [1.0, -1.0, 1.5];
        let grad = GamLoss::L2.gradient(&predictions, &target);
        assert_eq!(grad, vec![2.0, 0.0, -1.0]);
    }

    #[test]
    fn l1_gradient_is_sign_of_residual() {
        let target = [3.0, -1.0, 0.5];
        let predictions = [1.0, -1.0, 1.5];
        let grad = GamLoss::L1.gradient(&predictions, &target);
        assert_eq!(grad, vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn weighted_eval_ignores_zero_weight_rows() {
        let predictions = [1.0, 100.0];
        let target = [2.0, 0.0];
        let weight = [1.0, 0.0];
        let loss = GamLoss::L2.eval(&predictions, &target, &weight);
        assert_eq!(loss, 1.0);
    }

    #[test]
    fn metric_codes_match_the_cli_convention() {
        assert_eq!(GamLoss::from_code(1).unwrap(), GamLoss::L1);
        assert_eq!(GamLoss::from_code(2).unwrap(), GamLoss::L2);
        assert!(matches!(
            GamLoss::from_code(3),
            Err(GamError::Config(_))
        ));
    }
}
