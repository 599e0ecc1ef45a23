use serde::{Serialize, Deserialize};

use crate::binning::Binner;
use crate::error::GamError;
use crate::hypothesis::Regressor;
use crate::sample::Sample;


/// An immutable additive model for regression.
///
/// A prediction is the global mean effect plus, for every kept
/// feature, the effect of the bin its value falls in. The predictor
/// owns its effect tables outright and never changes after
/// construction, so scoring is pure and repeatable.
///
/// You can read/write this struct by the `Serde` trait, or through the
/// versioned binary format of [`GamPredictor::save`] and
/// [`GamPredictor::load`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamPredictor {
    mean_effect: f64,
    bin_effects: Vec<Vec<f64>>,
    feature_map: Vec<usize>,
    input_length: usize,
    binner: Binner,
}


impl GamPredictor {
    pub(crate) fn from_parts(
        mean_effect: f64,
        bin_effects: Vec<Vec<f64>>,
        feature_map: Vec<usize>,
        input_length: usize,
        binner: Binner,
    ) -> Self
    {
        debug_assert_eq!(bin_effects.len(), feature_map.len());
        Self {
            mean_effect, bin_effects, feature_map, input_length, binner,
        }
    }


    /// The global mean effect.
    pub fn mean_effect(&self) -> f64 {
        self.mean_effect
    }


    /// The effect tables, one per kept feature, indexed by bin.
    pub fn bin_effects(&self) -> &[Vec<f64>] {
        &self.bin_effects[..]
    }


    /// Mapping from internal feature index to original column index.
    pub fn feature_map(&self) -> &[usize] {
        &self.feature_map[..]
    }


    /// The length of the feature vectors this model scores.
    pub fn input_length(&self) -> usize {
        self.input_length
    }


    /// The quantization boundaries used at training time.
    pub fn binner(&self) -> &Binner {
        &self.binner
    }


    /// Score a single feature vector.
    ///
    /// # Errors
    /// Fails with [`GamError::Dimension`] when `x.len()` differs from
    /// [`GamPredictor::input_length`]; the predictor state is left
    /// untouched and no out-of-bounds access happens.
    pub fn score(&self, x: &[f64]) -> Result<f64, GamError> {
        if x.len() != self.input_length {
            return Err(GamError::Dimension {
                expected: self.input_length,
                actual: x.len(),
            });
        }

        let score = self.mean_effect
            + self.feature_map.iter()
                .zip(&self.bin_effects[..])
                .map(|(&col, effects)| {
                    effects[self.binner.bin_index(col, x[col])]
                })
                .sum::<f64>();
        Ok(score)
    }
}


impl Regressor for GamPredictor {
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        let features = sample.features();
        self.mean_effect
            + self.feature_map.iter()
                .zip(&self.bin_effects[..])
                .map(|(&col, effects)| {
                    let value = features[col][row];
                    effects[self.binner.bin_index(col, value)]
                })
                .sum::<f64>()
    }
}
