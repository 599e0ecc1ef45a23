use rayon::prelude::*;

use crate::sample::Sample;
use super::binner::Binner;


/// Pre-binned view of a sample: for every kept feature column,
/// the bin index of each row, together with the target values and
/// the instance weights.
#[derive(Debug, Clone)]
pub struct BinnedSample {
    // Original column index of each kept feature.
    feature_map: Vec<usize>,
    // `indices[f][row]` is the bin index of row `row`
    // on the `f`-th kept feature.
    indices: Vec<Vec<u32>>,
    target: Vec<f64>,
    weight: Vec<f64>,
    n_sample: usize,
}


impl BinnedSample {
    /// Bin every row of `sample` with `binner`,
    /// keeping the columns listed in `feature_map`.
    pub fn from_sample(
        sample: &Sample,
        binner: &Binner,
        feature_map: &[usize],
    ) -> Self
    {
        let features = sample.features();
        let indices = feature_map.par_iter()
            .map(|&col| {
                features[col].values()
                    .iter()
                    .map(|&v| binner.bin_index(col, v) as u32)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let n_sample = sample.shape().0;
        let target = sample.target().to_vec();
        let weight = if sample.has_weight() {
            sample.weight().to_vec()
        } else {
            vec![1.0; n_sample]
        };

        Self {
            feature_map: feature_map.to_vec(),
            indices,
            target,
            weight,
            n_sample,
        }
    }


    /// Number of rows.
    pub fn n_sample(&self) -> usize {
        self.n_sample
    }


    /// Number of kept features.
    pub fn n_feature(&self) -> usize {
        self.feature_map.len()
    }


    /// Original column index of each kept feature.
    pub fn feature_map(&self) -> &[usize] {
        &self.feature_map[..]
    }


    /// Per-row bin indices of the `f`-th kept feature.
    pub fn bin_indices(&self, f: usize) -> &[u32] {
        &self.indices[f][..]
    }


    /// Target values.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Instance weights. All ones when the sample is unweighted.
    pub fn weight(&self) -> &[f64] {
        &self.weight[..]
    }
}
