use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use std::fs;
use std::path::Path;

use crate::error::GamError;
use crate::sample::Sample;
use super::bin::Bins;


/// Per-column bin boundaries fitted on a training sample.
///
/// The `Binner` is the quantization collaborator: it owns the boundaries
/// computed at training time and answers value-to-bin lookups at scoring
/// time. Persisted model files carry no boundaries, so a `Binner` must be
/// kept alongside a saved model; [`Binner::to_json_file`] and
/// [`Binner::from_json_file`] cover that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binner {
    bins: Vec<Bins>,
}


impl Binner {
    /// Fit equal-width bins on every feature column of `sample`.
    /// Each column gets at most `max_bins` bins,
    /// capped by its number of distinct values.
    pub fn fit(sample: &Sample, max_bins: usize) -> Self {
        let bins = sample.features()
            .par_iter()
            .map(|feat| {
                let n_bin = feat.distinct_value_count()
                    .min(max_bins)
                    .max(1);
                Bins::cut(feat, n_bin)
            })
            .collect::<Vec<_>>();

        Self { bins }
    }


    /// Number of feature columns this binner was fitted on.
    pub fn n_columns(&self) -> usize {
        self.bins.len()
    }


    /// Number of bins of the column `col`.
    pub fn n_bins(&self, col: usize) -> usize {
        self.bins[col].len()
    }


    /// Returns the bin index of `value` on the column `col`.
    #[inline]
    pub fn bin_index(&self, col: usize, value: f64) -> usize {
        self.bins[col].index_of(value)
    }


    /// Bin boundaries of the column `col`.
    pub fn bins(&self, col: usize) -> &Bins {
        &self.bins[col]
    }


    /// Write the boundaries to `path` as JSON.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P)
        -> Result<(), GamError>
    {
        let json = serde_json::to_string(self)
            .expect("Bin boundaries are always serializable");
        fs::write(path, json)?;
        Ok(())
    }


    /// Read boundaries back from a JSON file written by
    /// [`Binner::to_json_file`].
    pub fn from_json_file<P: AsRef<Path>>(path: P)
        -> Result<Self, GamError>
    {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| GamError::Corrupt(format!("binner file: {e}")))
    }
}
