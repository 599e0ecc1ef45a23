use polars::prelude::*;
use std::ops::Index;

const BUF_SIZE: usize = 256;


/// Dense representation of a feature column.
#[derive(Debug, Clone)]
pub struct DenseFeature {
    /// Feature name
    pub name: String,
    /// Feature values.
    pub sample: Vec<f64>,
}


impl DenseFeature {
    /// Construct an empty dense feature with `name`.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            sample: Vec::with_capacity(BUF_SIZE),
        }
    }


    /// Returns the feature name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Convert `polars::Series` into `DenseFeature`.
    pub fn from_series(series: &Series) -> Self {
        let name = series.name().to_string();

        let sample = series.f64()
            .expect("The series is not a dtype f64")
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .unwrap();

        Self { name, sample, }
    }


    /// Returns the feature values as a slice.
    pub fn values(&self) -> &[f64] {
        &self.sample[..]
    }


    pub(crate) fn into_values(self) -> Vec<f64> {
        self.sample
    }


    /// Append an example to this feature.
    pub fn append(&mut self, x: f64) {
        self.sample.push(x);
    }


    /// Returns the number of items in `self.sample`.
    pub fn len(&self) -> usize {
        self.sample.len()
    }


    /// Returns `true` if this feature has no items.
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }


    /// Number of distinct values appearing in this feature.
    pub(crate) fn distinct_value_count(&self) -> usize {
        let mut values = self.sample.clone();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values.dedup();

        values.len()
    }
}


impl Index<usize> for DenseFeature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.sample[idx]
    }
}
