use std::path::Path;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::collections::HashMap;
use std::ops::Index;
use std::cell::{Ref, RefCell};

use polars::prelude::*;
use rayon::prelude::*;

use crate::error::GamError;
use super::feature_struct::DenseFeature;


/// Struct `Sample` holds a batch sample of named feature columns,
/// a target column, and optional per-row instance weights.
#[derive(Debug)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<DenseFeature>,
    pub(super) target: RefCell<Vec<f64>>,
    // An empty weight vector means uniform weights.
    pub(super) weight: RefCell<Vec<f64>>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    pub fn from_dataframe(data: DataFrame, target: Series)
        -> io::Result<Self>
    {
        let (n_sample, n_feature) = data.shape();
        let target = target.f64()
            .expect("The target is not a dtype f64")
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .unwrap();
        let target = RefCell::new(target);

        let features = data.get_columns()
            .into_par_iter()
            .map(DenseFeature::from_series)
            .collect::<Vec<_>>();

        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        let weight = RefCell::new(Vec::with_capacity(0));
        let sample = Self {
            name_to_index, features, target, weight, n_sample, n_feature,
        };
        Ok(sample)
    }


    /// Read a CSV format file to `Sample` type.
    pub fn from_csv<P>(file: P, mut has_header: bool) -> io::Result<Self>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let mut lines = BufReader::new(file).lines();

        let mut features = Vec::new();
        if has_header {
            let line = lines.next().unwrap();
            features = line?.split(',')
                .map(DenseFeature::new)
                .collect::<Vec<_>>();
        }
        let mut n_sample = 0_usize;

        // For each line of the file
        for line in lines {
            let line = line?;

            // If the header does not exist,
            // construct a dummy header.
            if !has_header {
                let xs = line.split(',')
                    .map(|x| x.trim().parse::<f64>().unwrap())
                    .collect::<Vec<_>>();

                let n_feature = xs.len();
                features = (1..=n_feature).map(|i| {
                        let name = format!("Feat. [{i}]");
                        DenseFeature::new(name)
                    })
                    .collect::<Vec<_>>();

                for (feat, x) in features.iter_mut().zip(xs) {
                    feat.append(x);
                }

                has_header = true;
                n_sample += 1;
                continue;
            }

            line.split(',')
                .map(|x| x.trim().parse::<f64>().unwrap())
                .enumerate()
                .for_each(|(i, x)| {
                    features[i].append(x);
                });

            n_sample += 1;
        }

        let n_feature = features.len();
        let target = RefCell::new(Vec::with_capacity(0));
        let weight = RefCell::new(Vec::with_capacity(0));

        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        let sample = Self {
            name_to_index, features, target, weight, n_sample, n_feature,
        };

        Ok(sample)
    }


    /// Returns the target values as a slice of type `f64`.
    pub fn target(&self) -> Ref<'_, [f64]> {
        Ref::map(self.target.borrow(), |x| &x[..])
    }


    /// Returns the instance weights as a slice of type `f64`.
    /// The slice is empty when no weight column is set.
    pub fn weight(&self) -> Ref<'_, [f64]> {
        Ref::map(self.weight.borrow(), |x| &x[..])
    }


    /// Returns `true` if a weight column is set.
    pub fn has_weight(&self) -> bool {
        !self.weight.borrow().is_empty()
    }


    /// Returns a slice of type `DenseFeature`.
    pub fn features(&self) -> &[DenseFeature] {
        &self.features[..]
    }


    /// Set the feature of name `target` to `self.target`.
    /// The old value assigned to `self.target` will be dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Self {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .expect("The target column does not exist");


        let target = self.features.remove(pos).into_values();
        self.target = RefCell::new(target);
        self.n_feature -= 1;

        self.rebuild_name_index();

        self
    }


    /// Set the feature of name `weight` to `self.weight`.
    /// Weights must be non-negative finite reals with a positive sum.
    pub fn set_weight<S: AsRef<str>>(mut self, weight: S) -> Self {
        let weight = weight.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == weight)
            .expect("The weight column does not exist");


        let weight = self.features.remove(pos).into_values();
        assert!(
            weight.iter().all(|w| w.is_finite() && *w >= 0.0),
            "Instance weights must be non-negative finite reals"
        );
        assert!(
            weight.iter().sum::<f64>() > 0.0,
            "Instance weights must not sum to zero"
        );
        self.weight = RefCell::new(weight);
        self.n_feature -= 1;

        self.rebuild_name_index();

        self
    }


    fn rebuild_name_index(&mut self) {
        self.name_to_index = self.features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the `idx`-th instance `(x, y)`.
    pub fn at(&self, idx: usize) -> (Vec<f64>, f64) {
        let x = self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>();
        let y = self.target.borrow()[idx];

        (x, y)
    }


    /// Check whether `self` is a valid training sample for regression.
    /// The target column must be specified and hold finite real values.
    pub fn check_regression_target(&self) -> Result<(), GamError> {
        let n_sample = self.shape().0;
        let y = self.target();

        if y.len() != n_sample {
            return Err(GamError::Label(format!(
                "the target column is not specified: \
                 expected {n_sample} values, got {}. \
                 Use `Sample::set_target(\"Column Name\")`",
                y.len()
            )));
        }


        let non_finite = y.iter()
            .filter(|yi| !yi.is_finite())
            .collect::<Vec<_>>();
        if !non_finite.is_empty() {
            let line = non_finite.iter().take(5)
                .map(|yi| yi.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(GamError::Label(format!(
                "the target column contains {} non-finite value(s). \
                 Ex. [{line}, ...]",
                non_finite.len()
            )));
        }

        Ok(())
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = DenseFeature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name).unwrap();
        &self.features[k]
    }
}
