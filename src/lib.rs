#![warn(missing_docs)]

//!
//! A crate that trains Generalized Additive Models (GAMs) for regression
//! by gradient boosting over per-feature value bins.
//!
//! A GAM predicts a target value as a global mean effect plus a sum of
//! independent per-feature contributions, with no interaction terms.
//! Training proceeds in rounds: each round fits a one-dimensional
//! histogram regression to the current pseudo-residuals for every
//! feature independently, and folds the scaled updates into the model.
//! When a validation sample is supplied, the round with the lowest
//! held-out loss is selected after training, so extra rounds never
//! hurt the returned predictor.
//!
//! ```no_run
//! use gamboost::prelude::*;
//!
//! // Read the training sample from a CSV file.
//! // We use the column named `medv` as the target.
//! let train = SampleReader::new()
//!     .file("/path/to/train.csv")
//!     .has_header(true)
//!     .target_feature("medv")
//!     .read()
//!     .unwrap();
//!
//! let f = GamBoost::init(&train)
//!     .n_rounds(500)
//!     .learning_rate(0.01)
//!     .loss(GamLoss::L2)
//!     .run()
//!     .unwrap();
//!
//! // Get the predictions on the training set.
//! let predictions = f.predict_all(&train);
//! ```

mod binning;
mod booster;
mod common;
mod error;
mod hypothesis;
mod predictor;
mod sample;

pub mod prelude;

pub use binning::{Bin, BinnedSample, Binner, Bins};
pub use booster::{
    GamBoost,
    PruningHistory,
    DEFAULT_LEARNING_RATE,
    DEFAULT_MAX_BINS,
    DEFAULT_N_ROUNDS,
};
pub use common::{GamLoss, ObjectiveFunction};
pub use error::GamError;
pub use hypothesis::Regressor;
pub use predictor::{
    GamPredictor,
    MODEL_SIGNATURE,
    VER_READABLE,
    VER_WE_CAN_READ_BACK,
    VER_WRITTEN,
};
pub use sample::{DenseFeature, Sample, SampleReader};
