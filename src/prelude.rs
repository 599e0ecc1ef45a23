//! Exports the trainer, the predictor, and the commonly used traits.
//!
pub use crate::booster::{
    GamBoost,
    PruningHistory,
};


pub use crate::common::{
    GamLoss,
    ObjectiveFunction,
};


pub use crate::binning::Binner;


pub use crate::predictor::GamPredictor;


pub use crate::sample::{
    Sample,
    SampleReader,
};


pub use crate::hypothesis::Regressor;


pub use crate::error::GamError;
