//! The finalized additive predictor and its persistence format.
mod gam_predictor;
mod model_file;

pub use gam_predictor::GamPredictor;
pub use model_file::{
    MODEL_SIGNATURE,
    VER_READABLE,
    VER_WE_CAN_READ_BACK,
    VER_WRITTEN,
};
