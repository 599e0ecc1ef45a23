//! Provides the boosting trainer and the pruning components.
mod gam_boost;
mod pruning;

pub use gam_boost::{
    GamBoost,
    DEFAULT_LEARNING_RATE,
    DEFAULT_MAX_BINS,
    DEFAULT_N_ROUNDS,
};
pub use pruning::PruningHistory;
