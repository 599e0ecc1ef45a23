//! This file defines some functions that check some pre-conditions
//! E.g., hyperparameter ranges and the shape of data.
use crate::error::GamError;
use crate::sample::Sample;


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn check_sample(sample: &Sample) -> Result<(), GamError> {
    let (n_sample, n_feature) = sample.shape();

    if n_sample == 0 {
        return Err(GamError::Config(
            "the training sample has no rows".into()
        ));
    }

    if n_feature == 0 {
        return Err(GamError::Config(
            "the training sample has no feature columns".into()
        ));
    }
    Ok(())
}


/// Check the number of boosting rounds.
#[inline(always)]
pub(crate) fn check_rounds(n_rounds: usize) -> Result<(), GamError> {
    if n_rounds == 0 {
        return Err(GamError::Config(
            "`n_rounds` must be positive, got 0".into()
        ));
    }
    Ok(())
}


/// Check the learning rate.
#[inline(always)]
pub(crate) fn check_learning_rate(learning_rate: f64)
    -> Result<(), GamError>
{
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
        return Err(GamError::Config(format!(
            "`learning_rate` must be a positive real, got {learning_rate}"
        )));
    }
    Ok(())
}


/// Check the per-feature bin cap.
#[inline(always)]
pub(crate) fn check_max_bins(max_bins: usize) -> Result<(), GamError> {
    if max_bins <= 1 {
        return Err(GamError::Config(format!(
            "`max_bins` must be greater than 1, got {max_bins}"
        )));
    }
    Ok(())
}
