//! This file provides some common numeric helpers.


/// Weighted mean of `values`.
/// An empty `weight` slice means uniform weights.
#[inline(always)]
pub(crate) fn weighted_mean(values: &[f64], weight: &[f64]) -> f64 {
    if weight.is_empty() {
        return values.iter().sum::<f64>() / values.len() as f64;
    }

    assert_eq!(values.len(), weight.len());

    let total = weight.iter().sum::<f64>();
    values.iter()
        .zip(weight)
        .map(|(&v, &w)| w * v)
        .sum::<f64>()
        / total
}
