//! Feature quantization: bin boundaries, the fitted binner, and
//! pre-binned samples.
mod bin;
mod binner;
mod binned_sample;

pub use bin::{Bin, Bins};
pub use binner::Binner;
pub use binned_sample::BinnedSample;
