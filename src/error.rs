//! The error type shared by training, scoring, and model persistence.
use thiserror::Error;


/// Errors surfaced by this crate.
/// Every variant carries enough context to tell the expected state
/// from the actual one.
#[derive(Debug, Error)]
pub enum GamError {
    /// An invalid hyperparameter or an unknown loss/metric kind.
    /// Rejected before training starts.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The target column is missing or holds non-real values.
    /// Surfaced before the first boosting round runs.
    #[error("invalid regression target: {0}")]
    Label(String),

    /// A feature vector whose length differs from the trained model's
    /// input length.
    #[error("feature vector has length {actual}, expected {expected}")]
    Dimension {
        /// The input length the model was trained with.
        expected: usize,
        /// The length of the offending feature vector.
        actual: usize,
    },

    /// The file does not begin with the expected model signature.
    #[error("unknown model signature `{found}`, expected `{expected}`")]
    Signature {
        /// The signature this reader accepts.
        expected: String,
        /// The signature found in the file.
        found: String,
    },

    /// The stored model version is outside the range this reader accepts.
    #[error(
        "incompatible model version: \
         written {written:#010x}, requires reader {readable:#010x}"
    )]
    Version {
        /// The version the file was written with.
        written: u32,
        /// The minimum reader version the file declares.
        readable: u32,
    },

    /// The model body is malformed.
    #[error("corrupt model file: {0}")]
    Corrupt(String),

    /// An underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
