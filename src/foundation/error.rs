/// Convenience result type used across slitscan.
pub type SlitScanResult<T> = Result<T, SlitScanError>;

/// Top-level error taxonomy used by library APIs.
///
/// Every variant is fatal: the core is a deterministic computation over validated inputs, so
/// nothing here is retried.
#[derive(thiserror::Error, Debug)]
pub enum SlitScanError {
    /// Invalid run configuration (angle, frame count, plan/frame mismatch).
    #[error("configuration error: {0}")]
    Config(String),

    /// Unusable input frames (missing directory, too few files, mismatched dimensions).
    #[error("input error: {0}")]
    Input(String),

    /// Errors while encoding or writing the output image.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlitScanError {
    /// Build a [`SlitScanError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SlitScanError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`SlitScanError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
