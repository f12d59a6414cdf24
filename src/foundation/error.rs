/// Result alias used across the crate.
pub type ImagineResult<T> = Result<T, ImagineError>;

/// Every failure the crate reports.
///
/// Key derivation errors (`InvalidOperation`, `UnstringifiableValue`, `InvalidHashLength`) are
/// programming or configuration mistakes: the functions are pure, so retrying with the same input
/// yields the same error.
#[derive(thiserror::Error, Debug)]
pub enum ImagineError {
    /// An operation has an empty name.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A parameter value has no canonical textual form.
    #[error("unstringifiable value for parameter `{parameter}` of operation `{operation}`: {reason}")]
    UnstringifiableValue {
        /// Name of the operation carrying the value.
        operation: String,
        /// Name of the offending parameter.
        parameter: String,
        /// Why the value cannot be stringified.
        reason: String,
    },

    /// A hash length of zero was requested.
    #[error("invalid hash length {0}: must be at least 1")]
    InvalidHashLength(usize),

    /// No handler provider knows the operation.
    #[error("unsupported image operation `{0}`")]
    UnsupportedOperation(String),

    /// A handler received a missing, ill-typed or out-of-range parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation JSON is malformed or has the wrong shape.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Decoding or encoding failed inside the `image` crate.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Anything else, usually IO with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImagineError {
    /// Build an [`ImagineError::InvalidOperation`].
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Build an [`ImagineError::UnstringifiableValue`].
    pub fn unstringifiable(
        operation: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnstringifiableValue {
            operation: operation.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`ImagineError::UnsupportedOperation`].
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedOperation(name.into())
    }

    /// Build an [`ImagineError::InvalidParameter`].
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build an [`ImagineError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build an [`ImagineError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
