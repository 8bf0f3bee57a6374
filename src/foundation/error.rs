/// Convenience result type used across captioner.
pub type CaptionResult<T> = Result<T, CaptionError>;

/// Top-level error taxonomy used by the captioning APIs.
#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    /// The source image could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// An operation needed a loaded image but none was held.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The output image could not be encoded or written.
    #[error("encode error: {0}")]
    Encode(String),

    /// No usable font face could be resolved for the caption.
    #[error("font resolution error: {0}")]
    FontResolution(String),

    /// Invalid user-provided style or text data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptionError {
    /// Build a [`CaptionError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CaptionError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`CaptionError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CaptionError::FontResolution`] value.
    pub fn font_resolution(msg: impl Into<String>) -> Self {
        Self::FontResolution(msg.into())
    }

    /// Build a [`CaptionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
