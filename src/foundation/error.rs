/// Convenience result type used across framesynth.
pub type SynthResult<T> = Result<T, SynthError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Frame synthesis itself never fails once a [`SceneSimulator`](crate::SceneSimulator) has been
/// constructed; these errors come from construction-time validation and from the IO helpers
/// around the engine.
#[derive(thiserror::Error, Debug)]
pub enum SynthError {
    /// Invalid configuration or sprite template data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while locating or decoding sprite assets.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while streaming frames to the video encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing label files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SynthError {
    /// Build a [`SynthError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SynthError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SynthError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SynthError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
