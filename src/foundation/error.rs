/// Result alias used throughout the crate.
pub type LineboilResult<T> = Result<T, LineboilError>;

/// Errors surfaced by setup, rendering, playback and export.
#[derive(thiserror::Error, Debug)]
pub enum LineboilError {
    /// Invalid configuration or argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font data missing, unreadable or rejected by the rasterizer.
    #[error("font error: {0}")]
    Font(String),

    /// Producer/consumer orchestration failure.
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Display surface failed to create or present a resource.
    #[error("display error: {0}")]
    Display(String),

    /// Image codec failure (PNG/GIF encode or decode).
    #[error("codec error: {0}")]
    Codec(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LineboilError {
    /// Build a [`LineboilError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LineboilError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`LineboilError::Pipeline`].
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Build a [`LineboilError::Display`].
    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display(msg.into())
    }

    /// Build a [`LineboilError::Codec`].
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
