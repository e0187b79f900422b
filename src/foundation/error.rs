/// Convenience result type used across funnelgraph.
pub type FunnelResult<T> = Result<T, FunnelError>;

/// Top-level error taxonomy used by chart APIs.
#[derive(thiserror::Error, Debug)]
pub enum FunnelError {
    /// Invalid user-provided configuration (values, colors, labels, sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Path geometry that cannot be drawn or morphed (for example an empty path).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FunnelError {
    /// Build a [`FunnelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FunnelError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`FunnelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
