/// Convenience result type used across the crate.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Top-level error taxonomy used by rendering and playback APIs.
#[derive(thiserror::Error, Debug)]
pub enum HeatmapError {
    /// A color string that is not `#RRGGBB`.
    #[error("malformed color: {0}")]
    MalformedColor(String),

    /// Ridership statistics that cannot normalize glyphs (empty dataset, zero maximum).
    #[error("degenerate statistics: {0}")]
    DegenerateStatistics(String),

    /// A time index outside `[0, len - 1]`.
    #[error("index out of range: {index} is not within 0..{len}")]
    IndexOutOfRange {
        /// Requested index.
        index: i64,
        /// Number of time keys.
        len: usize,
    },

    /// The drawing surface could not be acquired for this frame.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Invalid configuration or dataset shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeatmapError {
    /// Build a [`HeatmapError::MalformedColor`] value.
    pub fn malformed_color(msg: impl Into<String>) -> Self {
        Self::MalformedColor(msg.into())
    }

    /// Build a [`HeatmapError::DegenerateStatistics`] value.
    pub fn degenerate_statistics(msg: impl Into<String>) -> Self {
        Self::DegenerateStatistics(msg.into())
    }

    /// Build a [`HeatmapError::SurfaceUnavailable`] value.
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build a [`HeatmapError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeatmapError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
