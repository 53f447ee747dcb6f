use thiserror::Error;

/// Errors raised while configuring a [`crate::Voronoi`].
///
/// Queries never fail: unknown ids answer `false` or `None`.
#[derive(Debug, Error)]
pub enum VoronoiError {
    /// A configuration value is out of its valid range
    #[error("Invalid value for '{field}': {value}. {hint}")]
    InvalidConfig {
        field: &'static str,
        value: String,
        hint: &'static str,
    },

    /// Configuration JSON could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VoronoiError>;
