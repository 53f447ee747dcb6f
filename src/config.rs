use crate::bounds::BoundingBox;
use crate::error::{Result, VoronoiError};
use crate::queue::QueueKind;
use serde::{Deserialize, Serialize};

/// Tolerance under which a point is considered to lie on a bisector.
pub const DEFAULT_BOUNDARY_EPSILON: f64 = 1e-3;
/// Determinant threshold under which two bisectors are considered parallel.
pub const DEFAULT_PARALLEL_EPSILON: f64 = 1e-10;
/// Scale of the clip box relative to the larger extent of the sites.
pub const DEFAULT_PADDING: f64 = 1.1;

/// Tuning for a [`crate::Voronoi`].
///
/// Every field has a default, so a partial JSON document such as `{"queue": "ordered"}`
/// is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoronoiConfig {
    pub boundary_epsilon: f64,
    pub parallel_epsilon: f64,
    pub padding: f64,
    pub queue: QueueKind,
    /// When set, inserts outside the box are rejected.
    pub bounds: Option<BoundingBox>,
    /// Move a site off a coordinate already held by another id instead of sharing a cell.
    pub jitter_duplicates: bool,
    /// Seed for the jitter generator.
    pub seed: u64,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
            parallel_epsilon: DEFAULT_PARALLEL_EPSILON,
            padding: DEFAULT_PADDING,
            queue: QueueKind::default(),
            bounds: None,
            jitter_duplicates: false,
            seed: 0,
        }
    }
}

impl VoronoiConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: VoronoiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.boundary_epsilon.is_finite() && self.boundary_epsilon >= 0.0) {
            return Err(VoronoiError::InvalidConfig {
                field: "boundary_epsilon",
                value: self.boundary_epsilon.to_string(),
                hint: "Use a finite, non-negative tolerance.",
            });
        }
        if !(self.parallel_epsilon.is_finite() && self.parallel_epsilon >= 0.0) {
            return Err(VoronoiError::InvalidConfig {
                field: "parallel_epsilon",
                value: self.parallel_epsilon.to_string(),
                hint: "Use a finite, non-negative tolerance.",
            });
        }
        if !(self.padding.is_finite() && self.padding >= 1.0) {
            return Err(VoronoiError::InvalidConfig {
                field: "padding",
                value: self.padding.to_string(),
                hint: "The clip box cannot be smaller than the site extents; use 1.0 or more.",
            });
        }
        if let Some(bounds) = &self.bounds {
            if !bounds.is_valid() {
                return Err(VoronoiError::InvalidConfig {
                    field: "bounds",
                    value: format!("{:?}..{:?}", bounds.min, bounds.max),
                    hint: "min must be strictly below max on both axes.",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let config = VoronoiConfig::from_json(r#"{"queue": "ordered", "padding": 1.5}"#).unwrap();
        assert_eq!(config.queue, QueueKind::Ordered);
        assert_eq!(config.padding, 1.5);
        assert_eq!(config.boundary_epsilon, DEFAULT_BOUNDARY_EPSILON);
        assert!(config.bounds.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let config = VoronoiConfig {
            bounds: Some(BoundingBox::new([0.0, 0.0], [800.0, 600.0])),
            jitter_duplicates: true,
            seed: 42,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(VoronoiConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_validation_errors() {
        let err = VoronoiConfig::from_json(r#"{"padding": 0.5}"#).unwrap_err();
        assert!(matches!(err, VoronoiError::InvalidConfig { field: "padding", .. }));

        let err = VoronoiConfig::from_json(r#"{"bounds": {"min": [5, 0], "max": [1, 10]}}"#).unwrap_err();
        assert!(matches!(err, VoronoiError::InvalidConfig { field: "bounds", .. }));

        let err = VoronoiConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, VoronoiError::Json(_)));
    }
}
