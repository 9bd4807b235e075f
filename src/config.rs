use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::export::GeoLocation;
use crate::operations::DEFAULT_SHARP_ANGLE_DEGREES;

/// Parameters controlling rail extraction and export.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// let params = railtrace::RailExportParams::from_json(r#"{"handle_distance": 2.5}"#).unwrap();
/// assert_eq!(params.handle_distance, 2.5);
/// assert_eq!(params.merge_threshold, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailExportParams {
    /// Target spacing between resampled spline handles.
    pub handle_distance: f64,
    /// Vertices closer than this are welded before extraction.
    pub merge_threshold: f64,
    /// Turning angle, in degrees, above which a chain is split.
    pub sharp_angle_threshold_degrees: f64,
    /// Geographic origin written to the asset.
    pub geolocation: GeoLocation,
    /// Subtract `geolocation` from every exported handle.
    pub apply_geolocation: bool,
}

impl Default for RailExportParams {
    fn default() -> Self {
        Self {
            handle_distance: 5.0,
            merge_threshold: 0.1,
            sharp_angle_threshold_degrees: DEFAULT_SHARP_ANGLE_DEGREES,
            geolocation: GeoLocation::default(),
            apply_geolocation: true,
        }
    }
}

impl RailExportParams {
    /// Parses and validates parameters from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and
    /// `ConfigError::Invalid` if validation fails.
    pub fn from_json(text: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(text).map_err(ConfigError::from)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (
                "handle_distance",
                self.handle_distance,
                self.handle_distance.is_finite() && self.handle_distance > 0.0,
                "must be positive and finite",
            ),
            (
                "merge_threshold",
                self.merge_threshold,
                self.merge_threshold.is_finite() && self.merge_threshold >= 0.0,
                "must be non-negative and finite",
            ),
            (
                "sharp_angle_threshold_degrees",
                self.sharp_angle_threshold_degrees,
                self.sharp_angle_threshold_degrees.is_finite()
                    && self.sharp_angle_threshold_degrees >= 0.0,
                "must be non-negative and finite",
            ),
            ("geolocation.east", self.geolocation.east, self.geolocation.east.is_finite(), "must be finite"),
            (
                "geolocation.elevation",
                self.geolocation.elevation,
                self.geolocation.elevation.is_finite(),
                "must be finite",
            ),
            ("geolocation.north", self.geolocation.north, self.geolocation.north.is_finite(), "must be finite"),
        ];

        for (parameter, value, ok, reason) in checks {
            if !ok {
                return Err(ConfigError::Invalid {
                    parameter,
                    value,
                    reason,
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RailError;

    #[test]
    fn defaults_are_valid() {
        let params = RailExportParams::default();
        assert!(params.validate().is_ok());
        assert!((params.sharp_angle_threshold_degrees - 90.0).abs() < 1e-12);
        assert!(params.apply_geolocation);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let params = RailExportParams::from_json(
            r#"{"merge_threshold": 0.05, "geolocation": {"East": 10.0, "north": 20.0}}"#,
        )
        .unwrap();
        assert!((params.merge_threshold - 0.05).abs() < 1e-12);
        assert!((params.handle_distance - 5.0).abs() < 1e-12);
        assert_eq!(params.geolocation, GeoLocation::new(10.0, 0.0, 20.0));
    }

    #[test]
    fn zero_step_is_invalid() {
        let err = RailExportParams::from_json(r#"{"handle_distance": 0.0}"#).unwrap_err();
        assert!(matches!(
            err,
            RailError::Config(ConfigError::Invalid {
                parameter: "handle_distance",
                ..
            })
        ));
    }

    #[test]
    fn negative_merge_threshold_is_invalid() {
        let params = RailExportParams {
            merge_threshold: -0.1,
            ..RailExportParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = RailExportParams::from_json("{not json").unwrap_err();
        assert!(matches!(err, RailError::Config(ConfigError::Parse(_))));
    }
}
