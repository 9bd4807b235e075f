//! Shaping of extracted rails into the rail asset document.
//!
//! The asset is a `model.json` document plus two fixed companion entries.
//! Packing the entries into an archive on disk is left to the caller.

mod archive;

pub use archive::{ArchiveEntry, ASSET_GUID_ENTRY, METADATA_ENTRY, METADATA_JSON, MODEL_ENTRY};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::RailExportParams;
use crate::error::{ExportError, Result};
use crate::geometry::Polyline;
use crate::math::Point3;
use crate::operations::SourceRails;

/// Geographic offset of the asset's local origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GeoLocation {
    #[serde(alias = "east")]
    pub east: f64,
    #[serde(alias = "elevation")]
    pub elevation: f64,
    #[serde(alias = "north")]
    pub north: f64,
}

impl GeoLocation {
    /// Creates a geolocation from east, elevation and north offsets.
    #[must_use]
    pub fn new(east: f64, elevation: f64, north: f64) -> Self {
        Self {
            east,
            elevation,
            north,
        }
    }
}

/// Interpolation used by the consumer to fit a spline through the handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplineType {
    #[default]
    Centripetal,
}

/// A spline control point in the asset's Y-up frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineHandle {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

impl SplineHandle {
    /// Converts a Z-up point into a Y-up handle, optionally subtracting the
    /// geolocation: `X = x - east`, `Y = z - elevation`, `Z = y - north`.
    #[must_use]
    pub fn from_point(p: &Point3, offset: Option<&GeoLocation>) -> Self {
        let origin = offset.copied().unwrap_or_default();
        Self {
            x: p.x - origin.east,
            y: p.z - origin.elevation,
            z: p.y - origin.north,
        }
    }
}

/// One exported rail: a named spline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rail {
    pub name: String,
    pub spline_handles: Vec<SplineHandle>,
    pub spline_type: SplineType,
}

/// The complete rail asset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RailAsset {
    pub name: String,
    pub geo_location: GeoLocation,
    pub rails: Vec<Rail>,
}

impl RailAsset {
    /// Creates an empty asset.
    #[must_use]
    pub fn new(name: impl Into<String>, geo_location: GeoLocation) -> Self {
        Self {
            name: name.into(),
            geo_location,
            rails: Vec::new(),
        }
    }

    /// Builds an asset from the rails of several source objects, using the
    /// geolocation settings in `params`.
    #[must_use]
    pub fn from_sources(
        name: impl Into<String>,
        sources: &[SourceRails],
        params: &RailExportParams,
    ) -> Self {
        let mut asset = Self::new(name, params.geolocation);
        for source in sources {
            asset.add_rails(&source.name, &source.rails, params.apply_geolocation);
        }
        tracing::debug!(rails = asset.rails.len(), "assembled rail asset");
        asset
    }

    /// Derives an asset name from an output path's file stem.
    #[must_use]
    pub fn name_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Appends one rail per polyline, all named `name`.
    pub fn add_rails(&mut self, name: &str, polylines: &[Polyline], apply_geolocation: bool) {
        let offset = apply_geolocation.then_some(&self.geo_location);
        let rails: Vec<Rail> = polylines
            .iter()
            .map(|pl| Rail {
                name: name.to_owned(),
                spline_handles: pl
                    .points
                    .iter()
                    .map(|p| SplineHandle::from_point(p, offset))
                    .collect(),
                spline_type: SplineType::Centripetal,
            })
            .collect();
        self.rails.extend(rails);
    }

    /// Renders `model.json`, pretty-printed with 4-space indentation.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Serialization` if a value cannot be
    /// represented in JSON.
    pub fn to_model_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(ExportError::from)?;
        Ok(String::from_utf8(buf).map_err(ExportError::from)?)
    }

    /// Returns the archive entries making up the asset: the model, the fixed
    /// metadata document, and a freshly generated asset id.
    ///
    /// # Errors
    ///
    /// See [`RailAsset::to_model_json`].
    pub fn archive_entries(&self) -> Result<Vec<ArchiveEntry>> {
        Ok(vec![
            ArchiveEntry::new(MODEL_ENTRY, self.to_model_json()?),
            ArchiveEntry::metadata(),
            ArchiveEntry::asset_guid(),
        ])
    }
}
