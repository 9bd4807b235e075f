use crate::config::RailExportParams;
use crate::error::Result;
use crate::geometry::Polyline;
use crate::math::Point3;

use super::{extend_margins, resample, ExtractPolylines};

/// The 1-D skeleton of one source object, already baked to world space.
#[derive(Debug, Clone, Default)]
pub struct MeshSkeleton {
    pub name: String,
    pub vertices: Vec<Point3>,
    pub edges: Vec<(usize, usize)>,
}

impl MeshSkeleton {
    /// Creates a skeleton from its vertex positions and edge list.
    #[must_use]
    pub fn new(name: impl Into<String>, vertices: Vec<Point3>, edges: Vec<(usize, usize)>) -> Self {
        Self {
            name: name.into(),
            vertices,
            edges,
        }
    }
}

/// The rails produced from one source object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRails {
    pub name: String,
    pub rails: Vec<Polyline>,
}

/// Turns one skeleton into margin-extended, evenly resampled rails.
///
/// Runs extraction, then resamples every polyline at
/// `params.handle_distance` and adds one extrapolated margin point at each
/// end.
#[derive(Debug)]
pub struct ExtractRails<'a> {
    skeleton: &'a MeshSkeleton,
    params: &'a RailExportParams,
}

impl<'a> ExtractRails<'a> {
    /// Creates a new rail extraction.
    #[must_use]
    pub fn new(skeleton: &'a MeshSkeleton, params: &'a RailExportParams) -> Self {
        Self { skeleton, params }
    }

    /// Executes the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for unusable parameters and any error
    /// from extraction for malformed skeletons.
    pub fn execute(&self) -> Result<SourceRails> {
        self.params.validate()?;

        let raw = ExtractPolylines::new(
            &self.skeleton.vertices,
            &self.skeleton.edges,
            self.params.merge_threshold,
        )
        .with_sharp_angle(self.params.sharp_angle_threshold_degrees)
        .execute()?;

        let mut rails = Vec::with_capacity(raw.len());
        for polyline in &raw {
            if polyline.len() < 2 {
                tracing::warn!(
                    source = %self.skeleton.name,
                    points = polyline.len(),
                    "skipping degenerate polyline"
                );
                continue;
            }
            let sampled = resample(polyline, self.params.handle_distance)?;
            rails.push(extend_margins(&sampled)?);
        }

        tracing::debug!(source = %self.skeleton.name, rails = rails.len(), "extracted rails");

        Ok(SourceRails {
            name: self.skeleton.name.clone(),
            rails,
        })
    }
}

/// Runs [`ExtractRails`] over many skeletons, preserving input order.
///
/// Skeletons share no data, so with the `parallel` feature they are
/// processed on the rayon thread pool.
///
/// # Errors
///
/// Returns the first error encountered.
pub fn extract_rails_batch(
    skeletons: &[MeshSkeleton],
    params: &RailExportParams,
) -> Result<Vec<SourceRails>> {
    params.validate()?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        skeletons
            .par_iter()
            .map(|skeleton| ExtractRails::new(skeleton, params).execute())
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        skeletons
            .iter()
            .map(|skeleton| ExtractRails::new(skeleton, params).execute())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{RailError, TopologyError};
    use crate::export::{GeoLocation, RailAsset};
    use crate::math::vector_3d::distance;
    use approx::assert_relative_eq;

    fn straight_track(name: &str, length: u32) -> MeshSkeleton {
        let vertices = (0..=length).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
        let edges = (0..length as usize).map(|i| (i, i + 1)).collect();
        MeshSkeleton::new(name, vertices, edges)
    }

    #[test]
    fn straight_track_becomes_one_margined_rail() {
        let params = RailExportParams {
            handle_distance: 3.0,
            ..RailExportParams::default()
        };
        let out = ExtractRails::new(&straight_track("Track", 10), &params)
            .execute()
            .unwrap();
        assert_eq!(out.name, "Track");
        assert_eq!(out.rails.len(), 1);

        // 4 resampled points plus 2 margins, all 10/3 apart.
        let rail = &out.rails[0];
        assert_eq!(rail.len(), 6);
        let xs: Vec<f64> = rail.points.iter().map(|p| p.x).collect();
        let expected = [-10.0 / 3.0, 0.0, 10.0 / 3.0, 20.0 / 3.0, 10.0, 40.0 / 3.0];
        for (x, e) in xs.iter().zip(expected) {
            assert_relative_eq!(*x, e, epsilon = 1e-9);
        }
        for w in rail.points.windows(2) {
            assert_relative_eq!(distance(&w[0], &w[1]), 10.0 / 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn junction_yields_one_rail_per_branch() {
        let skeleton = MeshSkeleton::new(
            "Switch",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(20.0, 0.0, 0.0),
                Point3::new(20.0, 3.0, 0.0),
            ],
            vec![(0, 1), (1, 2), (1, 3)],
        );
        let out = ExtractRails::new(&skeleton, &RailExportParams::default())
            .execute()
            .unwrap();
        assert_eq!(out.rails.len(), 3);
        assert!(out.rails.iter().all(|r| r.len() >= 4));
    }

    #[test]
    fn invalid_params_are_rejected_before_work() {
        let params = RailExportParams {
            handle_distance: -1.0,
            ..RailExportParams::default()
        };
        let err = ExtractRails::new(&straight_track("T", 3), &params)
            .execute()
            .unwrap_err();
        assert!(matches!(err, RailError::Config(_)));
    }

    #[test]
    fn malformed_skeleton_is_rejected() {
        let mut skeleton = straight_track("Broken", 3);
        skeleton.edges.push((2, 99));
        let err = ExtractRails::new(&skeleton, &RailExportParams::default())
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            RailError::Topology(TopologyError::VertexOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn batch_keeps_input_order_and_feeds_the_asset() {
        let skeletons = vec![straight_track("A", 10), straight_track("B", 20), straight_track("C", 5)];
        let params = RailExportParams {
            geolocation: GeoLocation::new(1.0, 0.0, 0.0),
            ..RailExportParams::default()
        };
        let sources = extract_rails_batch(&skeletons, &params).unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let asset = RailAsset::from_sources("yard", &sources, &params);
        assert_eq!(asset.rails.len(), 3);
        // Track A resampled at 5: [-5, 0, 5, 10, 15], shifted by east = 1.
        let xs: Vec<f64> = asset.rails[0].spline_handles.iter().map(|h| h.x).collect();
        assert_eq!(xs, vec![-6.0, -1.0, 4.0, 9.0, 14.0]);
    }

    #[test]
    fn empty_skeleton_gives_no_rails() {
        let out = ExtractRails::new(&MeshSkeleton::default(), &RailExportParams::default())
            .execute()
            .unwrap();
        assert!(out.rails.is_empty());
    }
}
