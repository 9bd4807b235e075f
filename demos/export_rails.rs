//! Runs the rail pipeline on two synthetic skeletons and prints the asset
//! archive entries.
//!
//! ```text
//! cargo run --example export_rails
//! RUST_LOG=railtrace=debug cargo run --example export_rails
//! ```

use std::path::Path;

use railtrace::export::RailAsset;
use railtrace::math::Point3;
use railtrace::operations::{extract_rails_batch, MeshSkeleton};
use railtrace::RailExportParams;

/// A ring of `segments` vertices, as a baked closed curve would produce.
fn loop_track(radius: f64, segments: u32) -> MeshSkeleton {
    let vertices = (0..segments)
        .map(|i| {
            let t = std::f64::consts::TAU * f64::from(i) / f64::from(segments);
            Point3::new(radius * t.cos(), radius * t.sin(), 0.0)
        })
        .collect();
    let n = segments as usize;
    let edges = (0..n).map(|i| (i, (i + 1) % n)).collect();
    MeshSkeleton::new("Loop", vertices, edges)
}

/// A straight main line with a diverging siding, plus a duplicated vertex
/// at the switch that welding removes.
fn switch_track() -> MeshSkeleton {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(20.0, 0.0, 0.0),
        Point3::new(20.02, 0.0, 0.0),
        Point3::new(40.0, 0.0, 0.5),
        Point3::new(38.0, 4.0, 0.5),
    ];
    MeshSkeleton::new("Switch", vertices, vec![(0, 1), (2, 3), (2, 4)])
}

fn main() -> railtrace::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("railtrace=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let params = RailExportParams::from_json(
        r#"{"handle_distance": 4.0, "geolocation": {"East": 1000.0, "Elevation": 50.0, "North": 2000.0}}"#,
    )?;

    let skeletons = vec![loop_track(25.0, 64), switch_track()];
    let sources = extract_rails_batch(&skeletons, &params)?;
    for source in &sources {
        tracing::info!(source = %source.name, rails = source.rails.len(), "processed");
    }

    let name = RailAsset::name_from_path(Path::new("out/demo_yard.dasset"));
    let asset = RailAsset::from_sources(name, &sources, &params);
    for entry in asset.archive_entries()? {
        println!("== {} ({} bytes)", entry.name, entry.contents.len());
        if entry.contents.len() < 200 {
            println!("{}", entry.contents);
        }
    }
    Ok(())
}
