mod extract;
mod margin;
mod rails;
mod resample;

pub use extract::{extract_polylines, ExtractPolylines, DEFAULT_SHARP_ANGLE_DEGREES};
pub use margin::{extend_margins, ExtendMargins};
pub use rails::{extract_rails_batch, ExtractRails, MeshSkeleton, SourceRails};
pub use resample::{resample, Resample, MAX_INTERVALS};
