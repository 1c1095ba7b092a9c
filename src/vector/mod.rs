//! Vector geometry preparation for line symbolizers
//! Clip, project, offset, transform, simplify and smooth feature paths into pixel space

pub mod clip;
pub mod line_pattern;
pub mod offset;
pub mod pipeline;
pub mod simplify;
pub mod smooth;

// Re-export main types for convenience
pub use clip::{clip_geometry, clip_polyline, geometry_parts};
pub use line_pattern::{clip_padding, process_line_pattern};
pub use offset::offset_polyline;
pub use pipeline::{PathSink, TransformStageSet, VertexConverter};
pub use simplify::{douglas_peucker, radial_distance, simplify};
pub use smooth::smooth_polyline;
