//! Geometry transform pipeline.
//!
//! A [`VertexConverter`] runs each geometry through a fixed stage order:
//!
//! 1. clip (optional, feature coordinates)
//! 2. projection and map transform to pixels (always)
//! 3. parallel offset (optional)
//! 4. affine geometry transform (always, identity when unset)
//! 5. simplify (optional)
//! 6. smooth (optional)
//!
//! Finished paths are handed to a [`PathSink`].

use glam::{DAffine2, DVec2};

use crate::geo::{Envelope, Geometry, PixelTransform};
use crate::style::{PlacementConfig, SimplifyAlgorithm};
use crate::vector::clip::{clip_geometry, geometry_parts};
use crate::vector::offset::offset_polyline;
use crate::vector::simplify::simplify;
use crate::vector::smooth::smooth_polyline;

/// Receives pixel-space paths from the pipeline.
pub trait PathSink {
    fn add_path(&mut self, path: Vec<DVec2>);
}

impl PathSink for Vec<Vec<DVec2>> {
    fn add_path(&mut self, path: Vec<DVec2>) {
        self.push(path);
    }
}

/// Which optional stages are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStageSet {
    pub clip: bool,
    pub offset: bool,
    pub simplify: bool,
    pub smooth: bool,
}

impl TransformStageSet {
    pub fn from_config(config: &PlacementConfig) -> Self {
        Self {
            clip: config.clip,
            offset: config.offset.abs() > 0.0,
            simplify: config.simplify_tolerance > 0.0,
            smooth: config.smooth > 0.0,
        }
    }
}

/// Converts geometries to finished pixel-space paths.
#[derive(Debug, Clone, Copy)]
pub struct VertexConverter<'a> {
    stages: TransformStageSet,
    clip_box: Envelope,
    transform: PixelTransform<'a>,
    affine: DAffine2,
    offset: f64,
    simplify_tolerance: f64,
    simplify_algorithm: SimplifyAlgorithm,
    smooth: f64,
}

impl<'a> VertexConverter<'a> {
    /// Build a converter from `config`.
    ///
    /// `clip_box` is in feature coordinates. Offset and simplify tolerance
    /// are multiplied by `scale_factor`.
    pub fn new(
        config: &PlacementConfig,
        clip_box: Envelope,
        transform: PixelTransform<'a>,
        affine: DAffine2,
        scale_factor: f64,
    ) -> Self {
        Self {
            stages: TransformStageSet::from_config(config),
            clip_box,
            transform,
            affine,
            offset: config.offset * scale_factor,
            simplify_tolerance: config.simplify_tolerance * scale_factor,
            simplify_algorithm: config.simplify_algorithm,
            smooth: config.smooth,
        }
    }

    pub fn stages(&self) -> TransformStageSet {
        self.stages
    }

    pub fn clip_box(&self) -> Envelope {
        self.clip_box
    }

    /// Run `geom` through the enabled stages. Returns the number of paths
    /// delivered to `sink`.
    pub fn apply<S: PathSink + ?Sized>(&self, geom: &Geometry, sink: &mut S) -> usize {
        if geom.len() < 2 {
            return 0;
        }

        let parts = if self.stages.clip {
            clip_geometry(geom, &self.clip_box)
        } else {
            geometry_parts(geom)
        };

        let mut emitted = 0;
        for part in parts {
            if let Some(path) = self.convert(&part) {
                sink.add_path(path);
                emitted += 1;
            }
        }
        emitted
    }

    fn convert(&self, part: &[DVec2]) -> Option<Vec<DVec2>> {
        let mut path = self.transform.path_to_pixel(part);
        if path.len() < 2 {
            return None;
        }
        if self.stages.offset {
            path = offset_polyline(&path, self.offset);
        }
        for p in path.iter_mut() {
            *p = self.affine.transform_point2(*p);
        }
        if self.stages.simplify {
            path = simplify(&path, self.simplify_tolerance, self.simplify_algorithm);
        }
        if self.stages.smooth {
            path = smooth_polyline(&path, self.smooth);
        }
        (path.len() >= 2).then_some(path)
    }
}
