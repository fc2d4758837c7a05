//! Dotted-edge sampling
//!
//! An edge is drawn as glyphs placed at regular intervals along its
//! rasterized line. A countdown starts at the stride and is decremented once
//! per lattice point; a glyph is emitted when it reaches zero and the counter
//! is reloaded once it drops below zero. The first glyph lands on the
//! `stride`-th point and the rest follow every `stride + 1` points.

use ascii4d_math::Edge;

use crate::projection::ProjectedPoint;
use crate::raster::LineIter;

/// Default spacing parameter for edge glyphs
pub const DEFAULT_STRIDE: u32 = 7;

/// Samples glyph positions along edges
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSampler {
    stride: u32,
}

impl Default for EdgeSampler {
    fn default() -> Self {
        Self::new(DEFAULT_STRIDE)
    }
}

impl EdgeSampler {
    /// Create a sampler. A stride of 0 is raised to 1.
    pub fn new(stride: u32) -> Self {
        Self { stride: stride.max(1) }
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Glyph positions along the line from `from` to `to`.
    pub fn sample(&self, from: (i32, i32), to: (i32, i32)) -> SampleIter {
        SampleIter {
            line: LineIter::new(from, to),
            stride: self.stride as i64,
            countdown: self.stride as i64,
        }
    }

    /// Glyph positions along a tesseract edge, using the projected points.
    pub fn sample_edge(&self, points: &[ProjectedPoint], edge: Edge) -> SampleIter {
        self.sample(points[edge.a].screen(), points[edge.b].screen())
    }

    /// Number of glyphs a line of `lattice_points` points receives.
    pub fn glyph_count(&self, lattice_points: usize) -> usize {
        (lattice_points + 1) / (self.stride as usize + 1)
    }
}

/// Iterator returned by [`EdgeSampler::sample`]
#[derive(Clone, Debug)]
pub struct SampleIter {
    line: LineIter,
    stride: i64,
    countdown: i64,
}

impl Iterator for SampleIter {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        for point in self.line.by_ref() {
            self.countdown -= 1;
            let emit = self.countdown == 0;
            if self.countdown < 0 {
                self.countdown = self.stride;
            }
            if emit {
                return Some(point);
            }
        }
        None
    }
}
