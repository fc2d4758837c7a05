//! Tesseract (4D Hypercube) geometry
//!
//! A tesseract has 16 vertices (all combinations of ±1 for x,y,z,w) and
//! 32 edges. The vertex order splits it into two cubes: indices 0-7 have
//! w = +1 (the near cube) and 8-15 have w = -1 (the far cube). Inside each
//! cube, 0-3 and 4-7 are the two square faces and `i`/`i + 4` are joined.

use crate::Vec4;

/// Number of vertices in each cube half
pub const HALF_VERTEX_COUNT: usize = 8;

/// Total edge count
pub const EDGE_COUNT: usize = 32;

/// The 16 canonical vertices
pub const VERTICES: [Vec4; 16] = [
    Vec4::new(-1.0, -1.0,  1.0,  1.0), // 0
    Vec4::new( 1.0, -1.0,  1.0,  1.0), // 1
    Vec4::new( 1.0,  1.0,  1.0,  1.0), // 2
    Vec4::new(-1.0,  1.0,  1.0,  1.0), // 3
    Vec4::new(-1.0, -1.0, -1.0,  1.0), // 4
    Vec4::new( 1.0, -1.0, -1.0,  1.0), // 5
    Vec4::new( 1.0,  1.0, -1.0,  1.0), // 6
    Vec4::new(-1.0,  1.0, -1.0,  1.0), // 7
    Vec4::new(-1.0, -1.0,  1.0, -1.0), // 8
    Vec4::new( 1.0, -1.0,  1.0, -1.0), // 9
    Vec4::new( 1.0,  1.0,  1.0, -1.0), // 10
    Vec4::new(-1.0,  1.0,  1.0, -1.0), // 11
    Vec4::new(-1.0, -1.0, -1.0, -1.0), // 12
    Vec4::new( 1.0, -1.0, -1.0, -1.0), // 13
    Vec4::new( 1.0,  1.0, -1.0, -1.0), // 14
    Vec4::new(-1.0,  1.0, -1.0, -1.0), // 15
];

/// Which cube half a within-half edge indexes into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Half {
    /// Vertices 0-7 (w = +1)
    Near,
    /// Vertices 8-15 (w = -1)
    Far,
}

impl Half {
    /// Index offset of the first vertex in this half
    #[inline]
    pub const fn offset(self) -> usize {
        match self {
            Half::Near => 0,
            Half::Far => HALF_VERTEX_COUNT,
        }
    }
}

/// An edge between two absolute vertex indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    #[inline]
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Edge between half-local indices `i` and `j`
    #[inline]
    pub const fn within(half: Half, i: usize, j: usize) -> Self {
        Self::new(i + half.offset(), j + half.offset())
    }

    /// Endpoints sorted ascending
    pub fn canonical(&self) -> (usize, usize) {
        (self.a.min(self.b), self.a.max(self.b))
    }
}

/// The tesseract's fixed vertices and edge table
#[derive(Clone, Debug)]
pub struct Tesseract4D {
    vertices: [Vec4; 16],
    edges: Vec<Edge>,
}

impl Tesseract4D {
    /// Build the canonical tesseract
    pub fn new() -> Self {
        Self {
            vertices: VERTICES,
            edges: Self::compute_edges(),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec4; 16] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Build the edge table.
    ///
    /// Per half (far first, then near): the ring `m → (m+1)%4`, the opposite
    /// ring `m+4 → (m+1)%4 + 4`, and the connector `m → m+4`. Then the eight
    /// cross-half edges `i → i+8`.
    fn compute_edges() -> Vec<Edge> {
        let mut edges = Vec::with_capacity(EDGE_COUNT);

        for half in [Half::Far, Half::Near] {
            for m in 0..4 {
                edges.push(Edge::within(half, m, (m + 1) % 4));
                edges.push(Edge::within(half, m + 4, (m + 1) % 4 + 4));
                edges.push(Edge::within(half, m, m + 4));
            }
        }

        for i in 0..HALF_VERTEX_COUNT {
            edges.push(Edge::new(i, i + HALF_VERTEX_COUNT));
        }

        edges
    }
}

impl Default for Tesseract4D {
    fn default() -> Self {
        Self::new()
    }
}
