use super::ElementShape;
use crate::error::OrientationError;
use smallvec::SmallVec;

/// The relative ordering of an element's vertices by their global (mesh-wide) numbers
///
/// Edge and face functions are built in a frame derived from this ordering rather than from the local vertex numbering,
/// so two elements that share an edge or face produce identical functions on it:
/// * Edges run from their lower-ranked vertex to their higher-ranked vertex
/// * Triangular faces use their vertices sorted by rank
/// * Quadrilateral faces start at their lowest-ranked vertex; the first direction points towards its lower-ranked neighbor
///
/// ```
/// use fem_shapes::prelude::*;
///
/// // a triangle whose second and third vertices are swapped relative to the global numbering
/// let orientation = Orientation::from_global_vertices(ElementShape::Triangle, &[10, 42, 17]).unwrap();
///
/// assert_eq!(orientation.sorted_edge(1), [2, 1]);
/// assert!(orientation.edge_is_reversed(1));
/// assert!(!orientation.edge_is_reversed(0));
/// assert_eq!(orientation.sorted_triangle(0), [0, 2, 1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Orientation {
    shape: ElementShape,
    ranks: SmallVec<[u8; 8]>,
}

impl Orientation {
    /// The orientation in which global and local vertex orderings agree
    pub fn identity(shape: ElementShape) -> Self {
        Self {
            shape,
            ranks: (0..shape.vertex_count() as u8).collect(),
        }
    }

    /// Build an orientation from the global numbers of the element's vertices (in local vertex order)
    pub fn from_global_vertices(
        shape: ElementShape,
        global_vertices: &[usize],
    ) -> Result<Self, OrientationError> {
        if global_vertices.len() != shape.vertex_count() {
            return Err(OrientationError::VertexCount {
                shape,
                expected: shape.vertex_count(),
                found: global_vertices.len(),
            });
        }

        let mut by_global: SmallVec<[(usize, u8); 8]> = global_vertices
            .iter()
            .enumerate()
            .map(|(local, global)| (*global, local as u8))
            .collect();
        by_global.sort_unstable();

        if let Some(pair) = by_global.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(OrientationError::DuplicateVertex(pair[0].0));
        }

        let mut ranks: SmallVec<[u8; 8]> = SmallVec::from_elem(0, global_vertices.len());
        for (rank, (_, local)) in by_global.iter().enumerate() {
            ranks[*local as usize] = rank as u8;
        }

        Ok(Self { shape, ranks })
    }

    pub fn shape(&self) -> ElementShape {
        self.shape
    }

    /// The rank of a local vertex among all of the element's vertices
    ///
    /// # Panics
    /// If `vertex` is not a local vertex of the shape
    pub fn rank(&self, vertex: u8) -> u8 {
        self.ranks[vertex as usize]
    }

    /// The local vertices of an edge ordered from lower to higher rank
    ///
    /// # Panics
    /// If `edge` is not an edge of the shape
    pub fn sorted_edge(&self, edge: usize) -> [u8; 2] {
        let [a, b] = self.shape.edges()[edge];
        if self.rank(a) < self.rank(b) {
            [a, b]
        } else {
            [b, a]
        }
    }

    /// Whether an edge's orientation-aware direction opposes its canonical (local) direction
    pub fn edge_is_reversed(&self, edge: usize) -> bool {
        self.sorted_edge(edge)[0] != self.shape.edges()[edge][0]
    }

    /// The local vertices of a triangular face sorted by rank
    ///
    /// # Panics
    /// If `face` is not a face of the shape
    pub fn sorted_triangle(&self, face: usize) -> [u8; 3] {
        let vertices = self.shape.faces()[face];
        debug_assert_eq!(vertices.len(), 3, "face {} is not a triangle", face);

        let mut sorted = [vertices[0], vertices[1], vertices[2]];
        sorted.sort_unstable_by_key(|v| self.rank(*v));
        sorted
    }

    /// The local vertices of a quadrilateral face as `[origin, first neighbor, opposite, second neighbor]`
    ///
    /// The origin is the lowest-ranked vertex; the first neighbor is its lower-ranked neighbor.
    ///
    /// # Panics
    /// If `face` is not a face of the shape
    pub fn quad_frame(&self, face: usize) -> [u8; 4] {
        let vertices = self.shape.faces()[face];
        debug_assert_eq!(vertices.len(), 4, "face {} is not a quadrilateral", face);

        let origin = (0..4).min_by_key(|i| self.rank(vertices[*i])).unwrap_or(0);
        let next = vertices[(origin + 1) % 4];
        let prev = vertices[(origin + 3) % 4];
        let opposite = vertices[(origin + 2) % 4];

        if self.rank(next) < self.rank(prev) {
            [vertices[origin], next, opposite, prev]
        } else {
            [vertices[origin], prev, opposite, next]
        }
    }

    /// Whether the first direction of a quadrilateral face's frame opposes its canonical (local) first direction
    pub fn quad_is_transposed(&self, face: usize) -> bool {
        let vertices = self.shape.faces()[face];
        let [origin, first, _, _] = self.quad_frame(face);
        let position = vertices.iter().position(|v| *v == origin).unwrap_or(0);
        vertices[(position + 1) % 4] != first
    }
}
