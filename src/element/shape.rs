use super::registry::{parse_registered, RegisteredType};
use crate::error::UnknownTypeError;
use std::{fmt, str::FromStr};

/// The reference element shapes supported by the basis generator
///
/// Reference geometry:
/// * Line: `[-1, 1]`
/// * Triangle: `(0, 0), (1, 0), (0, 1)`
/// * Quadrangle: `[-1, 1]^2`
/// * Tetrahedron: `(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 0, 1)`
/// * Hexahedron: `[-1, 1]^3`
/// * Prism: the reference triangle extruded over `z ∈ [-1, 1]`
/// * Pyramid: the base `[-1, 1]^2` at `z = 0` with its apex at `(0, 0, 1)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementShape {
    Point,
    Line,
    Triangle,
    Quadrangle,
    Tetrahedron,
    Hexahedron,
    Prism,
    Pyramid,
}

/// Every [ElementShape] in registry order
pub const ALL_SHAPES: [ElementShape; 8] = [
    ElementShape::Point,
    ElementShape::Line,
    ElementShape::Triangle,
    ElementShape::Quadrangle,
    ElementShape::Tetrahedron,
    ElementShape::Hexahedron,
    ElementShape::Prism,
    ElementShape::Pyramid,
];

static POINT_VERTICES: [[f64; 3]; 1] = [[0.0, 0.0, 0.0]];
static LINE_VERTICES: [[f64; 3]; 2] = [[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
static TRIANGLE_VERTICES: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
static QUADRANGLE_VERTICES: [[f64; 3]; 4] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
];
static TETRAHEDRON_VERTICES: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];
static HEXAHEDRON_VERTICES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];
static PRISM_VERTICES: [[f64; 3]; 6] = [
    [0.0, 0.0, -1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, -1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
];
static PYRAMID_VERTICES: [[f64; 3]; 5] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

static LINE_EDGES: [[u8; 2]; 1] = [[0, 1]];
static TRIANGLE_EDGES: [[u8; 2]; 3] = [[0, 1], [1, 2], [2, 0]];
static QUADRANGLE_EDGES: [[u8; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];
static TETRAHEDRON_EDGES: [[u8; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];
static HEXAHEDRON_EDGES: [[u8; 2]; 12] = [
    [0, 1],
    [0, 3],
    [0, 4],
    [1, 2],
    [1, 5],
    [2, 3],
    [2, 6],
    [3, 7],
    [4, 5],
    [4, 7],
    [5, 6],
    [6, 7],
];
static PRISM_EDGES: [[u8; 2]; 9] = [
    [0, 1],
    [0, 2],
    [0, 3],
    [1, 2],
    [1, 4],
    [2, 5],
    [3, 4],
    [3, 5],
    [4, 5],
];
static PYRAMID_EDGES: [[u8; 2]; 8] = [
    [0, 1],
    [0, 3],
    [0, 4],
    [1, 2],
    [1, 4],
    [2, 3],
    [2, 4],
    [3, 4],
];

// quadrilateral faces are listed cyclically
static TRIANGLE_FACES: [&[u8]; 1] = [&[0, 1, 2]];
static QUADRANGLE_FACES: [&[u8]; 1] = [&[0, 1, 2, 3]];
static TETRAHEDRON_FACES: [&[u8]; 4] = [&[0, 1, 2], &[0, 1, 3], &[0, 2, 3], &[1, 2, 3]];
static HEXAHEDRON_FACES: [&[u8]; 6] = [
    &[0, 3, 2, 1],
    &[0, 1, 5, 4],
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[4, 5, 6, 7],
];
static PRISM_FACES: [&[u8]; 5] = [
    &[0, 2, 1],
    &[0, 1, 4, 3],
    &[0, 3, 5, 2],
    &[1, 2, 5, 4],
    &[3, 4, 5],
];
static PYRAMID_FACES: [&[u8]; 5] = [
    &[0, 3, 2, 1],
    &[0, 1, 4],
    &[1, 2, 4],
    &[2, 3, 4],
    &[3, 0, 4],
];

impl ElementShape {
    /// The registry name of the shape
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Quadrangle => "quadrangle",
            Self::Tetrahedron => "tetrahedron",
            Self::Hexahedron => "hexahedron",
            Self::Prism => "prism",
            Self::Pyramid => "pyramid",
        }
    }

    /// Topological dimension of the reference element
    pub fn dimension(&self) -> usize {
        match self {
            Self::Point => 0,
            Self::Line => 1,
            Self::Triangle | Self::Quadrangle => 2,
            Self::Tetrahedron | Self::Hexahedron | Self::Prism | Self::Pyramid => 3,
        }
    }

    /// Reference coordinates of the element's vertices
    pub fn vertices(&self) -> &'static [[f64; 3]] {
        match self {
            Self::Point => &POINT_VERTICES,
            Self::Line => &LINE_VERTICES,
            Self::Triangle => &TRIANGLE_VERTICES,
            Self::Quadrangle => &QUADRANGLE_VERTICES,
            Self::Tetrahedron => &TETRAHEDRON_VERTICES,
            Self::Hexahedron => &HEXAHEDRON_VERTICES,
            Self::Prism => &PRISM_VERTICES,
            Self::Pyramid => &PYRAMID_VERTICES,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// The element's edges as pairs of local vertex indices, in canonical order
    ///
    /// A line is its own (single) edge.
    pub fn edges(&self) -> &'static [[u8; 2]] {
        match self {
            Self::Point => &[],
            Self::Line => &LINE_EDGES,
            Self::Triangle => &TRIANGLE_EDGES,
            Self::Quadrangle => &QUADRANGLE_EDGES,
            Self::Tetrahedron => &TETRAHEDRON_EDGES,
            Self::Hexahedron => &HEXAHEDRON_EDGES,
            Self::Prism => &PRISM_EDGES,
            Self::Pyramid => &PYRAMID_EDGES,
        }
    }

    /// The element's faces as lists of local vertex indices, in canonical order
    ///
    /// Triangles and Quadrangles are their own (single) face.
    pub fn faces(&self) -> &'static [&'static [u8]] {
        match self {
            Self::Point | Self::Line => &[],
            Self::Triangle => &TRIANGLE_FACES,
            Self::Quadrangle => &QUADRANGLE_FACES,
            Self::Tetrahedron => &TETRAHEDRON_FACES,
            Self::Hexahedron => &HEXAHEDRON_FACES,
            Self::Prism => &PRISM_FACES,
            Self::Pyramid => &PYRAMID_FACES,
        }
    }

    /// Whether the shape has a volume interior (distinct from its faces)
    pub fn has_interior(&self) -> bool {
        self.dimension() == 3
    }

    /// The sub-entity that is the element itself
    ///
    /// This is the interior of 3D shapes, face `0` of 2D shapes, edge `0` of a line and vertex `0` of a point.
    pub fn cell_entity(&self) -> SubEntity {
        match self.dimension() {
            0 => SubEntity::Vertex(0),
            1 => SubEntity::Edge(0),
            2 => SubEntity::Face(0),
            _ => SubEntity::Interior,
        }
    }

    /// Every sub-entity of the shape in DOF layout order: vertices, edges, faces, then the interior
    pub fn sub_entities(&self) -> Vec<SubEntity> {
        let mut entities: Vec<SubEntity> = (0..self.vertex_count())
            .map(|v| SubEntity::Vertex(v as u8))
            .chain((0..self.edges().len()).map(|e| SubEntity::Edge(e as u8)))
            .chain((0..self.faces().len()).map(|f| SubEntity::Face(f as u8)))
            .collect();

        if self.has_interior() {
            entities.push(SubEntity::Interior);
        }

        entities
    }
}

impl RegisteredType for ElementShape {
    const KIND: &'static str = "element shape";

    fn all() -> &'static [Self] {
        &ALL_SHAPES
    }

    fn name(&self) -> &'static str {
        ElementShape::name(self)
    }
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ElementShape {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_registered(s)
    }
}

/// A topological piece of a reference element that basis functions (and their DOFs) are attached to
///
/// The variant order is the DOF layout order: vertices first, then edges, faces and the interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubEntity {
    Vertex(u8),
    Edge(u8),
    Face(u8),
    Interior,
}

impl SubEntity {
    /// Topological dimension of the sub-entity within a given shape
    pub fn dimension(&self, shape: ElementShape) -> usize {
        match self {
            Self::Vertex(_) => 0,
            Self::Edge(_) => 1,
            Self::Face(_) => 2,
            Self::Interior => shape.dimension(),
        }
    }

    /// The index of the sub-entity among its siblings (zero for the interior)
    pub fn index(&self) -> usize {
        match self {
            Self::Vertex(i) | Self::Edge(i) | Self::Face(i) => *i as usize,
            Self::Interior => 0,
        }
    }
}

impl fmt::Display for SubEntity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Vertex(i) => write!(f, "vertex {}", i),
            Self::Edge(i) => write!(f, "edge {}", i),
            Self::Face(i) => write!(f, "face {}", i),
            Self::Interior => write!(f, "interior"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euler_characteristic() {
        for shape in ALL_SHAPES {
            let (v, e, f) = (
                shape.vertex_count() as i32,
                shape.edges().len() as i32,
                shape.faces().len() as i32,
            );
            match shape.dimension() {
                0 => assert_eq!(v, 1),
                1 => assert_eq!(v - e, 1),
                2 => assert_eq!(v - e + f, 1),
                _ => assert_eq!(v - e + f, 2),
            }
        }
    }

    #[test]
    fn face_boundaries_are_edges() {
        for shape in ALL_SHAPES.iter().filter(|s| s.dimension() >= 2) {
            let edges = shape.edges();
            for face in shape.faces() {
                for i in 0..face.len() {
                    let (a, b) = (face[i], face[(i + 1) % face.len()]);
                    assert!(
                        edges.contains(&[a, b]) || edges.contains(&[b, a]),
                        "{}: face side ({}, {}) is not an edge",
                        shape,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn edges_connect_distinct_vertices() {
        for shape in ALL_SHAPES {
            for [a, b] in shape.edges() {
                assert_ne!(a, b);
                assert!((*b as usize) < shape.vertex_count());
            }
        }
    }

    #[test]
    fn sub_entity_layout_order() {
        let entities = ElementShape::Tetrahedron.sub_entities();
        assert_eq!(entities.len(), 4 + 6 + 4 + 1);
        assert!(entities.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(entities.last(), Some(&SubEntity::Interior));

        let entities = ElementShape::Triangle.sub_entities();
        assert_eq!(entities.last(), Some(&SubEntity::Face(0)));
    }

    #[test]
    fn names_round_trip() {
        for shape in ALL_SHAPES {
            assert_eq!(shape.name().parse::<ElementShape>(), Ok(shape));
        }
        assert!("hexagon".parse::<ElementShape>().is_err());
    }
}
