use super::jet::Jet;
use super::APEX_GUARD;
use crate::element::ElementShape;

/// Reference coordinates seeded as independent variables, plus the shape primitives built from them
#[derive(Clone, Copy, Debug)]
pub(crate) struct Coords {
    axes: [Jet; 3],
}

impl Coords {
    pub fn new(shape: ElementShape, point: [f64; 3]) -> Self {
        let mut z = point[2];
        if shape == ElementShape::Pyramid && 1.0 - z < APEX_GUARD {
            z = 1.0 - APEX_GUARD;
        }

        Self {
            axes: [
                Jet::variable(point[0], 0),
                Jet::variable(point[1], 1),
                Jet::variable(z, 2),
            ],
        }
    }

    pub fn axis(&self, axis: usize) -> Jet {
        self.axes[axis]
    }

    /// Barycentric coordinates of a triangle or tetrahedron (unused entries are zero)
    pub fn barycentric(&self, shape: ElementShape) -> [Jet; 4] {
        let [x, y, z] = self.axes;
        match shape {
            ElementShape::Triangle => [1.0 - x - y, x, y, Jet::constant(0.0)],
            ElementShape::Tetrahedron => [1.0 - x - y - z, x, y, z],
            _ => unreachable!("{} elements have no barycentric coordinates", shape),
        }
    }

    /// Barycentric coordinates of the prism's cross-section triangle
    pub fn prism_lambdas(&self) -> [Jet; 3] {
        let [x, y, _] = self.axes;
        [1.0 - x - y, x, y]
    }

    /// The linear blend that is one on the prism's triangular face containing `vertex` and zero on the other
    pub fn prism_level(&self, vertex: u8) -> Jet {
        if vertex < 3 {
            (1.0 - self.axes[2]) * 0.5
        } else {
            (1.0 + self.axes[2]) * 0.5
        }
    }

    /// Distance from the pyramid's apex plane: `1 - z`
    pub fn pyramid_height(&self) -> Jet {
        1.0 - self.axes[2]
    }

    /// The (rational) nodal function of a pyramid vertex
    pub fn pyramid_vertex(&self, vertex: u8) -> Jet {
        if vertex == 4 {
            return self.axes[2];
        }

        let t = self.pyramid_height();
        let [sx, sy, _] = ElementShape::Pyramid.vertices()[vertex as usize];
        (1.0 + self.axes[0] * sx / t) * (1.0 + self.axes[1] * sy / t) * t * 0.25
    }

    /// Blend for a pyramid base edge: one on the edge's side face, zero on the opposite side face
    pub fn pyramid_edge_blend(&self, a: u8, b: u8) -> Jet {
        let across = 1 - differing_axis(ElementShape::Pyramid, a, b);
        let side = ElementShape::Pyramid.vertices()[a as usize][across];
        (1.0 + self.axes[across] * side / self.pyramid_height()) * 0.5
    }

    /// The multilinear nodal function of a line, quadrangle or hexahedron vertex
    pub fn tensor_vertex(&self, shape: ElementShape, vertex: u8) -> Jet {
        let coords = shape.vertices()[vertex as usize];
        (0..shape.dimension()).fold(Jet::constant(1.0), |acc, d| {
            acc * (1.0 + self.axes[d] * coords[d]) * 0.5
        })
    }

    /// The reference coordinate along the edge `from -> to`, running from `-1` at `from` to `1` at `to`
    ///
    /// The two vertices must differ in exactly one reference coordinate and lie at `±1` along it.
    pub fn tensor_coordinate(&self, shape: ElementShape, from: u8, to: u8) -> Jet {
        let d = differing_axis(shape, from, to);
        self.axes[d] * shape.vertices()[to as usize][d]
    }

    /// The multilinear blend that is one on the edge `a -> b` and zero on the faces opposite to it
    pub fn tensor_edge_blend(&self, shape: ElementShape, a: u8, b: u8) -> Jet {
        let along = differing_axis(shape, a, b);
        let coords = shape.vertices()[a as usize];

        (0..shape.dimension())
            .filter(|d| *d != along)
            .fold(Jet::constant(1.0), |acc, d| {
                acc * (1.0 + self.axes[d] * coords[d]) * 0.5
            })
    }

    /// The linear blend that is one on a hexahedron face and zero on the opposite face (one for 2D shapes)
    pub fn tensor_face_blend(&self, shape: ElementShape, face: usize) -> Jet {
        let vertices = shape.faces()[face];
        let coords = shape.vertices();

        (0..shape.dimension())
            .find(|d| {
                vertices
                    .iter()
                    .all(|v| coords[*v as usize][*d] == coords[vertices[0] as usize][*d])
            })
            .map(|d| (1.0 + self.axes[d] * coords[vertices[0] as usize][d]) * 0.5)
            .unwrap_or_else(|| Jet::constant(1.0))
    }
}

/// The reference axis along which two vertices of an edge differ
fn differing_axis(shape: ElementShape, a: u8, b: u8) -> usize {
    let (pa, pb) = (shape.vertices()[a as usize], shape.vertices()[b as usize]);
    (0..3).find(|d| pa[*d] != pb[*d]).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn tensor_coordinates_run_along_edges() {
        let c = Coords::new(ElementShape::Hexahedron, [-1.0, 1.0, -1.0]);
        // at vertex 3: edge (0, 3) runs along y
        assert!((c.tensor_coordinate(ElementShape::Hexahedron, 0, 3).value - 1.0).abs() < TOL);
        assert!((c.tensor_coordinate(ElementShape::Hexahedron, 3, 0).value + 1.0).abs() < TOL);
        assert!((c.tensor_edge_blend(ElementShape::Hexahedron, 0, 3).value - 1.0).abs() < TOL);
        assert!(c.tensor_edge_blend(ElementShape::Hexahedron, 1, 2).value.abs() < TOL);
    }

    #[test]
    fn face_blends() {
        let c = Coords::new(ElementShape::Hexahedron, [0.2, -0.4, 1.0]);
        // face 5 is z = 1, face 0 is z = -1
        assert!((c.tensor_face_blend(ElementShape::Hexahedron, 5).value - 1.0).abs() < TOL);
        assert!(c.tensor_face_blend(ElementShape::Hexahedron, 0).value.abs() < TOL);

        let c = Coords::new(ElementShape::Quadrangle, [0.2, -0.4, 0.0]);
        assert_eq!(c.tensor_face_blend(ElementShape::Quadrangle, 0).value, 1.0);
    }

    #[test]
    fn pyramid_apex_is_guarded() {
        let c = Coords::new(ElementShape::Pyramid, [0.0, 0.0, 1.0]);
        let apex = c.pyramid_vertex(4);
        assert!((apex.value - 1.0).abs() < 1e-9);
        assert!(c.pyramid_vertex(0).value.is_finite());
        assert!(c.pyramid_vertex(0).gradient.iter().all(|g| g.is_finite()));
    }
}
