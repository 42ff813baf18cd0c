//! Scalar (H1-conforming) hierarchical shape functions
//!
//! Edge functions have the Lobatto bubble `l_k` as their trace along the oriented edge, triangular face bubbles
//! have the trace `l^s_(i+2)(λb - λa, λa + λb) λc P_j(2λc - 1)` and quadrilateral face bubbles the trace
//! `l_i(ξ) l_j(η)`, regardless of the element the entity belongs to. This is what makes them conforming across
//! elements of different shapes.

use super::coords::Coords;
use super::function::FunctionKind;
use super::jet::Jet;
use super::polynomials::{legendre, lobatto, scaled_lobatto};
use crate::element::{ElementShape, Orientation, SubEntity};

pub(crate) fn shape_function(
    shape: ElementShape,
    kind: FunctionKind,
    anchor: SubEntity,
    c: &Coords,
    orientation: &Orientation,
) -> Jet {
    let idx = anchor.index();
    match kind {
        FunctionKind::Constant => Jet::constant(1.0),
        FunctionKind::Vertex => vertex(shape, idx as u8, c),
        FunctionKind::Edge { k } => edge(shape, idx, k as usize, c, orientation),
        FunctionKind::TriangleFace { i, j } => {
            triangle_face(shape, idx, i as usize, j as usize, c, orientation)
        }
        FunctionKind::QuadFace { i, j } => {
            quad_face(shape, idx, i as usize, j as usize, c, orientation)
        }
        FunctionKind::Cell { i, j, k } => cell(shape, i as usize, j as usize, k as usize, c),
        _ => unreachable!("{:?} is not a scalar shape function", kind),
    }
}

fn vertex(shape: ElementShape, v: u8, c: &Coords) -> Jet {
    match shape {
        ElementShape::Point => Jet::constant(1.0),
        ElementShape::Line | ElementShape::Quadrangle | ElementShape::Hexahedron => {
            c.tensor_vertex(shape, v)
        }
        ElementShape::Triangle | ElementShape::Tetrahedron => c.barycentric(shape)[v as usize],
        ElementShape::Prism => c.prism_lambdas()[v as usize % 3] * c.prism_level(v),
        ElementShape::Pyramid => c.pyramid_vertex(v),
    }
}

fn edge(shape: ElementShape, e: usize, k: usize, c: &Coords, o: &Orientation) -> Jet {
    let [a, b] = o.sorted_edge(e);

    match shape {
        ElementShape::Line | ElementShape::Quadrangle | ElementShape::Hexahedron => {
            lobatto(k, c.tensor_coordinate(shape, a, b)) * c.tensor_edge_blend(shape, a, b)
        }
        ElementShape::Triangle | ElementShape::Tetrahedron => {
            let l = c.barycentric(shape);
            simplex_edge(k, l[a as usize], l[b as usize])
        }
        ElementShape::Prism => {
            if a / 3 == b / 3 {
                prism_factor(k, a, b, c) * c.prism_level(a)
            } else {
                prism_factor(k, a, b, c) * c.prism_lambdas()[a as usize % 3]
            }
        }
        ElementShape::Pyramid => {
            if a != 4 && b != 4 {
                scaled_lobatto(k, c.tensor_coordinate(shape, a, b), c.pyramid_height())
                    * c.pyramid_edge_blend(a, b)
            } else {
                simplex_edge(k, c.pyramid_vertex(a), c.pyramid_vertex(b))
            }
        }
        ElementShape::Point => unreachable!("points have no edges"),
    }
}

fn triangle_face(
    shape: ElementShape,
    f: usize,
    i: usize,
    j: usize,
    c: &Coords,
    o: &Orientation,
) -> Jet {
    let [a, b, v] = o.sorted_triangle(f);

    match shape {
        ElementShape::Triangle | ElementShape::Tetrahedron => {
            let l = c.barycentric(shape);
            triangle_bubble(i, j, l[a as usize], l[b as usize], l[v as usize])
        }
        ElementShape::Prism => {
            let l = c.prism_lambdas();
            triangle_bubble(
                i,
                j,
                l[a as usize % 3],
                l[b as usize % 3],
                l[v as usize % 3],
            ) * c.prism_level(a)
        }
        ElementShape::Pyramid => triangle_bubble(
            i,
            j,
            c.pyramid_vertex(a),
            c.pyramid_vertex(b),
            c.pyramid_vertex(v),
        ),
        _ => unreachable!("{} elements have no triangular faces", shape),
    }
}

fn quad_face(
    shape: ElementShape,
    f: usize,
    i: usize,
    j: usize,
    c: &Coords,
    o: &Orientation,
) -> Jet {
    match shape {
        ElementShape::Quadrangle | ElementShape::Hexahedron => {
            let [xi, eta, blend] = tensor_face_frame(shape, f, c, o);
            lobatto(i, xi) * lobatto(j, eta) * blend
        }
        ElementShape::Prism => {
            let [f0, f1, _, f3] = o.quad_frame(f);
            prism_factor(i, f0, f1, c) * prism_factor(j, f0, f3, c)
        }
        ElementShape::Pyramid => {
            let [f0, f1, _, f3] = o.quad_frame(f);
            let t = c.pyramid_height();
            scaled_lobatto(i, c.tensor_coordinate(shape, f0, f1), t)
                * scaled_lobatto(j, c.tensor_coordinate(shape, f0, f3), t)
        }
        _ => unreachable!("{} elements have no quadrilateral faces", shape),
    }
}

fn cell(shape: ElementShape, i: usize, j: usize, k: usize, c: &Coords) -> Jet {
    match shape {
        ElementShape::Tetrahedron => {
            let [u, v, w] = tetrahedron_factors(i, j, k, &c.barycentric(shape));
            u * v * w
        }
        ElementShape::Hexahedron => {
            lobatto(i, c.axis(0)) * lobatto(j, c.axis(1)) * lobatto(k, c.axis(2))
        }
        ElementShape::Prism => {
            let [l0, l1, l2] = c.prism_lambdas();
            triangle_bubble(i, j, l0, l1, l2) * lobatto(k, c.axis(2))
        }
        ElementShape::Pyramid => {
            let t = c.pyramid_height();
            let z = c.axis(2);
            scaled_lobatto(i, c.axis(0), t)
                * scaled_lobatto(j, c.axis(1), t)
                * z
                * legendre(k, 2.0 * z - 1.0)[k]
        }
        _ => unreachable!("{} elements have no interior", shape),
    }
}

/// Edge bubble on a simplex-like pair of barycentric coordinates
pub(crate) fn simplex_edge(k: usize, la: Jet, lb: Jet) -> Jet {
    scaled_lobatto(k, lb - la, la + lb)
}

/// `λ P_j(2λ - 1)`: the polynomial that extends an edge or face function into the rest of a simplex
pub(crate) fn blended_legendre(j: usize, l: Jet) -> Jet {
    l * legendre(j, 2.0 * l - 1.0)[j]
}

/// The two factors `(u_i, v_j)` of a triangular face bubble
pub(crate) fn triangle_factors(i: usize, j: usize, la: Jet, lb: Jet, lc: Jet) -> [Jet; 2] {
    [simplex_edge(i + 2, la, lb), blended_legendre(j, lc)]
}

fn triangle_bubble(i: usize, j: usize, la: Jet, lb: Jet, lc: Jet) -> Jet {
    let [u, v] = triangle_factors(i, j, la, lb, lc);
    u * v
}

/// The three factors `(u_i, v_j, w_k)` of a tetrahedral interior bubble
pub(crate) fn tetrahedron_factors(i: usize, j: usize, k: usize, l: &[Jet; 4]) -> [Jet; 3] {
    [
        simplex_edge(i + 2, l[0], l[1]),
        blended_legendre(j, l[2]),
        blended_legendre(k, l[3]),
    ]
}

/// `[ξ, η, blend]` for a quadrilateral face of a quadrangle or hexahedron, in the face's oriented frame
pub(crate) fn tensor_face_frame(
    shape: ElementShape,
    f: usize,
    c: &Coords,
    o: &Orientation,
) -> [Jet; 3] {
    let [f0, f1, _, f3] = o.quad_frame(f);
    [
        c.tensor_coordinate(shape, f0, f1),
        c.tensor_coordinate(shape, f0, f3),
        c.tensor_face_blend(shape, f),
    ]
}

/// One factor of a prism quadrilateral face bubble: the Lobatto bubble along the prism edge `from -> to`
fn prism_factor(k: usize, from: u8, to: u8, c: &Coords) -> Jet {
    if from / 3 == to / 3 {
        let l = c.prism_lambdas();
        simplex_edge(k, l[from as usize % 3], l[to as usize % 3])
    } else {
        lobatto(k, c.tensor_coordinate(ElementShape::Prism, from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::shape::ALL_SHAPES;

    const TOL: f64 = 1e-12;

    fn eval(shape: ElementShape, kind: FunctionKind, anchor: SubEntity, p: [f64; 3]) -> f64 {
        shape_function(
            shape,
            kind,
            anchor,
            &Coords::new(shape, p),
            &Orientation::identity(shape),
        )
        .value
    }

    #[test]
    fn vertex_functions_are_nodal() {
        for shape in ALL_SHAPES {
            for (v, coords) in shape.vertices().iter().enumerate() {
                for w in 0..shape.vertex_count() {
                    let value = eval(shape, FunctionKind::Vertex, SubEntity::Vertex(w as u8), *coords);
                    let expected = if v == w { 1.0 } else { 0.0 };
                    assert!(
                        (value - expected).abs() < 1e-9,
                        "{}: vertex function {} at vertex {} = {}",
                        shape,
                        w,
                        v,
                        value
                    );
                }
            }
        }
    }

    #[test]
    fn edge_functions_vanish_on_other_edges() {
        for shape in ALL_SHAPES.iter().filter(|s| s.dimension() >= 2) {
            let vertices = shape.vertices();
            for (e, _) in shape.edges().iter().enumerate() {
                for (other, [a, b]) in shape.edges().iter().enumerate() {
                    if other == e {
                        continue;
                    }
                    // sample the other edge at an interior point
                    let (pa, pb) = (vertices[*a as usize], vertices[*b as usize]);
                    let p = [
                        0.37 * pa[0] + 0.63 * pb[0],
                        0.37 * pa[1] + 0.63 * pb[1],
                        0.37 * pa[2] + 0.63 * pb[2],
                    ];
                    let value = eval(*shape, FunctionKind::Edge { k: 3 }, SubEntity::Edge(e as u8), p);
                    assert!(value.abs() < 1e-9, "{}: edge {} on edge {} = {}", shape, e, other, value);
                }
            }
        }
    }

    #[test]
    fn edge_traces_are_lobatto_bubbles() {
        // the trace along edge (0, 1) of each shape is l_k of the edge coordinate
        for shape in ALL_SHAPES.iter().filter(|s| s.dimension() >= 1) {
            let [a, b] = shape.edges()[0];
            let (pa, pb) = (shape.vertices()[a as usize], shape.vertices()[b as usize]);
            for s in [-0.8, -0.25, 0.1, 0.66] {
                let w = (1.0 + s) / 2.0;
                let p = [
                    (1.0 - w) * pa[0] + w * pb[0],
                    (1.0 - w) * pa[1] + w * pb[1],
                    (1.0 - w) * pa[2] + w * pb[2],
                ];
                for k in 2..=5 {
                    let value = eval(*shape, FunctionKind::Edge { k: k as u8 }, SubEntity::Edge(0), p);
                    let expected = lobatto(k, Jet::constant(s)).value;
                    assert!((value - expected).abs() < 1e-10, "{} k={}: {} vs {}", shape, k, value, expected);
                }
            }
        }
    }

    #[test]
    fn bubbles_vanish_on_the_boundary() {
        let shape = ElementShape::Tetrahedron;
        let kind = FunctionKind::Cell { i: 1, j: 0, k: 2 };
        for p in [[0.0, 0.3, 0.2], [0.3, 0.0, 0.2], [0.3, 0.2, 0.0], [0.5, 0.3, 0.2]] {
            assert!(eval(shape, kind, SubEntity::Interior, p).abs() < TOL);
        }
        assert!(eval(shape, kind, SubEntity::Interior, [0.2, 0.25, 0.3]).abs() > TOL);

        let shape = ElementShape::Pyramid;
        let kind = FunctionKind::Cell { i: 2, j: 3, k: 1 };
        for p in [[0.3, 0.1, 0.0], [0.6, 0.1, 0.4], [0.1, -0.6, 0.4]] {
            assert!(eval(shape, kind, SubEntity::Interior, p).abs() < TOL);
        }
    }
}
