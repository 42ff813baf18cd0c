//! Curl-conforming (Nédélec) hierarchical shape functions
//!
//! The lowest order functions are the Whitney edge functions. Higher order functions are split into gradients of
//! H1 functions and rotational combinations of the factors those H1 functions are built from, so the gradient
//! part of the space is exactly the gradient of the H1 space one order higher.

use super::coords::Coords;
use super::function::FunctionKind;
use super::h1;
use super::jet::{Jet, VecJet};
use super::polynomials::lobatto;
use crate::element::{ElementShape, Orientation, SubEntity};

pub(crate) fn shape_function(
    shape: ElementShape,
    kind: FunctionKind,
    anchor: SubEntity,
    c: &Coords,
    orientation: &Orientation,
) -> VecJet {
    let idx = anchor.index();
    let gradient_of = |scalar_kind| {
        VecJet::gradient_of(&h1::shape_function(
            shape,
            scalar_kind,
            anchor,
            c,
            orientation,
        ))
    };

    match kind {
        FunctionKind::WhitneyEdge => whitney_edge(shape, idx, c, orientation),
        FunctionKind::EdgeGradient { k } => gradient_of(FunctionKind::Edge { k }),
        FunctionKind::FaceGradient { i, j } => {
            if shape.faces()[idx].len() == 3 {
                gradient_of(FunctionKind::TriangleFace { i, j })
            } else {
                gradient_of(FunctionKind::QuadFace { i, j })
            }
        }
        FunctionKind::FaceRotational { i, j } => {
            face_rotational(shape, idx, i as usize, j as usize, c, orientation)
        }
        FunctionKind::FaceWhitney { j } => {
            let [la, lb, lc] = triangle_lambdas(shape, idx, c, orientation);
            whitney(&la, &lb).scaled(&h1::blended_legendre(j as usize, lc))
        }
        FunctionKind::FaceDirectional { dir, k } => {
            let [xi, eta, blend] = h1::tensor_face_frame(shape, idx, c, orientation);
            if dir == 0 {
                VecJet::gradient_of(&xi).scaled(&(lobatto(k as usize, eta) * blend))
            } else {
                VecJet::gradient_of(&eta).scaled(&(lobatto(k as usize, xi) * blend))
            }
        }
        FunctionKind::CellGradient { i, j, k } => gradient_of(FunctionKind::Cell { i, j, k }),
        FunctionKind::CellRotational { variant, i, j, k } => {
            let factors = cell_factors(shape, i as usize, j as usize, k as usize, c);
            cell_rotational(variant, &factors)
        }
        FunctionKind::CellWhitney { j, k } => {
            let l = c.barycentric(shape);
            whitney(&l[0], &l[1]).scaled(
                &(h1::blended_legendre(j as usize, l[2]) * h1::blended_legendre(k as usize, l[3])),
            )
        }
        FunctionKind::CellDirectional { dir, a, b } => {
            let dir = dir as usize;
            let (p, q) = match dir {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            VecJet::gradient_of(&c.axis(dir))
                .scaled(&(lobatto(a as usize, c.axis(p)) * lobatto(b as usize, c.axis(q))))
        }
        _ => unreachable!("{:?} is not a curl-conforming shape function", kind),
    }
}

/// `λa ∇λb - λb ∇λa`
fn whitney(la: &Jet, lb: &Jet) -> VecJet {
    VecJet::gradient_of(lb).scaled(la) - VecJet::gradient_of(la).scaled(lb)
}

fn whitney_edge(shape: ElementShape, e: usize, c: &Coords, o: &Orientation) -> VecJet {
    let [a, b] = o.sorted_edge(e);

    match shape {
        ElementShape::Line | ElementShape::Quadrangle | ElementShape::Hexahedron => {
            VecJet::gradient_of(&c.tensor_coordinate(shape, a, b))
                .scaled(&c.tensor_edge_blend(shape, a, b))
                * 0.5
        }
        ElementShape::Triangle | ElementShape::Tetrahedron => {
            let l = c.barycentric(shape);
            whitney(&l[a as usize], &l[b as usize])
        }
        ElementShape::Prism => {
            let l = c.prism_lambdas();
            if a / 3 == b / 3 {
                whitney(&l[a as usize % 3], &l[b as usize % 3]).scaled(&c.prism_level(a))
            } else {
                VecJet::gradient_of(&c.tensor_coordinate(shape, a, b)).scaled(&l[a as usize % 3]) * 0.5
            }
        }
        ElementShape::Point | ElementShape::Pyramid => {
            unreachable!("no curl-conforming functions on {} elements", shape)
        }
    }
}

/// The barycentric coordinates of a triangular face's vertices, in the face's oriented order
fn triangle_lambdas(shape: ElementShape, f: usize, c: &Coords, o: &Orientation) -> [Jet; 3] {
    let l = c.barycentric(shape);
    let [a, b, v] = o.sorted_triangle(f);
    [l[a as usize], l[b as usize], l[v as usize]]
}

fn face_rotational(
    shape: ElementShape,
    f: usize,
    i: usize,
    j: usize,
    c: &Coords,
    o: &Orientation,
) -> VecJet {
    if shape.faces()[f].len() == 3 {
        let [la, lb, lc] = triangle_lambdas(shape, f, c, o);
        let [u, v] = h1::triangle_factors(i, j, la, lb, lc);
        VecJet::gradient_of(&u).scaled(&v) - VecJet::gradient_of(&v).scaled(&u)
    } else {
        let [xi, eta, blend] = h1::tensor_face_frame(shape, f, c, o);
        let (u, v) = (lobatto(i, xi), lobatto(j, eta));
        (VecJet::gradient_of(&u).scaled(&v) - VecJet::gradient_of(&v).scaled(&u)).scaled(&blend)
    }
}

fn cell_factors(shape: ElementShape, i: usize, j: usize, k: usize, c: &Coords) -> [Jet; 3] {
    match shape {
        ElementShape::Tetrahedron => h1::tetrahedron_factors(i, j, k, &c.barycentric(shape)),
        ElementShape::Hexahedron => [
            lobatto(i, c.axis(0)),
            lobatto(j, c.axis(1)),
            lobatto(k, c.axis(2)),
        ],
        _ => unreachable!("no curl-conforming interior functions on {} elements", shape),
    }
}

/// `∇u vw - u∇v w + uv ∇w` (variant 0) or `∇u vw + u∇v w - uv ∇w` (variant 1)
fn cell_rotational(variant: u8, [u, v, w]: &[Jet; 3]) -> VecJet {
    let du = VecJet::gradient_of(u).scaled(&(*v * *w));
    let dv = VecJet::gradient_of(v).scaled(&(*u * *w));
    let dw = VecJet::gradient_of(w).scaled(&(*u * *v));

    if variant == 0 {
        du - dv + dw
    } else {
        du + dv - dw
    }
}
