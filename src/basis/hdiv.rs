use super::coords::Coords;
use super::function::FunctionKind;
use super::hcurl;
use super::jet::VecJet;
use crate::element::{ElementShape, Orientation, SubEntity};

/// Divergence-conforming shape functions
///
/// In 2D these are the curl-conforming functions rotated by 90°, which turns tangential continuity into normal
/// continuity. In 3D only the lowest order face flux functions are available.
pub(crate) fn shape_function(
    shape: ElementShape,
    kind: FunctionKind,
    anchor: SubEntity,
    c: &Coords,
    orientation: &Orientation,
) -> VecJet {
    match (shape, kind) {
        (ElementShape::Triangle | ElementShape::Quadrangle, _) => {
            hcurl::shape_function(shape, kind, anchor, c, orientation).rotated()
        }
        (ElementShape::Tetrahedron, FunctionKind::FaceFlux) => {
            let l = c.barycentric(shape);
            let [a, b, v] = orientation.sorted_triangle(anchor.index());
            let [ga, gb, gv] = [a, b, v].map(|vertex| VecJet::gradient_of(&l[vertex as usize]));

            (gb.cross(&gv).scaled(&l[a as usize])
                + gv.cross(&ga).scaled(&l[b as usize])
                + ga.cross(&gb).scaled(&l[v as usize]))
                * 2.0
        }
        (ElementShape::Hexahedron, FunctionKind::FaceFlux) => {
            let face = anchor.index();
            let [f0, f1, _, f3] = orientation.quad_frame(face);
            let xi = VecJet::gradient_of(&c.tensor_coordinate(shape, f0, f1));
            let eta = VecJet::gradient_of(&c.tensor_coordinate(shape, f0, f3));

            xi.cross(&eta).scaled(&c.tensor_face_blend(shape, face)) * 0.25
        }
        _ => unreachable!("no {:?} divergence-conforming function on {} elements", kind, shape),
    }
}
